//! Document Repository Port - Owner-scoped document persistence.
//!
//! Every read and write takes the owner's id. A document owned by someone
//! else is reported exactly like a missing one.

use async_trait::async_trait;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError, UserId};
use crate::domain::quota::QuotaLimit;

/// Result of a quota-guarded insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The document was written.
    Inserted,
    /// The owner already holds `current` documents; nothing was written.
    QuotaExceeded { current: u32, limit: u32 },
}

/// Port for document persistence.
///
/// # Contract
///
/// Implementations must:
/// - Scope every operation by owner id
/// - Make count-then-insert atomic per owner in `insert_within_quota`
/// - Make update and delete single conditional operations on (id, owner)
///
/// # Usage
///
/// ```rust,ignore
/// let repo: &dyn DocumentRepository = get_repo();
///
/// match repo.insert_within_quota(&doc, QuotaLimit::Limited(500)).await? {
///     InsertOutcome::Inserted => {}
///     InsertOutcome::QuotaExceeded { limit, .. } => return Err(...),
/// }
///
/// let mine = repo.list_by_owner(&user_id).await?;
/// ```
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// All documents owned by `owner`, most recently updated first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, DomainError>;

    /// The document with `id` if `owner` owns it.
    async fn find_owned(
        &self,
        id: &DocumentId,
        owner: &UserId,
    ) -> Result<Option<Document>, DomainError>;

    /// Number of documents owned by `owner`.
    async fn count_by_owner(&self, owner: &UserId) -> Result<u32, DomainError>;

    /// Inserts `document` unless its owner already holds `limit` documents.
    ///
    /// The count and the insert must not interleave with another insert for
    /// the same owner.
    async fn insert_within_quota(
        &self,
        document: &Document,
        limit: QuotaLimit,
    ) -> Result<InsertOutcome, DomainError>;

    /// Writes title, content, email and updated_at of an existing document.
    ///
    /// Returns false when no document with this id belongs to the owner.
    async fn update_owned(&self, document: &Document) -> Result<bool, DomainError>;

    /// Removes the document. Returns false when nothing matched.
    async fn delete_owned(&self, id: &DocumentId, owner: &UserId) -> Result<bool, DomainError>;
}
