//! Document aggregate entity.
//!
//! A document is a single markdown source owned by exactly one user.
//! It moves through `nonexistent → existing → nonexistent`; updates are a
//! self-loop on `existing` and deletion is permanent.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    DocumentId, OwnedByUser, OwnerIdentity, Timestamp, UserId, ValidationError,
};

/// Maximum length for a document title, in characters.
pub const MAX_TITLE_LENGTH: usize = 500;

/// Document aggregate.
///
/// # Invariants
///
/// - `id` is globally unique and never changes
/// - `user_id` never changes after creation
/// - `title` is 1-500 characters
/// - `content` is not blank
/// - `updated_at >= created_at`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    id: DocumentId,
    user_id: UserId,
    user_email: String,
    title: String,
    content: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Document {
    /// Creates a brand-new document for `owner` with a fresh id.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or content is blank
    /// - `TooLong` if the title exceeds [`MAX_TITLE_LENGTH`]
    pub fn create(
        owner: &OwnerIdentity,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let content = content.into();
        Self::validate_title(&title)?;
        Self::validate_content(&content)?;

        let now = Timestamp::now();
        Ok(Self {
            id: DocumentId::new(),
            user_id: owner.id.clone(),
            user_email: owner.email.clone(),
            title,
            content,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a document from persistence (no validation).
    pub fn reconstitute(
        id: DocumentId,
        user_id: UserId,
        user_email: String,
        title: String,
        content: String,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            user_email,
            title,
            content,
            created_at,
            updated_at,
        }
    }

    /// Replaces title and content, re-syncs the owner email, and bumps
    /// `updated_at`.
    ///
    /// Validation happens before any field is touched, so a rejected revision
    /// leaves the document unchanged.
    pub fn revise(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
        owner_email: impl Into<String>,
    ) -> Result<(), ValidationError> {
        let title = title.into();
        let content = content.into();
        Self::validate_title(&title)?;
        Self::validate_content(&content)?;

        self.title = title;
        self.content = content;
        self.user_email = owner_email.into();
        self.updated_at = Timestamp::now().at_least(self.created_at);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Validation
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_title(title: &str) -> Result<(), ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title"));
        }
        let len = title.chars().count();
        if len > MAX_TITLE_LENGTH {
            return Err(ValidationError::too_long("title", MAX_TITLE_LENGTH, len));
        }
        Ok(())
    }

    fn validate_content(content: &str) -> Result<(), ValidationError> {
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        Ok(())
    }
}

impl OwnedByUser for Document {
    fn owner_id(&self) -> &UserId {
        &self.user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> OwnerIdentity {
        OwnerIdentity::new("gh-1", "one@example.com").unwrap()
    }

    #[test]
    fn create_sets_both_timestamps_equal() {
        let doc = Document::create(&owner(), "Notes", "# Notes").unwrap();

        assert_eq!(doc.created_at(), doc.updated_at());
        assert_eq!(doc.user_id().as_str(), "gh-1");
        assert_eq!(doc.user_email(), "one@example.com");
    }

    #[test]
    fn create_assigns_fresh_ids() {
        let a = Document::create(&owner(), "A", "a").unwrap();
        let b = Document::create(&owner(), "B", "b").unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn create_rejects_blank_content() {
        let err = Document::create(&owner(), "T", "  \n ").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("content"));
    }

    #[test]
    fn create_rejects_blank_title() {
        let err = Document::create(&owner(), "", "body").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("title"));
    }

    #[test]
    fn title_limit_counts_characters_not_bytes() {
        let title: String = "é".repeat(MAX_TITLE_LENGTH);
        assert!(Document::create(&owner(), title, "body").is_ok());

        let too_long: String = "x".repeat(MAX_TITLE_LENGTH + 1);
        let err = Document::create(&owner(), too_long, "body").unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 500, actual: 501, .. }));
    }

    #[test]
    fn revise_replaces_fields_and_keeps_identity() {
        let mut doc = Document::create(&owner(), "Old", "old body").unwrap();
        let id = *doc.id();
        let created = *doc.created_at();

        doc.revise("New", "new body", "renamed@example.com").unwrap();

        assert_eq!(*doc.id(), id);
        assert_eq!(*doc.created_at(), created);
        assert_eq!(doc.title(), "New");
        assert_eq!(doc.content(), "new body");
        assert_eq!(doc.user_email(), "renamed@example.com");
        assert!(doc.updated_at() >= doc.created_at());
    }

    #[test]
    fn rejected_revision_leaves_document_untouched() {
        let mut doc = Document::create(&owner(), "Keep", "keep body").unwrap();
        let before = doc.clone();

        assert!(doc.revise("Keep", "", "x@example.com").is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn ownership_is_by_user_id() {
        let doc = Document::create(&owner(), "T", "c").unwrap();
        assert!(doc.is_owner(&UserId::new("gh-1").unwrap()));
        assert!(!doc.is_owner(&UserId::new("gh-2").unwrap()));
    }
}
