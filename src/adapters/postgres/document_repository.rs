//! PostgreSQL implementation of DocumentRepository.
//!
//! Every statement filters on `user_id`, so a foreign row is never read,
//! changed or removed. Quota-guarded inserts serialize per owner on a
//! transaction-scoped advisory lock.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::domain::quota::QuotaLimit;
use crate::ports::{DocumentRepository, InsertOutcome};

/// PostgreSQL implementation of the DocumentRepository port.
///
/// # Usage
///
/// ```rust,ignore
/// let pool = PgPool::connect("postgres://...").await?;
/// let repo = PostgresDocumentRepository::new(pool);
///
/// repo.insert_within_quota(&document, QuotaLimit::Limited(500)).await?;
/// ```
#[derive(Clone)]
pub struct PostgresDocumentRepository {
    pool: PgPool,
}

impl std::fmt::Debug for PostgresDocumentRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresDocumentRepository")
            .field("pool", &"PgPool")
            .finish()
    }
}

impl PostgresDocumentRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for sqlx query mapping.
#[derive(Debug, sqlx::FromRow)]
struct DocumentRow {
    id: uuid::Uuid,
    user_id: String,
    user_email: String,
    title: String,
    content: String,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

/// Maps a database row to a Document entity.
fn row_to_document(row: DocumentRow) -> Result<Document, DomainError> {
    let user_id = UserId::new(row.user_id).map_err(|e| {
        DomainError::new(ErrorCode::InvalidFormat, format!("Invalid user_id: {}", e))
    })?;

    Ok(Document::reconstitute(
        DocumentId::from_uuid(row.id),
        user_id,
        row.user_email,
        row.title,
        row.content,
        Timestamp::from_datetime(row.created_at),
        Timestamp::from_datetime(row.updated_at),
    ))
}

fn db_error(context: &str, err: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, err))
}

fn count_to_u32(count: i64) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

const SELECT_COLUMNS: &str =
    "SELECT id, user_id, user_email, title, content, created_at, updated_at FROM md_reader_documents";

#[async_trait]
impl DocumentRepository for PostgresDocumentRepository {
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, DomainError> {
        let rows = sqlx::query_as::<_, DocumentRow>(&format!(
            "{} WHERE user_id = $1 ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(owner.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list documents", e))?;

        rows.into_iter().map(row_to_document).collect()
    }

    async fn find_owned(
        &self,
        id: &DocumentId,
        owner: &UserId,
    ) -> Result<Option<Document>, DomainError> {
        let row = sqlx::query_as::<_, DocumentRow>(&format!(
            "{} WHERE id = $1 AND user_id = $2",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .bind(owner.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to fetch document", e))?;

        row.map(row_to_document).transpose()
    }

    async fn count_by_owner(&self, owner: &UserId) -> Result<u32, DomainError> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM md_reader_documents WHERE user_id = $1")
                .bind(owner.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| db_error("Failed to count documents", e))?;

        Ok(count_to_u32(count))
    }

    async fn insert_within_quota(
        &self,
        document: &Document,
        limit: QuotaLimit,
    ) -> Result<InsertOutcome, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("Failed to begin transaction", e))?;

        // Held until commit/rollback; concurrent creators for this owner queue here.
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(document.user_id().as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| db_error("Failed to acquire owner lock", e))?;

        if let QuotaLimit::Limited(max) = limit {
            let count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM md_reader_documents WHERE user_id = $1")
                    .bind(document.user_id().as_str())
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| db_error("Failed to count documents", e))?;

            let current = count_to_u32(count);
            if current >= max {
                tx.rollback()
                    .await
                    .map_err(|e| db_error("Failed to roll back transaction", e))?;
                return Ok(InsertOutcome::QuotaExceeded { current, limit: max });
            }
        }

        sqlx::query(
            r#"
            INSERT INTO md_reader_documents (
                id, user_id, user_email, title, content, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(document.id().as_uuid())
        .bind(document.user_id().as_str())
        .bind(document.user_email())
        .bind(document.title())
        .bind(document.content())
        .bind(document.created_at().as_datetime())
        .bind(document.updated_at().as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("Failed to insert document", e))?;

        tx.commit()
            .await
            .map_err(|e| db_error("Failed to commit transaction", e))?;

        Ok(InsertOutcome::Inserted)
    }

    async fn update_owned(&self, document: &Document) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE md_reader_documents
            SET
                title = $1,
                content = $2,
                user_email = $3,
                updated_at = GREATEST($4, created_at)
            WHERE id = $5 AND user_id = $6
            "#,
        )
        .bind(document.title())
        .bind(document.content())
        .bind(document.user_email())
        .bind(document.updated_at().as_datetime())
        .bind(document.id().as_uuid())
        .bind(document.user_id().as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update document", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, id: &DocumentId, owner: &UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM md_reader_documents WHERE id = $1 AND user_id = $2")
            .bind(id.as_uuid())
            .bind(owner.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete document", e))?;

        Ok(result.rows_affected() > 0)
    }
}
