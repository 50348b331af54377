//! Document command and query handlers.

mod check_quota;
mod delete_document;
mod get_document;
mod list_documents;
mod save_document;

pub use check_quota::{CheckQuotaHandler, CheckQuotaQuery};
pub use delete_document::{DeleteDocumentCommand, DeleteDocumentHandler};
pub use get_document::{GetDocumentHandler, GetDocumentQuery};
pub use list_documents::{ListDocumentsHandler, ListDocumentsQuery, ListDocumentsResult};
pub use save_document::{SaveDocumentCommand, SaveDocumentHandler, SaveDocumentResult};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::domain::document::Document;
    use crate::domain::foundation::{DocumentId, DomainError, OwnerIdentity, UserId};
    use crate::domain::quota::QuotaLimit;
    use crate::ports::{DocumentRepository, InsertOutcome};

    /// Vec-backed repository with a switch to make every call fail.
    pub struct MockDocumentRepository {
        documents: Mutex<Vec<Document>>,
        fail: bool,
    }

    impl MockDocumentRepository {
        pub fn new() -> Self {
            Self {
                documents: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        pub fn failing() -> Self {
            Self {
                documents: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        pub fn with(documents: Vec<Document>) -> Self {
            Self {
                documents: Mutex::new(documents),
                fail: false,
            }
        }

        pub fn stored(&self) -> Vec<Document> {
            self.documents.lock().unwrap().clone()
        }

        fn check(&self) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::database("Simulated store failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl DocumentRepository for MockDocumentRepository {
        async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Document>, DomainError> {
            self.check()?;
            let mut docs: Vec<Document> = self
                .documents
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.user_id() == owner)
                .cloned()
                .collect();
            docs.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
            Ok(docs)
        }

        async fn find_owned(
            &self,
            id: &DocumentId,
            owner: &UserId,
        ) -> Result<Option<Document>, DomainError> {
            self.check()?;
            Ok(self
                .documents
                .lock()
                .unwrap()
                .iter()
                .find(|d| d.id() == id && d.user_id() == owner)
                .cloned())
        }

        async fn count_by_owner(&self, owner: &UserId) -> Result<u32, DomainError> {
            self.check()?;
            Ok(self
                .documents
                .lock()
                .unwrap()
                .iter()
                .filter(|d| d.user_id() == owner)
                .count() as u32)
        }

        async fn insert_within_quota(
            &self,
            document: &Document,
            limit: QuotaLimit,
        ) -> Result<InsertOutcome, DomainError> {
            self.check()?;
            let mut docs = self.documents.lock().unwrap();
            let current = docs.iter().filter(|d| d.user_id() == document.user_id()).count() as u32;
            if let QuotaLimit::Limited(max) = limit {
                if current >= max {
                    return Ok(InsertOutcome::QuotaExceeded { current, limit: max });
                }
            }
            docs.push(document.clone());
            Ok(InsertOutcome::Inserted)
        }

        async fn update_owned(&self, document: &Document) -> Result<bool, DomainError> {
            self.check()?;
            let mut docs = self.documents.lock().unwrap();
            match docs
                .iter_mut()
                .find(|d| d.id() == document.id() && d.user_id() == document.user_id())
            {
                Some(slot) => {
                    *slot = document.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete_owned(&self, id: &DocumentId, owner: &UserId) -> Result<bool, DomainError> {
            self.check()?;
            let mut docs = self.documents.lock().unwrap();
            let before = docs.len();
            docs.retain(|d| !(d.id() == id && d.user_id() == owner));
            Ok(docs.len() != before)
        }
    }

    pub fn alice() -> OwnerIdentity {
        OwnerIdentity::new("gh-alice", "alice@example.com").unwrap()
    }

    pub fn bob() -> OwnerIdentity {
        OwnerIdentity::new("gh-bob", "bob@example.com").unwrap()
    }

    pub fn doc_for(owner: &OwnerIdentity, title: &str) -> Document {
        Document::create(owner, title, format!("# {}\n\nbody", title)).unwrap()
    }
}
