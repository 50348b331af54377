//! CheckQuotaHandler - Query handler for the caller's quota standing.

use std::sync::Arc;

use crate::domain::document::DocumentError;
use crate::domain::foundation::OwnerIdentity;
use crate::domain::quota::{QuotaDecision, QuotaPolicy};
use crate::ports::DocumentRepository;

/// Query for whether the caller may create another document.
#[derive(Debug, Clone)]
pub struct CheckQuotaQuery {
    pub owner: OwnerIdentity,
}

/// Handler that evaluates the quota against the current count.
///
/// The answer is advisory; creation re-checks atomically.
pub struct CheckQuotaHandler {
    repository: Arc<dyn DocumentRepository>,
    policy: Arc<QuotaPolicy>,
}

impl CheckQuotaHandler {
    pub fn new(repository: Arc<dyn DocumentRepository>, policy: Arc<QuotaPolicy>) -> Self {
        Self { repository, policy }
    }

    pub async fn handle(&self, query: CheckQuotaQuery) -> Result<QuotaDecision, DocumentError> {
        let count = self.repository.count_by_owner(&query.owner.id).await?;
        Ok(self.policy.evaluate(&query.owner.email, count))
    }
}
