//! Document quota configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::quota::{QuotaPolicy, DEFAULT_DOCUMENT_LIMIT};

/// Quota configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    /// Documents a non-exempt owner may hold
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Emails with no cap (comma-separated, case-insensitive)
    #[serde(default)]
    pub exempt_emails: Option<String>,
}

impl QuotaConfig {
    pub fn exempt_email_list(&self) -> Vec<String> {
        self.exempt_emails
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|e| e.trim().to_lowercase())
                    .filter(|e| !e.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn policy(&self) -> QuotaPolicy {
        QuotaPolicy::new(self.default_limit, self.exempt_email_list())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.default_limit == 0 {
            return Err(ValidationError::InvalidDocumentLimit);
        }
        Ok(())
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            exempt_emails: None,
        }
    }
}

fn default_limit() -> u32 {
    DEFAULT_DOCUMENT_LIMIT
}
