//! Per-owner document quota.
//!
//! Every owner may hold up to a configured number of documents, except
//! owners whose email is on the exempt list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Default maximum number of documents per owner.
pub const DEFAULT_DOCUMENT_LIMIT: u32 = 500;

/// Upper bound on documents for one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "max", rename_all = "snake_case")]
pub enum QuotaLimit {
    Unlimited,
    Limited(u32),
}

impl QuotaLimit {
    /// Check if the limit has been reached.
    ///
    /// Returns false if unlimited or under limit.
    pub fn is_reached(&self, current: u32) -> bool {
        match self {
            QuotaLimit::Unlimited => false,
            QuotaLimit::Limited(max) => current >= *max,
        }
    }

    /// The numeric cap, or `None` when unlimited.
    pub fn max(&self) -> Option<u32> {
        match self {
            QuotaLimit::Unlimited => None,
            QuotaLimit::Limited(max) => Some(*max),
        }
    }
}

/// Outcome of evaluating the quota for one owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaDecision {
    /// Whether one more document may be created.
    pub allowed: bool,
    /// Documents the owner holds right now.
    pub current_count: u32,
    /// The owner's cap.
    pub limit: QuotaLimit,
}

/// Quota rules: one default cap plus a set of exempt identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaPolicy {
    default_limit: u32,
    exempt_emails: HashSet<String>,
}

impl QuotaPolicy {
    /// Creates a policy. Exempt emails are matched case-insensitively.
    pub fn new<I, S>(default_limit: u32, exempt_emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            default_limit,
            exempt_emails: exempt_emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    pub fn default_limit(&self) -> u32 {
        self.default_limit
    }

    /// True when `email` bypasses the quota.
    pub fn is_exempt(&self, email: &str) -> bool {
        self.exempt_emails.contains(&email.trim().to_lowercase())
    }

    /// The cap that applies to an owner with this email.
    pub fn limit_for(&self, email: &str) -> QuotaLimit {
        if self.is_exempt(email) {
            QuotaLimit::Unlimited
        } else {
            QuotaLimit::Limited(self.default_limit)
        }
    }

    /// Decides whether an owner holding `current_count` documents may create
    /// another one.
    pub fn evaluate(&self, email: &str, current_count: u32) -> QuotaDecision {
        let limit = self.limit_for(email);
        QuotaDecision {
            allowed: !limit.is_reached(current_count),
            current_count,
            limit,
        }
    }
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_DOCUMENT_LIMIT, std::iter::empty::<&str>())
    }
}
