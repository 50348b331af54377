//! Quota domain module.

mod policy;

pub use policy::{QuotaDecision, QuotaLimit, QuotaPolicy, DEFAULT_DOCUMENT_LIMIT};
