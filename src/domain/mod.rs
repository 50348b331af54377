//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, identity)
//! - `document` - Document aggregate, title derivation, error taxonomy
//! - `quota` - Per-owner document limits
//! - `markdown` - Line-based block parser feeding the exporters

pub mod document;
pub mod foundation;
pub mod markdown;
pub mod quota;
