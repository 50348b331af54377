//! md-reader - Markdown editor backend
//!
//! Owner-scoped document storage with a per-user document quota, plus
//! markdown export to PDF and Word and an HTML preview.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
