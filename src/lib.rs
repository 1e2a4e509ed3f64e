//! Designlint - design review and pre-mortem analysis
//!
//! Analyzes engineering design documents (markdown, text, JSON, YAML)
//! against a fixed rule catalog to surface missing considerations —
//! error handling, security, rollout plans — and computes a document
//! maturity score, a weighted risk score, and a diff against a
//! historical baseline.
//!
//! The analysis core (`analysis`) is a chain of pure functions over
//! in-memory strings; file discovery, secret redaction, config loading,
//! git access, and rendering live in their own modules and feed the
//! core plain data.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod git;
pub mod loader;
pub mod models;
pub mod reporters;
