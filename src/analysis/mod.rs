//! The core analysis pipeline
//!
//! A chain of pure, deterministic transformations from raw document text
//! to a structured findings report:
//!
//! ```text
//! raw text ──> sections ──┬──> analyzer ──> findings ──┬──> scoring
//!                         └──> maturity                ├──> suppression
//!                                                      └──> baseline diff
//! ```
//!
//! Nothing in this module performs I/O or reads the clock; "today" for
//! suppression expiry is injected by the caller. Identical inputs always
//! yield byte-identical output ordering and scores.

pub mod analyzer;
pub mod baseline;
pub mod maturity;
pub mod rules;
pub mod scoring;
pub mod sections;
pub mod suppression;

pub use analyzer::{analyze, extract_assumptions, extract_questions, Profile};
pub use baseline::{check_maturity_regression, compare_findings, FindingKey};
pub use maturity::compute_maturity;
pub use rules::{all_rules, rule_by_id, rule_ids, AnalysisRule};
pub use scoring::calculate_risk_score;
pub use sections::extract_sections;
pub use suppression::{apply_suppressions, SuppressionResult};
