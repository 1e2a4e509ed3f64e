//! JSON reporter
//!
//! Outputs the full ReviewReport as pretty-printed JSON. Useful for
//! machine consumption, piping to jq, or further processing.

use crate::models::ReviewReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ReviewReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
