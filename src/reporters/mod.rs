//! Output reporters for review reports
//!
//! Supports two output formats:
//! - `text` - Terminal output with ANSI colors
//! - `json` - Machine-readable JSON

mod json;
mod text;

use crate::models::ReviewReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a review report in the given format
pub fn report(
    report: &ReviewReport,
    format: OutputFormat,
    no_color: bool,
    show_evidence: bool,
) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, no_color, show_evidence),
        OutputFormat::Json => json::render(report),
    }
}
