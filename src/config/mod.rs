//! Project configuration
//!
//! Loads per-project settings from a `designlint.toml` found in the
//! start directory or any of its parents. Suppression entries are the
//! only validated input shape: the analysis core assumes entries it
//! receives are already well formed, so validation happens here at load
//! time.
//!
//! # Configuration Format
//!
//! ```toml
//! # designlint.toml
//!
//! default_profile = "general"
//! ignore_paths = ["drafts/**", "archive/**"]
//! redact_patterns = ['internal-id-\d+']
//!
//! [category_weights]
//! security = 2.0
//! documentation = 0.3
//!
//! [[suppressions]]
//! id = "ARCH-003"
//! reason = "Retention plan tracked in LEGAL-412"
//! expires = "2026-12-31"
//! scope = ["docs/payments/*.md"]
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

pub const CONFIG_FILE_NAME: &str = "designlint.toml";

/// A single suppression rule from config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionEntry {
    /// Rule ID to suppress (e.g., ARCH-001)
    pub id: String,
    /// Human justification for the suppression
    pub reason: String,
    /// Expiry date YYYY-MM-DD; the entry still applies on this date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    /// Glob patterns over input file paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
    /// Profiles where the suppression applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    /// Severities where the suppression applies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severities: Option<Vec<String>>,
}

/// Validation failure for a configured suppression entry
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("suppression for '{id}' has an empty reason")]
    EmptyReason { id: String },
    #[error("suppression for '{id}': expires must be YYYY-MM-DD, got '{value}'")]
    InvalidExpiry { id: String, value: String },
}

impl SuppressionEntry {
    /// Check shape invariants: non-empty reason, parseable expiry.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.reason.trim().is_empty() {
            return Err(ConfigError::EmptyReason {
                id: self.id.clone(),
            });
        }
        if let Some(expires) = &self.expires {
            if NaiveDate::parse_from_str(expires, "%Y-%m-%d").is_err() {
                return Err(ConfigError::InvalidExpiry {
                    id: self.id.clone(),
                    value: expires.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Per-project configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignlintConfig {
    /// Glob patterns for files/directories to skip during discovery
    pub ignore_paths: Vec<String>,
    /// Profile used when the CLI does not specify one
    pub default_profile: String,
    /// Additional regex patterns to redact from loaded content
    pub redact_patterns: Vec<String>,
    /// Risk-score weight multipliers per category; file values merge
    /// over the defaults rather than replacing them
    pub category_weights: HashMap<String, f64>,
    /// Finding suppressions with justification
    pub suppressions: Vec<SuppressionEntry>,
}

impl Default for DesignlintConfig {
    fn default() -> Self {
        Self {
            ignore_paths: Vec::new(),
            default_profile: "general".to_string(),
            redact_patterns: Vec::new(),
            category_weights: default_category_weights(),
            suppressions: Vec::new(),
        }
    }
}

fn default_category_weights() -> HashMap<String, f64> {
    HashMap::from([
        ("requirements".to_string(), 1.0),
        ("architecture".to_string(), 1.0),
        ("testing".to_string(), 1.0),
        ("operations".to_string(), 1.0),
        ("security".to_string(), 1.5),
        ("performance".to_string(), 0.8),
        ("reliability".to_string(), 1.2),
        ("documentation".to_string(), 0.5),
    ])
}

impl DesignlintConfig {
    /// Load configuration, searching `designlint.toml` upward from
    /// `start_path`. Falls back to defaults when no file is found or the
    /// file is malformed.
    pub fn load(start_path: &Path) -> Self {
        match find_config_file(start_path) {
            Some(path) => Self::load_file(&path),
            None => {
                debug!("no {CONFIG_FILE_NAME} found, using defaults");
                Self::default()
            }
        }
    }

    fn load_file(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                warn!("failed to read {}: {err}", path.display());
                return Self::default();
            }
        };

        let mut config: DesignlintConfig = match toml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                warn!("malformed {}: {err}", path.display());
                return Self::default();
            }
        };

        // File weights merge over defaults so a partial table keeps the
        // unmentioned categories at their standard multipliers.
        let mut weights = default_category_weights();
        weights.extend(config.category_weights);
        config.category_weights = weights;

        // Drop invalid suppressions with a warning instead of failing
        // the whole run; the analysis core assumes valid entries.
        config.suppressions.retain(|entry| match entry.validate() {
            Ok(()) => true,
            Err(err) => {
                warn!("ignoring suppression: {err}");
                false
            }
        });

        debug!("loaded config from {}", path.display());
        config
    }
}

fn find_config_file(start_path: &Path) -> Option<PathBuf> {
    let mut current = Some(start_path);
    while let Some(dir) = current {
        let candidate = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
