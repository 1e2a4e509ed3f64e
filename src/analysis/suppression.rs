//! Suppression engine
//!
//! Filters findings against configured suppression entries. Entries are
//! partitioned into active and expired up front; each finding is then
//! matched against the active entries in declaration order, first match
//! wins. Matched findings come back as new values with `suppressed` set
//! and the entry's metadata attached, so the caller's original list is
//! never aliased across display paths.

use crate::config::SuppressionEntry;
use crate::models::{ExpiredSuppression, Finding, Severity, SuppressedSummary, SuppressionInfo};
use chrono::NaiveDate;
use glob::Pattern;

/// Result of applying suppressions to a finding list
#[derive(Debug, Clone, Default)]
pub struct SuppressionResult {
    pub visible_findings: Vec<Finding>,
    pub suppressed_findings: Vec<Finding>,
    pub expired_suppressions: Vec<ExpiredSuppression>,
    pub warnings: Vec<String>,
}

impl SuppressionResult {
    /// Per-severity breakdown of suppressed findings, or `None` when
    /// nothing was suppressed.
    pub fn suppressed_summary(&self) -> Option<SuppressedSummary> {
        if self.suppressed_findings.is_empty() {
            return None;
        }
        let mut summary = SuppressedSummary {
            total: self.suppressed_findings.len(),
            ..Default::default()
        };
        for finding in &self.suppressed_findings {
            match finding.severity {
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
            }
        }
        Some(summary)
    }
}

/// Apply configured suppressions to findings.
///
/// `today` is injected by the caller so expiry handling stays
/// deterministic and testable. An entry expires strictly *after* its
/// `expires` date: an entry expiring today still suppresses.
pub fn apply_suppressions(
    findings: &[Finding],
    entries: &[SuppressionEntry],
    profile: &str,
    input_files: &[String],
    today: NaiveDate,
) -> SuppressionResult {
    if entries.is_empty() {
        return SuppressionResult {
            visible_findings: findings.to_vec(),
            ..Default::default()
        };
    }

    let mut active: Vec<&SuppressionEntry> = Vec::new();
    let mut expired: Vec<ExpiredSuppression> = Vec::new();
    let warnings: Vec<String> = Vec::new();

    for entry in entries {
        if let Some(expires) = &entry.expires {
            // Entries are validated at config-load time; an unparseable
            // date here would be a loader bug, treat it as non-expiring.
            if let Ok(expiry) = NaiveDate::parse_from_str(expires, "%Y-%m-%d") {
                if expiry < today {
                    expired.push(ExpiredSuppression {
                        id: entry.id.clone(),
                        expires: expires.clone(),
                        reason: entry.reason.clone(),
                    });
                    continue;
                }
            }
        }
        active.push(entry);
    }

    let mut visible = Vec::new();
    let mut suppressed = Vec::new();

    for finding in findings {
        match active
            .iter()
            .find(|entry| entry_matches(entry, finding, profile, input_files))
        {
            Some(entry) => {
                let mut finding = finding.clone();
                finding.suppressed = true;
                finding.suppression = Some(SuppressionInfo {
                    reason: entry.reason.clone(),
                    expires: entry.expires.clone(),
                    scope: entry.scope.clone(),
                    profiles: entry.profiles.clone(),
                    severities: entry.severities.clone(),
                });
                suppressed.push(finding);
            }
            None => visible.push(finding.clone()),
        }
    }

    SuppressionResult {
        visible_findings: visible,
        suppressed_findings: suppressed,
        expired_suppressions: expired,
        warnings,
    }
}

fn entry_matches(
    entry: &SuppressionEntry,
    finding: &Finding,
    profile: &str,
    input_files: &[String],
) -> bool {
    if entry.id != finding.id {
        return false;
    }

    if let Some(profiles) = &entry.profiles {
        if !profiles.is_empty() && !profiles.iter().any(|p| p == profile) {
            return false;
        }
    }

    if let Some(severities) = &entry.severities {
        let severity = finding.severity.to_string();
        if !severities.is_empty() && !severities.iter().any(|s| s == &severity) {
            return false;
        }
    }

    if let Some(scope) = &entry.scope {
        if !scope.is_empty() && !any_file_in_scope(input_files, scope) {
            return false;
        }
    }

    true
}

fn any_file_in_scope(input_files: &[String], scope_globs: &[String]) -> bool {
    scope_globs
        .iter()
        .filter_map(|g| Pattern::new(g).ok())
        .any(|pattern| input_files.iter().any(|f| pattern.matches(f)))
}
