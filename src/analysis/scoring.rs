//! Risk score calculation
//!
//! Collapses a finding list into a 0-100 weighted severity score plus a
//! deterministic one-line explanation. Callers decide which findings to
//! pass (all vs. displayed); baseline comparison recomputes from the
//! displayed set so both sides of the diff use the same contract.

use crate::models::{Finding, Severity};
use std::collections::HashMap;

/// Base points per severity before category weighting
fn severity_points(severity: Severity) -> f64 {
    match severity {
        Severity::High => 15.0,
        Severity::Medium => 8.0,
        Severity::Low => 3.0,
    }
}

/// Calculate the overall risk score from findings.
///
/// Each finding contributes `severity_points * category_weight` (weight
/// defaults to 1.0 for categories absent from the map). The weighted sum
/// is truncated to an integer and capped at 100.
pub fn calculate_risk_score(
    findings: &[Finding],
    category_weights: &HashMap<String, f64>,
) -> (u32, String) {
    let mut total = 0.0;
    let mut high_count = 0usize;
    let mut medium_count = 0usize;
    let mut low_count = 0usize;

    for finding in findings {
        let weight = category_weights
            .get(finding.category.as_str())
            .copied()
            .unwrap_or(1.0);
        total += severity_points(finding.severity) * weight;

        match finding.severity {
            Severity::High => high_count += 1,
            Severity::Medium => medium_count += 1,
            Severity::Low => low_count += 1,
        }
    }

    // Truncate, not round
    let score = (total as u32).min(100);
    let explanation = generate_explanation(score, high_count, medium_count, low_count, findings);

    (score, explanation)
}

fn risk_band(score: u32) -> &'static str {
    match score {
        0..=20 => "Low",
        21..=50 => "Medium",
        51..=80 => "High",
        _ => "Critical",
    }
}

fn generate_explanation(
    score: u32,
    high_count: usize,
    medium_count: usize,
    low_count: usize,
    findings: &[Finding],
) -> String {
    let mut lines = vec![format!("Risk score: {score}/100 ({})", risk_band(score))];

    let mut severity_parts = Vec::new();
    if high_count > 0 {
        severity_parts.push(format!("{high_count} high-severity"));
    }
    if medium_count > 0 {
        severity_parts.push(format!("{medium_count} medium"));
    }
    if low_count > 0 {
        severity_parts.push(format!("{low_count} low"));
    }
    if !severity_parts.is_empty() {
        lines.push(format!("Based on {} finding(s).", severity_parts.join(", ")));
    }

    let top_issues: Vec<&str> = findings
        .iter()
        .filter(|f| f.severity == Severity::High)
        .take(3)
        .map(|f| f.title.as_str())
        .collect();
    if !top_issues.is_empty() {
        lines.push(format!("Primary risks: {}.", top_issues.join(", ")));
    }

    lines.join(" ")
}
