//! Baseline comparison
//!
//! Diffs the current finding set against a prior analysis run and
//! classifies each current finding as new, worsened, unchanged, or
//! improved. Findings only present in the baseline are implicitly
//! resolved and not surfaced here.

use crate::models::{Finding, Severity};
use std::collections::HashMap;

/// Identity of a finding across analysis runs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FindingKey {
    pub rule_id: String,
    pub category: String,
}

impl FindingKey {
    pub fn from_finding(finding: &Finding) -> Self {
        Self {
            rule_id: finding.id.clone(),
            category: finding.category.to_string(),
        }
    }
}

/// Classification of current findings against a baseline.
///
/// Worsened and improved entries carry the baseline severity so the
/// report can show the transition. Iterates the current list in order,
/// so output order is deterministic.
#[allow(clippy::type_complexity)]
pub fn compare_findings(
    current: &[Finding],
    baseline: &[Finding],
) -> (
    Vec<Finding>,
    Vec<(Finding, Severity)>,
    Vec<Finding>,
    Vec<(Finding, Severity)>,
) {
    let baseline_map: HashMap<FindingKey, &Finding> = baseline
        .iter()
        .map(|f| (FindingKey::from_finding(f), f))
        .collect();

    let mut new = Vec::new();
    let mut worsened = Vec::new();
    let mut unchanged = Vec::new();
    let mut improved = Vec::new();

    for current_f in current {
        match baseline_map.get(&FindingKey::from_finding(current_f)) {
            None => new.push(current_f.clone()),
            Some(baseline_f) => {
                let cur = current_f.severity.rank();
                let base = baseline_f.severity.rank();
                if cur > base {
                    worsened.push((current_f.clone(), baseline_f.severity));
                } else if cur < base {
                    improved.push((current_f.clone(), baseline_f.severity));
                } else {
                    unchanged.push(current_f.clone());
                }
            }
        }
    }

    (new, worsened, unchanged, improved)
}

/// True iff the maturity score strictly decreased.
pub fn check_maturity_regression(current_score: u32, baseline_score: u32) -> bool {
    current_score < baseline_score
}
