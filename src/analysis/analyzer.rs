//! Heuristic analysis engine
//!
//! Applies the rule catalog (filtered by profile) to a document and
//! produces a deterministically ordered finding list. Also extracts
//! stated assumptions and open questions via independent line scans.

use crate::analysis::rules::{all_rules, AnalysisRule};
use crate::analysis::sections::extract_sections;
use crate::models::Finding;
use regex::Regex;
use std::str::FromStr;
use std::sync::OnceLock;

const MAX_ASSUMPTIONS: usize = 10;
const MAX_QUESTIONS: usize = 15;
/// Captured assumption/question lines longer than this are noise, not prose
const MAX_LINE_LEN: usize = 200;

/// Named subset of active rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    #[default]
    General,
    Security,
    Performance,
    Reliability,
}

impl Profile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Profile::General => "general",
            Profile::Security => "security",
            Profile::Performance => "performance",
            Profile::Reliability => "reliability",
        }
    }

    /// Explicit id-set membership per profile. Prefix matching would
    /// silently pull in future rules (a hypothetical ARCH-0030 matches
    /// an "ARCH-003" prefix), so each profile names its ids outright.
    fn rule_ids(&self) -> Option<&'static [&'static str]> {
        match self {
            Profile::General => None, // all rules
            Profile::Security => Some(&[
                "REQ-001", "REQ-002", "REQ-003", "ARCH-003", "SEC-001", "OPS-002",
            ]),
            Profile::Performance => Some(&[
                "ARCH-001", "ARCH-002", "ARCH-003", "PERF-001", "TEST-001",
            ]),
            Profile::Reliability => Some(&[
                "ARCH-001", "TEST-001", "OPS-001", "OPS-002", "PERF-001",
            ]),
        }
    }

    fn active_rules(&self) -> Vec<&'static AnalysisRule> {
        match self.rule_ids() {
            None => all_rules().iter().collect(),
            Some(ids) => all_rules().iter().filter(|r| ids.contains(&r.id)).collect(),
        }
    }
}

impl FromStr for Profile {
    type Err = std::convert::Infallible;

    /// Unknown profile names fall back to General rather than erroring.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "security" => Profile::Security,
            "performance" => Profile::Performance,
            "reliability" => Profile::Reliability,
            _ => Profile::General,
        })
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Analyze document content for design gaps.
///
/// `sections` should be the shared output of [`extract_sections`] so the
/// analyzer and the maturity scorer see an identical view; pass `None`
/// to extract here.
pub fn analyze(text: &str, profile: Profile, sections: Option<&[String]>) -> Vec<Finding> {
    let owned;
    let sections: &[String] = match sections {
        Some(s) => s,
        None => {
            owned = extract_sections(text);
            &owned
        }
    };

    let mut findings: Vec<Finding> = profile
        .active_rules()
        .into_iter()
        .filter(|rule| !rule.is_compliant(text, sections))
        .map(|rule| Finding {
            id: rule.id.to_string(),
            title: rule.title.to_string(),
            severity: rule.severity,
            category: rule.category,
            evidence: rule.evidence.to_string(),
            impact: rule.impact.to_string(),
            recommendation: rule.recommendation.to_string(),
            suppressed: false,
            suppression: None,
        })
        .collect();

    // Total order for reproducible reports: severity desc, category asc,
    // title asc.
    findings.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.title.cmp(&b.title))
    });

    findings
}

static ASSUMPTION_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

fn assumption_patterns() -> &'static [Regex] {
    ASSUMPTION_PATTERNS.get_or_init(|| {
        vec![
            Regex::new(r"(?i)(?:we\s+)?assum(?:e|ing)\s+(?:that\s+)?(.+)").expect("valid regex"),
            Regex::new(r"(?i)given\s+that\s+(.+)").expect("valid regex"),
            Regex::new(r"(?i)presuming\s+(.+)").expect("valid regex"),
        ]
    })
}

static QUESTION_MARKER: OnceLock<Regex> = OnceLock::new();

fn question_marker() -> &'static Regex {
    QUESTION_MARKER.get_or_init(|| Regex::new(r"(?i)\b(TBD|TODO|FIXME)\b").expect("valid regex"))
}

/// Extract stated assumptions, first match per line, at most 10.
pub fn extract_assumptions(text: &str) -> Vec<String> {
    let mut assumptions = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        for pattern in assumption_patterns() {
            if let Some(caps) = pattern.captures(line) {
                let assumption = caps[1].trim().to_string();
                if !assumption.is_empty() && assumption.len() < MAX_LINE_LEN {
                    assumptions.push(assumption);
                }
                break;
            }
        }
        if assumptions.len() >= MAX_ASSUMPTIONS {
            break;
        }
    }

    assumptions
}

/// Extract open questions: short lines with a `?` or a TBD/TODO/FIXME
/// marker, at most 15, in scan order.
pub fn extract_questions(text: &str) -> Vec<String> {
    let mut questions = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.len() >= MAX_LINE_LEN {
            continue;
        }
        if line.contains('?') || question_marker().is_match(line) {
            questions.push(line.to_string());
        }
        if questions.len() >= MAX_QUESTIONS {
            break;
        }
    }

    questions
}
