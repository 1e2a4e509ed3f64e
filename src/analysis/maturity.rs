//! Document maturity assessment
//!
//! Computes a 0-100 completeness score from three sub-scores (document
//! length, section count, core-topic coverage) and maps it to a
//! qualitative level. Maturity is independent of specific findings: a
//! short brainstorm legitimately triggers many rules, and the level
//! tells the reader how to weigh them.

use crate::models::{Confidence, MaturityLevel, MaturityMetrics, MaturityResult};

/// The 9 canonical design-doc topics and the keywords that detect each,
/// matched as substrings of any section token.
const CORE_SECTION_PATTERNS: &[(&str, &[&str])] = &[
    ("goals_scope", &["goal", "objective", "scope", "purpose"]),
    ("success_metrics", &["success", "metric", "kpi", "measure"]),
    ("nonfunctional_reqs", &["performance", "scalability", "reliability", "sla"]),
    ("dependencies", &["dependency", "dependencies", "integration", "external"]),
    ("error_handling", &["error", "exception", "failure", "fallback"]),
    ("testing", &["test", "testing", "qa", "validation"]),
    ("rollout", &["rollout", "deployment", "migration", "rollback"]),
    ("security", &["security", "auth", "privacy", "data retention"]),
    ("ownership", &["owner", "team", "on-call", "support"]),
];

const CORE_SECTION_COUNT: usize = 9;

/// Compute document maturity from content and pre-extracted sections.
///
/// Pure function; `sections` must be the same list fed to the analyzer.
pub fn compute_maturity(text: &str, sections: &[String]) -> MaturityResult {
    let (core_sections_present, core_sections_found) = detect_core_sections(sections);

    let metrics = MaturityMetrics {
        char_count: text.len(),
        section_count: sections.len(),
        core_sections_present,
        core_sections_found,
    };

    let score = calculate_score(&metrics);
    let level = determine_level(score);
    let confidence = calculate_confidence(score);
    let signals = generate_signals(&metrics);
    let interpretation = interpretation_for(level).to_string();

    MaturityResult {
        level,
        score,
        confidence,
        interpretation,
        signals,
        metrics,
    }
}

fn detect_core_sections(sections: &[String]) -> (usize, Vec<String>) {
    let mut found = Vec::new();

    for (name, patterns) in CORE_SECTION_PATTERNS {
        let present = sections
            .iter()
            .any(|section| patterns.iter().any(|p| section.contains(p)));
        if present {
            found.push((*name).to_string());
        }
    }

    (found.len(), found)
}

/// Length 0-25, sections 0-25, core coverage 0-50, capped at 100.
fn calculate_score(metrics: &MaturityMetrics) -> u32 {
    let length_points = match metrics.char_count {
        n if n >= 5000 => 25,
        n if n >= 2000 => 20,
        n if n >= 500 => 10,
        n if n >= 200 => 5,
        _ => 0,
    };

    let section_points = match metrics.section_count {
        n if n >= 10 => 25,
        n if n >= 6 => 20,
        n if n >= 3 => 10,
        n if n >= 1 => 5,
        _ => 0,
    };

    let coverage_points =
        (metrics.core_sections_present as f64 / CORE_SECTION_COUNT as f64 * 50.0) as u32;

    (length_points + section_points + coverage_points).min(100)
}

/// Level boundaries are inclusive-lower: score 25 is early_draft.
fn determine_level(score: u32) -> MaturityLevel {
    match score {
        s if s >= 75 => MaturityLevel::ProductionReady,
        s if s >= 50 => MaturityLevel::DesignSpec,
        s if s >= 25 => MaturityLevel::EarlyDraft,
        _ => MaturityLevel::Notes,
    }
}

/// High when the score is unambiguous, low within +/-5 of a level
/// boundary, medium otherwise.
fn calculate_confidence(score: u32) -> Confidence {
    if score <= 10 || score >= 90 {
        return Confidence::High;
    }
    let near_boundary = (20..=30).contains(&score)
        || (45..=55).contains(&score)
        || (70..=80).contains(&score);
    if near_boundary {
        Confidence::Low
    } else {
        Confidence::Medium
    }
}

fn generate_signals(metrics: &MaturityMetrics) -> Vec<String> {
    let mut signals = Vec::new();
    let mut push = |s: &str| signals.push(s.to_string());

    if metrics.char_count < 200 {
        push("very_short_length");
    } else if metrics.char_count < 500 {
        push("short_length");
    } else if metrics.char_count > 5000 {
        push("comprehensive_length");
    }

    if metrics.section_count == 0 {
        push("no_sections_detected");
    } else if metrics.section_count <= 2 {
        push("few_sections");
    } else if metrics.section_count >= 10 {
        push("many_sections");
    }

    let missing = CORE_SECTION_COUNT - metrics.core_sections_present;
    if missing >= 7 {
        push("missing_most_core_sections");
    } else if missing >= 4 {
        push("missing_many_core_sections");
    } else if missing <= 2 {
        push("comprehensive_coverage");
    }

    let found = &metrics.core_sections_found;
    if !found.iter().any(|s| s == "goals_scope") {
        push("missing_goals");
    }
    if !found.iter().any(|s| s == "success_metrics") {
        push("missing_metrics");
    }
    if !found.iter().any(|s| s == "testing") {
        push("missing_testing");
    }

    signals
}

fn interpretation_for(level: MaturityLevel) -> &'static str {
    match level {
        MaturityLevel::Notes => {
            "This appears to be early-stage notes or brainstorming. \
             Comprehensive findings are expected and helpful for planning."
        }
        MaturityLevel::EarlyDraft => {
            "Incomplete sections are expected at this stage. Focus on high-severity gaps."
        }
        MaturityLevel::DesignSpec => {
            "Document is substantial with good coverage of core areas. \
             Findings indicate areas needing attention before implementation."
        }
        MaturityLevel::ProductionReady => {
            "Comprehensive document with thorough coverage. \
             Findings are refinements rather than gaps."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::sections::extract_sections;

    fn compute(text: &str) -> MaturityResult {
        let sections = extract_sections(text);
        compute_maturity(text, &sections)
    }

    #[test]
    fn test_quick_idea_is_notes() {
        let result = compute("# Idea\nJust a quick thought about feature X.");
        assert_eq!(result.level, MaturityLevel::Notes);
        assert!(result.score < 25);
        assert!(result.signals.iter().any(|s| s == "very_short_length"));
    }

    #[test]
    fn test_empty_document() {
        let result = compute("");
        assert_eq!(result.score, 0);
        assert_eq!(result.level, MaturityLevel::Notes);
        assert_eq!(result.confidence, Confidence::High);
        assert!(result.signals.iter().any(|s| s == "no_sections_detected"));
        assert!(result.signals.iter().any(|s| s == "missing_most_core_sections"));
    }

    #[test]
    fn test_level_boundaries_inclusive_lower() {
        assert_eq!(determine_level(24), MaturityLevel::Notes);
        assert_eq!(determine_level(25), MaturityLevel::EarlyDraft);
        assert_eq!(determine_level(49), MaturityLevel::EarlyDraft);
        assert_eq!(determine_level(50), MaturityLevel::DesignSpec);
        assert_eq!(determine_level(74), MaturityLevel::DesignSpec);
        assert_eq!(determine_level(75), MaturityLevel::ProductionReady);
        assert_eq!(determine_level(100), MaturityLevel::ProductionReady);
    }

    #[test]
    fn test_confidence_bands() {
        assert_eq!(calculate_confidence(5), Confidence::High);
        assert_eq!(calculate_confidence(10), Confidence::High);
        assert_eq!(calculate_confidence(95), Confidence::High);
        assert_eq!(calculate_confidence(25), Confidence::Low);
        assert_eq!(calculate_confidence(20), Confidence::Low);
        assert_eq!(calculate_confidence(55), Confidence::Low);
        assert_eq!(calculate_confidence(80), Confidence::Low);
        assert_eq!(calculate_confidence(35), Confidence::Medium);
        assert_eq!(calculate_confidence(60), Confidence::Medium);
    }

    #[test]
    fn test_all_nine_core_sections_detected() {
        let text = "\
# Goals
x
# Success Metrics
x
# Performance
x
# Dependencies
x
# Error Handling
x
# Testing
x
# Rollout
x
# Security
x
# Ownership
The platform team owns this.";
        let result = compute(text);
        assert_eq!(result.metrics.core_sections_present, 9);
        assert!(result.signals.iter().any(|s| s == "comprehensive_coverage"));
    }

    #[test]
    fn test_full_coverage_thin_body_capped_below_production_ready() {
        // All 9 core headers but minimal text: coverage gives 50, but
        // length (<200 chars -> 0) and section sub-scores hold the total
        // under the production_ready boundary.
        let text = "\
# Goals

# Metrics

# SLA

# Dependencies

# Errors

# Testing

# Rollout

# Security

# Owner";
        let sections = extract_sections(text);
        assert_eq!(sections.len(), 9);
        let result = compute_maturity(text, &sections);
        assert_eq!(result.metrics.core_sections_present, 9);
        assert!(result.level < MaturityLevel::ProductionReady);
    }

    #[test]
    fn test_score_monotone_in_length() {
        let sections: Vec<String> = vec![];
        let short = compute_maturity(&"x".repeat(100), &sections);
        let medium = compute_maturity(&"x".repeat(1000), &sections);
        let long = compute_maturity(&"x".repeat(6000), &sections);
        assert!(short.score <= medium.score);
        assert!(medium.score <= long.score);
    }

    #[test]
    fn test_score_bounded() {
        // Max out every sub-score; total must still cap at 100.
        let text = format!(
            "{}\n{}",
            "x".repeat(6000),
            "# goal success metric performance dependency error test rollout security owner\n"
                .repeat(12)
        );
        let sections = extract_sections(&text);
        let result = compute_maturity(&text, &sections);
        assert!(result.score <= 100);
        assert_eq!(result.level, MaturityLevel::ProductionReady);
    }

    #[test]
    fn test_missing_specific_section_signals() {
        let result = compute("# Architecture\nSome design.\n# Testing\nUnit tests.");
        assert!(result.signals.iter().any(|s| s == "missing_goals"));
        assert!(result.signals.iter().any(|s| s == "missing_metrics"));
        assert!(!result.signals.iter().any(|s| s == "missing_testing"));
    }

    #[test]
    fn test_coverage_points_floor() {
        // 4 of 9 core sections = floor(4/9*50) = 22 coverage points.
        let metrics = MaturityMetrics {
            char_count: 0,
            section_count: 0,
            core_sections_present: 4,
            core_sections_found: vec![],
        };
        assert_eq!(calculate_score(&metrics), 22);
    }
}
