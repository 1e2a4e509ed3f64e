//! Text (terminal) reporter with colors and formatting

use crate::models::{
    Finding, FindingComparison, MaturityLevel, ReviewReport, Severity,
};
use anyhow::Result;
use std::sync::OnceLock;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const LIGHT_RED: &str = "\x1b[91m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const CYAN: &str = "\x1b[36m";
const GRAY: &str = "\x1b[90m";

/// ANSI styles, all empty when color is disabled
struct Style {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    red: &'static str,
    light_red: &'static str,
    green: &'static str,
    yellow: &'static str,
    blue: &'static str,
    cyan: &'static str,
    gray: &'static str,
}

impl Style {
    fn new(no_color: bool) -> Self {
        if no_color {
            Style {
                reset: "",
                bold: "",
                dim: "",
                red: "",
                light_red: "",
                green: "",
                yellow: "",
                blue: "",
                cyan: "",
                gray: "",
            }
        } else {
            Style {
                reset: RESET,
                bold: BOLD,
                dim: DIM,
                red: RED,
                light_red: LIGHT_RED,
                green: GREEN,
                yellow: YELLOW,
                blue: BLUE,
                cyan: CYAN,
                gray: GRAY,
            }
        }
    }

    fn severity_color(&self, severity: Severity) -> &'static str {
        match severity {
            Severity::High => self.light_red,
            Severity::Medium => self.yellow,
            Severity::Low => self.blue,
        }
    }

    fn maturity_color(&self, level: MaturityLevel) -> &'static str {
        match level {
            MaturityLevel::Notes => self.gray,
            MaturityLevel::EarlyDraft => self.yellow,
            MaturityLevel::DesignSpec => self.blue,
            MaturityLevel::ProductionReady => self.green,
        }
    }

    fn risk_color(&self, score: u32) -> &'static str {
        match score {
            0..=20 => self.green,
            21..=50 => self.yellow,
            51..=80 => self.light_red,
            _ => self.red,
        }
    }
}

/// Render report as formatted terminal output
pub fn render(report: &ReviewReport, no_color: bool, show_evidence: bool) -> Result<String> {
    let s = Style::new(no_color);
    let mut out = String::new();

    render_header(&mut out, report, &s);
    render_maturity(&mut out, report, &s);
    render_risk(&mut out, report, &s);
    render_findings(&mut out, report, &s, show_evidence);
    render_list(&mut out, "Identified Assumptions", &report.assumptions, &s);
    render_list(&mut out, "Open Questions", &report.open_questions, &s);
    render_suppressions(&mut out, report, &s);
    render_comparison(&mut out, report, &s);
    render_summary(&mut out, report, &s);

    Ok(out)
}

fn render_header(out: &mut String, report: &ReviewReport, s: &Style) {
    let m = &report.metadata;
    out.push_str(&format!("\n{}{}Designlint Review Report{}\n", s.bold, s.cyan, s.reset));
    out.push_str(&format!(
        "{}──────────────────────────────────────{}\n",
        s.dim, s.reset
    ));
    out.push_str(&format!(
        "{}Version: {}  Profile: {}  Files: {}  Duration: {}ms{}\n\n",
        s.dim,
        m.tool_version,
        m.profile,
        m.input_files.len(),
        m.elapsed_ms,
        s.reset
    ));
}

fn render_maturity(out: &mut String, report: &ReviewReport, s: &Style) {
    let maturity = &report.maturity;
    let color = s.maturity_color(maturity.level);

    out.push_str(&format!("{}DOCUMENT MATURITY{}\n", s.bold, s.reset));
    out.push_str(&format!(
        "  Level: {}{}{}{}  Score: {}{}/100{}\n",
        s.bold,
        color,
        maturity.level.display_name(),
        s.reset,
        s.bold,
        maturity.score,
        s.reset
    ));
    out.push_str(&format!("  {}\n", maturity.interpretation));
    if !maturity.signals.is_empty() {
        out.push_str(&format!(
            "  {}Signals: {}{}\n",
            s.dim,
            maturity.signals.join(", "),
            s.reset
        ));
    }
    out.push('\n');
}

fn render_risk(out: &mut String, report: &ReviewReport, s: &Style) {
    let score = report.risk_score;
    let color = s.risk_color(score);
    let filled = (score / 10) as usize;
    let gauge = "▓".repeat(filled) + &"░".repeat(10 - filled);

    out.push_str(&format!("{}OVERALL RISK{}\n", s.bold, s.reset));
    out.push_str(&format!(
        "  Risk Score: {}{}{}/100{}  [{}{}{}]\n",
        s.bold, color, score, s.reset, color, gauge, s.reset
    ));
    out.push_str(&format!("  {}{}{}\n", s.dim, report.risk_score_explanation, s.reset));

    // High scores are normal for early-stage documents
    if matches!(report.maturity.level, MaturityLevel::Notes | MaturityLevel::EarlyDraft) {
        let level_name = report.maturity.level.as_str().replace('_', " ");
        out.push_str(&format!(
            "  {}Note: high risk scores are typical for {level_name} documents.{}\n",
            s.dim, s.reset
        ));
    }
    out.push('\n');
}

fn render_findings(out: &mut String, report: &ReviewReport, s: &Style, show_evidence: bool) {
    if report.findings.is_empty() {
        out.push_str(&format!("{}No findings detected!{}\n\n", s.green, s.reset));
        return;
    }

    for severity in [Severity::High, Severity::Medium, Severity::Low] {
        let group: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect();
        if group.is_empty() {
            continue;
        }

        let color = s.severity_color(severity);
        let label = match severity {
            Severity::High => "High Severity Findings",
            Severity::Medium => "Medium Severity Findings",
            Severity::Low => "Low Severity Findings",
        };
        out.push_str(&format!("{}{}{}{}\n", s.bold, color, label, s.reset));

        for finding in &group {
            out.push_str(&format!(
                "  {}{}{}  {}{}{}  {}[{}]{}\n",
                s.dim,
                finding.id,
                s.reset,
                s.bold,
                finding.title,
                s.reset,
                s.dim,
                finding.category,
                s.reset
            ));
            out.push_str(&format!("      {}\n", finding.recommendation));

            if show_evidence {
                let lines = truncate_evidence(&evidence_lines(finding), finding.severity);
                for line in lines {
                    out.push_str(&format!("      {}• {}{}\n", s.dim, line, s.reset));
                }
            }
        }
        out.push('\n');
    }
}

static SENTENCE_SPLIT: OnceLock<regex::Regex> = OnceLock::new();

/// Split evidence text into sentence-sized lines.
fn evidence_lines(finding: &Finding) -> Vec<String> {
    let splitter = SENTENCE_SPLIT
        .get_or_init(|| regex::Regex::new(r"(?s)[^.!?]*[.!?]|[^.!?]+$").expect("valid regex"));

    let mut lines = Vec::new();
    for paragraph in finding.evidence.split('\n') {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            continue;
        }
        for m in splitter.find_iter(paragraph) {
            let sentence = m.as_str().trim();
            if !sentence.is_empty() {
                lines.push(sentence.to_string());
            }
        }
    }
    lines
}

/// Severity decides how much evidence the terminal shows: HIGH is
/// unlimited, MEDIUM keeps 2 lines, LOW keeps 1.
fn truncate_evidence(lines: &[String], severity: Severity) -> Vec<String> {
    let max_lines = match severity {
        Severity::High => return lines.to_vec(),
        Severity::Medium => 2,
        Severity::Low => 1,
    };

    if lines.len() <= max_lines {
        return lines.to_vec();
    }

    let mut truncated: Vec<String> = lines[..max_lines].to_vec();
    if let Some(last) = truncated.last_mut() {
        *last = format!("{}...", last.trim_end());
    }
    truncated
}

fn render_list(out: &mut String, title: &str, items: &[String], s: &Style) {
    if items.is_empty() {
        return;
    }
    out.push_str(&format!("{}{}{}\n", s.bold, title, s.reset));
    for (i, item) in items.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, item));
    }
    out.push('\n');
}

fn render_suppressions(out: &mut String, report: &ReviewReport, s: &Style) {
    if let Some(summary) = &report.suppressed_summary {
        out.push_str(&format!(
            "{}Suppressed: {} finding(s) ({} high, {} medium, {} low){}\n",
            s.dim, summary.total, summary.high, summary.medium, summary.low, s.reset
        ));
    }
    if !report.expired_suppressions.is_empty() {
        out.push_str(&format!("{}Expired suppressions:{}\n", s.yellow, s.reset));
        for expired in &report.expired_suppressions {
            out.push_str(&format!(
                "  {} (expired {}): {}\n",
                expired.id, expired.expires, expired.reason
            ));
        }
    }
    if report.suppressed_summary.is_some() || !report.expired_suppressions.is_empty() {
        out.push('\n');
    }
}

fn render_comparison(out: &mut String, report: &ReviewReport, s: &Style) {
    let Some(comparison) = &report.comparison else {
        return;
    };

    let base = &comparison.baseline_summary;
    out.push_str(&format!("{}BASELINE COMPARISON{}\n", s.bold, s.reset));
    out.push_str(&format!(
        "  Baseline: {} ({}){}  {} finding(s), risk {}, maturity {}{}\n",
        base.git_ref,
        &base.commit_sha[..base.commit_sha.len().min(8)],
        s.dim,
        base.findings_count,
        base.risk_score,
        base.maturity_score,
        s.reset
    ));

    if !comparison.new_findings.is_empty() {
        out.push_str(&format!("  {}New:{}\n", s.light_red, s.reset));
        for finding in &comparison.new_findings {
            out.push_str(&format!("    + {} {}\n", finding.id, finding.title));
        }
    }
    render_transitions(out, "Worsened", &comparison.worsened_findings, s.light_red, s);
    render_transitions(out, "Improved", &comparison.improved_findings, s.green, s);
    if !comparison.unchanged_findings.is_empty() {
        out.push_str(&format!(
            "  {}Unchanged: {} finding(s){}\n",
            s.dim,
            comparison.unchanged_findings.len(),
            s.reset
        ));
    }
    if comparison.maturity_regressed {
        out.push_str(&format!(
            "  {}Maturity regressed against baseline.{}\n",
            s.yellow, s.reset
        ));
    }
    out.push('\n');
}

fn render_transitions(
    out: &mut String,
    label: &str,
    transitions: &[FindingComparison],
    color: &str,
    s: &Style,
) {
    if transitions.is_empty() {
        return;
    }
    out.push_str(&format!("  {}{}:{}\n", color, label, s.reset));
    for t in transitions {
        let baseline = t
            .baseline_severity
            .map(|sev| sev.to_string())
            .unwrap_or_default();
        out.push_str(&format!(
            "    {} {} ({} -> {})\n",
            t.finding.id, t.finding.title, baseline, t.finding.severity
        ));
    }
}

fn render_summary(out: &mut String, report: &ReviewReport, s: &Style) {
    if report.quick_summary.is_empty() {
        return;
    }
    out.push_str(&format!("{}QUICK SUMMARY{}\n", s.bold, s.reset));
    for bullet in &report.quick_summary {
        out.push_str(&format!("  • {}\n", bullet));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_render_plain_contains_sections() {
        let output = render(&test_report(), true, false).unwrap();
        assert!(output.contains("Designlint Review Report"));
        assert!(output.contains("DOCUMENT MATURITY"));
        assert!(output.contains("Risk Score: 18/100"));
        assert!(output.contains("High Severity Findings"));
        assert!(output.contains("ARCH-001"));
        assert!(output.contains("Identified Assumptions"));
        assert!(output.contains("Open Questions"));
        assert!(output.contains("QUICK SUMMARY"));
    }

    #[test]
    fn test_no_color_strips_ansi() {
        let output = render(&test_report(), true, false).unwrap();
        assert!(!output.contains("\x1b["));
    }

    #[test]
    fn test_color_emits_ansi() {
        let output = render(&test_report(), false, false).unwrap();
        assert!(output.contains("\x1b["));
    }

    #[test]
    fn test_early_draft_risk_note() {
        let output = render(&test_report(), true, false).unwrap();
        assert!(output.contains("typical for early draft documents"));
    }

    #[test]
    fn test_evidence_hidden_by_default_shown_on_request() {
        let without = render(&test_report(), true, false).unwrap();
        assert!(!without.contains("Failure modes are not described"));
        let with = render(&test_report(), true, true).unwrap();
        assert!(with.contains("Failure modes are not described."));
    }

    #[test]
    fn test_evidence_sentence_split() {
        let report = test_report();
        let lines = evidence_lines(&report.findings[0]);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "Failure modes are not described.");
    }

    #[test]
    fn test_truncate_high_unlimited() {
        let lines: Vec<String> = (0..5).map(|i| format!("Sentence {i}.")).collect();
        assert_eq!(truncate_evidence(&lines, Severity::High).len(), 5);
    }

    #[test]
    fn test_truncate_medium_two_lines_with_ellipsis() {
        let lines: Vec<String> = (0..5).map(|i| format!("Sentence {i}.")).collect();
        let truncated = truncate_evidence(&lines, Severity::Medium);
        assert_eq!(truncated.len(), 2);
        assert!(truncated[1].ends_with("..."));
    }

    #[test]
    fn test_truncate_low_one_line() {
        let report = test_report();
        let lines = evidence_lines(&report.findings[1]);
        assert_eq!(lines.len(), 3);
        let truncated = truncate_evidence(&lines, Severity::Low);
        assert_eq!(truncated.len(), 1);
        assert!(truncated[0].ends_with("..."));
    }

    #[test]
    fn test_low_severity_evidence_truncated_in_output() {
        let output = render(&test_report(), true, true).unwrap();
        // Only the first sentence of the LOW finding's evidence survives
        assert!(output.contains("No alternatives section...."));
        assert!(!output.contains("Nothing recorded"));
    }

    #[test]
    fn test_no_findings_message() {
        let mut report = test_report();
        report.findings.clear();
        let output = render(&report, true, false).unwrap();
        assert!(output.contains("No findings detected!"));
    }

    #[test]
    fn test_comparison_block() {
        use crate::models::*;
        let mut report = test_report();
        report.baseline_ref = Some("main".to_string());
        report.comparison = Some(ComparisonResult {
            baseline_summary: BaselineSummary {
                git_ref: "main".to_string(),
                commit_sha: "0123456789abcdef0123456789abcdef01234567".to_string(),
                findings_count: 1,
                risk_score: 15,
                maturity_score: 40,
            },
            new_findings: vec![report.findings[0].clone()],
            worsened_findings: vec![],
            unchanged_findings: vec![report.findings[1].clone()],
            improved_findings: vec![],
            maturity_regressed: true,
        });
        let output = render(&report, true, false).unwrap();
        assert!(output.contains("BASELINE COMPARISON"));
        assert!(output.contains("+ ARCH-001"));
        assert!(output.contains("Unchanged: 1 finding(s)"));
        assert!(output.contains("Maturity regressed"));
    }
}
