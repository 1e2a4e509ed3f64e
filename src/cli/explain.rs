//! Explain command — rule documentation
//!
//! `designlint explain REQ-001` shows what a rule checks, why it
//! matters, and how to address it; `--list` enumerates the catalog.

use crate::analysis::{all_rules, rule_by_id, AnalysisRule};
use crate::cli::Commands;
use anyhow::{bail, Result};
use serde::Serialize;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CYAN: &str = "\x1b[36m";

/// JSON shape for a single rule explanation
#[derive(Debug, Serialize)]
struct RuleExplanation<'a> {
    id: &'a str,
    title: &'a str,
    severity: String,
    category: &'a str,
    checks: &'a str,
    why: &'a str,
    how_to_fix: &'a str,
    pitfalls: &'a str,
}

impl<'a> From<&'a AnalysisRule> for RuleExplanation<'a> {
    fn from(rule: &'a AnalysisRule) -> Self {
        Self {
            id: rule.id,
            title: rule.title,
            severity: rule.severity.to_string(),
            category: rule.category.as_str(),
            checks: rule.evidence,
            why: rule.impact,
            how_to_fix: rule.recommendation,
            pitfalls: rule.pitfalls,
        }
    }
}

#[derive(Debug, Serialize)]
struct RuleListEntry<'a> {
    id: &'a str,
    title: &'a str,
}

fn titlecase(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn render_rule_text(rule: &AnalysisRule, no_color: bool) -> String {
    let (bold, cyan, reset) = if no_color {
        ("", "", "")
    } else {
        (BOLD, CYAN, RESET)
    };

    let mut out = String::new();
    out.push_str(&format!("{bold}{cyan}{}: {}{reset}\n\n", rule.id, rule.title));
    out.push_str(&format!("Category: {}\n", titlecase(rule.category.as_str())));
    out.push_str(&format!("Severity: {}\n\n", titlecase(&rule.severity.to_string())));
    out.push_str(&format!("{bold}What it checks:{reset}\n  {}\n\n", rule.evidence));
    out.push_str(&format!("{bold}Why it matters:{reset}\n  {}\n\n", rule.impact));
    out.push_str(&format!(
        "{bold}How to address it:{reset}\n  {}\n\n",
        rule.recommendation
    ));
    out.push_str(&format!("{bold}Common pitfalls:{reset}\n"));
    if rule.pitfalls.is_empty() {
        out.push_str("  (None specified)\n");
    } else {
        out.push_str(&format!("  {}\n", rule.pitfalls));
    }
    out
}

fn render_list_text(no_color: bool) -> String {
    let (bold, reset) = if no_color { ("", "") } else { (BOLD, RESET) };

    let mut out = String::new();
    out.push_str(&format!("{bold}Available Rules{reset}\n\n"));
    out.push_str(&format!("{bold}  Rule ID    Title{reset}\n"));
    for rule in all_rules() {
        out.push_str(&format!("  {:<10} {}\n", rule.id, rule.title));
    }
    out.push_str("\nUse: designlint explain <RULE_ID>\n");
    out
}

pub fn execute(command: Commands) -> Result<i32> {
    let Commands::Explain {
        rule_id,
        list,
        format,
        no_color,
    } = command
    else {
        unreachable!("explain::execute called with a non-explain command");
    };

    if list {
        let output = if format == "json" {
            let rules: Vec<RuleListEntry> = all_rules()
                .iter()
                .map(|r| RuleListEntry {
                    id: r.id,
                    title: r.title,
                })
                .collect();
            serde_json::to_string_pretty(&serde_json::json!({ "rules": rules }))?
        } else {
            render_list_text(no_color)
        };
        println!("{output}");
        return Ok(0);
    }

    let Some(rule_id) = rule_id else {
        bail!("Provide a rule ID to explain, or use 'explain --list'");
    };

    let Some(rule) = rule_by_id(&rule_id) else {
        bail!("Unknown rule '{rule_id}'. Use 'explain --list' to see available rules");
    };

    let output = if format == "json" {
        serde_json::to_string_pretty(&RuleExplanation::from(rule))?
    } else {
        render_rule_text(rule, no_color)
    };
    println!("{output}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_rule_text_sections() {
        let rule = rule_by_id("REQ-001").unwrap();
        let output = render_rule_text(rule, true);
        assert!(output.contains("REQ-001: Missing success metrics"));
        assert!(output.contains("Category: Requirements"));
        assert!(output.contains("Severity: High"));
        assert!(output.contains("What it checks:"));
        assert!(output.contains("Why it matters:"));
        assert!(output.contains("How to address it:"));
    }

    #[test]
    fn test_render_rule_without_pitfalls() {
        let rule = rule_by_id("TEST-001").unwrap();
        let output = render_rule_text(rule, true);
        assert!(output.contains("(None specified)"));
    }

    #[test]
    fn test_render_list_contains_all_ids() {
        let output = render_list_text(true);
        for rule in all_rules() {
            assert!(output.contains(rule.id));
        }
        assert!(output.contains("Available Rules"));
    }

    #[test]
    fn test_explanation_json_shape() {
        let rule = rule_by_id("REQ-001").unwrap();
        let json = serde_json::to_string(&RuleExplanation::from(rule)).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["id"], "REQ-001");
        assert_eq!(parsed["title"], "Missing success metrics");
        assert_eq!(parsed["severity"], "high");
        assert_eq!(parsed["category"], "requirements");
        assert!(parsed.get("checks").is_some());
        assert!(parsed.get("how_to_fix").is_some());
    }
}
