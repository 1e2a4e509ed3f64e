//! Review command — the full analysis pipeline
//!
//! Discovery and loading happen here; the analysis core only ever sees
//! plain strings and lists. When `--baseline` is given, the identical
//! pipeline runs a second time on the document corpus at that git ref
//! and the two finding sets are diffed.

use crate::analysis::{
    analyze, apply_suppressions, calculate_risk_score, check_maturity_regression,
    compare_findings, compute_maturity, extract_assumptions, extract_questions,
    extract_sections, Profile, SuppressionResult,
};
use crate::cli::{Commands, EXIT_FAIL_ON};
use crate::config::DesignlintConfig;
use crate::git;
use crate::loader::{discover_files, load_file_content, redact_secrets, SUPPORTED_EXTENSIONS};
use crate::models::{
    BaselineSummary, ComparisonResult, Finding, FindingChange, FindingComparison, Metadata,
    ReviewReport, Severity,
};
use crate::reporters::{self, OutputFormat};
use anyhow::{anyhow, bail, Result};
use chrono::{SecondsFormat, Utc};
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

/// Separator used when multiple input files are combined into one
/// analysis document.
const FILE_SEPARATOR: &str = "\n\n---\n\n";

struct PipelineRun {
    findings: SuppressionResult,
    maturity_score: u32,
    maturity: crate::models::MaturityResult,
    risk_score: u32,
    risk_explanation: String,
    combined_text: String,
}

/// Run the full analysis pipeline over already-loaded file contents.
///
/// The risk score is computed from the visible (unsuppressed) findings
/// on both the current and baseline side, so the diff compares like with
/// like.
fn run_pipeline(
    contents: Vec<String>,
    input_paths: &[String],
    profile: Profile,
    config: &DesignlintConfig,
    today: chrono::NaiveDate,
) -> PipelineRun {
    let combined = contents.join(FILE_SEPARATOR);

    // Extract once; the analyzer and the maturity scorer must see the
    // identical section list.
    let sections = extract_sections(&combined);
    let findings = analyze(&combined, profile, Some(&sections));
    let maturity = compute_maturity(&combined, &sections);

    let suppressed = apply_suppressions(
        &findings,
        &config.suppressions,
        profile.as_str(),
        input_paths,
        today,
    );

    let (risk_score, risk_explanation) =
        calculate_risk_score(&suppressed.visible_findings, &config.category_weights);

    PipelineRun {
        maturity_score: maturity.score,
        maturity,
        risk_score,
        risk_explanation,
        findings: suppressed,
        combined_text: combined,
    }
}

fn severity_allowed(severity: Severity, threshold: &str) -> bool {
    match threshold {
        "high" => severity == Severity::High,
        "med" => severity >= Severity::Medium,
        _ => true,
    }
}

fn quick_summary(findings: &[Finding], file_count: usize) -> Vec<String> {
    let mut summary = vec![format!("Analyzed {file_count} file(s)")];

    let high = findings.iter().filter(|f| f.severity == Severity::High).count();
    let med = findings.iter().filter(|f| f.severity == Severity::Medium).count();
    let low = findings.iter().filter(|f| f.severity == Severity::Low).count();

    if high > 0 {
        summary.push(format!("Found {high} high-severity issue(s)"));
    }
    if med > 0 {
        summary.push(format!("Found {med} medium-severity issue(s)"));
    }
    if low > 0 {
        summary.push(format!("Found {low} low-severity issue(s)"));
    }
    if findings.is_empty() {
        summary.push("No issues detected".to_string());
    }

    if !findings.is_empty() {
        let mut categories: HashMap<&str, usize> = HashMap::new();
        for finding in findings {
            *categories.entry(finding.category.as_str()).or_default() += 1;
        }
        // Deterministic tie-break: highest count, then name
        if let Some((top, _)) = categories
            .into_iter()
            .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        {
            summary.push(format!("Most issues in: {top}"));
        }
    }

    summary
}

fn compare_against_baseline(
    path_or_glob: &str,
    baseline_ref: &str,
    current: &PipelineRun,
    profile: Profile,
    config: &DesignlintConfig,
    redact_patterns: &[String],
    max_chars: usize,
    today: chrono::NaiveDate,
) -> Result<ComparisonResult> {
    let repo = git::open_repo(std::path::Path::new("."))?;
    let commit_sha = git::resolve_ref(&repo, baseline_ref)?;

    let files = git::list_files_at_ref(&repo, baseline_ref, path_or_glob, SUPPORTED_EXTENSIONS)?;
    debug!("baseline {baseline_ref}: {} file(s)", files.len());

    let contents: Result<Vec<String>> = files
        .iter()
        .map(|f| {
            git::load_file_at_ref(&repo, baseline_ref, f, max_chars)
                .map(|c| redact_secrets(&c, redact_patterns))
        })
        .collect();

    let baseline = run_pipeline(contents?, &files, profile, config, today);

    let (new, worsened, unchanged, improved) = compare_findings(
        &current.findings.visible_findings,
        &baseline.findings.visible_findings,
    );

    Ok(ComparisonResult {
        baseline_summary: BaselineSummary {
            git_ref: baseline_ref.to_string(),
            commit_sha,
            findings_count: baseline.findings.visible_findings.len(),
            risk_score: baseline.risk_score,
            maturity_score: baseline.maturity_score,
        },
        new_findings: new,
        worsened_findings: worsened
            .into_iter()
            .map(|(finding, baseline_severity)| FindingComparison {
                finding,
                change: FindingChange::Worsened,
                baseline_severity: Some(baseline_severity),
            })
            .collect(),
        unchanged_findings: unchanged,
        improved_findings: improved
            .into_iter()
            .map(|(finding, baseline_severity)| FindingComparison {
                finding,
                change: FindingChange::Improved,
                baseline_severity: Some(baseline_severity),
            })
            .collect(),
        maturity_regressed: check_maturity_regression(
            current.maturity_score,
            baseline.maturity_score,
        ),
    })
}

pub fn execute(command: Commands) -> Result<i32> {
    let Commands::Review {
        path_or_glob,
        format,
        severity_threshold,
        fail_on,
        max_chars,
        redact,
        profile,
        baseline,
        output,
        no_color,
        show_evidence,
    } = command
    else {
        unreachable!("review::execute called with a non-review command");
    };

    let start = Instant::now();
    let format: OutputFormat = format.parse()?;

    let config = DesignlintConfig::load(
        &std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from(".")),
    );

    // An explicit --profile wins; the clap default defers to config
    let profile: Profile = if profile == "general" && config.default_profile != "general" {
        config.default_profile.parse().unwrap_or_default()
    } else {
        profile.parse().unwrap_or_default()
    };

    let files = discover_files(&path_or_glob, &config.ignore_paths);
    if files.is_empty() {
        bail!("No supported files found at '{path_or_glob}'");
    }
    let input_paths: Vec<String> = files.iter().map(|f| f.display().to_string()).collect();

    let mut redact_patterns = config.redact_patterns.clone();
    redact_patterns.extend(redact);

    let contents: Vec<String> = files
        .iter()
        .map(|f| redact_secrets(&load_file_content(f, max_chars), &redact_patterns))
        .collect();

    let today = Utc::now().date_naive();
    let run = run_pipeline(contents, &input_paths, profile, &config, today);

    let comparison = match &baseline {
        Some(baseline_ref) => Some(compare_against_baseline(
            &path_or_glob,
            baseline_ref,
            &run,
            profile,
            &config,
            &redact_patterns,
            max_chars,
            today,
        )?),
        None => None,
    };

    let displayed: Vec<Finding> = run
        .findings
        .visible_findings
        .iter()
        .filter(|f| severity_allowed(f.severity, &severity_threshold))
        .cloned()
        .collect();

    let report = ReviewReport {
        metadata: Metadata {
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            input_files: input_paths,
            profile: profile.to_string(),
            model_provider: "heuristic".to_string(),
            elapsed_ms: start.elapsed().as_millis() as u64,
        },
        maturity: run.maturity.clone(),
        assumptions: extract_assumptions(&run.combined_text),
        open_questions: extract_questions(&run.combined_text),
        quick_summary: quick_summary(&run.findings.visible_findings, files.len()),
        risk_score: run.risk_score,
        risk_score_explanation: run.risk_explanation.clone(),
        suppressed_summary: run.findings.suppressed_summary(),
        expired_suppressions: run.findings.expired_suppressions.clone(),
        baseline_ref: baseline,
        comparison,
        findings: displayed,
    };

    let rendered = reporters::report(&report, format, no_color, show_evidence)?;
    match output {
        Some(path) => std::fs::write(&path, &rendered)
            .map_err(|err| anyhow!("cannot write {}: {err}", path.display()))?,
        None => println!("{rendered}"),
    }

    // fail-on looks at visible findings, not the display-filtered list
    let visible = &run.findings.visible_findings;
    let has_high = visible.iter().any(|f| f.severity == Severity::High);
    let has_medium = visible.iter().any(|f| f.severity == Severity::Medium);
    let should_fail = match fail_on.as_str() {
        "high" => has_high,
        "med" => has_high || has_medium,
        _ => false,
    };

    if should_fail {
        return Ok(EXIT_FAIL_ON);
    }
    Ok(0)
}
