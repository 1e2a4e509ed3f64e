//! Core data models for designlint
//!
//! These models are used throughout the codebase for representing
//! findings, maturity assessments, and the final review report.

use serde::{Deserialize, Serialize};

/// Severity levels for findings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
}

impl Severity {
    /// Rank used for baseline comparison (higher = worse)
    pub fn rank(&self) -> u8 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Finding categories (closed set, sorted lexically in reports)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Architecture,
    Documentation,
    Operations,
    Performance,
    Reliability,
    Requirements,
    Security,
    Testing,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Architecture => "architecture",
            Category::Documentation => "documentation",
            Category::Operations => "operations",
            Category::Performance => "performance",
            Category::Reliability => "reliability",
            Category::Requirements => "requirements",
            Category::Security => "security",
            Category::Testing => "testing",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suppression metadata attached to a suppressed finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuppressionInfo {
    pub reason: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profiles: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severities: Option<Vec<String>>,
}

/// A single analysis finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    /// Stable rule identifier (e.g., REQ-001)
    pub id: String,
    pub title: String,
    pub severity: Severity,
    pub category: Category,
    /// Where/why this was flagged
    pub evidence: String,
    /// What could go wrong
    pub impact: String,
    /// How to address it
    pub recommendation: String,
    #[serde(default)]
    pub suppressed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppression: Option<SuppressionInfo>,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub tool_version: String,
    /// ISO8601 timestamp, injected by the caller
    pub timestamp: String,
    pub input_files: Vec<String>,
    pub profile: String,
    pub model_provider: String,
    pub elapsed_ms: u64,
}

/// Metrics used to compute document maturity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityMetrics {
    pub char_count: usize,
    pub section_count: usize,
    /// Count of the 9 core design-doc topics detected
    pub core_sections_present: usize,
    pub core_sections_found: Vec<String>,
}

/// Document maturity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaturityLevel {
    Notes,
    EarlyDraft,
    DesignSpec,
    ProductionReady,
}

impl MaturityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaturityLevel::Notes => "notes",
            MaturityLevel::EarlyDraft => "early_draft",
            MaturityLevel::DesignSpec => "design_spec",
            MaturityLevel::ProductionReady => "production_ready",
        }
    }

    /// Human form for terminal output ("Early Draft")
    pub fn display_name(&self) -> &'static str {
        match self {
            MaturityLevel::Notes => "Notes",
            MaturityLevel::EarlyDraft => "Early Draft",
            MaturityLevel::DesignSpec => "Design Spec",
            MaturityLevel::ProductionReady => "Production Ready",
        }
    }
}

impl std::fmt::Display for MaturityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Confidence in a maturity assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

/// Document maturity assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaturityResult {
    pub level: MaturityLevel,
    /// 0-100
    pub score: u32,
    pub confidence: Confidence,
    pub interpretation: String,
    pub signals: Vec<String>,
    pub metrics: MaturityMetrics,
}

/// Type of change relative to baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingChange {
    New,
    Worsened,
    Unchanged,
    Improved,
}

/// A finding paired with its change classification against the baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingComparison {
    pub finding: Finding,
    pub change: FindingChange,
    /// Severity in the baseline (None when the finding is new)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_severity: Option<Severity>,
}

/// Summary of the baseline analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaselineSummary {
    pub git_ref: String,
    pub commit_sha: String,
    pub findings_count: usize,
    pub risk_score: u32,
    pub maturity_score: u32,
}

/// Result of comparing current findings against a baseline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub baseline_summary: BaselineSummary,
    pub new_findings: Vec<Finding>,
    pub worsened_findings: Vec<FindingComparison>,
    pub unchanged_findings: Vec<Finding>,
    pub improved_findings: Vec<FindingComparison>,
    pub maturity_regressed: bool,
}

/// A configured suppression whose expiry date has passed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiredSuppression {
    pub id: String,
    pub expires: String,
    pub reason: String,
}

/// Counts of suppressed findings by severity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuppressedSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Complete review report handed to the reporters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewReport {
    pub metadata: Metadata,
    pub maturity: MaturityResult,
    pub findings: Vec<Finding>,
    pub assumptions: Vec<String>,
    pub open_questions: Vec<String>,
    pub quick_summary: Vec<String>,
    /// 0-100
    pub risk_score: u32,
    pub risk_score_explanation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suppressed_summary: Option<SuppressedSummary>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expired_suppressions: Vec<ExpiredSuppression>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub baseline_ref: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonResult>,
}
