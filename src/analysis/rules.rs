//! Analysis rule catalog
//!
//! A fixed, versioned table of 12 rules across 8 categories. Each rule
//! checks whether a design document covers an expected topic: the keyword
//! pattern is searched across the extracted section tokens, and the rule
//! is compliant when any token matches. Detection is inverted — absence
//! of coverage raises the finding.
//!
//! Two rules (ARCH-003, SEC-001) carry an additional applicability gate:
//! they only fire when a trigger pattern matches the full document text,
//! so a doc that never touches sensitive data is not asked for a
//! retention plan.
//!
//! The catalog is compiled once behind a `OnceLock` and shared read-only
//! for the process lifetime.

use crate::models::{Category, Severity};
use regex::Regex;
use std::sync::OnceLock;

/// A single analysis rule with its compiled detection patterns
pub struct AnalysisRule {
    /// Stable rule identifier (e.g., REQ-001)
    pub id: &'static str,
    pub title: &'static str,
    pub severity: Severity,
    pub category: Category,
    /// Shown as the finding's evidence text
    pub evidence: &'static str,
    pub impact: &'static str,
    pub recommendation: &'static str,
    /// Common pitfalls for the explain command (may be empty)
    pub pitfalls: &'static str,
    /// Topic keywords searched across section tokens
    keywords: Regex,
    /// Applicability gate searched across the full document text.
    /// When present and not matched, the rule is considered compliant.
    trigger: Option<Regex>,
}

impl AnalysisRule {
    /// Returns true when the document covers this rule's topic (or the
    /// rule does not apply). A false result raises a finding.
    pub fn is_compliant(&self, text: &str, sections: &[String]) -> bool {
        if let Some(trigger) = &self.trigger {
            if !trigger.is_match(text) {
                return true;
            }
        }
        sections.iter().any(|s| self.keywords.is_match(s))
    }
}

struct RuleSpec {
    id: &'static str,
    title: &'static str,
    severity: Severity,
    category: Category,
    evidence: &'static str,
    impact: &'static str,
    recommendation: &'static str,
    pitfalls: &'static str,
    keywords: &'static str,
    trigger: Option<&'static str>,
}

/// Sensitive-data trigger for ARCH-003: the doc mentions storing or
/// handling user/customer/personal data.
const DATA_SENSITIVITY_TRIGGER: &str = r"(?i)(user|customer|personal|subscriber)[\s-]+(data|information|records?)|\bpii\b|\bdatabase\b|\bemail\b|\bpayment";

/// Sensitive-operation trigger for SEC-001: the doc touches credentials,
/// user data, or exposes API surface.
const SENSITIVE_OPERATION_TRIGGER: &str = r"(?i)(user|customer)[\s-]+(data|account|information)|credential|password|token|secret|\bapi\b|endpoint|\bauth";

const RULE_SPECS: &[RuleSpec] = &[
    RuleSpec {
        id: "REQ-001",
        title: "Missing success metrics",
        severity: Severity::High,
        category: Category::Requirements,
        evidence: "No section discussing success metrics, KPIs, or measurable outcomes was found.",
        impact: "Without agreed success metrics there is no objective way to tell whether the project worked, and scope debates get settled by opinion.",
        recommendation: "Add a Success Metrics section with 2-3 measurable targets (adoption, latency, error rate) and how each will be measured.",
        pitfalls: "Vanity metrics that always go up; metrics nobody instruments before launch.",
        keywords: r"(?i)success|metric|\bkpi\b|measur",
        trigger: None,
    },
    RuleSpec {
        id: "REQ-002",
        title: "Unclear scope or goals",
        severity: Severity::Medium,
        category: Category::Requirements,
        evidence: "No section discussing goals, objectives, scope, or purpose was found.",
        impact: "Readers cannot tell what is in or out of scope, which invites scope creep and misaligned reviews.",
        recommendation: "State the goal in one sentence and list explicit non-goals.",
        pitfalls: "Goals written as solutions ('use Kafka') instead of outcomes.",
        keywords: r"(?i)goal|objective|scope|purpose",
        trigger: None,
    },
    RuleSpec {
        id: "REQ-003",
        title: "Missing non-functional requirements",
        severity: Severity::Medium,
        category: Category::Requirements,
        evidence: "No section discussing performance, scalability, reliability, or SLA expectations was found.",
        impact: "Load, availability, and latency expectations discovered after implementation usually force redesign.",
        recommendation: "Capture expected load, availability target, and latency budget even as rough numbers.",
        pitfalls: "",
        keywords: r"(?i)performance|scalab|reliab|\bsla\b|latency|throughput",
        trigger: None,
    },
    RuleSpec {
        id: "ARCH-001",
        title: "Missing error handling strategy",
        severity: Severity::High,
        category: Category::Architecture,
        evidence: "No section discussing error handling, failure modes, fallbacks, or retries was found.",
        impact: "Failure behavior designed ad hoc during implementation tends to be inconsistent and untested, and partial failures cascade.",
        recommendation: "Describe what happens when each dependency fails: retry policy, fallback behavior, and how errors surface to callers.",
        pitfalls: "Only covering the happy path; retrying non-idempotent operations.",
        keywords: r"(?i)error|exception|failure|fallback|retr(y|ies)|graceful",
        trigger: None,
    },
    RuleSpec {
        id: "ARCH-002",
        title: "Unclear dependencies",
        severity: Severity::Medium,
        category: Category::Architecture,
        evidence: "No section discussing dependencies, integrations, or external systems was found.",
        impact: "Hidden dependencies surface as integration surprises, unowned failure modes, and blocked rollouts.",
        recommendation: "List each external system or third-party service touched, and what the design assumes about it.",
        pitfalls: "",
        keywords: r"(?i)dependenc|integrat|external\s+system|third[\s-]part|\bapi\b",
        trigger: None,
    },
    RuleSpec {
        id: "ARCH-003",
        title: "Missing data retention/privacy plan",
        severity: Severity::High,
        category: Category::Architecture,
        evidence: "The document handles user or personal data but no section discussing retention, privacy, or GDPR obligations was found.",
        impact: "Retention and deletion added after the data model ships is expensive, and privacy gaps can be regulatory violations.",
        recommendation: "State what data is stored, for how long, how it is deleted, and which privacy obligations (GDPR, PII handling) apply.",
        pitfalls: "Assuming anonymized data is out of scope; forgetting data copied into logs and backups.",
        keywords: r"(?i)retention|\bgdpr\b|privacy|\bpii\b",
        trigger: Some(DATA_SENSITIVITY_TRIGGER),
    },
    RuleSpec {
        id: "TEST-001",
        title: "Missing test strategy",
        severity: Severity::Medium,
        category: Category::Testing,
        evidence: "No section discussing testing, QA, or validation was found.",
        impact: "Without a named test approach, coverage decisions default to whatever the implementer finds convenient.",
        recommendation: "Note how the change will be validated: unit/integration split, test data, and any manual QA passes.",
        pitfalls: "",
        keywords: r"(?i)test|\bqa\b|quality|validat",
        trigger: None,
    },
    RuleSpec {
        id: "OPS-001",
        title: "Missing rollout/deployment plan",
        severity: Severity::High,
        category: Category::Operations,
        evidence: "No section discussing rollout, deployment, migration, or rollback was found.",
        impact: "Deploys without a rollback story turn small defects into incidents; migrations without a plan lose data.",
        recommendation: "Describe the rollout order, any migrations, the rollback procedure, and how success is verified at each step.",
        pitfalls: "Irreversible migrations hidden inside 'phase 1'; feature flags with no cleanup plan.",
        keywords: r"(?i)rollout|roll[\s-]out|deploy|migrat|rollback",
        trigger: None,
    },
    RuleSpec {
        id: "OPS-002",
        title: "Unclear ownership",
        severity: Severity::Medium,
        category: Category::Operations,
        evidence: "No section discussing owners, responsible teams, on-call, or support was found.",
        impact: "Systems without a named owner decay: alerts go unrouted and incident response starts with finding someone who cares.",
        recommendation: "Name the owning team, the on-call rotation that will carry it, and where support questions go.",
        pitfalls: "",
        keywords: r"(?i)owner|\bteam\b|responsib|on[\s-]call|support",
        trigger: None,
    },
    RuleSpec {
        id: "SEC-001",
        title: "Missing security considerations",
        severity: Severity::High,
        category: Category::Security,
        evidence: "The document touches credentials, user data, or API surface but no section discussing security, auth, or access control was found.",
        impact: "Authentication and authorization bolted on late leave gaps attackers find first.",
        recommendation: "Cover how callers authenticate, what they are authorized to do, and how data is protected in transit and at rest.",
        pitfalls: "Treating an internal API as trusted; secrets in config files.",
        keywords: r"(?i)security|\bauth|encrypt|access[\s-]control",
        trigger: Some(SENSITIVE_OPERATION_TRIGGER),
    },
    RuleSpec {
        id: "PERF-001",
        title: "Missing performance targets",
        severity: Severity::Low,
        category: Category::Performance,
        evidence: "No section discussing latency, throughput, or performance targets was found.",
        impact: "Performance discovered at load test time (or in production) is the most expensive kind to fix.",
        recommendation: "Give a target latency percentile and expected throughput, even as an order-of-magnitude guess.",
        pitfalls: "",
        keywords: r"(?i)latency|throughput|performance\s+target|response\s+time|percentile|\bp\d{2}\b",
        trigger: None,
    },
    RuleSpec {
        id: "DOC-001",
        title: "Missing decision rationale",
        severity: Severity::Low,
        category: Category::Documentation,
        evidence: "No section discussing alternatives, trade-offs, or decision rationale was found.",
        impact: "Future maintainers re-litigate decisions whose constraints were never written down.",
        recommendation: "Record the alternatives considered and why this approach won.",
        pitfalls: "",
        keywords: r"(?i)alternativ|trade[\s-]?off|decision|rationale",
        trigger: None,
    },
];

static CATALOG: OnceLock<Vec<AnalysisRule>> = OnceLock::new();

fn compile(spec: &RuleSpec) -> AnalysisRule {
    AnalysisRule {
        id: spec.id,
        title: spec.title,
        severity: spec.severity,
        category: spec.category,
        evidence: spec.evidence,
        impact: spec.impact,
        recommendation: spec.recommendation,
        pitfalls: spec.pitfalls,
        keywords: Regex::new(spec.keywords).expect("valid rule keyword regex"),
        trigger: spec
            .trigger
            .map(|t| Regex::new(t).expect("valid rule trigger regex")),
    }
}

/// All rules in catalog declaration order
pub fn all_rules() -> &'static [AnalysisRule] {
    CATALOG.get_or_init(|| RULE_SPECS.iter().map(compile).collect())
}

/// Look up a single rule by its id
pub fn rule_by_id(id: &str) -> Option<&'static AnalysisRule> {
    all_rules().iter().find(|r| r.id == id)
}

/// All rule ids in catalog order
pub fn rule_ids() -> Vec<&'static str> {
    all_rules().iter().map(|r| r.id).collect()
}
