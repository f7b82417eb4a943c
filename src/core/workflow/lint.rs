//! Non-fatal diagnostics for workflow documents.
//!
//! Lint results are reported through `tracing` and never change the
//! generated documentation.

use crate::core::workflow::graph::DependencyGraph;
use crate::core::workflow::schema::WorkflowDocument;
use serde::Serialize;
use std::fmt;

/// Diagnostic severity levels emitted by workflow lint rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintSeverity {
    Warning,
    Info,
}

impl LintSeverity {
    fn rank(&self) -> u8 {
        match self {
            LintSeverity::Warning => 2,
            LintSeverity::Info => 1,
        }
    }
}

impl fmt::Display for LintSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintSeverity::Warning => write!(f, "Warning"),
            LintSeverity::Info => write!(f, "Info"),
        }
    }
}

/// Individual lint result emitted by a rule.
#[derive(Debug, Clone, Serialize)]
pub struct LintResult {
    pub code: String,
    pub severity: LintSeverity,
    pub message: String,
    pub location: Option<String>,
}

impl LintResult {
    pub fn new(
        code: impl Into<String>,
        severity: LintSeverity,
        message: impl Into<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            location,
        }
    }
}

/// Trait implemented by workflow lint rules.
pub trait WorkflowLintRule {
    fn validate(&self, workflow: &WorkflowDocument, graph: &DependencyGraph) -> Vec<LintResult>;
}

/// WFD-LINT-001: `needs` references a job that is not declared.
struct UnknownNeedsRule;

impl WorkflowLintRule for UnknownNeedsRule {
    fn validate(&self, _workflow: &WorkflowDocument, graph: &DependencyGraph) -> Vec<LintResult> {
        graph
            .unknown_prerequisites()
            .into_iter()
            .map(|(job, need)| {
                LintResult::new(
                    "WFD-LINT-001",
                    LintSeverity::Warning,
                    format!("job '{}' needs unknown job '{}'", job, need),
                    Some(format!("jobs.{}.needs", job)),
                )
            })
            .collect()
    }
}

/// WFD-LINT-002: jobs that depend on each other.
struct NeedsCycleRule;

impl WorkflowLintRule for NeedsCycleRule {
    fn validate(&self, _workflow: &WorkflowDocument, graph: &DependencyGraph) -> Vec<LintResult> {
        graph
            .cycles()
            .into_iter()
            .map(|members| {
                LintResult::new(
                    "WFD-LINT-002",
                    LintSeverity::Warning,
                    format!("jobs form a dependency cycle: {}", members.join(" -> ")),
                    Some(format!("jobs.{}", members[0])),
                )
            })
            .collect()
    }
}

/// WFD-LINT-003: job with neither `uses` nor `steps`.
struct EmptyJobRule;

impl WorkflowLintRule for EmptyJobRule {
    fn validate(&self, workflow: &WorkflowDocument, _graph: &DependencyGraph) -> Vec<LintResult> {
        workflow
            .jobs
            .values()
            .filter(|job| !job.is_reusable_call() && job.steps.is_empty())
            .map(|job| {
                LintResult::new(
                    "WFD-LINT-003",
                    LintSeverity::Warning,
                    format!("job '{}' has neither `uses` nor `steps`", job.id),
                    Some(format!("jobs.{}", job.id)),
                )
            })
            .collect()
    }
}

/// WFD-LINT-004: `choice` input without options.
struct EmptyChoiceRule;

impl WorkflowLintRule for EmptyChoiceRule {
    fn validate(&self, workflow: &WorkflowDocument, _graph: &DependencyGraph) -> Vec<LintResult> {
        let triggers = &workflow.triggers;
        let call_inputs = triggers
            .workflow_call
            .iter()
            .flat_map(|call| call.inputs.iter().map(|input| ("workflow_call", input)));
        let dispatch_inputs = triggers
            .workflow_dispatch
            .iter()
            .flat_map(|dispatch| dispatch.inputs.iter().map(|input| ("workflow_dispatch", input)));

        call_inputs
            .chain(dispatch_inputs)
            .filter(|(_, input)| input.is_choice() && input.options.is_empty())
            .map(|(kind, input)| {
                LintResult::new(
                    "WFD-LINT-004",
                    LintSeverity::Info,
                    format!("choice input '{}' declares no options", input.name),
                    Some(format!("on.{}.inputs.{}", kind, input.name)),
                )
            })
            .collect()
    }
}

/// Registry that runs all built-in workflow lint rules.
pub struct LintRegistry {
    rules: Vec<Box<dyn WorkflowLintRule>>,
}

impl LintRegistry {
    pub fn new() -> Self {
        let rules: Vec<Box<dyn WorkflowLintRule>> = vec![
            Box::new(UnknownNeedsRule),
            Box::new(NeedsCycleRule),
            Box::new(EmptyJobRule),
            Box::new(EmptyChoiceRule),
        ];
        Self { rules }
    }

    /// Run every rule. Results are sorted by `(severity desc, code asc, location asc)`.
    pub fn run(&self, workflow: &WorkflowDocument, graph: &DependencyGraph) -> Vec<LintResult> {
        let mut results: Vec<LintResult> = self
            .rules
            .iter()
            .flat_map(|rule| rule.validate(workflow, graph))
            .collect();
        results.sort_by(|a, b| {
            b.severity
                .rank()
                .cmp(&a.severity.rank())
                .then(a.code.cmp(&b.code))
                .then(a.location.cmp(&b.location))
        });
        results
    }
}

impl Default for LintRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Emit lint results as tracing events.
pub fn report(results: &[LintResult]) {
    for result in results {
        let location = result.location.as_deref().unwrap_or("-");
        match result.severity {
            LintSeverity::Warning => {
                tracing::warn!(code = %result.code, location, "{}", result.message)
            }
            LintSeverity::Info => {
                tracing::info!(code = %result.code, location, "{}", result.message)
            }
        }
    }
}
