//! Normalized view of the `on` section for the trigger kinds we document.

use crate::core::workflow::schema::{mapping_entries, scalar_to_string, string_list, value_to_text};
use serde::Serialize;
use serde_yaml::Value;

pub const WORKFLOW_CALL: &str = "workflow_call";
pub const WORKFLOW_DISPATCH: &str = "workflow_dispatch";
pub const WORKFLOW_RUN: &str = "workflow_run";

/// An entry of `inputs` for `workflow_call` or `workflow_dispatch`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputSpec {
    pub name: String,
    pub description: String,
    pub default: String,
    pub required: bool,
    pub input_type: Option<String>,
    /// Only populated when `input_type` is `choice`.
    pub options: Vec<String>,
}

impl InputSpec {
    pub fn is_choice(&self) -> bool {
        self.input_type.as_deref() == Some("choice")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SecretSpec {
    pub name: String,
    pub description: String,
    pub required: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputSpec {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowCallTrigger {
    pub inputs: Vec<InputSpec>,
    pub secrets: Vec<SecretSpec>,
    pub outputs: Vec<OutputSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowDispatchTrigger {
    pub inputs: Vec<InputSpec>,
}

/// Branch filter of a `workflow_run` trigger. `branches` wins over `branches-ignore`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchFilter {
    Allow(Vec<String>),
    Ignore(Vec<String>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WorkflowRunTrigger {
    pub workflows: Vec<String>,
    pub branches: Option<BranchFilter>,
    pub types: Vec<String>,
}

/// Supported triggers found under `on`; absent kinds stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriggerAnalysis {
    pub workflow_call: Option<WorkflowCallTrigger>,
    pub workflow_dispatch: Option<WorkflowDispatchTrigger>,
    pub workflow_run: Option<WorkflowRunTrigger>,
}

impl TriggerAnalysis {
    pub fn is_reusable(&self) -> bool {
        self.workflow_call.is_some()
    }

    pub fn is_manually_triggerable(&self) -> bool {
        self.workflow_dispatch.is_some()
    }

    pub fn is_chained(&self) -> bool {
        self.workflow_run.is_some()
    }

    pub fn is_empty(&self) -> bool {
        !(self.is_reusable() || self.is_manually_triggerable() || self.is_chained())
    }
}

/// Analyze the value of the `on` key.
///
/// Event shorthands (`on: push`, `on: [push, pull_request]`) carry no
/// documented trigger configuration and yield an empty analysis.
pub fn analyze_triggers(on: &Value) -> TriggerAnalysis {
    let Some(section) = on.as_mapping() else {
        tracing::debug!("`on` is not a mapping; no documented triggers");
        return TriggerAnalysis::default();
    };

    TriggerAnalysis {
        workflow_call: section.get(WORKFLOW_CALL).map(analyze_workflow_call),
        workflow_dispatch: section.get(WORKFLOW_DISPATCH).map(analyze_workflow_dispatch),
        workflow_run: section.get(WORKFLOW_RUN).map(analyze_workflow_run),
    }
}

fn analyze_workflow_call(body: &Value) -> WorkflowCallTrigger {
    WorkflowCallTrigger {
        inputs: extract_inputs(body.get("inputs")),
        secrets: mapping_entries(body.get("secrets"))
            .into_iter()
            .map(|(name, details)| SecretSpec {
                name,
                description: text_field(details, "description"),
                required: flag_field(details, "required"),
            })
            .collect(),
        outputs: mapping_entries(body.get("outputs"))
            .into_iter()
            .map(|(name, details)| OutputSpec {
                name,
                description: text_field(details, "description"),
            })
            .collect(),
    }
}

fn analyze_workflow_dispatch(body: &Value) -> WorkflowDispatchTrigger {
    WorkflowDispatchTrigger {
        inputs: extract_inputs(body.get("inputs")),
    }
}

fn analyze_workflow_run(body: &Value) -> WorkflowRunTrigger {
    let workflows = string_list(body.get("workflows"));
    if workflows.is_empty() {
        tracing::warn!("workflow_run trigger does not list any triggering workflows");
    }

    let allow = string_list(body.get("branches"));
    let ignore = string_list(body.get("branches-ignore"));
    let branches = if !allow.is_empty() {
        Some(BranchFilter::Allow(allow))
    } else if !ignore.is_empty() {
        Some(BranchFilter::Ignore(ignore))
    } else {
        None
    };

    WorkflowRunTrigger {
        workflows,
        branches,
        types: string_list(body.get("types")),
    }
}

fn extract_inputs(inputs: Option<&Value>) -> Vec<InputSpec> {
    mapping_entries(inputs)
        .into_iter()
        .map(|(name, details)| {
            let input_type = details.get("type").and_then(scalar_to_string);
            let options = if input_type.as_deref() == Some("choice") {
                string_list(details.get("options"))
            } else {
                Vec::new()
            };
            InputSpec {
                name,
                description: text_field(details, "description"),
                default: text_field(details, "default"),
                required: flag_field(details, "required"),
                input_type,
                options,
            }
        })
        .collect()
}

fn text_field(details: &Value, key: &str) -> String {
    details.get(key).map(value_to_text).unwrap_or_default()
}

/// Booleans and their quoted spellings (`"true"`, `"False"`) are accepted.
fn flag_field(details: &Value, key: &str) -> bool {
    match details.get(key) {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) if text.trim().eq_ignore_ascii_case("true") => true,
        Some(Value::String(text)) if text.trim().eq_ignore_ascii_case("false") => false,
        Some(other) => {
            tracing::debug!(key, value = ?other, "non-boolean flag treated as false");
            false
        }
    }
}
