#![allow(clippy::result_large_err)] // Workflow schema APIs return AppError to preserve structured context without boxing.

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::core::workflow::triggers::{analyze_triggers, TriggerAnalysis};
use indexmap::{IndexMap, IndexSet};
use serde_yaml::{Mapping, Value};

/// Errors raised while turning workflow text into a [`WorkflowDocument`].
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to parse workflow YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("workflow root must be a mapping")]
    NotAMapping,
    #[error("workflow is missing required key '{0}'")]
    MissingField(&'static str),
}

impl From<SchemaError> for AppError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::MissingField(key) => AppError::missing_field(key),
            SchemaError::NotAMapping => {
                AppError::new(ErrorCategory::MalformedDocument, err.to_string())
            }
            SchemaError::Parse(source) => AppError::with_source(
                ErrorCategory::MalformedDocument,
                format!("failed to parse workflow YAML: {}", source),
                Box::new(source),
            ),
        }
    }
}

/// Typed view over a workflow file, extracted in a single pass.
#[derive(Debug, Clone)]
pub struct WorkflowDocument {
    pub name: String,
    pub triggers: TriggerAnalysis,
    /// Jobs in the order they are declared in the file.
    pub jobs: IndexMap<String, Job>,
}

/// A job under the `jobs` mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Job {
    pub id: String,
    pub name: Option<String>,
    /// Prerequisite job ids from `needs`, deduplicated in declaration order.
    pub needs: IndexSet<String>,
    /// Reusable workflow reference; steps are not rendered when set.
    pub uses: Option<String>,
    pub steps: Vec<Step>,
}

impl Job {
    /// Label shown in the diagram: `name`, or the id with `_`/`-` as spaces.
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.replace(['_', '-'], " "),
        }
    }

    pub fn prerequisite_count(&self) -> usize {
        self.needs.len()
    }

    pub fn is_reusable_call(&self) -> bool {
        self.uses.is_some()
    }
}

/// A job step, keyed by the first label-bearing field it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Named(String),
    Uses(String),
    Run(String),
    Id(String),
    /// No label-bearing field; carries the 1-based position in the job.
    Anonymous(usize),
}

const RUN_EXCERPT_CHARS: usize = 10;

impl Step {
    /// Pick the step label with priority `name` > `uses` > `run` > `id`.
    pub fn from_value(value: &Value, position: usize) -> Self {
        let field = |key: &str| value.get(key).and_then(scalar_to_string);
        if let Some(name) = field("name") {
            Step::Named(name)
        } else if let Some(uses) = field("uses") {
            Step::Uses(uses)
        } else if let Some(run) = field("run") {
            Step::Run(run)
        } else if let Some(id) = field("id") {
            Step::Id(id)
        } else {
            Step::Anonymous(position)
        }
    }

    /// Human readable label before diagram escaping.
    pub fn label(&self) -> String {
        match self {
            Step::Named(text) | Step::Uses(text) | Step::Id(text) => text.clone(),
            Step::Run(script) => script
                .trim()
                .replace(['\r', '\n'], " ")
                .chars()
                .take(RUN_EXCERPT_CHARS)
                .collect(),
            Step::Anonymous(position) => format!("step {}", position),
        }
    }
}

impl WorkflowDocument {
    /// Parse normalized workflow text and extract the typed document.
    pub fn from_yaml_str(text: &str) -> Result<Self, AppError> {
        let root = parse_tree(text)?;
        Ok(Self::from_tree(&root)?)
    }

    /// Extract the typed document from an already parsed YAML tree.
    pub fn from_tree(root: &Value) -> Result<Self, SchemaError> {
        let root = root.as_mapping().ok_or(SchemaError::NotAMapping)?;

        let name = root
            .get("name")
            .and_then(scalar_to_string)
            .ok_or(SchemaError::MissingField("name"))?;
        let on = root.get("on").ok_or(SchemaError::MissingField("on"))?;
        let jobs = root.get("jobs").ok_or(SchemaError::MissingField("jobs"))?;

        Ok(WorkflowDocument {
            name,
            triggers: analyze_triggers(on),
            jobs: extract_jobs(jobs),
        })
    }
}

/// Structure loader: raw text to a generic YAML tree.
pub fn parse_tree(text: &str) -> Result<Value, SchemaError> {
    Ok(serde_yaml::from_str(text)?)
}

fn extract_jobs(value: &Value) -> IndexMap<String, Job> {
    let Some(mapping) = value.as_mapping() else {
        if !value.is_null() {
            tracing::warn!("`jobs` is not a mapping; rendering without jobs");
        }
        return IndexMap::new();
    };

    mapping
        .iter()
        .filter_map(|(key, job)| {
            let id = scalar_to_string(key)?;
            Some((id.clone(), extract_job(id, job)))
        })
        .collect()
}

fn extract_job(id: String, value: &Value) -> Job {
    let empty = Mapping::new();
    let body = value.as_mapping().unwrap_or(&empty);

    let needs = match body.get("needs") {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => IndexSet::new(),
    };

    let steps = body
        .get("steps")
        .and_then(Value::as_sequence)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .map(|(index, step)| Step::from_value(step, index + 1))
                .collect()
        })
        .unwrap_or_default();

    Job {
        name: body.get("name").and_then(scalar_to_string),
        uses: body.get("uses").and_then(scalar_to_string),
        needs,
        steps,
        id,
    }
}

/// Text of a scalar value; `None` for null, sequences, and mappings.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        Value::Tagged(tagged) => scalar_to_string(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Render any value as table text: scalars verbatim, null empty, collections as JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Sequence(_) | Value::Mapping(_) => {
            serde_json::to_string(value).unwrap_or_default()
        }
        other => scalar_to_string(other).unwrap_or_default(),
    }
}

/// Entries of a mapping keyed by their scalar text, in document order.
pub fn mapping_entries(value: Option<&Value>) -> Vec<(String, &Value)> {
    value
        .and_then(Value::as_mapping)
        .map(|mapping| {
            mapping
                .iter()
                .filter_map(|(key, entry)| scalar_to_string(key).map(|key| (key, entry)))
                .collect()
        })
        .unwrap_or_default()
}

/// Sequence of scalar strings; a lone scalar becomes a one-element list.
pub fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Sequence(items)) => items.iter().filter_map(scalar_to_string).collect(),
        Some(other) => scalar_to_string(other).into_iter().collect(),
        None => Vec::new(),
    }
}
