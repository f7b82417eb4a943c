#![allow(clippy::result_large_err)]

use crate::core::error::AppError;
use crate::core::types::ErrorCategory;
use crate::core::workflow::description::extract_description;
use crate::core::workflow::graph::DependencyGraph;
use crate::core::workflow::lint::{self, LintRegistry};
use crate::core::workflow::markdown::render_markdown;
use crate::core::workflow::mermaid::workflow_to_state_diagram;
use crate::core::workflow::normalize::normalize_document;
use crate::core::workflow::schema::WorkflowDocument;
use crate::utils::files::write_atomic;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const OUTPUT_SUFFIX: &str = ".md";

/// Render the markdown page for raw workflow text.
pub fn generate_markdown(workflow_text: &str) -> Result<String, AppError> {
    let normalized = normalize_document(workflow_text);
    let description = extract_description(&normalized);
    let document = WorkflowDocument::from_yaml_str(&normalized)?;
    tracing::debug!(
        name = %document.name,
        jobs = document.jobs.len(),
        "workflow document loaded"
    );

    let graph = DependencyGraph::from_jobs(&document.jobs);
    lint::report(&LintRegistry::new().run(&document, &graph));

    let diagram = workflow_to_state_diagram(&document, &graph);
    Ok(render_markdown(&document, &description, &diagram))
}

/// `<dir>/<file name>.md` next to the workflow file.
pub fn output_path_for(workflow_path: &Path) -> PathBuf {
    let mut file_name = workflow_path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    file_name.push(OUTPUT_SUFFIX);
    workflow_path.with_file_name(file_name)
}

/// Read a workflow file, render it, and write `<file>.md` beside it.
///
/// Nothing is written unless rendering succeeds.
pub fn generate(workflow_path: &Path) -> Result<PathBuf, AppError> {
    let text = fs::read_to_string(workflow_path).map_err(|err| {
        let reason = match err.kind() {
            ErrorKind::NotFound => "not found",
            _ => "unreadable",
        };
        AppError::with_source(
            ErrorCategory::InputNotFound,
            format!("workflow {} is {}", workflow_path.display(), reason),
            Box::new(err),
        )
        .with_context("path", workflow_path.display().to_string())
    })?;

    let markdown = generate_markdown(&text)
        .map_err(|err| err.with_context("path", workflow_path.display().to_string()))?;

    let output_path = output_path_for(workflow_path);
    write_atomic(&output_path, markdown.as_bytes())?;
    tracing::info!(output = %output_path.display(), "markdown documentation written");
    Ok(output_path)
}
