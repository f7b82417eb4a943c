//! Markdown reference page for a workflow.

use crate::core::workflow::schema::WorkflowDocument;
use crate::core::workflow::triggers::{
    BranchFilter, InputSpec, OutputSpec, SecretSpec, WorkflowCallTrigger,
    WorkflowDispatchTrigger, WorkflowRunTrigger,
};

const INPUTS_HEADER: [&str; 5] = ["Name", "Description", "Default", "Required", "Type"];
const INPUTS_ALIGNMENT: [&str; 5] = [":---", ":----------", ":------", ":------:", ":---"];
const SECRETS_HEADER: [&str; 3] = ["Name", "Description", "Required"];
const SECRETS_ALIGNMENT: [&str; 3] = [":---", ":----------", ":------:"];
const OUTPUTS_HEADER: [&str; 2] = ["Name", "Description"];
const OUTPUTS_ALIGNMENT: [&str; 2] = [":---", ":----------"];

const REQUIRED_MARKER: &str = "*";

/// How the `Type` column renders `choice` inputs.
#[derive(Clone, Copy, PartialEq, Eq)]
enum ChoiceRendering {
    TypeOnly,
    WithOptions,
}

/// Blank-line separated markdown blocks.
#[derive(Default)]
struct MarkdownBuilder {
    blocks: Vec<String>,
}

impl MarkdownBuilder {
    fn block(&mut self, text: impl Into<String>) {
        self.blocks.push(text.into());
    }

    fn heading(&mut self, level: usize, title: &str) {
        self.block(format!("{} {}", "#".repeat(level), title));
    }

    fn bullet_list(&mut self, items: &[String]) {
        if items.is_empty() {
            return;
        }
        let list: Vec<String> = items.iter().map(|item| format!("- {}", item)).collect();
        self.block(list.join("\n"));
    }

    fn table(&mut self, header: &[&str], alignment: &[&str], rows: Vec<Vec<String>>) {
        let mut lines = vec![table_row(header), table_row(alignment)];
        lines.extend(rows.iter().map(|row| table_row(row.as_slice())));
        self.block(lines.join("\n"));
    }

    fn finish(self) -> String {
        let mut text = self.blocks.join("\n\n");
        text.push('\n');
        text
    }
}

/// Render the full markdown page.
///
/// Sections appear in a fixed order: title, description, diagram, then one
/// subsection per present trigger kind (`workflow_call`, `workflow_dispatch`,
/// `workflow_run`).
pub fn render_markdown(document: &WorkflowDocument, description: &str, diagram: &str) -> String {
    let mut md = MarkdownBuilder::default();

    md.heading(1, &document.name);
    if !description.is_empty() {
        md.block(description);
    }

    md.heading(2, "Workflow Diagram");
    md.block(diagram);

    md.heading(2, "Triggers");
    let triggers = &document.triggers;
    if triggers.is_empty() {
        md.block("This workflow has no `workflow_call`, `workflow_dispatch` or `workflow_run` triggers.");
    }
    if let Some(call) = &triggers.workflow_call {
        render_workflow_call(&mut md, call);
    }
    if let Some(dispatch) = &triggers.workflow_dispatch {
        render_workflow_dispatch(&mut md, dispatch);
    }
    if let Some(run) = &triggers.workflow_run {
        render_workflow_run(&mut md, run);
    }

    md.finish()
}

fn render_workflow_call(md: &mut MarkdownBuilder, call: &WorkflowCallTrigger) {
    md.heading(3, "`workflow_call`");
    md.block("This workflow is reusable.");

    if !call.inputs.is_empty() {
        md.heading(4, "Inputs");
        md.table(
            &INPUTS_HEADER,
            &INPUTS_ALIGNMENT,
            input_rows(&call.inputs, ChoiceRendering::TypeOnly),
        );
    }
    if !call.secrets.is_empty() {
        md.heading(4, "Secrets");
        md.table(&SECRETS_HEADER, &SECRETS_ALIGNMENT, secret_rows(&call.secrets));
    }
    if !call.outputs.is_empty() {
        md.heading(4, "Outputs");
        md.table(&OUTPUTS_HEADER, &OUTPUTS_ALIGNMENT, output_rows(&call.outputs));
    }
}

fn render_workflow_dispatch(md: &mut MarkdownBuilder, dispatch: &WorkflowDispatchTrigger) {
    md.heading(3, "`workflow_dispatch`");
    md.block("This workflow can be manually triggered.");

    if !dispatch.inputs.is_empty() {
        md.heading(4, "Inputs");
        md.table(
            &INPUTS_HEADER,
            &INPUTS_ALIGNMENT,
            input_rows(&dispatch.inputs, ChoiceRendering::WithOptions),
        );
    }
}

fn render_workflow_run(md: &mut MarkdownBuilder, run: &WorkflowRunTrigger) {
    md.heading(3, "`workflow_run`");
    md.block("This workflow is triggered by the execution of other workflows.");

    md.heading(4, "Triggering workflows");
    md.bullet_list(&run.workflows);

    match &run.branches {
        Some(BranchFilter::Allow(branches)) => {
            md.heading(4, "Workflow branches");
            md.bullet_list(branches);
        }
        Some(BranchFilter::Ignore(branches)) => {
            md.heading(4, "Skipped workflow branches");
            md.bullet_list(branches);
        }
        None => {}
    }

    md.heading(4, "Workflow activity types");
    md.bullet_list(&run.types);
}

fn input_rows(inputs: &[InputSpec], choices: ChoiceRendering) -> Vec<Vec<String>> {
    inputs
        .iter()
        .map(|input| {
            vec![
                escape_cell(&input.name),
                escape_cell(&input.description),
                escape_cell(&input.default),
                required_cell(input.required),
                type_cell(input, choices),
            ]
        })
        .collect()
}

fn secret_rows(secrets: &[SecretSpec]) -> Vec<Vec<String>> {
    secrets
        .iter()
        .map(|secret| {
            vec![
                escape_cell(&secret.name),
                escape_cell(&secret.description),
                required_cell(secret.required),
            ]
        })
        .collect()
}

fn output_rows(outputs: &[OutputSpec]) -> Vec<Vec<String>> {
    outputs
        .iter()
        .map(|output| vec![escape_cell(&output.name), escape_cell(&output.description)])
        .collect()
}

fn required_cell(required: bool) -> String {
    if required {
        REQUIRED_MARKER.to_string()
    } else {
        String::new()
    }
}

fn type_cell(input: &InputSpec, choices: ChoiceRendering) -> String {
    let Some(input_type) = &input.input_type else {
        return String::new();
    };
    if choices == ChoiceRendering::WithOptions && input.is_choice() {
        let items: String = input
            .options
            .iter()
            .map(|option| format!("<li>{}</li>", escape_cell(option)))
            .collect();
        return format!("`{}`:<br /><ul>{}</ul>", input_type, items);
    }
    format!("`{}`", input_type)
}

/// Make free text safe for a single table cell.
fn escape_cell(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .replace('|', "\\|")
        .replace("\r\n", "<br />")
        .replace('\n', "<br />")
}

/// Pipe-delimited row; empty cells render as a single space.
fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let inner: Vec<String> = cells
        .iter()
        .map(|cell| match cell.as_ref() {
            "" => " ".to_string(),
            text => format!(" {} ", text),
        })
        .collect();
    format!("|{}|", inner.join("|"))
}
