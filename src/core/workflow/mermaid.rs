use crate::core::workflow::graph::{rendering_order, DependencyGraph};
use crate::core::workflow::schema::{Job, WorkflowDocument};

const INDENT: &str = "    ";
const TRIGGERS_STATE: &str = "Triggers";
const NBSP: &str = "&nbsp;";
const COLON: &str = "&#58;";

/// Indentation-aware line buffer for nested composite states.
#[derive(Default)]
struct DiagramWriter {
    lines: Vec<String>,
    depth: usize,
}

impl DiagramWriter {
    fn line(&mut self, text: impl AsRef<str>) {
        self.lines
            .push(format!("{}{}", INDENT.repeat(self.depth), text.as_ref()));
    }

    fn raw(&mut self, text: &str) {
        self.lines.push(text.to_string());
    }

    fn open(&mut self, state: &str) {
        self.line(format!("state {} {{", state));
        self.depth += 1;
    }

    fn close(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.line("}");
    }
}

/// Render the job graph as a fenced mermaid `stateDiagram-v2` block.
///
/// Jobs appear in [`rendering_order`]; each job is a composite state holding
/// its step chain, and jobs are separated into concurrent regions of the
/// `Triggers` state. Dependency edges come from `graph`. The returned text
/// has no trailing newline.
pub fn workflow_to_state_diagram(document: &WorkflowDocument, graph: &DependencyGraph) -> String {
    let ordered = rendering_order(&document.jobs);
    let mut out = DiagramWriter::default();

    out.raw("```mermaid");
    out.raw("stateDiagram-v2");
    out.raw("");

    out.depth = 1;
    for job in &ordered {
        out.line(format!("{}: {}", job.id, job.display_name()));
    }
    if !ordered.is_empty() {
        out.raw("");
    }

    out.line(format!("[*] --> {}", TRIGGERS_STATE));
    out.open(TRIGGERS_STATE);
    for (position, job) in ordered.iter().enumerate() {
        out.line(format!("[*] --> {}", job.id));
        out.open(&job.id);
        render_job_body(&mut out, job);
        out.close();

        for prerequisite in graph.prerequisites(&job.id) {
            out.line(format!("{} --> {}", prerequisite, job.id));
        }
        if position + 1 < ordered.len() {
            out.line("--");
        }
    }
    out.close();

    out.depth = 0;
    out.raw("```");
    out.lines.join("\n")
}

fn render_job_body(out: &mut DiagramWriter, job: &Job) {
    if let Some(uses) = &job.uses {
        out.line(format!("{}>>workflow_call: {}", job.id, uses));
        return;
    }

    let labels: Vec<String> = job
        .steps
        .iter()
        .map(|step| step_state_id(&job.id, &step.label()))
        .collect();

    match labels.as_slice() {
        [] => out.line(step_state_id(&job.id, "no steps")),
        [only] => out.line(only),
        _ => {
            for pair in labels.windows(2) {
                out.line(format!("{} --> {}", pair[0], pair[1]));
            }
        }
    }
}

/// State id for a step, namespaced by job so equal step names never merge.
/// Spaces and `:` are entity-encoded; a bare `:` starts a state description.
pub fn step_state_id(job_id: &str, label: &str) -> String {
    format!(
        "{}>>{}",
        job_id,
        label.replace(' ', NBSP).replace(':', COLON)
    )
}
