use workflowdoc::core::workflow::graph::{rendering_order, DependencyGraph};
use workflowdoc::core::workflow::WorkflowDocument;

const FAN_IN: &str = r#"
name: Fan-in
on:
  workflow_dispatch:
jobs:
  report:
    needs: [unit, integration, lint]
    steps:
      - run: ./report.sh
  integration:
    needs: [build]
    steps:
      - run: ./it.sh
  build:
    steps:
      - run: make
  unit:
    needs: build
    steps:
      - run: ./unit.sh
  lint:
    steps:
      - run: ./lint.sh
"#;

fn order_of(text: &str) -> Vec<String> {
    let document = WorkflowDocument::from_yaml_str(text).expect("parse workflow");
    rendering_order(&document.jobs)
        .into_iter()
        .map(|job| job.id.clone())
        .collect()
}

#[test]
fn fewer_prerequisites_render_first_with_stable_ties() {
    assert_eq!(
        order_of(FAN_IN),
        vec!["build", "lint", "integration", "unit", "report"]
    );
}

#[test]
fn rendering_order_is_deterministic() {
    let first = order_of(FAN_IN);
    for _ in 0..10 {
        assert_eq!(order_of(FAN_IN), first);
    }
}

#[test]
fn cyclic_needs_still_render_every_job_once() {
    let text = r#"
name: Cycle
on:
  workflow_dispatch:
jobs:
  a:
    needs: b
    steps:
      - run: a
  b:
    needs: a
    steps:
      - run: b
"#;
    assert_eq!(order_of(text), vec!["a", "b"]);

    let document = WorkflowDocument::from_yaml_str(text).expect("parse workflow");
    let graph = DependencyGraph::from_jobs(&document.jobs);
    assert_eq!(graph.cycles(), vec![vec!["a".to_string(), "b".to_string()]]);
    assert_eq!(graph.dependents("a").collect::<Vec<_>>(), vec!["b"]);
}
