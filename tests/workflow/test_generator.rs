use insta::assert_snapshot;
use std::fs;
use tempfile::tempdir;
use workflowdoc::core::types::ErrorCategory;
use workflowdoc::core::workflow::{generate, generate_markdown};

const RELEASE_WORKFLOW: &str = include_str!("../fixtures/release.yml");

const BUILD_WORKFLOW: &str = r#"
name: "Build"
on:
  workflow_dispatch:
    inputs:
      env:
        type: choice
        options: [dev, prod]
        required: true
jobs:
  build:
    steps:
      - name: "Checkout"
      - run: "make build"
"#;

const TWO_JOBS: &str = r#"
name: Pipeline
on:
  workflow_dispatch:
jobs:
  job_b:
    needs: job_a
    steps:
      - run: echo b
  job_a:
    steps:
      - run: echo a
"#;

fn diagram_lines(markdown: &str) -> Vec<&str> {
    markdown
        .lines()
        .skip_while(|line| *line != "```mermaid")
        .skip(1)
        .take_while(|line| *line != "```")
        .collect()
}

#[test]
fn build_workflow_renders_title_inputs_and_step_chain() {
    let markdown = generate_markdown(BUILD_WORKFLOW).expect("render");

    assert!(markdown.starts_with("# Build\n"));
    assert!(markdown.contains("### `workflow_dispatch`"));
    assert!(markdown
        .contains("| env | | | * | `choice`:<br /><ul><li>dev</li><li>prod</li></ul> |"));
    assert!(diagram_lines(&markdown)
        .iter()
        .any(|line| line.trim() == "build>>Checkout --> build>>make&nbsp;build"));
}

#[test]
fn needs_edge_and_block_order() {
    let markdown = generate_markdown(TWO_JOBS).expect("render");
    let lines = diagram_lines(&markdown);

    assert!(lines.iter().any(|line| line.trim() == "job_a --> job_b"));
    let block_a = lines
        .iter()
        .position(|line| line.trim() == "state job_a {")
        .expect("job_a block");
    let block_b = lines
        .iter()
        .position(|line| line.trim() == "state job_b {")
        .expect("job_b block");
    assert!(block_a < block_b);
    assert!(!lines
        .iter()
        .any(|line| line.trim().ends_with("--> job_a") && !line.trim().starts_with("[*]")));
}

#[test]
fn empty_jobs_render_no_job_states() {
    let markdown = generate_markdown("name: Empty\non:\n  workflow_dispatch:\njobs: {}\n")
        .expect("render");
    let lines = diagram_lines(&markdown);

    assert_eq!(
        lines.iter().filter(|line| line.trim().starts_with("state ")).count(),
        1
    );
    assert!(!lines.iter().any(|line| {
        let line = line.trim();
        line.contains(" --> ") && !line.starts_with("[*]")
    }));
}

#[test]
fn workflow_run_branches_ignore_uses_deny_list_heading() {
    let markdown = generate_markdown(
        r#"
name: Follow-up
on:
  workflow_run:
    workflows: [CI]
    branches-ignore: [main]
    types: [completed]
jobs:
  notify:
    steps:
      - run: ./notify.sh
"#,
    )
    .expect("render");

    assert!(markdown.contains("#### Skipped workflow branches\n\n- main"));
    assert!(!markdown.contains("#### Workflow branches"));
    assert!(markdown.contains("#### Triggering workflows\n\n- CI"));
}

#[test]
fn capitalized_on_key_is_not_the_trigger_section() {
    let err = generate_markdown("name: Quoted\nOn:\n  workflow_call:\njobs: {}\n").unwrap_err();
    assert_eq!(err.category, ErrorCategory::MissingRequiredField);
    assert!(err.message.contains("'on'"));
}

#[test]
fn missing_jobs_is_fatal() {
    let err = generate_markdown("name: x\non:\n  workflow_dispatch:\n").unwrap_err();
    assert_eq!(err.category, ErrorCategory::MissingRequiredField);
    assert!(err.message.contains("'jobs'"));
}

#[test]
fn description_block_is_rendered_below_title() {
    let markdown = generate_markdown(RELEASE_WORKFLOW).expect("render");
    assert!(markdown.starts_with(
        "# Release\n\nPublishes a release build.\n\nTriggered manually or by CI.\n\n## Workflow Diagram\n"
    ));
}

#[test]
fn generate_writes_markdown_next_to_workflow() {
    let dir = tempdir().expect("temp dir");
    let workflow_path = dir.path().join("build.yml");
    fs::write(&workflow_path, BUILD_WORKFLOW).expect("write workflow");

    let output_path = generate(&workflow_path).expect("generate");

    assert_eq!(output_path, dir.path().join("build.yml.md"));
    let written = fs::read_to_string(&output_path).expect("read output");
    assert_eq!(written, generate_markdown(BUILD_WORKFLOW).unwrap());
}

#[test]
fn missing_input_reports_input_not_found_and_writes_nothing() {
    let dir = tempdir().expect("temp dir");
    let workflow_path = dir.path().join("missing.yml");

    let err = generate(&workflow_path).unwrap_err();

    assert_eq!(err.category, ErrorCategory::InputNotFound);
    assert!(!dir.path().join("missing.yml.md").exists());
}

#[test]
fn malformed_document_writes_nothing() {
    let dir = tempdir().expect("temp dir");
    let workflow_path = dir.path().join("broken.yml");
    fs::write(&workflow_path, "name: [broken\n").expect("write workflow");

    let err = generate(&workflow_path).unwrap_err();

    assert_eq!(err.category, ErrorCategory::MalformedDocument);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn release_workflow_snapshot() {
    let markdown = generate_markdown(RELEASE_WORKFLOW).expect("render");
    assert_snapshot!(markdown, @r###"
# Release

Publishes a release build.

Triggered manually or by CI.

## Workflow Diagram

```mermaid
stateDiagram-v2

    build: build
    test: test
    publish: Publish image

    [*] --> Triggers
    state Triggers {
        [*] --> build
        state build {
            build>>Checkout --> build>>make&nbsp;build
        }
        --
        [*] --> test
        state test {
            test>>workflow_call: ./.github/workflows/test.yml
        }
        build --> test
        --
        [*] --> publish
        state publish {
            publish>>actions/checkout@v4 --> publish>>make&nbsp;publi
        }
        build --> publish
        test --> publish
    }
```

## Triggers

### `workflow_call`

This workflow is reusable.

#### Inputs

| Name | Description | Default | Required | Type |
| :--- | :---------- | :------ | :------: | :--- |
| version | Version to publish | | * | `string` |

#### Secrets

| Name | Description | Required |
| :--- | :---------- | :------: |
| token | Registry token | * |

#### Outputs

| Name | Description |
| :--- | :---------- |
| digest | Image digest |

### `workflow_dispatch`

This workflow can be manually triggered.

#### Inputs

| Name | Description | Default | Required | Type |
| :--- | :---------- | :------ | :------: | :--- |
| env | | | * | `choice`:<br /><ul><li>dev</li><li>prod</li></ul> |

### `workflow_run`

This workflow is triggered by the execution of other workflows.

#### Triggering workflows

- CI

#### Skipped workflow branches

- main

#### Workflow activity types

- completed
"###);
}
