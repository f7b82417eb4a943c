//! Workflow documentation generation.
//!
//! Raw workflow text flows through [`normalize`] and [`description`], is
//! loaded by [`schema`] (which calls into [`triggers`]), ordered by
//! [`graph`], and rendered by [`mermaid`] and [`markdown`]. [`generator`]
//! drives the pipeline.

pub mod description;
pub mod generator;
pub mod graph;
pub mod lint;
pub mod markdown;
pub mod mermaid;
pub mod normalize;
pub mod schema;
pub mod triggers;

pub use generator::{generate, generate_markdown, output_path_for};
pub use schema::{Job, Step, WorkflowDocument};
