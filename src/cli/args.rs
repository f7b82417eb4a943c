use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// The workflow to analyse and document
    #[arg(value_name = "WORKFLOW_PATH")]
    pub workflow_path: PathBuf,
}
