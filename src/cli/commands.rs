use crate::{cli::args::GenerateArgs, core::workflow, Result};

/// Handles `workflowdoc generate <workflow_path>`.
pub fn generate(args: GenerateArgs) -> Result<()> {
    println!(
        "Generating markdown documentation for workflow {} ...",
        args.workflow_path.display()
    );
    let output_path = workflow::generate(&args.workflow_path)?;
    println!("Wrote {}", output_path.display());
    Ok(())
}
