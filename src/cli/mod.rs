pub mod args;
pub mod commands;

pub use args::GenerateArgs;
use clap::{Parser, Subcommand};

const HELP_TEMPLATE: &str = "\
{name} {version}\n\
{about-with-newline}\n\
USAGE:\n    {usage}\n\
\nOPTIONS:\n{options}\n\
COMMANDS:\n{subcommands}\n";

#[derive(Parser, Debug)]
#[command(name = "workflowdoc")]
#[command(version = crate::VERSION)]
#[command(about = "Document GitHub Actions workflows as markdown with a job diagram")]
#[command(help_template = HELP_TEMPLATE)]
#[command(
    after_long_help = "The generated file is written next to the workflow as <file>.md.\nSet RUST_LOG or WORKFLOWDOC_LOG_LEVEL to see diagnostics."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    #[command(
        about = "Generate markdown documentation for a workflow file",
        long_about = "Generate reads a workflow definition, renders its triggers as markdown tables and its jobs as a mermaid state diagram, and writes the result to <workflow>.md in the same directory.",
        after_help = "Example:\n    workflowdoc generate .github/workflows/release.yml"
    )]
    Generate(GenerateArgs),
}

pub fn run(args: Args) -> crate::Result<()> {
    match args.command {
        Command::Generate(generate_args) => commands::generate(generate_args),
    }
}
