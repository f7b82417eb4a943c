use clap::Parser;
use std::env;
use std::process::ExitCode;
use workflowdoc::cli::{self, Args};
use workflowdoc::core::{AppError, DefaultErrorReporter, ErrorReporter};
use workflowdoc::logging;

fn main() -> ExitCode {
    let args = Args::parse();
    let reporter = DefaultErrorReporter::new();

    let config_root = env::current_dir().ok();
    let _logging_guard = match logging::init(config_root.as_deref()) {
        Ok(guard) => guard,
        Err(err) => {
            reporter.report_error(&AppError::from(err));
            return ExitCode::FAILURE;
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error = AppError::from(err);
            reporter.report_error(&error);
            ExitCode::FAILURE
        }
    }
}
