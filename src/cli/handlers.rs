//! Command handlers wiring the pipeline to the terminal

use super::commands::ExtractArgs;
use super::output::OutputFormatter;
use crate::fs::RealFileSystem;
use crate::pipeline::Pipeline;
use crate::progress::{LoggingHandler, NoOpHandler, ProgressHandler, SpinnerHandler};
use crate::recipe::RecipeError;
use anyhow::{Context, Result};
use tracing::error;

/// Run the extract command; returns the process exit code.
pub fn handle_extract(args: &ExtractArgs, quiet: bool, verbose: bool) -> i32 {
    match run_extract(args, quiet, verbose) {
        Ok(()) => 0,
        Err(err) => {
            error!(error = %err, "extract failed");
            eprintln!("Error: {err:#}");
            exit_code_for(&err)
        }
    }
}

fn run_extract(args: &ExtractArgs, quiet: bool, verbose: bool) -> Result<()> {
    let fs = RealFileSystem;

    let spinner = (!quiet && !verbose && !args.no_progress).then(SpinnerHandler::new);
    let logging = LoggingHandler;
    let noop = NoOpHandler;
    let progress: &dyn ProgressHandler = match &spinner {
        Some(bar) => bar,
        None if quiet => &noop,
        None => &logging,
    };

    let pipeline = Pipeline::with_progress(&fs, progress);
    let result = pipeline.run(&args.recipe_path);
    if let Some(bar) = &spinner {
        bar.finish();
    }
    let report = result.with_context(|| {
        format!("failed to extract recipe at {}", args.recipe_path.display())
    })?;

    let formatter = OutputFormatter::new(args.format.into());
    let rendered = formatter.format(&report)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            if !quiet {
                eprintln!("Report written to {}", path.display());
            }
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Structural and naming errors are operator data errors; everything else
/// is an environment failure.
fn exit_code_for(err: &anyhow::Error) -> i32 {
    match err.downcast_ref::<RecipeError>() {
        Some(RecipeError::InvalidName { .. }) => 2,
        Some(RecipeError::TooManyProfiles { .. }) => 3,
        Some(_) => 4,
        None => 1,
    }
}
