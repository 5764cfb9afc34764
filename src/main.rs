mod input;
mod logging;
mod metrics;
mod pipeline;
mod preprocess;
mod registry;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::input::InputError;
use crate::pipeline::{EvalError, evaluate};
use crate::preprocess::preprocess_pawsx;
use crate::registry::Registry;
use crate::report::json::{render_report_json, write_report_json};
use crate::report::text::render_task_summary;

#[derive(Debug, Parser)]
#[command(name = "xeval", version)]
#[command(about = "Scores multilingual benchmark predictions against gold labels")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Score every task found in both folders and print the JSON report
    Evaluate(EvaluateArgs),
    /// Normalize raw PAWS-X files into evaluation-ready TSVs
    Preprocess(PreprocessArgs),
}

#[derive(Debug, Args)]
struct EvaluateArgs {
    /// Root holding one folder of predictions per task
    #[arg(long = "prediction_folder")]
    prediction_folder: PathBuf,

    /// Root holding one folder of gold labels per task
    #[arg(long = "label_folder")]
    label_folder: PathBuf,

    /// Print one summary line per task before the report
    #[arg(long)]
    verbose: bool,

    /// Restrict the run to these tasks or groups (comma separated)
    #[arg(long, value_delimiter = ',')]
    tasks: Option<Vec<String>>,

    /// Write the report here instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct PreprocessArgs {
    #[arg(long = "data_dir", default_value = "./data/x-final")]
    data_dir: PathBuf,

    #[arg(long = "output_dir", default_value = "./data/paws_x")]
    output_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct EvalConfig {
    prediction_root: PathBuf,
    label_root: PathBuf,
    verbose: bool,
    tasks: Option<Vec<String>>,
    output: Option<PathBuf>,
}

impl From<EvaluateArgs> for EvalConfig {
    fn from(args: EvaluateArgs) -> Self {
        Self {
            prediction_root: args.prediction_folder,
            label_root: args.label_folder,
            verbose: args.verbose,
            tasks: args.tasks,
            output: args.output,
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("cannot serialize report: {0}")]
    Render(#[from] serde_json::Error),
    #[error("cannot write report to {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() {
    let cli = Cli::parse();
    let verbose = matches!(&cli.command, Command::Evaluate(args) if args.verbose);
    logging::init(verbose);

    if let Err(err) = run(cli.command) {
        tracing::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<(), AppError> {
    match command {
        Command::Evaluate(args) => run_evaluate(&EvalConfig::from(args)),
        Command::Preprocess(args) => {
            let written = preprocess_pawsx(&args.data_dir, &args.output_dir)?;
            tracing::info!(files = written.len(), "preprocessing done");
            Ok(())
        }
    }
}

fn run_evaluate(config: &EvalConfig) -> Result<(), AppError> {
    let registry = Registry::builtin();
    registry.validate().map_err(EvalError::from)?;

    let outcome = evaluate(
        registry,
        &config.prediction_root,
        &config.label_root,
        config.tasks.as_deref(),
    )?;

    if config.verbose {
        for line in render_task_summary(registry, &outcome.report) {
            println!("{line}");
        }
    }

    match &config.output {
        Some(path) => {
            write_report_json(&outcome.report, path).map_err(|source| AppError::Write {
                path: path.clone(),
                source,
            })?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{}", render_report_json(&outcome.report)?),
    }

    if !outcome.failures.is_empty() {
        let failed: Vec<&str> = outcome.failures.iter().map(|f| f.task).collect();
        tracing::warn!(tasks = %failed.join(","), "some tasks were skipped after errors");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
