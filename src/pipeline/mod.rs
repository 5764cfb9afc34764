use std::path::{Path, PathBuf};

pub mod stage1_discover;
pub mod stage2_score;
pub mod stage3_average;
pub mod stage4_aggregate;

use crate::input::InputError;
use crate::metrics::MetricError;
use crate::registry::{ConfigError, Registry, TaskDef};
use crate::report::Report;
use stage1_discover::run_stage1;
use stage2_score::run_stage2;
use stage3_average::run_stage3;
use stage4_aggregate::run_stage4;

#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    #[error(transparent)]
    FileFormat(#[from] InputError),
    #[error(
        "number of examples in {} ({predictions}) and {} ({labels}) not matched in {task} task, language {language}",
        .prediction_file.display(),
        .label_file.display()
    )]
    ExampleCountMismatch {
        task: String,
        language: String,
        prediction_file: PathBuf,
        label_file: PathBuf,
        predictions: usize,
        labels: usize,
    },
    #[error("{task} task, language {language}: {source}")]
    Metric {
        task: String,
        language: String,
        #[source]
        source: MetricError,
    },
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("cannot list task folders under {}: {source}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug)]
pub struct TaskFailure {
    pub task: &'static str,
    pub error: EvalError,
}

#[derive(Debug, Default)]
pub struct EvalOutcome {
    pub report: Report,
    pub failures: Vec<TaskFailure>,
}

/// Evaluates every eligible task and aggregates the results.
///
/// `selected` restricts the run to the named tasks; unknown names fail before
/// anything is read. A task that fails is left out of the report and listed
/// in [`EvalOutcome::failures`]; the remaining tasks are still evaluated.
pub fn evaluate(
    registry: &Registry,
    prediction_root: &Path,
    label_root: &Path,
    selected: Option<&[String]>,
) -> Result<EvalOutcome, EvalError> {
    let tasks: Vec<&'static TaskDef> = match selected {
        Some(names) => registry.select(names)?,
        None => registry.tasks().iter().collect(),
    };

    let discovered = run_stage1(prediction_root, label_root)?;
    for name in discovered.unregistered(registry) {
        tracing::debug!(folder = %name, "ignoring folder with no registered task");
    }

    let mut outcome = EvalOutcome::default();
    for task in tasks {
        if !discovered.is_eligible(task.id) {
            tracing::debug!(task = task.id, "task not present in both folders");
            continue;
        }
        match run_stage2(registry, task, prediction_root, label_root) {
            Ok(per_language) => {
                let scores = run_stage3(registry, task.id, per_language);
                tracing::info!(
                    task = task.id,
                    languages = scores.languages().len(),
                    "task scored"
                );
                outcome.report.detailed.insert(task.id.to_string(), scores);
            }
            Err(error) => {
                tracing::error!(task = task.id, "{error}");
                outcome.failures.push(TaskFailure {
                    task: task.id,
                    error,
                });
            }
        }
    }

    outcome.report.overall = run_stage4(registry, &outcome.report.detailed);
    Ok(outcome)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/evaluate.rs"]
mod tests;
