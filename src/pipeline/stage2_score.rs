use std::path::{Path, PathBuf};

use crate::metrics::Scores;
use crate::pipeline::EvalError;
use crate::registry::{Registry, TaskDef};
use crate::report::LanguageScores;

/// Where a (task, language) pair stands before any file is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageFiles {
    Present {
        prediction: PathBuf,
        label: PathBuf,
    },
    /// At least one side is absent; the language is skipped, not scored.
    Missing {
        prediction: Option<PathBuf>,
        label: Option<PathBuf>,
    },
}

pub fn language_file(root: &Path, task_id: &str, language: &str, suffix: &str) -> PathBuf {
    root.join(task_id).join(format!("test-{language}.{suffix}"))
}

pub fn resolve_language_files(
    prediction_root: &Path,
    label_root: &Path,
    task_id: &str,
    language: &str,
    suffix: &str,
) -> LanguageFiles {
    let prediction = language_file(prediction_root, task_id, language, suffix);
    let label = language_file(label_root, task_id, language, suffix);
    match (prediction.is_file(), label.is_file()) {
        (true, true) => LanguageFiles::Present { prediction, label },
        (has_prediction, has_label) => LanguageFiles::Missing {
            prediction: has_prediction.then_some(prediction),
            label: has_label.then_some(label),
        },
    }
}

/// Scores every declared language of `task` that has both files.
pub fn run_stage2(
    registry: &Registry,
    task: &TaskDef,
    prediction_root: &Path,
    label_root: &Path,
) -> Result<LanguageScores, EvalError> {
    let suffix = registry.suffix(task.id);
    let aligned = !registry.is_span_extraction(task.id);
    let mut scores = LanguageScores::new();

    for &language in task.languages {
        let files = resolve_language_files(prediction_root, label_root, task.id, language, suffix);
        let (prediction, label) = match files {
            LanguageFiles::Present { prediction, label } => (prediction, label),
            LanguageFiles::Missing { prediction, label } => {
                tracing::debug!(
                    task = task.id,
                    language,
                    prediction = prediction.is_some(),
                    label = label.is_some(),
                    "skipping language with missing files"
                );
                continue;
            }
        };

        let lang_scores = evaluate_one_language(task, language, &prediction, &label, aligned)?;
        for (metric, value) in lang_scores {
            scores
                .entry(metric)
                .or_default()
                .insert(language.to_string(), value);
        }
    }

    Ok(scores)
}

pub fn evaluate_one_language(
    task: &TaskDef,
    language: &str,
    prediction_file: &Path,
    label_file: &Path,
    aligned: bool,
) -> Result<Scores, EvalError> {
    tracing::debug!(
        task = task.id,
        language,
        reader = task.reader.name(),
        "reading prediction and label files"
    );
    let predictions = task.reader.read(prediction_file)?;
    let labels = task.reader.read(label_file)?;

    if aligned && predictions.len() != labels.len() {
        return Err(EvalError::ExampleCountMismatch {
            task: task.id.to_string(),
            language: language.to_string(),
            prediction_file: prediction_file.to_path_buf(),
            label_file: label_file.to_path_buf(),
            predictions: predictions.len(),
            labels: labels.len(),
        });
    }

    task.metric
        .score(&labels, &predictions, Some(language))
        .map_err(|source| EvalError::Metric {
            task: task.id.to_string(),
            language: language.to_string(),
            source,
        })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
