use std::collections::BTreeMap;

use crate::registry::Registry;
use crate::report::{LanguageScores, TaskScores, mean};

/// Folds per-language scores into `avg_<metric>` entries and the task's
/// summary `avg_metric`.
pub fn run_stage3(registry: &Registry, task_id: &str, per_language: LanguageScores) -> TaskScores {
    let mut averages = BTreeMap::new();
    for (metric, by_lang) in &per_language {
        let values: Vec<f64> = by_lang.values().copied().collect();
        if let Some(avg) = mean(&values) {
            averages.insert(format!("avg_{metric}"), avg);
        }
    }

    let mut scores = TaskScores {
        per_language,
        averages,
        avg_metric: None,
    };
    scores.avg_metric = summary_metric(&scores, registry.is_span_extraction(task_id));
    scores
}

pub fn summary_metric(scores: &TaskScores, span_extraction: bool) -> Option<f64> {
    if span_extraction {
        let exact_match = scores.average("exact_match")?;
        let f1 = scores.average("f1")?;
        return Some((exact_match + f1) / 2.0);
    }
    scores
        .average("f1")
        .or_else(|| scores.average("accuracy"))
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_average.rs"]
mod tests;
