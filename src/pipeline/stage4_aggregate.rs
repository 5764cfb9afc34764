use std::collections::BTreeMap;

use crate::registry::{ALL_TASKS_SCOPE, Registry};
use crate::report::{TaskScores, mean};

/// Group and global averages of `avg_metric`. A scope is emitted only when
/// every one of its tasks has an `avg_metric`.
pub fn run_stage4(
    registry: &Registry,
    detailed: &BTreeMap<String, TaskScores>,
) -> BTreeMap<String, f64> {
    let mut overall = BTreeMap::new();

    let all_ids: Vec<&str> = registry.tasks().iter().map(|t| t.id).collect();
    if let Some(score) = scope_average(&all_ids, detailed) {
        overall.insert(ALL_TASKS_SCOPE.to_string(), score);
    }

    for group in registry.groups() {
        match scope_average(group.tasks, detailed) {
            Some(score) => {
                overall.insert(group.id.to_string(), score);
            }
            None => {
                tracing::debug!(group = group.id, "group incomplete, no combined score");
            }
        }
    }

    overall
}

pub fn scope_average(task_ids: &[&str], detailed: &BTreeMap<String, TaskScores>) -> Option<f64> {
    let values = task_ids
        .iter()
        .map(|id| detailed.get(*id).and_then(|s| s.avg_metric))
        .collect::<Option<Vec<f64>>>()?;
    mean(&values)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_aggregate.rs"]
mod tests;
