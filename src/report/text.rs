use crate::registry::Registry;
use crate::report::{Report, TaskScores, format_score_1};

/// One `- Evaluate <task>:\t<avg>=<v>, ...` line per evaluated task, in
/// registry order.
pub fn render_task_summary(registry: &Registry, report: &Report) -> Vec<String> {
    registry
        .tasks()
        .iter()
        .filter_map(|task| {
            report
                .detailed
                .get(task.id)
                .map(|scores| render_task_line(task.id, scores))
        })
        .collect()
}

pub fn render_task_line(task_id: &str, scores: &TaskScores) -> String {
    let mut parts: Vec<String> = scores
        .averages
        .iter()
        .map(|(name, v)| format!("{}={}", name, format_score_1(*v)))
        .collect();
    if let Some(v) = scores.avg_metric {
        parts.push(format!("avg_metric={}", format_score_1(v)));
    }
    format!("- Evaluate {}:\t{}", task_id, parts.join(", "))
}
