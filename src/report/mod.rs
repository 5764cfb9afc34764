use std::collections::BTreeMap;

use serde::Serialize;

pub mod json;
pub mod text;

/// Metric name to (language to score).
pub type LanguageScores = BTreeMap<String, BTreeMap<String, f64>>;

/// Detailed scores of one task as they appear in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskScores {
    #[serde(flatten)]
    pub per_language: LanguageScores,
    /// `avg_<metric>` entries.
    #[serde(flatten)]
    pub averages: BTreeMap<String, f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_metric: Option<f64>,
}

impl TaskScores {
    pub fn average(&self, metric: &str) -> Option<f64> {
        self.averages.get(&format!("avg_{metric}")).copied()
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut out: Vec<&str> = self
            .per_language
            .values()
            .flat_map(|by_lang| by_lang.keys().map(String::as_str))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}

/// Overall scores merged with the per-task detail, in that key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    #[serde(flatten)]
    pub overall: BTreeMap<String, f64>,
    #[serde(flatten)]
    pub detailed: BTreeMap<String, TaskScores>,
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn format_score_1(v: f64) -> String {
    format!("{:.1}", v)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
