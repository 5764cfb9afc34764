use std::collections::BTreeMap;

pub mod accuracy;
pub mod seqeval;
pub mod squad;

use crate::input::LabeledExample;

/// Metric name to score on a 0-100 scale.
pub type Scores = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Accuracy,
    SeqevalF1,
    SquadEmF1,
    /// SQuAD EM/F1 with language-aware answer normalization.
    MlqaEmF1,
}

#[derive(Debug, thiserror::Error)]
pub enum MetricError {
    #[error("no examples to score")]
    Empty,
    #[error("{gold} gold examples but {predicted} predicted")]
    ExampleCount { gold: usize, predicted: usize },
    #[error("example {index} has {gold} gold tags but {predicted} predicted")]
    Length {
        index: usize,
        gold: usize,
        predicted: usize,
    },
    #[error("{metric} cannot score {found} examples")]
    Shape {
        metric: &'static str,
        found: &'static str,
    },
}

impl Metric {
    pub fn name(self) -> &'static str {
        match self {
            Metric::Accuracy => "accuracy",
            Metric::SeqevalF1 => "seqeval_f1",
            Metric::SquadEmF1 => "squad_em_f1",
            Metric::MlqaEmF1 => "mlqa_em_f1",
        }
    }

    pub fn score(
        self,
        gold: &[LabeledExample],
        predicted: &[LabeledExample],
        language: Option<&str>,
    ) -> Result<Scores, MetricError> {
        match self {
            Metric::Accuracy => accuracy::score(gold, predicted, language),
            Metric::SeqevalF1 => seqeval::score(gold, predicted, language),
            Metric::SquadEmF1 => squad::squad_score(gold, predicted, language),
            Metric::MlqaEmF1 => squad::mlqa_score(gold, predicted, language),
        }
    }
}

pub fn to_percent(ratio: f64) -> f64 {
    ratio * 100.0
}

pub(crate) fn shape_error(metric: Metric, example: &LabeledExample) -> MetricError {
    MetricError::Shape {
        metric: metric.name(),
        found: example.kind(),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/metrics/tests.rs"]
mod tests;
