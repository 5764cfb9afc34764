use crate::input::LabeledExample;
use crate::metrics::{Metric, MetricError, Scores, shape_error, to_percent};

/// Fraction of positions where the prediction equals the gold label.
pub fn score(
    gold: &[LabeledExample],
    predicted: &[LabeledExample],
    _language: Option<&str>,
) -> Result<Scores, MetricError> {
    if predicted.is_empty() {
        return Err(MetricError::Empty);
    }

    let mut correct = 0usize;
    for (g, p) in gold.iter().zip(predicted) {
        let g = g.as_scalar().ok_or_else(|| shape_error(Metric::Accuracy, g))?;
        let p = p.as_scalar().ok_or_else(|| shape_error(Metric::Accuracy, p))?;
        if g == p {
            correct += 1;
        }
    }

    let accuracy = correct as f64 / predicted.len() as f64;
    let mut scores = Scores::new();
    scores.insert("accuracy".to_string(), to_percent(accuracy));
    Ok(scores)
}
