//! Span-level precision, recall and F1 over IOB-style tag sequences.
//!
//! Chunking follows the lenient scheme used by seqeval: a chunk opens on `B`
//! or `S`, on an `I`/`E` that does not continue the previous chunk, or on any
//! type change. A chunk closes on `E`/`S`, before `B`/`S`/`O`, or when the
//! type changes. The chunk type is the text after the first `-` following the
//! prefix character, or `_` when that is empty, so `CCONJ` and `SCONJ` share
//! the type `CONJ`. Sequences are concatenated with an `O` separator, so
//! chunks never span two examples. Spans match only when label, start and
//! end agree. Gold and predicted examples must pair up tag for tag.

use std::collections::BTreeSet;

use crate::input::LabeledExample;
use crate::metrics::{Metric, MetricError, Scores, shape_error, to_percent};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Chunk {
    pub label: String,
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrecisionRecallF1 {
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

pub fn score(
    gold: &[LabeledExample],
    predicted: &[LabeledExample],
    _language: Option<&str>,
) -> Result<Scores, MetricError> {
    check_lengths(gold, predicted)?;
    let gold_tags = flatten(gold)?;
    let pred_tags = flatten(predicted)?;
    let prf = precision_recall_f1(&gold_tags, &pred_tags);

    let mut scores = Scores::new();
    scores.insert("f1".to_string(), to_percent(prf.f1));
    scores.insert("precision".to_string(), to_percent(prf.precision));
    scores.insert("recall".to_string(), to_percent(prf.recall));
    Ok(scores)
}

pub fn precision_recall_f1<S: AsRef<str>>(gold: &[S], predicted: &[S]) -> PrecisionRecallF1 {
    let gold_chunks: BTreeSet<Chunk> = extract_chunks(gold).into_iter().collect();
    let pred_chunks: BTreeSet<Chunk> = extract_chunks(predicted).into_iter().collect();
    let correct = gold_chunks.intersection(&pred_chunks).count() as f64;

    let precision = ratio(correct, pred_chunks.len());
    let recall = ratio(correct, gold_chunks.len());
    let f1 = if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    };

    PrecisionRecallF1 {
        precision,
        recall,
        f1,
    }
}

pub fn extract_chunks<S: AsRef<str>>(tags: &[S]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut prev_prefix = 'O';
    let mut prev_label = "";
    let mut begin = 0usize;

    let sentinel = std::iter::once("O");
    for (i, tag) in tags.iter().map(|t| t.as_ref()).chain(sentinel).enumerate() {
        let (prefix, label) = split_tag(tag);
        if ends_chunk(prev_prefix, prefix, prev_label, label) {
            chunks.push(Chunk {
                label: prev_label.to_string(),
                start: begin,
                end: i - 1,
            });
        }
        if starts_chunk(prev_prefix, prefix, prev_label, label) {
            begin = i;
        }
        prev_prefix = prefix;
        prev_label = label;
    }

    chunks
}

fn flatten(examples: &[LabeledExample]) -> Result<Vec<&str>, MetricError> {
    let mut out = Vec::new();
    for example in examples {
        let tags = example
            .as_tags()
            .ok_or_else(|| shape_error(Metric::SeqevalF1, example))?;
        out.extend(tags.iter().map(String::as_str));
        out.push("O");
    }
    Ok(out)
}

fn check_lengths(gold: &[LabeledExample], predicted: &[LabeledExample]) -> Result<(), MetricError> {
    if gold.len() != predicted.len() {
        return Err(MetricError::ExampleCount {
            gold: gold.len(),
            predicted: predicted.len(),
        });
    }
    for (index, (g, p)) in gold.iter().zip(predicted).enumerate() {
        let (Some(g), Some(p)) = (g.as_tags(), p.as_tags()) else {
            continue;
        };
        if g.len() != p.len() {
            return Err(MetricError::Length {
                index,
                gold: g.len(),
                predicted: p.len(),
            });
        }
    }
    Ok(())
}

fn split_tag(tag: &str) -> (char, &str) {
    let mut chars = tag.chars();
    let prefix = chars.next().unwrap_or('O');
    let rest = chars.as_str();
    let label = rest.split_once('-').map_or(rest, |(_, label)| label);
    (prefix, if label.is_empty() { "_" } else { label })
}

fn ends_chunk(prev_prefix: char, prefix: char, prev_label: &str, label: &str) -> bool {
    match (prev_prefix, prefix) {
        ('E' | 'S', _) => true,
        ('B' | 'I', 'B' | 'S' | 'O') => true,
        _ => prev_prefix != 'O' && prev_prefix != '.' && prev_label != label,
    }
}

fn starts_chunk(prev_prefix: char, prefix: char, prev_label: &str, label: &str) -> bool {
    match (prev_prefix, prefix) {
        (_, 'B' | 'S') => true,
        ('E' | 'S' | 'O', 'E' | 'I') => true,
        _ => prefix != 'O' && prefix != '.' && prev_label != label,
    }
}

fn ratio(numerator: f64, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator / denominator as f64
    }
}
