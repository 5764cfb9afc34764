//! Exact match and token F1 for extractive question answering.
//!
//! `squad_score` normalizes answers the SQuAD v1.1 way (English articles,
//! ASCII punctuation). `mlqa_score` uses the answer language: Unicode
//! punctuation, per-language articles and per-character segmentation for
//! Chinese.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::input::LabeledExample;
use crate::metrics::{Metric, MetricError, Scores, shape_error, to_percent};

static EN_ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(a|an|the)\b").expect("valid article pattern"));
static ES_ARTICLES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(un|una|unos|unas|el|la|los|las)\b").expect("valid article pattern")
});
static VI_ARTICLES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(của|là|cái|chiếc|những)\b").expect("valid article pattern")
});
static DE_ARTICLES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(ein|eine|einen|einem|eines|einer|der|die|das|den|dem|des)\b")
        .expect("valid article pattern")
});
static AR_ARTICLES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("ال").expect("valid article pattern"));
static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{P}[:punct:]]").expect("valid punctuation pattern"));

#[derive(Debug, Clone, Copy)]
enum Normalization<'a> {
    Squad,
    Mlqa { language: Option<&'a str> },
}

pub fn squad_score(
    gold: &[LabeledExample],
    predicted: &[LabeledExample],
    _language: Option<&str>,
) -> Result<Scores, MetricError> {
    score_answers(Metric::SquadEmF1, gold, predicted, Normalization::Squad)
}

pub fn mlqa_score(
    gold: &[LabeledExample],
    predicted: &[LabeledExample],
    language: Option<&str>,
) -> Result<Scores, MetricError> {
    score_answers(
        Metric::MlqaEmF1,
        gold,
        predicted,
        Normalization::Mlqa { language },
    )
}

fn score_answers(
    metric: Metric,
    gold: &[LabeledExample],
    predicted: &[LabeledExample],
    normalization: Normalization<'_>,
) -> Result<Scores, MetricError> {
    let mut answers: HashMap<&str, &str> = HashMap::with_capacity(predicted.len());
    for example in predicted {
        let LabeledExample::Answers { id, texts } = example else {
            return Err(shape_error(metric, example));
        };
        if let Some(text) = texts.first() {
            answers.insert(id.as_str(), text.as_str());
        }
    }

    let mut total = 0usize;
    let mut unanswered = 0usize;
    let mut exact = 0.0f64;
    let mut f1 = 0.0f64;
    for example in gold {
        let LabeledExample::Answers { id, texts } = example else {
            return Err(shape_error(metric, example));
        };
        total += 1;
        let Some(prediction) = answers.get(id.as_str()) else {
            unanswered += 1;
            continue;
        };
        let prediction = normalize(prediction, normalization);
        exact += texts
            .iter()
            .map(|truth| exact_match(&prediction, &normalize(truth, normalization)))
            .fold(0.0, f64::max);
        f1 += texts
            .iter()
            .map(|truth| token_f1(&prediction, &normalize(truth, normalization)))
            .fold(0.0, f64::max);
    }

    if total == 0 {
        return Err(MetricError::Empty);
    }
    if unanswered > 0 {
        tracing::debug!(unanswered, total, "unanswered questions score 0");
    }

    let mut scores = Scores::new();
    scores.insert("exact_match".to_string(), to_percent(exact / total as f64));
    scores.insert("f1".to_string(), to_percent(f1 / total as f64));
    Ok(scores)
}

fn exact_match(prediction: &str, truth: &str) -> f64 {
    if prediction == truth { 1.0 } else { 0.0 }
}

/// Token-overlap F1 between two already normalized answers.
fn token_f1(prediction: &str, truth: &str) -> f64 {
    let pred_tokens: Vec<&str> = prediction.split_whitespace().collect();
    let truth_tokens: Vec<&str> = truth.split_whitespace().collect();

    let mut remaining: HashMap<&str, usize> = HashMap::new();
    for token in &truth_tokens {
        *remaining.entry(*token).or_default() += 1;
    }
    let mut same = 0usize;
    for token in &pred_tokens {
        if let Some(count) = remaining.get_mut(token) {
            if *count > 0 {
                *count -= 1;
                same += 1;
            }
        }
    }

    if same == 0 {
        return 0.0;
    }
    let precision = same as f64 / pred_tokens.len() as f64;
    let recall = same as f64 / truth_tokens.len() as f64;
    2.0 * precision * recall / (precision + recall)
}

fn normalize(text: &str, normalization: Normalization<'_>) -> String {
    match normalization {
        Normalization::Squad => normalize_squad_answer(text),
        Normalization::Mlqa { language } => normalize_mlqa_answer(text, language),
    }
}

pub fn normalize_squad_answer(text: &str) -> String {
    let lower = text.to_lowercase();
    let no_punct: String = lower.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let no_articles = EN_ARTICLES.replace_all(&no_punct, " ");
    no_articles.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn normalize_mlqa_answer(text: &str, language: Option<&str>) -> String {
    let lower = text.to_lowercase();
    let no_punct = PUNCTUATION.replace_all(&lower, "");
    let no_articles = match articles_for(language) {
        Some(pattern) => pattern.replace_all(&no_punct, " ").into_owned(),
        None => no_punct.into_owned(),
    };
    let tokens = if language == Some("zh") {
        mixed_segmentation(&no_articles)
    } else {
        no_articles
            .split_whitespace()
            .map(str::to_string)
            .collect()
    };
    tokens
        .into_iter()
        .filter(|t| !t.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn articles_for(language: Option<&str>) -> Option<&'static Regex> {
    match language? {
        "en" => Some(&*EN_ARTICLES),
        "es" => Some(&*ES_ARTICLES),
        "vi" => Some(&*VI_ARTICLES),
        "de" => Some(&*DE_ARTICLES),
        "ar" => Some(&*AR_ARTICLES),
        _ => None,
    }
}

/// Splits CJK ideographs and punctuation into single-character tokens and
/// whitespace-tokenizes everything in between.
fn mixed_segmentation(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut pending = String::new();
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        if is_cjk(ch) || PUNCTUATION.is_match(ch.encode_utf8(&mut buf)) {
            segments.extend(pending.split_whitespace().map(str::to_string));
            pending.clear();
            segments.push(ch.to_string());
        } else {
            pending.push(ch);
        }
    }
    segments.extend(pending.split_whitespace().map(str::to_string));
    segments
}

fn is_cjk(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&ch)
}
