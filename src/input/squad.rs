use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::input::{InputError, LabeledExample};

const EXPECTED_VERSION: &str = "1.1";

#[derive(Debug, Deserialize)]
struct SquadDataset {
    #[serde(default)]
    version: Option<Value>,
    data: Vec<SquadArticle>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    paragraphs: Vec<SquadParagraph>,
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    qas: Vec<SquadQa>,
}

#[derive(Debug, Deserialize)]
struct SquadQa {
    id: String,
    #[serde(default)]
    answers: Vec<SquadAnswer>,
}

#[derive(Debug, Deserialize)]
struct SquadAnswer {
    text: String,
}

/// Reads a SQuAD-format dataset (object with a `data` array) or a
/// prediction map of question id to answer text.
pub fn read_squad(path: &Path) -> Result<Vec<LabeledExample>, InputError> {
    let raw = std::fs::read_to_string(path).map_err(|e| InputError::io(path, e))?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    let is_dataset = value.get("data").is_some_and(Value::is_array);
    if is_dataset {
        let dataset: SquadDataset =
            serde_json::from_value(value).map_err(|source| InputError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(dataset_examples(path, dataset))
    } else if value.is_object() {
        let predictions: BTreeMap<String, String> =
            serde_json::from_value(value).map_err(|source| InputError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(predictions
            .into_iter()
            .map(|(id, text)| LabeledExample::Answers {
                id,
                texts: vec![text],
            })
            .collect())
    } else {
        Err(InputError::Parse {
            path: path.to_path_buf(),
            msg: "expected a JSON object at top level".to_string(),
        })
    }
}

fn dataset_examples(path: &Path, dataset: SquadDataset) -> Vec<LabeledExample> {
    if let Some(version) = &dataset.version {
        if version.as_str() != Some(EXPECTED_VERSION) {
            tracing::warn!(
                file = %path.display(),
                found = %version,
                "evaluation expects SQuAD v{EXPECTED_VERSION}"
            );
        }
    }

    let mut examples = Vec::new();
    for article in dataset.data {
        for paragraph in article.paragraphs {
            for qa in paragraph.qas {
                examples.push(LabeledExample::Answers {
                    id: qa.id,
                    texts: qa.answers.into_iter().map(|a| a.text).collect(),
                });
            }
        }
    }
    examples
}
