use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub mod labels;
pub mod squad;
pub mod tags;

use labels::read_labels;
use squad::read_squad;
use tags::read_tags;

/// One gold or predicted item as produced by a [`Reader`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabeledExample {
    Scalar(String),
    Tagged(Vec<String>),
    /// A question id with its gold answers, or with the single predicted answer.
    Answers { id: String, texts: Vec<String> },
}

impl LabeledExample {
    pub fn kind(&self) -> &'static str {
        match self {
            LabeledExample::Scalar(_) => "scalar",
            LabeledExample::Tagged(_) => "tagged",
            LabeledExample::Answers { .. } => "answers",
        }
    }

    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            LabeledExample::Scalar(label) => Some(label),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            LabeledExample::Tagged(tags) => Some(tags),
            _ => None,
        }
    }
}

/// File format a task's prediction and label files are parsed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reader {
    Labels,
    Tags,
    Squad,
}

impl Reader {
    pub fn name(self) -> &'static str {
        match self {
            Reader::Labels => "labels",
            Reader::Tags => "tags",
            Reader::Squad => "squad",
        }
    }

    pub fn read(self, path: &Path) -> Result<Vec<LabeledExample>, InputError> {
        match self {
            Reader::Labels => read_labels(path),
            Reader::Tags => read_tags(path),
            Reader::Squad => read_squad(path),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("parse error in {}: {msg}", .path.display())]
    Parse { path: PathBuf, msg: String },
}

impl InputError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        InputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub fn open_text(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|e| InputError::io(path, e))?;
    Ok(Box::new(BufReader::new(file)))
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
