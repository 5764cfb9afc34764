use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{InputError, LabeledExample, Reader};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("xeval_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_file(path: &Path, contents: &str) {
    let mut f = BufWriter::new(File::create(path).unwrap());
    f.write_all(contents.as_bytes()).unwrap();
}

fn tagged(tags: &[&str]) -> LabeledExample {
    LabeledExample::Tagged(tags.iter().map(|t| t.to_string()).collect())
}

#[test]
fn test_labels_strip_and_keep_order() {
    let dir = make_temp_dir();
    let path = dir.join("test-en.tsv");
    write_file(&path, "  entailment \ncontradiction\nneutral\n");

    let labels = Reader::Labels.read(&path).unwrap();
    let values: Vec<&str> = labels.iter().filter_map(|l| l.as_scalar()).collect();
    assert_eq!(values, vec!["entailment", "contradiction", "neutral"]);
}

#[test]
fn test_labels_ignore_extra_columns() {
    let dir = make_temp_dir();
    let path = dir.join("test-de.tsv");
    write_file(&path, "1\tein Satz\tzwei Satz\n0\tdrei\tvier");

    let labels = Reader::Labels.read(&path).unwrap();
    assert_eq!(
        labels,
        vec![
            LabeledExample::Scalar("1".to_string()),
            LabeledExample::Scalar("0".to_string())
        ]
    );
}

#[test]
fn test_labels_missing_file_is_io_error() {
    let dir = make_temp_dir();
    let err = Reader::Labels.read(&dir.join("absent.tsv")).unwrap_err();
    assert!(matches!(err, InputError::Io { .. }));
    assert!(err.to_string().contains("absent.tsv"));
}

#[test]
fn test_tags_split_on_blank_lines() {
    let dir = make_temp_dir();
    let path = dir.join("test-en.tsv");
    write_file(&path, "B-PER\nI-PER\nO\n\nB-LOC\n\n");

    let examples = Reader::Tags.read(&path).unwrap();
    assert_eq!(
        examples,
        vec![tagged(&["B-PER", "I-PER", "O"]), tagged(&["B-LOC"])]
    );
}

#[test]
fn test_tags_flush_last_example_without_trailing_blank() {
    let dir = make_temp_dir();
    let path = dir.join("test-fr.tsv");
    write_file(&path, "B-ORG\n\nO\nB-PER");

    let examples = Reader::Tags.read(&path).unwrap();
    assert_eq!(examples.len(), 2);
    assert_eq!(examples[1], tagged(&["O", "B-PER"]));
}

#[test]
fn test_tags_consecutive_blank_lines_yield_empty_example() {
    let dir = make_temp_dir();
    let path = dir.join("test-es.tsv");
    write_file(&path, "O\n\n\nB-MISC\n");

    let examples = Reader::Tags.read(&path).unwrap();
    assert_eq!(
        examples,
        vec![tagged(&["O"]), tagged(&[]), tagged(&["B-MISC"])]
    );
}

#[test]
fn test_squad_dataset_answers() {
    let dir = make_temp_dir();
    let path = dir.join("test-en.json");
    write_file(
        &path,
        r#"{"version": "1.1", "data": [{"title": "t", "paragraphs": [{"context": "c",
            "qas": [{"id": "q1", "question": "?", "answers": [{"text": "Paris", "answer_start": 0}, {"text": "the Paris", "answer_start": 0}]},
                    {"id": "q2", "question": "?", "answers": []}]}]}]}"#,
    );

    let examples = Reader::Squad.read(&path).unwrap();
    assert_eq!(
        examples,
        vec![
            LabeledExample::Answers {
                id: "q1".to_string(),
                texts: vec!["Paris".to_string(), "the Paris".to_string()],
            },
            LabeledExample::Answers {
                id: "q2".to_string(),
                texts: vec![],
            },
        ]
    );
}

#[test]
fn test_squad_prediction_map() {
    let dir = make_temp_dir();
    let path = dir.join("test-en.json");
    write_file(&path, r#"{"q2": "Berlin", "q1": "Paris"}"#);

    let examples = Reader::Squad.read(&path).unwrap();
    assert_eq!(
        examples[0],
        LabeledExample::Answers {
            id: "q1".to_string(),
            texts: vec!["Paris".to_string()],
        }
    );
    assert_eq!(examples.len(), 2);
}

#[test]
fn test_squad_malformed_json() {
    let dir = make_temp_dir();
    let path = dir.join("test-en.json");
    write_file(&path, "{not json");

    let err = Reader::Squad.read(&path).unwrap_err();
    assert!(matches!(err, InputError::Json { .. }));
}

#[test]
fn test_squad_rejects_top_level_array() {
    let dir = make_temp_dir();
    let path = dir.join("test-en.json");
    write_file(&path, "[1, 2]");

    let err = Reader::Squad.read(&path).unwrap_err();
    assert!(matches!(err, InputError::Parse { .. }));
}
