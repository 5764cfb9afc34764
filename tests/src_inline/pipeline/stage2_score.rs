use super::*;
use crate::input::Reader;
use crate::metrics::Metric;
use crate::registry::{GroupDef, GroupKind};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

static TASKS: &[TaskDef] = &[
    TaskDef {
        id: "cls",
        languages: &["en", "de", "fr"],
        reader: Reader::Labels,
        metric: Metric::Accuracy,
    },
    TaskDef {
        id: "qa",
        languages: &["en"],
        reader: Reader::Squad,
        metric: Metric::SquadEmF1,
    },
];
static GROUPS: &[GroupDef] = &[
    GroupDef {
        id: "classification",
        kind: GroupKind::Aligned,
        tasks: &["cls"],
    },
    GroupDef {
        id: "reading",
        kind: GroupKind::SpanExtraction,
        tasks: &["qa"],
    },
];
static REGISTRY: Registry = Registry::new(TASKS, GROUPS);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("xeval_stage2_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_task_file(root: &Path, task: &str, name: &str, contents: &str) -> PathBuf {
    let dir = root.join(task);
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_language_file_layout() {
    let path = language_file(Path::new("/preds"), "xquad", "de", "json");
    assert_eq!(path, PathBuf::from("/preds/xquad/test-de.json"));
}

#[test]
fn test_resolve_language_files_missing_side() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    let p = write_task_file(&pred, "cls", "test-en.tsv", "a\n");

    let files = resolve_language_files(&pred, &label, "cls", "en", "tsv");
    assert_eq!(
        files,
        LanguageFiles::Missing {
            prediction: Some(p),
            label: None,
        }
    );
}

#[test]
fn test_missing_language_is_skipped_and_not_reported() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    write_task_file(&pred, "cls", "test-en.tsv", "a\nb\n");
    write_task_file(&label, "cls", "test-en.tsv", "a\nb\n");
    write_task_file(&pred, "cls", "test-de.tsv", "a\n");
    write_task_file(&pred, "cls", "test-fr.tsv", "a\nb\n");
    write_task_file(&label, "cls", "test-fr.tsv", "a\nc\n");

    let scores = run_stage2(&REGISTRY, &TASKS[0], &pred, &label).unwrap();
    let accuracy = &scores["accuracy"];
    assert_eq!(accuracy.len(), 2);
    assert_eq!(accuracy["en"], 100.0);
    assert_eq!(accuracy["fr"], 50.0);
    assert!(!accuracy.contains_key("de"));
}

#[test]
fn test_count_mismatch_names_task_language_and_files() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    let ten = "x\n".repeat(10);
    let eleven = "x\n".repeat(11);
    let p = write_task_file(&pred, "cls", "test-en.tsv", &ten);
    let l = write_task_file(&label, "cls", "test-en.tsv", &eleven);

    let err = run_stage2(&REGISTRY, &TASKS[0], &pred, &label).unwrap_err();
    match &err {
        EvalError::ExampleCountMismatch {
            task,
            language,
            prediction_file,
            label_file,
            predictions,
            labels,
        } => {
            assert_eq!(task, "cls");
            assert_eq!(language, "en");
            assert_eq!(prediction_file, &p);
            assert_eq!(label_file, &l);
            assert_eq!((*predictions, *labels), (10, 11));
        }
        other => panic!("unexpected error: {other}"),
    }
    let message = err.to_string();
    assert!(message.contains("cls"));
    assert!(message.contains(&p.display().to_string()));
    assert!(message.contains(&l.display().to_string()));
}

#[test]
fn test_span_task_skips_count_check() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    write_task_file(&pred, "qa", "test-en.json", r#"{"q1": "Paris"}"#);
    write_task_file(
        &label,
        "qa",
        "test-en.json",
        r#"{"version": "1.1", "data": [{"paragraphs": [{"qas": [
            {"id": "q1", "answers": [{"text": "Paris"}]},
            {"id": "q2", "answers": [{"text": "Rome"}]}]}]}]}"#,
    );

    let scores = run_stage2(&REGISTRY, &TASKS[1], &pred, &label).unwrap();
    assert_eq!(scores["exact_match"]["en"], 50.0);
    assert_eq!(scores["f1"]["en"], 50.0);
}

#[test]
fn test_unreadable_label_file_is_file_format_error() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    write_task_file(&pred, "qa", "test-en.json", r#"{"q1": "Paris"}"#);
    write_task_file(&label, "qa", "test-en.json", "{broken");

    let err = run_stage2(&REGISTRY, &TASKS[1], &pred, &label).unwrap_err();
    assert!(matches!(err, EvalError::FileFormat(_)));
}
