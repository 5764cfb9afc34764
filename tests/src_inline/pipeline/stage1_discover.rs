use super::*;
use crate::registry::Registry;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("xeval_stage1_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_list_task_dirs_only_first_level_folders() {
    let root = make_temp_dir();
    fs::create_dir_all(root.join("pawsx/nested")).unwrap();
    fs::create_dir_all(root.join("xnli")).unwrap();
    fs::write(root.join("udpos"), "not a folder").unwrap();

    let names = list_task_dirs(&root).unwrap();
    let names: Vec<&str> = names.iter().map(String::as_str).collect();
    assert_eq!(names, vec!["pawsx", "xnli"]);
}

#[test]
fn test_eligible_only_when_in_both_roots() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    fs::create_dir_all(pred.join("pawsx")).unwrap();
    fs::create_dir_all(pred.join("xnli")).unwrap();
    fs::create_dir_all(label.join("pawsx")).unwrap();
    fs::create_dir_all(label.join("panx")).unwrap();

    let out = run_stage1(&pred, &label).unwrap();
    assert!(out.is_eligible("pawsx"));
    assert!(!out.is_eligible("xnli"));
    assert!(!out.is_eligible("panx"));
}

#[test]
fn test_unregistered_folders_reported() {
    let pred = make_temp_dir();
    let label = make_temp_dir();
    fs::create_dir_all(pred.join("pawsx")).unwrap();
    fs::create_dir_all(pred.join("my_task")).unwrap();
    fs::create_dir_all(label.join("bucc2018")).unwrap();

    let out = run_stage1(&pred, &label).unwrap();
    assert_eq!(
        out.unregistered(Registry::builtin()),
        vec!["bucc2018".to_string(), "my_task".to_string()]
    );
}

#[test]
fn test_missing_root_is_discovery_error() {
    let root = make_temp_dir();
    let err = run_stage1(&root.join("absent"), &root).unwrap_err();
    assert!(matches!(err, EvalError::Discovery { .. }));
    assert!(err.to_string().contains("absent"));
}
