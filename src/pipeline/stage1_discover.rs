use std::collections::BTreeSet;
use std::path::Path;

use crate::pipeline::EvalError;
use crate::registry::Registry;

#[derive(Debug, Clone, Default)]
pub struct Stage1Output {
    pub prediction_tasks: BTreeSet<String>,
    pub label_tasks: BTreeSet<String>,
}

impl Stage1Output {
    pub fn is_eligible(&self, task_id: &str) -> bool {
        self.prediction_tasks.contains(task_id) && self.label_tasks.contains(task_id)
    }

    pub fn unregistered(&self, registry: &Registry) -> Vec<String> {
        self.prediction_tasks
            .union(&self.label_tasks)
            .filter(|name| registry.task(name).is_err())
            .cloned()
            .collect()
    }
}

pub fn run_stage1(prediction_root: &Path, label_root: &Path) -> Result<Stage1Output, EvalError> {
    Ok(Stage1Output {
        prediction_tasks: list_task_dirs(prediction_root)?,
        label_tasks: list_task_dirs(label_root)?,
    })
}

/// Names of the first-level subfolders of `root`.
pub fn list_task_dirs(root: &Path) -> Result<BTreeSet<String>, EvalError> {
    let discovery_err = |source| EvalError::Discovery {
        path: root.to_path_buf(),
        source,
    };

    let mut names = BTreeSet::new();
    for entry in std::fs::read_dir(root).map_err(discovery_err)? {
        let entry = entry.map_err(discovery_err)?;
        if !entry.path().is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                names.insert(name);
            }
            Err(raw) => {
                tracing::warn!(folder = ?raw, "skipping non UTF-8 folder name");
            }
        }
    }
    Ok(names)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_discover.rs"]
mod tests;
