use std::collections::BTreeSet;

pub mod defs;

pub use defs::{GroupDef, GroupKind, TaskDef};

use defs::{builtin_groups, builtin_tasks};

/// Overall-score key for the mean over every registered task.
pub const ALL_TASKS_SCOPE: &str = "all_task";

static BUILTIN: Registry = Registry::new(builtin_tasks(), builtin_groups());

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown task: {0}")]
    UnknownTask(String),
    #[error("group {group} lists unregistered task {task}")]
    UnknownGroupMember { group: String, task: String },
    #[error("id {0} is registered more than once")]
    DuplicateId(String),
    #[error("id {0} is reserved for the overall score")]
    ReservedId(String),
    #[error("task {task} declares language {language} more than once")]
    DuplicateLanguage { task: String, language: String },
}

/// Immutable task and group tables.
#[derive(Debug, Clone, Copy)]
pub struct Registry {
    tasks: &'static [TaskDef],
    groups: &'static [GroupDef],
}

impl Registry {
    pub const fn new(tasks: &'static [TaskDef], groups: &'static [GroupDef]) -> Self {
        Self { tasks, groups }
    }

    pub fn builtin() -> &'static Registry {
        &BUILTIN
    }

    pub fn tasks(&self) -> &'static [TaskDef] {
        self.tasks
    }

    pub fn groups(&self) -> &'static [GroupDef] {
        self.groups
    }

    pub fn task(&self, id: &str) -> Result<&'static TaskDef, ConfigError> {
        self.tasks
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ConfigError::UnknownTask(id.to_string()))
    }

    pub fn group(&self, id: &str) -> Option<&'static GroupDef> {
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn groups_of<'a>(&self, task_id: &'a str) -> impl Iterator<Item = &'static GroupDef> + 'a {
        let groups = self.groups;
        groups
            .iter()
            .filter(move |g| g.tasks.iter().any(|&t| t == task_id))
    }

    /// Membership in any span-extraction group switches the task to JSON
    /// files and disables the example-count check.
    pub fn is_span_extraction(&self, task_id: &str) -> bool {
        self.groups_of(task_id)
            .any(|g| g.kind == GroupKind::SpanExtraction)
    }

    pub fn suffix(&self, task_id: &str) -> &'static str {
        if self.is_span_extraction(task_id) {
            "json"
        } else {
            "tsv"
        }
    }

    /// Resolves a user task list. A group id stands for all of its tasks.
    /// The result follows registry order.
    pub fn select(&self, names: &[String]) -> Result<Vec<&'static TaskDef>, ConfigError> {
        let mut wanted: BTreeSet<&str> = BTreeSet::new();
        for name in names {
            match self.group(name) {
                Some(group) => wanted.extend(group.tasks.iter().copied()),
                None => {
                    wanted.insert(self.task(name)?.id);
                }
            }
        }
        Ok(self
            .tasks
            .iter()
            .filter(|t| wanted.contains(t.id))
            .collect())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut ids = BTreeSet::new();
        for id in self
            .tasks
            .iter()
            .map(|t| t.id)
            .chain(self.groups.iter().map(|g| g.id))
        {
            if id == ALL_TASKS_SCOPE {
                return Err(ConfigError::ReservedId(id.to_string()));
            }
            if !ids.insert(id) {
                return Err(ConfigError::DuplicateId(id.to_string()));
            }
        }

        for task in self.tasks {
            let mut seen = BTreeSet::new();
            for &language in task.languages {
                if !seen.insert(language) {
                    return Err(ConfigError::DuplicateLanguage {
                        task: task.id.to_string(),
                        language: language.to_string(),
                    });
                }
            }
        }

        for group in self.groups {
            for &member in group.tasks {
                if self.task(member).is_err() {
                    return Err(ConfigError::UnknownGroupMember {
                        group: group.id.to_string(),
                        task: member.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/registry/tests.rs"]
mod tests;
