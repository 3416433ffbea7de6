//! Example project definitions
//!
//! Example projects are pre-defined task trees that demonstrate the
//! configured workspace structure. They are seeded only after the target
//! space's required statuses have been verified to exist remotely.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A pre-defined task tree targeting one folder of one space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleProject {
    pub name: String,

    /// Category key of the target space
    pub space: String,

    /// Name of the target folder within that space
    pub folder: String,

    #[serde(default = "enabled_default")]
    pub enabled: bool,

    /// Task groups, one per target list
    #[serde(default)]
    pub tasks: Vec<TaskGroup>,
}

impl ExampleProject {
    /// Total number of tasks in the tree, subtasks included
    pub fn task_count(&self) -> usize {
        self.tasks
            .iter()
            .flat_map(|group| group.tasks.iter())
            .map(TaskSpec::count)
            .sum()
    }
}

/// Tasks destined for one list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskGroup {
    /// Name of the target list within the example's folder
    pub list: String,

    pub tasks: Vec<TaskSpec>,
}

/// One task in an example tree
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Status name; must exist remotely before seeding runs
    pub status: String,

    /// Remote priority scale: 1 = urgent .. 4 = low
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// Due date as a day offset from the time of seeding
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_in_days: Option<i64>,

    /// Custom field values by field name, passed through to the remote
    /// service without transformation
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<TaskSpec>,
}

impl TaskSpec {
    fn count(&self) -> usize {
        1 + self.subtasks.iter().map(TaskSpec::count).sum::<usize>()
    }
}

fn enabled_default() -> bool {
    true
}
