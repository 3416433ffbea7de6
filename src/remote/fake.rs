//! In-memory fake of the remote service
//!
//! Backs the engine tests: records every creation, serves lookups from its
//! own state, and returns scripted failures on demand. No network access.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use super::api::{FieldPayload, Remote, RemoteError, RemoteObject, TaskPayload, ViewPayload};

/// A task recorded by the fake
#[derive(Debug, Clone)]
pub struct CreatedTask {
    pub id: String,
    pub name: String,
    pub list_id: Option<String>,
    pub parent: Option<String>,
    pub status: String,
    pub field_values: usize,
}

#[derive(Default)]
struct FakeList {
    id: String,
    name: String,
    fields: Vec<RemoteObject>,
}

#[derive(Default)]
struct FakeFolder {
    id: String,
    name: String,
    lists: Vec<FakeList>,
}

#[derive(Default)]
struct FakeSpace {
    id: String,
    name: String,
    statuses: Vec<String>,
    folders: Vec<FakeFolder>,
    views: Vec<RemoteObject>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    spaces: Vec<FakeSpace>,
    tasks: Vec<CreatedTask>,
    fail_create: HashMap<String, Vec<RemoteError>>,
    conflict_create: HashSet<String>,
    create_log: Vec<String>,
}

impl State {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    fn take_failure(&mut self, name: &str) -> Option<RemoteError> {
        let queue = self.fail_create.get_mut(name)?;
        let error = if queue.is_empty() {
            None
        } else {
            Some(queue.remove(0))
        };
        if queue.is_empty() {
            self.fail_create.remove(name);
        }
        error
    }

    fn list_mut(&mut self, list_id: &str) -> Option<&mut FakeList> {
        self.spaces
            .iter_mut()
            .flat_map(|space| space.folders.iter_mut())
            .flat_map(|folder| folder.lists.iter_mut())
            .find(|list| list.id == list_id)
    }

    fn space_of_list(&self, list_id: &str) -> Option<&FakeSpace> {
        self.spaces.iter().find(|space| {
            space
                .folders
                .iter()
                .flat_map(|folder| folder.lists.iter())
                .any(|list| list.id == list_id)
        })
    }
}

/// Scriptable in-memory remote
#[derive(Default)]
pub struct FakeRemote {
    state: RefCell<State>,
}

impl FakeRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an error for the next creation of the named resource
    pub fn fail_next(&self, name: &str, error: RemoteError) {
        self.state
            .borrow_mut()
            .fail_create
            .entry(name.to_string())
            .or_default()
            .push(error);
    }

    /// Makes creation of the named resource report a duplicate-name
    /// conflict while still materializing the resource, as if it had
    /// existed all along
    pub fn conflict_on_create(&self, name: &str) {
        self.state
            .borrow_mut()
            .conflict_create
            .insert(name.to_string());
    }

    /// Sets the space-scoped status names served for every list of the
    /// named space
    pub fn set_space_statuses(&self, space_name: &str, statuses: &[&str]) {
        let mut state = self.state.borrow_mut();
        if let Some(space) = state.spaces.iter_mut().find(|s| s.name == space_name) {
            space.statuses = statuses.iter().map(|s| s.to_string()).collect();
        }
    }

    /// Number of successful creation calls so far
    pub fn create_count(&self) -> usize {
        self.state.borrow().create_log.len()
    }

    /// Log of successful creation calls, in order
    pub fn create_log(&self) -> Vec<String> {
        self.state.borrow().create_log.clone()
    }

    /// All tasks created so far
    pub fn tasks(&self) -> Vec<CreatedTask> {
        self.state.borrow().tasks.clone()
    }

    /// Ids of every resource currently known to the fake
    pub fn all_ids(&self) -> Vec<String> {
        let state = self.state.borrow();
        let mut ids = Vec::new();
        for space in &state.spaces {
            ids.push(space.id.clone());
            for folder in &space.folders {
                ids.push(folder.id.clone());
                for list in &folder.lists {
                    ids.push(list.id.clone());
                    ids.extend(list.fields.iter().map(|f| f.id.clone()));
                }
            }
        }
        ids.sort();
        ids
    }
}

impl Remote for FakeRemote {
    fn spaces(&self) -> Result<Vec<RemoteObject>, RemoteError> {
        let state = self.state.borrow();
        Ok(state
            .spaces
            .iter()
            .map(|space| RemoteObject {
                id: space.id.clone(),
                name: space.name.clone(),
            })
            .collect())
    }

    fn create_space(&self, name: &str) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(name) {
            return Err(error);
        }

        let id = state.next_id("space");
        state.spaces.push(FakeSpace {
            id: id.clone(),
            name: name.to_string(),
            ..Default::default()
        });

        if state.conflict_create.contains(name) {
            return Err(RemoteError::Conflict(format!("{} name taken", name)));
        }

        state.create_log.push(format!("space:{}", name));
        Ok(id)
    }

    fn folders(&self, space_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let state = self.state.borrow();
        let space = state
            .spaces
            .iter()
            .find(|space| space.id == space_id)
            .ok_or_else(|| RemoteError::Validation("space not found".to_string()))?;
        Ok(space
            .folders
            .iter()
            .map(|folder| RemoteObject {
                id: folder.id.clone(),
                name: folder.name.clone(),
            })
            .collect())
    }

    fn create_folder(&self, space_id: &str, name: &str) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(name) {
            return Err(error);
        }

        let id = state.next_id("folder");
        let conflict = state.conflict_create.contains(name);
        let space = state
            .spaces
            .iter_mut()
            .find(|space| space.id == space_id)
            .ok_or_else(|| RemoteError::Validation("space not found".to_string()))?;
        space.folders.push(FakeFolder {
            id: id.clone(),
            name: name.to_string(),
            lists: Vec::new(),
        });

        if conflict {
            return Err(RemoteError::Conflict(format!("{} name taken", name)));
        }

        state.create_log.push(format!("folder:{}", name));
        Ok(id)
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let state = self.state.borrow();
        let folder = state
            .spaces
            .iter()
            .flat_map(|space| space.folders.iter())
            .find(|folder| folder.id == folder_id)
            .ok_or_else(|| RemoteError::Validation("folder not found".to_string()))?;
        Ok(folder
            .lists
            .iter()
            .map(|list| RemoteObject {
                id: list.id.clone(),
                name: list.name.clone(),
            })
            .collect())
    }

    fn create_list(&self, folder_id: &str, name: &str) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(name) {
            return Err(error);
        }

        let id = state.next_id("list");
        let folder = state
            .spaces
            .iter_mut()
            .flat_map(|space| space.folders.iter_mut())
            .find(|folder| folder.id == folder_id)
            .ok_or_else(|| RemoteError::Validation("folder not found".to_string()))?;
        folder.lists.push(FakeList {
            id: id.clone(),
            name: name.to_string(),
            fields: Vec::new(),
        });

        state.create_log.push(format!("list:{}", name));
        Ok(id)
    }

    fn fields(&self, list_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let state = self.state.borrow();
        state
            .spaces
            .iter()
            .flat_map(|space| space.folders.iter())
            .flat_map(|folder| folder.lists.iter())
            .find(|list| list.id == list_id)
            .map(|list| list.fields.clone())
            .ok_or_else(|| RemoteError::Validation("list not found".to_string()))
    }

    fn create_field(&self, list_id: &str, field: &FieldPayload) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(&field.name) {
            return Err(error);
        }

        let id = state.next_id("field");
        let log_entry = format!("field:{}:{}", list_id, field.name);
        let list = state
            .list_mut(list_id)
            .ok_or_else(|| RemoteError::Validation("list not found".to_string()))?;
        list.fields.push(RemoteObject {
            id: id.clone(),
            name: field.name.clone(),
        });

        state.create_log.push(log_entry);
        Ok(id)
    }

    fn list_statuses(&self, list_id: &str) -> Result<Vec<String>, RemoteError> {
        let state = self.state.borrow();
        state
            .space_of_list(list_id)
            .map(|space| space.statuses.clone())
            .ok_or_else(|| RemoteError::Validation("list not found".to_string()))
    }

    fn space_views(&self, space_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let state = self.state.borrow();
        let space = state
            .spaces
            .iter()
            .find(|space| space.id == space_id)
            .ok_or_else(|| RemoteError::Validation("space not found".to_string()))?;
        Ok(space.views.clone())
    }

    fn create_view(&self, space_id: &str, view: &ViewPayload) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(&view.name) {
            return Err(error);
        }

        let id = state.next_id("view");
        let name = view.name.clone();
        let space = state
            .spaces
            .iter_mut()
            .find(|space| space.id == space_id)
            .ok_or_else(|| RemoteError::Validation("space not found".to_string()))?;
        space.views.push(RemoteObject {
            id: id.clone(),
            name: name.clone(),
        });

        state.create_log.push(format!("view:{}", name));
        Ok(id)
    }

    fn create_task(&self, list_id: &str, task: &TaskPayload) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(&task.name) {
            return Err(error);
        }
        if state.list_mut(list_id).is_none() {
            return Err(RemoteError::Validation("list not found".to_string()));
        }

        let id = state.next_id("task");
        state.tasks.push(CreatedTask {
            id: id.clone(),
            name: task.name.clone(),
            list_id: Some(list_id.to_string()),
            parent: None,
            status: task.status.clone(),
            field_values: task.custom_fields.len(),
        });
        state.create_log.push(format!("task:{}", task.name));
        Ok(id)
    }

    fn create_subtask(&self, parent_id: &str, task: &TaskPayload) -> Result<String, RemoteError> {
        let mut state = self.state.borrow_mut();
        if let Some(error) = state.take_failure(&task.name) {
            return Err(error);
        }
        if !state.tasks.iter().any(|t| t.id == parent_id) {
            return Err(RemoteError::Validation("parent task not found".to_string()));
        }

        let id = state.next_id("task");
        state.tasks.push(CreatedTask {
            id: id.clone(),
            name: task.name.clone(),
            list_id: None,
            parent: Some(parent_id.to_string()),
            status: task.status.clone(),
            field_values: task.custom_fields.len(),
        });
        state.create_log.push(format!("task:{}", task.name));
        Ok(id)
    }
}
