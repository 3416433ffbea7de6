//! Workspace tree definitions and the provisioned graph
//!
//! `SpaceDef` and `FolderDef` describe the declarative containment tree
//! loaded from configuration. `ProvisionedWorkspace` is the in-memory graph
//! of remote identifiers built progressively during a run; identifiers are
//! immutable once assigned and are never persisted across runs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::status::normalized;

/// A space in the declarative configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceDef {
    /// Display name, unique across the workspace
    pub name: String,

    /// Category key used to select custom fields, statuses, views and
    /// automations for this space. Defaults to the lowercased name with
    /// spaces replaced by underscores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Folders contained in the space
    #[serde(default)]
    pub folders: Vec<FolderDef>,
}

impl SpaceDef {
    /// Returns the category key for this space
    pub fn category(&self) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => self.name.trim().to_lowercase().replace(' ', "_"),
        }
    }
}

/// A folder in the declarative configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderDef {
    /// Display name, unique within the parent space
    pub name: String,

    /// Names of the lists contained in the folder
    #[serde(default)]
    pub lists: Vec<String>,
}

/// The graph of remote identifiers resolved during a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProvisionedWorkspace {
    pub spaces: Vec<SpaceNode>,
}

impl ProvisionedWorkspace {
    /// Looks up a space by its category key
    pub fn space(&self, key: &str) -> Option<&SpaceNode> {
        self.spaces.iter().find(|s| s.key == key)
    }
}

/// A space with a known remote identifier
#[derive(Debug, Clone, Serialize)]
pub struct SpaceNode {
    pub key: String,
    pub name: String,
    pub id: String,
    pub folders: Vec<FolderNode>,
}

impl SpaceNode {
    /// Looks up a folder by name (trimmed, case-insensitive)
    pub fn folder(&self, name: &str) -> Option<&FolderNode> {
        let want = normalized(name);
        self.folders.iter().find(|f| normalized(&f.name) == want)
    }

    /// Returns any one list of the space, if one exists.
    ///
    /// Statuses are space-scoped in the remote model, so any list can
    /// answer for the whole space.
    pub fn first_list(&self) -> Option<&ListNode> {
        self.folders.iter().flat_map(|f| f.lists.iter()).next()
    }
}

/// A folder with a known remote identifier
#[derive(Debug, Clone, Serialize)]
pub struct FolderNode {
    pub name: String,
    pub id: String,
    pub lists: Vec<ListNode>,
}

impl FolderNode {
    /// Looks up a list by name (trimmed, case-insensitive)
    pub fn list(&self, name: &str) -> Option<&ListNode> {
        let want = normalized(name);
        self.lists.iter().find(|l| normalized(&l.name) == want)
    }
}

/// A list with a known remote identifier and its attached custom fields
#[derive(Debug, Clone, Serialize)]
pub struct ListNode {
    pub name: String,
    pub id: String,

    /// Normalized field name to remote field identifier
    pub fields: HashMap<String, String>,
}

impl ListNode {
    /// Creates a list node with no fields attached yet
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Records a field's remote identifier
    pub fn add_field(&mut self, name: &str, id: String) {
        self.fields.insert(normalized(name), id);
    }

    /// Resolves a configured field name to its remote identifier
    pub fn field_id(&self, name: &str) -> Option<&str> {
        self.fields.get(&normalized(name)).map(String::as_str)
    }
}
