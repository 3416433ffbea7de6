//! Configuration handling for Scaffold CLI
//!
//! The workspace document is YAML (`scaffold.yaml` by default) and is
//! parsed into [`WorkspaceConfig`], then validated once. Validation
//! failures abort the run before any remote call is made. An optional
//! user-level `config.toml` supplies client defaults (API root, pacing);
//! command-line flags and environment variables take precedence.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{
    normalized, AutomationDef, ExampleProject, FieldDef, FieldKind, SpaceDef, StatusDef, ViewDef,
};
use crate::remote::DEFAULT_BASE_URL;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration defines no spaces")]
    NoSpaces,

    #[error("{kind} has an empty name")]
    EmptyName { kind: &'static str },

    #[error("duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("{section} references unknown space category: {category}")]
    UnknownCategory {
        section: &'static str,
        category: String,
    },

    #[error("example '{example}' references unknown {kind}: {name}")]
    UnknownTarget {
        example: String,
        kind: &'static str,
        name: String,
    },

    #[error("dropdown field '{field}' has no options")]
    EmptyDropdown { field: String },
}

/// The declarative workspace document
///
/// Built once at start-up and read-only thereafter. Definition sections are
/// keyed by space category; every key must correspond to a configured space.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub spaces: Vec<SpaceDef>,
    pub custom_fields: BTreeMap<String, Vec<FieldDef>>,
    pub statuses: BTreeMap<String, Vec<StatusDef>>,
    pub views: BTreeMap<String, Vec<ViewDef>>,
    pub automations: BTreeMap<String, Vec<AutomationDef>>,
    pub examples: Vec<ExampleProject>,
}

impl WorkspaceConfig {
    /// Loads and validates a workspace document
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Required statuses for a space category, empty when none configured
    pub fn required_statuses(&self, category: &str) -> &[StatusDef] {
        self.statuses
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Checks structural consistency of the document
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.spaces.is_empty() {
            return Err(ConfigError::NoSpaces);
        }

        let mut space_names = HashSet::new();
        let mut categories = HashSet::new();

        for space in &self.spaces {
            if space.name.trim().is_empty() {
                return Err(ConfigError::EmptyName { kind: "space" });
            }
            if !space_names.insert(normalized(&space.name)) {
                return Err(ConfigError::DuplicateName {
                    kind: "space",
                    name: space.name.clone(),
                });
            }
            if !categories.insert(space.category()) {
                return Err(ConfigError::DuplicateName {
                    kind: "space category",
                    name: space.category(),
                });
            }

            let mut folder_names = HashSet::new();
            for folder in &space.folders {
                if folder.name.trim().is_empty() {
                    return Err(ConfigError::EmptyName { kind: "folder" });
                }
                if !folder_names.insert(normalized(&folder.name)) {
                    return Err(ConfigError::DuplicateName {
                        kind: "folder",
                        name: folder.name.clone(),
                    });
                }

                let mut list_names = HashSet::new();
                for list in &folder.lists {
                    if list.trim().is_empty() {
                        return Err(ConfigError::EmptyName { kind: "list" });
                    }
                    if !list_names.insert(normalized(list)) {
                        return Err(ConfigError::DuplicateName {
                            kind: "list",
                            name: list.clone(),
                        });
                    }
                }
            }
        }

        self.validate_sections(&categories)?;
        self.validate_fields()?;
        self.validate_examples()?;

        Ok(())
    }

    fn validate_sections(&self, categories: &HashSet<String>) -> Result<(), ConfigError> {
        let sections: [(&'static str, Vec<&String>); 4] = [
            ("custom_fields", self.custom_fields.keys().collect()),
            ("statuses", self.statuses.keys().collect()),
            ("views", self.views.keys().collect()),
            ("automations", self.automations.keys().collect()),
        ];

        for (section, keys) in sections {
            for key in keys {
                if !categories.contains(key) {
                    return Err(ConfigError::UnknownCategory {
                        section,
                        category: key.clone(),
                    });
                }
            }
        }

        Ok(())
    }

    fn validate_fields(&self) -> Result<(), ConfigError> {
        for fields in self.custom_fields.values() {
            let mut names = HashSet::new();
            for field in fields {
                if field.name.trim().is_empty() {
                    return Err(ConfigError::EmptyName { kind: "field" });
                }
                if !names.insert(normalized(&field.name)) {
                    return Err(ConfigError::DuplicateName {
                        kind: "field",
                        name: field.name.clone(),
                    });
                }
                if let FieldKind::DropDown { options } = &field.kind {
                    if options.is_empty() {
                        return Err(ConfigError::EmptyDropdown {
                            field: field.name.clone(),
                        });
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_examples(&self) -> Result<(), ConfigError> {
        for example in &self.examples {
            let space = self
                .spaces
                .iter()
                .find(|space| space.category() == example.space)
                .ok_or_else(|| ConfigError::UnknownCategory {
                    section: "examples",
                    category: example.space.clone(),
                })?;

            let folder = space
                .folders
                .iter()
                .find(|folder| normalized(&folder.name) == normalized(&example.folder))
                .ok_or_else(|| ConfigError::UnknownTarget {
                    example: example.name.clone(),
                    kind: "folder",
                    name: example.folder.clone(),
                })?;

            for group in &example.tasks {
                let known = folder
                    .lists
                    .iter()
                    .any(|list| normalized(list) == normalized(&group.list));
                if !known {
                    return Err(ConfigError::UnknownTarget {
                        example: example.name.clone(),
                        kind: "list",
                        name: group.list.clone(),
                    });
                }

                for task in &group.tasks {
                    if task.name.trim().is_empty() {
                        return Err(ConfigError::EmptyName { kind: "task" });
                    }
                }
            }
        }

        Ok(())
    }
}

/// User-level client settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// API root used when `--base-url` is not given
    pub base_url: String,

    /// Minimum milliseconds between outbound calls
    pub pace_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pace_ms: 500,
        }
    }
}

impl Settings {
    /// Loads settings from the user config directory, falling back to
    /// defaults when no file exists
    pub fn load() -> Result<Self> {
        let config_dir = match Self::config_dir() {
            Some(dir) => dir,
            None => return Ok(Self::default()),
        };

        let path = config_dir.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings: {}", path.display()))
    }

    /// Returns the user config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "scaffold", "scaffold-cli")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }
}
