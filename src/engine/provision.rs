//! Ordered, idempotent application of the configured tree
//!
//! Each node is looked up in its parent scope before anything is created;
//! creation happens only when the lookup finds nothing, so re-runs are
//! safe without any local cache. A node failure is recorded and its
//! descendants are left untouched, while siblings continue. A child is
//! never created before its parent has a known remote identifier, and
//! fields are attached only after all of a space's lists exist.

use crate::config::WorkspaceConfig;
use crate::domain::{normalized, FolderNode, ListNode, ProvisionedWorkspace, SpaceNode};
use crate::remote::{FieldPayload, Remote, RemoteError, RemoteObject};

use super::report::{NodeAction, NodeRecord, ResourceKind};

/// Result of the provisioning phase
pub struct ProvisionOutcome {
    pub workspace: ProvisionedWorkspace,
    pub records: Vec<NodeRecord>,
}

/// Walks the configured tree top-down, creating whatever is absent
pub fn apply(config: &WorkspaceConfig, remote: &dyn Remote) -> ProvisionOutcome {
    let mut records = Vec::new();
    let mut workspace = ProvisionedWorkspace::default();

    for space_def in &config.spaces {
        let space_id = ensure(
            &mut records,
            ResourceKind::Space,
            "workspace",
            &space_def.name,
            || remote.spaces(),
            || remote.create_space(&space_def.name),
        );
        let space_id = match space_id {
            Some(id) => id,
            None => continue,
        };

        let mut space_node = SpaceNode {
            key: space_def.category(),
            name: space_def.name.clone(),
            id: space_id.clone(),
            folders: Vec::new(),
        };

        for folder_def in &space_def.folders {
            let folder_id = ensure(
                &mut records,
                ResourceKind::Folder,
                &space_def.name,
                &folder_def.name,
                || remote.folders(&space_id),
                || remote.create_folder(&space_id, &folder_def.name),
            );
            let folder_id = match folder_id {
                Some(id) => id,
                None => continue,
            };

            let mut folder_node = FolderNode {
                name: folder_def.name.clone(),
                id: folder_id.clone(),
                lists: Vec::new(),
            };

            let scope = format!("{} / {}", space_def.name, folder_def.name);
            for list_name in &folder_def.lists {
                let list_id = ensure(
                    &mut records,
                    ResourceKind::List,
                    &scope,
                    list_name,
                    || remote.lists(&folder_id),
                    || remote.create_list(&folder_id, list_name),
                );
                if let Some(id) = list_id {
                    folder_node.lists.push(ListNode::new(list_name.clone(), id));
                }
            }

            space_node.folders.push(folder_node);
        }

        attach_fields(&mut records, remote, config, &mut space_node);
        workspace.spaces.push(space_node);
    }

    ProvisionOutcome { workspace, records }
}

/// Builds the graph from whatever already exists, creating nothing.
///
/// Nodes absent remotely are simply left out of the graph; read failures
/// surface because a read-only pass has nothing useful to record per node.
pub fn discover(
    config: &WorkspaceConfig,
    remote: &dyn Remote,
) -> Result<ProvisionedWorkspace, RemoteError> {
    let mut workspace = ProvisionedWorkspace::default();
    let spaces = remote.spaces()?;

    for space_def in &config.spaces {
        let space = match find_by_name(&spaces, &space_def.name) {
            Some(space) => space,
            None => continue,
        };

        let mut space_node = SpaceNode {
            key: space_def.category(),
            name: space_def.name.clone(),
            id: space.id.clone(),
            folders: Vec::new(),
        };

        let folders = remote.folders(&space.id)?;
        for folder_def in &space_def.folders {
            let folder = match find_by_name(&folders, &folder_def.name) {
                Some(folder) => folder,
                None => continue,
            };

            let mut folder_node = FolderNode {
                name: folder_def.name.clone(),
                id: folder.id.clone(),
                lists: Vec::new(),
            };

            let lists = remote.lists(&folder.id)?;
            for list_name in &folder_def.lists {
                let list = match find_by_name(&lists, list_name) {
                    Some(list) => list,
                    None => continue,
                };

                let mut list_node = ListNode::new(list_name.clone(), list.id.clone());
                for field in remote.fields(&list.id)? {
                    list_node.add_field(&field.name, field.id);
                }
                folder_node.lists.push(list_node);
            }

            space_node.folders.push(folder_node);
        }

        workspace.spaces.push(space_node);
    }

    Ok(workspace)
}

/// Create-if-absent for one node; returns the remote identifier when the
/// node ended up usable
fn ensure(
    records: &mut Vec<NodeRecord>,
    kind: ResourceKind,
    scope: &str,
    name: &str,
    find: impl Fn() -> Result<Vec<RemoteObject>, RemoteError>,
    create: impl Fn() -> Result<String, RemoteError>,
) -> Option<String> {
    let action = resolve(name, &find, &create);
    let id = action.id().map(str::to_string);
    records.push(NodeRecord {
        kind,
        scope: scope.to_string(),
        name: name.to_string(),
        action,
    });
    id
}

fn resolve(
    name: &str,
    find: &impl Fn() -> Result<Vec<RemoteObject>, RemoteError>,
    create: &impl Fn() -> Result<String, RemoteError>,
) -> NodeAction {
    let existing = match find() {
        Ok(existing) => existing,
        Err(err) => return NodeAction::Failed(format!("lookup failed: {}", err)),
    };
    if let Some(found) = find_by_name(&existing, name) {
        return NodeAction::Reused(found.id);
    }

    match create() {
        Ok(id) => NodeAction::Created(id),
        // The service knows the name even though the lookup missed it;
        // resolve to the existing resource instead of failing.
        Err(RemoteError::Conflict(_)) => match find() {
            Ok(existing) => match find_by_name(&existing, name) {
                Some(found) => NodeAction::Reused(found.id),
                None => {
                    NodeAction::Failed("reported as existing but absent from parent scope".to_string())
                }
            },
            Err(err) => NodeAction::Failed(format!("lookup failed: {}", err)),
        },
        Err(err) => NodeAction::Failed(err.to_string()),
    }
}

/// Name match within a parent scope, trimmed and case-insensitive
pub(crate) fn find_by_name(objects: &[RemoteObject], name: &str) -> Option<RemoteObject> {
    let want = normalized(name);
    objects
        .iter()
        .find(|object| normalized(&object.name) == want)
        .cloned()
}

/// Attaches the space category's custom fields to every list of the space
fn attach_fields(
    records: &mut Vec<NodeRecord>,
    remote: &dyn Remote,
    config: &WorkspaceConfig,
    space_node: &mut SpaceNode,
) {
    let defs = match config.custom_fields.get(&space_node.key) {
        Some(defs) if !defs.is_empty() => defs,
        _ => return,
    };

    let space_name = space_node.name.clone();
    for folder in &mut space_node.folders {
        for list in &mut folder.lists {
            let scope = format!("{} / {}", space_name, list.name);
            for def in defs {
                let payload = FieldPayload::from_def(def);
                let field_id = ensure(
                    records,
                    ResourceKind::Field,
                    &scope,
                    &def.name,
                    || remote.fields(&list.id),
                    || remote.create_field(&list.id, &payload),
                );
                if let Some(id) = field_id {
                    list.add_field(&def.name, id);
                }
            }
        }
    }
}
