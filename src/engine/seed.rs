//! Conditional example-project seeding
//!
//! Seeding is gated internally on status verification: a space whose
//! required statuses are missing gets zero task-creation calls, and the
//! skip carries the missing names for display. Once unlocked, the task
//! tree is walked depth-first (task, then its subtasks); one bad task must
//! not abort the rest, so failures are recorded and the walk continues.

use chrono::Utc;
use serde::Serialize;

use crate::domain::{ExampleProject, ListNode, ProvisionedWorkspace, TaskSpec, VerificationResult};
use crate::remote::{FieldValue, Remote, TaskPayload};

/// Why an example project was not seeded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The project is disabled in configuration
    Disabled,

    /// The space's required statuses are not verified
    PrerequisitesMissing { missing: Vec<String> },

    /// The target space or folder is absent from the provisioned graph
    TargetMissing { target: String },
}

/// One task that could not be created
#[derive(Debug, Clone, Serialize)]
pub struct SeedFailure {
    pub task: String,
    pub error: String,
}

/// Outcome of seeding one example project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedOutcome {
    Skipped(SkipReason),
    Completed {
        created: usize,
        failures: Vec<SeedFailure>,
    },
}

/// Per-project seed report
#[derive(Debug, Clone, Serialize)]
pub struct SeedReport {
    pub project: String,
    pub space: String,
    pub outcome: SeedOutcome,
}

/// Seeds one example project, enforcing the verification gate internally
pub fn seed(
    remote: &dyn Remote,
    project: &ExampleProject,
    workspace: &ProvisionedWorkspace,
    verification: &VerificationResult,
) -> SeedReport {
    if !project.enabled {
        return skipped(project, SkipReason::Disabled);
    }
    if !verification.satisfied() {
        return skipped(
            project,
            SkipReason::PrerequisitesMissing {
                missing: verification.missing().to_vec(),
            },
        );
    }

    let space = match workspace.space(&project.space) {
        Some(space) => space,
        None => {
            return skipped(
                project,
                SkipReason::TargetMissing {
                    target: project.space.clone(),
                },
            )
        }
    };
    let folder = match space.folder(&project.folder) {
        Some(folder) => folder,
        None => {
            return skipped(
                project,
                SkipReason::TargetMissing {
                    target: project.folder.clone(),
                },
            )
        }
    };

    let mut created = 0;
    let mut failures = Vec::new();

    for group in &project.tasks {
        let list = match folder.list(&group.list) {
            Some(list) => list,
            None => {
                failures.push(SeedFailure {
                    task: group.list.clone(),
                    error: "list not found in folder".to_string(),
                });
                continue;
            }
        };

        for task in &group.tasks {
            create_tree(remote, list, task, None, &mut created, &mut failures);
        }
    }

    SeedReport {
        project: project.name.clone(),
        space: project.space.clone(),
        outcome: SeedOutcome::Completed { created, failures },
    }
}

fn skipped(project: &ExampleProject, reason: SkipReason) -> SeedReport {
    SeedReport {
        project: project.name.clone(),
        space: project.space.clone(),
        outcome: SeedOutcome::Skipped(reason),
    }
}

/// Creates one task and then its subtasks; siblings continue past failures
fn create_tree(
    remote: &dyn Remote,
    list: &ListNode,
    spec: &TaskSpec,
    parent: Option<&str>,
    created: &mut usize,
    failures: &mut Vec<SeedFailure>,
) {
    let payload = match build_payload(list, spec) {
        Ok(payload) => payload,
        Err(error) => {
            failures.push(SeedFailure {
                task: spec.name.clone(),
                error,
            });
            return;
        }
    };

    let result = match parent {
        Some(parent_id) => remote.create_subtask(parent_id, &payload),
        None => remote.create_task(&list.id, &payload),
    };

    match result {
        Ok(id) => {
            *created += 1;
            for subtask in &spec.subtasks {
                create_tree(remote, list, subtask, Some(&id), created, failures);
            }
        }
        Err(err) => failures.push(SeedFailure {
            task: spec.name.clone(),
            error: err.to_string(),
        }),
    }
}

/// Builds the creation payload, resolving field names to remote ids.
///
/// Field values are passed through untouched; the only check is that the
/// named field exists on the target list.
fn build_payload(list: &ListNode, spec: &TaskSpec) -> Result<TaskPayload, String> {
    let mut custom_fields = Vec::new();
    for (name, value) in &spec.custom_fields {
        match list.field_id(name) {
            Some(id) => custom_fields.push(FieldValue {
                id: id.to_string(),
                value: value.clone(),
            }),
            None => return Err(format!("custom field not present on list: {}", name)),
        }
    }

    Ok(TaskPayload {
        name: spec.name.clone(),
        description: spec.description.clone(),
        status: spec.status.clone(),
        priority: spec.priority,
        due_date: spec.due_in_days.map(due_timestamp),
        custom_fields,
    })
}

/// Epoch milliseconds for a day offset from now
fn due_timestamp(days: i64) -> i64 {
    (Utc::now() + chrono::Duration::days(days)).timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkspaceConfig;
    use crate::domain::VerificationOutcome;
    use crate::engine::{provision, verify};
    use crate::remote::fake::FakeRemote;
    use crate::remote::RemoteError;

    const CONFIG: &str = r#"
spaces:
  - name: Development
    key: development
    folders:
      - name: Datacenters Development
        lists: [Prefeasibility, Land Acquisition]
custom_fields:
  development:
    - name: Budget
      type: currency
statuses:
  development:
    - name: Not Started
    - name: In Planning
    - name: Completed
examples:
  - name: Datacenter Under Development
    space: development
    folder: Datacenters Development
    tasks:
      - list: Prefeasibility
        tasks:
          - name: Prefeasibility Study
            status: In Planning
            priority: 2
            due_in_days: 14
            custom_fields:
              Budget: 15000000
            subtasks:
              - name: Review site assessment
                status: Not Started
              - name: Validate grid capacity
                status: Not Started
      - list: Land Acquisition
        tasks:
          - name: Title verification
            status: Not Started
"#;

    fn setup() -> (FakeRemote, WorkspaceConfig, ProvisionedWorkspace) {
        let config: WorkspaceConfig = serde_yaml::from_str(CONFIG).unwrap();
        config.validate().unwrap();
        let remote = FakeRemote::new();
        let outcome = provision::apply(&config, &remote);
        (remote, config, outcome.workspace)
    }

    fn verified(remote: &FakeRemote, config: &WorkspaceConfig, workspace: &ProvisionedWorkspace) -> VerificationResult {
        verify::verify_all(config, remote, workspace).remove(0)
    }

    #[test]
    fn unsatisfied_gate_creates_nothing() {
        let (remote, config, workspace) = setup();
        remote.set_space_statuses("Development", &["Not Started", "Completed"]);
        let verification = verified(&remote, &config, &workspace);
        assert!(!verification.satisfied());

        let report = seed(&remote, &config.examples[0], &workspace, &verification);

        match &report.outcome {
            SeedOutcome::Skipped(SkipReason::PrerequisitesMissing { missing }) => {
                assert_eq!(missing, &["In Planning"]);
            }
            other => panic!("expected prerequisite skip, got {:?}", other),
        }
        assert!(remote.tasks().is_empty());
        assert!(!remote
            .create_log()
            .iter()
            .any(|entry| entry.starts_with("task:")));
    }

    #[test]
    fn satisfied_gate_creates_every_task_once() {
        let (remote, config, workspace) = setup();
        remote.set_space_statuses(
            "Development",
            &["Not Started", "In Planning", "Completed"],
        );
        let verification = verified(&remote, &config, &workspace);
        assert!(verification.satisfied());

        let report = seed(&remote, &config.examples[0], &workspace, &verification);

        match &report.outcome {
            SeedOutcome::Completed { created, failures } => {
                assert_eq!(*created, 4);
                assert!(failures.is_empty());
            }
            other => panic!("expected completion, got {:?}", other),
        }

        let tasks = remote.tasks();
        assert_eq!(tasks.len(), 4);

        // Subtasks hang off their parent, top-level tasks off their list
        let parent = tasks.iter().find(|t| t.name == "Prefeasibility Study").unwrap();
        let subtask = tasks.iter().find(|t| t.name == "Review site assessment").unwrap();
        assert_eq!(subtask.parent.as_deref(), Some(parent.id.as_str()));
        assert!(parent.list_id.is_some());

        // The custom field value was resolved to a field id
        assert_eq!(parent.field_values, 1);
    }

    #[test]
    fn disabled_project_is_skipped() {
        let (remote, mut config, workspace) = setup();
        remote.set_space_statuses(
            "Development",
            &["Not Started", "In Planning", "Completed"],
        );
        config.examples[0].enabled = false;
        let verification = verified(&remote, &config, &workspace);

        let report = seed(&remote, &config.examples[0], &workspace, &verification);

        assert!(matches!(
            report.outcome,
            SeedOutcome::Skipped(SkipReason::Disabled)
        ));
        assert!(remote.tasks().is_empty());
    }

    #[test]
    fn missing_folder_is_skipped_with_target() {
        let (remote, config, _workspace) = setup();
        remote.set_space_statuses(
            "Development",
            &["Not Started", "In Planning", "Completed"],
        );

        // A graph in which the space exists but the folder was never built
        let workspace = {
            let mut w = ProvisionedWorkspace::default();
            w.spaces.push(crate::domain::SpaceNode {
                key: "development".to_string(),
                name: "Development".to_string(),
                id: "space-1".to_string(),
                folders: vec![],
            });
            w
        };
        let verification = VerificationResult {
            space: "development".to_string(),
            outcome: VerificationOutcome::Satisfied,
        };

        let report = seed(&remote, &config.examples[0], &workspace, &verification);

        match &report.outcome {
            SeedOutcome::Skipped(SkipReason::TargetMissing { target }) => {
                assert_eq!(target, "Datacenters Development");
            }
            other => panic!("expected target skip, got {:?}", other),
        }
    }

    #[test]
    fn task_failure_does_not_abort_remaining_tasks() {
        let (remote, config, workspace) = setup();
        remote.set_space_statuses(
            "Development",
            &["Not Started", "In Planning", "Completed"],
        );
        remote.fail_next(
            "Review site assessment",
            RemoteError::Transient("timeout".to_string()),
        );
        let verification = verified(&remote, &config, &workspace);

        let report = seed(&remote, &config.examples[0], &workspace, &verification);

        match &report.outcome {
            SeedOutcome::Completed { created, failures } => {
                assert_eq!(*created, 3);
                assert_eq!(failures.len(), 1);
                assert_eq!(failures[0].task, "Review site assessment");
            }
            other => panic!("expected completion, got {:?}", other),
        }

        // The failed subtask's sibling was still created
        assert!(remote
            .tasks()
            .iter()
            .any(|t| t.name == "Validate grid capacity"));
    }

    #[test]
    fn unresolved_field_records_failure_and_continues() {
        let (remote, mut config, workspace) = setup();
        remote.set_space_statuses(
            "Development",
            &["Not Started", "In Planning", "Completed"],
        );
        config.examples[0].tasks[0].tasks[0]
            .custom_fields
            .insert("Imaginary Field".to_string(), serde_json::json!(1));
        let verification = verified(&remote, &config, &workspace);

        let report = seed(&remote, &config.examples[0], &workspace, &verification);

        match &report.outcome {
            SeedOutcome::Completed { created, failures } => {
                // Parent failed payload validation, so its subtasks were
                // not attempted; the second group's task still ran
                assert_eq!(*created, 1);
                assert_eq!(failures.len(), 1);
                assert!(failures[0].error.contains("Imaginary Field"));
            }
            other => panic!("expected completion, got {:?}", other),
        }
    }

    #[test]
    fn due_offsets_become_future_timestamps() {
        let now = Utc::now().timestamp_millis();
        let due = due_timestamp(14);
        let fourteen_days = 14 * 24 * 60 * 60 * 1000;
        assert!(due >= now + fourteen_days - 1000);
        assert!(due <= now + fourteen_days + 60_000);
    }
}
