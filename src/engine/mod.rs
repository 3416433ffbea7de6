//! Provisioning engine
//!
//! Sequential phases over a single remote client: provision the tree,
//! verify each space's statuses, attempt views, emit automation setup
//! instructions, seed example projects, and aggregate everything into one
//! run report. A failure inside one phase never prevents later phases;
//! only a configuration-load failure aborts before remote calls begin.

mod provision;
mod report;
mod seed;
mod verify;
mod views;

pub use provision::{apply as provision, discover, ProvisionOutcome};
pub use report::{Counts, NodeAction, NodeRecord, ResourceKind, RunReport, ViewRecord};
pub use seed::{seed, SeedFailure, SeedOutcome, SeedReport, SkipReason};
pub use verify::{verify_all, verify_space};
pub use views::provision_views;

use crate::config::WorkspaceConfig;
use crate::remote::Remote;

/// Phase toggles for an apply run
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyOptions {
    pub skip_views: bool,
    pub skip_examples: bool,
}

/// Runs the full pipeline against one remote client
pub fn run(config: &WorkspaceConfig, remote: &dyn Remote, options: &ApplyOptions) -> RunReport {
    let ProvisionOutcome { workspace, records } = provision::apply(config, remote);

    let mut report = RunReport {
        nodes: records,
        ..Default::default()
    };

    report.verifications = verify::verify_all(config, remote, &workspace);

    if !options.skip_views {
        for space_def in &config.spaces {
            let key = space_def.category();
            if let (Some(space), Some(views)) = (workspace.space(&key), config.views.get(&key)) {
                report
                    .views
                    .extend(views::provision_views(remote, space, views));
            }
        }
    }

    for space_def in &config.spaces {
        if let Some(automations) = config.automations.get(&space_def.category()) {
            report.instructions.extend(
                automations
                    .iter()
                    .map(|automation| automation.instruction(&space_def.name)),
            );
        }
    }

    if !options.skip_examples {
        for project in &config.examples {
            let verification = report
                .verifications
                .iter()
                .find(|result| result.space == project.space)
                .cloned()
                .unwrap_or_else(|| crate::domain::VerificationResult {
                    space: project.space.clone(),
                    outcome: crate::domain::VerificationOutcome::NoListAvailable,
                });
            report
                .seeds
                .push(seed::seed(remote, project, &workspace, &verification));
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::fake::FakeRemote;
    use crate::remote::RemoteError;

    const CONFIG: &str = r#"
spaces:
  - name: Development
    key: development
    folders:
      - name: Datacenters Development
        lists: [Prefeasibility]
statuses:
  development:
    - name: In Planning
    - name: Completed
views:
  development:
    - name: Director Dashboard
      type: board
automations:
  development:
    - name: Escalation alert
      trigger:
        event: status_change
        status: Escalated
      action:
        type: add_comment
        comment: Escalated to director
examples:
  - name: Demo Project
    space: development
    folder: Datacenters Development
    tasks:
      - list: Prefeasibility
        tasks:
          - name: Study
            status: In Planning
"#;

    fn config() -> WorkspaceConfig {
        let config: WorkspaceConfig = serde_yaml::from_str(CONFIG).unwrap();
        config.validate().unwrap();
        config
    }

    #[test]
    fn full_pipeline_with_verified_statuses() {
        let remote = FakeRemote::new();
        let config = config();

        // First run provisions structure; statuses are then created by
        // hand and a re-run seeds the examples.
        let first = run(&config, &remote, &ApplyOptions::default());
        assert!(!first.all_statuses_satisfied());
        assert!(matches!(
            first.seeds[0].outcome,
            SeedOutcome::Skipped(SkipReason::PrerequisitesMissing { .. })
        ));

        remote.set_space_statuses("Development", &["In Planning", "Completed"]);

        let second = run(&config, &remote, &ApplyOptions::default());
        assert!(second.all_statuses_satisfied());
        assert!(!second.has_failures());
        match &second.seeds[0].outcome {
            SeedOutcome::Completed { created, failures } => {
                assert_eq!(*created, 1);
                assert!(failures.is_empty());
            }
            other => panic!("expected completion, got {:?}", other),
        }
        assert_eq!(second.instructions.len(), 1);
        assert_eq!(remote.tasks().len(), 1);
    }

    #[test]
    fn view_failure_does_not_stop_reporter_or_seeder() {
        let remote = FakeRemote::new();
        let config = config();
        remote.fail_next(
            "Director Dashboard",
            RemoteError::Transient("flaky".to_string()),
        );

        let report = run(&config, &remote, &ApplyOptions::default());

        // The view failure is recorded per-view, not escalated
        assert_eq!(report.views.len(), 1);
        assert!(!report.views[0].outcome.is_supported());
        assert!(!report.has_failures());

        // Later phases still ran
        assert_eq!(report.instructions.len(), 1);
        assert_eq!(report.seeds.len(), 1);
    }

    #[test]
    fn skip_flags_suppress_phases() {
        let remote = FakeRemote::new();
        let config = config();
        remote.set_space_statuses("Development", &["In Planning", "Completed"]);

        let report = run(
            &config,
            &remote,
            &ApplyOptions {
                skip_views: true,
                skip_examples: true,
            },
        );

        assert!(report.views.is_empty());
        assert!(report.seeds.is_empty());
        // Automation instructions are inert and always emitted
        assert_eq!(report.instructions.len(), 1);
        assert!(remote.tasks().is_empty());
    }

    #[test]
    fn node_failures_mark_the_run_failed() {
        let remote = FakeRemote::new();
        let config = config();
        remote.fail_next(
            "Datacenters Development",
            RemoteError::Transient("boom".to_string()),
        );

        let report = run(&config, &remote, &ApplyOptions::default());

        assert!(report.has_failures());
        assert_eq!(report.counts(ResourceKind::Folder).failed, 1);
        // With no list available, verification reports the distinguished
        // reason and seeding skips
        assert!(!report.all_statuses_satisfied());
        assert!(matches!(
            report.seeds[0].outcome,
            SeedOutcome::Skipped(SkipReason::PrerequisitesMissing { .. })
        ));
    }
}
