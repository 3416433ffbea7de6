//! Space status verification
//!
//! Custom statuses cannot be created through the remote API, so this phase
//! only reads: it picks any one list of the space (statuses are
//! space-scoped) and diffs the configured required names against what the
//! service reports. The result gates example seeding.

use crate::config::WorkspaceConfig;
use crate::domain::{
    missing_statuses, ProvisionedWorkspace, SpaceNode, StatusDef, VerificationOutcome,
    VerificationResult,
};
use crate::remote::Remote;

/// Verifies one space's required statuses against remote state
pub fn verify_space(
    remote: &dyn Remote,
    space: Option<&SpaceNode>,
    key: &str,
    required: &[StatusDef],
) -> VerificationResult {
    let outcome = if required.is_empty() {
        VerificationOutcome::Satisfied
    } else {
        match space.and_then(SpaceNode::first_list) {
            None => VerificationOutcome::NoListAvailable,
            Some(list) => match remote.list_statuses(&list.id) {
                Err(err) => VerificationOutcome::CheckFailed {
                    error: err.to_string(),
                },
                Ok(actual) => {
                    let missing = missing_statuses(required, &actual);
                    if missing.is_empty() {
                        VerificationOutcome::Satisfied
                    } else {
                        VerificationOutcome::MissingStatuses { missing }
                    }
                }
            },
        }
    };

    VerificationResult {
        space: key.to_string(),
        outcome,
    }
}

/// Verifies every configured space, in config order
pub fn verify_all(
    config: &WorkspaceConfig,
    remote: &dyn Remote,
    workspace: &ProvisionedWorkspace,
) -> Vec<VerificationResult> {
    config
        .spaces
        .iter()
        .map(|space_def| {
            let key = space_def.category();
            verify_space(
                remote,
                workspace.space(&key),
                &key,
                config.required_statuses(&key),
            )
        })
        .collect()
}
