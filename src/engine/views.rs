//! Best-effort view provisioning
//!
//! The remote API supports view creation only partially. Outcomes are a
//! capability result per view, never an abort: an API refusal means the
//! view must be created by hand and the run moves on.

use crate::domain::{SpaceNode, ViewDef, ViewOutcome};
use crate::remote::{Remote, RemoteError, ViewPayload};

use super::provision::find_by_name;
use super::report::ViewRecord;

/// Attempts every configured view for one space
pub fn provision_views(
    remote: &dyn Remote,
    space: &SpaceNode,
    views: &[ViewDef],
) -> Vec<ViewRecord> {
    let existing = remote.space_views(&space.id).unwrap_or_default();

    views
        .iter()
        .map(|def| {
            let outcome = if let Some(found) = find_by_name(&existing, &def.name) {
                ViewOutcome::Supported { id: found.id }
            } else {
                match remote.create_view(&space.id, &ViewPayload::from_def(def)) {
                    Ok(id) => ViewOutcome::Supported { id },
                    Err(RemoteError::Validation(_)) => ViewOutcome::Unsupported,
                    Err(err) => ViewOutcome::Error {
                        reason: err.to_string(),
                    },
                }
            };

            ViewRecord {
                space: space.name.clone(),
                name: def.name.clone(),
                outcome,
            }
        })
        .collect()
}
