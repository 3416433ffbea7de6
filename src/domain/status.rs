//! Status definitions and verification results
//!
//! Statuses are space-scoped in the remote service and can only be created
//! through its UI, never through the API. The engine compares configured
//! names against the remote set and reports the difference; it does not
//! attempt creation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Normalizes a status name for comparison: trimmed and lowercased.
///
/// This is the documented comparison rule for every status-name match in
/// the engine; no further Unicode folding is applied.
pub fn normalized(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Lifecycle class of a status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusKind {
    Open,
    #[default]
    Custom,
    Closed,
}

/// A declarative status definition
///
/// Purely informational to the engine: it names what must exist remotely
/// and how to create it by hand, but is never sent to the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDef {
    pub name: String,

    /// Display color, shown in the manual setup guide
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(rename = "type", default)]
    pub kind: StatusKind,
}

/// Returns the configured status names absent from the remote set.
///
/// Comparison uses [`normalized`] names; the returned entries keep the
/// configured spelling (trimmed) for display.
pub fn missing_statuses(required: &[StatusDef], actual: &[String]) -> Vec<String> {
    let have: HashSet<String> = actual.iter().map(|name| normalized(name)).collect();

    required
        .iter()
        .filter(|def| !have.contains(&normalized(&def.name)))
        .map(|def| def.name.trim().to_string())
        .collect()
}

/// Why a space passed or failed status verification
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationOutcome {
    /// Every required status exists remotely
    Satisfied,

    /// Some required statuses are absent and must be created by hand
    MissingStatuses { missing: Vec<String> },

    /// The space has no list to read statuses from, typically after a
    /// partial provisioning failure
    NoListAvailable,

    /// The status read itself failed
    CheckFailed { error: String },
}

/// Per-space verification result, the gate for example seeding
#[derive(Debug, Clone, Serialize)]
pub struct VerificationResult {
    /// Category key of the verified space
    pub space: String,

    pub outcome: VerificationOutcome,
}

impl VerificationResult {
    pub fn satisfied(&self) -> bool {
        matches!(self.outcome, VerificationOutcome::Satisfied)
    }

    /// Missing status names, empty unless the outcome is `MissingStatuses`
    pub fn missing(&self) -> &[String] {
        match &self.outcome {
            VerificationOutcome::MissingStatuses { missing } => missing,
            _ => &[],
        }
    }
}
