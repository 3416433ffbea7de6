//! End-of-run aggregation
//!
//! Every phase appends its outcomes here; nothing is thrown to the top
//! level, so a single run reports the complete picture of what succeeded,
//! what failed, and what was skipped and why.

use serde::Serialize;

use crate::domain::{SetupInstruction, VerificationResult, ViewOutcome};

use super::seed::{SeedOutcome, SeedReport};

/// Resource kinds tracked per node during provisioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Space,
    Folder,
    List,
    Field,
}

impl ResourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceKind::Space => "spaces",
            ResourceKind::Folder => "folders",
            ResourceKind::List => "lists",
            ResourceKind::Field => "fields",
        }
    }

    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Space,
        ResourceKind::Folder,
        ResourceKind::List,
        ResourceKind::Field,
    ];
}

/// Outcome of one node's create-if-absent step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAction {
    Created(String),
    Reused(String),
    Failed(String),
}

impl NodeAction {
    /// Remote identifier, absent on failure
    pub fn id(&self) -> Option<&str> {
        match self {
            NodeAction::Created(id) | NodeAction::Reused(id) => Some(id),
            NodeAction::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, NodeAction::Failed(_))
    }

    pub fn label(&self) -> &'static str {
        match self {
            NodeAction::Created(_) => "created",
            NodeAction::Reused(_) => "reused",
            NodeAction::Failed(_) => "failed",
        }
    }
}

/// One provisioned node's record
#[derive(Debug, Clone, Serialize)]
pub struct NodeRecord {
    pub kind: ResourceKind,

    /// Parent scope the node lives in, for display
    pub scope: String,

    pub name: String,
    pub action: NodeAction,
}

/// One view-creation attempt's record
#[derive(Debug, Clone, Serialize)]
pub struct ViewRecord {
    pub space: String,
    pub name: String,
    pub outcome: ViewOutcome,
}

/// Created/reused/failed tally for one resource kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counts {
    pub created: usize,
    pub reused: usize,
    pub failed: usize,
}

/// Aggregated outcome of a full run
#[derive(Debug, Default, Serialize)]
pub struct RunReport {
    pub nodes: Vec<NodeRecord>,
    pub verifications: Vec<VerificationResult>,
    pub views: Vec<ViewRecord>,
    pub instructions: Vec<SetupInstruction>,
    pub seeds: Vec<SeedReport>,
}

impl RunReport {
    /// Tally for one resource kind
    pub fn counts(&self, kind: ResourceKind) -> Counts {
        let mut counts = Counts::default();
        for node in self.nodes.iter().filter(|node| node.kind == kind) {
            match node.action {
                NodeAction::Created(_) => counts.created += 1,
                NodeAction::Reused(_) => counts.reused += 1,
                NodeAction::Failed(_) => counts.failed += 1,
            }
        }
        counts
    }

    pub fn failed_nodes(&self) -> impl Iterator<Item = &NodeRecord> {
        self.nodes.iter().filter(|node| node.action.is_failed())
    }

    /// Number of seed tasks that failed to create (skips do not count)
    pub fn seed_failures(&self) -> usize {
        self.seeds
            .iter()
            .map(|seed| match &seed.outcome {
                SeedOutcome::Completed { failures, .. } => failures.len(),
                SeedOutcome::Skipped(_) => 0,
            })
            .sum()
    }

    /// Total failures that make the run exit non-zero.
    ///
    /// Missing statuses, unsupported views and pending automations are
    /// expected manual-only gaps and do not count.
    pub fn failure_count(&self) -> usize {
        self.failed_nodes().count() + self.seed_failures()
    }

    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    pub fn all_statuses_satisfied(&self) -> bool {
        self.verifications.iter().all(VerificationResult::satisfied)
    }
}
