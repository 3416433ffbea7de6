//! Domain models for Scaffold CLI
//!
//! The declarative workspace tree, the definition types attached to it,
//! and the in-memory graph of remote identifiers built during a run.
//! Pure data without any I/O concerns.

mod automation;
mod example;
mod field;
mod status;
mod view;
mod workspace;

pub use automation::{AutomationAction, AutomationDef, SetupInstruction, Trigger, TriggerEvent};
pub use example::{ExampleProject, TaskGroup, TaskSpec};
pub use field::{DropDownOption, FieldDef, FieldKind};
pub use status::{
    missing_statuses, normalized, StatusDef, StatusKind, VerificationOutcome, VerificationResult,
};
pub use view::{ViewDef, ViewFilter, ViewKind, ViewOutcome};
pub use workspace::{FolderDef, FolderNode, ListNode, ProvisionedWorkspace, SpaceDef, SpaceNode};
