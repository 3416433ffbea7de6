//! View definitions and creation outcomes
//!
//! The remote API has partial support for view creation; outcomes are
//! modeled as a capability result rather than as errors.

use serde::{Deserialize, Serialize};

/// Kind of view to create
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewKind {
    List,
    Board,
    Table,
    Timeline,
    Calendar,
    Gantt,
}

impl ViewKind {
    /// Remote API type identifier
    pub fn api_type(&self) -> &'static str {
        match self {
            ViewKind::List => "list",
            ViewKind::Board => "board",
            ViewKind::Table => "table",
            ViewKind::Timeline => "timeline",
            ViewKind::Calendar => "calendar",
            ViewKind::Gantt => "gantt",
        }
    }
}

/// A filter predicate restricting the tasks a view shows,
/// e.g. priority in {urgent, high}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewFilter {
    /// Task field the filter matches on
    pub field: String,

    /// Values the field may take
    #[serde(default)]
    pub any_of: Vec<String>,
}

/// A declarative view definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDef {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: ViewKind,

    /// Grouping key, e.g. "status" or "priority"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grouping: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filters: Option<ViewFilter>,
}

/// Capability result of one view-creation attempt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewOutcome {
    /// The view exists remotely (created now or found already present)
    Supported { id: String },

    /// The API refused the view kind; it must be created by hand
    Unsupported,

    /// The attempt failed for another reason
    Error { reason: String },
}

impl ViewOutcome {
    pub fn is_supported(&self) -> bool {
        matches!(self, ViewOutcome::Supported { .. })
    }
}
