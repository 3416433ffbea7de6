//! Automation definitions and manual setup instructions
//!
//! Automations cannot be created through the remote API at all. The
//! definitions exist solely to be transformed into human-actionable setup
//! instructions; nothing here performs a remote call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event kind that fires an automation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    StatusChange,
    PriorityChange,
    TaskCreated,
    DueDateArrives,
}

impl TriggerEvent {
    fn label(&self) -> &'static str {
        match self {
            TriggerEvent::StatusChange => "status changes",
            TriggerEvent::PriorityChange => "priority changes",
            TriggerEvent::TaskCreated => "task is created",
            TriggerEvent::DueDateArrives => "due date arrives",
        }
    }
}

/// Trigger of an automation: an event kind plus optional match conditions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    pub event: TriggerEvent,

    /// Match only when the task enters this status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Match only tasks with this priority
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// Action an automation performs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AutomationAction {
    AddComment { comment: String },
    ChangeStatus { status: String },
    SetField { field: String, value: Value },
}

/// A declarative automation definition, consumed only for reporting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutomationDef {
    pub name: String,
    pub trigger: Trigger,
    pub action: AutomationAction,

    /// Optional secondary action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub then: Option<AutomationAction>,
}

impl AutomationDef {
    /// Renders this definition as a manual setup instruction for a space
    pub fn instruction(&self, space: &str) -> SetupInstruction {
        let mut actions = vec![describe_action(&self.action)];
        if let Some(then) = &self.then {
            actions.push(describe_action(then));
        }

        SetupInstruction {
            space: space.to_string(),
            automation: self.name.clone(),
            trigger: describe_trigger(&self.trigger),
            actions,
        }
    }
}

/// Structured, human-actionable record describing how to create one
/// automation in the remote UI
#[derive(Debug, Clone, Serialize)]
pub struct SetupInstruction {
    /// Display name of the target space
    pub space: String,

    pub automation: String,

    /// Human-readable trigger description
    pub trigger: String,

    /// Human-readable action descriptions, primary first
    pub actions: Vec<String>,
}

fn describe_trigger(trigger: &Trigger) -> String {
    let mut text = format!("When {}", trigger.event.label());
    if let Some(status) = &trigger.status {
        text.push_str(&format!(" to '{}'", status));
    }
    if let Some(priority) = &trigger.priority {
        text.push_str(&format!(" (priority: {})", priority));
    }
    text
}

fn describe_action(action: &AutomationAction) -> String {
    match action {
        AutomationAction::AddComment { comment } => format!("Add comment: \"{}\"", comment),
        AutomationAction::ChangeStatus { status } => format!("Change status to '{}'", status),
        AutomationAction::SetField { field, value } => {
            format!("Set field '{}' to {}", field, value)
        }
    }
}
