//! Remote service interface and failure taxonomy

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{FieldDef, ViewDef};

/// Failure taxonomy for remote calls
///
/// The variants drive the retry policy in [`super::HttpRemote`] and the
/// per-node outcome classification in the engine.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// 429 even after the single cool-down retry
    #[error("rate limit exceeded")]
    RateLimited {
        /// Cool-down the service advertised, in seconds
        retry_after: Option<u64>,
    },

    /// Network failure or 5xx response, after bounded retries
    #[error("transient remote error: {0}")]
    Transient(String),

    /// 401 or 403; never retried
    #[error("authentication rejected: {0}")]
    Auth(String),

    /// Other 4xx; never retried
    #[error("request rejected: {0}")]
    Validation(String),

    /// Duplicate-name response; callers treat the resource as existing
    #[error("already exists: {0}")]
    Conflict(String),
}

/// Identifier and display name of an existing remote resource
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteObject {
    pub id: String,
    pub name: String,
}

/// Payload for creating a custom field on a list
#[derive(Debug, Clone, Serialize)]
pub struct FieldPayload {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    pub type_config: Value,
}

impl FieldPayload {
    pub fn from_def(def: &FieldDef) -> Self {
        Self {
            name: def.name.clone(),
            field_type: def.kind.api_type().to_string(),
            type_config: def.kind.type_config(),
        }
    }
}

/// Payload for creating a view on a space
#[derive(Debug, Clone, Serialize)]
pub struct ViewPayload {
    pub name: String,

    #[serde(rename = "type")]
    pub view_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
}

impl ViewPayload {
    pub fn from_def(def: &ViewDef) -> Self {
        Self {
            name: def.name.clone(),
            view_type: def.kind.api_type().to_string(),
            grouping: def
                .grouping
                .as_ref()
                .map(|field| serde_json::json!({ "field": field })),
            filters: def.filters.as_ref().map(|filter| {
                serde_json::json!({
                    "field": filter.field,
                    "values": filter.any_of,
                })
            }),
        }
    }
}

/// A resolved custom field value attached to a created task
#[derive(Debug, Clone, Serialize)]
pub struct FieldValue {
    pub id: String,
    pub value: Value,
}

/// Payload for creating a task or subtask
#[derive(Debug, Clone, Serialize)]
pub struct TaskPayload {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// Epoch milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<FieldValue>,
}

/// The remote service, one method per resource kind
///
/// Engine components take `&dyn Remote` so a run is wired to exactly one
/// explicitly constructed client and tests can substitute a fake.
pub trait Remote {
    fn spaces(&self) -> Result<Vec<RemoteObject>, RemoteError>;
    fn create_space(&self, name: &str) -> Result<String, RemoteError>;

    fn folders(&self, space_id: &str) -> Result<Vec<RemoteObject>, RemoteError>;
    fn create_folder(&self, space_id: &str, name: &str) -> Result<String, RemoteError>;

    fn lists(&self, folder_id: &str) -> Result<Vec<RemoteObject>, RemoteError>;
    fn create_list(&self, folder_id: &str, name: &str) -> Result<String, RemoteError>;

    fn fields(&self, list_id: &str) -> Result<Vec<RemoteObject>, RemoteError>;
    fn create_field(&self, list_id: &str, field: &FieldPayload) -> Result<String, RemoteError>;

    /// Status names currently active on a list. Statuses are space-scoped
    /// in the remote model, so any list answers for its space.
    fn list_statuses(&self, list_id: &str) -> Result<Vec<String>, RemoteError>;

    fn space_views(&self, space_id: &str) -> Result<Vec<RemoteObject>, RemoteError>;
    fn create_view(&self, space_id: &str, view: &ViewPayload) -> Result<String, RemoteError>;

    fn create_task(&self, list_id: &str, task: &TaskPayload) -> Result<String, RemoteError>;
    fn create_subtask(&self, parent_id: &str, task: &TaskPayload) -> Result<String, RemoteError>;
}
