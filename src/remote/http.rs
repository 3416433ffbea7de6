//! Blocking HTTP implementation of the remote interface
//!
//! Every call goes through a single request path that enforces the pacing
//! gap and the retry policy. The service applies a global per-account rate
//! ceiling shared across all resource kinds, so calls are paced rather
//! than parallelized.

use std::cell::RefCell;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use super::api::{FieldPayload, Remote, RemoteError, RemoteObject, TaskPayload, ViewPayload};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://api.clickup.com/api/v2";

/// Pacing and retry configuration
///
/// All durations are policy data so tests can run with zero delays.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Minimum gap between outbound calls
    pub pace: Duration,

    /// Cool-down after a rate-limit response when the service does not
    /// advertise one
    pub cooldown: Duration,

    /// Delay between transient-failure attempts
    pub transient_delay: Duration,

    /// Total attempts for transient failures
    pub transient_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            pace: Duration::from_millis(500),
            cooldown: Duration::from_secs(60),
            transient_delay: Duration::from_secs(2),
            transient_attempts: 3,
        }
    }
}

#[cfg(test)]
impl RetryPolicy {
    /// Zero-delay policy for tests
    pub fn immediate() -> Self {
        Self {
            pace: Duration::ZERO,
            cooldown: Duration::ZERO,
            transient_delay: Duration::ZERO,
            transient_attempts: 3,
        }
    }
}

/// Tracks the time of the last outbound call
struct Pacer {
    last: Option<Instant>,
}

impl Pacer {
    fn new() -> Self {
        Self { last: None }
    }

    /// Sleeps until at least `gap` has passed since the previous call
    fn wait(&mut self, gap: Duration) {
        if let Some(last) = self.last {
            let elapsed = last.elapsed();
            if elapsed < gap {
                thread::sleep(gap - elapsed);
            }
        }
        self.last = Some(Instant::now());
    }
}

/// Runs a classified call under the retry policy: exactly one retry after
/// a rate-limit cool-down, bounded retries for transient failures, no
/// retry for anything else.
fn with_retry<F>(policy: &RetryPolicy, mut call: F) -> Result<Value, RemoteError>
where
    F: FnMut() -> Result<Value, RemoteError>,
{
    let mut attempts_left = policy.transient_attempts;
    let mut rate_limit_retried = false;

    loop {
        match call() {
            Ok(value) => return Ok(value),
            Err(RemoteError::RateLimited { retry_after }) if !rate_limit_retried => {
                rate_limit_retried = true;
                let cooldown = retry_after
                    .map(Duration::from_secs)
                    .unwrap_or(policy.cooldown);
                thread::sleep(cooldown);
            }
            Err(RemoteError::Transient(_)) if attempts_left > 1 => {
                attempts_left -= 1;
                thread::sleep(policy.transient_delay);
            }
            Err(err) => return Err(err),
        }
    }
}

/// Maps a non-success response to the failure taxonomy
fn classify(status: StatusCode, body: &str, retry_after: Option<u64>) -> RemoteError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return RemoteError::RateLimited { retry_after };
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return RemoteError::Auth(error_text(body));
    }
    if status.is_server_error() {
        return RemoteError::Transient(format!("{}: {}", status, error_text(body)));
    }

    let text = error_text(body);
    let lowered = text.to_lowercase();
    if lowered.contains("already exists") || lowered.contains("taken") {
        RemoteError::Conflict(text)
    } else {
        RemoteError::Validation(text)
    }
}

/// Pulls the service's error message out of a response body
fn error_text(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value
            .get("err")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| body.to_string()),
        Err(_) => body.to_string(),
    }
}

/// Reads an id that may be a JSON string or number
fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Extracts a created resource's id, accepting the nested form some
/// endpoints return, e.g. `{"field": {"id": ...}}`
fn created_id(value: &Value, nested: &str) -> Result<String, RemoteError> {
    let direct = value.get("id").and_then(id_text);
    let inner = value
        .get(nested)
        .and_then(|v| v.get("id"))
        .and_then(id_text);

    direct
        .or(inner)
        .ok_or_else(|| RemoteError::Validation(format!("response missing id: {}", value)))
}

/// Parses an `{"<key>": [{id, name}, ...]}` listing response
fn object_array(value: &Value, key: &str) -> Vec<RemoteObject> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| {
                    let id = item.get("id").and_then(id_text)?;
                    let name = item.get("name").and_then(Value::as_str)?.to_string();
                    Some(RemoteObject { id, name })
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Feature switches applied to every created space
fn default_space_features() -> Value {
    serde_json::json!({
        "due_dates": {
            "enabled": true,
            "start_date": true,
            "remap_due_dates": true,
            "remap_closed_due_date": true,
        },
        "custom_fields": { "enabled": true },
        "time_tracking": { "enabled": true },
        "tags": { "enabled": true },
        "time_estimates": { "enabled": true },
        "checklists": { "enabled": true },
        "remap_dependencies": { "enabled": true },
        "dependency_warning": { "enabled": true },
        "portfolios": { "enabled": true },
    })
}

/// Blocking HTTP client for the collaboration service
pub struct HttpRemote {
    base_url: String,
    token: String,
    team_id: String,
    http: Client,
    policy: RetryPolicy,
    pacer: RefCell<Pacer>,
}

impl HttpRemote {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
        team_id: impl Into<String>,
        policy: RetryPolicy,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            team_id: team_id.into(),
            http,
            policy,
            pacer: RefCell::new(Pacer::new()),
        })
    }

    fn request(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, RemoteError> {
        let url = format!("{}/{}", self.base_url, path);
        with_retry(&self.policy, || {
            self.pacer.borrow_mut().wait(self.policy.pace);
            self.send_once(method.clone(), &url, body)
        })
    }

    fn send_once(&self, method: Method, url: &str, body: Option<&Value>) -> Result<Value, RemoteError> {
        let mut request = self
            .http
            .request(method, url)
            .header("Authorization", &self.token);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .map_err(|err| RemoteError::Transient(err.to_string()))?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse().ok());
        let text = response
            .text()
            .map_err(|err| RemoteError::Transient(err.to_string()))?;

        if status.is_success() {
            if text.is_empty() {
                return Ok(Value::Null);
            }
            serde_json::from_str(&text)
                .map_err(|err| RemoteError::Transient(format!("invalid response body: {}", err)))
        } else {
            Err(classify(status, &text, retry_after))
        }
    }

    fn get(&self, path: &str) -> Result<Value, RemoteError> {
        self.request(Method::GET, path, None)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value, RemoteError> {
        self.request(Method::POST, path, Some(body))
    }

    fn post_payload<T: serde::Serialize>(&self, path: &str, payload: &T) -> Result<Value, RemoteError> {
        let body = serde_json::to_value(payload)
            .map_err(|err| RemoteError::Validation(format!("unserializable payload: {}", err)))?;
        self.post(path, &body)
    }
}

impl Remote for HttpRemote {
    fn spaces(&self) -> Result<Vec<RemoteObject>, RemoteError> {
        let value = self.get(&format!("team/{}/space", self.team_id))?;
        Ok(object_array(&value, "spaces"))
    }

    fn create_space(&self, name: &str) -> Result<String, RemoteError> {
        let body = serde_json::json!({
            "name": name,
            "multiple_assignees": true,
            "features": default_space_features(),
        });
        let value = self.post(&format!("team/{}/space", self.team_id), &body)?;
        created_id(&value, "space")
    }

    fn folders(&self, space_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let value = self.get(&format!("space/{}/folder", space_id))?;
        Ok(object_array(&value, "folders"))
    }

    fn create_folder(&self, space_id: &str, name: &str) -> Result<String, RemoteError> {
        let body = serde_json::json!({ "name": name });
        let value = self.post(&format!("space/{}/folder", space_id), &body)?;
        created_id(&value, "folder")
    }

    fn lists(&self, folder_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let value = self.get(&format!("folder/{}/list", folder_id))?;
        Ok(object_array(&value, "lists"))
    }

    fn create_list(&self, folder_id: &str, name: &str) -> Result<String, RemoteError> {
        let body = serde_json::json!({ "name": name });
        let value = self.post(&format!("folder/{}/list", folder_id), &body)?;
        created_id(&value, "list")
    }

    fn fields(&self, list_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let value = self.get(&format!("list/{}/field", list_id))?;
        Ok(object_array(&value, "fields"))
    }

    fn create_field(&self, list_id: &str, field: &FieldPayload) -> Result<String, RemoteError> {
        let value = self.post_payload(&format!("list/{}/field", list_id), field)?;
        created_id(&value, "field")
    }

    fn list_statuses(&self, list_id: &str) -> Result<Vec<String>, RemoteError> {
        let value = self.get(&format!("list/{}", list_id))?;
        let statuses = value
            .get("statuses")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("status").and_then(Value::as_str))
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Ok(statuses)
    }

    fn space_views(&self, space_id: &str) -> Result<Vec<RemoteObject>, RemoteError> {
        let value = self.get(&format!("space/{}/view", space_id))?;
        Ok(object_array(&value, "views"))
    }

    fn create_view(&self, space_id: &str, view: &ViewPayload) -> Result<String, RemoteError> {
        let value = self.post_payload(&format!("space/{}/view", space_id), view)?;
        created_id(&value, "view")
    }

    fn create_task(&self, list_id: &str, task: &TaskPayload) -> Result<String, RemoteError> {
        let value = self.post_payload(&format!("list/{}/task", list_id), task)?;
        created_id(&value, "task")
    }

    fn create_subtask(&self, parent_id: &str, task: &TaskPayload) -> Result<String, RemoteError> {
        let value = self.post_payload(&format!("task/{}/subtask", parent_id), task)?;
        created_id(&value, "task")
    }
}
