//! Remote collaboration service access
//!
//! [`Remote`] is the seam between the engine and the external service: one
//! method per resource kind, implemented over blocking HTTP in production
//! and by an in-memory fake in tests. The client owns the rate-limit
//! pacing and retry policy; it holds no application state beyond the
//! pacing clock.

mod api;
mod http;

#[cfg(test)]
pub mod fake;

pub use api::{FieldPayload, FieldValue, Remote, RemoteError, RemoteObject, TaskPayload, ViewPayload};
pub use http::{HttpRemote, RetryPolicy, DEFAULT_BASE_URL};
