//! Scaffold CLI - declarative workspace provisioning for ClickUp
//!
//! Scaffold converges a ClickUp workspace (spaces, folders, lists, custom
//! fields, views, seed content) toward a single YAML document, idempotently
//! and over the service's rate-limited API. Custom statuses and automations
//! cannot be created through the API; scaffold verifies statuses, prints
//! manual setup guides, and gates example seeding on that verification.

pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;
pub mod remote;

pub use config::WorkspaceConfig;
pub use domain::{ProvisionedWorkspace, VerificationResult};
pub use engine::RunReport;
