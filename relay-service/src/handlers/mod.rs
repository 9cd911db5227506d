//! HTTP handlers for relay-service.

pub mod ask;
pub mod contact;
pub mod health;
pub mod metrics;

pub use ask::{ask, AskError};
pub use contact::{submit_contact, ContactError};
pub use health::{health_check, readiness_check};
pub use metrics::metrics_endpoint;

use service_core::error::AppError;

pub async fn not_found() -> AppError {
    AppError::NotFound(anyhow::anyhow!("Not found"))
}
