//! Metrics collection for relay-service.
//!
//! Counters are recorded through the `metrics` facade and rendered by the
//! Prometheus exporter installed at startup.

use metrics::counter;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use service_core::error::AppError;
use std::sync::OnceLock;

pub static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus recorder. Calling it twice is an error.
pub fn init_metrics() -> Result<(), AppError> {
    let handle = PrometheusBuilder::new().install_recorder().map_err(|e| {
        AppError::InternalError(anyhow::anyhow!(
            "failed to install Prometheus recorder: {}",
            e
        ))
    })?;

    METRICS_HANDLE.set(handle).map_err(|_| {
        AppError::InternalError(anyhow::anyhow!("metrics handle already initialized"))
    })
}

/// Get metrics output in Prometheus text format.
pub fn get_metrics() -> String {
    METRICS_HANDLE
        .get()
        .map(|handle| handle.render())
        .unwrap_or_else(|| "# Metrics recorder not initialized\n".to_string())
}

pub fn record_contact_submission(outcome: &'static str) {
    counter!("relay_contact_submissions_total", "outcome" => outcome).increment(1);
}

pub fn record_email(kind: &'static str, status: &'static str) {
    counter!("relay_emails_sent_total", "kind" => kind, "status" => status).increment(1);
}

pub fn record_question(outcome: &'static str) {
    counter!("relay_questions_total", "outcome" => outcome).increment(1);
}

pub fn record_provider_call(provider: &'static str, status: &'static str) {
    counter!("relay_provider_calls_total", "provider" => provider, "status" => status)
        .increment(1);
}
