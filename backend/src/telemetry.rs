//! Prometheus metrics recorder
//!
//! The auth service emits `auth_register_total` and `auth_login_total`
//! counters labelled by outcome. Without an installed recorder the `metrics`
//! macros are no-ops, so the recorder is only installed when enabled.

use anyhow::Result;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the global Prometheus recorder
///
/// Fails if a recorder is already installed in this process.
pub fn install_metrics_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics recorder: {}", e))?;

    metrics::describe_counter!("auth_register_total", "Registration attempts by outcome");
    metrics::describe_counter!("auth_login_total", "Login attempts by outcome");

    info!("Prometheus metrics recorder installed");
    Ok(handle)
}
