//! Prometheus metrics infrastructure

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, response::IntoResponse, routing::get, Router};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};

use super::config::MetricsConfig;

const BATCH_ROWS_METRIC: &str = "exoplanet_batch_rows";

/// Prometheus metrics handle for serving metrics endpoint
#[derive(Clone)]
pub struct PrometheusMetrics {
    handle: Arc<PrometheusHandle>,
}

impl PrometheusMetrics {
    /// Get the metrics as a string for the /metrics endpoint
    pub fn render(&self) -> String {
        self.handle.render()
    }
}

/// Initialize Prometheus metrics
pub fn init_metrics(config: &MetricsConfig) -> Option<PrometheusMetrics> {
    if !config.enabled {
        tracing::info!("Prometheus metrics disabled");
        return None;
    }

    let installed = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(BATCH_ROWS_METRIC.to_string()),
            &config.batch_rows_buckets,
        )
        .and_then(|builder| builder.install_recorder());

    match installed {
        Ok(handle) => {
            gauge!("exoplanet_classifier_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);

            tracing::info!("Prometheus metrics initialized at {}", config.route());

            Some(PrometheusMetrics {
                handle: Arc::new(handle),
            })
        }
        Err(e) => {
            tracing::error!("Failed to initialize Prometheus metrics: {}", e);
            None
        }
    }
}

/// Create the metrics router
pub fn create_metrics_router(metrics: PrometheusMetrics, path: &str) -> Router {
    Router::new()
        .route(path, get(metrics_handler))
        .with_state(metrics)
}

async fn metrics_handler(State(metrics): State<PrometheusMetrics>) -> impl IntoResponse {
    metrics.render()
}

/// Record an HTTP request metric
pub fn record_http_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];

    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());

    if status >= 500 {
        counter!("http_server_errors_total", &labels).increment(1);
    }
}

/// Record a successful classification
pub fn record_prediction(mode: &str, class: &str) {
    let labels = [("mode", mode.to_string()), ("class", class.to_string())];
    counter!("exoplanet_predictions_total", &labels).increment(1);
}

/// Record a failed classification or rejected batch
pub fn record_prediction_error(mode: &str, kind: &str) {
    let labels = [("mode", mode.to_string()), ("kind", kind.to_string())];
    counter!("exoplanet_prediction_errors_total", &labels).increment(1);
}

/// Record the size and duration of a classified batch
pub fn record_batch(mode: &str, rows: usize, duration: Duration) {
    let labels = [("mode", mode.to_string())];
    histogram!(BATCH_ROWS_METRIC, &labels).record(rows as f64);
    histogram!("exoplanet_batch_duration_seconds", &labels).record(duration.as_secs_f64());
}
