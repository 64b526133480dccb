//! Span export and Prometheus settings

use serde::Deserialize;

/// Route used when `observability.metrics.path` is blank
const DEFAULT_METRICS_PATH: &str = "/metrics";

/// `[observability]` section of the app config
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub tracing: TracingConfig,
    pub metrics: MetricsConfig,
}

/// OpenTelemetry span export. Nothing is exported until an OTLP endpoint is set.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TracingConfig {
    /// gRPC collector, e.g. `http://localhost:4317`
    pub otlp_endpoint: Option<String>,
    /// Fraction of traces exported
    pub sampling_ratio: f64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            otlp_endpoint: None,
            sampling_ratio: 1.0,
        }
    }
}

impl TracingConfig {
    /// Collector to export to, if any
    pub fn export_endpoint(&self) -> Option<&str> {
        self.otlp_endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
    }
}

/// Prometheus scrape endpoint and histogram layout
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub path: String,
    /// Upper bounds of the `exoplanet_batch_rows` histogram
    pub batch_rows_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_METRICS_PATH.to_string(),
            batch_rows_buckets: vec![1.0, 10.0, 100.0, 1_000.0, 10_000.0, 100_000.0],
        }
    }
}

impl MetricsConfig {
    /// Scrape route, always starting with `/`
    pub fn route(&self) -> String {
        let path = self.path.trim().trim_end_matches('/');

        if path.is_empty() {
            DEFAULT_METRICS_PATH.to_string()
        } else if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        }
    }
}
