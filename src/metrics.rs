use std::sync::Arc;
use tracing::{error, info};

use anyhow::{Context, Result};
use axum::{Router, http::StatusCode, routing::get};
use opentelemetry::KeyValue;
use opentelemetry::metrics::{Counter, Histogram, MeterProvider};
use opentelemetry_sdk::metrics::{MetricError, SdkMeterProvider};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;

pub struct Metrics {
    registry: Arc<prometheus::Registry>,
    _provider: SdkMeterProvider,

    // HTTP metrics
    pub requests: Counter<u64>,
    pub request_errors: Counter<u64>,
    pub request_latency: Histogram<f64>,

    // Call trace metrics
    pub filtered_calls: Histogram<u64>,
}

impl Metrics {
    pub fn new() -> Result<Self, MetricError> {
        // Create a new prometheus registry
        let registry = prometheus::Registry::new();

        // Configure OpenTelemetry to use this registry
        let exporter = opentelemetry_prometheus::exporter()
            .with_registry(registry.clone())
            .build()?;

        // Set up a meter to create instruments
        let provider = SdkMeterProvider::builder().with_reader(exporter).build();
        let meter = provider.meter("dashboard_metrics");

        let requests = meter
            .u64_counter("dashboard_requests")
            .with_description("Number of dashboard requests served")
            .build();

        let request_errors = meter
            .u64_counter("dashboard_request_errors")
            .with_description("Number of dashboard requests rejected")
            .build();

        let request_latency = meter
            .f64_histogram("dashboard_request_latency")
            .with_description("Dashboard request latency")
            .with_boundaries(vec![0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1])
            .with_unit("s")
            .build();

        let filtered_calls = meter
            .u64_histogram("dashboard_filtered_calls")
            .with_description("Number of call records left after filtering")
            .with_boundaries(vec![0.0, 1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0])
            .build();

        Ok(Self {
            registry: Arc::new(registry),
            _provider: provider,
            requests,
            request_errors,
            request_latency,
            filtered_calls,
        })
    }

    pub fn record_request(&self, route: &'static str, elapsed_secs: f64, ok: bool) {
        let attrs = [KeyValue::new("route", route)];
        self.requests.add(1, &attrs);
        self.request_latency.record(elapsed_secs, &attrs);
        if !ok {
            self.request_errors.add(1, &attrs);
        }
    }

    pub async fn start_metrics_server(&self, addr: &str, port: u16) -> Result<()> {
        let addr = format!("{addr}:{port}")
            .parse::<SocketAddr>()
            .context("invalid metrics address")?;
        let registry = self.registry.clone();

        let app = Router::new().route("/metrics", get(move || metrics_handler(registry.clone())));

        // Determine the access URL based on the binding address. Only used for logging.
        let access_url = if addr.ip().to_string() == "0.0.0.0" {
            format!("http://localhost:{port}/metrics")
        } else {
            format!("http://{}:{port}/metrics", addr.ip())
        };

        info!(
            "Starting metrics server - binding to {} (accessible at {})",
            addr, access_url
        );

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .context("failed to bind metrics listener")?;

        // Spawn the server in a separate task
        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                error!("Metrics server stopped: {}", e);
            }
        });

        Ok(())
    }
}

async fn metrics_handler(registry: Arc<prometheus::Registry>) -> Result<String, StatusCode> {
    let encoder = TextEncoder::new();
    let metric_families = registry.gather();
    let mut buffer = vec![];
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    String::from_utf8(buffer).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}
