//! Helper functions for integration tests

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::time::Duration;

use pool_autoscaler::config::ScalingPolicy;
use pool_autoscaler::controller::AutoscaleController;
use pool_autoscaler::metrics::{HttpMetricBackend, MetricSampler};
use pool_autoscaler::pool::HttpResourcePool;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const POOL_ID: &str = "test-project/test-instance";

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// A pool controller mock that applies resizes to its own state, so the
/// loop observes post-resize sizes exactly like against a real backend.
pub struct FakePoolServer {
    pub server: MockServer,
    pub size: Arc<AtomicU32>,
    pub resize_calls: Arc<AtomicUsize>,
}

impl FakePoolServer {
    pub async fn start(initial_size: u32) -> Self {
        let server = MockServer::start().await;
        let size = Arc::new(AtomicU32::new(initial_size));
        let resize_calls = Arc::new(AtomicUsize::new(0));

        let read_size = size.clone();
        Mock::given(method("GET"))
            .and(path(format!("/v1/pools/{POOL_ID}")))
            .respond_with(move |_req: &Request| {
                ResponseTemplate::new(200).set_body_json(
                    serde_json::json!({ "size": read_size.load(Ordering::SeqCst) }),
                )
            })
            .mount(&server)
            .await;

        let write_size = size.clone();
        let write_calls = resize_calls.clone();
        Mock::given(method("PUT"))
            .and(path(format!("/v1/pools/{POOL_ID}/size")))
            .respond_with(move |req: &Request| {
                let body: serde_json::Value =
                    serde_json::from_slice(&req.body).expect("resize body must be JSON");
                let target = body["size"].as_u64().expect("resize body must carry a size");

                write_size.store(target as u32, Ordering::SeqCst);
                write_calls.fetch_add(1, Ordering::SeqCst);

                ResponseTemplate::new(200)
            })
            .mount(&server)
            .await;

        Self {
            server,
            size,
            resize_calls,
        }
    }

    pub fn size(&self) -> u32 {
        self.size.load(Ordering::SeqCst)
    }

    pub fn resize_calls(&self) -> usize {
        self.resize_calls.load(Ordering::SeqCst)
    }
}

/// Start a monitoring backend mock reporting one fixed utilization value
pub async fn start_monitor(value: f64) -> MockServer {
    let server = MockServer::start().await;
    mount_metric(&server, value).await;
    server
}

/// Mount the metric route on an existing mock server
pub async fn mount_metric(server: &MockServer, value: f64) {
    Mock::given(method("GET"))
        .and(path("/v1/metrics/cluster/cpu_load"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "timestamp": "2026-08-07T10:00:00Z", "value": value }
        ])))
        .mount(server)
        .await;
}

/// Build a controller wired to the two mock backends
pub fn build_controller(
    monitor: &MockServer,
    pool: &FakePoolServer,
    policy: ScalingPolicy,
) -> AutoscaleController {
    build_controller_for(monitor.uri(), pool.server.uri(), policy)
}

/// Build a controller from raw backend URIs
pub fn build_controller_for(
    monitor_uri: String,
    pool_uri: String,
    policy: ScalingPolicy,
) -> AutoscaleController {
    let backend = Arc::new(HttpMetricBackend::new(monitor_uri, None, TIMEOUT));
    let sampler = MetricSampler::new(backend, "cluster/cpu_load", policy.reduction);
    let resource_pool = Arc::new(HttpResourcePool::new(pool_uri, POOL_ID, TIMEOUT));

    AutoscaleController::new(policy, sampler, resource_pool)
}
