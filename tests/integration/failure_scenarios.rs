//! Failure tests for the scaling loop
//!
//! These tests verify that the loop handles backend failures gracefully:
//! - Unreachable or failing monitoring backend
//! - Empty metric windows
//! - Failing pool controller
//! - Rejected resize requests
//!
//! Every failure is cycle-local: the loop must stay alive and the next
//! cycle must run normally.

use pool_autoscaler::actors::scheduler::SchedulerHandle;
use pool_autoscaler::config::ScalingPolicy;
use pool_autoscaler::controller::Decision;
use tokio::sync::broadcast;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::helpers::*;

#[tokio::test]
async fn test_metric_failure_is_cycle_local() {
    // No metric route mounted - every query fails
    let monitor = MockServer::start().await;
    let pool = FakePoolServer::start(5).await;

    let controller = build_controller(&monitor, &pool, ScalingPolicy::default());
    let (event_tx, _event_rx) = broadcast::channel(64);
    let handle = SchedulerHandle::spawn(controller, POOL_ID, event_tx);

    let result = handle.evaluate_now().await;
    assert!(result.is_err(), "cycle should fail without metric data");
    assert_eq!(pool.resize_calls(), 0, "failed cycle must not resize");

    // The backend recovers; the next cycle runs normally
    mount_metric(&monitor, 0.45).await;

    let decision = handle.evaluate_now().await.unwrap();
    assert_eq!(decision, Decision::ScaleDown(4));
    assert_eq!(pool.resize_calls(), 1);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_empty_metric_window_is_noop_cycle() {
    let monitor = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/metrics/cluster/cpu_load"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&monitor)
        .await;

    let pool = FakePoolServer::start(5).await;

    let controller = build_controller(&monitor, &pool, ScalingPolicy::default());
    let (event_tx, _event_rx) = broadcast::channel(64);
    let handle = SchedulerHandle::spawn(controller, POOL_ID, event_tx);

    let result = handle.evaluate_now().await;
    assert!(result.is_err());
    assert_eq!(pool.resize_calls(), 0);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_malformed_metric_response_is_cycle_local() {
    let monitor = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/metrics/cluster/cpu_load"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{invalid json"))
        .mount(&monitor)
        .await;

    let pool = FakePoolServer::start(5).await;

    let controller = build_controller(&monitor, &pool, ScalingPolicy::default());
    let (event_tx, _event_rx) = broadcast::channel(64);
    let handle = SchedulerHandle::spawn(controller, POOL_ID, event_tx);

    let result = handle.evaluate_now().await;
    assert!(result.is_err());
    assert_eq!(pool.resize_calls(), 0);

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unreadable_pool_is_cycle_local() {
    let monitor = start_monitor(0.45).await;

    // Pool controller answers 503 for everything
    let failing_pool = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pools/{POOL_ID}")))
        .respond_with(ResponseTemplate::new(503))
        .mount(&failing_pool)
        .await;

    let controller =
        build_controller_for(monitor.uri(), failing_pool.uri(), ScalingPolicy::default());

    let (event_tx, _event_rx) = broadcast::channel(64);
    let handle = SchedulerHandle::spawn(controller, POOL_ID, event_tx);

    let result = handle.evaluate_now().await;
    assert!(result.is_err());

    // The loop is still alive
    let result = handle.evaluate_now().await;
    assert!(result.is_err());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejected_resize_is_cycle_local() {
    let monitor = start_monitor(0.45).await;

    // Pool reports a size but refuses every resize
    let stubborn_pool = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/v1/pools/{POOL_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "size": 5 })))
        .mount(&stubborn_pool)
        .await;
    Mock::given(method("PUT"))
        .and(path(format!("/v1/pools/{POOL_ID}/size")))
        .respond_with(ResponseTemplate::new(409).set_body_string("concurrent modification"))
        .mount(&stubborn_pool)
        .await;

    let controller =
        build_controller_for(monitor.uri(), stubborn_pool.uri(), ScalingPolicy::default());
    let (event_tx, _event_rx) = broadcast::channel(64);
    let handle = SchedulerHandle::spawn(controller, POOL_ID, event_tx);

    let result = handle.evaluate_now().await;
    assert!(result.is_err(), "rejected resize should surface as an error");

    // The loop survives and keeps trying on later cycles
    let result = handle.evaluate_now().await;
    assert!(result.is_err());

    handle.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_no_event_published_for_failed_cycles() {
    let monitor = MockServer::start().await; // no metric route
    let pool = FakePoolServer::start(5).await;

    let controller = build_controller(&monitor, &pool, ScalingPolicy::default());
    let (event_tx, mut event_rx) = broadcast::channel(64);
    let handle = SchedulerHandle::spawn(controller, POOL_ID, event_tx);

    let _ = handle.evaluate_now().await;

    let recv_result = tokio::time::timeout(
        std::time::Duration::from_millis(100),
        event_rx.recv(),
    )
    .await;
    assert!(
        recv_result.is_err(),
        "no event should be published for a failed cycle"
    );

    handle.shutdown().await.unwrap();
}
