//! Endpoint behavior, driven in-process with a paused clock.

use std::collections::HashSet;
use std::time::Duration;

use axum::http::{header, StatusCode};
use sample_app::observability::metrics::{
    BUSINESS_OPERATIONS_TOTAL, HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS,
    PROMETHEUS_CONTENT_TYPE,
};
use tokio::time::Instant;
use tower::ServiceExt;

mod common;

use common::{app, body_json, get, sample_sum, sample_value, test_config};

#[tokio::test(start_paused = true)]
async fn test_slow_sleeps_between_one_and_three_seconds() {
    let (app, obs) = app(test_config());

    let start = Instant::now();
    let response = app.oneshot(get("/slow")).await.unwrap();
    let elapsed = start.elapsed();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Slow operation completed");
    let duration = body["duration"].as_f64().unwrap();
    assert!((1.0..=3.0).contains(&duration), "duration {duration}");
    assert!(body["result"].is_number());
    assert!(elapsed >= Duration::from_secs_f64(duration));

    let rendered = obs.metrics().render();
    assert_eq!(
        sample_value(&rendered, BUSINESS_OPERATIONS_TOTAL, &[("operation_type", "slow_operation")]),
        Some(1.0)
    );
    let latency_sum = sample_value(
        &rendered,
        &format!("{HTTP_REQUEST_DURATION_SECONDS}_sum"),
        &[],
    )
    .unwrap();
    assert!(latency_sum >= 1.0, "latency sum {latency_sum}");
}

#[tokio::test(start_paused = true)]
async fn test_generate_load_counts_every_operation() {
    let (app, obs) = app(test_config());

    let response = app.oneshot(get("/generate-load")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["message"], "Load generation completed");
    let operations = body["operations"].as_u64().unwrap() as usize;
    assert!((10..=50).contains(&operations));

    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), operations);
    for (i, result) in results.iter().enumerate() {
        assert_eq!(result["operation"].as_u64(), Some(i as u64));
    }

    let rendered = obs.metrics().render();
    for tier in ["fast", "medium", "slow"] {
        let planned = results.iter().filter(|r| r["type"] == tier).count() as f64;
        let counted = sample_sum(
            &rendered,
            BUSINESS_OPERATIONS_TOTAL,
            &[("operation_type", &format!("load_{tier}"))],
        );
        assert_eq!(counted, planned, "tier {tier}");
    }
}

#[tokio::test]
async fn test_error_500() {
    let (app, obs) = app(test_config());

    let response = app.oneshot(get("/error?type=500")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"error": "Internal server error"}));

    let rendered = obs.metrics().render();
    assert_eq!(
        sample_value(
            &rendered,
            HTTP_REQUESTS_TOTAL,
            &[("endpoint", "error_scenario"), ("status", "500")]
        ),
        Some(1.0)
    );
}

#[tokio::test]
async fn test_error_404() {
    let (app, _) = app(test_config());

    let response = app.oneshot(get("/error?type=404")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body, serde_json::json!({"error": "Resource not found"}));
}

#[tokio::test]
async fn test_error_success_and_unknown_types_are_handled() {
    let (app, obs) = app(test_config());

    for uri in ["/error?type=success", "/error?type=teapot"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "No error occurred");
    }

    let rendered = obs.metrics().render();
    assert_eq!(
        sample_value(&rendered, BUSINESS_OPERATIONS_TOTAL, &[("operation_type", "error_handled")]),
        Some(2.0)
    );
}

#[tokio::test(start_paused = true)]
async fn test_error_timeout_stalls_then_answers() {
    let (app, _) = app(test_config());

    let start = Instant::now();
    let response = app.oneshot(get("/error?type=timeout")).await.unwrap();
    assert!(start.elapsed() >= Duration::from_secs(10));
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(start_paused = true)]
async fn test_request_timeout_layer_answers_408() {
    let mut config = test_config();
    config.timeouts.request_secs = 2;
    let (app, obs) = app(config);

    let response = app.oneshot(get("/error?type=timeout")).await.unwrap();
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    let rendered = obs.metrics().render();
    assert_eq!(
        sample_value(
            &rendered,
            HTTP_REQUESTS_TOTAL,
            &[("endpoint", "error_scenario"), ("status", "408")]
        ),
        Some(1.0)
    );
}

#[tokio::test(start_paused = true)]
async fn test_random_error_outcomes() {
    let (app, obs) = app(test_config());
    let calls = 40;

    let mut statuses = HashSet::new();
    for _ in 0..calls {
        let response = app.clone().oneshot(get("/error")).await.unwrap();
        statuses.insert(response.status());
    }

    let allowed = [StatusCode::OK, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR];
    assert!(statuses.iter().all(|s| allowed.contains(s)), "{statuses:?}");
    assert!(statuses.len() > 1);

    let rendered = obs.metrics().render();
    assert_eq!(
        sample_sum(&rendered, HTTP_REQUESTS_TOTAL, &[("endpoint", "error_scenario")]),
        calls as f64
    );
}

#[tokio::test]
async fn test_health_reports_service_identity() {
    let (app, _) = app(test_config());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "sample-app");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["timestamp"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_home_lists_endpoints() {
    let (app, _) = app(test_config());

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Welcome to the 4-Signal Observability Demo");

    let endpoints = body["endpoints"].as_object().unwrap();
    for path in ["/", "/slow", "/error", "/external", "/metrics", "/health", "/generate-load"] {
        assert!(endpoints.contains_key(path), "missing {path}");
    }
}

#[tokio::test]
async fn test_metrics_exposition() {
    let (app, _) = app(test_config());

    app.clone().oneshot(get("/health")).await.unwrap();
    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        PROMETHEUS_CONTENT_TYPE
    );

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("# TYPE http_requests_total counter"));
    assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
    assert!(text.contains("# TYPE business_operations_total counter"));
    assert_eq!(sample_sum(&text, BUSINESS_OPERATIONS_TOTAL, &[]), 0.0);
    assert_eq!(
        sample_value(
            &text,
            HTTP_REQUESTS_TOTAL,
            &[("method", "GET"), ("endpoint", "health"), ("status", "200")]
        ),
        Some(1.0)
    );
}

#[tokio::test]
async fn test_request_id_is_assigned_and_echoed() {
    let (app, _) = app(test_config());

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "abc-123")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "abc-123");
}
