/// HTTP tests for the similarity endpoints
/// Drives the router in-process with `oneshot`, no network involved
use axum::body::Body;
use axum::http::{Request, StatusCode};
use company_similarity_api::config::Config;
use company_similarity_api::handlers::{router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> axum::Router {
    router(Arc::new(AppState::new(Config::default())))
}

async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn target() -> Value {
    json!({
        "name": "Alpha Software",
        "state": "SP",
        "city": "São Paulo",
        "classificationCode": "6201-5/01",
        "technologies": ["AWS", "Python"],
        "hiringTrend": 5,
        "fundingStage": "seed"
    })
}

#[tokio::test]
async fn test_health() {
    let response = test_app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_pair_similarity() {
    let (status, body) = post_json(
        "/api/v1/similarity",
        json!({
            "target": target(),
            "candidate": {
                "name": "Beta",
                "state": "sp",
                "city": "Sao Paulo",
                "classificationCode": "62.01-5-01",
                "technologies": ["aws", "python"],
                "hiringTrend": 2,
                "fundingStage": "seed"
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["breakdown"]["industry"], json!(75));
    assert!(body["overallScore"].as_u64().unwrap() <= 100);
    assert!(body["reasons"].as_array().unwrap().len() <= 5);
    assert!(body["tier"].is_string());
    assert!(body["confidence"].is_string());
}

#[tokio::test]
async fn test_pair_similarity_is_cached_consistently() {
    let request = json!({
        "target": target(),
        "candidate": { "name": "Beta", "state": "RJ" },
        "options": { "prioritizeGeo": true }
    });
    let app = test_app();

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/similarity")
                    .header("content-type", "application/json")
                    .body(Body::from(request.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        bodies.push(
            axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .unwrap(),
        );
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[tokio::test]
async fn test_blank_name_rejected() {
    let (status, body) = post_json(
        "/api/v1/similarity",
        json!({ "target": target(), "candidate": { "name": "  " } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("candidate"));
}

#[tokio::test]
async fn test_negative_weight_rejected() {
    let (status, _) = post_json(
        "/api/v1/similarity",
        json!({
            "target": target(),
            "candidate": { "name": "Beta" },
            "options": {
                "weights": {
                    "firmographics": -1.0,
                    "technographics": 0.25,
                    "geographic": 0.15,
                    "industry": 0.15,
                    "behavioral": 0.05
                }
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_batch_filters_and_sorts() {
    let (status, body) = post_json(
        "/api/v1/similarity/batch",
        json!({
            "target": target(),
            "candidates": [
                { "name": "Far", "state": "RS", "classificationCode": "0111-3/01" },
                { "name": "Near", "state": "SP", "city": "Sao Paulo", "classificationCode": "6201-5/01" },
                { "name": "Unknown" }
            ],
            "options": { "minScore": 45 }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert!(!results.is_empty());
    assert_eq!(results[0]["candidate"]["name"], json!("Near"));
    for result in results {
        assert!(result["similarity"]["overallScore"].as_u64().unwrap() >= 45);
    }
    for pair in results.windows(2) {
        assert!(
            pair[0]["similarity"]["overallScore"].as_u64() >= pair[1]["similarity"]["overallScore"].as_u64()
        );
    }
}

#[tokio::test]
async fn test_oversized_batch_rejected() {
    let config = Config {
        max_batch_size: 1,
        ..Config::default()
    };
    let app = router(Arc::new(AppState::new(config)));
    let body = json!({
        "target": target(),
        "candidates": [{ "name": "A" }, { "name": "B" }]
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/similarity/batch")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_compare_returns_ranks_and_statistics() {
    let (status, body) = post_json(
        "/api/v1/similarity/compare",
        json!({
            "target": target(),
            "candidates": [
                { "name": "A" },
                { "name": "B", "state": "SP" }
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let comparisons = body["comparisons"].as_array().unwrap();
    assert_eq!(comparisons.len(), 2);
    assert_eq!(comparisons[0]["rank"], json!(1));
    assert_eq!(comparisons[1]["rank"], json!(2));
    assert_eq!(comparisons[0]["candidate"]["name"], json!("B"));
    assert_eq!(
        body["statistics"]["maxScore"],
        comparisons[0]["similarity"]["overallScore"]
    );
}

#[tokio::test]
async fn test_compare_with_no_candidates() {
    let (status, body) = post_json(
        "/api/v1/similarity/compare",
        json!({ "target": target(), "candidates": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["statistics"]["avgScore"], json!(0));
    assert_eq!(body["statistics"]["excellentCount"], json!(0));
}
