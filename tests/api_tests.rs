// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP API tests against scripted point sources

mod helpers;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use blockstamp::api::router;
use blockstamp::{Chain, ChainResolver, Resolvers};
use helpers::{fast_config, MockPointSource};
use serde_json::{json, Value};
use tower::ServiceExt;

/// EVM blocks every 10s from t=90, Solana slots every 1s from t=1000
fn resolvers() -> Arc<Resolvers> {
    let evm = MockPointSource::linear(Chain::Evm, 90, 10, 22);
    let solana = MockPointSource::linear(Chain::Solana, 1_000, 1, 100).with_latest(99);
    Arc::new(
        Resolvers::new(
            ChainResolver::new(evm, fast_config()),
            ChainResolver::new(solana, fast_config()),
        )
        .unwrap(),
    )
}

async fn get(uri: &str) -> (StatusCode, Value) {
    let response = router(resolvers())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}

#[tokio::test]
async fn test_timestamps_batch_defaults_to_evm() {
    let (status, body) = get("/api/v1/blocks?timestamps=100,200").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "100": 1, "200": 11 }));
}

#[tokio::test]
async fn test_timestamps_batch_on_solana() {
    let (status, body) = get("/api/v1/blocks?timestamps=1050,500&chain=solana").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "1050": 50, "500": 0 }));
}

#[tokio::test]
async fn test_malformed_batch_item_is_null() {
    let (status, body) = get("/api/v1/blocks?timestamps=100,abc").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "100": 1, "abc": null }));
}

#[tokio::test]
async fn test_failed_batch_item_is_null() {
    // The head lies past the timeline, so every search hits a missing block
    let evm = MockPointSource::linear(Chain::Evm, 90, 10, 4).with_latest(1_000);
    let solana = MockPointSource::linear(Chain::Solana, 1_000, 1, 10);
    let resolvers = Resolvers::new(
        ChainResolver::new(evm, fast_config()),
        ChainResolver::new(solana, fast_config()),
    )
    .unwrap();

    let response = router(Arc::new(resolvers))
        .oneshot(
            Request::builder()
                .uri("/api/v1/blocks?timestamps=100")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body, json!({ "100": null }));
}

#[tokio::test]
async fn test_single_block() {
    let (status, body) = get("/api/v1/blocks?block=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "3": 120 }));
}

#[tokio::test]
async fn test_block_number_alias() {
    let (status, body) = get("/api/v1/blocks?blockNumber=5&chain=solana").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "5": 1_005 }));
}

#[tokio::test]
async fn test_solana_slot_out_of_range_is_bad_request() {
    let (status, body) = get("/api/v1/blocks?block=200000&chain=solana").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "error": "Slot 200000 is out of range. Latest slot is 99." })
    );
}

#[tokio::test]
async fn test_evm_block_past_head_is_not_found() {
    let (status, body) = get("/api/v1/blocks?block=500").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "No block 500 on evm" }));
}

#[tokio::test]
async fn test_missing_parameters_is_bad_request() {
    let (status, body) = get("/api/v1/blocks").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("timestamps"));
}

#[tokio::test]
async fn test_empty_timestamps_is_bad_request() {
    for uri in [
        "/api/v1/blocks?timestamps=",
        "/api/v1/blocks?timestamps=,,",
        "/api/v1/blocks?timestamps=%20&block=",
    ] {
        let (status, body) = get(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["error"].is_string(), "{uri}");
    }
}

#[tokio::test]
async fn test_empty_timestamps_falls_through_to_block() {
    let (status, body) = get("/api/v1/blocks?timestamps=&block=3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "3": 120 }));

    let (status, body) = get("/api/v1/blocks?timestamps=,,&blockNumber=5&chain=solana").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "5": 1_005 }));
}

#[tokio::test]
async fn test_malformed_block_is_bad_request() {
    let (status, _) = get("/api/v1/blocks?block=latest").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_chain_is_bad_request() {
    let (status, _) = get("/api/v1/blocks?block=1&chain=bitcoin").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
