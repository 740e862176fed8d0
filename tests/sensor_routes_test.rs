// ABOUTME: Integration tests for the fridge telemetry endpoints
// ABOUTME: Covers uploads, device token checks, validation, and latest-reading lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{create_test_server_resources, MockMessaging};
use fridge_companion::{models::SensorReading, routes::SensorRoutes};
use helpers::axum_test::AxumTestRequest;
use serde_json::json;

const TOKEN_HEADER: &str = "x-device-token";

async fn sensor_router(token: Option<&str>) -> axum::Router {
    let resources = create_test_server_resources(Arc::new(MockMessaging::new()), token)
        .await
        .unwrap();
    SensorRoutes::routes(resources)
}

#[tokio::test]
async fn test_upload_and_read_latest() {
    let router = sensor_router(None).await;

    let stored: SensorReading = AxumTestRequest::post("/api/sensors/readings")
        .json(&json!({ "device_id": "fridge-01", "temperature": 3.5, "humidity": 61.0 }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    assert_eq!(stored.device_id, "fridge-01");
    assert!((stored.temperature - 3.5).abs() < f64::EPSILON);

    AxumTestRequest::post("/api/sensors/readings")
        .json(&json!({ "device_id": "fridge-01", "temperature": 5.0, "humidity": 58.0 }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let latest: SensorReading = AxumTestRequest::get("/api/devices/fridge-01/readings/latest")
        .send(router)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!((latest.temperature - 5.0).abs() < f64::EPSILON);
    assert!((latest.humidity - 58.0).abs() < f64::EPSILON);
    assert!(latest.id > stored.id);
}

#[tokio::test]
async fn test_latest_for_unknown_device() {
    let router = sensor_router(None).await;

    let body: serde_json::Value = AxumTestRequest::get("/api/devices/nobody/readings/latest")
        .send(router)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();

    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
    assert_eq!(body["error"]["details"]["device_id"], "nobody");
}

#[tokio::test]
async fn test_upload_requires_token_when_configured() {
    let router = sensor_router(Some("device-secret")).await;
    let reading = json!({ "device_id": "fridge-02", "temperature": 4.0, "humidity": 50.0 });

    AxumTestRequest::post("/api/sensors/readings")
        .json(&reading)
        .send(router.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    AxumTestRequest::post("/api/sensors/readings")
        .header(TOKEN_HEADER, "guess")
        .json(&reading)
        .send(router.clone())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    AxumTestRequest::post("/api/sensors/readings")
        .header(TOKEN_HEADER, "device-secret")
        .json(&reading)
        .send(router)
        .await
        .assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_invalid_reading_is_rejected() {
    let router = sensor_router(None).await;

    AxumTestRequest::post("/api/sensors/readings")
        .json(&json!({ "device_id": "fridge-03", "temperature": 4.0, "humidity": 140.0 }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::post("/api/sensors/readings")
        .json(&json!({ "device_id": "  ", "temperature": 4.0, "humidity": 40.0 }))
        .send(router.clone())
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    AxumTestRequest::get("/api/devices/fridge-03/readings/latest")
        .send(router)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_first_upload_registers_device() {
    let resources = create_test_server_resources(Arc::new(MockMessaging::new()), None)
        .await
        .unwrap();

    AxumTestRequest::post("/api/sensors/readings")
        .json(&json!({ "device_id": "fridge-04", "temperature": 2.0, "humidity": 45.0 }))
        .send(SensorRoutes::routes(Arc::clone(&resources)))
        .await
        .assert_status(StatusCode::CREATED);

    let device = resources
        .database
        .get_device("fridge-04")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(device.description, "auto-registered");
}
