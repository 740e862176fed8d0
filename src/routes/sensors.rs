// ABOUTME: Fridge telemetry endpoints for microcontroller uploads and latest-reading queries
// ABOUTME: Uploads may be guarded by a shared device token
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;
use subtle::ConstantTimeEq;
use tracing::info;

use crate::constants::sensors::DEVICE_TOKEN_HEADER;
use crate::errors::AppError;
use crate::models::NewSensorReading;
use crate::server::ServerResources;

/// Sensor telemetry routes
pub struct SensorRoutes;

impl SensorRoutes {
    /// Create the telemetry routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/sensors/readings", post(Self::handle_upload))
            .route(
                "/api/devices/:device_id/readings/latest",
                get(Self::handle_latest),
            )
            .with_state(resources)
    }

    fn authorize_device(resources: &ServerResources, headers: &HeaderMap) -> Result<(), AppError> {
        let Some(expected) = resources.config.sensors.api_token.as_deref() else {
            return Ok(());
        };

        let provided = headers
            .get(DEVICE_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::auth_invalid("Missing device token"))?;

        if bool::from(provided.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(AppError::auth_invalid("Invalid device token"))
        }
    }

    async fn handle_upload(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(reading): Json<NewSensorReading>,
    ) -> Result<Response, AppError> {
        Self::authorize_device(&resources, &headers)?;
        reading.validate().map_err(AppError::invalid_input)?;

        let stored = resources
            .database
            .record_sensor_reading(&reading, Utc::now())
            .await?;

        info!(
            device_id = %stored.device_id,
            temperature = stored.temperature,
            humidity = stored.humidity,
            "Sensor reading stored"
        );
        Ok((StatusCode::CREATED, Json(stored)).into_response())
    }

    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        Path(device_id): Path<String>,
    ) -> Result<Response, AppError> {
        let reading = resources
            .database
            .latest_sensor_reading(&device_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Sensor reading")
                    .with_details(json!({ "device_id": device_id }))
            })?;

        Ok(Json(reading).into_response())
    }
}
