// ABOUTME: Fridge telemetry models for the temperature and humidity sensor
// ABOUTME: SensorReading, the upload payload, and the registered Device
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored telemetry sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Row id
    pub id: i64,
    /// Reporting device
    pub device_id: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
    /// Server-side receive time
    pub recorded_at: DateTime<Utc>,
}

/// Upload body posted by the device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSensorReading {
    /// Reporting device
    pub device_id: String,
    /// Temperature in degrees Celsius
    pub temperature: f64,
    /// Relative humidity in percent
    pub humidity: f64,
}

impl NewSensorReading {
    /// Check that the payload is usable
    ///
    /// # Errors
    ///
    /// Returns a description of the first problem found
    pub fn validate(&self) -> Result<(), String> {
        if self.device_id.trim().is_empty() {
            return Err("device_id must not be empty".into());
        }
        if !self.temperature.is_finite() {
            return Err("temperature must be a finite number".into());
        }
        if !self.humidity.is_finite() || !(0.0..=100.0).contains(&self.humidity) {
            return Err("humidity must be between 0 and 100".into());
        }
        Ok(())
    }
}

/// A registered telemetry device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    /// Device id (unique)
    pub device_id: String,
    /// Free-form description
    pub description: String,
    /// First time the device was seen
    pub created_at: DateTime<Utc>,
}
