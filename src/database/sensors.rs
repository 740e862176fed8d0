// ABOUTME: Telemetry database operations for fridge sensor devices
// ABOUTME: Stores temperature and humidity readings and answers latest-reading queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fridge Companion Contributors

use super::{decode_timestamp, encode_timestamp, storage_timestamp, Database};
use crate::constants::sensors::AUTO_REGISTERED_DESCRIPTION;
use crate::errors::{AppError, AppResult};
use crate::models::{Device, NewSensorReading, SensorReading};
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

impl Database {
    /// Create the devices and readings tables
    pub(super) async fn migrate_sensors(&self) -> AppResult<()> {
        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS devices (
                device_id TEXT PRIMARY KEY,
                description TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            r"
            CREATE TABLE IF NOT EXISTS sensor_readings (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                device_id TEXT NOT NULL REFERENCES devices(device_id) ON DELETE CASCADE,
                temperature REAL NOT NULL,
                humidity REAL NOT NULL,
                recorded_at TEXT NOT NULL
            )
            ",
        )
        .await?;

        self.execute_schema(
            "CREATE INDEX IF NOT EXISTS idx_sensor_readings_device_time \
             ON sensor_readings(device_id, recorded_at)",
        )
        .await
    }

    /// Look up a device
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn get_device(&self, device_id: &str) -> AppResult<Option<Device>> {
        let row = sqlx::query(
            "SELECT device_id, description, created_at FROM devices WHERE device_id = $1",
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch device: {e}")))?;

        row.map(|row| {
            let created_at: String = row.get("created_at");
            Ok(Device {
                device_id: row.get("device_id"),
                description: row.get("description"),
                created_at: decode_timestamp(&created_at)?,
            })
        })
        .transpose()
    }

    /// Store a reading, registering its device on first upload
    ///
    /// # Errors
    ///
    /// Returns an error if either write fails
    pub async fn record_sensor_reading(
        &self,
        reading: &NewSensorReading,
        now: DateTime<Utc>,
    ) -> AppResult<SensorReading> {
        let now = storage_timestamp(now);
        let recorded_at = encode_timestamp(now);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

        sqlx::query(
            "INSERT INTO devices (device_id, description, created_at) VALUES ($1, $2, $3) \
             ON CONFLICT(device_id) DO NOTHING",
        )
        .bind(&reading.device_id)
        .bind(AUTO_REGISTERED_DESCRIPTION)
        .bind(&recorded_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to register device: {e}")))?;

        let result = sqlx::query(
            r"
            INSERT INTO sensor_readings (device_id, temperature, humidity, recorded_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(&reading.device_id)
        .bind(reading.temperature)
        .bind(reading.humidity)
        .bind(&recorded_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::database(format!("Failed to store sensor reading: {e}")))?;

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit sensor reading: {e}")))?;

        Ok(SensorReading {
            id: result.last_insert_rowid(),
            device_id: reading.device_id.clone(),
            temperature: reading.temperature,
            humidity: reading.humidity,
            recorded_at: now,
        })
    }

    /// Newest reading for a device
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn latest_sensor_reading(&self, device_id: &str) -> AppResult<Option<SensorReading>> {
        let row = sqlx::query(
            r"
            SELECT id, device_id, temperature, humidity, recorded_at
            FROM sensor_readings
            WHERE device_id = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(device_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to fetch sensor reading: {e}")))?;

        row.as_ref().map(row_to_reading).transpose()
    }
}

fn row_to_reading(row: &SqliteRow) -> AppResult<SensorReading> {
    let recorded_at: String = row.get("recorded_at");
    Ok(SensorReading {
        id: row.get("id"),
        device_id: row.get("device_id"),
        temperature: row.get("temperature"),
        humidity: row.get("humidity"),
        recorded_at: decode_timestamp(&recorded_at)?,
    })
}
