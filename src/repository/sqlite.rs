// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! SQLite-backed repository

use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::SecurityRepository;
use crate::engine::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

const ARMING_KEY: &str = "arming_status";
const ALARM_KEY: &str = "alarm_status";

/// A persisted alarm-status transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlarmEvent {
    /// Event id
    pub id: String,
    /// When the transition was recorded
    pub timestamp: DateTime<Utc>,
    /// The status the system moved to
    pub status: AlarmStatus,
}

/// Durable repository over a single SQLite file
///
/// Statuses live in a key/value `state` table, the roster in `sensors`,
/// and every alarm-status write is appended to `events` for the history
/// view on the control panel.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Open or create the database file
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            r#"
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        "#,
        )?;

        let repo = Self { conn };
        repo.create_tables()?;

        info!("Repository opened at {:?}", path);
        Ok(repo)
    }

    /// Throwaway database for tests
    pub fn open_in_memory() -> Result<Self> {
        let repo = Self {
            conn: Connection::open_in_memory()?,
        };
        repo.create_tables()?;
        Ok(repo)
    }

    fn create_tables(&self) -> Result<()> {
        self.conn.execute_batch(
            r#"
            -- Single-row-per-key system state (arming + alarm status)
            CREATE TABLE IF NOT EXISTS state (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            );

            -- Sensor roster
            CREATE TABLE IF NOT EXISTS sensors (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                kind TEXT NOT NULL,
                active INTEGER NOT NULL DEFAULT 0
            );

            -- Alarm-status transition log
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                timestamp TEXT NOT NULL,
                alarm_status TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_timestamp ON events(timestamp);
        "#,
        )?;

        Ok(())
    }

    fn state(&self, key: &str) -> Result<Option<String>> {
        let result: Result<String, _> = self.conn.query_row(
            "SELECT value FROM state WHERE key = ?1",
            params![key],
            |row| row.get(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_state(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO state (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    /// Recent alarm transitions, newest first
    pub fn events(&self, limit: usize) -> Result<Vec<AlarmEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, timestamp, alarm_status FROM events
             ORDER BY timestamp DESC LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut events = Vec::new();
        for row in rows {
            let (id, timestamp, status) = row?;
            events.push(AlarmEvent {
                id,
                timestamp: DateTime::parse_from_rfc3339(&timestamp)?.with_timezone(&Utc),
                status: status.parse()?,
            });
        }

        Ok(events)
    }

    fn row_to_sensor(id: String, name: String, kind: String, active: bool) -> Result<Sensor> {
        Ok(Sensor {
            id: Uuid::parse_str(&id)?,
            name,
            kind: kind.parse()?,
            active,
        })
    }
}

impl SecurityRepository for SqliteRepository {
    fn arming_status(&self) -> Result<ArmingStatus> {
        match self.state(ARMING_KEY)? {
            Some(value) => Ok(value.parse()?),
            None => Ok(ArmingStatus::default()),
        }
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        self.set_state(ARMING_KEY, status.as_str())
    }

    fn alarm_status(&self) -> Result<AlarmStatus> {
        match self.state(ALARM_KEY)? {
            Some(value) => Ok(value.parse()?),
            None => Ok(AlarmStatus::default()),
        }
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.set_state(ALARM_KEY, status.as_str())?;

        self.conn.execute(
            "INSERT INTO events (id, timestamp, alarm_status) VALUES (?1, ?2, ?3)",
            params![
                Uuid::new_v4().to_string(),
                Utc::now().to_rfc3339(),
                status.as_str()
            ],
        )?;

        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, kind, active FROM sensors ORDER BY name")?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
            ))
        })?;

        let mut sensors = Vec::new();
        for row in rows {
            let (id, name, kind, active) = row?;
            sensors.push(Self::row_to_sensor(id, name, kind, active)?);
        }

        Ok(sensors)
    }

    fn sensor(&self, id: Uuid) -> Result<Option<Sensor>> {
        let result = self.conn.query_row(
            "SELECT id, name, kind, active FROM sensors WHERE id = ?1",
            params![id.to_string()],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, bool>(3)?,
                ))
            },
        );

        match result {
            Ok((id, name, kind, active)) => Ok(Some(Self::row_to_sensor(id, name, kind, active)?)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        self.conn.execute(
            "INSERT OR IGNORE INTO sensors (id, name, kind, active) VALUES (?1, ?2, ?3, ?4)",
            params![
                sensor.id.to_string(),
                sensor.name,
                sensor.kind.as_str(),
                sensor.active
            ],
        )?;
        Ok(())
    }

    fn update_sensor(&mut self, sensor: Sensor) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO sensors (id, name, kind, active) VALUES (?1, ?2, ?3, ?4)",
            params![
                sensor.id.to_string(),
                sensor.name,
                sensor.kind.as_str(),
                sensor.active
            ],
        )?;
        Ok(())
    }

    fn remove_sensor(&mut self, id: Uuid) -> Result<()> {
        self.conn
            .execute("DELETE FROM sensors WHERE id = ?1", params![id.to_string()])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorKind;

    #[test]
    fn test_fresh_database_defaults() {
        let repo = SqliteRepository::open_in_memory().unwrap();
        assert_eq!(repo.arming_status().unwrap(), ArmingStatus::Disarmed);
        assert_eq!(repo.alarm_status().unwrap(), AlarmStatus::NoAlarm);
        assert!(repo.sensors().unwrap().is_empty());
        assert!(repo.events(10).unwrap().is_empty());
    }

    #[test]
    fn test_status_round_trip() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_arming_status(ArmingStatus::ArmedHome).unwrap();
        repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();

        assert_eq!(repo.arming_status().unwrap(), ArmingStatus::ArmedHome);
        assert_eq!(repo.alarm_status().unwrap(), AlarmStatus::PendingAlarm);
    }

    #[test]
    fn test_sensor_round_trip() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        let sensor = Sensor::new("front door", SensorKind::Door);
        let id = sensor.id;

        repo.add_sensor(sensor.clone()).unwrap();
        let stored = repo.sensor(id).unwrap().unwrap();
        assert_eq!(stored, sensor);
        assert_eq!(stored.name, "front door");
        assert_eq!(stored.kind, SensorKind::Door);
        assert!(!stored.active);

        let mut tripped = sensor.clone();
        tripped.active = true;
        repo.update_sensor(tripped).unwrap();
        assert!(repo.sensor(id).unwrap().unwrap().active);

        // Duplicate add keeps the stored flag
        repo.add_sensor(sensor).unwrap();
        assert!(repo.sensor(id).unwrap().unwrap().active);

        repo.remove_sensor(id).unwrap();
        repo.remove_sensor(id).unwrap();
        assert!(repo.sensor(id).unwrap().is_none());
    }

    #[test]
    fn test_alarm_writes_are_journaled() {
        let mut repo = SqliteRepository::open_in_memory().unwrap();
        repo.set_alarm_status(AlarmStatus::PendingAlarm).unwrap();
        repo.set_alarm_status(AlarmStatus::Alarm).unwrap();
        repo.set_alarm_status(AlarmStatus::NoAlarm).unwrap();

        let events = repo.events(10).unwrap();
        assert_eq!(events.len(), 3);

        let statuses: Vec<AlarmStatus> = events.iter().map(|e| e.status).collect();
        assert!(statuses.contains(&AlarmStatus::PendingAlarm));
        assert!(statuses.contains(&AlarmStatus::Alarm));
        assert!(statuses.contains(&AlarmStatus::NoAlarm));

        assert_eq!(repo.events(2).unwrap().len(), 2);
    }
}
