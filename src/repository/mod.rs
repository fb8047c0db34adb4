// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Persistence seam - arming status, alarm status, and the sensor roster

mod sqlite;

pub use sqlite::{AlarmEvent, SqliteRepository};

use std::collections::HashMap;

use anyhow::Result;
use uuid::Uuid;

use crate::engine::{AlarmStatus, ArmingStatus};
use crate::sensors::Sensor;

/// Storage owned by the surrounding application, consumed by the engine
///
/// The engine is the only writer once it is in use; backends just hold the
/// current values and the roster. `add_sensor` tolerates an id already on
/// the roster and `remove_sensor` tolerates an absent one.
pub trait SecurityRepository {
    /// Current arming status
    fn arming_status(&self) -> Result<ArmingStatus>;

    /// Persist a new arming status
    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()>;

    /// Current alarm status
    fn alarm_status(&self) -> Result<AlarmStatus>;

    /// Persist a new alarm status
    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()>;

    /// Snapshot of the full roster
    fn sensors(&self) -> Result<Vec<Sensor>>;

    /// Look up one sensor by id
    fn sensor(&self, id: Uuid) -> Result<Option<Sensor>>;

    /// Register a sensor; keeps the existing entry on duplicate id
    fn add_sensor(&mut self, sensor: Sensor) -> Result<()>;

    /// Overwrite a sensor's stored state
    fn update_sensor(&mut self, sensor: Sensor) -> Result<()>;

    /// Drop a sensor from the roster
    fn remove_sensor(&mut self, id: Uuid) -> Result<()>;
}

/// In-process repository
///
/// Backs the engine when the database is disabled, and test setups that
/// want persistence semantics without a file on disk.
#[derive(Debug, Default)]
pub struct MemoryRepository {
    arming: ArmingStatus,
    alarm: AlarmStatus,
    sensors: HashMap<Uuid, Sensor>,
}

impl MemoryRepository {
    /// Fresh repository: disarmed, no alarm, empty roster
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecurityRepository for MemoryRepository {
    fn arming_status(&self) -> Result<ArmingStatus> {
        Ok(self.arming)
    }

    fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        self.arming = status;
        Ok(())
    }

    fn alarm_status(&self) -> Result<AlarmStatus> {
        Ok(self.alarm)
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.alarm = status;
        Ok(())
    }

    fn sensors(&self) -> Result<Vec<Sensor>> {
        Ok(self.sensors.values().cloned().collect())
    }

    fn sensor(&self, id: Uuid) -> Result<Option<Sensor>> {
        Ok(self.sensors.get(&id).cloned())
    }

    fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        self.sensors.entry(sensor.id).or_insert(sensor);
        Ok(())
    }

    fn update_sensor(&mut self, sensor: Sensor) -> Result<()> {
        self.sensors.insert(sensor.id, sensor);
        Ok(())
    }

    fn remove_sensor(&mut self, id: Uuid) -> Result<()> {
        self.sensors.remove(&id);
        Ok(())
    }
}
