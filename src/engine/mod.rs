// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Security engine - the alarm-status decision rules

mod listeners;
mod status;

pub use listeners::{ListenerHandle, ListenerRegistry, LogListener, StatusListener};
pub use status::{AlarmStatus, ArmingStatus, ParseStatusError};

use anyhow::Result;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::image::{CameraFrame, ImageClassifier};
use crate::repository::SecurityRepository;
use crate::sensors::Sensor;

/// Engine-level failures
#[derive(Debug, Error)]
pub enum EngineError {
    /// A sensor id the repository has never seen was handed to
    /// [`SecurityEngine::change_sensor_activation`]
    #[error("unknown sensor {0}")]
    UnknownSensor(Uuid),
}

/// The alarm-status decision engine
///
/// Owns no security state itself: arming status, alarm status, and the
/// sensor roster live behind the injected repository, and the classifier
/// verdict is consulted only while processing a frame. Every alarm-status
/// mutation is persisted exactly once and broadcast to listeners exactly
/// once; decision paths that resolve to "no change" write nothing.
pub struct SecurityEngine {
    repository: Box<dyn SecurityRepository>,
    classifier: Box<dyn ImageClassifier>,
    listeners: ListenerRegistry,
    cat_confidence_threshold: f32,
}

impl SecurityEngine {
    /// Build an engine over its two collaborators
    pub fn new(
        repository: Box<dyn SecurityRepository>,
        classifier: Box<dyn ImageClassifier>,
        cat_confidence_threshold: f32,
    ) -> Self {
        Self {
            repository,
            classifier,
            listeners: ListenerRegistry::new(),
            cat_confidence_threshold,
        }
    }

    /// Current arming status
    pub fn arming_status(&self) -> Result<ArmingStatus> {
        self.repository.arming_status()
    }

    /// Current alarm status
    pub fn alarm_status(&self) -> Result<AlarmStatus> {
        self.repository.alarm_status()
    }

    /// Snapshot of the sensor roster
    pub fn sensors(&self) -> Result<Vec<Sensor>> {
        self.repository.sensors()
    }

    /// Register a status listener
    pub fn add_status_listener(&mut self, listener: Box<dyn StatusListener>) -> ListenerHandle {
        self.listeners.add(listener)
    }

    /// Drop a status listener; a stale handle is a no-op
    pub fn remove_status_listener(&mut self, handle: ListenerHandle) -> bool {
        self.listeners.remove(handle)
    }

    /// Register a sensor with the repository
    ///
    /// Adding a sensor that is already on the roster is tolerated.
    pub fn add_sensor(&mut self, sensor: Sensor) -> Result<()> {
        debug!(sensor = %sensor, "adding sensor");
        self.repository.add_sensor(sensor)?;
        self.listeners.notify_sensor_state();
        Ok(())
    }

    /// Remove a sensor from the repository
    ///
    /// Removing an id that is not on the roster is tolerated.
    pub fn remove_sensor(&mut self, sensor_id: Uuid) -> Result<()> {
        debug!(%sensor_id, "removing sensor");
        self.repository.remove_sensor(sensor_id)?;
        self.listeners.notify_sensor_state();
        Ok(())
    }

    /// Change the arming status
    ///
    /// Disarming clears any alarm unconditionally. Arming (either profile)
    /// resets every sensor to inactive through direct repository writes,
    /// so the resets never walk the activation rules below.
    pub fn set_arming_status(&mut self, status: ArmingStatus) -> Result<()> {
        match status {
            ArmingStatus::Disarmed => self.set_alarm_status(AlarmStatus::NoAlarm)?,
            ArmingStatus::ArmedHome | ArmingStatus::ArmedAway => self.reset_sensors()?,
        }
        self.repository.set_arming_status(status)?;
        info!(status = status.as_str(), "arming status changed");
        Ok(())
    }

    /// Record a sensor's new activation flag and run the escalation rules
    ///
    /// The flag is always persisted, whatever the alarm outcome. The status
    /// rules are:
    /// - while the alarm is sounding, sensor churn is inert
    /// - a sensor going active escalates no-alarm → pending → alarm, unless
    ///   the system is disarmed
    /// - the last active sensor going inactive during pending clears back to
    ///   no-alarm
    /// - re-activating an already-active sensor during pending escalates to
    ///   alarm; this branch is deliberately separate from the
    ///   deactivate-while-inactive case below, which never touches the status
    pub fn change_sensor_activation(&mut self, sensor_id: Uuid, active: bool) -> Result<()> {
        let mut sensor = self
            .repository
            .sensor(sensor_id)?
            .ok_or(EngineError::UnknownSensor(sensor_id))?;
        let was_active = sensor.active;

        sensor.active = active;
        self.repository.update_sensor(sensor)?;

        if self.repository.alarm_status()? != AlarmStatus::Alarm {
            match (was_active, active) {
                (false, true) => self.handle_sensor_activated()?,
                (true, false) => self.handle_sensor_deactivated()?,
                (true, true) => {
                    if self.repository.alarm_status()? == AlarmStatus::PendingAlarm {
                        self.set_alarm_status(AlarmStatus::Alarm)?;
                    }
                }
                (false, false) => {}
            }
        }

        if was_active != active {
            self.listeners.notify_sensor_state();
        }
        Ok(())
    }

    /// Run a camera frame through the classifier and apply the cat rules
    ///
    /// A cat sighting while armed-home sounds the alarm regardless of sensor
    /// state. A cat-free frame clears the alarm only when no sensor is
    /// active. The verdict reaches listeners either way.
    pub fn process_image(&mut self, frame: &CameraFrame) -> Result<()> {
        let cat_detected = self
            .classifier
            .contains_cat(frame, self.cat_confidence_threshold)?;
        debug!(cat_detected, "frame classified");

        if cat_detected {
            if self.repository.arming_status()? == ArmingStatus::ArmedHome {
                self.set_alarm_status(AlarmStatus::Alarm)?;
            }
        } else if !self.any_sensor_active()? {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }

        self.listeners.notify_cat_detected(cat_detected);
        Ok(())
    }

    fn handle_sensor_activated(&mut self) -> Result<()> {
        if !self.repository.arming_status()?.is_armed() {
            return Ok(());
        }
        match self.repository.alarm_status()? {
            AlarmStatus::NoAlarm => self.set_alarm_status(AlarmStatus::PendingAlarm),
            AlarmStatus::PendingAlarm => self.set_alarm_status(AlarmStatus::Alarm),
            AlarmStatus::Alarm => Ok(()),
        }
    }

    fn handle_sensor_deactivated(&mut self) -> Result<()> {
        if self.repository.alarm_status()? == AlarmStatus::PendingAlarm
            && !self.any_sensor_active()?
        {
            self.set_alarm_status(AlarmStatus::NoAlarm)?;
        }
        Ok(())
    }

    fn any_sensor_active(&self) -> Result<bool> {
        Ok(self.repository.sensors()?.iter().any(|s| s.active))
    }

    fn reset_sensors(&mut self) -> Result<()> {
        let mut changed = false;
        for mut sensor in self.repository.sensors()? {
            if sensor.active {
                sensor.active = false;
                self.repository.update_sensor(sensor)?;
                changed = true;
            }
        }
        if changed {
            self.listeners.notify_sensor_state();
        }
        Ok(())
    }

    fn set_alarm_status(&mut self, status: AlarmStatus) -> Result<()> {
        self.repository.set_alarm_status(status)?;
        self.listeners.notify_alarm_status(status);
        info!(status = status.as_str(), "alarm status changed");
        Ok(())
    }
}
