// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Sensor roster - door, window, and motion inputs

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Kind of physical input a sensor watches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    /// Door contact sensor
    Door,
    /// Window contact sensor
    Window,
    /// Passive motion detector
    Motion,
}

impl SensorKind {
    /// Stable lowercase label, also the persisted form
    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::Door => "door",
            SensorKind::Window => "window",
            SensorKind::Motion => "motion",
        }
    }
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored or user-supplied sensor kind label is unrecognized
#[derive(Debug, Error)]
#[error("unrecognized sensor kind {0:?}")]
pub struct ParseSensorKindError(String);

impl FromStr for SensorKind {
    type Err = ParseSensorKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "door" => Ok(SensorKind::Door),
            "window" => Ok(SensorKind::Window),
            "motion" => Ok(SensorKind::Motion),
            other => Err(ParseSensorKindError(other.to_string())),
        }
    }
}

/// A single security sensor
///
/// Identity is the generated `id`; two sensors with the same name and kind
/// are still distinct roster entries. The activation flag is owned by the
/// repository and mutated only through the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    /// Unique key for roster lookups
    pub id: Uuid,
    /// Human-readable label shown on the control panel
    pub name: String,
    /// What the sensor watches
    pub kind: SensorKind,
    /// Whether the sensor is currently tripped
    pub active: bool,
}

impl Sensor {
    /// Create a new, inactive sensor
    pub fn new(name: &str, kind: SensorKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            active: false,
        }
    }
}

impl PartialEq for Sensor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Sensor {}

impl Hash for Sensor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.name,
            self.kind,
            if self.active { "ACTIVE" } else { "idle" }
        )
    }
}
