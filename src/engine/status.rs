// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Arming and alarm status types

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Whether the system is disarmed or armed, and in which profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArmingStatus {
    /// Sensors are ignored and any alarm is cleared
    #[default]
    Disarmed,
    /// Armed with occupants at home; camera cat-detection is live
    ArmedHome,
    /// Armed with the home empty
    ArmedAway,
}

impl ArmingStatus {
    /// Stable lowercase label, also the persisted form
    pub fn as_str(&self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "disarmed",
            ArmingStatus::ArmedHome => "armed_home",
            ArmingStatus::ArmedAway => "armed_away",
        }
    }

    /// Control-panel description
    pub fn description(&self) -> &'static str {
        match self {
            ArmingStatus::Disarmed => "System disarmed",
            ArmingStatus::ArmedHome => "Armed - at home",
            ArmingStatus::ArmedAway => "Armed - away",
        }
    }

    /// True for either armed profile
    pub fn is_armed(&self) -> bool {
        !matches!(self, ArmingStatus::Disarmed)
    }
}

/// Three-level alarm escalation state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlarmStatus {
    /// Nothing to report
    #[default]
    NoAlarm,
    /// A sensor tripped while armed; one more trigger escalates
    PendingAlarm,
    /// The alarm is sounding
    Alarm,
}

impl AlarmStatus {
    /// Stable lowercase label, also the persisted form
    pub fn as_str(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "no_alarm",
            AlarmStatus::PendingAlarm => "pending_alarm",
            AlarmStatus::Alarm => "alarm",
        }
    }

    /// Control-panel description
    pub fn description(&self) -> &'static str {
        match self {
            AlarmStatus::NoAlarm => "Cool and good",
            AlarmStatus::PendingAlarm => "I'm in danger...",
            AlarmStatus::Alarm => "Awooga! Awooga!",
        }
    }
}

impl fmt::Display for ArmingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for AlarmStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a persisted status label is unrecognized
#[derive(Debug, Error)]
#[error("unrecognized status label {0:?}")]
pub struct ParseStatusError(String);

impl FromStr for ArmingStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disarmed" => Ok(ArmingStatus::Disarmed),
            "armed_home" => Ok(ArmingStatus::ArmedHome),
            "armed_away" => Ok(ArmingStatus::ArmedAway),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

impl FromStr for AlarmStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_alarm" => Ok(AlarmStatus::NoAlarm),
            "pending_alarm" => Ok(AlarmStatus::PendingAlarm),
            "alarm" => Ok(AlarmStatus::Alarm),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}
