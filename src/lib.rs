// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Nightlatch - Home Security Controller Core
//!
//! The alarm-status decision engine of a home-security controller:
//! - Door, window, and motion sensors with binary activation state
//! - Three-level alarm escalation (no-alarm, pending, alarm)
//! - Image-based cat detection as an independent alarm trigger
//! - Pluggable persistence (in-memory or SQLite) behind a repository seam
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                   SecurityEngine                     │
//! ├──────────────────────────────────────────────────────┤
//! │  ┌────────────┐  ┌────────────────┐  ┌────────────┐  │
//! │  │  Sensor    │→ │  Alarm Rules   │→ │  Listener  │  │
//! │  │  Roster    │  │ (state machine)│  │  Registry  │  │
//! │  └────────────┘  └────────────────┘  └────────────┘  │
//! │        ↓                 ↓                  ↓        │
//! │  ┌────────────────────────────┐  ┌────────────────┐  │
//! │  │    SecurityRepository      │  │ ImageClassifier│  │
//! │  │    (memory / SQLite)       │  │   (black box)  │  │
//! │  └────────────────────────────┘  └────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The engine holds no state of its own: arming status, alarm status, and
//! the sensor roster live behind the repository, and every public call
//! fully resolves its status transition before returning.

#![warn(missing_docs)]
#![allow(dead_code)]

pub mod config;
pub mod engine;
pub mod image;
pub mod repository;
pub mod sensors;

// Re-exports for convenience
pub use config::Config;
pub use engine::{
    AlarmStatus, ArmingStatus, EngineError, ListenerHandle, LogListener, SecurityEngine,
    StatusListener,
};
pub use image::{CameraFrame, DemoClassifier, ImageClassifier};
pub use repository::{AlarmEvent, MemoryRepository, SecurityRepository, SqliteRepository};
pub use sensors::{Sensor, SensorKind};

/// Nightlatch version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Nightlatch name
pub const NAME: &str = "Nightlatch";
