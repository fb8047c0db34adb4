// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/nightlatch-rs

//! Nightlatch - Home Security Controller
//!
//! Command-line front-end over the alarm decision engine. Each invocation
//! runs one engine operation against the configured repository, so the
//! system state survives between calls when the database is enabled.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use uuid::Uuid;

use nightlatch::{
    ArmingStatus, CameraFrame, Config, DemoClassifier, LogListener, MemoryRepository,
    SecurityEngine, SecurityRepository, Sensor, SensorKind, SqliteRepository, VERSION,
};

/// Nightlatch - Home Security Controller
#[derive(Parser, Debug)]
#[command(name = "nightlatch")]
#[command(author = "bad-antics")]
#[command(version = VERSION)]
#[command(about = "Home security controller - alarm decision engine")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,

    /// Print results as JSON
    #[arg(long)]
    json: bool,

    /// Data directory override
    #[arg(long)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show arming status, alarm status, and the sensor roster
    Status,

    /// Arm the system (profile: home or away)
    Arm {
        /// Arming profile
        profile: String,
    },

    /// Disarm the system and clear any alarm
    Disarm,

    /// Manage the sensor roster
    Sensor {
        #[command(subcommand)]
        command: SensorCommand,
    },

    /// Run a camera frame through the cat classifier
    ProcessImage {
        /// Image file to classify; omitted means an empty demo frame
        path: Option<PathBuf>,
    },

    /// Show recent alarm transitions
    History {
        /// Maximum number of events
        #[arg(long)]
        limit: Option<usize>,
    },
}

#[derive(Subcommand, Debug)]
enum SensorCommand {
    /// Register a new sensor
    Add {
        /// Sensor label
        name: String,

        /// Sensor kind: door, window, or motion
        #[arg(long, default_value = "door")]
        kind: String,
    },

    /// Remove a sensor by id
    Remove {
        /// Sensor id
        id: Uuid,
    },

    /// List the roster
    List,

    /// Activate or deactivate a sensor (state: on or off)
    Set {
        /// Sensor id
        id: Uuid,

        /// New activation state
        state: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.trace {
        Level::TRACE
    } else if args.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    if let Some(data_dir) = args.data_dir.clone() {
        config.database.path = data_dir.join("nightlatch.db");
        config.data_dir = data_dir;
    }

    info!("Nightlatch v{}", VERSION);
    run(args, config)
}

fn run(args: Args, config: Config) -> Result<()> {
    // The history view reads the event journal directly; no engine needed.
    if let Command::History { limit } = &args.command {
        return show_history(&config, limit.unwrap_or(config.database.history_limit), args.json);
    }

    let repository: Box<dyn SecurityRepository> = if config.database.enabled {
        Box::new(SqliteRepository::open(&config.database.path)?)
    } else {
        Box::new(MemoryRepository::new())
    };

    let classifier = match config.engine.demo_seed {
        Some(seed) => DemoClassifier::seeded(seed),
        None => DemoClassifier::new(),
    };

    let mut engine = SecurityEngine::new(
        repository,
        Box::new(classifier),
        config.engine.cat_confidence_threshold,
    );
    engine.add_status_listener(Box::new(LogListener));

    match args.command {
        Command::Status => show_status(&engine, args.json)?,

        Command::Arm { profile } => {
            let status = match profile.as_str() {
                "home" => ArmingStatus::ArmedHome,
                "away" => ArmingStatus::ArmedAway,
                other => bail!("unrecognized arming profile {other:?} (expected home or away)"),
            };
            engine.set_arming_status(status)?;
            show_status(&engine, args.json)?;
        }

        Command::Disarm => {
            engine.set_arming_status(ArmingStatus::Disarmed)?;
            show_status(&engine, args.json)?;
        }

        Command::Sensor { command } => run_sensor(&mut engine, command, args.json)?,

        Command::ProcessImage { path } => {
            if !config.engine.demo_mode {
                bail!("no camera service configured; enable engine.demo_mode");
            }
            let frame = match path {
                Some(path) => CameraFrame::from_file(&path)?,
                None => CameraFrame::default(),
            };
            engine.process_image(&frame)?;
            show_status(&engine, args.json)?;
        }

        Command::History { .. } => unreachable!("handled above"),
    }

    Ok(())
}

fn run_sensor(engine: &mut SecurityEngine, command: SensorCommand, json: bool) -> Result<()> {
    match command {
        SensorCommand::Add { name, kind } => {
            let kind: SensorKind = kind.parse()?;
            let sensor = Sensor::new(&name, kind);
            let id = sensor.id;
            engine.add_sensor(sensor)?;
            println!("registered sensor {id}");
        }

        SensorCommand::Remove { id } => {
            engine.remove_sensor(id)?;
            println!("removed sensor {id}");
        }

        SensorCommand::List => {
            let sensors = engine.sensors()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&sensors)?);
            } else if sensors.is_empty() {
                println!("no sensors registered");
            } else {
                for sensor in sensors {
                    println!("{}  {}", sensor.id, sensor);
                }
            }
        }

        SensorCommand::Set { id, state } => {
            let active = match state.as_str() {
                "on" => true,
                "off" => false,
                other => bail!("unrecognized sensor state {other:?} (expected on or off)"),
            };
            engine.change_sensor_activation(id, active)?;
            println!("alarm status: {}", engine.alarm_status()?.description());
        }
    }

    Ok(())
}

fn show_status(engine: &SecurityEngine, json: bool) -> Result<()> {
    let arming = engine.arming_status()?;
    let alarm = engine.alarm_status()?;
    let sensors = engine.sensors()?;

    if json {
        let status = serde_json::json!({
            "arming_status": arming,
            "alarm_status": alarm,
            "sensors": sensors,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!("{}", arming.description());
    println!("{}", alarm.description());
    if sensors.is_empty() {
        println!("no sensors registered");
    } else {
        for sensor in sensors {
            println!("  {}  {}", sensor.id, sensor);
        }
    }

    Ok(())
}

fn show_history(config: &Config, limit: usize, json: bool) -> Result<()> {
    if !config.database.enabled {
        bail!("history requires the database; enable database.enabled");
    }

    let repository = SqliteRepository::open(&config.database.path)?;
    let events = repository.events(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&events)?);
        return Ok(());
    }

    if events.is_empty() {
        println!("no alarm transitions recorded");
    } else {
        for event in events {
            println!(
                "{}  {}",
                event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                event.status.description()
            );
        }
    }

    Ok(())
}
