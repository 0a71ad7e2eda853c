//! Error types for the control-loop crate (§6, §7).
//!
//! Mirrors the ambient error style of `pod_common::error`: `thiserror`-derived
//! enums at each module seam, `Display` via `#[error("...")]`, propagated with
//! `?` rather than unwrapped.

use thiserror::Error;

use pod_common::error::GpioError;

/// Errors loading and validating `PodConfig` (§6 external interfaces, §7 boot fault).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),

    #[error("GPIO pin {0} is assigned to more than one solenoid channel")]
    DuplicatePin(u32),
}

/// Boot-time faults that abort startup before the control loop runs (§7 "Boot fault").
#[derive(Debug, Error)]
pub enum BootError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("GPIO init failed: {0}")]
    Gpio(#[from] GpioError),

    #[error("logging collaborator failed to connect: {0}")]
    LoggingHandshake(String),

    #[error("command collaborator failed to connect: {0}")]
    CommandHandshake(String),

    #[error("IMU enumeration failed: {0}")]
    ImuEnumeration(String),

    #[error("failed to install signal handler: {0}")]
    SignalHandler(String),

    #[error("real-time scheduling setup failed: {0}")]
    RtSetup(String),
}

/// Errors raised while the control loop is running.
///
/// A sensor transient (IMU) or sensor hard failure (skate/lateral) is not
/// represented here — those are handled inline by forcing `Emergency`
/// (§7 "Sensor transient"/"Sensor hard"), not surfaced as a `CycleError`.
/// Only a failure the loop cannot route through the mode machine — a GPIO
/// write failing outright — escalates.
#[derive(Debug, Error)]
pub enum CycleError {
    #[error("actuator write failed: {0}")]
    Gpio(#[from] GpioError),

    #[error("real-time scheduling setup failed: {0}")]
    RtSetup(String),
}
