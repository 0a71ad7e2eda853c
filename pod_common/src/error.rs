//! Shared error types for sensor and actuator facades (§6, §7).

use thiserror::Error;

/// Error returned by a sensor-read facade call.
///
/// A typed `Result` at the trait boundary in place of the bare `int`
/// return convention (0 = success, negative = failure) this facade
/// otherwise mirrors.
#[derive(Debug, Clone, Error)]
pub enum SensorError {
    #[error("sensor read failed: {0}")]
    ReadFailed(String),

    #[error("sensor not connected")]
    NotConnected,
}

/// Error returned by a GPIO facade call (`enableGpio`/`setGpioDirection`/`setGpioValue`).
#[derive(Debug, Clone, Error)]
pub enum GpioError {
    #[error("failed to enable GPIO {pin}: {reason}")]
    EnableFailed { pin: u32, reason: String },

    #[error("failed to set direction for GPIO {pin}: {reason}")]
    DirectionFailed { pin: u32, reason: String },

    #[error("failed to write GPIO {pin}: {reason}")]
    WriteFailed { pin: u32, reason: String },
}
