//! Thin facades over the sensor/GPIO traits (§1 "external collaborators").
//!
//! The real IMU serial framing, BeagleBone GPIO sysfs driver, and TCP
//! command/telemetry server are out of scope for this crate. This module
//! supplies [`SimulationAdapter`], a canned-value implementation of
//! [`SensorReader`]/[`GpioWriter`]/[`ShutdownHook`] used by tests and by
//! `-r`/offline runs, plus the IMU connect-retry helper boot runs before
//! entering the main loop.

pub mod simulation;

pub use simulation::SimulationAdapter;

use std::time::Duration;

use pod_common::error::SensorError;

/// Narrow connect contract for an IMU driver (§6 "IMU device path").
///
/// The real serial-framing connect routine is out of scope; this trait is
/// just enough surface for [`imu_connect_with_retry`] to drive it.
pub trait ImuConnect {
    fn connect(&mut self) -> Result<(), SensorError>;
}

/// Retry `adapter.connect()` with a fixed backoff until it succeeds.
///
/// When the IMU is enabled (device path is not `-`), boot blocks here
/// rather than proceeding with an unconnected IMU.
pub fn imu_connect_with_retry<A: ImuConnect>(adapter: &mut A, retry_delay: Duration) {
    loop {
        match adapter.connect() {
            Ok(()) => return,
            Err(error) => {
                tracing::warn!(%error, "IMU connect failed, retrying");
                std::thread::sleep(retry_delay);
            }
        }
    }
}
