//! [`SimulationAdapter`]: a canned-value `SensorReader`/`GpioWriter` used by
//! tests and `-r`/offline runs (§6, §9 "-r" Part C).
//!
//! Every read returns whatever the test harness last poked into the public
//! fields; failures are injected via the `*_fails`/`imu_failures_remaining`
//! knobs rather than by simulating real I/O errors.

use pod_common::actuator::GpioPin;
use pod_common::error::{GpioError, SensorError};
use pod_common::hal::{BrakeSample, GpioWriter, KinematicsSample, LateralSample, SensorReader, ShutdownHook, SkateSample};

use super::ImuConnect;

/// Simulated sensor/GPIO facade with injectable failures.
#[derive(Debug, Clone, Default)]
pub struct SimulationAdapter {
    pub kinematics: KinematicsSample,
    pub skates: SkateSample,
    pub lateral: LateralSample,
    pub brakes: BrakeSample,

    /// Number of subsequent `read_imu` calls that should fail (§4.1 "IMU storm").
    pub imu_failures_remaining: u32,
    /// When true, `read_skates` fails every call (§4.1 "Skate sensor failure").
    pub skate_read_fails: bool,
    /// When true, `read_lateral` fails every call.
    pub lateral_read_fails: bool,

    /// Every GPIO value write, in order, for test assertions.
    pub gpio_writes: Vec<(GpioPin, bool)>,
    pub shutdown_hook_invocations: u32,
}

impl SimulationAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SensorReader for SimulationAdapter {
    fn read_imu(&mut self) -> Result<KinematicsSample, SensorError> {
        if self.imu_failures_remaining > 0 {
            self.imu_failures_remaining -= 1;
            return Err(SensorError::ReadFailed("simulated IMU failure".to_string()));
        }
        Ok(self.kinematics)
    }

    fn read_skates(&mut self) -> Result<SkateSample, SensorError> {
        if self.skate_read_fails {
            return Err(SensorError::ReadFailed("simulated skate sensor failure".to_string()));
        }
        Ok(self.skates)
    }

    fn read_lateral(&mut self) -> Result<LateralSample, SensorError> {
        if self.lateral_read_fails {
            return Err(SensorError::ReadFailed("simulated lateral sensor failure".to_string()));
        }
        Ok(self.lateral)
    }

    fn read_brakes(&mut self) -> Result<BrakeSample, SensorError> {
        Ok(self.brakes)
    }
}

impl GpioWriter for SimulationAdapter {
    fn enable_gpio(&mut self, _pin: GpioPin) -> Result<(), GpioError> {
        Ok(())
    }

    fn set_gpio_direction(&mut self, _pin: GpioPin, _output: bool) -> Result<(), GpioError> {
        Ok(())
    }

    fn set_gpio_value(&mut self, pin: GpioPin, value: bool) -> Result<(), GpioError> {
        self.gpio_writes.push((pin, value));
        Ok(())
    }
}

impl ShutdownHook for SimulationAdapter {
    fn on_shutdown(&mut self) {
        self.shutdown_hook_invocations += 1;
        tracing::debug!("simulation adapter shutdown hook invoked");
    }
}

impl ImuConnect for SimulationAdapter {
    fn connect(&mut self) -> Result<(), SensorError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reads_succeed_with_zeroed_samples() {
        let mut sim = SimulationAdapter::new();
        assert!(sim.read_imu().is_ok());
        assert!(sim.read_skates().is_ok());
        assert!(sim.read_lateral().is_ok());
        assert!(sim.read_brakes().is_ok());
    }

    #[test]
    fn imu_failures_are_consumed_one_at_a_time() {
        let mut sim = SimulationAdapter::new();
        sim.imu_failures_remaining = 2;
        assert!(sim.read_imu().is_err());
        assert!(sim.read_imu().is_err());
        assert!(sim.read_imu().is_ok());
    }

    #[test]
    fn skate_and_lateral_failures_are_sticky() {
        let mut sim = SimulationAdapter::new();
        sim.skate_read_fails = true;
        sim.lateral_read_fails = true;
        assert!(sim.read_skates().is_err());
        assert!(sim.read_skates().is_err());
        assert!(sim.read_lateral().is_err());
    }

    #[test]
    fn gpio_writes_are_recorded_in_order() {
        let mut sim = SimulationAdapter::new();
        sim.set_gpio_value(3, true).unwrap();
        sim.set_gpio_value(4, false).unwrap();
        assert_eq!(sim.gpio_writes, vec![(3, true), (4, false)]);
    }

    #[test]
    fn shutdown_hook_increments_counter() {
        let mut sim = SimulationAdapter::new();
        sim.on_shutdown();
        sim.on_shutdown();
        assert_eq!(sim.shutdown_hook_invocations, 2);
    }
}
