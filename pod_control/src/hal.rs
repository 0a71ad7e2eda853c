//! Pin setup at boot (§6 external interfaces, §7 "Boot fault").
//!
//! Enables and configures every wheel-brake, e-brake, and skate solenoid
//! GPIO once before the control loop starts. A failure anywhere aborts
//! boot.

use pod_common::actuator::PinMap;
use pod_common::error::GpioError;
use pod_common::hal::GpioWriter;

/// Enable and set the output direction for every solenoid channel.
///
/// Order is wheel brakes, then e-brakes, then skates; the first failure
/// aborts the whole sequence rather than leaving a partially configured
/// pin map.
pub fn setup_pins<W: GpioWriter>(writer: &mut W, pins: &PinMap) -> Result<(), GpioError> {
    for &pin in &pins.wheel_brake_pins {
        enable_output(writer, pin)?;
    }
    for &pin in &pins.ebrake_pins {
        enable_output(writer, pin)?;
    }
    for &pin in &pins.skate_pins {
        enable_output(writer, pin)?;
    }
    Ok(())
}

fn enable_output<W: GpioWriter>(writer: &mut W, pin: u32) -> Result<(), GpioError> {
    writer.enable_gpio(pin)?;
    writer.set_gpio_direction(pin, true)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pod_common::actuator::GpioPin;
    use std::collections::HashSet;

    #[derive(Default)]
    struct RecordingWriter {
        enabled: Vec<GpioPin>,
        directions: Vec<(GpioPin, bool)>,
    }

    impl GpioWriter for RecordingWriter {
        fn enable_gpio(&mut self, pin: GpioPin) -> Result<(), GpioError> {
            self.enabled.push(pin);
            Ok(())
        }
        fn set_gpio_direction(&mut self, pin: GpioPin, output: bool) -> Result<(), GpioError> {
            self.directions.push((pin, output));
            Ok(())
        }
        fn set_gpio_value(&mut self, _pin: GpioPin, _value: bool) -> Result<(), GpioError> {
            Ok(())
        }
    }

    fn pins() -> PinMap {
        PinMap {
            wheel_brake_pins: [1, 2, 3, 4],
            ebrake_pins: [5, 6, 7, 8],
            skate_pins: [9, 10, 11, 12],
        }
    }

    #[test]
    fn enables_every_channel_as_output() {
        let mut writer = RecordingWriter::default();
        setup_pins(&mut writer, &pins()).unwrap();

        let enabled: HashSet<_> = writer.enabled.iter().copied().collect();
        assert_eq!(enabled.len(), 12);
        assert!(writer.directions.iter().all(|&(_, output)| output));
    }

    struct FailingWriter;

    impl GpioWriter for FailingWriter {
        fn enable_gpio(&mut self, pin: GpioPin) -> Result<(), GpioError> {
            Err(GpioError::EnableFailed { pin, reason: "simulated boot fault".to_string() })
        }
        fn set_gpio_direction(&mut self, _pin: GpioPin, _output: bool) -> Result<(), GpioError> {
            Ok(())
        }
        fn set_gpio_value(&mut self, _pin: GpioPin, _value: bool) -> Result<(), GpioError> {
            Ok(())
        }
    }

    #[test]
    fn failure_aborts_setup() {
        let mut writer = FailingWriter;
        assert!(setup_pins(&mut writer, &pins()).is_err());
    }
}
