//! TOML loader/validator for `PodConfig`.
//!
//! Read the file, parse it, run the schema's own `validate()`, then run
//! cross-field validation this crate adds (pin uniqueness across all
//! solenoid channels).

use std::collections::HashSet;
use std::path::Path;

use pod_common::actuator::PinMap;
use pod_common::config::PodConfig;

use crate::error::ConfigError;

/// Load, parse, and validate a `PodConfig` from a TOML file on disk.
pub fn load_config(path: &Path) -> Result<PodConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_config_from_str(&raw)
}

/// Parse and validate a `PodConfig` from an in-memory TOML string (used by
/// tests and by `load_config`).
pub fn load_config_from_str(raw: &str) -> Result<PodConfig, ConfigError> {
    let config: PodConfig = toml::from_str(raw)?;
    config.thresholds.validate().map_err(ConfigError::Invalid)?;
    validate_pin_uniqueness(&config.pins)?;
    Ok(config)
}

/// Every solenoid channel must have a distinct GPIO pin; a collision would
/// mean two actuators silently share one physical line.
fn validate_pin_uniqueness(pins: &PinMap) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for &pin in pins
        .wheel_brake_pins
        .iter()
        .chain(pins.ebrake_pins.iter())
        .chain(pins.skate_pins.iter())
    {
        if !seen.insert(pin) {
            return Err(ConfigError::DuplicatePin(pin));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn valid_toml() -> &'static str {
        r#"
            imu_device = "-"

            [pins]
            wheel_brake_pins = [1, 2, 3, 4]
            ebrake_pins = [5, 6, 7, 8]
            skate_pins = [9, 10, 11, 12]

            [thresholds]
            lateral_min = -10.0
            lateral_max = 10.0
            min_regulator_thermocouple_temp = -20
            primary_braking_accel_x_max = -15.0
            primary_braking_accel_x_min = -1.0
        "#
    }

    #[test]
    fn loads_valid_config_from_string() {
        let config = load_config_from_str(valid_toml()).unwrap();
        assert_eq!(config.imu_device, "-");
        assert_eq!(config.pins.wheel_brake_pins, [1, 2, 3, 4]);
    }

    #[test]
    fn loads_valid_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(valid_toml().as_bytes()).unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.pins.skate_pins, [9, 10, 11, 12]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Path::new("/nonexistent/pod.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn rejects_duplicate_pins_across_subsystems() {
        let toml = r#"
            [pins]
            wheel_brake_pins = [1, 2, 3, 4]
            ebrake_pins = [4, 6, 7, 8]
            skate_pins = [9, 10, 11, 12]

            [thresholds]
            lateral_min = -10.0
            lateral_max = 10.0
            min_regulator_thermocouple_temp = -20
            primary_braking_accel_x_max = -15.0
            primary_braking_accel_x_min = -1.0
        "#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicatePin(4)));
    }

    #[test]
    fn rejects_invalid_thresholds() {
        let toml = r#"
            [pins]
            wheel_brake_pins = [1, 2, 3, 4]
            ebrake_pins = [5, 6, 7, 8]
            skate_pins = [9, 10, 11, 12]

            [thresholds]
            lateral_min = 10.0
            lateral_max = -10.0
            min_regulator_thermocouple_temp = -20
            primary_braking_accel_x_max = -15.0
            primary_braking_accel_x_min = -1.0
        "#;
        let err = load_config_from_str(toml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = load_config_from_str("not valid toml {{{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
