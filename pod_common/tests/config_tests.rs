//! TOML round-trip tests for `PodConfig`.

use pod_common::config::PodConfig;

fn sample_toml() -> &'static str {
    r#"
imu_device = "/dev/ttyS1"

[thresholds]
pushing_min_accel = 1.0
coasting_min_accel_trigger = 0.0
maximum_safe_forward_velocity = 25.0
maximum_safe_distance_before_braking = 125.0
standard_distance_before_braking = 75.0
primary_braking_accel_x_max = -15.0
primary_braking_accel_x_min = -1.0
lateral_min = -10.0
lateral_max = 10.0
min_regulator_thermocouple_temp = -20

[pins]
wheel_brake_pins = [10, 11, 12, 13]
ebrake_pins = [20, 21, 22, 23]
skate_pins = [30, 31, 32, 33]
"#
}

#[test]
fn parses_full_config() {
    let config: PodConfig = toml::from_str(sample_toml()).expect("valid TOML");
    assert_eq!(config.imu_device, "/dev/ttyS1");
    assert_eq!(config.thresholds.standard_distance_before_braking, 75.0);
    assert_eq!(config.pins.wheel_brake_pins, [10, 11, 12, 13]);
    assert!(config.thresholds.validate().is_ok());
}

#[test]
fn imu_device_defaults_to_disabled() {
    let toml_str = r#"
[thresholds]
primary_braking_accel_x_max = -15.0
primary_braking_accel_x_min = -1.0
lateral_min = -10.0
lateral_max = 10.0
min_regulator_thermocouple_temp = -20

[pins]
wheel_brake_pins = [10, 11, 12, 13]
ebrake_pins = [20, 21, 22, 23]
skate_pins = [30, 31, 32, 33]
"#;
    let config: PodConfig = toml::from_str(toml_str).expect("valid TOML");
    assert_eq!(config.imu_device, "-");
}

#[test]
fn rejects_malformed_toml() {
    let result: Result<PodConfig, _> = toml::from_str("not valid = [ toml");
    assert!(result.is_err());
}
