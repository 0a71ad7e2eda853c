//! TOML-loadable configuration schema for the pod controller (§6 external interfaces).
//!
//! All numeric parameters have documented bounds. Optional fields use
//! `#[serde(default)]` so a config file written against an older schema
//! still deserializes cleanly.

use serde::{Deserialize, Serialize};

use crate::actuator::PinMap;

/// Top-level pod controller configuration.
///
/// Loaded from TOML at startup and never mutated afterward — every
/// field here is read, never written, by the control thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PodConfig {
    /// Envelope and mode-transition thresholds.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// GPIO pin assignment for every solenoid channel.
    pub pins: PinMap,

    /// Path to the IMU device, or `"-"` to disable the IMU driver.
    #[serde(default = "default_imu_device")]
    pub imu_device: String,
}

fn default_imu_device() -> String {
    crate::consts::IMU_DEVICE_DISABLED.to_string()
}

/// Envelope and mode-transition thresholds (§4.1).
///
/// Field names follow the bare identifiers used by the transition rules
/// in §4.1/§8, so a reviewer can map a config key directly onto the rule
/// it parameterizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    /// Minimum forward acceleration that exits `Ready` into `Pushing`.
    #[serde(default = "default_pushing_min_accel")]
    pub pushing_min_accel: f64,

    /// Acceleration at or below which `Pushing` exits into `Coasting`.
    #[serde(default = "default_coasting_min_accel_trigger")]
    pub coasting_min_accel_trigger: f64,

    /// Forward velocity above which the pod is unsafe (`Pushing`/`Coasting` → `Emergency`).
    #[serde(default = "default_max_safe_forward_velocity")]
    pub maximum_safe_forward_velocity: f64,

    /// Position beyond which braking must already have started (→ `Emergency`).
    #[serde(default = "default_max_safe_distance_before_braking")]
    pub maximum_safe_distance_before_braking: f64,

    /// Position at which `Coasting` enters the braking zone (→ `Braking`).
    #[serde(default = "default_standard_distance_before_braking")]
    pub standard_distance_before_braking: f64,

    /// Deceleration floor while braking; exceeding it (more negative) → `Emergency`.
    pub primary_braking_accel_x_max: f64,

    /// Deceleration ceiling while braking; values above it require either
    /// a stopped pod or sufficient deceleration, else → `Emergency`.
    pub primary_braking_accel_x_min: f64,

    /// Forward acceleration above which brakes cannot yet safely assert (I2).
    #[serde(default = "default_a_err_x")]
    pub a_err_x: f64,

    /// Reverse velocity magnitude beyond which the pod is rolling backward (→ `Emergency`).
    #[serde(default = "default_v_err_x")]
    pub v_err_x: f64,

    /// Minimum allowed lateral displacement.
    pub lateral_min: f64,

    /// Maximum allowed lateral displacement.
    pub lateral_max: f64,

    /// Minimum allowed skate regulator thermocouple temperature.
    pub min_regulator_thermocouple_temp: i32,

    /// Velocity magnitude below which the pod is considered stopped.
    #[serde(default = "default_stopped_velocity_epsilon")]
    pub stopped_velocity_epsilon: f64,
}

fn default_pushing_min_accel() -> f64 {
    1.0
}
fn default_coasting_min_accel_trigger() -> f64 {
    0.0
}
fn default_max_safe_forward_velocity() -> f64 {
    25.0
}
fn default_max_safe_distance_before_braking() -> f64 {
    125.0
}
fn default_standard_distance_before_braking() -> f64 {
    75.0
}
fn default_a_err_x() -> f64 {
    0.0
}
fn default_v_err_x() -> f64 {
    0.5
}
fn default_stopped_velocity_epsilon() -> f64 {
    0.05
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            pushing_min_accel: default_pushing_min_accel(),
            coasting_min_accel_trigger: default_coasting_min_accel_trigger(),
            maximum_safe_forward_velocity: default_max_safe_forward_velocity(),
            maximum_safe_distance_before_braking: default_max_safe_distance_before_braking(),
            standard_distance_before_braking: default_standard_distance_before_braking(),
            primary_braking_accel_x_max: -15.0,
            primary_braking_accel_x_min: -1.0,
            a_err_x: default_a_err_x(),
            v_err_x: default_v_err_x(),
            lateral_min: -10.0,
            lateral_max: 10.0,
            min_regulator_thermocouple_temp: -20,
            stopped_velocity_epsilon: default_stopped_velocity_epsilon(),
        }
    }
}

impl Thresholds {
    /// Validate internal consistency (bounds per §7 boot-fault taxonomy).
    pub fn validate(&self) -> Result<(), String> {
        if self.lateral_min >= self.lateral_max {
            return Err(format!(
                "lateral_min {} must be < lateral_max {}",
                self.lateral_min, self.lateral_max
            ));
        }
        if self.standard_distance_before_braking >= self.maximum_safe_distance_before_braking {
            return Err(format!(
                "standard_distance_before_braking {} must be < maximum_safe_distance_before_braking {}",
                self.standard_distance_before_braking, self.maximum_safe_distance_before_braking
            ));
        }
        if self.primary_braking_accel_x_max >= self.primary_braking_accel_x_min {
            return Err(format!(
                "primary_braking_accel_x_max {} must be < primary_braking_accel_x_min {}",
                self.primary_braking_accel_x_max, self.primary_braking_accel_x_min
            ));
        }
        if self.stopped_velocity_epsilon < 0.0 {
            return Err("stopped_velocity_epsilon must be >= 0".to_string());
        }
        if self.v_err_x < 0.0 {
            return Err("v_err_x must be >= 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(Thresholds::default().validate().is_ok());
    }

    #[test]
    fn rejects_inverted_lateral_bounds() {
        let mut t = Thresholds::default();
        t.lateral_min = 5.0;
        t.lateral_max = -5.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn rejects_braking_zone_past_emergency_distance() {
        let mut t = Thresholds::default();
        t.standard_distance_before_braking = t.maximum_safe_distance_before_braking + 1.0;
        assert!(t.validate().is_err());
    }

    #[test]
    fn rejects_inverted_braking_accel_band() {
        let mut t = Thresholds::default();
        t.primary_braking_accel_x_max = t.primary_braking_accel_x_min;
        assert!(t.validate().is_err());
    }
}
