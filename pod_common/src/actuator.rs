//! Actuator value types: solenoid shadows, pin map, override mask (§3, §4.2).

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::consts::{N_EBRAKE_SOLENOIDS, N_SKATE_SOLENOIDS, N_WHEEL_SOLENOIDS};

/// GPIO pin identifier.
pub type GpioPin = u32;

/// Last-commanded values for every solenoid channel.
///
/// Written exclusively by the actuator projector (§4.2). Read by the
/// override-gating logic to decide whether a write would change
/// anything, and by idempotence tests (§8) to confirm a no-op replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActuatorShadow {
    /// Wheel (primary) brake channels, true = engaged.
    pub wheel_brakes: [bool; N_WHEEL_SOLENOIDS],
    /// Emergency (clamp) brake channels, true = engaged (false = released).
    pub ebrakes: [bool; N_EBRAKE_SOLENOIDS],
    /// Skate channels, true = extended (levitating).
    pub skates: [bool; N_SKATE_SOLENOIDS],
}

impl Default for ActuatorShadow {
    /// Fail-safe electrical default: brakes engaged, skates retracted
    /// (spring return on power-loss), matching `adjustBrakes`/`adjustSkates`
    /// boot-time defaults before the first cycle commits a command.
    fn default() -> Self {
        Self {
            wheel_brakes: [true; N_WHEEL_SOLENOIDS],
            ebrakes: [true; N_EBRAKE_SOLENOIDS],
            skates: [false; N_SKATE_SOLENOIDS],
        }
    }
}

/// GPIO pin assignment for every solenoid channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinMap {
    pub wheel_brake_pins: [GpioPin; N_WHEEL_SOLENOIDS],
    pub ebrake_pins: [GpioPin; N_EBRAKE_SOLENOIDS],
    pub skate_pins: [GpioPin; N_SKATE_SOLENOIDS],
}

/// Which subsystem an override/actuator index refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActuatorKind {
    Skate,
    WheelBrake,
    EBrake,
}

bitflags! {
    /// Lateral-displacement out-of-bounds error mask (§4.1 general check 3).
    ///
    /// One bit per sensor: front-left, front-right, rear-left, rear-right.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct LateralErrorMask: u8 {
        const FRONT_LEFT  = 0x1;
        const FRONT_RIGHT = 0x2;
        const REAR_LEFT   = 0x4;
        const REAR_RIGHT  = 0x8;
    }
}

impl Default for LateralErrorMask {
    fn default() -> Self {
        Self::empty()
    }
}

/// Per-channel manual-override state (§3 "Override mask").
///
/// When a channel's flag is set, the command collaborator has asserted
/// manual control and the mode machine must not overwrite it unless the
/// caller passes the override-authority flag (§4.2 "Override gating").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverrideMask {
    pub skates: [bool; N_SKATE_SOLENOIDS],
    pub wheel_brakes: [bool; N_WHEEL_SOLENOIDS],
    pub ebrakes: [bool; N_EBRAKE_SOLENOIDS],
}

impl Default for OverrideMask {
    fn default() -> Self {
        Self {
            skates: [false; N_SKATE_SOLENOIDS],
            wheel_brakes: [false; N_WHEEL_SOLENOIDS],
            ebrakes: [false; N_EBRAKE_SOLENOIDS],
        }
    }
}

impl OverrideMask {
    /// Whether the given channel is currently under manual override.
    #[inline]
    pub fn is_manual(&self, kind: ActuatorKind, index: usize) -> bool {
        match kind {
            ActuatorKind::Skate => self.skates.get(index).copied().unwrap_or(false),
            ActuatorKind::WheelBrake => self.wheel_brakes.get(index).copied().unwrap_or(false),
            ActuatorKind::EBrake => self.ebrakes.get(index).copied().unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_shadow_is_fail_safe() {
        let shadow = ActuatorShadow::default();
        assert!(shadow.wheel_brakes.iter().all(|&b| b));
        assert!(shadow.ebrakes.iter().all(|&b| b));
        assert!(shadow.skates.iter().all(|&b| !b));
    }

    #[test]
    fn lateral_error_mask_bits() {
        let mask = LateralErrorMask::FRONT_LEFT | LateralErrorMask::REAR_RIGHT;
        assert!(mask.contains(LateralErrorMask::FRONT_LEFT));
        assert!(mask.contains(LateralErrorMask::REAR_RIGHT));
        assert!(!mask.contains(LateralErrorMask::FRONT_RIGHT));
    }

    #[test]
    fn override_mask_default_is_all_auto() {
        let mask = OverrideMask::default();
        for i in 0..N_SKATE_SOLENOIDS {
            assert!(!mask.is_manual(ActuatorKind::Skate, i));
        }
    }

    #[test]
    fn override_mask_reports_set_channel() {
        let mut mask = OverrideMask::default();
        mask.skates[0] = true;
        assert!(mask.is_manual(ActuatorKind::Skate, 0));
        assert!(!mask.is_manual(ActuatorKind::Skate, 1));
    }
}
