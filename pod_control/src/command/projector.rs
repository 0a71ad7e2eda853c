//! Pure mode-to-command mapping (§4.2, §9 "Actuator projector purity").
//!
//! None of these functions touch I/O; they only decide what the GPIO
//! layer should be told to do. Keeping them pure lets the preserved
//! quirks below be tested in isolation.

use pod_common::mode::PodMode;

/// Commanded skate state for a given mode: `true` = extend.
///
/// Two branches — one for `Ready/Pushing/Coasting`, one for
/// `Boot/Emergency/Shutdown/Braking` — with identical bodies: both
/// command `true` (extend). The data model's invariant notes the
/// expected behavior is retraction outside travel modes; this is
/// flagged as an open question (§9) and preserved rather than fixed.
pub fn project_skate_command(mode: PodMode) -> bool {
    match mode {
        PodMode::Ready | PodMode::Pushing | PodMode::Coasting => true,
        PodMode::Boot | PodMode::Emergency | PodMode::Shutdown | PodMode::Braking => true,
    }
}

/// Commanded wheel (primary) brake state.
///
/// Returns `None` in `Emergency` when `accel_x` is still above
/// `a_err_x`: the brakes stay at their last commanded value in that
/// window rather than snapping to a default, with a loud warning logged
/// instead (§9 open question).
pub fn project_wheel_brake_command(mode: PodMode, accel_x: f64, a_err_x: f64) -> Option<bool> {
    match mode {
        PodMode::Ready | PodMode::Pushing | PodMode::Coasting => Some(false),
        PodMode::Boot | PodMode::Shutdown | PodMode::Braking => Some(true),
        PodMode::Emergency => (accel_x <= a_err_x).then_some(true),
    }
}

/// Commanded emergency (clamp) brake state.
///
/// Only `Emergency` touches the e-brakes at all: every other mode leaves
/// them at whatever was last commanded (fail-safe engaged at boot).
/// Once `accel_x` falls to or below `a_err_x`, the e-brakes are released
/// on the theory that the wheel brakes alone are now sufficient.
pub fn project_ebrake_command(mode: PodMode, accel_x: f64, a_err_x: f64) -> Option<bool> {
    match mode {
        PodMode::Emergency => (accel_x <= a_err_x).then_some(false),
        _ => None,
    }
}
