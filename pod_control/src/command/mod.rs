//! The actuator projector (§4.2): a pure mode-to-command mapping plus a
//! thin override-gated writer, split the same way the per-channel
//! write helpers (skates, wheel brakes, e-brakes) are split below.
//!
//! The pure `project_*` functions never touch a `GpioWriter`; only
//! [`apply_actuators`] performs GPIO writes, and it consults the override
//! mask before every write (§4.2 "Override gating").

pub mod projector;

pub use projector::{project_ebrake_command, project_skate_command, project_wheel_brake_command};

use pod_common::actuator::ActuatorKind;
use pod_common::config::Thresholds;
use pod_common::consts::{N_EBRAKE_SOLENOIDS, N_SKATE_SOLENOIDS, N_WHEEL_SOLENOIDS};
use pod_common::error::GpioError;
use pod_common::hal::GpioWriter;
use pod_common::mode::PodMode;

use crate::state::PodState;

/// Run the full actuator projector for one cycle: skates, then wheel
/// brakes, then e-brakes (§4.2 "Change the control surfaces").
pub fn apply_actuators<W: GpioWriter>(
    state: &mut PodState,
    thresholds: &Thresholds,
    writer: &mut W,
) -> Result<(), GpioError> {
    apply_skates(state, writer)?;
    apply_wheel_brakes(state, thresholds, writer)?;
    apply_ebrakes(state, thresholds, writer)?;
    Ok(())
}

/// Commands every skate channel, gated by the override mask.
///
/// The requested value is always "extended" (§9, `I3` open question): the
/// projector offers no mode under which skates retract. Preserved as
/// specified rather than fixed.
fn apply_skates<W: GpioWriter>(state: &mut PodState, writer: &mut W) -> Result<(), GpioError> {
    let commanded = project_skate_command(state.mode);

    for i in 0..N_SKATE_SOLENOIDS {
        if should_skip_write(state, ActuatorKind::Skate, i, commanded, state.actuator_shadow.skates[i]) {
            continue;
        }
        state.actuator_shadow.skates[i] = commanded;
        // The physical write ignores the commanded value and always
        // drives the pin low (§9 `setSkates` open question). Preserved.
        writer.set_gpio_value(state.pins.skate_pins[i], false)?;
    }
    Ok(())
}

/// Commands every wheel (primary) brake channel.
///
/// Gated against `OverrideMask::skates` rather than a wheel-brake-specific
/// list (§9 `setBrakes` open question, probable copy-paste error).
/// Preserved rather than fixed.
fn apply_wheel_brakes<W: GpioWriter>(
    state: &mut PodState,
    thresholds: &Thresholds,
    writer: &mut W,
) -> Result<(), GpioError> {
    match project_wheel_brake_command(state.mode, state.accel_x, thresholds.a_err_x) {
        Some(engaged) => {
            for i in 0..N_WHEEL_SOLENOIDS {
                if should_skip_write(state, ActuatorKind::Skate, i, engaged, state.actuator_shadow.wheel_brakes[i]) {
                    continue;
                }
                state.actuator_shadow.wheel_brakes[i] = engaged;
                writer.set_gpio_value(state.pins.wheel_brake_pins[i], engaged)?;
            }
        }
        None if state.mode == PodMode::Emergency => {
            tracing::error!(
                accel_x = state.accel_x,
                a_err_x = thresholds.a_err_x,
                "EMERGENCY: not applying wheel brakes, accel_x is above a_err_x"
            );
        }
        None => {}
    }
    Ok(())
}

/// Commands the emergency (clamp) brake channels.
///
/// Only touched in `Emergency`, released once `accel_x` has fallen to or
/// below `a_err_x` (§9 `adjustBrakes` open question on release polarity;
/// preserved rather than re-derived from first principles).
fn apply_ebrakes<W: GpioWriter>(
    state: &mut PodState,
    thresholds: &Thresholds,
    writer: &mut W,
) -> Result<(), GpioError> {
    if let Some(engaged) = project_ebrake_command(state.mode, state.accel_x, thresholds.a_err_x) {
        for i in 0..N_EBRAKE_SOLENOIDS {
            if should_skip_write(state, ActuatorKind::EBrake, i, engaged, state.actuator_shadow.ebrakes[i]) {
                continue;
            }
            state.actuator_shadow.ebrakes[i] = engaged;
            writer.set_gpio_value(state.pins.ebrake_pins[i], engaged)?;
        }
    }
    Ok(())
}

/// Whether a write should be skipped this cycle (§4.2 "Override gating").
///
/// A value unchanged from the shadow is always silently skipped. A
/// changed value is skipped (and logged as refused) only when the channel
/// is under manual override; otherwise it proceeds.
fn should_skip_write(state: &PodState, kind: ActuatorKind, index: usize, new_value: bool, shadow_value: bool) -> bool {
    if new_value == shadow_value {
        return true;
    }
    if state.override_mask.is_manual(kind, index) {
        tracing::warn!(?kind, channel = index, "actuator channel is in override mode, refusing auto write");
        return true;
    }
    false
}
