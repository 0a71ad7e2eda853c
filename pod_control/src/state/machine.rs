//! Mode state machine transitions (§4.1).
//!
//! Each iteration the general checks run first, then the mode-specific
//! check for the (possibly already updated) current mode. `set_mode` is
//! the single choke point for every transition: it is idempotent on
//! re-entering `Emergency`, skips once `Shutdown` is reached (I4), and
//! logs the human-readable reason the caller supplies (§4.1 "Transition
//! policy").

use pod_common::actuator::LateralErrorMask;
use pod_common::config::Thresholds;
use pod_common::mode::PodMode;

use crate::state::pod_state::PodState;

/// Owns the current `PodMode` and the transition choke point.
#[derive(Debug)]
pub struct PodStateMachine {
    mode: PodMode,
    /// Reason string for the most recent transition, kept for tests and
    /// for the report phase to surface in the one-second tick log.
    last_reason: String,
}

impl PodStateMachine {
    /// Create a new state machine in `Boot`.
    pub fn new() -> Self {
        Self {
            mode: PodMode::Boot,
            last_reason: String::new(),
        }
    }

    /// Current mode (I1: always one of the seven values).
    #[inline]
    pub const fn mode(&self) -> PodMode {
        self.mode
    }

    /// Reason given for the most recent transition.
    pub fn last_reason(&self) -> &str {
        &self.last_reason
    }

    /// Single choke point for every transition (§4.1 "Transition policy").
    ///
    /// Re-entering `Emergency` while already in `Emergency` is a no-op:
    /// no mode change, no log (idempotence, §8 round-trip property).
    /// Once `Shutdown` is reached it is never left (I4).
    fn set_mode(&mut self, next: PodMode, reason: impl Into<String>) {
        if self.mode == PodMode::Shutdown {
            return;
        }
        if next == PodMode::Emergency && self.mode == PodMode::Emergency {
            return;
        }
        let reason = reason.into();
        if self.mode != next {
            tracing::warn!(from = %self.mode, to = %next, reason = %reason, "pod mode transition");
        }
        self.mode = next;
        self.last_reason = reason;
    }

    /// Force a transition to `Emergency` from outside the check pipeline:
    /// sensor read failure, IMU failure-window exhaustion, or an
    /// operator/signal-driven forced stop (§5 "Cancellation", §7).
    pub fn force_emergency(&mut self, reason: impl Into<String>) {
        self.set_mode(PodMode::Emergency, reason);
    }

    /// Mode-independent invariants, evaluated in order every iteration
    /// except once `Shutdown` is reached (§4.1 "General checks").
    ///
    /// Returns early after the first violation, in the documented
    /// sequence (height → thermocouple → lateral → reverse motion).
    pub fn run_general_checks(&mut self, state: &PodState, thresholds: &Thresholds) {
        if self.mode == PodMode::Shutdown {
            return;
        }

        if state.has_non_positive_skate_height() {
            self.set_mode(PodMode::Emergency, "a skate height sensor is returning <= 0");
            return;
        }

        if let Some(index) = first_cold_thermocouple(state, thresholds) {
            self.set_mode(
                PodMode::Emergency,
                format!(
                    "thermocouple {index} for skates is below MIN_REGULATOR_THERMOCOUPLE_TEMP"
                ),
            );
            return;
        }

        let lateral_mask = lateral_error_mask(state, thresholds);
        if !lateral_mask.is_empty() {
            tracing::error!(mask = ?lateral_mask, "lateral error mask");
            self.set_mode(
                PodMode::Emergency,
                format!("lateral sensor(s) out of bounds: {lateral_mask:?}"),
            );
            return;
        }

        if state.velocity_x < -thresholds.v_err_x {
            self.set_mode(PodMode::Emergency, "pod rolling backward");
        }
    }

    /// Mode-specific transition check (§4.1 "Mode-specific transitions").
    pub fn run_mode_specific_check(&mut self, state: &PodState, thresholds: &Thresholds) {
        match self.mode {
            PodMode::Boot => {
                if state.ready {
                    self.set_mode(PodMode::Ready, "pod's ready bit has been set");
                }
            }
            PodMode::Ready => {
                if state.accel_x > thresholds.pushing_min_accel {
                    self.set_mode(PodMode::Pushing, "detecting positive acceleration");
                }
            }
            PodMode::Pushing => {
                if state.position_x > thresholds.maximum_safe_distance_before_braking {
                    self.set_mode(PodMode::Emergency, "too far: position exceeds max travel before braking");
                } else if state.velocity_x > thresholds.maximum_safe_forward_velocity {
                    self.set_mode(PodMode::Emergency, "too fast: velocity exceeds maximum safe forward velocity");
                } else if state.accel_x <= thresholds.coasting_min_accel_trigger {
                    self.set_mode(PodMode::Coasting, "negative acceleration in the x direction");
                }
            }
            PodMode::Coasting => {
                if state.position_x > thresholds.maximum_safe_distance_before_braking
                    || state.velocity_x > thresholds.maximum_safe_forward_velocity
                {
                    self.set_mode(PodMode::Emergency, "pod has travelled too far");
                } else if state.position_x > thresholds.standard_distance_before_braking {
                    self.set_mode(PodMode::Braking, "pod has entered braking range of travel");
                }
            }
            PodMode::Braking => {
                if thresholds.primary_braking_accel_x_max > state.accel_x {
                    self.set_mode(PodMode::Emergency, "deceleration too high");
                } else if thresholds.primary_braking_accel_x_min < state.accel_x {
                    if state.pod_is_stopped(thresholds.stopped_velocity_epsilon) {
                        self.set_mode(PodMode::Shutdown, "pod has stopped");
                    } else if state.accel_x > -state.velocity_x {
                        // Compares acceleration magnitude against velocity magnitude;
                        // preserved verbatim per the open question on this comparator.
                        self.set_mode(PodMode::Emergency, "deceleration too low");
                    }
                }
            }
            PodMode::Emergency => {
                if state.pod_is_stopped(thresholds.stopped_velocity_epsilon)
                    && state.emergency_brakes_engaged()
                    && state.primary_brakes_engaged()
                {
                    self.set_mode(PodMode::Shutdown, "pod has been determined to be in a safe state");
                }
            }
            PodMode::Shutdown => {}
        }
    }
}

impl Default for PodStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Index of the first skate thermocouple reading below the configured
/// minimum, if any.
fn first_cold_thermocouple(state: &PodState, thresholds: &Thresholds) -> Option<usize> {
    state
        .skate_thermocouples
        .iter()
        .position(|&temp| temp < thresholds.min_regulator_thermocouple_temp)
}

/// Accumulate the lateral-bounds error mask (§4.1 general check 3).
fn lateral_error_mask(state: &PodState, thresholds: &Thresholds) -> LateralErrorMask {
    let mut mask = LateralErrorMask::empty();
    let outside = |v: f64| v < thresholds.lateral_min || v > thresholds.lateral_max;

    if outside(state.lateral_front_left) {
        mask |= LateralErrorMask::FRONT_LEFT;
    }
    if outside(state.lateral_front_right) {
        mask |= LateralErrorMask::FRONT_RIGHT;
    }
    if outside(state.lateral_rear_left) {
        mask |= LateralErrorMask::REAR_LEFT;
    }
    if outside(state.lateral_rear_right) {
        mask |= LateralErrorMask::REAR_RIGHT;
    }
    mask
}
