//! Prelude module for common re-exports.
//!
//! Lets consumers do `use pod_common::prelude::*;` and get the most
//! commonly needed types without listing individual paths.

pub use crate::actuator::{ActuatorKind, ActuatorShadow, GpioPin, LateralErrorMask, OverrideMask, PinMap};
pub use crate::config::{PodConfig, Thresholds};
pub use crate::consts::*;
pub use crate::error::{GpioError, SensorError};
pub use crate::hal::{BrakeSample, GpioWriter, KinematicsSample, LateralSample, SensorReader, ShutdownHook, SkateSample};
pub use crate::mode::PodMode;
