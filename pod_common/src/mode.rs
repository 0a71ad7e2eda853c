//! `PodMode` — the seven-state operational mode (§3, §4.1 I1).
//!
//! Only one `PodMode` is active at any time. `Shutdown` is the unique DAG
//! sink (I4); `Emergency` is a sink-until-safe, exiting only to `Shutdown`.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;

/// Operational mode of the pod.
///
/// `#[repr(u8)]` for compact storage in shared/atomic state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PodMode {
    /// Power-on; awaiting operator's ready signal and pre-flight checks.
    Boot = 0,
    /// Pre-flight complete; pod levitates; awaiting external push.
    Ready = 1,
    /// Positive longitudinal acceleration detected; external pusher active.
    Pushing = 2,
    /// Pusher released; pod decelerating naturally or drifting.
    Coasting = 3,
    /// Pod is inside the designated braking zone; primary brakes applied.
    Braking = 4,
    /// Unsafe condition detected; apply all brakes, retract skates.
    Emergency = 5,
    /// Pod stopped and both brake systems engaged; loop exits.
    Shutdown = 6,
}

// §5 "cross-thread state is treated as shared memory protected by per-field
// atomic read/write (field widths are ≤ machine word)" — `PodMode` must fit
// in a single machine word for that to hold.
const_assert!(core::mem::size_of::<PodMode>() <= core::mem::size_of::<usize>());

impl PodMode {
    /// Convert from a raw `u8`. Returns `None` for invalid values.
    ///
    /// A conversion failure here means the mode field has been corrupted;
    /// callers should treat it as an invariant violation (I1), not a
    /// recoverable error.
    #[inline]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Boot),
            1 => Some(Self::Ready),
            2 => Some(Self::Pushing),
            3 => Some(Self::Coasting),
            4 => Some(Self::Braking),
            5 => Some(Self::Emergency),
            6 => Some(Self::Shutdown),
            _ => None,
        }
    }

    /// Whether this mode is the terminal mode that ends the control loop.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Shutdown)
    }
}

impl Default for PodMode {
    fn default() -> Self {
        Self::Boot
    }
}

impl std::fmt::Display for PodMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Boot => "Boot",
            Self::Ready => "Ready",
            Self::Pushing => "Pushing",
            Self::Coasting => "Coasting",
            Self::Braking => "Braking",
            Self::Emergency => "Emergency",
            Self::Shutdown => "Shutdown",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_u8() {
        for m in [
            PodMode::Boot,
            PodMode::Ready,
            PodMode::Pushing,
            PodMode::Coasting,
            PodMode::Braking,
            PodMode::Emergency,
            PodMode::Shutdown,
        ] {
            assert_eq!(PodMode::from_u8(m as u8), Some(m));
        }
    }

    #[test]
    fn invalid_u8_is_none() {
        assert_eq!(PodMode::from_u8(7), None);
        assert_eq!(PodMode::from_u8(255), None);
    }

    #[test]
    fn default_is_boot() {
        assert_eq!(PodMode::default(), PodMode::Boot);
    }

    #[test]
    fn only_shutdown_is_terminal() {
        for m in [
            PodMode::Boot,
            PodMode::Ready,
            PodMode::Pushing,
            PodMode::Coasting,
            PodMode::Braking,
            PodMode::Emergency,
        ] {
            assert!(!m.is_terminal());
        }
        assert!(PodMode::Shutdown.is_terminal());
    }
}
