//! System-wide constants for the pod controller workspace.
//!
//! Single source of truth for channel counts and bounded defaults.
//! Imported by both `pod_common` and `pod_control` — no duplication permitted.

/// Number of wheel (primary) brake solenoid channels.
pub const N_WHEEL_SOLENOIDS: usize = 4;

/// Number of emergency (clamp) brake solenoid channels.
pub const N_EBRAKE_SOLENOIDS: usize = 4;

/// Number of skate (levitation) solenoid channels.
pub const N_SKATE_SOLENOIDS: usize = 4;

/// Number of skate pressure-regulator thermocouples.
pub const N_SKATE_THERMOCOUPLES: usize = 4;

/// Width of the IMU failure sliding bitmap [iterations].
pub const IMU_FAILURE_WINDOW: u32 = 64;

/// Default control-thread RT priority (SCHED_RR, 1-99, higher = more urgent).
pub const CONTROL_THREAD_PRIORITY: i32 = 70;

/// Default command/telemetry server thread RT priority.
pub const COMMAND_THREAD_PRIORITY: i32 = 20;

/// Default remote logging thread RT priority.
pub const LOGGING_THREAD_PRIORITY: i32 = 10;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/pod/pod.toml";

/// Sentinel IMU device path that disables the IMU driver.
pub const IMU_DEVICE_DISABLED: &str = "-";
