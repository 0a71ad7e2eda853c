//! # Pod Control Library
//!
//! Real-time supervisory brain for a Hyperloop-style pod. Provides a
//! deterministic sense → classify → actuate → report cycle that reads
//! sensor feedback, runs the mode state machine, and produces solenoid
//! commands for the levitation skates and both braking subsystems.
//!
//! ## Architecture
//!
//! 1. [`state`] — `PodState`, the shared sensor/actuator record, and the
//!    mode state machine (`state::machine`).
//! 2. [`safety`] — mode-independent safety checks and the IMU failure
//!    sliding bitmap.
//! 3. [`command`] — the actuator projector and override-mask gating.
//! 4. [`adapters`] — sensor/GPIO facade glue, including a simulation
//!    adapter for tests and offline runs.
//! 5. [`cycle`] — the control loop orchestrator.
//! 6. [`config`] — TOML configuration loading and validation.
//! 7. [`hal`] — boot-time pin setup.
//! 8. [`rt`] — optional (`rt` feature) RT scheduling setup for the control thread.

pub mod adapters;
pub mod command;
pub mod config;
pub mod cycle;
pub mod error;
pub mod hal;
pub mod rt;
pub mod safety;
pub mod state;
