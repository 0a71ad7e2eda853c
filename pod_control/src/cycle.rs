//! The control loop orchestrator (§4.3, §5).
//!
//! Runs the sense → classify → actuate → report cycle until the mode
//! machine reaches `Shutdown`. No fixed period: the loop runs as fast as
//! scheduling and I/O allow, yielding at the end of every iteration so
//! lower-priority peer threads (logging, command server) are not starved.

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use pod_common::config::Thresholds;
use pod_common::error::GpioError;
use pod_common::hal::{GpioWriter, SensorReader, ShutdownHook};
use pod_common::mode::PodMode;

use crate::command::apply_actuators;
use crate::error::CycleError;
use crate::safety::ImuFailureTracker;
use crate::state::machine::PodStateMachine;
use crate::state::PodState;

/// One second, in whichever duration type the tick comparison uses (§4.3 step 2).
const TICK_PERIOD: Duration = Duration::from_secs(1);

/// A request delivered on the shutdown channel, translated from a POSIX
/// signal by the surrounding application (§5 "Cancellation", §9 Part C).
///
/// Kept as a one-variant enum rather than a bare flag so a future signal
/// taxonomy addition (e.g. a distinct "drain and stop accepting commands"
/// request) doesn't need a new channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownRequest {
    /// SIGINT/SIGTERM/SIGHUP: force `Emergency` unless already `Boot`/`Shutdown`.
    Graceful,
}

/// Why [`CycleRunner::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The mode machine reached `Shutdown` on its own (§6 exit code 1).
    ReachedShutdown,
    /// A shutdown signal arrived while in `Boot`, so the loop never started
    /// driving the pod and exited immediately (§5 "Boot synchronisation").
    ExitedFromBoot,
    /// A shutdown signal forced `Emergency` and the loop subsequently
    /// reached `Shutdown` under that forced stop (§6 exit code 2).
    SignalForcedShutdown,
}

/// Owns `PodState`, the mode machine, and everything the cycle body needs
/// to read sensors, classify, and actuate once per iteration.
pub struct CycleRunner<R, W, H>
where
    R: SensorReader,
    W: GpioWriter,
    H: ShutdownHook,
{
    pub state: PodState,
    pub machine: PodStateMachine,
    thresholds: Thresholds,
    sensors: R,
    gpio: W,
    shutdown_hook: H,
    imu_tracker: ImuFailureTracker,
    shutdown_rx: Option<Receiver<ShutdownRequest>>,
    iteration: u64,
    last_tick_at: Instant,
    iterations_since_tick: u64,
}

impl<R, W, H> CycleRunner<R, W, H>
where
    R: SensorReader,
    W: GpioWriter,
    H: ShutdownHook,
{
    pub fn new(state: PodState, thresholds: Thresholds, sensors: R, gpio: W, shutdown_hook: H) -> Self {
        Self {
            state,
            machine: PodStateMachine::new(),
            thresholds,
            sensors,
            gpio,
            shutdown_hook,
            imu_tracker: ImuFailureTracker::new(),
            shutdown_rx: None,
            iteration: 0,
            last_tick_at: Instant::now(),
            iterations_since_tick: 0,
        }
    }

    /// Wire an external shutdown channel (§5 "Cancellation"). Without one,
    /// the loop only ever exits via the mode machine reaching `Shutdown`.
    pub fn with_shutdown_channel(mut self, rx: Receiver<ShutdownRequest>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Mutable access to the sensor facade, so a test can change what the
    /// next `run_iteration` reads without rebuilding the whole runner.
    pub fn sensors_mut(&mut self) -> &mut R {
        &mut self.sensors
    }

    /// Mutable access to the GPIO facade, so a test can inspect recorded
    /// writes without rebuilding the whole runner.
    pub fn gpio_mut(&mut self) -> &mut W {
        &mut self.gpio
    }

    /// Run until the mode machine reaches `Shutdown` or a shutdown signal
    /// short-circuits out of `Boot` (§4.3, §5).
    pub fn run(&mut self) -> Result<RunOutcome, CycleError> {
        let mut signal_forced = false;
        loop {
            if self.poll_shutdown_signal() {
                if matches!(self.machine.mode(), PodMode::Boot | PodMode::Shutdown) {
                    return Ok(RunOutcome::ExitedFromBoot);
                }
                self.machine.force_emergency("shutdown signal received");
                signal_forced = true;
            }

            self.run_iteration()?;

            if self.machine.mode() == PodMode::Shutdown {
                self.shutdown_hook.on_shutdown();
                return Ok(if signal_forced {
                    RunOutcome::SignalForcedShutdown
                } else {
                    RunOutcome::ReachedShutdown
                });
            }

            std::thread::yield_now();
        }
    }

    /// Check the shutdown channel without blocking.
    fn poll_shutdown_signal(&self) -> bool {
        match &self.shutdown_rx {
            Some(rx) => matches!(rx.try_recv(), Ok(ShutdownRequest::Graceful)),
            None => false,
        }
    }

    /// One sense → classify → actuate → report pass (§4.3).
    ///
    /// Public so integration tests and benchmarks can drive single
    /// iterations directly instead of only through [`Self::run`]'s loop.
    pub fn run_iteration(&mut self) -> Result<(), CycleError> {
        let iteration_start = Instant::now();
        let one_second_tick = iteration_start.duration_since(self.last_tick_at) > TICK_PERIOD;

        self.sense(iteration_start);
        self.classify();
        self.actuate()?;

        if one_second_tick {
            self.report();
            self.last_tick_at = iteration_start;
            self.iterations_since_tick = 0;
        }

        self.iteration += 1;
        self.iterations_since_tick += 1;
        Ok(())
    }

    /// Pull fresh samples into `PodState`; force `Emergency` on sensor
    /// failures per the taxonomy in §7 ("Sensor transient"/"Sensor hard").
    fn sense(&mut self, _iteration_start: Instant) {
        match self.sensors.read_imu() {
            Ok(sample) => {
                self.state.position_x = sample.position_x;
                self.state.velocity_x = sample.velocity_x;
                self.state.accel_x = sample.accel_x;
                if self.imu_tracker.record(self.iteration, true) {
                    self.machine.force_emergency("IMU failure window saturated");
                }
            }
            Err(error) => {
                tracing::warn!(%error, "IMU read failed");
                if self.imu_tracker.record(self.iteration, false) {
                    self.machine.force_emergency("IMU failure window saturated");
                }
            }
        }

        match self.sensors.read_skates() {
            Ok(sample) => {
                self.state.front_left_z = sample.front_left_z;
                self.state.front_right_z = sample.front_right_z;
                self.state.rear_left_z = sample.rear_left_z;
                self.state.rear_right_z = sample.rear_right_z;
                self.state.skate_thermocouples = sample.thermocouples;
            }
            Err(error) => {
                tracing::error!(%error, "skate sensor read failed");
                self.machine.force_emergency("skate sensor read failed");
            }
        }

        match self.sensors.read_lateral() {
            Ok(sample) => {
                self.state.lateral_front_left = sample.front_left;
                self.state.lateral_front_right = sample.front_right;
                self.state.lateral_rear_left = sample.rear_left;
                self.state.lateral_rear_right = sample.rear_right;
            }
            Err(error) => {
                tracing::error!(%error, "lateral sensor read failed");
                self.machine.force_emergency("lateral sensor read failed");
            }
        }

        if let Ok(sample) = self.sensors.read_brakes() {
            self.state.brakes = sample;
        }

        self.state.mode = self.machine.mode();
    }

    /// Run general checks then the mode-specific check (§4.1).
    fn classify(&mut self) {
        self.machine.run_general_checks(&self.state, &self.thresholds);
        self.machine.run_mode_specific_check(&self.state, &self.thresholds);
        self.state.mode = self.machine.mode();
    }

    /// Project the (possibly just-updated) mode onto solenoid commands.
    fn actuate(&mut self) -> Result<(), GpioError> {
        apply_actuators(&mut self.state, &self.thresholds, &mut self.gpio)
    }

    /// Emit the one-second heartbeat (§4.3 step 6).
    fn report(&self) {
        tracing::info!(iter_per_sec = self.iterations_since_tick, mode = %self.machine.mode(), "pod control heartbeat");
        if self.machine.mode() == PodMode::Boot {
            tracing::info!("pod state is Boot, waiting for operator");
        }
    }
}
