//! Cycle benchmark — measure one sense/classify/actuate/report pass of
//! the control loop's per-cycle hot path.

use criterion::{criterion_group, criterion_main, Criterion};

use pod_common::actuator::PinMap;
use pod_common::config::Thresholds;
use pod_control::adapters::SimulationAdapter;
use pod_control::cycle::CycleRunner;
use pod_control::state::PodState;

fn pins() -> PinMap {
    PinMap {
        wheel_brake_pins: [0, 1, 2, 3],
        ebrake_pins: [4, 5, 6, 7],
        skate_pins: [8, 9, 10, 11],
    }
}

/// A sensor adapter with skate heights/thermocouples set so the general
/// safety checks don't immediately force `Emergency`.
fn safe_sim() -> SimulationAdapter {
    let mut sim = SimulationAdapter::new();
    sim.skates.front_left_z = 1.0;
    sim.skates.front_right_z = 1.0;
    sim.skates.rear_left_z = 1.0;
    sim.skates.rear_right_z = 1.0;
    sim.skates.thermocouples = [25, 25, 25, 25];
    sim
}

/// A runner sitting in `Ready`, with enough headroom in its thresholds
/// that it stays in steady state for every iteration the benchmark runs.
fn steady_state_runner() -> CycleRunner<SimulationAdapter, SimulationAdapter, SimulationAdapter> {
    let mut thresholds = Thresholds::default();
    thresholds.maximum_safe_forward_velocity = 1_000.0;
    thresholds.maximum_safe_distance_before_braking = 1_000_000.0;

    let mut state = PodState::new(pins());
    state.ready = true;

    CycleRunner::new(state, thresholds, safe_sim(), SimulationAdapter::new(), SimulationAdapter::new())
}

fn bench_single_iteration(c: &mut Criterion) {
    c.bench_function("cycle_iteration_ready", |b| {
        b.iter_batched(
            steady_state_runner,
            |mut runner| {
                runner.run_iteration().unwrap();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

fn bench_iteration_through_envelope(c: &mut Criterion) {
    c.bench_function("cycle_iteration_pushing", |b| {
        b.iter_batched(
            || {
                let mut thresholds = Thresholds::default();
                thresholds.maximum_safe_forward_velocity = 1_000.0;
                thresholds.maximum_safe_distance_before_braking = 1_000_000.0;

                let mut state = PodState::new(pins());
                state.ready = true;

                let mut sensors = safe_sim();
                sensors.kinematics.accel_x = 2.0;

                let mut runner =
                    CycleRunner::new(state, thresholds, sensors, SimulationAdapter::new(), SimulationAdapter::new());
                runner.run_iteration().unwrap(); // Boot -> Ready
                runner
            },
            |mut runner| {
                runner.run_iteration().unwrap();
            },
            criterion::BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_single_iteration, bench_iteration_through_envelope);
criterion_main!(benches);
