//! Controller Benchmarks
//!
//! Per-update cost of the controllers a mechanism runs each period. Groups
//! pay one dynamic dispatch per member on top of the members themselves.

use criterion::{Criterion, criterion_group, criterion_main};
use loopkit_control::prelude::*;
use loopkit_filters::clock::FixedStepClock;
use loopkit_math::Angle;

const PERIOD: f64 = 0.02;

fn bench_pid(c: &mut Criterion) {
    let mut pid = PidController::with_clock(1.2, 0.1, 0.05, FixedStepClock::new(PERIOD))
        .with_integral_range(0.5)
        .with_output_limit(12.0);

    c.bench_function("pid_scalar", |b| {
        b.iter(|| pid.update(std::hint::black_box(1.0_f64), std::hint::black_box(0.4)))
    });
}

fn bench_angle_pid(c: &mut Criterion) {
    let mut pid = PidController::with_clock(1.2, 0.0, 0.05, FixedStepClock::new(PERIOD));
    let setpoint = Angle::from_degrees(-170.0);
    let measurement = Angle::from_degrees(175.0);

    c.bench_function("pid_angle", |b| {
        b.iter(|| {
            pid.update(
                std::hint::black_box(setpoint),
                std::hint::black_box(measurement),
            )
        })
    });
}

fn bench_arm_group(c: &mut Criterion) {
    let motor = MotorFeedforward::with_clock(0.1, 1.5, 0.02, FixedStepClock::new(PERIOD));
    let mut arm = Tracked::new(
        PidController::with_clock(3.0, 0.2, 0.1, FixedStepClock::new(PERIOD))
            .add(ArmFeedforward::new(0.4))
            .add(PositionFeedforward::with_clock(
                motor,
                FixedStepClock::new(PERIOD),
            )),
    );
    let mut setpoint = Angle::ZERO;
    let measurement = Angle::from_degrees(12.0);

    c.bench_function("arm_group", |b| {
        b.iter(|| {
            setpoint = setpoint.add_degrees(0.5);
            arm.update(
                std::hint::black_box(setpoint),
                std::hint::black_box(measurement),
            )
        })
    });
}

criterion_group!(benches, bench_pid, bench_angle_pid, bench_arm_group);
criterion_main!(benches);
