//! Property-Based Tests for Filters
//!
//! Bounds that must hold for every input sequence: rate limits never move
//! faster than allowed, smoothing never leaves the span of its inputs, and an
//! empty chain never changes a sample.

use loopkit_filters::prelude::*;
use loopkit_math::{Angle, Vec2};

const PERIOD: f64 = 0.02;

#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn empty_chain_is_identity(x in proptest::num::f64::ANY) {
            let mut chain = FilterChain::<f64>::new();
            prop_assert_eq!(chain.get(x).to_bits(), x.to_bits());
        }

        #[test]
        fn empty_angle_chain_is_identity(degrees in -1e4f64..1e4) {
            let mut chain: FilterChain<Angle> = compose![];
            let angle = Angle::from_degrees(degrees);
            prop_assert_eq!(chain.get(angle), angle);
        }

        #[test]
        fn rate_limit_never_exceeds_rate(
            rate in 0.1f64..100.0,
            inputs in proptest::collection::vec(-1e3f64..1e3, 1..64)
        ) {
            let mut limit = RateLimit::with_clock(rate, FixedStepClock::new(PERIOD));
            let mut previous = 0.0;
            for input in inputs {
                let output = limit.get(input);
                prop_assert!((output - previous).abs() <= rate * PERIOD + 1e-9);
                previous = output;
            }
        }

        #[test]
        fn angle_rate_limit_never_exceeds_rate(
            rate in 0.1f64..50.0,
            inputs in proptest::collection::vec(-720.0f64..720.0, 1..64)
        ) {
            let mut limit = AngleRateLimit::with_clock(rate, FixedStepClock::new(PERIOD));
            let mut previous = Angle::ZERO;
            for degrees in inputs {
                let output = limit.get(Angle::from_degrees(degrees));
                let moved = previous.distance_to(output).to_radians().abs();
                prop_assert!(moved <= rate * PERIOD + 1e-9);
                previous = output;
            }
        }

        #[test]
        fn vector_rate_limit_never_exceeds_rate(
            rate in 0.1f64..100.0,
            inputs in proptest::collection::vec((-100.0f64..100.0, -100.0f64..100.0), 1..64)
        ) {
            let mut limit = VectorRateLimit::with_clock(rate, FixedStepClock::new(PERIOD));
            let mut previous = Vec2::ORIGIN;
            for (x, y) in inputs {
                let output = limit.get(Vec2::new(x, y));
                prop_assert!((output - previous).magnitude() <= rate * PERIOD + 1e-9);
                previous = output;
            }
        }

        #[test]
        fn low_pass_stays_between_output_and_input(
            rc in 0.001f64..10.0,
            inputs in proptest::collection::vec(-1e3f64..1e3, 1..64)
        ) {
            let mut smooth = LowPass::with_clock(rc, FixedStepClock::new(PERIOD));
            let mut previous = 0.0f64;
            for input in inputs {
                let output = smooth.get(input);
                let low = previous.min(input) - 1e-9;
                let high = previous.max(input) + 1e-9;
                prop_assert!(output >= low && output <= high);
                previous = output;
            }
        }

        #[test]
        fn jerk_limit_bounds_hold_for_any_targets(
            accel in 0.5f64..20.0,
            jerk in 0.5f64..200.0,
            targets in proptest::collection::vec(-180.0f64..180.0, 1..32)
        ) {
            let mut filter = AngleJerkLimit::with_clock(
                accel,
                jerk,
                loopkit_filters::jerk_limit::DEFAULT_STEPS,
                FixedStepClock::new(PERIOD),
            );
            let mut previous_output = filter.output();
            let mut previous_accel = filter.acceleration();
            for degrees in targets {
                let output = filter.get(Angle::from_degrees(degrees));
                let moved = previous_output.distance_to(output).to_radians().abs();
                prop_assert!(moved <= accel * PERIOD + 1e-9);
                prop_assert!((filter.acceleration() - previous_accel).abs() <= jerk * PERIOD + 1e-9);
                prop_assert!(filter.acceleration().abs() <= accel + 1e-9);
                previous_output = output;
                previous_accel = filter.acceleration();
            }
        }

        #[test]
        fn unlimited_jerk_limit_tracks_target(degrees in -179.0f64..179.0) {
            let mut filter = AngleJerkLimit::with_clock(
                0.0,
                0.0,
                loopkit_filters::jerk_limit::DEFAULT_STEPS,
                FixedStepClock::new(PERIOD),
            );
            let output = filter.get(Angle::from_degrees(degrees));
            prop_assert!((output.to_degrees() - degrees).abs() < 1e-6);
        }
    }
}

#[cfg(test)]
mod quickcheck_tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen, QuickCheck, TestResult};

    #[derive(Debug, Clone)]
    struct Samples(Vec<bool>);

    impl Arbitrary for Samples {
        fn arbitrary(g: &mut Gen) -> Self {
            let len = usize::arbitrary(g) % 64 + 1;
            Samples((0..len).map(|_| bool::arbitrary(g)).collect())
        }
    }

    /// With the input flipping every period, no debounce longer than one
    /// period can ever see a stable input, so the output never leaves its
    /// resting value.
    fn prop_debounce_ignores_alternation(start: bool, periods: u8) -> TestResult {
        if periods < 2 {
            return TestResult::discard();
        }

        let time = SimulatedTime::new();
        let duration = f64::from(periods) * PERIOD;
        let mut rising = Rising::with_clock(duration, time.clock());
        let mut falling = Falling::with_clock(duration, time.clock());
        let mut both = Both::with_clock(duration, time.clock());

        let mut input = start;
        for _ in 0..200 {
            time.advance(PERIOD);
            if rising.get(input) || !falling.get(input) || both.get(input) {
                return TestResult::failed();
            }
            input = !input;
        }

        TestResult::passed()
    }

    /// Zero-duration rising debounce passes input through once any time has
    /// elapsed between samples.
    fn prop_zero_duration_is_pass_through(samples: Samples) -> bool {
        let time = SimulatedTime::new();
        let mut rising = Rising::with_clock(0.0, time.clock());
        samples.0.into_iter().all(|sample| {
            time.advance(PERIOD);
            rising.get(sample) == sample
        })
    }

    #[quickcheck_macros::quickcheck]
    fn prop_unlimited_rate_limit_is_pass_through(inputs: Vec<i32>) -> bool {
        let mut limit = RateLimit::with_clock(0.0, FixedStepClock::new(PERIOD));
        inputs.into_iter().map(f64::from).all(|input| {
            limit.get(input).to_bits() == input.to_bits()
        })
    }

    #[test]
    fn quickcheck_debounce_ignores_alternation() {
        QuickCheck::new()
            .tests(200)
            .quickcheck(prop_debounce_ignores_alternation as fn(bool, u8) -> TestResult);
    }

    #[test]
    fn quickcheck_zero_duration_is_pass_through() {
        QuickCheck::new()
            .tests(500)
            .quickcheck(prop_zero_duration_is_pass_through as fn(Samples) -> bool);
    }
}
