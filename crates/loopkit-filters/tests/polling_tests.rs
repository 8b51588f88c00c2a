//! Polling Stream Tests
//!
//! These run a real background thread, so they assert on eventual values with
//! generous timeouts rather than on exact sample counts.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use loopkit_errors::LoopKitError;
use loopkit_filters::prelude::*;
use loopkit_math::Vec2;

fn init_tracing() {
    // Another test may already have installed a subscriber.
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init()
        .unwrap_or_default();
}

fn wait_for(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }
    false
}

#[test]
fn test_polling_stream_publishes_samples() -> Result<(), LoopKitError> {
    init_tracing();
    let polls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&polls);
    let source = move || {
        let n = counter.fetch_add(1, Ordering::AcqRel) + 1;
        Vec2::new(f64::from(n), 0.0)
    };

    let mut stream = PollingStream::new(source, 0.001)?;
    assert!(stream.is_running());
    assert_eq!(stream.period(), Duration::from_millis(1));

    assert!(wait_for(|| stream.latest().x >= 3.0));
    assert!(polls.load(Ordering::Acquire) >= 3);

    stream.close()?;
    Ok(())
}

#[test]
fn test_close_stops_polling_and_resets_slot() -> Result<(), LoopKitError> {
    let polls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&polls);
    let mut stream = PollingStream::new(
        move || {
            counter.fetch_add(1, Ordering::AcqRel);
            42u32
        },
        0.001,
    )?;

    assert!(wait_for(|| stream.latest() == 42));

    stream.close()?;
    assert!(!stream.is_running());
    assert_eq!(stream.latest(), 0);
    assert_eq!(stream.get(), 0);

    let after_close = polls.load(Ordering::Acquire);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(polls.load(Ordering::Acquire), after_close);

    // Closing again is a no-op.
    stream.close()?;
    Ok(())
}

#[test]
fn test_drop_stops_polling() -> Result<(), LoopKitError> {
    let polls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&polls);
    let stream = PollingStream::new(
        move || {
            counter.fetch_add(1, Ordering::AcqRel);
            true
        },
        0.001,
    )?;

    assert!(wait_for(|| polls.load(Ordering::Acquire) > 0));
    drop(stream);

    let after_drop = polls.load(Ordering::Acquire);
    thread::sleep(Duration::from_millis(20));
    assert_eq!(polls.load(Ordering::Acquire), after_drop);
    Ok(())
}

#[test]
fn test_slow_period_does_not_delay_close() -> Result<(), LoopKitError> {
    let mut stream = PollingStream::new(|| 1.5f64, 60.0)?;
    assert!(wait_for(|| stream.latest() > 1.0));

    let started = Instant::now();
    stream.close()?;
    assert!(started.elapsed() < Duration::from_secs(5));
    Ok(())
}

#[test]
fn test_panicking_source_is_reported_on_close() -> Result<(), LoopKitError> {
    init_tracing();
    let mut stream = PollingStream::new(
        || -> u8 {
            std::panic::panic_any("sensor unplugged");
        },
        0.001,
    )?;

    assert!(wait_for(|| !stream.is_running()));
    assert!(format!("{stream:?}").contains("running: false"));
    assert!(matches!(stream.close(), Err(LoopKitError::Poller(_))));
    assert_eq!(stream.latest(), 0);
    Ok(())
}

#[test]
fn test_invalid_periods_are_rejected() {
    for period in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let result = PollingStream::new(|| 0i64, period);
        assert!(matches!(result, Err(LoopKitError::Validation(_))));
    }
}

#[test]
fn test_polled_stream_feeds_filter_chain() -> Result<(), LoopKitError> {
    let polled = PollingStream::new(|| 2.0f64, 0.001)?;
    assert!(wait_for(|| (polled.latest() - 2.0).abs() < f64::EPSILON));

    let mut filtered = FilteredStream::new(polled).then(from_fn(|x: f64| x * 10.0));
    assert!((filtered.get() - 20.0).abs() < f64::EPSILON);
    Ok(())
}
