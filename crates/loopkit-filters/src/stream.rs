//! Sample producers
//!
//! A [`Stream`] yields the current value of some source each time it is read:
//! a sensor, a joystick axis, a network value. [`FilteredStream`] runs a
//! [`FilterChain`] over every read, and [`PollingStream`] samples a stream on a
//! background thread so readers always see a recent value without blocking on
//! the source.

use core::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use parking_lot::RwLock;
use tracing::{debug, error};

use loopkit_errors::{LoopKitError, ValidationError};

use crate::filter::{Filter, FilterChain};

/// Source of samples of type `T`.
///
/// Any `FnMut() -> T` closure is a stream.
pub trait Stream<T> {
    /// Read the current sample.
    fn get(&mut self) -> T;
}

impl<T, F: FnMut() -> T> Stream<T> for F {
    fn get(&mut self) -> T {
        self()
    }
}

/// A stream whose samples pass through a filter chain.
///
/// ```
/// use loopkit_filters::stream::{FilteredStream, Stream};
/// use loopkit_filters::from_fn;
///
/// let mut raw = 0.0;
/// let source = move || {
///     raw += 1.0;
///     raw
/// };
/// let mut doubled = FilteredStream::new(source).then(from_fn(|x: f64| x * 2.0));
/// assert_eq!(doubled.get(), 2.0);
/// assert_eq!(doubled.get(), 4.0);
/// ```
pub struct FilteredStream<S, T> {
    stream: S,
    filters: FilterChain<T>,
}

impl<S: Stream<T>, T> FilteredStream<S, T> {
    /// Wrap `stream` with an empty chain.
    pub fn new(stream: S) -> Self {
        Self::with_chain(stream, FilterChain::new())
    }

    /// Wrap `stream` with an existing chain.
    pub fn with_chain(stream: S, filters: FilterChain<T>) -> Self {
        Self { stream, filters }
    }

    /// Append a filter to the chain.
    pub fn then(mut self, filter: impl Filter<T> + Send + 'static) -> Self {
        self.filters = self.filters.then(filter);
        self
    }
}

impl<S: Stream<T>, T> Stream<T> for FilteredStream<S, T> {
    fn get(&mut self) -> T {
        let raw = self.stream.get();
        self.filters.get(raw)
    }
}

impl<S, T> fmt::Debug for FilteredStream<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilteredStream")
            .field("filters", &self.filters)
            .finish_non_exhaustive()
    }
}

/// Samples a stream at a fixed period on a dedicated thread.
///
/// The poller writes each sample into a shared slot; [`latest`](Self::latest)
/// returns whatever was written last, which may be up to one period old. Before
/// the first sample and after [`close`](Self::close) the slot holds
/// `T::default()`.
pub struct PollingStream<T: Default> {
    slot: Arc<RwLock<T>>,
    stop: Arc<AtomicBool>,
    period: Duration,
    handle: Option<JoinHandle<()>>,
}

impl<T> PollingStream<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Start polling `stream` every `period_s` seconds.
    ///
    /// # Errors
    ///
    /// Returns [`LoopKitError::Validation`] if `period_s` is not a finite
    /// positive number of seconds, and [`LoopKitError::Poller`] if the polling
    /// thread cannot be spawned.
    pub fn new<S>(mut stream: S, period_s: f64) -> loopkit_errors::Result<Self>
    where
        S: Stream<T> + Send + 'static,
    {
        let period = polling_period(period_s)?;

        let slot = Arc::new(RwLock::new(T::default()));
        let stop = Arc::new(AtomicBool::new(false));

        let thread_slot = Arc::clone(&slot);
        let thread_stop = Arc::clone(&stop);
        let handle = thread::Builder::new()
            .name("loopkit-poller".to_string())
            .spawn(move || {
                let mut next_poll = Instant::now();
                while !thread_stop.load(Ordering::Acquire) {
                    let sample = stream.get();
                    *thread_slot.write() = sample;

                    next_poll += period;
                    match next_poll.checked_duration_since(Instant::now()) {
                        Some(wait) if !wait.is_zero() => thread::park_timeout(wait),
                        // Fell behind; restart the schedule instead of bursting.
                        _ => next_poll = Instant::now(),
                    }
                }
            })
            .map_err(|e| LoopKitError::poller(format!("failed to spawn polling thread: {e}")))?;

        debug!(period_s, "polling stream started");

        Ok(Self {
            slot,
            stop,
            period,
            handle: Some(handle),
        })
    }

    /// The most recently polled sample.
    pub fn latest(&self) -> T {
        self.slot.read().clone()
    }
}

impl<T: Default> PollingStream<T> {
    /// Polling period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the polling thread is still running.
    ///
    /// Turns false once the stream is closed or the source panics. After a
    /// panic [`latest`](Self::latest) keeps returning the last sample until
    /// [`close`](Self::close) reports the panic.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop polling, wait for the thread to exit and reset the slot to the
    /// default value. Closing twice is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`LoopKitError::Poller`] if the polled stream panicked.
    pub fn close(&mut self) -> loopkit_errors::Result<()> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        self.stop.store(true, Ordering::Release);
        handle.thread().unpark();
        let joined = handle.join();

        *self.slot.write() = T::default();
        debug!("polling stream stopped");

        joined.map_err(|panic| {
            let reason = panic
                .downcast_ref::<&str>()
                .map(|message| (*message).to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic payload".to_string());
            error!(%reason, "polling thread panicked");
            LoopKitError::poller(format!("polling thread panicked: {reason}"))
        })
    }
}

impl<T> Stream<T> for PollingStream<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn get(&mut self) -> T {
        self.latest()
    }
}

impl<T: Default> Drop for PollingStream<T> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            error!("failed to stop polling stream: {e}");
        }
    }
}

impl<T: Default> fmt::Debug for PollingStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PollingStream")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

fn polling_period(period_s: f64) -> Result<Duration, ValidationError> {
    let period_s = ValidationError::require_finite("period_s", period_s)?;
    if period_s <= 0.0 {
        return Err(ValidationError::out_of_range(
            "period_s",
            period_s,
            f64::MIN_POSITIVE,
            f64::MAX,
        ));
    }
    Duration::try_from_secs_f64(period_s)
        .map_err(|e| ValidationError::constraint(format!("period_s {period_s}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::from_fn;

    #[test]
    fn test_closure_is_stream() {
        let mut count = 0;
        let mut stream = move || {
            count += 1;
            count
        };
        assert_eq!(Stream::get(&mut stream), 1);
        assert_eq!(Stream::get(&mut stream), 2);
    }

    #[test]
    fn test_filtered_stream_applies_chain_in_order() {
        let mut stream = FilteredStream::new(|| 3.0)
            .then(from_fn(|x: f64| x - 1.0))
            .then(from_fn(|x: f64| x * 10.0));
        assert!((stream.get() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polling_period_validation() {
        assert!(polling_period(0.0).is_err());
        assert!(polling_period(-0.5).is_err());
        assert!(polling_period(f64::NAN).is_err());
        assert!(polling_period(f64::INFINITY).is_err());
        assert!(matches!(polling_period(0.5), Ok(d) if d == Duration::from_millis(500)));
    }

    #[test]
    fn test_polling_stream_rejects_bad_period() {
        let result = PollingStream::new(|| 1u32, 0.0);
        assert!(matches!(result, Err(LoopKitError::Validation(_))));
    }
}
