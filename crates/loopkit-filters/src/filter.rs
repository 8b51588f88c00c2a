//! The filter capability and its composition
//!
//! A filter receives the newest raw sample once per control cycle and returns
//! the filtered sample. The same trait serves all four signal families:
//!
//! | family  | type     | boxed alias      |
//! |---------|----------|------------------|
//! | scalar  | `f64`    | [`ScalarFilter`] |
//! | boolean | `bool`   | [`BoolFilter`]   |
//! | vector  | [`Vec2`] | [`VectorFilter`] |
//! | angle   | [`Angle`]| [`AngleFilter`]  |

use core::fmt;

use loopkit_math::{Angle, Vec2};

/// Stateful single-input single-output transform.
///
/// Each call may depend on every earlier call and on the time elapsed since
/// the previous one.
pub trait Filter<T> {
    /// Feed the next raw sample and get the filtered sample.
    fn get(&mut self, next: T) -> T;
}

impl<T, F: Filter<T> + ?Sized> Filter<T> for Box<F> {
    #[inline]
    fn get(&mut self, next: T) -> T {
        (**self).get(next)
    }
}

impl<T, F: Filter<T> + ?Sized> Filter<T> for &mut F {
    #[inline]
    fn get(&mut self, next: T) -> T {
        (**self).get(next)
    }
}

/// Owned, type-erased filter.
pub type BoxedFilter<T> = Box<dyn Filter<T> + Send>;

/// Boxed `f64` filter.
pub type ScalarFilter = BoxedFilter<f64>;

/// Boxed `bool` filter.
pub type BoolFilter = BoxedFilter<bool>;

/// Boxed [`Vec2`] filter.
pub type VectorFilter = BoxedFilter<Vec2>;

/// Boxed [`Angle`] filter.
pub type AngleFilter = BoxedFilter<Angle>;

/// Box a filter for storage in a [`FilterChain`] or a boxed alias.
pub fn boxed<T, F: Filter<T> + Send + 'static>(filter: F) -> BoxedFilter<T> {
    Box::new(filter)
}

/// Filter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFilter;

impl<T> Filter<T> for IdentityFilter {
    #[inline]
    fn get(&mut self, next: T) -> T {
        next
    }
}

/// Filter backed by a closure, see [`from_fn`].
#[derive(Clone, Copy)]
pub struct FnFilter<F> {
    f: F,
}

/// Wrap a closure as a filter.
///
/// ```
/// use loopkit_filters::{Filter, from_fn};
///
/// let mut deadband = from_fn(|x: f64| if x.abs() < 0.05 { 0.0 } else { x });
/// assert_eq!(deadband.get(0.01), 0.0);
/// assert_eq!(deadband.get(0.5), 0.5);
/// ```
pub fn from_fn<T, F: FnMut(T) -> T>(f: F) -> FnFilter<F> {
    FnFilter { f }
}

impl<T, F: FnMut(T) -> T> Filter<T> for FnFilter<F> {
    #[inline]
    fn get(&mut self, next: T) -> T {
        (self.f)(next)
    }
}

impl<F> fmt::Debug for FnFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFilter").finish_non_exhaustive()
    }
}

/// Ordered sequence of filters applied left to right.
///
/// Each filter's output is the next filter's input. An empty chain is the
/// identity.
///
/// ```
/// use loopkit_filters::{Filter, FilterChain, from_fn};
///
/// let mut chain = FilterChain::new()
///     .then(from_fn(|x: f64| x * 2.0))
///     .then(from_fn(|x: f64| x + 1.0));
/// assert_eq!(chain.get(3.0), 7.0);
///
/// let mut identity = FilterChain::<f64>::new();
/// assert_eq!(identity.get(3.0), 3.0);
/// ```
pub struct FilterChain<T> {
    filters: Vec<BoxedFilter<T>>,
}

impl<T> FilterChain<T> {
    /// Empty chain.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Chain the given filters in order.
    pub fn compose(filters: impl IntoIterator<Item = BoxedFilter<T>>) -> Self {
        Self {
            filters: filters.into_iter().collect(),
        }
    }

    /// Append a filter to the end of the chain.
    pub fn then(mut self, filter: impl Filter<T> + Send + 'static) -> Self {
        self.push(Box::new(filter));
        self
    }

    /// Append an already boxed filter to the end of the chain.
    pub fn push(&mut self, filter: BoxedFilter<T>) {
        self.filters.push(filter);
    }

    /// Number of filters in the chain.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the chain is the identity.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<T> Default for FilterChain<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Filter<T> for FilterChain<T> {
    fn get(&mut self, next: T) -> T {
        self.filters
            .iter_mut()
            .fold(next, |value, filter| filter.get(value))
    }
}

impl<T> FromIterator<BoxedFilter<T>> for FilterChain<T> {
    fn from_iter<I: IntoIterator<Item = BoxedFilter<T>>>(iter: I) -> Self {
        Self::compose(iter)
    }
}

impl<T> fmt::Debug for FilterChain<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("len", &self.filters.len())
            .finish()
    }
}

/// Build a [`FilterChain`] from filter expressions, boxing each one.
///
/// ```
/// use loopkit_filters::{Filter, compose, from_fn};
///
/// let mut chain = compose![from_fn(|x: f64| x - 1.0), from_fn(|x: f64| x * 10.0)];
/// assert_eq!(chain.get(2.0), 10.0);
///
/// let mut empty = compose![];
/// assert!(empty.get(true));
/// ```
#[macro_export]
macro_rules! compose {
    ($($filter:expr),* $(,)?) => {
        $crate::FilterChain::compose(::std::vec![
            $($crate::filter::boxed($filter)),*
        ])
    };
}

/// Vector filter that runs one scalar filter per axis.
///
/// Lets rate limiters and smoothers written for `f64` streams shape 2D
/// streams without a vector-specific implementation.
///
/// ```
/// use loopkit_filters::{Filter, XYFilter, from_fn};
/// use loopkit_math::Vec2;
///
/// let mut filter = XYFilter::new(from_fn(|x: f64| -x), from_fn(|y: f64| y * 2.0));
/// assert_eq!(filter.get(Vec2::new(1.0, 1.0)), Vec2::new(-1.0, 2.0));
/// ```
#[derive(Debug, Clone)]
pub struct XYFilter<X, Y> {
    x: X,
    y: Y,
}

impl<X: Filter<f64>, Y: Filter<f64>> XYFilter<X, Y> {
    /// Filter x with `x` and y with `y`.
    pub fn new(x: X, y: Y) -> Self {
        Self { x, y }
    }

    /// The x-axis filter.
    pub fn x_filter(&self) -> &X {
        &self.x
    }

    /// The y-axis filter.
    pub fn y_filter(&self) -> &Y {
        &self.y
    }
}

impl<X: Filter<f64>, Y: Filter<f64>> Filter<Vec2> for XYFilter<X, Y> {
    fn get(&mut self, next: Vec2) -> Vec2 {
        Vec2::new(self.x.get(next.x), self.y.get(next.y))
    }
}
