// Clock abstraction and a timestamp-driven adapter for control elements
// Copyright © 2025 Hs293Go
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;

use num_traits::{Float, NumCast};

use crate::element::CtrlElement;

/// A trait for time-like objects that can be used to measure elapsed time.
///
/// [`Sampled`] uses this trait to turn consecutive timestamps into the time step fed to a
/// control element.
pub trait InstantLike: Sized + Add<Duration, Output = Self> + Copy + Debug + PartialEq {
    /// Returns the amount of time elapsed from another instant to this one, saturating at zero
    /// if `earlier` is actually later
    #[must_use]
    fn duration_since(&self, earlier: Self) -> Duration;
}

macro_rules! integer_instant {
    ($(#[$meta:meta])* $name:ident, $from:ident, $as:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
        pub struct $name(pub u64);

        impl InstantLike for $name {
            fn duration_since(&self, earlier: Self) -> Duration {
                Duration::$from(self.0.saturating_sub(earlier.0))
            }
        }

        impl Add<Duration> for $name {
            type Output = Self;

            fn add(self, rhs: Duration) -> Self::Output {
                $name(self.0 + rhs.$as() as u64)
            }
        }
    };
}

integer_instant!(
    /// Milliseconds since an arbitrary epoch, e.g. the tick counter of an embedded timer
    Millis,
    from_millis,
    as_millis
);

integer_instant!(
    /// Microseconds since an arbitrary epoch
    Micros,
    from_micros,
    as_micros
);

/// Seconds since an arbitrary epoch, as a float.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct TimeF64(pub f64);

impl InstantLike for TimeF64 {
    fn duration_since(&self, earlier: Self) -> Duration {
        let secs = self.0 - earlier.0;
        // NaN falls through to zero as well
        if secs > 0.0 {
            Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
        } else {
            Duration::ZERO
        }
    }
}

impl Add<Duration> for TimeF64 {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        TimeF64(self.0 + rhs.as_secs_f64())
    }
}

#[cfg(feature = "std")]
mod std_instant {
    use super::{Add, Duration, InstantLike};

    /// A thin wrapper around `std::time::Instant` satisfying the `InstantLike` trait.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
    pub struct StdInstant(pub std::time::Instant);

    impl StdInstant {
        /// Returns the current instant.
        pub fn now() -> Self {
            StdInstant(std::time::Instant::now())
        }
    }

    impl InstantLike for StdInstant {
        fn duration_since(&self, earlier: Self) -> Duration {
            self.0.saturating_duration_since(earlier.0)
        }
    }

    impl Add<Duration> for StdInstant {
        type Output = Self;

        fn add(self, rhs: Duration) -> Self::Output {
            StdInstant(self.0 + rhs)
        }
    }
}

#[cfg(feature = "std")]
pub use std_instant::StdInstant;

/// Drives a control element from timestamps instead of explicit time steps.
///
/// The first call only latches the timestamp; each later call feeds the element with the time
/// elapsed since the previous call. Repeating a timestamp therefore yields a zero time step,
/// which every element ignores. The scalar type follows the wrapped element, so `f32` elements
/// work as well as `f64` ones.
///
/// ```rust
/// use discrete_ctrl::filter::Gain;
/// use discrete_ctrl::time::{Millis, Sampled};
///
/// let mut gain = Sampled::new(Gain::new(2.0, 0.0));
/// assert_eq!(gain.update(Millis(0), 1.0), 0.0);
/// assert_eq!(gain.update(Millis(10), 1.0), 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct Sampled<E, I: InstantLike> {
    element: E,
    last_time: Option<I>,
}

impl<E, I: InstantLike> Sampled<E, I> {
    /// Wraps `element`; timekeeping starts at the first update.
    pub fn new(element: E) -> Self {
        Self {
            element,
            last_time: None,
        }
    }

    /// Updates the element with input `u` observed at `timestamp` and returns its output.
    pub fn update<F>(&mut self, timestamp: I, u: F) -> F
    where
        F: Float,
        E: CtrlElement<F>,
    {
        if let Some(last_time) = self.last_time {
            let dt = timestamp.duration_since(last_time).as_secs_f64();
            if let Some(dt) = <F as NumCast>::from(dt) {
                self.element.update(dt, u);
            }
        }
        self.last_time = Some(timestamp);
        self.element.value()
    }

    /// Returns the timestamp of the last update, if any.
    pub fn last_time(&self) -> Option<I> {
        self.last_time
    }

    /// Forgets the last timestamp, so the next update only restarts timekeeping.
    pub fn restart(&mut self) {
        self.last_time = None;
    }

    /// Returns a reference to the wrapped element.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns a mutable reference to the wrapped element.
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Unwraps the element.
    pub fn into_inner(self) -> E {
        self.element
    }
}
