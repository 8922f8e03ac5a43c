// Anti-windup strategies shaping the final output of the PID controller
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

use alloc::boxed::Box;

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{self, ConfigError};
use crate::saturation::Bounds;

/// The raw proportional, integral and derivative contributions computed by the PID core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PidTerms<F: Float> {
    /// `kp * error`
    pub p: F,
    /// `ki * error_i`
    pub i: F,
    /// `kd * error_d`
    pub d: F,
}

impl<F: Float> PidTerms<F> {
    /// Returns the unsaturated controller output.
    #[inline]
    pub fn sum(&self) -> F {
        self.p + self.i + self.d
    }
}

/// What an anti-windup strategy hands back to the PID core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaped<F: Float> {
    /// The final controller output
    pub value: F,
    /// The integral accumulator the controller should carry into the next step
    pub error_i: F,
}

/// Shapes the final PID output and optionally corrects the integral accumulator.
///
/// The PID core has already advanced `error_i` by `error * dt` when `update` is called. A
/// strategy may override it to stop the integral term from growing while the output is pinned
/// at a saturation bound.
pub trait AntiWindup<F: Float> {
    /// Computes the output from the raw P/I/D terms.
    ///
    /// # Arguments
    /// - `dt`: The (strictly positive) time step of the current update.
    /// - `terms`: The raw P/I/D contributions.
    /// - `ki`: The integral gain of the controller.
    /// - `error_i`: The integral accumulator, already advanced for this step.
    fn update(&mut self, dt: F, terms: PidTerms<F>, ki: F, error_i: F) -> Shaped<F>;

    /// Resynchronises any internal state after the controller reset or overrode its
    /// accumulator to `error_i`.
    fn reset(&mut self, _error_i: F) {}
}

impl<F: Float, A: AntiWindup<F> + ?Sized> AntiWindup<F> for Box<A> {
    fn update(&mut self, dt: F, terms: PidTerms<F>, ki: F, error_i: F) -> Shaped<F> {
        (**self).update(dt, terms, ki, error_i)
    }

    fn reset(&mut self, error_i: F) {
        (**self).reset(error_i)
    }
}

/// No saturation and no anti-windup: the output is the plain sum of the three terms.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Unbounded;

impl<F: Float> AntiWindup<F> for Unbounded {
    fn update(&mut self, _dt: F, terms: PidTerms<F>, _ki: F, error_i: F) -> Shaped<F> {
        Shaped {
            value: terms.sum(),
            error_i,
        }
    }
}

/// Back-calculation anti-windup.
///
/// On every step the integral accumulator is reconstructed so that adding the integral term to
/// the saturated P+D terms reproduces the saturated output exactly:
///
/// `error_i = (satur(y) - satur(y_p + y_d)) / ki`
///
/// While neither the output nor the P+D terms saturate this is the identity up to rounding. Once
/// the P+D terms saturate on their own, the accumulator is pulled back even if the integral term
/// keeps the output inside the bounds. The reconstruction is skipped when `ki` is zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct BackCalc<F: Float> {
    bounds: Bounds<F>,
}

impl<F: Float> BackCalc<F> {
    /// Creates a back-calculation strategy saturating at `bounds`.
    pub fn new(bounds: Bounds<F>) -> Self {
        Self { bounds }
    }

    /// Returns the saturation bounds.
    pub fn bounds(&self) -> Bounds<F> {
        self.bounds
    }

    /// Sets the saturation bounds.
    pub fn set_bounds(&mut self, bounds: Bounds<F>) {
        self.bounds = bounds;
    }
}

impl<F: Float> AntiWindup<F> for BackCalc<F> {
    fn update(&mut self, _dt: F, terms: PidTerms<F>, ki: F, error_i: F) -> Shaped<F> {
        let y = terms.sum();
        let value = self.bounds.apply(y);

        let error_i = if ki.abs() > F::zero() {
            let y_pd = self.bounds.apply(terms.p + terms.d);
            (value - y_pd) / ki
        } else {
            error_i
        };

        Shaped { value, error_i }
    }
}

/// Conditional integration anti-windup.
///
/// Whenever the output saturates, the integral accumulator is rolled back to its value from the
/// last step, freezing the integral term until the output leaves the bound.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct CondCalc<F: Float> {
    bounds: Bounds<F>,
    #[cfg_attr(feature = "serde", serde(skip))]
    error_i_prev: F,
}

impl<F: Float> CondCalc<F> {
    /// Creates a conditional integration strategy saturating at `bounds`.
    pub fn new(bounds: Bounds<F>) -> Self {
        Self {
            bounds,
            error_i_prev: F::zero(),
        }
    }

    /// Returns the saturation bounds.
    pub fn bounds(&self) -> Bounds<F> {
        self.bounds
    }

    /// Sets the saturation bounds.
    pub fn set_bounds(&mut self, bounds: Bounds<F>) {
        self.bounds = bounds;
    }

    /// Returns the accumulator value the integral term is frozen at upon saturation.
    pub fn error_i_prev(&self) -> F {
        self.error_i_prev
    }
}

impl<F: Float> AntiWindup<F> for CondCalc<F> {
    fn update(&mut self, _dt: F, terms: PidTerms<F>, _ki: F, error_i: F) -> Shaped<F> {
        let y = terms.sum();
        let value = self.bounds.apply(y);

        let error_i = if y != value { self.error_i_prev } else { error_i };
        self.error_i_prev = error_i;

        Shaped { value, error_i }
    }

    fn reset(&mut self, error_i: F) {
        self.error_i_prev = error_i;
    }
}

/// Filtered (feedback) anti-windup.
///
/// The saturation excess `delta = y - satur(y)` is fed back into the integral accumulator through
/// the gain `kaw`: `error_i -= kaw * delta * dt`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct FilterAw<F: Float> {
    bounds: Bounds<F>,
    kaw: F,
}

impl<F: Float> FilterAw<F> {
    /// Creates a filtered anti-windup strategy.
    ///
    /// # Errors
    /// - `ConfigError::InvalidAntiWindupGain` if `kaw` is negative or not finite.
    pub fn new(bounds: Bounds<F>, kaw: F) -> Result<Self, ConfigError> {
        let kaw = error::non_negative_finite(kaw, ConfigError::InvalidAntiWindupGain)?;
        Ok(Self { bounds, kaw })
    }

    /// Returns the saturation bounds.
    pub fn bounds(&self) -> Bounds<F> {
        self.bounds
    }

    /// Sets the saturation bounds.
    pub fn set_bounds(&mut self, bounds: Bounds<F>) {
        self.bounds = bounds;
    }

    /// Returns the anti-windup feedback gain.
    pub fn kaw(&self) -> F {
        self.kaw
    }

    /// Sets the anti-windup feedback gain.
    ///
    /// # Errors
    /// - `ConfigError::InvalidAntiWindupGain` if `kaw` is negative or not finite.
    pub fn set_kaw(&mut self, kaw: F) -> Result<(), ConfigError> {
        self.kaw = error::non_negative_finite(kaw, ConfigError::InvalidAntiWindupGain)?;
        Ok(())
    }
}

impl<F: Float> AntiWindup<F> for FilterAw<F> {
    fn update(&mut self, dt: F, terms: PidTerms<F>, _ki: F, error_i: F) -> Shaped<F> {
        let y = terms.sum();
        let value = self.bounds.apply(y);
        let delta = y - value;

        Shaped {
            value,
            error_i: error_i - self.kaw * delta * dt,
        }
    }
}
