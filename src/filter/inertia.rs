// First- and second-order inertia elements
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

use num_traits::Float;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::{is_step, CtrlElement};
use crate::error::{self, ConfigError};

/// First-order inertia (lag), `G(s) = 1 / (tc * s + 1)`.
///
/// Discretised exactly for a zero-order-held input: `y += (1 - exp(-dt / tc)) * (u - y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Inertia<F: Float> {
    time_const: F,
    value: F,
}

impl<F: Float> Default for Inertia<F> {
    fn default() -> Self {
        Self::new(F::one(), F::zero())
    }
}

impl<F: Float> Inertia<F> {
    /// Advances a first-order lag with time constant `tc` from output `y` by `dt` under input `u`.
    ///
    /// A time constant that is not strictly positive makes the lag transparent, returning `u`.
    #[inline]
    pub fn calculate(u: F, y: F, dt: F, tc: F) -> F {
        if tc > F::zero() {
            y + (F::one() - (-dt / tc).exp()) * (u - y)
        } else {
            u
        }
    }

    /// Creates a lag with time constant `time_const` and initial output `value`.
    pub fn new(time_const: F, value: F) -> Self {
        Self { time_const, value }
    }

    /// Returns the time constant.
    pub fn time_const(&self) -> F {
        self.time_const
    }

    /// Sets the time constant.
    ///
    /// # Errors
    /// - `ConfigError::InvalidTimeConstant` if `time_const` is not strictly positive and finite.
    pub fn set_time_const(&mut self, time_const: F) -> Result<(), ConfigError> {
        self.time_const = error::positive_finite(time_const, ConfigError::InvalidTimeConstant)?;
        Ok(())
    }

    /// Overrides the output.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
    }
}

impl<F: Float> CtrlElement<F> for Inertia<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if is_step(dt) {
            self.value = Self::calculate(u, self.value, dt, self.time_const);
        }
    }
}

/// Second-order inertia, two first-order lags in cascade:
///
/// `G(s) = 1 / ((tc1 * s + 1) * (tc2 * s + 1))`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Inertia2<F: Float> {
    time_const_1: F,
    time_const_2: F,
    value_1: F,
    value: F,
}

impl<F: Float> Default for Inertia2<F> {
    fn default() -> Self {
        Self::new(F::one(), F::one(), F::zero())
    }
}

impl<F: Float> Inertia2<F> {
    /// Creates a cascade with time constants `time_const_1` then `time_const_2`, both stages
    /// starting at `value`.
    pub fn new(time_const_1: F, time_const_2: F, value: F) -> Self {
        Self {
            time_const_1,
            time_const_2,
            value_1: value,
            value,
        }
    }

    /// Returns the time constant of the first stage.
    pub fn time_const_1(&self) -> F {
        self.time_const_1
    }

    /// Returns the time constant of the second stage.
    pub fn time_const_2(&self) -> F {
        self.time_const_2
    }

    /// Sets the time constant of the first stage.
    ///
    /// # Errors
    /// - `ConfigError::InvalidTimeConstant` if `tc` is not strictly positive and finite.
    pub fn set_time_const_1(&mut self, tc: F) -> Result<(), ConfigError> {
        self.time_const_1 = error::positive_finite(tc, ConfigError::InvalidTimeConstant)?;
        Ok(())
    }

    /// Sets the time constant of the second stage.
    ///
    /// # Errors
    /// - `ConfigError::InvalidTimeConstant` if `tc` is not strictly positive and finite.
    pub fn set_time_const_2(&mut self, tc: F) -> Result<(), ConfigError> {
        self.time_const_2 = error::positive_finite(tc, ConfigError::InvalidTimeConstant)?;
        Ok(())
    }

    /// Overrides the output of both stages.
    pub fn set_value(&mut self, value: F) {
        self.value_1 = value;
        self.value = value;
    }
}

impl<F: Float> CtrlElement<F> for Inertia2<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if is_step(dt) {
            self.value_1 = Inertia::calculate(u, self.value_1, dt, self.time_const_1);
            self.value = Inertia::calculate(self.value_1, self.value, dt, self.time_const_2);
        }
    }
}
