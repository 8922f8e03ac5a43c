// Zero-order hold element
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

/// Zero-order hold: latches the input once every `t_hold` seconds and holds it in between.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ZeroOrderHold<F: Float> {
    t_hold: F,
    #[cfg_attr(feature = "serde", serde(skip))]
    elapsed: F,
    value: F,
}

impl<F: Float> ZeroOrderHold<F> {
    /// Creates a hold latching every `t_hold` seconds, starting from `value`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidHoldTime` if `t_hold` is not strictly positive and finite.
    pub fn new(t_hold: F, value: F) -> Result<Self, ConfigError> {
        let t_hold = error::positive_finite(t_hold, ConfigError::InvalidHoldTime)?;
        Ok(Self {
            t_hold,
            elapsed: F::zero(),
            value,
        })
    }

    /// Returns the hold time.
    pub fn t_hold(&self) -> F {
        self.t_hold
    }

    /// Sets the hold time.
    ///
    /// # Errors
    /// - `ConfigError::InvalidHoldTime` if `t_hold` is not strictly positive and finite.
    pub fn set_t_hold(&mut self, t_hold: F) -> Result<(), ConfigError> {
        self.t_hold = error::positive_finite(t_hold, ConfigError::InvalidHoldTime)?;
        Ok(())
    }

    /// Overrides the held output.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
    }
}

impl<F: Float> CtrlElement<F> for ZeroOrderHold<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        self.elapsed = self.elapsed + dt;
        if self.elapsed >= self.t_hold {
            self.elapsed = self.elapsed - self.t_hold;
            self.value = u;
        }
    }
}
