// Pure gain element
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

/// Pure gain, `G(s) = k`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Gain<F: Float> {
    k: F,
    value: F,
}

impl<F: Float> Default for Gain<F> {
    fn default() -> Self {
        Self::new(F::one(), F::zero())
    }
}

impl<F: Float> Gain<F> {
    /// Creates a gain `k` with initial output `value`.
    pub fn new(k: F, value: F) -> Self {
        Self { k, value }
    }

    /// Returns the gain.
    pub fn k(&self) -> F {
        self.k
    }

    /// Sets the gain.
    ///
    /// # Errors
    /// - `ConfigError::InvalidCoefficient` if `k` is not finite.
    pub fn set_k(&mut self, k: F) -> Result<(), ConfigError> {
        self.k = error::finite(k, ConfigError::InvalidCoefficient)?;
        Ok(())
    }

    /// Overrides the output.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
    }
}

impl<F: Float> CtrlElement<F> for Gain<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if is_step(dt) {
            self.value = self.k * u;
        }
    }
}
