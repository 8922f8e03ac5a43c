// Lead and lead-lag compensators
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

/// First-order lead, `G(s) = tc * s + 1`, with the derivative taken by backward difference.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Lead<F: Float> {
    time_const: F,
    #[cfg_attr(feature = "serde", serde(skip))]
    u_prev: F,
    value: F,
}

impl<F: Float> Default for Lead<F> {
    fn default() -> Self {
        Self::new(F::one(), F::zero())
    }
}

impl<F: Float> Lead<F> {
    /// Creates a lead with time constant `time_const` and initial output `value`.
    ///
    /// The previous input starts at zero, so a nonzero first input produces a derivative kick.
    pub fn new(time_const: F, value: F) -> Self {
        Self {
            time_const,
            u_prev: F::zero(),
            value,
        }
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

impl<F: Float> CtrlElement<F> for Lead<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if is_step(dt) {
            let du_dt = (u - self.u_prev) / dt;
            self.value = self.time_const * du_dt + u;
            self.u_prev = u;
        }
    }
}

/// Lead-lag compensator, `G(s) = (c1 * s + c2) / (c3 * s + c4)`, discretised with the bilinear
/// (Tustin) transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct LeadLag<F: Float> {
    c1: F,
    c2: F,
    c3: F,
    c4: F,
    #[cfg_attr(feature = "serde", serde(skip))]
    u_prev: F,
    value: F,
}

impl<F: Float> Default for LeadLag<F> {
    /// A unity gain, `G(s) = 1`.
    fn default() -> Self {
        Self::new(F::zero(), F::one(), F::zero(), F::one(), F::zero())
    }
}

impl<F: Float> LeadLag<F> {
    /// Creates a compensator from the transfer function coefficients and an initial output.
    pub fn new(c1: F, c2: F, c3: F, c4: F, value: F) -> Self {
        Self {
            c1,
            c2,
            c3,
            c4,
            u_prev: F::zero(),
            value,
        }
    }

    /// Returns the coefficients `(c1, c2, c3, c4)`.
    pub fn coefficients(&self) -> (F, F, F, F) {
        (self.c1, self.c2, self.c3, self.c4)
    }

    /// Sets all four coefficients. Either all change or none do.
    ///
    /// # Errors
    /// - `ConfigError::InvalidCoefficient` if any coefficient is not finite.
    pub fn set_coefficients(&mut self, c1: F, c2: F, c3: F, c4: F) -> Result<(), ConfigError> {
        for c in [c1, c2, c3, c4] {
            error::finite(c, ConfigError::InvalidCoefficient)?;
        }
        (self.c1, self.c2, self.c3, self.c4) = (c1, c2, c3, c4);
        Ok(())
    }

    /// Overrides the output, which also seeds the recursion.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
    }
}

impl<F: Float> CtrlElement<F> for LeadLag<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        let two = F::one() + F::one();

        let den_inv = (two * self.c3 + dt * self.c4).recip();
        let ca = (two * self.c1 + dt * self.c2) * den_inv;
        let cb = (dt * self.c2 - two * self.c1) * den_inv;
        let cc = (two * self.c3 - dt * self.c4) * den_inv;

        self.value = u * ca + self.u_prev * cb + self.value * cc;
        self.u_prev = u;
    }
}
