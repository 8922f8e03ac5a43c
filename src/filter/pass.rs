// First-order low-pass and high-pass filters
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

use num_traits::{Float, FloatConst};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::element::{is_step, CtrlElement};
use crate::error::{self, ConfigError};
use crate::filter::Inertia;

fn hertz_to_omega<F: Float + FloatConst>(freq: F) -> Result<F, ConfigError> {
    let freq = error::non_negative_finite(freq, ConfigError::InvalidFrequency)?;
    Ok((F::one() + F::one()) * F::PI() * freq)
}

/// First-order low-pass filter, `G(s) = omega / (s + omega)`.
///
/// A zero cutoff freezes the output.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct LowPassFilter<F: Float> {
    omega: F,
    value: F,
}

impl<F: Float> Default for LowPassFilter<F> {
    fn default() -> Self {
        Self::new(F::one(), F::zero())
    }
}

impl<F: Float> LowPassFilter<F> {
    /// Creates a filter with cutoff angular frequency `omega` in rad/s and initial output `value`.
    pub fn new(omega: F, value: F) -> Self {
        Self { omega, value }
    }

    /// Returns the cutoff angular frequency in rad/s.
    pub fn omega(&self) -> F {
        self.omega
    }

    /// Returns the time constant, `1 / omega`.
    pub fn time_const(&self) -> F {
        self.omega.recip()
    }

    /// Sets the cutoff angular frequency in rad/s.
    ///
    /// # Errors
    /// - `ConfigError::InvalidFrequency` if `omega` is negative or not finite.
    pub fn set_omega(&mut self, omega: F) -> Result<(), ConfigError> {
        self.omega = error::non_negative_finite(omega, ConfigError::InvalidFrequency)?;
        Ok(())
    }

    /// Overrides the output.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
    }
}

impl<F: Float + FloatConst> LowPassFilter<F> {
    /// Sets the cutoff frequency in Hz.
    ///
    /// # Errors
    /// - `ConfigError::InvalidFrequency` if `freq` is negative or not finite.
    pub fn set_cutoff_freq(&mut self, freq: F) -> Result<(), ConfigError> {
        self.omega = hertz_to_omega(freq)?;
        Ok(())
    }
}

impl<F: Float> CtrlElement<F> for LowPassFilter<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        // A zero cutoff gives an infinite time constant, which `exp` maps to a frozen output
        if is_step(dt) {
            let tc = self.time_const();
            self.value = self.value + (F::one() - (-dt / tc).exp()) * (u - self.value);
        }
    }
}

/// First-order high-pass (washout) filter, `G(s) = s / (s + omega)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct HighPassFilter<F: Float> {
    omega: F,
    #[cfg_attr(feature = "serde", serde(skip))]
    u_prev: F,
    value: F,
}

impl<F: Float> Default for HighPassFilter<F> {
    fn default() -> Self {
        Self::new(F::one(), F::zero())
    }
}

impl<F: Float> HighPassFilter<F> {
    /// Creates a filter with cutoff angular frequency `omega` in rad/s and initial output `value`.
    pub fn new(omega: F, value: F) -> Self {
        Self {
            omega,
            u_prev: F::zero(),
            value,
        }
    }

    /// Returns the cutoff angular frequency in rad/s.
    pub fn omega(&self) -> F {
        self.omega
    }

    /// Returns the time constant, `1 / omega`.
    pub fn time_const(&self) -> F {
        self.omega.recip()
    }

    /// Sets the cutoff angular frequency in rad/s.
    ///
    /// # Errors
    /// - `ConfigError::InvalidFrequency` if `omega` is negative or not finite.
    pub fn set_omega(&mut self, omega: F) -> Result<(), ConfigError> {
        self.omega = error::non_negative_finite(omega, ConfigError::InvalidFrequency)?;
        Ok(())
    }

    /// Overrides the output.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
    }
}

impl<F: Float + FloatConst> HighPassFilter<F> {
    /// Sets the cutoff frequency in Hz.
    ///
    /// # Errors
    /// - `ConfigError::InvalidFrequency` if `freq` is negative or not finite.
    pub fn set_cutoff_freq(&mut self, freq: F) -> Result<(), ConfigError> {
        self.omega = hertz_to_omega(freq)?;
        Ok(())
    }
}

impl<F: Float> CtrlElement<F> for HighPassFilter<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        let tc = self.time_const();
        if tc.is_finite() {
            let du_dt = (u - self.u_prev) / dt;
            // Lag the scaled derivative: tc * s / (tc * s + 1) == s / (s + omega)
            self.value = Inertia::calculate(tc * du_dt, self.value, dt, tc);
        } else {
            // omega == 0 degenerates to a unity gain on input increments
            self.value = self.value + (u - self.u_prev);
        }
        self.u_prev = u;
    }
}
