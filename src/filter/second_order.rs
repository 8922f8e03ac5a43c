// Second-order system and oscillator elements
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

/// Input and output history of a second-order recursion.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
struct History<F> {
    u_prev_1: F,
    u_prev_2: F,
    y_prev_1: F,
    y_prev_2: F,
}

impl<F: Float> History<F> {
    fn new(value: F) -> Self {
        Self {
            u_prev_1: F::zero(),
            u_prev_2: F::zero(),
            y_prev_1: value,
            y_prev_2: value,
        }
    }

    /// Evaluates `y = ca u + cb u[-1] + cc u[-2] - cd y[-1] - ce y[-2]` and shifts the history.
    fn step(&mut self, u: F, [ca, cb, cc, cd, ce]: [F; 5]) -> F {
        let y = u * ca + self.u_prev_1 * cb + self.u_prev_2 * cc
            - self.y_prev_1 * cd
            - self.y_prev_2 * ce;
        self.u_prev_2 = self.u_prev_1;
        self.u_prev_1 = u;
        self.y_prev_2 = self.y_prev_1;
        self.y_prev_1 = y;
        y
    }
}

/// General second-order system, discretised with the bilinear (Tustin) transform:
///
/// `G(s) = (c1 * s^2 + c2 * s + c3) / (c4 * s^2 + c5 * s + c6)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct System2<F: Float> {
    c: [F; 6],
    history: History<F>,
    value: F,
}

impl<F: Float> Default for System2<F> {
    /// A unity gain, `G(s) = 1`.
    fn default() -> Self {
        let (zero, one) = (F::zero(), F::one());
        Self::new([zero, zero, one, zero, zero, one], zero)
    }
}

impl<F: Float> System2<F> {
    /// Creates a system from the coefficients `[c1, c2, c3, c4, c5, c6]` and an initial output.
    pub fn new(coefficients: [F; 6], value: F) -> Self {
        Self {
            c: coefficients,
            history: History::new(value),
            value,
        }
    }

    /// Returns the coefficients `[c1, c2, c3, c4, c5, c6]`.
    pub fn coefficients(&self) -> [F; 6] {
        self.c
    }

    /// Sets all coefficients. Either all change or none do.
    ///
    /// # Errors
    /// - `ConfigError::InvalidCoefficient` if any coefficient is not finite.
    pub fn set_coefficients(&mut self, coefficients: [F; 6]) -> Result<(), ConfigError> {
        for c in coefficients {
            error::finite(c, ConfigError::InvalidCoefficient)?;
        }
        self.c = coefficients;
        Ok(())
    }

    /// Overrides the output and the output history.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
        self.history.y_prev_1 = value;
        self.history.y_prev_2 = value;
    }
}

impl<F: Float> CtrlElement<F> for System2<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        let [c1, c2, c3, c4, c5, c6] = self.c;
        let two = F::one() + F::one();
        let four = two * two;
        let eight = four * two;
        let dt2 = dt * dt;

        let den_inv = (four * c4 + two * c5 * dt + c6 * dt2).recip();
        let ca = (four * c1 + two * c2 * dt + c3 * dt2) * den_inv;
        let cb = (two * c3 * dt2 - eight * c1) * den_inv;
        let cc = (four * c1 - two * c2 * dt + c3 * dt2) * den_inv;
        let cd = (two * c6 * dt2 - eight * c4) * den_inv;
        let ce = (four * c4 - two * c5 * dt + c6 * dt2) * den_inv;

        self.value = self.history.step(u, [ca, cb, cc, cd, ce]);
    }
}

/// Second-order oscillator, `G(s) = omega^2 / (s^2 + 2 * zeta * omega * s + omega^2)`,
/// discretised with the bilinear (Tustin) transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Oscillator<F: Float> {
    omega: F,
    zeta: F,
    history: History<F>,
    value: F,
}

impl<F: Float> Default for Oscillator<F> {
    fn default() -> Self {
        Self::new(F::one(), F::one(), F::zero())
    }
}

impl<F: Float> Oscillator<F> {
    /// Creates an oscillator with natural angular frequency `omega` in rad/s, damping ratio
    /// `zeta`, and initial output `value`.
    pub fn new(omega: F, zeta: F, value: F) -> Self {
        Self {
            omega,
            zeta,
            history: History::new(value),
            value,
        }
    }

    /// Returns the natural angular frequency in rad/s.
    pub fn omega(&self) -> F {
        self.omega
    }

    /// Returns the damping ratio.
    pub fn zeta(&self) -> F {
        self.zeta
    }

    /// Sets the natural angular frequency in rad/s.
    ///
    /// # Errors
    /// - `ConfigError::InvalidFrequency` if `omega` is negative or not finite.
    pub fn set_omega(&mut self, omega: F) -> Result<(), ConfigError> {
        self.omega = error::non_negative_finite(omega, ConfigError::InvalidFrequency)?;
        Ok(())
    }

    /// Sets the damping ratio.
    ///
    /// # Errors
    /// - `ConfigError::InvalidDampingRatio` if `zeta` lies outside of `[0, 1]`.
    pub fn set_zeta(&mut self, zeta: F) -> Result<(), ConfigError> {
        if !(zeta >= F::zero() && zeta <= F::one()) {
            log::warn!("Rejected parameter: {}", ConfigError::InvalidDampingRatio);
            return Err(ConfigError::InvalidDampingRatio);
        }
        self.zeta = zeta;
        Ok(())
    }

    /// Overrides the output and the output history.
    pub fn set_value(&mut self, value: F) {
        self.value = value;
        self.history.y_prev_1 = value;
        self.history.y_prev_2 = value;
    }
}

impl<F: Float> CtrlElement<F> for Oscillator<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        let two = F::one() + F::one();
        let four = two * two;
        let eight = four * two;

        let omega2 = self.omega * self.omega;
        let zetomg2 = two * self.zeta * self.omega;
        let dt2 = dt * dt;

        let den_inv = (four + two * zetomg2 * dt + omega2 * dt2).recip();
        let ca = omega2 * dt2 * den_inv;
        let cb = two * ca;
        let cc = cb - eight * den_inv;
        let cd = ca + (four - two * zetomg2 * dt) * den_inv;

        self.value = self.history.step(u, [ca, cb, ca, cc, cd]);
    }
}
