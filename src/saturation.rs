// Saturation primitive and validated saturation bounds
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

use crate::error::ConfigError;

/// Clamps `y` to `[min, max]`.
///
/// Unlike [`f64::clamp`], this never panics: the lower bound is applied first, so if `min > max`
/// every `y < min` yields `min` and every other `y > max` yields `max`. Use [`Bounds`] to have the
/// ordering checked up front.
#[inline]
pub fn satur<F: Float>(min: F, max: F, y: F) -> F {
    if y < min {
        min
    } else if y > max {
        max
    } else {
        y
    }
}

/// A pair of saturation bounds that is guaranteed to satisfy `min <= max`.
///
/// Defaults to the widest representable range, i.e. saturation never engages.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Bounds<F: Float> {
    min: F,
    max: F,
}

impl<F: Float> Default for Bounds<F> {
    fn default() -> Self {
        Self {
            min: F::min_value(),
            max: F::max_value(),
        }
    }
}

impl<F: Float> Bounds<F> {
    /// Creates saturation bounds.
    ///
    /// # Errors
    /// - `ConfigError::InvalidBounds` if either bound is NaN or `min > max`. Equal bounds are
    ///   accepted and pin the output to a single value.
    pub fn new(min: F, max: F) -> Result<Self, ConfigError> {
        if min.is_nan() || max.is_nan() || min > max {
            log::warn!("Rejected saturation bounds: min must not exceed max");
            return Err(ConfigError::InvalidBounds);
        }
        Ok(Self { min, max })
    }

    /// Creates symmetric bounds `[-limit, limit]`.
    pub fn symmetric(limit: F) -> Result<Self, ConfigError> {
        Self::new(-limit, limit)
    }

    /// Returns the lower bound.
    pub fn min(&self) -> F {
        self.min
    }

    /// Returns the upper bound.
    pub fn max(&self) -> F {
        self.max
    }

    /// Clamps `y` into these bounds.
    #[inline]
    pub fn apply(&self, y: F) -> F {
        satur(self.min, self.max, y)
    }

    /// Returns whether `y` lies within these bounds, inclusive.
    pub fn contains(&self, y: F) -> bool {
        y >= self.min && y <= self.max
    }
}
