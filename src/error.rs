// Configuration errors shared by the controller, anti-windup strategies and filters
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

/// Errors reported when a controller or filter parameter is rejected.
///
/// Updating a block never fails; only configuration does. A rejected setter
/// always leaves the previous value in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ConfigError {
    /// Proportional gain is not finite
    #[cfg_attr(feature = "std", error("Proportional gain must be finite"))]
    InvalidProportionalGain,

    /// Integral gain is not finite
    #[cfg_attr(feature = "std", error("Integral gain must be finite"))]
    InvalidIntegralGain,

    /// Derivative gain is not finite
    #[cfg_attr(feature = "std", error("Derivative gain must be finite"))]
    InvalidDerivativeGain,

    /// Integral time of the series or standard form is zero or not finite
    #[cfg_attr(feature = "std", error("Integral time must be nonzero and finite"))]
    InvalidIntegralTime,

    /// Derivative time of the series or standard form is not finite
    #[cfg_attr(feature = "std", error("Derivative time must be finite"))]
    InvalidDerivativeTime,

    /// Saturation bounds are NaN or the lower bound exceeds the upper bound
    #[cfg_attr(
        feature = "std",
        error("Saturation bounds must not be NaN and min must not exceed max")
    )]
    InvalidBounds,

    /// Anti-windup filter gain is negative or not finite
    #[cfg_attr(
        feature = "std",
        error("Anti-windup gain must be non-negative and finite")
    )]
    InvalidAntiWindupGain,

    /// Time constant is not strictly positive and finite
    #[cfg_attr(feature = "std", error("Time constant must be positive and finite"))]
    InvalidTimeConstant,

    /// Angular frequency is negative or not finite
    #[cfg_attr(
        feature = "std",
        error("Angular frequency must be non-negative and finite")
    )]
    InvalidFrequency,

    /// Damping ratio lies outside of [0, 1]
    #[cfg_attr(feature = "std", error("Damping ratio must lie within [0, 1]"))]
    InvalidDampingRatio,

    /// Transfer function coefficient is not finite
    #[cfg_attr(feature = "std", error("Transfer function coefficients must be finite"))]
    InvalidCoefficient,

    /// Moving window length is zero
    #[cfg_attr(feature = "std", error("Window length must be at least one sample"))]
    InvalidWindowLength,

    /// Hold time is not strictly positive and finite
    #[cfg_attr(feature = "std", error("Hold time must be positive and finite"))]
    InvalidHoldTime,
}

#[cfg(not(feature = "std"))]
impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ConfigError::InvalidProportionalGain => "Proportional gain must be finite",
            ConfigError::InvalidIntegralGain => "Integral gain must be finite",
            ConfigError::InvalidDerivativeGain => "Derivative gain must be finite",
            ConfigError::InvalidIntegralTime => "Integral time must be nonzero and finite",
            ConfigError::InvalidDerivativeTime => "Derivative time must be finite",
            ConfigError::InvalidBounds => {
                "Saturation bounds must not be NaN and min must not exceed max"
            }
            ConfigError::InvalidAntiWindupGain => {
                "Anti-windup gain must be non-negative and finite"
            }
            ConfigError::InvalidTimeConstant => "Time constant must be positive and finite",
            ConfigError::InvalidFrequency => "Angular frequency must be non-negative and finite",
            ConfigError::InvalidDampingRatio => "Damping ratio must lie within [0, 1]",
            ConfigError::InvalidCoefficient => "Transfer function coefficients must be finite",
            ConfigError::InvalidWindowLength => "Window length must be at least one sample",
            ConfigError::InvalidHoldTime => "Hold time must be positive and finite",
        };
        f.write_str(msg)
    }
}

/// Returns `Ok(value)` if `value` is strictly positive and finite, `Err(err)` otherwise.
pub(crate) fn positive_finite<F: num_traits::Float>(
    value: F,
    err: ConfigError,
) -> Result<F, ConfigError> {
    if value > F::zero() && value.is_finite() {
        Ok(value)
    } else {
        log::warn!("Rejected parameter: {}", err);
        Err(err)
    }
}

/// Returns `Ok(value)` if `value` is finite, `Err(err)` otherwise.
pub(crate) fn finite<F: num_traits::Float>(value: F, err: ConfigError) -> Result<F, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        log::warn!("Rejected parameter: {}", err);
        Err(err)
    }
}

/// Returns `Ok(value)` if `value` is non-negative and finite, `Err(err)` otherwise.
pub(crate) fn non_negative_finite<F: num_traits::Float>(
    value: F,
    err: ConfigError,
) -> Result<F, ConfigError> {
    if value >= F::zero() && value.is_finite() {
        Ok(value)
    } else {
        log::warn!("Rejected parameter: {}", err);
        Err(err)
    }
}
