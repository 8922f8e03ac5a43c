// PID controller whose output shaping is delegated to an anti-windup strategy
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

use crate::anti_windup::{AntiWindup, PidTerms, Unbounded};
use crate::element::CtrlElement;
use crate::error::{self, ConfigError};

/// The gains of a PID controller in parallel form:
///
/// `G(s) = kp + ki / s + kd * s`
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PidConfig<F: Float> {
    /// Proportional gain.
    /// Defaults to 1.0.
    kp: F,

    /// Integral gain.
    /// Defaults to 0.0, i.e. no integral action.
    ki: F,

    /// Derivative gain.
    /// Defaults to 0.0, i.e. no derivative action.
    kd: F,
}

impl<F: Float> Default for PidConfig<F> {
    fn default() -> Self {
        PidConfig {
            kp: F::one(),
            ki: F::zero(),
            kd: F::zero(),
        }
    }
}

/// The three conventional ways of writing down PID gains.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum GainForm<F: Float> {
    /// `G(s) = kp + ki / s + kd * s`
    Parallel {
        /// Proportional gain
        kp: F,
        /// Integral gain
        ki: F,
        /// Derivative gain
        kd: F,
    },

    /// `G(s) = k * (1 + 1 / (s * tau_i)) * (1 + s * tau_d)`
    Series {
        /// Overall gain
        k: F,
        /// Integral time
        tau_i: F,
        /// Derivative time
        tau_d: F,
    },

    /// `G(s) = kp * (1 + 1 / (s * ti) + s * td)`, also known as the ideal form
    Standard {
        /// Proportional gain
        kp: F,
        /// Integral time
        ti: F,
        /// Derivative time
        td: F,
    },
}

impl<F: Float> GainForm<F> {
    /// Converts the gains to parallel form, returned as `(kp, ki, kd)`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidIntegralTime` if the integral time of the series or standard form
    ///   is zero or not finite.
    /// - `ConfigError::InvalidDerivativeTime` if the derivative time is not finite.
    /// - The gain errors of [`PidConfig::set_gains`] if a resulting gain is not finite.
    pub fn to_parallel(self) -> Result<(F, F, F), ConfigError> {
        let (kp, ki, kd) = match self {
            GainForm::Parallel { kp, ki, kd } => (kp, ki, kd),
            GainForm::Series { k, tau_i, tau_d } => {
                let tau_i = nonzero_integral_time(tau_i)?;
                let tau_d = error::finite(tau_d, ConfigError::InvalidDerivativeTime)?;
                (k * (F::one() + tau_d / tau_i), k / tau_i, k * tau_d)
            }
            GainForm::Standard { kp, ti, td } => {
                let ti = nonzero_integral_time(ti)?;
                let td = error::finite(td, ConfigError::InvalidDerivativeTime)?;
                (kp, kp / ti, kp * td)
            }
        };
        Ok((
            error::finite(kp, ConfigError::InvalidProportionalGain)?,
            error::finite(ki, ConfigError::InvalidIntegralGain)?,
            error::finite(kd, ConfigError::InvalidDerivativeGain)?,
        ))
    }
}

fn nonzero_integral_time<F: Float>(value: F) -> Result<F, ConfigError> {
    if value != F::zero() && value.is_finite() {
        Ok(value)
    } else {
        log::warn!("Rejected parameter: {}", ConfigError::InvalidIntegralTime);
        Err(ConfigError::InvalidIntegralTime)
    }
}

impl<F: Float> PidConfig<F> {
    /// Returns the proportional gain.
    pub fn kp(&self) -> F {
        self.kp
    }

    /// Returns the integral gain.
    pub fn ki(&self) -> F {
        self.ki
    }

    /// Returns the derivative gain.
    pub fn kd(&self) -> F {
        self.kd
    }

    /// Returns the gains as a `(kp, ki, kd)` tuple.
    pub fn gains(&self) -> (F, F, F) {
        (self.kp, self.ki, self.kd)
    }

    /// Sets the proportional gain.
    ///
    /// Zero and negative gains are accepted; a reverse-acting loop needs them.
    ///
    /// # Errors
    /// - `ConfigError::InvalidProportionalGain` if `kp` is not finite.
    pub fn set_kp(&mut self, kp: F) -> Result<(), ConfigError> {
        self.kp = error::finite(kp, ConfigError::InvalidProportionalGain)?;
        Ok(())
    }

    /// Sets the integral gain.
    ///
    /// A zero integral gain disables integral action and any anti-windup back-calculation.
    ///
    /// # Errors
    /// - `ConfigError::InvalidIntegralGain` if `ki` is not finite.
    pub fn set_ki(&mut self, ki: F) -> Result<(), ConfigError> {
        self.ki = error::finite(ki, ConfigError::InvalidIntegralGain)?;
        Ok(())
    }

    /// Sets the derivative gain.
    ///
    /// # Errors
    /// - `ConfigError::InvalidDerivativeGain` if `kd` is not finite.
    pub fn set_kd(&mut self, kd: F) -> Result<(), ConfigError> {
        self.kd = error::finite(kd, ConfigError::InvalidDerivativeGain)?;
        Ok(())
    }

    /// Sets all gains from any [`GainForm`]. Either all gains change or none do.
    pub fn set_gains(&mut self, gains: GainForm<F>) -> Result<(), ConfigError> {
        (self.kp, self.ki, self.kd) = gains.to_parallel()?;
        Ok(())
    }

    /// Sets the gains from the parallel form `kp + ki / s + kd * s`.
    pub fn set_parallel(&mut self, kp: F, ki: F, kd: F) -> Result<(), ConfigError> {
        self.set_gains(GainForm::Parallel { kp, ki, kd })
    }

    /// Sets the gains from the series form `k * (1 + 1 / (s * tau_i)) * (1 + s * tau_d)`.
    pub fn set_series(&mut self, k: F, tau_i: F, tau_d: F) -> Result<(), ConfigError> {
        self.set_gains(GainForm::Series { k, tau_i, tau_d })
    }

    /// Sets the gains from the standard form `kp * (1 + 1 / (s * ti) + s * td)`.
    pub fn set_standard(&mut self, kp: F, ti: F, td: F) -> Result<(), ConfigError> {
        self.set_gains(GainForm::Standard { kp, ti, td })
    }
}

/// Builds a validated [`PidConfig`].
///
/// ```rust
/// use discrete_ctrl::pid::PidConfigBuilder;
///
/// let config = PidConfigBuilder::default()
///     .kp(5.0)
///     .ki(0.5)
///     .kd(0.1)
///     .build()
///     .expect("Invalid PID config");
/// assert_eq!(config.gains(), (5.0, 0.5, 0.1));
///
/// // Series and standard forms take precedence over individually set gains
/// let config = PidConfigBuilder::default().standard(2.0, 4.0, 0.5).build().unwrap();
/// assert_eq!(config.gains(), (2.0, 0.5, 1.0));
/// ```
#[derive(Copy, Clone, Debug)]
pub struct PidConfigBuilder<F: Float> {
    kp: F,
    ki: F,
    kd: F,
    form: Option<GainForm<F>>,
}

impl<F: Float> Default for PidConfigBuilder<F> {
    fn default() -> Self {
        let config = PidConfig::default();
        Self {
            kp: config.kp,
            ki: config.ki,
            kd: config.kd,
            form: None,
        }
    }
}

impl<F: Float> PidConfigBuilder<F> {
    /// Sets the proportional gain.
    pub fn kp(mut self, kp: F) -> Self {
        self.kp = kp;
        self
    }

    /// Sets the integral gain.
    pub fn ki(mut self, ki: F) -> Self {
        self.ki = ki;
        self
    }

    /// Sets the derivative gain.
    pub fn kd(mut self, kd: F) -> Self {
        self.kd = kd;
        self
    }

    /// Takes the gains from the series form.
    pub fn series(mut self, k: F, tau_i: F, tau_d: F) -> Self {
        self.form = Some(GainForm::Series { k, tau_i, tau_d });
        self
    }

    /// Takes the gains from the standard (ideal) form.
    pub fn standard(mut self, kp: F, ti: F, td: F) -> Self {
        self.form = Some(GainForm::Standard { kp, ti, td });
        self
    }

    /// Validates the gains and builds the configuration.
    ///
    /// # Errors
    /// The first error encountered while converting and validating the gains.
    pub fn build(self) -> Result<PidConfig<F>, ConfigError> {
        let form = self.form.unwrap_or(GainForm::Parallel {
            kp: self.kp,
            ki: self.ki,
            kd: self.kd,
        });
        let mut config = PidConfig::default();
        config.set_gains(form)?;
        Ok(config)
    }
}

/// A discrete PID controller.
///
/// Each call to [`Pid::update`] advances the integral accumulator by rectangular integration,
/// differentiates the error by backward difference, and hands the raw P/I/D terms to the
/// anti-windup strategy `A`, which decides the final output and may correct the accumulator.
///
/// The strategy is chosen at compile time, or at run time through `Box<dyn AntiWindup<F>>`:
///
/// ```rust
/// use discrete_ctrl::anti_windup::{AntiWindup, BackCalc, CondCalc};
/// use discrete_ctrl::pid::{Pid, PidConfigBuilder};
/// use discrete_ctrl::saturation::Bounds;
///
/// let config = PidConfigBuilder::default().kp(5.0).ki(0.5).kd(0.1).build().unwrap();
/// let bounds = Bounds::new(-0.5, 0.5).unwrap();
///
/// let mut pid = Pid::new(config, BackCalc::new(bounds));
/// assert_eq!(pid.update(0.01, 1.0), 0.5);
///
/// let strategy: Box<dyn AntiWindup<f64>> = Box::new(CondCalc::new(bounds));
/// let mut pid = Pid::new(config, strategy);
/// assert_eq!(pid.update(0.01, -1.0), -0.5);
/// ```
#[derive(Clone, Debug)]
pub struct Pid<F: Float, A: AntiWindup<F> = Unbounded> {
    config: PidConfig<F>,
    anti_windup: A,

    error: F,
    error_i: F,
    error_d: F,

    value: F,
}

impl<F: Float> Pid<F, Unbounded> {
    /// Creates a controller without saturation or anti-windup.
    pub fn unbounded(config: PidConfig<F>) -> Self {
        Self::new(config, Unbounded)
    }
}

impl<F: Float, A: AntiWindup<F>> Pid<F, A> {
    /// Creates a controller taking ownership of its anti-windup strategy.
    pub fn new(config: PidConfig<F>, anti_windup: A) -> Self {
        Self {
            config,
            anti_windup,
            error: F::zero(),
            error_i: F::zero(),
            error_d: F::zero(),
            value: F::zero(),
        }
    }

    /// Returns a reference to the controller configuration.
    pub fn config(&self) -> &PidConfig<F> {
        &self.config
    }

    /// Returns a mutable reference to the controller configuration for on-the-fly tuning.
    pub fn config_mut(&mut self) -> &mut PidConfig<F> {
        &mut self.config
    }

    /// Returns a reference to the anti-windup strategy.
    pub fn anti_windup(&self) -> &A {
        &self.anti_windup
    }

    /// Returns a mutable reference to the anti-windup strategy.
    pub fn anti_windup_mut(&mut self) -> &mut A {
        &mut self.anti_windup
    }

    /// Returns the last computed output.
    pub fn value(&self) -> F {
        self.value
    }

    /// Returns the error seen in the last update.
    pub fn error(&self) -> F {
        self.error
    }

    /// Returns the integral accumulator, i.e. the integral of the error over time.
    pub fn error_i(&self) -> F {
        self.error_i
    }

    /// Returns the derivative of the error computed in the last update.
    pub fn error_d(&self) -> F {
        self.error_d
    }

    /// Overrides the stored error, which the next update differentiates against.
    pub fn set_error(&mut self, error: F) {
        self.error = error;
    }

    /// Updates the controller with a new error sample and returns the new output.
    ///
    /// If `dt` is not strictly positive (NaN included), this is a no-op returning the last output.
    ///
    /// # Arguments
    /// - `dt`: Time elapsed since the last update, in seconds.
    /// - `error`: The control error, i.e. setpoint minus measurement.
    pub fn update(&mut self, dt: F, error: F) -> F {
        if dt.is_nan() || dt <= F::zero() {
            return self.value;
        }

        let error_i = self.error_i + error * dt;
        self.error_d = (error - self.error) / dt;
        self.error = error;

        let terms = PidTerms {
            p: self.config.kp * self.error,
            i: self.config.ki * error_i,
            d: self.config.kd * self.error_d,
        };

        let shaped = self
            .anti_windup
            .update(dt, terms, self.config.ki, error_i);
        self.value = shaped.value;
        self.error_i = shaped.error_i;
        self.value
    }

    /// Resets the controller state and the anti-windup strategy state to zero.
    pub fn reset(&mut self) {
        log::debug!("Resetting PID controller");
        self.error = F::zero();
        self.error_i = F::zero();
        self.error_d = F::zero();
        self.value = F::zero();
        self.anti_windup.reset(F::zero());
    }

    /// Overrides the output, for bumpless transfer from manual control.
    ///
    /// The integral accumulator is rebuilt so that the integral term alone reproduces `value`, and
    /// the error history is cleared. With a zero integral gain the accumulator is zeroed instead.
    pub fn set_value(&mut self, value: F) {
        log::debug!("Overriding PID controller output");
        self.error_i = if self.config.ki.abs() > F::zero() {
            value / self.config.ki
        } else {
            F::zero()
        };
        self.error_d = F::zero();
        self.error = F::zero();
        self.value = value;
        self.anti_windup.reset(self.error_i);
    }

    /// Overrides output and error at once, rebuilding the integral accumulator so that
    /// `kp * error + ki * error_i + kd * error_d` reproduces `value`.
    ///
    /// # Arguments
    /// - `value`: The new output.
    /// - `error`: The new error.
    /// - `dt`: The time step used to differentiate `error` against the stored error; if not
    ///   strictly positive, the derivative is taken as zero.
    pub fn set_value_and_error(&mut self, value: F, error: F, dt: F) {
        log::debug!("Overriding PID controller output and error");
        self.error_d = if dt > F::zero() {
            (error - self.error) / dt
        } else {
            F::zero()
        };
        self.error_i = if self.config.ki.abs() > F::zero() {
            (value - self.config.kp * error - self.config.kd * self.error_d) / self.config.ki
        } else {
            F::zero()
        };
        self.error = error;
        self.value = value;
        self.anti_windup.reset(self.error_i);
    }
}

impl<F: Float, A: AntiWindup<F>> CtrlElement<F> for Pid<F, A> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        Pid::update(self, dt, u);
    }
}
