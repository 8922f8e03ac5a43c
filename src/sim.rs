// Test signals, an RK4 integrator and a mass-spring-damper plant for simulation
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

//! Signals and plants for closed-loop simulation of the control elements.

use core::time::Duration;

use crate::time::InstantLike;
use nalgebra as na;

/// Shape of a generated reference signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaveForm {
    /// Zero before the given delay, one afterwards
    Step(Duration),
    /// `sin(t)`
    Sine,
    /// `sign(sin(t))`
    Square,
}

/// Generates `amplitude * waveform(t) + offset`, `t` being the time since `initial_time`.
pub struct SignalGenerator<I: InstantLike> {
    waveform: WaveForm,
    initial_time: I,
    amplitude: f64,
    offset: f64,
}

impl<I: InstantLike> SignalGenerator<I> {
    pub fn new(waveform: WaveForm, initial_time: I, amplitude: f64, offset: f64) -> Self {
        Self {
            waveform,
            initial_time,
            amplitude,
            offset,
        }
    }

    pub fn generate(&self, time: I) -> f64 {
        let elapsed = time.duration_since(self.initial_time);
        let t = elapsed.as_secs_f64();
        let shape = match self.waveform {
            WaveForm::Step(delay) => {
                if elapsed >= delay {
                    1.0
                } else {
                    0.0
                }
            }
            WaveForm::Sine => t.sin(),
            WaveForm::Square => t.sin().signum(),
        };
        self.amplitude * shape + self.offset
    }
}

/// A single classical Runge-Kutta step of `x' = f(x)`.
pub fn rk4_step<const N: usize>(
    f: impl Fn(na::SVector<f64, N>) -> na::SVector<f64, N>,
    x: na::SVector<f64, N>,
    dt: f64,
) -> na::SVector<f64, N> {
    let k1 = f(x);
    let k2 = f(x + k1 * (0.5 * dt));
    let k3 = f(x + k2 * (0.5 * dt));
    let k4 = f(x + k3 * dt);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Unit-gain mass-spring-damper, `p'' + 2ζωₙp' + ωₙ²p = ωₙ²u`, with state `[p, p']`.
///
/// The plant counterpart of [`Oscillator`](crate::filter::Oscillator).
pub struct MassSpringDamper {
    pub natural_frequency: f64,
    pub damping_ratio: f64,
    state: na::Vector2<f64>,
}

impl MassSpringDamper {
    pub fn new(natural_frequency: f64, damping_ratio: f64) -> Self {
        Self {
            natural_frequency,
            damping_ratio,
            state: na::Vector2::zeros(),
        }
    }

    /// ┌     ┐   ┌              ┐┌    ┐   ┌     ┐
    /// │ p'  │ = │  0     1     ││ p  │ + │ 0   │ u
    /// │ p'' │   │  -ωₙ²  -2ζωₙ ││ p' │   │ ωₙ² │
    /// └     ┘   └              ┘└    ┘   └     ┘
    pub fn derivative(&self, x: na::Vector2<f64>, u: f64) -> na::Vector2<f64> {
        let omega_sq = self.natural_frequency.powi(2);
        let two_zeta_omega = 2.0 * self.natural_frequency * self.damping_ratio;

        let mat_a = na::Matrix2::new(0.0, 1.0, -omega_sq, -two_zeta_omega);
        let mat_b = na::Vector2::new(0.0, omega_sq);

        mat_a * x + mat_b * u
    }

    /// Advances the plant by `dt` seconds, holding `u` over the step.
    pub fn step(&mut self, dt: f64, u: f64) {
        self.state = rk4_step(|x| self.derivative(x, u), self.state, dt);
    }

    pub fn position(&self) -> f64 {
        self.state[0]
    }

    pub fn velocity(&self) -> f64 {
        self.state[1]
    }
}
