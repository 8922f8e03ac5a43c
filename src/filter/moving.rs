// Moving average and moving median filters over a sliding window
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

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::cmp::Ordering;

use num_traits::{Float, NumCast};

use crate::element::{is_step, CtrlElement};
use crate::error::ConfigError;

/// A bounded FIFO of the most recent samples.
#[derive(Debug, Clone, PartialEq)]
struct Window<F> {
    length: usize,
    fifo: VecDeque<F>,
}

impl<F: Float> Window<F> {
    fn new(length: usize) -> Self {
        Self {
            length,
            fifo: VecDeque::with_capacity(length.saturating_add(1)),
        }
    }

    fn set_length(&mut self, length: usize) -> Result<(), ConfigError> {
        self.length = check_length(length)?;
        Ok(())
    }

    /// Pushes a sample, evicting the oldest ones beyond the window length.
    fn push(&mut self, u: F) {
        self.fifo.push_back(u);
        while self.fifo.len() > self.length {
            self.fifo.pop_front();
        }
    }
}

fn check_length(length: usize) -> Result<usize, ConfigError> {
    if length == 0 {
        log::warn!("Rejected parameter: {}", ConfigError::InvalidWindowLength);
        Err(ConfigError::InvalidWindowLength)
    } else {
        Ok(length)
    }
}

/// Moving average over the last `length` samples.
///
/// Until the window fills up, the average is taken over the samples seen so far.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingAverage<F: Float> {
    window: Window<F>,
    value: F,
}

impl<F: Float> Default for MovingAverage<F> {
    fn default() -> Self {
        Self {
            window: Window::new(1),
            value: F::zero(),
        }
    }
}

impl<F: Float> MovingAverage<F> {
    /// Creates a moving average over `length` samples with initial output `value`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidWindowLength` if `length` is zero.
    pub fn new(length: usize, value: F) -> Result<Self, ConfigError> {
        Ok(Self {
            window: Window::new(check_length(length)?),
            value,
        })
    }

    /// Returns the window length.
    pub fn length(&self) -> usize {
        self.window.length
    }

    /// Sets the window length. Shrinking takes effect at the next update.
    ///
    /// # Errors
    /// - `ConfigError::InvalidWindowLength` if `length` is zero.
    pub fn set_length(&mut self, length: usize) -> Result<(), ConfigError> {
        self.window.set_length(length)
    }
}

impl<F: Float> CtrlElement<F> for MovingAverage<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        self.window.push(u);

        let fifo = &self.window.fifo;
        self.value = if fifo.len() > 1 {
            let sum = fifo.iter().fold(F::zero(), |acc, &x| acc + x);
            // Window lengths are far below the integer range of any float type
            sum / <F as NumCast>::from(fifo.len()).unwrap_or_else(F::nan)
        } else {
            u
        };
    }
}

/// Moving median over the last `length` samples.
///
/// For an even number of samples the two central order statistics are averaged.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingMedian<F: Float> {
    window: Window<F>,
    sorted: Vec<F>,
    value: F,
}

impl<F: Float> Default for MovingMedian<F> {
    fn default() -> Self {
        Self {
            window: Window::new(1),
            sorted: Vec::new(),
            value: F::zero(),
        }
    }
}

impl<F: Float> MovingMedian<F> {
    /// Creates a moving median over `length` samples with initial output `value`.
    ///
    /// # Errors
    /// - `ConfigError::InvalidWindowLength` if `length` is zero.
    pub fn new(length: usize, value: F) -> Result<Self, ConfigError> {
        let length = check_length(length)?;
        Ok(Self {
            window: Window::new(length),
            sorted: Vec::with_capacity(length),
            value,
        })
    }

    /// Returns the window length.
    pub fn length(&self) -> usize {
        self.window.length
    }

    /// Sets the window length. Shrinking takes effect at the next update.
    ///
    /// # Errors
    /// - `ConfigError::InvalidWindowLength` if `length` is zero.
    pub fn set_length(&mut self, length: usize) -> Result<(), ConfigError> {
        self.window.set_length(length)
    }
}

impl<F: Float> CtrlElement<F> for MovingMedian<F> {
    fn value(&self) -> F {
        self.value
    }

    fn update(&mut self, dt: F, u: F) {
        if !is_step(dt) {
            return;
        }
        self.window.push(u);

        if self.window.fifo.len() <= 1 {
            self.value = u;
            return;
        }

        self.sorted.clear();
        self.sorted.extend(self.window.fifo.iter().copied());
        // NaN samples compare equal to everything and end up wherever the sort leaves them
        self.sorted
            .sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

        let n = self.sorted.len();
        self.value = if n % 2 == 0 {
            let two = F::one() + F::one();
            (self.sorted[n / 2 - 1] + self.sorted[n / 2]) / two
        } else {
            self.sorted[n / 2]
        };
    }
}
