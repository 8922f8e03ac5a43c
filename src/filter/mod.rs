// Discrete-time filters and compensators
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

//! Discrete-time filters and compensators.
//!
//! All elements implement [`CtrlElement`](crate::element::CtrlElement) and ignore updates whose
//! time step is not strictly positive.

mod gain;
mod hold;
mod inertia;
mod lead;
mod moving;
mod pass;
mod second_order;

pub use gain::Gain;
pub use hold::ZeroOrderHold;
pub use inertia::{Inertia, Inertia2};
pub use lead::{Lead, LeadLag};
pub use moving::{MovingAverage, MovingMedian};
pub use pass::{HighPassFilter, LowPassFilter};
pub use second_order::{Oscillator, System2};
