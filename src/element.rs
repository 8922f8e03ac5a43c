// Common interface for single-input single-output discrete-time elements
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

/// A single-input single-output discrete-time element updated once per time step.
///
/// Every element in this crate treats an update with a time step that is not strictly positive
/// (NaN included) as a no-op, leaving all of its internal state untouched.
pub trait CtrlElement<F: Float> {
    /// Returns the current output.
    fn value(&self) -> F;

    /// Updates the element with the time step `dt` in seconds and the input `u`.
    fn update(&mut self, dt: F, u: F);
}

impl<F: Float, E: CtrlElement<F> + ?Sized> CtrlElement<F> for alloc::boxed::Box<E> {
    fn value(&self) -> F {
        (**self).value()
    }

    fn update(&mut self, dt: F, u: F) {
        (**self).update(dt, u)
    }
}

/// Returns whether `dt` is a time step an element should act on.
#[inline]
pub(crate) fn is_step<F: Float>(dt: F) -> bool {
    dt > F::zero()
}
