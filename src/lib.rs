#![warn(missing_docs)]

//! # Discrete Control Blocks
//!
//! This library provides small discrete-time control blocks in Rust: a PID controller with
//! pluggable anti-windup, and the filters and compensators that typically surround it in a
//! control loop.
//!
//! ## Features
//!
//! - A PID controller whose output shaping is delegated to an anti-windup strategy:
//!   - Back-calculation: rebuilds the integral accumulator so the saturated output is
//!     reproduced exactly.
//!   - Conditional integration: freezes the integral accumulator while the output saturates.
//!   - Filtered anti-windup: feeds the saturation excess back into the integral accumulator.
//!   - Strategies are picked at compile time or boxed as `dyn AntiWindup<F>`.
//!
//! - Filters and compensators sharing one `update(dt, u)` / `value()` contract: gain, lead,
//!   lead-lag, first- and second-order inertia, low-pass, high-pass, moving average, moving
//!   median, oscillator, general second-order system and zero-order hold.
//!
//! - Explicit support for **discrete-time** control requirements:
//!   - _Every update with a non-positive time step is a no-op_, for every block.
//!   - Timestamp-driven updates through [`time::Sampled`] for any clock implementing
//!     [`time::InstantLike`].
//!
//! - Generic over `f32`/`f64` and `no_std` (with `alloc`).
//!
//! ## Usage
//!
//! ```rust
//! use discrete_ctrl::anti_windup::BackCalc;
//! use discrete_ctrl::element::CtrlElement;
//! use discrete_ctrl::filter::Inertia;
//! use discrete_ctrl::pid::{Pid, PidConfigBuilder};
//! use discrete_ctrl::saturation::Bounds;
//!
//! let config = PidConfigBuilder::default()
//!     .kp(5.0)
//!     .ki(0.5)
//!     .kd(0.1)
//!     .build()
//!     .expect("Invalid PID config");
//! let bounds = Bounds::new(-0.5, 0.5).expect("Invalid bounds");
//! let mut pid = Pid::new(config, BackCalc::new(bounds));
//! let mut plant = Inertia::new(5.0, 0.0);
//!
//! let dt = 0.01;
//! let setpoint = 1.0;
//! for _ in 0..1000 {
//!     let output = pid.update(dt, setpoint - plant.value());
//!     assert!(bounds.contains(output));
//!     plant.update(dt, output);
//! }
//! ```
//!
//! ## License
//!
//! MIT
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// Anti-windup strategies that shape the final output of the PID controller.
pub mod anti_windup;

/// The common contract of all discrete-time control elements.
pub mod element;

/// Errors reported when configuring controllers and filters.
pub mod error;

pub mod filter;

/// The PID controller and its configuration.
pub mod pid;

/// The saturation primitive and validated saturation bounds.
pub mod saturation;

/// Clock abstraction and timestamp-driven updates.
pub mod time;

#[doc(hidden)]
#[cfg(feature = "simulation")]
pub mod sim;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
