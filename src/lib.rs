#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set is the set of complex numbers c for which the
//! sequence z = z * z + c, starting from zero, stays bounded forever.
//! The classic way to draw it is the escape-time algorithm: iterate
//! each point up to some budget, count how many steps it takes to
//! escape a circle of radius 2, and turn that count into a color.
//! Points that never escape within the budget are painted black.
//!
//! This crate is the render core only.  A caller describes the view
//! it wants (a center on the complex plane, a zoom factor, an
//! iteration budget, and the output size in pixels) and receives a
//! finished RGBA byte buffer plus the wall-clock time the render
//! took.  Window management, text parsing, and key bindings are the
//! caller's problem; the `mandel` binary in this crate is one such
//! caller.

#[macro_use]
extern crate failure;

extern crate crossbeam;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod color;
pub mod errors;
pub mod render;
pub mod viewport;

pub use color::{color_for, PixelColor};
pub use errors::RenderError;
pub use render::{render, EscapeTimeRenderer};
pub use viewport::{ViewSpec, ViewportMapper, BASE_SPAN, MAX_DIMENSION, MAX_ITERATION_LIMIT};
