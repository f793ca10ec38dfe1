// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OBJ-Lite Raster
//!
//! PNG output for parsed OBJ geometry: an RGB [`Canvas`] with Bresenham
//! line drawing, and a [wireframe renderer](draw_wireframe) that projects a
//! model's faces onto it.
//!
//! This crate consumes nothing from the parser beyond the record types; it
//! is also where 1-based face indices are finally checked against the
//! vertex table.
//!
//! ```rust
//! use obj_lite_core::parse_obj;
//! use obj_lite_raster::{draw_wireframe, Canvas, Rgb};
//!
//! let input = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
//! let report = parse_obj(input.as_bytes()).unwrap();
//! let mut canvas = Canvas::white(64, 64);
//! draw_wireframe(&report.model, &mut canvas, Rgb::BLACK).unwrap();
//! ```

pub mod canvas;
pub mod color;
pub mod error;
pub mod wireframe;

pub use canvas::Canvas;
pub use color::Rgb;
pub use error::{Error, Result};
pub use wireframe::draw_wireframe;
