// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Draws a twelve-pointed star of line segments and saves it as a PNG.
//!
//! A quick visual check of the Bresenham implementation: every spoke
//! direction exercises a different slope octant.

use std::f64::consts::PI;

use obj_lite_raster::{Canvas, Result, Rgb};

fn main() -> Result<()> {
    let mut canvas = Canvas::white(200, 200);
    for i in 0..12 {
        let alpha = 2.0 * PI * f64::from(i) / 13.0;
        let x = (100.0 + 95.0 * alpha.cos()) as i32;
        let y = (100.0 + 95.0 * alpha.sin()) as i32;
        canvas.line((100, 100), (x, y), Rgb::RED);
    }
    canvas.save("star_lines.png")?;
    println!("wrote star_lines.png");
    Ok(())
}
