// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Parses a cube from literal OBJ text and renders its wireframe.

use obj_lite_core::parse_obj;
use obj_lite_raster::{draw_wireframe, Canvas, Result, Rgb};

const CUBE: &str = "\
# unit cube, slightly rotated in X for depth
v 0.0 0.0 0.0
v 1.0 0.0 0.2
v 1.0 1.0 0.2
v 0.0 1.0 0.0
v 0.2 0.2 1.0
v 1.2 0.2 1.2
v 1.2 1.2 1.2
v 0.2 1.2 1.0
f 1 2 3 4
f 5 6 7 8
f 1 2 6 5
f 2 3 7 6
f 3 4 8 7
f 4 1 5 8
";

fn main() -> Result<()> {
    let report = parse_obj(CUBE.as_bytes())?;
    for diagnostic in &report.diagnostics {
        eprintln!("{diagnostic}");
    }
    let mut canvas = Canvas::white(400, 400);
    draw_wireframe(&report.model, &mut canvas, Rgb::BLACK)?;
    canvas.save("render_cube.png")?;
    println!(
        "wrote render_cube.png ({} vertices, {} faces)",
        report.model.vertices.len(),
        report.model.faces.len()
    );
    Ok(())
}
