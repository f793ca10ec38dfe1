// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Wireframe rendering of parsed OBJ models.
//!
//! Vertices are projected orthographically onto the XY plane, fitted to the
//! canvas with a uniform scale and a margin, and each face's edge loop is
//! drawn as line segments. Face indices are resolved against the vertex
//! table here; the parser defers range validation to its consumers.

use nalgebra::Point3;

use obj_lite_core::{Face, ObjModel, Vertex};

use crate::canvas::Canvas;
use crate::color::Rgb;
use crate::error::{Error, Result};

/// Fraction of each canvas dimension left blank around the model.
const MARGIN: f64 = 0.05;

/// Draws the edge loop of every face in `model` onto `canvas`.
pub fn draw_wireframe(model: &ObjModel, canvas: &mut Canvas, color: Rgb) -> Result<()> {
    let Some((min, max)) = bounds(&model.vertices) else {
        return Ok(());
    };
    let projector = Projector::fit(min, max, canvas.width(), canvas.height());
    let points: Vec<(i32, i32)> = model
        .vertices
        .iter()
        .map(|vertex| projector.apply(vertex))
        .collect();
    for face in &model.faces {
        for (from, to) in edges(face) {
            let from = resolve(&points, from)?;
            let to = resolve(&points, to)?;
            canvas.line(from, to, color);
        }
    }
    Ok(())
}

/// Axis-aligned bounds of the vertex cloud; `None` when it is empty.
fn bounds(vertices: &[Vertex]) -> Option<(Point3<f64>, Point3<f64>)> {
    let first = vertices.first()?;
    let mut min = Point3::new(first.x, first.y, first.z);
    let mut max = min;
    for vertex in &vertices[1..] {
        min.x = min.x.min(vertex.x);
        min.y = min.y.min(vertex.y);
        min.z = min.z.min(vertex.z);
        max.x = max.x.max(vertex.x);
        max.y = max.y.max(vertex.y);
        max.z = max.z.max(vertex.z);
    }
    Some((min, max))
}

/// Consecutive corner pairs of the face, closing back to the first corner.
fn edges(face: &Face) -> impl Iterator<Item = (u32, u32)> + '_ {
    let count = face.corners.len();
    (0..count).map(move |i| {
        (
            face.corners[i].vertex,
            face.corners[(i + 1) % count].vertex,
        )
    })
}

/// Looks a 1-based face index up in the projected vertex table.
fn resolve(points: &[(i32, i32)], index: u32) -> Result<(i32, i32)> {
    (index as usize)
        .checked_sub(1)
        .and_then(|i| points.get(i))
        .copied()
        .ok_or(Error::IndexOutOfRange {
            index,
            count: points.len(),
        })
}

/// Uniform-scale fit of model XY bounds into a canvas, with the Y axis
/// flipped to image row order.
struct Projector {
    min_x: f64,
    min_y: f64,
    scale: f64,
    pad_x: f64,
    pad_y: f64,
    height: f64,
}

impl Projector {
    fn fit(min: Point3<f64>, max: Point3<f64>, width: u32, height: u32) -> Self {
        let span_x = (max.x - min.x).max(f64::EPSILON);
        let span_y = (max.y - min.y).max(f64::EPSILON);
        let usable_x = f64::from(width) * (1.0 - 2.0 * MARGIN);
        let usable_y = f64::from(height) * (1.0 - 2.0 * MARGIN);
        let scale = (usable_x / span_x).min(usable_y / span_y);
        Self {
            min_x: min.x,
            min_y: min.y,
            scale,
            pad_x: (f64::from(width) - span_x * scale) / 2.0,
            pad_y: (f64::from(height) - span_y * scale) / 2.0,
            height: f64::from(height),
        }
    }

    fn apply(&self, vertex: &Vertex) -> (i32, i32) {
        let x = (vertex.x - self.min_x) * self.scale + self.pad_x;
        let y = (vertex.y - self.min_y) * self.scale + self.pad_y;
        (x.round() as i32, (self.height - 1.0 - y).round() as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obj_lite_core::Corner;

    fn unit_square() -> Vec<Vertex> {
        vec![
            Vertex::new(0.0, 0.0, 0.0),
            Vertex::new(1.0, 0.0, 0.0),
            Vertex::new(1.0, 1.0, 0.0),
            Vertex::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn bounds_cover_the_cloud() {
        let (min, max) = bounds(&unit_square()).unwrap();
        assert_eq!((min.x, min.y), (0.0, 0.0));
        assert_eq!((max.x, max.y), (1.0, 1.0));
        assert!(bounds(&[]).is_none());
    }

    #[test]
    fn edges_close_the_loop() {
        let face = Face {
            corners: vec![Corner::new(1), Corner::new(2), Corner::new(3)],
        };
        let pairs: Vec<_> = edges(&face).collect();
        assert_eq!(pairs, vec![(1, 2), (2, 3), (3, 1)]);
    }

    #[test]
    fn projection_keeps_points_inside_the_canvas() {
        let (min, max) = bounds(&unit_square()).unwrap();
        let projector = Projector::fit(min, max, 100, 80);
        for vertex in unit_square() {
            let (x, y) = projector.apply(&vertex);
            assert!((0..100).contains(&x), "x = {x}");
            assert!((0..80).contains(&y), "y = {y}");
        }
    }

    #[test]
    fn a_flat_cloud_does_not_blow_up_the_scale() {
        let vertices = vec![Vertex::new(2.0, 5.0, 0.0), Vertex::new(3.0, 5.0, 0.0)];
        let (min, max) = bounds(&vertices).unwrap();
        let projector = Projector::fit(min, max, 50, 50);
        let (x, y) = projector.apply(&vertices[0]);
        assert!((0..50).contains(&x));
        assert!((0..50).contains(&y));
    }
}
