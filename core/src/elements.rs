// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed records for parsed OBJ elements.
//!
//! The element machines build these records through small semantic actions,
//! one per lexeme-carrying state; the methods here are those actions.

use std::fmt::{self, Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// The kinds of OBJ elements this parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Vertex,
    Face,
}

impl ElementKind {
    /// The keyword that opens an element line of this kind.
    pub fn keyword(self) -> &'static str {
        match self {
            ElementKind::Vertex => "v",
            ElementKind::Face => "f",
        }
    }
}

impl Display for ElementKind {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            ElementKind::Vertex => "vertex",
            ElementKind::Face => "face",
        };
        name.fmt(f)
    }
}

/// A 3-D point declared by a `v` line.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vertex {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub(crate) fn set_x(&mut self, lexeme: &str) -> Result<(), ValueError> {
        self.x = parse_coordinate(lexeme)?;
        Ok(())
    }

    pub(crate) fn set_y(&mut self, lexeme: &str) -> Result<(), ValueError> {
        self.y = parse_coordinate(lexeme)?;
        Ok(())
    }

    pub(crate) fn set_z(&mut self, lexeme: &str) -> Result<(), ValueError> {
        self.z = parse_coordinate(lexeme)?;
        Ok(())
    }

    /// A vertex carries exactly three coordinates; a fourth number is
    /// syntactically reachable in the machine but never storable.
    pub(crate) fn extra_coordinate(&mut self, lexeme: &str) -> Result<(), ValueError> {
        Err(ValueError::new(format!(
            "extra coordinate `{lexeme}`: a vertex has exactly three"
        )))
    }
}

/// One corner of a face: a vertex index plus optional texture and normal
/// indices, all 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Corner {
    pub vertex: u32,
    pub texture: Option<u32>,
    pub normal: Option<u32>,
}

impl Corner {
    pub fn new(vertex: u32) -> Self {
        Self {
            vertex,
            texture: None,
            normal: None,
        }
    }
}

/// A polygon declared by an `f` line: at least three corners, every corner
/// written in the same syntactic form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Face {
    pub corners: Vec<Corner>,
}

impl Face {
    pub(crate) fn begin_corner(&mut self, lexeme: &str) -> Result<(), ValueError> {
        self.corners.push(Corner::new(parse_index(lexeme)?));
        Ok(())
    }

    pub(crate) fn set_texture(&mut self, lexeme: &str) -> Result<(), ValueError> {
        self.current(lexeme)?.texture = Some(parse_index(lexeme)?);
        Ok(())
    }

    pub(crate) fn set_normal(&mut self, lexeme: &str) -> Result<(), ValueError> {
        self.current(lexeme)?.normal = Some(parse_index(lexeme)?);
        Ok(())
    }

    fn current(&mut self, lexeme: &str) -> Result<&mut Corner, ValueError> {
        self.corners
            .last_mut()
            .ok_or_else(|| ValueError::new(format!("index `{lexeme}` before any corner")))
    }
}

/// Collections of accepted records, in input order.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObjModel {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl ObjModel {
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.faces.is_empty()
    }
}

#[inline]
fn parse_coordinate(lexeme: &str) -> Result<f64, ValueError> {
    fast_float::parse(lexeme)
        .map_err(|_| ValueError::new(format!("`{lexeme}` is not a coordinate")))
}

/// Indices are 1-based; zero and negative values do not name anything.
#[inline]
fn parse_index(lexeme: &str) -> Result<u32, ValueError> {
    match lexeme.parse::<u32>() {
        Ok(index) if index > 0 => Ok(index),
        _ => Err(ValueError::new(format!(
            "`{lexeme}` is not a positive index"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_actions_fill_coordinates_in_order() {
        let mut vertex = Vertex::default();
        vertex.set_x("1").unwrap();
        vertex.set_y("-2.5").unwrap();
        vertex.set_z("0.25").unwrap();
        assert_eq!(vertex, Vertex::new(1.0, -2.5, 0.25));
    }

    #[test]
    fn a_fourth_coordinate_is_refused() {
        let mut vertex = Vertex::new(1.0, 2.0, 3.0);
        assert!(vertex.extra_coordinate("4").is_err());
    }

    #[test]
    fn face_actions_attach_indices_to_the_open_corner() {
        let mut face = Face::default();
        face.begin_corner("1").unwrap();
        face.set_texture("2").unwrap();
        face.set_normal("3").unwrap();
        face.begin_corner("4").unwrap();
        assert_eq!(face.corners.len(), 2);
        assert_eq!(face.corners[0].texture, Some(2));
        assert_eq!(face.corners[0].normal, Some(3));
        assert_eq!(face.corners[1], Corner::new(4));
    }

    #[test]
    fn indices_must_be_positive() {
        let mut face = Face::default();
        assert!(face.begin_corner("0").is_err());
        assert!(face.begin_corner("-3").is_err());
        assert!(face.begin_corner("2.5").is_err());
    }
}
