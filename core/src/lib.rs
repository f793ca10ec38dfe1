// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # OBJ-Lite Core Parser
//!
//! Table-driven front end for the Wavefront OBJ geometry format.
//!
//! ## Overview
//!
//! Parsing runs in two stages, both driven by explicit state-transition
//! matrices:
//!
//! - **Scanner**: classifies raw bytes into a nine-token alphabet with one
//!   byte of lookahead and fixed-size refills, tracking byte offset, line,
//!   and column as it goes.
//! - **Element parsers**: each OBJ element kind (`v`, `f`) is described
//!   once as a declarative slot list; the grammar builder compiles it into
//!   a state × token matrix plus semantic actions that accumulate the
//!   typed record while the machine validates the line.
//!
//! A malformed line costs one diagnostic: the driver resynchronises at the
//! next line, and the returned model holds exactly the accepted records.
//!
//! ## Quick Start
//!
//! ```rust
//! use obj_lite_core::parse_obj;
//!
//! let input = "v 0.0 0.0 0.0\nv 1.0 0.0 0.0\nv 0.0 1.0 0.0\nf 1 2 3\n";
//! let report = parse_obj(input.as_bytes()).unwrap();
//! assert_eq!(report.model.vertices.len(), 3);
//! assert_eq!(report.model.faces.len(), 1);
//! assert!(report.diagnostics.is_empty());
//! ```
//!
//! Index ranges are not validated here; faces may name vertices the model
//! does not hold. Consumers resolve indices against the vertex table.
//!
//! ## Feature Flags
//!
//! - `serde`: serialization support for the record types

pub mod elements;
pub mod error;
pub mod grammar;
pub mod parser;
pub mod scanner;

pub use elements::{Corner, ElementKind, Face, ObjModel, Vertex};
pub use error::{Error, ParseError, Result, ValueError};
pub use parser::{parse_obj, parse_obj_with, ParseReport, ParseStats};
pub use scanner::{Scanner, TokenType};
