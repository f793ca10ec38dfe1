// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element grammars and the parsing driver.
//!
//! The slot lists here are the single source of truth for what a `v` or `f`
//! line may look like; [`compile`](crate::grammar::compile) derives the
//! transition matrices from them once, and the driver runs the compiled
//! machines against the scanner's token stream line by line.
//!
//! A rejected line costs one diagnostic and nothing else: the driver skips
//! to the next line and carries on, so the returned model holds exactly the
//! accepted records.

use std::io::Read;
use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use crate::elements::{ElementKind, Face, ObjModel, Vertex};
use crate::error::{Error, ParseError, Result};
use crate::grammar::{compile, Machine, Piece, Slot, TokenSet};
use crate::scanner::{Scanner, TokenType};

/// Either numeric token type serves as a coordinate.
const NUMBER: TokenSet = TokenSet::of(TokenType::Integer).or(TokenType::Float);
const INTEGER: TokenSet = TokenSet::of(TokenType::Integer);
const SLASH: TokenSet = TokenSet::of(TokenType::Slash);
const SPACE: TokenSet = TokenSet::of(TokenType::Space);

/// `v x y z`: three coordinates, each `Integer` or `Float`, single spaces
/// between them. Trailing space is tolerated; a fourth number is reachable
/// in the matrix but refused by its action, so `v 1 2 3 4` rejects at the
/// `4`.
fn vertex_slots() -> Vec<Slot<Vertex>> {
    vec![
        Slot::Sep,
        Slot::One(NUMBER, Some(Vertex::set_x)),
        Slot::Sep,
        Slot::One(NUMBER, Some(Vertex::set_y)),
        Slot::Sep,
        Slot::One(NUMBER, Some(Vertex::set_z)),
        Slot::Tail(vec![
            (SPACE, None),
            (NUMBER, Some(Vertex::extra_coordinate)),
            (SPACE, None),
        ]),
    ]
}

/// `f` corners: `v`, `v/vt`, `v//vn`, or `v/vt/vn`, at least three of them,
/// all in the form the first corner used.
fn face_slots() -> Vec<Slot<Face>> {
    let vertex: Piece<Face> = (INTEGER, Some(Face::begin_corner));
    let texture: Piece<Face> = (INTEGER, Some(Face::set_texture));
    let normal: Piece<Face> = (INTEGER, Some(Face::set_normal));
    let slash: Piece<Face> = (SLASH, None);
    vec![
        Slot::Sep,
        Slot::List {
            min: 3,
            shapes: vec![
                vec![vertex, slash, texture, slash, normal],
                vec![vertex, slash, texture],
                vec![vertex, slash, slash, normal],
                vec![vertex],
            ],
        },
    ]
}

fn vertex_machine() -> &'static Machine<Vertex> {
    static MACHINE: OnceLock<Machine<Vertex>> = OnceLock::new();
    MACHINE.get_or_init(|| compile(&vertex_slots()))
}

fn face_machine() -> &'static Machine<Face> {
    static MACHINE: OnceLock<Machine<Face>> = OnceLock::new();
    MACHINE.get_or_init(|| compile(&face_slots()))
}

/// File-level counters kept by the driver.
#[derive(Debug, Clone, Default)]
pub struct ParseStats {
    /// Elements that reached their accept state.
    pub accepted: usize,
    /// Elements rejected with a diagnostic.
    pub rejected: usize,
    /// Lines skipped because their keyword names no known element, counted
    /// per keyword.
    pub skipped: FxHashMap<String, usize>,
}

/// Everything [`parse_obj`] produces: the accepted records, the counters,
/// and one diagnostic per rejected element.
#[derive(Debug, Clone, Default)]
pub struct ParseReport {
    pub model: ObjModel,
    pub stats: ParseStats,
    pub diagnostics: Vec<ParseError>,
}

/// Parses OBJ input, collecting diagnostics into the report.
///
/// Only a failure of the byte source itself aborts the parse; malformed
/// element lines each yield one [`ParseError`] and are skipped.
pub fn parse_obj<R: Read>(reader: R) -> Result<ParseReport> {
    let mut diagnostics = Vec::new();
    let (model, stats) = parse_obj_with(reader, |error| diagnostics.push(error))?;
    Ok(ParseReport {
        model,
        stats,
        diagnostics,
    })
}

/// Parses OBJ input, reporting each rejected element to `sink`.
pub fn parse_obj_with<R: Read>(
    reader: R,
    mut sink: impl FnMut(ParseError),
) -> Result<(ObjModel, ParseStats)> {
    let mut scanner = Scanner::new(reader);
    let mut model = ObjModel::default();
    let mut stats = ParseStats::default();
    loop {
        let (token, lexeme) = scanner.next()?;
        match token {
            TokenType::Eof => break,
            // Blank space between elements carries no information.
            TokenType::Eol | TokenType::Space | TokenType::Comment => continue,
            TokenType::Word => match lexeme.as_str() {
                "v" => run_element(
                    vertex_machine(),
                    ElementKind::Vertex,
                    &mut scanner,
                    &mut stats,
                    &mut sink,
                    |record| model.vertices.push(record),
                )?,
                "f" => run_element(
                    face_machine(),
                    ElementKind::Face,
                    &mut scanner,
                    &mut stats,
                    &mut sink,
                    |record| model.faces.push(record),
                )?,
                _ => {
                    *stats.skipped.entry(lexeme).or_insert(0) += 1;
                    scanner.skip_line()?;
                }
            },
            // A line led by anything else declares nothing.
            _ => scanner.skip_line()?,
        }
    }
    Ok((model, stats))
}

fn run_element<T: Default, R: Read>(
    machine: &Machine<T>,
    kind: ElementKind,
    scanner: &mut Scanner<R>,
    stats: &mut ParseStats,
    sink: &mut impl FnMut(ParseError),
    accept: impl FnOnce(T),
) -> Result<()> {
    match machine.run(scanner, kind) {
        Ok(record) => {
            accept(record);
            stats.accepted += 1;
        }
        Err(Error::Parse(error)) => {
            sink(error);
            stats.rejected += 1;
            scanner.skip_line()?;
        }
        Err(fatal) => return Err(fatal),
    }
    Ok(())
}
