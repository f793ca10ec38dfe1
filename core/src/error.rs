// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

use crate::elements::ElementKind;

/// Result type for parsing operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning or parsing OBJ input
#[derive(Error, Debug)]
pub enum Error {
    /// The underlying byte source failed. Fatal; the scan cannot continue.
    #[error("read failed: {0}")]
    Read(#[from] std::io::Error),

    /// An element line did not match its grammar. The driver recovers by
    /// skipping to the next line.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A rejected element line, scoped to the token that caused the rejection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed {element} element at line {line}, column {column}: unexpected `{lexeme}`")]
pub struct ParseError {
    /// Which element grammar was running.
    pub element: ElementKind,
    /// 1-based line of the offending token.
    pub line: usize,
    /// Position of the offending token within its line.
    pub column: usize,
    /// The offending lexeme (empty for end of input).
    pub lexeme: String,
}

/// Raised by a semantic action when a lexeme cannot be stored in the record
/// being built, e.g. a face index that is not a positive integer.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct ValueError(String);

impl ValueError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
