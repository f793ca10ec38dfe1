// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Byte-level OBJ scanner.
//!
//! Classifies a raw byte stream into the small token alphabet OBJ element
//! lines are built from. The scanner is a table-driven finite state machine
//! with one byte of lookahead: each byte is mapped to a symbol class, the
//! symbol × state transition matrix yields the successor state, and a
//! transition back to the start state emits the token accumulated so far.
//!
//! Bytes are pulled from the reader in fixed-size refills; the scanner never
//! seeks. `\r` bytes are absorbed so that Windows line endings behave like
//! plain `\n` (a lone trailing `\r` is treated as a final newline).

use std::fmt::{self, Display, Formatter};
use std::io::Read;

use crate::error::Result;

/// A lexical unit emitted by [`Scanner::next`].
///
/// The discriminant order is load-bearing: element-parser matrices have one
/// column per token type, indexed by `token as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TokenType {
    /// Letters, digits, and underscores; cannot start with a digit.
    Word = 0,
    /// Digits, optionally preceded by a minus sign.
    Integer,
    /// Digits with a single interior dot, optionally preceded by a minus.
    Float,
    /// The `/` character.
    Slash,
    /// A run of spaces and/or tabs.
    Space,
    /// The `\n` character.
    Eol,
    /// The byte source is exhausted.
    Eof,
    /// A maximal run matching none of the other types.
    Unknown,
    /// `#` through the last character before the end of the line.
    Comment,
}

impl TokenType {
    /// Number of token types; sizes the columns of parser matrices.
    pub const COUNT: usize = 9;
}

impl Display for TokenType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let name = match self {
            TokenType::Word => "word",
            TokenType::Integer => "integer",
            TokenType::Float => "float",
            TokenType::Slash => "slash",
            TokenType::Space => "space",
            TokenType::Eol => "end of line",
            TokenType::Eof => "end of input",
            TokenType::Unknown => "unknown",
            TokenType::Comment => "comment",
        };
        name.fmt(f)
    }
}

/// Classification of a single input byte.
#[derive(Clone, Copy)]
#[repr(u8)]
enum Symbol {
    Eol = 0,
    Space,
    Hash,
    Slash,
    Minus,
    Dot,
    Digit,
    Letter,
    Other,
}

impl Symbol {
    const COUNT: usize = 9;
}

#[inline]
fn classify(byte: u8) -> Symbol {
    match byte {
        b'\n' => Symbol::Eol,
        b' ' | b'\t' => Symbol::Space,
        b'#' => Symbol::Hash,
        b'/' => Symbol::Slash,
        b'-' => Symbol::Minus,
        b'.' => Symbol::Dot,
        b'0'..=b'9' => Symbol::Digit,
        b'_' | b'a'..=b'z' | b'A'..=b'Z' => Symbol::Letter,
        _ => Symbol::Other,
    }
}

/// A state of the scanning machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum State {
    /// Between tokens.
    Start = 0,
    /// Inside a comment, consuming up to the next `\n`.
    SkipLine,
    FoundEol,
    FoundSpace,
    FoundSlash,
    /// A leading `-`; a digit must follow.
    FoundMinus,
    /// A `.` after digits; a digit must follow.
    FoundDot,
    FoundInt,
    FoundFloat,
    FoundWord,
    /// Inside a run that matches no token pattern.
    Unknown,
}

impl State {
    const COUNT: usize = 11;
}

/// Symbol × state transition matrix. Rows follow the [`Symbol`] order,
/// columns the [`State`] order.
static TRANSITIONS: [[State; State::COUNT]; Symbol::COUNT] = {
    use State::*;
    [
        // Start      SkipLine  FoundEol FoundSpace  FoundSlash FoundMinus FoundDot    FoundInt   FoundFloat  FoundWord  Unknown
        [FoundEol,    Start,    Start,   Start,      Start,     Start,     Start,      Start,     Start,      Start,     Start  ], // \n
        [FoundSpace,  SkipLine, Start,   FoundSpace, Start,     Start,     Start,      Start,     Start,      Start,     Start  ], // space, tab
        [SkipLine,    SkipLine, Start,   Start,      Start,     Start,     Start,      Start,     Start,      Start,     Start  ], // #
        [FoundSlash,  SkipLine, Start,   Start,      Start,     Start,     Start,      Start,     Start,      Start,     Start  ], // /
        [FoundMinus,  SkipLine, Start,   Start,      Start,     Unknown,   Unknown,    Unknown,   Unknown,    Unknown,   Unknown], // -
        [Unknown,     SkipLine, Start,   Start,      Start,     Unknown,   Unknown,    FoundDot,  Unknown,    Unknown,   Unknown], // .
        [FoundInt,    SkipLine, Start,   Start,      Start,     FoundInt,  FoundFloat, FoundInt,  FoundFloat, FoundWord, Unknown], // digit
        [FoundWord,   SkipLine, Start,   Start,      Start,     Unknown,   Unknown,    Unknown,   Unknown,    FoundWord, Unknown], // letter, _
        [Unknown,     SkipLine, Start,   Start,      Start,     Unknown,   Unknown,    Unknown,   Unknown,    Unknown,   Unknown], // other
    ]
};

/// Token emitted when the machine leaves each state back to `Start`.
static EMITS: [TokenType; State::COUNT] = [
    TokenType::Unknown,
    TokenType::Comment,
    TokenType::Eol,
    TokenType::Space,
    TokenType::Slash,
    TokenType::Unknown,
    TokenType::Unknown,
    TokenType::Integer,
    TokenType::Float,
    TokenType::Word,
    TokenType::Unknown,
];

/// Capacity of the refill buffer.
const BUF_SIZE: usize = 255;

/// Initial capacity of the per-line byte buffer.
const LINE_CAPACITY: usize = 100;

/// Pulls bytes from a reader and yields `(TokenType, lexeme)` pairs.
///
/// After the byte source is exhausted, every further call to [`next`]
/// returns `(Eof, "")`. Read failures are fatal and surface as
/// [`Error::Read`](crate::Error::Read).
///
/// A scanner is single-threaded state; two scanners over independent
/// readers are independent.
pub struct Scanner<R> {
    reader: R,

    buffer: [u8; BUF_SIZE],
    buf_pos: usize,
    buf_len: usize,
    /// False until the first refill has run.
    primed: bool,

    /// Bytes of the line currently being processed, for diagnostics.
    line_buf: Vec<u8>,
    /// The current line has ended but has not been rotated out yet.
    switch_line: bool,
    line: usize,
    /// Count of consumed bytes.
    consumed: usize,
    skip_comments: bool,
}

impl<R: Read> Scanner<R> {
    /// Creates a scanner over `reader`. Comment skipping is on by default.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: [0; BUF_SIZE],
            buf_pos: 0,
            buf_len: 0,
            primed: false,
            line_buf: Vec::with_capacity(LINE_CAPACITY),
            switch_line: false,
            line: 1,
            consumed: 0,
            skip_comments: true,
        }
    }

    /// Pulls the next refill from the reader.
    fn refill(&mut self) -> Result<()> {
        self.buf_len = self.reader.read(&mut self.buffer)?;
        self.buf_pos = 0;
        Ok(())
    }

    /// Reports whether another byte is available, refilling if needed.
    ///
    /// The end of input is reached once a refill came back short of the
    /// buffer capacity and the cursor has caught up with it.
    fn has(&mut self) -> Result<bool> {
        if self.buf_pos == self.buf_len {
            if self.primed && self.buf_len < BUF_SIZE {
                return Ok(false);
            }
            self.refill()?;
            self.primed = true;
        }
        Ok(self.buf_pos != self.buf_len)
    }

    /// Rotates the line bookkeeping to a fresh line.
    fn rotate_line(&mut self) {
        self.line_buf.clear();
        self.line += 1;
    }

    /// Consumes the byte under the cursor.
    ///
    /// Callers must have observed `has()` return true since the last step.
    fn step(&mut self) {
        if self.switch_line {
            self.rotate_line();
            self.switch_line = false;
        }
        let symbol = self.buffer[self.buf_pos];
        if symbol == b'\n' {
            self.switch_line = true;
        } else {
            self.line_buf.push(symbol);
        }
        self.buf_pos += 1;
        self.consumed += 1;
    }

    /// Returns the next token and its lexeme.
    pub fn next(&mut self) -> Result<(TokenType, String)> {
        if !self.has()? {
            return Ok((TokenType::Eof, String::new()));
        }
        let mut state = State::Start;
        let mut lexeme = Vec::with_capacity(LINE_CAPACITY);
        while self.has()? {
            let mut symbol = self.buffer[self.buf_pos];
            if symbol == b'\r' {
                // Absorb the \r: the machine sees the byte after it. When
                // the input ends on the \r, a final \n takes its place in
                // the buffer and is scanned like any other byte.
                self.step();
                if !self.has()? {
                    self.buffer[0] = b'\n';
                    self.buf_pos = 0;
                    self.buf_len = 1;
                }
                symbol = self.buffer[self.buf_pos];
            }
            let emitted = EMITS[state as usize];
            state = TRANSITIONS[classify(symbol) as usize][state as usize];
            if state == State::Start {
                // Leaving for Start ends the token; the consumed byte stream
                // is left positioned on `symbol`.
                if self.skip_comments && emitted == TokenType::Comment {
                    return self.next();
                }
                return Ok((emitted, String::from_utf8_lossy(&lexeme).into_owned()));
            }
            lexeme.push(symbol);
            self.step();
        }
        Ok((EMITS[state as usize], String::from_utf8_lossy(&lexeme).into_owned()))
    }

    /// Discards bytes through the next `\n` inclusive.
    ///
    /// [`line_string`](Self::line_string) afterwards returns the skipped
    /// line. A no-op when the current line has already ended.
    pub fn skip_line(&mut self) -> Result<()> {
        if self.switch_line {
            return Ok(());
        }
        while self.has()? {
            match memchr::memchr(b'\n', &self.buffer[self.buf_pos..self.buf_len]) {
                Some(offset) => {
                    self.line_buf
                        .extend_from_slice(&self.buffer[self.buf_pos..self.buf_pos + offset]);
                    self.buf_pos += offset + 1;
                    self.consumed += offset + 1;
                    self.switch_line = true;
                    return Ok(());
                }
                None => {
                    let run = self.buf_len - self.buf_pos;
                    self.line_buf
                        .extend_from_slice(&self.buffer[self.buf_pos..self.buf_len]);
                    self.buf_pos = self.buf_len;
                    self.consumed += run;
                }
            }
        }
        Ok(())
    }

    /// The text of the line currently being processed, as read so far.
    pub fn line_string(&self) -> String {
        String::from_utf8_lossy(&self.line_buf).into_owned()
    }

    /// 0-based offset of the most recently consumed byte.
    #[inline]
    pub fn position(&self) -> usize {
        self.consumed.saturating_sub(1)
    }

    /// 1-based number of the line currently being processed.
    #[inline]
    pub fn line(&self) -> usize {
        self.line
    }

    /// Position within the current line of the most recently consumed byte.
    #[inline]
    pub fn column(&self) -> usize {
        if self.switch_line || (self.primed && self.buf_pos == self.buf_len && self.buf_len < BUF_SIZE)
        {
            self.line_buf.len()
        } else {
            self.line_buf.len().saturating_sub(1)
        }
    }

    /// True if `Comment` tokens are being discarded.
    #[inline]
    pub fn is_skip_comments(&self) -> bool {
        self.skip_comments
    }

    /// Enables or disables discarding of `Comment` tokens.
    #[inline]
    pub fn skip_comments(&mut self, skip: bool) {
        self.skip_comments = skip;
    }
}

#[cfg(test)]
mod tests {
    use super::TokenType::*;
    use super::*;

    fn scan_all(input: &str) -> Vec<(TokenType, String)> {
        let mut scanner = Scanner::new(input.as_bytes());
        scanner.skip_comments(false);
        let mut tokens = Vec::new();
        loop {
            let (token, lexeme) = scanner.next().unwrap();
            if token == Eof {
                break;
            }
            tokens.push((token, lexeme));
        }
        tokens
    }

    fn kinds(tokens: &[(TokenType, String)]) -> Vec<TokenType> {
        tokens.iter().map(|(t, _)| *t).collect()
    }

    #[test]
    fn classifies_a_vertex_line() {
        let tokens = scan_all("v 1.5 -2 0\n");
        assert_eq!(
            tokens,
            vec![
                (Word, "v".to_string()),
                (Space, " ".to_string()),
                (Float, "1.5".to_string()),
                (Space, " ".to_string()),
                (Integer, "-2".to_string()),
                (Space, " ".to_string()),
                (Integer, "0".to_string()),
                (Eol, "\n".to_string()),
            ]
        );
    }

    #[test]
    fn classifies_face_corners() {
        let tokens = scan_all("f 1/2/3");
        assert_eq!(kinds(&tokens), vec![Word, Space, Integer, Slash, Integer, Slash, Integer]);
    }

    #[test]
    fn words_take_underscores_and_digits() {
        let tokens = scan_all("v_2a");
        assert_eq!(tokens, vec![(Word, "v_2a".to_string())]);
    }

    #[test]
    fn runs_that_fit_no_pattern_are_unknown() {
        // A lone minus, a float with a dangling dot, a digit-led word.
        assert_eq!(kinds(&scan_all("- ")), vec![Unknown, Space]);
        assert_eq!(scan_all("1.")[0], (Unknown, "1.".to_string()));
        assert_eq!(scan_all("-1.x")[0], (Unknown, "-1.x".to_string()));
        assert_eq!(scan_all("2abc")[0], (Unknown, "2abc".to_string()));
        assert_eq!(scan_all("1.2.3")[0], (Unknown, "1.2.3".to_string()));
    }

    #[test]
    fn tabs_and_spaces_fold_into_one_token() {
        let tokens = scan_all(" \t ");
        assert_eq!(tokens, vec![(Space, " \t ".to_string())]);
    }

    #[test]
    fn lexemes_concatenate_back_to_the_input() {
        let input = "v 0.5 -1 2\nf 1/2/3 4//6\ng group_a\n# note\n@!\n";
        let joined: String = scan_all(input).into_iter().map(|(_, s)| s).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn carriage_returns_vanish() {
        let input = "v 1 2 3\r\nf 1 2 3\r\n";
        let joined: String = scan_all(input).into_iter().map(|(_, s)| s).collect();
        assert_eq!(joined, input.replace('\r', ""));
    }

    #[test]
    fn lone_trailing_carriage_return_becomes_a_newline() {
        assert_eq!(scan_all("v\r"), vec![(Word, "v".to_string()), (Eol, "\n".to_string())]);
    }

    #[test]
    fn comment_token_precedes_the_eol() {
        let tokens = scan_all("# a comment\nv");
        assert_eq!(
            tokens,
            vec![
                (Comment, "# a comment".to_string()),
                (Eol, "\n".to_string()),
                (Word, "v".to_string()),
            ]
        );
    }

    #[test]
    fn skipping_comments_keeps_the_eol() {
        let mut scanner = Scanner::new("# a comment\nv".as_bytes());
        assert!(scanner.is_skip_comments());
        assert_eq!(scanner.next().unwrap(), (Eol, "\n".to_string()));
        assert_eq!(scanner.next().unwrap(), (Word, "v".to_string()));
    }

    #[test]
    fn eof_repeats_forever() {
        let mut scanner = Scanner::new("v".as_bytes());
        assert_eq!(scanner.next().unwrap().0, Word);
        for _ in 0..3 {
            assert_eq!(scanner.next().unwrap(), (Eof, String::new()));
        }
    }

    #[test]
    fn empty_input_is_eof() {
        let mut scanner = Scanner::new("".as_bytes());
        assert_eq!(scanner.next().unwrap(), (Eof, String::new()));
    }

    #[test]
    fn position_tracks_consumed_bytes() {
        let mut scanner = Scanner::new("ab cd\nef".as_bytes());
        let mut total = 0;
        loop {
            let (token, lexeme) = scanner.next().unwrap();
            if token == Eof {
                break;
            }
            total += lexeme.len();
            assert_eq!(scanner.position(), total - 1);
        }
    }

    #[test]
    fn line_counter_is_one_based() {
        let mut scanner = Scanner::new("v 1 2 3\nf 1 2 3\n".as_bytes());
        assert_eq!(scanner.next().unwrap().0, Word);
        assert_eq!(scanner.line(), 1);
        while scanner.next().unwrap().0 != Eol {}
        // The counter rotates on the first byte of the next line.
        assert_eq!(scanner.next().unwrap().0, Word);
        assert_eq!(scanner.line(), 2);
    }

    #[test]
    fn line_string_accumulates_the_current_line() {
        let mut scanner = Scanner::new("v 1 2\nnext".as_bytes());
        assert_eq!(scanner.next().unwrap().0, Word);
        assert_eq!(scanner.next().unwrap().0, Space);
        assert_eq!(scanner.next().unwrap().0, Integer);
        assert_eq!(scanner.line_string(), "v 1");
    }

    #[test]
    fn skip_line_discards_through_the_newline() {
        let mut scanner = Scanner::new("garbage here\nv 1 2 3".as_bytes());
        scanner.skip_line().unwrap();
        assert_eq!(scanner.line_string(), "garbage here");
        assert_eq!(scanner.next().unwrap(), (Word, "v".to_string()));
        assert_eq!(scanner.line(), 2);
    }

    #[test]
    fn skip_line_after_eol_is_a_no_op() {
        let mut scanner = Scanner::new("v\nw\n".as_bytes());
        assert_eq!(scanner.next().unwrap().0, Word);
        assert_eq!(scanner.next().unwrap().0, Eol);
        scanner.skip_line().unwrap();
        assert_eq!(scanner.next().unwrap(), (Word, "w".to_string()));
    }

    #[test]
    fn skip_line_at_end_of_input_stops() {
        let mut scanner = Scanner::new("no newline".as_bytes());
        scanner.skip_line().unwrap();
        assert_eq!(scanner.next().unwrap().0, Eof);
    }

    #[test]
    fn input_longer_than_the_refill_buffer() {
        let mut input = String::new();
        for _ in 0..100 {
            input.push_str("word ");
        }
        let tokens = scan_all(&input);
        assert_eq!(tokens.len(), 200);
        let joined: String = tokens.into_iter().map(|(_, s)| s).collect();
        assert_eq!(joined, input);
    }

    #[test]
    fn token_spanning_a_refill_boundary() {
        // 254 digits, then one more after the refill boundary.
        let input = format!("{}5", "1".repeat(254));
        let tokens = scan_all(&input);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].0, Integer);
        assert_eq!(tokens[0].1.len(), 255);
    }
}
