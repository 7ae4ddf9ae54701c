//! Event-based parser for s-expression documents.

use std::ops::ControlFlow;

use tracing::trace;

use sexp_grammar::{Position, is_atom_char, is_whitespace, unescape_into};

use crate::callback::ParseCallback;
use crate::event::{Event, ParseError, ParseErrorKind};

/// Lexer and parser states, fused over a single scan of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between lists and atoms.
    List,
    /// Immediately after `(`, before the list's head.
    ListStart,
    /// Inside a bare atom.
    Atom,
    /// Inside a quoted atom.
    QuotedAtom,
    /// The byte after `\` in a quoted atom; consumed literally.
    EscapedChar,
    /// Immediately after the closing `"` of a quoted atom.
    PostAtom,
}

/// Event-based parser for one s-expression document.
///
/// The whole document must be available as one contiguous buffer; the
/// parser performs no I/O of its own.
pub struct Parser<'src> {
    input: &'src [u8],
}

impl<'src> Parser<'src> {
    /// Create a new parser for the given input.
    pub fn new(input: &'src [u8]) -> Self {
        Self { input }
    }

    /// Parse and emit events to the callback.
    ///
    /// Stops at the first syntax error, reporting it through
    /// [`ParseCallback::error`] and then returning it. A callback that
    /// breaks out of an event stops the parse early with `Ok(())`.
    pub fn parse<C: ParseCallback>(self, callback: &mut C) -> Result<(), ParseError> {
        let mut scan = Scan::new(self.input);
        match scan.run(callback) {
            Ok(_) => Ok(()),
            Err(error) => {
                trace!(%error, "parse failed");
                callback.error(&error);
                Err(error)
            }
        }
    }

    /// Convenience: parse and collect all events.
    pub fn parse_to_vec(self) -> Result<Vec<Event>, ParseError> {
        let mut events = Vec::new();
        self.parse(&mut events)?;
        Ok(events)
    }
}

/// One in-flight scan over the input.
struct Scan<'src> {
    input: &'src [u8],
    state: State,
    pos: Position,
    /// Open lists not yet closed.
    depth: u32,
    /// The atom being accumulated is a list head.
    first_atom: bool,
    /// The quoted atom being accumulated contains at least one escape.
    escaped_atom: bool,
    /// Byte offset where the current token's content starts.
    token_start: usize,
    /// Reused for unescaping quoted atoms; valid only within one callback.
    scratch: Vec<u8>,
}

impl<'src> Scan<'src> {
    fn new(input: &'src [u8]) -> Self {
        Self {
            input,
            state: State::List,
            pos: Position::start(),
            depth: 0,
            first_atom: false,
            escaped_atom: false,
            token_start: 0,
            scratch: Vec::new(),
        }
    }

    fn run<C: ParseCallback>(&mut self, callback: &mut C) -> Result<ControlFlow<()>, ParseError> {
        for index in 0..self.input.len() {
            let byte = self.input[index];
            self.pos.advance(byte);

            let flow = match self.state {
                State::List => self.on_list(byte, index, callback)?,
                State::ListStart => self.on_list_start(byte, index, callback)?,
                State::Atom => self.on_atom(byte, index, callback)?,
                State::QuotedAtom => self.on_quoted_atom(byte, index, callback)?,
                State::EscapedChar => {
                    self.state = State::QuotedAtom;
                    ControlFlow::Continue(())
                }
                State::PostAtom => self.on_post_atom(byte, callback)?,
            };

            if flow.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        self.finish()
    }

    /// Between lists and atoms. Atoms are only legal inside a list: the top
    /// level of a document is lists and whitespace.
    fn on_list<C: ParseCallback>(
        &mut self,
        byte: u8,
        index: usize,
        callback: &mut C,
    ) -> Result<ControlFlow<()>, ParseError> {
        match byte {
            b'(' => {
                self.depth += 1;
                self.state = State::ListStart;
                Ok(ControlFlow::Continue(()))
            }
            b')' => self.close_list(byte, callback),
            b'"' if self.depth > 0 => {
                self.state = State::QuotedAtom;
                self.escaped_atom = false;
                self.token_start = index + 1;
                Ok(ControlFlow::Continue(()))
            }
            _ if self.depth > 0 && is_atom_char(byte) => {
                self.state = State::Atom;
                self.first_atom = false;
                self.token_start = index;
                Ok(ControlFlow::Continue(()))
            }
            _ if is_whitespace(byte) => Ok(ControlFlow::Continue(())),
            _ => Err(self.error(ParseErrorKind::InvalidCharacter, byte)),
        }
    }

    /// Immediately after `(`: an empty-list close, the head atom, or a
    /// quoted atom. A quoted atom never names a list, and a list cannot
    /// open directly into another list.
    fn on_list_start<C: ParseCallback>(
        &mut self,
        byte: u8,
        index: usize,
        callback: &mut C,
    ) -> Result<ControlFlow<()>, ParseError> {
        match byte {
            b')' => self.close_list(byte, callback),
            b'"' => {
                self.state = State::QuotedAtom;
                self.escaped_atom = false;
                self.token_start = index + 1;
                Ok(ControlFlow::Continue(()))
            }
            _ if is_atom_char(byte) => {
                self.state = State::Atom;
                self.first_atom = true;
                self.token_start = index;
                Ok(ControlFlow::Continue(()))
            }
            _ if is_whitespace(byte) => Ok(ControlFlow::Continue(())),
            _ => Err(self.error(ParseErrorKind::InvalidCharacter, byte)),
        }
    }

    /// Inside a bare atom. Only whitespace or `)` may terminate it; the
    /// atom's event fires before a terminating close is processed.
    fn on_atom<C: ParseCallback>(
        &mut self,
        byte: u8,
        index: usize,
        callback: &mut C,
    ) -> Result<ControlFlow<()>, ParseError> {
        if is_atom_char(byte) {
            return Ok(ControlFlow::Continue(()));
        }
        if byte != b')' && !is_whitespace(byte) {
            return Err(self.error(ParseErrorKind::InvalidCharacter, byte));
        }

        let input = self.input;
        let atom = &input[self.token_start..index];
        let flow = if self.first_atom {
            trace!(
                name = %String::from_utf8_lossy(atom),
                depth = self.depth - 1,
                "list opened"
            );
            callback.begin_list(atom, self.depth - 1)
        } else {
            callback.atom(atom, self.depth)
        };
        self.first_atom = false;
        self.state = State::List;

        if flow.is_break() {
            return Ok(ControlFlow::Break(()));
        }
        if byte == b')' {
            return self.close_list(byte, callback);
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Inside a quoted atom, up to the unescaped closing `"`.
    fn on_quoted_atom<C: ParseCallback>(
        &mut self,
        byte: u8,
        index: usize,
        callback: &mut C,
    ) -> Result<ControlFlow<()>, ParseError> {
        match byte {
            b'\\' => {
                self.escaped_atom = true;
                self.state = State::EscapedChar;
                Ok(ControlFlow::Continue(()))
            }
            b'"' => {
                let input = self.input;
                let raw = &input[self.token_start..index];
                let flow = if self.escaped_atom {
                    unescape_into(raw, &mut self.scratch);
                    callback.atom(&self.scratch, self.depth)
                } else {
                    callback.atom(raw, self.depth)
                };
                self.escaped_atom = false;
                self.state = State::PostAtom;
                Ok(flow)
            }
            _ => Ok(ControlFlow::Continue(())),
        }
    }

    /// After a quoted atom: only whitespace or a close may follow.
    fn on_post_atom<C: ParseCallback>(
        &mut self,
        byte: u8,
        callback: &mut C,
    ) -> Result<ControlFlow<()>, ParseError> {
        match byte {
            b')' => self.close_list(byte, callback),
            _ if is_whitespace(byte) => {
                self.state = State::List;
                Ok(ControlFlow::Continue(()))
            }
            _ => Err(self.error(ParseErrorKind::InvalidCharacter, byte)),
        }
    }

    /// Process a `)`: the depth must not go negative, and every close lands
    /// back in the between-tokens state.
    fn close_list<C: ParseCallback>(
        &mut self,
        byte: u8,
        callback: &mut C,
    ) -> Result<ControlFlow<()>, ParseError> {
        if self.depth == 0 {
            return Err(self.error(ParseErrorKind::UnbalancedParen, byte));
        }
        self.depth -= 1;
        self.state = State::List;
        trace!(depth = self.depth, "list closed");
        Ok(callback.end_list(self.depth))
    }

    /// End-of-input checks: an open quoted atom is reported as such, then
    /// any still-open list, then an open bare atom.
    fn finish(&mut self) -> Result<ControlFlow<()>, ParseError> {
        if matches!(self.state, State::QuotedAtom | State::EscapedChar) {
            return Err(self.error(ParseErrorKind::UnterminatedQuotedAtom, 0));
        }
        if self.depth != 0 {
            return Err(self.error(ParseErrorKind::UnbalancedParen, 0));
        }
        if self.state == State::Atom {
            return Err(self.error(ParseErrorKind::UnterminatedAtom, 0));
        }
        Ok(ControlFlow::Continue(()))
    }

    fn error(&self, kind: ParseErrorKind, byte: u8) -> ParseError {
        ParseError {
            kind,
            position: self.pos,
            byte,
        }
    }
}
