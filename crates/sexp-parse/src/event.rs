//! Event and error types for the event-based parser.

use sexp_grammar::Position;

/// Structural events reported by the parser, in owned form.
///
/// The parser itself hands callbacks borrowed atom bytes; this type is the
/// owned equivalent, used when collecting a whole parse into a `Vec`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A non-empty list opened; `name` is its head atom.
    ///
    /// `depth` is the nesting level of the list itself, 0 for a top-level
    /// list. An empty list `()` produces no `BeginList` at all.
    BeginList { name: Vec<u8>, depth: u32 },
    /// A list closed, at the same depth its `BeginList` reported.
    EndList { depth: u32 },
    /// An atom other than a list head.
    Atom { value: Vec<u8>, depth: u32 },
}

/// Parse error kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// An unmatched `)`, or the input ended inside an open list.
    #[error("unbalanced parenthesis")]
    UnbalancedParen,
    /// A byte the grammar does not allow in the current state.
    #[error("invalid character")]
    InvalidCharacter,
    /// The input ended inside a bare atom.
    #[error("unterminated atom")]
    UnterminatedAtom,
    /// The input ended inside a quoted atom.
    #[error("unterminated quoted atom")]
    UnterminatedQuotedAtom,
}

/// The first syntax error found in the input.
///
/// `position` is the position just past the offending byte (the parser
/// advances its position tracker before inspecting each byte), and `byte`
/// is the offending byte itself, or 0 when the input ended early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at {position}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: Position,
    pub byte: u8,
}
