#![doc = include_str!("../README.md")]

pub use sexp_grammar::{Position, is_atom_char, is_whitespace};

mod callback;
pub use callback::ParseCallback;

mod event;
pub use event::{Event, ParseError, ParseErrorKind};

mod parser;
pub use parser::Parser;
