//! Incremental writer for s-expression documents.
//!
//! The writer emits text through a caller-supplied [`Sink`] as each call is
//! made, enforcing the same grammar the parser accepts: lists are named by
//! bare atoms, atoms only exist inside lists, and anything that cannot be a
//! bare atom is quoted and escaped. Output produced by a balanced sequence
//! of calls always re-parses.

mod sink;
pub use sink::{Sink, SinkError};

mod writer;
pub use writer::{SexpWriter, WriteError};
