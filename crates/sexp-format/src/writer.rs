//! Low-level s-expression output writer.

use sexp_grammar::{escape_quoted, is_atom};

use crate::sink::Sink;

/// Writer-side failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WriteError {
    /// A list name that is not a bare atom.
    #[error("invalid list name")]
    InvalidListName,
    /// An atom write or a close at depth 0.
    #[error("write outside of any list")]
    OutsideList,
    /// The output sink rejected a write.
    #[error("sink rejected output")]
    Sink,
}

/// Incremental s-expression writer over a [`Sink`].
///
/// Calls must come in grammar order: a list is started before its atoms and
/// closed once after them. Errors are sticky — the first failure is stored
/// and every later operation returns it again without touching the sink —
/// so each call's result must be checked rather than a final status.
///
/// Nested lists are indented with one tab per level:
///
/// ```rust
/// use sexp_format::SexpWriter;
///
/// let mut writer = SexpWriter::new(Vec::new());
/// writer.start_list(b"config")?;
/// writer.write_list(b"port", [b"8080"])?;
/// writer.end_list()?;
/// assert_eq!(writer.into_inner(), b"(config\n\t(port 8080))");
/// # Ok::<(), sexp_format::WriteError>(())
/// ```
pub struct SexpWriter<S: Sink> {
    sink: S,
    depth: u32,
    error: Option<WriteError>,
}

impl<S: Sink> SexpWriter<S> {
    /// Create a writer emitting to `sink`, outside any list.
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            depth: 0,
            error: None,
        }
    }

    /// Current nesting depth.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// The sticky error, if any operation has failed.
    pub fn last_error(&self) -> Option<WriteError> {
        self.error
    }

    /// Consume the writer and return the sink.
    ///
    /// Lists the caller never closed leave truncated output; the writer
    /// does not auto-close them.
    pub fn into_inner(self) -> S {
        self.sink
    }

    /// Open a list named by the bare atom `name`.
    ///
    /// Nested lists start on a new line, indented one tab per level of the
    /// enclosing list. Fails with [`WriteError::InvalidListName`], before
    /// emitting anything, unless `name` is a bare atom.
    pub fn start_list(&mut self, name: &[u8]) -> Result<(), WriteError> {
        self.check()?;
        if !is_atom(name) {
            return self.fail(WriteError::InvalidListName);
        }
        if self.depth > 0 {
            self.emit(b"\n")?;
            for _ in 0..self.depth {
                self.emit(b"\t")?;
            }
        }
        self.emit(b"(")?;
        self.emit(name)?;
        self.depth += 1;
        Ok(())
    }

    /// Write one atom into the current list.
    ///
    /// Bare atoms are written verbatim after a separating space; anything
    /// else is handed to [`write_quoted_atom`]. Fails with
    /// [`WriteError::OutsideList`] at depth 0.
    ///
    /// [`write_quoted_atom`]: Self::write_quoted_atom
    pub fn write_atom(&mut self, atom: &[u8]) -> Result<(), WriteError> {
        if !is_atom(atom) {
            return self.write_quoted_atom(atom);
        }
        self.check()?;
        if self.depth == 0 {
            return self.fail(WriteError::OutsideList);
        }
        self.emit(b" ")?;
        self.emit(atom)
    }

    /// Write one atom in quoted form, escaping `"` and `\`.
    pub fn write_quoted_atom(&mut self, atom: &[u8]) -> Result<(), WriteError> {
        self.check()?;
        if self.depth == 0 {
            return self.fail(WriteError::OutsideList);
        }
        self.emit(b" \"")?;
        self.emit(&escape_quoted(atom))?;
        self.emit(b"\"")
    }

    /// Close the innermost open list.
    pub fn end_list(&mut self) -> Result<(), WriteError> {
        self.check()?;
        if self.depth == 0 {
            return self.fail(WriteError::OutsideList);
        }
        self.emit(b")")?;
        self.depth -= 1;
        Ok(())
    }

    /// Write a whole list: `name`, its atoms in order, and the close.
    /// Stops at the first failing step.
    pub fn write_list<I>(&mut self, name: &[u8], atoms: I) -> Result<(), WriteError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        self.start_list(name)?;
        for atom in atoms {
            self.write_atom(atom.as_ref())?;
        }
        self.end_list()
    }

    fn check(&self) -> Result<(), WriteError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn fail(&mut self, error: WriteError) -> Result<(), WriteError> {
        self.error = Some(error);
        Err(error)
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        if self.sink.write(bytes).is_err() {
            return self.fail(WriteError::Sink);
        }
        Ok(())
    }
}
