//! Callback interface for receiving parse events.

use std::ops::ControlFlow;

use crate::event::{Event, ParseError};

/// Receives events from [`Parser::parse`].
///
/// Every method has a default no-op implementation, so an implementation
/// only handles the events it cares about. The structural methods return
/// [`ControlFlow::Break`] to stop the parse early; an early stop is
/// reported as success, not as an error.
///
/// [`Parser::parse`]: crate::Parser::parse
pub trait ParseCallback {
    /// A non-empty list opened. `name` is the head atom and `depth` the
    /// nesting level of the list itself (0 for a top-level list).
    fn begin_list(&mut self, name: &[u8], depth: u32) -> ControlFlow<()> {
        let _ = (name, depth);
        ControlFlow::Continue(())
    }

    /// A list closed, at the same `depth` its `begin_list` reported.
    /// An empty list `()` reports only this event.
    fn end_list(&mut self, depth: u32) -> ControlFlow<()> {
        let _ = depth;
        ControlFlow::Continue(())
    }

    /// An atom that is not a list head. The bytes are valid only for the
    /// duration of the call; copy them to keep them.
    fn atom(&mut self, atom: &[u8], depth: u32) -> ControlFlow<()> {
        let _ = (atom, depth);
        ControlFlow::Continue(())
    }

    /// The input was rejected. Fires at most once, immediately before
    /// [`Parser::parse`] returns the same error.
    ///
    /// [`Parser::parse`]: crate::Parser::parse
    fn error(&mut self, error: &ParseError) {
        let _ = error;
    }
}

/// Collects every event in owned form, never stopping early.
impl ParseCallback for Vec<Event> {
    fn begin_list(&mut self, name: &[u8], depth: u32) -> ControlFlow<()> {
        self.push(Event::BeginList {
            name: name.to_vec(),
            depth,
        });
        ControlFlow::Continue(())
    }

    fn end_list(&mut self, depth: u32) -> ControlFlow<()> {
        self.push(Event::EndList { depth });
        ControlFlow::Continue(())
    }

    fn atom(&mut self, atom: &[u8], depth: u32) -> ControlFlow<()> {
        self.push(Event::Atom {
            value: atom.to_vec(),
            depth,
        });
        ControlFlow::Continue(())
    }
}
