//! Output sinks for the writer.

/// Failure reported by a [`Sink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("sink rejected output")]
pub struct SinkError;

/// Receives the writer's output bytes.
///
/// The writer calls this as it formats; a sink that fails poisons the
/// writer and is never called again.
pub trait Sink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SinkError>;
}

/// Collects output in memory; never fails.
impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        (**self).write(bytes)
    }
}
