use std::collections::TryReserveError;

/// Reasons a [`LineReader`](crate::LineReader) call produced no line.
///
/// End of stream and I/O errors are not listed here: they degrade to an
/// empty or truncated [`Line`](crate::Line) whose
/// [`termination`](crate::Line::termination) records what happened.
#[derive(Debug, thiserror::Error)]
pub enum ReadLineError {
    /// An interrupt was recorded before the first chunk arrived.
    #[error("line input cancelled by interrupt")]
    Cancelled,

    /// The line buffer could not be allocated or grown.
    #[error("failed to allocate line buffer: {0}")]
    Allocation(#[from] TryReserveError),
}

impl ReadLineError {
    /// Returns `true` if the read was cancelled by an interrupt.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, ReadLineError::Cancelled)
    }
}
