//! Line assembly on top of the poller.
//!
//! A [`LineReader`] reads one line per call. Every physical read is gated
//! by the poller, so the idle hook keeps running for as long as the user
//! takes to type. A line that does not fit the buffer grows it and polls
//! again until a newline or a terminal condition is reached.

mod buffer;
mod line;

pub use buffer::ReadBuffer;
pub use line::{Line, Termination};

use crate::builder::ReaderBuilder;
use crate::context::ReaderContext;
use crate::error::ReadLineError;
use crate::poller::{FdSource, InputSource, PollOutcome, Poller};

use std::io::{self, Write};

/// Default soft upper bound of a single read window.
///
/// Crossing it is reported but does not stop the read. Override with
/// [`ReaderBuilder::soft_chunk_limit`].
pub const SOFT_CHUNK_LIMIT: usize = i32::MAX as usize;

/// An idle-aware, interruptible line reader.
///
/// Created through [`LineReader::builder`]. Each call to
/// [`read_line`](Self::read_line) owns a fresh buffer. The only state kept
/// between calls is the standard input source used by
/// [`read_stdin_line`](Self::read_stdin_line), whose read-ahead must
/// outlive a single line.
pub struct LineReader {
    ctx: ReaderContext,
    prompt_writer: Box<dyn Write + Send>,
    stdin: Option<FdSource<'static>>,
}

impl LineReader {
    pub(crate) fn new(ctx: ReaderContext, prompt_writer: Box<dyn Write + Send>) -> Self {
        Self {
            ctx,
            prompt_writer,
            stdin: None,
        }
    }

    /// Returns a builder for configuring a reader.
    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::new()
    }

    /// Reads one line from `input`.
    ///
    /// `output` is flushed first, then `prompt`, if any, is written to the
    /// prompt writer. The returned line includes its trailing newline when
    /// one was read. End of stream and read errors are not reported as
    /// errors: they yield an empty or truncated line whose
    /// [`termination`](Line::termination) says what happened.
    ///
    /// # Errors
    ///
    /// - [`ReadLineError::Cancelled`] if an interrupt was recorded before
    ///   any byte arrived. No partial state is kept.
    /// - [`ReadLineError::Allocation`] if the buffer could not be
    ///   allocated or grown. Bytes read so far are discarded.
    pub fn read_line<S, W>(
        &mut self,
        input: &mut S,
        output: &mut W,
        prompt: Option<&str>,
    ) -> Result<Line, ReadLineError>
    where
        S: InputSource + ?Sized,
        W: Write + ?Sized,
    {
        let mut buffer = ReadBuffer::with_capacity(self.ctx.initial_capacity)?;

        self.show_prompt(output, prompt);

        let poller = Poller::new(&self.ctx);

        let mut termination = match buffer.fill_with(|window| poller.fill(input, window)) {
            PollOutcome::Ready(_) => Termination::Newline,
            PollOutcome::Interrupted => {
                tracing::debug!("line input cancelled");
                return Err(ReadLineError::Cancelled);
            }
            PollOutcome::Eof => Termination::Eof,
            PollOutcome::Error(kind) => Termination::Error(kind),
        };

        let mut overflowed = false;

        while buffer.used_len() > 0 && !buffer.ends_with_newline() {
            let incr = buffer.grow()?;
            if incr > self.ctx.soft_limit {
                tracing::warn!(incr, limit = self.ctx.soft_limit, "input line too long");
                overflowed = true;
            }

            match buffer.fill_with(|window| poller.fill(input, window)) {
                PollOutcome::Ready(_) => {}
                PollOutcome::Interrupted => {
                    termination = Termination::Interrupted;
                    break;
                }
                PollOutcome::Eof => {
                    termination = Termination::Eof;
                    break;
                }
                PollOutcome::Error(kind) => {
                    termination = Termination::Error(kind);
                    break;
                }
            }
        }

        tracing::debug!(len = buffer.used_len(), ?termination, "line read");

        Ok(buffer.into_line(termination, overflowed))
    }

    /// Reads one line from the process's standard input.
    ///
    /// Standard output is flushed before the prompt is shown. The
    /// standard input source is created on first use and kept by the
    /// reader, so bytes read past a newline are served by the next call.
    ///
    /// # Errors
    ///
    /// Same as [`read_line`](Self::read_line).
    pub fn read_stdin_line(&mut self, prompt: Option<&str>) -> Result<Line, ReadLineError> {
        let mut input = self.stdin.take().unwrap_or_else(FdSource::stdin);
        let mut output = io::stdout();

        let result = self.read_line(&mut input, &mut output, prompt);
        self.stdin = Some(input);

        result
    }

    fn show_prompt<W>(&mut self, output: &mut W, prompt: Option<&str>)
    where
        W: Write + ?Sized,
    {
        if let Err(e) = output.flush() {
            tracing::debug!(error = %e, "failed to flush output before prompt");
        }

        if let Some(prompt) = prompt {
            if let Err(e) = self.prompt_writer.write_all(prompt.as_bytes()) {
                tracing::debug!(error = %e, "failed to write prompt");
            }
        }

        if let Err(e) = self.prompt_writer.flush() {
            tracing::debug!(error = %e, "failed to flush prompt");
        }
    }
}

impl std::fmt::Debug for LineReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineReader")
            .field("ctx", &self.ctx)
            .field("stdin", &self.stdin)
            .finish_non_exhaustive()
    }
}
