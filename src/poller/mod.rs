//! Idle-aware readiness polling.
//!
//! The poller waits for an [`InputSource`] in bounded ticks, runs the idle
//! hook once per tick, reads once the source is ready, and classifies the
//! result into a [`PollOutcome`].
//!
//! The wait primitive is selected at compile time: `select(2)` on Unix,
//! `WaitForSingleObject` on Windows.

mod source;

#[cfg(unix)]
pub(crate) mod unix;

#[cfg(windows)]
pub(crate) mod windows;

#[cfg(unix)]
pub(crate) use unix as platform;

#[cfg(windows)]
pub(crate) use windows as platform;

pub use platform::RawInput;
pub use source::{FdSource, InputSource};

use crate::context::ReaderContext;
use crate::interrupt::SignalStatus;

use std::io;
use std::thread;

/// Outcome of a single poll-then-read cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// The read returned this many bytes (always non-zero).
    Ready(usize),

    /// An interrupt was recorded while waiting or reading.
    Interrupted,

    /// The source reached end of stream.
    Eof,

    /// The wait or the read failed for a reason other than an interrupt.
    Error(io::ErrorKind),
}

impl PollOutcome {
    /// Legacy numeric status of this outcome.
    ///
    /// `0` ready, `1` interrupted, `-1` end of stream, `-2` error.
    pub fn code(self) -> i32 {
        match self {
            PollOutcome::Ready(_) => 0,
            PollOutcome::Interrupted => 1,
            PollOutcome::Eof => -1,
            PollOutcome::Error(_) => -2,
        }
    }

    /// Returns `true` for [`PollOutcome::Ready`].
    pub fn is_ready(self) -> bool {
        matches!(self, PollOutcome::Ready(_))
    }
}

/// Drives the tick loop for one read.
pub(crate) struct Poller<'c> {
    ctx: &'c ReaderContext,
}

impl<'c> Poller<'c> {
    pub(crate) fn new(ctx: &'c ReaderContext) -> Self {
        Self { ctx }
    }

    /// Waits until `source` is readable, then reads into `window`.
    ///
    /// Transient interruptions with no recorded interrupt are retried from
    /// a fresh tick and never reach the caller.
    pub(crate) fn fill<S>(&self, source: &mut S, window: &mut [u8]) -> PollOutcome
    where
        S: InputSource + ?Sized,
    {
        debug_assert!(!window.is_empty(), "read window must not be empty");

        loop {
            let err = match self.wait(source) {
                Ok(()) => match source.read_into(window) {
                    Ok(0) => return PollOutcome::Eof,
                    Ok(n) => return PollOutcome::Ready(n),
                    Err(e) => e,
                },
                Err(e) => e,
            };

            match self.classify(&err) {
                Some(outcome) => {
                    tracing::debug!(error = %err, ?outcome, "poll cycle failed");
                    return outcome;
                }
                None => {
                    tracing::debug!(error = %err, "transient interruption, retrying");
                }
            }
        }
    }

    /// Runs ticks until the source reports readiness or the wait fails.
    fn wait<S>(&self, source: &mut S) -> io::Result<()>
    where
        S: InputSource + ?Sized,
    {
        loop {
            self.ctx.run_idle_hook();
            if source.wait_readable(self.ctx.tick)? {
                return Ok(());
            }
            tracing::trace!("tick elapsed without input");
        }
    }

    /// Maps a failed wait or read to an outcome.
    ///
    /// Returns `None` when the failure was a transient interruption that
    /// should be retried.
    fn classify(&self, err: &io::Error) -> Option<PollOutcome> {
        if platform::is_operation_aborted(err) {
            // The console handler runs on its own thread; give it a moment
            // to record the interrupt before looking.
            thread::sleep(self.ctx.settle_delay);
            if self.ctx.interrupted() {
                return Some(PollOutcome::Interrupted);
            }
            tracing::warn!("read aborted but no interrupt was recorded");
        }

        if err.kind() == io::ErrorKind::Interrupted {
            if self.ctx.check_signals() == SignalStatus::Abort {
                return Some(PollOutcome::Interrupted);
            }
            if self.ctx.interrupted() {
                return Some(PollOutcome::Interrupted);
            }
            return None;
        }

        if self.ctx.interrupted() {
            return Some(PollOutcome::Interrupted);
        }

        Some(PollOutcome::Error(err.kind()))
    }
}
