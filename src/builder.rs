use crate::context::{IdleHook, ReaderContext};
use crate::interrupt::{HostLock, InterruptFlag, InterruptObserver, SignalCheck};
use crate::reader::{LineReader, SOFT_CHUNK_LIMIT};

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

/// Default upper bound of a single wait.
pub const DEFAULT_TICK: Duration = Duration::from_millis(100);

/// Default sleep before looking for an interrupt after an aborted read.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(1);

/// Default capacity of a fresh line buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 100;

/// Builder for configuring and creating a [`LineReader`].
///
/// Every collaborator is optional. Without configuration the reader
/// waits in 100 ms ticks, runs no idle hook, never observes an interrupt
/// and writes prompts to standard error.
///
/// # Examples
///
/// ```rust,ignore
/// let flag = InterruptFlag::new();
/// flag.register_ctrl_c()?;
///
/// let mut reader = LineReader::builder()
///     .idle_hook(|| redraw_plots())
///     .interrupt_observer(flag)
///     .build();
/// ```
pub struct ReaderBuilder {
    idle_hook: Option<IdleHook>,
    interrupt: Arc<dyn InterruptObserver>,
    signal_check: Option<Arc<dyn SignalCheck>>,
    host_lock: Option<Arc<dyn HostLock>>,
    tick: Duration,
    settle_delay: Duration,
    initial_capacity: usize,
    soft_limit: usize,
    prompt_writer: Box<dyn Write + Send>,
}

impl ReaderBuilder {
    /// Creates a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            idle_hook: None,
            interrupt: Arc::new(InterruptFlag::new()),
            signal_check: None,
            host_lock: None,
            tick: DEFAULT_TICK,
            settle_delay: DEFAULT_SETTLE_DELAY,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            soft_limit: SOFT_CHUNK_LIMIT,
            prompt_writer: Box::new(io::stderr()),
        }
    }

    /// Sets the hook run once per tick while waiting for input.
    pub fn idle_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.idle_hook = Some(Arc::new(hook));
        self
    }

    /// Sets the observer queried for recorded interrupts.
    pub fn interrupt_observer<O>(mut self, observer: O) -> Self
    where
        O: InterruptObserver + 'static,
    {
        self.interrupt = Arc::new(observer);
        self
    }

    /// Sets the host step run after a transient interruption.
    pub fn signal_check<C>(mut self, check: C) -> Self
    where
        C: SignalCheck + 'static,
    {
        self.signal_check = Some(Arc::new(check));
        self
    }

    /// Sets the lock held while the signal check runs.
    pub fn host_lock<L>(mut self, lock: L) -> Self
    where
        L: HostLock + 'static,
    {
        self.host_lock = Some(Arc::new(lock));
        self
    }

    /// Sets the upper bound of a single wait.
    ///
    /// # Panics
    ///
    /// Panics if `tick` is zero.
    pub fn tick(mut self, tick: Duration) -> Self {
        assert!(!tick.is_zero(), "tick must be > 0");

        self.tick = tick;
        self
    }

    /// Sets the sleep used after an aborted console read.
    pub fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Sets the capacity of a fresh line buffer.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`: one byte is reserved for the terminator.
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity >= 2, "initial_capacity must be >= 2");

        self.initial_capacity = capacity;
        self
    }

    /// Sets the growth increment above which a line is reported as too
    /// long.
    ///
    /// Crossing the limit logs a warning and marks the line as
    /// [`overflowed`](crate::Line::overflowed); the read still continues.
    pub fn soft_chunk_limit(mut self, limit: usize) -> Self {
        self.soft_limit = limit;
        self
    }

    /// Sets the stream prompts are written to.
    pub fn prompt_writer<W>(mut self, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        self.prompt_writer = Box::new(writer);
        self
    }

    /// Builds the reader with the configured options.
    pub fn build(self) -> LineReader {
        let ctx = ReaderContext {
            idle_hook: self.idle_hook,
            interrupt: self.interrupt,
            signal_check: self.signal_check,
            host_lock: self.host_lock,
            tick: self.tick,
            settle_delay: self.settle_delay,
            initial_capacity: self.initial_capacity,
            soft_limit: self.soft_limit,
        };

        LineReader::new(ctx, self.prompt_writer)
    }
}

impl Default for ReaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ReaderBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaderBuilder")
            .field("tick", &self.tick)
            .field("settle_delay", &self.settle_delay)
            .field("initial_capacity", &self.initial_capacity)
            .field("soft_limit", &self.soft_limit)
            .finish_non_exhaustive()
    }
}
