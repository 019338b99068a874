use crate::interrupt::{HostLock, HostLockGuard, InterruptObserver, SignalCheck, SignalStatus};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Callback run once per tick while the reader waits for input.
pub type IdleHook = Arc<dyn Fn() + Send + Sync>;

/// Collaborators and timings shared by every read of a
/// [`LineReader`](crate::LineReader).
///
/// Built once by [`ReaderBuilder`](crate::ReaderBuilder) and read-only
/// afterwards.
pub(crate) struct ReaderContext {
    /// Hook run at the start of every tick.
    pub(crate) idle_hook: Option<IdleHook>,

    /// Source of truth for recorded interrupts.
    pub(crate) interrupt: Arc<dyn InterruptObserver>,

    /// Host step run after a transient interruption.
    pub(crate) signal_check: Option<Arc<dyn SignalCheck>>,

    /// Lock held around `signal_check`.
    pub(crate) host_lock: Option<Arc<dyn HostLock>>,

    /// Upper bound of a single wait.
    pub(crate) tick: Duration,

    /// Sleep before looking for an interrupt after an aborted read.
    pub(crate) settle_delay: Duration,

    /// Capacity of a fresh line buffer.
    pub(crate) initial_capacity: usize,

    /// Growth increment above which a line is reported as too long.
    pub(crate) soft_limit: usize,
}

impl ReaderContext {
    pub(crate) fn run_idle_hook(&self) {
        if let Some(hook) = &self.idle_hook {
            hook();
        }
    }

    pub(crate) fn interrupted(&self) -> bool {
        self.interrupt.interrupted()
    }

    /// Runs the host signal check with the host lock held.
    pub(crate) fn check_signals(&self) -> SignalStatus {
        let Some(check) = &self.signal_check else {
            return SignalStatus::Continue;
        };

        let _guard = self.host_lock.as_deref().map(HostLockGuard::acquire);
        check.check_signals()
    }
}

impl fmt::Debug for ReaderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReaderContext")
            .field("idle_hook", &self.idle_hook.is_some())
            .field("signal_check", &self.signal_check.is_some())
            .field("host_lock", &self.host_lock.is_some())
            .field("tick", &self.tick)
            .field("settle_delay", &self.settle_delay)
            .field("initial_capacity", &self.initial_capacity)
            .field("soft_limit", &self.soft_limit)
            .finish_non_exhaustive()
    }
}
