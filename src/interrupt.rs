//! Interrupt observation and signal-check hooks.
//!
//! The line reader never records interrupts itself. It queries an
//! [`InterruptObserver`] at two checkpoints and, after a transient
//! `EINTR`, gives the host a chance to dispatch its own signal handlers
//! through a [`SignalCheck`], optionally holding a [`HostLock`] for the
//! duration of that check.
//!
//! [`InterruptFlag`] is a ready-made observer that can be raised from a
//! Ctrl-C handler installed with [`InterruptFlag::register_ctrl_c`].

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Answers whether an asynchronous interrupt has been recorded.
///
/// Implementations must be side-effect free: the reader may query the
/// observer several times for a single interruption.
pub trait InterruptObserver: Send + Sync {
    /// Returns `true` if an interrupt has been recorded.
    fn interrupted(&self) -> bool;
}

impl<F> InterruptObserver for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn interrupted(&self) -> bool {
        self()
    }
}

/// Result of a host signal check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalStatus {
    /// No pending signal asked for the read to stop.
    Continue,

    /// A signal handler asked for the current read to be abandoned.
    Abort,
}

/// Host step run after a transient `EINTR`.
///
/// This is where the surrounding runtime dispatches its own pending
/// signal handlers.
pub trait SignalCheck: Send + Sync {
    /// Runs pending signal handlers and reports whether to abort.
    fn check_signals(&self) -> SignalStatus;
}

impl<F> SignalCheck for F
where
    F: Fn() -> SignalStatus + Send + Sync,
{
    fn check_signals(&self) -> SignalStatus {
        self()
    }
}

/// A host-wide lock that must be held while signal handlers run.
///
/// The reader runs with the lock released. It acquires the lock right
/// before the [`SignalCheck`] and releases it right after.
pub trait HostLock: Send + Sync {
    /// Acquires the host lock, blocking until it is available.
    fn acquire(&self);

    /// Releases the host lock.
    fn release(&self);
}

/// Holds a [`HostLock`] until dropped.
pub(crate) struct HostLockGuard<'a> {
    lock: &'a dyn HostLock,
}

impl<'a> HostLockGuard<'a> {
    pub(crate) fn acquire(lock: &'a dyn HostLock) -> Self {
        lock.acquire();
        Self { lock }
    }
}

impl Drop for HostLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.release();
    }
}

/// A shareable interrupt flag.
///
/// Clones share the same underlying flag. The reader only ever reads it;
/// raising and clearing belong to the code that owns the interrupt
/// policy (a signal handler, a test, another thread).
#[derive(Debug, Clone, Default)]
pub struct InterruptFlag {
    raised: Arc<AtomicBool>,
}

impl InterruptFlag {
    /// Creates a flag in the cleared state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an interrupt.
    pub fn raise(&self) {
        self.raised.store(true, Ordering::SeqCst);
    }

    /// Clears any recorded interrupt.
    pub fn clear(&self) {
        self.raised.store(false, Ordering::SeqCst);
    }

    /// Returns whether an interrupt is recorded, clearing it.
    pub fn take(&self) -> bool {
        self.raised.swap(false, Ordering::SeqCst)
    }

    /// Returns whether an interrupt is recorded.
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::SeqCst)
    }

    /// Raises this flag whenever the user presses Ctrl-C.
    ///
    /// On Unix this installs a `SIGINT` handler. On Windows it installs a
    /// console control handler for Ctrl-C and Ctrl-Break; only one flag
    /// per process can be registered there.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the handler cannot be installed, or
    /// [`io::ErrorKind::AlreadyExists`] on Windows when a different flag
    /// is already registered.
    pub fn register_ctrl_c(&self) -> io::Result<()> {
        ctrl_c::register(Arc::clone(&self.raised))
    }
}

impl InterruptObserver for InterruptFlag {
    fn interrupted(&self) -> bool {
        self.is_raised()
    }
}

#[cfg(unix)]
mod ctrl_c {
    use std::io;
    use std::sync::Arc;
    use std::sync::atomic::AtomicBool;

    pub(super) fn register(flag: Arc<AtomicBool>) -> io::Result<()> {
        signal_hook::flag::register(signal_hook::consts::SIGINT, flag)?;
        tracing::debug!("SIGINT handler installed");
        Ok(())
    }
}

#[cfg(windows)]
mod ctrl_c {
    use std::io;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, OnceLock};

    use windows_sys::Win32::System::Console::{
        CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler,
    };
    use windows_sys::core::BOOL;

    static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

    unsafe extern "system" fn handler(ctrl_type: u32) -> BOOL {
        match ctrl_type {
            CTRL_C_EVENT | CTRL_BREAK_EVENT => {
                if let Some(flag) = FLAG.get() {
                    flag.store(true, Ordering::SeqCst);
                }
                1
            }
            _ => 0,
        }
    }

    pub(super) fn register(flag: Arc<AtomicBool>) -> io::Result<()> {
        let installed = FLAG.get_or_init(|| Arc::clone(&flag));
        if !Arc::ptr_eq(installed, &flag) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                "a Ctrl-C flag is already registered",
            ));
        }

        if unsafe { SetConsoleCtrlHandler(Some(handler), 1) } == 0 {
            return Err(io::Error::last_os_error());
        }

        tracing::debug!("console control handler installed");
        Ok(())
    }
}
