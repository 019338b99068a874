//! Unix platform layer.
//!
//! Thin wrappers over `select(2)` and `read(2)` used by the poller and
//! by [`FdSource`](crate::poller::FdSource). The descriptor-based wait
//! primitive is the one used on every Unix target.

use libc::{
    FD_SET, FD_SETSIZE, FD_ZERO, STDIN_FILENO, fd_set, read, select, suseconds_t, time_t, timeval,
};
use std::io;
use std::os::fd::{BorrowedFd, RawFd};
use std::ptr;
use std::time::Duration;

/// Borrowed OS input object on this platform.
pub type RawInput<'a> = BorrowedFd<'a>;

/// Returns the process's standard input descriptor.
pub(crate) fn sys_stdin() -> RawInput<'static> {
    // SAFETY: descriptor 0 stays open for the lifetime of the process.
    unsafe { BorrowedFd::borrow_raw(STDIN_FILENO) }
}

/// Waits at most `timeout` for `fd` to become readable.
///
/// Returns `Ok(true)` when the descriptor is ready, `Ok(false)` when the
/// timeout elapsed. An `EINTR` surfaces as an error of kind
/// [`io::ErrorKind::Interrupted`].
pub(crate) fn sys_wait_readable(fd: RawFd, timeout: Duration) -> io::Result<bool> {
    if fd < 0 || fd as usize >= FD_SETSIZE as usize {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "descriptor out of range for select",
        ));
    }

    let mut set: fd_set = unsafe { std::mem::zeroed() };
    unsafe {
        FD_ZERO(&mut set);
        FD_SET(fd, &mut set);
    }

    // select(2) may rewrite the timeout, so it is rebuilt on every call.
    let mut tv = timeval {
        tv_sec: timeout.as_secs() as time_t,
        tv_usec: timeout.subsec_micros() as suseconds_t,
    };

    let rc = unsafe {
        select(
            fd + 1,
            &mut set,
            ptr::null_mut(),
            ptr::null_mut(),
            &mut tv,
        )
    };

    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rc > 0)
    }
}

/// Reads from a descriptor into the given buffer.
///
/// Returns the number of bytes read; `0` means end of file.
pub(crate) fn sys_read(fd: RawFd, buffer: &mut [u8]) -> io::Result<usize> {
    let rc = unsafe { read(fd, buffer.as_mut_ptr().cast(), buffer.len()) };
    if rc < 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(rc as usize)
    }
}

/// Whether `err` reports an operation aborted by the console.
///
/// Only the handle-based platform produces this condition.
pub(crate) fn is_operation_aborted(_err: &io::Error) -> bool {
    false
}
