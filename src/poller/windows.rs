//! Windows platform layer.
//!
//! This module provides the handle-based counterpart of the Unix layer
//! and exposes identical function names and semantics where possible.
//!
//! The wait primitive is `WaitForSingleObject`. A console input handle is
//! signalled for every queued input record, including mouse, focus and
//! key-up events, so console handles additionally check that a keystroke
//! is actually pending before reporting readiness.

use std::io;
use std::mem;
use std::os::windows::io::{AsRawHandle, BorrowedHandle};
use std::ptr;
use std::time::Duration;

use windows_sys::Win32::Foundation::{
    ERROR_BROKEN_PIPE, ERROR_OPERATION_ABORTED, GetLastError, HANDLE, SetLastError, WAIT_FAILED,
    WAIT_OBJECT_0,
};
use windows_sys::Win32::Storage::FileSystem::ReadFile;
use windows_sys::Win32::System::Console::{
    FlushConsoleInputBuffer, GetConsoleMode, GetNumberOfConsoleInputEvents, GetStdHandle,
    INPUT_RECORD, KEY_EVENT, PeekConsoleInputW, STD_INPUT_HANDLE,
};
use windows_sys::Win32::System::Threading::WaitForSingleObject;

/// Borrowed OS input object on this platform.
pub type RawInput<'a> = BorrowedHandle<'a>;

/// Number of console input records inspected per peek.
const PEEK_BATCH: usize = 64;

#[inline]
fn raw(input: RawInput<'_>) -> HANDLE {
    input.as_raw_handle() as HANDLE
}

/// Returns the process's standard input handle.
pub(crate) fn sys_stdin() -> RawInput<'static> {
    // SAFETY: the standard input handle is owned by the process and is
    // never closed by this crate.
    unsafe { BorrowedHandle::borrow_raw(GetStdHandle(STD_INPUT_HANDLE) as _) }
}

/// Returns `true` if the handle refers to a console input buffer.
pub(crate) fn sys_is_console(input: RawInput<'_>) -> bool {
    let mut mode = 0;
    unsafe { GetConsoleMode(raw(input), &mut mode) != 0 }
}

/// Waits at most `timeout` for the handle to be signalled.
///
/// Returns `Ok(true)` when signalled, `Ok(false)` on timeout.
pub(crate) fn sys_wait_readable(input: RawInput<'_>, timeout: Duration) -> io::Result<bool> {
    let millis = timeout.as_millis().min(u128::from(u32::MAX - 1)) as u32;
    let rc = unsafe { WaitForSingleObject(raw(input), millis) };

    if rc == WAIT_OBJECT_0 {
        Ok(true)
    } else if rc == WAIT_FAILED {
        Err(io::Error::last_os_error())
    } else {
        Ok(false)
    }
}

/// Returns `true` if a keystroke carrying a character is queued.
///
/// Mirrors the CRT's `_kbhit`: only key-down records with a character
/// count; modifier presses, key releases and mouse events do not.
pub(crate) fn sys_key_pending(input: RawInput<'_>) -> io::Result<bool> {
    let handle = raw(input);

    let mut queued = 0u32;
    if unsafe { GetNumberOfConsoleInputEvents(handle, &mut queued) } == 0 {
        return Err(io::Error::last_os_error());
    }
    if queued == 0 {
        return Ok(false);
    }

    let mut records: [INPUT_RECORD; PEEK_BATCH] = unsafe { mem::zeroed() };
    let mut peeked = 0u32;
    let ok = unsafe {
        PeekConsoleInputW(
            handle,
            records.as_mut_ptr(),
            records.len() as u32,
            &mut peeked,
        )
    };
    if ok == 0 {
        return Err(io::Error::last_os_error());
    }

    let found = records[..peeked as usize].iter().any(|record| {
        if u32::from(record.EventType) != KEY_EVENT {
            return false;
        }
        let key = unsafe { record.Event.KeyEvent };
        key.bKeyDown != 0 && unsafe { key.uChar.UnicodeChar } != 0
    });

    Ok(found)
}

/// Discards every record queued in the console input buffer.
pub(crate) fn sys_flush_console(input: RawInput<'_>) {
    if unsafe { FlushConsoleInputBuffer(raw(input)) } == 0 {
        tracing::debug!(
            error = %io::Error::last_os_error(),
            "failed to flush console input"
        );
    }
}

/// Reads from a handle into the given buffer.
///
/// Returns the number of bytes read; `0` means end of file. A broken pipe
/// is reported as end of file. A console read cut short by Ctrl-C
/// returns the `ERROR_OPERATION_ABORTED` error even when `ReadFile`
/// itself reports success with zero bytes.
pub(crate) fn sys_read(input: RawInput<'_>, buffer: &mut [u8]) -> io::Result<usize> {
    let len = buffer.len().min(u32::MAX as usize) as u32;
    let mut read = 0u32;

    unsafe { SetLastError(0) };
    let ok = unsafe {
        ReadFile(
            raw(input),
            buffer.as_mut_ptr(),
            len,
            &mut read,
            ptr::null_mut(),
        )
    };

    let last = unsafe { GetLastError() };

    if ok == 0 {
        if last == ERROR_BROKEN_PIPE {
            return Ok(0);
        }
        return Err(io::Error::from_raw_os_error(last as i32));
    }

    if read == 0 && last == ERROR_OPERATION_ABORTED {
        return Err(io::Error::from_raw_os_error(last as i32));
    }

    Ok(read as usize)
}

/// Whether `err` reports an operation aborted by the console.
pub(crate) fn is_operation_aborted(err: &io::Error) -> bool {
    err.raw_os_error() == Some(ERROR_OPERATION_ABORTED as i32)
}
