use super::platform::{self, RawInput};

use std::io;
use std::time::Duration;

/// Size of a single physical read performed by [`FdSource`].
const READ_AHEAD: usize = 4096;

/// A stream the poller can wait on and read lines from.
///
/// Implementations provide the two halves of a poll cycle: a bounded wait
/// for readiness and the read that follows it. The read uses stdio line
/// semantics so that the line reader never receives bytes belonging to
/// the next line.
pub trait InputSource {
    /// Waits at most `timeout` for the source to become readable.
    ///
    /// Returns `Ok(true)` when a read is expected not to block and
    /// `Ok(false)` when the timeout elapsed. A wait cut short by a signal
    /// is reported as an error of kind [`io::ErrorKind::Interrupted`].
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Reads bytes into `buf`, stopping after the first newline.
    ///
    /// At most `buf.len()` bytes are written. `Ok(0)` means end of stream.
    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

impl<S: InputSource + ?Sized> InputSource for &mut S {
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).wait_readable(timeout)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        (**self).read_into(buf)
    }
}

/// An [`InputSource`] over a borrowed OS descriptor or handle.
///
/// `FdSource` waits with the platform primitive (`select(2)` on Unix,
/// `WaitForSingleObject` on Windows) and reads with the raw system call.
///
/// A physical read may return more than one line. The surplus is kept in
/// an internal read-ahead buffer and served by later calls; while that
/// buffer is non-empty the source reports readiness without touching the
/// OS wait primitive.
pub struct FdSource<'a> {
    /// The borrowed descriptor or handle.
    input: RawInput<'a>,

    /// Bytes read from the OS but not yet handed out.
    pending: Vec<u8>,

    /// Offset of the first unread byte in `pending`.
    start: usize,

    /// Whether readiness must be confirmed by a pending keystroke.
    #[cfg(windows)]
    console: bool,
}

impl<'a> FdSource<'a> {
    /// Creates a source reading from `input`.
    pub fn new(input: RawInput<'a>) -> Self {
        Self {
            input,
            pending: Vec::new(),
            start: 0,
            #[cfg(windows)]
            console: platform::sys_is_console(input),
        }
    }

    /// Number of read-ahead bytes waiting to be handed out.
    pub fn buffered(&self) -> usize {
        self.pending.len() - self.start
    }

    fn refill(&mut self) -> io::Result<usize> {
        self.pending.clear();
        self.start = 0;
        self.pending.resize(READ_AHEAD, 0);

        let result = self.sys_read();
        let n = *result.as_ref().unwrap_or(&0);
        self.pending.truncate(n);

        result
    }

    #[cfg(unix)]
    fn sys_read(&mut self) -> io::Result<usize> {
        use std::os::fd::AsRawFd;
        platform::sys_read(self.input.as_raw_fd(), &mut self.pending)
    }

    #[cfg(windows)]
    fn sys_read(&mut self) -> io::Result<usize> {
        platform::sys_read(self.input, &mut self.pending)
    }
}

impl FdSource<'static> {
    /// Creates a source reading from the process's standard input.
    pub fn stdin() -> Self {
        Self::new(platform::sys_stdin())
    }
}

impl InputSource for FdSource<'_> {
    #[cfg(unix)]
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        use std::os::fd::AsRawFd;

        if self.buffered() > 0 {
            return Ok(true);
        }
        platform::sys_wait_readable(self.input.as_raw_fd(), timeout)
    }

    #[cfg(windows)]
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<bool> {
        if self.buffered() > 0 {
            return Ok(true);
        }
        if !platform::sys_wait_readable(self.input, timeout)? {
            return Ok(false);
        }
        if !self.console || platform::sys_key_pending(self.input)? {
            return Ok(true);
        }

        platform::sys_flush_console(self.input);
        Ok(false)
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.buffered() == 0 && self.refill()? == 0 {
            return Ok(0);
        }

        let available = &self.pending[self.start..];
        let limit = available.len().min(buf.len());
        let n = match available[..limit].iter().position(|&b| b == b'\n') {
            Some(pos) => pos + 1,
            None => limit,
        };

        buf[..n].copy_from_slice(&available[..n]);
        self.start += n;

        Ok(n)
    }
}

impl std::fmt::Debug for FdSource<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FdSource")
            .field("input", &self.input)
            .field("buffered", &self.buffered())
            .finish()
    }
}
