use std::io;
use std::str::Utf8Error;
use std::string::FromUtf8Error;

/// How a line ended.
///
/// Callers that only look at the bytes see end of stream and I/O errors
/// the same way: an empty or truncated line. This value keeps the
/// distinction for callers that need it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A newline was read; it is the last byte of the line.
    Newline,

    /// The stream ended before a newline.
    Eof,

    /// A read failed before a newline.
    Error(io::ErrorKind),

    /// An interrupt arrived after part of the line had been read.
    Interrupted,
}

/// A line returned by [`LineReader`](crate::LineReader).
///
/// The line owns a NUL-terminated buffer trimmed to its length plus one.
/// [`as_bytes`](Self::as_bytes) excludes the terminator;
/// [`as_bytes_with_nul`](Self::as_bytes_with_nul) includes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line bytes followed by a single NUL.
    bytes: Vec<u8>,
    termination: Termination,
    overflowed: bool,
}

impl Line {
    pub(crate) fn new(bytes: Vec<u8>, termination: Termination, overflowed: bool) -> Self {
        debug_assert_eq!(bytes.last(), Some(&0));

        Self {
            bytes,
            termination,
            overflowed,
        }
    }

    /// The line bytes, without the terminator.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// The line bytes followed by the NUL terminator.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes, without the terminator.
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// Returns `true` if no byte was read.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the line ends with a newline.
    pub fn has_newline(&self) -> bool {
        self.as_bytes().last() == Some(&b'\n')
    }

    /// How the line ended.
    pub fn termination(&self) -> Termination {
        self.termination
    }

    /// Returns `true` if a growth step exceeded the soft size limit.
    pub fn overflowed(&self) -> bool {
        self.overflowed
    }

    /// The line as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid UTF-8.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        std::str::from_utf8(self.as_bytes())
    }

    /// Consumes the line, returning its bytes without the terminator.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bytes.pop();
        self.bytes
    }

    /// Consumes the line, returning it as a `String`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not valid UTF-8.
    pub fn into_string(self) -> Result<String, FromUtf8Error> {
        String::from_utf8(self.into_bytes())
    }
}

impl AsRef<[u8]> for Line {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
