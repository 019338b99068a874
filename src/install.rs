//! Installing a reader as a host's line-input provider.
//!
//! A host that normally delegates interactive input to a full line
//! editor can fall back to [`LineReader`] when no editor is available.
//! [`install`] makes that decision.

use crate::reader::LineReader;

/// Whether this platform exposes a wait primitive the reader supports.
pub const PLATFORM_SUPPORTED: bool = cfg!(any(unix, windows));

/// A host that reads interactive input through a replaceable provider.
pub trait LineInputHost {
    /// Returns `true` if a full line editor already provides input.
    fn has_line_editor(&self) -> bool;

    /// Makes `reader` the active line-input provider.
    fn set_line_reader(&mut self, reader: LineReader);
}

/// Installs `reader` as the host's line-input provider.
///
/// The reader is installed only when the host has no line editor and the
/// platform is supported. Returns whether it was installed; otherwise the
/// reader is dropped and the host is left untouched.
pub fn install<H>(host: &mut H, reader: LineReader) -> bool
where
    H: LineInputHost + ?Sized,
{
    if host.has_line_editor() {
        tracing::debug!("line editor present, keeping it");
        return false;
    }

    if !PLATFORM_SUPPORTED {
        tracing::debug!("no supported wait primitive on this platform");
        return false;
    }

    host.set_line_reader(reader);
    tracing::debug!("idle-aware line reader installed");
    true
}
