//! # idleline
//!
//! **idleline** reads a line of interactive input while keeping the rest of
//! the program alive. While it waits for the user, it runs an idle hook in
//! bounded ticks (100 ms by default), so an embedding application can keep
//! redrawing windows or pumping events between keystrokes. It also stays
//! responsive to Ctrl-C and to transient `EINTR` interruptions.
//!
//! It is meant as the fallback input path for a prompt when no full line
//! editor is available: there is no history, completion or editing.
//!
//! The crate is made of two parts:
//!
//! - A **poller** that waits for the input in ticks, running the idle hook
//!   before every wait, using `select(2)` on Unix and `WaitForSingleObject`
//!   on Windows
//! - A **line reader** that gates every read on the poller and grows its
//!   buffer until a newline, end of stream, an error or an interrupt
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use idleline::{InterruptFlag, LineReader};
//!
//! let flag = InterruptFlag::new();
//! flag.register_ctrl_c()?;
//!
//! let mut reader = LineReader::builder()
//!     .idle_hook(|| process_gui_events())
//!     .interrupt_observer(flag.clone())
//!     .build();
//!
//! match reader.read_stdin_line(Some(">>> ")) {
//!     Ok(line) if line.is_empty() => println!("end of input"),
//!     Ok(line) => print!("{}", String::from_utf8_lossy(line.as_bytes())),
//!     Err(e) if e.is_cancelled() => println!("^C"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
//! ## Modules
//!
//! - [`poller`] — Readiness polling, outcomes and input sources
//! - [`interrupt`] — Interrupt observers, signal checks and Ctrl-C wiring
//! - [`install`] — Installing a reader as a host's input provider

mod builder;
mod context;
mod error;
mod reader;

pub mod install;
pub mod interrupt;
pub mod poller;

pub use builder::{DEFAULT_INITIAL_CAPACITY, DEFAULT_SETTLE_DELAY, DEFAULT_TICK, ReaderBuilder};
pub use context::IdleHook;
pub use error::ReadLineError;
pub use interrupt::{HostLock, InterruptFlag, InterruptObserver, SignalCheck, SignalStatus};
pub use poller::{FdSource, InputSource, PollOutcome};
pub use reader::{Line, LineReader, ReadBuffer, SOFT_CHUNK_LIMIT, Termination};
