#![allow(dead_code)]

use idleline::{InputSource, InterruptFlag};

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One scripted event of a [`ScriptedSource`].
pub enum Step {
    /// The wait times out without input.
    Idle,

    /// The wait succeeds and the next reads serve these bytes.
    Data(Vec<u8>),

    /// The wait succeeds and the read reports end of stream.
    Eof,

    /// The wait fails with `EINTR`.
    WaitInterrupted,

    /// The wait succeeds and the read fails with this kind.
    ReadFails(io::ErrorKind),

    /// Raises the interrupt flag, then continues with the next step.
    Raise,
}

pub fn data(bytes: &[u8]) -> Step {
    Step::Data(bytes.to_vec())
}

/// Shared record of what happened, in order.
#[derive(Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<&'static str>>>);

impl Journal {
    pub fn push(&self, event: &'static str) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<&'static str> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, event: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| **e == event).count()
    }
}

/// An input source that replays a script.
///
/// Bytes of a `Data` step are served with stdio line semantics: each read
/// stops after a newline or when the caller's buffer is full, and the
/// rest is kept for the next read. When the script runs out, the source
/// reports end of stream.
pub struct ScriptedSource {
    steps: VecDeque<Step>,
    pending: VecDeque<u8>,
    pending_failure: Option<io::ErrorKind>,
    flag: InterruptFlag,
    journal: Journal,
    pub reads: Vec<usize>,
}

impl ScriptedSource {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            pending: VecDeque::new(),
            pending_failure: None,
            flag: InterruptFlag::new(),
            journal: Journal::default(),
            reads: Vec::new(),
        }
    }

    pub fn with_flag(mut self, flag: InterruptFlag) -> Self {
        self.flag = flag;
        self
    }

    pub fn with_journal(mut self, journal: Journal) -> Self {
        self.journal = journal;
        self
    }
}

impl InputSource for ScriptedSource {
    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<bool> {
        self.journal.push("wait");

        if !self.pending.is_empty() {
            return Ok(true);
        }

        loop {
            match self.steps.pop_front() {
                Some(Step::Raise) => self.flag.raise(),
                Some(Step::Idle) => return Ok(false),
                Some(Step::Data(bytes)) => {
                    self.pending.extend(bytes);
                    return Ok(true);
                }
                Some(Step::Eof) | None => return Ok(true),
                Some(Step::WaitInterrupted) => {
                    return Err(io::Error::from(io::ErrorKind::Interrupted));
                }
                Some(Step::ReadFails(kind)) => {
                    self.pending_failure = Some(kind);
                    return Ok(true);
                }
            }
        }
    }

    fn read_into(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reads.push(buf.len());

        if let Some(kind) = self.pending_failure.take() {
            return Err(io::Error::from(kind));
        }

        let mut n = 0;
        while n < buf.len() {
            let Some(byte) = self.pending.pop_front() else {
                break;
            };
            buf[n] = byte;
            n += 1;
            if byte == b'\n' {
                break;
            }
        }

        Ok(n)
    }
}

/// A `Write` sink whose contents can be inspected after being moved into
/// a reader.
#[derive(Clone, Default)]
pub struct SharedSink {
    bytes: Arc<Mutex<Vec<u8>>>,
    flushes: Arc<Mutex<usize>>,
}

impl SharedSink {
    pub fn contents(&self) -> Vec<u8> {
        self.bytes.lock().unwrap().clone()
    }

    pub fn flushes(&self) -> usize {
        *self.flushes.lock().unwrap()
    }
}

impl io::Write for SharedSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.bytes.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        *self.flushes.lock().unwrap() += 1;
        Ok(())
    }
}
