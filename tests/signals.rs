mod common;

use common::{Journal, ScriptedSource, Step, data};
use idleline::{HostLock, InterruptFlag, LineReader, ReadLineError, SignalStatus};

use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

struct JournalLock(Journal);

impl HostLock for JournalLock {
    fn acquire(&self) {
        self.0.push("acquire");
    }

    fn release(&self) {
        self.0.push("release");
    }
}

#[test]
fn test_signal_check_abort_cancels() {
    let mut reader = LineReader::builder()
        .signal_check(|| SignalStatus::Abort)
        .prompt_writer(io::sink())
        .build();
    let mut input = ScriptedSource::new(vec![Step::WaitInterrupted, data(b"never\n")]);

    let result = reader.read_line(&mut input, &mut io::sink(), None);

    assert!(matches!(result, Err(ReadLineError::Cancelled)));
}

#[test]
fn test_signal_check_runs_once_per_transient_interruption() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut reader = LineReader::builder()
        .signal_check(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            SignalStatus::Continue
        })
        .prompt_writer(io::sink())
        .build();
    let mut input = ScriptedSource::new(vec![
        Step::WaitInterrupted,
        Step::Idle,
        Step::WaitInterrupted,
        data(b"ok\n"),
    ]);

    let line = reader
        .read_line(&mut input, &mut io::sink(), None)
        .expect("line");

    assert_eq!(line.as_bytes(), b"ok\n");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_signal_check_is_skipped_for_other_errors() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let mut reader = LineReader::builder()
        .signal_check(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            SignalStatus::Abort
        })
        .prompt_writer(io::sink())
        .build();
    let mut input = ScriptedSource::new(vec![Step::ReadFails(io::ErrorKind::Other)]);

    let line = reader
        .read_line(&mut input, &mut io::sink(), None)
        .expect("empty line");

    assert!(line.is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_host_lock_wraps_signal_check_only() {
    let journal = Journal::default();
    let check_journal = journal.clone();
    let mut reader = LineReader::builder()
        .host_lock(JournalLock(journal.clone()))
        .signal_check(move || {
            check_journal.push("check");
            SignalStatus::Continue
        })
        .prompt_writer(io::sink())
        .build();
    let mut input = ScriptedSource::new(vec![Step::WaitInterrupted, data(b"ok\n")]);

    reader
        .read_line(&mut input, &mut io::sink(), None)
        .expect("line");

    assert_eq!(journal.events(), vec!["acquire", "check", "release"]);
}

#[test]
fn test_host_lock_is_released_when_check_aborts() {
    let journal = Journal::default();
    let mut reader = LineReader::builder()
        .host_lock(JournalLock(journal.clone()))
        .signal_check(|| SignalStatus::Abort)
        .prompt_writer(io::sink())
        .build();
    let mut input = ScriptedSource::new(vec![Step::WaitInterrupted]);

    let result = reader.read_line(&mut input, &mut io::sink(), None);

    assert!(result.is_err());
    assert_eq!(journal.count("acquire"), 1);
    assert_eq!(journal.count("release"), 1);
}

#[test]
fn test_host_lock_unused_without_signal_check() {
    let journal = Journal::default();
    let mut reader = LineReader::builder()
        .host_lock(JournalLock(journal.clone()))
        .prompt_writer(io::sink())
        .build();
    let mut input = ScriptedSource::new(vec![Step::WaitInterrupted, data(b"ok\n")]);

    reader
        .read_line(&mut input, &mut io::sink(), None)
        .expect("line");

    assert!(journal.events().is_empty());
}

#[test]
fn test_closure_interrupt_observer() {
    let flag = InterruptFlag::new();
    let observed = flag.clone();
    let mut reader = LineReader::builder()
        .interrupt_observer(move || observed.is_raised())
        .prompt_writer(io::sink())
        .build();
    let mut input =
        ScriptedSource::new(vec![Step::Raise, Step::WaitInterrupted]).with_flag(flag.clone());

    let result = reader.read_line(&mut input, &mut io::sink(), None);

    assert!(matches!(result, Err(ReadLineError::Cancelled)));
}

#[test]
fn test_interrupt_flag_take_clears() {
    let flag = InterruptFlag::new();
    let clone = flag.clone();

    assert!(!flag.is_raised());
    clone.raise();
    assert!(flag.is_raised());
    assert!(flag.take());
    assert!(!clone.is_raised());
    assert!(!flag.take());

    flag.raise();
    flag.clear();
    assert!(!clone.is_raised());
}

#[tracing_test::traced_test]
#[test]
fn test_transient_interruption_is_logged() {
    let mut reader = LineReader::builder().prompt_writer(io::sink()).build();
    let mut input = ScriptedSource::new(vec![Step::WaitInterrupted, data(b"ok\n")]);

    reader
        .read_line(&mut input, &mut io::sink(), None)
        .expect("line");

    assert!(logs_contain("transient interruption, retrying"));
}
