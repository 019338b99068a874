use idleline::{DEFAULT_INITIAL_CAPACITY, LineReader, PollOutcome, ReadBuffer};

use std::io;
use std::time::Duration;

#[test]
fn test_buffer_starts_empty() {
    let buffer = ReadBuffer::with_capacity(DEFAULT_INITIAL_CAPACITY).unwrap();

    assert_eq!(buffer.capacity(), 100);
    assert_eq!(buffer.used_len(), 0);
    assert!(buffer.as_bytes().is_empty());
    assert!(!buffer.ends_with_newline());
}

#[test]
fn test_growth_on_empty_buffer() {
    let mut buffer = ReadBuffer::with_capacity(10).unwrap();

    assert_eq!(buffer.next_increment(), 2);
    assert_eq!(buffer.grow().unwrap(), 2);
    assert_eq!(buffer.capacity(), 2);
}

#[test]
#[should_panic]
fn test_buffer_needs_room_for_terminator() {
    let _ = ReadBuffer::with_capacity(1);
}

#[test]
fn test_poll_outcome_codes() {
    assert_eq!(PollOutcome::Ready(3).code(), 0);
    assert_eq!(PollOutcome::Interrupted.code(), 1);
    assert_eq!(PollOutcome::Eof.code(), -1);
    assert_eq!(PollOutcome::Error(io::ErrorKind::Other).code(), -2);

    assert!(PollOutcome::Ready(1).is_ready());
    assert!(!PollOutcome::Eof.is_ready());
}

#[test]
#[should_panic(expected = "tick must be > 0")]
fn test_builder_rejects_zero_tick() {
    let _ = LineReader::builder().tick(Duration::ZERO);
}

#[test]
#[should_panic(expected = "initial_capacity must be >= 2")]
fn test_builder_rejects_tiny_capacity() {
    let _ = LineReader::builder().initial_capacity(1);
}
