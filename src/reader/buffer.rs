use super::line::{Line, Termination};
use crate::poller::PollOutcome;

use std::collections::TryReserveError;

/// A growable byte buffer holding a line under construction.
///
/// The buffer tracks a logical `capacity` and the `used` length. One byte
/// of the capacity is always reserved for the terminating NUL, so at most
/// `capacity - 1` bytes are ever filled.
///
/// Growth follows `incr = used + 2`, `capacity = used + incr`: roughly
/// doubling with a little slack.
#[derive(Debug)]
pub struct ReadBuffer {
    /// Filled bytes; `data.len() == used` between fills.
    data: Vec<u8>,

    /// Number of filled bytes.
    used: usize,

    /// Logical capacity, terminator included.
    capacity: usize,
}

impl ReadBuffer {
    /// Allocates an empty buffer of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the memory cannot be reserved.
    ///
    /// # Panics
    ///
    /// Panics if `capacity < 2`.
    pub fn with_capacity(capacity: usize) -> Result<Self, TryReserveError> {
        assert!(capacity >= 2, "a line buffer needs room for one byte and its terminator");

        let mut data = Vec::new();
        data.try_reserve_exact(capacity)?;

        Ok(Self {
            data,
            used: 0,
            capacity,
        })
    }

    /// Logical capacity, terminator included.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of filled bytes.
    pub fn used_len(&self) -> usize {
        self.used
    }

    /// The filled bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.used]
    }

    /// Returns `true` if the last filled byte is a newline.
    pub fn ends_with_newline(&self) -> bool {
        self.as_bytes().last() == Some(&b'\n')
    }

    /// Size of the next growth step: `used + 2`.
    pub fn next_increment(&self) -> usize {
        self.used.saturating_add(2)
    }

    /// Grows the capacity to `used + next_increment()`.
    ///
    /// Returns the increment that was applied. The new capacity depends on
    /// `used` alone, so it can be smaller than the current one when the
    /// last window was not filled. Filled bytes are always preserved.
    ///
    /// # Errors
    ///
    /// Returns the allocator's error if the memory cannot be reserved. The
    /// buffer is left unchanged in that case.
    pub fn grow(&mut self) -> Result<usize, TryReserveError> {
        let incr = self.next_increment();
        let capacity = self.used.saturating_add(incr);

        self.data.try_reserve_exact(capacity - self.data.len())?;
        self.capacity = capacity;

        Ok(incr)
    }

    /// Lets `read` fill the free window and records the bytes it reports.
    ///
    /// The window spans from `used` to `capacity - 1`. Only a
    /// [`PollOutcome::Ready`] moves `used` forward.
    pub(crate) fn fill_with<F>(&mut self, read: F) -> PollOutcome
    where
        F: FnOnce(&mut [u8]) -> PollOutcome,
    {
        let end = self.capacity - 1;

        // Capacity is already reserved, so this never reallocates.
        self.data.resize(end, 0);
        let outcome = read(&mut self.data[self.used..end]);

        if let PollOutcome::Ready(n) = outcome {
            self.used += n.min(end - self.used);
        }
        self.data.truncate(self.used);

        outcome
    }

    /// Trims the buffer to `used + 1` bytes and terminates it.
    pub(crate) fn into_line(mut self, termination: Termination, overflowed: bool) -> Line {
        self.data.truncate(self.used);
        self.data.push(0);
        self.data.shrink_to_fit();

        Line::new(self.data, termination, overflowed)
    }
}
