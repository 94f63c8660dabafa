// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::cell::RefCell;
use std::io::{ErrorKind, Read, Write};
use std::num::NonZero;
use std::rc::Rc;

use crate::Close;

/// A scripted stand-in for a file, pipe or socket descriptor.
///
/// Reads are served from fixed contents and writes are collected in memory. The builder can
/// limit how many bytes each call moves, cap the total a sink accepts, and inject a one-shot
/// error into a chosen read or write call or into [`Close::close`]. Every call is counted, which
/// lets tests prove that an operation looped, or that it did not.
///
/// Clones share state, like duplicated descriptors: a test can hand one clone to code that
/// consumes it (for example via [`Close::close`]) and inspect the other afterwards.
///
/// This is for test and example purposes only.
#[derive(Debug, Clone)]
pub struct FakeDescriptor {
    state: Rc<RefCell<State>>,
}

#[derive(Debug)]
struct State {
    contents: Vec<u8>,
    read_offset: usize,
    written: Vec<u8>,

    // Limits on a single call, forcing callers into multiple calls.
    max_read_size: Option<NonZero<usize>>,
    max_write_size: Option<NonZero<usize>>,

    // Total bytes a sink accepts before every write returns zero.
    capacity: Option<usize>,

    read_failure: Option<(usize, ErrorKind)>,
    write_failure: Option<(usize, ErrorKind)>,
    close_failure: Option<ErrorKind>,

    read_calls: usize,
    write_calls: usize,
    close_calls: usize,
}

impl FakeDescriptor {
    /// Starts building a new `FakeDescriptor`.
    #[must_use]
    pub fn builder() -> FakeDescriptorBuilder {
        FakeDescriptorBuilder {
            contents: Vec::new(),
            max_read_size: None,
            max_write_size: None,
            capacity: None,
            read_failure: None,
            write_failure: None,
            close_failure: None,
        }
    }

    /// Creates an empty `FakeDescriptor` that accepts every write in full.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a copy of everything written so far.
    #[must_use]
    pub fn written(&self) -> Vec<u8> {
        self.state.borrow().written.clone()
    }

    /// Returns a copy of the contents not yet read.
    #[must_use]
    pub fn remaining(&self) -> Vec<u8> {
        let state = self.state.borrow();
        state.contents[state.read_offset..].to_vec()
    }

    /// Number of read calls made, including failed ones.
    #[must_use]
    pub fn read_calls(&self) -> usize {
        self.state.borrow().read_calls
    }

    /// Number of write calls made, including failed ones.
    #[must_use]
    pub fn write_calls(&self) -> usize {
        self.state.borrow().write_calls
    }

    /// Number of times any clone of this descriptor was closed.
    #[must_use]
    pub fn close_calls(&self) -> usize {
        self.state.borrow().close_calls
    }
}

impl Default for FakeDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl Read for FakeDescriptor {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let call = state.read_calls;
        state.read_calls += 1;

        if let Some((at, kind)) = state.read_failure
            && at == call
        {
            state.read_failure = None;
            return Err(kind.into());
        }

        let available = state.contents.len() - state.read_offset;
        let n = buf
            .len()
            .min(available)
            .min(state.max_read_size.map_or(usize::MAX, NonZero::get));

        let start = state.read_offset;
        buf[..n].copy_from_slice(&state.contents[start..start + n]);
        state.read_offset += n;

        Ok(n)
    }
}

impl Write for FakeDescriptor {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut state = self.state.borrow_mut();
        let call = state.write_calls;
        state.write_calls += 1;

        if let Some((at, kind)) = state.write_failure
            && at == call
        {
            state.write_failure = None;
            return Err(kind.into());
        }

        let room = state.capacity.map_or(usize::MAX, |c| c.saturating_sub(state.written.len()));
        let n = buf
            .len()
            .min(room)
            .min(state.max_write_size.map_or(usize::MAX, NonZero::get));

        state.written.extend_from_slice(&buf[..n]);

        Ok(n)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Close for FakeDescriptor {
    fn close(self) -> std::io::Result<()> {
        let mut state = self.state.borrow_mut();
        state.close_calls += 1;

        state.close_failure.map_or(Ok(()), |kind| Err(kind.into()))
    }
}

/// Creates an instance of [`FakeDescriptor`].
///
/// Access through [`FakeDescriptor::builder()`][FakeDescriptor::builder].
#[derive(Debug)]
pub struct FakeDescriptorBuilder {
    contents: Vec<u8>,
    max_read_size: Option<NonZero<usize>>,
    max_write_size: Option<NonZero<usize>>,
    capacity: Option<usize>,
    read_failure: Option<(usize, ErrorKind)>,
    write_failure: Option<(usize, ErrorKind)>,
    close_failure: Option<ErrorKind>,
}

impl FakeDescriptorBuilder {
    /// The data served to readers. Once exhausted, reads return zero (end of stream).
    #[must_use]
    pub fn contents(mut self, contents: &[u8]) -> Self {
        self.contents = contents.to_vec();
        self
    }

    /// The most bytes a single read call returns.
    ///
    /// # Panics
    ///
    /// Panics if `max_read_size` is zero.
    #[must_use]
    pub fn max_read_size(mut self, max_read_size: usize) -> Self {
        self.max_read_size = Some(NonZero::new(max_read_size).expect("max_read_size must be non-zero"));
        self
    }

    /// The most bytes a single write call accepts.
    ///
    /// # Panics
    ///
    /// Panics if `max_write_size` is zero.
    #[must_use]
    pub fn max_write_size(mut self, max_write_size: usize) -> Self {
        self.max_write_size = Some(NonZero::new(max_write_size).expect("max_write_size must be non-zero"));
        self
    }

    /// Total bytes accepted across all writes. Further writes return zero.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Fails the read call with zero-based index `call` with an error of the given kind.
    ///
    /// The failure happens once; later calls behave normally.
    #[must_use]
    pub fn fail_read_after(mut self, call: usize, kind: ErrorKind) -> Self {
        self.read_failure = Some((call, kind));
        self
    }

    /// Fails the write call with zero-based index `call` with an error of the given kind.
    ///
    /// The failure happens once; later calls behave normally.
    #[must_use]
    pub fn fail_write_after(mut self, call: usize, kind: ErrorKind) -> Self {
        self.write_failure = Some((call, kind));
        self
    }

    /// Makes [`Close::close`] fail with an error of the given kind.
    #[must_use]
    pub fn fail_close(mut self, kind: ErrorKind) -> Self {
        self.close_failure = Some(kind);
        self
    }

    /// Builds the `FakeDescriptor` with the provided configuration.
    #[must_use]
    pub fn build(self) -> FakeDescriptor {
        FakeDescriptor {
            state: Rc::new(RefCell::new(State {
                contents: self.contents,
                read_offset: 0,
                written: Vec::new(),
                max_read_size: self.max_read_size,
                max_write_size: self.max_write_size,
                capacity: self.capacity,
                read_failure: self.read_failure,
                write_failure: self.write_failure,
                close_failure: self.close_failure,
                read_calls: 0,
                write_calls: 0,
                close_calls: 0,
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_limited_per_call() {
        let mut fake = FakeDescriptor::builder().contents(b"abcde").max_read_size(2).build();
        let mut buf = [0_u8; 8];

        assert_eq!(fake.read(&mut buf).unwrap(), 2);
        assert_eq!(fake.read(&mut buf).unwrap(), 2);
        assert_eq!(fake.read(&mut buf).unwrap(), 1);
        assert_eq!(fake.read(&mut buf).unwrap(), 0);
        assert_eq!(fake.read_calls(), 4);
    }

    #[test]
    fn injected_read_failure_is_one_shot() {
        let mut fake = FakeDescriptor::builder()
            .contents(b"ab")
            .fail_read_after(0, ErrorKind::WouldBlock)
            .build();
        let mut buf = [0_u8; 2];

        assert_eq!(fake.read(&mut buf).unwrap_err().kind(), ErrorKind::WouldBlock);
        assert_eq!(fake.read(&mut buf).unwrap(), 2);
    }

    #[test]
    fn capacity_caps_total_writes() {
        let mut fake = FakeDescriptor::builder().capacity(3).build();

        assert_eq!(fake.write(b"abcd").unwrap(), 3);
        assert_eq!(fake.write(b"d").unwrap(), 0);
        assert_eq!(fake.written(), b"abc");
    }

    #[test]
    fn clones_share_state() {
        let fake = FakeDescriptor::builder().fail_close(ErrorKind::Other).build();
        let mut writer = fake.clone();

        writer.write_all(b"xyz").unwrap();
        assert_eq!(writer.close().unwrap_err().kind(), ErrorKind::Other);

        assert_eq!(fake.written(), b"xyz");
        assert_eq!(fake.close_calls(), 1);
    }

    #[test]
    #[should_panic]
    fn zero_max_write_size_panics() {
        let _ = FakeDescriptor::builder().max_write_size(0);
    }
}
