// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! An unpublished crate containing testing utilities for use within this repo.

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use std::{env, fs, thread};

use tempfile::TempDir;

mod log;

pub use log::*;

/// If something (whatever) does not happen in a test within this time, the test will fail.
///
/// We are conservative here and allow much time - this is only to break out of calls that block
/// forever because a test forgot to close a descriptor, not for situations that are expected.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Whether the tests run under `cargo mutants` (signaled via `MUTATION_TESTING=1`).
#[must_use]
pub fn is_mutation_testing() -> bool {
    env::var("MUTATION_TESTING").as_deref() == Ok("1")
}

/// Executes a thread-safe function on a background thread and abandons it if
/// it does not complete before [`TEST_TIMEOUT`].
///
/// Returns `None` if the function timed out or panicked.
#[must_use]
pub fn execute_or_abandon<F, R>(f: F) -> Option<R>
where
    F: FnOnce() -> R + Send + 'static,
    R: Send + 'static,
{
    if is_mutation_testing() {
        // Mutants that hang must show up as timeouts, not as abandoned threads.
        return Some(f());
    }

    let (sender, receiver) = mpsc::channel();

    // A panic drops the sender without sending, which recv_timeout reports like a timeout.
    thread::spawn(move || {
        let result = f();
        let _ = sender.send(result);
    });

    receiver.recv_timeout(TEST_TIMEOUT).ok()
}

/// Standard test data generator - `len` bytes of a repeating sequence from 0 to 255.
#[must_use]
pub fn incrementing_bytes(len: usize) -> Vec<u8> {
    (0..=u8::MAX).cycle().take(len).collect()
}

/// A file with known contents inside a temporary directory that is removed on drop.
#[derive(Debug)]
pub struct ScratchFile {
    dir: TempDir,
    path: PathBuf,
}

impl ScratchFile {
    /// Creates `file.bin` holding `contents` in a fresh temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the directory or file cannot be created.
    #[must_use]
    pub fn with_contents(contents: &[u8]) -> Self {
        let dir = TempDir::new().expect("temporary directory can be created");
        let path = dir.path().join("file.bin");
        fs::write(&path, contents).expect("scratch file can be written");
        Self { dir, path }
    }

    /// The path of the file.
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// A path in the same directory that does not exist.
    #[must_use]
    pub fn missing_sibling(&self) -> PathBuf {
        self.dir.path().join("missing.bin")
    }

    /// Reads the current contents of the file.
    ///
    /// # Panics
    ///
    /// Panics if the file cannot be read.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        fs::read(&self.path).expect("scratch file can be read")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn incrementing_bytes_wrap_around() {
        let bytes = incrementing_bytes(258);
        assert_eq!(bytes[0], 0);
        assert_eq!(bytes[255], 255);
        assert_eq!(bytes[256], 0);
        assert_eq!(bytes[257], 1);
    }

    #[test]
    fn scratch_file_round_trip() {
        let scratch = ScratchFile::with_contents(b"abc");
        assert_eq!(scratch.contents(), b"abc");
        assert!(!scratch.missing_sibling().exists());
    }

    #[test]
    fn execute_or_abandon_returns_result() {
        assert_eq!(execute_or_abandon(|| 42), Some(42));
    }
}
