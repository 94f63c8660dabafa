// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::metadata::require_path;
use crate::{Close, Error, Result, ScopedDescriptor, telemetry, write_once};

/// Opens an existing file write-only, writes `buf` with a single write call, and closes it.
///
/// The file is neither created nor truncated: writing a shorter buffer over a longer file
/// leaves the tail of the old contents in place. The write has the single-attempt semantics of
/// [`write_once`].
///
/// The descriptor is closed on every exit path. If closing fails, that error is returned even
/// when the write failed too; the write result is returned only when the close succeeds.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `path` or `buf` is empty. Nothing is opened.
/// * [`Error::Io`] if opening fails (e.g. `ENOENT` for a missing file), in which case nothing is
///   written, or if the write or close call fails.
/// * [`Error::ConnectionReset`] if the write call accepted only part of `buf`.
pub fn write_file(path: impl AsRef<Path>, buf: &[u8]) -> Result<()> {
    let path = require_path(path.as_ref())?;
    if buf.is_empty() {
        return Err(Error::InvalidArgument("write buffer is empty"));
    }

    let file = match OpenOptions::new().write(true).open(path) {
        Ok(file) => file,
        Err(e) => {
            telemetry::os_error("write_file", &e);
            return Err(e.into());
        }
    };

    write_and_close(ScopedDescriptor::new(file), buf)
}

/// Writes `buf` to `handle` with [`write_once`], then closes the handle.
///
/// The handle is closed whether or not the write succeeded. A close error takes priority over the
/// write result.
///
/// # Errors
///
/// Returns the close error if closing fails, otherwise whatever [`write_once`] returned.
pub fn write_and_close<H: Write + Close>(mut handle: H, buf: &[u8]) -> Result<()> {
    let written = write_once(&mut handle, buf);

    if let Err(e) = handle.close() {
        telemetry::close_error(&e, written.is_err());
        return Err(e.into());
    }

    written
}
