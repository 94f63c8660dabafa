// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{Read, Write};

use crate::telemetry;
use crate::{Error, Result};

/// Reads exactly `buf.len()` bytes from `source`, blocking until they have all arrived.
///
/// Partial reads are continued until the buffer is full. Any error from the underlying read is
/// returned immediately, including [`ErrorKind::Interrupted`](std::io::ErrorKind::Interrupted):
/// unlike [`Read::read_exact`], this function does not retry interrupted calls, so a signal
/// handler can break a caller out of an indefinite wait.
///
/// On failure the contents of `buf` are unspecified.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `buf` is empty. `source` is not touched.
/// * [`Error::Io`] if a read call fails.
/// * [`Error::ConnectionReset`] if the stream ends before `buf` is full.
pub fn read_exact<R: Read + ?Sized>(source: &mut R, buf: &mut [u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(Error::InvalidArgument("read buffer is empty"));
    }

    let requested = buf.len();
    let mut filled = 0;

    while filled < requested {
        match source.read(&mut buf[filled..]) {
            Ok(0) => {
                telemetry::short_transfer("read_exact", filled, requested);
                return Err(Error::ConnectionReset {
                    transferred: filled,
                    requested,
                });
            }
            Ok(n) => filled += n,
            Err(e) => {
                telemetry::os_error("read_exact", &e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}

/// Writes `buf` to `sink` with a single write call.
///
/// This does not loop. If the sink accepts fewer bytes than `buf.len()`, the remainder is not
/// retried and the call fails, leaving the caller to decide how to resume. Use [`write_all`]
/// when continuing across partial writes is wanted.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `buf` is empty. `sink` is not touched.
/// * [`Error::Io`] if the write call fails.
/// * [`Error::ConnectionReset`] if the write call accepted only part of `buf`.
pub fn write_once<W: Write + ?Sized>(sink: &mut W, buf: &[u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(Error::InvalidArgument("write buffer is empty"));
    }

    match sink.write(buf) {
        Ok(n) if n == buf.len() => Ok(()),
        Ok(n) => {
            telemetry::short_transfer("write_once", n, buf.len());
            Err(Error::ConnectionReset {
                transferred: n,
                requested: buf.len(),
            })
        }
        Err(e) => {
            telemetry::os_error("write_once", &e);
            Err(e.into())
        }
    }
}

/// Writes all of `buf` to `sink`, continuing across partial writes.
///
/// This is the looping counterpart of [`write_once`], with the same interruption behavior as
/// [`read_exact`]: errors are returned immediately and interrupted calls are not retried.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `buf` is empty. `sink` is not touched.
/// * [`Error::Io`] if a write call fails.
/// * [`Error::ConnectionReset`] if a write call accepts zero bytes before `buf` is drained.
pub fn write_all<W: Write + ?Sized>(sink: &mut W, buf: &[u8]) -> Result<()> {
    if buf.is_empty() {
        return Err(Error::InvalidArgument("write buffer is empty"));
    }

    let mut written = 0;

    while written < buf.len() {
        match sink.write(&buf[written..]) {
            Ok(0) => {
                telemetry::short_transfer("write_all", written, buf.len());
                return Err(Error::ConnectionReset {
                    transferred: written,
                    requested: buf.len(),
                });
            }
            Ok(n) => written += n,
            Err(e) => {
                telemetry::os_error("write_all", &e);
                return Err(e.into());
            }
        }
    }

    Ok(())
}
