// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::ErrorKind;

use thiserror::Error;

/// An error returned by the operations in this crate.
///
/// The set of variants is closed over three causes: a caller passed an empty required argument,
/// the operating system rejected a call, or fewer bytes moved than were requested. Each variant
/// maps onto a platform error number via [`Error::errno`] so that callers interoperating with
/// C-style status codes can recover the traditional value.
///
/// # Thread safety
///
/// This type is thread-safe.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A required argument was empty: an empty path or a zero-length buffer.
    ///
    /// The underlying descriptor or filesystem is never touched when this is returned.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Fewer bytes were transferred than requested.
    ///
    /// For reads this means the peer reached end of stream early. For single-attempt writes
    /// it means the kernel accepted only part of the buffer.
    #[error("connection reset: transferred {transferred} of {requested} bytes")]
    ConnectionReset {
        /// Bytes moved before the transfer stopped.
        transferred: usize,

        /// Bytes the caller asked to move.
        requested: usize,
    },

    /// We are forwarding an error received from an operating system call.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns the platform error number describing this error.
    ///
    /// Platform errors return their original value. Invalid arguments map to `EINVAL` and short
    /// transfers to `ECONNRESET`. An I/O error that did not originate from the operating system,
    /// such as a path with an interior NUL byte rejected before any call, maps by its kind and
    /// falls back to `EIO`.
    #[must_use]
    pub fn errno(&self) -> i32 {
        match self {
            Self::InvalidArgument(_) => libc::EINVAL,
            Self::ConnectionReset { .. } => libc::ECONNRESET,
            Self::Io(e) => e.raw_os_error().unwrap_or_else(|| errno_of_kind(e.kind())),
        }
    }

    /// Returns the [`ErrorKind`] this error converts to when turned into a [`std::io::Error`].
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidInput,
            Self::ConnectionReset { .. } => ErrorKind::ConnectionReset,
            Self::Io(e) => e.kind(),
        }
    }

    /// Whether the error reports a path that does not resolve.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

fn errno_of_kind(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::InvalidInput => libc::EINVAL,
        ErrorKind::NotFound => libc::ENOENT,
        ErrorKind::PermissionDenied => libc::EACCES,
        _ => libc::EIO,
    }
}

/// A specialized `Result` for the operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Represents the error as a standard I/O error, for callers that speak `std::io` only.
impl From<Error> for std::io::Error {
    fn from(value: Error) -> Self {
        match value {
            Error::Io(error) => error,
            other => Self::new(other.kind(), other),
        }
    }
}

#[cfg(test)]
mod tests {
    use static_assertions::assert_impl_all;

    use super::*;

    #[test]
    fn thread_safe_type() {
        assert_impl_all!(Error: Send, Sync);
    }

    #[test]
    fn errno_of_synthesized_errors() {
        assert_eq!(Error::InvalidArgument("buffer").errno(), libc::EINVAL);
        assert_eq!(
            Error::ConnectionReset {
                transferred: 1,
                requested: 2
            }
            .errno(),
            libc::ECONNRESET
        );
    }

    #[test]
    fn errno_of_platform_error_is_preserved() {
        let e = Error::from(std::io::Error::from_raw_os_error(libc::EACCES));
        assert_eq!(e.errno(), libc::EACCES);
        assert_eq!(e.kind(), ErrorKind::PermissionDenied);
    }

    #[test]
    fn errno_of_non_os_error_is_eio() {
        let e = Error::from(std::io::Error::other("synthetic"));
        assert_eq!(e.errno(), libc::EIO);
    }

    #[test]
    fn errno_of_non_os_error_follows_kind() {
        let invalid = Error::from(std::io::Error::new(ErrorKind::InvalidInput, "nul byte"));
        assert_eq!(invalid.errno(), libc::EINVAL);

        let missing = Error::from(std::io::Error::from(ErrorKind::NotFound));
        assert_eq!(missing.errno(), libc::ENOENT);

        let denied = Error::from(std::io::Error::from(ErrorKind::PermissionDenied));
        assert_eq!(denied.errno(), libc::EACCES);
    }

    #[test]
    fn not_found_is_detected() {
        let e = Error::from(std::io::Error::from_raw_os_error(libc::ENOENT));
        assert!(e.is_not_found());
        assert!(!Error::InvalidArgument("path").is_not_found());
    }

    #[test]
    fn display_mentions_byte_counts() {
        let e = Error::ConnectionReset {
            transferred: 3,
            requested: 8,
        };
        assert_eq!(e.to_string(), "connection reset: transferred 3 of 8 bytes");
    }

    #[test]
    fn into_stdio_error() {
        let io_error: std::io::Error = Error::InvalidArgument("path").into();
        assert_eq!(io_error.kind(), ErrorKind::InvalidInput);
        assert_eq!(io_error.to_string(), "invalid argument: path");

        let io_error: std::io::Error = Error::ConnectionReset {
            transferred: 0,
            requested: 4,
        }
        .into();
        assert_eq!(io_error.kind(), ErrorKind::ConnectionReset);

        let io_error: std::io::Error = Error::Io(std::io::Error::from_raw_os_error(libc::ENOENT)).into();
        assert_eq!(io_error.raw_os_error(), Some(libc::ENOENT));
    }
}
