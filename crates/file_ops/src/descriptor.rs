// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::io::{Read, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, IntoRawFd, OwnedFd, RawFd};

/// An explicit, fallible close step.
///
/// Dropping a descriptor closes it but discards the result of `close(2)`. Types implementing this
/// trait let the caller observe that result, which matters for writes that the kernel may only
/// report as failed at close time (e.g. on network filesystems).
pub trait Close {
    /// Releases the underlying resource and reports whether the release succeeded.
    ///
    /// # Errors
    ///
    /// Returns the platform error raised by the close call. The resource is released either way.
    fn close(self) -> std::io::Result<()>;
}

/// A borrowed file, pipe or socket descriptor with raw single-call I/O.
///
/// Each [`Read::read`] and [`Write::write`] call issues exactly one `read(2)` or `write(2)`
/// system call. Interrupted calls are not retried; `EINTR` surfaces as
/// [`ErrorKind::Interrupted`](std::io::ErrorKind::Interrupted).
///
/// The descriptor stays owned by the caller and is never closed by this type.
///
/// # Example
///
/// ```no_run
/// # fn example() -> file_ops::Result<()> {
/// use std::os::unix::net::UnixStream;
///
/// use file_ops::{Descriptor, read_exact};
///
/// let socket = UnixStream::connect("/run/service.sock")?;
/// let mut header = [0_u8; 16];
/// read_exact(&mut Descriptor::new(&socket), &mut header)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Descriptor<'fd> {
    fd: BorrowedFd<'fd>,
}

impl<'fd> Descriptor<'fd> {
    /// Borrows the descriptor of anything that exposes one.
    #[must_use]
    pub fn new(source: &'fd impl AsFd) -> Self {
        Self { fd: source.as_fd() }
    }
}

impl<'fd> From<BorrowedFd<'fd>> for Descriptor<'fd> {
    fn from(fd: BorrowedFd<'fd>) -> Self {
        Self { fd }
    }
}

impl AsFd for Descriptor<'_> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd
    }
}

impl AsRawFd for Descriptor<'_> {
    fn as_raw_fd(&self) -> RawFd {
        self.fd.as_raw_fd()
    }
}

impl Read for Descriptor<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        // SAFETY: The descriptor is valid for 'fd and `buf` is a writable region of `buf.len()` bytes.
        let n = unsafe { libc::read(self.fd.as_raw_fd(), buf.as_mut_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(n.unsigned_abs())
    }
}

impl Write for Descriptor<'_> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        // SAFETY: The descriptor is valid for 'fd and `buf` is a readable region of `buf.len()` bytes.
        let n = unsafe { libc::write(self.fd.as_raw_fd(), buf.as_ptr().cast(), buf.len()) };
        if n < 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(n.unsigned_abs())
    }

    // Raw descriptors have no user-space buffer.
    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// An owned descriptor whose lifetime is scoped to a single operation.
///
/// Call [`Close::close`] to release it and observe the result of `close(2)`. If the value is
/// dropped instead (early return, unwinding), the descriptor is still released and the result is
/// discarded, so no exit path leaks it.
#[derive(Debug)]
pub struct ScopedDescriptor {
    fd: OwnedFd,
}

impl ScopedDescriptor {
    /// Takes ownership of an open descriptor.
    #[must_use]
    pub fn new(fd: impl Into<OwnedFd>) -> Self {
        Self { fd: fd.into() }
    }
}

impl AsFd for ScopedDescriptor {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.fd.as_fd()
    }
}

impl Read for ScopedDescriptor {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        Descriptor::new(&self.fd).read(buf)
    }
}

impl Write for ScopedDescriptor {
    #[cfg_attr(test, mutants::skip)] // Trivial forwarder.
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Descriptor::new(&self.fd).write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Close for ScopedDescriptor {
    fn close(self) -> std::io::Result<()> {
        let raw = self.fd.into_raw_fd();

        // SAFETY: `raw` came from an `OwnedFd` we just gave up, so we are its sole owner and it
        // is closed exactly once here.
        let result = unsafe { libc::close(raw) };
        if result != 0 {
            return Err(std::io::Error::last_os_error());
        }
        Ok(())
    }
}

impl FromRawFd for ScopedDescriptor {
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        // SAFETY: Forwarded from the caller, who guarantees `fd` is open and owned.
        Self::new(unsafe { OwnedFd::from_raw_fd(fd) })
    }
}
