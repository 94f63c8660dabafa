// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg(unix)]

//! Blocking helpers for the handful of file and socket chores that every systems program repeats.
//!
//! The crate wraps single system calls and gives each a precise contract:
//!
//! | Operation | Does | Loops? |
//! |-----------|------|--------|
//! | [`get_size`] | Status query, returns the byte size | - |
//! | [`is_present`] | Status query, returns whether it succeeded | - |
//! | [`read_exact`] | Reads until the buffer is full | Yes, on positive short reads |
//! | [`write_once`] | One write call, fails on a short write | No |
//! | [`write_all`] | Writes until the buffer is drained | Yes, on positive short writes |
//! | [`write_file`] | Open write-only, [`write_once`], close | No |
//!
//! Reading and writing are deliberately asymmetric. [`read_exact`] keeps reading because a
//! stream delivers data in whatever chunks it likes. [`write_once`] makes exactly one attempt and
//! reports a short write as [`Error::ConnectionReset`], leaving the caller in charge of resuming;
//! [`write_all`] is there for callers that want the loop.
//!
//! None of the looping operations retry interrupted system calls. `EINTR` is returned to the
//! caller as [`ErrorKind::Interrupted`](std::io::ErrorKind::Interrupted), so a signal can break a
//! thread out of an otherwise indefinite wait.
//!
//! # Descriptors
//!
//! [`read_exact`], [`write_once`] and [`write_all`] accept any [`std::io::Read`] or
//! [`std::io::Write`]. To work on a raw descriptor the caller keeps owning, wrap it in a
//! [`Descriptor`], which issues exactly one `read(2)` or `write(2)` per call:
//!
//! ```no_run
//! # fn example() -> file_ops::Result<()> {
//! use std::os::unix::net::UnixStream;
//!
//! use file_ops::{Descriptor, read_exact, write_once};
//!
//! let socket = UnixStream::connect("/run/service.sock")?;
//! write_once(&mut Descriptor::new(&socket), b"PING")?;
//!
//! let mut reply = [0_u8; 4];
//! read_exact(&mut Descriptor::new(&socket), &mut reply)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Files
//!
//! ```no_run
//! # fn example() -> file_ops::Result<()> {
//! use file_ops::{get_size, is_present, write_file};
//!
//! let path = "/sys/class/leds/input0::capslock/brightness";
//! if is_present(path)? {
//!     println!("{} bytes", get_size(path)?);
//!     write_file(path, b"1")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`write_file`] never creates or truncates. It owns its descriptor through a
//! [`ScopedDescriptor`] and closes it explicitly, returning a close error in preference to a
//! write error.
//!
//! # Errors
//!
//! Every operation returns [`Result`]. [`Error`] separates empty arguments, platform errors and
//! short transfers, and [`Error::errno`] recovers the traditional error number.
//!
//! # Features
//!
//! * `logs` emits `tracing` events on short transfers and platform errors.
//! * `test-util` exports the `testing` module with a scripted fake descriptor.

pub use crate::descriptor::{Close, Descriptor, ScopedDescriptor};
pub use crate::error::{Error, Result};
pub use crate::metadata::{get_size, is_present};
pub use crate::transfer::{read_exact, write_all, write_once};
pub use crate::write_file::{write_and_close, write_file};

mod descriptor;
mod error;
mod metadata;
mod telemetry;
mod transfer;
mod write_file;

#[cfg(any(test, feature = "test-util"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-util")))]
pub mod testing;
