// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::Path;

use crate::telemetry;
use crate::{Error, Result};

/// Rejects the empty path, which stands in for an absent path argument.
pub(crate) fn require_path(path: &Path) -> Result<&Path> {
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("path is empty"));
    }
    Ok(path)
}

/// Returns the size of the file at `path`, in bytes.
///
/// Symbolic links are followed: the size reported is that of the link target.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `path` is empty.
/// * [`Error::Io`] carrying the platform error if the status query fails, e.g. `ENOENT` when the
///   path does not resolve or `EACCES` when a directory on the way is not searchable.
pub fn get_size(path: impl AsRef<Path>) -> Result<u64> {
    let path = require_path(path.as_ref())?;

    match std::fs::metadata(path) {
        Ok(metadata) => Ok(metadata.len()),
        Err(e) => {
            telemetry::os_error("get_size", &e);
            Err(e.into())
        }
    }
}

/// Reports whether anything exists at `path`.
///
/// The answer is `true` exactly when a status query on the path succeeds, which is also exactly
/// when [`get_size`] succeeds. A dangling symbolic link, or a path whose status cannot be queried
/// for lack of permission, reports `false`.
///
/// # Errors
///
/// * [`Error::InvalidArgument`] if `path` is empty. No other failure is reported; a failed status
///   query is the `false` answer.
pub fn is_present(path: impl AsRef<Path>) -> Result<bool> {
    let path = require_path(path.as_ref())?;
    Ok(std::fs::metadata(path).is_ok())
}
