// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Log events emitted when the `logs` feature is enabled.
//!
//! No subscriber is installed here. Without the feature the functions compile to nothing.

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn short_transfer(operation: &'static str, transferred: usize, requested: usize) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "file_ops.short_transfer",
        tracing::Level::WARN,
        file_ops.operation = operation,
        file_ops.transferred = transferred,
        file_ops.requested = requested,
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn os_error(operation: &'static str, error: &std::io::Error) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "file_ops.os_error",
        tracing::Level::DEBUG,
        file_ops.operation = operation,
        file_ops.error = %error,
    );
}

#[cfg_attr(
    not(any(feature = "logs", test)),
    expect(unused_variables, reason = "unused when logs feature not used")
)]
pub(crate) fn close_error(error: &std::io::Error, masked_write_error: bool) {
    #[cfg(any(feature = "logs", test))]
    tracing::event!(
        name: "file_ops.close_error",
        tracing::Level::WARN,
        file_ops.error = %error,
        file_ops.masked_write_error = masked_write_error,
    );
}

#[cfg(test)]
mod tests {
    use testing_aids::LogCapture;

    use super::*;

    const OPERATION: &str = "file_ops.operation";
    const TRANSFERRED: &str = "file_ops.transferred";
    const REQUESTED: &str = "file_ops.requested";

    #[test]
    fn short_transfer_carries_counts() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        short_transfer("write_once", 3, 10);

        capture.assert_contains("WARN");
        capture.assert_contains(OPERATION);
        capture.assert_contains("write_once");
        capture.assert_contains(&format!("{TRANSFERRED}=3"));
        capture.assert_contains(&format!("{REQUESTED}=10"));
    }

    #[test]
    fn os_error_is_debug_level() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        os_error("get_size", &std::io::Error::from_raw_os_error(libc::ENOENT));

        capture.assert_contains("DEBUG");
        capture.assert_contains("get_size");
    }

    #[test]
    fn close_error_reports_masking() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        close_error(&std::io::Error::from_raw_os_error(libc::EIO), true);

        capture.assert_contains("file_ops.masked_write_error=true");
    }
}
