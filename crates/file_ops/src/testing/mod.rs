// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Utilities for testing code that uses `file_ops` operations.

mod fake_descriptor;

pub use fake_descriptor::*;
