// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Reads a fixed-size header from one file and stamps it onto another.
//!
//! Demonstrates [`get_size`], [`is_present`], [`read_exact`] and [`write_file`], including the
//! errors they report when the source is too short or the target does not exist.

use std::fs::{self, File};

use file_ops::{Error, get_size, is_present, read_exact, write_file};

const HEADER_LEN: usize = 8;

fn main() -> Result<(), Error> {
    let tmp = tempfile::tempdir()?;
    let source = tmp.path().join("source.bin");
    let target = tmp.path().join("target.bin");

    fs::write(&source, b"HDR-0001 payload follows")?;
    fs::write(&target, b"........ existing body")?;

    println!("source: {} bytes", get_size(&source)?);

    let mut header = [0_u8; HEADER_LEN];
    read_exact(&mut File::open(&source)?, &mut header)?;
    write_file(&target, &header)?;
    println!("target now: {}", String::from_utf8_lossy(&fs::read(&target)?));

    // A source shorter than the header ends the stream early.
    fs::write(&source, b"HDR")?;
    match read_exact(&mut File::open(&source)?, &mut header) {
        Err(Error::ConnectionReset { transferred, requested }) => {
            println!("short source: got {transferred} of {requested} bytes");
        }
        other => println!("unexpected: {other:?}"),
    }

    // The target is never created.
    let missing = tmp.path().join("missing.bin");
    if let Err(e) = write_file(&missing, &header) {
        println!("missing target: {e} (errno {}), present: {}", e.errno(), is_present(&missing)?);
    }

    Ok(())
}
