//! Big-endian field readers shared by the header and filter codecs.
//!
//! Every reader maps a short read to [`Error::TruncatedInput`] so callers see
//! the same error whether they decode from a slice or from a stream.

use crate::error::{Error, Result};
use std::io::{self, Read};

/// Fill `buf` completely or fail with `TruncatedInput` naming `what`.
pub(crate) fn read_exact<R: Read>(reader: &mut R, buf: &mut [u8], what: &str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            Error::truncated(format!("input ended while reading {} ({} bytes)", what, buf.len()))
        }
        _ => Error::Io(e),
    })
}

pub(crate) fn read_u8<R: Read>(reader: &mut R, what: &str) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_exact(reader, &mut buf, what)?;
    Ok(buf[0])
}

pub(crate) fn read_i32<R: Read>(reader: &mut R, what: &str) -> Result<i32> {
    let mut buf = [0u8; 4];
    read_exact(reader, &mut buf, what)?;
    Ok(i32::from_be_bytes(buf))
}

pub(crate) fn read_u64<R: Read>(reader: &mut R, what: &str) -> Result<u64> {
    let mut buf = [0u8; 8];
    read_exact(reader, &mut buf, what)?;
    Ok(u64::from_be_bytes(buf))
}
