//! Inflating deflate-compressed data.

use crate::error::{Error, Result};
use flate2::read::{DeflateDecoder, ZlibDecoder};
use std::io::Read;

/// Inflates zlib-wrapped deflate data.
///
/// Some writers omit the zlib header, so if the data is not a valid zlib stream, it is
/// inflated as a raw deflate stream instead. The error of the zlib attempt is reported if both
/// fail.
pub(crate) fn inflate(data: &[u8]) -> Result<Vec<u8>> {
    zlib(data)
        .or_else(|err| {
            ldebug!("zlib inflate failed ({}), retrying as raw deflate", err);
            deflate(data).map_err(|_| err)
        })
        .map_err(Error::Inflate)
}

fn zlib(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoded = vec![];
    ZlibDecoder::new(data).read_to_end(&mut decoded)?;

    Ok(decoded)
}

fn deflate(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoded = vec![];
    DeflateDecoder::new(data).read_to_end(&mut decoded)?;

    Ok(decoded)
}
