////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! A rust crate for ultra-fast LZ77 compression and decompression of
//! in-memory byte buffers.
//!
//! The format is a single self-delimiting block: a stream of tokens, each
//! packing a literal-run length, a match length, and one distance bit into
//! a single control byte, followed by the literals and a two-byte match
//! distance. Matches are found through hash chains over 4-byte prefixes
//! inside a 128 KiB sliding window, with the search effort tuned by a
//! [CompressionLevel] from 1 to 9. There is no header, checksum, or
//! entropy-coding stage; callers that need framing layer it on top.
//!
//! # Usage
//!
//! `turbolz` exposes two core functions, `compress` and `decompress`,
//! plus a reusable [Compressor] that keeps its match-finder tables warm
//! across calls and `_stream` wrappers over `std::io` readers and writers.
//!
//! The format does not record the decompressed size, so `decompress`
//! takes it as a parameter; transmitting it is the caller's concern.
//!
//! ### Example
//!
//! ```rust
//! use turbolz::{compress, decompress, CompressionLevel};
//!
//! let data = b"an unremarkable sentence, repeated: an unremarkable sentence";
//! let packed = compress(data, CompressionLevel::DEFAULT);
//! let unpacked = decompress(&packed, data.len()).unwrap();
//! assert_eq!(&unpacked, data);
//! ```

#![warn(clippy::pedantic, clippy::cargo)]
// Due to the high amount of byte conversions, sometimes intentional lossy conversions are necessary.
#![allow(clippy::cast_possible_truncation)]
// the sign loss in window arithmetic is checked by the chain walk bounds
#![allow(clippy::cast_sign_loss)]
// too many lines is a dumb metric
#![allow(clippy::too_many_lines)]

pub mod data;
mod error;
mod level;

use std::io::{Read, Write};

pub use crate::data::compression::Compressor;
use crate::data::control::EXCESS;
pub use crate::data::decompression::decompress_into;
pub use crate::error::{Error, Result};
pub use crate::level::CompressionLevel;

/// Worst-case compressed size for `len` input bytes.
///
/// Incompressible data costs one token header per 255-ish literals plus a
/// fixed amount of slack, so an output buffer of this size always fits.
#[must_use]
pub const fn compress_bound(len: usize) -> usize {
    len + len / 255 + EXCESS
}

/// Compress `input` into a freshly allocated vector.
///
/// Convenience wrapper that builds a throwaway [Compressor]; when
/// compressing many buffers, hold on to one instead, since filling its
/// tables dominates the cost on small inputs.
#[must_use]
pub fn compress(input: &[u8], level: CompressionLevel) -> Vec<u8> {
    Compressor::new().compress(input, level)
}

/// Decompress `input`, expecting exactly `decompressed_size` bytes of
/// output capacity.
///
/// Returns the decompressed bytes, which may be fewer than
/// `decompressed_size` when a truncated-but-parseable stream is given.
///
/// # Errors
/// Any of the malformed-input conditions documented on
/// [decompress_into]: a truncated token, an overrunning length, or an
/// out-of-range distance.
pub fn decompress(input: &[u8], decompressed_size: usize) -> Result<Vec<u8>> {
    let mut output = vec![0_u8; decompressed_size];
    let written = decompress_into(input, &mut output)?;
    output.truncate(written);
    Ok(output)
}

/// Compress `length` bytes from a reader into a writer.
///
/// Returns the number of compressed bytes written.
///
/// # Errors
/// - [Error::Io]: reading `length` bytes or writing the result failed
pub fn compress_stream(
    length: usize,
    reader: &mut impl Read,
    writer: &mut impl Write,
    level: CompressionLevel,
) -> Result<usize> {
    let mut in_buffer = vec![0_u8; length];
    reader.read_exact(&mut in_buffer)?;

    let out_buffer = compress(&in_buffer, level);
    writer.write_all(&out_buffer)?;
    writer.flush()?;
    Ok(out_buffer.len())
}

/// Decompress everything a reader yields into a writer, expecting
/// `decompressed_size` bytes of output.
///
/// Returns the number of decompressed bytes written.
///
/// # Errors
/// - [Error::Io]: reading the stream or writing the result failed
/// - any malformed-input condition documented on [decompress_into]
pub fn decompress_stream(
    decompressed_size: usize,
    reader: &mut impl Read,
    writer: &mut impl Write,
) -> Result<usize> {
    let mut in_buffer = vec![];
    reader.read_to_end(&mut in_buffer)?;

    let out_buffer = decompress(&in_buffer, decompressed_size)?;
    writer.write_all(&out_buffer)?;
    writer.flush()?;
    Ok(out_buffer.len())
}
