////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Token wire format shared by the compressor and decompressor.
//!
//! A compressed stream is a sequence of tokens. Every token starts with one
//! control byte (the *tag*) that packs three fields:
//!
//! ## Key for layout
//! - `R`: literal run code
//! - `D`: high bit (bit 16) of the match distance
//! - `L`: match length code
//!
//! ## Token
//! - Layout: `RRRD-LLLL`
//! - Run code range: 0-7; 7 means `7 + varint` further literals
//! - Length code range: 0-15, biased by [`MIN_MATCH`]; 15 means
//!   `15 + varint` further bytes
//!
//! On the wire, in order: the tag; the run varint when the run code is 7;
//! the literal bytes verbatim; the length varint when the length code is
//! 15; two little-endian bytes holding the low 16 bits of the distance.
//! A stream may end with a literals-only token that simply omits the match
//! fields; the decoder recognizes it by running out of input right after
//! the literal copy, not by any in-band marker.
//!
//! Varints use the biased base-128 "Mod" form: every continuation byte has
//! its high bit set and the decoder *adds* (never ORs) each byte shifted
//! by 7 more bits, so the continuation bit itself contributes to the
//! value. Encoding `x` therefore subtracts 128 before each shift.

use crate::error::{Error, Result};

/// Padding the worst-case output bound reserves past the input length.
pub const EXCESS: usize = 16;

/// Back-reference window size exponent.
pub const WINDOW_BITS: i32 = 17;
/// Maximum match distance.
pub const WINDOW_SIZE: i32 = 1 << WINDOW_BITS;
/// Mask for a position's circular chain slot.
pub const WINDOW_MASK: i32 = WINDOW_SIZE - 1;

/// Shortest match worth encoding; the length code is biased by this.
pub const MIN_MATCH: usize = 4;

/// Hash table size exponent.
pub const HASH_BITS: u32 = 18;
/// Number of hash buckets.
pub const HASH_SIZE: usize = 1 << HASH_BITS;

/// Sentinel for "no prior position" in the chain tables.
pub const NIL: i32 = -1;

/// Bit position of the run code within the tag.
pub const RUN_SHIFT: u32 = 5;
/// Largest run count the tag encodes directly; 7 marks a varint follow-up.
pub const RUN_CODE_MAX: usize = 7;
/// Largest length code the tag encodes directly; 15 marks a varint follow-up.
pub const LEN_CODE_MAX: usize = 15;
/// Tag bit carrying bit 16 of the 17-bit match distance.
pub const TAG_DIST_BIT: u8 = 0b0001_0000;
/// Tags at or above this value carry a literal run before any match.
pub const TAG_HAS_RUN: u8 = 1 << RUN_SHIFT;

/// Append `x` to `out` in the biased base-128 form.
pub fn encode_mod(out: &mut Vec<u8>, mut x: u32) {
    while x >= 128 {
        x -= 128;
        out.push(128 + (x & 127) as u8);
        x >>= 7;
    }
    out.push(x as u8);
}

/// Decode a biased base-128 varint from `input` starting at `*pos`,
/// advancing `*pos` past it.
///
/// Reads at most 5 bytes; the addition wraps like the 32-bit arithmetic
/// the format is defined in, so an overlong malformed varint decodes to
/// *some* value and the caller's bounds checks reject it downstream.
///
/// # Errors
/// - [Error::Truncated]: the input ended before a final byte (< 128) was
///   seen
pub fn decode_mod(input: &[u8], pos: &mut usize) -> Result<u32> {
    let mut x: u32 = 0;
    for shift in (0..=28).step_by(7) {
        let Some(&c) = input.get(*pos) else {
            return Err(Error::Truncated(1, 0));
        };
        *pos += 1;
        x = x.wrapping_add(u32::from(c) << shift);
        if c < 128 {
            break;
        }
    }
    Ok(x)
}
