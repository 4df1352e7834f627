////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Bounds-checked token decoder.
//!
//! The decoder is the trust boundary of the crate: the stream may come
//! from anywhere, so every declared length and distance is validated
//! against the cursors before a single byte moves. The encoder, by
//! contrast, trusts its own arithmetic and performs no such checks.

use byteorder::{ByteOrder, LittleEndian};

use crate::data::control::{
    decode_mod,
    LEN_CODE_MAX,
    MIN_MATCH,
    RUN_CODE_MAX,
    RUN_SHIFT,
    TAG_DIST_BIT,
    TAG_HAS_RUN,
};
use crate::error::{Error, Result};

/// Reproduce one match by copying `length` bytes starting `distance` back
/// from `position` in the decoded output.
///
/// A distance shorter than the length means the match consumes bytes it
/// is itself producing. Distances of 1 to 3 are copied a byte at a time,
/// which extends such runs exactly as the encoder saw them; wider
/// overlaps move distance-sized blocks instead, each fully decoded
/// before the next one reads it, and a match with no overlap at all is
/// a single block move.
///
/// If this function errors no data will have been copied.
///
/// # Errors
/// - [Error::BadDistance]: `distance` is 0
/// - [Error::NegativePosition]: `distance` > `position`
/// - [Error::BadLength]: the copy would run past the end of `output`
///
/// # Returns
/// the output position after the copied match
fn copy_match(
    output: &mut [u8],
    position: usize,
    distance: usize,
    length: usize,
) -> Result<usize> {
    if distance == 0 {
        return Err(Error::BadDistance);
    }
    if distance > position {
        return Err(Error::NegativePosition(position, distance));
    }
    let end = position + length;
    if end > output.len() {
        return Err(Error::BadLength(end - output.len()));
    }

    if distance >= length {
        let source = position - distance;
        output.copy_within(source..source + length, position);
    } else if distance >= 4 {
        let mut block = position;
        while block + distance < end {
            output.copy_within(block - distance..block, block);
            block += distance;
        }
        output.copy_within(block - distance..block - distance + (end - block), block);
    } else if distance == 1 {
        let byte = output[position - 1];
        output[position..end].fill(byte);
    } else {
        for cursor in position..end {
            output[cursor] = output[cursor - distance];
        }
    }

    Ok(end)
}

/// Decompress `input` into `output`, returning the number of bytes
/// written.
///
/// `output` must be at least as large as the original data; the function
/// never writes past it and never reads past `input`. On error the
/// contents of `output` are unspecified.
///
/// # Errors
/// - [Error::Truncated]: a token declares more literal bytes than remain,
///   or the stream ends inside a varint or distance field
/// - [Error::BadLength]: a literal run or match would overrun `output`
/// - [Error::BadDistance]: a copy token carries distance 0
/// - [Error::NegativePosition]: a distance reaches before the start of
///   the output
pub fn decompress_into(input: &[u8], output: &mut [u8]) -> Result<usize> {
    let mut ip = 0_usize;
    let mut op = 0_usize;

    while ip < input.len() {
        let tag = input[ip];
        ip += 1;

        if tag >= TAG_HAS_RUN {
            let mut run = (tag >> RUN_SHIFT) as usize;
            if run == RUN_CODE_MAX {
                run += decode_mod(input, &mut ip)? as usize;
            }

            if output.len() - op < run {
                return Err(Error::BadLength(run - (output.len() - op)));
            }
            if input.len() - ip < run {
                return Err(Error::Truncated(run, input.len() - ip));
            }

            output[op..op + run].copy_from_slice(&input[ip..ip + run]);
            op += run;
            ip += run;

            // a literals-only token ends the stream with no match fields
            if ip >= input.len() {
                break;
            }
        }

        let mut len = (tag & LEN_CODE_MAX as u8) as usize + MIN_MATCH;
        if len == LEN_CODE_MAX + MIN_MATCH {
            len += decode_mod(input, &mut ip)? as usize;
        }

        if input.len() - ip < 2 {
            return Err(Error::Truncated(2, input.len() - ip));
        }
        let dist = usize::from(tag & TAG_DIST_BIT) << 12
            | usize::from(LittleEndian::read_u16(&input[ip..]));
        ip += 2;

        op = copy_match(output, op, dist, len)?;
    }

    Ok(op)
}

#[cfg(test)]
mod test {
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::{compress, CompressionLevel};

    fn round_trip(input: &[u8]) -> Vec<u8> {
        let compressed = compress(input, CompressionLevel::DEFAULT);
        let mut output = vec![0_u8; input.len()];
        let written = decompress_into(&compressed, &mut output).unwrap();
        output.truncate(written);
        output
    }

    #[test]
    fn empty_stream_decodes_to_nothing() {
        assert_eq!(decompress_into(b"", &mut [0_u8; 0]).unwrap(), 0);
    }

    #[test]
    fn alternating_pair_exercises_short_distances() {
        assert_eq!(round_trip(b"ABABABABAB"), b"ABABABABAB");
    }

    #[test]
    fn distance_four_boundary_round_trips() {
        assert_eq!(round_trip(b"ABCDABCDABCDABCD"), b"ABCDABCDABCDABCD");
    }

    #[test]
    fn undersized_output_is_rejected() {
        let compressed = compress(b"ABCDABCDABCDABCD", CompressionLevel::DEFAULT);
        let mut output = [0_u8; 10];
        let error = decompress_into(&compressed, &mut output).unwrap_err();
        assert!(matches!(error, Error::BadLength(_)));
    }

    #[test]
    fn zero_distance_is_rejected() {
        // tag 0x00: no run, minimum length, then distance bytes 0x0000
        let error = decompress_into(&[0x00, 0x00, 0x00], &mut [0_u8; 16]).unwrap_err();
        assert!(matches!(error, Error::BadDistance));
    }

    #[test]
    fn distance_past_output_start_is_rejected() {
        // minimum-length match at distance 5 with nothing written yet
        let error = decompress_into(&[0x00, 0x05, 0x00], &mut [0_u8; 16]).unwrap_err();
        assert!(matches!(error, Error::NegativePosition(0, 5)));
    }

    #[test]
    fn literal_run_longer_than_input_is_rejected() {
        // tag declares 3 literals but only one byte follows
        let error = decompress_into(&[3 << 5, b'A'], &mut [0_u8; 16]).unwrap_err();
        assert!(matches!(error, Error::Truncated(3, 1)));
    }

    #[test]
    fn missing_distance_bytes_are_rejected() {
        // literal run of one, then a match tag with a single trailing byte
        let error = decompress_into(&[(1 << 5) + 1, b'A', 0x01], &mut [0_u8; 16]).unwrap_err();
        assert!(matches!(error, Error::Truncated(2, 1)));
    }

    #[proptest]
    fn truncated_streams_never_misbehave(
        #[strategy(proptest::collection::vec(any::<u8>(), 0..2_000))] input: Vec<u8>,
        #[strategy(1..=9_u8)] level: u8,
        cut_seed: usize,
    ) {
        let compressed = compress(&input, CompressionLevel::new(level));
        let cut = if compressed.is_empty() {
            0
        } else {
            cut_seed % compressed.len()
        };

        let mut output = vec![0_u8; input.len()];
        if let Ok(written) = decompress_into(&compressed[..cut], &mut output) {
            // a cleanly parsing prefix must reproduce a prefix
            prop_assert_eq!(&output[..written], &input[..written]);
        }
    }

    #[proptest]
    fn corrupted_streams_never_panic(
        #[strategy(proptest::collection::vec(any::<u8>(), 0..500))] garbage: Vec<u8>,
        #[strategy(0..1_000_usize)] capacity: usize,
    ) {
        let mut output = vec![0_u8; capacity];
        let _ = decompress_into(&garbage, &mut output);
    }

    mod copy_match {
        use super::super::copy_match;
        use crate::Error;

        #[test]
        fn errors_on_zero_distance() {
            let error = copy_match(&mut [0], 0, 0, 1).unwrap_err();
            assert!(matches!(error, Error::BadDistance));
        }

        #[test]
        fn errors_on_distance_past_start() {
            let error = copy_match(&mut [0], 0, 1, 1).unwrap_err();
            assert_eq!(
                error.to_string(),
                "Match distance went past start of output: written `0`, distance `1`"
            );
        }

        #[test]
        fn errors_on_output_overrun() {
            let error = copy_match(&mut [0, 0], 1, 1, 10).unwrap_err();
            assert_eq!(
                error.to_string(),
                "Decompressed data would overrun the output capacity by `9` bytes"
            );
        }

        #[test]
        fn distance_one_fills_a_run() {
            let mut output = [b'A', 0, 0, 0, 0];
            let position = copy_match(&mut output, 1, 1, 4).unwrap();
            assert_eq!(position, 5);
            assert_eq!(&output, b"AAAAA");
        }

        #[test]
        fn distance_three_extends_byte_by_byte() {
            let mut output = *b"ABC\0\0\0\0\0\0\0";
            let position = copy_match(&mut output, 3, 3, 7).unwrap();
            assert_eq!(position, 10);
            assert_eq!(&output, b"ABCABCABCA");
        }

        #[test]
        fn overlapping_block_distance_extends_in_strides() {
            let mut output = *b"ABCD\0\0\0\0\0\0";
            let position = copy_match(&mut output, 4, 4, 6).unwrap();
            assert_eq!(position, 10);
            assert_eq!(&output, b"ABCDABCDAB");
        }

        #[test]
        fn non_overlapping_match_is_one_move() {
            let mut output = *b"ABCD\0\0";
            let position = copy_match(&mut output, 4, 4, 2).unwrap();
            assert_eq!(position, 6);
            assert_eq!(&output, b"ABCDAB");
        }
    }
}
