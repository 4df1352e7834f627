////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Single-pass LZ77 compression over hash chains.
//!
//! The encoder walks the input once, asking the match finder for the best
//! back-reference at each position. Literals accumulate into a pending run
//! that is flushed into the next token; a token therefore carries "the
//! literals since the last match, then this match". A trailing run with no
//! match behind it becomes a literals-only final token.
//!
//! Two heuristics shape the output beyond the raw search:
//!
//! - a minimum-length match found while a long literal run is pending is
//!   dropped, because the flat 3-byte match encoding stops paying once
//!   the run varint is about to grow anyway;
//! - at level 9, a match is dropped when a strictly longer one starts one
//!   or two bytes later (lazy matching).

pub(crate) mod match_finder;

use std::cmp::min;

use crate::compress_bound;
use crate::data::compression::match_finder::HashChain;
use crate::data::control::{
    encode_mod,
    LEN_CODE_MAX,
    MIN_MATCH,
    RUN_CODE_MAX,
    RUN_SHIFT,
    TAG_DIST_BIT,
};
use crate::level::CompressionLevel;

/// Pending-run length at which the run varint starts growing; a
/// minimum-length match no longer beats just extending the run.
const LONG_RUN: usize = RUN_CODE_MAX + 128;

/// Emit one token header carrying the pending literal run plus the match
/// half of the tag (`0` for the literals-only final token), then the
/// literal bytes themselves.
fn flush_run(out: &mut Vec<u8>, literals: &[u8], tag: u8) {
    let run = literals.len();
    if run >= RUN_CODE_MAX {
        out.push(((RUN_CODE_MAX as u8) << RUN_SHIFT) + tag);
        encode_mod(out, (run - RUN_CODE_MAX) as u32);
    } else {
        out.push(((run as u8) << RUN_SHIFT) + tag);
    }
    out.extend_from_slice(literals);
}

/// A reusable compressor.
///
/// Owns the match-finder tables (about 1.5 MiB); constructing one per call
/// works but re-filling the tables dominates the cost of compressing small
/// inputs, so hold on to an instance when compressing many buffers.
pub struct Compressor {
    chain: HashChain,
}

impl Compressor {
    #[must_use]
    pub fn new() -> Self {
        Self {
            chain: HashChain::new(),
        }
    }

    /// Compress `input` at `level` into a freshly allocated vector.
    ///
    /// Never fails; an empty input yields an empty vector. The result is
    /// byte-identical for identical `(input, level)` pairs.
    #[must_use]
    pub fn compress(&mut self, input: &[u8], level: CompressionLevel) -> Vec<u8> {
        let mut out = Vec::with_capacity(compress_bound(input.len()));
        self.chain.reset();

        let max_chain = level.max_chain();
        let mut run = 0_usize;
        let mut p = 0_usize;

        while p < input.len() {
            let mut best = self.chain.find_best(input, p, max_chain);

            if let Some(found) = best {
                if found.len == MIN_MATCH && run >= LONG_RUN {
                    best = None;
                }
            }

            if level.is_lazy() {
                if let Some(found) = best {
                    if found.len < input.len() - p {
                        for i in 1..=2 {
                            let target_len = found.len + i;
                            let probe_at = p + i;
                            // a match longer than the remaining input
                            // cannot exist
                            if probe_at + target_len > input.len() {
                                break;
                            }
                            if self.chain.finds_length(
                                input,
                                probe_at,
                                target_len,
                                found.len,
                                max_chain,
                            ) {
                                best = None;
                                break;
                            }
                        }
                    }
                }
            }

            if let Some(found) = best {
                let len_code = min(found.len - MIN_MATCH, LEN_CODE_MAX);
                let tag = ((found.dist >> 12) as u8 & TAG_DIST_BIT) + len_code as u8;

                if run > 0 {
                    flush_run(&mut out, &input[p - run..p], tag);
                    run = 0;
                } else {
                    out.push(tag);
                }

                if found.len - MIN_MATCH >= LEN_CODE_MAX {
                    encode_mod(&mut out, (found.len - MIN_MATCH - LEN_CODE_MAX) as u32);
                }
                out.extend_from_slice(&(found.dist as u16).to_le_bytes());

                for pos in p..p + found.len {
                    self.chain.insert(input, pos);
                }
                p += found.len;
            } else {
                self.chain.insert(input, p);
                run += 1;
                p += 1;
            }
        }

        if run > 0 {
            flush_run(&mut out, &input[p - run..p], 0);
        }

        out
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}
