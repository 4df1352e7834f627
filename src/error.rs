////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use onlyerror::Error;

/// Possible errors returned by decompression and the stream helpers.
///
/// Compression itself cannot fail: every byte sequence is valid input and
/// the output buffer is grown as needed. Decompression is the trust
/// boundary and rejects any stream that would read or write out of bounds.
#[derive(Error, Debug)]
pub enum Error {
    /// Error indicating that a copy token carried a distance of 0. The
    /// compressor never emits one, so the data is corrupted or malformed.
    #[error("Match distance is 0 in copy token")]
    BadDistance,
    /// Error indicating that a copy token's distance reaches before the
    /// start of the output produced so far.
    ///
    /// ### Fields
    /// - usize: bytes written so far
    /// - usize: distance requested
    #[error("Match distance went past start of output: written `{0}`, distance `{1}`")]
    NegativePosition(usize, usize),
    /// Error indicating that a literal run or match copy would write past
    /// the end of the output buffer.
    ///
    /// This error exists to prevent maliciously constructed data from
    /// using an unbounded amount of memory.
    ///
    /// ### Fields
    /// - usize: amount of bytes attempted to write past the end
    #[error("Decompressed data would overrun the output capacity by `{0}` bytes")]
    BadLength(usize),
    /// Error indicating that a token declared more bytes than remain in
    /// the compressed input, or that the stream ended in the middle of a
    /// varint or distance field.
    ///
    /// ### Fields
    /// - usize: bytes needed
    /// - usize: bytes remaining
    #[error("Compressed stream is truncated: needed `{0}` more bytes, `{1}` remain")]
    Truncated(usize, usize),
    /// Generic IO Error wrapper for when a generic IO error of some sort
    /// occurs in relation to the stream helpers' readers and writers.
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
}

/// Wrapper for Result specified to [Error](crate::Error)
pub type Result<T> = std::result::Result<T, Error>;
