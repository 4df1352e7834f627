////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Everything relating to the compressed data block itself: the token wire
//! format, the compression algorithm, and the decoder.

pub mod compression;
pub mod control;
pub mod decompression;
