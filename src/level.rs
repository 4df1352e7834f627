////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::data::control::WINDOW_SIZE;

/// Match-finder effort level, 1 through 9.
///
/// The level bounds how many hash-chain candidates the match finder visits
/// per position: `1 << level` for levels below 8, the full window for 8 and
/// above. Level 9 additionally enables a two-byte lazy lookahead that
/// rejects a match when a longer one starts one or two positions later.
///
/// Higher levels trade compression speed for ratio; decompression speed is
/// unaffected by the level the data was compressed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    /// Cheapest search: two chain candidates per position.
    pub const FASTEST: Self = Self(1);
    /// Balanced speed and ratio.
    pub const DEFAULT: Self = Self(4);
    /// Unbounded chain walk plus lazy matching.
    pub const BEST: Self = Self(9);

    /// Create a level from a raw number, clamping out-of-range requests
    /// into `1..=9`.
    #[must_use]
    pub fn new(level: u8) -> Self {
        Self(level.clamp(1, 9))
    }

    /// The raw level number.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Upper bound on chain candidates visited per search.
    pub(crate) fn max_chain(self) -> i32 {
        if self.0 < 8 {
            1 << self.0
        } else {
            WINDOW_SIZE
        }
    }

    /// Whether the two-byte lazy lookahead runs after each found match.
    pub(crate) fn is_lazy(self) -> bool {
        self.0 == 9
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn out_of_range_levels_clamp() {
        assert_eq!(CompressionLevel::new(0), CompressionLevel::FASTEST);
        assert_eq!(CompressionLevel::new(200), CompressionLevel::BEST);
        assert_eq!(CompressionLevel::new(4), CompressionLevel::DEFAULT);
    }

    #[test]
    fn chain_budget_doubles_until_unbounded() {
        assert_eq!(CompressionLevel::new(1).max_chain(), 2);
        assert_eq!(CompressionLevel::new(7).max_chain(), 128);
        assert_eq!(CompressionLevel::new(8).max_chain(), WINDOW_SIZE);
        assert_eq!(CompressionLevel::new(9).max_chain(), WINDOW_SIZE);
    }

    #[test]
    fn only_the_top_level_is_lazy() {
        assert!(CompressionLevel::BEST.is_lazy());
        assert!(!CompressionLevel::new(8).is_lazy());
        assert!(!CompressionLevel::DEFAULT.is_lazy());
    }
}
