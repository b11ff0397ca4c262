/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use super::Color;

/// Represents a single square on a `9x9` shogi board.
///
/// Squares are addressed the traditional way: by file `[1, 9]`, counted from right to left
/// as seen by Black, and by rank `[1, 9]`, counted from top to bottom. Rank 1 is White's back rank.
///
/// Internally the square is stored as `(rank - 1) * 9 + (file - 1)`:
/// ```text
///    9  8  7  6  5  4  3  2  1
/// | 8  7  6  5  4  3  2  1  0 | 1
/// |17 16 15 14 13 12 11 10  9 | 2
/// |26 25 24 23 22 21 20 19 18 | 3
/// |         ...               | .
/// |80 79 78 77 76 75 74 73 72 | 9
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(u8);

impl Square {
    /// Number of files (and of ranks) on the board.
    pub const SIZE: u8 = 9;

    /// Number of squares on the board.
    pub const COUNT: usize = 81;

    /// Depth, in ranks, of each side's promotion zone.
    pub const PROMOTION_RANKS: u8 = 3;

    /// Creates a new [`Square`] from the provided file and rank.
    ///
    /// # Panics
    /// If `file` or `rank` is outside of `[1, 9]`. Use [`Square::try_new`] for unchecked input.
    ///
    /// # Example
    /// ```
    /// # use tsume::Square;
    /// let sq = Square::new(2, 3);
    /// assert_eq!(sq.file(), 2);
    /// assert_eq!(sq.rank(), 3);
    /// assert_eq!(sq.to_string(), "23");
    /// ```
    #[inline(always)]
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file >= 1 && file <= Self::SIZE, "File must be between [1,9]");
        assert!(rank >= 1 && rank <= Self::SIZE, "Rank must be between [1,9]");
        Self((rank - 1) * Self::SIZE + (file - 1))
    }

    /// Creates a new [`Square`] from signed coordinates, returning `None` if they fall off the board.
    ///
    /// # Example
    /// ```
    /// # use tsume::Square;
    /// assert_eq!(Square::try_new(1, 9), Some(Square::new(1, 9)));
    /// assert_eq!(Square::try_new(0, 5), None);
    /// assert_eq!(Square::try_new(5, 10), None);
    /// ```
    #[inline(always)]
    pub const fn try_new(file: i8, rank: i8) -> Option<Self> {
        if file < 1 || file > Self::SIZE as i8 || rank < 1 || rank > Self::SIZE as i8 {
            None
        } else {
            Some(Self::new(file as u8, rank as u8))
        }
    }

    /// Creates a [`Square`] from its index in `[0, 81)`.
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!(
                "Invalid index for Square: Must be between [0, {}). Got {index}",
                Self::COUNT
            );
        }
        Ok(Self(index as u8))
    }

    /// Returns an iterator over all squares, in index order.
    ///
    /// # Example
    /// ```
    /// # use tsume::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 81);
    /// assert_eq!(iter.next().unwrap(), Square::new(1, 1));
    /// assert_eq!(iter.last().unwrap(), Square::new(9, 9));
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT as u8).map(Self)
    }

    /// The file of this square, in `[1, 9]`.
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.0 % Self::SIZE + 1
    }

    /// The rank of this square, in `[1, 9]`.
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.0 / Self::SIZE + 1
    }

    /// Returns this square as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the square `df` files and `dr` ranks away from this one, if it is on the board.
    ///
    /// # Example
    /// ```
    /// # use tsume::Square;
    /// let sq = Square::new(1, 1);
    /// assert_eq!(sq.offset(1, 1), Some(Square::new(2, 2)));
    /// assert_eq!(sq.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        Self::try_new(self.file() as i8 + df, self.rank() as i8 + dr)
    }

    /// Returns the `(file, rank)` difference from `other` to `self`.
    #[inline(always)]
    pub const fn delta(&self, other: Self) -> (i8, i8) {
        (
            self.file() as i8 - other.file() as i8,
            self.rank() as i8 - other.rank() as i8,
        )
    }

    /// How many ranks this square is from the far edge, as seen by `color`.
    ///
    /// The rank a piece of `color` promotes on first is `1`; its own back rank is `9`.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Square};
    /// assert_eq!(Square::new(5, 1).ranks_from_far_edge(Color::Black), 1);
    /// assert_eq!(Square::new(5, 1).ranks_from_far_edge(Color::White), 9);
    /// ```
    #[inline(always)]
    pub const fn ranks_from_far_edge(&self, color: Color) -> u8 {
        match color {
            Color::Black => self.rank(),
            Color::White => Self::SIZE + 1 - self.rank(),
        }
    }

    /// Returns `true` if this square lies in the promotion zone of `color`.
    #[inline(always)]
    pub const fn is_promotion_zone(&self, color: Color) -> bool {
        self.ranks_from_far_edge(color) <= Self::PROMOTION_RANKS
    }

    /// Parses a [`Square`] from two digits, `<file><rank>`, as used in CSA notation.
    ///
    /// # Example
    /// ```
    /// # use tsume::Square;
    /// assert_eq!(Square::from_csa("23").unwrap(), Square::new(2, 3));
    /// assert!(Square::from_csa("00").is_err());
    /// ```
    pub fn from_csa(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Square must be exactly two digits. Got {s:?}");
        };

        let file = file
            .to_digit(10)
            .context(format!("Invalid file in square {s:?}"))?;
        let rank = rank
            .to_digit(10)
            .context(format!("Invalid rank in square {s:?}"))?;

        Self::try_new(file as i8, rank as i8).context(format!("Square {s:?} is off the board"))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_csa(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}
