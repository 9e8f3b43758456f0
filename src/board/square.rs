/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Represents a single square on an `8x8` chess board.
///
/// A square is a `(rank, file)` pair of indices, each in `[0, 8)`. Rank 0 is
/// Black's back rank (printed as row "8" in human notation) and rank 7 is
/// White's, so the grid reads top-to-bottom the way a board is displayed:
///
/// ```text
/// 8| (0,0) (0,1) (0,2) (0,3) (0,4) (0,5) (0,6) (0,7)
/// 7| (1,0) (1,1) (1,2) (1,3) (1,4) (1,5) (1,6) (1,7)
///  |  ...
/// 2| (6,0) (6,1) (6,2) (6,3) (6,4) (6,5) (6,6) (6,7)
/// 1| (7,0) (7,1) (7,2) (7,3) (7,4) (7,5) (7,6) (7,7)
///  +------------------------------------------------
///     a     b     c     d     e     f     g     h
/// ```
///
/// Saved game records and the display grid both rely on this ordering, so it
/// must be preserved exactly for notation round-trips.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Square {
    rank: u8,
    file: u8,
}

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Width (and height) of the board, in squares.
    pub const SIZE: u8 = 8;

    /// Creates a new [`Square`] from the provided rank and file indices.
    ///
    /// Both indices must be in `[0, 8)` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Square;
    /// let e2 = Square::new(6, 4).unwrap();
    /// assert_eq!(e2.to_uci(), "e2");
    ///
    /// assert!(Square::new(8, 0).is_err());
    /// ```
    #[inline(always)]
    pub fn new(rank: u8, file: u8) -> Result<Self> {
        if rank >= Self::SIZE || file >= Self::SIZE {
            bail!("Square indices must be between [0,7]. Got rank {rank}, file {file}.");
        }
        Ok(Self::new_unchecked(rank, file))
    }

    /// Creates a new [`Square`], ignoring bounds checks.
    ///
    /// # Panics
    /// If either index is `8` or greater and debug assertions are enabled.
    #[inline(always)]
    pub(crate) const fn new_unchecked(rank: u8, file: u8) -> Self {
        debug_assert!(rank < Self::SIZE && file < Self::SIZE);
        Self { rank, file }
    }

    /// Returns this square's rank index, in `[0, 8)`, counting down from
    /// Black's back rank.
    #[inline(always)]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    /// Returns this square's file index, in `[0, 8)`, counting from file `a`.
    #[inline(always)]
    pub const fn file(&self) -> u8 {
        self.file
    }

    /// Returns an iterator over all 64 squares, in row-major order starting
    /// from `a8`.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Square;
    /// let mut iter = Square::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap().to_uci(), "a8");
    /// assert_eq!(iter.last().unwrap().to_uci(), "h1");
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT).map(|i| Self::new_unchecked(i as u8 / Self::SIZE, i as u8 % Self::SIZE))
    }

    /// Returns the square `ranks` and `files` away from this one, or [`None`]
    /// if that would land outside the board.
    ///
    /// Positive `ranks` move toward White's back rank (down the displayed
    /// board); positive `files` move toward file `h`.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Square;
    /// let e2: Square = "e2".parse().unwrap();
    /// assert_eq!(e2.offset(-2, 0).unwrap().to_uci(), "e4");
    /// assert!(e2.offset(3, 0).is_none());
    /// ```
    #[inline(always)]
    pub fn offset(self, ranks: i8, files: i8) -> Option<Self> {
        let rank = self.rank as i8 + ranks;
        let file = self.file as i8 + files;
        if (0..Self::SIZE as i8).contains(&rank) && (0..Self::SIZE as i8).contains(&file) {
            Some(Self::new_unchecked(rank as u8, file as u8))
        } else {
            None
        }
    }

    /// Creates a [`Square`] from a string, according to the coordinate
    /// convention used at the boundary with humans: file letters `a`-`h`
    /// left-to-right, rank digits `1`-`8` bottom-to-top.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Square;
    /// let a8 = Square::from_uci("a8").unwrap();
    /// assert_eq!((a8.rank(), a8.file()), (0, 0));
    ///
    /// let h1 = Square::from_uci("h1").unwrap();
    /// assert_eq!((h1.rank(), h1.file()), (7, 7));
    ///
    /// assert!(Square::from_uci("j9").is_err());
    /// ```
    pub fn from_uci(square: &str) -> Result<Self> {
        let mut chars = square.trim().chars();
        let (Some(file_char), Some(rank_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            bail!("Square notation must be a file letter followed by a rank digit. Got {square:?}");
        };

        let file = match file_char.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => bail!("File must be a letter between 'a' and 'h'. Got {file_char:?}"),
        };
        let rank = match rank_char {
            c @ '1'..='8' => Self::SIZE - (c as u8 - b'0'),
            _ => bail!("Rank must be a digit between '1' and '8'. Got {rank_char:?}"),
        };

        Ok(Self::new_unchecked(rank, file))
    }

    /// Converts this [`Square`] to a string, according to the same coordinate
    /// convention as [`Square::from_uci`].
    ///
    /// # Example
    /// ```
    /// # use woodpush::Square;
    /// assert_eq!(Square::new(6, 4).unwrap().to_uci(), "e2");
    /// ```
    #[inline(always)]
    pub fn to_uci(&self) -> String {
        format!("{}{}", (b'a' + self.file) as char, Self::SIZE - self.rank)
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self> {
        Self::from_uci(s)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.to_uci(), self.rank, self.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uci_parsing_maps_corners() {
        assert_eq!(Square::from_uci("a8").unwrap(), Square::new_unchecked(0, 0));
        assert_eq!(Square::from_uci("h8").unwrap(), Square::new_unchecked(0, 7));
        assert_eq!(Square::from_uci("a1").unwrap(), Square::new_unchecked(7, 0));
        assert_eq!(Square::from_uci("h1").unwrap(), Square::new_unchecked(7, 7));
    }

    #[test]
    fn uci_round_trips_every_square() {
        for square in Square::iter() {
            assert_eq!(Square::from_uci(&square.to_uci()).unwrap(), square);
        }
    }

    #[test]
    fn invalid_uci_is_rejected() {
        for bad in ["", "e", "e9", "i4", "e22", "4e"] {
            assert!(Square::from_uci(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn offsets_respect_board_edges() {
        let a8 = Square::from_uci("a8").unwrap();
        assert!(a8.offset(-1, 0).is_none());
        assert!(a8.offset(0, -1).is_none());
        assert_eq!(a8.offset(1, 1).unwrap().to_uci(), "b7");

        let h1 = Square::from_uci("h1").unwrap();
        assert!(h1.offset(1, 0).is_none());
        assert!(h1.offset(0, 1).is_none());
    }
}
