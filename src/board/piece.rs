/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

/// Represents the color of a player or piece.
///
/// White traditionally moves first, and therefore [`Color`] defaults to
/// [`Color::White`].
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opposite / enemy.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Rank index of this color's back rank: 7 for White, 0 for Black.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Color;
    /// assert_eq!(Color::White.back_rank(), 7);
    /// assert_eq!(Color::Black.back_rank(), 0);
    /// ```
    #[inline(always)]
    pub const fn back_rank(&self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    /// The rank step this color's pawns advance by: `-1` for White (toward
    /// rank index 0), `+1` for Black.
    #[inline(always)]
    pub const fn pawn_direction(&self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use woodpush::Color;
    /// assert_eq!(Color::White.name(), "white");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Rook, Knight, Bishop, Queen, King]
    }

    /// Creates a [`PieceKind`] from its one-letter symbol (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use woodpush::PieceKind;
    /// assert_eq!(PieceKind::from_symbol('N').unwrap(), PieceKind::Knight);
    /// assert_eq!(PieceKind::from_symbol('q').unwrap(), PieceKind::Queen);
    /// assert!(PieceKind::from_symbol('x').is_err());
    /// ```
    pub fn from_symbol(symbol: char) -> Result<Self> {
        match symbol.to_ascii_uppercase() {
            'P' => Ok(Self::Pawn),
            'R' => Ok(Self::Rook),
            'N' => Ok(Self::Knight),
            'B' => Ok(Self::Bishop),
            'Q' => Ok(Self::Queen),
            'K' => Ok(Self::King),
            _ => bail!("Piece symbol must be one of P, R, N, B, Q, K. Got {symbol:?}"),
        }
    }

    /// This kind's one-letter symbol, uppercase.
    ///
    /// # Example
    /// ```
    /// # use woodpush::PieceKind;
    /// assert_eq!(PieceKind::Knight.symbol(), 'N');
    /// ```
    #[inline(always)]
    pub const fn symbol(&self) -> char {
        match self {
            Self::Pawn => 'P',
            Self::Rook => 'R',
            Self::Knight => 'N',
            Self::Bishop => 'B',
            Self::Queen => 'Q',
            Self::King => 'K',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Rook => "rook",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chess piece: a [`Color`], a [`PieceKind`], and the per-piece flags the
/// rules depend on.
///
/// Pieces carry no position; position is implied by where the board stores
/// them. `has_moved` is set the first time the piece is relocated by any move
/// (including being the rook in a castle) and never reset.
/// `en_passant_vulnerable` is meaningful only for pawns: it is held by at
/// most one pawn on the board at a time and survives exactly one half-move.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
    has_moved: bool,
    #[serde(default)]
    en_passant_vulnerable: bool,
}

impl Piece {
    /// Creates a new [`Piece`] that has not yet moved.
    ///
    /// # Example
    /// ```
    /// # use woodpush::{Color, Piece, PieceKind};
    /// let pawn = Piece::new(Color::White, PieceKind::Pawn);
    /// assert!(!pawn.has_moved());
    /// assert!(!pawn.en_passant_vulnerable());
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self {
            color,
            kind,
            has_moved: false,
            en_passant_vulnerable: false,
        }
    }

    /// Fetches the [`Color`] of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`PieceKind`] of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Whether this piece has ever been relocated.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Whether this piece is a pawn that advanced two squares on the previous
    /// half-move and may be captured en passant.
    #[inline(always)]
    pub const fn en_passant_vulnerable(&self) -> bool {
        self.en_passant_vulnerable
    }

    /// Marks this piece as having moved. Monotonic; never reset.
    #[inline(always)]
    pub(crate) fn mark_moved(&mut self) {
        self.has_moved = true;
    }

    #[inline(always)]
    pub(crate) fn set_en_passant_vulnerable(&mut self, vulnerable: bool) {
        self.en_passant_vulnerable = vulnerable;
    }

    /// This piece's display symbol: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use woodpush::{Color, Piece, PieceKind};
    /// assert_eq!(Piece::new(Color::White, PieceKind::Knight).symbol(), 'N');
    /// assert_eq!(Piece::new(Color::Black, PieceKind::Knight).symbol(), 'n');
    /// ```
    #[inline(always)]
    pub fn symbol(&self) -> char {
        let symbol = self.kind.symbol();
        match self.color {
            Color::White => symbol,
            Color::Black => symbol.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
