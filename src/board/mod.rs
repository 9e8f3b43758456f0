/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Move generation per piece kind.
mod movegen;

/// Pieces, their kinds, and their colors.
mod piece;

/// Squares and the human coordinate convention.
mod square;

pub use movegen::*;
pub use piece::*;
pub use square::*;

use std::fmt;

use serde::{Deserialize, Serialize};

/// One entry in a game's move history.
///
/// Records are append-only: once a move is accepted it is logged and never
/// mutated.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub start: Square,
    pub end: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// An `8x8` chess board: a grid of optional [`Piece`]s, the side to move,
/// and the history of moves played so far.
///
/// The board exclusively owns every piece it contains. It is mutated in
/// place by each accepted move; the only copies ever made are the transient
/// clones used to answer "would this move leave my king in check?", which
/// are discarded immediately after the query.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    grid: [[Option<Piece>; Square::SIZE as usize]; Square::SIZE as usize],
    current_player: Color,
    move_history: Vec<MoveRecord>,
}

impl Board {
    /// Creates a new [`Board`] with the fixed starting layout: pawns on the
    /// ranks adjacent to each back rank, and the back ranks ordered
    /// R N B Q K B N R.
    ///
    /// # Example
    /// ```
    /// # use woodpush::{Board, Color, PieceKind};
    /// let board = Board::new();
    /// assert_eq!(board.current_player(), Color::White);
    ///
    /// let e1 = "e1".parse().unwrap();
    /// let king = board.piece_at(e1).unwrap();
    /// assert_eq!(king.kind(), PieceKind::King);
    /// assert_eq!(king.color(), Color::White);
    /// ```
    pub fn new() -> Self {
        let mut board = Self::empty();

        use PieceKind::*;
        let back_rank = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for file in 0..Square::SIZE {
            board.grid[1][file as usize] = Some(Piece::new(Color::Black, Pawn));
            board.grid[6][file as usize] = Some(Piece::new(Color::White, Pawn));

            let kind = back_rank[file as usize];
            board.grid[0][file as usize] = Some(Piece::new(Color::Black, kind));
            board.grid[7][file as usize] = Some(Piece::new(Color::White, kind));
        }

        board
    }

    /// Creates a [`Board`] with no pieces on it, White to move.
    pub(crate) fn empty() -> Self {
        Self {
            grid: [[None; Square::SIZE as usize]; Square::SIZE as usize],
            current_player: Color::White,
            move_history: Vec::new(),
        }
    }

    /// Fetches the piece on `square`, if any.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.grid[square.rank() as usize][square.file() as usize]
    }

    /// The [`Color`] whose turn it is to move.
    #[inline(always)]
    pub const fn current_player(&self) -> Color {
        self.current_player
    }

    /// The moves played so far, oldest first.
    #[inline(always)]
    pub fn move_history(&self) -> &[MoveRecord] {
        &self.move_history
    }

    #[inline(always)]
    fn slot_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.grid[square.rank() as usize][square.file() as usize]
    }

    pub(crate) fn place(&mut self, square: Square, piece: Piece) {
        *self.slot_mut(square) = Some(piece);
    }

    pub(crate) fn set_current_player(&mut self, color: Color) {
        self.current_player = color;
    }

    pub(crate) fn set_move_history(&mut self, history: Vec<MoveRecord>) {
        self.move_history = history;
    }

    pub(crate) fn record_move(&mut self, start: Square, end: Square, kind: PieceKind, color: Color) {
        self.move_history.push(MoveRecord {
            start,
            end,
            kind,
            color,
        });
    }

    pub(crate) fn flip_turn(&mut self) {
        self.current_player = self.current_player.opponent();
    }

    /// Locates the king of the given color.
    ///
    /// # Panics
    /// If no king of that color is on the board. Exactly one king per color
    /// is guaranteed by [`Board::new`] and by snapshot validation, so a
    /// missing king means the board state is corrupted and the check logic
    /// below it has no defined behavior.
    pub fn king_square(&self, color: Color) -> Square {
        Square::iter()
            .find(|&square| {
                self.piece_at(square)
                    .is_some_and(|piece| piece.kind() == PieceKind::King && piece.color() == color)
            })
            .unwrap_or_else(|| panic!("corrupted board state: no {color} king on the board"))
    }

    /// Returns `true` if any piece of the color opposing `color` could move
    /// onto `square`.
    ///
    /// Attack queries generate raw geometric moves (king safety disabled);
    /// this breaks the recursion between "is this move legal" and "what are
    /// this piece's moves".
    pub fn is_square_under_attack(&self, square: Square, color: Color) -> bool {
        Square::iter().any(|from| {
            self.piece_at(from)
                .is_some_and(|piece| piece.color() != color)
                && moves_from(self, from, false).contains(&square)
        })
    }

    /// Returns `true` if `color`'s king is currently attacked.
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.is_square_under_attack(self.king_square(color), color)
    }

    /// Returns `true` if moving the piece on `start` to `end` would leave
    /// `color`'s king in check.
    ///
    /// The move is applied, with all special-move side effects, to a deep
    /// clone of the board; the clone is discarded after the query and never
    /// aliases back into the live board.
    pub fn would_leave_in_check(&self, start: Square, end: Square, color: Color) -> bool {
        let mut speculative = self.clone();
        speculative.apply_move_unchecked(start, end);
        speculative.is_in_check(color)
    }

    /// Returns `true` if `color` has at least one legal move available.
    pub fn has_any_legal_move(&self, color: Color) -> bool {
        Square::iter().any(|square| {
            self.piece_at(square)
                .is_some_and(|piece| piece.color() == color)
                && !moves_from(self, square, true).is_empty()
        })
    }

    /// Returns `true` if `color` is in check and has no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Returns `true` if `color` is not in check and has no legal move.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && !self.has_any_legal_move(color)
    }

    /// Applies the move from `start` to `end` without re-validating its
    /// legality, running all special-move side effects.
    ///
    /// This is the raw application step shared by accepted moves and by the
    /// speculative clones used for legality checks. Capturing a king is
    /// reachable here (and only here), which is what lets a legality probe
    /// observe "my king would be gone".
    pub(crate) fn apply_move_unchecked(&mut self, start: Square, end: Square) {
        self.handle_castling(start, end);
        self.handle_en_passant(start, end);

        if let Some(mut piece) = self.slot_mut(start).take() {
            piece.mark_moved();
            *self.slot_mut(end) = Some(piece);
        }
    }

    /// Relocates the rook when the move being applied is a castle.
    ///
    /// A king moving two files is only ever a castle, so the file delta is
    /// the entire trigger. The king's own relocation is performed by the
    /// generic apply step.
    fn handle_castling(&mut self, start: Square, end: Square) {
        let is_king = self
            .piece_at(start)
            .is_some_and(|piece| piece.kind() == PieceKind::King);
        if !is_king {
            return;
        }

        let delta = end.file() as i8 - start.file() as i8;
        let (rook_from, rook_to) = match delta {
            2 => (7, 5),
            -2 => (0, 3),
            _ => return,
        };

        let rook_from = Square::new_unchecked(start.rank(), rook_from);
        let rook_to = Square::new_unchecked(start.rank(), rook_to);
        if let Some(mut rook) = self.slot_mut(rook_from).take() {
            rook.mark_moved();
            *self.slot_mut(rook_to) = Some(rook);
        }
    }

    /// En passant bookkeeping for the move being applied.
    ///
    /// Runs before the generic relocation, in three steps:
    /// 1. clear `en_passant_vulnerable` on every pawn (the flag survives
    ///    exactly one half-move);
    /// 2. if the moved piece is a pawn advancing two ranks, flag it;
    /// 3. if the moved piece is a pawn changing file into an *empty* square,
    ///    it is capturing en passant: remove the enemy pawn on the start
    ///    rank at the destination file.
    fn handle_en_passant(&mut self, start: Square, end: Square) {
        for square in Square::iter() {
            if let Some(piece) = self.slot_mut(square).as_mut() {
                if piece.kind() == PieceKind::Pawn {
                    piece.set_en_passant_vulnerable(false);
                }
            }
        }

        let is_pawn = self
            .piece_at(start)
            .is_some_and(|piece| piece.kind() == PieceKind::Pawn);
        if !is_pawn {
            return;
        }

        if start.rank().abs_diff(end.rank()) == 2 {
            if let Some(pawn) = self.slot_mut(start).as_mut() {
                pawn.set_en_passant_vulnerable(true);
            }
        }

        if start.file() != end.file() && self.piece_at(end).is_none() {
            let captured = Square::new_unchecked(start.rank(), end.file());
            *self.slot_mut(captured) = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Draws the board as a coordinate-framed ASCII grid, White's pieces
    /// uppercase and Black's lowercase, from Black's back rank down.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Board;
    /// let board = Board::new();
    /// assert!(board.to_string().starts_with("    a b c d e f g h"));
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "    a b c d e f g h")?;
        writeln!(f, "  +-----------------+")?;
        for rank in 0..Square::SIZE {
            write!(f, "{} |", Square::SIZE - rank)?;
            for file in 0..Square::SIZE {
                match self.piece_at(Square::new_unchecked(rank, file)) {
                    Some(piece) => write!(f, " {piece}")?,
                    None => write!(f, " .")?,
                }
            }
            writeln!(f, " | {}", Square::SIZE - rank)?;
        }
        writeln!(f, "  +-----------------+")?;
        write!(f, "    a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn starting_layout_is_complete() {
        let board = Board::new();

        let occupied = Square::iter().filter(|&s| board.piece_at(s).is_some()).count();
        assert_eq!(occupied, 32);

        for file in 0..8 {
            let black_pawn = board.piece_at(Square::new(1, file).unwrap()).unwrap();
            assert_eq!(black_pawn.kind(), PieceKind::Pawn);
            assert_eq!(black_pawn.color(), Color::Black);

            let white_pawn = board.piece_at(Square::new(6, file).unwrap()).unwrap();
            assert_eq!(white_pawn.kind(), PieceKind::Pawn);
            assert_eq!(white_pawn.color(), Color::White);
        }

        assert_eq!(board.king_square(Color::White), square("e1"));
        assert_eq!(board.king_square(Color::Black), square("e8"));
        assert_eq!(board.piece_at(square("d1")).unwrap().kind(), PieceKind::Queen);
        assert_eq!(board.piece_at(square("d8")).unwrap().kind(), PieceKind::Queen);
    }

    #[test]
    fn attack_oracle_sees_knights_and_sliders() {
        let mut board = Board::empty();
        board.place(square("e1"), Piece::new(Color::White, PieceKind::King));
        board.place(square("e8"), Piece::new(Color::Black, PieceKind::King));
        board.place(square("b4"), Piece::new(Color::Black, PieceKind::Knight));
        board.place(square("h5"), Piece::new(Color::Black, PieceKind::Rook));

        // Knight on b4 attacks d3; the rook's rank sweep covers a5.
        assert!(board.is_square_under_attack(square("d3"), Color::White));
        assert!(board.is_square_under_attack(square("a5"), Color::White));
        // The rook's file sweep stops short of squares past a blocker.
        board.place(square("h3"), Piece::new(Color::Black, PieceKind::Pawn));
        assert!(!board.is_square_under_attack(square("h1"), Color::White));
    }

    #[test]
    fn kingside_castle_relocates_the_rook() {
        let mut board = Board::empty();
        board.place(square("e1"), Piece::new(Color::White, PieceKind::King));
        board.place(square("h1"), Piece::new(Color::White, PieceKind::Rook));
        board.place(square("e8"), Piece::new(Color::Black, PieceKind::King));

        board.apply_move_unchecked(square("e1"), square("g1"));

        let king = board.piece_at(square("g1")).unwrap();
        assert_eq!(king.kind(), PieceKind::King);
        assert!(king.has_moved());

        let rook = board.piece_at(square("f1")).unwrap();
        assert_eq!(rook.kind(), PieceKind::Rook);
        assert!(rook.has_moved());
        assert!(board.piece_at(square("h1")).is_none());
    }

    #[test]
    fn queenside_castle_relocates_the_rook() {
        let mut board = Board::empty();
        board.place(square("e1"), Piece::new(Color::White, PieceKind::King));
        board.place(square("a1"), Piece::new(Color::White, PieceKind::Rook));
        board.place(square("e8"), Piece::new(Color::Black, PieceKind::King));

        board.apply_move_unchecked(square("e1"), square("c1"));

        assert_eq!(board.piece_at(square("c1")).unwrap().kind(), PieceKind::King);
        assert_eq!(board.piece_at(square("d1")).unwrap().kind(), PieceKind::Rook);
        assert!(board.piece_at(square("a1")).is_none());
    }

    #[test]
    fn double_push_flags_exactly_one_pawn() {
        let mut board = Board::new();
        board.apply_move_unchecked(square("e2"), square("e4"));

        let flagged: Vec<_> = Square::iter()
            .filter(|&s| board.piece_at(s).is_some_and(|p| p.en_passant_vulnerable()))
            .collect();
        assert_eq!(flagged, vec![square("e4")]);

        // Any following application clears the flag before setting a new one.
        board.apply_move_unchecked(square("g8"), square("f6"));
        assert!(!board.piece_at(square("e4")).unwrap().en_passant_vulnerable());
    }

    #[test]
    fn en_passant_capture_removes_the_passed_pawn() {
        let mut board = Board::empty();
        board.place(square("e1"), Piece::new(Color::White, PieceKind::King));
        board.place(square("e8"), Piece::new(Color::Black, PieceKind::King));
        board.place(square("e5"), Piece::new(Color::White, PieceKind::Pawn));
        board.place(square("d7"), Piece::new(Color::Black, PieceKind::Pawn));

        board.apply_move_unchecked(square("d7"), square("d5"));
        board.apply_move_unchecked(square("e5"), square("d6"));

        assert_eq!(board.piece_at(square("d6")).unwrap().kind(), PieceKind::Pawn);
        assert_eq!(board.piece_at(square("d6")).unwrap().color(), Color::White);
        assert!(board.piece_at(square("d5")).is_none(), "captured pawn must be removed");
    }

    #[test]
    fn speculative_clone_leaves_the_live_board_untouched() {
        let board = Board::new();
        let before = board.clone();

        let _ = board.would_leave_in_check(square("e2"), square("e4"), Color::White);
        assert_eq!(board, before);
    }
}
