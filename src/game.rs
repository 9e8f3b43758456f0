/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use thiserror::Error;

use crate::{moves_from, Board, Color, Square};

/// The reasons a submitted move can be rejected.
///
/// Rejections are ordinary, recoverable outcomes: the game state is left
/// completely unchanged and play continues.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum MoveRejected {
    #[error("there is no piece on the source square")]
    NoPieceAtSource,

    #[error("the piece on the source square does not belong to the side to move")]
    WrongSideToMove,

    #[error("the destination is not a legal move for that piece")]
    IllegalDestination,
}

/// The outcome classification of the current position.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    /// The game continues; the contained color is to move.
    Ongoing(Color),

    /// The contained color is to move and its king is under attack.
    Check(Color),

    /// The side to move has no legal moves and is in check. The contained
    /// color is the *winner*.
    Checkmate(Color),

    /// The side to move has no legal moves and is not in check.
    Stalemate,
}

impl GameStatus {
    /// Returns `true` if no further moves can be played.
    ///
    /// # Example
    /// ```
    /// # use woodpush::{Color, GameStatus};
    /// assert!(!GameStatus::Ongoing(Color::White).is_game_over());
    /// assert!(!GameStatus::Check(Color::Black).is_game_over());
    /// assert!(GameStatus::Checkmate(Color::White).is_game_over());
    /// assert!(GameStatus::Stalemate.is_game_over());
    /// ```
    #[inline(always)]
    pub const fn is_game_over(&self) -> bool {
        matches!(self, Self::Checkmate(_) | Self::Stalemate)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ongoing(color) => write!(f, "{color} to move"),
            Self::Check(color) => write!(f, "{color} to move, in check"),
            Self::Checkmate(winner) => write!(f, "checkmate, {winner} wins"),
            Self::Stalemate => write!(f, "stalemate"),
        }
    }
}

/// A game of chess.
///
/// This type orchestrates one full turn at a time: validate the submitted
/// move, apply it (with castling and en passant side effects), flip the side
/// to move, and classify the resulting position. It is the single writer of
/// its [`Board`]; external front-ends and storage layers interact only
/// through this type's methods.
///
/// The basic methods you're probably looking for are [`Game::submit_move`],
/// [`Game::legal_destinations`], and [`Game::status`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Game {
    /// Starts a new game from the fixed starting position, White to move.
    ///
    /// # Example
    /// ```
    /// # use woodpush::{Color, Game, GameStatus};
    /// let game = Game::new();
    /// assert_eq!(game.status(), GameStatus::Ongoing(Color::White));
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: GameStatus::Ongoing(Color::White),
        }
    }

    /// Wraps an existing board, classifying its side to move.
    pub(crate) fn from_board(board: Board) -> Self {
        let status = classify(&board);
        Self { board, status }
    }

    /// A read-only view of the underlying [`Board`].
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The [`Color`] whose turn it is to move.
    #[inline(always)]
    pub const fn current_player(&self) -> Color {
        self.board.current_player()
    }

    /// The current [`GameStatus`].
    #[inline(always)]
    pub const fn status(&self) -> GameStatus {
        self.status
    }

    /// The legal destination squares for the piece on `square`, for UI
    /// highlighting. Empty if the square is empty.
    ///
    /// # Example
    /// ```
    /// # use woodpush::Game;
    /// let game = Game::new();
    /// assert_eq!(game.legal_destinations("e2".parse().unwrap()).len(), 2);
    /// assert!(game.legal_destinations("e4".parse().unwrap()).is_empty());
    /// ```
    #[inline(always)]
    pub fn legal_destinations(&self, square: Square) -> Vec<Square> {
        moves_from(&self.board, square, true)
    }

    /// Plays one full turn: validates the move from `start` to `end`,
    /// applies it, flips the side to move, and classifies the new position.
    ///
    /// On rejection the board, history, and side to move are untouched.
    /// Terminal states need no special gate here: once the game is over the
    /// side to move has zero legal destinations, so every further submission
    /// is rejected.
    ///
    /// # Example
    /// ```
    /// # use woodpush::{Game, MoveRejected};
    /// let mut game = Game::new();
    /// let e2 = "e2".parse().unwrap();
    /// let e4 = "e4".parse().unwrap();
    /// assert!(game.submit_move(e2, e4).is_ok());
    ///
    /// // It is Black's turn now.
    /// assert_eq!(game.submit_move(e4, "e5".parse().unwrap()), Err(MoveRejected::WrongSideToMove));
    /// ```
    pub fn submit_move(&mut self, start: Square, end: Square) -> Result<GameStatus, MoveRejected> {
        let piece = self
            .board
            .piece_at(start)
            .ok_or(MoveRejected::NoPieceAtSource)?;

        if piece.color() != self.board.current_player() {
            return Err(MoveRejected::WrongSideToMove);
        }

        if !moves_from(&self.board, start, true).contains(&end) {
            return Err(MoveRejected::IllegalDestination);
        }

        self.board.apply_move_unchecked(start, end);
        self.board.record_move(start, end, piece.kind(), piece.color());
        self.board.flip_turn();
        self.status = classify(&self.board);

        Ok(self.status)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;
        write!(f, "{}", self.status)
    }
}

/// Classifies the position for the side to move, most decisive state first.
pub(crate) fn classify(board: &Board) -> GameStatus {
    let to_move = board.current_player();

    if board.is_checkmate(to_move) {
        GameStatus::Checkmate(to_move.opponent())
    } else if board.is_stalemate(to_move) {
        GameStatus::Stalemate
    } else if board.is_in_check(to_move) {
        GameStatus::Check(to_move)
    } else {
        GameStatus::Ongoing(to_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn submitting_from_an_empty_square_is_rejected() {
        let mut game = Game::new();
        let err = game.submit_move(square("e4"), square("e5")).unwrap_err();
        assert_eq!(err, MoveRejected::NoPieceAtSource);
    }

    #[test]
    fn moving_the_opponents_piece_is_rejected() {
        let mut game = Game::new();
        let err = game.submit_move(square("e7"), square("e5")).unwrap_err();
        assert_eq!(err, MoveRejected::WrongSideToMove);
    }

    #[test]
    fn illegal_destinations_are_rejected() {
        let mut game = Game::new();
        let err = game.submit_move(square("e2"), square("e5")).unwrap_err();
        assert_eq!(err, MoveRejected::IllegalDestination);
    }

    #[test]
    fn rejection_leaves_the_game_untouched() {
        let mut game = Game::new();
        let before = game.clone();

        for (start, end) in [("e4", "e5"), ("e7", "e5"), ("e2", "e5"), ("g1", "g3")] {
            assert!(game.submit_move(square(start), square(end)).is_err());
            assert_eq!(game, before);
        }
    }

    #[test]
    fn turns_alternate_and_history_grows() {
        let mut game = Game::new();
        assert_eq!(game.current_player(), Color::White);

        game.submit_move(square("e2"), square("e4")).unwrap();
        assert_eq!(game.current_player(), Color::Black);
        assert_eq!(game.board().move_history().len(), 1);

        game.submit_move(square("e7"), square("e5")).unwrap();
        assert_eq!(game.current_player(), Color::White);

        let record = game.board().move_history()[0];
        assert_eq!(record.start, square("e2"));
        assert_eq!(record.end, square("e4"));
        assert_eq!(record.color, Color::White);
    }

    #[test]
    fn scholars_mate_is_classified() {
        let mut game = Game::new();
        for (start, end) in [
            ("e2", "e4"),
            ("e7", "e5"),
            ("f1", "c4"),
            ("b8", "c6"),
            ("d1", "h5"),
            ("g8", "f6"),
        ] {
            game.submit_move(square(start), square(end)).unwrap();
        }

        let status = game.submit_move(square("h5"), square("f7")).unwrap();
        assert_eq!(status, GameStatus::Checkmate(Color::White));
        assert!(game.status().is_game_over());

        // No move is accepted after the game is over.
        assert!(game.submit_move(square("e8"), square("f7")).is_err());
    }

    #[test]
    fn giving_check_is_classified() {
        let mut game = Game::new();
        for (start, end) in [("e2", "e4"), ("f7", "f6"), ("d1", "h5")] {
            game.submit_move(square(start), square(end)).unwrap();
        }
        assert_eq!(game.status(), GameStatus::Check(Color::Black));
    }
}
