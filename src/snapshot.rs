/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use crate::{Board, Color, Game, MoveRecord, Piece, PieceKind, Square};

/// A structured, storage-agnostic record of a full game state.
///
/// The board is stored as 8 rows of 8 optional pieces, top row first (Black's
/// back rank), matching the internal square indexing. Each present piece
/// carries its color, kind, `has_moved`, and `en_passant_vulnerable` flags,
/// so a restored game is observationally identical to the saved one.
///
/// A snapshot is plain data: persisting it (to JSON, a database, anywhere)
/// is the job of an external collaborator.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub board: Vec<Vec<Option<Piece>>>,
    pub current_player: Color,
    pub move_history: Vec<MoveRecord>,
}

impl Game {
    /// Captures the complete current state as a [`Snapshot`].
    ///
    /// # Example
    /// ```
    /// # use woodpush::Game;
    /// let game = Game::new();
    /// let snapshot = game.snapshot();
    /// assert_eq!(snapshot.board.len(), 8);
    /// assert_eq!(Game::restore(&snapshot).unwrap(), game);
    /// ```
    pub fn snapshot(&self) -> Snapshot {
        let board = (0..Square::SIZE)
            .map(|rank| {
                (0..Square::SIZE)
                    .map(|file| self.board().piece_at(Square::new_unchecked(rank, file)))
                    .collect()
            })
            .collect();

        Snapshot {
            board,
            current_player: self.board().current_player(),
            move_history: self.board().move_history().to_vec(),
        }
    }

    /// Rebuilds a [`Game`] from a [`Snapshot`], re-classifying the side to
    /// move so the restored game answers status queries identically to the
    /// saved one.
    ///
    /// A record that does not describe exactly 64 squares, or that does not
    /// contain exactly one king per color, is rejected: the check logic has
    /// no defined behavior on such a board, so the error is surfaced here
    /// rather than later as a corrupted-state failure.
    pub fn restore(snapshot: &Snapshot) -> Result<Game> {
        if snapshot.board.len() != Square::SIZE as usize {
            bail!(
                "Saved board must have exactly 8 rows. Got {}.",
                snapshot.board.len()
            );
        }

        let mut board = Board::empty();
        for (rank, row) in snapshot.board.iter().enumerate() {
            if row.len() != Square::SIZE as usize {
                bail!("Saved board row {rank} must have exactly 8 squares. Got {}.", row.len());
            }
            for (file, piece) in row.iter().enumerate() {
                if let Some(piece) = piece {
                    board.place(Square::new_unchecked(rank as u8, file as u8), *piece);
                }
            }
        }

        for color in Color::all() {
            let kings = Square::iter()
                .filter(|&square| {
                    board.piece_at(square).is_some_and(|piece| {
                        piece.kind() == PieceKind::King && piece.color() == color
                    })
                })
                .count();
            if kings != 1 {
                bail!("Saved board must have exactly one {color} king. Got {kings}.");
            }
        }

        board.set_current_player(snapshot.current_player);
        board.set_move_history(snapshot.move_history.clone());

        Ok(Game::from_board(board))
    }
}
