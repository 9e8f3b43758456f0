/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! A rules engine for standard chess.
//!
//! `woodpush` maintains a board state, generates legal moves per piece,
//! enforces castling and en passant, and detects check, checkmate, and
//! stalemate. It contains no search, no clock, and no front-end: consoles,
//! GUIs, and storage layers are external collaborators that drive a
//! [`Game`] through [`Game::submit_move`], [`Game::legal_destinations`],
//! and [`Game::snapshot`] / [`Game::restore`].
//!
//! Legality is decided by speculative simulation: a candidate move is
//! applied to a scoped clone of the board and the mover's king is checked
//! for attack on the clone. At `8x8` scale this favors correctness over
//! incremental bookkeeping.
//!
//! Pawn promotion is a deliberate, known gap: a pawn reaching the last rank
//! simply remains a pawn.

/// The board, its pieces and squares, and move generation.
mod board;

/// One-turn orchestration: validation, application, and classification.
mod game;

/// Structured state capture and restore.
mod snapshot;

pub use board::*;
pub use game::*;
pub use snapshot::*;
