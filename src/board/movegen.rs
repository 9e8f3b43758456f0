/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use super::{Board, Color, Piece, PieceKind, Square};

/// Sliding directions for a rook, as `(rank, file)` steps.
const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Sliding directions for a bishop.
const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Sliding directions for a queen.
const QUEEN_DIRECTIONS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// The 8 L-shaped knight jumps.
const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// The 8 adjacent king steps.
const KING_STEPS: [(i8, i8); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Computes the destination squares reachable by the piece on `from`.
///
/// With `check_king_safety` disabled this yields the piece's raw geometric
/// moves: its movement pattern applied to the current occupancy, with
/// out-of-bounds candidates silently discarded. This raw mode is what attack
/// queries use. With it enabled, candidates that would leave the moving
/// side's own king in check are filtered out, and the king additionally
/// considers castling.
///
/// An empty `from` square yields an empty set; surfacing that as an error is
/// the caller's responsibility.
///
/// # Example
/// ```
/// # use woodpush::{moves_from, Board, Square};
/// let board = Board::new();
/// let b1: Square = "b1".parse().unwrap();
/// let mut moves = moves_from(&board, b1, true);
/// moves.sort();
/// let uci: Vec<String> = moves.iter().map(Square::to_uci).collect();
/// assert_eq!(uci, ["a3", "c3"]);
/// ```
pub fn moves_from(board: &Board, from: Square, check_king_safety: bool) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };

    let mut moves = match piece.kind() {
        PieceKind::Pawn => pawn_moves(board, from, piece),
        PieceKind::Rook => ray_moves(board, from, piece, &ROOK_DIRECTIONS),
        PieceKind::Bishop => ray_moves(board, from, piece, &BISHOP_DIRECTIONS),
        PieceKind::Queen => ray_moves(board, from, piece, &QUEEN_DIRECTIONS),
        PieceKind::Knight => step_moves(board, from, piece, &KNIGHT_JUMPS),
        // The king applies the safety filter itself, per candidate, so it
        // returns directly rather than falling through to the shared filter.
        PieceKind::King => return king_moves(board, from, piece, check_king_safety),
    };

    if check_king_safety {
        moves.retain(|&to| !board.would_leave_in_check(from, to, piece.color()));
    }

    moves
}

/// Pawn geometry: single push onto an empty square, double push while the
/// pawn is unmoved and both squares ahead are empty, diagonal captures, and
/// en passant.
fn pawn_moves(board: &Board, from: Square, pawn: Piece) -> Vec<Square> {
    let mut moves = Vec::new();
    let direction = pawn.color().pawn_direction();

    if let Some(one_ahead) = from.offset(direction, 0) {
        if board.piece_at(one_ahead).is_none() {
            moves.push(one_ahead);

            if !pawn.has_moved() {
                if let Some(two_ahead) = from.offset(2 * direction, 0) {
                    if board.piece_at(two_ahead).is_none() {
                        moves.push(two_ahead);
                    }
                }
            }
        }
    }

    for files in [-1, 1] {
        if let Some(diagonal) = from.offset(direction, files) {
            if board
                .piece_at(diagonal)
                .is_some_and(|target| target.color() != pawn.color())
            {
                moves.push(diagonal);
            }
        }
    }

    // En passant: eligible only from the rank immediately behind a pawn that
    // just advanced two squares (rank 3 for White capturing, rank 4 for
    // Black). The landing square is the empty one diagonally ahead.
    let capture_rank = match pawn.color() {
        Color::White => 3,
        Color::Black => 4,
    };
    if from.rank() == capture_rank {
        for files in [-1, 1] {
            if let Some(beside) = from.offset(0, files) {
                let vulnerable = board.piece_at(beside).is_some_and(|target| {
                    target.kind() == PieceKind::Pawn
                        && target.color() != pawn.color()
                        && target.en_passant_vulnerable()
                });
                if vulnerable {
                    if let Some(landing) = from.offset(direction, files) {
                        moves.push(landing);
                    }
                }
            }
        }
    }

    moves
}

/// Ray-cast along each direction until the board edge, stopping before an
/// own piece and including-then-stopping on an enemy piece.
fn ray_moves(board: &Board, from: Square, piece: Piece, directions: &[(i8, i8)]) -> Vec<Square> {
    let mut moves = Vec::new();

    for &(ranks, files) in directions {
        let mut cursor = from;
        while let Some(to) = cursor.offset(ranks, files) {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(target) => {
                    if target.color() != piece.color() {
                        moves.push(to);
                    }
                    break;
                }
            }
            cursor = to;
        }
    }

    moves
}

/// Fixed-offset moves (knight jumps), each independently bounds- and
/// occupancy-checked.
fn step_moves(board: &Board, from: Square, piece: Piece, offsets: &[(i8, i8)]) -> Vec<Square> {
    offsets
        .iter()
        .filter_map(|&(ranks, files)| from.offset(ranks, files))
        .filter(|&to| {
            board
                .piece_at(to)
                .map_or(true, |target| target.color() != piece.color())
        })
        .collect()
}

/// King geometry: the 8 adjacent steps, with the safety filter applied
/// inline per candidate, plus castling.
fn king_moves(board: &Board, from: Square, king: Piece, check_king_safety: bool) -> Vec<Square> {
    let color = king.color();
    let mut moves = Vec::new();

    for &(ranks, files) in &KING_STEPS {
        if let Some(to) = from.offset(ranks, files) {
            let occupied_by_friend = board
                .piece_at(to)
                .is_some_and(|target| target.color() == color);
            if occupied_by_friend {
                continue;
            }
            if !check_king_safety || !board.would_leave_in_check(from, to, color) {
                moves.push(to);
            }
        }
    }

    // Castling is only offered on the legally-filtered path, and never while
    // the king is in check.
    if check_king_safety && !king.has_moved() && !board.is_in_check(color) {
        if can_castle_kingside(board, color) {
            if let Some(to) = from.offset(0, 2) {
                moves.push(to);
            }
        }
        if can_castle_queenside(board, color) {
            if let Some(to) = from.offset(0, -2) {
                moves.push(to);
            }
        }
    }

    moves
}

/// Kingside eligibility: an unmoved rook on file 7 of the back rank, files 5
/// and 6 empty, and neither of those squares attacked by the opponent.
///
/// Whether the rook itself is threatened is never checked.
fn can_castle_kingside(board: &Board, color: Color) -> bool {
    let rank = color.back_rank();

    let rook_home = Square::new_unchecked(rank, 7);
    let rook_ready = board
        .piece_at(rook_home)
        .is_some_and(|rook| rook.kind() == PieceKind::Rook && !rook.has_moved());
    if !rook_ready {
        return false;
    }

    let f_file = Square::new_unchecked(rank, 5);
    let g_file = Square::new_unchecked(rank, 6);
    board.piece_at(f_file).is_none()
        && board.piece_at(g_file).is_none()
        && !board.is_square_under_attack(f_file, color)
        && !board.is_square_under_attack(g_file, color)
}

/// Queenside eligibility: an unmoved rook on file 0, files 1-3 empty, and
/// the king's transit squares (files 2 and 3) unattacked. File 1 is crossed
/// only by the rook, so it is not attack-checked.
fn can_castle_queenside(board: &Board, color: Color) -> bool {
    let rank = color.back_rank();

    let rook_home = Square::new_unchecked(rank, 0);
    let rook_ready = board
        .piece_at(rook_home)
        .is_some_and(|rook| rook.kind() == PieceKind::Rook && !rook.has_moved());
    if !rook_ready {
        return false;
    }

    let b_file = Square::new_unchecked(rank, 1);
    let c_file = Square::new_unchecked(rank, 2);
    let d_file = Square::new_unchecked(rank, 3);
    board.piece_at(b_file).is_none()
        && board.piece_at(c_file).is_none()
        && board.piece_at(d_file).is_none()
        && !board.is_square_under_attack(c_file, color)
        && !board.is_square_under_attack(d_file, color)
}
