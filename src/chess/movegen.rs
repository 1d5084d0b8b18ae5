//! Chess move generation.
//!
//! Legality is "apply then test": every candidate is played on a copy and
//! kept only if the mover's king is not attacked afterwards. That costs one
//! attack scan per candidate, O(candidates x board scan), instead of an
//! incremental pin/check analysis.

use super::action::{ChessAction, Square};
use super::piece::{MoveStep, Piece, PieceKind};
use super::position::ChessPosition;
use crate::core::{GameState, SearchNode, Side};

const RAY_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (-1, 2),
    (1, -2),
    (-1, -2),
];

impl ChessPosition {
    /// 合法手生成 (自殺手を排除)
    pub(crate) fn generate_children(&self) -> Vec<SearchNode<ChessPosition>> {
        let mut moves = Vec::new();
        let side = self.side_to_move();

        for row in 0..8 {
            for col in 0..8 {
                let from = Square::new(row, col);
                let piece = match self.piece_at(from) {
                    Some(piece) if piece.side == side => piece,
                    _ => continue,
                };
                match piece.kind {
                    PieceKind::Pawn => self.pawn_moves(&mut moves, from, piece),
                    PieceKind::King => {
                        self.piece_moves(&mut moves, from, piece);
                        self.castle_moves(&mut moves, side);
                    }
                    _ => self.piece_moves(&mut moves, from, piece),
                }
            }
        }

        moves
    }

    fn piece_moves(&self, moves: &mut Vec<SearchNode<ChessPosition>>, from: Square, piece: Piece) {
        for step in piece.movement_rules() {
            match *step {
                MoveStep::Step(d_row, d_col) => {
                    if let Some(to) = from.offset(d_row, d_col) {
                        match self.piece_at(to) {
                            Some(target) if target.side == piece.side => {}
                            _ => self.add_move(moves, from, to),
                        }
                    }
                }
                MoveStep::Slide(d_row, d_col) => {
                    let mut curr = from;
                    while let Some(to) = curr.offset(d_row, d_col) {
                        match self.piece_at(to) {
                            None => {
                                self.add_move(moves, from, to);
                                curr = to;
                            }
                            Some(target) => {
                                if target.side != piece.side {
                                    self.add_move(moves, from, to);
                                }
                                break;
                            }
                        }
                    }
                }
            }
        }
    }

    fn pawn_moves(&self, moves: &mut Vec<SearchNode<ChessPosition>>, from: Square, piece: Piece) {
        let (forward, start_row) = match piece.side {
            Side::First => (1, 1),
            Side::Second => (-1, 6),
        };

        if let Some(to) = from.offset(forward, 0) {
            if self.piece_at(to).is_none() {
                self.add_move(moves, from, to);
                if from.row == start_row {
                    if let Some(to2) = from.offset(forward * 2, 0) {
                        if self.piece_at(to2).is_none() {
                            self.add_move(moves, from, to2);
                        }
                    }
                }
            }
        }

        for d_col in [-1, 1] {
            if let Some(to) = from.offset(forward, d_col) {
                if let Some(target) = self.piece_at(to) {
                    if target.side != piece.side {
                        self.add_move(moves, from, to);
                    }
                }
            }
        }
    }

    fn add_move(&self, moves: &mut Vec<SearchNode<ChessPosition>>, from: Square, to: Square) {
        let side = self.side_to_move();
        let next = self.play(from, to);
        if next.in_check(side) {
            return;
        }
        moves.push(SearchNode::new(ChessAction::new(from, to, side), next));
    }

    fn castle_moves(&self, moves: &mut Vec<SearchNode<ChessPosition>>, side: Side) {
        for rook_col in [0, 7] {
            if self.can_castle(side, rook_col) {
                self.add_castle_move(moves, side, rook_col);
            }
        }
    }

    fn add_castle_move(&self, moves: &mut Vec<SearchNode<ChessPosition>>, side: Side, rook_col: u8) {
        if self.in_check(side) {
            return;
        }
        let king_sq = self.king_location(side);
        let row = king_sq.row;
        if self.piece_at(Square::new(row, rook_col)) != Some(Piece::new(PieceKind::Rook, side)) {
            return;
        }

        let dir: i8 = if rook_col > king_sq.col { 1 } else { -1 };
        let mut col = king_sq.col as i8 + dir;
        while col != rook_col as i8 {
            if self.piece_at(Square::new(row, col as u8)).is_some() {
                return;
            }
            col += dir;
        }

        // the king may not pass through an attacked cell
        for step in [dir, 2 * dir] {
            match king_sq.offset(0, step) {
                Some(sq) if !self.is_attacked(side, sq) => {}
                _ => return,
            }
        }

        let next = self.castle(side, rook_col);
        if next.in_check(side) {
            return;
        }
        let king_to = Square::new(row, (king_sq.col as i8 + 2 * dir) as u8);
        moves.push(SearchNode::new(ChessAction::new(king_sq, king_to, side), next));
    }

    /// 王手判定
    pub fn in_check(&self, side: Side) -> bool {
        self.is_attacked(side, self.king_location(side))
    }

    /// True if any piece of `target_side`'s opponent attacks `target`.
    ///
    /// Walks the eight rays from `target` to the first occupied cell, then
    /// checks the eight knight cells.
    pub fn is_attacked(&self, target_side: Side, target: Square) -> bool {
        RAY_DIRECTIONS
            .iter()
            .any(|&(d_row, d_col)| self.ray_attacker(target_side, target, d_row, d_col))
            || KNIGHT_OFFSETS.iter().any(|&(d_row, d_col)| {
                matches!(
                    target.offset(d_row, d_col).and_then(|sq| self.piece_at(sq)),
                    Some(p) if p.side != target_side && p.kind == PieceKind::Knight
                )
            })
    }

    fn ray_attacker(&self, target_side: Side, target: Square, d_row: i8, d_col: i8) -> bool {
        let mut curr = target;
        let mut distance = 0;
        let attacker = loop {
            curr = match curr.offset(d_row, d_col) {
                Some(sq) => sq,
                None => return false,
            };
            distance += 1;
            if let Some(piece) = self.piece_at(curr) {
                break piece;
            }
        };

        if attacker.side == target_side {
            return false;
        }
        let straight = d_row == 0 || d_col == 0;
        match attacker.kind {
            PieceKind::Queen => true,
            PieceKind::Rook => straight,
            PieceKind::Bishop => !straight,
            PieceKind::King => distance == 1,
            // pawns attack diagonally forward, so First's attacker sits below the target
            PieceKind::Pawn => {
                distance == 1
                    && d_col != 0
                    && match attacker.side {
                        Side::First => d_row == -1,
                        Side::Second => d_row == 1,
                    }
            }
            PieceKind::Knight => false,
        }
    }
}
