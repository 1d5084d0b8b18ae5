//! Bit-packed chess position.
//!
//! The board is four `u64` words, two ranks per word and four bits per cell
//! (see [`Piece::code`]). Everything else lives in one `u32` status word:
//!
//! | bits  | field                                   |
//! |-------|-----------------------------------------|
//! | 0-3   | First king row                          |
//! | 4-7   | First king column                       |
//! | 8-11  | Second king row                         |
//! | 12-15 | Second king column                      |
//! | 16    | draw flag                               |
//! | 17-20 | castling right lost (side x rook file)  |
//! | 21-27 | half-moves since capture or pawn move   |

use super::action::{ChessAction, Square};
use super::piece::{Piece, PieceKind};
use crate::core::{GameError, GameState, Outcome, SearchNode, Side};
use once_cell::unsync::OnceCell;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

const KING_BITS: [u32; 2] = [0, 8];
const DRAW_BIT: u32 = 16;
const CASTLE_LOST_BITS: u32 = 17;
const MOVE_COUNT_BITS: u32 = 21;
const MOVE_COUNT_MASK: u32 = 0b111_1111;

/// Half-moves without capture or pawn move that force a draw.
pub const DRAW_MOVE_LIMIT: u32 = 100;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub struct ChessPosition {
    board: [u64; 4],
    status: u32,
    side: Side,
    /// Legal children, generated once on first request.
    children: OnceCell<Vec<SearchNode<ChessPosition>>>,
}

impl ChessPosition {
    /// The standard starting position, First (White) to move.
    pub fn new() -> Self {
        let mut position = ChessPosition::empty(Side::First);
        for (col, &kind) in BACK_RANK.iter().enumerate() {
            let col = col as u8;
            position.set_piece(Square::new(0, col), Some(Piece::new(kind, Side::First)));
            position.set_piece(Square::new(1, col), Some(Piece::new(PieceKind::Pawn, Side::First)));
            position.set_piece(Square::new(6, col), Some(Piece::new(PieceKind::Pawn, Side::Second)));
            position.set_piece(Square::new(7, col), Some(Piece::new(kind, Side::Second)));
        }
        position
    }

    fn empty(side: Side) -> Self {
        ChessPosition {
            board: [0; 4],
            status: 0,
            side,
            children: OnceCell::new(),
        }
    }

    /// 文字列配列から盤面を初期化する
    ///
    /// `rows` lists the eight ranks from row 7 (Second's back rank) down to
    /// row 0, each with eight whitespace-separated cells: `.` for an empty
    /// cell, `KQRBNP` for First and `kqrbnp` for Second. Castling rights are
    /// granted wherever the king and a rook still stand on their home squares.
    pub fn from_setup(rows: &[&str], side: Side) -> Result<Self, GameError> {
        if rows.len() != 8 {
            return Err(GameError::InvalidSetup(format!(
                "expected 8 rows, got {}",
                rows.len()
            )));
        }

        let mut position = ChessPosition::empty(side);
        let mut kings = [0usize; 2];
        for (i, line) in rows.iter().enumerate() {
            let row = 7 - i as u8;
            let cells: Vec<&str> = line.split_whitespace().collect();
            if cells.len() != 8 {
                return Err(GameError::InvalidSetup(format!(
                    "row {} has {} cells, expected 8",
                    row,
                    cells.len()
                )));
            }
            for (col, token) in cells.iter().enumerate() {
                if *token == "." {
                    continue;
                }
                let mut chars = token.chars();
                let piece = match (chars.next().and_then(Piece::from_char), chars.next()) {
                    (Some(piece), None) => piece,
                    _ => {
                        return Err(GameError::InvalidSetup(format!(
                            "unknown piece '{}' at row {} col {}",
                            token, row, col
                        )))
                    }
                };
                if piece.kind == PieceKind::King {
                    kings[piece.side.index()] += 1;
                }
                position.set_piece(Square::new(row, col as u8), Some(piece));
            }
        }

        if kings != [1, 1] {
            return Err(GameError::InvalidSetup(format!(
                "each side needs exactly one king, found {} and {}",
                kings[0], kings[1]
            )));
        }

        for side in [Side::First, Side::Second] {
            let home = home_row(side);
            let king_home = position.piece_at(Square::new(home, 4))
                == Some(Piece::new(PieceKind::King, side));
            for rook_col in [0, 7] {
                let rook_home = position.piece_at(Square::new(home, rook_col))
                    == Some(Piece::new(PieceKind::Rook, side));
                if !(king_home && rook_home) {
                    position.revoke_castle(side, rook_col);
                }
            }
        }

        if position.in_check(side.opponent()) {
            return Err(GameError::InvalidSetup(format!(
                "{} is in check but it is {}'s turn",
                side.opponent(),
                side
            )));
        }

        Ok(position)
    }

    // --- Cell codec ---

    /// Off-board squares are empty.
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        if sq.row >= 8 || sq.col >= 8 {
            return None;
        }
        let (word, shift) = cell_slot(sq);
        Piece::from_code((self.board[word] >> shift) & 0xF)
    }

    pub(crate) fn set_piece(&mut self, sq: Square, piece: Option<Piece>) {
        let (word, shift) = cell_slot(sq);
        self.board[word] &= !(0xF << shift);
        if let Some(piece) = piece {
            self.board[word] |= piece.code() << shift;
            if piece.kind == PieceKind::King {
                self.set_king(piece.side, sq);
            }
        }
    }

    // --- Status word ---

    pub fn king_location(&self, side: Side) -> Square {
        let base = KING_BITS[side.index()];
        let row = (self.status >> base) & 0xF;
        let col = (self.status >> (base + 4)) & 0xF;
        Square::new(row as u8, col as u8)
    }

    fn set_king(&mut self, side: Side, sq: Square) {
        let base = KING_BITS[side.index()];
        self.status &= !(0xFF << base);
        self.status |= (sq.row as u32) << base;
        self.status |= (sq.col as u32) << (base + 4);
    }

    /// Whether `side` may still castle with the rook that started on `rook_col`.
    pub fn can_castle(&self, side: Side, rook_col: u8) -> bool {
        self.status & (1 << castle_bit(side, rook_col)) == 0
    }

    fn revoke_castle(&mut self, side: Side, rook_col: u8) {
        self.status |= 1 << castle_bit(side, rook_col);
    }

    fn revoke_all_castles(&mut self, side: Side) {
        self.revoke_castle(side, 0);
        self.revoke_castle(side, 7);
    }

    /// Half-moves since the last capture or pawn move.
    pub fn halfmove_clock(&self) -> u32 {
        (self.status >> MOVE_COUNT_BITS) & MOVE_COUNT_MASK
    }

    /// Returns this position with the half-move clock preset, for setups
    /// that resume a game in progress.
    pub fn with_halfmove_clock(mut self, count: u32) -> Self {
        // the draw flag follows the preset count
        self.status &= !(1 << DRAW_BIT);
        self.set_halfmove_clock(count);
        self.children = OnceCell::new();
        self
    }

    fn set_halfmove_clock(&mut self, count: u32) {
        let count = count.min(MOVE_COUNT_MASK);
        self.status &= !(MOVE_COUNT_MASK << MOVE_COUNT_BITS);
        self.status |= count << MOVE_COUNT_BITS;
        if count >= DRAW_MOVE_LIMIT {
            self.status |= 1 << DRAW_BIT;
        }
    }

    /// Set once the half-move clock reaches [`DRAW_MOVE_LIMIT`].
    pub fn is_draw_flagged(&self) -> bool {
        self.status & (1 << DRAW_BIT) != 0
    }

    // --- Transitions ---

    fn successor(&self) -> ChessPosition {
        ChessPosition {
            board: self.board,
            status: self.status,
            side: self.side.opponent(),
            children: OnceCell::new(),
        }
    }

    /// Moves the piece on `from` to `to` without any legality check.
    ///
    /// Handles queen promotion, castling-right bookkeeping and the
    /// half-move clock.
    pub(crate) fn play(&self, from: Square, to: Square) -> ChessPosition {
        let mut next = self.successor();
        let Some(piece) = self.piece_at(from) else {
            return next;
        };

        // capture must be read before the board changes
        let captured = self.piece_at(to);
        let mut clock = self.halfmove_clock() + 1;
        if let Some(victim) = captured {
            clock = 0;
            if victim.kind == PieceKind::Rook
                && to.row == home_row(victim.side)
                && (to.col == 0 || to.col == 7)
            {
                next.revoke_castle(victim.side, to.col);
            }
        }

        next.set_piece(from, None);
        next.set_piece(to, Some(piece));

        match piece.kind {
            PieceKind::Pawn => {
                clock = 0;
                if to.row == home_row(piece.side.opponent()) {
                    next.set_piece(to, Some(Piece::new(PieceKind::Queen, piece.side)));
                }
            }
            PieceKind::King => next.revoke_all_castles(piece.side),
            PieceKind::Rook => {
                if from.row == home_row(piece.side) && (from.col == 0 || from.col == 7) {
                    next.revoke_castle(piece.side, from.col);
                }
            }
            _ => {}
        }

        next.set_halfmove_clock(clock);
        next
    }

    /// Relocates king and rook together. The caller checks the castling rules.
    pub(crate) fn castle(&self, side: Side, rook_col: u8) -> ChessPosition {
        let mut next = self.successor();
        let king_sq = self.king_location(side);
        let dir: i8 = if rook_col > king_sq.col { 1 } else { -1 };
        let row = king_sq.row;
        let king_to = Square::new(row, (king_sq.col as i8 + 2 * dir) as u8);
        let rook_to = Square::new(row, (king_sq.col as i8 + dir) as u8);

        next.set_piece(king_sq, None);
        next.set_piece(Square::new(row, rook_col), None);
        next.set_piece(king_to, Some(Piece::new(PieceKind::King, side)));
        next.set_piece(rook_to, Some(Piece::new(PieceKind::Rook, side)));
        next.revoke_all_castles(side);
        next.set_halfmove_clock(self.halfmove_clock() + 1);
        next
    }

    /// Applies `action` directly, without consulting the generated children.
    ///
    /// Only checks that the moving piece belongs to the side to move; full
    /// legality is decided by membership in [`GameState::children`].
    pub fn apply(&self, action: &ChessAction) -> Result<ChessPosition, GameError> {
        if action.side != self.side {
            return Err(GameError::illegal_action(
                action,
                format!("it is {}'s turn", self.side),
            ));
        }
        let piece = match self.piece_at(action.from) {
            Some(piece) if piece.side == self.side => piece,
            _ => {
                return Err(GameError::illegal_action(
                    action,
                    format!("no {} piece on {}", self.side, action.from),
                ))
            }
        };

        let col_shift = action.to.col as i8 - action.from.col as i8;
        if piece.kind == PieceKind::King && col_shift.abs() == 2 {
            let rook_col = if col_shift > 0 { 7 } else { 0 };
            return Ok(self.castle(self.side, rook_col));
        }
        Ok(self.play(action.from, action.to))
    }
}

fn cell_slot(sq: Square) -> (usize, u32) {
    let word = (sq.row / 2) as usize;
    let shift = (sq.row % 2) as u32 * 32 + sq.col as u32 * 4;
    (word, shift)
}

fn castle_bit(side: Side, rook_col: u8) -> u32 {
    let file = if rook_col == 0 { 0 } else { 1 };
    CASTLE_LOST_BITS + side.index() as u32 * 2 + file
}

pub(crate) fn home_row(side: Side) -> u8 {
    match side {
        Side::First => 0,
        Side::Second => 7,
    }
}

impl Default for ChessPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for ChessPosition {
    fn clone(&self) -> Self {
        ChessPosition {
            board: self.board,
            status: self.status,
            side: self.side,
            children: OnceCell::new(),
        }
    }
}

impl PartialEq for ChessPosition {
    fn eq(&self, other: &Self) -> bool {
        self.board == other.board && self.status == other.status && self.side == other.side
    }
}

impl Eq for ChessPosition {}

impl Hash for ChessPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.board.hash(state);
        self.status.hash(state);
        self.side.hash(state);
    }
}

impl fmt::Debug for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ChessPosition")
            .field("board", &self.board)
            .field("status", &self.status)
            .field("side", &self.side)
            .finish()
    }
}

impl fmt::Display for ChessPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..8).rev() {
            let line: Vec<String> = (0..8)
                .map(|col| match self.piece_at(Square::new(row, col)) {
                    Some(piece) => piece.display_char().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "{} to move", self.side)
    }
}

impl GameState for ChessPosition {
    type Action = ChessAction;

    fn side_to_move(&self) -> Side {
        self.side
    }

    fn children(&self) -> Cow<'_, [SearchNode<Self>]> {
        Cow::Borrowed(self.children.get_or_init(|| self.generate_children()).as_slice())
    }

    fn is_game_over(&self) -> bool {
        self.is_draw_flagged() || self.children().is_empty()
    }

    fn winner(&self) -> Result<Outcome, GameError> {
        if !self.is_game_over() {
            return Err(GameError::NotGameOver);
        }
        // checkmate on the board outranks the move-count draw
        if self.children().is_empty() && self.in_check(self.side) {
            Ok(Outcome::Winner(self.side.opponent()))
        } else {
            Ok(Outcome::Draw)
        }
    }
}
