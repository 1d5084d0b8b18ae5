use crate::core::Side;
use std::fmt;

/// 盤面座標 (0-indexed). Row 0 is First's back rank, column 0 is the a-file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Self {
        Square { row, col }
    }

    /// Parses algebraic notation such as `e4`.
    pub fn parse(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        Some(Square::new(rank as u8 - b'1', file as u8 - b'a'))
    }

    pub(crate) fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row as i8 + d_row;
        let col = self.col as i8 + d_col;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square::new(row as u8, col as u8))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

/// One chess ply. Castling is recorded as the king's two-column move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChessAction {
    pub from: Square,
    pub to: Square,
    pub side: Side,
}

impl ChessAction {
    pub fn new(from: Square, to: Square, side: Side) -> Self {
        ChessAction { from, to, side }
    }
}

impl fmt::Display for ChessAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.side, self.from, self.to)
    }
}
