use super::action::{cell_coords, cell_index, CheckersAction};
use crate::core::{GameError, GameState, Outcome, SearchNode, Side};
use once_cell::unsync::OnceCell;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

const MAN: u64 = 0b01;
const KING: u64 = 0b11;

/// Plies without progress that force a draw.
pub const DRAW_PLY_LIMIT: u8 = 40;

/// A piece on a checkers cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CheckersPiece {
    pub side: Side,
    pub king: bool,
}

impl CheckersPiece {
    pub fn display_char(&self) -> char {
        match (self.side, self.king) {
            (Side::First, false) => 'b',
            (Side::First, true) => 'B',
            (Side::Second, false) => 'r',
            (Side::Second, true) => 'R',
        }
    }
}

/// Bit-packed checkers position.
///
/// One `u64` per side, two bits per playable cell: `00` empty, `01` man,
/// `11` king. First (Black) starts on rows 0-2 and moves up the board.
pub struct CheckersPosition {
    cells: [u64; 2],
    side: Side,
    since_progress: u8,
    /// Legal children, generated once on first request.
    children: OnceCell<Vec<SearchNode<CheckersPosition>>>,
}

impl CheckersPosition {
    pub fn new() -> Self {
        let mut position = CheckersPosition::empty(Side::First);
        for index in 0..12 {
            position.set_cell(Side::First, index, MAN);
        }
        for index in 20..32 {
            position.set_cell(Side::Second, index, MAN);
        }
        position
    }

    fn empty(side: Side) -> Self {
        CheckersPosition {
            cells: [0; 2],
            side,
            since_progress: 0,
            children: OnceCell::new(),
        }
    }

    /// 文字列配列から盤面を初期化する
    ///
    /// `rows` lists row 7 first, eight whitespace-separated cells per row:
    /// `.` empty, `b`/`B` First man/king, `r`/`R` Second man/king. Pieces may
    /// only stand on playable cells.
    pub fn from_setup(rows: &[&str], side: Side) -> Result<Self, GameError> {
        if rows.len() != 8 {
            return Err(GameError::InvalidSetup(format!(
                "expected 8 rows, got {}",
                rows.len()
            )));
        }

        let mut position = CheckersPosition::empty(side);
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
                let (owner, code) = match *token {
                    "." => continue,
                    "b" => (Side::First, MAN),
                    "B" => (Side::First, KING),
                    "r" => (Side::Second, MAN),
                    "R" => (Side::Second, KING),
                    other => {
                        return Err(GameError::InvalidSetup(format!(
                            "unknown piece '{}' at row {} col {}",
                            other, row, col
                        )))
                    }
                };
                let index = cell_index(row, col as u8).ok_or_else(|| {
                    GameError::InvalidSetup(format!(
                        "piece on unplayable cell row {} col {}",
                        row, col
                    ))
                })?;
                position.set_cell(owner, index, code);
            }
        }
        Ok(position)
    }

    pub fn with_progress_counter(mut self, plies: u8) -> Self {
        self.since_progress = plies;
        self.children = OnceCell::new();
        self
    }

    // --- Cell codec ---

    fn cell_code(&self, side: Side, index: u8) -> u64 {
        (self.cells[side.index()] >> (index * 2)) & 0b11
    }

    fn set_cell(&mut self, side: Side, index: u8, code: u64) {
        let word = &mut self.cells[side.index()];
        *word &= !(0b11 << (index * 2));
        *word |= (code & 0b11) << (index * 2);
    }

    fn clear_cell(&mut self, index: u8) {
        self.set_cell(Side::First, index, 0);
        self.set_cell(Side::Second, index, 0);
    }

    /// Piece on playable cell `index`; indices past 31 are empty.
    pub fn cell(&self, index: u8) -> Option<CheckersPiece> {
        if index >= 32 {
            return None;
        }
        [Side::First, Side::Second].into_iter().find_map(|side| {
            match self.cell_code(side, index) {
                0 => None,
                code => Some(CheckersPiece {
                    side,
                    king: code == KING,
                }),
            }
        })
    }

    /// Piece at (row, col); unplayable cells are always empty.
    pub fn piece_at(&self, row: u8, col: u8) -> Option<CheckersPiece> {
        cell_index(row, col).and_then(|index| self.cell(index))
    }

    pub fn is_empty(&self, index: u8) -> bool {
        self.cell(index).is_none()
    }

    /// Plies since the last man move or capture.
    pub fn progress_counter(&self) -> u8 {
        self.since_progress
    }

    pub fn piece_count(&self, side: Side) -> (u32, u32) {
        let word = self.cells[side.index()];
        let occupied = word & 0x5555_5555_5555_5555;
        let kings = (word >> 1) & 0x5555_5555_5555_5555;
        (
            occupied.count_ones() - kings.count_ones(),
            kings.count_ones(),
        )
    }

    // --- Transitions ---

    /// Moves the piece on `from` to `to` for the same side to move.
    ///
    /// A two-row move removes the jumped piece. Returns the new position and
    /// whether the move crowned a man.
    pub(crate) fn step(&self, from: u8, to: u8) -> (CheckersPosition, bool) {
        let mut next = self.clone();
        let Some(piece) = self.cell(from) else {
            return (next, false);
        };

        let (from_row, from_col) = cell_coords(from);
        let (to_row, to_col) = cell_coords(to);
        let jump = from_row.abs_diff(to_row) == 2;

        next.clear_cell(from);
        if jump {
            if let Some(mid) = cell_index((from_row + to_row) / 2, (from_col + to_col) / 2) {
                next.clear_cell(mid);
            }
        }

        let promoted = !piece.king && to_row == crown_row(piece.side);
        let code = if piece.king || promoted { KING } else { MAN };
        next.set_cell(piece.side, to, code);

        // jumps and man moves are progress; king slides are not
        next.since_progress = if jump || !piece.king {
            0
        } else {
            self.since_progress.saturating_add(1)
        };
        (next, promoted)
    }

    pub(crate) fn end_turn(mut self) -> CheckersPosition {
        self.side = self.side.opponent();
        self.children = OnceCell::new();
        self
    }

    /// Replays every sub-move of `action`, returning the position after each.
    ///
    /// The last entry is the completed turn, with the opponent to move; the
    /// earlier ones are the intermediate landings of a jump chain.
    pub fn replay(&self, action: &CheckersAction) -> Result<Vec<CheckersPosition>, GameError> {
        if action.side != self.side {
            return Err(GameError::illegal_action(
                action,
                format!("it is {}'s turn", self.side),
            ));
        }

        let mut frames = Vec::new();
        let mut current = self.clone();
        for step in action.steps() {
            current.check_step(action, step)?;
            let (next, _) = current.step(step.from, step.to);
            frames.push(next.clone());
            current = next;
        }

        if let Some(last) = frames.pop() {
            frames.push(last.end_turn());
        }
        Ok(frames)
    }

    /// Applies the whole turn described by `action`.
    pub fn apply(&self, action: &CheckersAction) -> Result<CheckersPosition, GameError> {
        self.replay(action)?
            .pop()
            .ok_or_else(|| GameError::illegal_action(action, "empty action chain"))
    }

    fn check_step(&self, action: &CheckersAction, step: &CheckersAction) -> Result<(), GameError> {
        if step.from >= 32 || step.to >= 32 {
            return Err(GameError::illegal_action(action, "cell index out of range"));
        }
        let piece = match self.cell(step.from) {
            Some(piece) if piece.side == self.side => piece,
            _ => {
                return Err(GameError::illegal_action(
                    action,
                    format!("no {} piece on cell {}", self.side, step.from),
                ))
            }
        };
        if !self.is_empty(step.to) {
            return Err(GameError::illegal_action(
                action,
                format!("cell {} is occupied", step.to),
            ));
        }

        let (from_row, from_col) = cell_coords(step.from);
        let (to_row, to_col) = cell_coords(step.to);
        let distance = from_row.abs_diff(to_row);
        let forward = match piece.side {
            Side::First => to_row > from_row,
            Side::Second => to_row < from_row,
        };
        if distance != from_col.abs_diff(to_col) || !(piece.king || forward) {
            return Err(GameError::illegal_action(
                action,
                format!("{} -> {} is not a diagonal move for this piece", step.from, step.to),
            ));
        }

        match distance {
            1 => Ok(()),
            2 => {
                let captured = cell_index((from_row + to_row) / 2, (from_col + to_col) / 2)
                    .and_then(|mid| self.cell(mid));
                match captured {
                    Some(victim) if victim.side != self.side => Ok(()),
                    _ => Err(GameError::illegal_action(
                        action,
                        format!("{} -> {} jumps over no enemy piece", step.from, step.to),
                    )),
                }
            }
            _ => Err(GameError::illegal_action(
                action,
                format!("{} -> {} is too long", step.from, step.to),
            )),
        }
    }
}

/// Row on which a man of `side` is crowned.
pub(crate) fn crown_row(side: Side) -> u8 {
    match side {
        Side::First => 7,
        Side::Second => 0,
    }
}

impl Default for CheckersPosition {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for CheckersPosition {
    fn clone(&self) -> Self {
        CheckersPosition {
            cells: self.cells,
            side: self.side,
            since_progress: self.since_progress,
            children: OnceCell::new(),
        }
    }
}

impl PartialEq for CheckersPosition {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells
            && self.side == other.side
            && self.since_progress == other.since_progress
    }
}

impl Eq for CheckersPosition {}

impl Hash for CheckersPosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.cells.hash(state);
        self.side.hash(state);
        self.since_progress.hash(state);
    }
}

impl fmt::Debug for CheckersPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("CheckersPosition")
            .field("cells", &self.cells)
            .field("side", &self.side)
            .field("since_progress", &self.since_progress)
            .finish()
    }
}

impl fmt::Display for CheckersPosition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in (0..8).rev() {
            let line: Vec<String> = (0..8)
                .map(|col| match self.piece_at(row, col) {
                    Some(piece) => piece.display_char().to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "{} to move", self.side)
    }
}

impl GameState for CheckersPosition {
    type Action = CheckersAction;

    fn side_to_move(&self) -> Side {
        self.side
    }

    fn children(&self) -> Cow<'_, [SearchNode<Self>]> {
        Cow::Borrowed(self.children.get_or_init(|| self.generate_children()).as_slice())
    }

    fn is_game_over(&self) -> bool {
        self.since_progress >= DRAW_PLY_LIMIT || self.children().is_empty()
    }

    fn winner(&self) -> Result<Outcome, GameError> {
        if self.since_progress >= DRAW_PLY_LIMIT {
            return Ok(Outcome::Draw);
        }
        if !self.children().is_empty() {
            return Err(GameError::NotGameOver);
        }
        // unable to move is always a loss
        Ok(Outcome::Winner(self.side.opponent()))
    }
}
