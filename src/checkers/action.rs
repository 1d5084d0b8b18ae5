use crate::core::Side;
use std::fmt;
use std::iter;

/// Converts a playable cell (row, col) to its index 0..32.
///
/// Row 0 is First's home row. Playable cells are those with `row + col`
/// even, four per row.
pub fn cell_index(row: u8, col: u8) -> Option<u8> {
    if row < 8 && col < 8 && (row + col) % 2 == 0 {
        Some(row * 4 + col / 2)
    } else {
        None
    }
}

pub fn cell_coords(index: u8) -> (u8, u8) {
    let row = index / 4;
    let col = (index % 4) * 2 + row % 2;
    (row, col)
}

pub(crate) fn offset_cell(index: u8, d_row: i8, d_col: i8) -> Option<u8> {
    let (row, col) = cell_coords(index);
    let row = row as i8 + d_row;
    let col = col as i8 + d_col;
    if (0..8).contains(&row) && (0..8).contains(&col) {
        cell_index(row as u8, col as u8)
    } else {
        None
    }
}

/// One checkers turn.
///
/// A jump that continues capturing links to the next sub-jump through
/// `next`, so a whole multi-jump chain is a single value. The chain is
/// built from its last jump backwards and never cycles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CheckersAction {
    pub from: u8,
    pub to: u8,
    pub side: Side,
    pub next: Option<Box<CheckersAction>>,
}

impl CheckersAction {
    pub fn slide(from: u8, to: u8, side: Side) -> Self {
        CheckersAction {
            from,
            to,
            side,
            next: None,
        }
    }

    pub fn jump(from: u8, to: u8, side: Side, next: Option<CheckersAction>) -> Self {
        CheckersAction {
            from,
            to,
            side,
            next: next.map(Box::new),
        }
    }

    /// Every sub-move of the chain, starting with `self`.
    pub fn steps(&self) -> impl Iterator<Item = &CheckersAction> {
        iter::successors(Some(self), |step| step.next.as_deref())
    }

    /// Landing cell of every sub-move; the last one is where the piece ends.
    pub fn landing_cells(&self) -> Vec<u8> {
        self.steps().map(|step| step.to).collect()
    }

    pub fn final_cell(&self) -> u8 {
        self.steps().last().map_or(self.to, |step| step.to)
    }

    pub fn is_jump(&self) -> bool {
        let (from_row, _) = cell_coords(self.from);
        let (to_row, _) = cell_coords(self.to);
        from_row.abs_diff(to_row) == 2
    }

    /// Cells of the pieces captured along the chain, in order.
    pub fn captured_cells(&self) -> Vec<u8> {
        self.steps()
            .filter(|step| step.is_jump())
            .filter_map(|step| {
                let (r1, c1) = cell_coords(step.from);
                let (r2, c2) = cell_coords(step.to);
                cell_index((r1 + r2) / 2, (c1 + c2) / 2)
            })
            .collect()
    }
}

impl fmt::Display for CheckersAction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.side, self.from)?;
        for step in self.steps() {
            write!(f, " -> {}", step.to)?;
        }
        Ok(())
    }
}
