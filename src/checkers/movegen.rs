use super::action::{offset_cell, CheckersAction};
use super::position::{CheckersPiece, CheckersPosition};
use crate::core::{GameState, SearchNode, Side};

const FIRST_FORWARD: [(i8, i8); 2] = [(1, -1), (1, 1)];
const SECOND_FORWARD: [(i8, i8); 2] = [(-1, -1), (-1, 1)];
const ALL_DIAGONALS: [(i8, i8); 4] = [(1, -1), (1, 1), (-1, -1), (-1, 1)];

fn directions(piece: CheckersPiece) -> &'static [(i8, i8)] {
    match (piece.king, piece.side) {
        (true, _) => &ALL_DIAGONALS,
        (false, Side::First) => &FIRST_FORWARD,
        (false, Side::Second) => &SECOND_FORWARD,
    }
}

impl CheckersPosition {
    /// 合法手生成
    ///
    /// Captures are mandatory: if any piece of the side to move can jump,
    /// only complete jump chains are returned.
    pub(crate) fn generate_children(&self) -> Vec<SearchNode<CheckersPosition>> {
        let side = self.side_to_move();
        let own_cells: Vec<u8> = (0..32)
            .filter(|&index| matches!(self.cell(index), Some(p) if p.side == side))
            .collect();

        let jumps: Vec<SearchNode<CheckersPosition>> = own_cells
            .iter()
            .flat_map(|&index| self.jump_chains(index))
            .map(|(action, landed)| SearchNode::new(action, landed.end_turn()))
            .collect();
        if !jumps.is_empty() {
            return jumps;
        }

        let mut slides = Vec::new();
        for &from in &own_cells {
            let Some(piece) = self.cell(from) else {
                continue;
            };
            for &(d_row, d_col) in directions(piece) {
                if let Some(to) = offset_cell(from, d_row, d_col) {
                    if self.is_empty(to) {
                        let (next, _) = self.step(from, to);
                        slides.push(SearchNode::new(
                            CheckersAction::slide(from, to, side),
                            next.end_turn(),
                        ));
                    }
                }
            }
        }
        slides
    }

    /// Every complete jump chain for the piece on `from`.
    ///
    /// Each landing recursively looks for further jumps by the same piece;
    /// the returned position is the final landing, still with the mover to
    /// play. Crowning ends the chain even if more captures are available.
    fn jump_chains(&self, from: u8) -> Vec<(CheckersAction, CheckersPosition)> {
        let mut chains = Vec::new();
        let Some(piece) = self.cell(from) else {
            return chains;
        };

        for &(d_row, d_col) in directions(piece) {
            let (Some(over), Some(to)) = (
                offset_cell(from, d_row, d_col),
                offset_cell(from, 2 * d_row, 2 * d_col),
            ) else {
                continue;
            };
            let capturable = matches!(self.cell(over), Some(p) if p.side != piece.side);
            if !capturable || !self.is_empty(to) {
                continue;
            }

            let (landed, promoted) = self.step(from, to);
            let further = if promoted {
                Vec::new()
            } else {
                landed.jump_chains(to)
            };

            if further.is_empty() {
                chains.push((CheckersAction::jump(from, to, piece.side, None), landed));
            } else {
                for (rest, end) in further {
                    chains.push((CheckersAction::jump(from, to, piece.side, Some(rest)), end));
                }
            }
        }
        chains
    }
}
