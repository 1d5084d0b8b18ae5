#[cfg(test)]
mod tests {
    use crate::checkers::{cell_coords, cell_index, CheckersAction, CheckersPiece, CheckersPosition};
    use crate::core::{GameError, GameState, Outcome, Side};
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use std::borrow::Cow;
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    /// Builds a position from (row, col, piece) triples.
    fn setup(pieces: &[(u8, u8, char)], side: Side) -> CheckersPosition {
        let mut grid = [['.'; 8]; 8];
        for &(row, col, c) in pieces {
            grid[row as usize][col as usize] = c;
        }
        let rows: Vec<String> = (0..8)
            .rev()
            .map(|row| {
                grid[row]
                    .iter()
                    .map(|c| c.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect();
        let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
        CheckersPosition::from_setup(&rows, side).unwrap()
    }

    fn idx(row: u8, col: u8) -> u8 {
        cell_index(row, col).unwrap()
    }

    fn hash_of(position: &CheckersPosition) -> u64 {
        let mut hasher = DefaultHasher::new();
        position.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_cell_index_round_trip() {
        for index in 0..32 {
            let (row, col) = cell_coords(index);
            assert_eq!(cell_index(row, col), Some(index));
        }
        assert_eq!(cell_index(0, 1), None);
        assert_eq!(cell_index(8, 0), None);
    }

    #[test]
    fn test_cells_past_the_board_are_empty() {
        let position = CheckersPosition::new();
        assert!(position.cell(0).is_some());
        assert!(position.cell(31).is_some());
        assert_eq!(position.cell(32), None);
        assert_eq!(position.cell(u8::MAX), None);
        assert!(position.is_empty(40));
    }

    #[test]
    fn test_initial_position_has_seven_slides() {
        let position = CheckersPosition::new();
        let children = position.children();
        assert_eq!(children.len(), 7);
        assert!(children.iter().all(|child| !child.action.is_jump()));
        assert!(children
            .iter()
            .all(|child| cell_coords(child.action.from).0 == 2));
    }

    #[test]
    fn test_children_are_generated_once() {
        let position = CheckersPosition::new();
        let first = position.children();
        let second = position.children();
        assert!(matches!(first, Cow::Borrowed(_)));
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));

        // a clone starts without the cache but compares equal
        let copy = position.clone();
        assert_eq!(copy, position);
        assert_eq!(hash_of(&copy), hash_of(&position));
        assert!(!std::ptr::eq(copy.children().as_ptr(), first.as_ptr()));
        assert_eq!(copy.children().len(), 7);

        let counted = position.clone().with_progress_counter(5);
        assert_ne!(counted, position);
        assert_eq!(counted.children().len(), 7);
    }

    #[test]
    fn test_setup_matches_initial_position() {
        let mut pieces = Vec::new();
        for index in 0..12 {
            let (row, col) = cell_coords(index);
            pieces.push((row, col, 'b'));
        }
        for index in 20..32 {
            let (row, col) = cell_coords(index);
            pieces.push((row, col, 'r'));
        }
        let parsed = setup(&pieces, Side::First);
        let initial = CheckersPosition::new();
        assert_eq!(parsed, initial);
        assert_eq!(hash_of(&parsed), hash_of(&initial));
        assert_eq!(parsed.piece_count(Side::First), (12, 0));
        assert_eq!(parsed.piece_count(Side::Second), (12, 0));
    }

    #[test]
    fn test_capture_is_forced() {
        let position = setup(
            &[(0, 0, 'b'), (2, 2, 'b'), (3, 3, 'r'), (7, 7, 'r')],
            Side::First,
        );
        let children = position.children();
        assert_eq!(children.len(), 1);
        let jump = &children[0];
        assert!(jump.action.is_jump());
        assert_eq!(jump.action.from, idx(2, 2));
        assert_eq!(jump.action.to, idx(4, 4));
        assert_eq!(jump.position.piece_at(3, 3), None);
        assert_eq!(jump.position.progress_counter(), 0);
        assert_eq!(jump.position.side_to_move(), Side::Second);
    }

    #[test]
    fn test_double_jump_is_one_child() {
        let position = setup(
            &[(1, 1, 'b'), (2, 2, 'r'), (4, 4, 'r'), (7, 7, 'r')],
            Side::First,
        );
        let children = position.children();
        assert_eq!(children.len(), 1);

        let chain = &children[0];
        assert_eq!(chain.action.steps().count(), 2);
        assert_eq!(chain.action.landing_cells(), vec![idx(3, 3), idx(5, 5)]);
        assert_eq!(chain.action.captured_cells(), vec![idx(2, 2), idx(4, 4)]);
        assert_eq!(chain.action.final_cell(), idx(5, 5));
        assert_eq!(
            chain.position.piece_at(5, 5),
            Some(CheckersPiece {
                side: Side::First,
                king: false
            })
        );
        assert_eq!(chain.position.piece_count(Side::Second), (1, 0));

        let frames = position.replay(&chain.action).unwrap();
        assert_eq!(frames.len(), 2);
        // intermediate landing: first victim gone, second still on the board
        assert!(frames[0].piece_at(3, 3).is_some());
        assert_eq!(frames[0].piece_at(2, 2), None);
        assert!(frames[0].piece_at(4, 4).is_some());
        assert_eq!(frames[0].side_to_move(), Side::First);
        assert_eq!(frames[1], chain.position);
    }

    #[test]
    fn test_branching_chains_are_separate_children() {
        // after the first jump the man can continue left or right
        let position = setup(
            &[(1, 3, 'b'), (2, 4, 'r'), (4, 4, 'r'), (4, 6, 'r')],
            Side::First,
        );
        let children = position.children();
        assert_eq!(children.len(), 2);
        let mut finals: Vec<u8> = children
            .iter()
            .map(|child| child.action.final_cell())
            .collect();
        finals.sort_unstable();
        let mut expected = vec![idx(5, 3), idx(5, 7)];
        expected.sort_unstable();
        assert_eq!(finals, expected);
    }

    #[test]
    fn test_crowning_ends_the_chain() {
        let position = setup(
            &[(5, 1, 'b'), (6, 2, 'r'), (6, 4, 'r')],
            Side::First,
        );
        let children = position.children();
        assert_eq!(children.len(), 1);

        let jump = &children[0];
        assert!(jump.action.next.is_none());
        assert_eq!(jump.action.to, idx(7, 3));
        assert_eq!(
            jump.position.piece_at(7, 3),
            Some(CheckersPiece {
                side: Side::First,
                king: true
            })
        );
        // the second red man survives
        assert!(jump.position.piece_at(6, 4).is_some());
    }

    #[test]
    fn test_man_never_jumps_backward() {
        // enemies behind with empty landing cells
        let position = setup(
            &[(3, 3, 'b'), (2, 2, 'r'), (2, 4, 'r')],
            Side::First,
        );
        let children = position.children();
        assert!(children.iter().all(|child| !child.action.is_jump()));
        let mut targets: Vec<u8> = children.iter().map(|child| child.action.to).collect();
        targets.sort_unstable();
        let mut expected = vec![idx(4, 2), idx(4, 4)];
        expected.sort_unstable();
        assert_eq!(targets, expected);
    }

    #[test]
    fn test_king_moves_in_four_directions() {
        let position = setup(&[(3, 3, 'B'), (7, 7, 'r')], Side::First);
        let children = position.children();
        assert_eq!(children.len(), 4);
        for child in children.iter() {
            assert_eq!(child.position.progress_counter(), 1);
        }
    }

    #[test]
    fn test_man_moves_reset_progress() {
        let position = setup(&[(2, 2, 'b'), (7, 7, 'r')], Side::First).with_progress_counter(30);
        for child in position.children().iter() {
            assert_eq!(child.position.progress_counter(), 0);
        }
    }

    #[test]
    fn test_progress_limit_draw_with_moves_left() {
        let position = setup(&[(3, 3, 'B'), (6, 6, 'R')], Side::First).with_progress_counter(39);
        assert!(!position.is_game_over());

        let next = position.children()[0].position.clone();
        assert_eq!(next.progress_counter(), 40);
        assert!(next.is_game_over());
        assert!(!next.children().is_empty());
        assert_eq!(next.winner(), Ok(Outcome::Draw));
    }

    #[test]
    fn test_no_moves_is_a_loss() {
        let blocked = setup(&[(0, 0, 'b'), (1, 1, 'r'), (2, 2, 'r')], Side::First);
        assert!(blocked.children().is_empty());
        assert!(blocked.is_game_over());
        assert_eq!(blocked.winner(), Ok(Outcome::Winner(Side::Second)));

        let wiped_out = setup(&[(5, 5, 'r')], Side::First);
        assert_eq!(wiped_out.winner(), Ok(Outcome::Winner(Side::Second)));
    }

    #[test]
    fn test_winner_on_live_position_is_an_error() {
        assert_eq!(CheckersPosition::new().winner(), Err(GameError::NotGameOver));
    }

    #[test]
    fn test_random_playout_properties() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut position = CheckersPosition::new();
        for _ in 0..150 {
            let children = position.children().into_owned();
            if position.progress_counter() < 40 {
                assert_eq!(children.is_empty(), position.is_game_over());
            }
            if children.iter().any(|child| child.action.is_jump()) {
                assert!(children.iter().all(|child| child.action.is_jump()));
            }
            for child in &children {
                assert_eq!(position.apply(&child.action).unwrap(), child.position);
            }
            if position.is_game_over() {
                break;
            }
            match children.choose(&mut rng) {
                Some(child) => position = child.position.clone(),
                None => break,
            }
        }
    }

    #[test]
    fn test_apply_rejects_illegal_actions() {
        let position = CheckersPosition::new();

        // backwards for a man
        let result = position.apply(&CheckersAction::slide(idx(2, 2), idx(1, 1), Side::First));
        assert!(matches!(result, Err(GameError::IllegalAction { .. })));

        // not this side's turn
        let result = position.apply(&CheckersAction::slide(idx(5, 1), idx(4, 0), Side::Second));
        assert!(matches!(result, Err(GameError::IllegalAction { .. })));

        // jumping over an empty cell
        let result = position.apply(&CheckersAction::jump(idx(2, 2), idx(4, 4), Side::First, None));
        assert!(matches!(result, Err(GameError::IllegalAction { .. })));
    }

    #[test]
    fn test_setup_rejects_unplayable_cells() {
        let rows = [
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". . . . . . . .",
            ". b . . . . . .",
        ];
        assert!(matches!(
            CheckersPosition::from_setup(&rows, Side::First),
            Err(GameError::InvalidSetup(_))
        ));
    }

    #[test]
    fn test_action_display_lists_every_landing() {
        let action = CheckersAction::jump(
            idx(1, 1),
            idx(3, 3),
            Side::First,
            Some(CheckersAction::jump(idx(3, 3), idx(5, 5), Side::First, None)),
        );
        assert_eq!(action.to_string(), "First: 4 -> 13 -> 22");
    }
}
