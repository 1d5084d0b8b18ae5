use duel_ai::checkers::{CheckersAction, CheckersPosition};
use duel_ai::chess::ChessPosition;
use duel_ai::game::{ensure_legal, play_turn};
use duel_ai::player::ai::{AlphaBetaAI, CheckersMaterialEvaluator, ChessMaterialEvaluator};
use duel_ai::player::{AIConfig, GreedyAI, RandomAI};
use duel_ai::{Checkers, Game, GameError, GameState, Policy, SearchNode, Side};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// Drives a game between two policies the way an external referee would.
fn play_out<S: GameState>(
    start: S,
    first: &dyn Policy<S>,
    second: &dyn Policy<S>,
    rng: &mut dyn RngCore,
    max_plies: usize,
) -> (S, usize) {
    let mut position = start;
    let mut plies = 0;
    while !position.is_game_over() && plies < max_plies {
        let policy = match position.side_to_move() {
            Side::First => first,
            Side::Second => second,
        };
        let chosen = play_turn(&position, policy, rng).expect("policy must return a legal child");
        assert_eq!(chosen.position.side_to_move(), position.side_to_move().opponent());
        position = chosen.position;
        plies += 1;
    }
    (position, plies)
}

#[test]
fn checkers_search_beats_random_play() {
    let mut rng = StdRng::seed_from_u64(2024);
    let searcher = AlphaBetaAI::new(3, CheckersMaterialEvaluator::default());
    let (end, plies) = play_out(CheckersPosition::new(), &searcher, &RandomAI, &mut rng, 400);

    assert!(plies > 0);
    if end.is_game_over() {
        let outcome = end.winner().unwrap();
        assert_ne!(outcome.winner(), Some(Side::Second), "random play beat the search");
    }
}

#[test]
fn chess_game_stays_legal() {
    let mut rng = StdRng::seed_from_u64(99);
    let greedy = GreedyAI::new(ChessMaterialEvaluator::default());
    let (end, plies) = play_out(ChessPosition::new(), &greedy, &RandomAI, &mut rng, 60);
    assert!(plies > 0);
    if end.is_game_over() {
        assert!(end.winner().is_ok());
    } else {
        assert_eq!(end.winner(), Err(GameError::NotGameOver));
    }
}

#[test]
fn same_seed_replays_the_same_game() {
    let config = AIConfig::from_json(r#"{"algorithm": "greedy", "evaluator": "material", "seed": 5}"#)
        .unwrap();
    let first = config.build::<Checkers>();
    let second = config.build::<Checkers>();

    let run = || {
        let mut rng = config.rng();
        play_out(Checkers::initial_position(), &*first, &*second, &mut rng, 80).0
    };
    assert_eq!(run(), run());
}

struct Cheater;

impl Policy<CheckersPosition> for Cheater {
    fn pick_move(
        &self,
        position: &CheckersPosition,
        _rng: &mut dyn RngCore,
    ) -> Result<SearchNode<CheckersPosition>, GameError> {
        // moves a man backwards and keeps the board as it was
        Ok(SearchNode::new(
            CheckersAction::slide(9, 5, position.side_to_move()),
            position.clone(),
        ))
    }

    fn name(&self) -> String {
        "cheater".to_string()
    }
}

#[test]
fn illegal_moves_are_protocol_errors() {
    let start = CheckersPosition::new();
    let mut rng = StdRng::seed_from_u64(0);

    let err = play_turn(&start, &Cheater, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        GameError::IllegalMove {
            side: Side::First,
            ..
        }
    ));

    // a child of a different position is not a child of this one
    let elsewhere = start.children()[0].position.clone();
    let foreign = elsewhere.children()[0].clone();
    assert!(ensure_legal(&start, &foreign).is_err());
}
