//! Property tests over random games.
//!
//! Invariants checked at every ply of a seeded random game:
//! - Pieces on the board plus the reserve stay constant per color.
//! - A placement adds exactly one piece on top of an empty square and
//!   costs the mover one stone.
//! - A move conserves pieces, never lands on or crosses a wall, and spreads
//!   exactly `carry_size` pieces over its destination squares.
//! - Every generated action validates, and generation is repeatable.
//! - A finished game always scores to a total of 1.

use fastrand::Rng;
use proptest::prelude::*;

use tak_mcts::action::Action;
use tak_mcts::board::{Color, Coord};
use tak_mcts::rules::{check_victory, get_actions, get_next_state, validate_action};
use tak_mcts::state::{State, default_initial_state};

fn height(state: &State, c: Coord) -> usize {
    state.board.get(c).map_or(0, |sq| sq.height())
}

fn assert_reserve_conserved(state: &State, stones: u32) {
    for color in [Color::Black, Color::White] {
        let total = state.board.count_pieces(color) + state.stones(color) as usize;
        assert_eq!(total, stones as usize, "{color} pieces not conserved");
    }
}

fn assert_transition(before: &State, action: &Action, after: &State) {
    assert_eq!(after.to_move, before.to_move.opponent());

    match action {
        Action::Place { coord, piece } => {
            let mover = before.to_move;
            assert_eq!(after.stones(mover), before.stones(mover) - 1);
            assert_eq!(after.stones(mover.opponent()), before.stones(mover.opponent()));
            let sq = after.board.get(*coord).unwrap();
            assert_eq!(sq.pieces(), &[*piece]);
            for (c, s) in before.board.iter() {
                if c != *coord {
                    assert_eq!(after.board.get(c), Some(s));
                }
            }
        }
        Action::Move {
            start,
            end,
            carry_size,
            drop_list,
        } => {
            assert_eq!(before.black_stones, after.black_stones);
            assert_eq!(before.white_stones, after.white_stones);
            assert_eq!(before.board.total_pieces(), after.board.total_pieces());
            assert_eq!(height(before, *start) - height(after, *start), *carry_size);

            let drow = (end.row - start.row).signum();
            let dcol = (end.col - start.col).signum();
            let mut gained = 0;
            for (i, &d) in drop_list.iter().enumerate() {
                let c = start.offset((drow, dcol), i as i8 + 1);
                assert!(!before.board.get(c).unwrap().is_wall());
                let delta = height(after, c) - height(before, c);
                assert_eq!(delta, d);
                gained += delta;
            }
            assert_eq!(gained, *carry_size);
        }
    }
}

/// Play a random game, checking invariants after every action.
fn run_checked_game(seed: u64, stones: u32, first: Color, max_plies: usize) {
    let mut rng = Rng::with_seed(seed);
    let mut state = default_initial_state(first, stones);

    for _ in 0..max_plies {
        assert_reserve_conserved(&state, stones);
        if let Some(outcome) = check_victory(&state) {
            assert_eq!(outcome.black + outcome.white, 1.0);
            return;
        }

        let actions = get_actions(&state).unwrap();
        assert!(!actions.is_empty());
        assert_eq!(actions, get_actions(&state).unwrap());
        assert!(actions.iter().all(|a| validate_action(&state, a)));

        let action = &actions[rng.usize(..actions.len())];
        let next = get_next_state(&state, action).unwrap();
        assert_transition(&state, action, &next);
        state = next;
    }
}

#[test]
fn default_game_respects_invariants() {
    run_checked_game(20260101, 15, Color::Black, 400);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_games_respect_invariants(
        seed in any::<u64>(),
        stones in 3u32..=15,
        white_first in any::<bool>(),
    ) {
        let first = if white_first { Color::White } else { Color::Black };
        run_checked_game(seed, stones, first, 300);
    }
}
