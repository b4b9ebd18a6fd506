//! Rules engine: legality, state transitions, move generation, and scoring.
//!
//! All functions here are pure. A transition clones the incoming state and
//! returns the result; the caller's state is never touched.
//!
//! Callers drive a game as:
//! 1. `check_victory` - stop if the state is terminal
//! 2. `get_actions` - list what the player to move may do
//! 3. `get_next_state` - apply the chosen action

use std::ops::{Add, AddAssign};

use crate::action::Action;
use crate::board::{Color, Coord, Kind, Piece, Square};
use crate::constants::{DIRECTIONS, MAX_CARRY, MAX_STEPS};
use crate::error::RulesError;
use crate::road::get_path;
use crate::state::State;

/// Final score of a game as `(black, white)`.
///
/// Terminal results are one of [`Outcome::BLACK_WINS`], [`Outcome::WHITE_WINS`]
/// or [`Outcome::DRAW`]. Search code also sums and scales outcomes, so the
/// components are plain floats.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Outcome {
    pub black: f64,
    pub white: f64,
}

impl Outcome {
    pub const BLACK_WINS: Outcome = Outcome::new(1.0, 0.0);
    pub const WHITE_WINS: Outcome = Outcome::new(0.0, 1.0);
    pub const DRAW: Outcome = Outcome::new(0.5, 0.5);

    pub const fn new(black: f64, white: f64) -> Self {
        Self { black, white }
    }

    /// Outright win for `color`.
    pub fn win_for(color: Color) -> Self {
        match color {
            Color::Black => Self::BLACK_WINS,
            Color::White => Self::WHITE_WINS,
        }
    }

    /// The component belonging to `color`.
    #[inline]
    pub fn score(self, color: Color) -> f64 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
        }
    }

    /// Both components multiplied by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self::new(self.black * factor, self.white * factor)
    }
}

impl Add for Outcome {
    type Output = Outcome;

    fn add(self, rhs: Outcome) -> Outcome {
        Outcome::new(self.black + rhs.black, self.white + rhs.white)
    }
}

impl AddAssign for Outcome {
    fn add_assign(&mut self, rhs: Outcome) {
        *self = *self + rhs;
    }
}

/// Unit direction and number of steps from `start` to `end`, if the two lie on
/// the same row or column and differ.
fn direction(start: Coord, end: Coord) -> Option<((i8, i8), usize)> {
    let drow = end.row - start.row;
    let dcol = end.col - start.col;
    if (drow != 0 && dcol != 0) || (drow == 0 && dcol == 0) {
        return None;
    }
    let steps = (drow.abs() + dcol.abs()) as usize;
    Some(((drow.signum(), dcol.signum()), steps))
}

fn validate_move(
    state: &State,
    start: Coord,
    end: Coord,
    carry_size: usize,
    drop_list: &[usize],
) -> bool {
    let Some(start_sq) = state.board.get(start) else {
        return false;
    };
    if !end.in_bounds() {
        return false;
    }

    // Player must control the square they move from
    if !start_sq.is_controlled_by(state.to_move) {
        return false;
    }

    if carry_size > MAX_CARRY || carry_size > start_sq.height() {
        return false;
    }

    let Some((dir, steps)) = direction(start, end) else {
        return false;
    };
    if !(1..=MAX_STEPS).contains(&steps) || drop_list.len() != steps {
        return false;
    }
    if drop_list.iter().any(|&d| d < 1 || d > carry_size) {
        return false;
    }
    if drop_list.iter().try_fold(0usize, |acc, &d| acc.checked_add(d)) != Some(carry_size) {
        return false;
    }

    // Walls block passing through and landing on a square
    (1..=steps as i8).all(|i| {
        state
            .board
            .get(start.offset(dir, i))
            .is_some_and(|sq| !sq.is_wall())
    })
}

/// Check whether `action` is legal in `state`.
pub fn validate_action(state: &State, action: &Action) -> bool {
    match action {
        Action::Place { coord, piece } => {
            state.board.get(*coord).is_some_and(Square::is_empty)
                && piece.color() == state.to_move
        }
        Action::Move {
            start,
            end,
            carry_size,
            drop_list,
        } => validate_move(state, *start, *end, *carry_size, drop_list),
    }
}

/// Apply `action` to `state` and return the resulting state.
///
/// # Errors
/// [`RulesError::InvalidAction`] if the action is not legal in `state`, or if
/// the player placing a piece has no stones left.
pub fn get_next_state(state: &State, action: &Action) -> Result<State, RulesError> {
    let invalid = || RulesError::InvalidAction {
        action: action.clone(),
    };
    if !validate_action(state, action) {
        return Err(invalid());
    }

    let mover = state.to_move;
    let mut next = state.clone();
    next.to_move = mover.opponent();

    match action {
        Action::Place { coord, piece } => {
            let stones = next.stones_mut(mover);
            *stones = stones.checked_sub(1).ok_or_else(invalid)?;
            next.board.get_mut(*coord).ok_or_else(invalid)?.push(*piece);
        }
        Action::Move {
            start,
            end,
            carry_size,
            drop_list,
        } => {
            let (dir, _) = direction(*start, *end).ok_or_else(invalid)?;
            let carried = next
                .board
                .get_mut(*start)
                .ok_or_else(invalid)?
                .take_top(*carry_size);

            // The bottom of the carried group is dropped first
            let mut rest = carried.as_slice();
            for (i, &count) in drop_list.iter().enumerate() {
                let (dropped, tail) = rest.split_at(count);
                next.board
                    .get_mut(start.offset(dir, i as i8 + 1))
                    .ok_or_else(invalid)?
                    .extend_from_slice(dropped);
                rest = tail;
            }
        }
    }

    Ok(next)
}

fn push_compositions(
    remaining: usize,
    parts: usize,
    prefix: &mut Vec<usize>,
    out: &mut Vec<Vec<usize>>,
) {
    if parts == 0 {
        if remaining == 0 {
            out.push(prefix.clone());
        }
        return;
    }
    if remaining < parts {
        return;
    }
    for first in 1..=remaining - (parts - 1) {
        prefix.push(first);
        push_compositions(remaining - first, parts - 1, prefix, out);
        prefix.pop();
    }
}

/// Every way to drop `carry` pieces over `steps` squares, at least one per
/// square, in lexicographic order.
///
/// ```
/// use tak_mcts::rules::drop_lists;
/// assert_eq!(drop_lists(3, 2), vec![vec![1, 2], vec![2, 1]]);
/// ```
pub fn drop_lists(carry: usize, steps: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if steps == 0 {
        return out;
    }
    push_compositions(carry, steps, &mut Vec::with_capacity(steps), &mut out);
    out
}

/// List every legal action for the player to move.
///
/// Places come first for each empty square (flat, then standing); moves are
/// generated for every controlled stack, direction, carry size, step count
/// and drop list, then filtered through [`validate_action`].
///
/// # Errors
/// [`RulesError::PreconditionViolation`] if either player has no stones left.
/// Call [`check_victory`] first.
pub fn get_actions(state: &State) -> Result<Vec<Action>, RulesError> {
    if state.black_stones == 0 || state.white_stones == 0 {
        return Err(RulesError::PreconditionViolation(
            "get_actions called when a player has no stones",
        ));
    }

    let mover = state.to_move;
    let mut actions = Vec::new();

    for (coord, sq) in state.board.iter() {
        if sq.is_empty() {
            actions.push(Action::place(coord, Piece::new(Kind::Flat, mover)));
            actions.push(Action::place(coord, Piece::new(Kind::Standing, mover)));
        } else if sq.is_controlled_by(mover) {
            let max_carry = sq.height().min(MAX_CARRY);
            for dir in DIRECTIONS {
                for carry in 1..=max_carry {
                    for steps in 1..=carry {
                        let end = coord.offset(dir, steps as i8);
                        for drops in drop_lists(carry, steps) {
                            actions.push(Action::movement(coord, end, carry, drops));
                        }
                    }
                }
            }
        }
    }

    actions.retain(|a| validate_action(state, a));
    Ok(actions)
}

/// Score `state` if the game is over.
///
/// The game ends when a reserve runs out or the board fills (most flats on top
/// wins), or when a road is completed. If one move completes roads for both
/// colors, the player who made it wins.
pub fn check_victory(state: &State) -> Option<Outcome> {
    let board = &state.board;

    if state.black_stones == 0 || state.white_stones == 0 || !board.has_empty_square() {
        let black = board.count_flats(Color::Black);
        let white = board.count_flats(Color::White);
        return Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => Outcome::BLACK_WINS,
            std::cmp::Ordering::Less => Outcome::WHITE_WINS,
            std::cmp::Ordering::Equal => Outcome::DRAW,
        });
    }

    match get_path(state) {
        (true, false) => Some(Outcome::BLACK_WINS),
        (false, true) => Some(Outcome::WHITE_WINS),
        (true, true) => Some(Outcome::win_for(state.to_move.opponent())),
        (false, false) => None,
    }
}
