//! Monte Carlo playouts (random game simulation).
//!
//! A playout picks uniformly among the legal actions until the game ends and
//! reports the final score. The random source is supplied by the caller so
//! searches can be replayed from a seed.

use fastrand::Rng;
use log::trace;

use crate::error::RulesError;
use crate::rules::{Outcome, check_victory, get_actions, get_next_state};
use crate::state::State;

/// Play uniformly random actions from `state` until the game ends.
///
/// `state` itself is left unchanged.
pub fn simulate(state: &State, rng: &mut Rng) -> Result<Outcome, RulesError> {
    let mut current = state.clone();
    let mut plies = 0usize;

    loop {
        if let Some(outcome) = check_victory(&current) {
            trace!("playout finished after {plies} plies: {outcome:?}");
            return Ok(outcome);
        }

        let actions = get_actions(&current)?;
        if actions.is_empty() {
            // Unreachable for a non-terminal state: an empty square always
            // admits a placement.
            return Err(RulesError::PreconditionViolation(
                "no legal actions in a non-terminal state",
            ));
        }
        let action = &actions[rng.usize(..actions.len())];
        current = get_next_state(&current, action)?;
        plies += 1;
    }
}
