//! Game driver: engine-vs-engine games and round-robin tournaments.
//!
//! A game always follows the calling contract of the rules engine: check for
//! a result, ask the engine to move, apply the move.

use anyhow::{Context, Result};
use fastrand::Rng;
use log::info;

use crate::action::Action;
use crate::board::Color;
use crate::mcts::{SearchConfig, Variant, search};
use crate::rules::{Outcome, check_victory, get_next_state};
use crate::state::{State, default_initial_state};

/// A search variant with its parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub variant: Variant,
    pub config: SearchConfig,
}

impl Player {
    pub fn new(variant: Variant, config: SearchConfig) -> Self {
        Self { variant, config }
    }

    pub fn choose(&self, state: &State, rng: &mut Rng) -> Result<Action> {
        search(state, self.variant, &self.config, rng)
            .with_context(|| format!("{} failed to choose an action", self.variant.short_name()))
    }
}

/// Result of one finished game.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRecord {
    pub black: Variant,
    pub white: Variant,
    pub outcome: Outcome,
    /// Number of actions played
    pub plies: usize,
}

impl GameRecord {
    /// `black,white,score_black,score_white`
    pub fn csv_row(&self) -> String {
        format!(
            "{},{},{},{}",
            self.black.short_name(),
            self.white.short_name(),
            self.outcome.black,
            self.outcome.white
        )
    }
}

/// Play `black` against `white` from `start` until the game ends.
///
/// `on_move` sees every state right after an action is applied.
pub fn play_game<F>(
    black: &Player,
    white: &Player,
    start: &State,
    rng: &mut Rng,
    mut on_move: F,
) -> Result<(Outcome, usize)>
where
    F: FnMut(&Action, &State),
{
    let mut state = start.clone();
    let mut plies = 0;

    loop {
        if let Some(outcome) = check_victory(&state) {
            return Ok((outcome, plies));
        }

        let player = match state.to_move {
            Color::Black => black,
            Color::White => white,
        };
        let action = player.choose(&state, rng)?;
        state = get_next_state(&state, &action)
            .with_context(|| format!("engine produced an illegal action at ply {plies}"))?;
        plies += 1;
        on_move(&action, &state);
    }
}

/// Every variant plays every variant (itself included) as Black, `rounds`
/// times over. Each game starts from an empty board with Black to move.
///
/// `on_record` is called as each game finishes.
pub fn round_robin<F>(
    variants: &[Variant],
    config: &SearchConfig,
    stones: u32,
    rounds: usize,
    rng: &mut Rng,
    mut on_record: F,
) -> Result<Vec<GameRecord>>
where
    F: FnMut(&GameRecord) -> Result<()>,
{
    let start = default_initial_state(Color::Black, stones);
    let mut records = Vec::with_capacity(rounds * variants.len() * variants.len());

    for round in 0..rounds {
        for &b in variants {
            for &w in variants {
                let black = Player::new(b, config.clone());
                let white = Player::new(w, config.clone());
                let (outcome, plies) = play_game(&black, &white, &start, rng, |_, _| {})
                    .with_context(|| {
                        format!("round {round}: {} vs {}", b.short_name(), w.short_name())
                    })?;

                let record = GameRecord {
                    black: b,
                    white: w,
                    outcome,
                    plies,
                };
                info!(
                    "round {round}: {} (black) vs {} (white) -> {}/{} in {plies} plies",
                    b.short_name(),
                    w.short_name(),
                    outcome.black,
                    outcome.white
                );
                on_record(&record)?;
                records.push(record);
            }
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick() -> SearchConfig {
        SearchConfig {
            iterations: 3,
            ..SearchConfig::default()
        }
    }

    #[test]
    fn test_csv_row() {
        let record = GameRecord {
            black: Variant::Default,
            white: Variant::MultiSimulation,
            outcome: Outcome::DRAW,
            plies: 20,
        };
        assert_eq!(record.csv_row(), "def,msm,0.5,0.5");
    }

    #[test]
    fn test_play_game_finishes() {
        let black = Player::new(Variant::Default, quick());
        let white = Player::new(Variant::DecisiveMove, quick());
        let start = default_initial_state(Color::Black, 6);
        let mut seen = 0;

        let (outcome, plies) =
            play_game(&black, &white, &start, &mut Rng::with_seed(5), |_, _| seen += 1).unwrap();
        assert_eq!(outcome.black + outcome.white, 1.0);
        assert_eq!(plies, seen);
        assert!(plies > 0);
    }

    #[test]
    fn test_round_robin_pairs_every_variant() {
        let variants = [Variant::Default, Variant::WeightedBackpropagation];
        let mut rows = Vec::new();
        let records = round_robin(&variants, &quick(), 5, 1, &mut Rng::with_seed(11), |r| {
            rows.push(r.csv_row());
            Ok(())
        })
        .unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(rows.len(), 4);
        assert!(rows[1].starts_with("def,wbp,"));
    }
}
