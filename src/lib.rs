//! Tak-MCTS: a 4x4 Tak rules engine with Monte Carlo Tree Search players.
//!
//! Players place flat stones or walls and move stacks to build a road of
//! flats between opposite edges of the board.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and search defaults
//! - [`board`] - Colors, pieces, squares and the grid
//! - [`action`] - Place and Move actions
//! - [`state`] - Game state and the initial position
//! - [`rules`] - Legality, transitions, move generation and scoring
//! - [`road`] - Edge-to-edge road detection
//! - [`playout`] - Random game simulation
//! - [`tree`] - MCTS search tree
//! - [`mcts`] - The four search variants
//! - [`tournament`] - Engine-vs-engine games
//!
//! ## Example
//!
//! ```
//! use fastrand::Rng;
//! use tak_mcts::board::Color;
//! use tak_mcts::mcts::default_mcts;
//! use tak_mcts::rules::{check_victory, get_next_state};
//! use tak_mcts::state::default_initial_state;
//!
//! let mut rng = Rng::with_seed(1);
//! let state = default_initial_state(Color::Black, 15);
//! assert!(check_victory(&state).is_none());
//!
//! let action = default_mcts(&state, 50, 2.0, &mut rng).unwrap();
//! let next = get_next_state(&state, &action).unwrap();
//! println!("{action}\n{next}");
//! ```

pub mod action;
pub mod board;
pub mod constants;
pub mod error;
pub mod mcts;
pub mod playout;
pub mod road;
pub mod rules;
pub mod state;
pub mod tournament;
pub mod tree;
