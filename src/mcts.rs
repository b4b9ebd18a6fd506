//! Monte Carlo Tree Search (MCTS) in four variants.
//!
//! Every iteration runs the usual four phases:
//! - Select: descend with a selection policy while nodes are fully expanded
//! - Expand: add one child for a random unexplored action
//! - Simulate: random playout from the new node
//! - Backpropagate: credit the result to the new node and all its ancestors
//!
//! The variants differ only in the selection policy and in how much weight a
//! result carries:
//!
//! | Variant | Selection | Backpropagation |
//! |---|---|---|
//! | [`Variant::Default`] | UCT | weight 1 |
//! | [`Variant::DecisiveMove`] | immediate win, else UCT | weight 1 |
//! | [`Variant::WeightedBackpropagation`] | UCT | weight `2^(depth-1)` |
//! | [`Variant::MultiSimulation`] | UCT | `leaf_simulations` playouts summed, weight `leaf_simulations` |
//!
//! The tree is built from scratch on every call and dropped before returning.
//! The chosen action is the one leading to the root's most visited child.

use fastrand::Rng;
use log::{Level, debug, log_enabled, trace};

use crate::action::Action;
use crate::constants::{DEFAULT_ITERATIONS, DEFAULT_LEAF_SIMULATIONS, DEFAULT_UCT_WEIGHT};
use crate::error::RulesError;
use crate::playout::simulate;
use crate::rules::Outcome;
use crate::state::State;
use crate::tree::{NodeId, Tree};

/// Which search strategy to run.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variant {
    Default,
    DecisiveMove,
    WeightedBackpropagation,
    MultiSimulation,
}

impl Variant {
    pub const ALL: [Variant; 4] = [
        Variant::Default,
        Variant::DecisiveMove,
        Variant::WeightedBackpropagation,
        Variant::MultiSimulation,
    ];

    /// Three-letter tag used in tournament records.
    pub fn short_name(self) -> &'static str {
        match self {
            Variant::Default => "def",
            Variant::DecisiveMove => "dec",
            Variant::WeightedBackpropagation => "wbp",
            Variant::MultiSimulation => "msm",
        }
    }
}

/// Runtime search parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Iteration budget (playouts for multi-simulation)
    pub iterations: usize,
    /// UCT exploration weight
    pub weight: f64,
    /// Playouts per expansion, only used by [`Variant::MultiSimulation`]
    pub leaf_simulations: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            weight: DEFAULT_UCT_WEIGHT,
            leaf_simulations: DEFAULT_LEAF_SIMULATIONS,
        }
    }
}

/// Descend from the root while nodes are fully expanded.
///
/// Returns the node reached and its depth, counting the root as 1.
fn tree_descend(tree: &Tree, variant: Variant) -> (NodeId, i32) {
    let mut node = Tree::ROOT;
    let mut depth = 1;

    while tree[node].is_fully_expanded() {
        let next = match variant {
            Variant::DecisiveMove => tree.select_child_decisive(node),
            _ => tree.select_child(node),
        };
        let Some(next) = next else { break };
        node = next;
        depth += 1;
    }

    (node, depth)
}

/// Grow a search tree rooted at `state` for the configured budget.
fn build_tree(
    state: &State,
    variant: Variant,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<Tree, RulesError> {
    let leaf_simulations = config.leaf_simulations.max(1);
    let descents = match variant {
        Variant::MultiSimulation if config.iterations > 0 => {
            (config.iterations / leaf_simulations).max(1)
        }
        _ => config.iterations,
    };

    let mut tree = Tree::new(state.clone(), config.weight)?;

    for _ in 0..descents {
        let (mut node, mut depth) = tree_descend(&tree, variant);

        if let Some(action) = tree.random_unexplored(node, rng) {
            node = tree.add_child(node, &action)?;
            depth += 1;
        }

        let leaf = &tree[node].state;
        let (outcome, weight) = match variant {
            Variant::Default | Variant::DecisiveMove => (simulate(leaf, rng)?, 1.0),
            Variant::WeightedBackpropagation => {
                let factor = 2f64.powi(depth - 1);
                (simulate(leaf, rng)?.scaled(factor), factor)
            }
            Variant::MultiSimulation => {
                let mut total = Outcome::default();
                for _ in 0..leaf_simulations {
                    total += simulate(leaf, rng)?;
                }
                (total, leaf_simulations as f64)
            }
        };

        tree.backpropagate(node, outcome, weight);
    }

    Ok(tree)
}

/// Run `variant` from `state` and return the most visited root action.
///
/// # Errors
/// [`RulesError::PreconditionViolation`] if the search produced no root
/// children, which happens for a terminal `state` or a zero iteration budget.
/// Rules errors raised while building the tree are propagated.
pub fn search(
    state: &State,
    variant: Variant,
    config: &SearchConfig,
    rng: &mut Rng,
) -> Result<Action, RulesError> {
    let tree = build_tree(state, variant, config, rng)?;

    if log_enabled!(Level::Trace) {
        trace!("full tree:\n{}", tree.dump());
    } else if log_enabled!(Level::Debug) {
        dump_children(&tree);
    }

    tree.best_action().cloned().ok_or(RulesError::PreconditionViolation(
        "search finished without expanding the root",
    ))
}

/// Plain UCT search.
pub fn default_mcts(
    state: &State,
    iterations: usize,
    weight: f64,
    rng: &mut Rng,
) -> Result<Action, RulesError> {
    let config = SearchConfig {
        iterations,
        weight,
        ..SearchConfig::default()
    };
    search(state, Variant::Default, &config, rng)
}

/// UCT search that always follows an already expanded winning move.
pub fn decisive_move_mcts(
    state: &State,
    iterations: usize,
    weight: f64,
    rng: &mut Rng,
) -> Result<Action, RulesError> {
    let config = SearchConfig {
        iterations,
        weight,
        ..SearchConfig::default()
    };
    search(state, Variant::DecisiveMove, &config, rng)
}

/// UCT search where deeper results weigh exponentially more.
pub fn weighted_backpropagation_mcts(
    state: &State,
    iterations: usize,
    weight: f64,
    rng: &mut Rng,
) -> Result<Action, RulesError> {
    let config = SearchConfig {
        iterations,
        weight,
        ..SearchConfig::default()
    };
    search(state, Variant::WeightedBackpropagation, &config, rng)
}

/// UCT search running `leaf_simulations` playouts per expansion.
///
/// `iterations` counts playouts, so the tree is descended
/// `iterations / leaf_simulations` times (at least once).
pub fn multi_simulation_mcts(
    state: &State,
    iterations: usize,
    leaf_simulations: usize,
    weight: f64,
    rng: &mut Rng,
) -> Result<Action, RulesError> {
    let config = SearchConfig {
        iterations,
        weight,
        leaf_simulations,
    };
    search(state, Variant::MultiSimulation, &config, rng)
}

/// Log statistics for the root's children.
fn dump_children(tree: &Tree) {
    let root = tree.root();
    debug!(
        "search tree: {} nodes, root visits {}",
        tree.len(),
        root.visits
    );
    for &id in &root.children {
        let child = &tree[id];
        if let Some(action) = &child.action {
            debug!(
                "  {action}: v={} w={} wr={:.3}",
                child.visits,
                child.wins,
                child.win_rate()
            );
        }
    }
}
