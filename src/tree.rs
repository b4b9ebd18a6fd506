//! Search tree for MCTS.
//!
//! Nodes live in an arena owned by [`Tree`] and refer to each other by index.
//! The parent link is only used to walk back up during backpropagation; the
//! arena owns every node, so there are no ownership cycles.
//!
//! Each node stores the state reached by its action, visit and win totals,
//! and the legal actions not yet expanded into children. Children's actions
//! and the unexplored list always partition the legal actions of the node's
//! state.

use std::fmt::Write as _;
use std::ops::Index;

use fastrand::Rng;

use crate::action::Action;
use crate::error::RulesError;
use crate::rules::{Outcome, check_victory, get_actions, get_next_state};
use crate::state::State;

/// Index of a node inside its [`Tree`].
pub type NodeId = usize;

/// A node in the MCTS search tree.
#[derive(Debug, Clone)]
pub struct Node {
    /// Action that led here from the parent (`None` at the root)
    pub action: Option<Action>,
    /// State after `action`
    pub state: State,
    pub parent: Option<NodeId>,
    /// Children in expansion order
    pub children: Vec<NodeId>,
    /// Visit total (fractional weights are allowed)
    pub visits: f64,
    /// Win total for `state.to_move`
    pub wins: f64,
    /// Legal actions not yet expanded
    pub unexplored: Vec<Action>,
}

impl Node {
    fn new(
        action: Option<Action>,
        state: State,
        parent: Option<NodeId>,
    ) -> Result<Self, RulesError> {
        // Terminal states are never expanded
        let unexplored = if check_victory(&state).is_some() {
            Vec::new()
        } else {
            get_actions(&state)?
        };
        Ok(Self {
            action,
            state,
            parent,
            children: Vec::new(),
            visits: 0.0,
            wins: 0.0,
            unexplored,
        })
    }

    /// True once every legal action has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.unexplored.is_empty() && !self.children.is_empty()
    }

    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visits > 0.0 {
            self.wins / self.visits
        } else {
            0.0
        }
    }
}

/// UCT score of a child: `wins/visits + weight * sqrt(2 ln(parent_visits) / visits)`.
///
/// Unvisited children score `+inf` so they are always tried first.
pub fn uct_score(wins: f64, visits: f64, parent_visits: f64, weight: f64) -> f64 {
    debug_assert!(wins <= visits, "wins {wins} exceed visits {visits}");
    if visits == 0.0 {
        return f64::INFINITY;
    }
    wins / visits + weight * (2.0 * parent_visits.ln() / visits).sqrt()
}

/// An MCTS tree rooted at a single state. Built for one search call and
/// dropped when it returns.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    /// Exploration weight used by [`Tree::select_child`]
    weight: f64,
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

impl Tree {
    pub const ROOT: NodeId = 0;

    /// Create a tree holding only the root.
    ///
    /// # Errors
    /// Propagates [`RulesError::PreconditionViolation`] from action generation.
    pub fn new(root: State, weight: f64) -> Result<Self, RulesError> {
        Ok(Self {
            nodes: vec![Node::new(None, root, None)?],
            weight,
        })
    }

    pub fn root(&self) -> &Node {
        &self.nodes[Self::ROOT]
    }

    /// Number of nodes in the tree.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    #[cfg(test)]
    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Child of `id` with the highest UCT score, first one on ties.
    pub fn select_child(&self, id: NodeId) -> Option<NodeId> {
        let parent = &self.nodes[id];
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &parent.children {
            let child = &self.nodes[child_id];
            let score = uct_score(child.wins, child.visits, parent.visits, self.weight);
            if best.is_none_or(|(_, s)| score > s) {
                best = Some((child_id, score));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// First child whose state is an immediate win for the player to move at
    /// `id`, otherwise the UCT choice.
    pub fn select_child_decisive(&self, id: NodeId) -> Option<NodeId> {
        let win = Outcome::win_for(self.nodes[id].state.to_move);
        self.nodes[id]
            .children
            .iter()
            .copied()
            .find(|&c| check_victory(&self.nodes[c].state) == Some(win))
            .or_else(|| self.select_child(id))
    }

    /// Uniformly random unexplored action of `id`.
    pub fn random_unexplored(&self, id: NodeId, rng: &mut Rng) -> Option<Action> {
        let unexplored = &self.nodes[id].unexplored;
        if unexplored.is_empty() {
            return None;
        }
        Some(unexplored[rng.usize(..unexplored.len())].clone())
    }

    /// Expand `action` from node `id` into a new child and return its id.
    ///
    /// # Errors
    /// [`RulesError::InvalidAction`] if `action` is not in the unexplored set.
    pub fn add_child(&mut self, id: NodeId, action: &Action) -> Result<NodeId, RulesError> {
        let pos = self.nodes[id]
            .unexplored
            .iter()
            .position(|a| a == action)
            .ok_or_else(|| RulesError::InvalidAction {
                action: action.clone(),
            })?;

        let state = get_next_state(&self.nodes[id].state, action)?;
        let child = Node::new(Some(action.clone()), state, Some(id))?;

        self.nodes[id].unexplored.remove(pos);
        let child_id = self.nodes.len();
        self.nodes.push(child);
        self.nodes[id].children.push(child_id);
        Ok(child_id)
    }

    /// Record a result at a single node.
    ///
    /// `weight` is added to the visit total and the outcome component of the
    /// node's player to move is added to the win total.
    pub fn update_node(&mut self, id: NodeId, outcome: Outcome, weight: f64) {
        let node = &mut self.nodes[id];
        node.visits += weight;
        node.wins += outcome.score(node.state.to_move);
    }

    /// Update `id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, id: NodeId, outcome: Outcome, weight: f64) {
        let mut current = Some(id);
        while let Some(node_id) = current {
            self.update_node(node_id, outcome, weight);
            current = self.nodes[node_id].parent;
        }
    }

    /// Most visited child of `id`, first one on ties.
    pub fn best_child(&self, id: NodeId) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;
        for &child_id in &self.nodes[id].children {
            let visits = self.nodes[child_id].visits;
            if best.is_none_or(|(_, v)| visits > v) {
                best = Some((child_id, visits));
            }
        }
        best.map(|(child_id, _)| child_id)
    }

    /// Action of the root's most visited child.
    pub fn best_action(&self) -> Option<&Action> {
        self.best_child(Self::ROOT)
            .and_then(|id| self.nodes[id].action.as_ref())
    }

    /// Indented dump of the whole tree, one node per line.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let mut stack = vec![(Self::ROOT, 0usize)];

        while let Some((id, depth)) = stack.pop() {
            let node = &self.nodes[id];
            let action = node
                .action
                .as_ref()
                .map_or_else(|| "None".to_string(), ToString::to_string);
            let _ = writeln!(
                out,
                "{}[A: {}  W/V: {}/{} U: {}]",
                "| ".repeat(depth),
                action,
                node.wins,
                node.visits,
                node.unexplored.len()
            );
            for &child in node.children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }

        out
    }
}
