//! Monte Carlo Tree Search with UCT selection and uniformly random rollouts.
//!
//! The tree is an arena: nodes live in a `Vec` and refer to each other by
//! [`NodeId`]. Parents own nothing; the parent index only drives
//! backpropagation.

use crate::engine::clock::Deadline;
use crate::engine::config::SearchConfig;
use crate::engine::eval::TerminalEvaluator;
use crate::engine::{ensure_in_progress, Evaluator, Move, SearchStats, Searcher};
use crate::error::{EngineError, Result};
use crate::logic::board::{Board, Player};
use crate::logic::rules::{self, GameResult};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::Arc;

/// Index into the node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct SearchNode {
    pub board: Board,
    pub to_move: Player,
    /// Move that produced this node; `None` for the root.
    pub position: Option<usize>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    /// Legal moves not yet expanded, highest first so `pop` yields the lowest.
    untried: Vec<usize>,
    pub visits: u32,
    /// Sum of rewards for the player who moved into this node.
    pub total_reward: f64,
    pub depth: u8,
    pub result: GameResult,
}

impl SearchNode {
    fn new(
        board: Board,
        to_move: Player,
        position: Option<usize>,
        parent: Option<NodeId>,
        depth: u8,
    ) -> Self {
        let result = rules::result(&board);
        let untried = if result.is_terminal() {
            Vec::new()
        } else {
            rules::legal_moves(&board).into_iter().rev().collect()
        };
        Self {
            board,
            to_move,
            position,
            parent,
            children: Vec::new(),
            untried,
            visits: 0,
            total_reward: 0.0,
            depth,
            result,
        }
    }

    #[must_use]
    pub fn mean_reward(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.total_reward / f64::from(self.visits)
        }
    }

    #[must_use]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// UCT score seen from the parent. Unvisited children always come first.
    fn uct(&self, parent_visits: u32, exploration: f64) -> f64 {
        if self.visits == 0 {
            return f64::INFINITY;
        }
        let explore = (f64::from(parent_visits).ln() / f64::from(self.visits)).sqrt();
        exploration.mul_add(explore, self.mean_reward())
    }
}

#[derive(Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    pub const ROOT: NodeId = NodeId(0);

    #[must_use]
    pub fn new(board: Board, to_move: Player) -> Self {
        Self {
            nodes: vec![SearchNode::new(board, to_move, None, None, 0)],
        }
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&SearchNode> {
        self.nodes.get(id.0)
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut SearchNode> {
        self.nodes.get_mut(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Deepest node allocated so far.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }

    /// Descends through fully expanded, non-terminal nodes by UCT until it
    /// reaches a node with untried moves or a terminal board.
    fn select(&self, exploration: f64) -> NodeId {
        let mut current = Self::ROOT;
        while let Some(node) = self.get(current) {
            if !node.is_fully_expanded() || node.result.is_terminal() {
                break;
            }
            let mut best: Option<(NodeId, f64)> = None;
            for &child_id in &node.children {
                let Some(child) = self.get(child_id) else {
                    continue;
                };
                let score = child.uct(node.visits, exploration);
                // ties keep the earlier (lower position) child
                let improves = match best {
                    Some((_, best_score)) => score > best_score,
                    None => true,
                };
                if improves {
                    best = Some((child_id, score));
                }
            }
            match best {
                Some((child_id, _)) => current = child_id,
                None => break,
            }
        }
        current
    }

    /// Adds one child for the lowest untried move of `id`. Returns `id`
    /// unchanged when nothing is left to expand.
    fn expand(&mut self, id: NodeId) -> Result<NodeId> {
        let Some(node) = self.get_mut(id) else {
            return Ok(id);
        };
        let Some(position) = node.untried.pop() else {
            return Ok(id);
        };
        let (board, mover, depth) = (node.board, node.to_move, node.depth);

        let child_board = rules::apply(&board, position, mover)?;
        let child_id = NodeId(self.nodes.len());
        self.nodes.push(SearchNode::new(
            child_board,
            mover.opposite(),
            Some(position),
            Some(id),
            depth.saturating_add(1),
        ));
        if let Some(parent) = self.get_mut(id) {
            parent.children.push(child_id);
        }
        Ok(child_id)
    }

    /// Adds `reward` at `leaf` and walks to the root, negating once per ply.
    fn backpropagate(&mut self, leaf: NodeId, reward: f64) {
        let mut current = Some(leaf);
        let mut reward = reward;
        while let Some(id) = current {
            let Some(node) = self.get_mut(id) else {
                break;
            };
            node.visits += 1;
            node.total_reward += reward;
            reward = -reward;
            current = node.parent;
        }
    }

    /// Root child with the most visits; ties keep the lowest position.
    #[must_use]
    pub fn best_child(&self) -> Option<&SearchNode> {
        let root = self.get(Self::ROOT)?;
        let mut best: Option<&SearchNode> = None;
        for child in root.children.iter().filter_map(|&id| self.get(id)) {
            let better = match best {
                Some(current) => {
                    child.visits > current.visits
                        || (child.visits == current.visits && child.position < current.position)
                }
                None => true,
            };
            if better {
                best = Some(child);
            }
        }
        best
    }
}

pub struct MctsSearcher<R: Rng = ChaCha20Rng> {
    config: Arc<SearchConfig>,
    rng: R,
    evaluator: TerminalEvaluator,
}

impl MctsSearcher {
    /// Seeds from `config.seed`, or from OS entropy when unset.
    #[must_use]
    pub fn new(config: Arc<SearchConfig>) -> Self {
        let rng = config
            .seed
            .map_or_else(ChaCha20Rng::from_entropy, ChaCha20Rng::seed_from_u64);
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> MctsSearcher<R> {
    #[must_use]
    pub const fn with_rng(config: Arc<SearchConfig>, rng: R) -> Self {
        Self {
            config,
            rng,
            evaluator: TerminalEvaluator,
        }
    }

    /// Plays uniformly random legal moves until the game ends.
    fn rollout(&mut self, mut board: Board, mut turn: Player) -> Result<GameResult> {
        loop {
            let result = rules::result(&board);
            if result.is_terminal() {
                return Ok(result);
            }
            let moves = rules::legal_moves(&board);
            let &position = moves
                .choose(&mut self.rng)
                .ok_or(EngineError::NoLegalMoves { result })?;
            board = rules::apply(&board, position, turn)?;
            turn = turn.opposite();
        }
    }
}

impl<R: Rng> Searcher for MctsSearcher<R> {
    fn search(&mut self, board: &Board, player: Player) -> Result<(Move, SearchStats)> {
        ensure_in_progress(board)?;
        let deadline = Deadline::start(self.config.time_budget_ms);
        let simulation_count = self.config.simulation_count();
        let exploration = self.config.exploration_constant();

        let mut tree = SearchTree::new(*board, player);
        let mut simulations = 0;
        let mut timed_out = false;

        while simulations < simulation_count {
            // The first simulation always runs so the root has a child
            if simulations > 0 && deadline.expired() {
                timed_out = true;
                break;
            }

            let selected = tree.select(exploration);
            let leaf = tree.expand(selected)?;
            let Some((leaf_board, leaf_turn)) = tree.get(leaf).map(|n| (n.board, n.to_move))
            else {
                break;
            };

            let outcome = self.rollout(leaf_board, leaf_turn)?;
            // reward for the player who moved into the leaf
            let reward = f64::from(self.evaluator.evaluate(outcome, leaf_turn.opposite()));
            tree.backpropagate(leaf, reward);
            simulations += 1;
        }

        let best = tree.best_child().ok_or(EngineError::NoLegalMoves {
            result: rules::result(board),
        })?;
        let position = best.position.ok_or(EngineError::NoLegalMoves {
            result: rules::result(board),
        })?;

        let stats = SearchStats {
            depth: tree.max_depth(),
            nodes: u64::try_from(tree.len()).unwrap_or(u64::MAX),
            simulations,
            time_ms: deadline.elapsed_whole_ms(),
            timed_out,
        };
        if timed_out {
            log::warn!(
                "mcts: time budget of {:?} ms ran out after {simulations}/{simulation_count} simulations",
                self.config.time_budget_ms
            );
        }
        log::debug!(
            "mcts: position {position} visits {} mean {:.3} ({} nodes, {} ms)",
            best.visits,
            best.mean_reward(),
            stats.nodes,
            stats.time_ms
        );
        Ok((Move::evaluated(position, best.mean_reward()), stats))
    }
}
