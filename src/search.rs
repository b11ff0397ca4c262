/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Result};
use log::{debug, info, trace};

use crate::{
    attacker_checks, defender_evasions, is_attacker_turn, mover_into, Move, MoveTree, NodeKind,
    Position, ATTACKER, DEFENDER,
};

/// Default number of plies to search before giving up on a line.
///
/// Enough for a 15-move problem, since a mate in `n` plies needs a horizon of `n + 2`.
pub const DEFAULT_MAX_DEPTH: usize = 17;

/// How a single call of the search classified the line it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i8)]
pub enum Outcome {
    /// The candidate move was illegal, or did not keep to the rules of the ply.
    ///
    /// No node is recorded for it.
    Invalid = -2,

    /// The line is known not to mate.
    NotMating = -1,

    /// The line's fate depends on its children; it is decided when the tree is pruned.
    Undetermined = 0,

    /// The defender is mated.
    Mating = 1,
}

impl Outcome {
    /// Returns `true` for every outcome other than [`Outcome::Invalid`].
    #[inline(always)]
    pub const fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }
}

/// The result of a search: the tree of explored lines and how many positions were visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Every line explored. Already pruned if [`SearchConfig::prune_eagerly`] was set.
    pub tree: MoveTree,

    /// Number of positions visited.
    pub nodes: u64,

    /// Classification of the starting position.
    pub outcome: Outcome,
}

/// Configuration variables for executing a [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest ply to explore. Lines reaching past it end in [`NodeKind::OverLimit`].
    pub max_depth: usize,

    /// If set, every move's subtree is pruned as soon as it has been explored,
    /// and dropped entirely if it cannot lead to a forced mate.
    ///
    /// The final answer is the same either way, but the raw trace is lost.
    pub prune_eagerly: bool,
}

impl SearchConfig {
    /// Constructs a new [`SearchConfig`] searching up to `max_depth` plies.
    #[inline(always)]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }
}

impl Default for SearchConfig {
    #[inline(always)]
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            prune_eagerly: false,
        }
    }
}

/// Executes an exhaustive AND/OR search for a forced mate.
///
/// The attacker needs *one* checking move that mates against every reply.
/// The defender needs *one* reply that escapes.
#[derive(Debug)]
pub struct Search {
    /// Configuration variables for this instance of the search.
    config: SearchConfig,

    /// Number of positions visited so far.
    nodes: u64,
}

impl Search {
    /// Construct a new [`Search`] instance with the provided configuration.
    #[inline(always)]
    pub fn new(config: SearchConfig) -> Self {
        Self { config, nodes: 0 }
    }

    /// Start the search on `position`, returning the tree of every line explored.
    ///
    /// The attacker must be the side to move in `position`.
    pub fn start(mut self, position: &Position) -> Result<SearchResult> {
        if position.side_to_move() != ATTACKER {
            bail!(
                "Cannot search for mate in {position:?}: {} must be the side to move",
                ATTACKER.name()
            );
        }

        info!(
            "Starting search on {position:?} with a horizon of {} plies",
            self.config.max_depth
        );

        let mut tree = MoveTree::new();
        let outcome = self.search(position, None, 1, &mut tree);

        if self.config.prune_eagerly {
            tree.prune();
        }

        info!(
            "Search finished after {} nodes with outcome {outcome:?}",
            self.nodes
        );

        Ok(SearchResult {
            tree,
            nodes: self.nodes,
            outcome,
        })
    }

    /// Primary location of search logic.
    ///
    /// Plays `candidate` (if any) on a copy of `position`, records it under `parent`,
    /// and explores every candidate reply at `depth + 1`.
    /// Odd depths are the attacker's turn, even depths the defender's.
    fn search(
        &mut self,
        position: &Position,
        candidate: Option<Move>,
        depth: usize,
        parent: &mut MoveTree,
    ) -> Outcome {
        if depth > self.config.max_depth {
            parent.push(MoveTree::leaf(NodeKind::OverLimit));
            return Outcome::Undetermined;
        }

        // Each call owns its copy of the position, so no line observes another
        let mut position = position.clone();

        let node = match candidate {
            Some(mv) => {
                let mover = mover_into(depth);
                assert_eq!(
                    position.side_to_move(),
                    mover,
                    "{mover:?} should be making the move into depth {depth}"
                );

                if !position.is_legal(mv) {
                    return Outcome::Invalid;
                }
                position.make_move(mv);

                // Attacker moves must give check; defender moves must get out of it
                if position.is_in_check(DEFENDER) != (mover == ATTACKER) {
                    return Outcome::Invalid;
                }

                parent.push(MoveTree::with_move(mv, mover))
            }
            None => &mut *parent,
        };

        self.nodes += 1;

        let outcome = if is_attacker_turn(depth) {
            let checks = attacker_checks(&position).fold(0, |valid, mv| {
                let outcome = self.search(&position, Some(mv), depth + 1, &mut *node);
                valid + usize::from(outcome.is_valid())
            });

            if checks == 0 {
                trace!("No checks available at depth {depth} in {position:?}");
                node.push(MoveTree::leaf(NodeKind::CannotCheckmate));
                Outcome::NotMating
            } else {
                Outcome::Undetermined
            }
        } else {
            let evasions = defender_evasions(&position).fold(0, |valid, mv| {
                let outcome = self.search(&position, Some(mv), depth + 1, &mut *node);
                valid + usize::from(outcome.is_valid())
            });

            if evasions > 0 {
                Outcome::Undetermined
            } else if candidate.is_some_and(|mv| mv.is_pawn_drop()) {
                debug!("Mate by pawn drop at depth {depth} in {position:?} is not allowed");
                node.push(MoveTree::leaf(NodeKind::CannotCheckmate));
                Outcome::NotMating
            } else {
                trace!("Checkmate at depth {depth} in {position:?}");
                node.push(MoveTree::leaf(NodeKind::Checkmate));
                Outcome::Mating
            }
        };

        if self.config.prune_eagerly && candidate.is_some() {
            // The node just built sits at depth - 1 in the tree
            let mates = node.prune_at(depth - 1);

            // A failed defender move has to stay, so its parent knows it was not a forced mate
            if !mates && mover_into(depth) == ATTACKER {
                parent.pop();
            }
        }

        outcome
    }
}

/// Searches `position` up to `max_depth` plies and prunes the result down to its forced mates.
///
/// An empty tree means there is no forced mate within the horizon.
///
/// # Example
/// ```
/// # use tsume::{solve, Position};
/// let position = Position::from_sfen("8k/9/8P/9/9/9/9/9/9 b G 1").unwrap();
/// let answer = solve(&position, 3).unwrap();
/// assert_eq!(answer.to_string(), "1.+0012KI\n  <Checkmate>\n");
/// ```
pub fn solve(position: &Position, max_depth: usize) -> Result<MoveTree> {
    let config = SearchConfig {
        max_depth,
        prune_eagerly: false,
    };

    let mut tree = Search::new(config).start(position)?.tree;
    tree.prune();
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{player_at_tree_depth, Color, PieceKind, Square};

    fn search(sfen: &str, max_depth: usize) -> SearchResult {
        let position = Position::from_sfen(sfen).unwrap();
        Search::new(SearchConfig::new(max_depth))
            .start(&position)
            .unwrap()
    }

    fn check_parity(tree: &MoveTree, depth: usize) {
        for child in tree.children() {
            if let NodeKind::Move { color, .. } = child.kind() {
                assert_eq!(color, player_at_tree_depth(depth + 1), "{child:?}");
                check_parity(child, depth + 1);
            }
        }
    }

    const MATE_IN_ONE: &str = "8k/9/8P/9/9/9/9/9/9 b G 1";

    // The pawn drop on 1-2 would mate, which is not allowed
    const PAWN_DROP_MATE: &str = "7lk/7n1/9/7N1/9/9/9/9/9 b P 1";

    #[test]
    fn test_mate_in_one() {
        let mut result = search(MATE_IN_ONE, 3);
        assert!(result.nodes > 1);
        assert!(result.tree.prune());

        let gold_drop = Move::Drop {
            to: Square::new(1, 2),
            kind: PieceKind::Gold,
        };
        assert_eq!(result.tree.children().len(), 1);
        assert_eq!(
            result.tree.children()[0].kind(),
            NodeKind::Move {
                mv: gold_drop,
                color: Color::Black
            }
        );
        assert_eq!(
            result.tree.children()[0].children(),
            &[MoveTree::leaf(NodeKind::Checkmate)]
        );
    }

    #[test]
    fn test_mate_needs_two_extra_plies_of_horizon() {
        let mut result = search(MATE_IN_ONE, 2);
        assert!(!result.tree.prune());
        assert!(result.tree.is_empty());
    }

    #[test]
    fn test_no_checks_cannot_checkmate() {
        let result = search("4k4/9/9/9/9/9/9/9/9 b - 1", 5);
        assert_eq!(result.outcome, Outcome::NotMating);
        assert_eq!(
            result.tree.children(),
            &[MoveTree::leaf(NodeKind::CannotCheckmate)]
        );
    }

    #[test]
    fn test_pawn_drop_mate_is_not_mate() {
        let mut result = search(PAWN_DROP_MATE, 3);

        let pawn_drop = NodeKind::Move {
            mv: Move::Drop {
                to: Square::new(1, 2),
                kind: PieceKind::Pawn,
            },
            color: Color::Black,
        };
        let node = result
            .tree
            .children()
            .iter()
            .find(|child| child.kind() == pawn_drop)
            .unwrap();
        assert_eq!(node.children(), &[MoveTree::leaf(NodeKind::CannotCheckmate)]);

        assert!(!result.tree.prune());
        assert!(result.tree.is_empty());
    }

    #[test]
    fn test_gold_drop_mates_where_pawn_drop_cannot() {
        let position = Position::from_sfen("7lk/7n1/9/7N1/9/9/9/9/9 b GP 1").unwrap();
        let answer = solve(&position, 3).unwrap();

        assert_eq!(
            answer.lines(),
            vec![vec![(
                Color::Black,
                Move::Drop {
                    to: Square::new(1, 2),
                    kind: PieceKind::Gold
                }
            )]]
        );
    }

    #[test]
    fn test_players_alternate_with_depth() {
        let result = search("7k1/9/6P+P1/9/9/9/9/9/9 b - 1", 5);
        check_parity(&result.tree, 0);
    }

    #[test]
    fn test_eager_pruning_matches_pruning_afterwards() {
        for sfen in [MATE_IN_ONE, PAWN_DROP_MATE, "7k1/9/6P+P1/9/9/9/9/9/9 b - 1"] {
            let position = Position::from_sfen(sfen).unwrap();
            for max_depth in 1..=5 {
                let mut config = SearchConfig::new(max_depth);
                let mut late = Search::new(config).start(&position).unwrap().tree;
                late.prune();

                config.prune_eagerly = true;
                let eager = Search::new(config).start(&position).unwrap().tree;

                assert_eq!(eager, late, "{sfen} at depth {max_depth}");
            }
        }
    }

    #[test]
    fn test_defender_to_move_is_rejected() {
        let position = Position::from_sfen("8k/9/8P/9/9/9/9/9/9 w G 1").unwrap();
        assert!(Search::new(SearchConfig::default()).start(&position).is_err());
    }
}
