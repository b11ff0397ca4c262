/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use tsume::{
    player_at_tree_depth, solve, Color, Move, MoveTree, NodeKind, PieceKind, Problem, Search,
    SearchConfig, Square, ATTACKER,
};

fn solve_problem(id: u32, max_moves: usize) -> MoveTree {
    let position = Problem::by_id(id).position().unwrap();
    solve(&position, max_moves).unwrap()
}

fn raw_tree(id: u32, max_moves: usize) -> MoveTree {
    let position = Problem::by_id(id).position().unwrap();
    Search::new(SearchConfig::new(max_moves))
        .start(&position)
        .unwrap()
        .tree
}

/// Every `Move` node is made by the player its depth calls for.
fn assert_parity(tree: &MoveTree, depth: usize) {
    for child in tree.children() {
        if let NodeKind::Move { color, mv } = child.kind() {
            assert_eq!(
                color,
                player_at_tree_depth(depth + 1),
                "{mv:?} at depth {}",
                depth + 1
            );
            assert_parity(child, depth + 1);
        }
    }
}

/// Every leaf of a pruned tree is a mate, and every node that is not a leaf has children.
fn assert_only_mates(tree: &MoveTree) {
    for child in tree.children() {
        match child.kind() {
            NodeKind::Checkmate => assert!(child.is_empty()),
            NodeKind::Move { .. } => {
                assert!(!child.is_empty(), "{child:?} survived pruning without children");
                assert_only_mates(child);
            }
            kind => panic!("{kind:?} survived pruning"),
        }
    }
}

#[cfg(test)]
mod problem_two {
    use super::*;

    #[test]
    fn test_solved_within_five_plies() {
        let answer = solve_problem(2, 5);
        assert!(!answer.is_empty());
        assert_only_mates(&answer);

        let lines = answer.lines();
        assert!(!lines.is_empty());
        for line in &lines {
            assert_eq!(line.len(), 3, "{line:?}");
            assert_eq!(line[0].0, ATTACKER);
            assert_eq!(line[1].0, ATTACKER.opponent());
            assert_eq!(line[2].0, ATTACKER);
        }

        let position = Problem::by_id(2).position().unwrap();
        let expected = Move::line_from_csa(&position, "+3332TO -2111OU +2322TO").unwrap();
        assert!(lines.contains(&expected), "{lines:?}");
    }

    #[test]
    fn test_not_solved_within_three_plies() {
        assert!(solve_problem(2, 3).is_empty());
    }

    #[test]
    fn test_raw_tree_keeps_failed_lines() {
        let raw = raw_tree(2, 5);
        let answer = solve_problem(2, 5);
        assert!(raw.node_count() > answer.node_count());
        assert_parity(&raw, 0);
    }
}

#[cfg(test)]
mod problem_four {
    use super::*;

    #[test]
    fn test_single_line_avoids_pawn_drop_mate() {
        let answer = solve_problem(4, 7);
        assert_only_mates(&answer);

        let position = Problem::by_id(4).position().unwrap();
        let expected =
            Move::line_from_csa(&position, "+3322KI -2122KY +0012FU -1121OU +2513KE").unwrap();
        assert_eq!(answer.lines(), vec![expected]);
    }

    #[test]
    fn test_not_solved_within_six_plies() {
        assert!(solve_problem(4, 6).is_empty());
    }
}

#[cfg(test)]
mod problem_six {
    use super::*;

    #[test]
    fn test_every_line_opens_with_silver_drop() {
        let answer = solve_problem(6, 7);
        assert_only_mates(&answer);

        let lines = answer.lines();
        assert!(!lines.is_empty());

        let drop = Move::Drop {
            to: Square::new(2, 3),
            kind: PieceKind::Silver,
        };
        for line in &lines {
            assert_eq!(line[0], (Color::Black, drop), "{line:?}");
            assert!(line.len() % 2 == 1 && line.len() <= 5, "{line:?}");
        }
    }
}

#[cfg(test)]
mod problem_five {
    use super::*;

    #[test]
    fn test_pawn_push_mates() {
        let answer = solve_problem(5, 3);
        assert_only_mates(&answer);

        let lines = answer.lines();
        assert!(lines.iter().all(|line| line.len() == 1));
        assert!(lines.iter().all(|line| !line[0].1.is_drop()));

        let push = Move::Board {
            from: Square::new(1, 3),
            to: Square::new(1, 2),
            kind: PieceKind::Pawn,
            promote: false,
        };
        assert!(lines.contains(&vec![(Color::Black, push)]), "{lines:?}");
    }
}

#[cfg(test)]
mod parity {
    use super::*;

    #[test]
    fn test_players_follow_depth_in_raw_trees() {
        for id in [3, 4, 6] {
            assert_parity(&raw_tree(id, 3), 0);
        }
    }
}

#[cfg(test)]
mod eager_pruning {
    use super::*;

    fn assert_same_answer(id: u32, max_moves: usize) {
        let position = Problem::by_id(id).position().unwrap();
        let config = SearchConfig {
            max_depth: max_moves,
            prune_eagerly: true,
        };

        let eager = Search::new(config).start(&position).unwrap().tree;
        assert_eq!(
            eager,
            solve(&position, max_moves).unwrap(),
            "Problem {id} at {max_moves} plies"
        );
    }

    #[test]
    fn test_eager_pruning_problem_two() {
        for max_moves in 1..=5 {
            assert_same_answer(2, max_moves);
        }
    }

    #[test]
    fn test_eager_pruning_problem_five() {
        for max_moves in 1..=4 {
            assert_same_answer(5, max_moves);
        }
    }

    #[test]
    fn test_eager_pruning_problem_three() {
        assert_same_answer(3, 3);
    }
}
