/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{Context, Result};
use log::warn;

use crate::{Position, DEFENDER};

/// A built-in tsume problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Problem {
    /// Number used to select this problem on the command line.
    pub id: u32,

    /// Length of the intended solution, in plies.
    pub moves: usize,

    /// A short description of the problem.
    pub description: &'static str,

    /// The pieces on the board and in the attacker's hand, as SFEN.
    ///
    /// Every other piece of the set belongs in the defender's hand.
    pub sfen: &'static str,
}

/// Every built-in problem, ordered by id.
pub const PROBLEMS: [Problem; 6] = [
    Problem {
        id: 1,
        moves: 15,
        description: "A long lance and pawn sequence; slow to solve exhaustively",
        sfen: "6lk1/9/6+P2/9/9/7+p1/9/9/9 b L4P 1",
    },
    Problem {
        id: 2,
        moves: 3,
        description: "Two tokin close in on the king",
        sfen: "7k1/9/6P+P1/9/9/9/9/9/9 b - 1",
    },
    Problem {
        id: 3,
        moves: 3,
        description: "A lone rook against a guarded corner",
        sfen: "7nl/6s1k/6R1p/9/9/9/9/9/9 b - 1",
    },
    Problem {
        id: 4,
        moves: 5,
        description: "The obvious pawn drop mates, which is not allowed",
        sfen: "6llk/9/6GS1/9/7N1/9/9/9/9 b P 1",
    },
    Problem {
        id: 5,
        moves: 1,
        description: "Mate by pushing a pawn, which is allowed",
        sfen: "6llk/9/6GSP/9/7N1/9/9/9/9 b P 1",
    },
    Problem {
        id: 6,
        moves: 5,
        description: "A classic with a gold and a silver in hand",
        sfen: "7nl/7k1/9/7pp/6N2/9/9/9/9 b GS 1",
    },
];

impl Problem {
    /// Fetches the problem with the provided `id`.
    ///
    /// Any id without a problem of its own selects the last one.
    ///
    /// # Example
    /// ```
    /// # use tsume::Problem;
    /// assert_eq!(Problem::by_id(2).moves, 3);
    /// assert_eq!(Problem::by_id(0), Problem::by_id(6));
    /// assert_eq!(Problem::by_id(42), Problem::by_id(6));
    /// ```
    pub fn by_id(id: u32) -> Self {
        match PROBLEMS.iter().find(|problem| problem.id == id) {
            Some(problem) => *problem,
            None => {
                let fallback = PROBLEMS[PROBLEMS.len() - 1];
                warn!("No problem with id {id}; using problem {}", fallback.id);
                fallback
            }
        }
    }

    /// The starting position of this problem, with every piece not in play in the defender's hand.
    pub fn position(&self) -> Result<Position> {
        let mut position = Position::from_sfen(self.sfen)
            .with_context(|| format!("Problem {} has a malformed position", self.id))?;
        position.give_remaining_to(DEFENDER);
        Ok(position)
    }
}
