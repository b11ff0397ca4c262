/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Squares, pieces, hands, moves, and the position oracle.
mod board;

/// Command-line arguments and the printing of a solve.
mod cli;

/// Candidate moves for each side of a tsume search.
mod movegen;

/// The built-in tsume problems.
mod problems;

/// Main solver logic; the AND/OR search for a forced mate.
mod search;

/// The tree of explored lines, and its pruning.
mod tree;

/// Misc utility functions and constants.
mod utils;

pub use board::*;
pub use cli::*;
pub use movegen::*;
pub use problems::*;
pub use search::*;
pub use tree::*;
pub use utils::*;
