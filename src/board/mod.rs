/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Pieces held in hand, ready to be dropped.
mod hand;

/// Board moves and drops, and their CSA notation.
mod moves;

/// Colors, piece kinds, and pieces.
mod piece;

/// The position oracle: placements, effects, legality, and move application.
mod position;

/// Squares of the `9x9` board.
mod square;

pub use hand::*;
pub use moves::*;
pub use piece::*;
pub use position::*;
pub use square::*;
