/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::Color;

/// The side trying to deliver mate. In a tsume problem this is always Black.
pub const ATTACKER: Color = Color::Black;

/// The side trying to escape mate.
pub const DEFENDER: Color = ATTACKER.opponent();

/// Returns `true` if the attacker is to move at search depth `depth`.
///
/// The search starts at depth `1` with the attacker to move, and each ply adds one.
///
/// # Example
/// ```
/// # use tsume::is_attacker_turn;
/// assert!(is_attacker_turn(1));
/// assert!(!is_attacker_turn(2));
/// ```
#[inline(always)]
pub const fn is_attacker_turn(depth: usize) -> bool {
    depth % 2 == 1
}

/// The player to move at search depth `depth`.
#[inline(always)]
pub const fn to_move_at(depth: usize) -> Color {
    if is_attacker_turn(depth) {
        ATTACKER
    } else {
        DEFENDER
    }
}

/// The player whose move leads into search depth `depth`.
///
/// This is also the player of every `Move` node at *tree* depth `depth - 1`.
#[inline(always)]
pub const fn mover_into(depth: usize) -> Color {
    to_move_at(depth).opponent()
}

/// The player of a `Move` node at tree depth `depth`, where the root sits at depth `0`.
///
/// Attacker moves sit at odd depths, defender moves at even ones.
#[inline(always)]
pub const fn player_at_tree_depth(depth: usize) -> Color {
    mover_into(depth + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_helpers_agree() {
        for depth in 1..20 {
            assert_ne!(to_move_at(depth), mover_into(depth));
            assert_eq!(mover_into(depth + 1), to_move_at(depth));
        }

        assert_eq!(player_at_tree_depth(1), ATTACKER);
        assert_eq!(player_at_tree_depth(2), DEFENDER);
        assert_eq!(mover_into(2), ATTACKER);
    }
}
