/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use crate::{Move, Piece, PieceKind, Position, Square, SquareList, ATTACKER, DEFENDER};

/// Candidate checking moves for the attacker.
///
/// Every attacker piece may go to every square it attacks, with and without promotion.
/// Every kind the attacker holds may be dropped on any square from which a piece of that
/// kind would attack the defender's king. This is found by placing a *defender* piece of the
/// same kind, alone, on the king's square and reading its effects.
///
/// The moves are pseudo-legal: many will be illegal, or will not give check at all,
/// and must be filtered by the caller.
pub fn attacker_checks(position: &Position) -> impl Iterator<Item = Move> + '_ {
    let board_moves = position.pieces(ATTACKER).flat_map(move |(from, piece)| {
        position
            .effects(from)
            .into_iter()
            .flat_map(move |to| promotion_variants(from, to, piece.kind()))
    });

    let drops = position
        .king_square(DEFENDER)
        .into_iter()
        .flat_map(move |king| {
            position.hand().iter(ATTACKER).flat_map(move |(kind, _)| {
                Position::with_single(Piece::new(DEFENDER, kind), king)
                    .effects(king)
                    .into_iter()
                    .map(move |to| Move::Drop { to, kind })
            })
        });

    board_moves.chain(drops)
}

/// Candidate evasions for the defender.
///
/// Every defender piece may go to every square it attacks, with and without promotion.
/// Against a single distant check, every held kind may also be dropped on every square
/// between the king and the checker.
///
/// In double check only the king is allowed to move.
pub fn defender_evasions(position: &Position) -> impl Iterator<Item = Move> + '_ {
    let checkers = position.checkers(DEFENDER);
    let double_check = checkers.len() > 1;

    let board_moves = position
        .pieces(DEFENDER)
        .filter(move |(_, piece)| !double_check || piece.is_king())
        .flat_map(move |(from, piece)| {
            position
                .effects(from)
                .into_iter()
                .flat_map(move |to| promotion_variants(from, to, piece.kind()))
        });

    let blocks = match (position.king_square(DEFENDER), checkers.as_slice()) {
        (Some(king), &[checker]) => interposition_squares(king, checker),
        _ => SquareList::new(),
    };

    let drops = blocks.into_iter().flat_map(move |to| {
        position
            .hand()
            .iter(DEFENDER)
            .map(move |(kind, _)| Move::Drop { to, kind })
    });

    board_moves.chain(drops)
}

/// The squares strictly between `king` and `checker`.
///
/// Empty when the check comes from an adjacent square or a knight's jump, neither of
/// which can be blocked.
fn interposition_squares(king: Square, checker: Square) -> SquareList {
    let mut squares = SquareList::new();

    let (df, dr) = checker.delta(king);
    if df.abs() == 1 || dr.abs() == 1 {
        return squares;
    }

    let (step_file, step_rank) = (df.signum(), dr.signum());
    let mut current = king;
    while let Some(next) = current.offset(step_file, step_rank) {
        if next == checker || squares.is_full() {
            break;
        }
        squares.push(next);
        current = next;
    }

    squares
}

/// The move from `from` to `to`, promoting first if `kind` is able to, then not promoting.
#[inline(always)]
fn promotion_variants(from: Square, to: Square, kind: PieceKind) -> ArrayVec<Move, 2> {
    let mut variants = ArrayVec::new();

    if kind.can_promote() {
        variants.push(Move::Board {
            from,
            to,
            kind,
            promote: true,
        });
    }

    variants.push(Move::Board {
        from,
        to,
        kind,
        promote: false,
    });

    variants
}
