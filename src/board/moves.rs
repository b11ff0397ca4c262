/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, bail, Context, Result};

use super::{Color, PieceKind, Position, Square};

/// A single shogi move: either a piece moving on the board, or a piece dropped from hand.
///
/// A [`Move`] does not carry its player; whoever records the move (such as a node of a
/// [`MoveTree`](crate::MoveTree)) attaches the [`Color`] to it.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Moves the `kind` piece on `from` to `to`, promoting it if `promote` is set.
    Board {
        from: Square,
        to: Square,
        kind: PieceKind,
        promote: bool,
    },

    /// Drops a `kind` piece from hand onto `to`.
    Drop { to: Square, kind: PieceKind },
}

impl Move {
    /// The destination of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Square {
        match self {
            Self::Board { to, .. } | Self::Drop { to, .. } => *to,
        }
    }

    /// The origin of this [`Move`], or `None` for drops.
    #[inline(always)]
    pub const fn from(&self) -> Option<Square> {
        match self {
            Self::Board { from, .. } => Some(*from),
            Self::Drop { .. } => None,
        }
    }

    /// The kind of the moving piece, before any promotion.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        match self {
            Self::Board { kind, .. } | Self::Drop { kind, .. } => *kind,
        }
    }

    /// The kind of the moving piece once this [`Move`] has been made.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Move, PieceKind, Square};
    /// let mv = Move::Board {
    ///     from: Square::new(3, 3),
    ///     to: Square::new(3, 2),
    ///     kind: PieceKind::Pawn,
    ///     promote: true,
    /// };
    /// assert_eq!(mv.kind_after(), PieceKind::ProPawn);
    /// ```
    #[inline(always)]
    pub const fn kind_after(&self) -> PieceKind {
        match self {
            Self::Board {
                kind,
                promote: true,
                ..
            } => match kind.promoted() {
                Some(promoted) => promoted,
                None => *kind,
            },
            _ => self.kind(),
        }
    }

    /// Returns `true` if this [`Move`] is a drop.
    #[inline(always)]
    pub const fn is_drop(&self) -> bool {
        matches!(self, Self::Drop { .. })
    }

    /// Returns `true` if this [`Move`] drops a pawn.
    ///
    /// Mating with such a move (*uchifuzume*) is forbidden.
    #[inline(always)]
    pub const fn is_pawn_drop(&self) -> bool {
        matches!(
            self,
            Self::Drop {
                kind: PieceKind::Pawn,
                ..
            }
        )
    }

    /// Returns `true` if this [`Move`] promotes the moving piece.
    #[inline(always)]
    pub const fn is_promotion(&self) -> bool {
        matches!(self, Self::Board { promote: true, .. })
    }

    /// Formats this [`Move`], made by `color`, in CSA notation.
    ///
    /// Drops use `00` as their origin, and the piece code is the one *after* the move.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Move, PieceKind, Square};
    /// let push = Move::Board {
    ///     from: Square::new(3, 3),
    ///     to: Square::new(3, 2),
    ///     kind: PieceKind::Pawn,
    ///     promote: true,
    /// };
    /// assert_eq!(push.to_csa(Color::Black), "+3332TO");
    ///
    /// let drop = Move::Drop { to: Square::new(1, 2), kind: PieceKind::Gold };
    /// assert_eq!(drop.to_csa(Color::White), "-0012KI");
    /// ```
    pub fn to_csa(&self, color: Color) -> String {
        let from = self
            .from()
            .map(|sq| sq.to_string())
            .unwrap_or_else(|| String::from("00"));

        format!("{color}{from}{}{}", self.to(), self.kind_after())
    }

    /// Parses a CSA move such as `+3332TO` or `-0012KI`, using `position` to work out
    /// which piece is moving and whether it promotes.
    ///
    /// Returns the move's player alongside the [`Move`]. The move is not checked for legality.
    pub fn from_csa(position: &Position, csa: &str) -> Result<(Color, Self)> {
        if csa.len() != 7 || !csa.is_ascii() {
            bail!("CSA move must be 7 characters long, such as \"+7776FU\". Got {csa:?}");
        }

        let color = Color::from_csa(csa.as_bytes()[0] as char)?;
        let to = Square::from_csa(&csa[3..5])?;
        let kind_after = PieceKind::from_csa(&csa[5..7])?;

        if &csa[1..3] == "00" {
            if !kind_after.is_hand_kind() {
                bail!("Cannot drop a {} in {csa:?}", kind_after.name());
            }
            return Ok((color, Self::Drop { to, kind: kind_after }));
        }

        let from = Square::from_csa(&csa[1..3])?;
        let piece = position
            .piece_at(from)
            .ok_or(anyhow!("No piece found at {from} when parsing {csa:?}"))?;

        let kind = piece.kind();
        let promote = if kind == kind_after {
            false
        } else if kind.promoted() == Some(kind_after) {
            true
        } else {
            bail!("The {} on {from} cannot become a {}", kind.name(), kind_after.name());
        };

        Ok((
            color,
            Self::Board {
                from,
                to,
                kind,
                promote,
            },
        ))
    }

    /// Parses a whitespace-separated sequence of CSA moves, playing each on a copy of `position`.
    ///
    /// Every move must be legal in the position it is played in.
    pub fn line_from_csa(position: &Position, line: &str) -> Result<Vec<(Color, Self)>> {
        let mut position = position.clone();
        let mut moves = Vec::new();

        for csa in line.split_ascii_whitespace() {
            let (color, mv) = Self::from_csa(&position, csa)?;
            if color != position.side_to_move() {
                bail!("{csa:?} was played out of turn");
            }
            position
                .check_legality_of(mv)
                .with_context(|| format!("{csa:?} is not legal"))?;
            position.make_move(mv);
            moves.push((color, mv));
        }

        Ok(moves)
    }
}

impl fmt::Display for Move {
    /// Displays this [`Move`] in CSA notation, without its player's sign.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.from() {
            Some(from) => write!(f, "{from}{}{}", self.to(), self.kind_after()),
            None => write!(f, "00{}{}", self.to(), self.kind_after()),
        }
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board { promote: true, .. } => write!(f, "{self} (promotion)"),
            Self::Board { .. } => write!(f, "{self}"),
            Self::Drop { .. } => write!(f, "{self} (drop)"),
        }
    }
}
