/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};

use super::{Color, PieceKind};

/// The pieces each player holds in hand (on their "stand"), ready to be dropped.
///
/// Only the seven [`PieceKind::HAND_KINDS`] can be held.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Hand([[u8; PieceKind::HAND_COUNT]; Color::COUNT]);

impl Hand {
    /// Creates an empty [`Hand`] for both players.
    #[inline(always)]
    pub const fn new() -> Self {
        Self([[0; PieceKind::HAND_COUNT]; Color::COUNT])
    }

    /// Number of `kind` pieces held by `color`.
    ///
    /// Kinds that cannot be held always count as zero.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Hand, PieceKind};
    /// let mut hand = Hand::new();
    /// hand.add(Color::Black, PieceKind::Gold);
    /// assert_eq!(hand.count(Color::Black, PieceKind::Gold), 1);
    /// assert_eq!(hand.count(Color::White, PieceKind::Gold), 0);
    /// assert_eq!(hand.count(Color::Black, PieceKind::King), 0);
    /// ```
    #[inline(always)]
    pub const fn count(&self, color: Color, kind: PieceKind) -> u8 {
        if kind.is_hand_kind() {
            self.0[color.index()][kind.index()]
        } else {
            0
        }
    }

    /// Adds a single `kind` piece to `color`'s hand.
    ///
    /// Promoted kinds are demoted first; kings are never taken into hand.
    #[inline(always)]
    pub fn add(&mut self, color: Color, kind: PieceKind) {
        self.add_many(color, kind, 1);
    }

    /// Adds `n` pieces of `kind` to `color`'s hand.
    ///
    /// The count saturates at `u8::MAX`. See [`Hand::try_add_many`] for a checked version.
    pub fn add_many(&mut self, color: Color, kind: PieceKind, n: u8) {
        let kind = kind.unpromoted();
        if kind.is_hand_kind() {
            self.0[color][kind] = self.0[color][kind].saturating_add(n);
        }
    }

    /// Adds `n` pieces of `kind` to `color`'s hand, failing if the count would overflow.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Hand, PieceKind};
    /// let mut hand = Hand::new();
    /// assert!(hand.try_add_many(Color::Black, PieceKind::Pawn, 200).is_ok());
    /// assert!(hand.try_add_many(Color::Black, PieceKind::Pawn, 200).is_err());
    /// assert_eq!(hand.count(Color::Black, PieceKind::Pawn), 200);
    /// ```
    pub fn try_add_many(&mut self, color: Color, kind: PieceKind, n: u8) -> Result<()> {
        let kind = kind.unpromoted();
        if !kind.is_hand_kind() {
            bail!("Cannot hold a {} in hand", kind.name());
        }

        let Some(total) = self.0[color][kind].checked_add(n) else {
            bail!("Too many {}s in hand", kind.name());
        };
        self.0[color][kind] = total;
        Ok(())
    }

    /// Removes a single `kind` piece from `color`'s hand, returning `false` if there was none.
    pub fn remove(&mut self, color: Color, kind: PieceKind) -> bool {
        if self.count(color, kind) == 0 {
            return false;
        }
        self.0[color][kind] -= 1;
        true
    }

    /// Iterates over the kinds `color` holds at least one of, alongside their counts.
    pub fn iter(&self, color: Color) -> impl Iterator<Item = (PieceKind, u8)> + '_ {
        PieceKind::HAND_KINDS
            .into_iter()
            .map(move |kind| (kind, self.count(color, kind)))
            .filter(|&(_, n)| n > 0)
    }

    /// Returns `true` if `color` holds nothing.
    #[inline(always)]
    pub fn is_empty(&self, color: Color) -> bool {
        self.iter(color).next().is_none()
    }

    /// The SFEN hand field, such as `G2Ps` or `-` for two empty hands.
    ///
    /// Kinds are listed rook first, as is customary.
    pub fn to_sfen(&self) -> String {
        let mut sfen = String::new();
        for color in Color::all() {
            for kind in PieceKind::HAND_KINDS.into_iter().rev() {
                let n = self.count(color, kind);
                if n == 0 {
                    continue;
                }
                if n > 1 {
                    sfen.push_str(&n.to_string());
                }
                let c = kind.sfen_char();
                sfen.push(match color {
                    Color::Black => c,
                    Color::White => c.to_ascii_lowercase(),
                });
            }
        }

        if sfen.is_empty() {
            sfen.push('-');
        }
        sfen
    }
}

impl<T> std::ops::Index<PieceKind> for [T; PieceKind::HAND_COUNT] {
    type Output = T;
    /// Hand kinds can be used to index into a list of [`PieceKind::HAND_COUNT`] elements.
    #[inline(always)]
    fn index(&self, index: PieceKind) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> std::ops::IndexMut<PieceKind> for [T; PieceKind::HAND_COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: PieceKind) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Hand {
    /// Displays both hands as CSA `P+` / `P-` lines; empty hands are omitted.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for color in Color::all() {
            if self.is_empty(color) {
                continue;
            }
            write!(f, "P{color}")?;
            for (kind, n) in self.iter(color) {
                for _ in 0..n {
                    write!(f, "00{kind}")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sfen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_promoted_pieces_are_demoted() {
        let mut hand = Hand::new();
        hand.add(Color::White, PieceKind::Dragon);
        hand.add(Color::White, PieceKind::ProPawn);
        assert_eq!(hand.count(Color::White, PieceKind::Rook), 1);
        assert_eq!(hand.count(Color::White, PieceKind::Pawn), 1);
    }

    #[test]
    fn test_remove_from_empty_hand() {
        let mut hand = Hand::new();
        assert!(!hand.remove(Color::Black, PieceKind::Pawn));
        hand.add(Color::Black, PieceKind::Pawn);
        assert!(hand.remove(Color::Black, PieceKind::Pawn));
        assert!(hand.is_empty(Color::Black));
    }

    #[test]
    fn test_sfen_hand() {
        let mut hand = Hand::new();
        assert_eq!(hand.to_sfen(), "-");
        hand.add(Color::Black, PieceKind::Gold);
        hand.add_many(Color::Black, PieceKind::Pawn, 2);
        hand.add(Color::White, PieceKind::Silver);
        assert_eq!(hand.to_sfen(), "G2Ps");
    }

    #[test]
    fn test_hand_counts_do_not_overflow() {
        let mut hand = Hand::new();
        hand.add_many(Color::Black, PieceKind::Pawn, 200);
        hand.add_many(Color::Black, PieceKind::Pawn, 200);
        assert_eq!(hand.count(Color::Black, PieceKind::Pawn), u8::MAX);

        let mut hand = Hand::new();
        assert!(hand.try_add_many(Color::White, PieceKind::Lance, 255).is_ok());
        assert!(hand.try_add_many(Color::White, PieceKind::Lance, 1).is_err());
        assert_eq!(hand.count(Color::White, PieceKind::Lance), 255);
        assert!(hand.try_add_many(Color::White, PieceKind::King, 1).is_err());
    }

    #[test]
    fn test_csa_hand_lines() {
        let mut hand = Hand::new();
        hand.add(Color::Black, PieceKind::Gold);
        hand.add(Color::Black, PieceKind::Silver);
        assert_eq!(hand.to_string(), "P+00GI00KI\n");
    }
}
