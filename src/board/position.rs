/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};
use arrayvec::ArrayVec;

use super::{Color, Hand, Move, Piece, PieceKind, Square};

/// Largest number of squares a single piece can ever attack.
///
/// Reached by a dragon or a horse near the center of an empty board.
pub const MAX_EFFECTS: usize = 20;

/// A list of squares, such as the squares attacked by a single piece.
pub type SquareList = ArrayVec<Square, MAX_EFFECTS>;

/// Offsets are `(file, rank)` steps, with ranks counted in the mover's forward direction.
const PAWN_STEPS: &[(i8, i8)] = &[(0, 1)];
const KNIGHT_STEPS: &[(i8, i8)] = &[(-1, 2), (1, 2)];
const SILVER_STEPS: &[(i8, i8)] = &[(-1, 1), (0, 1), (1, 1), (-1, -1), (1, -1)];
const GOLD_STEPS: &[(i8, i8)] = &[(-1, 1), (0, 1), (1, 1), (-1, 0), (1, 0), (0, -1)];
const ORTHOGONAL: &[(i8, i8)] = &[(0, 1), (0, -1), (-1, 0), (1, 0)];
const DIAGONAL: &[(i8, i8)] = &[(-1, 1), (1, 1), (-1, -1), (1, -1)];
const KING_STEPS: &[(i8, i8)] = &[
    (-1, 1),
    (0, 1),
    (1, 1),
    (-1, 0),
    (1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// Single steps and sliding rays of each kind of piece, as `(steps, rays)`.
const fn movement(kind: PieceKind) -> (&'static [(i8, i8)], &'static [(i8, i8)]) {
    match kind {
        PieceKind::Pawn => (PAWN_STEPS, &[]),
        PieceKind::Lance => (&[], PAWN_STEPS),
        PieceKind::Knight => (KNIGHT_STEPS, &[]),
        PieceKind::Silver => (SILVER_STEPS, &[]),
        PieceKind::Gold
        | PieceKind::ProPawn
        | PieceKind::ProLance
        | PieceKind::ProKnight
        | PieceKind::ProSilver => (GOLD_STEPS, &[]),
        PieceKind::Bishop => (&[], DIAGONAL),
        PieceKind::Rook => (&[], ORTHOGONAL),
        PieceKind::King => (KING_STEPS, &[]),
        PieceKind::Horse => (ORTHOGONAL, DIAGONAL),
        PieceKind::Dragon => (DIAGONAL, ORTHOGONAL),
    }
}

/// A shogi position: every placement on the board, both hands, and the side to move.
///
/// A [`Position`] is a plain value. Copies are independent, so a search can clone it
/// freely and never observe another branch's moves.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Position {
    board: [Option<Piece>; Square::COUNT],
    hand: Hand,
    side_to_move: Color,
}

impl Position {
    /// Creates a new, empty [`Position`] with empty hands and Black to move.
    ///
    /// # Example
    /// ```
    /// # use tsume::Position;
    /// let position = Position::new();
    /// assert_eq!(position.to_sfen(), "9/9/9/9/9/9/9/9/9 b - 1");
    /// ```
    #[inline(always)]
    pub const fn new() -> Self {
        Self {
            board: [None; Square::COUNT],
            hand: Hand::new(),
            side_to_move: Color::Black,
        }
    }

    /// Creates a [`Position`] holding a single `piece` on `square` and nothing else.
    ///
    /// Useful for asking which squares a piece would reach on an otherwise empty board.
    #[inline(always)]
    pub fn with_single(piece: Piece, square: Square) -> Self {
        let mut position = Self::new();
        position.place(piece, square);
        position
    }

    /// Creates a new [`Position`] from the provided SFEN string.
    ///
    /// The side to move and the hands may be omitted; the move number is ignored.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, PieceKind, Position, Square};
    /// let position = Position::from_sfen("7k1/9/7+P1/9/9/9/9/9/9 b G 1").unwrap();
    /// assert_eq!(position.king_square(Color::White), Some(Square::new(2, 1)));
    /// assert_eq!(position.hand().count(Color::Black, PieceKind::Gold), 1);
    /// ```
    pub fn from_sfen(sfen: &str) -> Result<Self> {
        let mut position = Self::new();
        let mut split = sfen.split_ascii_whitespace();

        let placements = split
            .next()
            .ok_or(anyhow!("SFEN string must have piece placements."))?;

        let ranks = placements.split('/').collect::<Vec<_>>();
        if ranks.len() != Square::SIZE as usize {
            bail!(
                "SFEN placements must describe 9 ranks. Got {} in {sfen:?}",
                ranks.len()
            );
        }

        for (i, row) in ranks.into_iter().enumerate() {
            let rank = i as i8 + 1;
            // Files are listed from 9 down to 1
            let mut file = Square::SIZE as i8;
            let mut promoted = false;

            for c in row.chars() {
                if let Some(n) = c.to_digit(10) {
                    if promoted {
                        bail!("Dangling '+' in rank {rank} of {sfen:?}");
                    }
                    file -= n as i8;
                    if file < 0 {
                        bail!("Rank {rank} of {sfen:?} describes too many squares");
                    }
                    continue;
                }

                if c == '+' {
                    promoted = true;
                    continue;
                }

                let mut kind = PieceKind::from_sfen_char(c)?;
                if promoted {
                    kind = kind
                        .promoted()
                        .ok_or(anyhow!("A {} cannot be promoted in {sfen:?}", kind.name()))?;
                    promoted = false;
                }

                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };

                let square = Square::try_new(file, rank)
                    .ok_or(anyhow!("Rank {rank} of {sfen:?} describes too many squares"))?;
                position.place(Piece::new(color, kind), square);
                file -= 1;
            }

            if file != 0 {
                bail!("Rank {rank} of {sfen:?} does not describe exactly 9 squares");
            }
        }

        if let Some(side) = split.next() {
            let mut chars = side.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                bail!("Invalid side to move {side:?} in {sfen:?}");
            };
            position.side_to_move = Color::from_sfen(c)?;
        }

        if let Some(hand) = split.next().filter(|&hand| hand != "-") {
            let mut count = 0u32;
            for c in hand.chars() {
                if let Some(n) = c.to_digit(10) {
                    count = count
                        .checked_mul(10)
                        .and_then(|count| count.checked_add(n))
                        .ok_or(anyhow!("Hand count too large in {sfen:?}"))?;
                    continue;
                }

                let kind = PieceKind::from_sfen_char(c)?;
                if !kind.is_hand_kind() {
                    bail!("Cannot hold a {} in hand in {sfen:?}", kind.name());
                }

                let color = if c.is_ascii_uppercase() {
                    Color::Black
                } else {
                    Color::White
                };
                let n = u8::try_from(count.max(1))
                    .map_err(|_| anyhow!("Hand count {count} too large in {sfen:?}"))?;
                position
                    .hand
                    .try_add_many(color, kind, n)
                    .with_context(|| format!("Invalid hand in {sfen:?}"))?;
                count = 0;
            }
        }

        Ok(position)
    }

    /// Generates an SFEN string from this [`Position`].
    pub fn to_sfen(&self) -> String {
        let mut ranks = Vec::with_capacity(Square::SIZE as usize);

        for rank in 1..=Square::SIZE {
            let mut row = String::new();
            let mut empty = 0;

            for file in (1..=Square::SIZE).rev() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            row.push_str(&empty.to_string());
                            empty = 0;
                        }
                        row.push_str(&piece.to_sfen());
                    }
                    None => empty += 1,
                }
            }

            if empty > 0 {
                row.push_str(&empty.to_string());
            }
            ranks.push(row);
        }

        format!(
            "{} {} {} 1",
            ranks.join("/"),
            self.side_to_move.to_sfen(),
            self.hand.to_sfen()
        )
    }

    /// Fetches the piece on `square`, if there is one.
    #[inline(always)]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board[square.index()]
    }

    /// Places `piece` on `square`, replacing whatever was there.
    #[inline(always)]
    pub fn place(&mut self, piece: Piece, square: Square) {
        self.board[square.index()] = Some(piece);
    }

    /// Removes and returns the piece on `square`, if there is one.
    #[inline(always)]
    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.board[square.index()].take()
    }

    /// The player whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Sets the player whose turn it is.
    #[inline(always)]
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Hands the turn to the other player.
    #[inline(always)]
    pub fn toggle_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opponent();
    }

    /// Both players' hands.
    #[inline(always)]
    pub const fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Mutable access to both players' hands.
    #[inline(always)]
    pub fn hand_mut(&mut self) -> &mut Hand {
        &mut self.hand
    }

    /// Iterates over every piece of `color` on the board, alongside its square.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(move |square| {
            self.piece_at(square)
                .filter(|piece| piece.color() == color)
                .map(|piece| (square, piece))
        })
    }

    /// The square of `color`'s king, if it has one on the board.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.is_king())
            .map(|(square, _)| square)
    }

    /// Puts every piece of a standard set that is neither on the board nor in a hand into `color`'s hand.
    ///
    /// Kings are never handed out. Promoted pieces on the board count as their unpromoted kind.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Piece, PieceKind, Position, Square};
    /// let mut position = Position::new();
    /// position.place(Piece::new(Color::Black, PieceKind::ProPawn), Square::new(2, 3));
    /// position.hand_mut().add(Color::Black, PieceKind::Rook);
    /// position.give_remaining_to(Color::White);
    /// assert_eq!(position.hand().count(Color::White, PieceKind::Pawn), 17);
    /// assert_eq!(position.hand().count(Color::White, PieceKind::Rook), 1);
    /// ```
    pub fn give_remaining_to(&mut self, color: Color) {
        for kind in PieceKind::HAND_KINDS {
            let on_board = self
                .board
                .iter()
                .flatten()
                .filter(|piece| piece.kind().unpromoted() == kind)
                .count() as u8;
            let in_hand = self.hand.count(Color::Black, kind) + self.hand.count(Color::White, kind);

            let remaining = PieceKind::SET_COUNTS[kind.index()].saturating_sub(on_board + in_hand);
            self.hand.add_many(color, kind, remaining);
        }
    }

    /// The squares a `piece` standing on `square` would attack in this position.
    ///
    /// Stepping pieces report every on-board target. Sliding pieces stop at, and include,
    /// the first occupied square in each direction. Occupants are never filtered, so the
    /// list may contain squares holding the piece's own side.
    pub fn attacks(&self, square: Square, piece: Piece) -> SquareList {
        let (steps, rays) = movement(piece.kind());
        let forward = piece.color().forward();

        let mut attacks = SquareList::new();

        for &(df, dr) in steps {
            if let Some(to) = square.offset(df, dr * forward) {
                attacks.push(to);
            }
        }

        for &(df, dr) in rays {
            let mut current = square;
            while let Some(to) = current.offset(df, dr * forward) {
                attacks.push(to);
                if self.piece_at(to).is_some() {
                    break;
                }
                current = to;
            }
        }

        attacks
    }

    /// The squares attacked by whatever piece stands on `square`; empty if there is none.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Piece, PieceKind, Position, Square};
    /// let knight = Position::with_single(Piece::new(Color::Black, PieceKind::Knight), Square::new(2, 5));
    /// let effects = knight.effects(Square::new(2, 5));
    /// assert_eq!(effects.as_slice(), &[Square::new(1, 3), Square::new(3, 3)]);
    /// ```
    #[inline(always)]
    pub fn effects(&self, square: Square) -> SquareList {
        match self.piece_at(square) {
            Some(piece) => self.attacks(square, piece),
            None => SquareList::new(),
        }
    }

    /// Returns `true` if any piece of `color` attacks `square`.
    pub fn is_attacked_by(&self, square: Square, color: Color) -> bool {
        self.pieces(color)
            .any(|(from, piece)| self.attacks(from, piece).contains(&square))
    }

    /// The squares of every piece currently checking `color`'s king.
    ///
    /// Empty if `color` is not in check, or has no king.
    pub fn checkers(&self, color: Color) -> SquareList {
        let mut checkers = SquareList::new();
        let Some(king) = self.king_square(color) else {
            return checkers;
        };

        for (from, piece) in self.pieces(color.opponent()) {
            if self.attacks(from, piece).contains(&king) && !checkers.is_full() {
                checkers.push(from);
            }
        }

        checkers
    }

    /// Returns `true` if `color`'s king is attacked.
    #[inline(always)]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.king_square(color)
            .is_some_and(|king| self.is_attacked_by(king, color.opponent()))
    }

    /// Checks if the provided move is legal for the side to move.
    ///
    /// If `Ok()`, the move is legal.
    /// If `Err(msg)`, then `msg` will be a reason as to why it's not legal.
    ///
    /// Mating by a pawn drop is *not* rejected here; whether a drop mates can only be
    /// told by looking at the opponent's replies.
    pub fn check_legality_of(&self, mv: Move) -> Result<()> {
        let color = self.side_to_move;

        match mv {
            Move::Board {
                from,
                to,
                kind,
                promote,
            } => {
                let Some(piece) = self.piece_at(from) else {
                    bail!("No piece on {from} to move");
                };

                if piece.color() != color {
                    bail!("Tried to move a piece that wasn't yours");
                }

                if piece.kind() != kind {
                    bail!("The piece on {from} is a {}, not a {}", piece.kind().name(), kind.name());
                }

                if !self.attacks(from, piece).contains(&to) {
                    bail!("A {} on {from} cannot reach {to}", kind.name());
                }

                if let Some(target) = self.piece_at(to) {
                    if target.color() == color {
                        bail!("Tried to capture your own piece");
                    }

                    if target.is_king() {
                        bail!("Tried to capture the enemy king");
                    }
                }

                if promote {
                    if !kind.can_promote() {
                        bail!("A {} cannot promote", kind.name());
                    }

                    if !from.is_promotion_zone(color) && !to.is_promotion_zone(color) {
                        bail!("Cannot promote on {from}{to}, outside of the promotion zone");
                    }
                } else if to.ranks_from_far_edge(color) <= kind.dead_ranks() {
                    bail!("An unpromoted {} on {to} could never move again", kind.name());
                }
            }

            Move::Drop { to, kind } => {
                if !kind.is_hand_kind() {
                    bail!("Cannot drop a {}", kind.name());
                }

                if self.hand.count(color, kind) == 0 {
                    bail!("No {} in hand to drop", kind.name());
                }

                if self.piece_at(to).is_some() {
                    bail!("Tried to drop onto occupied square {to}");
                }

                if to.ranks_from_far_edge(color) <= kind.dead_ranks() {
                    bail!("A {} dropped on {to} could never move", kind.name());
                }

                if kind == PieceKind::Pawn
                    && self
                        .pieces(color)
                        .any(|(square, piece)| piece.is_pawn() && square.file() == to.file())
                {
                    bail!("Two unpromoted pawns on file {}", to.file());
                }
            }
        }

        if self.with_move_made(mv).is_in_check(color) {
            bail!("Move leaves the {} king in check", color.name());
        }

        Ok(())
    }

    /// Returns `true` if the provided move is legal for the side to move.
    ///
    /// Applies the same rules as [`Position::check_legality_of`], without building a reason.
    pub fn is_legal(&self, mv: Move) -> bool {
        let color = self.side_to_move;

        match mv {
            Move::Board {
                from,
                to,
                kind,
                promote,
            } => {
                // The right piece of ours must be here, and able to reach `to`
                let Some(piece) = self.piece_at(from) else {
                    return false;
                };
                if piece.color() != color || piece.kind() != kind {
                    return false;
                }
                if !self.attacks(from, piece).contains(&to) {
                    return false;
                }

                if self
                    .piece_at(to)
                    .is_some_and(|target| target.color() == color || target.is_king())
                {
                    return false;
                }

                if promote {
                    if !kind.can_promote()
                        || (!from.is_promotion_zone(color) && !to.is_promotion_zone(color))
                    {
                        return false;
                    }
                } else if to.ranks_from_far_edge(color) <= kind.dead_ranks() {
                    return false;
                }
            }

            Move::Drop { to, kind } => {
                if !kind.is_hand_kind()
                    || self.hand.count(color, kind) == 0
                    || self.piece_at(to).is_some()
                    || to.ranks_from_far_edge(color) <= kind.dead_ranks()
                {
                    return false;
                }

                // Nifu
                if kind == PieceKind::Pawn
                    && self
                        .pieces(color)
                        .any(|(square, piece)| piece.is_pawn() && square.file() == to.file())
                {
                    return false;
                }
            }
        }

        !self.with_move_made(mv).is_in_check(color)
    }

    /// Applies the move for the side to move. No enforcement of legality.
    ///
    /// Captured pieces go to the mover's hand, unpromoted.
    pub fn make_move(&mut self, mv: Move) {
        let color = self.side_to_move;

        match mv {
            Move::Board {
                from, to, promote, ..
            } => {
                // Remove the piece from its previous location, exiting early if there is no piece there
                let Some(mut piece) = self.take(from) else {
                    return;
                };

                if let Some(captured) = self.take(to) {
                    self.hand.add(color, captured.kind());
                }

                if promote {
                    piece = piece.promoted();
                }
                self.place(piece, to);
            }

            Move::Drop { to, kind } => {
                self.hand.remove(color, kind);
                self.place(Piece::new(color, kind), to);
            }
        }

        self.toggle_side_to_move();
    }

    /// Copies `self` and returns a [`Position`] after having applied the provided [`Move`].
    #[inline(always)]
    pub fn with_move_made(&self, mv: Move) -> Self {
        let mut copied = self.clone();
        copied.make_move(mv);
        copied
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_sfen(s)
    }
}

impl Default for Position {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Position {
    /// Displays this position in CSA format: one `P<rank>` line per rank, the hands, then the side to move.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 1..=Square::SIZE {
            write!(f, "P{rank}")?;
            for file in (1..=Square::SIZE).rev() {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => write!(f, " * ")?,
                }
            }
            writeln!(f)?;
        }

        write!(f, "{}", self.hand)?;
        write!(f, "{}", self.side_to_move)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_sfen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black(kind: PieceKind) -> Piece {
        Piece::new(Color::Black, kind)
    }

    fn white(kind: PieceKind) -> Piece {
        Piece::new(Color::White, kind)
    }

    #[test]
    fn test_sfen_round_trip() {
        let sfens = [
            "9/9/9/9/9/9/9/9/9 b - 1",
            "7k1/9/6P+P1/9/9/9/9/9/9 b - 1",
            "8l/7k1/6R1p/9/9/9/9/9/9 w 2Pg 1",
            "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1",
        ];

        for sfen in sfens {
            let position = Position::from_sfen(sfen).unwrap();
            assert_eq!(position.to_sfen(), sfen);
        }
    }

    #[test]
    fn test_sfen_rejects_bad_input() {
        assert!(Position::from_sfen("").is_err());
        assert!(Position::from_sfen("9/9/9").is_err());
        assert!(Position::from_sfen("10/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(Position::from_sfen("8/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(Position::from_sfen("+g8/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(Position::from_sfen("9/9/9/9/9/9/9/9/9 x - 1").is_err());
        assert!(Position::from_sfen("9/9/9/9/9/9/9/9/9 b K 1").is_err());
    }

    #[test]
    fn test_sfen_rejects_oversized_counts() {
        assert!(Position::from_sfen("9999999999999999/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(Position::from_sfen("99/9/9/9/9/9/9/9/9 b - 1").is_err());
        assert!(Position::from_sfen("9/9/9/9/9/9/9/9/9 b 200P200P 1").is_err());
        assert!(Position::from_sfen("9/9/9/9/9/9/9/9/9 b 99999999999P 1").is_err());
        assert!(Position::from_sfen("9/9/9/9/9/9/9/9/9 b 300P 1").is_err());

        let position = Position::from_sfen("9/9/9/9/9/9/9/9/9 b 18P2p 1").unwrap();
        assert_eq!(position.hand().count(Color::Black, PieceKind::Pawn), 18);
        assert_eq!(position.hand().count(Color::White, PieceKind::Pawn), 2);
    }

    #[test]
    fn test_slider_effects_stop_at_first_blocker() {
        let mut position = Position::with_single(black(PieceKind::Lance), Square::new(1, 9));
        position.place(white(PieceKind::Pawn), Square::new(1, 5));

        let effects = position.effects(Square::new(1, 9));
        assert_eq!(
            effects.as_slice(),
            &[
                Square::new(1, 8),
                Square::new(1, 7),
                Square::new(1, 6),
                Square::new(1, 5)
            ]
        );
    }

    #[test]
    fn test_white_pieces_move_toward_rank_nine() {
        let pawn = Position::with_single(white(PieceKind::Pawn), Square::new(5, 5));
        assert_eq!(pawn.effects(Square::new(5, 5)).as_slice(), &[Square::new(5, 6)]);

        let knight = Position::with_single(white(PieceKind::Knight), Square::new(2, 1));
        assert_eq!(
            knight.effects(Square::new(2, 1)).as_slice(),
            &[Square::new(1, 3), Square::new(3, 3)]
        );
    }

    #[test]
    fn test_dragon_reaches_twenty_squares_from_the_center() {
        let dragon = Position::with_single(black(PieceKind::Dragon), Square::new(5, 5));
        assert_eq!(dragon.effects(Square::new(5, 5)).len(), MAX_EFFECTS);
    }

    #[test]
    fn test_checkers_and_check() {
        let mut position = Position::with_single(white(PieceKind::King), Square::new(5, 1));
        assert!(!position.is_in_check(Color::White));

        position.place(black(PieceKind::Rook), Square::new(5, 5));
        position.place(black(PieceKind::Bishop), Square::new(8, 4));
        assert!(position.is_in_check(Color::White));
        assert_eq!(
            position.checkers(Color::White).as_slice(),
            &[Square::new(8, 4), Square::new(5, 5)]
        );

        // Interposing on 5-3 blocks the rook
        position.place(white(PieceKind::Gold), Square::new(5, 3));
        assert_eq!(position.checkers(Color::White).as_slice(), &[Square::new(8, 4)]);
    }

    #[test]
    fn test_make_move_captures_into_hand() {
        let mut position = Position::with_single(black(PieceKind::Rook), Square::new(5, 5));
        position.place(white(PieceKind::Horse), Square::new(5, 2));

        position.make_move(Move::Board {
            from: Square::new(5, 5),
            to: Square::new(5, 2),
            kind: PieceKind::Rook,
            promote: true,
        });

        assert_eq!(position.piece_at(Square::new(5, 2)), Some(black(PieceKind::Dragon)));
        assert_eq!(position.piece_at(Square::new(5, 5)), None);
        assert_eq!(position.hand().count(Color::Black, PieceKind::Bishop), 1);
        assert_eq!(position.side_to_move(), Color::White);
    }

    #[test]
    fn test_drop_removes_from_hand() {
        let mut position = Position::new();
        position.hand_mut().add(Color::Black, PieceKind::Gold);
        let drop = Move::Drop {
            to: Square::new(5, 5),
            kind: PieceKind::Gold,
        };

        assert!(position.is_legal(drop));
        position.make_move(drop);
        assert_eq!(position.hand().count(Color::Black, PieceKind::Gold), 0);
        assert_eq!(position.piece_at(Square::new(5, 5)), Some(black(PieceKind::Gold)));
    }

    #[test]
    fn test_illegal_drops() {
        let mut position = Position::with_single(black(PieceKind::Pawn), Square::new(3, 7));
        position.hand_mut().add_many(Color::Black, PieceKind::Pawn, 2);
        position.hand_mut().add(Color::Black, PieceKind::Knight);

        // Two pawns on a file
        assert!(!position.is_legal(Move::Drop {
            to: Square::new(3, 4),
            kind: PieceKind::Pawn
        }));
        // A pawn on the last rank
        assert!(!position.is_legal(Move::Drop {
            to: Square::new(4, 1),
            kind: PieceKind::Pawn
        }));
        // A knight on the last two ranks
        assert!(!position.is_legal(Move::Drop {
            to: Square::new(4, 2),
            kind: PieceKind::Knight
        }));
        // Not in hand
        assert!(!position.is_legal(Move::Drop {
            to: Square::new(4, 5),
            kind: PieceKind::Gold
        }));
        // Occupied
        assert!(!position.is_legal(Move::Drop {
            to: Square::new(3, 7),
            kind: PieceKind::Knight
        }));

        assert!(position.is_legal(Move::Drop {
            to: Square::new(4, 2),
            kind: PieceKind::Pawn
        }));
        assert!(position.is_legal(Move::Drop {
            to: Square::new(4, 3),
            kind: PieceKind::Knight
        }));
    }

    #[test]
    fn test_illegal_board_moves() {
        let mut position = Position::with_single(black(PieceKind::Pawn), Square::new(3, 2));
        position.place(black(PieceKind::Silver), Square::new(5, 5));
        position.place(black(PieceKind::Gold), Square::new(5, 4));

        // A pawn must promote on the last rank
        let push = Move::Board {
            from: Square::new(3, 2),
            to: Square::new(3, 1),
            kind: PieceKind::Pawn,
            promote: false,
        };
        assert!(!position.is_legal(push));
        assert!(position.is_legal(Move::Board {
            from: Square::new(3, 2),
            to: Square::new(3, 1),
            kind: PieceKind::Pawn,
            promote: true,
        }));

        // A silver cannot promote outside of the zone
        assert!(!position.is_legal(Move::Board {
            from: Square::new(5, 5),
            to: Square::new(4, 4),
            kind: PieceKind::Silver,
            promote: true,
        }));

        // A gold cannot promote at all, and cannot capture its own pieces
        assert!(!position.is_legal(Move::Board {
            from: Square::new(5, 4),
            to: Square::new(5, 3),
            kind: PieceKind::Gold,
            promote: true,
        }));
        assert!(!position.is_legal(Move::Board {
            from: Square::new(5, 4),
            to: Square::new(5, 5),
            kind: PieceKind::Gold,
            promote: false,
        }));

        // Wrong kind, unreachable square, and out of turn
        assert!(!position.is_legal(Move::Board {
            from: Square::new(5, 5),
            to: Square::new(4, 4),
            kind: PieceKind::Gold,
            promote: false,
        }));
        assert!(!position.is_legal(Move::Board {
            from: Square::new(5, 5),
            to: Square::new(5, 6),
            kind: PieceKind::Silver,
            promote: false,
        }));
        position.set_side_to_move(Color::White);
        assert!(!position.is_legal(Move::Board {
            from: Square::new(5, 5),
            to: Square::new(4, 4),
            kind: PieceKind::Silver,
            promote: false,
        }));
    }

    #[test]
    fn test_king_may_not_step_into_check() {
        let mut position = Position::with_single(white(PieceKind::King), Square::new(1, 1));
        position.place(black(PieceKind::Gold), Square::new(3, 2));
        position.set_side_to_move(Color::White);

        let into_check = Move::Board {
            from: Square::new(1, 1),
            to: Square::new(2, 1),
            kind: PieceKind::King,
            promote: false,
        };
        assert!(position.check_legality_of(into_check).is_err());

        let safe = Move::Board {
            from: Square::new(1, 1),
            to: Square::new(1, 2),
            kind: PieceKind::King,
            promote: false,
        };
        assert!(position.is_legal(safe));
    }

    #[test]
    fn test_is_legal_agrees_with_legality_reasons() {
        let mut position = crate::Problem::by_id(4).position().unwrap();

        for color in Color::all() {
            position.set_side_to_move(color);

            for kind in PieceKind::all() {
                for to in Square::iter() {
                    let drop = Move::Drop { to, kind };
                    assert_eq!(
                        position.is_legal(drop),
                        position.check_legality_of(drop).is_ok(),
                        "{drop:?}"
                    );

                    for from in Square::iter() {
                        for promote in [false, true] {
                            let mv = Move::Board {
                                from,
                                to,
                                kind,
                                promote,
                            };
                            assert_eq!(
                                position.is_legal(mv),
                                position.check_legality_of(mv).is_ok(),
                                "{mv:?}"
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_display_csa_board() {
        let mut position = Position::with_single(white(PieceKind::King), Square::new(2, 1));
        position.hand_mut().add(Color::Black, PieceKind::Gold);
        let text = position.to_string();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P1 *  *  *  *  *  *  * -OU * "));
        assert_eq!(lines.nth(8), Some("P+00KI"));
        assert_eq!(lines.next(), Some("+"));
    }
}
