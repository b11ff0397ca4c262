/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut, Not},
    str::FromStr,
};

use anyhow::{bail, Result};

/// Represents the color of a player or piece on a shogi board.
///
/// Black (*sente*) moves first and, in a tsume problem, is always the attacking side.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    Black,
    White,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with Black.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::Black, Self::White]
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use tsume::Color;
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::Black => Self::White,
            Self::White => Self::Black,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Rank offset of a single step "forward" for this [`Color`].
    ///
    /// Black advances toward rank 1, White toward rank 9.
    #[inline(always)]
    pub const fn forward(&self) -> i8 {
        match self {
            Self::Black => -1,
            Self::White => 1,
        }
    }

    /// The sign used for this [`Color`] in CSA notation.
    ///
    /// # Example
    /// ```
    /// # use tsume::Color;
    /// assert_eq!(Color::Black.to_csa(), '+');
    /// assert_eq!(Color::White.to_csa(), '-');
    /// ```
    #[inline(always)]
    pub const fn to_csa(&self) -> char {
        match self {
            Self::Black => '+',
            Self::White => '-',
        }
    }

    /// Parses a [`Color`] from its CSA sign.
    pub fn from_csa(sign: char) -> Result<Self> {
        match sign {
            '+' => Ok(Self::Black),
            '-' => Ok(Self::White),
            _ => bail!("Invalid CSA color sign: expected '+' or '-'. Got {sign:?}"),
        }
    }

    /// Parses a [`Color`] from its SFEN side-to-move character.
    pub fn from_sfen(c: char) -> Result<Self> {
        match c {
            'b' => Ok(Self::Black),
            'w' => Ok(Self::White),
            _ => bail!("Invalid SFEN color: expected 'b' or 'w'. Got {c:?}"),
        }
    }

    /// The SFEN side-to-move character of this [`Color`].
    #[inline(always)]
    pub const fn to_sfen(&self) -> char {
        match self {
            Self::Black => 'b',
            Self::White => 'w',
        }
    }

    /// Human-readable name of this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Black => "black",
            Self::White => "white",
        }
    }
}

impl Not for Color {
    type Output = Self;
    #[inline(always)]
    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_csa())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The kind of a shogi piece, including its promotion state.
///
/// The first seven variants are the kinds that can be held in hand, in their usual order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
    ProPawn,
    ProLance,
    ProKnight,
    ProSilver,
    Horse,
    Dragon,
}

impl PieceKind {
    /// Number of piece kinds, promoted kinds included.
    pub const COUNT: usize = 14;

    /// Number of kinds that can be held in hand.
    pub const HAND_COUNT: usize = 7;

    /// Kinds that can be held in hand and dropped, in hand order.
    pub const HAND_KINDS: [Self; Self::HAND_COUNT] = [
        Self::Pawn,
        Self::Lance,
        Self::Knight,
        Self::Silver,
        Self::Gold,
        Self::Bishop,
        Self::Rook,
    ];

    /// How many pieces of each unpromoted kind make up a complete set, indexed like [`Self::HAND_KINDS`].
    pub const SET_COUNTS: [u8; Self::HAND_COUNT] = [18, 4, 4, 4, 4, 2, 2];

    /// An array of every kind.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Pawn,
            Self::Lance,
            Self::Knight,
            Self::Silver,
            Self::Gold,
            Self::Bishop,
            Self::Rook,
            Self::King,
            Self::ProPawn,
            Self::ProLance,
            Self::ProKnight,
            Self::ProSilver,
            Self::Horse,
            Self::Dragon,
        ]
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    ///
    /// Hand kinds map onto `[0, 7)`.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Returns `true` if this kind may sit in a hand.
    ///
    /// # Example
    /// ```
    /// # use tsume::PieceKind;
    /// assert!(PieceKind::Rook.is_hand_kind());
    /// assert!(!PieceKind::King.is_hand_kind());
    /// assert!(!PieceKind::Dragon.is_hand_kind());
    /// ```
    #[inline(always)]
    pub const fn is_hand_kind(&self) -> bool {
        self.index() < Self::HAND_COUNT
    }

    /// Returns `true` if this kind can still promote.
    #[inline(always)]
    pub const fn can_promote(&self) -> bool {
        self.promoted().is_some()
    }

    /// Returns `true` if this kind is already promoted.
    #[inline(always)]
    pub const fn is_promoted(&self) -> bool {
        self.index() > Self::King.index()
    }

    /// The promoted form of this kind, if it has one.
    ///
    /// # Example
    /// ```
    /// # use tsume::PieceKind;
    /// assert_eq!(PieceKind::Pawn.promoted(), Some(PieceKind::ProPawn));
    /// assert_eq!(PieceKind::Gold.promoted(), None);
    /// assert_eq!(PieceKind::Horse.promoted(), None);
    /// ```
    #[inline(always)]
    pub const fn promoted(&self) -> Option<Self> {
        match self {
            Self::Pawn => Some(Self::ProPawn),
            Self::Lance => Some(Self::ProLance),
            Self::Knight => Some(Self::ProKnight),
            Self::Silver => Some(Self::ProSilver),
            Self::Bishop => Some(Self::Horse),
            Self::Rook => Some(Self::Dragon),
            _ => None,
        }
    }

    /// The unpromoted form of this kind; the kind a captured piece takes in hand.
    ///
    /// # Example
    /// ```
    /// # use tsume::PieceKind;
    /// assert_eq!(PieceKind::Dragon.unpromoted(), PieceKind::Rook);
    /// assert_eq!(PieceKind::Silver.unpromoted(), PieceKind::Silver);
    /// ```
    #[inline(always)]
    pub const fn unpromoted(&self) -> Self {
        match self {
            Self::ProPawn => Self::Pawn,
            Self::ProLance => Self::Lance,
            Self::ProKnight => Self::Knight,
            Self::ProSilver => Self::Silver,
            Self::Horse => Self::Bishop,
            Self::Dragon => Self::Rook,
            _ => *self,
        }
    }

    /// Number of ranks, counted from the far edge, on which this kind could never move again.
    ///
    /// A piece of this kind may not be dropped there, nor stay unpromoted there.
    #[inline(always)]
    pub const fn dead_ranks(&self) -> u8 {
        match self {
            Self::Pawn | Self::Lance => 1,
            Self::Knight => 2,
            _ => 0,
        }
    }

    /// The two-letter CSA code of this kind.
    #[inline(always)]
    pub const fn to_csa(&self) -> &'static str {
        match self {
            Self::Pawn => "FU",
            Self::Lance => "KY",
            Self::Knight => "KE",
            Self::Silver => "GI",
            Self::Gold => "KI",
            Self::Bishop => "KA",
            Self::Rook => "HI",
            Self::King => "OU",
            Self::ProPawn => "TO",
            Self::ProLance => "NY",
            Self::ProKnight => "NK",
            Self::ProSilver => "NG",
            Self::Horse => "UM",
            Self::Dragon => "RY",
        }
    }

    /// Parses a [`PieceKind`] from its two-letter CSA code.
    ///
    /// # Example
    /// ```
    /// # use tsume::PieceKind;
    /// assert_eq!(PieceKind::from_csa("KI").unwrap(), PieceKind::Gold);
    /// assert!(PieceKind::from_csa("QQ").is_err());
    /// ```
    pub fn from_csa(code: &str) -> Result<Self> {
        let Some(kind) = Self::all().into_iter().find(|kind| kind.to_csa() == code) else {
            bail!("Invalid CSA piece code {code:?}");
        };
        Ok(kind)
    }

    /// The SFEN letter of this kind's unpromoted form, in uppercase.
    #[inline(always)]
    pub const fn sfen_char(&self) -> char {
        match self.unpromoted() {
            Self::Pawn => 'P',
            Self::Lance => 'L',
            Self::Knight => 'N',
            Self::Silver => 'S',
            Self::Gold => 'G',
            Self::Bishop => 'B',
            Self::Rook => 'R',
            _ => 'K',
        }
    }

    /// Parses an unpromoted [`PieceKind`] from an SFEN letter of either case.
    pub fn from_sfen_char(c: char) -> Result<Self> {
        Ok(match c.to_ascii_uppercase() {
            'P' => Self::Pawn,
            'L' => Self::Lance,
            'N' => Self::Knight,
            'S' => Self::Silver,
            'G' => Self::Gold,
            'B' => Self::Bishop,
            'R' => Self::Rook,
            'K' => Self::King,
            _ => bail!("Invalid SFEN piece character {c:?}"),
        })
    }

    /// Human-readable name of this kind.
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Lance => "lance",
            Self::Knight => "knight",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::King => "king",
            Self::ProPawn => "tokin",
            Self::ProLance => "promoted lance",
            Self::ProKnight => "promoted knight",
            Self::ProSilver => "promoted silver",
            Self::Horse => "horse",
            Self::Dragon => "dragon",
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Alias for [`PieceKind::from_csa`].
    #[inline(always)]
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_csa(s)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_csa())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A piece on the board: a [`PieceKind`] owned by a [`Color`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    color: Color,
    kind: PieceKind,
}

impl Piece {
    /// Creates a new [`Piece`].
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Piece, PieceKind};
    /// let gold = Piece::new(Color::Black, PieceKind::Gold);
    /// assert_eq!(gold.to_string(), "+KI");
    /// ```
    #[inline(always)]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// The owner of this piece.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The kind of this piece.
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns `true` if this piece is a king.
    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns `true` if this piece is an unpromoted pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// This piece, promoted. Kinds that cannot promote are returned unchanged.
    #[inline(always)]
    pub const fn promoted(self) -> Self {
        match self.kind.promoted() {
            Some(kind) => Self::new(self.color, kind),
            None => self,
        }
    }

    /// The SFEN token of this piece, such as `P`, `+r`, or `k`.
    pub fn to_sfen(&self) -> String {
        let c = self.kind.sfen_char();
        let c = match self.color {
            Color::Black => c,
            Color::White => c.to_ascii_lowercase(),
        };

        if self.kind.is_promoted() {
            format!("+{c}")
        } else {
            c.to_string()
        }
    }
}

impl fmt::Display for Piece {
    /// A [`Piece`] displays in CSA form: its color's sign followed by its kind's code.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color, self.kind)
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color.name(), self.kind.name())
    }
}

macro_rules! impl_indexing {
    ($type:ty) => {
        impl<T> Index<$type> for [T; <$type>::COUNT] {
            type Output = T;
            /// [`$type`] can be used to index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index(&self, index: $type) -> &Self::Output {
                &self[index.index()]
            }
        }

        impl<T> IndexMut<$type> for [T; <$type>::COUNT] {
            /// [`$type`] can be used to mutably index into a list of [`<$type>::COUNT`] elements.
            #[inline(always)]
            fn index_mut(&mut self, index: $type) -> &mut Self::Output {
                &mut self[index.index()]
            }
        }
    };
}

impl_indexing!(Color);
impl_indexing!(PieceKind);
