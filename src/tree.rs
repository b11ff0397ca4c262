/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use crate::{Color, Move};

/// What a single node of a [`MoveTree`] records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// The starting position. Only ever the top of a tree.
    Root,

    /// A move made by `color`.
    Move { mv: Move, color: Color },

    /// The defender had no way out of check.
    Checkmate,

    /// The attacker had no check to give, or could only mate by dropping a pawn.
    CannotCheckmate,

    /// The search ran out of depth here.
    OverLimit,
}

impl NodeKind {
    /// Returns `true` if nodes of this kind can never have children.
    #[inline(always)]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Checkmate | Self::CannotCheckmate | Self::OverLimit)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move { mv, color } => write!(f, "{}", mv.to_csa(*color)),
            Self::Checkmate => write!(f, "<Checkmate>"),
            Self::CannotCheckmate => write!(f, "<Cannot checkmate>"),
            Self::OverLimit => write!(f, "<Over move limit>"),
            Self::Root => write!(f, "<Unexpected result>"),
        }
    }
}

/// A record of every line explored by a search, tagged by how each line ended.
///
/// Each node owns its children, in the order they were explored.
/// The depth of a node is the number of [`NodeKind::Move`] nodes above and including it,
/// so the root sits at depth `0`, attacker moves at odd depths and defender moves at even ones.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MoveTree {
    kind: NodeKind,
    children: Vec<MoveTree>,
}

impl MoveTree {
    /// Creates a new, empty tree: a single [`NodeKind::Root`] node.
    #[inline(always)]
    pub const fn new() -> Self {
        Self::leaf(NodeKind::Root)
    }

    /// Creates a node of the provided kind, without any children.
    #[inline(always)]
    pub const fn leaf(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Creates a node recording `mv`, made by `color`.
    #[inline(always)]
    pub const fn with_move(mv: Move, color: Color) -> Self {
        Self::leaf(NodeKind::Move { mv, color })
    }

    /// What this node records.
    #[inline(always)]
    pub const fn kind(&self) -> NodeKind {
        self.kind
    }

    /// The children of this node, in the order they were added.
    #[inline(always)]
    pub fn children(&self) -> &[MoveTree] {
        &self.children
    }

    /// Returns `true` if this node has no children.
    ///
    /// After [`MoveTree::prune`], an empty root means no forced mate was found.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this tree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }

    /// Appends `child` to this node, returning a mutable reference to it.
    ///
    /// # Panics
    /// If this node is a leaf kind, which can never have children.
    pub fn push(&mut self, child: MoveTree) -> &mut MoveTree {
        assert!(
            !self.kind.is_leaf(),
            "Cannot add {} to a {} node",
            child.kind,
            self.kind
        );

        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Removes and returns the most recently added child.
    #[inline(always)]
    pub fn pop(&mut self) -> Option<MoveTree> {
        self.children.pop()
    }

    /// Removes every line that is not part of a forced mate, returning `true` if this tree is one.
    ///
    /// Equivalent to `self.prune_at(0)`.
    #[inline(always)]
    pub fn prune(&mut self) -> bool {
        self.prune_at(0)
    }

    /// Prunes this node, assuming it sits at `depth` in its tree.
    ///
    /// Children are pruned first and detached if they are not forced mates. Then:
    /// * a node at even depth (whose children are attacker moves) is a forced mate if any child survived;
    /// * a node at odd depth (whose children are defender moves) is a forced mate only if every child survived.
    ///
    /// Leaves are decided by their kind alone.
    pub fn prune_at(&mut self, depth: usize) -> bool {
        match self.kind {
            NodeKind::Checkmate => true,
            NodeKind::CannotCheckmate | NodeKind::OverLimit => false,
            NodeKind::Root | NodeKind::Move { .. } => {
                let explored = self.children.len();
                self.children.retain_mut(|child| child.prune_at(depth + 1));

                if depth % 2 == 0 {
                    !self.children.is_empty()
                } else {
                    self.children.len() == explored && !self.children.is_empty()
                }
            }
        }
    }

    /// Every line from this node down to a [`NodeKind::Checkmate`] leaf, as the moves along the way.
    ///
    /// # Example
    /// ```
    /// # use tsume::{Color, Move, MoveTree, NodeKind, PieceKind, Square};
    /// let drop = Move::Drop { to: Square::new(1, 2), kind: PieceKind::Gold };
    /// let mut tree = MoveTree::new();
    /// tree.push(MoveTree::with_move(drop, Color::Black))
    ///     .push(MoveTree::leaf(NodeKind::Checkmate));
    /// assert_eq!(tree.lines(), vec![vec![(Color::Black, drop)]]);
    /// ```
    pub fn lines(&self) -> Vec<Vec<(Color, Move)>> {
        let mut lines = Vec::new();
        self.collect_lines(&mut Vec::new(), &mut lines);
        lines
    }

    fn collect_lines(&self, line: &mut Vec<(Color, Move)>, lines: &mut Vec<Vec<(Color, Move)>>) {
        match self.kind {
            NodeKind::Checkmate => lines.push(line.clone()),

            NodeKind::Move { mv, color } => {
                line.push((color, mv));
                for child in &self.children {
                    child.collect_lines(line, lines);
                }
                line.pop();
            }

            NodeKind::Root => {
                for child in &self.children {
                    child.collect_lines(line, lines);
                }
            }

            NodeKind::CannotCheckmate | NodeKind::OverLimit => {}
        }
    }

    /// Writes every child of this node at `depth`, indented two spaces per level.
    fn write_children(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for child in &self.children {
            let indent = depth * 2;
            match child.kind {
                NodeKind::Move { .. } => writeln!(f, "{:indent$}{}.{}", "", depth + 1, child.kind)?,
                _ => writeln!(f, "{:indent$}{}", "", child.kind)?,
            }

            child.write_children(f, depth + 1)?;
        }

        Ok(())
    }
}

impl Default for MoveTree {
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MoveTree {
    /// Displays every line below this node, one node per line.
    ///
    /// ```text
    /// 1.+0012KI
    ///   <Checkmate>
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_children(f, 0)
    }
}
