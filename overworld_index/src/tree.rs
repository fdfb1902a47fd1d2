// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root table, branch arena, and leaf linking.

use alloc::vec::Vec;
use core::fmt;

use crate::layout::{self, BLOCK, TREE_DEPTH, block_origin};
use crate::leaf::{Leaf, LeafId};
use crate::types::Creature;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
struct BranchIdx(u32);

impl BranchIdx {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "branch count is bounded by the leaf count"
    )]
    const fn new(i: usize) -> Self {
        Self(i as u32)
    }

    const fn get(self) -> usize {
        self.0 as usize
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Child {
    Branch(BranchIdx),
    Leaf(LeafId),
}

type Slots = [Option<Child>; 4];

/// Quad-tree over the coordinate space.
///
/// Branches and leaves live in arenas and are addressed by index; a node is
/// owned by the single slot that refers to it. Nothing is ever freed.
pub(crate) struct Tree<T, C> {
    roots: Slots,
    branches: Vec<Slots>,
    leaves: Vec<Leaf<T, C>>,
}

impl<T, C> fmt::Debug for Tree<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("roots", &self.roots.iter().filter(|r| r.is_some()).count())
            .field("branches", &self.branches.len())
            .field("leaves", &self.leaves.len())
            .finish()
    }
}

impl<T: Copy, C: Creature> Tree<T, C> {
    pub(crate) fn new() -> Self {
        Self {
            roots: [None; 4],
            branches: Vec::new(),
            leaves: Vec::new(),
        }
    }

    pub(crate) fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub(crate) fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub(crate) fn leaf(&self, id: LeafId) -> &Leaf<T, C> {
        &self.leaves[id.idx()]
    }

    pub(crate) fn leaf_mut(&mut self, id: LeafId) -> &mut Leaf<T, C> {
        &mut self.leaves[id.idx()]
    }

    pub(crate) fn leaves(&self) -> impl Iterator<Item = (LeafId, &Leaf<T, C>)> + '_ {
        self.leaves.iter().enumerate().map(|(i, l)| (LeafId::new(i), l))
    }

    /// Descend from the root to the leaf covering `(x, y)`. Never allocates.
    pub(crate) fn lookup(&self, x: u16, y: u16) -> Option<LeafId> {
        let mut slots = &self.roots;
        let mut found = None;
        for sel in layout::path(x, y) {
            match slots[sel]? {
                Child::Branch(b) => slots = &self.branches[b.get()],
                Child::Leaf(id) => found = Some(id),
            }
        }
        found
    }

    /// Like [`lookup`](Self::lookup) for coordinates that may lie past the edge of the space.
    pub(crate) fn lookup_wide(&self, x: u32, y: u32) -> Option<LeafId> {
        let x = u16::try_from(x).ok()?;
        let y = u16::try_from(y).ok()?;
        self.lookup(x, y)
    }

    /// Walk the path to `(x, y)`, allocating missing branches and the leaf.
    ///
    /// Returns the existing leaf if the path is already materialized.
    pub(crate) fn create_along(&mut self, x: u16, y: u16) -> LeafId {
        let mut parent: Option<BranchIdx> = None;
        for (level, sel) in (1..=TREE_DEPTH).zip(layout::path(x, y)) {
            let next_branch = BranchIdx::new(self.branches.len());
            let slot = match parent {
                None => &mut self.roots[sel],
                Some(b) => &mut self.branches[b.get()][sel],
            };
            let current = *slot;
            match current {
                Some(Child::Branch(b)) => parent = Some(b),
                Some(Child::Leaf(id)) => return id,
                None if level == TREE_DEPTH => {
                    let id = LeafId::new(self.leaves.len());
                    *slot = Some(Child::Leaf(id));
                    self.leaves.push(Leaf::new(block_origin(x), block_origin(y)));
                    self.link(id);
                    return id;
                }
                None => {
                    *slot = Some(Child::Branch(next_branch));
                    self.branches.push([None; 4]);
                    parent = Some(next_branch);
                }
            }
        }
        unreachable!("a path of TREE_DEPTH selectors always ends in a leaf slot")
    }

    /// Wire neighbor links between a new leaf and whichever of its four
    /// neighbors already exist.
    fn link(&mut self, id: LeafId) {
        let (ox, oy) = self.leaf(id).origin();
        let north = oy.checked_sub(BLOCK).and_then(|y| self.lookup(ox, y));
        let west = ox.checked_sub(BLOCK).and_then(|x| self.lookup(x, oy));
        let south = oy.checked_add(BLOCK).and_then(|y| self.lookup(ox, y));
        let east = ox.checked_add(BLOCK).and_then(|x| self.lookup(x, oy));

        if let Some(n) = north {
            self.leaf_mut(n).south = Some(id);
        }
        if let Some(w) = west {
            self.leaf_mut(w).east = Some(id);
        }
        let leaf = self.leaf_mut(id);
        leaf.south = south;
        leaf.east = east;

        tracing::trace!(
            leaf = id.0,
            x = ox,
            y = oy,
            north = north.is_some(),
            west = west.is_some(),
            south = south.is_some(),
            east = east.is_some(),
            "created leaf"
        );
    }
}
