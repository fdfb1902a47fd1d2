// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `WorldIndex` API: tile storage, creature membership, and spectator queries.

use alloc::vec::Vec;
use core::fmt;

use crate::error::IndexError;
use crate::layout::FLOORS;
use crate::leaf::{Leaf, LeafId};
use crate::spectators::SpectatorQuery;
use crate::tree::Tree;
use crate::types::{Area, Creature, Location};

/// Spatial index over one world.
///
/// `T` is a non-owning tile handle and `C` a non-owning creature handle. The
/// index never drops or invalidates either; owners must remove a handle from
/// the index before destroying what it refers to.
///
/// Every mutating operation takes `&mut self`, so access is single-writer by
/// construction.
pub struct WorldIndex<T, C> {
    pub(crate) tree: Tree<T, C>,
    members: usize,
}

/// Allocation and occupancy counters, see [`WorldIndex::stats`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexStats {
    /// Branch nodes allocated.
    pub branches: usize,
    /// Leaves allocated.
    pub leaves: usize,
    /// Non-empty tile slots.
    pub tiles: usize,
    /// Creature memberships.
    pub creatures: usize,
}

impl<T, C> fmt::Debug for WorldIndex<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorldIndex")
            .field("tree", &self.tree)
            .field("members", &self.members)
            .finish()
    }
}

impl<T: Copy, C: Creature> Default for WorldIndex<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy, C: Creature> WorldIndex<T, C> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            tree: Tree::new(),
            members: 0,
        }
    }

    /// Tile stored at a location, if any.
    ///
    /// Never allocates; returns `None` as soon as the path is missing.
    pub fn find_tile(&self, x: u16, y: u16, floor: u8) -> Option<T> {
        let id = self.tree.lookup(x, y)?;
        self.tree.leaf(id).tile(x, y, floor)
    }

    /// Store a tile at a location, creating the branch/leaf path as needed.
    ///
    /// Overwrites any previous tile at the same location. Returns the leaf that
    /// holds the location.
    pub fn create_tile(
        &mut self,
        x: u16,
        y: u16,
        floor: u8,
        tile: T,
    ) -> Result<LeafId, IndexError> {
        if usize::from(floor) >= FLOORS {
            return Err(IndexError::FloorOutOfRange { floor });
        }
        let id = self.tree.create_along(x, y);
        let _ = self.tree.leaf_mut(id).set_tile(x, y, floor, tile);
        Ok(id)
    }

    /// Clear a tile slot and return what it held.
    ///
    /// The leaf and its path stay allocated.
    pub fn remove_tile(&mut self, x: u16, y: u16, floor: u8) -> Option<T> {
        let id = self.tree.lookup(x, y)?;
        self.tree.leaf_mut(id).take_tile(x, y, floor)
    }

    /// Add a creature to the leaf covering `(x, y)`.
    ///
    /// Membership is per block, on every floor; `floor` does not select a set.
    /// The leaf is created if the region has none yet. Returns `false` if the
    /// creature was already a member of that leaf.
    pub fn insert_creature(&mut self, x: u16, y: u16, floor: u8, creature: C) -> bool {
        let id = self.tree.create_along(x, y);
        let inserted = self.tree.leaf_mut(id).insert_creature(creature);
        if inserted {
            self.members += 1;
        } else {
            tracing::debug!(x, y, floor, "creature already present in leaf");
        }
        inserted
    }

    /// Remove a creature from the leaf covering `(x, y)`.
    ///
    /// A missing leaf or membership is a no-op and returns `false`.
    pub fn remove_creature(&mut self, x: u16, y: u16, floor: u8, creature: C) -> bool {
        let Some(id) = self.tree.lookup(x, y) else {
            return false;
        };
        let removed = self.tree.leaf_mut(id).erase_creature(creature);
        if removed {
            self.members -= 1;
        } else {
            tracing::debug!(x, y, floor, "removing creature that is not a member");
        }
        removed
    }

    /// Update membership after a creature moved from `from` to `to`.
    ///
    /// Moves within one block (on any floor) leave membership untouched.
    pub fn move_creature(&mut self, from: Location, to: Location, creature: C) {
        let old = self.tree.lookup(from.x, from.y);
        let new = self.tree.create_along(to.x, to.y);
        if old == Some(new) {
            return;
        }
        let erased = old.is_some_and(|o| self.tree.leaf_mut(o).erase_creature(creature));
        debug_assert!(erased, "moved creature was not a member at {from:?}");
        if erased {
            self.members -= 1;
        } else {
            tracing::debug!(?from, ?to, "moved creature was not a member of its old leaf");
        }
        if self.tree.leaf_mut(new).insert_creature(creature) {
            self.members += 1;
        }
        tracing::trace!(?from, ?to, "creature changed leaf");
    }

    /// Creatures in the covered leaves of an inclusive rectangle for which `predicate` holds.
    ///
    /// The rectangle is aligned to whole leaves; see [`SpectatorQuery`].
    pub fn find(
        &self,
        start_x: u16,
        start_y: u16,
        end_x: u16,
        end_y: u16,
        predicate: impl FnMut(&C) -> bool,
    ) -> Vec<C> {
        self.spectators(Area::new(start_x, start_y, end_x, end_y))
            .collect(predicate)
    }

    /// Start a spectator query over `area`.
    pub fn spectators(&self, area: Area) -> SpectatorQuery<'_, T, C> {
        SpectatorQuery::new(self, area)
    }

    /// The leaf covering `(x, y)`, if it exists.
    pub fn leaf_at(&self, x: u16, y: u16) -> Option<LeafId> {
        self.tree.lookup(x, y)
    }

    /// Access a leaf by id.
    ///
    /// Returns `None` for ids that do not belong to this index.
    pub fn leaf(&self, id: LeafId) -> Option<&Leaf<T, C>> {
        (id.idx() < self.tree.leaf_count()).then(|| self.tree.leaf(id))
    }

    /// All leaves, in creation order.
    pub fn leaves(&self) -> impl Iterator<Item = (LeafId, &Leaf<T, C>)> + '_ {
        self.tree.leaves()
    }

    /// Number of creature memberships across all leaves.
    pub fn creature_count(&self) -> usize {
        self.members
    }

    /// Allocation and occupancy counters.
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            branches: self.tree.branch_count(),
            leaves: self.tree.leaf_count(),
            tiles: self.tree.leaves().map(|(_, l)| l.tile_count()).sum(),
            creatures: self.members,
        }
    }
}
