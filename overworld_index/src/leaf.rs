// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Leaf nodes: per-floor tile grids, creature membership, and neighbor links.

use alloc::boxed::Box;
use alloc::collections::BTreeSet;
use core::array;
use core::fmt;

use crate::layout::{BLOCK, CELLS_PER_FLOOR, FLOORS, local};
use crate::types::{Creature, CreatureKind, KindSet};

/// Stable identifier of a leaf inside one [`WorldIndex`](crate::WorldIndex).
///
/// Leaves are never destroyed, so an id stays valid for the life of its index.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafId(pub(crate) u32);

impl LeafId {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "at most 2^26 leaves exist for a 16-bit space with 8x8 blocks"
    )]
    pub(crate) const fn new(idx: usize) -> Self {
        Self(idx as u32)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

type FloorGrid<T> = Box<[Option<T>; CELLS_PER_FLOOR]>;

/// A terminal node covering one `BLOCK × BLOCK` square on every floor.
pub struct Leaf<T, C> {
    origin: (u16, u16),
    floors: [Option<FloorGrid<T>>; FLOORS],
    creatures: BTreeSet<C>,
    players: BTreeSet<C>,
    monsters: BTreeSet<C>,
    npcs: BTreeSet<C>,
    pub(crate) south: Option<LeafId>,
    pub(crate) east: Option<LeafId>,
}

impl<T, C> fmt::Debug for Leaf<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let floors = self.floors.iter().filter(|g| g.is_some()).count();
        f.debug_struct("Leaf")
            .field("origin", &self.origin)
            .field("floors_allocated", &floors)
            .field("creatures", &self.creatures.len())
            .field("south", &self.south)
            .field("east", &self.east)
            .finish_non_exhaustive()
    }
}

impl<T: Copy, C: Creature> Leaf<T, C> {
    pub(crate) fn new(origin_x: u16, origin_y: u16) -> Self {
        Self {
            origin: (origin_x, origin_y),
            floors: array::from_fn(|_| None),
            creatures: BTreeSet::new(),
            players: BTreeSet::new(),
            monsters: BTreeSet::new(),
            npcs: BTreeSet::new(),
            south: None,
            east: None,
        }
    }

    /// The absolute coordinate of this leaf's north-west corner.
    pub fn origin(&self) -> (u16, u16) {
        self.origin
    }

    /// The leaf one block south, if it is linked.
    pub fn south(&self) -> Option<LeafId> {
        self.south
    }

    /// The leaf one block east, if it is linked.
    pub fn east(&self) -> Option<LeafId> {
        self.east
    }

    /// Tile stored at an absolute x/y on `floor`.
    ///
    /// Only the in-block bits of `x` and `y` are used.
    pub fn tile(&self, x: u16, y: u16, floor: u8) -> Option<T> {
        let grid = self.floors.get(usize::from(floor))?.as_ref()?;
        grid[cell(x, y)]
    }

    /// Store a tile, returning the previous one.
    ///
    /// The floor grid is allocated on first write.
    ///
    /// `floor` must be below [`FLOORS`].
    pub(crate) fn set_tile(&mut self, x: u16, y: u16, floor: u8, tile: T) -> Option<T> {
        let grid = self.floors[usize::from(floor)]
            .get_or_insert_with(|| Box::new([None; CELLS_PER_FLOOR]));
        grid[cell(x, y)].replace(tile)
    }

    pub(crate) fn take_tile(&mut self, x: u16, y: u16, floor: u8) -> Option<T> {
        let grid = self.floors.get_mut(usize::from(floor))?.as_mut()?;
        grid[cell(x, y)].take()
    }

    /// Number of non-empty tile slots across all floors.
    pub fn tile_count(&self) -> usize {
        self.floors
            .iter()
            .flatten()
            .map(|g| g.iter().filter(|t| t.is_some()).count())
            .sum()
    }

    /// Every creature anywhere in this block, on any floor.
    pub fn creatures(&self) -> &BTreeSet<C> {
        &self.creatures
    }

    /// Player members.
    pub fn players(&self) -> &BTreeSet<C> {
        &self.players
    }

    /// Monster members.
    pub fn monsters(&self) -> &BTreeSet<C> {
        &self.monsters
    }

    /// Non-player character members.
    pub fn npcs(&self) -> &BTreeSet<C> {
        &self.npcs
    }

    /// Iterate members of the given kinds.
    ///
    /// With every kind selected this walks `creatures` directly.
    pub fn members(&self, kinds: KindSet) -> impl Iterator<Item = &C> + '_ {
        let (all, p, m, n) = if kinds.is_all() {
            (Some(&self.creatures), None, None, None)
        } else {
            (
                None,
                kinds.contains(KindSet::PLAYERS).then_some(&self.players),
                kinds.contains(KindSet::MONSTERS).then_some(&self.monsters),
                kinds.contains(KindSet::NPCS).then_some(&self.npcs),
            )
        };
        [all, p, m, n].into_iter().flatten().flatten()
    }

    /// Add a creature to `creatures` and its kind subset.
    pub(crate) fn insert_creature(&mut self, creature: C) -> bool {
        if !self.creatures.insert(creature) {
            return false;
        }
        self.subset_mut(creature.kind()).insert(creature);
        true
    }

    /// Remove a creature from `creatures` and its kind subset.
    pub(crate) fn erase_creature(&mut self, creature: C) -> bool {
        if !self.creatures.remove(&creature) {
            return false;
        }
        let removed = self.subset_mut(creature.kind()).remove(&creature);
        debug_assert!(removed, "kind subset out of sync with creature set");
        true
    }

    fn subset_mut(&mut self, kind: CreatureKind) -> &mut BTreeSet<C> {
        match kind {
            CreatureKind::Player => &mut self.players,
            CreatureKind::Monster => &mut self.monsters,
            CreatureKind::Npc => &mut self.npcs,
        }
    }
}

#[inline]
fn cell(x: u16, y: u16) -> usize {
    local(x) * usize::from(BLOCK) + local(y)
}
