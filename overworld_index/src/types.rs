// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: locations, query areas, and creature kinds.

use crate::layout::{BLOCK, block_origin};

/// A map location: absolute x/y and a floor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Location {
    /// Absolute x (grows east).
    pub x: u16,
    /// Absolute y (grows south).
    pub y: u16,
    /// Vertical floor.
    pub floor: u8,
}

impl Location {
    /// Create a location.
    pub const fn new(x: u16, y: u16, floor: u8) -> Self {
        Self { x, y, floor }
    }

    /// Whether two locations fall inside the same leaf block.
    ///
    /// Floors are ignored: a leaf covers its block on every floor.
    pub const fn same_block(&self, other: &Self) -> bool {
        block_origin(self.x) == block_origin(other.x)
            && block_origin(self.y) == block_origin(other.y)
    }
}

/// Inclusive rectangle of locations used by spectator queries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Area {
    /// Minimum x (west edge, inclusive).
    pub start_x: u16,
    /// Minimum y (north edge, inclusive).
    pub start_y: u16,
    /// Maximum x (east edge, inclusive).
    pub end_x: u16,
    /// Maximum y (south edge, inclusive).
    pub end_y: u16,
}

impl Area {
    /// Create an area from its inclusive corners.
    pub const fn new(start_x: u16, start_y: u16, end_x: u16, end_y: u16) -> Self {
        Self {
            start_x,
            start_y,
            end_x,
            end_y,
        }
    }

    /// The area within `range_x`/`range_y` of a center, saturating at the edges of the space.
    pub const fn around(center_x: u16, center_y: u16, range_x: u16, range_y: u16) -> Self {
        Self {
            start_x: center_x.saturating_sub(range_x),
            start_y: center_y.saturating_sub(range_y),
            end_x: center_x.saturating_add(range_x),
            end_y: center_y.saturating_add(range_y),
        }
    }

    /// This area with every edge floored to a multiple of [`BLOCK`].
    ///
    /// The result covers whole leaves; it may include locations east and south
    /// of the original edges, and drops nothing the original covered.
    pub const fn aligned(&self) -> Self {
        Self {
            start_x: block_origin(self.start_x),
            start_y: block_origin(self.start_y),
            end_x: block_origin(self.end_x),
            end_y: block_origin(self.end_y),
        }
    }

    /// True if the area is inverted (no locations).
    pub const fn is_empty(&self) -> bool {
        self.end_x < self.start_x || self.end_y < self.start_y
    }

    /// Whether the location's x/y lies inside the area.
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        self.start_x <= x && x <= self.end_x && self.start_y <= y && y <= self.end_y
    }

    /// Number of leaf blocks covered after alignment.
    pub const fn block_count(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let a = self.aligned();
        let cols = ((a.end_x - a.start_x) / BLOCK) as usize + 1;
        let rows = ((a.end_y - a.start_y) / BLOCK) as usize + 1;
        cols * rows
    }
}

/// The kind of a creature, used to maintain per-kind membership subsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CreatureKind {
    /// A player-controlled character.
    Player,
    /// A hostile or neutral monster.
    Monster,
    /// A scripted non-player character.
    Npc,
}

impl CreatureKind {
    /// The single-kind [`KindSet`] for this kind.
    pub const fn as_set(self) -> KindSet {
        match self {
            Self::Player => KindSet::PLAYERS,
            Self::Monster => KindSet::MONSTERS,
            Self::Npc => KindSet::NPCS,
        }
    }
}

bitflags::bitflags! {
    /// A set of creature kinds, used to restrict spectator queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct KindSet: u8 {
        /// Players.
        const PLAYERS  = 0b0000_0001;
        /// Monsters.
        const MONSTERS = 0b0000_0010;
        /// Non-player characters.
        const NPCS     = 0b0000_0100;
    }
}

impl Default for KindSet {
    fn default() -> Self {
        Self::all()
    }
}

/// A non-owning creature handle stored by the index.
///
/// The index asks for the kind once per insertion, so it must not change while
/// the creature is a member.
pub trait Creature: Copy + Ord {
    /// The kind of this creature.
    fn kind(&self) -> CreatureKind;
}
