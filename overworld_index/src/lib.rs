// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=overworld_index --heading-base-level=0

//! Overworld Index: a tile and creature index for large tile-based game worlds.
//!
//! Overworld Index answers the two questions a world simulation asks many times per tick:
//!
//! - What tile is stored at a location? ([`WorldIndex::find_tile`])
//! - Which creatures inside a rectangle satisfy a predicate? ([`WorldIndex::find`], a *spectator query*)
//!
//! The index is a depth-limited quad-tree over a fixed `u16 × u16` coordinate space.
//! Each leaf covers a [`BLOCK`](layout::BLOCK)`×`[`BLOCK`](layout::BLOCK) square on every floor and stores
//! per-floor tile grids and per-kind creature sets. Leaves are linked to the leaf one
//! block south and one block east when they are created, so range queries hop between
//! neighbors instead of descending from the root for every block.
//!
//! Tiles and creatures are stored as small `Copy` handles (ids into storage owned
//! elsewhere). The index never owns or frees what they refer to.
//!
//! # Example
//!
//! ```rust
//! use overworld_index::{Creature, CreatureKind, Location, WorldIndex};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
//! struct Npc(u32);
//!
//! impl Creature for Npc {
//!     fn kind(&self) -> CreatureKind {
//!         CreatureKind::Npc
//!     }
//! }
//!
//! // World load: store tile ids.
//! let mut world: WorldIndex<u32, Npc> = WorldIndex::new();
//! world.create_tile(100, 100, 7, 1).unwrap();
//! world.create_tile(108, 100, 7, 2).unwrap();
//! assert_eq!(world.find_tile(100, 100, 7), Some(1));
//!
//! // Simulation: keep membership in sync with positions.
//! world.insert_creature(100, 100, 7, Npc(1));
//! world.insert_creature(108, 100, 7, Npc(2));
//! world.move_creature(Location::new(108, 100, 7), Location::new(300, 100, 7), Npc(2));
//!
//! // Spectators around (100, 100).
//! let seen = world.find(92, 92, 108, 108, |_| true);
//! assert_eq!(seen, [Npc(1)]);
//! ```
//!
//! Spectator queries can be restricted to creature kinds, which walks the per-kind
//! sets instead of testing every creature:
//!
//! ```rust
//! use overworld_index::{Area, Creature, CreatureKind, KindSet, WorldIndex};
//!
//! #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
//! enum Mob {
//!     Player(u32),
//!     Monster(u32),
//! }
//!
//! impl Creature for Mob {
//!     fn kind(&self) -> CreatureKind {
//!         match self {
//!             Mob::Player(_) => CreatureKind::Player,
//!             Mob::Monster(_) => CreatureKind::Monster,
//!         }
//!     }
//! }
//!
//! let mut world: WorldIndex<u32, Mob> = WorldIndex::new();
//! world.insert_creature(50, 50, 7, Mob::Player(1));
//! world.insert_creature(51, 50, 7, Mob::Monster(2));
//!
//! let players = world
//!     .spectators(Area::around(50, 50, 8, 6))
//!     .kinds(KindSet::PLAYERS)
//!     .collect(|_| true);
//! assert_eq!(players, [Mob::Player(1)]);
//! ```
//!
//! ## Granularity
//!
//! Spectator queries align the rectangle to whole leaves. Creatures in a covered
//! leaf but outside the requested rectangle are offered to the predicate too; the
//! caller clips exactly if it needs to.
//!
//! ## Access model
//!
//! All operations are synchronous and bounded. Mutations take `&mut self`; the
//! index does no locking of its own.

#![no_std]

extern crate alloc;

pub mod error;
pub mod index;
pub mod layout;
pub mod leaf;
pub mod spectators;
pub mod types;

mod tree;

pub use error::IndexError;
pub use index::{IndexStats, WorldIndex};
pub use leaf::{Leaf, LeafId};
pub use spectators::SpectatorQuery;
pub use types::{Area, Creature, CreatureKind, KindSet, Location};
