// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World load example: build an island map and inspect the index.
//!
//! Run:
//! - `RUST_LOG=overworld_index=trace cargo run -p overworld_demos --example world_load`

use overworld_index::{Creature, CreatureKind, WorldIndex};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct CreatureId(u32);

impl Creature for CreatureId {
    fn kind(&self) -> CreatureKind {
        CreatureKind::Monster
    }
}

/// Tile ids: ground on floor 7, a second storey on floor 6 over part of the island.
const GRASS: u32 = 1;
const ROOF: u32 = 2;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut world: WorldIndex<u32, CreatureId> = WorldIndex::new();

    // A round island of radius 40 around (32000, 32000).
    let (cx, cy, r) = (32000_i32, 32000_i32, 40_i32);
    for y in cy - r..=cy + r {
        for x in cx - r..=cx + r {
            if (x - cx).pow(2) + (y - cy).pow(2) > r * r {
                continue;
            }
            let (tx, ty) = (x as u16, y as u16);
            world.create_tile(tx, ty, 7, GRASS).expect("floor 7 is stored");
            if (x - cx).abs() < 6 && (y - cy).abs() < 4 {
                world.create_tile(tx, ty, 6, ROOF).expect("floor 6 is stored");
            }
        }
    }

    let stats = world.stats();
    tracing::info!(
        leaves = stats.leaves,
        branches = stats.branches,
        tiles = stats.tiles,
        "island loaded"
    );

    let probes = [
        (32000, 32000, 7),
        (32000, 32000, 6),
        (32039, 32000, 7),
        (32041, 32000, 7),
    ];
    for (x, y, z) in probes {
        println!("tile at ({x}, {y}, {z}): {:?}", world.find_tile(x, y, z));
    }

    world.insert_creature(32000, 32000, 7, CreatureId(1));
    let near = world.find(31990, 31990, 32010, 32010, |_| true);
    println!("creatures near the island center: {near:?}");

    let linked = world
        .leaves()
        .filter(|(_, leaf)| leaf.east().is_some() && leaf.south().is_some())
        .count();
    println!("{linked} of {} leaves link both east and south", stats.leaves);
}
