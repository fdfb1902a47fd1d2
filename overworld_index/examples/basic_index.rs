// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Overworld Index: store tiles, track creatures, and run a spectator query.

use overworld_index::{Creature, CreatureKind, Location, WorldIndex};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Monster(u32);

impl Creature for Monster {
    fn kind(&self) -> CreatureKind {
        CreatureKind::Monster
    }
}

fn main() {
    let mut world: WorldIndex<u32, Monster> = WorldIndex::new();
    for x in 96..120 {
        for y in 96..104 {
            world
                .create_tile(x, y, 7, u32::from(x) * 1000 + u32::from(y))
                .expect("floor 7 is in range");
        }
    }
    println!("stats after load: {:?}", world.stats());

    world.insert_creature(100, 100, 7, Monster(1));
    world.insert_creature(110, 100, 7, Monster(2));

    // Monster 2 walks east into the next block.
    world.move_creature(Location::new(110, 100, 7), Location::new(117, 100, 7), Monster(2));

    let seen = world.find(96, 96, 111, 103, |_| true);
    println!("spectators of (96..=111, 96..=103): {:?}", seen);
    println!("tile at (100, 100, 7): {:?}", world.find_tile(100, 100, 7));
}
