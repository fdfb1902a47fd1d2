// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spectator example: creatures wander a small map; each tick every player
//! looks for monsters on screen.
//!
//! Run:
//! - `RUST_LOG=overworld_index=debug cargo run -p overworld_demos --example spectators`

use overworld_index::{Area, Creature, CreatureKind, KindSet, Location, WorldIndex};
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Mob {
    Player(u32),
    Monster(u32),
}

impl Creature for Mob {
    fn kind(&self) -> CreatureKind {
        match self {
            Self::Player(_) => CreatureKind::Player,
            Self::Monster(_) => CreatureKind::Monster,
        }
    }
}

/// Half-extent of a client's view.
const VIEW_X: u16 = 9;
const VIEW_Y: u16 = 7;

const ORIGIN: u16 = 1000;
const SIDE: u16 = 96;

struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn step(&mut self, v: u16) -> u16 {
        let d = (self.next_u64() % 3) as u16;
        (v + d).saturating_sub(1).clamp(ORIGIN, ORIGIN + SIDE - 1)
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut world: WorldIndex<u32, Mob> = WorldIndex::new();
    for y in ORIGIN..ORIGIN + SIDE {
        for x in ORIGIN..ORIGIN + SIDE {
            world.create_tile(x, y, 7, 1).expect("floor 7 is stored");
        }
    }

    let mut rng = Rng(0x5EED_0F_C0FFEE);
    let mut mobs: Vec<(Mob, Location)> = Vec::new();
    for i in 0..8 {
        let at = Location::new(ORIGIN + 10 * i as u16, ORIGIN + 40, 7);
        mobs.push((Mob::Player(i), at));
    }
    for i in 0..200 {
        let x = ORIGIN + (rng.next_u64() % u64::from(SIDE)) as u16;
        let y = ORIGIN + (rng.next_u64() % u64::from(SIDE)) as u16;
        mobs.push((Mob::Monster(i), Location::new(x, y, 7)));
    }
    for &(mob, at) in &mobs {
        world.insert_creature(at.x, at.y, at.floor, mob);
    }

    for tick in 0..5 {
        for (mob, at) in &mut mobs {
            let to = Location::new(rng.step(at.x), rng.step(at.y), at.floor);
            world.move_creature(*at, to, *mob);
            *at = to;
        }

        for &(mob, at) in mobs.iter().filter(|(m, _)| m.kind() == CreatureKind::Player) {
            let view = Area::around(at.x, at.y, VIEW_X, VIEW_Y);
            // The index works per leaf; clip to the exact view here.
            let on_screen = world
                .spectators(view)
                .kinds(KindSet::MONSTERS)
                .collect(|m| {
                    mobs.iter()
                        .any(|(other, pos)| other == m && view.contains(pos.x, pos.y))
                });
            println!(
                "tick {tick}: {mob:?} at ({}, {}) sees {} monsters",
                at.x,
                at.y,
                on_screen.len()
            );
        }
    }

    tracing::info!(creatures = world.creature_count(), "simulation finished");
}
