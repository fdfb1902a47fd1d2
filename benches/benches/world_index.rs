// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use overworld_index::{Area, Creature, CreatureKind, KindSet, Location, WorldIndex};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Mob(u32);

impl Creature for Mob {
    fn kind(&self) -> CreatureKind {
        match self.0 % 8 {
            0 => CreatureKind::Player,
            1 => CreatureKind::Npc,
            _ => CreatureKind::Monster,
        }
    }
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn below(&mut self, n: u16) -> u16 {
        (self.next_u64() % u64::from(n)) as u16
    }
}

/// A square map of `side × side` tiles on one floor, starting at `origin`.
fn load_map(side: u16, origin: u16) -> WorldIndex<u32, Mob> {
    let mut world = WorldIndex::new();
    for y in origin..origin + side {
        for x in origin..origin + side {
            let _ = world.create_tile(x, y, 7, (u32::from(x) << 16) | u32::from(y));
        }
    }
    world
}

fn populate(
    world: &mut WorldIndex<u32, Mob>,
    count: u32,
    side: u16,
    origin: u16,
) -> Vec<Location> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let mut out = Vec::with_capacity(count as usize);
    for i in 0..count {
        let at = Location::new(origin + rng.below(side), origin + rng.below(side), 7);
        world.insert_creature(at.x, at.y, at.floor, Mob(i));
        out.push(at);
    }
    out
}

fn bench_world_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("world_load");
    for &side in &[64_u16, 256, 512] {
        group.throughput(Throughput::Elements(u64::from(side) * u64::from(side)));
        group.bench_function(format!("create_tile_side{}", side), |b| {
            b.iter(|| black_box(load_map(side, 1000)));
        });
    }
    group.finish();
}

fn bench_find_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_tile");
    let world = load_map(256, 1000);
    group.throughput(Throughput::Elements(256 * 256));
    group.bench_function("hit_all", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for y in 1000..1256 {
                for x in 1000..1256 {
                    hits += usize::from(world.find_tile(x, y, 7).is_some());
                }
            }
            black_box(hits);
        });
    });
    group.bench_function("miss_unmapped", |b| {
        b.iter(|| {
            let mut hits = 0_usize;
            for y in 30000..30256 {
                for x in 30000..30256 {
                    hits += usize::from(world.find_tile(x, y, 7).is_some());
                }
            }
            black_box(hits);
        });
    });
    group.finish();
}

fn bench_spectators(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectators");
    let mut world = load_map(512, 1000);
    let _ = populate(&mut world, 20_000, 512, 1000);
    // Screen-sized ranges around a player, then a wide area effect.
    for &(rx, ry) in &[(9_u16, 7_u16), (18, 14), (64, 64)] {
        group.bench_function(format!("find_range_{}x{}", rx, ry), |b| {
            b.iter(|| {
                let mut total = 0_usize;
                for q in 0..256_u16 {
                    let cx = 1100 + (q % 16) * 20;
                    let cy = 1100 + (q / 16) * 20;
                    total += world
                        .find(cx - rx, cy - ry, cx + rx, cy + ry, |m| m.0 % 2 == 0)
                        .len();
                }
                black_box(total);
            });
        });
    }
    group.bench_function("players_only_9x7", |b| {
        b.iter(|| {
            let mut total = 0_usize;
            for q in 0..256_u16 {
                let cx = 1100 + (q % 16) * 20;
                let cy = 1100 + (q / 16) * 20;
                world
                    .spectators(Area::around(cx, cy, 9, 7))
                    .kinds(KindSet::PLAYERS)
                    .for_each(|_| total += 1);
            }
            black_box(total);
        });
    });
    group.finish();
}

fn bench_creature_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("creature_churn");
    group.bench_function("step_all_one_tile_east", |b| {
        b.iter_batched(
            || {
                let mut world = load_map(256, 1000);
                let at = populate(&mut world, 4096, 256, 1000);
                (world, at)
            },
            |(mut world, at)| {
                for (i, from) in at.into_iter().enumerate() {
                    let to = Location::new(from.x + 1, from.y, from.floor);
                    world.move_creature(from, to, Mob(i as u32));
                }
                black_box(world.creature_count());
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_world_load,
    bench_find_tile,
    bench_spectators,
    bench_creature_churn,
);
criterion_main!(benches);
