// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spectator queries: creatures inside a rectangle that satisfy a predicate.
//!
//! The query rectangle is aligned to whole leaves, then swept row by row from
//! the north-west leaf. Within a row the sweep follows `east` links; each row
//! starts from the previous row's first leaf via its `south` link. A missing
//! link means the neighboring block has no leaf, so the sweep skips that block
//! and descends from the root for the next one.
//!
//! No clipping is done below leaf granularity: creatures in the covered leaves
//! but outside the requested rectangle are offered to the predicate as well.

use alloc::vec::Vec;

use crate::index::WorldIndex;
use crate::layout::BLOCK;
use crate::leaf::{Leaf, LeafId};
use crate::tree::Tree;
use crate::types::{Area, Creature, KindSet};

/// A rectangular spectator query over a [`WorldIndex`].
///
/// Created by [`WorldIndex::spectators`]. Results are ordered row-major by leaf,
/// north to south and west to east.
#[derive(Debug)]
pub struct SpectatorQuery<'a, T, C> {
    index: &'a WorldIndex<T, C>,
    area: Area,
    kinds: KindSet,
}

impl<'a, T: Copy, C: Creature> SpectatorQuery<'a, T, C> {
    pub(crate) fn new(index: &'a WorldIndex<T, C>, area: Area) -> Self {
        Self {
            index,
            area,
            kinds: KindSet::all(),
        }
    }

    /// Only visit creatures of the given kinds.
    ///
    /// This walks the per-kind subsets, so creatures of other kinds are never
    /// offered to the predicate.
    #[must_use]
    pub fn kinds(mut self, kinds: KindSet) -> Self {
        self.kinds = kinds;
        self
    }

    /// The requested (unaligned) area.
    pub fn area(&self) -> Area {
        self.area
    }

    /// Visit every existing leaf covered by the aligned area, in sweep order.
    pub fn for_each_leaf(&self, f: impl FnMut(LeafId, &'a Leaf<T, C>)) {
        sweep(&self.index.tree, self.area, f);
    }

    /// Ids of the leaves visited, in sweep order.
    pub fn leaves(&self) -> Vec<LeafId> {
        let mut out = Vec::new();
        self.for_each_leaf(|id, _| out.push(id));
        out
    }

    /// Call `f` for every creature of the selected kinds in the covered leaves.
    pub fn for_each(&self, mut f: impl FnMut(C)) {
        let kinds = self.kinds;
        self.for_each_leaf(|_, leaf| {
            for &c in leaf.members(kinds) {
                f(c);
            }
        });
    }

    /// Collect every creature in the covered leaves for which `predicate` holds.
    pub fn collect(&self, mut predicate: impl FnMut(&C) -> bool) -> Vec<C> {
        let mut out = Vec::new();
        self.for_each(|c| {
            if predicate(&c) {
                out.push(c);
            }
        });
        out
    }
}

fn sweep<'a, T: Copy, C: Creature>(
    tree: &'a Tree<T, C>,
    area: Area,
    mut visit: impl FnMut(LeafId, &'a Leaf<T, C>),
) {
    if area.is_empty() {
        return;
    }
    let a = area.aligned();
    // Widened so that stepping past the last block of the space terminates.
    let step = u32::from(BLOCK);
    let (start_x, start_y) = (u32::from(a.start_x), u32::from(a.start_y));
    let (end_x, end_y) = (u32::from(a.end_x), u32::from(a.end_y));

    let mut row_start = tree.lookup(a.start_x, a.start_y);
    let mut ny = start_y;
    while ny <= end_y {
        let mut current = row_start;
        let mut nx = start_x;
        while nx <= end_x {
            let next_x = nx + step;
            current = match current {
                Some(id) => {
                    let leaf = tree.leaf(id);
                    visit(id, leaf);
                    leaf.east
                }
                None if next_x <= end_x => tree.lookup_wide(next_x, ny),
                None => None,
            };
            nx = next_x;
        }

        let next_y = ny + step;
        row_start = match row_start {
            Some(id) => tree.leaf(id).south,
            None if next_y <= end_y => tree.lookup_wide(start_x, next_y),
            None => None,
        };
        ny = next_y;
    }
}

#[cfg(test)]
mod tests {
    use crate::layout::BLOCK;
    use crate::types::{Area, Creature, CreatureKind, KindSet, Location};
    use crate::WorldIndex;
    use alloc::vec;
    use alloc::vec::Vec;

    #[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    enum Mob {
        Player(u32),
        Monster(u32),
        Npc(u32),
    }

    impl Creature for Mob {
        fn kind(&self) -> CreatureKind {
            match self {
                Self::Player(_) => CreatureKind::Player,
                Self::Monster(_) => CreatureKind::Monster,
                Self::Npc(_) => CreatureKind::Npc,
            }
        }
    }

    fn world() -> WorldIndex<u32, Mob> {
        WorldIndex::new()
    }

    #[test]
    fn two_adjacent_leaves() {
        let mut w = world();
        w.create_tile(100, 100, 7, 1).unwrap();
        w.create_tile(100 + BLOCK, 100, 7, 2).unwrap();
        let c1 = Mob::Player(1);
        let c2 = Mob::Monster(2);
        w.insert_creature(100, 100, 7, c1);
        w.insert_creature(100 + BLOCK, 100, 7, c2);

        let found = w.find(100, 100, 100 + BLOCK, 100, |_| true);
        assert_eq!(found, vec![c1, c2]);
    }

    #[test]
    fn order_is_row_major() {
        let mut w = world();
        // Insert out of order so that creation order differs from sweep order.
        let spots = [(2_u16, 1_u16), (0, 0), (1, 1), (2, 0), (0, 1), (1, 0)];
        for &(bx, by) in &spots {
            let x = bx * BLOCK;
            let y = by * BLOCK;
            w.insert_creature(x, y, 7, Mob::Npc(u32::from(by * 10 + bx)));
        }
        let found = w.find(0, 0, 3 * BLOCK - 1, 2 * BLOCK - 1, |_| true);
        assert_eq!(
            found,
            vec![
                Mob::Npc(0),
                Mob::Npc(1),
                Mob::Npc(2),
                Mob::Npc(10),
                Mob::Npc(11),
                Mob::Npc(12),
            ]
        );
    }

    #[test]
    fn gaps_fall_back_to_descent() {
        let mut w = world();
        // Checkerboard: no two leaves are adjacent, so every hop is a descent.
        let mut expected = Vec::new();
        for by in 0..4_u16 {
            for bx in 0..4_u16 {
                if (bx + by) % 2 == 0 {
                    let c = Mob::Monster(u32::from(by * 4 + bx));
                    w.insert_creature(bx * BLOCK + 3, by * BLOCK + 3, 0, c);
                    expected.push(c);
                }
            }
        }
        for (_, leaf) in w.leaves() {
            assert_eq!(leaf.east(), None);
            assert_eq!(leaf.south(), None);
        }
        let q = w.spectators(Area::new(0, 0, 4 * BLOCK - 1, 4 * BLOCK - 1));
        assert_eq!(q.leaves().len(), 8);
        assert_eq!(q.collect(|_| true), expected);
    }

    #[test]
    fn missing_first_row_and_column() {
        let mut w = world();
        let c = Mob::Player(7);
        w.insert_creature(2 * BLOCK, 2 * BLOCK, 7, c);
        assert_eq!(w.find(0, 0, 3 * BLOCK, 3 * BLOCK, |_| true), vec![c]);
        assert!(w.find(0, 0, 2 * BLOCK - 1, 3 * BLOCK, |_| true).is_empty());
    }

    #[test]
    fn alignment_widens_to_whole_leaves() {
        let mut w = world();
        let c = Mob::Npc(1);
        w.insert_creature(103, 103, 7, c);
        // The requested rectangle stops at 101 but the leaf reaches 103.
        assert_eq!(w.find(96, 96, 101, 101, |_| true), vec![c]);
        // Exact clipping is left to the predicate.
        let exact = Area::new(96, 96, 101, 101);
        let positions = [(c, Location::new(103, 103, 7))];
        let clipped = w.find(96, 96, 101, 101, |c| {
            positions
                .iter()
                .any(|(p, at)| p == c && exact.contains(at.x, at.y))
        });
        assert!(clipped.is_empty());
    }

    #[test]
    fn kinds_select_subsets() {
        let mut w = world();
        let p = Mob::Player(1);
        let m = Mob::Monster(2);
        let n = Mob::Npc(3);
        for c in [p, m, n] {
            w.insert_creature(50, 50, 7, c);
        }
        let area = Area::around(50, 50, 8, 6);
        let players = w.spectators(area).kinds(KindSet::PLAYERS).collect(|_| true);
        assert_eq!(players, vec![p]);

        let mut offered = 0;
        let _ = w
            .spectators(area)
            .kinds(KindSet::MONSTERS | KindSet::NPCS)
            .collect(|c| {
                offered += 1;
                *c != p
            });
        assert_eq!(offered, 2);
    }

    #[test]
    fn edge_of_space_terminates() {
        let mut w = world();
        let c = Mob::Monster(9);
        w.insert_creature(u16::MAX, u16::MAX, 0, c);
        w.insert_creature(u16::MAX - BLOCK, u16::MAX, 0, Mob::Monster(8));
        let found = w.find(u16::MAX - 20, u16::MAX - 20, u16::MAX, u16::MAX, |_| true);
        assert_eq!(found, vec![Mob::Monster(8), c]);
    }

    #[test]
    fn empty_and_inverted_areas() {
        let mut w = world();
        w.insert_creature(10, 10, 7, Mob::Npc(1));
        assert!(w.find(20, 20, 10, 10, |_| true).is_empty());
        assert!(world().find(0, 0, 1000, 1000, |_| true).is_empty());
    }

    #[test]
    fn visits_each_leaf_once() {
        let mut w = world();
        for x in (0..64_u16).step_by(3) {
            for y in (0..64_u16).step_by(5) {
                w.create_tile(x, y, 7, (u32::from(x) << 16) | u32::from(y))
                    .unwrap();
            }
        }
        let area = Area::new(0, 0, 63, 63);
        let mut ids = w.spectators(area).leaves();
        assert_eq!(ids.len(), area.block_count());
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), area.block_count());
    }
}
