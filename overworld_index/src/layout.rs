// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout constants and the coordinate codec.
//!
//! The coordinate space is `2^COORD_BITS` locations on each axis. The top
//! [`TREE_DEPTH`] bits of each coordinate select a path through the tree, two bits
//! (one of x, one of y) per level. The remaining [`BLOCK_BITS`] low bits address a
//! cell inside the `BLOCK × BLOCK` grid of a leaf.
//!
//! ```text
//!  x: 1 0 1 1 0 0 1 0 1 0 0 1 1 | 0 1 1
//!     \_____ TREE_DEPTH _______/  \_ local
//! ```

use core::iter::FusedIterator;

/// Width of a coordinate, in bits.
pub const COORD_BITS: u32 = u16::BITS;

/// Side length of a leaf block, as a power of two.
pub const BLOCK_BITS: u32 = 3;

/// Side length of a leaf block, in locations.
pub const BLOCK: u16 = 1 << BLOCK_BITS;

/// Mask extracting the in-leaf part of a coordinate.
pub const BLOCK_MASK: u16 = BLOCK - 1;

/// Number of 2-bit selectors consumed from the root table down to a leaf.
///
/// The root table consumes the first one; branches consume the rest.
pub const TREE_DEPTH: u32 = COORD_BITS - BLOCK_BITS;

/// Number of vertical floors stored per leaf.
///
/// This is unrelated to [`TREE_DEPTH`]; it only sizes the per-leaf tile grids.
pub const FLOORS: usize = 16;

/// Number of tiles on one floor of a leaf.
pub(crate) const CELLS_PER_FLOOR: usize = (BLOCK as usize) * (BLOCK as usize);

const _: () = assert!(BLOCK == 1 << BLOCK_BITS, "block size must be a power of two");
const _: () = assert!(BLOCK_BITS < COORD_BITS, "a leaf cannot cover the whole space");
const _: () = assert!(TREE_DEPTH >= 1, "the root table consumes at least one level");
const _: () = assert!(
    TREE_DEPTH + BLOCK_BITS == COORD_BITS,
    "tree levels and leaf bits must cover the coordinate exactly"
);
const _: () = assert!(FLOORS > 0 && FLOORS <= u8::MAX as usize, "floors are addressed by u8");

const TOP_BIT: u16 = 1 << (COORD_BITS - 1);

/// Branch selector for the current most significant bits of `x` and `y`.
///
/// Bit 0 is taken from `x`, bit 1 from `y`, giving a value in `0..4`.
#[inline]
pub const fn selector(x: u16, y: u16) -> usize {
    (((x & TOP_BIT) >> (COORD_BITS - 1)) | ((y & TOP_BIT) >> (COORD_BITS - 2))) as usize
}

/// Consume the bit just used by [`selector`].
#[inline]
pub const fn advance(x: u16, y: u16) -> (u16, u16) {
    (x << 1, y << 1)
}

/// Offset of a coordinate inside its leaf block.
#[inline]
pub const fn local(v: u16) -> usize {
    (v & BLOCK_MASK) as usize
}

/// Floor a coordinate to the origin of its leaf block.
#[inline]
pub const fn block_origin(v: u16) -> u16 {
    v & !BLOCK_MASK
}

/// The full branch path of a coordinate, top level first.
pub fn path(x: u16, y: u16) -> Path {
    Path { x, y, remaining: TREE_DEPTH }
}

/// Iterator over the branch selectors of a coordinate.
///
/// Yields exactly [`TREE_DEPTH`] selectors.
#[derive(Clone, Debug)]
pub struct Path {
    x: u16,
    y: u16,
    remaining: u32,
}

impl Iterator for Path {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let sel = selector(self.x, self.y);
        (self.x, self.y) = advance(self.x, self.y);
        Some(sel)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Path {}
impl FusedIterator for Path {}
