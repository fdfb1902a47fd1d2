// Copyright 2025 the Overworld Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error type for the write path.

use crate::layout::FLOORS;

/// Errors returned by [`WorldIndex::create_tile`](crate::WorldIndex::create_tile).
///
/// Absence on read is never an error; lookups return `None`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// The floor does not fit in a leaf's per-floor grid.
    #[error("floor {floor} is outside the {} floors stored per leaf", FLOORS)]
    FloorOutOfRange {
        /// The rejected floor.
        floor: u8,
    },
}
