//! Pure sequencing logic for course video ordering.
//!
//! A course's memberships always occupy positions `1..=N`. The arithmetic
//! for adjacent moves and the contiguity check live here, free of any
//! storage dependency, so both the repository layer and the test suites
//! share one definition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parking position used while two adjacent memberships exchange places.
///
/// SQLite checks `uq_memberships_course_position` per statement rather
/// than at commit, so the swap moves the target here first, reassigns the
/// neighbor, then assigns the target its final position.
pub const SWAP_SENTINEL: i64 = -1;

/// Which neighbor an adjacent move exchanges with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveDirection {
    /// Toward position 1.
    Up,
    /// Toward position N.
    Down,
}

impl MoveDirection {
    /// Signed position delta: up is -1, down is +1.
    pub fn offset(self) -> i64 {
        match self {
            MoveDirection::Up => -1,
            MoveDirection::Down => 1,
        }
    }
}

impl fmt::Display for MoveDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveDirection::Up => write!(f, "up"),
            MoveDirection::Down => write!(f, "down"),
        }
    }
}

/// Position of the neighbor a move at `position` would swap with.
pub fn neighbor_position(position: i64, direction: MoveDirection) -> i64 {
    position + direction.offset()
}

/// Whether a set of positions forms the contiguous run `1..=N`.
///
/// The slice need not be sorted; duplicates and gaps both fail.
pub fn is_contiguous(positions: &[i64]) -> bool {
    let mut sorted: Vec<i64> = positions.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(i, &pos)| pos == i as i64 + 1)
}
