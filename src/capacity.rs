//! Capacity policy: the fixed ladder of slot-array sizes.
//!
//! Sizes roughly double at each step and avoid powers of two, so the
//! division-method slot index spreads keys better than bit masking would.

use crate::error::TableError;

/// Every slot-array size a table may have, ascending.
pub const CAPACITY_TABLE: [usize; 25] = [
    5, 11, 23, 47, 97, 197, 397, 797, 1597, 3203, 6421, 12853, 25717, 51437, 102877, 205759,
    411527, 823117, 1646237, 3292489, 6584983, 13169977, 26339969, 52679969, 105359939,
];

pub const MIN_CAPACITY: usize = CAPACITY_TABLE[0];
pub const MAX_CAPACITY: usize = CAPACITY_TABLE[CAPACITY_TABLE.len() - 1];

/// Capacity index a fresh (or cleared) table starts at.
pub const DEFAULT_INITIAL_INDEX: usize = 0;

/// Returns the capacity stored at `index`.
///
/// An index past the end of the ladder means someone asked to grow beyond
/// `MAX_CAPACITY`; that is reported rather than panicking.
pub fn capacity_at(index: usize) -> Result<usize, TableError> {
    CAPACITY_TABLE
        .get(index)
        .copied()
        .ok_or(TableError::CapacityExceeded { max: MAX_CAPACITY })
}

/// Index of the smallest capacity that is at least `wanted`, after clamping
/// `wanted` into `[MIN_CAPACITY, MAX_CAPACITY]`.
pub fn index_for_desired(wanted: usize) -> usize {
    let wanted = wanted.clamp(MIN_CAPACITY, MAX_CAPACITY);
    let (mut lo, mut hi) = (0, CAPACITY_TABLE.len() - 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if CAPACITY_TABLE[mid] >= wanted {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}
