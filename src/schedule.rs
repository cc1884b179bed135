//! Growth schedule: the fixed ascending sequence of prime bucket counts.
//!
//! A table starts at stage 0 and only ever moves forward one stage at a
//! time. The load limit is kept as an integer ratio so the trigger check
//! never touches floating point.

/// Prime bucket counts, indexed by growth stage.
pub const TABLE_SIZES: [usize; 28] = [
    7,
    17,
    37,
    79,
    163,
    331,
    673,
    1361,
    2729,
    5471,
    10949,
    21911,
    43853,
    87719,
    175447,
    350899,
    701819,
    1403641,
    2807303,
    5614657,
    11229331,
    44917381,
    89834777,
    179669557,
    359339171,
    718678369,
    1437356741,
    2147483647,
];

/// Index of the last stage in [`TABLE_SIZES`].
pub const MAX_STAGE: usize = TABLE_SIZES.len() - 1;

/// Numerator of the 0.75 load factor limit.
pub const LOAD_LIMIT_NUMERATOR: usize = 3;
/// Denominator of the 0.75 load factor limit.
pub const LOAD_LIMIT_DENOMINATOR: usize = 4;

/// Bucket count at `stage`. Panics if `stage > MAX_STAGE`.
#[inline]
pub const fn capacity_at(stage: usize) -> usize {
    TABLE_SIZES[stage]
}

/// Largest stage whose capacity does not exceed `max_capacity`.
///
/// Stage 0 is always permitted, so a cap below the first prime still
/// yields a usable (non-growing) table.
pub fn last_stage_within(max_capacity: usize) -> usize {
    TABLE_SIZES
        .iter()
        .rposition(|&c| c <= max_capacity)
        .unwrap_or(0)
}

/// True when holding `len` entries in `capacity` buckets stays within the
/// load limit.
#[inline]
pub fn within_load_limit(len: usize, capacity: usize) -> bool {
    // len / capacity <= 3 / 4, widened so huge capacities cannot overflow.
    (len as u128) * (LOAD_LIMIT_DENOMINATOR as u128)
        <= (capacity as u128) * (LOAD_LIMIT_NUMERATOR as u128)
}
