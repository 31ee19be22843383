//! Occupied byte ranges and the gaps between them.
//!
//! Every decoded field claims a [`ByteRange`] of its source. [`compute_gaps`] takes those
//! claims (in any order, overlapping or not) and returns the stretches of `[0, len)` nobody
//! claimed, which is usually where the interesting unknowns of a format live.

use std::fmt;

/// Half-open byte range `[start, start + length)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteRange {
    pub start: u64,
    pub length: u64,
}

impl ByteRange {
    pub fn new(start: u64, length: u64) -> Self {
        ByteRange { start, length }
    }

    /// Exclusive end offset.
    pub fn end(&self) -> u64 {
        self.start.saturating_add(self.length)
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn contains(&self, offset: u64) -> bool {
        offset >= self.start && offset < self.end()
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}..{:#x}", self.start, self.end())
    }
}

/// Merge ranges into maximal disjoint intervals, ascending by start.
///
/// Overlapping and touching ranges are joined. Empty ranges cover nothing and are dropped.
pub fn merge_ranges(ranges: &[ByteRange]) -> Vec<ByteRange> {
    let mut sorted: Vec<ByteRange> = ranges.iter().copied().filter(|r| !r.is_empty()).collect();
    sorted.sort_unstable();

    let mut merged: Vec<ByteRange> = Vec::with_capacity(sorted.len());
    for r in sorted {
        match merged.last_mut() {
            Some(last) if r.start <= last.end() => {
                let end = last.end().max(r.end());
                last.length = end - last.start;
            }
            _ => merged.push(r),
        }
    }
    merged
}

/// Complement of `occupied` within `[0, total)`, ascending by start.
///
/// Claims reaching past `total` are clipped. Returns an empty list when the claims cover
/// the whole source.
pub fn compute_gaps(occupied: &[ByteRange], total: u64) -> Vec<ByteRange> {
    let mut gaps = Vec::new();
    let mut covered_to = 0u64;
    for r in merge_ranges(occupied) {
        if r.start >= total {
            break;
        }
        if r.start > covered_to {
            gaps.push(ByteRange::new(covered_to, r.start - covered_to));
        }
        covered_to = covered_to.max(r.end().min(total));
    }
    if covered_to < total {
        gaps.push(ByteRange::new(covered_to, total - covered_to));
    }
    gaps
}
