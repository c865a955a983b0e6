//! Codepoint index <-> storage index mapping over UTF-16 buffers.
//!
//! Every conversion walks the buffer, so the cost is proportional to the
//! distance traversed. Callers that keep a cached surrogate-pair count (see
//! [`OString`](crate::text::OString)) can skip the walk when the count is zero.

use super::codec::{is_lead_surrogate, is_surrogate_pair, is_trail_surrogate};

/// Count surrogate pairs lying entirely inside the storage range `[from, to)`.
///
/// A pair whose lead sits at `to - 1` straddles the boundary and is not
/// counted. Out-of-range bounds are clamped to the buffer.
#[must_use]
pub fn count_surrogate_pairs(units: &[u16], from: usize, to: usize) -> usize {
    let to = to.min(units.len());
    if from >= to {
        return 0;
    }
    let window = &units[from..to];
    let mut count = 0;
    let mut i = 0;
    while i + 1 < window.len() {
        if is_surrogate_pair(window[i], window[i + 1]) {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

/// Number of codepoints in the buffer.
#[must_use]
pub fn codepoint_len(units: &[u16]) -> usize {
    units.len() - count_surrogate_pairs(units, 0, units.len())
}

/// Storage offset reached after consuming `n` codepoints from the start.
///
/// Clamps at the end of the buffer.
#[must_use]
pub fn codepoint_offset_to_storage_offset(units: &[u16], n: usize) -> usize {
    let mut pos = 0;
    let mut remaining = n;
    while remaining > 0 && pos < units.len() {
        if pos + 1 < units.len() && is_surrogate_pair(units[pos], units[pos + 1]) {
            pos += 2;
        } else {
            pos += 1;
        }
        remaining -= 1;
    }
    pos
}

/// Storage offset at which the last `n` codepoints begin.
///
/// Walks backwards from the end; clamps at the start of the buffer.
#[must_use]
pub fn codepoint_offset_to_storage_offset_back(units: &[u16], n: usize) -> usize {
    let mut pos = units.len();
    let mut remaining = n;
    while remaining > 0 && pos > 0 {
        if pos >= 2 && is_trail_surrogate(units[pos - 1]) && is_lead_surrogate(units[pos - 2]) {
            pos -= 2;
        } else {
            pos -= 1;
        }
        remaining -= 1;
    }
    pos
}

/// Codepoint count of the storage prefix `[0, storage)`.
#[must_use]
pub fn storage_offset_to_codepoint_offset(units: &[u16], storage: usize) -> usize {
    let storage = storage.min(units.len());
    storage - count_surrogate_pairs(units, 0, storage)
}

/// Convert a codepoint window `(from, count)` into a storage window.
///
/// Both ends are clamped, so the result is always a valid range of `units`.
#[must_use]
pub fn codepoint_range_to_storage(units: &[u16], from: usize, count: usize) -> (usize, usize) {
    let start = codepoint_offset_to_storage_offset(units, from);
    let len = codepoint_offset_to_storage_offset(&units[start..], count);
    (start, start + len)
}
