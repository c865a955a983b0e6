//! Property-based tests for the codec and index mapper.
//!
//! Uses proptest to verify invariants that must hold across all valid inputs.

use openstring::unicode::{
    CODEPOINT_MAX, REPLACEMENT, codepoint_len, codepoint_offset_to_storage_offset,
    codepoint_offset_to_storage_offset_back, codepoint_to_utf8, codepoint_to_utf16,
    count_surrogate_pairs, is_scalar_value, storage_offset_to_codepoint_offset, utf8_to_codepoint,
    utf8_to_utf16, utf16_to_codepoint, utf16_to_string, utf16_to_utf8, utf16_to_utf32,
    utf32_to_utf16,
};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Arbitrary UTF-8 strings (proptest default).
fn utf8_string() -> impl Strategy<Value = String> {
    "\\PC{0,100}"
}

/// Strings dense in surrogate pairs mixed with BMP text.
fn astral_string() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop::sample::select(vec!["😘", "𪚥", "😁", "我", "♂", "れ", "a", "N", " "]),
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

/// Raw UTF-16 including unpaired surrogates.
fn raw_utf16() -> impl Strategy<Value = Vec<u16>> {
    prop::collection::vec(
        prop_oneof![
            4 => 0x20u16..0x7F,
            2 => 0xD800u16..0xDC00,
            2 => 0xDC00u16..0xE000,
            1 => any::<u16>(),
        ],
        0..64,
    )
}

// ============================================================================
// Exhaustive round trips
// ============================================================================

#[test]
fn every_scalar_round_trips_through_utf16() {
    for cp in (0..=CODEPOINT_MAX).filter(|&cp| is_scalar_value(cp)) {
        let seq = codepoint_to_utf16(cp);
        assert_eq!(utf16_to_codepoint(seq.as_units()), (cp, seq.len()), "cp {cp:#X}");
    }
}

#[test]
fn every_scalar_round_trips_through_utf8() {
    for cp in (0..=CODEPOINT_MAX).filter(|&cp| is_scalar_value(cp)) {
        let seq = codepoint_to_utf8(cp);
        assert_eq!(utf8_to_codepoint(seq.as_bytes()), (cp, seq.len()), "cp {cp:#X}");
        let expected = char::from_u32(cp).map(char::len_utf8);
        assert_eq!(Some(seq.len()), expected, "cp {cp:#X}");
    }
}

// ============================================================================
// Codec Properties
// ============================================================================

proptest! {
    /// UTF-16 encoding agrees with the standard library.
    #[test]
    fn utf8_to_utf16_matches_std(s in utf8_string()) {
        let ours = utf8_to_utf16(s.as_bytes());
        let std: Vec<u16> = s.encode_utf16().collect();
        prop_assert_eq!(ours, std);
    }

    /// Valid text survives UTF-8 -> UTF-16 -> UTF-8.
    #[test]
    fn utf8_round_trip_is_lossless(s in utf8_string()) {
        let units = utf8_to_utf16(s.as_bytes());
        prop_assert_eq!(utf16_to_utf8(&units), s.as_bytes().to_vec());
        prop_assert_eq!(utf16_to_string(&units), s);
    }

    /// UTF-32 conversion round trips.
    #[test]
    fn utf32_round_trip(s in astral_string()) {
        let units: Vec<u16> = s.encode_utf16().collect();
        let cps = utf16_to_utf32(&units);
        prop_assert_eq!(cps.len(), s.chars().count());
        prop_assert_eq!(utf32_to_utf16(&cps), units);
    }

    /// Arbitrary bytes decode without panicking and always make progress.
    #[test]
    fn utf8_decode_is_total(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut rest = bytes.as_slice();
        while !rest.is_empty() {
            let (cp, consumed) = utf8_to_codepoint(rest);
            prop_assert!(consumed >= 1 && consumed <= rest.len());
            prop_assert!(cp <= CODEPOINT_MAX);
            rest = &rest[consumed..];
        }
    }

    /// Unpaired surrogates decode to U+FFFD, one unit at a time.
    #[test]
    fn lossy_utf16_matches_std(units in raw_utf16()) {
        let std = String::from_utf16_lossy(&units);
        prop_assert_eq!(utf16_to_string(&units), std);
        let replaced = utf16_to_utf32(&units).iter().filter(|&&cp| cp == REPLACEMENT).count();
        prop_assert!(replaced <= units.len());
    }
}

// ============================================================================
// Index Mapping Properties
// ============================================================================

proptest! {
    /// storage -> codepoint inverts codepoint -> storage.
    #[test]
    fn index_symmetry(s in astral_string()) {
        let units: Vec<u16> = s.encode_utf16().collect();
        for n in 0..=codepoint_len(&units) {
            let storage = codepoint_offset_to_storage_offset(&units, n);
            prop_assert_eq!(storage_offset_to_codepoint_offset(&units, storage), n);
        }
    }

    /// Index symmetry also holds with unpaired surrogates in the buffer.
    #[test]
    fn index_symmetry_raw(units in raw_utf16()) {
        for n in 0..=codepoint_len(&units) {
            let storage = codepoint_offset_to_storage_offset(&units, n);
            prop_assert_eq!(storage_offset_to_codepoint_offset(&units, storage), n);
        }
    }

    /// Codepoint length agrees with `char` count for valid text.
    #[test]
    fn codepoint_len_matches_chars(s in astral_string()) {
        let units: Vec<u16> = s.encode_utf16().collect();
        prop_assert_eq!(codepoint_len(&units), s.chars().count());
        prop_assert_eq!(
            units.len() - count_surrogate_pairs(&units, 0, units.len()),
            s.chars().count()
        );
    }

    /// Walking n codepoints from the back lands where len - n from the front does.
    #[test]
    fn backward_walk_agrees_with_forward(s in astral_string(), n in 0usize..50) {
        let units: Vec<u16> = s.encode_utf16().collect();
        let len = codepoint_len(&units);
        let back = codepoint_offset_to_storage_offset_back(&units, n);
        let front = codepoint_offset_to_storage_offset(&units, len.saturating_sub(n));
        prop_assert_eq!(back, front);
    }

    /// Pair counts over adjacent windows never exceed the whole.
    #[test]
    fn pair_counts_are_additive_at_codepoint_boundaries(s in astral_string(), cut in 0usize..50) {
        let units: Vec<u16> = s.encode_utf16().collect();
        let mid = codepoint_offset_to_storage_offset(&units, cut);
        let total = count_surrogate_pairs(&units, 0, units.len());
        let left = count_surrogate_pairs(&units, 0, mid);
        let right = count_surrogate_pairs(&units, mid, units.len());
        prop_assert_eq!(left + right, total);
    }
}
