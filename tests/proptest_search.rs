//! Property-based tests for the search engine.
//!
//! The three algorithms must agree with each other and with a naive scan for
//! every input, in both directions and both case modes.

use openstring::unicode::{
    BOYER_MOORE_MIN_HAYSTACK, BOYER_MOORE_MIN_NEEDLE, CaseSensitivity, SearchOptions,
    SearchStrategy, rsearch_with, search, search_with, select_strategy,
};
use proptest::prelude::*;

const STRATEGIES: [SearchStrategy; 4] = [
    SearchStrategy::Auto,
    SearchStrategy::Direct,
    SearchStrategy::BoyerMoore,
    SearchStrategy::RollingHash,
];

fn fold(unit: u16) -> u16 {
    if (0x41..=0x5A).contains(&unit) {
        unit + 0x20
    } else {
        unit
    }
}

fn eq(a: u16, b: u16, case: CaseSensitivity) -> bool {
    match case {
        CaseSensitivity::Sensitive => a == b,
        CaseSensitivity::Insensitive => fold(a) == fold(b),
    }
}

fn naive_first(hay: &[u16], needle: &[u16], case: CaseSensitivity) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    hay.windows(needle.len())
        .position(|w| w.iter().zip(needle).all(|(&a, &b)| eq(a, b, case)))
}

fn naive_last(hay: &[u16], needle: &[u16], case: CaseSensitivity) -> Option<usize> {
    if needle.is_empty() {
        return Some(hay.len());
    }
    hay.windows(needle.len())
        .rposition(|w| w.iter().zip(needle).all(|(&a, &b)| eq(a, b, case)))
}

// ============================================================================
// Strategies
// ============================================================================

/// Small alphabet so matches are frequent; includes case pairs, a CJK unit,
/// surrogate halves and units sharing a low byte with ASCII letters.
fn unit() -> impl Strategy<Value = u16> {
    prop::sample::select(vec![
        u16::from(b'a'),
        u16::from(b'A'),
        u16::from(b'b'),
        u16::from(b'B'),
        u16::from(b'n'),
        0x6211,
        0xD83D,
        0xDE18,
        0x0161,
    ])
}

fn case() -> impl Strategy<Value = CaseSensitivity> {
    prop_oneof![
        Just(CaseSensitivity::Sensitive),
        Just(CaseSensitivity::Insensitive)
    ]
}

/// Haystack long enough to make Boyer-Moore eligible, with a needle that is
/// sometimes cut out of the haystack itself.
fn long_case() -> impl Strategy<Value = (Vec<u16>, Vec<u16>)> {
    prop::collection::vec(unit(), (BOYER_MOORE_MIN_HAYSTACK + 1)..900).prop_flat_map(|hay| {
        let len = hay.len();
        let from_hay = (0..len - 12, (BOYER_MOORE_MIN_NEEDLE + 1)..12);
        let hay_for_cut = hay.clone();
        prop_oneof![
            from_hay.prop_map(move |(start, n)| {
                (hay_for_cut.clone(), hay_for_cut[start..start + n].to_vec())
            }),
            prop::collection::vec(unit(), (BOYER_MOORE_MIN_NEEDLE + 1)..12)
                .prop_map(move |needle| (hay.clone(), needle)),
        ]
    })
}

proptest! {
    /// Every strategy matches a naive scan on short inputs.
    #[test]
    fn short_inputs_agree(
        hay in prop::collection::vec(unit(), 0..40),
        needle in prop::collection::vec(unit(), 0..6),
        case in case(),
    ) {
        let expected = naive_first(&hay, &needle, case);
        for strategy in STRATEGIES {
            let options = SearchOptions::new(case).with_strategy(strategy);
            prop_assert_eq!(search_with(&hay, &needle, options), expected, "{:?}", strategy);
        }
    }

    /// Every strategy matches a naive scan on Boyer-Moore sized inputs.
    #[test]
    fn long_inputs_agree((hay, needle) in long_case(), case in case()) {
        prop_assert_eq!(select_strategy(hay.len(), needle.len()), SearchStrategy::BoyerMoore);
        let expected = naive_first(&hay, &needle, case);
        for strategy in STRATEGIES {
            let options = SearchOptions::new(case).with_strategy(strategy);
            prop_assert_eq!(search_with(&hay, &needle, options), expected, "{:?}", strategy);
        }
    }

    /// Reverse search finds the rightmost occurrence.
    #[test]
    fn reverse_search_agrees(
        hay in prop::collection::vec(unit(), 0..60),
        needle in prop::collection::vec(unit(), 0..6),
        case in case(),
    ) {
        let expected = naive_last(&hay, &needle, case);
        for strategy in STRATEGIES {
            let options = SearchOptions::new(case).with_strategy(strategy);
            prop_assert_eq!(rsearch_with(&hay, &needle, options), expected, "{:?}", strategy);
        }
    }

    /// Reverse search on long inputs, where Boyer-Moore is the default.
    #[test]
    fn long_reverse_search_agrees((hay, needle) in long_case(), case in case()) {
        let expected = naive_last(&hay, &needle, case);
        for strategy in STRATEGIES {
            let options = SearchOptions::new(case).with_strategy(strategy);
            prop_assert_eq!(rsearch_with(&hay, &needle, options), expected, "{:?}", strategy);
        }
    }

    /// Byte haystacks go through the same code paths as UTF-16 ones.
    #[test]
    fn byte_search_matches_std(hay in "[abAB ]{0,700}", needle in "[abAB]{1,8}") {
        let expected = hay.find(needle.as_str());
        let found = search(hay.as_bytes(), needle.as_bytes(), CaseSensitivity::Sensitive);
        prop_assert_eq!(found, expected);
    }
}
