//! Substring search over code-unit sequences.
//!
//! All functions work in storage-unit space: the returned index is an offset
//! into the haystack slice. Callers holding UTF-16 text translate it back to a
//! codepoint index with [`storage_offset_to_codepoint_offset`].
//!
//! Three algorithms are available and [`SearchStrategy::Auto`] picks one by
//! input size:
//!
//! 1. empty needle matches at 0;
//! 2. a needle longer than the haystack never matches;
//! 3. a single-unit needle uses a linear scan;
//! 4. haystacks over [`BOYER_MOORE_MIN_HAYSTACK`] units with needles over
//!    [`BOYER_MOORE_MIN_NEEDLE`] units use Boyer–Moore;
//! 5. everything else uses a rolling hash.
//!
//! Case-insensitive mode folds ASCII `A-Z` only.
//!
//! # Example
//! ```
//! use openstring::unicode::{CaseSensitivity, search};
//!
//! let hay: Vec<u16> = "我😘😘ni".encode_utf16().collect();
//! let needle: Vec<u16> = "😘N".encode_utf16().collect();
//! assert_eq!(search(&hay, &needle, CaseSensitivity::Sensitive), None);
//! assert_eq!(search(&hay, &needle, CaseSensitivity::Insensitive), Some(3));
//! ```
//!
//! [`storage_offset_to_codepoint_offset`]: super::storage_offset_to_codepoint_offset

/// Haystack length above which Boyer–Moore becomes eligible.
pub const BOYER_MOORE_MIN_HAYSTACK: usize = 500;
/// Needle length above which Boyer–Moore becomes eligible.
pub const BOYER_MOORE_MIN_NEEDLE: usize = 5;
/// Entries in the bad-character table, one per low byte of a folded unit.
pub const SKIP_TABLE_SIZE: usize = 256;

const MAX_SKIP: usize = SKIP_TABLE_SIZE - 1;
const HASH_BASE: u64 = 1_000_003;

/// A fixed-width code unit the search engine can compare and fold.
pub trait CodeUnit: Copy + Eq {
    /// Lowercase ASCII `A-Z`, leave everything else untouched.
    fn fold_ascii(self) -> Self;
    /// Bucket in the bad-character table.
    fn bucket(self) -> usize;
    /// Contribution to the rolling hash.
    fn weight(self) -> u64;
}

macro_rules! impl_code_unit {
    ($($t:ty),*) => {
        $(
            impl CodeUnit for $t {
                #[inline]
                fn fold_ascii(self) -> Self {
                    if (0x41..=0x5A).contains(&self) { self + 0x20 } else { self }
                }

                #[inline]
                fn bucket(self) -> usize {
                    (self as usize) & MAX_SKIP
                }

                #[inline]
                fn weight(self) -> u64 {
                    u64::from(self)
                }
            }
        )*
    };
}

impl_code_unit!(u8, u16, u32);

/// Whether ASCII letters compare case-insensitively.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CaseSensitivity {
    #[default]
    Sensitive,
    Insensitive,
}

impl CaseSensitivity {
    #[inline]
    fn fold<U: CodeUnit>(self, unit: U) -> U {
        match self {
            Self::Sensitive => unit,
            Self::Insensitive => unit.fold_ascii(),
        }
    }
}

/// Which algorithm runs a search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SearchStrategy {
    /// Choose by input size (see the module docs).
    #[default]
    Auto,
    /// Naive window-by-window comparison.
    Direct,
    /// Bad-character skip table, right-to-left comparison.
    BoyerMoore,
    /// Karp–Rabin rolling hash with direct confirmation.
    RollingHash,
}

/// Options for a search call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SearchOptions {
    pub case: CaseSensitivity,
    pub strategy: SearchStrategy,
}

impl SearchOptions {
    #[must_use]
    pub const fn new(case: CaseSensitivity) -> Self {
        Self {
            case,
            strategy: SearchStrategy::Auto,
        }
    }

    #[must_use]
    pub const fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}

impl From<CaseSensitivity> for SearchOptions {
    fn from(case: CaseSensitivity) -> Self {
        Self::new(case)
    }
}

/// Algorithm [`SearchStrategy::Auto`] resolves to for the given lengths.
///
/// Only meaningful for `0 < needle_len <= haystack_len`.
#[must_use]
pub fn select_strategy(haystack_len: usize, needle_len: usize) -> SearchStrategy {
    if needle_len == 1 {
        SearchStrategy::Direct
    } else if haystack_len > BOYER_MOORE_MIN_HAYSTACK && needle_len > BOYER_MOORE_MIN_NEEDLE {
        SearchStrategy::BoyerMoore
    } else {
        SearchStrategy::RollingHash
    }
}

/// First occurrence of `needle` in `haystack`.
#[must_use]
pub fn search<U: CodeUnit>(haystack: &[U], needle: &[U], case: CaseSensitivity) -> Option<usize> {
    search_with(haystack, needle, SearchOptions::new(case))
}

/// First occurrence of `needle` in `haystack` with explicit options.
#[must_use]
pub fn search_with<U: CodeUnit>(
    haystack: &[U],
    needle: &[U],
    options: SearchOptions,
) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    run(&Forward(haystack), &Forward(needle), options)
}

/// Last occurrence of `needle` in `haystack`.
///
/// An empty needle matches at `haystack.len()`.
#[must_use]
pub fn rsearch<U: CodeUnit>(haystack: &[U], needle: &[U], case: CaseSensitivity) -> Option<usize> {
    rsearch_with(haystack, needle, SearchOptions::new(case))
}

/// Last occurrence of `needle` in `haystack` with explicit options.
///
/// Runs the forward algorithms over both sequences read back to front, so the
/// first hit is the rightmost occurrence.
#[must_use]
pub fn rsearch_with<U: CodeUnit>(
    haystack: &[U],
    needle: &[U],
    options: SearchOptions,
) -> Option<usize> {
    if needle.is_empty() {
        return Some(haystack.len());
    }
    if needle.len() > haystack.len() {
        return None;
    }
    run(&Backward(haystack), &Backward(needle), options)
        .map(|hit| haystack.len() - hit - needle.len())
}

/// Random access to a sequence in one reading direction.
trait Units {
    type Unit: CodeUnit;

    fn len(&self) -> usize;
    fn at(&self, i: usize) -> Self::Unit;
}

struct Forward<'a, U>(&'a [U]);
struct Backward<'a, U>(&'a [U]);

impl<U: CodeUnit> Units for Forward<'_, U> {
    type Unit = U;

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn at(&self, i: usize) -> U {
        self.0[i]
    }
}

impl<U: CodeUnit> Units for Backward<'_, U> {
    type Unit = U;

    #[inline]
    fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    fn at(&self, i: usize) -> U {
        self.0[self.0.len() - 1 - i]
    }
}

/// Dispatch with `0 < needle.len() <= haystack.len()` already established.
fn run<S: Units>(haystack: &S, needle: &S, options: SearchOptions) -> Option<usize> {
    let strategy = match options.strategy {
        SearchStrategy::Auto => select_strategy(haystack.len(), needle.len()),
        forced => forced,
    };
    tracing::trace!(
        haystack_len = haystack.len(),
        needle_len = needle.len(),
        ?strategy,
        case = ?options.case,
        "substring search"
    );
    match strategy {
        SearchStrategy::Direct | SearchStrategy::Auto => direct(haystack, needle, options.case),
        SearchStrategy::BoyerMoore => boyer_moore(haystack, needle, options.case),
        SearchStrategy::RollingHash => rolling_hash(haystack, needle, options.case),
    }
}

#[inline]
fn matches_at<S: Units>(haystack: &S, needle: &S, pos: usize, case: CaseSensitivity) -> bool {
    (0..needle.len()).all(|j| case.fold(haystack.at(pos + j)) == case.fold(needle.at(j)))
}

fn direct<S: Units>(haystack: &S, needle: &S, case: CaseSensitivity) -> Option<usize> {
    if needle.len() == 1 {
        let target = case.fold(needle.at(0));
        return (0..haystack.len()).find(|&i| case.fold(haystack.at(i)) == target);
    }
    (0..=haystack.len() - needle.len()).find(|&pos| matches_at(haystack, needle, pos, case))
}

/// Bad-character table: distance from each unit's rightmost occurrence to the
/// needle end, over the last 255 units of the needle.
fn skip_table<S: Units>(needle: &S, case: CaseSensitivity) -> [usize; SKIP_TABLE_SIZE] {
    let len = needle.len();
    let span = len.min(MAX_SKIP);
    let mut table = [span; SKIP_TABLE_SIZE];
    for i in len - span..len {
        table[case.fold(needle.at(i)).bucket()] = len - 1 - i;
    }
    table
}

fn boyer_moore<S: Units>(haystack: &S, needle: &S, case: CaseSensitivity) -> Option<usize> {
    let len = needle.len();
    let last = len - 1;
    let table = skip_table(needle, case);

    let mut pos = 0;
    while pos + len <= haystack.len() {
        let mut j = last;
        while case.fold(haystack.at(pos + j)) == case.fold(needle.at(j)) {
            if j == 0 {
                return Some(pos);
            }
            j -= 1;
        }

        let mut skip = table[case.fold(haystack.at(pos + last)).bucket()];
        if skip == 0 {
            // The unit under the needle end matches the needle end, so the
            // table cannot move us. Use the mismatching unit instead, minus
            // what already matched.
            let matched = last - j;
            skip = table[case.fold(haystack.at(pos + j)).bucket()].saturating_sub(matched);
        }
        pos += skip.max(1);
    }
    None
}

fn window_hash<S: Units>(seq: &S, start: usize, len: usize, case: CaseSensitivity) -> u64 {
    (start..start + len).fold(0u64, |acc, i| {
        acc.wrapping_mul(HASH_BASE)
            .wrapping_add(case.fold(seq.at(i)).weight())
    })
}

fn rolling_hash<S: Units>(haystack: &S, needle: &S, case: CaseSensitivity) -> Option<usize> {
    let len = needle.len();
    // Weight of the unit leaving the window: HASH_BASE^(len - 1).
    let leading = (1..len).fold(1u64, |acc, _| acc.wrapping_mul(HASH_BASE));

    let target = window_hash(needle, 0, len, case);
    let mut hash = window_hash(haystack, 0, len, case);
    let mut pos = 0;
    loop {
        if hash == target && matches_at(haystack, needle, pos, case) {
            return Some(pos);
        }
        if pos + len >= haystack.len() {
            return None;
        }
        let outgoing = case.fold(haystack.at(pos)).weight();
        let incoming = case.fold(haystack.at(pos + len)).weight();
        hash = hash
            .wrapping_sub(outgoing.wrapping_mul(leading))
            .wrapping_mul(HASH_BASE)
            .wrapping_add(incoming);
        pos += 1;
    }
}
