//! Fuzz target for in-place edits.
//!
//! Applies a sequence of replacements over raw UTF-16 (unpaired surrogates
//! included) and checks the cached pair count after every step.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use openstring::OString;
use openstring::unicode::count_surrogate_pairs;

#[derive(Debug, Arbitrary)]
struct Edit {
    from: u8,
    count: u8,
    replacement: Vec<u16>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    initial: Vec<u16>,
    edits: Vec<Edit>,
}

fuzz_target!(|input: Input| {
    let mut s = OString::from_units(input.initial);
    for edit in input.edits.iter().take(32) {
        s.replace_range(
            usize::from(edit.from),
            usize::from(edit.count),
            &edit.replacement,
        );
        let units = s.as_units();
        assert_eq!(s.surrogate_pairs(), count_surrogate_pairs(units, 0, units.len()));
    }
});
