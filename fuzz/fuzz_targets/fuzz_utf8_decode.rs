//! Fuzz target for the UTF-8 decoder.
//!
//! Arbitrary bytes must decode without panicking, and the resulting UTF-16
//! must agree with the standard library's lossy decoding.

#![no_main]

use libfuzzer_sys::fuzz_target;
use openstring::OString;
use openstring::unicode::{count_surrogate_pairs, utf16_to_string, utf8_to_utf16};

fuzz_target!(|data: &[u8]| {
    let units = utf8_to_utf16(data);
    if let Ok(text) = std::str::from_utf8(data) {
        assert_eq!(utf16_to_string(&units), text);
    }

    let s = OString::from_utf8(data);
    assert_eq!(s.surrogate_pairs(), count_surrogate_pairs(&units, 0, units.len()));
    assert_eq!(s.len() + s.surrogate_pairs(), s.storage_len());
});
