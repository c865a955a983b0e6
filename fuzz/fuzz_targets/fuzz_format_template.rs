//! Fuzz target for template parsing and rendering.
//!
//! Any template must either render or return an error; it must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use openstring::{format_str, ofmt_args, parse_template};
use std::time::Duration;

fuzz_target!(|data: &str| {
    let units: Vec<u16> = data.encode_utf16().collect();
    let _ = parse_template(&units);

    let elapsed = Duration::from_millis(12_345);
    let _ = format_str(data, ofmt_args![-7, "😘x", 2.5, &elapsed, 'y']);
    let _ = format_str(data, &[]);
});
