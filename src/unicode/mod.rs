//! Codepoint codec, index mapping, substring search and display width.
//!
//! Everything here is a pure function over in-memory slices. The text façade
//! in [`crate::text`] composes these primitives; they are exposed so other
//! callers can work on raw UTF-8 / UTF-16 / UTF-32 buffers directly.

mod codec;
mod index;
mod search;
mod width;

pub use codec::{
    BMP_MAX, CODEPOINT_MAX, Codepoint, LEAD_SURROGATE_MAX, LEAD_SURROGATE_MIN, REPLACEMENT,
    TRAIL_SURROGATE_MAX, TRAIL_SURROGATE_MIN, Utf8Sequence, Utf16Codepoints, Utf16Sequence,
    codepoint_to_utf8, codepoint_to_utf16, is_bmp, is_continuation_byte, is_lead_surrogate,
    is_scalar_value, is_supplementary, is_surrogate, is_surrogate_pair, is_trail_surrogate,
    utf8_sequence_length, utf8_to_codepoint, utf8_to_utf16, utf8_to_utf16_append,
    utf16_codepoints, utf16_to_codepoint, utf16_to_string, utf16_to_utf8, utf16_to_utf8_append,
    utf16_to_utf32, utf32_to_utf16, utf32_to_utf16_append,
};
pub use index::{
    codepoint_len, codepoint_offset_to_storage_offset, codepoint_offset_to_storage_offset_back,
    codepoint_range_to_storage, count_surrogate_pairs, storage_offset_to_codepoint_offset,
};
pub use search::{
    BOYER_MOORE_MIN_HAYSTACK, BOYER_MOORE_MIN_NEEDLE, CaseSensitivity, CodeUnit, SKIP_TABLE_SIZE,
    SearchOptions, SearchStrategy, rsearch, rsearch_with, search, search_with, select_strategy,
};
pub use width::{WidthMethod, display_width, display_width_codepoint};
