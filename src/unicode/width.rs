//! Terminal display width of UTF-16 text.

use super::codec::{Codepoint, utf16_codepoints};
use unicode_width::UnicodeWidthChar;

/// Width calculation method for ambiguous-width characters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WidthMethod {
    /// POSIX-like wcwidth: ambiguous width = 1.
    #[default]
    WcWidth,
    /// Unicode East Asian Width: ambiguous width = 2.
    Unicode,
}

/// Display width of one codepoint in terminal columns.
///
/// Control characters and non-scalar values count as zero.
#[inline]
#[must_use]
pub fn display_width_codepoint(cp: Codepoint, method: WidthMethod) -> usize {
    // Fast path: ASCII printable characters are always width 1
    if (0x20..0x7F).contains(&cp) {
        return 1;
    }
    let Some(c) = char::from_u32(cp) else {
        return 0;
    };
    match method {
        WidthMethod::WcWidth => UnicodeWidthChar::width(c).unwrap_or(0),
        WidthMethod::Unicode => UnicodeWidthChar::width_cjk(c).unwrap_or(0),
    }
}

/// Display width of a UTF-16 buffer in terminal columns.
#[must_use]
pub fn display_width(units: &[u16], method: WidthMethod) -> usize {
    utf16_codepoints(units)
        .map(|(_, cp)| display_width_codepoint(cp, method))
        .sum()
}
