//! Borrowed, codepoint-indexed view over UTF-16 storage.

use std::fmt;

use crate::error::{Error, Result};
use crate::format::FormatArg;
use crate::unicode::{
    CaseSensitivity, Utf16Codepoints, WidthMethod, codepoint_len,
    codepoint_offset_to_storage_offset, codepoint_offset_to_storage_offset_back,
    codepoint_range_to_storage, display_width, rsearch, search,
    storage_offset_to_codepoint_offset, utf16_codepoints, utf16_to_string,
};

use super::OString;

/// Returns true for the ASCII whitespace units stripped by the trim family.
#[inline]
pub(crate) const fn is_trim_unit(unit: u16) -> bool {
    matches!(unit, 0x20 | 0x09 | 0x0A | 0x0B | 0x0C | 0x0D)
}

/// A borrowed slice of UTF-16 code units addressed by codepoint.
///
/// `OStr` never owns its storage; the borrow checker ties it to the buffer it
/// was taken from. Every operation that narrows the view (`substring`, `left`,
/// `trim`, `split`, ...) returns another view into the same storage without
/// copying. Comparison, equality and hashing work on the raw code units.
///
/// # Examples
///
/// ```
/// use openstring::{CaseSensitivity, OString};
///
/// let owned = OString::from("我😘😘ni");
/// let view = owned.as_ostr();
/// assert_eq!(view.len(), 5);
/// assert_eq!(view.substring(2, usize::MAX), "😘ni");
/// assert_eq!(view.index_of(&OString::from("N"), CaseSensitivity::Insensitive), Some(3));
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OStr<'a> {
    units: &'a [u16],
}

impl<'a> OStr<'a> {
    /// Wrap a slice of UTF-16 code units.
    #[must_use]
    pub const fn new(units: &'a [u16]) -> Self {
        Self { units }
    }

    /// The underlying code units.
    #[must_use]
    pub const fn as_units(&self) -> &'a [u16] {
        self.units
    }

    /// Number of codepoints.
    #[must_use]
    pub fn len(&self) -> usize {
        codepoint_len(self.units)
    }

    /// Number of UTF-16 code units.
    #[must_use]
    pub const fn storage_len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Iterate `(storage_index, codepoint)` pairs.
    #[must_use]
    pub fn codepoints(&self) -> Utf16Codepoints<'a> {
        utf16_codepoints(self.units)
    }

    /// Copy into an owned string.
    #[must_use]
    pub fn to_ostring(&self) -> OString {
        OString::from(*self)
    }

    /// Decode into a Rust `String`; unpaired surrogates become U+FFFD.
    #[must_use]
    pub fn to_utf8(&self) -> String {
        utf16_to_string(self.units)
    }

    /// Terminal column width.
    #[must_use]
    pub fn display_width(&self, method: WidthMethod) -> usize {
        display_width(self.units, method)
    }

    /// `count` codepoints starting at codepoint `from`.
    ///
    /// Both bounds clamp to the end of the view, so an out-of-range `from`
    /// yields an empty view.
    #[must_use]
    pub fn substring(&self, from: usize, count: usize) -> Self {
        let (start, end) = codepoint_range_to_storage(self.units, from, count);
        Self::new(&self.units[start..end])
    }

    /// The first `count` codepoints.
    #[must_use]
    pub fn left(&self, count: usize) -> Self {
        let end = codepoint_offset_to_storage_offset(self.units, count);
        Self::new(&self.units[..end])
    }

    /// The last `count` codepoints.
    #[must_use]
    pub fn right(&self, count: usize) -> Self {
        let start = codepoint_offset_to_storage_offset_back(self.units, count);
        Self::new(&self.units[start..])
    }

    /// Drop the first `count` codepoints.
    #[must_use]
    pub fn remove_prefix(&self, count: usize) -> Self {
        let start = codepoint_offset_to_storage_offset(self.units, count);
        Self::new(&self.units[start..])
    }

    /// Drop the last `count` codepoints.
    #[must_use]
    pub fn remove_suffix(&self, count: usize) -> Self {
        let end = codepoint_offset_to_storage_offset_back(self.units, count);
        Self::new(&self.units[..end])
    }

    /// Codepoint index of the first occurrence of `pattern`.
    #[must_use]
    pub fn index_of(&self, pattern: impl AsRef<[u16]>, case: CaseSensitivity) -> Option<usize> {
        search(self.units, pattern.as_ref(), case)
            .map(|storage| storage_offset_to_codepoint_offset(self.units, storage))
    }

    /// Codepoint index of the last occurrence of `pattern`.
    #[must_use]
    pub fn last_index_of(
        &self,
        pattern: impl AsRef<[u16]>,
        case: CaseSensitivity,
    ) -> Option<usize> {
        rsearch(self.units, pattern.as_ref(), case)
            .map(|storage| storage_offset_to_codepoint_offset(self.units, storage))
    }

    #[must_use]
    pub fn contains(&self, pattern: impl AsRef<[u16]>, case: CaseSensitivity) -> bool {
        search(self.units, pattern.as_ref(), case).is_some()
    }

    /// Codepoint index of the first codepoint accepted by `predicate`.
    ///
    /// Unpaired surrogates are presented to the predicate as U+FFFD.
    pub fn position<F>(&self, mut predicate: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        self.codepoints()
            .map(|(_, cp)| char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER))
            .position(|c| predicate(c))
    }

    /// Split around the first occurrence of `separator`.
    ///
    /// Returns `Ok(None)` when the separator does not occur.
    pub fn split_once(&self, separator: impl AsRef<[u16]>) -> Result<Option<(Self, Self)>> {
        let separator = separator.as_ref();
        if separator.is_empty() {
            return Err(Error::EmptyPattern);
        }
        Ok(self.split_once_units(separator))
    }

    fn split_once_units(&self, separator: &[u16]) -> Option<(Self, Self)> {
        let at = search(self.units, separator, CaseSensitivity::Sensitive)?;
        Some((
            Self::new(&self.units[..at]),
            Self::new(&self.units[at + separator.len()..]),
        ))
    }

    /// Split on every occurrence of `separator`, keeping empty parts.
    ///
    /// An empty view yields a single empty part.
    pub fn split(&self, separator: impl AsRef<[u16]>) -> Result<Vec<Self>> {
        self.split_parts(separator.as_ref(), false)
    }

    /// Split on every occurrence of `separator`, dropping empty parts.
    pub fn split_non_empty(&self, separator: impl AsRef<[u16]>) -> Result<Vec<Self>> {
        self.split_parts(separator.as_ref(), true)
    }

    fn split_parts(&self, separator: &[u16], skip_empty: bool) -> Result<Vec<Self>> {
        if separator.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let mut parts = Vec::new();
        let mut rest = *self;
        while let Some((head, tail)) = rest.split_once_units(separator) {
            if !(skip_empty && head.is_empty()) {
                parts.push(head);
            }
            rest = tail;
        }
        if !(skip_empty && rest.is_empty()) {
            parts.push(rest);
        }
        Ok(parts)
    }

    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u16]>) -> bool {
        self.units.starts_with(prefix.as_ref())
    }

    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u16]>) -> bool {
        self.units.ends_with(suffix.as_ref())
    }

    /// Strip leading ASCII whitespace.
    #[must_use]
    pub fn trim_start(&self) -> Self {
        let start = self
            .units
            .iter()
            .position(|&u| !is_trim_unit(u))
            .unwrap_or(self.units.len());
        Self::new(&self.units[start..])
    }

    /// Strip trailing ASCII whitespace.
    #[must_use]
    pub fn trim_end(&self) -> Self {
        let end = self
            .units
            .iter()
            .rposition(|&u| !is_trim_unit(u))
            .map_or(0, |i| i + 1);
        Self::new(&self.units[..end])
    }

    #[must_use]
    pub fn trim(&self) -> Self {
        self.trim_start().trim_end()
    }

    /// Parse a decimal integer with optional sign and surrounding whitespace.
    pub fn to_int(&self) -> Result<i64> {
        let trimmed = self.trim();
        let invalid = || Error::InvalidNumber(trimmed.to_utf8());

        let (negative, digits) = match trimmed.units.split_first() {
            Some((&0x2D, rest)) => (true, rest),
            Some((&0x2B, rest)) => (false, rest),
            _ => (false, trimmed.units),
        };
        if digits.is_empty() {
            return Err(invalid());
        }

        let mut value: i64 = 0;
        for &unit in digits {
            if !(0x30..=0x39).contains(&unit) {
                return Err(invalid());
            }
            let digit = i64::from(unit - 0x30);
            // Accumulate negatively so i64::MIN parses
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_sub(digit))
                .ok_or_else(invalid)?;
        }
        if negative {
            Ok(value)
        } else {
            value.checked_neg().ok_or_else(invalid)
        }
    }

    /// Use this view as a template for the format engine.
    pub fn format(&self, args: &[FormatArg<'_>]) -> Result<OString> {
        crate::format::format(self.units, args)
    }
}

impl AsRef<[u16]> for OStr<'_> {
    fn as_ref(&self) -> &[u16] {
        self.units
    }
}

impl<'a> From<&'a [u16]> for OStr<'a> {
    fn from(units: &'a [u16]) -> Self {
        Self::new(units)
    }
}

impl<'a> From<&'a OString> for OStr<'a> {
    fn from(s: &'a OString) -> Self {
        s.as_ostr()
    }
}

impl fmt::Display for OStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_utf8())
    }
}

impl fmt::Debug for OStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.to_utf8(), f)
    }
}

impl PartialEq<str> for OStr<'_> {
    fn eq(&self, other: &str) -> bool {
        self.units.iter().copied().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for OStr<'_> {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl PartialEq<OString> for OStr<'_> {
    fn eq(&self, other: &OString) -> bool {
        self.units == other.as_units()
    }
}
