//! Owning UTF-16 string with a cached surrogate-pair count.
//!
//! [`OString`] stores UTF-16 code units and keeps the number of surrogate
//! pairs in step with every mutation, so [`OString::len`] is O(1) and
//! codepoint/storage conversions skip the walk entirely for text that has no
//! supplementary characters. Borrowed operations go through [`OStr`].

use std::fmt;
use std::ops::{Add, AddAssign};

use crate::error::{Error, Result};
use crate::format::FormatArg;
use crate::unicode::{
    CaseSensitivity, Utf16Codepoints, WidthMethod, codepoint_offset_to_storage_offset,
    codepoint_to_utf16, count_surrogate_pairs, is_lead_surrogate, is_trail_surrogate, rsearch,
    search, storage_offset_to_codepoint_offset, utf8_to_utf16_append, utf32_to_utf16_append,
};

use super::OStr;
use super::view::is_trim_unit;

/// Owned, growable UTF-16 text addressed by codepoint.
///
/// Ordering, equality and hashing compare code units lexicographically.
///
/// # Examples
///
/// ```
/// use openstring::OString;
///
/// let mut s = OString::from("我♂😘Cれ");
/// assert_eq!(s.len(), 5);
/// assert_eq!(s.storage_len(), 6);
///
/// s.replace_range(1, 2, &OString::from("™"));
/// assert_eq!(s, "我™Cれ");
/// assert_eq!(s.len(), 4);
/// ```
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OString {
    units: Vec<u16>,
    surrogate_pairs: usize,
}

impl OString {
    /// Create an empty string.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            units: Vec::new(),
            surrogate_pairs: 0,
        }
    }

    /// Take ownership of UTF-16 code units.
    #[must_use]
    pub fn from_units(units: Vec<u16>) -> Self {
        let surrogate_pairs = count_surrogate_pairs(&units, 0, units.len());
        Self {
            units,
            surrogate_pairs,
        }
    }

    /// Copy UTF-16 code units.
    #[must_use]
    pub fn from_utf16(units: &[u16]) -> Self {
        Self::from_units(units.to_vec())
    }

    /// Decode UTF-8 bytes; malformed sequences become U+FFFD.
    #[must_use]
    pub fn from_utf8(bytes: &[u8]) -> Self {
        let mut units = Vec::with_capacity(bytes.len());
        let surrogate_pairs = utf8_to_utf16_append(bytes, &mut units);
        Self {
            units,
            surrogate_pairs,
        }
    }

    /// Encode codepoints; non-scalar values become U+FFFD.
    #[must_use]
    pub fn from_utf32(codepoints: &[u32]) -> Self {
        let mut units = Vec::with_capacity(codepoints.len());
        let surrogate_pairs = utf32_to_utf16_append(codepoints, &mut units);
        Self {
            units,
            surrogate_pairs,
        }
    }

    /// `count` copies of `ch`.
    #[must_use]
    pub fn repeat(ch: char, count: usize) -> Self {
        let seq = codepoint_to_utf16(u32::from(ch));
        let mut units = Vec::with_capacity(seq.len() * count);
        for _ in 0..count {
            units.extend_from_slice(seq.as_units());
        }
        Self {
            units,
            surrogate_pairs: if seq.is_surrogate_pair() { count } else { 0 },
        }
    }

    /// Borrow as a view.
    #[must_use]
    pub fn as_ostr(&self) -> OStr<'_> {
        OStr::new(&self.units)
    }

    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.units
    }

    #[must_use]
    pub fn into_units(self) -> Vec<u16> {
        self.units
    }

    /// Number of codepoints. O(1).
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len() - self.surrogate_pairs
    }

    /// Number of UTF-16 code units.
    #[must_use]
    pub fn storage_len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Cached number of surrogate pairs.
    #[must_use]
    pub fn surrogate_pairs(&self) -> usize {
        self.surrogate_pairs
    }

    #[must_use]
    pub fn codepoints(&self) -> Utf16Codepoints<'_> {
        self.as_ostr().codepoints()
    }

    pub fn clear(&mut self) {
        self.units.clear();
        self.surrogate_pairs = 0;
    }

    fn storage_offset(&self, codepoint: usize) -> usize {
        if self.surrogate_pairs == 0 {
            codepoint.min(self.units.len())
        } else {
            codepoint_offset_to_storage_offset(&self.units, codepoint)
        }
    }

    fn codepoint_offset(&self, storage: usize) -> usize {
        if self.surrogate_pairs == 0 {
            storage
        } else {
            storage_offset_to_codepoint_offset(&self.units, storage)
        }
    }

    fn storage_range(&self, from: usize, count: usize) -> (usize, usize) {
        let start = self.storage_offset(from);
        let end = self.storage_offset(from.saturating_add(count));
        (start, end)
    }

    /// Replace storage `[start, end)` and patch the pair count.
    ///
    /// Only pairs touching the edited window can change, so the count is
    /// corrected by recounting one unit either side before and after.
    fn splice_units(&mut self, start: usize, end: usize, replacement: &[u16]) {
        let seam_start = start.saturating_sub(1);
        let removed = count_surrogate_pairs(&self.units, seam_start, end + 1);
        self.units.splice(start..end, replacement.iter().copied());
        let inserted =
            count_surrogate_pairs(&self.units, seam_start, start + replacement.len() + 1);
        self.surrogate_pairs = self.surrogate_pairs - removed + inserted;
    }

    fn append_counted(&mut self, units: &[u16], pairs: usize) {
        let seam = matches!(
            (self.units.last(), units.first()),
            (Some(&lead), Some(&trail)) if is_lead_surrogate(lead) && is_trail_surrogate(trail)
        );
        self.units.extend_from_slice(units);
        self.surrogate_pairs += pairs + usize::from(seam);
    }

    /// Append UTF-8 text.
    pub fn push_str(&mut self, s: &str) {
        let pairs = utf8_to_utf16_append(s.as_bytes(), &mut self.units);
        self.surrogate_pairs += pairs;
    }

    pub fn push(&mut self, ch: char) {
        let seq = codepoint_to_utf16(u32::from(ch));
        self.units.extend_from_slice(seq.as_units());
        if seq.is_surrogate_pair() {
            self.surrogate_pairs += 1;
        }
    }

    /// Append raw UTF-16 code units.
    ///
    /// A trailing lead surrogate here and a leading trail surrogate in `units`
    /// join into one codepoint.
    pub fn push_units(&mut self, units: impl AsRef<[u16]>) {
        let units = units.as_ref();
        let pairs = count_surrogate_pairs(units, 0, units.len());
        self.append_counted(units, pairs);
    }

    /// Copy of `count` codepoints starting at `from`, clamped to the end.
    #[must_use]
    pub fn substring(&self, from: usize, count: usize) -> Self {
        let (start, end) = self.storage_range(from, count);
        if self.surrogate_pairs == 0 {
            return Self {
                units: self.units[start..end].to_vec(),
                surrogate_pairs: 0,
            };
        }
        Self::from_utf16(&self.units[start..end])
    }

    #[must_use]
    pub fn left(&self, count: usize) -> Self {
        self.substring(0, count)
    }

    #[must_use]
    pub fn right(&self, count: usize) -> Self {
        self.as_ostr().right(count).to_ostring()
    }

    #[must_use]
    pub fn index_of(&self, pattern: impl AsRef<[u16]>, case: CaseSensitivity) -> Option<usize> {
        search(&self.units, pattern.as_ref(), case).map(|at| self.codepoint_offset(at))
    }

    #[must_use]
    pub fn last_index_of(
        &self,
        pattern: impl AsRef<[u16]>,
        case: CaseSensitivity,
    ) -> Option<usize> {
        rsearch(&self.units, pattern.as_ref(), case).map(|at| self.codepoint_offset(at))
    }

    /// First occurrence of `pattern` inside the codepoint window
    /// `[from, from + count)`, reported as an index into the whole string.
    #[must_use]
    pub fn index_of_in(
        &self,
        pattern: impl AsRef<[u16]>,
        from: usize,
        count: usize,
        case: CaseSensitivity,
    ) -> Option<usize> {
        let (start, end) = self.storage_range(from, count);
        search(&self.units[start..end], pattern.as_ref(), case)
            .map(|at| self.codepoint_offset(start + at))
    }

    /// Last occurrence of `pattern` inside the codepoint window
    /// `[from, from + count)`, reported as an index into the whole string.
    #[must_use]
    pub fn last_index_of_in(
        &self,
        pattern: impl AsRef<[u16]>,
        from: usize,
        count: usize,
        case: CaseSensitivity,
    ) -> Option<usize> {
        let (start, end) = self.storage_range(from, count);
        rsearch(&self.units[start..end], pattern.as_ref(), case)
            .map(|at| self.codepoint_offset(start + at))
    }

    #[must_use]
    pub fn contains(&self, pattern: impl AsRef<[u16]>, case: CaseSensitivity) -> bool {
        search(&self.units, pattern.as_ref(), case).is_some()
    }

    pub fn position<F>(&self, predicate: F) -> Option<usize>
    where
        F: FnMut(char) -> bool,
    {
        self.as_ostr().position(predicate)
    }

    pub fn split_once(
        &self,
        separator: impl AsRef<[u16]>,
    ) -> Result<Option<(OStr<'_>, OStr<'_>)>> {
        self.as_ostr().split_once(separator)
    }

    pub fn split(&self, separator: impl AsRef<[u16]>) -> Result<Vec<OStr<'_>>> {
        self.as_ostr().split(separator)
    }

    pub fn split_non_empty(&self, separator: impl AsRef<[u16]>) -> Result<Vec<OStr<'_>>> {
        self.as_ostr().split_non_empty(separator)
    }

    #[must_use]
    pub fn starts_with(&self, prefix: impl AsRef<[u16]>) -> bool {
        self.units.starts_with(prefix.as_ref())
    }

    #[must_use]
    pub fn ends_with(&self, suffix: impl AsRef<[u16]>) -> bool {
        self.units.ends_with(suffix.as_ref())
    }

    /// Replace `count` codepoints at `from` with `dest`.
    ///
    /// The range clamps to the end of the string; `from` past the end appends.
    pub fn replace_range(
        &mut self,
        from: usize,
        count: usize,
        dest: impl AsRef<[u16]>,
    ) -> &mut Self {
        let (start, end) = self.storage_range(from, count);
        self.splice_units(start, end, dest.as_ref());
        self
    }

    /// Replace every non-overlapping occurrence of `src` with `dest`,
    /// scanning left to right. Returns how many were replaced.
    pub fn replace_all(
        &mut self,
        src: impl AsRef<[u16]>,
        dest: impl AsRef<[u16]>,
        case: CaseSensitivity,
    ) -> Result<usize> {
        let (src, dest) = (src.as_ref(), dest.as_ref());
        if src.is_empty() {
            return Err(Error::EmptyPattern);
        }

        let mut out = Vec::with_capacity(self.units.len());
        let mut pos = 0;
        let mut replaced = 0;
        while let Some(hit) = search(&self.units[pos..], src, case) {
            out.extend_from_slice(&self.units[pos..pos + hit]);
            out.extend_from_slice(dest);
            pos += hit + src.len();
            replaced += 1;
        }
        if replaced > 0 {
            out.extend_from_slice(&self.units[pos..]);
            *self = Self::from_units(out);
        }
        Ok(replaced)
    }

    /// Copy with every occurrence of `src` replaced by `dest`.
    pub fn replace_copy(
        &self,
        src: impl AsRef<[u16]>,
        dest: impl AsRef<[u16]>,
        case: CaseSensitivity,
    ) -> Result<Self> {
        let mut copy = self.clone();
        copy.replace_all(src, dest, case)?;
        Ok(copy)
    }

    /// Strip leading ASCII whitespace in place.
    pub fn trim_start(&mut self) -> &mut Self {
        let start = self
            .units
            .iter()
            .position(|&u| !is_trim_unit(u))
            .unwrap_or(self.units.len());
        self.units.drain(..start);
        self
    }

    /// Strip trailing ASCII whitespace in place.
    pub fn trim_end(&mut self) -> &mut Self {
        let end = self
            .units
            .iter()
            .rposition(|&u| !is_trim_unit(u))
            .map_or(0, |i| i + 1);
        self.units.truncate(end);
        self
    }

    pub fn trim(&mut self) -> &mut Self {
        self.trim_start().trim_end()
    }

    #[must_use]
    pub fn trim_start_copy(&self) -> Self {
        self.as_ostr().trim_start().to_ostring()
    }

    #[must_use]
    pub fn trim_end_copy(&self) -> Self {
        self.as_ostr().trim_end().to_ostring()
    }

    #[must_use]
    pub fn trim_copy(&self) -> Self {
        self.as_ostr().trim().to_ostring()
    }

    pub fn to_int(&self) -> Result<i64> {
        self.as_ostr().to_int()
    }

    #[must_use]
    pub fn to_utf8(&self) -> String {
        self.as_ostr().to_utf8()
    }

    #[must_use]
    pub fn display_width(&self, method: WidthMethod) -> usize {
        self.as_ostr().display_width(method)
    }

    /// Use this string as a format template.
    ///
    /// ```
    /// use openstring::{OString, ofmt_args};
    ///
    /// let template = OString::from("123{1}12{0}34");
    /// let out = template.format(ofmt_args![123, "a"]).unwrap();
    /// assert_eq!(out, "123a1212334");
    /// ```
    pub fn format(&self, args: &[FormatArg<'_>]) -> Result<Self> {
        crate::format::format(&self.units, args)
    }
}

impl AsRef<[u16]> for OString {
    fn as_ref(&self) -> &[u16] {
        &self.units
    }
}

impl From<&str> for OString {
    fn from(s: &str) -> Self {
        Self::from_utf8(s.as_bytes())
    }
}

impl From<String> for OString {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&String> for OString {
    fn from(s: &String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<&OString> for OString {
    fn from(s: &OString) -> Self {
        s.clone()
    }
}

impl From<OStr<'_>> for OString {
    fn from(s: OStr<'_>) -> Self {
        Self::from_utf16(s.as_units())
    }
}

impl From<Vec<u16>> for OString {
    fn from(units: Vec<u16>) -> Self {
        Self::from_units(units)
    }
}

impl From<&[u16]> for OString {
    fn from(units: &[u16]) -> Self {
        Self::from_utf16(units)
    }
}

impl From<char> for OString {
    fn from(ch: char) -> Self {
        Self::repeat(ch, 1)
    }
}

impl AddAssign<&OString> for OString {
    fn add_assign(&mut self, rhs: &OString) {
        self.append_counted(&rhs.units, rhs.surrogate_pairs);
    }
}

impl AddAssign<OStr<'_>> for OString {
    fn add_assign(&mut self, rhs: OStr<'_>) {
        self.push_units(rhs);
    }
}

impl AddAssign<&str> for OString {
    fn add_assign(&mut self, rhs: &str) {
        self.push_str(rhs);
    }
}

impl Add<&OString> for OString {
    type Output = OString;

    fn add(mut self, rhs: &OString) -> OString {
        self += rhs;
        self
    }
}

impl Add<&OString> for &OString {
    type Output = OString;

    fn add(self, rhs: &OString) -> OString {
        self.clone() + rhs
    }
}

impl Add<&str> for OString {
    type Output = OString;

    fn add(mut self, rhs: &str) -> OString {
        self.push_str(rhs);
        self
    }
}

impl fmt::Display for OString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.as_ostr(), f)
    }
}

impl fmt::Debug for OString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.as_ostr(), f)
    }
}

impl PartialEq<str> for OString {
    fn eq(&self, other: &str) -> bool {
        self.as_ostr() == *other
    }
}

impl PartialEq<&str> for OString {
    fn eq(&self, other: &&str) -> bool {
        self.as_ostr() == **other
    }
}

impl PartialEq<OStr<'_>> for OString {
    fn eq(&self, other: &OStr<'_>) -> bool {
        self.units == other.as_units()
    }
}
