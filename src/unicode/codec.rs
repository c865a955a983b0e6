//! Codepoint conversions between UTF-8, UTF-16 and UTF-32.
//!
//! Every function here is pure and total: malformed input never panics and
//! never reads past the end of the slice. Ill-formed sequences decode to
//! [`REPLACEMENT`] and consume at least one storage unit, so bulk decoders
//! always make progress.

/// A Unicode codepoint. Kept as a raw `u32` because decoded values from
/// foreign buffers are not guaranteed to be scalar values.
pub type Codepoint = u32;

/// U+FFFD REPLACEMENT CHARACTER.
pub const REPLACEMENT: Codepoint = 0xFFFD;
/// Largest legal codepoint.
pub const CODEPOINT_MAX: Codepoint = 0x10_FFFF;
/// Largest codepoint of the Basic Multilingual Plane.
pub const BMP_MAX: Codepoint = 0xFFFF;

pub const LEAD_SURROGATE_MIN: u16 = 0xD800;
pub const LEAD_SURROGATE_MAX: u16 = 0xDBFF;
pub const TRAIL_SURROGATE_MIN: u16 = 0xDC00;
pub const TRAIL_SURROGATE_MAX: u16 = 0xDFFF;

const SUPPLEMENTARY_OFFSET: Codepoint = 0x1_0000;
const SURROGATE_SHIFT: u32 = 10;
const SURROGATE_MASK: Codepoint = 0x3FF;
const CONTINUATION_SHIFT: u32 = 6;
const CONTINUATION_PAYLOAD: u8 = 0b0011_1111;
const CONTINUATION_TAG: u8 = 0b1000_0000;

/// Lead (high) surrogate: 0xD800..=0xDBFF.
#[inline]
#[must_use]
pub const fn is_lead_surrogate(unit: u16) -> bool {
    unit >= LEAD_SURROGATE_MIN && unit <= LEAD_SURROGATE_MAX
}

/// Trail (low) surrogate: 0xDC00..=0xDFFF.
#[inline]
#[must_use]
pub const fn is_trail_surrogate(unit: u16) -> bool {
    unit >= TRAIL_SURROGATE_MIN && unit <= TRAIL_SURROGATE_MAX
}

#[inline]
#[must_use]
pub const fn is_surrogate(unit: u16) -> bool {
    unit >= LEAD_SURROGATE_MIN && unit <= TRAIL_SURROGATE_MAX
}

/// Whether `lead` followed by `trail` forms one supplementary codepoint.
#[inline]
#[must_use]
pub const fn is_surrogate_pair(lead: u16, trail: u16) -> bool {
    is_lead_surrogate(lead) && is_trail_surrogate(trail)
}

#[inline]
#[must_use]
pub const fn is_bmp(cp: Codepoint) -> bool {
    cp <= BMP_MAX
}

/// Codepoints that need a surrogate pair in UTF-16 and four bytes in UTF-8.
#[inline]
#[must_use]
pub const fn is_supplementary(cp: Codepoint) -> bool {
    cp > BMP_MAX && cp <= CODEPOINT_MAX
}

/// In range and not a surrogate.
#[inline]
#[must_use]
pub const fn is_scalar_value(cp: Codepoint) -> bool {
    cp <= CODEPOINT_MAX
        && !(cp >= LEAD_SURROGATE_MIN as Codepoint && cp <= TRAIL_SURROGATE_MAX as Codepoint)
}

#[inline]
#[must_use]
pub const fn is_continuation_byte(byte: u8) -> bool {
    byte & 0b1100_0000 == CONTINUATION_TAG
}

/// One encoded UTF-8 codepoint (1..=4 bytes).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf8Sequence {
    bytes: [u8; 4],
    len: u8,
}

#[allow(clippy::len_without_is_empty)] // never empty
impl Utf8Sequence {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }
}

/// One encoded UTF-16 codepoint (a single unit or a surrogate pair).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Utf16Sequence {
    units: [u16; 2],
    len: u8,
}

#[allow(clippy::len_without_is_empty)] // never empty
impl Utf16Sequence {
    #[must_use]
    pub fn as_units(&self) -> &[u16] {
        &self.units[..usize::from(self.len)]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    #[must_use]
    pub fn is_surrogate_pair(&self) -> bool {
        self.len == 2
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, plus the mask that
/// strips the length prefix from it.
///
/// Returns `0` as the length for continuation bytes (`10xxxxxx`) and for
/// bytes with five or more leading ones, neither of which can start a
/// sequence. The mask covers the run of leading one bits.
///
/// ```
/// use openstring::unicode::utf8_sequence_length;
///
/// assert_eq!(utf8_sequence_length(0b0001_1111), (1, 0b0000_0000));
/// assert_eq!(utf8_sequence_length(0b1101_1100), (2, 0b1100_0000));
/// assert_eq!(utf8_sequence_length(0b1000_0111), (0, 0b1000_0000));
/// ```
#[inline]
#[must_use]
pub fn utf8_sequence_length(lead: u8) -> (usize, u8) {
    let ones = lead.leading_ones();
    let mask = !u8::MAX.checked_shr(ones).unwrap_or(0);
    let len = match ones {
        0 => 1,
        2..=4 => ones as usize,
        _ => 0,
    };
    (len, mask)
}

/// Smallest codepoint that needs a UTF-8 sequence of `len` bytes.
const fn utf8_min_codepoint(len: usize) -> Codepoint {
    match len {
        2 => 0x80,
        3 => 0x800,
        4 => SUPPLEMENTARY_OFFSET,
        _ => 0,
    }
}

/// Decode one codepoint from the start of `bytes`.
///
/// Returns `(codepoint, consumed_bytes)`. Empty input yields `(0, 0)`.
/// A continuation byte in lead position, a truncated or interrupted sequence,
/// an overlong encoding, or a value outside the scalar range yields
/// [`REPLACEMENT`].
#[must_use]
pub fn utf8_to_codepoint(bytes: &[u8]) -> (Codepoint, usize) {
    let Some(&lead) = bytes.first() else {
        return (0, 0);
    };
    let (len, mask) = utf8_sequence_length(lead);
    if len == 0 {
        return (REPLACEMENT, 1);
    }

    let mut cp = Codepoint::from(lead & !mask);
    for i in 1..len {
        match bytes.get(i) {
            Some(&b) if is_continuation_byte(b) => {
                cp = (cp << CONTINUATION_SHIFT) | Codepoint::from(b & CONTINUATION_PAYLOAD);
            }
            // Stop before the offending byte so the caller resyncs on it.
            _ => return (REPLACEMENT, i),
        }
    }

    if cp >= utf8_min_codepoint(len) && is_scalar_value(cp) {
        (cp, len)
    } else {
        (REPLACEMENT, len)
    }
}

/// Encode a codepoint as UTF-8. Non-scalar values encode as U+FFFD.
#[must_use]
pub fn codepoint_to_utf8(cp: Codepoint) -> Utf8Sequence {
    let cp = if is_scalar_value(cp) { cp } else { REPLACEMENT };
    let mut bytes = [0u8; 4];
    let len = if cp < 0x80 {
        bytes[0] = cp as u8;
        1
    } else if cp < 0x800 {
        bytes[0] = (cp >> 6) as u8 | 0b1100_0000;
        bytes[1] = (cp as u8 & CONTINUATION_PAYLOAD) | CONTINUATION_TAG;
        2
    } else if cp < SUPPLEMENTARY_OFFSET {
        bytes[0] = (cp >> 12) as u8 | 0b1110_0000;
        bytes[1] = ((cp >> 6) as u8 & CONTINUATION_PAYLOAD) | CONTINUATION_TAG;
        bytes[2] = (cp as u8 & CONTINUATION_PAYLOAD) | CONTINUATION_TAG;
        3
    } else {
        bytes[0] = (cp >> 18) as u8 | 0b1111_0000;
        bytes[1] = ((cp >> 12) as u8 & CONTINUATION_PAYLOAD) | CONTINUATION_TAG;
        bytes[2] = ((cp >> 6) as u8 & CONTINUATION_PAYLOAD) | CONTINUATION_TAG;
        bytes[3] = (cp as u8 & CONTINUATION_PAYLOAD) | CONTINUATION_TAG;
        4
    };
    Utf8Sequence { bytes, len }
}

/// Decode one codepoint from the start of `units`.
///
/// Returns `(codepoint, consumed_units)`. Empty input yields `(0, 0)`.
/// A lead surrogate not followed by a trail surrogate, or a lone trail
/// surrogate, yields `(REPLACEMENT, 1)`.
///
/// ```
/// use openstring::unicode::utf16_to_codepoint;
///
/// assert_eq!(utf16_to_codepoint(&[0xD83D, 0xDE18]), (0x1F618, 2));
/// assert_eq!(utf16_to_codepoint(&[0xD83D]), (0xFFFD, 1));
/// ```
#[must_use]
pub fn utf16_to_codepoint(units: &[u16]) -> (Codepoint, usize) {
    let Some(&first) = units.first() else {
        return (0, 0);
    };
    if is_lead_surrogate(first) {
        match units.get(1) {
            Some(&trail) if is_trail_surrogate(trail) => {
                let high = Codepoint::from(first - LEAD_SURROGATE_MIN) << SURROGATE_SHIFT;
                let low = Codepoint::from(trail - TRAIL_SURROGATE_MIN);
                ((high | low) + SUPPLEMENTARY_OFFSET, 2)
            }
            _ => (REPLACEMENT, 1),
        }
    } else if is_trail_surrogate(first) {
        (REPLACEMENT, 1)
    } else {
        (Codepoint::from(first), 1)
    }
}

/// Encode a codepoint as UTF-16. Non-scalar values encode as U+FFFD.
#[must_use]
pub fn codepoint_to_utf16(cp: Codepoint) -> Utf16Sequence {
    let cp = if is_scalar_value(cp) { cp } else { REPLACEMENT };
    if is_bmp(cp) {
        return Utf16Sequence {
            units: [cp as u16, 0],
            len: 1,
        };
    }
    let v = cp - SUPPLEMENTARY_OFFSET;
    Utf16Sequence {
        units: [
            LEAD_SURROGATE_MIN + (v >> SURROGATE_SHIFT) as u16,
            TRAIL_SURROGATE_MIN + (v & SURROGATE_MASK) as u16,
        ],
        len: 2,
    }
}

/// Iterator over the codepoints of a UTF-16 buffer.
///
/// Yields `(storage_index, codepoint)`; unpaired surrogates come out as
/// [`REPLACEMENT`].
#[derive(Clone, Debug)]
pub struct Utf16Codepoints<'a> {
    units: &'a [u16],
    pos: usize,
}

impl Iterator for Utf16Codepoints<'_> {
    type Item = (usize, Codepoint);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.units.get(self.pos..)?;
        let (cp, consumed) = utf16_to_codepoint(rest);
        if consumed == 0 {
            return None;
        }
        let at = self.pos;
        self.pos += consumed;
        Some((at, cp))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.units.len().saturating_sub(self.pos);
        (remaining.div_ceil(2), Some(remaining))
    }
}

/// Walk the codepoints of a UTF-16 buffer.
#[must_use]
pub fn utf16_codepoints(units: &[u16]) -> Utf16Codepoints<'_> {
    Utf16Codepoints { units, pos: 0 }
}

/// Append the UTF-16 form of `src` to `out`.
///
/// Returns the number of surrogate pairs written so callers can maintain a
/// pair count without rescanning.
pub fn utf8_to_utf16_append(src: &[u8], out: &mut Vec<u16>) -> usize {
    out.reserve(src.len());
    let mut pairs = 0;
    let mut rest = src;
    while !rest.is_empty() {
        let (cp, consumed) = utf8_to_codepoint(rest);
        let seq = codepoint_to_utf16(cp);
        out.extend_from_slice(seq.as_units());
        if seq.is_surrogate_pair() {
            pairs += 1;
        }
        rest = &rest[consumed..];
    }
    pairs
}

#[must_use]
pub fn utf8_to_utf16(src: &[u8]) -> Vec<u16> {
    let mut out = Vec::with_capacity(src.len());
    utf8_to_utf16_append(src, &mut out);
    out
}

/// Append the UTF-8 form of `src` to `out`.
pub fn utf16_to_utf8_append(src: &[u16], out: &mut Vec<u8>) {
    out.reserve(src.len() * 2);
    for (_, cp) in utf16_codepoints(src) {
        out.extend_from_slice(codepoint_to_utf8(cp).as_bytes());
    }
}

#[must_use]
pub fn utf16_to_utf8(src: &[u16]) -> Vec<u8> {
    let mut out = Vec::with_capacity(src.len());
    utf16_to_utf8_append(src, &mut out);
    out
}

/// Decode a UTF-16 buffer into a Rust `String`, replacing unpaired surrogates.
#[must_use]
pub fn utf16_to_string(src: &[u16]) -> String {
    let mut out = String::with_capacity(src.len());
    for (_, cp) in utf16_codepoints(src) {
        out.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
    }
    out
}

/// Append the UTF-16 form of a codepoint slice to `out`, returning the
/// number of surrogate pairs written.
pub fn utf32_to_utf16_append(src: &[Codepoint], out: &mut Vec<u16>) -> usize {
    out.reserve(src.len());
    let mut pairs = 0;
    for &cp in src {
        let seq = codepoint_to_utf16(cp);
        out.extend_from_slice(seq.as_units());
        if seq.is_surrogate_pair() {
            pairs += 1;
        }
    }
    pairs
}

#[must_use]
pub fn utf32_to_utf16(src: &[Codepoint]) -> Vec<u16> {
    let mut out = Vec::with_capacity(src.len());
    utf32_to_utf16_append(src, &mut out);
    out
}

#[must_use]
pub fn utf16_to_utf32(src: &[u16]) -> Vec<Codepoint> {
    utf16_codepoints(src).map(|(_, cp)| cp).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_length_and_mask() {
        assert_eq!(utf8_sequence_length(0b0001_1111), (1, 0b0000_0000));
        assert_eq!(utf8_sequence_length(0b1000_0111), (0, 0b1000_0000));
        assert_eq!(utf8_sequence_length(0b1101_1100), (2, 0b1100_0000));
        assert_eq!(utf8_sequence_length(0b1110_0100), (3, 0b1110_0000));
        assert_eq!(utf8_sequence_length(0b1111_0000), (4, 0b1111_0000));
    }

    #[test]
    fn test_sequence_length_rejects_long_prefixes() {
        assert_eq!(utf8_sequence_length(0xF8).0, 0);
        assert_eq!(utf8_sequence_length(0xFF), (0, 0xFF));
    }

    #[test]
    fn test_utf8_decode() {
        assert_eq!(utf8_to_codepoint(b"1"), (49, 1));
        assert_eq!(utf8_to_codepoint(b"a"), (97, 1));
        assert_eq!(utf8_to_codepoint(&[0xE6, 0x88, 0x91]), ('我' as u32, 3));
        assert_eq!(utf8_to_codepoint(&[0xF0, 0x9F, 0x98, 0x81]), (0x1F601, 4));
        assert_eq!(utf8_to_codepoint(&[0xF0, 0xAA, 0x9A, 0xA5]), (0x2A6A5, 4));
    }

    #[test]
    fn test_utf8_decode_empty() {
        assert_eq!(utf8_to_codepoint(&[]), (0, 0));
        assert_eq!(utf8_to_codepoint(&[0]), (0, 1));
    }

    #[test]
    fn test_utf8_decode_malformed() {
        // continuation byte in lead position
        assert_eq!(utf8_to_codepoint(&[0x98, 0x41]), (REPLACEMENT, 1));
        // truncated sequence never reads past the slice
        assert_eq!(utf8_to_codepoint(&[0xF0, 0x9F]), (REPLACEMENT, 2));
        // interrupted sequence stops before the ASCII byte
        assert_eq!(utf8_to_codepoint(&[0xE6, 0x41, 0x42]), (REPLACEMENT, 1));
        // encoded surrogate
        assert_eq!(utf8_to_codepoint(&[0xED, 0xA0, 0x80]), (REPLACEMENT, 3));
        // beyond U+10FFFF
        assert_eq!(utf8_to_codepoint(&[0xF4, 0x90, 0x80, 0x80]), (REPLACEMENT, 4));
        // overlong forms of '/', U+0000 and U+FFFF
        assert_eq!(utf8_to_codepoint(&[0xC0, 0xAF]), (REPLACEMENT, 2));
        assert_eq!(utf8_to_codepoint(&[0xE0, 0x80, 0x80]), (REPLACEMENT, 3));
        assert_eq!(utf8_to_codepoint(&[0xF0, 0x8F, 0xBF, 0xBF]), (REPLACEMENT, 4));
        // shortest forms at each boundary still decode
        assert_eq!(utf8_to_codepoint(&[0xC2, 0x80]), (0x80, 2));
        assert_eq!(utf8_to_codepoint(&[0xE0, 0xA0, 0x80]), (0x800, 3));
        assert_eq!(utf8_to_codepoint(&[0xF0, 0x90, 0x80, 0x80]), (0x1_0000, 4));
    }

    #[test]
    fn test_utf8_encode_thresholds() {
        assert_eq!(codepoint_to_utf8(0x7F).as_bytes(), &[0x7F]);
        assert_eq!(codepoint_to_utf8(0x80).as_bytes(), &[0xC2, 0x80]);
        assert_eq!(codepoint_to_utf8(0x7FF).as_bytes(), &[0xDF, 0xBF]);
        assert_eq!(codepoint_to_utf8(0x800).as_bytes(), &[0xE0, 0xA0, 0x80]);
        assert_eq!(codepoint_to_utf8(0xFFFF).len(), 3);
        assert_eq!(
            codepoint_to_utf8(0x1_0000).as_bytes(),
            &[0xF0, 0x90, 0x80, 0x80]
        );
        assert_eq!(codepoint_to_utf8(0x1F618).as_bytes(), "😘".as_bytes());
    }

    #[test]
    fn test_utf8_encode_non_scalar() {
        assert_eq!(codepoint_to_utf8(0xD800).as_bytes(), "\u{FFFD}".as_bytes());
        assert_eq!(codepoint_to_utf8(0x11_0000).as_bytes(), "\u{FFFD}".as_bytes());
    }

    #[test]
    fn test_utf16_decode() {
        assert_eq!(utf16_to_codepoint(&[u16::from(b'2')]), (50, 1));
        assert_eq!(utf16_to_codepoint(&[0x5410]), (21520, 1));
        assert_eq!(utf16_to_codepoint(&[0xD83D, 0xDE18]), (0x1F618, 2));
        assert_eq!(utf16_to_codepoint(&[0xD869, 0xDEA5]), (0x2A6A5, 2));
        assert_eq!(utf16_to_codepoint(&[]), (0, 0));
    }

    #[test]
    fn test_utf16_unpaired_surrogates() {
        // lead at the end of the buffer
        assert_eq!(utf16_to_codepoint(&[0xD83D]), (REPLACEMENT, 1));
        // lead followed by a non-trail
        assert_eq!(utf16_to_codepoint(&[0xD83D, 0x0041]), (REPLACEMENT, 1));
        // lead followed by another lead
        assert_eq!(utf16_to_codepoint(&[0xD83D, 0xD83D]), (REPLACEMENT, 1));
        // lone trail
        assert_eq!(utf16_to_codepoint(&[0xDE18, 0x0041]), (REPLACEMENT, 1));
    }

    #[test]
    fn test_utf16_encode() {
        assert_eq!(codepoint_to_utf16(0x41).as_units(), &[0x41]);
        assert_eq!(codepoint_to_utf16(0xFFFF).as_units(), &[0xFFFF]);
        assert_eq!(codepoint_to_utf16(0x1F618).as_units(), &[0xD83D, 0xDE18]);
        assert_eq!(codepoint_to_utf16(0x10_FFFF).as_units(), &[0xDBFF, 0xDFFF]);
        assert!(codepoint_to_utf16(0x1_0000).is_surrogate_pair());
        assert_eq!(codepoint_to_utf16(0xDC00).as_units(), &[0xFFFD]);
    }

    #[test]
    fn test_bulk_round_trip() {
        let text = "我😘😘ni 𪚥♂";
        let units = utf8_to_utf16(text.as_bytes());
        let expected: Vec<u16> = text.encode_utf16().collect();
        assert_eq!(units, expected);
        assert_eq!(utf16_to_utf8(&units), text.as_bytes());
        assert_eq!(utf16_to_string(&units), text);
    }

    #[test]
    fn test_bulk_append_reports_pairs() {
        let mut out = vec![u16::from(b'x')];
        let pairs = utf8_to_utf16_append("😘a😘".as_bytes(), &mut out);
        assert_eq!(pairs, 2);
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_utf32_conversions() {
        let cps = [0x6211, 0x1F618, 0x6E];
        let units = utf32_to_utf16(&cps);
        assert_eq!(units, vec![0x6211, 0xD83D, 0xDE18, 0x6E]);
        assert_eq!(utf16_to_utf32(&units), cps.to_vec());
    }

    #[test]
    fn test_codepoint_iterator_indices() {
        let units: Vec<u16> = "a😘b".encode_utf16().collect();
        let got: Vec<_> = utf16_codepoints(&units).collect();
        assert_eq!(got, vec![(0, 0x61), (1, 0x1F618), (3, 0x62)]);
    }

    #[test]
    fn test_predicates() {
        assert!(is_surrogate_pair(0xD83D, 0xDE18));
        assert!(!is_surrogate_pair(0xDE18, 0xD83D));
        assert!(is_surrogate(0xDFFF));
        assert!(!is_surrogate(0xE000));
        assert!(is_supplementary(0x1_0000));
        assert!(!is_supplementary(0x11_0000));
        assert!(is_scalar_value(0));
        assert!(!is_scalar_value(0xDABC));
    }
}
