//! Format arguments and their renderers.

use std::time::Duration;

use crate::error::{Error, Result};
use crate::text::{OStr, OString};
use crate::unicode::utf32_to_utf16_append;

/// Converts a value into UTF-16 for the format engine.
///
/// `param` is the text between `:` and `}` in the placeholder, empty when
/// absent. Output is appended to `out`; alignment padding is applied by the
/// engine afterwards.
///
/// ```
/// use openstring::format::{FormatArg, Render};
/// use openstring::{OStr, Result, format_str};
///
/// struct Complex(f64, f64);
///
/// impl Render for Complex {
///     fn render(&self, _param: OStr<'_>, out: &mut Vec<u16>) -> Result<()> {
///         out.extend(format!("{}+i{}", self.0, self.1).encode_utf16());
///         Ok(())
///     }
/// }
///
/// let c = Complex(1.0, 2.0);
/// let out = format_str("The complex is {}.", &[FormatArg::Custom(&c)]).unwrap();
/// assert_eq!(out, "The complex is 1+i2.");
/// ```
pub trait Render {
    fn render(&self, param: OStr<'_>, out: &mut Vec<u16>) -> Result<()>;
}

/// A single argument to [`format`](super::format).
#[derive(Clone, Copy)]
pub enum FormatArg<'a> {
    Int(i64),
    UInt(u64),
    /// Rounded to the nearest integer unless a precision param is given.
    Float(f64),
    Char(char),
    Str(&'a str),
    Utf16(&'a [u16]),
    /// Codepoints; non-scalar values render as U+FFFD.
    Utf32(&'a [u32]),
    Custom(&'a dyn Render),
}

impl std::fmt::Debug for FormatArg<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Self::UInt(v) => f.debug_tuple("UInt").field(v).finish(),
            Self::Float(v) => f.debug_tuple("Float").field(v).finish(),
            Self::Char(c) => f.debug_tuple("Char").field(c).finish(),
            Self::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Self::Utf16(u) => f.debug_tuple("Utf16").field(&OStr::new(u)).finish(),
            Self::Utf32(u) => f.debug_tuple("Utf32").field(u).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl FormatArg<'_> {
    /// Append the rendered argument to `out`.
    pub fn render(&self, param: OStr<'_>, out: &mut Vec<u16>) -> Result<()> {
        match *self {
            Self::Int(v) => render_integer(v < 0, v.unsigned_abs(), param, out),
            Self::UInt(v) => render_integer(false, v, param, out),
            Self::Float(v) => render_float(v, param, out),
            Self::Char(c) => {
                let mut buf = [0u16; 2];
                out.extend_from_slice(c.encode_utf16(&mut buf));
                Ok(())
            }
            Self::Str(s) => {
                out.extend(s.encode_utf16());
                Ok(())
            }
            Self::Utf16(units) => {
                out.extend_from_slice(units);
                Ok(())
            }
            Self::Utf32(codepoints) => {
                utf32_to_utf16_append(codepoints, out);
                Ok(())
            }
            Self::Custom(r) => r.render(param, out),
        }
    }
}

fn invalid_param(param: OStr<'_>, reason: &'static str) -> Error {
    Error::InvalidRenderParam {
        param: param.to_utf8(),
        reason,
    }
}

fn push_ascii(out: &mut Vec<u16>, s: &str) {
    out.extend(s.bytes().map(u16::from));
}

fn render_integer(
    negative: bool,
    magnitude: u64,
    param: OStr<'_>,
    out: &mut Vec<u16>,
) -> Result<()> {
    let digits = match param.as_units() {
        [] => magnitude.to_string(),
        [u] if *u == u16::from(b'x') => format!("{magnitude:x}"),
        [u] if *u == u16::from(b'X') => format!("{magnitude:X}"),
        [u] if *u == u16::from(b'b') => format!("{magnitude:b}"),
        [u] if *u == u16::from(b'o') => format!("{magnitude:o}"),
        _ => return Err(invalid_param(param, "expected one of x, X, b, o")),
    };
    if negative {
        out.push(u16::from(b'-'));
    }
    push_ascii(out, &digits);
    Ok(())
}

/// Decimal digits only, no sign or whitespace, at most `u16::MAX`.
fn parse_precision(param: OStr<'_>) -> Result<usize> {
    let mut precision: u16 = 0;
    for &unit in param.as_units() {
        let digit = u8::try_from(unit)
            .ok()
            .filter(u8::is_ascii_digit)
            .ok_or_else(|| invalid_param(param, "precision must be decimal digits"))?;
        precision = precision
            .checked_mul(10)
            .and_then(|p| p.checked_add(u16::from(digit - b'0')))
            .ok_or_else(|| invalid_param(param, "precision too large"))?;
    }
    Ok(usize::from(precision))
}

fn render_float(value: f64, param: OStr<'_>, out: &mut Vec<u16>) -> Result<()> {
    let text = if param.is_empty() {
        let rounded = value.round();
        // Avoid printing "-0" for values that round to zero
        let rounded = if rounded == 0.0 { 0.0 } else { rounded };
        format!("{rounded:.0}")
    } else {
        let precision = parse_precision(param)?;
        format!("{value:.precision$}")
    };
    push_ascii(out, &text);
    Ok(())
}

const PERCENT: u16 = b'%' as u16;

/// Renders as elapsed time using `%H %M %S %f %%` directives.
///
/// `%H` is total hours and may exceed 23; `%f` is milliseconds. The default
/// pattern is `%H:%M:%S`.
impl Render for Duration {
    fn render(&self, param: OStr<'_>, out: &mut Vec<u16>) -> Result<()> {
        const DEFAULT: [u16; 8] = [
            PERCENT,
            b'H' as u16,
            b':' as u16,
            PERCENT,
            b'M' as u16,
            b':' as u16,
            PERCENT,
            b'S' as u16,
        ];
        let pattern = if param.is_empty() {
            &DEFAULT[..]
        } else {
            param.as_units()
        };

        let total = self.as_secs();
        let mut units = pattern.iter().copied();
        while let Some(unit) = units.next() {
            if unit != PERCENT {
                out.push(unit);
                continue;
            }
            let directive = units.next().and_then(|u| u8::try_from(u).ok());
            let field = match directive {
                Some(b'H') => format!("{:02}", total / 3600),
                Some(b'M') => format!("{:02}", total / 60 % 60),
                Some(b'S') => format!("{:02}", total % 60),
                Some(b'f') => format!("{:03}", self.subsec_millis()),
                Some(b'%') => String::from("%"),
                _ => return Err(invalid_param(param, "unknown duration directive")),
            };
            push_ascii(out, &field);
        }
        Ok(())
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg<'_> {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for FormatArg<'_> {
            fn from(v: $t) -> Self {
                Self::UInt(v as u64)
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<f32> for FormatArg<'_> {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for FormatArg<'_> {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<char> for FormatArg<'_> {
    fn from(c: char) -> Self {
        Self::Char(c)
    }
}

impl<'a> From<&'a str> for FormatArg<'a> {
    fn from(s: &'a str) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a String> for FormatArg<'a> {
    fn from(s: &'a String) -> Self {
        Self::Str(s)
    }
}

impl<'a> From<&'a [u16]> for FormatArg<'a> {
    fn from(units: &'a [u16]) -> Self {
        Self::Utf16(units)
    }
}

impl<'a> From<&'a [u32]> for FormatArg<'a> {
    fn from(codepoints: &'a [u32]) -> Self {
        Self::Utf32(codepoints)
    }
}

impl<'a> From<OStr<'a>> for FormatArg<'a> {
    fn from(s: OStr<'a>) -> Self {
        Self::Utf16(s.as_units())
    }
}

impl<'a> From<&'a OString> for FormatArg<'a> {
    fn from(s: &'a OString) -> Self {
        Self::Utf16(s.as_units())
    }
}

impl<'a> From<&'a Duration> for FormatArg<'a> {
    fn from(d: &'a Duration) -> Self {
        Self::Custom(d)
    }
}
