//! Placeholder-based formatting into UTF-16.
//!
//! Templates use `{index[,alignment][:param]}` placeholders:
//!
//! - `index` selects an argument; when omitted, placeholders are numbered
//!   0, 1, 2, ... in order. A template must use one style or the other.
//! - `alignment` is a signed minimum width counted in codepoints. Negative
//!   pads on the right, non-negative pads on the left, with spaces. The
//!   magnitude is capped at [`MAX_ALIGNMENT`].
//! - `param` is handed to the argument's renderer untouched (radix for
//!   integers, precision for floats, `%H:%M:%S` directives for durations).
//!
//! `{{` and `}}` produce literal braces.
//!
//! # Examples
//!
//! ```
//! use openstring::ofmt;
//!
//! let s = ofmt!("The number is {1} and {0}.", 48.0, 49).unwrap();
//! assert_eq!(s, "The number is 49 and 48.");
//!
//! let s = ofmt!("[{0,-5}|{1,5}|{2:x}]", "ab", "我😘", 255).unwrap();
//! assert_eq!(s, "[ab   |   我😘|ff]");
//! ```

mod arg;
mod template;

pub use arg::{FormatArg, Render};
pub use template::{MAX_ALIGNMENT, Placeholder, Segment, parse_template};

use tracing::debug;

use crate::error::{Error, Result};
use crate::text::{OStr, OString};
use crate::unicode::codepoint_len;

const SPACE: u16 = b' ' as u16;

/// Render a UTF-16 template against `args`.
///
/// # Errors
///
/// Template syntax errors from [`parse_template`],
/// [`Error::ArgumentIndexOutOfRange`] when a placeholder names a missing
/// argument, and any error raised by an argument's renderer.
pub fn format(template: impl AsRef<[u16]>, args: &[FormatArg<'_>]) -> Result<OString> {
    let template = template.as_ref();
    let segments = parse_template(template).inspect_err(|err| {
        debug!(error = %err, template = %OStr::new(template), "rejected format template");
    })?;

    let mut out = Vec::with_capacity(template.len());
    for segment in segments {
        match segment {
            Segment::Literal(units) => out.extend_from_slice(units),
            Segment::Placeholder(p) => render_placeholder(&p, args, &mut out)?,
        }
    }
    Ok(OString::from_units(out))
}

/// [`format`] with a UTF-8 template.
pub fn format_str(template: &str, args: &[FormatArg<'_>]) -> Result<OString> {
    let template: Vec<u16> = template.encode_utf16().collect();
    format(&template, args)
}

fn render_placeholder(
    p: &Placeholder<'_>,
    args: &[FormatArg<'_>],
    out: &mut Vec<u16>,
) -> Result<()> {
    let arg = args.get(p.index).ok_or_else(|| {
        let err = Error::ArgumentIndexOutOfRange {
            index: p.index,
            count: args.len(),
        };
        debug!(error = %err, position = p.position, "format argument missing");
        err
    })?;

    let start = out.len();
    arg.render(OStr::new(p.param), out)?;

    let width = p.alignment.unsigned_abs();
    let rendered = codepoint_len(&out[start..]);
    if rendered < width {
        let fill = width - rendered;
        if p.alignment < 0 {
            out.resize(out.len() + fill, SPACE);
        } else {
            out.splice(start..start, std::iter::repeat_n(SPACE, fill));
        }
    }
    Ok(())
}

/// Build a `&[FormatArg]` from heterogeneous values.
///
/// ```
/// use openstring::{OString, ofmt_args};
///
/// let out = OString::from("{}-{}").format(ofmt_args!['a', 2u8]).unwrap();
/// assert_eq!(out, "a-2");
/// ```
#[macro_export]
macro_rules! ofmt_args {
    ($($arg:expr),* $(,)?) => {
        &[$($crate::format::FormatArg::from($arg)),*]
    };
}

/// Format a template with arguments, returning `Result<OString>`.
///
/// The template may be anything convertible into an [`OString`].
#[macro_export]
macro_rules! ofmt {
    ($template:expr $(, $arg:expr)* $(,)?) => {
        $crate::format::format(
            &$crate::text::OString::from($template),
            $crate::ofmt_args![$($arg),*],
        )
    };
}
