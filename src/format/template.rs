//! Template scanner for `{index[,alignment][:param]}` placeholders.

use crate::error::{Error, Result};

const OPEN: u16 = b'{' as u16;
const CLOSE: u16 = b'}' as u16;
const COMMA: u16 = b',' as u16;
const COLON: u16 = b':' as u16;
const MINUS: u16 = b'-' as u16;
const PLUS: u16 = b'+' as u16;

/// Largest alignment magnitude a placeholder may request.
pub const MAX_ALIGNMENT: usize = u16::MAX as usize;

/// One parsed piece of a template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Text copied verbatim. Escaped braces arrive as a one-unit literal.
    Literal(&'t [u16]),
    Placeholder(Placeholder<'t>),
}

/// A parsed `{...}` placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placeholder<'t> {
    /// Zero-based argument index, explicit or assigned automatically.
    pub index: usize,
    /// Minimum field width; negative left-justifies.
    pub alignment: isize,
    /// Everything between `:` and `}`, empty when absent.
    pub param: &'t [u16],
    /// Storage offset of the opening `{`.
    pub position: usize,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Indexing {
    Unknown,
    Explicit,
    Automatic,
}

fn unit_char(unit: u16) -> char {
    char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

fn digit(unit: u16) -> Option<usize> {
    (u16::from(b'0')..=u16::from(b'9'))
        .contains(&unit)
        .then(|| usize::from(unit - u16::from(b'0')))
}

struct Scanner<'t> {
    template: &'t [u16],
    pos: usize,
    indexing: Indexing,
    next_auto: usize,
}

impl<'t> Scanner<'t> {
    fn peek(&self) -> Option<u16> {
        self.template.get(self.pos).copied()
    }

    fn digits(&mut self) -> Result<Option<usize>> {
        let start = self.pos;
        let mut value: usize = 0;
        while let Some(d) = self.peek().and_then(digit) {
            value = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(d))
                .ok_or_else(|| Error::MalformedPlaceholder {
                    position: self.pos,
                    found: unit_char(self.template[self.pos]),
                })?;
            self.pos += 1;
        }
        Ok((self.pos > start).then_some(value))
    }

    /// The unit at `pos` cannot continue the placeholder opened at `open`.
    fn unexpected(&self, open: usize) -> Error {
        match self.peek() {
            Some(unit) => Error::MalformedPlaceholder {
                position: self.pos,
                found: unit_char(unit),
            },
            None => Error::UnclosedPlaceholder { position: open },
        }
    }

    /// Parse a placeholder whose `{` sits at `open`; `pos` is just past it.
    fn placeholder(&mut self, open: usize) -> Result<Placeholder<'t>> {
        let explicit = self.digits()?;
        let mode = if explicit.is_some() {
            Indexing::Explicit
        } else {
            Indexing::Automatic
        };
        if self.indexing != Indexing::Unknown && self.indexing != mode {
            return Err(Error::MixedPlaceholderIndexing { position: open });
        }
        self.indexing = mode;
        let index = match explicit {
            Some(index) => index,
            None => {
                let index = self.next_auto;
                self.next_auto += 1;
                index
            }
        };

        let mut alignment: isize = 0;
        if self.peek() == Some(COMMA) {
            self.pos += 1;
            let negative = match self.peek() {
                Some(MINUS) => {
                    self.pos += 1;
                    true
                }
                Some(PLUS) => {
                    self.pos += 1;
                    false
                }
                _ => false,
            };
            let at = self.pos;
            let width = self.digits()?.ok_or_else(|| self.unexpected(open))?;
            let width = Some(width)
                .filter(|&w| w <= MAX_ALIGNMENT)
                .and_then(|w| isize::try_from(w).ok())
                .ok_or_else(|| Error::MalformedPlaceholder {
                    position: at,
                    found: unit_char(self.template[at]),
                })?;
            alignment = if negative { -width } else { width };
        }

        let mut param: &'t [u16] = &[];
        if self.peek() == Some(COLON) {
            self.pos += 1;
            let start = self.pos;
            let len = self.template[start..]
                .iter()
                .position(|&u| u == CLOSE)
                .ok_or(Error::UnclosedPlaceholder { position: open })?;
            param = &self.template[start..start + len];
            self.pos = start + len;
        }

        if self.peek() != Some(CLOSE) {
            return Err(self.unexpected(open));
        }
        self.pos += 1;
        Ok(Placeholder {
            index,
            alignment,
            param,
            position: open,
        })
    }
}

/// Split a UTF-16 template into literal runs and placeholders.
///
/// `{{` and `}}` produce a literal brace; a lone `}` is copied as-is.
/// Argument indices are not checked against any argument list here.
///
/// # Errors
///
/// Returns [`Error::UnclosedPlaceholder`] when the template ends inside a
/// placeholder, [`Error::MalformedPlaceholder`] for an unexpected code unit
/// inside one, and [`Error::MixedPlaceholderIndexing`] when `{}` and `{N}`
/// appear in the same template.
pub fn parse_template(template: &[u16]) -> Result<Vec<Segment<'_>>> {
    let mut segments = Vec::new();
    let mut scanner = Scanner {
        template,
        pos: 0,
        indexing: Indexing::Unknown,
        next_auto: 0,
    };
    let mut run_start = 0;

    while let Some(unit) = scanner.peek() {
        let at = scanner.pos;
        let escaped = template.get(at + 1) == Some(&unit);
        match unit {
            OPEN | CLOSE if escaped => {
                if run_start < at {
                    segments.push(Segment::Literal(&template[run_start..at]));
                }
                segments.push(Segment::Literal(&template[at..=at]));
                scanner.pos += 2;
                run_start = scanner.pos;
            }
            OPEN => {
                if run_start < at {
                    segments.push(Segment::Literal(&template[run_start..at]));
                }
                scanner.pos += 1;
                let placeholder = scanner.placeholder(at)?;
                segments.push(Segment::Placeholder(placeholder));
                run_start = scanner.pos;
            }
            _ => scanner.pos += 1,
        }
    }
    if run_start < template.len() {
        segments.push(Segment::Literal(&template[run_start..]));
    }
    Ok(segments)
}
