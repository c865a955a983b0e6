//! Error types for openstring.

use std::fmt;

/// Result type alias for openstring operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for openstring operations.
///
/// Codec and index mapping never fail; everything here is a caller contract
/// violation surfaced by the format engine or the text façade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A placeholder referenced an argument that was not supplied.
    ArgumentIndexOutOfRange { index: usize, count: usize },
    /// A `{` was opened but the template ended before the closing `}`.
    UnclosedPlaceholder { position: usize },
    /// An unexpected code unit appeared inside a placeholder.
    MalformedPlaceholder { position: usize, found: char },
    /// Explicit (`{0}`) and automatic (`{}`) indices were mixed in one template.
    MixedPlaceholderIndexing { position: usize },
    /// A renderer rejected the `:param` part of a placeholder.
    InvalidRenderParam { param: String, reason: &'static str },
    /// Search pattern or separator was empty where one is required.
    EmptyPattern,
    /// Codepoint index beyond the end of the text.
    IndexOutOfRange { index: usize, len: usize },
    /// Text could not be parsed as an integer.
    InvalidNumber(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArgumentIndexOutOfRange { index, count } => {
                write!(
                    f,
                    "argument index {index} out of range for {count} argument(s)"
                )
            }
            Self::UnclosedPlaceholder { position } => {
                write!(f, "placeholder opened at {position} is never closed")
            }
            Self::MalformedPlaceholder { position, found } => {
                write!(f, "unexpected {found:?} at {position} inside placeholder")
            }
            Self::MixedPlaceholderIndexing { position } => {
                write!(
                    f,
                    "placeholder at {position} mixes automatic and explicit indexing"
                )
            }
            Self::InvalidRenderParam { param, reason } => {
                write!(f, "invalid format parameter {param:?}: {reason}")
            }
            Self::EmptyPattern => write!(f, "pattern must not be empty"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of bounds for text of length {len}")
            }
            Self::InvalidNumber(s) => write!(f, "invalid number: {s:?}"),
        }
    }
}

impl std::error::Error for Error {}
