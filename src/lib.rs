//! `openstring` - codepoint-indexed UTF-16 text
//!
//! Text is stored as UTF-16 code units while every public index and count is
//! measured in codepoints. The crate is layered:
//!
//! - [`unicode`]: codec, index mapping, substring search and display width
//!   as pure functions over slices
//! - [`format`]: `{index[,alignment][:param]}` template formatting
//! - [`text`]: the [`OString`] / [`OStr`] façade built on the above
//! - [`log`]: an explicit logger object that renders through the formatter
//!
//! # Example
//!
//! ```
//! use openstring::{CaseSensitivity, OString, ofmt};
//!
//! let s = OString::from("我😘😘ni");
//! assert_eq!(s.len(), 5);
//! assert_eq!(s.storage_len(), 7);
//! assert_eq!(s.substring(2, usize::MAX), "😘ni");
//! assert_eq!(s.index_of(&OString::from("N"), CaseSensitivity::Insensitive), Some(3));
//!
//! let msg = ofmt!("{0} has {1,3} codepoints", &s, s.len()).unwrap();
//! assert_eq!(msg, "我😘😘ni has   5 codepoints");
//! ```

// Crate-level lint configuration
#![forbid(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Code units are narrowed deliberately
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::cast_possible_wrap)] // Alignment widths fit in isize
#![allow(clippy::module_name_repetitions)] // Allow format::FormatArg etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::len_without_is_empty)] // is_empty lives next to len
#![allow(clippy::should_implement_trait)] // from_* naming is intentional
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod error;
pub mod format;
pub mod log;
pub mod text;
pub mod unicode;

// Re-export core types at crate root
pub use error::{Error, Result};
pub use format::{FormatArg, Render, format, format_str, parse_template};
pub use log::{LogLevel, LogRecord, Logger};
pub use text::{OStr, OString};
pub use unicode::{CaseSensitivity, SearchOptions, SearchStrategy, WidthMethod};
