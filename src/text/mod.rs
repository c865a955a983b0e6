//! Codepoint-indexed text façade over UTF-16 storage.
//!
//! Key types:
//!
//! - [`OString`]: owning buffer with an O(1) codepoint length
//! - [`OStr`]: borrowed view sharing the same operations without copying
//!
//! Every index and count taken or returned by these types is measured in
//! codepoints. Surrogate pairs are never split by slicing operations.
//!
//! # Examples
//!
//! ```
//! use openstring::{CaseSensitivity, OString};
//!
//! let mut text = OString::from("我");
//! text += "😘😘ni";
//! assert_eq!(text.len(), 5);
//! assert_eq!(text.substring(2, usize::MAX), "😘ni");
//!
//! let parts = OString::from("a,b,,c");
//! let sep = OString::from(",");
//! assert_eq!(parts.split_non_empty(&sep).unwrap(), vec!["a", "b", "c"]);
//!
//! let n = text
//!     .replace_all(&OString::from("😘"), &OString::from("x"), CaseSensitivity::Sensitive)
//!     .unwrap();
//! assert_eq!(n, 2);
//! assert_eq!(text, "我xxni");
//! ```

mod buffer;
mod view;

pub use buffer::OString;
pub use view::OStr;
