//! An allocation-free JSON scanner and path resolver.
//!
//! `jsonspan` never builds a tree. The [`scan`] function walks a byte slice
//! once and reports every token to an [`EventSink`] as a kind plus a byte span
//! into the original input. [`find`] sits on top of the scanner and answers
//! "where is the value at `$.users[2].name`?", and the typed accessors
//! ([`find_number`], [`find_bool`], [`find_string`]) decode that span.
//!
//! The [`print`] module goes the other way and writes integers and escaped
//! string literals through an [`OutputSink`], such as a [`FixedBuf`].
//!
//! ```rust
//! use jsonspan::{ValueKind, find, find_number};
//!
//! let doc = br#"{"a":1,"b":[10,20,30]}"#;
//! let m = find(doc, "$.b[1]").expect("path resolves");
//! assert_eq!(m.kind, ValueKind::Number);
//! assert_eq!(m.bytes(doc), b"20");
//! assert_eq!(find_number(doc, "$.missing", 7.0), 7.0);
//! ```

#![no_std]
#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod trace;

mod error;
mod escape;
mod find;
mod numbers;
mod options;
mod path;
pub mod print;
mod scanner;
mod sink;
mod token;

#[cfg(test)]
mod tests;

pub use error::{PathError, ScanError, UnescapeError};
pub use escape::{Unescape, escape_code, unescape_code, unescape_into};
pub use find::{
    Match, PathResolver, find, find_bool, find_number, find_str, find_string, find_with,
};
pub use options::{DEFAULT_MAX_DEPTH, FindOptions, ScanOptions};
pub use path::JsonPath;
pub use print::{FixedBuf, OutputSink, print_buf, print_int, print_str};
pub use scanner::{scan, scan_with, validate, validate_with};
pub use sink::{EventSink, NoopSink};
pub use token::{Span, Token, TokenKind, ValueKind};
