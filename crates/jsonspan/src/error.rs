use thiserror::Error;

/// Failure of a [`scan`](crate::scan) call.
///
/// Both variants abort the scan immediately; there is no recovery or resume.
/// Running off the end of the buffer in the middle of a value is reported as
/// [`ScanError::InvalidInput`], never as "need more data".
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanError {
    /// Malformed JSON: an unexpected byte, a mismatched bracket, an
    /// unterminated string or an invalid escape sequence.
    #[error("invalid input at offset {offset}")]
    InvalidInput {
        /// Byte offset where the problem was detected.
        offset: usize,
    },
    /// Nesting went deeper than [`ScanOptions::max_depth`](crate::ScanOptions).
    #[error("nesting deeper than {max_depth} at offset {offset}")]
    TooDeep {
        /// Byte offset of the bracket that exceeded the limit.
        offset: usize,
        /// The configured limit.
        max_depth: u8,
    },
}

impl ScanError {
    /// Byte offset at which the error was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        match *self {
            ScanError::InvalidInput { offset } | ScanError::TooDeep { offset, .. } => offset,
        }
    }
}

/// Rejection of a malformed path expression by [`JsonPath::new`](crate::JsonPath::new).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The path does not begin with `$`.
    #[error("path must start with '$'")]
    MissingRoot,
    /// A `.` is not followed by a member name.
    #[error("empty member name at offset {0}")]
    EmptyName(usize),
    /// An index selector is not `[` digits `]`.
    #[error("invalid array index at offset {0}")]
    InvalidIndex(usize),
    /// A segment starts with something other than `.` or `[`.
    #[error("unexpected character '{ch}' at offset {offset}")]
    UnexpectedChar {
        /// The offending character.
        ch: char,
        /// Offset into the path string.
        offset: usize,
    },
}

/// Failure to decode a string value into a caller-provided buffer.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnescapeError {
    /// The decoded string does not fit.
    #[error("output buffer of {capacity} bytes is too small")]
    BufferTooSmall {
        /// Capacity of the buffer that was offered.
        capacity: usize,
    },
    /// A backslash is followed by an unknown escape code, or ends the input.
    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),
    /// Only returned by [`find_str`](crate::find_str).
    #[error("decoded string is not valid UTF-8")]
    InvalidUtf8,
}
