use core::{fmt, ops::Range};

use bstr::BStr;

/// Classification of a single token reported by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    /// An object member name, quotes included in the span.
    Key,
    /// A string value, quotes included in the span.
    String,
    /// A number lexeme.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `[`
    ArrayOpen,
    /// `]`
    ArrayClose,
    /// `{`
    ObjectOpen,
    /// `}`
    ObjectClose,
    /// `:`
    Colon,
    /// `,`
    Comma,
}

impl TokenKind {
    /// Returns the value kind for scalar tokens, `None` for keys and
    /// structural characters.
    #[must_use]
    pub fn scalar(self) -> Option<ValueKind> {
        match self {
            TokenKind::String => Some(ValueKind::String),
            TokenKind::Number => Some(ValueKind::Number),
            TokenKind::True => Some(ValueKind::True),
            TokenKind::False => Some(ValueKind::False),
            TokenKind::Null => Some(ValueKind::Null),
            _ => None,
        }
    }
}

/// The kind of a complete JSON value, as reported by a path match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ValueKind {
    /// A string literal.
    String,
    /// A number.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// An array, brackets included.
    Array,
    /// An object, braces included.
    Object,
}

/// A half-open byte range `[offset, offset + len)` into the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    /// Offset of the first byte.
    pub offset: usize,
    /// Number of bytes.
    pub len: usize,
}

impl Span {
    pub(crate) fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Offset one past the last byte.
    #[must_use]
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// The span as a `Range`, for slicing.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.offset..self.end()
    }
}

/// One token event: a kind plus the raw source bytes it covers.
///
/// Tokens borrow the input for the duration of a single
/// [`EventSink::event`](crate::EventSink::event) call. The span always covers
/// the undecoded source text; escapes inside strings are not resolved.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    /// The token's classification.
    pub kind: TokenKind,
    /// Where the token sits in the input.
    pub span: Span,
    src: &'src [u8],
}

impl<'src> Token<'src> {
    pub(crate) fn new(kind: TokenKind, src: &'src [u8], offset: usize, len: usize) -> Self {
        Self {
            kind,
            span: Span::new(offset, len),
            src,
        }
    }

    /// The raw bytes of this token.
    #[must_use]
    pub fn bytes(&self) -> &'src [u8] {
        &self.src[self.span.range()]
    }

    /// For keys and strings, the bytes between the quotes (still escaped).
    /// Other tokens return their bytes unchanged.
    #[must_use]
    pub fn inner(&self) -> &'src [u8] {
        let bytes = self.bytes();
        match self.kind {
            TokenKind::Key | TokenKind::String => &bytes[1..bytes.len() - 1],
            _ => bytes,
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("kind", &self.kind)
            .field("span", &self.span)
            .field("text", &BStr::new(self.bytes()))
            .finish()
    }
}
