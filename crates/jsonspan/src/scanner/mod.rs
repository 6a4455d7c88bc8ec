//! Scanner: the single-pass tokenizing state machine.
//!
//! What it does
//! - Walks a byte slice once, skipping JSON whitespace and classifying every
//!   other byte run as a structural character or a complete value atom.
//! - Reports each token to an [`EventSink`] as a kind plus a span into the
//!   original input. Spans are never decoded.
//! - Stops after the first complete top-level value and returns the number
//!   of bytes consumed; trailing bytes are not examined.
//!
//! Invariants
//! - The open-container stack is a fixed inline array bounded by
//!   [`ScanOptions::max_depth`]; opening past the bound is an error.
//! - A closing bracket must match the innermost open container by tag.
//! - `]` in value position and `}` in key position are only accepted directly
//!   after the matching opener, so trailing commas are rejected.
//! - Running out of input before the top-level value completes is
//!   [`ScanError::InvalidInput`].

use bstr::ByteSlice;

use crate::{
    EventSink, NoopSink, ScanError, ScanOptions, Token, TokenKind, escape::unescape_code, numbers,
};

#[cfg(test)]
mod tests;

/// Scans the first JSON value in `input` with default options, reporting
/// every token to `sink`.
///
/// Returns the number of bytes consumed, including leading whitespace.
///
/// # Errors
///
/// [`ScanError::InvalidInput`] for malformed or truncated input,
/// [`ScanError::TooDeep`] when nesting exceeds the default limit of
/// [`DEFAULT_MAX_DEPTH`](crate::DEFAULT_MAX_DEPTH).
pub fn scan<S>(input: &[u8], sink: &mut S) -> Result<usize, ScanError>
where
    S: EventSink + ?Sized,
{
    scan_with(input, sink, ScanOptions::default())
}

/// Like [`scan`], with explicit options.
///
/// # Errors
///
/// See [`scan`]; the depth limit is taken from `options`.
pub fn scan_with<S>(input: &[u8], sink: &mut S, options: ScanOptions) -> Result<usize, ScanError>
where
    S: EventSink + ?Sized,
{
    trace!(len = input.len(), max_depth = options.max_depth, "scan");
    let result = Scanner::new(input, options).run(sink);
    trace!(result = ?result, "scan finished");
    result
}

/// Checks that `input` starts with a well-formed JSON value and returns the
/// number of bytes it occupies.
///
/// # Errors
///
/// See [`scan`].
pub fn validate(input: &[u8]) -> Result<usize, ScanError> {
    scan(input, &mut NoopSink)
}

/// Like [`validate`], with explicit options.
///
/// # Errors
///
/// See [`scan_with`].
pub fn validate_with(input: &[u8], options: ScanOptions) -> Result<usize, ScanError> {
    scan_with(input, &mut NoopSink, options)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Value,
    Key,
    Colon,
    CommaOrEnd,
}

/// Enough slots for any `max_depth`.
const STACK_SLOTS: usize = 255;

/// Open containers, innermost last.
struct DepthStack {
    kinds: [Container; STACK_SLOTS],
    len: usize,
    max: usize,
}

impl DepthStack {
    fn new(max_depth: u8) -> Self {
        Self {
            kinds: [Container::Array; STACK_SLOTS],
            len: 0,
            max: usize::from(max_depth),
        }
    }

    fn push(&mut self, kind: Container) -> bool {
        if self.len >= self.max {
            return false;
        }
        self.kinds[self.len] = kind;
        self.len += 1;
        true
    }

    fn pop(&mut self) -> Option<Container> {
        self.len = self.len.checked_sub(1)?;
        Some(self.kinds[self.len])
    }

    fn top(&self) -> Option<Container> {
        self.len.checked_sub(1).map(|i| self.kinds[i])
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }
}

struct Scanner<'src> {
    src: &'src [u8],
    pos: usize,
    expect: Expect,
    stack: DepthStack,
    max_depth: u8,
    /// The previous token opened a container.
    just_opened: bool,
}

impl<'src> Scanner<'src> {
    fn new(src: &'src [u8], options: ScanOptions) -> Self {
        Self {
            src,
            pos: 0,
            expect: Expect::Value,
            stack: DepthStack::new(options.max_depth),
            max_depth: options.max_depth,
            just_opened: false,
        }
    }

    fn run<S>(&mut self, sink: &mut S) -> Result<usize, ScanError>
    where
        S: EventSink + ?Sized,
    {
        while let Some(&c) = self.src.get(self.pos) {
            if matches!(c, b' ' | b'\t' | b'\n' | b'\r') {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            let kind = match self.expect {
                Expect::Value => self.value(c)?,
                Expect::Key => self.key(c)?,
                Expect::Colon => self.colon(c)?,
                Expect::CommaOrEnd => self.comma_or_end(c)?,
            };
            self.just_opened = matches!(kind, TokenKind::ArrayOpen | TokenKind::ObjectOpen);

            sink.event(Token::new(kind, self.src, start, self.pos - start));

            // Nothing is open after a scalar root or the root's closing bracket.
            if self.stack.is_empty() || sink.should_stop() {
                return Ok(self.pos);
            }
        }

        Err(ScanError::InvalidInput {
            offset: self.src.len(),
        })
    }

    fn value(&mut self, c: u8) -> Result<TokenKind, ScanError> {
        let kind = match c {
            b'{' => return self.open(Container::Object),
            b'[' => return self.open(Container::Array),
            b']' if self.just_opened => return self.close(Container::Array),
            b't' => self.literal(b"true", TokenKind::True)?,
            b'f' => self.literal(b"false", TokenKind::False)?,
            b'n' => self.literal(b"null", TokenKind::Null)?,
            b'-' | b'0'..=b'9' => {
                let len = numbers::lexeme_len(&self.src[self.pos..]).ok_or_else(|| self.invalid())?;
                self.pos += len;
                TokenKind::Number
            }
            b'"' => {
                self.string()?;
                TokenKind::String
            }
            _ => return Err(self.invalid()),
        };
        self.expect = Expect::CommaOrEnd;
        Ok(kind)
    }

    fn key(&mut self, c: u8) -> Result<TokenKind, ScanError> {
        match c {
            b'"' => {
                self.string()?;
                self.expect = Expect::Colon;
                Ok(TokenKind::Key)
            }
            b'}' if self.just_opened => self.close(Container::Object),
            _ => Err(self.invalid()),
        }
    }

    fn colon(&mut self, c: u8) -> Result<TokenKind, ScanError> {
        if c != b':' {
            return Err(self.invalid());
        }
        self.pos += 1;
        self.expect = Expect::Value;
        Ok(TokenKind::Colon)
    }

    fn comma_or_end(&mut self, c: u8) -> Result<TokenKind, ScanError> {
        match c {
            b',' => {
                self.expect = match self.stack.top() {
                    Some(Container::Object) => Expect::Key,
                    Some(Container::Array) => Expect::Value,
                    None => return Err(self.invalid()),
                };
                self.pos += 1;
                Ok(TokenKind::Comma)
            }
            b']' => self.close(Container::Array),
            b'}' => self.close(Container::Object),
            _ => Err(self.invalid()),
        }
    }

    fn open(&mut self, kind: Container) -> Result<TokenKind, ScanError> {
        if !self.stack.push(kind) {
            return Err(ScanError::TooDeep {
                offset: self.pos,
                max_depth: self.max_depth,
            });
        }
        self.pos += 1;
        Ok(match kind {
            Container::Array => {
                self.expect = Expect::Value;
                TokenKind::ArrayOpen
            }
            Container::Object => {
                self.expect = Expect::Key;
                TokenKind::ObjectOpen
            }
        })
    }

    fn close(&mut self, kind: Container) -> Result<TokenKind, ScanError> {
        if self.stack.top() != Some(kind) {
            return Err(self.invalid());
        }
        self.stack.pop();
        self.pos += 1;
        self.expect = Expect::CommaOrEnd;
        Ok(match kind {
            Container::Array => TokenKind::ArrayClose,
            Container::Object => TokenKind::ObjectClose,
        })
    }

    fn literal(&mut self, word: &[u8], kind: TokenKind) -> Result<TokenKind, ScanError> {
        if !self.src[self.pos..].starts_with(word) {
            return Err(self.invalid());
        }
        self.pos += word.len();
        Ok(kind)
    }

    /// Advances past a string literal starting at the opening quote.
    fn string(&mut self) -> Result<(), ScanError> {
        let body = self.pos + 1;
        let mut i = body;
        loop {
            let Some(found) = self.src[i..].find_byteset(b"\"\\\0") else {
                return Err(ScanError::InvalidInput {
                    offset: self.src.len(),
                });
            };
            i += found;
            match self.src[i] {
                b'"' => {
                    self.pos = i + 1;
                    return Ok(());
                }
                b'\\' => {
                    if self.src.get(i + 1).copied().and_then(unescape_code).is_none() {
                        return Err(ScanError::InvalidInput { offset: i });
                    }
                    i += 2;
                }
                _ => return Err(ScanError::InvalidInput { offset: i }),
            }
        }
    }

    fn invalid(&self) -> ScanError {
        ScanError::InvalidInput { offset: self.pos }
    }
}
