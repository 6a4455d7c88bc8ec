//! The two-character escape sequences of JSON strings.
//!
//! Only the eight short escapes are recognized: `\b \f \n \r \t \\ \" \/`.
//! `\uXXXX` sequences are not decoded and count as invalid escapes.

use crate::UnescapeError;

const RAW: &[u8; 8] = b"\x08\x0c\n\r\t\\\"/";
const CODE: &[u8; 8] = b"bfnrt\\\"/";

/// Returns the escape letter for a raw byte that must be escaped, e.g.
/// `b'\n'` → `b'n'`. Returns `None` for bytes that are written verbatim.
#[must_use]
pub fn escape_code(raw: u8) -> Option<u8> {
    RAW.iter().position(|&c| c == raw).map(|i| CODE[i])
}

/// Returns the raw byte for an escape letter, e.g. `b'n'` → `b'\n'`.
/// Returns `None` for letters that are not valid after a backslash.
#[must_use]
pub fn unescape_code(code: u8) -> Option<u8> {
    CODE.iter().position(|&c| c == code).map(|i| RAW[i])
}

/// Iterator over the decoded bytes of an escaped string body.
///
/// Yields an error for the first invalid escape sequence and then stops.
///
/// ```rust
/// use jsonspan::Unescape;
///
/// let decoded: Result<Vec<u8>, _> = Unescape::new(br"a\nb").collect();
/// assert_eq!(decoded.unwrap(), b"a\nb");
/// ```
#[derive(Debug, Clone)]
pub struct Unescape<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Unescape<'a> {
    /// Decodes `bytes`, the body of a string literal without its quotes.
    #[must_use]
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }
}

impl Iterator for Unescape<'_> {
    type Item = Result<u8, UnescapeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let &b = self.bytes.get(self.pos)?;
        if b != b'\\' {
            self.pos += 1;
            return Some(Ok(b));
        }
        let at = self.pos;
        match self.bytes.get(at + 1).copied().and_then(unescape_code) {
            Some(raw) => {
                self.pos += 2;
                Some(Ok(raw))
            }
            None => {
                self.pos = self.bytes.len();
                Some(Err(UnescapeError::InvalidEscape(at)))
            }
        }
    }
}

/// Decodes an escaped string body into `out` and returns the decoded length.
///
/// # Errors
///
/// [`UnescapeError::BufferTooSmall`] if the decoded bytes do not fit in
/// `out`, [`UnescapeError::InvalidEscape`] for an unknown or dangling escape.
pub fn unescape_into(src: &[u8], out: &mut [u8]) -> Result<usize, UnescapeError> {
    let capacity = out.len();
    let mut len = 0;
    for byte in Unescape::new(src) {
        let byte = byte?;
        let slot = out
            .get_mut(len)
            .ok_or(UnescapeError::BufferTooSmall { capacity })?;
        *slot = byte;
        len += 1;
    }
    Ok(len)
}
