//! Compact JSON emission through an [`OutputSink`].
//!
//! Every emitter returns the total number of bytes the sink accepted. Sinks
//! may accept fewer bytes than offered (a full [`FixedBuf`] does), and that is
//! not an error: compare the returned count with what you meant to write to
//! detect truncation.
//!
//! ```rust
//! use jsonspan::{FixedBuf, print_int, print_str};
//!
//! let mut storage = [0u8; 32];
//! let mut buf = FixedBuf::new(&mut storage);
//! print_int(-1024, &mut buf);
//! print_str(b" a\"b", &mut buf);
//! assert_eq!(buf.as_bytes(), br#"-1024" a\"b""#);
//! ```

use crate::escape::escape_code;

/// Destination for printed bytes.
pub trait OutputSink {
    /// Offers `bytes` and returns how many of them were accepted.
    fn write(&mut self, bytes: &[u8]) -> usize;
}

impl<F> OutputSink for F
where
    F: FnMut(&[u8]) -> usize,
{
    fn write(&mut self, bytes: &[u8]) -> usize {
        self(bytes)
    }
}

#[cfg(feature = "alloc")]
impl OutputSink for alloc::vec::Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> usize {
        self.extend_from_slice(bytes);
        bytes.len()
    }
}

/// A sink over a caller-provided byte buffer that silently truncates.
#[derive(Debug)]
pub struct FixedBuf<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> FixedBuf<'a> {
    /// Wraps `buf`; its length is the capacity.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Total capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bytes still available.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// The bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Forgets everything written so far.
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl OutputSink for FixedBuf<'_> {
    fn write(&mut self, bytes: &[u8]) -> usize {
        let n = bytes.len().min(self.remaining());
        self.buf[self.len..self.len + n].copy_from_slice(&bytes[..n]);
        self.len += n;
        n
    }
}

/// Writes `bytes` unchanged.
pub fn print_buf<O: OutputSink + ?Sized>(bytes: &[u8], out: &mut O) -> usize {
    out.write(bytes)
}

/// Writes `n` in decimal, sign first.
pub fn print_int<O: OutputSink + ?Sized>(n: i64, out: &mut O) -> usize {
    let sign = if n < 0 { out.write(b"-") } else { 0 };
    sign + print_digits(n.unsigned_abs(), out)
}

fn print_digits<O: OutputSink + ?Sized>(n: u64, out: &mut O) -> usize {
    let head = if n >= 10 { print_digits(n / 10, out) } else { 0 };
    // `n % 10` is a single digit.
    #[allow(clippy::cast_possible_truncation)]
    let digit = b'0' + (n % 10) as u8;
    head + out.write(&[digit])
}

/// Writes `bytes` as a quoted JSON string literal.
///
/// Bytes with a short escape (`\b \f \n \r \t \\ \" \/`) are written as that
/// escape; everything else is copied verbatim.
pub fn print_str<O: OutputSink + ?Sized>(bytes: &[u8], out: &mut O) -> usize {
    let mut n = out.write(b"\"");
    let mut plain = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if let Some(code) = escape_code(b) {
            n += out.write(&bytes[plain..i]);
            n += out.write(&[b'\\', code]);
            plain = i + 1;
        }
    }
    n += out.write(&bytes[plain..]);
    n + out.write(b"\"")
}
