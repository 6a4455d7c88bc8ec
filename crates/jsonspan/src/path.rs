use crate::PathError;

/// A validated path expression such as `$.users[2].name`.
///
/// The grammar is `$` followed by any number of `.name` and `[index]`
/// segments. Names are matched literally and case-sensitively against
/// decoded object keys; a name runs until the next `.` or `[`. Indices are
/// zero-based decimal integers.
///
/// The path is kept as text and walked with a cursor during resolution; it is
/// never split into an allocated list of segments.
///
/// ```rust
/// use jsonspan::{JsonPath, PathError};
///
/// assert!(JsonPath::new("$.users[2].name").is_ok());
/// assert_eq!(JsonPath::new("users"), Err(PathError::MissingRoot));
/// assert_eq!(JsonPath::new("$[x]"), Err(PathError::InvalidIndex(1)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonPath<'p>(&'p str);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'p> {
    Key(&'p [u8]),
    Index(usize),
}

impl<'p> JsonPath<'p> {
    /// Validates `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`PathError`] describing the first malformed segment.
    pub fn new(path: &'p str) -> Result<Self, PathError> {
        let bytes = path.as_bytes();
        if bytes.first() != Some(&b'$') {
            return Err(PathError::MissingRoot);
        }

        let mut pos = 1;
        while pos < bytes.len() {
            pos = match bytes[pos] {
                b'.' => {
                    let end = name_end(bytes, pos + 1);
                    if end == pos + 1 {
                        return Err(PathError::EmptyName(pos));
                    }
                    end
                }
                b'[' => index_end(bytes, pos)
                    .map(|(_, end)| end)
                    .ok_or(PathError::InvalidIndex(pos))?,
                _ => {
                    let ch = path[pos..].chars().next().unwrap_or_default();
                    return Err(PathError::UnexpectedChar { ch, offset: pos });
                }
            };
        }

        Ok(Self(path))
    }

    /// The path text.
    #[must_use]
    pub fn as_str(&self) -> &'p str {
        self.0
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    /// The segment starting at byte `pos`, and the position just past it.
    pub(crate) fn segment_at(&self, pos: usize) -> Option<(Segment<'p>, usize)> {
        let bytes = self.0.as_bytes();
        match bytes.get(pos)? {
            b'.' => {
                let end = name_end(bytes, pos + 1);
                Some((Segment::Key(&bytes[pos + 1..end]), end))
            }
            b'[' => index_end(bytes, pos).map(|(index, end)| (Segment::Index(index), end)),
            _ => None,
        }
    }
}

fn name_end(bytes: &[u8], from: usize) -> usize {
    bytes[from..]
        .iter()
        .position(|b| matches!(b, b'.' | b'['))
        .map_or(bytes.len(), |n| from + n)
}

/// Parses `[digits]` at `open`, returning the index and the position past `]`.
fn index_end(bytes: &[u8], open: usize) -> Option<(usize, usize)> {
    let digits = bytes[open + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
    let close = open + 1 + digits;
    if digits == 0 || bytes.get(close) != Some(&b']') {
        return None;
    }
    let index = core::str::from_utf8(&bytes[open + 1..close]).ok()?.parse().ok()?;
    Some((index, close + 1))
}
