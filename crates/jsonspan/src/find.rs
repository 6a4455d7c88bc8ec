//! Path resolution on top of the scanner.
//!
//! [`PathResolver`] is an [`EventSink`] that follows a [`JsonPath`] through
//! the token stream using two depth counters: `depth` is how many containers
//! are open right now, `matched` is how deep the path has been satisfied so
//! far. A pending `.name` segment can only match a key at `matched + 1`; a
//! pending `[N]` segment counts commas at `matched + 1` inside the array that
//! opened at `matched`.

use crate::{
    EventSink, FindOptions, JsonPath, Span, Token, TokenKind, UnescapeError, ValueKind,
    escape::{Unescape, unescape_into},
    numbers,
    path::Segment,
    scan_with,
};

/// The value a path resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Match {
    /// What kind of value was found.
    pub kind: ValueKind,
    /// Raw bytes of the value in the input, quotes and brackets included.
    pub span: Span,
}

impl Match {
    /// The matched bytes of `input`.
    ///
    /// # Panics
    ///
    /// If `input` is not the buffer this match was resolved against and is
    /// shorter than the span.
    #[must_use]
    pub fn bytes<'a>(&self, input: &'a [u8]) -> &'a [u8] {
        &input[self.span.range()]
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingIndex {
    seen: usize,
    target: usize,
    /// Path position past the `]` of the selector.
    next: usize,
}

/// Event sink that resolves one path expression.
///
/// Most callers want [`find`]; the resolver is public for callers that drive
/// [`scan`](crate::scan) themselves.
///
/// ```rust
/// use jsonspan::{JsonPath, PathResolver, ValueKind, scan};
///
/// let doc = br#"{"x":{"y":"hi"}}"#;
/// let mut resolver = PathResolver::new(JsonPath::new("$.x.y").unwrap());
/// scan(doc, &mut resolver).unwrap();
/// let m = resolver.into_match().unwrap();
/// assert_eq!(m.kind, ValueKind::String);
/// assert_eq!(m.bytes(doc), br#""hi""#);
/// ```
#[derive(Debug, Clone)]
pub struct PathResolver<'p> {
    path: JsonPath<'p>,
    /// Cursor into the path text; everything before it has matched.
    cursor: usize,
    depth: usize,
    matched: usize,
    index: Option<PendingIndex>,
    /// Offset of the container that may turn out to be the match.
    candidate: Option<usize>,
    found: Option<Match>,
    /// The matched container ended before the rest of the path was found.
    exhausted: bool,
    stop_at_match: bool,
}

impl<'p> PathResolver<'p> {
    /// Creates a resolver for `path`, positioned at the root.
    #[must_use]
    pub fn new(path: JsonPath<'p>) -> Self {
        Self {
            path,
            cursor: 1,
            depth: 0,
            matched: 0,
            index: None,
            candidate: None,
            found: None,
            exhausted: false,
            stop_at_match: false,
        }
    }

    /// Asks the scanner to halt as soon as the path resolves.
    #[must_use]
    pub fn stop_at_match(mut self, stop: bool) -> Self {
        self.stop_at_match = stop;
        self
    }

    /// The match found so far, if any.
    #[must_use]
    pub fn found(&self) -> Option<Match> {
        self.found
    }

    /// Consumes the resolver and returns its match.
    #[must_use]
    pub fn into_match(self) -> Option<Match> {
        self.found
    }

    fn at_end(&self) -> bool {
        self.cursor == self.path.len()
    }

    fn segment(&self) -> Option<(Segment<'p>, usize)> {
        self.path.segment_at(self.cursor)
    }

    fn advance(&mut self, next: usize) {
        self.cursor = next;
        self.matched += 1;
        self.index = None;
        trace!(
            depth = self.matched,
            rest = ?self.path.as_str().get(next..),
            "path segment matched"
        );
    }

    fn resolve(&mut self, kind: ValueKind, span: Span) {
        trace!(kind = ?kind, offset = span.offset, len = span.len, "path resolved");
        self.found = Some(Match { kind, span });
    }

    fn open(&mut self, token: &Token<'_>) {
        if token.kind == TokenKind::ArrayOpen && self.depth == self.matched {
            if let Some((Segment::Index(target), next)) = self.segment() {
                if target == 0 {
                    self.advance(next);
                } else {
                    self.index = Some(PendingIndex {
                        seen: 0,
                        target,
                        next,
                    });
                }
            }
        }
        if self.at_end() && self.depth == self.matched {
            self.candidate = Some(token.span.offset);
        }
        self.depth += 1;
    }

    fn close(&mut self, token: &Token<'_>) {
        self.depth = self.depth.saturating_sub(1);
        // An array matched by `[0]` on open can close before its first element.
        if self.depth < self.matched {
            self.exhausted = true;
            return;
        }
        if self.depth != self.matched {
            return;
        }
        if !self.at_end() {
            self.exhausted = true;
            return;
        }
        if let Some(start) = self.candidate {
            let kind = match token.kind {
                TokenKind::ArrayClose => ValueKind::Array,
                _ => ValueKind::Object,
            };
            self.resolve(kind, Span::new(start, token.span.end() - start));
        }
    }

    fn comma(&mut self) {
        if self.depth != self.matched + 1 {
            return;
        }
        if let Some(pending) = &mut self.index {
            pending.seen += 1;
            if pending.seen == pending.target {
                let next = pending.next;
                self.advance(next);
            }
        }
    }

    fn key(&mut self, token: &Token<'_>) {
        if self.depth != self.matched + 1 {
            return;
        }
        if let Some((Segment::Key(name), next)) = self.segment() {
            let decoded = Unescape::new(token.inner());
            if decoded.eq(name.iter().map(|&b| Ok::<u8, UnescapeError>(b))) {
                trace!(key = %bstr::BStr::new(name), offset = token.span.offset, "key matched");
                self.advance(next);
            }
        }
    }

    fn scalar(&mut self, kind: ValueKind, span: Span) {
        if self.depth != self.matched {
            return;
        }
        if self.at_end() {
            self.resolve(kind, span);
        } else {
            self.exhausted = true;
        }
    }
}

impl EventSink for PathResolver<'_> {
    fn event(&mut self, token: Token<'_>) {
        if self.found.is_some() || self.exhausted {
            return;
        }
        match token.kind {
            TokenKind::ArrayOpen | TokenKind::ObjectOpen => self.open(&token),
            TokenKind::ArrayClose | TokenKind::ObjectClose => self.close(&token),
            TokenKind::Comma => self.comma(),
            TokenKind::Key => self.key(&token),
            TokenKind::Colon => {}
            kind => {
                if let Some(value) = kind.scalar() {
                    self.scalar(value, token.span);
                }
            }
        }
    }

    fn should_stop(&self) -> bool {
        self.stop_at_match && self.found.is_some()
    }
}

/// Resolves `path` in `input` and returns the matched value's kind and span.
///
/// Returns `None` if the path is malformed, does not resolve, or the input is
/// not valid JSON. The first value along scan order that satisfies the path
/// wins. The scan still runs to the end of the top-level value, so a syntax
/// error after the match also yields `None`; see
/// [`FindOptions::stop_at_match`] to change that.
///
/// Once the value matched by a path prefix ends, later siblings are not
/// searched. With a duplicate key only the first occurrence is followed, so
/// `$.a.b` in `{"a":1,"a":{"b":2}}` is `None`.
#[must_use]
pub fn find(input: &[u8], path: &str) -> Option<Match> {
    find_with(input, path, FindOptions::default())
}

/// Like [`find`], with explicit options.
#[must_use]
pub fn find_with(input: &[u8], path: &str, options: FindOptions) -> Option<Match> {
    let path = JsonPath::new(path).ok()?;
    let mut resolver = PathResolver::new(path).stop_at_match(options.stop_at_match);
    scan_with(input, &mut resolver, options.scan).ok()?;
    resolver.into_match()
}

/// Resolves `path` to a number, or returns `default` when the path does not
/// lead to a number.
///
/// ```rust
/// assert_eq!(jsonspan::find_number(br#"{"t":-1.5e2}"#, "$.t", 0.0), -150.0);
/// assert_eq!(jsonspan::find_number(br#"{"t":"x"}"#, "$.t", 7.0), 7.0);
/// ```
#[must_use]
pub fn find_number(input: &[u8], path: &str, default: f64) -> f64 {
    find(input, path)
        .filter(|m| m.kind == ValueKind::Number)
        .and_then(|m| numbers::parse_f64(m.bytes(input)))
        .unwrap_or(default)
}

/// Resolves `path` to a boolean, or returns `default` when the path does not
/// lead to `true` or `false`.
#[must_use]
pub fn find_bool(input: &[u8], path: &str, default: bool) -> bool {
    match find(input, path).map(|m| m.kind) {
        Some(ValueKind::True) => true,
        Some(ValueKind::False) => false,
        _ => default,
    }
}

/// Resolves `path` to a string and decodes it into `out`.
///
/// Returns `Ok(None)` when the path does not lead to a string, otherwise the
/// decoded bytes (without quotes) as a prefix of `out`.
///
/// # Errors
///
/// [`UnescapeError::BufferTooSmall`] if the decoded string does not fit in
/// `out`.
pub fn find_string<'o>(
    input: &[u8],
    path: &str,
    out: &'o mut [u8],
) -> Result<Option<&'o [u8]>, UnescapeError> {
    let Some(m) = find(input, path).filter(|m| m.kind == ValueKind::String) else {
        return Ok(None);
    };
    let quoted = m.bytes(input);
    let len = unescape_into(&quoted[1..quoted.len() - 1], out)?;
    Ok(Some(&out[..len]))
}

/// Like [`find_string`], but also checks that the decoded bytes are UTF-8.
///
/// # Errors
///
/// As [`find_string`], plus [`UnescapeError::InvalidUtf8`].
pub fn find_str<'o>(
    input: &[u8],
    path: &str,
    out: &'o mut [u8],
) -> Result<Option<&'o str>, UnescapeError> {
    find_string(input, path, out)?
        .map(|bytes| core::str::from_utf8(bytes).map_err(|_| UnescapeError::InvalidUtf8))
        .transpose()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(br#"{"a":1,"b":[10,20,30]}"#, "$.b[1]", ValueKind::Number, "20")]
    #[case(br#"{"a":1,"b":[10,20,30]}"#, "$.b[0]", ValueKind::Number, "10")]
    #[case(br#"{"a":1,"b":[10,20,30]}"#, "$.b[2]", ValueKind::Number, "30")]
    #[case(br#"{"a":1,"b":[10,20,30]}"#, "$.b", ValueKind::Array, "[10,20,30]")]
    #[case(br#"{"a":1,"b":[10,20,30]}"#, "$", ValueKind::Object, r#"{"a":1,"b":[10,20,30]}"#)]
    #[case(br#"{"x":{"y":"hi"}}"#, "$.x.y", ValueKind::String, r#""hi""#)]
    #[case(br#"{"x":{"y":"hi"}}"#, "$.x", ValueKind::Object, r#"{"y":"hi"}"#)]
    #[case(b"[[1,2],[3,[4,5]]]", "$[1][1][0]", ValueKind::Number, "4")]
    #[case(b"[[1,2],[3,[4,5]]]", "$[0]", ValueKind::Array, "[1,2]")]
    #[case(b"[[1,2],[3,[4,5]]]", "$[1][1]", ValueKind::Array, "[4,5]")]
    #[case(b"[{},{\"k\":null}]", "$[1].k", ValueKind::Null, "null")]
    #[case(b"[{},{\"k\":null}]", "$[0]", ValueKind::Object, "{}")]
    #[case(br#"{"t":true,"f":false}"#, "$.f", ValueKind::False, "false")]
    #[case(b" 42 ", "$", ValueKind::Number, "42")]
    #[case(br#"{ "a" : [ 1 , { "b" : 2 } ] }"#, "$.a[1].b", ValueKind::Number, "2")]
    fn resolves(
        #[case] input: &[u8],
        #[case] path: &str,
        #[case] kind: ValueKind,
        #[case] text: &str,
    ) {
        let m = find(input, path).expect("path should resolve");
        assert_eq!(m.kind, kind);
        assert_eq!(m.bytes(input), text.as_bytes());
    }

    #[rstest]
    #[case(br#"{"a":1}"#, "$.missing")]
    #[case(b"[1,2,3]", "$[5]")]
    #[case(b"[1,2,3]", "$[3]")]
    #[case(b"[]", "$[0]")]
    #[case(br#"{"a":1}"#, "a")]
    #[case(br#"{"a":1}"#, "$.a.b")]
    #[case(br#"{"a":1}"#, "$[0]")]
    #[case(b"[1]", "$.a")]
    #[case(br#"{"a":}"#, "$.a")]
    #[case(br#"{"ab":1}"#, "$.a")]
    #[case(br#"{"a":1}"#, "$.ab")]
    #[case(br#"{"A":1}"#, "$.a")]
    fn misses(#[case] input: &[u8], #[case] path: &str) {
        assert_eq!(find(input, path), None);
    }

    #[test]
    fn nested_key_only_matches_at_the_right_depth() {
        let doc = br#"{"x":{"a":1},"a":2}"#;
        assert_eq!(find(doc, "$.a").map(|m| m.bytes(doc)), Some(&b"2"[..]));
    }

    #[test]
    fn does_not_continue_into_sibling_after_matched_container_ends() {
        let doc = br#"{"a":{"x":1},"c":{"b":5}}"#;
        assert_eq!(find(doc, "$.a.b"), None);

        let doc = br#"{"a":[1],"b":[1,2,3,4,5,6]}"#;
        assert_eq!(find(doc, "$.a[5]"), None);

        let doc = br#"{"a":1,"c":{"b":2}}"#;
        assert_eq!(find(doc, "$.a.b"), None);

        let doc = br#"{"a":[],"b":[{"c":1}]}"#;
        assert_eq!(find(doc, "$.a[0].c"), None);
        assert_eq!(find(doc, "$.b[0].c").map(|m| m.bytes(doc)), Some(&b"1"[..]));
    }

    #[test]
    fn duplicate_keys_follow_the_first_occurrence() {
        let doc = br#"{"a":1,"a":{"b":2}}"#;
        assert_eq!(find(doc, "$.a.b"), None);

        let doc = br#"{"a":{"c":1},"a":{"b":2}}"#;
        assert_eq!(find(doc, "$.a.b"), None);
        assert_eq!(find(doc, "$.a.c").map(|m| m.bytes(doc)), Some(&b"1"[..]));
    }

    #[test]
    fn first_match_wins() {
        let doc = br#"{"a":1,"a":2}"#;
        assert_eq!(find(doc, "$.a").map(|m| m.span), Some(Span::new(5, 1)));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn escaped_keys_are_decoded_before_comparison() {
        let doc = br#"{"a\/b":1,"q\"":2}"#;
        assert_eq!(find_number(doc, "$.a/b", 0.0), 1.0);
        assert_eq!(find_number(doc, "$.q\"", 0.0), 2.0);
    }

    #[test]
    fn syntax_error_after_match_hides_it_by_default() {
        let doc = br#"{"a":1,"b":}"#;
        assert_eq!(find(doc, "$.a"), None);

        let options = FindOptions {
            stop_at_match: true,
            ..Default::default()
        };
        let m = find_with(doc, "$.a", options).expect("early exit skips the error");
        assert_eq!(m.bytes(doc), b"1");
    }

    #[test]
    fn depth_limit_applies_to_find() {
        let doc = b"[[[1]]]";
        let options = FindOptions {
            scan: crate::ScanOptions { max_depth: 2 },
            ..Default::default()
        };
        assert_eq!(find_with(doc, "$[0]", options), None);
        assert!(find(doc, "$[0][0][0]").is_some());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn typed_accessors() {
        let doc = br#"{"n":-2.5,"t":true,"f":false,"s":"a\nb","z":null}"#;
        assert_eq!(find_number(doc, "$.n", 0.0), -2.5);
        assert_eq!(find_number(doc, "$.missing", 7.0), 7.0);
        assert_eq!(find_number(doc, "$.s", 7.0), 7.0);
        assert!(find_bool(doc, "$.t", false));
        assert!(!find_bool(doc, "$.f", true));
        assert!(find_bool(doc, "$.z", true));

        let mut out = [0u8; 8];
        assert_eq!(find_string(doc, "$.s", &mut out), Ok(Some(&b"a\nb"[..])));
        let mut out = [0u8; 8];
        assert_eq!(find_string(doc, "$.n", &mut out), Ok(None));
        let mut small = [0u8; 2];
        assert_eq!(
            find_string(doc, "$.s", &mut small),
            Err(UnescapeError::BufferTooSmall { capacity: 2 })
        );
    }

    #[test]
    fn find_str_checks_utf8() {
        let mut out = [0u8; 16];
        assert_eq!(
            find_str("{\"k\":\"żółw\"}".as_bytes(), "$.k", &mut out),
            Ok(Some("żółw"))
        );
        let mut out = [0u8; 16];
        assert_eq!(
            find_str(b"[\"\xff\"]", "$[0]", &mut out),
            Err(UnescapeError::InvalidUtf8)
        );
    }
}
