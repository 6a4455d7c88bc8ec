use std::vec::Vec;

use rstest::rstest;

use super::*;

fn tokens(input: &[u8]) -> (Result<usize, ScanError>, Vec<(TokenKind, &[u8])>) {
    let mut out = Vec::new();
    let result = scan(input, &mut |t: Token<'_>| out.push((t.kind, &input[t.span.range()])));
    (result, out)
}

#[test]
fn scalar_root_returns_its_length() {
    let (result, toks) = tokens(b"  42  ");
    assert_eq!(result, Ok(4));
    assert_eq!(toks, [(TokenKind::Number, &b"42"[..])]);
}

#[test]
fn object_tokens_in_order() {
    let input = br#"{"a": [1, true], "b": null}"#;
    let (result, toks) = tokens(input);
    assert_eq!(result, Ok(input.len()));
    let kinds: Vec<_> = toks.iter().map(|(k, _)| *k).collect();
    assert_eq!(
        kinds,
        [
            TokenKind::ObjectOpen,
            TokenKind::Key,
            TokenKind::Colon,
            TokenKind::ArrayOpen,
            TokenKind::Number,
            TokenKind::Comma,
            TokenKind::True,
            TokenKind::ArrayClose,
            TokenKind::Comma,
            TokenKind::Key,
            TokenKind::Colon,
            TokenKind::Null,
            TokenKind::ObjectClose,
        ]
    );
    assert_eq!(toks[1].1, br#""a""#);
    assert_eq!(toks[9].1, br#""b""#);
}

#[test]
fn string_span_keeps_escapes() {
    let input = br#"["a\"b\\"]"#;
    let (result, toks) = tokens(input);
    assert_eq!(result, Ok(input.len()));
    assert_eq!(toks[1], (TokenKind::String, &br#""a\"b\\""#[..]));
}

#[test]
fn trailing_bytes_are_not_examined() {
    assert_eq!(validate(b"[1] garbage"), Ok(3));
    assert_eq!(validate(b"{}{}"), Ok(2));
    assert_eq!(validate(b"1x"), Ok(1));
}

#[test]
fn empty_containers() {
    assert_eq!(validate(b"[]"), Ok(2));
    assert_eq!(validate(b"{}"), Ok(2));
    assert_eq!(validate(b"[[],{}]"), Ok(7));
    assert_eq!(validate(b"{\"a\":{}}"), Ok(8));
}

#[rstest]
#[case::empty(b"", 0)]
#[case::whitespace_only(b" \n\t", 3)]
#[case::missing_value(br#"{"a":}"#, 5)]
#[case::missing_colon(br#"{"a" 1}"#, 5)]
#[case::mismatched_array_close(br#"{"a":1]"#, 6)]
#[case::mismatched_object_close(b"[1}", 2)]
#[case::trailing_comma_array(b"[1,]", 3)]
#[case::trailing_comma_object(br#"{"a":1,}"#, 7)]
#[case::unquoted_key(b"{a:1}", 1)]
#[case::single_quotes(b"['a']", 1)]
#[case::comment(b"/* c */ 1", 0)]
#[case::stray_close(b"]", 0)]
#[case::unterminated_array(b"[1, 2", 5)]
#[case::unterminated_string(br#"["abc"#, 5)]
#[case::bad_escape(br#""a\x""#, 2)]
#[case::unicode_escape(br#""\u0041""#, 1)]
#[case::nul_in_string(b"\"a\0b\"", 2)]
#[case::truncated_literal(b"tru", 0)]
#[case::misspelled_literal(b"nul1", 0)]
#[case::lone_minus(b"-", 0)]
#[case::missing_comma(b"[1 2]", 3)]
#[case::double_colon(br#"{"a"::1}"#, 5)]
fn rejects_malformed_input(#[case] input: &[u8], #[case] offset: usize) {
    assert_eq!(validate(input), Err(ScanError::InvalidInput { offset }));
}

#[test]
fn depth_limit_is_inclusive() {
    let mut ok = Vec::new();
    ok.extend(std::iter::repeat_n(b'[', 20));
    ok.extend(std::iter::repeat_n(b']', 20));
    assert_eq!(validate(&ok), Ok(40));

    let mut deep = Vec::new();
    deep.extend(std::iter::repeat_n(b'[', 21));
    deep.extend(std::iter::repeat_n(b']', 21));
    assert_eq!(
        validate(&deep),
        Err(ScanError::TooDeep {
            offset: 20,
            max_depth: 20
        })
    );
}

#[test]
fn depth_limit_counts_objects_too() {
    let input = br#"{"a":{"b":[1]}}"#;
    assert_eq!(validate_with(input, ScanOptions { max_depth: 3 }), Ok(input.len()));
    assert_eq!(
        validate_with(input, ScanOptions { max_depth: 2 }),
        Err(ScanError::TooDeep {
            offset: 10,
            max_depth: 2
        })
    );
}

#[test]
fn zero_depth_still_accepts_scalars() {
    let options = ScanOptions { max_depth: 0 };
    assert_eq!(validate_with(b"\"x\"", options), Ok(3));
    assert!(matches!(
        validate_with(b"[]", options),
        Err(ScanError::TooDeep { .. })
    ));
}

#[test]
fn numbers_take_longest_lexeme() {
    let (result, toks) = tokens(b"[-1.5e3,0]");
    assert_eq!(result, Ok(10));
    assert_eq!(toks[1], (TokenKind::Number, &b"-1.5e3"[..]));
    assert_eq!(toks[3], (TokenKind::Number, &b"0"[..]));

    // "1." leaves the dot behind, which is not a valid delimiter.
    assert_eq!(validate(b"[1.]"), Err(ScanError::InvalidInput { offset: 2 }));
}

#[test]
fn raw_control_bytes_other_than_nul_are_kept() {
    assert_eq!(validate(b"\"a\tb\""), Ok(5));
}

struct StopAfter {
    seen: usize,
    limit: usize,
}

impl EventSink for StopAfter {
    fn event(&mut self, _token: Token<'_>) {
        self.seen += 1;
    }

    fn should_stop(&self) -> bool {
        self.seen >= self.limit
    }
}

#[test]
fn sink_can_stop_the_scan() {
    let mut sink = StopAfter { seen: 0, limit: 3 };
    // `[1,` is three tokens; the unterminated tail is never reached.
    assert_eq!(scan(b"[1, oops", &mut sink), Ok(3));
    assert_eq!(sink.seen, 3);
}

#[test]
fn error_display_mentions_offset() {
    let err = validate(b"[1,]").unwrap_err();
    assert_eq!(err.offset(), 3);
    assert_eq!(std::format!("{err}"), "invalid input at offset 3");
}
