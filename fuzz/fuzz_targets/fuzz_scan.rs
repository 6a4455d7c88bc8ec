#![no_main]

use arbitrary::Arbitrary;
use jsonspan::{FindOptions, ScanOptions, Token, find_with, scan_with, validate_with};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    max_depth: u8,
    stop_at_match: bool,
    path: String,
    doc: Vec<u8>,
}

fn check(input: &Input) {
    let doc = &input.doc;
    let options = ScanOptions {
        max_depth: input.max_depth,
    };

    // Spans are in bounds, ordered, and never overlap.
    let mut end = 0;
    let result = scan_with(
        doc,
        &mut |t: Token<'_>| {
            assert!(t.span.offset >= end, "{t:?} overlaps the previous token");
            assert!(t.span.len > 0);
            end = t.span.end();
            assert!(end <= doc.len());
        },
        options,
    );
    match result {
        Ok(n) => assert_eq!(n, end),
        Err(e) => assert!(e.offset() <= doc.len()),
    }
    assert_eq!(validate_with(doc, options), result);

    // Anything serde_json takes, the scanner takes too, bar `\u` escapes.
    if !doc.windows(2).any(|w| w == b"\\u")
        && serde_json::from_slice::<serde_json::Value>(doc).is_ok()
    {
        let consumed = validate_with(doc, ScanOptions { max_depth: u8::MAX });
        assert!(consumed.is_ok(), "serde_json accepted {doc:?} but got {consumed:?}");
    }

    // A match is itself a complete value.
    let find = FindOptions {
        scan: options,
        stop_at_match: input.stop_at_match,
    };
    if let Some(m) = find_with(doc, &input.path, find) {
        let bytes = m.bytes(doc);
        assert_eq!(validate_with(bytes, options), Ok(bytes.len()));
    }
}

fuzz_target!(|input: Input| check(&input));
