//! Snapshot tests that pin the exact token stream for representative inputs,
//! so changes to span boundaries or token classification show up in review.

use core::fmt::Write;
use std::string::String;

use bstr::BStr;

use crate::{Token, scan};

fn render(input: &[u8]) -> String {
    let mut out = String::new();
    let result = scan(input, &mut |t: Token<'_>| {
        writeln!(out, "{:?} {:?} {}", t.kind, t.span.range(), BStr::new(t.bytes())).unwrap();
    });
    writeln!(out, "=> {result:?}").unwrap();
    out
}

#[test]
fn snapshot_object_with_nested_array() {
    let json = br#"{"id": 1, "tags": ["a\"b", null]}"#;

    insta::assert_snapshot!(render(json), @r#"
    ObjectOpen 0..1 {
    Key 1..5 "id"
    Colon 5..6 :
    Number 7..8 1
    Comma 8..9 ,
    Key 10..16 "tags"
    Colon 16..17 :
    ArrayOpen 18..19 [
    String 19..25 "a\"b"
    Comma 25..26 ,
    Null 27..31 null
    ArrayClose 31..32 ]
    ObjectClose 32..33 }
    => Ok(33)
    "#);
}

#[test]
fn snapshot_events_before_error() {
    let json = br#"[true, {"k": -0.5e1}, ]"#;

    insta::assert_snapshot!(render(json), @r#"
    ArrayOpen 0..1 [
    True 1..5 true
    Comma 5..6 ,
    ObjectOpen 7..8 {
    Key 8..11 "k"
    Colon 11..12 :
    Number 13..19 -0.5e1
    ObjectClose 19..20 }
    Comma 20..21 ,
    => Err(InvalidInput { offset: 22 })
    "#);
}
