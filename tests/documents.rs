/*
** This file is a part of Xmlmap (schema-less XML to tree mapper)
** Copyright (C) 2025 The Xmlmap Authors
**
** Xmlmap is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use rstest::rstest;
use serde_json::json;

use xmlmap::BuildError;
use xmlmap::Value;
use xmlmap::parse_bytes;
use xmlmap::parse_str;

fn to_json(tree: &Value) -> serde_json::Value {
    serde_json::to_value(tree).unwrap()
}

#[rstest]
#[case::single_child("<a><b>hi</b></a>", json!({ "a": { "b": "hi" } }))]
#[case::repetition_promotes(
    "<a><b>1</b><b>2</b><b>3</b></a>",
    json!({ "a": { "b": ["1", "2", "3"] } })
)]
#[case::attributes_sibling_key(
    "<a><b x=\"1\">hi</b></a>",
    json!({ "a": { "b": "hi", "b$attrs": { "x": "1" } } })
)]
#[case::repeated_attributes(
    "<a><b x=\"1\"/><b x=\"2\"/></a>",
    json!({ "a": { "b$attrs": [{ "x": "1" }, { "x": "2" }] } })
)]
#[case::whitespace_only("<a>   </a>", json!({}))]
#[case::empty("<a></a>", json!({}))]
#[case::self_closing("<a/>", json!({}))]
#[case::cdata_in_order("<a>foo<![CDATA[BAR]]>baz</a>", json!({ "a": "fooBARbaz" }))]
#[case::cdata_keeps_whitespace(
    "<a>  foo  <![CDATA[ BAR ]]>  baz  </a>",
    json!({ "a": "foo BAR baz" })
)]
#[case::entities("<a t=\"&quot;q&quot;\">1 &lt; 2</a>", json!({ "a": "1 < 2", "a$attrs": { "t": "\"q\"" } }))]
#[case::attributes_on_repeated_text(
    "<a><b x=\"1\">one</b><b>two</b><b x=\"3\">three</b></a>",
    json!({ "a": { "b": ["one", "two", "three"], "b$attrs": [{ "x": "1" }, { "x": "3" }] } })
)]
#[case::nested_structure(
    "<r><p><q>1</q></p><p><q>2</q><q>3</q></p></r>",
    json!({ "r": { "p": [{ "q": "1" }, { "q": ["2", "3"] }] } })
)]
#[case::mixed_content_keeps_text_only(
    "<a><b>inner</b>outer</a>",
    json!({ "a": "outer" })
)]
#[case::prolog_and_comments(
    "<?xml version=\"1.0\"?>\n<!-- c -->\n<a>\n  <b>x</b>\n</a>\n",
    json!({ "a": { "b": "x" } })
)]
#[case::qualified_names(
    "<x:a xmlns:x=\"urn:x\"><x:b>hi</x:b></x:a>",
    json!({ "x:a": { "x:b": "hi" }, "x:a$attrs": { "xmlns:x": "urn:x" } })
)]
fn documents(#[case] xml: &str, #[case] expected: serde_json::Value) {
    let tree = parse_str(xml).unwrap();
    assert_eq!(to_json(&tree), expected);
}

#[rstest]
#[case::mismatched_tags("<a><b></a>")]
#[case::bad_attribute("<a x=1></a>")]
#[case::unknown_entity("<a>&bogus;</a>")]
#[case::two_roots("<a>x</a><b>y</b>")]
#[case::text_outside_root("<a>x</a> trailing")]
#[case::text_before_root("leading <a>x</a>")]
fn tokenizer_failures(#[case] xml: &str) {
    assert!(matches!(parse_str(xml), Err(BuildError::Tokenizer { .. })));
}

#[test]
fn truncated_document() {
    // either the tokenizer or the builder notices the missing end tag
    assert!(matches!(
        parse_str("<a><b>hi</b>"),
        Err(BuildError::UnclosedElements { depth: 1, .. }) | Err(BuildError::Tokenizer { .. })
    ));
    assert_eq!(parse_str(""), Err(BuildError::NoRootElement));
}

#[test]
fn invalid_utf8_cdata_block() {
    let mut xml = b"<a>ok<![CDATA[".to_vec();
    xml.extend_from_slice(&[0xff, 0xfe]);
    xml.extend_from_slice(b"]]></a>");
    let tree = parse_bytes(&xml).unwrap();
    assert_eq!(to_json(&tree), json!({ "a": "ok" }));
}

#[test]
fn repeated_runs_are_equal() {
    let xml = include_str!("fixtures/atom.xml");
    assert_eq!(parse_str(xml).unwrap(), parse_str(xml).unwrap());
}

#[test]
fn parse_reader_matches_parse_str() {
    let xml = include_str!("fixtures/atom.xml");
    let from_reader = xmlmap::parse_reader(std::io::BufReader::new(xml.as_bytes())).unwrap();
    assert_eq!(from_reader, parse_str(xml).unwrap());
}

#[test]
fn atom_feed_shape() {
    let tree = parse_str(include_str!("fixtures/atom.xml")).unwrap();
    let feed = tree.get("feed").unwrap();

    assert_eq!(feed.get("title").and_then(Value::as_str), Some("Example Weblog"));
    assert_eq!(feed.get("link$attrs").map(|v| v.one_or_many().len()), Some(2));
    assert!(feed.get("link").is_none());

    let entries = feed.get("entry").and_then(Value::as_sequence).unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries[1].get("title").and_then(Value::as_str),
        Some("Fish & Chips")
    );
    assert_eq!(
        entries[1].get("content").and_then(Value::as_str),
        Some("<p>Second.</p>")
    );
    assert_eq!(
        entries[0].lookup(&["author", "name"]).and_then(Value::as_str),
        Some("Example Author")
    );
    assert_eq!(
        entries[0]
            .lookup(&["content$attrs", "xml:lang"])
            .and_then(Value::as_str),
        Some("en")
    );
    let content = entries[0].get("content").and_then(Value::as_str).unwrap();
    assert!(content.starts_with('\n'));
    assert!(content.contains("&amp;"));
}

#[test]
fn atom_feed_entries() {
    let tree = parse_str(include_str!("fixtures/atom.xml")).unwrap();
    let entries = xmlmap::feed::entries(&tree);

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].title, "A Linked Story");
    assert_eq!(entries[0].link.as_deref(), Some("https://other.org/story"));
    assert_eq!(entries[1].title, "Fish & Chips");
    assert_eq!(
        entries[1].link.as_deref(),
        Some("https://example.com/2023/05/15/second")
    );
    assert!(entries[1].published > entries[0].published);
}
