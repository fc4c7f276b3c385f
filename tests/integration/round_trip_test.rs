//! Integration tests for XML -> JSON -> XML round trips
//!
//! These tests exercise the whole pipeline through the public `convert`
//! entry point and check the documented lossy behaviour.

use pretty_assertions::assert_eq;
use serde_json::Value;
use xmljsonconv::{convert, convert_with_config, ConversionConfig, Direction};

fn xml_to_json(xml: &str) -> String {
    convert(xml.as_bytes(), true).unwrap()
}

fn json_to_xml(json: &str) -> String {
    convert(json.as_bytes(), false).unwrap()
}

fn compact_xml(json: &str, config: &ConversionConfig) -> String {
    convert_with_config(json.as_bytes(), Direction::JsonToXml, &config.clone().with_pretty(false))
        .unwrap()
}

/// Parse both sides back into JSON values so comparisons ignore layout
fn same_structure(left: &str, right: &str) {
    let left: Value = serde_json::from_str(&xml_to_json(left)).unwrap();
    let right: Value = serde_json::from_str(&xml_to_json(right)).unwrap();
    assert_eq!(left, right);
}

#[test]
fn test_round_trip_attribute_free_document() {
    let original = r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE catalog SYSTEM "catalog.dtd">
<catalog>
    <title>Books</title>
    <book>
        <author>Someone</author>
        <price>12.50</price>
        <notes/>
    </book>
</catalog>"#;

    let json = xml_to_json(original);
    let xml = json_to_xml(&json);

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE catalog SYSTEM \"catalog.dtd\">\n"));
    same_structure(original, &xml);
}

#[test]
fn test_round_trip_compact_output() {
    let original = "<root><a><b>text</b></a><c></c></root>";
    let json = xml_to_json(original);
    assert_eq!(compact_xml(&json, &ConversionConfig::default()), "<root><a><b>text</b></a><c></c></root>");
}

#[test]
fn test_attributes_lost_on_reverse_trip() {
    let original = r#"<root><item id="1" kind="book">Title</item></root>"#;

    let json = xml_to_json(original);
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["xml_data"]["root"]["item"]["id"], "1");
    assert_eq!(value["xml_data"]["root"]["item"]["kind"], "book");

    let xml = compact_xml(&json, &ConversionConfig::default());
    assert_eq!(xml, "<root><item>Title</item></root>");
}

#[test]
fn test_attributes_kept_when_enabled() {
    let original = r#"<root><item id="1" kind="book">Title</item></root>"#;
    let json = xml_to_json(original);

    let config = ConversionConfig::default().with_emit_attributes(true);
    let xml = compact_xml(&json, &config);
    assert_eq!(xml, original);
}

#[test]
fn test_empty_element_round_trip() {
    let json = xml_to_json("<root><empty/></root>");
    let value: Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["xml_data"], serde_json::json!({"root": {"empty": {}}}));

    assert_eq!(
        compact_xml(&json, &ConversionConfig::default()),
        "<root><empty></empty></root>"
    );
}

#[test]
fn test_duplicate_siblings_lost_on_round_trip() {
    let json = xml_to_json("<root><item>A</item><item>B</item></root>");
    assert_eq!(
        compact_xml(&json, &ConversionConfig::default()),
        "<root><item>B</item></root>"
    );
}

#[test]
fn test_special_characters_round_trip() {
    let original = "<root><expr>a &lt; b &amp;&amp; c &gt; d</expr></root>";
    let json = xml_to_json(original);
    assert!(json.contains("a < b && c > d"));

    let xml = compact_xml(&json, &ConversionConfig::default());
    same_structure(original, &xml);
}

#[test]
fn test_unicode_round_trip() {
    let original = "<root><greeting>こんにちは 🌍</greeting></root>";
    let json = xml_to_json(original);
    let xml = compact_xml(&json, &ConversionConfig::default());
    assert_eq!(xml, original);
}

#[test]
fn test_json_edited_by_hand() {
    let json = r##"{
        "xml_declaration": "<?xml version=\"1.0\"?>",
        "xml_data": {"config": {"name": {"#text": "demo"}, "debug": {}}}
    }"##;
    assert_eq!(
        json_to_xml(json),
        "<?xml version=\"1.0\"?>\n\n<config>\n\t<name>demo</name>\n\t<debug></debug>\n</config>"
    );
}
