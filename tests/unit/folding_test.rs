//! Unit tests for folding XML into the intermediate representation

use pretty_assertions::assert_eq;
use xmljsonconv::xml::{fold_str, parse_tree, XmlElement};
use xmljsonconv::{ConversionConfig, ConversionError, Node, TEXT_KEY};

fn fold(xml: &str) -> xmljsonconv::XmlJsonDocument {
    fold_str(xml, &ConversionConfig::default()).unwrap()
}

#[test]
fn test_attributes_share_map_with_children() {
    let doc = fold(r#"<root id="1" lang="en"><child>x</child></root>"#);
    let root = doc.data["root"].as_element().unwrap();

    let keys: Vec<&str> = root.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["id", "lang", "child"]);
    assert_eq!(root["id"], Node::from("1"));
}

#[test]
fn test_child_overwrites_same_named_attribute() {
    let doc = fold(r#"<root name="attr"><name>child</name></root>"#);
    let root = doc.data["root"].as_element().unwrap();
    let name = root["name"].as_element().unwrap();
    assert_eq!(name[TEXT_KEY].as_text(), Some("child"));
}

#[test]
fn test_only_last_text_run_kept() {
    let doc = fold("<root>first<a/>second</root>");
    let root = doc.data["root"].as_element().unwrap();
    assert_eq!(root[TEXT_KEY].as_text(), Some("second"));
}

#[test]
fn test_siblings_stay_at_their_level() {
    let doc = fold("<root><a><b/></a><c><d>1</d></c><e/></root>");
    let root = doc.data["root"].as_element().unwrap();

    let keys: Vec<&str> = root.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["a", "c", "e"]);
    assert_eq!(root["a"].as_element().unwrap().len(), 1);
    assert_eq!(
        root["c"].as_element().unwrap()["d"].as_element().unwrap()[TEXT_KEY],
        Node::from("1")
    );
}

#[test]
fn test_comments_ignored() {
    let doc = fold("<!-- head --><root><!-- inner --><a/></root>");
    let root = doc.data["root"].as_element().unwrap();
    assert_eq!(root.len(), 1);
}

#[test]
fn test_doctype_with_internal_subset() {
    let doc = fold("<!DOCTYPE note [<!ELEMENT note (#PCDATA)>]><note>hi</note>");
    assert_eq!(doc.doctype, "<!DOCTYPE note [<!ELEMENT note (#PCDATA)>]>");
}

#[test]
fn test_parse_tree_before_collapse() {
    let parsed = parse_tree(
        "<root><item>A</item><item>B</item></root>".as_bytes(),
        &ConversionConfig::default(),
    )
    .unwrap();

    let expected = XmlElement::new("root")
        .with_child(XmlElement::new("item").with_text("A"))
        .with_child(XmlElement::new("item").with_text("B"));
    assert_eq!(parsed.roots, vec![expected]);
}

#[test]
fn test_deep_nesting_limited() {
    let depth = 20;
    let xml = format!("{}{}", "<n>".repeat(depth), "</n>".repeat(depth));

    let config = ConversionConfig::default().with_max_depth(Some(depth));
    assert!(fold_str(&xml, &config).is_ok());

    let config = ConversionConfig::default().with_max_depth(Some(depth - 1));
    assert!(matches!(
        fold_str(&xml, &config),
        Err(ConversionError::Conversion { .. })
    ));
}
