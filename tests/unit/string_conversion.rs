//! Unit tests for string conversion in both directions
//!
//! Tests cover:
//! - The documented JSON wire shape
//! - Prolog capture
//! - Error handling for malformed input

use pretty_assertions::assert_eq;
use serde_json::json;
use xmljsonconv::conversion::{convert_string, ConversionConfig};
use xmljsonconv::error::ConversionError;
use xmljsonconv::{json_to_xml, xml_to_json, Direction};

#[cfg(test)]
mod string_conversion_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn to_value(xml: &str) -> serde_json::Value {
        let json = xml_to_json(xml).unwrap();
        serde_json::from_str(&json).unwrap()
    }

    /// Test the example document from the wire format description
    #[test]
    fn test_reference_document() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE root SYSTEM "example.dtd"><root><element attribute="value">Text Content</element><emptyElement/></root>"#;

        assert_eq!(
            to_value(xml),
            json!({
                "xml_declaration": "<?xml version=\"1.0\" encoding=\"UTF-8\"?>",
                "xml_document_type_definition": "<!DOCTYPE root SYSTEM \"example.dtd\">",
                "xml_data": {
                    "root": {
                        "element": {"attribute": "value", "#text": "Text Content"},
                        "emptyElement": {}
                    }
                }
            })
        );
    }

    /// Test prolog capture
    #[test]
    fn test_prolog_capture() {
        let value = to_value(
            r#"<?xml version="1.0" encoding="UTF-8"?><!DOCTYPE root SYSTEM "x.dtd"><root/>"#,
        );
        assert_eq!(
            value["xml_declaration"],
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>"
        );
        assert_eq!(
            value["xml_document_type_definition"],
            "<!DOCTYPE root SYSTEM \"x.dtd\">"
        );
    }

    /// Test missing prolog yields empty strings
    #[test]
    fn test_missing_prolog() {
        let value = to_value("<root/>");
        assert_eq!(value["xml_declaration"], "");
        assert_eq!(value["xml_document_type_definition"], "");
        assert_eq!(value["xml_data"], json!({"root": {}}));
    }

    /// Test duplicate siblings collapse to the last one
    #[test]
    fn test_duplicate_sibling_collapse() {
        let value = to_value("<root><item>A</item><item>B</item></root>");
        assert_eq!(value["xml_data"]["root"]["item"], json!({"#text": "B"}));
    }

    /// Test whitespace-only content is dropped
    #[test]
    fn test_whitespace_only_text_dropped() {
        let value = to_value("<root><empty>   \n  </empty></root>");
        assert_eq!(value["xml_data"]["root"]["empty"], json!({}));
    }

    /// Test text content is trimmed
    #[test]
    fn test_text_trimmed() {
        let value = to_value("<root>\n    padded text\n</root>");
        assert_eq!(value["xml_data"]["root"]["#text"], "padded text");
    }

    /// Test HTML characters survive unescaped in JSON
    #[test]
    fn test_html_characters_unescaped() {
        let json = xml_to_json("<root><a>x &lt;b&gt; &amp; y</a></root>").unwrap();
        assert!(json.contains("\"x <b> & y\""));
    }

    /// Test JSON output is tab indented and ends with a newline
    #[test]
    fn test_json_layout() {
        let json = xml_to_json("<root/>").unwrap();
        assert!(json.starts_with("{\n\t\"xml_declaration\""));
        assert!(json.ends_with("}\n"));
    }

    /// Test malformed XML fails
    #[test]
    fn test_malformed_xml() {
        for input in ["<root>", "<root><a></root>", "", "just text", "<root attr=></root>"] {
            let result = xml_to_json(input);
            assert!(
                matches!(result, Err(ConversionError::XmlParse(_))),
                "expected XML parse error for {:?}, got {:?}",
                input,
                result
            );
        }
    }

    /// Test malformed JSON fails
    #[test]
    fn test_malformed_json() {
        for input in ["", "{", r#"{"xml_data": []}"#, r#"{"xml_data": {"root": 1}}"#] {
            let result = json_to_xml(input);
            assert!(
                matches!(result, Err(ConversionError::JsonDecode(_))),
                "expected JSON decode error for {:?}, got {:?}",
                input,
                result
            );
        }
    }

    /// Test values with no XML form inside elements are left out
    #[test]
    fn test_non_string_values_are_skipped() {
        let xml = json_to_xml(r##"{"xml_data": {"root": {"n": 1, "#text": "hi"}}}"##).unwrap();
        assert_eq!(xml, "<root>hi</root>");

        let xml = json_to_xml(
            r##"{"xml_declaration": null, "xml_data": {"root": {"tags": ["a", "b"], "ok": false, "x": null}}}"##,
        )
        .unwrap();
        assert_eq!(xml, "<root></root>");
    }

    /// Test null top-level fields read as empty
    #[test]
    fn test_null_document_fields() {
        let config = ConversionConfig::default();
        let result = convert_string(
            r#"{"xml_declaration": null, "xml_document_type_definition": null, "xml_data": null}"#,
            Direction::JsonToXml,
            &config,
        )
        .unwrap();
        assert_eq!(result, "");
    }

    /// Test a bare string where the root element belongs
    #[test]
    fn test_top_level_string_is_shape_error() {
        let result = json_to_xml(r#"{"xml_data": {"root": "text"}}"#);
        assert!(matches!(result, Err(ConversionError::Shape { .. })));
    }

    /// Test compact configuration
    #[test]
    fn test_compact_output() {
        let config = ConversionConfig::default().with_pretty(false);
        let json = convert_string("<root><a>1</a></root>", Direction::XmlToJson, &config).unwrap();
        assert_eq!(
            json,
            "{\"xml_declaration\":\"\",\"xml_document_type_definition\":\"\",\"xml_data\":{\"root\":{\"a\":{\"#text\":\"1\"}}}}\n"
        );
    }
}
