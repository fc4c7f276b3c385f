//! XML / JSON Converter
//!
//! Converts an XML document into a JSON object holding its declaration,
//! doctype and element data, and turns such an object back into XML.
//!
//! Element data is folded into nested maps keyed by local name: attributes,
//! the element text (under `#text`) and child elements share one map. The
//! folding is lossy. Same-named siblings collapse to the last one, ordering
//! between text and elements is lost, and attributes are only written back
//! to XML when [`ConversionConfig::emit_attributes`] is set.

pub mod cli;
pub mod conversion;
pub mod document;
pub mod error;
pub mod json;
pub mod parser;
pub mod xml;

// Re-export commonly used types
pub use conversion::{
    convert, convert_string, convert_with_config, ConversionConfig, ConversionEngine,
    ConversionOutput, Indent,
};
pub use document::{ElementMap, Node, XmlJsonDocument, TEXT_KEY};
pub use error::{ConversionError, ConversionErrorKind, ConversionResult, ParseError};
pub use parser::{Direction, InputSource};

/// Convert an XML string to JSON text with default configuration
pub fn xml_to_json(xml: &str) -> Result<String, ConversionError> {
    convert_string(xml, Direction::XmlToJson, &ConversionConfig::default())
}

/// Convert JSON text to an XML string with default configuration
pub fn json_to_xml(json: &str) -> Result<String, ConversionError> {
    convert_string(json, Direction::JsonToXml, &ConversionConfig::default())
}
