//! JSON text form of the intermediate representation

use std::io::Read;

use serde::de::DeserializeSeed;
use serde::Serialize;
use serde_json::ser::{CompactFormatter, PrettyFormatter, Serializer};
use serde_json::Deserializer;

use crate::conversion::config::ConversionConfig;
use crate::document::{DepthGuard, DocumentSeed, XmlJsonDocument};
use crate::error::{ConversionError, ConversionResult};

/// Serialize a document as JSON text followed by a newline.
///
/// serde_json never escapes `<`, `>` or `&`, so prolog strings and text
/// content come out verbatim.
pub fn to_json_string(
    document: &XmlJsonDocument,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    let mut buffer = Vec::new();

    if config.pretty {
        let indent = config.indent.as_bytes();
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| ConversionError::encode(e.to_string()))?;
    } else {
        let mut serializer = Serializer::with_formatter(&mut buffer, CompactFormatter);
        document
            .serialize(&mut serializer)
            .map_err(|e| ConversionError::encode(e.to_string()))?;
    }
    buffer.push(b'\n');

    String::from_utf8(buffer).map_err(|e| ConversionError::encode(e.to_string()))
}

/// Decode a document from a JSON byte stream
pub fn from_json_reader<R: Read>(
    reader: R,
    config: &ConversionConfig,
) -> ConversionResult<XmlJsonDocument> {
    decode(&mut Deserializer::from_reader(reader), config)
}

/// Decode a document from JSON text
pub fn from_json_str(json: &str, config: &ConversionConfig) -> ConversionResult<XmlJsonDocument> {
    decode(&mut Deserializer::from_str(json), config)
}

/// serde_json's own nesting limit is replaced by `max_depth`, counted in
/// elements rather than JSON brackets.
fn decode<'de, R: serde_json::de::Read<'de>>(
    deserializer: &mut Deserializer<R>,
    config: &ConversionConfig,
) -> ConversionResult<XmlJsonDocument> {
    deserializer.disable_recursion_limit();
    let guard = DepthGuard::new(config.max_depth);

    let result = DocumentSeed::new(&guard)
        .deserialize(&mut *deserializer)
        .and_then(|document| deserializer.end().map(|()| document));

    result.map_err(|error| match config.max_depth {
        Some(limit) if guard.exceeded() => ConversionError::depth_limit(limit),
        _ => decode_error(error),
    })
}

fn decode_error(error: serde_json::Error) -> ConversionError {
    if error.line() == 0 {
        return ConversionError::json_decode(error.to_string(), None);
    }

    // Display appends the position, which ParseError renders itself
    let message = error.to_string();
    let suffix = format!(" at line {} column {}", error.line(), error.column());
    let message = message.strip_suffix(&suffix).unwrap_or(&message).to_string();
    ConversionError::json_decode(message, Some((error.line(), error.column())))
}
