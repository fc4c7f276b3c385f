//! Intermediate representation back to XML text

use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::conversion::config::ConversionConfig;
use crate::document::{ElementMap, Node, XmlJsonDocument, TEXT_KEY};
use crate::error::{ConversionError, ConversionResult};

/// Write the prolog lines and every top-level element to `out`
pub fn unfold_into<W: Write>(
    document: &XmlJsonDocument,
    mut out: W,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    // Both lines are written even when empty
    writeln!(out, "{}", document.declaration).map_err(encode_error)?;
    writeln!(out, "{}", document.doctype).map_err(encode_error)?;

    let mut writer = if config.pretty {
        let (ch, size) = config.indent.unit();
        Writer::new_with_indent(out, ch, size)
    } else {
        Writer::new(out)
    };

    let mut unfolder = Unfolder {
        writer: &mut writer,
        config,
    };

    for (name, node) in &document.data {
        let map = node.as_element().ok_or_else(|| {
            ConversionError::shape(
                format!("xml_data.{}", name),
                format!("expected an element object, found {}", node.kind()),
            )
        })?;
        unfolder.element(name, map, 1, &format!("xml_data.{}", name))?;
    }

    writer.get_mut().flush().map_err(encode_error)?;
    Ok(())
}

/// Render a document as XML text with surrounding whitespace trimmed
pub fn unfold(document: &XmlJsonDocument, config: &ConversionConfig) -> ConversionResult<String> {
    let mut buffer = Vec::new();
    unfold_into(document, &mut buffer, config)?;

    let text = String::from_utf8(buffer).map_err(encode_error)?;
    tracing::debug!(bytes = text.len(), "unfolded XML");
    Ok(text.trim().to_string())
}

struct Unfolder<'w, 'c, W: Write> {
    writer: &'w mut Writer<W>,
    config: &'c ConversionConfig,
}

impl<W: Write> Unfolder<'_, '_, W> {
    fn element(
        &mut self,
        name: &str,
        map: &ElementMap,
        depth: usize,
        path: &str,
    ) -> ConversionResult<()> {
        if self.config.exceeds_depth(depth) {
            return Err(ConversionError::depth_limit(depth - 1));
        }
        check_name(name, path)?;

        let mut start = BytesStart::new(name);
        if self.config.emit_attributes {
            for (key, node) in map {
                if let Node::Text(value) = node {
                    if key != TEXT_KEY {
                        check_name(key, path)?;
                        start.push_attribute((key.as_str(), value.as_str()));
                    }
                }
            }
        }
        self.write(Event::Start(start))?;

        let mut wrote_child = false;
        for (key, node) in map {
            match node {
                Node::Text(text) if key == TEXT_KEY => {
                    self.write(Event::Text(BytesText::new(text)))?;
                }
                Node::Text(_) => {
                    tracing::trace!(element = name, attribute = %key, "attribute not written as content");
                }
                Node::Element(child) => {
                    self.element(key, child, depth + 1, &format!("{}.{}", path, key))?;
                    wrote_child = true;
                }
            }
        }

        // Keeps the end tag on the start tag's line when pretty printing
        if !wrote_child {
            self.write(Event::Text(BytesText::new("")))?;
        }

        self.write(Event::End(BytesEnd::new(name)))
    }

    fn write(&mut self, event: Event<'_>) -> ConversionResult<()> {
        self.writer.write_event(event).map_err(encode_error)
    }
}

/// Reject names that cannot appear in a tag
fn check_name(name: &str, path: &str) -> ConversionResult<()> {
    let invalid = name.is_empty()
        || name
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '<' | '>' | '&' | '"' | '\'' | '/' | '='));
    if invalid {
        return Err(ConversionError::encode(format!(
            "'{}' at '{}' is not a valid XML name",
            name, path
        )));
    }
    Ok(())
}

fn encode_error(error: impl std::fmt::Display) -> ConversionError {
    ConversionError::encode(error.to_string())
}
