//! XML to intermediate representation
//!
//! Tokens from quick-xml are first built into an [`XmlElement`] tree, then
//! collapsed into the document's [`ElementMap`](crate::document::ElementMap).

use std::io::Read;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::conversion::config::ConversionConfig;
use crate::document::XmlJsonDocument;
use crate::error::{ConversionError, ConversionResult};
use crate::xml::tree::{collapse_roots, XmlElement};

/// Everything read from an XML stream before collapsing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedXml {
    pub declaration: Option<String>,
    pub doctype: Option<String>,
    pub roots: Vec<XmlElement>,
}

impl ParsedXml {
    /// Collapse into the intermediate representation
    pub fn into_document(self) -> XmlJsonDocument {
        XmlJsonDocument {
            declaration: self.declaration.unwrap_or_default(),
            doctype: self.doctype.unwrap_or_default(),
            data: collapse_roots(self.roots),
        }
    }
}

/// Per-call accumulator for one pass over the token stream
#[derive(Debug)]
struct Folder<'c> {
    config: &'c ConversionConfig,
    parsed: ParsedXml,
    open: Vec<XmlElement>,
}

impl<'c> Folder<'c> {
    fn new(config: &'c ConversionConfig) -> Self {
        Self {
            config,
            parsed: ParsedXml::default(),
            open: Vec::new(),
        }
    }

    fn on_instruction(&mut self, target: &str, text: &str) {
        if self.parsed.declaration.is_some() {
            tracing::debug!(target_name = target, "ignoring processing instruction after the first");
            return;
        }
        self.parsed.declaration = Some(format!("<?{} {}?>", target, text));
    }

    /// `literal` is the raw `<!DOCTYPE ...>` markup as it appeared in the input
    fn on_doctype(&mut self, literal: &str) {
        if self.parsed.doctype.is_some() {
            tracing::debug!("ignoring repeated DOCTYPE");
            return;
        }
        let body = literal.strip_suffix('>').unwrap_or(literal).trim_end();
        self.parsed.doctype = Some(format!("{}>", body));
    }

    fn on_start(&mut self, element: XmlElement, position: u64) -> ConversionResult<()> {
        let depth = self.open.len() + 1;
        if self.config.exceeds_depth(depth) {
            tracing::warn!(depth, position, "element nesting too deep");
            return Err(ConversionError::depth_limit(depth - 1));
        }
        self.open.push(element);
        Ok(())
    }

    fn on_end(&mut self, position: u64) -> ConversionResult<()> {
        let element = self.open.pop().ok_or_else(|| {
            ConversionError::xml_parse(
                "end tag without a matching start tag".to_string(),
                Some(position),
            )
        })?;

        match self.open.last_mut() {
            Some(parent) => parent.children.push(element),
            None => self.parsed.roots.push(element),
        }
        Ok(())
    }

    fn on_text(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return;
        }
        match self.open.last_mut() {
            Some(element) => element.text.push(trimmed.to_string()),
            None => tracing::debug!("ignoring text outside the root element"),
        }
    }

    fn finish(self, position: u64) -> ConversionResult<ParsedXml> {
        if let Some(element) = self.open.last() {
            return Err(ConversionError::xml_parse(
                format!("unexpected end of input, <{}> is not closed", element.name),
                Some(position),
            ));
        }
        if self.parsed.roots.is_empty() {
            return Err(ConversionError::xml_parse(
                "document has no root element".to_string(),
                Some(position),
            ));
        }
        Ok(self.parsed)
    }
}

/// Read the whole token stream into a [`ParsedXml`]
pub fn parse_tree(input: &[u8], config: &ConversionConfig) -> ConversionResult<ParsedXml> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().expand_empty_elements = true;

    let mut folder = Folder::new(config);
    let mut buf = Vec::new();

    loop {
        let event_start = reader.buffer_position() as usize;
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(e, reader.error_position() as u64))?;
        let position = reader.buffer_position() as u64;

        match event {
            Event::Decl(decl) => {
                let raw = utf8(&decl, position)?;
                let (target, text) = split_instruction(raw);
                folder.on_instruction(target, text);
            }
            Event::PI(pi) => {
                let target = utf8(pi.target(), position)?;
                let text = utf8(pi.content(), position)?;
                folder.on_instruction(target, text.trim_start());
            }
            Event::DocType(_) => {
                // The event text drops the keyword and its separator, so
                // take the markup from the input itself
                let raw = utf8(&input[event_start..position as usize], position)?;
                let markup = raw.find('!').map_or(raw, |index| &raw[index..]);
                folder.on_doctype(&format!("<{}", markup));
            }
            Event::Start(start) => {
                let element = read_element(&start, position)?;
                folder.on_start(element, position)?;
            }
            Event::Empty(start) => {
                let element = read_element(&start, position)?;
                folder.on_start(element, position)?;
                folder.on_end(position)?;
            }
            Event::End(_) => folder.on_end(position)?,
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| xml_error(e, position))?;
                folder.on_text(&text);
            }
            Event::CData(cdata) => {
                let text = utf8(&cdata, position)?;
                folder.on_text(text);
            }
            Event::Comment(_) => {}
            Event::Eof => break,
        }
        buf.clear();
    }

    let position = reader.buffer_position() as u64;
    folder.finish(position)
}

/// Fold an XML byte stream into the intermediate representation
pub fn fold_reader<R: Read>(
    mut input: R,
    config: &ConversionConfig,
) -> ConversionResult<XmlJsonDocument> {
    let mut bytes = Vec::new();
    input.read_to_end(&mut bytes)?;
    fold_bytes(&bytes, config)
}

/// Fold an in-memory XML document into the intermediate representation
pub fn fold_bytes(input: &[u8], config: &ConversionConfig) -> ConversionResult<XmlJsonDocument> {
    let parsed = parse_tree(input, config)?;
    tracing::debug!(
        roots = parsed.roots.len(),
        has_declaration = parsed.declaration.is_some(),
        has_doctype = parsed.doctype.is_some(),
        "parsed XML"
    );
    Ok(parsed.into_document())
}

/// Fold an XML string into the intermediate representation
pub fn fold_str(xml: &str, config: &ConversionConfig) -> ConversionResult<XmlJsonDocument> {
    fold_bytes(xml.as_bytes(), config)
}

fn read_element(start: &BytesStart<'_>, position: u64) -> ConversionResult<XmlElement> {
    let name = utf8(start.local_name().into_inner(), position)?;
    let mut element = XmlElement::new(name);

    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| xml_error(e, position))?;
        let key = utf8(attribute.key.local_name().into_inner(), position)?.to_string();
        let value = attribute
            .unescape_value()
            .map_err(|e| xml_error(e, position))?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

/// Split `xml version="1.0"` into its target and instruction text
fn split_instruction(raw: &str) -> (&str, &str) {
    let raw = raw.trim();
    match raw.find(char::is_whitespace) {
        Some(index) => (&raw[..index], raw[index..].trim_start()),
        None => (raw, ""),
    }
}

fn utf8(bytes: &[u8], position: u64) -> ConversionResult<&str> {
    std::str::from_utf8(bytes).map_err(|e| xml_error(e, position))
}

fn xml_error(error: impl std::fmt::Display, position: u64) -> ConversionError {
    ConversionError::xml_parse(error.to_string(), Some(position))
}
