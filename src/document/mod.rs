//! Intermediate representation shared by both conversion directions
//!
//! An XML document is held as its prolog strings plus a map of the root
//! element's local name to an [`ElementMap`]. Attributes, the element's text
//! (under [`TEXT_KEY`]) and child elements all live in the same map.

use indexmap::IndexMap;
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::fmt;

/// Reserved key holding an element's trimmed text content
pub const TEXT_KEY: &str = "#text";

/// Attributes, text and children of one element, in insertion order
pub type ElementMap = IndexMap<String, Node>;

/// A value inside an [`ElementMap`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Node {
    /// A nested element
    Element(ElementMap),
    /// An attribute value, or the element text when keyed by [`TEXT_KEY`]
    Text(String),
}

impl Node {
    /// An element with no attributes, text or children
    pub fn empty_element() -> Self {
        Node::Element(ElementMap::new())
    }

    pub fn as_element(&self) -> Option<&ElementMap> {
        match self {
            Node::Element(map) => Some(map),
            Node::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(text) => Some(text),
            Node::Element(_) => None,
        }
    }

    /// Short description used in shape errors
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Text(_) => "text",
        }
    }
}

impl From<ElementMap> for Node {
    fn from(map: ElementMap) -> Self {
        Node::Element(map)
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl<'de> Deserialize<'de> for Node {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let guard = DepthGuard::default();
        NodeSeed::root(&guard)
            .deserialize(deserializer)?
            .ok_or_else(|| de::Error::custom("expected an element object or a text string"))
    }
}

/// Element nesting bound shared by every seed of one decode
#[derive(Debug, Default)]
pub struct DepthGuard {
    max_depth: Option<usize>,
    exceeded: Cell<bool>,
}

impl DepthGuard {
    pub fn new(max_depth: Option<usize>) -> Self {
        Self {
            max_depth,
            exceeded: Cell::new(false),
        }
    }

    /// True once a decode using this guard went past the limit
    pub fn exceeded(&self) -> bool {
        self.exceeded.get()
    }

    fn enter<E: de::Error>(&self, depth: usize) -> Result<(), E> {
        match self.max_depth {
            Some(limit) if depth > limit => {
                self.exceeded.set(true);
                Err(E::custom(format_args!(
                    "element nesting exceeds {} levels",
                    limit
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Decodes one value inside `xml_data`. Numbers, booleans, nulls and
/// arrays carry no XML meaning and decode to `None`.
#[derive(Debug, Clone, Copy)]
struct NodeSeed<'g> {
    depth: usize,
    guard: &'g DepthGuard,
}

impl<'g> NodeSeed<'g> {
    fn root(guard: &'g DepthGuard) -> Self {
        Self { depth: 1, guard }
    }

    fn child(self) -> Self {
        Self {
            depth: self.depth + 1,
            ..self
        }
    }
}

impl<'de> DeserializeSeed<'de> for NodeSeed<'_> {
    type Value = Option<Node>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        stacker::maybe_grow(64 * 1024, 1024 * 1024, move || {
            deserializer.deserialize_any(self)
        })
    }
}

impl<'de> Visitor<'de> for NodeSeed<'_> {
    type Value = Option<Node>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an element object or a text string")
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
        Ok(Some(Node::Text(value.to_string())))
    }

    fn visit_string<E: de::Error>(self, value: String) -> Result<Self::Value, E> {
        Ok(Some(Node::Text(value)))
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        self.guard.enter::<A::Error>(self.depth)?;
        while seq.next_element_seed(self.child())?.is_some() {}
        Ok(None)
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        self.guard.enter::<A::Error>(self.depth)?;
        let mut map = ElementMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(key) = access.next_key::<String>()? {
            match access.next_value_seed(self.child())? {
                Some(node) => {
                    map.insert(key, node);
                }
                None => tracing::trace!(key = %key, "skipping value with no XML form"),
            }
        }
        Ok(Some(Node::Element(map)))
    }
}

/// Decodes the `xml_data` object; `null` reads as no data
#[derive(Debug, Clone, Copy)]
struct DataSeed<'g> {
    guard: &'g DepthGuard,
}

impl<'de> DeserializeSeed<'de> for DataSeed<'_> {
    type Value = ElementMap;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for DataSeed<'_> {
    type Value = ElementMap;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("an object of root elements")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(ElementMap::new())
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut data = ElementMap::new();
        while let Some(name) = access.next_key::<String>()? {
            match access.next_value_seed(NodeSeed::root(self.guard))? {
                Some(node) => {
                    data.insert(name, node);
                }
                None => {
                    return Err(de::Error::custom(format_args!(
                        "root entry '{}' is not an element object",
                        name
                    )))
                }
            }
        }
        Ok(data)
    }
}

/// Decodes a whole [`XmlJsonDocument`] with element nesting bounded by a
/// [`DepthGuard`]. Missing or `null` fields read as empty.
#[derive(Debug, Clone, Copy)]
pub struct DocumentSeed<'g> {
    guard: &'g DepthGuard,
}

impl<'g> DocumentSeed<'g> {
    pub fn new(guard: &'g DepthGuard) -> Self {
        Self { guard }
    }
}

impl<'de> DeserializeSeed<'de> for DocumentSeed<'_> {
    type Value = XmlJsonDocument;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for DocumentSeed<'_> {
    type Value = XmlJsonDocument;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a document object")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut document = XmlJsonDocument::default();
        while let Some(key) = access.next_key::<String>()? {
            match key.as_str() {
                DECLARATION_FIELD => {
                    document.declaration = access.next_value::<Option<String>>()?.unwrap_or_default();
                }
                DOCTYPE_FIELD => {
                    document.doctype = access.next_value::<Option<String>>()?.unwrap_or_default();
                }
                DATA_FIELD => document.data = access.next_value_seed(DataSeed { guard: self.guard })?,
                _ => {
                    access.next_value_seed(NodeSeed::root(self.guard))?;
                }
            }
        }
        Ok(document)
    }
}

const DECLARATION_FIELD: &str = "xml_declaration";
const DOCTYPE_FIELD: &str = "xml_document_type_definition";
const DATA_FIELD: &str = "xml_data";

/// A whole document: prolog plus element data
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct XmlJsonDocument {
    /// Literal `<?xml ...?>` declaration, empty when absent
    #[serde(rename = "xml_declaration")]
    pub declaration: String,

    /// Literal `<!DOCTYPE ...>`, empty when absent
    #[serde(rename = "xml_document_type_definition")]
    pub doctype: String,

    /// Root element local name to its contents
    #[serde(rename = "xml_data")]
    pub data: ElementMap,
}

impl XmlJsonDocument {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'de> Deserialize<'de> for XmlJsonDocument {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let guard = DepthGuard::default();
        DocumentSeed::new(&guard).deserialize(deserializer)
    }
}
