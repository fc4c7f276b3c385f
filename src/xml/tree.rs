//! Generic element tree built from the token stream
//!
//! Parsing keeps every child and every text run. Collapsing into an
//! [`ElementMap`] is a separate step, and it is where same-named siblings
//! and multiple text runs are reduced to one entry each.

use crate::document::{ElementMap, Node, TEXT_KEY};

/// One parsed element with its attributes, children and text runs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlElement {
    /// Local name, namespace prefix removed
    pub name: String,
    /// (local name, value) pairs in document order
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
    /// Non-empty trimmed text runs in document order
    pub text: Vec<String>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text.push(text.into());
        self
    }

    /// Fold into a map: attributes first, then the last text run, then
    /// children. Later writes replace earlier ones under the same key.
    pub fn collapse(self) -> ElementMap {
        let mut map = ElementMap::new();

        for (name, value) in self.attributes {
            map.insert(name, Node::Text(value));
        }

        if let Some(text) = self.text.into_iter().last() {
            map.insert(TEXT_KEY.to_string(), Node::Text(text));
        }

        for child in self.children {
            let name = child.name.clone();
            if map.contains_key(&name) {
                tracing::trace!(element = %name, "replacing earlier entry with same name");
            }
            map.insert(name, Node::Element(child.collapse()));
        }

        map
    }
}

/// Collapse top-level elements into the document's data map
pub fn collapse_roots(roots: Vec<XmlElement>) -> ElementMap {
    let mut data = ElementMap::new();
    for root in roots {
        let name = root.name.clone();
        data.insert(name, Node::Element(root.collapse()));
    }
    data
}
