//! XML side of the conversion: folding tokens into the intermediate
//! representation and unfolding it back into XML text

pub mod folder;
pub mod tree;
pub mod unfolder;

pub use folder::{fold_bytes, fold_reader, fold_str, parse_tree, ParsedXml};
pub use tree::XmlElement;
pub use unfolder::{unfold, unfold_into};
