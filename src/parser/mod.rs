//! Input sources and direction detection

pub mod directory;
pub mod filter;

use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};

/// Which way a conversion runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    XmlToJson,
    JsonToXml,
}

impl Direction {
    /// `true` selects XML to JSON
    pub fn from_flag(to_json_from_xml: bool) -> Self {
        if to_json_from_xml {
            Direction::XmlToJson
        } else {
            Direction::JsonToXml
        }
    }

    /// Guess from content: markup starts with `<`, anything else is JSON
    pub fn detect(content: &[u8]) -> Self {
        let first = content
            .strip_prefix(b"\xEF\xBB\xBF".as_slice())
            .unwrap_or(content)
            .iter()
            .find(|b| !b.is_ascii_whitespace());
        match first {
            Some(b'<') => Direction::XmlToJson,
            _ => Direction::JsonToXml,
        }
    }

    /// Guess from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        if filter::is_xml_path(path) {
            Some(Direction::XmlToJson)
        } else if filter::is_json_path(path) {
            Some(Direction::JsonToXml)
        } else {
            None
        }
    }

    /// Extension for files produced in this direction
    pub fn output_extension(&self) -> &'static str {
        match self {
            Direction::XmlToJson => "json",
            Direction::JsonToXml => "xml",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Direction::XmlToJson => "XML to JSON",
            Direction::JsonToXml => "JSON to XML",
        }
    }
}

/// Source for conversion operations
#[derive(Debug, Clone)]
pub enum InputSource {
    String(String),
    File(PathBuf),
    Directory(PathBuf),
    Stdin,
}

impl InputSource {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            InputSource::String(_) => "string input".to_string(),
            InputSource::File(path) => format!("file: {}", path.display()),
            InputSource::Directory(path) => format!("directory: {}", path.display()),
            InputSource::Stdin => "standard input".to_string(),
        }
    }

    /// Size in bytes, when known before reading
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            InputSource::String(s) => Some(s.len() as u64),
            InputSource::File(path) => std::fs::metadata(path).ok().map(|m| m.len()),
            InputSource::Directory(_) | InputSource::Stdin => None,
        }
    }

    /// Read the whole source into memory
    pub fn read_bytes(&self) -> ConversionResult<Vec<u8>> {
        match self {
            InputSource::String(content) => Ok(content.as_bytes().to_vec()),
            InputSource::File(path) => std::fs::read(path).map_err(|e| {
                ConversionError::conversion(ConversionErrorKind::io(
                    format!("Failed to read file: {}", e),
                    Some(path.clone()),
                ))
            }),
            InputSource::Stdin => {
                let mut buffer = Vec::new();
                std::io::stdin().read_to_end(&mut buffer).map_err(|e| {
                    ConversionError::conversion(ConversionErrorKind::io(
                        format!("Failed to read stdin: {}", e),
                        None,
                    ))
                })?;
                Ok(buffer)
            }
            InputSource::Directory(path) => Err(ConversionError::conversion(
                ConversionErrorKind::io(
                    "Cannot read directory as a single document".to_string(),
                    Some(path.clone()),
                ),
            )),
        }
    }

    /// Direction hinted by the source itself, if any
    pub fn direction_hint(&self) -> Option<Direction> {
        match self {
            InputSource::File(path) => Direction::from_path(path),
            _ => None,
        }
    }
}
