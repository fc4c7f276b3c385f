//! Error types and handling infrastructure for XML/JSON conversion

use std::fmt;
use std::path::PathBuf;

/// Conversion failures that are not tied to one input syntax
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: u64, limit: usize },

    #[error("Nesting depth limit exceeded: {limit}")]
    DepthLimitExceeded { limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Conversion failed: {message}")]
    ConversionFailed { message: String },
}

impl ConversionErrorKind {
    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Malformed XML reported by the tokenizer
    #[error("XML parse error: {0}")]
    XmlParse(ParseError),

    /// Malformed JSON, or a JSON value of the wrong type
    #[error("JSON decode error: {0}")]
    JsonDecode(ParseError),

    /// Failure writing to the output sink
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// A value that is not an element where an element is required
    #[error("Invalid document shape at '{path}': {message}")]
    Shape { path: String, message: String },

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },
}

impl ConversionError {
    pub fn xml_parse(message: String, position: Option<u64>) -> Self {
        Self::XmlParse(ParseError::new(message, position.map(Location::Offset)))
    }

    pub fn json_decode(message: String, location: Option<(usize, usize)>) -> Self {
        Self::JsonDecode(ParseError::new(
            message,
            location.map(|(line, column)| Location::LineColumn { line, column }),
        ))
    }

    pub fn encode(message: String) -> Self {
        Self::Encode { message }
    }

    pub fn shape(path: String, message: String) -> Self {
        Self::Shape { path, message }
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn depth_limit(limit: usize) -> Self {
        Self::conversion(ConversionErrorKind::DepthLimitExceeded { limit })
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::XmlParse(err) => format!("Malformed XML: {}", err),
            Self::JsonDecode(err) => format!("Malformed JSON: {}", err),
            Self::Encode { message } => format!("Failed to write output: {}", message),
            Self::Shape { path, message } => {
                format!("Unexpected document structure at '{}': {}", path, message)
            }
            Self::Conversion { kind, source } => match kind {
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!("Input too large: {} bytes (limit: {} bytes)", size, limit)
                }
                ConversionErrorKind::DepthLimitExceeded { limit } => {
                    format!("Document nested deeper than {} levels", limit)
                }
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => format!("{}: {}", path.display(), message),
                ConversionErrorKind::ConversionFailed { message } => match source {
                    Some(source) => format!("{}: {}", message, source),
                    None => message.clone(),
                },
                _ => self.to_string(),
            },
        }
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(error: std::io::Error) -> Self {
        Self::conversion(ConversionErrorKind::io(error.to_string(), None))
    }
}

/// Where in the input a parse error was detected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    /// Byte offset into the XML stream
    Offset(u64),
    /// 1-based line and column in the JSON text
    LineColumn { line: usize, column: usize },
}

/// Syntax errors in either input format
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<Location>,
}

impl ParseError {
    pub fn new(message: String, location: Option<Location>) -> Self {
        Self { message, location }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        match self.location {
            Some(Location::Offset(offset)) => write!(f, " at byte {}", offset)?,
            Some(Location::LineColumn { line, column }) => {
                write!(f, " at line {}, column {}", line, column)?
            }
            None => {}
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;
