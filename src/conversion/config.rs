//! Configuration options for XML/JSON conversion

/// Indentation used for pretty output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indent {
    /// One tab per level
    Tab,
    /// N spaces per level (0-8)
    Spaces(u8),
}

impl Indent {
    /// Indentation character and how many of them make one level
    pub fn unit(&self) -> (u8, usize) {
        match self {
            Indent::Tab => (b'\t', 1),
            Indent::Spaces(n) => (b' ', usize::from(*n)),
        }
    }

    /// One level of indentation as bytes
    pub fn as_bytes(&self) -> Vec<u8> {
        let (ch, count) = self.unit();
        vec![ch; count]
    }

    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "tab" | "\t" => Ok(Indent::Tab),
            other => match other.parse::<u8>() {
                Ok(n) if n <= 8 => Ok(Indent::Spaces(n)),
                _ => Err(format!(
                    "Invalid indent '{}'. Use 'tab' or a number of spaces (0-8)",
                    other
                )),
            },
        }
    }
}

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Pretty-print output (vs compact)
    pub pretty: bool,
    /// Indentation for pretty output
    pub indent: Indent,
    /// Write attribute entries back as XML attributes on the JSON to XML path
    pub emit_attributes: bool,
    /// Maximum element nesting depth
    pub max_depth: Option<usize>,
    /// Maximum input size in bytes
    pub memory_limit: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: Indent::Tab,
            emit_attributes: false,
            max_depth: Some(1000),
            memory_limit: 100 * 1024 * 1024, // 100MB
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Compact output without any limits, for trusted in-process use
    pub fn unbounded() -> Self {
        Self {
            pretty: false,
            max_depth: None,
            memory_limit: usize::MAX,
            ..Default::default()
        }
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Set indentation
    pub fn with_indent(mut self, indent: Indent) -> Self {
        self.indent = indent;
        self
    }

    /// Write attributes back to XML
    pub fn with_emit_attributes(mut self, enabled: bool) -> Self {
        self.emit_attributes = enabled;
        self
    }

    /// Set maximum nesting depth
    pub fn with_max_depth(mut self, depth: Option<usize>) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set memory limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Indent::Spaces(n) = self.indent {
            if n > 8 {
                return Err("Indent size must be 0-8 spaces".to_string());
            }
        }

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if let Some(depth) = self.max_depth {
            if depth == 0 {
                return Err("Max depth must be at least 1".to_string());
            }
        }

        Ok(())
    }

    /// Returns true when `depth` nested elements exceed the configured limit
    pub fn exceeds_depth(&self, depth: usize) -> bool {
        self.max_depth.is_some_and(|limit| depth > limit)
    }
}
