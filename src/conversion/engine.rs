//! Conversion engine dispatching between the two pipelines

use std::io::Read;
use std::time::Instant;

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::error::ConversionResult;
use crate::parser::{Direction, InputSource};
use crate::{json, xml};

/// Converted document text plus details about the run
#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub content: String,
    pub metadata: ConversionMetadata,
}

impl ConversionOutput {
    /// Get the converted text
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata about the conversion process
#[derive(Debug, Clone)]
pub struct ConversionMetadata {
    pub direction: Direction,
    pub input_size: u64,
    pub output_size: u64,
    pub processing_time_ms: u64,
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// XML byte stream to JSON text
    pub fn xml_to_json<R: Read>(&self, reader: R) -> ConversionResult<String> {
        let document = xml::fold_reader(reader, &self.config)?;
        json::to_json_string(&document, &self.config)
    }

    /// JSON byte stream to XML text
    pub fn json_to_xml<R: Read>(&self, reader: R) -> ConversionResult<String> {
        let document = json::from_json_reader(reader, &self.config)?;
        xml::unfold(&document, &self.config)
    }

    /// Convert a byte stream in the given direction
    pub fn convert_reader<R: Read>(
        &self,
        reader: R,
        direction: Direction,
    ) -> ConversionResult<String> {
        tracing::debug!(direction = direction.description(), "starting conversion");
        let result = match direction {
            Direction::XmlToJson => self.xml_to_json(reader),
            Direction::JsonToXml => self.json_to_xml(reader),
        };
        if let Err(e) = &result {
            tracing::debug!(error = %e, "conversion failed");
        }
        result
    }

    /// Convert an in-memory document
    pub fn convert_str(&self, input: &str, direction: Direction) -> ConversionResult<String> {
        limits::check_input_size(input.len() as u64, &self.config)?;
        self.convert_reader(input.as_bytes(), direction)
    }

    /// Convert a whole source. Without an explicit direction the file
    /// extension is used, then the content itself.
    pub fn convert_source(
        &self,
        source: &InputSource,
        direction: Option<Direction>,
    ) -> ConversionResult<ConversionOutput> {
        let start_time = Instant::now();

        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;
        let bytes = source.read_bytes()?;
        limits::check_input_size(bytes.len() as u64, &self.config)?;

        let direction = direction
            .or_else(|| source.direction_hint())
            .unwrap_or_else(|| Direction::detect(&bytes));

        let content = self.convert_reader(bytes.as_slice(), direction)?;

        let metadata = ConversionMetadata {
            direction,
            input_size: bytes.len() as u64,
            output_size: content.len() as u64,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(ConversionOutput { content, metadata })
    }
}

/// Convert a byte stream with the default configuration.
/// `to_json_from_xml` selects XML to JSON, otherwise JSON to XML.
pub fn convert<R: Read>(reader: R, to_json_from_xml: bool) -> ConversionResult<String> {
    convert_with_config(
        reader,
        Direction::from_flag(to_json_from_xml),
        &ConversionConfig::default(),
    )
}

/// Convert a byte stream with a custom configuration
pub fn convert_with_config<R: Read>(
    reader: R,
    direction: Direction,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_reader(reader, direction)
}

/// Convert a string with a custom configuration
pub fn convert_string(
    input: &str,
    direction: Direction,
    config: &ConversionConfig,
) -> ConversionResult<String> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_str(input, direction)
}
