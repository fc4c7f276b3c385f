//! Command-line interface module

use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use std::time::Duration;

use crate::conversion::config::Indent;
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::Direction;

pub mod path_mapping;

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "xmljsonconv")]
#[command(about = "Convert XML documents to JSON and back, keeping the XML prolog")]
#[command(version)]
#[command(long_about = None)]
#[command(group(ArgGroup::new("direction").args(["to_json", "to_xml"])))]
pub struct Args {
    /// Input document (inline text, file, or directory)
    #[arg()]
    pub input: Option<String>,

    /// Output file or directory path (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read the document from standard input
    #[arg(long)]
    pub stdin: bool,

    /// Force XML to JSON conversion
    #[arg(long)]
    pub to_json: bool,

    /// Force JSON to XML conversion
    #[arg(long)]
    pub to_xml: bool,

    /// Recursively process directories
    #[arg(long)]
    pub recursive: bool,

    /// Indentation: 'tab' or 0-8 spaces (default: tab)
    #[arg(long)]
    pub indent: Option<String>,

    /// Disable pretty-printing
    #[arg(long)]
    pub plain: bool,

    /// Write attribute entries back as XML attributes
    #[arg(long)]
    pub emit_attributes: bool,

    /// Maximum element nesting depth (default: 1000)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Maximum input size (e.g., 100MB, default: 100MB)
    #[arg(long)]
    pub memory_limit: Option<String>,

    /// Output conversion statistics
    #[arg(long)]
    pub stats: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,

    /// Continue converting other files when one file fails
    #[arg(long)]
    pub continue_on_error: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub conversion_config: ConversionConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> ConversionResult<Self> {
        let conversion_config = Self::create_conversion_config(&args)?;

        Ok(Self {
            args,
            conversion_config,
        })
    }

    /// Create conversion configuration from CLI arguments
    fn create_conversion_config(args: &Args) -> ConversionResult<ConversionConfig> {
        let indent = match &args.indent {
            Some(indent) => Indent::from_str(indent).map_err(configuration_error)?,
            None => Indent::Tab,
        };

        let config = ConversionConfig {
            pretty: !args.plain,
            indent,
            emit_attributes: args.emit_attributes,
            max_depth: Some(args.max_depth.unwrap_or(1000)),
            memory_limit: parse_memory_limit(&args.memory_limit)?,
        };

        config.validate().map_err(configuration_error)?;

        Ok(config)
    }

    /// Direction forced on the command line, if any
    pub fn direction(&self) -> Option<Direction> {
        if self.args.to_json {
            Some(Direction::XmlToJson)
        } else if self.args.to_xml {
            Some(Direction::JsonToXml)
        } else {
            None
        }
    }

    /// Check if we should continue on error
    pub fn continue_on_error(&self) -> bool {
        self.args.continue_on_error
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Get input source description
    pub fn input_description(&self) -> String {
        if self.args.stdin {
            "standard input".to_string()
        } else if let Some(input) = &self.args.input {
            format!("'{}'", input)
        } else {
            "no input specified".to_string()
        }
    }

    /// Get output destination description
    pub fn output_description(&self) -> String {
        if let Some(output) = &self.args.output {
            format!("'{}'", output.display())
        } else {
            "standard output".to_string()
        }
    }
}

fn configuration_error(message: String) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::configuration(message))
}

/// Parse memory limit string (e.g., "100MB", "1GB", "500KB")
pub fn parse_memory_limit(limit: &Option<String>) -> ConversionResult<usize> {
    let Some(limit_str) = limit else {
        return Ok(100 * 1024 * 1024); // 100MB default
    };

    let limit_str = limit_str.trim().to_uppercase();
    let invalid = || configuration_error(format!("Invalid memory limit: {}", limit_str));

    let (number, multiplier) = if let Some(size) = limit_str.strip_suffix("GB") {
        (size, 1024.0 * 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("MB") {
        (size, 1024.0 * 1024.0)
    } else if let Some(size) = limit_str.strip_suffix("KB") {
        (size, 1024.0)
    } else if let Some(size) = limit_str.strip_suffix('B') {
        return size.trim().parse::<usize>().map_err(|_| invalid());
    } else {
        // Assume bytes
        return limit_str.parse::<usize>().map_err(|_| invalid());
    };

    let value = number.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }
    Ok((value * multiplier) as usize)
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Format a file size in human-readable format
    pub fn format_file_size(bytes: u64) -> String {
        const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
        let mut size = bytes as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", bytes, UNITS[unit_index])
        } else {
            format!("{:.1} {}", size, UNITS[unit_index])
        }
    }

    /// Format a duration in human-readable format
    pub fn format_duration(duration: Duration) -> String {
        let total_millis = duration.as_millis();

        if total_millis < 1000 {
            format!("{}ms", total_millis)
        } else if total_millis < 60_000 {
            format!("{:.1}s", total_millis as f64 / 1000.0)
        } else {
            let minutes = total_millis / 60_000;
            let seconds = (total_millis % 60_000) / 1000;
            format!("{}m {}s", minutes, seconds)
        }
    }

    /// Show a success message (if not in quiet mode)
    pub fn show_success(message: &str, quiet: bool) {
        if !quiet {
            eprintln!("✓ {}", message);
        }
    }

    /// Show an error message
    pub fn show_error(message: &str) {
        eprintln!("✗ {}", message);
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &ConversionError) {
    CliUtils::show_error(&error.user_message());

    // Provide helpful suggestions
    match error {
        ConversionError::XmlParse(_) | ConversionError::JsonDecode(_) => {
            eprintln!("\nTip: Use --to-json or --to-xml if the input format was guessed wrong");
        }
        ConversionError::Conversion {
            kind: ConversionErrorKind::InputTooLarge { .. },
            ..
        } => {
            eprintln!("\nTip: Use --memory-limit to increase the allowed input size");
        }
        ConversionError::Conversion {
            kind: ConversionErrorKind::DepthLimitExceeded { .. },
            ..
        } => {
            eprintln!("\nTip: Use --max-depth to allow deeper nesting");
        }
        _ => {}
    }

    // Show usage hint
    eprintln!("\nTry 'xmljsonconv --help' for usage information.");
}
