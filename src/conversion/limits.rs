use crate::conversion::config::ConversionConfig;
use crate::error::{ConversionError, ConversionErrorKind, ConversionResult};
use crate::parser::InputSource;

/// Check the source size before attempting to read it.
/// This avoids loading very large files into memory if the user-configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &InputSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    match source.estimated_size() {
        Some(size) => check_input_size(size, config),
        None => Ok(()),
    }
}

/// Reject inputs larger than the configured memory limit
pub fn check_input_size(size: u64, config: &ConversionConfig) -> ConversionResult<()> {
    if size > config.memory_limit as u64 {
        return Err(ConversionError::conversion(
            ConversionErrorKind::InputTooLarge {
                size,
                limit: config.memory_limit,
            },
        ));
    }
    Ok(())
}
