use std::path::{Path, PathBuf};

use crate::cli::path_mapping::map_input_to_output;
use crate::conversion::engine::ConversionEngine;
use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::directory::find_convertible_files;
use crate::parser::{Direction, InputSource};

/// Outcome of converting a directory of documents
#[derive(Debug, Default)]
pub struct BatchReport {
    /// (input, output) pairs that converted successfully
    pub converted: Vec<(PathBuf, PathBuf)>,
    /// Inputs that failed, when continuing on error
    pub failed: Vec<(PathBuf, ConversionError)>,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert every XML and JSON file under `input_dir` into `output_dir`,
/// keeping relative paths. The direction of each file follows its extension
/// unless `direction` forces one.
pub fn convert_directory(
    input_dir: &Path,
    output_dir: &Path,
    recursive: bool,
    direction: Option<Direction>,
    config: &ConversionConfig,
    continue_on_error: bool,
) -> ConversionResult<BatchReport> {
    let io_error = |e: std::io::Error, path: &Path| {
        ConversionError::conversion(ConversionErrorKind::io(
            e.to_string(),
            Some(path.to_path_buf()),
        ))
    };

    std::fs::create_dir_all(output_dir).map_err(|e| io_error(e, output_dir))?;
    let files = find_convertible_files(input_dir, recursive).map_err(|e| io_error(e, input_dir))?;
    tracing::debug!(count = files.len(), dir = %input_dir.display(), "found documents");

    let engine = ConversionEngine::new(config.clone());
    let mut report = BatchReport::default();

    for file in files {
        let source = InputSource::File(file.clone());
        let result = engine.convert_source(&source, direction).and_then(|output| {
            let target = map_input_to_output(
                input_dir,
                &file,
                output_dir,
                output.metadata.direction.output_extension(),
            );
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(|e| io_error(e, parent))?;
            }
            std::fs::write(&target, &output.content).map_err(|e| io_error(e, &target))?;
            Ok(target)
        });

        match result {
            Ok(target) => report.converted.push((file, target)),
            Err(e) if continue_on_error => {
                tracing::warn!(file = %file.display(), error = %e, "skipping file");
                report.failed.push((file, e));
            }
            Err(e) => {
                return Err(ConversionError::conversion_with_source(
                    ConversionErrorKind::ConversionFailed {
                        message: format!("Failed to convert {}", file.display()),
                    },
                    e.into(),
                ))
            }
        }
    }

    Ok(report)
}
