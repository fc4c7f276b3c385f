use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use xmljsonconv::cli::{handle_error, Args, CliConfig, CliUtils};
use xmljsonconv::conversion::batch::convert_directory;
use xmljsonconv::{ConversionEngine, ConversionError, ConversionOutput, InputSource};

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging
    init_tracing(args.verbose);

    let cli = match CliConfig::from_args(args) {
        Ok(cli) => cli,
        Err(e) => {
            handle_error(&e);
            std::process::exit(2);
        }
    };

    if let Err(e) = handle_conversion(&cli) {
        match e.downcast_ref::<ConversionError>() {
            Some(error) => handle_error(error),
            None => CliUtils::show_error(&e.to_string()),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "xmljsonconv=debug"
    } else {
        "xmljsonconv=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn handle_conversion(cli: &CliConfig) -> Result<()> {
    tracing::debug!(
        input = %cli.input_description(),
        output = %cli.output_description(),
        "resolved arguments"
    );

    if cli.args.stdin {
        return convert_document(&InputSource::Stdin, cli);
    }

    let Some(input) = &cli.args.input else {
        return Err(anyhow::anyhow!(
            "No input provided. Use --stdin or provide an input path"
        ));
    };

    let path = PathBuf::from(input);
    let trimmed = input.trim_start();
    if trimmed.starts_with('<') || trimmed.starts_with('{') {
        // Treat as an inline document
        convert_document(&InputSource::String(input.clone()), cli)
    } else if path.is_file() {
        convert_document(&InputSource::File(path), cli)
    } else if path.is_dir() {
        convert_dir(&path, cli)
    } else {
        Err(anyhow::anyhow!("Input path does not exist: {}", input))
    }
}

fn convert_document(source: &InputSource, cli: &CliConfig) -> Result<()> {
    let engine = ConversionEngine::new(cli.conversion_config.clone());
    let output = engine.convert_source(source, cli.direction())?;

    if let Some(output_path) = &cli.args.output {
        write_output(output_path, &output.content)?;
        CliUtils::show_success(
            &format!("Converted to: {}", output_path.display()),
            cli.is_quiet(),
        );
    } else {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        handle.write_all(output.content.as_bytes())?;
        if !output.content.ends_with('\n') {
            handle.write_all(b"\n")?;
        }
    }

    if cli.want_stats() {
        output_statistics(&output, cli.is_quiet());
    }

    Ok(())
}

fn convert_dir(input_dir: &Path, cli: &CliConfig) -> Result<()> {
    let output_dir = cli
        .args
        .output
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Output directory required for directory conversion"))?;

    let report = convert_directory(
        input_dir,
        output_dir,
        cli.args.recursive,
        cli.direction(),
        &cli.conversion_config,
        cli.continue_on_error(),
    )?;

    if report.converted.is_empty() && report.failed.is_empty() {
        CliUtils::show_success(
            &format!("No XML or JSON files found in {}", input_dir.display()),
            cli.is_quiet(),
        );
        return Ok(());
    }

    for (input, output) in &report.converted {
        let relative = input.strip_prefix(input_dir).unwrap_or(input);
        CliUtils::show_success(
            &format!("{} -> {}", relative.display(), output.display()),
            cli.is_quiet(),
        );
    }

    for (input, error) in &report.failed {
        let relative = input.strip_prefix(input_dir).unwrap_or(input);
        CliUtils::show_error(&format!(
            "Error converting {}: {}",
            relative.display(),
            error.user_message()
        ));
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!(
            "{} of {} files failed to convert",
            report.failed.len(),
            report.failed.len() + report.converted.len()
        ))
    }
}

fn write_output(output_path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(output_path, content)?;
    Ok(())
}

fn output_statistics(output: &ConversionOutput, quiet: bool) {
    if quiet {
        return;
    }

    let metadata = &output.metadata;
    eprintln!("\nConversion Statistics:");
    eprintln!("Direction: {}", metadata.direction.description());
    eprintln!("Input size: {}", CliUtils::format_file_size(metadata.input_size));
    eprintln!("Output size: {}", CliUtils::format_file_size(metadata.output_size));
    eprintln!(
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(metadata.processing_time_ms))
    );
}
