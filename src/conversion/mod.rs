//! XML/JSON conversion module
//!
//! This module contains the dispatcher between the two pipelines,
//! configuration, input limits and directory batch conversion.

pub mod batch;
pub mod config;
pub mod engine;
pub mod limits;

pub use config::{ConversionConfig, Indent};

pub use engine::{
    convert, convert_string, convert_with_config, ConversionEngine, ConversionMetadata,
    ConversionOutput,
};

pub use crate::error::ConversionResult;
