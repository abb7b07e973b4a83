//! CLI command implementations.

pub mod chain;
pub mod fragments;
pub mod list;
pub mod resolve;
pub mod show;
pub mod validate;

use anyhow::Result;
use std::path::PathBuf;

use crate::formatters::{Formatter, OutputFormat, emit, get_formatter};

/// Output settings shared by every command.
pub struct Output {
    pub format: OutputFormat,
    pub file: Option<PathBuf>,
}

impl Output {
    pub fn new(format: &str, file: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            format: OutputFormat::from_str(format)?,
            file,
        })
    }

    pub fn formatter(&self) -> Box<dyn Formatter> {
        get_formatter(self.format)
    }

    pub fn emit(&self, output: &str) -> Result<()> {
        emit(output, self.file.as_deref())
    }
}
