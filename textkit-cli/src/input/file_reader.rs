//! Document loading

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Separates pages within one document
pub const PAGE_BREAK: char = '\x0c';

/// One UTF-8 input file
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: String,
}

impl Document {
    /// Read a file as UTF-8 text
    pub fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            text,
        })
    }

    /// Display name used to label output
    pub fn name(&self) -> String {
        self.path.display().to_string()
    }

    /// Pages split on form feeds; a document without one is a single page
    pub fn pages(&self) -> Vec<&str> {
        self.text.split(PAGE_BREAK).collect()
    }
}
