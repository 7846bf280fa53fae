//! Where flat page text comes from.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::render::OpRecorder;

/// Produces the flat text of a page document.
pub trait PageTextSource {
    /// Extract all text as one blob, pages in order.
    fn extract_text(&mut self) -> Result<String>;
}

/// Text already held in memory.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource {
    text: String,
}

impl PlainTextSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl PageTextSource for PlainTextSource {
    fn extract_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }
}

/// Text dumped to a file by an external extractor.
#[derive(Debug, Clone)]
pub struct FileTextSource {
    path: PathBuf,
}

impl FileTextSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path read on extraction.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PageTextSource for FileTextSource {
    fn extract_text(&mut self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Recorded pages read back as text blocks, one per line.
impl PageTextSource for OpRecorder {
    fn extract_text(&mut self) -> Result<String> {
        Ok(self.plain_text())
    }
}
