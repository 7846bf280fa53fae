//! Page writer boundary.
//!
//! The renderer never encodes pages itself. It emits [`PageOp`] values to a
//! [`PageWriter`], which may record them, lay them out into a real document,
//! or forward them elsewhere. Writer failures come back as
//! [`Error::Writer`](crate::Error::Writer) and are propagated unchanged.

use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::state::FontWeight;

/// One drawing or layout operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageOp {
    /// Start a new page
    NewPage,
    /// Select a font by name
    SetFont {
        family: String,
        weight: FontWeight,
        size_pt: f32,
    },
    /// Set (or switch off) the block fill color
    SetFill { r: u8, g: u8, b: u8, on: bool },
    /// Set the text color
    SetTextColor { r: u8, g: u8, b: u8 },
    /// Write a wrapped block of text
    WriteTextBlock { text: String, filled: bool },
    /// Move down by `height` millimetres
    LineBreak { height: f32 },
    /// Write an inline glyph such as a list bullet
    WriteGlyph { glyph: String },
}

/// Sink for page operations.
pub trait PageWriter {
    /// Accept one operation.
    fn write_op(&mut self, op: PageOp) -> Result<()>;
}

impl<W: PageWriter + ?Sized> PageWriter for &mut W {
    fn write_op(&mut self, op: PageOp) -> Result<()> {
        (**self).write_op(op)
    }
}

/// Writer that keeps every operation in memory.
#[derive(Debug, Clone, Default)]
pub struct OpRecorder {
    ops: Vec<PageOp>,
}

impl OpRecorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded operations in emission order.
    pub fn ops(&self) -> &[PageOp] {
        &self.ops
    }

    /// Take the recorded operations.
    pub fn into_ops(self) -> Vec<PageOp> {
        self.ops
    }

    /// Number of `NewPage` operations seen.
    pub fn page_count(&self) -> usize {
        self.ops.iter().filter(|op| **op == PageOp::NewPage).count()
    }

    /// Text of every `WriteTextBlock`, in order.
    pub fn text_blocks(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                PageOp::WriteTextBlock { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text, one block per line. Roughly what a text extractor
    /// would recover from the finished pages.
    pub fn plain_text(&self) -> String {
        self.text_blocks().join("\n")
    }
}

impl PageWriter for OpRecorder {
    fn write_op(&mut self, op: PageOp) -> Result<()> {
        self.ops.push(op);
        Ok(())
    }
}

/// Writer that drops everything. Used for layout-only passes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardWriter;

impl PageWriter for DiscardWriter {
    fn write_op(&mut self, _op: PageOp) -> Result<()> {
        Ok(())
    }
}
