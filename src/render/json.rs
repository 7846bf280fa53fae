//! JSON output for page operation streams.

use crate::error::{Error, Result};

use super::PageOp;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a sequence of page operations.
pub fn to_json(ops: &[PageOp], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(ops),
        JsonFormat::Compact => serde_json::to_string(ops),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}
