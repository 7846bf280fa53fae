//! Structured text converter.

use crate::error::Result;
use crate::parser::DocumentParser;
use crate::render::{PageRenderer, PageWriter, RenderOptions, RenderStats};

use super::DocumentConverter;

/// Parses structured text and renders the node tree.
///
/// Also the fallback for extensions nothing else claims.
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    parser: DocumentParser,
}

impl MarkdownConverter {
    /// Create a new structured text converter.
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentConverter for MarkdownConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn name(&self) -> &str {
        "markdown"
    }

    fn render(
        &self,
        content: &[u8],
        title: Option<&str>,
        options: &RenderOptions,
        writer: &mut dyn PageWriter,
    ) -> Result<RenderStats> {
        // Parse fully before the first op so a defect leaves nothing behind.
        let doc = self.parser.parse(content)?;
        let mut renderer = PageRenderer::new(options.clone());
        if let Some(title) = title {
            renderer = renderer.with_title(title);
        }
        renderer.render(&doc, writer)
    }
}
