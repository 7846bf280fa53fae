//! Converters that skip structural parsing and render one monospace block.

use crate::error::{Error, Result};
use crate::render::{PageRenderer, PageWriter, RenderOptions, RenderStats};

use super::DocumentConverter;

fn as_text(content: &[u8]) -> Result<&str> {
    std::str::from_utf8(content).map_err(|e| Error::InvalidUtf8 {
        offset: e.valid_up_to(),
    })
}

fn render_block(
    text: &str,
    title: Option<&str>,
    options: &RenderOptions,
    writer: &mut dyn PageWriter,
) -> Result<RenderStats> {
    let mut renderer = PageRenderer::new(options.clone());
    if let Some(title) = title {
        renderer = renderer.with_title(title);
    }
    renderer.render_monospace(text, writer)
}

/// YAML files: validated, then shown inside a `yaml` fence.
#[derive(Debug, Clone, Default)]
pub struct YamlConverter {
    _private: (),
}

impl YamlConverter {
    /// Create a new YAML converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for YamlConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["yml", "yaml"]
    }

    fn name(&self) -> &str {
        "yaml"
    }

    fn render(
        &self,
        content: &[u8],
        title: Option<&str>,
        options: &RenderOptions,
        writer: &mut dyn PageWriter,
    ) -> Result<RenderStats> {
        let text = as_text(content)?;
        serde_yaml::from_str::<serde_yaml::Value>(text)?;
        let fenced = format!("```yaml\n{}\n```", text);
        render_block(&fenced, title, options, writer)
    }
}

/// Configuration files (`.conf`, `.ini`, `.config`): raw text.
#[derive(Debug, Clone, Default)]
pub struct ConfigConverter {
    _private: (),
}

impl ConfigConverter {
    /// Create a new configuration file converter.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentConverter for ConfigConverter {
    fn supported_extensions(&self) -> &[&str] {
        &["conf", "ini", "config"]
    }

    fn name(&self) -> &str {
        "config"
    }

    fn render(
        &self,
        content: &[u8],
        title: Option<&str>,
        options: &RenderOptions,
        writer: &mut dyn PageWriter,
    ) -> Result<RenderStats> {
        render_block(as_text(content)?, title, options, writer)
    }
}
