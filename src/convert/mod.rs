//! Conversion entry points with a converter registry keyed by extension.
//!
//! Structured text goes through the parser and the page renderer; YAML and
//! configuration files are shown as a single monospace block. Extensions no
//! converter claims fall back to the structured text path.
//!
//! # Example
//!
//! ```no_run
//! use pagemark::convert::{render_file, ConversionOptions};
//! use pagemark::render::OpRecorder;
//!
//! fn main() -> pagemark::Result<()> {
//!     let mut recorder = OpRecorder::new();
//!     let stats = render_file("notes.md", &ConversionOptions::default(), &mut recorder)?;
//!     println!("{} pages", stats.page_count);
//!     Ok(())
//! }
//! ```

mod batch;
mod markdown;
mod plain;

pub use batch::{render_batch, render_batch_with, BatchOutcome};
pub use markdown::MarkdownConverter;
pub use plain::{ConfigConverter, YamlConverter};

use crate::detect::{extension_of, title_of};
use crate::error::{Error, Result};
use crate::reconstruct::{PageTextSource, ReconstructOptions, TextReconstructor};
use crate::render::{PageWriter, RenderOptions, RenderStats};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Options for both conversion directions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConversionOptions {
    /// Structured text to pages
    pub render: RenderOptions,

    /// Page text back to structured text
    pub reconstruct: ReconstructOptions,
}

impl ConversionOptions {
    /// Create new conversion options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set rendering options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Set reconstruction options.
    pub fn with_reconstruct_options(mut self, options: ReconstructOptions) -> Self {
        self.reconstruct = options;
        self
    }
}

/// Trait for source converters.
///
/// Implement this trait to render another source format onto pages.
pub trait DocumentConverter: Send + Sync {
    /// Get the supported file extensions for this converter.
    ///
    /// Extensions should be lowercase without the leading dot (e.g., `["md"]`).
    fn supported_extensions(&self) -> &[&str];

    /// Get the name of this converter.
    fn name(&self) -> &str;

    /// Render source bytes to `writer`.
    fn render(
        &self,
        content: &[u8],
        title: Option<&str>,
        options: &RenderOptions,
        writer: &mut dyn PageWriter,
    ) -> Result<RenderStats>;

    /// Check if this converter supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry for source converters.
pub struct ConverterRegistry {
    converters: HashMap<String, Arc<dyn DocumentConverter>>,
    by_name: HashMap<String, Arc<dyn DocumentConverter>>,
    fallback: Option<Arc<dyn DocumentConverter>>,
}

impl ConverterRegistry {
    /// Create a new empty registry with no fallback.
    pub fn new() -> Self {
        Self {
            converters: HashMap::new(),
            by_name: HashMap::new(),
            fallback: None,
        }
    }

    /// Create a registry with the default converters. Structured text is
    /// the fallback.
    pub fn with_defaults() -> Self {
        let markdown: Arc<dyn DocumentConverter> = Arc::new(MarkdownConverter::new());
        let mut registry = Self::new();
        registry.register(markdown.clone());
        registry.register(Arc::new(YamlConverter::new()));
        registry.register(Arc::new(ConfigConverter::new()));
        registry.fallback = Some(markdown);
        registry
    }

    /// Register a converter for all its supported extensions.
    pub fn register(&mut self, converter: Arc<dyn DocumentConverter>) {
        for ext in converter.supported_extensions() {
            self.converters.insert(ext.to_lowercase(), converter.clone());
        }
        self.by_name
            .insert(converter.name().to_lowercase(), converter);
    }

    /// Use `converter` for extensions nothing else claims.
    pub fn set_fallback(&mut self, converter: Arc<dyn DocumentConverter>) {
        self.fallback = Some(converter);
    }

    /// Get a converter by file extension, without the fallback.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.converters.get(&ext.to_lowercase()).cloned()
    }

    /// Get a converter by name.
    pub fn get_by_name(&self, name: &str) -> Option<Arc<dyn DocumentConverter>> {
        self.by_name.get(&name.to_lowercase()).cloned()
    }

    /// Converter for `ext`, falling back when it is unclaimed.
    pub fn resolve(&self, ext: &str) -> Result<Arc<dyn DocumentConverter>> {
        self.get_by_extension(ext)
            .or_else(|| self.fallback.clone())
            .ok_or_else(|| Error::UnsupportedExtension(ext.to_string()))
    }

    /// Check if an extension is explicitly registered.
    pub fn supports(&self, ext: &str) -> bool {
        self.converters.contains_key(&ext.to_lowercase())
    }

    /// Get all registered extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.converters.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Render a file with the converter for its extension.
    pub fn render_file(
        &self,
        path: &Path,
        options: &RenderOptions,
        writer: &mut dyn PageWriter,
    ) -> Result<RenderStats> {
        let converter = self.resolve(&extension_of(path))?;
        let content = std::fs::read(path)?;
        let title = title_of(path);
        log::debug!(
            "Rendering {} with the {} converter",
            path.display(),
            converter.name()
        );
        converter.render(&content, Some(&title), options, writer)
    }

    /// Render bytes using `ext` to pick the converter.
    pub fn render_bytes(
        &self,
        bytes: &[u8],
        ext: &str,
        title: Option<&str>,
        options: &RenderOptions,
        writer: &mut dyn PageWriter,
    ) -> Result<RenderStats> {
        self.resolve(ext)?.render(bytes, title, options, writer)
    }
}

impl Default for ConverterRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Render a file with the default registry.
///
/// The title block shows the file stem.
pub fn render_file<P: AsRef<Path>>(
    path: P,
    options: &ConversionOptions,
    writer: &mut dyn PageWriter,
) -> Result<RenderStats> {
    ConverterRegistry::with_defaults().render_file(path.as_ref(), &options.render, writer)
}

/// Pull flat text from `source` and rebuild structured text.
///
/// Irregularities do not fail the conversion; each one is logged as a
/// warning.
pub fn pages_to_markdown(
    source: &mut dyn PageTextSource,
    options: &ConversionOptions,
) -> Result<String> {
    let text = source.extract_text()?;
    let result = TextReconstructor::new(options.reconstruct.clone()).reconstruct(&text);
    for irregularity in &result.irregularities {
        log::warn!("{}: {}", options.reconstruct.title, irregularity);
    }
    Ok(result.markdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconstruct::PlainTextSource;
    use crate::render::OpRecorder;

    #[test]
    fn test_conversion_options_builder() {
        let options = ConversionOptions::new()
            .with_render_options(RenderOptions::new().with_toc(false))
            .with_reconstruct_options(ReconstructOptions::new().with_cleanup(false));

        assert!(!options.render.toc);
        assert!(!options.reconstruct.cleanup);
        assert!(options.reconstruct.add_frontmatter);
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.supports("md"));
        assert!(registry.supports("YAML"));
        assert!(registry.supports("ini"));
        assert!(!registry.supports("txt"));
        assert_eq!(
            registry.supported_extensions(),
            vec!["conf", "config", "ini", "markdown", "md", "yaml", "yml"]
        );
    }

    #[test]
    fn test_registry_fallback() {
        let registry = ConverterRegistry::with_defaults();
        assert_eq!(registry.resolve("txt").unwrap().name(), "markdown");
        assert_eq!(registry.resolve("").unwrap().name(), "markdown");
        assert_eq!(registry.resolve("yml").unwrap().name(), "yaml");
    }

    #[test]
    fn test_empty_registry_rejects() {
        let registry = ConverterRegistry::new();
        match registry.resolve("md") {
            Err(Error::UnsupportedExtension(ext)) => assert_eq!(ext, "md"),
            other => panic!("Expected unsupported extension, got {:?}", other.map(|c| c.name().to_string())),
        }
    }

    #[test]
    fn test_registry_get_by_name() {
        let registry = ConverterRegistry::with_defaults();
        assert!(registry.get_by_name("Config").is_some());
        assert!(registry.get_by_name("pdf").is_none());
    }

    #[test]
    fn test_render_bytes_dispatch() {
        let registry = ConverterRegistry::with_defaults();
        let options = RenderOptions::new().with_toc(false);

        let mut recorder = OpRecorder::new();
        registry
            .render_bytes(b"# a", "conf", None, &options, &mut recorder)
            .unwrap();
        assert_eq!(recorder.text_blocks(), vec!["# a"]);

        let mut recorder = OpRecorder::new();
        let stats = registry
            .render_bytes(b"# a", "md", None, &options, &mut recorder)
            .unwrap();
        assert_eq!(stats.heading_count, 1);
    }

    #[test]
    fn test_pages_to_markdown() {
        let options = ConversionOptions::new()
            .with_reconstruct_options(ReconstructOptions::new().with_frontmatter(false));
        let mut source = PlainTextSource::new("# Top\n* a\n```\nopen");
        let md = pages_to_markdown(&mut source, &options).unwrap();
        assert_eq!(md, "## Top\n- a\n```\nopen");
    }
}
