//! Rendering options and configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Options for rendering a node tree onto pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Page margins on every side, in millimetres
    pub margins_mm: f32,

    /// Body font size in points
    pub base_font_size: f32,

    /// Font used for body text and headings
    pub main_font: String,

    /// Font used for code
    pub mono_font: String,

    /// Physical page size
    pub page_size: PageSize,

    /// Color link text
    pub color_links: bool,

    /// Emit a table of contents before the body
    pub toc: bool,

    /// Fill the background of code blocks
    pub highlight: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page margins in millimetres.
    pub fn with_margins(mut self, mm: f32) -> Self {
        self.margins_mm = mm.max(0.0);
        self
    }

    /// Set the body font size in points.
    pub fn with_font_size(mut self, pt: f32) -> Self {
        self.base_font_size = pt;
        self
    }

    /// Set the main font name.
    pub fn with_main_font(mut self, name: impl Into<String>) -> Self {
        self.main_font = name.into();
        self
    }

    /// Set the monospace font name.
    pub fn with_mono_font(mut self, name: impl Into<String>) -> Self {
        self.mono_font = name.into();
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.page_size = size;
        self
    }

    /// Enable or disable colored links.
    pub fn with_color_links(mut self, enabled: bool) -> Self {
        self.color_links = enabled;
        self
    }

    /// Enable or disable the table of contents.
    pub fn with_toc(mut self, enabled: bool) -> Self {
        self.toc = enabled;
        self
    }

    /// Enable or disable code block highlighting.
    pub fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    /// Printable width between the side margins, in millimetres.
    pub fn content_width(&self) -> f32 {
        (self.page_size.width_mm() - 2.0 * self.margins_mm).max(1.0)
    }

    /// Printable height between the top and bottom margins, in millimetres.
    pub fn content_height(&self) -> f32 {
        (self.page_size.height_mm() - 2.0 * self.margins_mm).max(1.0)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            margins_mm: 20.0,
            base_font_size: 11.0,
            main_font: "Arial".to_string(),
            mono_font: "Courier".to_string(),
            page_size: PageSize::A4,
            color_links: true,
            toc: true,
            highlight: true,
        }
    }
}

/// Supported page sizes (portrait).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageSize {
    A3,
    #[default]
    A4,
    A5,
    Letter,
    Legal,
}

impl PageSize {
    /// Page width in millimetres.
    pub fn width_mm(&self) -> f32 {
        self.dimensions_mm().0
    }

    /// Page height in millimetres.
    pub fn height_mm(&self) -> f32 {
        self.dimensions_mm().1
    }

    fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PageSize::A3 => (297.0, 420.0),
            PageSize::A4 => (210.0, 297.0),
            PageSize::A5 => (148.0, 210.0),
            PageSize::Letter => (215.9, 279.4),
            PageSize::Legal => (215.9, 355.6),
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PageSize::A3 => "A3",
            PageSize::A4 => "A4",
            PageSize::A5 => "A5",
            PageSize::Letter => "Letter",
            PageSize::Legal => "Legal",
        };
        f.write_str(name)
    }
}

impl FromStr for PageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a3" => Ok(PageSize::A3),
            "a4" => Ok(PageSize::A4),
            "a5" => Ok(PageSize::A5),
            "letter" => Ok(PageSize::Letter),
            "legal" => Ok(PageSize::Legal),
            _ => Err(Error::InvalidOption(format!("unknown page size: {}", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.margins_mm, 20.0);
        assert_eq!(options.base_font_size, 11.0);
        assert_eq!(options.main_font, "Arial");
        assert_eq!(options.mono_font, "Courier");
        assert_eq!(options.page_size, PageSize::A4);
        assert!(options.color_links && options.toc && options.highlight);
    }

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_margins(10.0)
            .with_font_size(12.0)
            .with_page_size(PageSize::Letter)
            .with_toc(false)
            .with_highlight(false);

        assert_eq!(options.margins_mm, 10.0);
        assert_eq!(options.base_font_size, 12.0);
        assert_eq!(options.page_size, PageSize::Letter);
        assert!(!options.toc);
        assert!(!options.highlight);
        assert!((options.content_width() - 195.9).abs() < 1e-3);
    }

    #[test]
    fn test_page_size_parse() {
        assert_eq!("a4".parse::<PageSize>().unwrap(), PageSize::A4);
        assert_eq!(" Letter ".parse::<PageSize>().unwrap(), PageSize::Letter);
        assert!(matches!(
            "tabloid".parse::<PageSize>(),
            Err(Error::InvalidOption(_))
        ));
        assert_eq!(PageSize::Legal.to_string(), "Legal");
    }
}
