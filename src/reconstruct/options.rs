//! Reconstruction options.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed origin tag written into the frontmatter.
pub const SOURCE_TAG: &str = "remarkable";

/// Title used when none is supplied.
pub const DEFAULT_TITLE: &str = "untitled";

/// Options for rebuilding structured text from flat page text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconstructOptions {
    /// Added to every heading level before clamping to 1..=6
    pub header_level_adjust: i32,

    /// Prepend a frontmatter block
    pub add_frontmatter: bool,

    /// Normalize headings, lists and blank runs
    pub cleanup: bool,

    /// Title written into the frontmatter
    pub title: String,

    /// Date written into the frontmatter (today when unset)
    pub date: Option<NaiveDate>,
}

impl ReconstructOptions {
    /// Create new reconstruction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading level adjustment.
    pub fn with_header_level_adjust(mut self, adjust: i32) -> Self {
        self.header_level_adjust = adjust;
        self
    }

    /// Enable or disable the frontmatter block.
    pub fn with_frontmatter(mut self, enabled: bool) -> Self {
        self.add_frontmatter = enabled;
        self
    }

    /// Enable or disable line cleanup.
    pub fn with_cleanup(mut self, enabled: bool) -> Self {
        self.cleanup = enabled;
        self
    }

    /// Set the frontmatter title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Pin the frontmatter date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

impl Default for ReconstructOptions {
    fn default() -> Self {
        Self {
            header_level_adjust: 1,
            add_frontmatter: true,
            cleanup: true,
            title: DEFAULT_TITLE.to_string(),
            date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ReconstructOptions::default();
        assert_eq!(opts.header_level_adjust, 1);
        assert!(opts.add_frontmatter);
        assert!(opts.cleanup);
        assert_eq!(opts.title, "untitled");
        assert!(opts.date.is_none());
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let opts = ReconstructOptions::new()
            .with_header_level_adjust(-2)
            .with_frontmatter(false)
            .with_cleanup(false)
            .with_title("Notes")
            .with_date(date);
        assert_eq!(opts.header_level_adjust, -2);
        assert!(!opts.add_frontmatter);
        assert!(!opts.cleanup);
        assert_eq!(opts.title, "Notes");
        assert_eq!(opts.date, Some(date));
    }
}
