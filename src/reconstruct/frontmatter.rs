//! Metadata header prepended to reconstructed text.

use std::fmt;

use chrono::{Local, NaiveDate};

use super::options::{ReconstructOptions, SOURCE_TAG};

/// `---` delimited metadata block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frontmatter {
    pub title: String,
    pub source: String,
    pub date: NaiveDate,
}

impl Frontmatter {
    /// Build the block for `options`, dated today unless a date is pinned.
    pub fn from_options(options: &ReconstructOptions) -> Self {
        Self {
            title: options.title.clone(),
            source: SOURCE_TAG.to_string(),
            date: options.date.unwrap_or_else(|| Local::now().date_naive()),
        }
    }
}

impl fmt::Display for Frontmatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "---\ntitle: {}\nsource: {}\ndate: {}\n---\n\n",
            self.title,
            self.source,
            self.date.format("%Y-%m-%d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let opts = ReconstructOptions::new()
            .with_title("Meeting")
            .with_date(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(
            Frontmatter::from_options(&opts).to_string(),
            "---\ntitle: Meeting\nsource: remarkable\ndate: 2024-01-05\n---\n\n"
        );
    }

    #[test]
    fn test_defaults_to_today() {
        let fm = Frontmatter::from_options(&ReconstructOptions::new());
        assert_eq!(fm.date, Local::now().date_naive());
        assert_eq!(fm.title, "untitled");
    }
}
