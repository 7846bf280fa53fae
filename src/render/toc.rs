//! Table of contents side table.

use serde::{Deserialize, Serialize};

/// One heading recorded for the table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    /// Heading text
    pub title: String,
    /// Heading level (1-6)
    pub level: u8,
    /// 1-indexed page the heading starts on
    pub page: u32,
}

impl TocEntry {
    /// Line written into the contents section.
    pub fn line(&self, page_offset: u32) -> String {
        let indent = "    ".repeat(usize::from(self.level.saturating_sub(1)));
        format!("{}{} . . . {}", indent, self.title, self.page + page_offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toc_line() {
        let entry = TocEntry {
            title: "Setup".into(),
            level: 2,
            page: 3,
        };
        assert_eq!(entry.line(1), "    Setup . . . 4");
    }
}
