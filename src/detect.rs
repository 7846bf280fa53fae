//! File name helpers used for converter dispatch and document titles.

use std::path::Path;

/// Extension of `path`, lowercased, or an empty string.
pub fn extension_of<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default()
}

/// Document title for `path`: the file stem.
pub fn title_of<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("/tmp/a.MD"), "md");
        assert_eq!(extension_of("settings.Yaml"), "yaml");
        assert_eq!(extension_of("/tmp/README"), "");
    }

    #[test]
    fn test_title_of() {
        assert_eq!(title_of("/tmp/Meeting Notes.md"), "Meeting Notes");
        assert_eq!(title_of("archive.tar.gz"), "archive.tar");
    }
}
