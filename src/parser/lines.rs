//! Line-level helpers shared by the block parser.

/// One source line with its location in the original input.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    /// Line text without the terminator
    pub text: &'a str,
    /// 1-based line number
    pub number: usize,
    /// Byte offset of `text` in the input
    pub offset: usize,
}

impl<'a> Line<'a> {
    /// Split input into lines, dropping `\n` and a trailing `\r`.
    pub fn split(input: &'a str) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        let mut offset = 0;
        for (idx, raw) in input.split('\n').enumerate() {
            let text = raw.strip_suffix('\r').unwrap_or(raw);
            lines.push(Line {
                text,
                number: idx + 1,
                offset,
            });
            offset += raw.len() + 1;
        }
        // A trailing newline leaves an empty final piece behind.
        if input.ends_with('\n') {
            lines.pop();
        }
        lines
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Number of leading spaces.
    pub fn indent(&self) -> usize {
        indent_of(self.text)
    }

    /// Remove up to `n` leading spaces.
    pub fn dedent(&self, n: usize) -> Line<'a> {
        let cut = self.indent().min(n);
        Line {
            text: &self.text[cut..],
            number: self.number,
            offset: self.offset + cut,
        }
    }

    /// Drop the first `n` bytes. `n` must fall on a char boundary.
    pub fn skip(&self, n: usize) -> Line<'a> {
        let cut = n.min(self.text.len());
        Line {
            text: &self.text[cut..],
            number: self.number,
            offset: self.offset + cut,
        }
    }
}

pub(crate) fn indent_of(text: &str) -> usize {
    text.bytes().take_while(|b| *b == b' ').count()
}

/// Opening line of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fence {
    pub indent: usize,
    pub marker: u8,
    pub len: usize,
    pub info: Option<String>,
}

impl Fence {
    /// Recognize an opening fence (three or more backticks or tildes).
    pub fn open(text: &str) -> Option<Fence> {
        let indent = indent_of(text);
        if indent > 3 {
            return None;
        }
        let rest = &text[indent..];
        let marker = *rest.as_bytes().first()?;
        if marker != b'`' && marker != b'~' {
            return None;
        }
        let len = rest.bytes().take_while(|b| *b == marker).count();
        if len < 3 {
            return None;
        }
        let info = rest[len..].trim();
        if marker == b'`' && info.contains('`') {
            return None;
        }
        Some(Fence {
            indent,
            marker,
            len,
            info: (!info.is_empty()).then(|| info.to_string()),
        })
    }

    /// Check whether `text` closes this fence.
    pub fn is_closed_by(&self, text: &str) -> bool {
        let indent = indent_of(text);
        if indent > 3 {
            return false;
        }
        let rest = &text[indent..];
        let run = rest.bytes().take_while(|b| *b == self.marker).count();
        run >= self.len && rest[run..].trim().is_empty()
    }
}

/// Parse an ATX heading line into its level and title.
pub(crate) fn atx_heading(text: &str) -> Option<(u8, &str)> {
    let indent = indent_of(text);
    if indent > 3 {
        return None;
    }
    let rest = &text[indent..];
    let hashes = rest.bytes().take_while(|b| *b == b'#').count();
    if hashes == 0 || hashes > 6 {
        return None;
    }
    let after = &rest[hashes..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let mut title = after.trim();
    // Optional closing sequence: "## Title ##"
    let trimmed = title.trim_end_matches('#');
    if trimmed.is_empty() {
        title = "";
    } else if trimmed.len() != title.len() && trimmed.ends_with([' ', '\t']) {
        title = trimmed.trim_end();
    }
    Some((hashes as u8, title))
}

/// A list item marker at the start of a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ListMarker {
    pub indent: usize,
    pub ordered: bool,
    pub number: u64,
    /// Column where the item content begins
    pub content_offset: usize,
}

/// Recognize `-`/`*` bullets and `1.` numbered markers.
pub(crate) fn list_marker(text: &str) -> Option<ListMarker> {
    let indent = indent_of(text);
    let rest = &text[indent..];
    let bytes = rest.as_bytes();

    let (ordered, number, marker_len) = match bytes.first()? {
        b'-' | b'*' => (false, 0, 1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if digits > 9 || bytes.get(digits) != Some(&b'.') {
                return None;
            }
            let number = rest[..digits].parse().ok()?;
            (true, number, digits + 1)
        }
        _ => return None,
    };

    let after = &rest[marker_len..];
    if !after.is_empty() && !after.starts_with([' ', '\t']) {
        return None;
    }
    let spaces = after.bytes().take_while(|b| *b == b' ' || *b == b'\t').count();
    // Wide gaps mean indented content, which starts one column after the marker.
    let gap = if spaces == 0 || spaces > 4 || spaces == after.len() {
        1.min(after.len())
    } else {
        spaces
    };

    Some(ListMarker {
        indent,
        ordered,
        number,
        content_offset: indent + marker_len + gap,
    })
}

/// Check whether a line opens a block that interrupts a paragraph.
pub(crate) fn starts_block(text: &str) -> bool {
    Fence::open(text).is_some() || atx_heading(text).is_some() || list_marker(text).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_offsets() {
        let lines = Line::split("ab\r\ncd\n");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "ab");
        assert_eq!(lines[1].text, "cd");
        assert_eq!(lines[1].offset, 4);
        assert_eq!(lines[1].number, 2);
    }

    #[test]
    fn test_fence_open_and_close() {
        let fence = Fence::open("```rust").unwrap();
        assert_eq!(fence.info.as_deref(), Some("rust"));
        assert!(fence.is_closed_by("```"));
        assert!(fence.is_closed_by("````  "));
        assert!(!fence.is_closed_by("~~~"));
        assert!(!fence.is_closed_by("``` rust"));
        assert!(Fence::open("``").is_none());
        assert!(Fence::open("``` a`b").is_none());
    }

    #[test]
    fn test_atx_heading() {
        assert_eq!(atx_heading("# Title"), Some((1, "Title")));
        assert_eq!(atx_heading("### Deep ###"), Some((3, "Deep")));
        assert_eq!(atx_heading("##"), Some((2, "")));
        assert_eq!(atx_heading("#hashtag"), None);
        assert_eq!(atx_heading("####### seven"), None);
        assert_eq!(atx_heading("# C#"), Some((1, "C#")));
    }

    #[test]
    fn test_list_marker() {
        let m = list_marker("- item").unwrap();
        assert!(!m.ordered);
        assert_eq!(m.content_offset, 2);

        let m = list_marker("  12. twelve").unwrap();
        assert!(m.ordered);
        assert_eq!(m.number, 12);
        assert_eq!(m.content_offset, 6);

        assert!(list_marker("-item").is_none());
        assert!(list_marker("---").is_none());
        assert!(list_marker("1) item").is_none());
        assert!(list_marker("-").is_some());
    }
}
