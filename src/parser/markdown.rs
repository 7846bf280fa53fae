//! Block-level Markdown parser.
//!
//! Supports the dialect the page renderer understands: ATX headings,
//! paragraphs separated by blank lines, `-`/`*` bullet lists, `1.` numbered
//! lists, fenced code blocks and inline links. Any structural defect aborts
//! the parse; there is no partial recovery.

use crate::error::{Error, Result};
use crate::model::Node;

use super::inline::parse_inline;
use super::lines::{atx_heading, list_marker, starts_block, Fence, Line, ListMarker};

/// Deepest list nesting accepted before the parse is rejected.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse Markdown bytes into a document tree.
pub fn parse_markdown(bytes: &[u8]) -> Result<Node> {
    DocumentParser::new().parse(bytes)
}

/// Structured-text parser.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    _private: (),
}

impl DocumentParser {
    /// Create a new parser.
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// Parse UTF-8 Markdown into a `Node::Document`.
    pub fn parse(&self, bytes: &[u8]) -> Result<Node> {
        let input = std::str::from_utf8(bytes).map_err(|e| Error::InvalidUtf8 {
            offset: e.valid_up_to(),
        })?;
        self.parse_str(input)
    }

    /// Parse an already-decoded string.
    pub fn parse_str(&self, input: &str) -> Result<Node> {
        let input = input.strip_prefix('\u{FEFF}').unwrap_or(input);
        let lines = Line::split(input);
        let children = parse_blocks(&lines, 0)?;
        log::debug!(
            "Parsed {} lines into {} top-level blocks",
            lines.len(),
            children.len()
        );
        Ok(Node::document(children))
    }
}

fn parse_blocks(lines: &[Line<'_>], depth: usize) -> Result<Vec<Node>> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        if line.is_blank() {
            i += 1;
            continue;
        }

        if let Some(fence) = Fence::open(line.text) {
            let (node, next) = parse_fence(lines, i, &fence)?;
            blocks.push(node);
            i = next;
            continue;
        }

        if let Some((level, title)) = atx_heading(line.text) {
            blocks.push(Node::heading(level, parse_inline(title)));
            i += 1;
            continue;
        }

        if let Some(marker) = list_marker(line.text) {
            let (node, next) = parse_list(lines, i, marker, depth)?;
            blocks.push(node);
            i = next;
            continue;
        }

        let (node, next) = parse_paragraph(lines, i);
        blocks.push(node);
        i = next;
    }

    Ok(blocks)
}

fn parse_fence(lines: &[Line<'_>], start: usize, fence: &Fence) -> Result<(Node, usize)> {
    let open = lines[start];
    let mut body = Vec::new();

    for (idx, line) in lines.iter().enumerate().skip(start + 1) {
        if fence.is_closed_by(line.text) {
            let literal = body.join("\n");
            return Ok((Node::code_block(fence.info.clone(), literal), idx + 1));
        }
        body.push(line.dedent(fence.indent).text);
    }

    Err(Error::parse(
        open.number,
        open.offset,
        "unterminated code fence",
    ))
}

fn parse_paragraph(lines: &[Line<'_>], start: usize) -> (Node, usize) {
    let mut parts = vec![lines[start].text.trim()];
    let mut i = start + 1;

    while i < lines.len() && !lines[i].is_blank() && !starts_block(lines[i].text) {
        parts.push(lines[i].text.trim());
        i += 1;
    }

    (Node::paragraph(parse_inline(&parts.join(" "))), i)
}

fn parse_list(
    lines: &[Line<'_>],
    start: usize,
    first: ListMarker,
    depth: usize,
) -> Result<(Node, usize)> {
    if depth >= MAX_NESTING_DEPTH {
        let line = lines[start];
        return Err(Error::parse(
            line.number,
            line.offset,
            format!("lists nested deeper than {} levels", MAX_NESTING_DEPTH),
        ));
    }

    let mut items = Vec::new();
    let mut i = start;
    let mut marker = first;

    loop {
        let (item, next) = parse_list_item(lines, i, marker, depth)?;
        items.push(item);
        i = next;

        let mut j = i;
        while j < lines.len() && lines[j].is_blank() {
            j += 1;
        }
        match lines.get(j).and_then(|l| list_marker(l.text)) {
            Some(m) if m.ordered == first.ordered && m.indent < first.content_offset => {
                marker = m;
                i = j;
            }
            _ => break,
        }
    }

    Ok((
        Node::List {
            ordered: first.ordered,
            start: if first.ordered { first.number } else { 0 },
            items,
        },
        i,
    ))
}

fn parse_list_item(
    lines: &[Line<'_>],
    start: usize,
    marker: ListMarker,
    depth: usize,
) -> Result<(Node, usize)> {
    let width = marker.content_offset;
    let mut body = vec![lines[start].skip(width)];
    let mut i = start + 1;
    let mut open_fence: Option<Fence> = Fence::open(body[0].text);

    while i < lines.len() {
        let line = lines[i];

        if let Some(fence) = &open_fence {
            // Fenced content belongs to the item until the fence closes.
            let inner = line.dedent(width);
            if fence.is_closed_by(inner.text) {
                open_fence = None;
            }
            body.push(inner);
            i += 1;
            continue;
        }

        if line.is_blank() {
            let next = lines[i..].iter().position(|l| !l.is_blank()).map(|p| i + p);
            match next {
                Some(j) if lines[j].indent() >= width => {
                    body.extend(lines[i..j].iter().map(|l| l.dedent(width)));
                    i = j;
                    continue;
                }
                _ => break,
            }
        }

        if line.indent() >= width {
            let inner = line.dedent(width);
            open_fence = Fence::open(inner.text);
            body.push(inner);
            i += 1;
            continue;
        }

        // Lazy continuation of the item's paragraph.
        let prev_blank = body.last().map_or(true, |l| l.is_blank());
        if !prev_blank && !starts_block(line.text) {
            body.push(line.dedent(line.indent()));
            i += 1;
            continue;
        }

        break;
    }

    let mut children = Vec::new();
    for (idx, block) in parse_blocks(&body, depth + 1)?.into_iter().enumerate() {
        match block {
            // Tight item text sits directly in the item.
            Node::Paragraph { children: inline } if idx == 0 => children.extend(inline),
            other => children.push(other),
        }
    }

    Ok((Node::ListItem { children }, i))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Vec<Node> {
        match parse_markdown(src.as_bytes()).unwrap() {
            Node::Document { children } => children,
            other => panic!("Expected document, got {:?}", other),
        }
    }

    #[test]
    fn test_headings_and_paragraphs() {
        let blocks = parse("# Title\n\nSome text\ncontinued.\n\n## Next\n");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0], Node::heading(1, vec![Node::text("Title")]));
        assert_eq!(
            blocks[1],
            Node::paragraph(vec![Node::text("Some text continued.")])
        );
        assert!(matches!(blocks[2], Node::Heading { level: 2, .. }));
    }

    #[test]
    fn test_heading_interrupts_paragraph() {
        let blocks = parse("text\n# Heading");
        assert_eq!(blocks.len(), 2);
        assert!(matches!(blocks[1], Node::Heading { level: 1, .. }));
    }

    #[test]
    fn test_seven_hashes_is_paragraph() {
        let blocks = parse("####### not a heading");
        assert!(matches!(blocks[0], Node::Paragraph { .. }));
    }

    #[test]
    fn test_fenced_code_is_literal() {
        let blocks = parse("```rust\n# not a heading\n- not a list\n```\n");
        assert_eq!(
            blocks,
            vec![Node::code_block(
                Some("rust".into()),
                "# not a heading\n- not a list"
            )]
        );
    }

    #[test]
    fn test_unterminated_fence_is_fatal() {
        let err = parse_markdown(b"intro\n\n```\ncode\n").unwrap_err();
        match err {
            Error::Parse { line, offset, .. } => {
                assert_eq!(line, 3);
                assert_eq!(offset, 7);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let ok = format!("{}x\n", "- ".repeat(MAX_NESTING_DEPTH));
        assert!(parse_markdown(ok.as_bytes()).is_ok());

        let deep = format!("{}x\n", "- ".repeat(MAX_NESTING_DEPTH + 1));
        match parse_markdown(deep.as_bytes()).unwrap_err() {
            Error::Parse { line, offset, .. } => {
                assert_eq!(line, 1);
                assert_eq!(offset, 2 * MAX_NESTING_DEPTH);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_pathological_nesting_is_an_error() {
        let src = format!("{}x\n", "- ".repeat(20_000));
        let err = parse_markdown(src.as_bytes()).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_invalid_utf8() {
        let err = parse_markdown(b"ok\xff").unwrap_err();
        assert!(matches!(err, Error::InvalidUtf8 { offset: 2 }));
    }

    #[test]
    fn test_bullet_list() {
        let blocks = parse("- one\n* two\n- three [link](http://x)\n");
        match &blocks[0] {
            Node::List { ordered, items, .. } => {
                assert!(!ordered);
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Node::ListItem { children: vec![Node::text("one")] });
                assert!(matches!(items[2].children()[1], Node::Link { .. }));
            }
            other => panic!("Expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_ordered_list_start() {
        let blocks = parse("3. three\n4. four\n");
        assert!(matches!(
            &blocks[0],
            Node::List { ordered: true, start: 3, items } if items.len() == 2
        ));
    }

    #[test]
    fn test_list_kinds_do_not_mix() {
        let blocks = parse("- bullet\n1. number\n");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn test_nested_list() {
        let blocks = parse("- outer\n  - inner\n- second\n");
        let Node::List { items, .. } = &blocks[0] else {
            panic!("Expected list");
        };
        assert_eq!(items.len(), 2);
        let children = items[0].children();
        assert_eq!(children[0], Node::text("outer"));
        assert!(matches!(children[1], Node::List { .. }));
    }

    #[test]
    fn test_loose_list_and_code_in_item() {
        let blocks = parse("- a\n\n  ```\n  x\n  ```\n\n- b\n\nafter\n");
        assert_eq!(blocks.len(), 2);
        let Node::List { items, .. } = &blocks[0] else {
            panic!("Expected list");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].children()[1], Node::code_block(None, "x"));
        assert!(matches!(blocks[1], Node::Paragraph { .. }));
    }

    #[test]
    fn test_lazy_continuation() {
        let blocks = parse("- item starts\nand continues\n");
        let Node::List { items, .. } = &blocks[0] else {
            panic!("Expected list");
        };
        assert_eq!(items[0].children(), &[Node::text("item starts and continues")]);
    }

    #[test]
    fn test_source_order_preserved() {
        let blocks = parse("# A\n\np1\n\n## B\n\np2\n");
        let kinds: Vec<_> = blocks.iter().map(|b| b.plain_text()).collect();
        assert_eq!(kinds, vec!["A", "p1", "B", "p2"]);
    }
}
