//! Inline content parsing (text runs and links).

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Node;

fn link_regex() -> &'static Regex {
    static LINK: OnceLock<Regex> = OnceLock::new();
    LINK.get_or_init(|| {
        Regex::new(r#"\[([^\[\]]*)\]\(\s*<?([^\s()<>]*)>?(?:\s+"[^"]*")?\s*\)"#)
            .expect("link pattern compiles")
    })
}

/// Split a run of inline text into `Text` and `Link` nodes.
///
/// Emphasis and inline code markers are left in the text as written.
pub fn parse_inline(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in link_regex().captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        if whole.start() > last {
            nodes.push(Node::text(&text[last..whole.start()]));
        }

        let label = caps.get(1).map_or("", |m| m.as_str());
        let target = caps.get(2).map_or("", |m| m.as_str());
        nodes.push(if label.is_empty() {
            Node::Link {
                target: target.to_string(),
                children: Vec::new(),
            }
        } else {
            Node::link(target, label)
        });
        last = whole.end();
    }

    if last < text.len() {
        nodes.push(Node::text(&text[last..]));
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_inline("just text"), vec![Node::text("just text")]);
        assert!(parse_inline("").is_empty());
    }

    #[test]
    fn test_link_split() {
        let nodes = parse_inline("read [the docs](https://docs.rs) today");
        assert_eq!(
            nodes,
            vec![
                Node::text("read "),
                Node::link("https://docs.rs", "the docs"),
                Node::text(" today"),
            ]
        );
    }

    #[test]
    fn test_link_with_title_and_brackets() {
        let nodes = parse_inline(r#"[a](<b.md> "Title")"#);
        assert_eq!(nodes, vec![Node::link("b.md", "a")]);
    }

    #[test]
    fn test_empty_label() {
        let nodes = parse_inline("[](x)");
        assert_eq!(
            nodes,
            vec![Node::Link {
                target: "x".into(),
                children: vec![]
            }]
        );
    }

    #[test]
    fn test_unclosed_link_is_text() {
        assert_eq!(parse_inline("[oops](x"), vec![Node::text("[oops](x")]);
    }
}
