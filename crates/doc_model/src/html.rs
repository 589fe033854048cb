//! Lenient HTML reader
//!
//! Turns the editor's HTML output into a [`ContentNode`] tree. The reader
//! accepts what browsers accept in practice: void elements without a
//! closing slash, unbalanced or stray end tags, HTML named entities and
//! bare ampersands. A hard tokenizer error ends reading but keeps what was
//! read so far.

use crate::ContentNode;
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::BTreeMap;

/// Elements that never have content or an end tag
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Start tags that end an open sibling: `(tag, closes, stops at)`
const IMPLIED_ENDS: &[(&str, &[&str], &[&str])] = &[
    ("li", &["li"], &["ul", "ol"]),
    ("tr", &["tr"], &["table", "thead", "tbody", "tfoot"]),
    ("td", &["td", "th"], &["tr", "table"]),
    ("th", &["td", "th"], &["tr", "table"]),
];

struct OpenElement {
    tag: String,
    attrs: BTreeMap<String, String>,
    children: Vec<ContentNode>,
}

impl OpenElement {
    fn new(tag: String, attrs: BTreeMap<String, String>) -> Self {
        Self {
            tag,
            attrs,
            children: Vec::new(),
        }
    }

    fn into_node(self) -> ContentNode {
        ContentNode::Element {
            tag: self.tag,
            attrs: self.attrs,
            children: self.children,
        }
    }
}

/// Parse an HTML fragment into a `body` rooted content tree
pub fn parse_html(html: &str) -> ContentNode {
    let mut reader = Reader::from_str(html);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = false;
    config.allow_unmatched_ends = true;

    let mut stack = vec![OpenElement::new("body".to_string(), BTreeMap::new())];
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let (tag, attrs) = read_start(e);
                if is_void(&tag) {
                    push_child(&mut stack, element(tag, attrs));
                } else {
                    close_implied(&mut stack, &tag);
                    stack.push(OpenElement::new(tag, attrs));
                }
            }
            Ok(Event::Empty(ref e)) => {
                let (tag, attrs) = read_start(e);
                push_child(&mut stack, element(tag, attrs));
            }
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
                // Stray end tags are dropped; a match closes every element above it.
                if let Some(pos) = stack.iter().rposition(|open| open.tag == name) {
                    if pos > 0 {
                        while stack.len() > pos {
                            close_top(&mut stack);
                        }
                    }
                }
            }
            Ok(Event::Text(ref e)) => {
                let raw = String::from_utf8_lossy(e);
                push_child(&mut stack, ContentNode::text(decode_entities(&raw)));
            }
            Ok(Event::CData(ref e)) => {
                let raw = String::from_utf8_lossy(e);
                push_child(&mut stack, ContentNode::text(raw.into_owned()));
            }
            Ok(Event::Eof) => break,
            Err(err) => {
                tracing::warn!(
                    position = reader.buffer_position(),
                    "HTML input truncated at reader error: {}",
                    err
                );
                break;
            }
            _ => {}
        }
        buf.clear();
    }

    while stack.len() > 1 {
        close_top(&mut stack);
    }
    stack
        .pop()
        .map(OpenElement::into_node)
        .unwrap_or_else(|| ContentNode::root(Vec::new()))
}

fn read_start(e: &BytesStart) -> (String, BTreeMap<String, String>) {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_ascii_lowercase();
    let attrs = e
        .html_attributes()
        .filter_map(|a| a.ok())
        .map(|a| {
            let key = String::from_utf8_lossy(a.key.as_ref()).to_ascii_lowercase();
            let value = decode_entities(&String::from_utf8_lossy(&a.value));
            (key, value)
        })
        .collect();
    (tag, attrs)
}

fn element(tag: String, attrs: BTreeMap<String, String>) -> ContentNode {
    ContentNode::Element {
        tag,
        attrs,
        children: Vec::new(),
    }
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

fn push_child(stack: &mut [OpenElement], node: ContentNode) {
    if let Some(top) = stack.last_mut() {
        top.children.push(node);
    }
}

fn close_top(stack: &mut Vec<OpenElement>) {
    if let Some(done) = stack.pop() {
        push_child(stack, done.into_node());
    }
}

/// Close an unterminated sibling the way browsers do, e.g. `<li>a<li>b`
fn close_implied(stack: &mut Vec<OpenElement>, tag: &str) {
    let Some((_, closes, scope)) = IMPLIED_ENDS.iter().find(|(t, _, _)| *t == tag) else {
        return;
    };
    let open = stack
        .iter()
        .rposition(|e| closes.contains(&e.tag.as_str()) || scope.contains(&e.tag.as_str()));
    if let Some(pos) = open.filter(|&pos| pos > 0 && closes.contains(&stack[pos].tag.as_str())) {
        while stack.len() > pos {
            close_top(stack);
        }
    }
}

/// Resolve character references; text with a malformed reference is kept verbatim
fn decode_entities(raw: &str) -> String {
    match unescape_with(raw, html_entity) {
        Ok(text) => text.into_owned(),
        Err(_) => raw.to_string(),
    }
}

fn html_entity(name: &str) -> Option<&'static str> {
    let value = match name {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        "nbsp" => "\u{a0}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "hellip" => "\u{2026}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "bull" => "\u{2022}",
        "deg" => "\u{b0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "times" => "\u{d7}",
        "euro" => "\u{20ac}",
        _ => return None,
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(node: &ContentNode) -> Vec<String> {
        node.children()
            .iter()
            .filter_map(|c| c.tag().map(str::to_string))
            .collect()
    }

    #[test]
    fn test_parse_simple_fragment() {
        let root = parse_html("<h1>Intro</h1><p>Hello world.</p>");
        assert!(root.is_tag("body"));
        assert_eq!(tags(&root), vec!["h1", "p"]);
        assert_eq!(root.children()[1].text_content(), "Hello world.");
    }

    #[test]
    fn test_void_elements_without_slash() {
        let root = parse_html(r#"<p>a<br>b</p><img src="x.png" alt="X"><p>c</p>"#);
        assert_eq!(tags(&root), vec!["p", "img", "p"]);
        assert_eq!(root.children()[0].text_content(), "a\nb");
        assert_eq!(root.children()[1].attr("src"), Some("x.png"));
    }

    #[test]
    fn test_mismatched_end_tags_recover() {
        let root = parse_html("<p><strong>bold</p><p>next</p>");
        assert_eq!(tags(&root), vec!["p", "p"]);
        assert_eq!(root.children()[0].text_content(), "bold");
    }

    #[test]
    fn test_stray_end_tag_ignored() {
        let root = parse_html("</div><p>kept</p>");
        assert_eq!(tags(&root), vec!["p"]);
    }

    #[test]
    fn test_unclosed_elements_closed_at_eof() {
        let root = parse_html("<ul><li>one<li>two");
        assert_eq!(tags(&root), vec!["ul"]);
        assert_eq!(tags(&root.children()[0]), vec!["li", "li"]);
        assert_eq!(root.children()[0].children()[1].text_content(), "two");
    }

    #[test]
    fn test_new_item_closes_open_item_in_same_list() {
        let root = parse_html("<ul><li>a<ul><li>b<li>c</ul><li>d</ul>");
        let outer = &root.children()[0];
        assert_eq!(tags(outer), vec!["li", "li"]);
        assert_eq!(outer.children()[1].text_content(), "d");

        let inner = &outer.children()[0].children()[1];
        assert!(inner.is_tag("ul"));
        assert_eq!(tags(inner), vec!["li", "li"]);
    }

    #[test]
    fn test_unclosed_table_cells_and_rows() {
        let root = parse_html("<table><tr><th>Item<th>Cost<tr><td>Reactor<td>40</table>");
        let table = &root.children()[0];
        assert_eq!(tags(table), vec!["tr", "tr"]);
        assert_eq!(tags(&table.children()[0]), vec!["th", "th"]);
        assert_eq!(table.children()[1].children()[1].text_content(), "40");
    }

    #[test]
    fn test_entities() {
        let root = parse_html("<p>R&amp;D &ndash; 85&#37;&nbsp;target</p>");
        assert_eq!(root.text_content(), "R&D \u{2013} 85%\u{a0}target");
    }

    #[test]
    fn test_bare_ampersand_kept() {
        let root = parse_html("<h2>Problem Statement & Research Gap</h2>");
        assert_eq!(root.text_content(), "Problem Statement & Research Gap");
    }

    #[test]
    fn test_attribute_case_folded() {
        let root = parse_html(r#"<A HREF="https://example.com">x</A>"#);
        let link = &root.children()[0];
        assert!(link.is_tag("a"));
        assert_eq!(link.attr("href"), Some("https://example.com"));
    }
}
