//! Portable Text to HTML.
//!
//! Renders the block arrays stored in talk, workshop and profile documents.
//!
//! | block | HTML |
//! |---|---|
//! | `style: normal` | `<p>` |
//! | `style: h1`–`h6` | `<h1>`–`<h6>`, h2–h4 carry their anchor id |
//! | `style: blockquote` | `<blockquote>` |
//! | `listItem: bullet` / `number` | grouped into `<ul>` / `<ol>`, nested by `level` |
//! | any other `_type` | skipped |
//!
//! Span decorators `strong`, `em`, `code`, `underline` and `strike-through`
//! map to inline elements; any other mark is looked up in the block's
//! `markDefs` and rendered as a link when it is one. Unknown marks leave the
//! text unwrapped.
//!
//! Anchor ids come from [`crate::text::extract_headings`], matched by block
//! index, so the table of contents and the rendered headings always agree.

use crate::text::Heading;
use crate::types::{MarkDef, PortableBlock, Span};
use maud::{Markup, html};

/// Render `blocks` with anchor ids from `headings`.
pub fn render_blocks(blocks: &[PortableBlock], headings: &[Heading]) -> Markup {
    html! {
        @for chunk in chunks(blocks) {
            @match chunk {
                Chunk::Block(index, block) => {
                    (render_block(block, anchor(headings, index)))
                }
                Chunk::List(items) => {
                    (render_list(&items))
                }
            }
        }
    }
}

enum Chunk<'a> {
    Block(usize, &'a PortableBlock),
    List(Vec<&'a PortableBlock>),
}

/// Group consecutive list items so each run becomes one list element.
///
/// A top-level item of a different list type starts a new run.
fn chunks(blocks: &[PortableBlock]) -> Vec<Chunk<'_>> {
    let mut chunks: Vec<Chunk<'_>> = Vec::new();
    for (index, block) in blocks.iter().enumerate() {
        if !block.is_text() {
            continue;
        }
        let Some(kind) = block.list_item.as_deref() else {
            chunks.push(Chunk::Block(index, block));
            continue;
        };
        let continues = matches!(
            chunks.last(),
            Some(Chunk::List(items))
                if level(block) > 1 || items[0].list_item.as_deref() == Some(kind)
        );
        if let (true, Some(Chunk::List(items))) = (continues, chunks.last_mut()) {
            items.push(block);
        } else {
            chunks.push(Chunk::List(vec![block]));
        }
    }
    chunks
}

fn level(block: &PortableBlock) -> u32 {
    block.level.unwrap_or(1).max(1)
}

fn anchor(headings: &[Heading], index: usize) -> Option<&str> {
    headings
        .iter()
        .find(|h| h.block == index)
        .map(|h| h.id.as_str())
}

fn render_block(block: &PortableBlock, id: Option<&str>) -> Markup {
    let content = render_spans(block);
    match block.style() {
        "h1" => html! { h1 { (content) } },
        "h2" => html! { h2 id=[id] { (content) } },
        "h3" => html! { h3 id=[id] { (content) } },
        "h4" => html! { h4 id=[id] { (content) } },
        "h5" => html! { h5 { (content) } },
        "h6" => html! { h6 { (content) } },
        "blockquote" => html! { blockquote { p { (content) } } },
        _ if block.text().trim().is_empty() => html! {},
        _ => html! { p { (content) } },
    }
}

/// Render a run of list items. Items deeper than the first item's level
/// nest inside the preceding item.
fn render_list(items: &[&PortableBlock]) -> Markup {
    let Some(first) = items.first() else {
        return html! {};
    };
    let base = level(first);

    let mut entries: Vec<(&PortableBlock, Vec<&PortableBlock>)> = Vec::new();
    for &item in items {
        if level(item) > base {
            if let Some((_, nested)) = entries.last_mut() {
                nested.push(item);
                continue;
            }
        }
        entries.push((item, Vec::new()));
    }

    let body = html! {
        @for (item, nested) in &entries {
            li {
                (render_spans(item))
                @if !nested.is_empty() {
                    (render_list(nested))
                }
            }
        }
    };

    if first.list_item.as_deref() == Some("number") {
        html! { ol { (body) } }
    } else {
        html! { ul { (body) } }
    }
}

fn render_spans(block: &PortableBlock) -> Markup {
    html! {
        @for span in &block.children {
            (render_span(span, &block.mark_defs))
        }
    }
}

fn render_span(span: &Span, defs: &[MarkDef]) -> Markup {
    let mut markup = text_with_breaks(&span.text);
    // First mark is outermost.
    for mark in span.marks.iter().rev() {
        markup = wrap(markup, mark, defs);
    }
    markup
}

fn text_with_breaks(text: &str) -> Markup {
    html! {
        @for (i, line) in text.split('\n').enumerate() {
            @if i > 0 { br; }
            (line)
        }
    }
}

fn wrap(inner: Markup, mark: &str, defs: &[MarkDef]) -> Markup {
    match mark {
        "strong" => html! { strong { (inner) } },
        "em" => html! { em { (inner) } },
        "code" => html! { code { (inner) } },
        "underline" => html! { u { (inner) } },
        "strike-through" => html! { s { (inner) } },
        key => match defs.iter().find(|d| d.key == key) {
            Some(MarkDef {
                kind,
                href: Some(href),
                ..
            }) if kind == "link" => {
                let external = href.starts_with("http://") || href.starts_with("https://");
                html! {
                    a href=(href) rel=[external.then_some("noopener")] { (inner) }
                }
            }
            _ => inner,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::text::extract_headings;

    fn render(blocks: &[PortableBlock]) -> String {
        render_blocks(blocks, &extract_headings(blocks)).into_string()
    }

    #[test]
    fn paragraphs_and_headings() {
        let html = render(&[block("h2", "Intro"), block("normal", "Hello")]);
        assert_eq!(html, r#"<h2 id="intro">Intro</h2><p>Hello</p>"#);
    }

    #[test]
    fn only_h2_to_h4_get_ids() {
        let html = render(&[block("h1", "Top"), block("h5", "Deep"), block("h4", "Mid")]);
        assert!(html.contains("<h1>Top</h1>"));
        assert!(html.contains("<h5>Deep</h5>"));
        assert!(html.contains(r#"<h4 id="mid">Mid</h4>"#));
    }

    #[test]
    fn duplicate_heading_ids_match_toc() {
        let blocks = [block("h2", "Setup"), block("h2", "Setup")];
        let html = render(&blocks);
        assert!(html.contains(r#"id="setup""#));
        assert!(html.contains(r#"id="setup-2""#));
    }

    #[test]
    fn consecutive_list_items_are_grouped() {
        let html = render(&[
            list_item("bullet", "a"),
            list_item("bullet", "b"),
            block("normal", "between"),
            list_item("number", "one"),
            list_item("number", "two"),
        ]);
        assert_eq!(
            html,
            "<ul><li>a</li><li>b</li></ul><p>between</p><ol><li>one</li><li>two</li></ol>"
        );
    }

    #[test]
    fn list_type_change_starts_new_list() {
        let html = render(&[list_item("bullet", "a"), list_item("number", "one")]);
        assert_eq!(html, "<ul><li>a</li></ul><ol><li>one</li></ol>");
    }

    #[test]
    fn deeper_items_nest_in_previous_item() {
        let mut child = list_item("number", "child");
        child.level = Some(2);
        let html = render(&[list_item("bullet", "parent"), child, list_item("bullet", "next")]);
        assert_eq!(
            html,
            "<ul><li>parent<ol><li>child</li></ol></li><li>next</li></ul>"
        );
    }

    #[test]
    fn decorators_and_links() {
        let mut b = block("normal", "");
        b.children = vec![
            span("bold", &["strong"]),
            span(" and ", &[]),
            span("site", &["em", "l1"]),
            span(" gone", &["strike-through"]),
        ];
        b.mark_defs = vec![MarkDef {
            key: "l1".to_string(),
            kind: "link".to_string(),
            href: Some("https://jane.dev".to_string()),
        }];
        let html = render(&[b]);
        assert_eq!(
            html,
            r#"<p><strong>bold</strong> and <em><a href="https://jane.dev" rel="noopener">site</a></em><s> gone</s></p>"#
        );
    }

    #[test]
    fn unknown_marks_leave_text_plain() {
        let mut b = block("normal", "");
        b.children = vec![span("x", &["missing-def", "underline"])];
        assert_eq!(render(&[b]), "<p><u>x</u></p>");
    }

    #[test]
    fn text_is_escaped_and_newlines_break() {
        let html = render(&[block("normal", "<b>\nnext")]);
        assert_eq!(html, "<p>&lt;b&gt;<br>next</p>");
    }

    #[test]
    fn objects_and_empty_paragraphs_are_skipped() {
        let html = render(&[object_block("image"), block("normal", "  "), block("blockquote", "q")]);
        assert_eq!(html, "<blockquote><p>q</p></blockquote>");
    }
}
