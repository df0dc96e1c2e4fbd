//! Markdown renderer built on pulldown-cmark.
//!
//! Rendering is an event rewrite followed by pulldown-cmark's own HTML writer:
//! headings are buffered until their text is known so an id can be assigned,
//! and fenced code blocks are replaced by pre-rendered highlighted HTML.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::anchors::{AnchorIds, slugify};
use crate::highlight::Highlighter;
use crate::util::heading_level_to_num;
use crate::{BodyRenderer, RenderError};

/// Deepest heading level that receives a permalink.
const PERMALINK_DEPTH: u8 = 3;

/// Markdown renderer with per-document heading anchors.
///
/// Borrows a shared [`Highlighter`]; the highlighter is loaded once per build
/// while the anchor state is reset for every document.
pub struct MarkdownRenderer<'h> {
    highlighter: &'h Highlighter,
    anchors: AnchorIds,
}

/// Heading whose events are held back until its id is known.
struct PendingHeading<'a> {
    level: HeadingLevel,
    explicit_id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    events: Vec<Event<'a>>,
    text: String,
}

/// Fenced or indented code block being collected.
struct PendingCode {
    lang: Option<String>,
    source: String,
}

impl<'h> MarkdownRenderer<'h> {
    /// Create a renderer using the given highlighter for code blocks.
    #[must_use]
    pub fn new(highlighter: &'h Highlighter) -> Self {
        Self {
            highlighter,
            anchors: AnchorIds::new(),
        }
    }

    /// Parser options: GFM tables, strikethrough, task lists, footnotes and
    /// `{#id}` heading attributes.
    #[must_use]
    pub fn parser_options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_HEADING_ATTRIBUTES
    }

    /// Ids assigned so far in the current document.
    #[must_use]
    pub fn anchors(&self) -> &AnchorIds {
        &self.anchors
    }

    fn rewrite_events<'a>(&mut self, text: &'a str) -> Result<Vec<Event<'a>>, RenderError> {
        let mut events = Vec::new();
        let mut heading: Option<PendingHeading<'a>> = None;
        let mut code: Option<PendingCode> = None;

        for event in Parser::new_ext(text, Self::parser_options()) {
            if let Some(mut pending) = code.take() {
                match event {
                    Event::End(TagEnd::CodeBlock) => {
                        let html = self
                            .highlighter
                            .code_block(pending.lang.as_deref(), &pending.source)?;
                        events.push(Event::Html(CowStr::from(html)));
                    }
                    Event::Text(chunk) => {
                        pending.source.push_str(&chunk);
                        code = Some(pending);
                    }
                    _ => code = Some(pending),
                }
                continue;
            }

            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    heading = Some(PendingHeading {
                        level,
                        explicit_id: id,
                        classes,
                        attrs,
                        events: Vec::new(),
                        text: String::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(pending) = heading.take() {
                        self.finish_heading(pending, &mut events);
                    }
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .filter(|lang| !lang.is_empty())
                            .map(str::to_owned),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some(PendingCode {
                        lang,
                        source: String::new(),
                    });
                }
                other => match heading.as_mut() {
                    Some(pending) => {
                        if let Event::Text(t) | Event::Code(t) = &other {
                            pending.text.push_str(t);
                        }
                        pending.events.push(other);
                    }
                    None => events.push(other),
                },
            }
        }

        Ok(events)
    }

    fn finish_heading<'a>(&mut self, pending: PendingHeading<'a>, out: &mut Vec<Event<'a>>) {
        let base = match &pending.explicit_id {
            Some(explicit) => explicit.to_string(),
            None => slugify(&pending.text),
        };
        let id = self.anchors.claim(&base);

        let permalink = (heading_level_to_num(pending.level) <= PERMALINK_DEPTH).then(|| {
            format!(r##"<a class="headerlink" href="#{id}" title="Permanent link">&para;</a>"##)
        });

        out.push(Event::Start(Tag::Heading {
            level: pending.level,
            id: Some(CowStr::from(id)),
            classes: pending.classes,
            attrs: pending.attrs,
        }));
        out.extend(pending.events);
        if let Some(link) = permalink {
            out.push(Event::InlineHtml(CowStr::from(link)));
        }
        out.push(Event::End(TagEnd::Heading(pending.level)));
    }
}

impl BodyRenderer for MarkdownRenderer<'_> {
    fn begin_document(&mut self) {
        self.anchors.clear();
    }

    fn render_body(&mut self, text: &str) -> Result<String, RenderError> {
        let events = self.rewrite_events(text)?;
        let mut html = String::with_capacity(text.len() * 3 / 2);
        pulldown_cmark::html::push_html(&mut html, events.into_iter());
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn highlighter() -> Highlighter {
        Highlighter::new("InspiredGitHub").unwrap()
    }

    fn render(markdown: &str) -> String {
        let h = highlighter();
        let mut renderer = MarkdownRenderer::new(&h);
        renderer.begin_document();
        renderer.render_body(markdown).unwrap()
    }

    #[test]
    fn test_basic_paragraph() {
        assert_eq!(render("Hello, world!"), "<p>Hello, world!</p>\n");
    }

    #[test]
    fn test_heading_with_id_and_permalink() {
        assert_eq!(
            render("## Section Title"),
            "<h2 id=\"section-title\">Section Title<a class=\"headerlink\" \
             href=\"#section-title\" title=\"Permanent link\">&para;</a></h2>\n"
        );
    }

    #[test]
    fn test_deep_heading_has_no_permalink() {
        let html = render("#### Detail");
        assert_eq!(html, "<h4 id=\"detail\">Detail</h4>\n");
    }

    #[test]
    fn test_heading_with_inline_markup() {
        let html = render("## Install `npm` *now*");
        assert!(html.contains(r#"<h2 id="install-npm-now">"#));
        assert!(html.contains("<code>npm</code>"));
        assert!(html.contains("<em>now</em>"));
    }

    #[test]
    fn test_explicit_heading_id() {
        let html = render("## Rules {#reduction-rules}");
        assert!(html.contains(r#"<h2 id="reduction-rules">Rules"#));
    }

    #[test]
    fn test_duplicate_heading_ids() {
        let html = render("## FAQ\n\n## FAQ\n\n## FAQ");
        assert!(html.contains(r#"id="faq""#));
        assert!(html.contains(r#"id="faq-1""#));
        assert!(html.contains(r#"id="faq-2""#));
    }

    #[test]
    fn test_documents_do_not_share_anchor_ids() {
        let h = highlighter();
        let mut renderer = MarkdownRenderer::new(&h);

        renderer.begin_document();
        let first = renderer.render_body("# Overview\n\n## Rules").unwrap();
        renderer.begin_document();
        let second = renderer.render_body("# Overview\n\n## Rules").unwrap();

        assert_eq!(first, second);
        assert!(second.contains(r#"<h1 id="overview">"#));
        assert!(!second.contains("overview-1"));
    }

    #[test]
    fn test_anchor_state_leaks_without_begin_document() {
        let h = highlighter();
        let mut renderer = MarkdownRenderer::new(&h);

        renderer.begin_document();
        renderer.render_body("# Overview").unwrap();
        let second = renderer.render_body("# Overview").unwrap();

        assert!(second.contains(r#"<h1 id="overview-1">"#));
        assert_eq!(renderer.anchors().len(), 2);
    }

    #[test]
    fn test_fenced_code_is_highlighted() {
        let html = render("```rust\nfn main() {}\n```");
        assert!(html.contains("<div class=\"codehilite\">"));
        assert!(html.contains(r#"class="language-rust""#));
        assert!(html.contains("<span class=\"hl-"));
    }

    #[test]
    fn test_unknown_language_is_escaped() {
        let html = render("```praxis\nchannel q : Chan<Job>\n```");
        assert!(html.contains(r#"class="language-praxis""#));
        assert!(html.contains("Chan&lt;Job&gt;"));
    }

    #[test]
    fn test_code_block_does_not_produce_heading() {
        let html = render("```\n# not a heading\n```");
        assert!(!html.contains("<h1"));
        assert!(html.contains("# not a heading"));
    }

    #[test]
    fn test_table() {
        let html = render("| A | B |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
        assert!(html.contains("<th>A</th>"));
        assert!(html.contains("<td>2</td>"));
    }

    #[test]
    fn test_links_are_left_alone() {
        let html = render("[next](05-operational-semantics.html)");
        assert!(html.contains(r#"<a href="05-operational-semantics.html">next</a>"#));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let html = render("<div class=\"note\">kept</div>");
        assert!(html.contains("<div class=\"note\">kept</div>"));
    }
}
