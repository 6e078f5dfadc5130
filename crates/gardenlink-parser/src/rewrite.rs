//! Document rewriting: wiki-link tokens become link nodes or literal text.
//!
//! [`Rewriter::rewrite_span`] works on one text span and never looks at its
//! neighbours. [`Rewriter::render_markdown`] is the document-tree adapter: it
//! runs `pulldown-cmark`, rewrites each text event outside code and existing
//! links, and renders HTML.

use gardenlink_core::{LinkResolver, Node, RenderOptions};
use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};

use crate::scanner::{Segment, has_wikilink, scan};

/// Rewrites spans against a resolver
pub struct Rewriter<'r, R: LinkResolver + ?Sized> {
    resolver: &'r R,
    options: RenderOptions,
}

impl<'r, R: LinkResolver + ?Sized> Rewriter<'r, R> {
    /// Rewriter with default render options (`/notes/{slug}`, `wiki-link`)
    pub fn new(resolver: &'r R) -> Self {
        Self::with_options(resolver, RenderOptions::default())
    }

    pub fn with_options(resolver: &'r R, options: RenderOptions) -> Self {
        Self { resolver, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Rewrite one text span into text and link nodes.
    ///
    /// Resolved tokens become [`Node::Link`] carrying the resolved slug and the
    /// label (or raw target). Unresolved tokens become text showing the same.
    /// Adjacent text is merged into a single node.
    pub fn rewrite_span(&self, span: &str) -> Vec<Node> {
        let mut nodes: Vec<Node> = Vec::new();

        for segment in scan(span) {
            match segment {
                Segment::Text(text) => push_text(&mut nodes, &text),
                Segment::Link(token) => match self.resolver.resolve(&token.raw_target) {
                    Some(resolved) => nodes.push(Node::Link {
                        slug: resolved.slug,
                        label: token.display_text().to_string(),
                        class: self.options.link_class.clone(),
                    }),
                    None => {
                        log::debug!("Unresolved wiki-link target '{}'", token.raw_target);
                        push_text(&mut nodes, token.display_text());
                    }
                },
            }
        }

        nodes
    }

    /// Rewrite a span and render it straight to HTML.
    pub fn render_span(&self, span: &str) -> String {
        render_nodes(&self.rewrite_span(span), &self.options)
    }

    /// Render a Markdown document to HTML with wiki-links rewritten.
    ///
    /// Text inside fenced or indented code blocks, inline code, existing
    /// Markdown links and image alt text is left untouched.
    pub fn render_markdown(&self, document: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TASKLISTS);
        options.insert(Options::ENABLE_FOOTNOTES);

        let parser = TextMergeStream::new(Parser::new_ext(document, options));

        let mut events: Vec<Event<'_>> = Vec::new();
        let mut code_depth = 0usize;
        let mut link_depth = 0usize;

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    code_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::CodeBlock) => {
                    code_depth = code_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
                    link_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Link | TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Text(text)
                    if code_depth == 0 && link_depth == 0 && has_wikilink(&text) =>
                {
                    events.extend(self.node_events(self.rewrite_span(&text)));
                }
                other => events.push(other),
            }
        }

        let mut out = String::with_capacity(document.len() + document.len() / 4);
        html::push_html(&mut out, events.into_iter());
        out
    }

    fn node_events(&self, nodes: Vec<Node>) -> Vec<Event<'static>> {
        let mut events = Vec::with_capacity(nodes.len() * 3);
        for node in nodes {
            match node {
                Node::Text { value } => events.push(Event::Text(CowStr::from(value))),
                Node::Link { slug, label, class } => {
                    events.push(Event::InlineHtml(CowStr::from(open_anchor(
                        &self.options.href(&slug),
                        &class,
                    ))));
                    events.push(Event::Text(CowStr::from(label)));
                    events.push(Event::InlineHtml(CowStr::Borrowed("</a>")));
                }
            }
        }
        events
    }
}

/// Rewrite one span with default render options.
pub fn rewrite_span<R: LinkResolver + ?Sized>(span: &str, resolver: &R) -> Vec<Node> {
    Rewriter::new(resolver).rewrite_span(span)
}

/// Render a Markdown document with default render options.
pub fn render_markdown<R: LinkResolver + ?Sized>(document: &str, resolver: &R) -> String {
    Rewriter::new(resolver).render_markdown(document)
}

/// Render nodes to an HTML fragment.
///
/// ```
/// use gardenlink_core::{Node, RenderOptions};
/// use gardenlink_parser::render_nodes;
///
/// let nodes = vec![
///     Node::text("See "),
///     Node::Link { slug: "b".into(), label: "B".into(), class: "wiki-link".into() },
/// ];
/// assert_eq!(
///     render_nodes(&nodes, &RenderOptions::default()),
///     r#"See <a href="/notes/b" class="wiki-link">B</a>"#
/// );
/// ```
pub fn render_nodes(nodes: &[Node], options: &RenderOptions) -> String {
    let mut out = String::new();
    for node in nodes {
        match node {
            Node::Text { value } => out.push_str(&escape_html(value)),
            Node::Link { slug, label, class } => {
                out.push_str(&open_anchor(&options.href(slug), class));
                out.push_str(&escape_html(label));
                out.push_str("</a>");
            }
        }
    }
    out
}

fn open_anchor(href: &str, class: &str) -> String {
    format!(
        "<a href=\"{}\" class=\"{}\">",
        escape_html(href),
        escape_html(class)
    )
}

fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text { value }) = nodes.last_mut() {
        value.push_str(text);
    } else {
        nodes.push(Node::text(text));
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
