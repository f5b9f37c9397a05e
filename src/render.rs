//! Depth-first renderer from a [`Node`] tree to annotated text.

use serde::Serialize;
use tracing::{debug, trace};

use crate::list::{self, ListKind, ListMetrics, ListRange, ListStack};
use crate::node::{Node, NodeKind};
use crate::style::StylePolicy;
use crate::writer::{Annotation, TextWriter};

const THEMATIC_BREAK: &str = "---\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Render soft line breaks as line breaks instead of spaces.
    pub soft_breaks_as_hard_breaks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            soft_breaks_as_hard_breaks: true,
        }
    }
}

/// What an annotation applies to its range.
///
/// `Style` carries the policy's descriptor for a node; the other variants
/// are layout produced by the renderer for list items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Attribute<S> {
    Style(S),
    /// Absolute font size in pixels.
    FontSize(u32),
    /// Fixed-width list prefix: `digits` slots of `digit_width` each.
    ListPrefix {
        digits: u32,
        digit_width: u32,
        color: String,
    },
    /// Left margin of the first line and of the following lines.
    LeadingMargin { first: u32, rest: u32 },
    TabStop(u32),
}

/// Rendered text with its annotations, children before parents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rendered<S> {
    pub text: String,
    pub annotations: Vec<Annotation<Attribute<S>>>,
    /// Ranges of every list in the order the lists finished.
    pub list_ranges: Vec<ListRange>,
}

impl<S> Rendered<S> {
    /// Policy styles with their ranges.
    pub fn styles(&self) -> impl Iterator<Item = (&S, usize, usize)> {
        self.annotations.iter().filter_map(|a| match &a.attribute {
            Attribute::Style(style) => Some((style, a.start, a.end)),
            _ => None,
        })
    }

    /// Text covered by an annotation.
    pub fn slice(&self, annotation: &Annotation<Attribute<S>>) -> &str {
        self.text.get(annotation.start..annotation.end).unwrap_or("")
    }
}

/// State owned by a single render call.
struct Traversal<S> {
    writer: TextWriter<Attribute<S>>,
    lists: ListStack,
    list_ranges: Vec<ListRange>,
}

impl<S> Traversal<S> {
    fn new() -> Self {
        Self {
            writer: TextWriter::new(),
            lists: ListStack::new(),
            list_ranges: Vec::new(),
        }
    }
}

/// Renders node trees with a style policy.
///
/// The renderer holds no per-document state, so one value can render any
/// number of documents.
pub struct Renderer<'a, P> {
    policy: &'a P,
    options: RenderOptions,
    metrics: ListMetrics,
}

impl<'a, P: StylePolicy> Renderer<'a, P> {
    pub fn new(policy: &'a P) -> Self {
        Self {
            policy,
            options: RenderOptions::default(),
            metrics: policy.list_metrics(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// Node kinds this renderer handles.
    pub fn node_kinds() -> &'static [NodeKind] {
        &NodeKind::ALL
    }

    /// Render a tree. An absent root renders nothing.
    ///
    /// The tree must be finite; nodes own their children, so cycles cannot
    /// be expressed.
    pub fn render(&self, root: Option<&Node>) -> Rendered<P::Style> {
        let mut t = Traversal::new();
        if let Some(node) = root {
            self.visit(node, &mut t);
        }
        debug_assert_eq!(t.writer.outstanding(), 0);

        let shift = t.writer.leading_trim();
        let (text, annotations) = t.writer.finish();
        let len = text.len();
        let list_ranges = t
            .list_ranges
            .into_iter()
            .map(|r| ListRange {
                start: r.start.saturating_sub(shift).min(len),
                end: r.end.saturating_sub(shift).min(len),
            })
            .collect();

        debug!(
            bytes = len,
            annotations = annotations.len(),
            "rendered document"
        );
        Rendered {
            text,
            annotations,
            list_ranges,
        }
    }

    fn visit(&self, node: &Node, t: &mut Traversal<P::Style>) {
        trace!(kind = ?node.kind(), at = t.writer.cursor(), "visit");
        match node {
            Node::Document { children } => {
                t.writer.save_cursor();
                self.visit_children(children, t);
                self.close(node, t);
            }
            Node::Heading { children, .. } => self.block(node, children, true, t),
            Node::Paragraph {
                outermost,
                children,
            } => self.block(node, children, *outermost, t),
            Node::BlockQuote { nested, children } => {
                if *nested {
                    t.writer.line();
                }
                t.writer.save_cursor();
                for (i, child) in children.iter().enumerate() {
                    self.visit(child, t);
                    if needs_break(child, children.get(i + 1)) {
                        t.writer.line_if_needed();
                    }
                }
                t.writer.line_if_needed();
                let start = t.writer.retrieve_cursor();
                // Nested quotes are covered by the outermost quote's style.
                if !*nested {
                    let style = self.policy.style_for(node);
                    t.writer.set_from(Attribute::Style(style), start);
                }
            }
            Node::OrderedList {
                start, children, ..
            } => {
                self.list(node, ListKind::Ordered, *start, children, t);
            }
            Node::BulletList { children, .. } => {
                self.list(node, ListKind::Bullet, 1, children, t);
            }
            Node::ListItem { children } => self.list_item(node, children, t),
            Node::FencedCodeBlock { literal, .. }
            | Node::IndentedCodeBlock { literal }
            | Node::HtmlBlock { literal }
            | Node::Code { literal }
            | Node::HtmlInline { literal }
            | Node::Text { literal } => {
                t.writer.save_cursor();
                t.writer.write(literal);
                self.close(node, t);
            }
            Node::Link { children, .. }
            | Node::Image { children, .. }
            | Node::Emphasis { children }
            | Node::StrongEmphasis { children } => {
                t.writer.save_cursor();
                self.visit_children(children, t);
                self.close(node, t);
            }
            Node::SoftLineBreak => {
                t.writer.save_cursor();
                if self.options.soft_breaks_as_hard_breaks {
                    t.writer.line();
                } else {
                    t.writer.space();
                }
                self.close(node, t);
            }
            Node::HardLineBreak => {
                t.writer.save_cursor();
                t.writer.line();
                self.close(node, t);
            }
            Node::ThematicBreak => {
                t.writer.save_cursor();
                t.writer.write(THEMATIC_BREAK);
                self.close(node, t);
            }
        }
    }

    fn visit_children(&self, children: &[Node], t: &mut Traversal<P::Style>) {
        for child in children {
            self.visit(child, t);
        }
    }

    /// Retrieve the saved cursor and annotate the node's range with its style.
    fn close(&self, node: &Node, t: &mut Traversal<P::Style>) {
        let start = t.writer.retrieve_cursor();
        let style = self.policy.style_for(node);
        t.writer.set_from(Attribute::Style(style), start);
    }

    fn block(&self, node: &Node, children: &[Node], break_after: bool, t: &mut Traversal<P::Style>) {
        t.writer.save_cursor();
        self.visit_children(children, t);
        if break_after {
            t.writer.line_if_needed();
        }
        self.close(node, t);
    }

    fn list(
        &self,
        node: &Node,
        kind: ListKind,
        start_value: u64,
        children: &[Node],
        t: &mut Traversal<P::Style>,
    ) -> ListRange {
        t.writer.save_cursor();

        // Lists never share a line with an enclosing list's item.
        if !t.lists.is_empty() {
            t.writer.line();
        }

        let items = list::count_items(children);
        t.lists.enter(kind, start_value, items);
        trace!(?kind, items, depth = t.lists.current().map(|l| l.depth), "enter list");

        self.visit_children(children, t);
        t.writer.line_if_needed();

        let start = t.writer.retrieve_cursor();
        let style = self.policy.style_for(node);
        t.writer.set_from(Attribute::Style(style), start);

        t.lists.leave();
        let range = ListRange {
            start,
            end: t.writer.cursor(),
        };
        t.list_ranges.push(range);
        range
    }

    fn list_item(&self, node: &Node, children: &[Node], t: &mut Traversal<P::Style>) {
        let prefix_start = t.writer.save_cursor();
        let prefix = t.lists.next_prefix(&self.metrics);
        let margin = self.metrics.content_margin;

        t.writer.write(&prefix.text);
        t.writer
            .set_from(Attribute::FontSize(self.metrics.base_font_size), prefix_start);
        t.writer.set_from(
            Attribute::ListPrefix {
                digits: prefix.digits,
                digit_width: prefix.digit_width,
                color: self.metrics.prefix_color.clone(),
            },
            prefix_start,
        );

        t.writer.tab_if_needed();
        let nested = self.item_children(children, t);
        t.writer.line_if_needed();

        let start = t.writer.retrieve_cursor();
        let end = t.writer.cursor();
        let content = prefix.indentation.saturating_add(margin);
        let first_line = Attribute::LeadingMargin {
            first: prefix.indentation,
            rest: content,
        };

        // A break before the last character means the item spans several
        // lines or holds a nested list.
        match t.writer.find_line(start).filter(|&b| b + 1 < end) {
            Some(first_break) => {
                t.writer.set(first_line, start, first_break + 1);
                t.writer
                    .set(Attribute::TabStop(prefix.tab_location), start, first_break + 1);

                for (from, to) in continuation_segments(first_break, end, &nested) {
                    t.writer.set(
                        Attribute::LeadingMargin {
                            first: content,
                            rest: content,
                        },
                        from,
                        to,
                    );
                }
            }
            None => {
                t.writer.set(first_line, start, end);
                t.writer.set(Attribute::TabStop(prefix.tab_location), start, end);
            }
        }

        let style = self.policy.style_for(node);
        t.writer.set_from(Attribute::Style(style), start);
    }

    /// Render an item's children, returning the ranges of lists nested
    /// directly inside it.
    fn item_children(&self, children: &[Node], t: &mut Traversal<P::Style>) -> Vec<ListRange> {
        let mut nested = Vec::new();
        for (i, child) in children.iter().enumerate() {
            match child {
                Node::OrderedList {
                    start, children, ..
                } => nested.push(self.list(child, ListKind::Ordered, *start, children, t)),
                Node::BulletList { children, .. } => {
                    nested.push(self.list(child, ListKind::Bullet, 1, children, t))
                }
                _ => self.visit(child, t),
            }
            if needs_break(child, children.get(i + 1)) {
                t.writer.line_if_needed();
            }
        }
        nested
    }
}

/// Paragraphs inside items and quotes leave their line open. A following
/// block needs a break unless it starts its own line.
fn needs_break(child: &Node, next: Option<&Node>) -> bool {
    let open = matches!(
        child,
        Node::Paragraph {
            outermost: false,
            ..
        }
    );
    let breaks_itself = matches!(
        next,
        Some(
            Node::OrderedList { .. }
                | Node::BulletList { .. }
                | Node::BlockQuote { nested: true, .. }
        )
    );
    open && next.is_some() && !breaks_itself
}

/// Parts of an item after its first line that are not nested lists.
///
/// Starts at the first break and skips each nested list, whose items carry
/// their own margins.
fn continuation_segments(
    first_break: usize,
    end: usize,
    nested: &[ListRange],
) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut from = first_break;
    for range in nested {
        if range.end <= from {
            continue;
        }
        if range.start > from {
            segments.push((from, range.start.min(end)));
        }
        from = range.end;
    }
    if from < end {
        segments.push((from, end));
    }
    segments
}
