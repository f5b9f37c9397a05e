use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};

use crate::node::Node;

const BULLET_MARKERS: [char; 3] = ['-', '*', '+'];

/// Parse markdown text into a document tree
pub fn parse(markdown: &str) -> Node {
    let parser = Parser::new_ext(markdown, Options::empty()).into_offset_iter();
    let mut state = ParseState::new();

    for (event, range) in parser {
        let source = markdown.get(range).unwrap_or("");
        process_event(event, source, &mut state);
    }

    state.finish()
}

/// A container whose children are still being collected
enum Pending {
    Document,
    Heading(u8),
    Paragraph { outermost: bool },
    BlockQuote { nested: bool },
    OrderedList { start: u64 },
    BulletList { marker: char },
    Item,
    FencedCode { info: String },
    IndentedCode,
    HtmlBlock,
    Link { destination: String, title: String },
    Image { destination: String, title: String },
    Emphasis,
    Strong,
    // Containers the renderer has no node for; children move to the parent
    Transparent,
}

struct Frame {
    pending: Pending,
    children: Vec<Node>,
    // Literal content of code and HTML blocks
    literal: String,
}

impl Frame {
    fn new(pending: Pending) -> Self {
        Self {
            pending,
            children: Vec::new(),
            literal: String::new(),
        }
    }

    fn collects_literal(&self) -> bool {
        matches!(
            self.pending,
            Pending::FencedCode { .. } | Pending::IndentedCode | Pending::HtmlBlock
        )
    }
}

struct ParseState {
    stack: Vec<Frame>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            stack: vec![Frame::new(Pending::Document)],
        }
    }

    fn top(&mut self) -> &mut Frame {
        if self.stack.is_empty() {
            self.stack.push(Frame::new(Pending::Document));
        }
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    fn push_node(&mut self, node: Node) {
        let top = self.top();
        // Adjacent text runs merge into one node
        if let (Node::Text { literal }, Some(Node::Text { literal: prev })) =
            (&node, top.children.last_mut())
        {
            prev.push_str(literal);
            return;
        }
        top.children.push(node);
    }

    /// Whether the innermost open container is a list item or block quote.
    fn in_container(&self) -> bool {
        matches!(
            self.stack.last().map(|frame| &frame.pending),
            Some(Pending::Item | Pending::BlockQuote { .. })
        )
    }

    fn in_block_quote(&self) -> bool {
        self.stack
            .iter()
            .any(|frame| matches!(frame.pending, Pending::BlockQuote { .. }))
    }

    fn open(&mut self, pending: Pending) {
        self.stack.push(Frame::new(pending));
    }

    fn close(&mut self) {
        // The document frame is only closed by `finish`
        if self.stack.len() <= 1 {
            return;
        }
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match build_node(frame) {
            Built::Node(node) => self.push_node(node),
            Built::Hoisted(children) => {
                for child in children {
                    self.push_node(child);
                }
            }
        }
    }

    fn finish(mut self) -> Node {
        while self.stack.len() > 1 {
            self.close();
        }
        let children = self.stack.pop().map(|f| f.children).unwrap_or_default();
        Node::Document { children }
    }
}

enum Built {
    Node(Node),
    Hoisted(Vec<Node>),
}

fn build_node(frame: Frame) -> Built {
    let Frame {
        pending,
        children,
        literal,
    } = frame;

    let node = match pending {
        Pending::Document => Node::Document { children },
        Pending::Heading(level) => Node::Heading { level, children },
        Pending::Paragraph { outermost } => Node::Paragraph {
            outermost,
            children,
        },
        Pending::BlockQuote { nested } => Node::BlockQuote { nested, children },
        Pending::OrderedList { start } => Node::OrderedList {
            start,
            tight: is_tight(&children),
            children,
        },
        Pending::BulletList { marker } => Node::BulletList {
            marker,
            tight: is_tight(&children),
            children,
        },
        Pending::Item => Node::ListItem { children },
        Pending::FencedCode { info } => Node::FencedCodeBlock { info, literal },
        Pending::IndentedCode => Node::IndentedCodeBlock { literal },
        Pending::HtmlBlock => Node::HtmlBlock { literal },
        Pending::Link { destination, title } => Node::Link {
            destination,
            title,
            children,
        },
        Pending::Image { destination, title } => Node::Image {
            destination,
            title,
            children,
        },
        Pending::Emphasis => Node::Emphasis { children },
        Pending::Strong => Node::StrongEmphasis { children },
        Pending::Transparent => return Built::Hoisted(children),
    };
    Built::Node(node)
}

/// Loose list items wrap their text in paragraphs; tight ones do not.
fn is_tight(items: &[Node]) -> bool {
    !items.iter().any(|item| {
        item.children()
            .iter()
            .any(|child| matches!(child, Node::Paragraph { .. }))
    })
}

fn bullet_marker(source: &str) -> char {
    source
        .trim_start()
        .chars()
        .next()
        .filter(|c| BULLET_MARKERS.contains(c))
        .unwrap_or('-')
}

fn process_event(event: Event, source: &str, state: &mut ParseState) {
    match event {
        Event::Start(tag) => start_tag(tag, source, state),
        // Every end event closes the innermost open container
        Event::End(_) => state.close(),

        // Text content
        Event::Text(text) => {
            let top = state.top();
            if top.collects_literal() {
                top.literal.push_str(&text);
            } else {
                state.push_node(Node::text(text.into_string()));
            }
        }

        // Inline code
        Event::Code(code) => {
            state.push_node(Node::Code {
                literal: code.into_string(),
            });
        }

        // Raw HTML
        Event::Html(html) => {
            let top = state.top();
            if top.collects_literal() {
                top.literal.push_str(&html);
            } else {
                state.push_node(Node::HtmlBlock {
                    literal: html.into_string(),
                });
            }
        }
        Event::InlineHtml(html) => {
            state.push_node(Node::HtmlInline {
                literal: html.into_string(),
            });
        }

        // Soft/hard breaks
        Event::SoftBreak => state.push_node(Node::SoftLineBreak),
        Event::HardBreak => state.push_node(Node::HardLineBreak),

        // Horizontal rule
        Event::Rule => state.push_node(Node::ThematicBreak),

        // Extensions are not enabled
        _ => {}
    }
}

fn start_tag(tag: Tag, source: &str, state: &mut ParseState) {
    let pending = match tag {
        Tag::Heading { level, .. } => Pending::Heading(heading_level_to_u8(level)),
        // Items and quotes end the line after their paragraphs themselves
        Tag::Paragraph => Pending::Paragraph {
            outermost: !state.in_container(),
        },
        Tag::BlockQuote(_) => Pending::BlockQuote {
            nested: state.in_block_quote(),
        },
        Tag::CodeBlock(CodeBlockKind::Fenced(info)) => Pending::FencedCode {
            info: info.into_string(),
        },
        Tag::CodeBlock(CodeBlockKind::Indented) => Pending::IndentedCode,
        Tag::HtmlBlock => Pending::HtmlBlock,
        Tag::List(Some(start)) => Pending::OrderedList { start },
        Tag::List(None) => Pending::BulletList {
            marker: bullet_marker(source),
        },
        Tag::Item => Pending::Item,
        Tag::Emphasis => Pending::Emphasis,
        Tag::Strong => Pending::Strong,
        Tag::Link {
            dest_url, title, ..
        } => Pending::Link {
            destination: dest_url.into_string(),
            title: title.into_string(),
        },
        Tag::Image {
            dest_url, title, ..
        } => Pending::Image {
            destination: dest_url.into_string(),
            title: title.into_string(),
        },
        _ => Pending::Transparent,
    };
    state.open(pending);
}

fn heading_level_to_u8(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
