/// A node of the markdown syntax tree handed to the renderer.
///
/// The set of variants is closed: the renderer matches on it exhaustively,
/// so adding a variant is a compile error until every consumer handles it.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Document {
        children: Vec<Node>,
    },
    Heading {
        level: u8,
        children: Vec<Node>,
    },
    Paragraph {
        /// False when the paragraph closes a list item; the item emits the
        /// trailing break itself.
        outermost: bool,
        children: Vec<Node>,
    },
    BlockQuote {
        /// True when this quote sits inside another block quote.
        nested: bool,
        children: Vec<Node>,
    },
    OrderedList {
        start: u64,
        tight: bool,
        children: Vec<Node>,
    },
    BulletList {
        marker: char,
        tight: bool,
        children: Vec<Node>,
    },
    ListItem {
        children: Vec<Node>,
    },
    FencedCodeBlock {
        info: String,
        literal: String,
    },
    IndentedCodeBlock {
        literal: String,
    },
    HtmlBlock {
        literal: String,
    },
    Link {
        destination: String,
        title: String,
        children: Vec<Node>,
    },
    Image {
        destination: String,
        title: String,
        children: Vec<Node>,
    },
    Emphasis {
        children: Vec<Node>,
    },
    StrongEmphasis {
        children: Vec<Node>,
    },
    Code {
        literal: String,
    },
    HtmlInline {
        literal: String,
    },
    Text {
        literal: String,
    },
    SoftLineBreak,
    HardLineBreak,
    ThematicBreak,
}

/// Fieldless tag for each [`Node`] variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    BlockQuote,
    OrderedList,
    BulletList,
    ListItem,
    FencedCodeBlock,
    IndentedCodeBlock,
    HtmlBlock,
    Link,
    Image,
    Emphasis,
    StrongEmphasis,
    Code,
    HtmlInline,
    Text,
    SoftLineBreak,
    HardLineBreak,
    ThematicBreak,
}

impl NodeKind {
    /// Every kind the renderer supports.
    pub const ALL: [NodeKind; 20] = [
        NodeKind::Document,
        NodeKind::Heading,
        NodeKind::Paragraph,
        NodeKind::BlockQuote,
        NodeKind::OrderedList,
        NodeKind::BulletList,
        NodeKind::ListItem,
        NodeKind::FencedCodeBlock,
        NodeKind::IndentedCodeBlock,
        NodeKind::HtmlBlock,
        NodeKind::Link,
        NodeKind::Image,
        NodeKind::Emphasis,
        NodeKind::StrongEmphasis,
        NodeKind::Code,
        NodeKind::HtmlInline,
        NodeKind::Text,
        NodeKind::SoftLineBreak,
        NodeKind::HardLineBreak,
        NodeKind::ThematicBreak,
    ];
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document { .. } => NodeKind::Document,
            Node::Heading { .. } => NodeKind::Heading,
            Node::Paragraph { .. } => NodeKind::Paragraph,
            Node::BlockQuote { .. } => NodeKind::BlockQuote,
            Node::OrderedList { .. } => NodeKind::OrderedList,
            Node::BulletList { .. } => NodeKind::BulletList,
            Node::ListItem { .. } => NodeKind::ListItem,
            Node::FencedCodeBlock { .. } => NodeKind::FencedCodeBlock,
            Node::IndentedCodeBlock { .. } => NodeKind::IndentedCodeBlock,
            Node::HtmlBlock { .. } => NodeKind::HtmlBlock,
            Node::Link { .. } => NodeKind::Link,
            Node::Image { .. } => NodeKind::Image,
            Node::Emphasis { .. } => NodeKind::Emphasis,
            Node::StrongEmphasis { .. } => NodeKind::StrongEmphasis,
            Node::Code { .. } => NodeKind::Code,
            Node::HtmlInline { .. } => NodeKind::HtmlInline,
            Node::Text { .. } => NodeKind::Text,
            Node::SoftLineBreak => NodeKind::SoftLineBreak,
            Node::HardLineBreak => NodeKind::HardLineBreak,
            Node::ThematicBreak => NodeKind::ThematicBreak,
        }
    }

    /// Child nodes of a container, or an empty slice for leaves.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document { children }
            | Node::Heading { children, .. }
            | Node::Paragraph { children, .. }
            | Node::BlockQuote { children, .. }
            | Node::OrderedList { children, .. }
            | Node::BulletList { children, .. }
            | Node::ListItem { children }
            | Node::Link { children, .. }
            | Node::Image { children, .. }
            | Node::Emphasis { children }
            | Node::StrongEmphasis { children } => children,
            Node::FencedCodeBlock { .. }
            | Node::IndentedCodeBlock { .. }
            | Node::HtmlBlock { .. }
            | Node::Code { .. }
            | Node::HtmlInline { .. }
            | Node::Text { .. }
            | Node::SoftLineBreak
            | Node::HardLineBreak
            | Node::ThematicBreak => &[],
        }
    }

    /// Shorthand for a text leaf.
    pub fn text(literal: impl Into<String>) -> Self {
        Node::Text {
            literal: literal.into(),
        }
    }

    /// Shorthand for a top-level paragraph.
    pub fn paragraph(children: Vec<Node>) -> Self {
        Node::Paragraph {
            outermost: true,
            children,
        }
    }

    pub fn item(children: Vec<Node>) -> Self {
        Node::ListItem { children }
    }

    pub fn document(children: Vec<Node>) -> Self {
        Node::Document { children }
    }
}
