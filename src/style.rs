//! Mapping from nodes to style descriptors.

use serde::Serialize;

use crate::config::Config;
use crate::list::ListMetrics;
use crate::node::Node;

/// Decides how each node looks.
///
/// The renderer never inspects `Style`; it only attaches it to the range the
/// node produced.
pub trait StylePolicy {
    type Style;

    fn style_for(&self, node: &Node) -> Self::Style;

    /// Metrics used to align list prefixes and indent list items.
    fn list_metrics(&self) -> ListMetrics;
}

/// Vertical stripe drawn beside quoted text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteStripe {
    pub color: String,
    pub width: u32,
    pub gap: u32,
}

/// Style descriptor produced by [`Config`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpanStyle {
    /// Font size relative to the base size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<f32>,
    #[serde(skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub italic: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub monospace: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    /// Target of a link or image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuoteStripe>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl SpanStyle {
    fn code(config: &Config) -> Self {
        SpanStyle {
            monospace: true,
            color: config.code.color.clone(),
            background: config.code.background.clone(),
            ..Default::default()
        }
    }
}

impl StylePolicy for Config {
    type Style = SpanStyle;

    fn style_for(&self, node: &Node) -> SpanStyle {
        match node {
            Node::Heading { level, .. } => SpanStyle {
                font_scale: Some(self.heading.scale_for_heading(*level)),
                bold: self.heading.bold,
                color: self.heading.color.clone(),
                ..Default::default()
            },
            Node::BlockQuote { .. } => SpanStyle {
                color: self.quote.color.clone(),
                quote: Some(QuoteStripe {
                    color: self.quote.stripe_color.clone(),
                    width: self.quote.stripe_width,
                    gap: self.quote.gap_width,
                }),
                ..Default::default()
            },
            Node::FencedCodeBlock { .. } | Node::IndentedCodeBlock { .. } | Node::Code { .. } => {
                SpanStyle::code(self)
            }
            Node::HtmlBlock { .. } | Node::HtmlInline { .. } => SpanStyle {
                monospace: true,
                ..Default::default()
            },
            Node::Link { destination, .. } => SpanStyle {
                color: Some(self.links.color.clone()),
                underline: self.links.underline,
                url: Some(destination.clone()),
                ..Default::default()
            },
            Node::Image { destination, .. } => SpanStyle {
                color: Some(self.links.color.clone()),
                url: Some(destination.clone()),
                ..Default::default()
            },
            Node::Emphasis { .. } => SpanStyle {
                italic: true,
                ..Default::default()
            },
            Node::StrongEmphasis { .. } => SpanStyle {
                bold: true,
                ..Default::default()
            },
            Node::ThematicBreak => SpanStyle {
                color: self.rule.color.clone(),
                ..Default::default()
            },
            Node::Document { .. } => SpanStyle {
                color: self.text.color.clone(),
                ..Default::default()
            },
            Node::Paragraph { .. }
            | Node::OrderedList { .. }
            | Node::BulletList { .. }
            | Node::ListItem { .. }
            | Node::Text { .. }
            | Node::SoftLineBreak
            | Node::HardLineBreak => SpanStyle::default(),
        }
    }

    fn list_metrics(&self) -> ListMetrics {
        ListMetrics {
            base_font_size: self.text.base_font_size,
            max_digit_width: self.list.max_digit_width,
            content_margin: self.list.content_margin,
            prefix_gap_width: self.list.prefix_gap_width,
            prefix_color: self.list.prefix_color.clone(),
        }
    }
}
