use mdspan::{Attribute, ListMetrics, Node, NodeKind, Rendered, Renderer, StylePolicy};
use proptest::prelude::*;

struct KindPolicy;

impl StylePolicy for KindPolicy {
    type Style = NodeKind;

    fn style_for(&self, node: &Node) -> NodeKind {
        node.kind()
    }

    fn list_metrics(&self) -> ListMetrics {
        ListMetrics {
            base_font_size: 16,
            max_digit_width: 10,
            content_margin: 40,
            prefix_gap_width: 6,
            prefix_color: "#888888".to_string(),
        }
    }
}

fn render(root: &Node) -> Rendered<NodeKind> {
    Renderer::new(&KindPolicy).render(Some(root))
}

fn leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        "[a-z\u{e9}\u{4e2d} ]{0,8}".prop_map(|literal| Node::Text { literal }),
        "[a-z]{0,4}".prop_map(|literal| Node::Code { literal }),
        "[a-z\n]{0,6}".prop_map(|literal| Node::FencedCodeBlock {
            info: String::new(),
            literal,
        }),
        Just(Node::SoftLineBreak),
        Just(Node::HardLineBreak),
        Just(Node::ThematicBreak),
    ]
}

fn tree() -> impl Strategy<Value = Node> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        let children = prop::collection::vec(inner, 0..4);
        prop_oneof![
            children.clone().prop_map(Node::paragraph),
            (any::<bool>(), children.clone())
                .prop_map(|(outermost, children)| Node::Paragraph { outermost, children }),
            (1u8..=6, children.clone())
                .prop_map(|(level, children)| Node::Heading { level, children }),
            (any::<bool>(), children.clone())
                .prop_map(|(nested, children)| Node::BlockQuote { nested, children }),
            children.clone().prop_map(Node::item),
            (0u64..120, children.clone()).prop_map(|(start, children)| Node::OrderedList {
                start,
                tight: true,
                children: children.into_iter().map(|c| Node::item(vec![c])).collect(),
            }),
            children.clone().prop_map(|children| Node::BulletList {
                marker: '-',
                tight: true,
                children: children.into_iter().map(|c| Node::item(vec![c])).collect(),
            }),
            children.clone().prop_map(|children| Node::Emphasis { children }),
            children.prop_map(|children| Node::Link {
                destination: "https://example.com".to_string(),
                title: String::new(),
                children,
            }),
        ]
    })
}

fn document() -> impl Strategy<Value = Node> {
    prop::collection::vec(tree(), 0..5).prop_map(Node::document)
}

proptest! {
    #[test]
    fn annotations_stay_on_char_boundaries(doc in document()) {
        let rendered = render(&doc);
        for a in &rendered.annotations {
            prop_assert!(a.start <= a.end, "{:?}", a);
            prop_assert!(rendered.text.get(a.start..a.end).is_some(), "{:?}", a);
        }
        for range in &rendered.list_ranges {
            prop_assert!(rendered.text.get(range.start..range.end).is_some(), "{:?}", range);
        }
    }

    #[test]
    fn rendering_is_repeatable(first in document(), second in document()) {
        let renderer = Renderer::new(&KindPolicy);
        let once = renderer.render(Some(&first));
        renderer.render(Some(&second));
        let again = renderer.render(Some(&first));
        prop_assert_eq!(once, again);
    }

    #[test]
    fn prefixes_cover_marker_text(doc in document()) {
        let rendered = render(&doc);
        for a in &rendered.annotations {
            if let Attribute::ListPrefix { .. } = a.attribute {
                let prefix = rendered.slice(a);
                let numbered = prefix
                    .strip_suffix('.')
                    .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));
                prop_assert!(
                    prefix.is_empty() || prefix == "\u{2022}" || numbered,
                    "unexpected prefix {:?}",
                    prefix
                );
            }
        }
    }

    #[test]
    fn every_annotation_has_a_source(doc in document()) {
        let rendered = render(&doc);
        prop_assert!(rendered.annotations.len() >= rendered.styles().count());
        if let Some((kind, start, end)) = rendered.styles().last() {
            prop_assert_eq!(*kind, NodeKind::Document);
            prop_assert_eq!((start, end), (0, rendered.text.len()));
        }
    }
}
