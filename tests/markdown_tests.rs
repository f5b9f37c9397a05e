use mdspan::{Attribute, Config, render_markdown, render_markdown_with_config};

#[test]
fn paragraph() {
    assert_eq!(render_markdown("Hello world").text, "Hello world");
}

#[test]
fn soft_breaks_default_to_lines() {
    assert_eq!(render_markdown("a\nb").text, "a\nb");

    let mut config = Config::compiled_default();
    config.render.soft_breaks_as_hard_breaks = false;
    assert_eq!(render_markdown_with_config("a\nb", &config).text, "a b");
}

#[test]
fn soft_breaks_from_toml() {
    let config = Config::from_toml("[render]\nsoft_breaks_as_hard_breaks = false\n").unwrap();
    assert_eq!(render_markdown_with_config("one\ntwo", &config).text, "one two");
}

#[test]
fn heading_then_paragraph() {
    let rendered = render_markdown("# Title\n\nbody");
    assert_eq!(rendered.text, "Title\nbody");
    let heading = rendered
        .styles()
        .find(|(style, _, _)| style.font_scale == Some(2.0))
        .map(|(_, start, end)| (start, end));
    assert_eq!(heading, Some((0, 6)));
}

#[test]
fn inline_styles() {
    let rendered = render_markdown("**bold** *it* `code`");
    assert_eq!(rendered.text, "bold it code");

    let bold: Vec<_> = rendered
        .styles()
        .filter(|(s, _, _)| s.bold)
        .map(|(_, a, b)| &rendered.text[a..b])
        .collect();
    assert_eq!(bold, vec!["bold"]);

    let italic: Vec<_> = rendered
        .styles()
        .filter(|(s, _, _)| s.italic)
        .map(|(_, a, b)| &rendered.text[a..b])
        .collect();
    assert_eq!(italic, vec!["it"]);

    let mono: Vec<_> = rendered
        .styles()
        .filter(|(s, _, _)| s.monospace)
        .map(|(_, a, b)| &rendered.text[a..b])
        .collect();
    assert_eq!(mono, vec!["code"]);
}

#[test]
fn link_style_carries_url() {
    let rendered = render_markdown("see [docs](https://example.com)");
    assert_eq!(rendered.text, "see docs");
    let link = rendered
        .styles()
        .find(|(s, _, _)| s.url.is_some())
        .expect("link style");
    assert_eq!(link.0.url.as_deref(), Some("https://example.com"));
    assert_eq!((link.1, link.2), (4, 8));
}

#[test]
fn unordered_list() {
    assert_eq!(render_markdown("- one\n- two").text, "\u{2022}\tone\n\u{2022}\ttwo");
}

#[test]
fn ordered_list_keeps_start() {
    assert_eq!(render_markdown("9. nine\n10. ten").text, "9.\tnine\n10.\tten");
}

#[test]
fn nested_list() {
    let rendered = render_markdown("- a\n  - b\n- c");
    assert_eq!(rendered.text, "\u{2022}\ta\n\u{2022}\tb\n\u{2022}\tc");
    assert_eq!(rendered.list_ranges.len(), 2);
}

#[test]
fn nested_margin_follows_config() {
    let config = Config::from_toml("[list]\ncontent_margin = 24\n").unwrap();
    let rendered = render_markdown_with_config("- a\n  - b", &config);
    let firsts: Vec<_> = rendered
        .annotations
        .iter()
        .filter_map(|a| match a.attribute {
            Attribute::LeadingMargin { first, rest } if rest == first + 24 => Some(first),
            _ => None,
        })
        .collect();
    assert_eq!(firsts, vec![48, 24]);
}

#[test]
fn block_quote_style() {
    let rendered = render_markdown("> quoted");
    assert_eq!(rendered.text, "quoted");
    assert!(rendered.styles().any(|(s, a, b)| s.quote.is_some() && (a, b) == (0, 6)));
}

#[test]
fn code_block() {
    let rendered = render_markdown("```rust\nlet x = 1;\n```\n\nafter");
    assert_eq!(rendered.text, "let x = 1;\nafter");
}

#[test]
fn horizontal_rule() {
    assert_eq!(render_markdown("---").text, "---");
    assert_eq!(render_markdown("a\n\n***\n\nb").text, "a\n---\nb");
}

#[test]
fn json_output_tags_attributes() {
    let rendered = render_markdown("1. x");
    let json = serde_json::to_value(&rendered).unwrap();
    assert_eq!(json["text"], "1.\tx");

    let types: Vec<_> = json["annotations"]
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["attribute"]["type"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        types,
        vec![
            "font_size",
            "list_prefix",
            "style",
            "leading_margin",
            "tab_stop",
            "style",
            "style",
            "style",
        ]
    );
    assert_eq!(json["annotations"][1]["attribute"]["value"]["digits"], 2);
    assert_eq!(json["list_ranges"][0]["start"], 0);
}

#[test]
fn loose_item_meets_nested_list_on_next_line() {
    let text = render_markdown("- a\n\n  - b\n- c").text;
    assert_eq!(text, "\u{2022}\ta\n\u{2022}\tb\n\u{2022}\tc");
    assert!(!text.contains("\n\n"));
}

#[test]
fn quote_paragraph_meets_nested_quote_on_next_line() {
    let text = render_markdown("> a\n>\n> > b").text;
    assert_eq!(text, "a\nb");
    assert!(!text.contains("\n\n"));
}

#[test]
fn loose_item_paragraphs_stay_apart() {
    let text = render_markdown("* one\n\n  more\n\n* two").text;
    assert_eq!(text, "\u{2022}\tone\nmore\n\u{2022}\ttwo");
}

#[test]
fn extreme_list_metrics_saturate() {
    let config = Config::from_toml("[list]\nmax_digit_width = 4294967295\n").unwrap();
    let rendered = render_markdown_with_config("1. x", &config);
    assert_eq!(rendered.text, "1.\tx");
    assert!(
        rendered
            .annotations
            .iter()
            .any(|a| a.attribute == Attribute::TabStop(u32::MAX))
    );

    let config = Config::from_toml("[list]\ncontent_margin = 3000000000\n").unwrap();
    let rendered = render_markdown_with_config("- a\n  - b", &config);
    assert_eq!(rendered.text, "\u{2022}\ta\n\u{2022}\tb");
    let margins: Vec<_> = rendered
        .annotations
        .iter()
        .filter_map(|a| match a.attribute {
            Attribute::LeadingMargin { first, rest } => Some((first, rest)),
            _ => None,
        })
        .collect();
    // Inner item first, then the outer item's first line.
    assert_eq!(margins, vec![(u32::MAX, u32::MAX), (3_000_000_000, u32::MAX)]);
}
