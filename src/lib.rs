mod config;
mod error;
mod list;
mod node;
mod parser;
mod render;
mod style;
mod writer;

pub use config::{
    CodeConfig, Config, HeadingConfig, LinksConfig, ListConfig, QuoteConfig, RenderConfig,
    RuleConfig, TextConfig,
};
pub use error::{Error, Result};
pub use list::{ListContext, ListKind, ListMetrics, ListRange, ListStack, Prefix};
pub use node::{Node, NodeKind};
pub use render::{Attribute, RenderOptions, Rendered, Renderer};
pub use style::{QuoteStripe, SpanStyle, StylePolicy};
pub use writer::{Annotation, TextWriter};

/// Parse markdown text into a document tree.
pub fn parse(markdown: &str) -> Node {
    parser::parse(markdown)
}

/// Render markdown to annotated text using the default config.
pub fn render_markdown(markdown: &str) -> Rendered<SpanStyle> {
    render_markdown_with_config(markdown, &Config::compiled_default())
}

/// Render markdown to annotated text with a custom config.
pub fn render_markdown_with_config(markdown: &str, config: &Config) -> Rendered<SpanStyle> {
    let document = parse(markdown);
    Renderer::new(config)
        .with_options(config.render_options())
        .render(Some(&document))
}
