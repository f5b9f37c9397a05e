use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mdspan::{Config, Rendered, SpanStyle};

/// Config picked up from the input's directory when `--config` is absent.
const LOCAL_CONFIG: &str = "mdspan.toml";

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Plain rendered text
    Text,
    /// Text with every annotation, as JSON
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
enum SoftBreaks {
    Line,
    Space,
}

#[derive(Parser)]
#[command(name = "mdspan")]
#[command(about = "Render Markdown files to text with style annotations")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Config file (defaults to mdspan.toml beside the input, then the
    /// bundled style)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Override how soft line breaks render
    #[arg(long, value_enum)]
    soft_breaks: Option<SoftBreaks>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn local_config(input: &Path) -> Option<PathBuf> {
    let candidate = input.parent()?.join(LOCAL_CONFIG);
    candidate.is_file().then_some(candidate)
}

fn run(cli: &Cli) -> mdspan::Result<String> {
    let markdown = fs::read_to_string(&cli.input)?;

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        // A broken local config only warns
        None => match local_config(&cli.input) {
            Some(path) => Config::load_or_default(&path),
            None => Config::compiled_default(),
        },
    };
    match cli.soft_breaks {
        Some(SoftBreaks::Line) => config.render.soft_breaks_as_hard_breaks = true,
        Some(SoftBreaks::Space) => config.render.soft_breaks_as_hard_breaks = false,
        None => {}
    }

    debug!(input = %cli.input.display(), bytes = markdown.len(), "rendering");
    let rendered: Rendered<SpanStyle> = mdspan::render_markdown_with_config(&markdown, &config);

    match cli.format {
        Format::Text => Ok(rendered.text),
        Format::Json => Ok(serde_json::to_string_pretty(&rendered)?),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(&cli.log_level);

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
