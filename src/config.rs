use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::render::RenderOptions;

static DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub text: TextConfig,
    pub heading: HeadingConfig,
    pub code: CodeConfig,
    pub quote: QuoteConfig,
    pub links: LinksConfig,
    pub list: ListConfig,
    pub rule: RuleConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub soft_breaks_as_hard_breaks: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            soft_breaks_as_hard_breaks: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TextConfig {
    pub base_font_size: u32,
    pub color: Option<String>,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            base_font_size: 16,
            color: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadingConfig {
    pub bold: bool,
    pub color: Option<String>,
    pub h1_scale: f32,
    pub h2_scale: f32,
    pub h3_scale: f32,
    pub h4_scale: f32,
    pub h5_scale: f32,
    pub h6_scale: f32,
}

impl Default for HeadingConfig {
    fn default() -> Self {
        Self {
            bold: true,
            color: None,
            h1_scale: 2.0,
            h2_scale: 1.5,
            h3_scale: 1.25,
            h4_scale: 1.0,
            h5_scale: 0.875,
            h6_scale: 0.85,
        }
    }
}

impl HeadingConfig {
    /// Font scale for a heading level. Levels past 6 use the h6 scale.
    pub fn scale_for_heading(&self, level: u8) -> f32 {
        match level {
            0 | 1 => self.h1_scale,
            2 => self.h2_scale,
            3 => self.h3_scale,
            4 => self.h4_scale,
            5 => self.h5_scale,
            _ => self.h6_scale,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeConfig {
    pub color: Option<String>,
    pub background: Option<String>,
}

impl Default for CodeConfig {
    fn default() -> Self {
        Self {
            color: Some("#c7254e".to_string()),
            background: Some("#f6f8fa".to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct QuoteConfig {
    pub color: Option<String>,
    pub stripe_color: String,
    pub stripe_width: u32,
    pub gap_width: u32,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            color: Some("#6a737d".to_string()),
            stripe_color: "#dfe2e5".to_string(),
            stripe_width: 4,
            gap_width: 12,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LinksConfig {
    pub color: String,
    pub underline: bool,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            color: "#1a4f8b".to_string(),
            underline: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ListConfig {
    pub max_digit_width: u32,
    pub content_margin: u32,
    pub prefix_gap_width: u32,
    pub prefix_color: String,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            max_digit_width: 10,
            content_margin: 40,
            prefix_gap_width: 6,
            prefix_color: "#8a8a8a".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleConfig {
    pub color: Option<String>,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            color: Some("#d0d7de".to_string()),
        }
    }
}

impl Config {
    /// The configuration bundled with the crate.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_default()
    }

    /// Parse config from TOML text. Missing keys take their defaults.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content).map_err(|source| Error::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load config from a TOML file, or return the compiled defaults if it
    /// cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("{}; using default config", e);
                Self::compiled_default()
            }
        }
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            soft_breaks_as_hard_breaks: self.render.soft_breaks_as_hard_breaks,
        }
    }
}
