//! Configuration types for Trellis diagram rendering.
//!
//! This module provides configuration structures that control where
//! diagrams are written and how they are styled. All types implement
//! [`serde::Deserialize`] so they can be loaded from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining render and style settings.
//! - [`RenderConfig`] - Output formats and the output and assets directories.
//! - [`StyleConfig`] - Fonts and colors applied to every diagram.
//!
//! # Example
//!
//! ```
//! # use trellis::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.style().font_color().is_ok());
//! assert_eq!(config.render().formats().len(), 1);
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use trellis_core::color::Color;

use crate::export::OutputFormat;

/// Top-level application configuration combining render and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Render configuration section.
    #[serde(default)]
    render: RenderConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from render and style sections.
    pub fn new(render: RenderConfig, style: StyleConfig) -> Self {
        Self { render, style }
    }

    /// Returns the render configuration.
    pub fn render(&self) -> &RenderConfig {
        &self.render
    }

    /// Returns the render configuration for overriding individual settings.
    pub fn render_mut(&mut self) -> &mut RenderConfig {
        &mut self.render
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Where rendered diagrams go and which formats are produced.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    /// Output formats; one file is written per format.
    #[serde(default = "default_formats")]
    formats: Vec<OutputFormat>,

    /// Directory the rendered files are written to. It must already exist.
    #[serde(default = "default_dir")]
    output_dir: PathBuf,

    /// Directory relative icon paths are resolved against.
    #[serde(default = "default_dir")]
    assets_dir: PathBuf,
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Png]
}

fn default_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            output_dir: default_dir(),
            assets_dir: default_dir(),
        }
    }
}

impl RenderConfig {
    /// Creates a new [`RenderConfig`].
    ///
    /// # Arguments
    ///
    /// * `formats` - Output formats to produce.
    /// * `output_dir` - Existing directory to write into.
    /// * `assets_dir` - Directory holding icon files.
    pub fn new(
        formats: Vec<OutputFormat>,
        output_dir: impl Into<PathBuf>,
        assets_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            formats,
            output_dir: output_dir.into(),
            assets_dir: assets_dir.into(),
        }
    }

    pub fn formats(&self) -> &[OutputFormat] {
        &self.formats
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn set_formats(&mut self, formats: Vec<OutputFormat>) {
        self.formats = formats;
    }

    pub fn set_output_dir(&mut self, output_dir: impl Into<PathBuf>) {
        self.output_dir = output_dir.into();
    }

    pub fn set_assets_dir(&mut self, assets_dir: impl Into<PathBuf>) {
        self.assets_dir = assets_dir.into();
    }
}

/// Visual styling shared by every diagram.
///
/// Colors are stored as strings and parsed when used, so an invalid color
/// is reported as a configuration error at render time.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    font_name: String,
    font_size: f32,
    title_font_size: f32,
    cluster_font_size: f32,
    font_color: String,
    edge_color: String,
    background_color: Option<String>,
    cluster_border_color: String,
    cluster_colors: Vec<String>,
    pad: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_name: "Sans-Serif".to_string(),
            font_size: 13.0,
            title_font_size: 15.0,
            cluster_font_size: 12.0,
            font_color: "#2D3436".to_string(),
            edge_color: "#7B8894".to_string(),
            background_color: None,
            cluster_border_color: "#AEB6BE".to_string(),
            cluster_colors: ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"]
                .into_iter()
                .map(String::from)
                .collect(),
            pad: 2.0,
        }
    }
}

impl StyleConfig {
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// Font size for node, edge, and cluster labels, in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Font size for the diagram title, in points.
    pub fn title_font_size(&self) -> f32 {
        self.title_font_size
    }

    /// Font size for cluster labels, in points.
    pub fn cluster_font_size(&self) -> f32 {
        self.cluster_font_size
    }

    /// Padding around the whole drawing, in inches.
    pub fn pad(&self) -> f32 {
        self.pad
    }

    /// Returns the parsed label font [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured string is not a valid color.
    pub fn font_color(&self) -> Result<Color, String> {
        parse_color("font_color", &self.font_color)
    }

    /// Returns the parsed color used for edges without an explicit color.
    pub fn edge_color(&self) -> Result<Color, String> {
        parse_color("edge_color", &self.edge_color)
    }

    /// Returns the parsed cluster border color.
    pub fn cluster_border_color(&self) -> Result<Color, String> {
        parse_color("cluster_border_color", &self.cluster_border_color)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color("background_color", color))
            .transpose()
    }

    /// Returns the fill color for a cluster nested `depth` levels deep.
    ///
    /// The palette repeats once nesting goes deeper than it has entries.
    /// Returns `None` when the palette is empty.
    pub fn cluster_color(&self, depth: usize) -> Result<Option<Color>, String> {
        if self.cluster_colors.is_empty() {
            return Ok(None);
        }
        let color = &self.cluster_colors[depth % self.cluster_colors.len()];
        parse_color("cluster_colors", color).map(Some)
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}
