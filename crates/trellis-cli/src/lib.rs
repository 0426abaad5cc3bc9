//! CLI logic for the Trellis diagram generator.
//!
//! This module wires command-line arguments and configuration into the
//! rendering pipeline for the Highway Star architecture diagram.

pub mod error_adapter;
pub mod highway_star;

mod args;
mod config;

pub use args::Args;

use std::path::PathBuf;

use log::info;

use trellis::{DiagramRenderer, TrellisError, config::AppConfig};

/// Run the Trellis CLI application
///
/// Builds the Highway Star diagram, renders it in every requested format,
/// and writes the files to the output directory.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `TrellisError` for:
/// - Configuration loading errors
/// - Validation errors
/// - Missing icons
/// - Graphviz failures
/// - Output files that cannot be written
pub fn run(args: &Args) -> Result<Vec<PathBuf>, TrellisError> {
    let mut app_config = config::load_config(args.config.as_ref())?;
    apply_overrides(&mut app_config, args);

    let render = app_config.render();
    info!(
        output_dir:? = render.output_dir(),
        assets_dir:? = render.assets_dir(),
        formats:? = render.formats();
        "Rendering diagram"
    );

    let diagram = highway_star::diagram();
    let renderer = DiagramRenderer::new(app_config);
    let written = renderer.export(&diagram)?;

    info!(files = written.len(); "Diagram exported successfully");

    Ok(written)
}

/// Command-line flags take precedence over the configuration file.
fn apply_overrides(config: &mut AppConfig, args: &Args) {
    let render = config.render_mut();
    if let Some(output_dir) = &args.output_dir {
        render.set_output_dir(output_dir);
    }
    if let Some(assets_dir) = &args.assets_dir {
        render.set_assets_dir(assets_dir);
    }
    if !args.format.is_empty() {
        render.set_formats(args.format.clone());
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use trellis::export::OutputFormat;

    use super::*;

    fn args() -> Args {
        Args {
            output_dir: None,
            assets_dir: None,
            format: Vec::new(),
            config: None,
            log_level: "off".to_string(),
        }
    }

    #[test]
    fn test_no_overrides_keep_config() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &args());

        assert_eq!(config.render().formats(), &[OutputFormat::Png]);
        assert_eq!(config.render().output_dir(), Path::new("."));
        assert_eq!(config.render().assets_dir(), Path::new("."));
    }

    #[test]
    fn test_flags_override_config() {
        let mut config = AppConfig::default();
        let args = Args {
            output_dir: Some("out".to_string()),
            assets_dir: Some("icons".to_string()),
            format: vec![OutputFormat::Svg, OutputFormat::Pdf],
            ..args()
        };

        apply_overrides(&mut config, &args);

        assert_eq!(
            config.render().formats(),
            &[OutputFormat::Svg, OutputFormat::Pdf]
        );
        assert_eq!(config.render().output_dir(), Path::new("out"));
        assert_eq!(config.render().assets_dir(), Path::new("icons"));
    }
}
