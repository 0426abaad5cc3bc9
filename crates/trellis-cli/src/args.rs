//! Command-line argument definitions for the Trellis CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Every argument is optional: without any, the diagram is
//! written as `highway_star_arch.png` to the current directory using icons
//! found there.

use clap::Parser;

use trellis::export::OutputFormat;

/// Command-line arguments for the Trellis diagram generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Directory to write the rendered diagram to; it must already exist
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Directory holding the node icons
    #[arg(short, long)]
    pub assets_dir: Option<String>,

    /// Output format (png, jpg, svg, pdf, dot); may be repeated
    #[arg(short, long = "format")]
    pub format: Vec<OutputFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
