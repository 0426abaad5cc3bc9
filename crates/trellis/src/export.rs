//! Turning a validated diagram into files on disk.
//!
//! - [`dot`] converts a diagram into a Graphviz DOT graph.
//! - [`graphviz`] hands that graph to the `dot` program for layout and
//!   rasterization, behind the [`RenderBackend`] trait.
//! - [`write_atomically`] puts the rendered bytes in place only once they
//!   are complete.

pub mod dot;
pub mod graphviz;

pub use graphviz::{GraphvizBackend, RenderBackend};

use std::{
    fmt,
    io::{self, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

use log::debug;
use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

/// Errors raised while rendering a DOT graph.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Graphviz failed to render {format}: {source}")]
    Graphviz {
        format: OutputFormat,
        #[source]
        source: io::Error,
    },

    #[error("Graphviz produced no {0} output")]
    EmptyOutput(OutputFormat),
}

/// File format of a rendered diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    #[serde(alias = "jpeg")]
    Jpg,
    Svg,
    Pdf,
    /// The DOT source itself. Produced without running Graphviz.
    Dot,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpg => "jpg",
            OutputFormat::Svg => "svg",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Dot => "dot",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(OutputFormat::Png),
            "jpg" | "jpeg" => Ok(OutputFormat::Jpg),
            "svg" => Ok(OutputFormat::Svg),
            "pdf" => Ok(OutputFormat::Pdf),
            "dot" => Ok(OutputFormat::Dot),
            _ => Err(format!(
                "unsupported output format `{s}`: expected png, jpg, svg, pdf or dot"
            )),
        }
    }
}

/// Writes `bytes` to `dir/file_name` without ever exposing a partial file.
///
/// The bytes go to a temporary file in `dir` first, which is then renamed
/// over the destination. `dir` must already exist.
///
/// # Errors
///
/// Returns an I/O error if `dir` is missing or not writable, or if the
/// rename fails. The temporary file is removed in every failure case.
pub fn write_atomically(dir: &Path, file_name: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    let path = dir.join(file_name);

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(bytes)?;
    temp_file.as_file().sync_all()?;
    temp_file.persist(&path).map_err(|err| err.error)?;

    debug!(path:? = path, bytes = bytes.len(); "Wrote output file");
    Ok(path)
}
