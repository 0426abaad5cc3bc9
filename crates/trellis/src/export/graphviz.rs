//! Rendering DOT graphs with the Graphviz `dot` program.

use dot_structures::Graph;
use graphviz_rust::{
    cmd::{CommandArg, Format},
    exec,
    printer::PrinterContext,
};
use log::{debug, info};

use super::{Error, OutputFormat};

/// Something that can lay out and rasterize a DOT graph.
///
/// [`GraphvizBackend`] is the real implementation. The trait exists so the
/// rest of the pipeline can run without Graphviz installed.
pub trait RenderBackend {
    /// Renders `graph` as `format` and returns the file contents.
    ///
    /// Never called with [`OutputFormat::Dot`]; DOT text is printed
    /// directly by the pipeline.
    fn render(&self, graph: &Graph, format: OutputFormat) -> Result<Vec<u8>, Error>;
}

/// Renders through the `dot` executable found on `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphvizBackend;

impl GraphvizBackend {
    pub fn new() -> Self {
        Self
    }
}

impl RenderBackend for GraphvizBackend {
    fn render(&self, graph: &Graph, format: OutputFormat) -> Result<Vec<u8>, Error> {
        info!(format:? = format; "Running Graphviz");

        let mut ctx = PrinterContext::default();
        let bytes = exec(
            graph.clone(),
            &mut ctx,
            vec![CommandArg::Format(graphviz_format(format))],
        )
        .map_err(|source| Error::Graphviz { format, source })?;

        if bytes.is_empty() {
            return Err(Error::EmptyOutput(format));
        }

        debug!(format:? = format, bytes = bytes.len(); "Graphviz finished");
        Ok(bytes)
    }
}

fn graphviz_format(format: OutputFormat) -> Format {
    match format {
        OutputFormat::Png => Format::Png,
        OutputFormat::Jpg => Format::Jpg,
        OutputFormat::Svg => Format::Svg,
        OutputFormat::Pdf => Format::Pdf,
        OutputFormat::Dot => Format::Dot,
    }
}
