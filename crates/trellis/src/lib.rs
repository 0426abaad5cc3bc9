//! Trellis - architecture diagrams as code, rendered with Graphviz.
//!
//! A diagram is declared in Rust with the builder in
//! [`semantic::DiagramBuilder`], checked for structural problems, turned into
//! a DOT graph, and rendered to one file per requested output format.

pub mod assets;
pub mod config;
pub mod export;
pub mod structure;
pub mod validate;

mod error;

pub use trellis_core::{color, diagnostic, identifier, semantic};

pub use error::TrellisError;

use std::path::PathBuf;

use log::{debug, info, trace};

use trellis_core::{diagnostic::Diagnostic, semantic::Diagram};

use assets::IconResolver;
use config::AppConfig;
use export::{GraphvizBackend, OutputFormat, RenderBackend, dot::DotExporter};

/// Validates, converts, and renders diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use trellis::{DiagramRenderer, config::AppConfig, export::OutputFormat};
/// use trellis::semantic::{DiagramBuilder, EdgeStyle, NodeKind};
///
/// let diagram = DiagramBuilder::new("Tiny")
///     .cluster("app", "App", |app| {
///         app.node("user", "User", NodeKind::User);
///         app.node("api", "API", NodeKind::Server);
///     })
///     .edge("user", "api", EdgeStyle::new().label("requests"))
///     .build();
///
/// let renderer = DiagramRenderer::new(AppConfig::default());
/// let dot = renderer.render(&diagram, OutputFormat::Dot)
///     .expect("Failed to render");
/// assert!(!dot.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct DiagramRenderer<B: RenderBackend = GraphvizBackend> {
    config: AppConfig,
    backend: B,
}

impl DiagramRenderer {
    /// Creates a renderer that runs Graphviz for image formats.
    pub fn new(config: AppConfig) -> Self {
        Self::with_backend(config, GraphvizBackend::new())
    }
}

impl<B: RenderBackend> DiagramRenderer<B> {
    /// Creates a renderer that hands image formats to `backend`.
    pub fn with_backend(config: AppConfig, backend: B) -> Self {
        Self { config, backend }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Checks `diagram` for structural problems.
    ///
    /// Returns the warnings on success.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Validation`] carrying every diagnostic found
    /// when at least one of them is an error.
    pub fn validate(&self, diagram: &Diagram) -> Result<Vec<Diagnostic>, TrellisError> {
        info!(diagram = diagram.name(); "Validating diagram");
        let warnings = validate::validate(diagram)?;
        debug!(warnings = warnings.len(); "Diagram is valid");
        Ok(warnings)
    }

    /// Validates `diagram`, resolves its icons, and returns it as DOT text.
    pub fn to_dot(&self, diagram: &Diagram) -> Result<String, TrellisError> {
        let graph = self.build_graph(diagram)?;
        Ok(export::dot::print(&graph))
    }

    /// Validates `diagram` and renders it as `format`.
    ///
    /// [`OutputFormat::Dot`] is printed directly; every other format goes
    /// through the render backend.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, an icon is missing, a
    /// configured color does not parse, or the backend fails.
    pub fn render(&self, diagram: &Diagram, format: OutputFormat) -> Result<Vec<u8>, TrellisError> {
        let graph = self.build_graph(diagram)?;
        self.render_graph(&graph, format)
    }

    /// Renders `diagram` in every configured format and writes the files.
    ///
    /// Files are named `<filename>.<extension>` and placed in the configured
    /// output directory, which must already exist. Every format is rendered
    /// before anything is written, and each file is written atomically, so
    /// a failure never leaves a partial file behind.
    ///
    /// Returns the paths written, in format order. An empty format list is
    /// a [`TrellisError::Config`] error.
    pub fn export(&self, diagram: &Diagram) -> Result<Vec<PathBuf>, TrellisError> {
        let render = self.config.render();
        if render.formats().is_empty() {
            return Err(TrellisError::Config(
                "no output formats configured; set `render.formats` or pass --format".to_string(),
            ));
        }
        let graph = self.build_graph(diagram)?;

        let mut rendered = Vec::with_capacity(render.formats().len());
        for &format in render.formats() {
            rendered.push((format, self.render_graph(&graph, format)?));
        }

        let output_dir = render.output_dir();
        let mut written = Vec::with_capacity(rendered.len());
        for (format, bytes) in rendered {
            let file_name = format!("{}.{}", diagram.filename(), format.extension());
            let path = export::write_atomically(output_dir, &file_name, &bytes).map_err(
                |source| TrellisError::Output {
                    path: output_dir.join(&file_name),
                    source,
                },
            )?;
            info!(path:? = path, bytes = bytes.len(); "Wrote diagram");
            written.push(path);
        }

        Ok(written)
    }

    fn build_graph(&self, diagram: &Diagram) -> Result<dot_structures::Graph, TrellisError> {
        self.validate(diagram)?;

        let icons = IconResolver::new(self.config.render().assets_dir()).resolve(diagram)?;
        debug!(icons = icons.len(); "Resolved icons");

        let graph = DotExporter::new(self.config.style(), &icons).export(diagram)?;
        trace!(graph:?; "DOT graph");
        Ok(graph)
    }

    fn render_graph(
        &self,
        graph: &dot_structures::Graph,
        format: OutputFormat,
    ) -> Result<Vec<u8>, TrellisError> {
        if format == OutputFormat::Dot {
            return Ok(export::dot::print(graph).into_bytes());
        }
        Ok(self.backend.render(graph, format)?)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use tempfile::tempdir;

    use trellis_core::semantic::{DiagramBuilder, EdgeStyle, NodeKind};

    use super::*;
    use crate::config::{RenderConfig, StyleConfig};

    #[derive(Default)]
    struct RecordingBackend {
        calls: RefCell<Vec<OutputFormat>>,
    }

    impl RenderBackend for RecordingBackend {
        fn render(
            &self,
            _graph: &dot_structures::Graph,
            format: OutputFormat,
        ) -> Result<Vec<u8>, export::Error> {
            self.calls.borrow_mut().push(format);
            Ok(format!("fake {format}").into_bytes())
        }
    }

    fn tiny() -> Diagram {
        DiagramBuilder::new("Tiny Diagram")
            .cluster("app", "App", |app| {
                app.node("user", "User", NodeKind::User);
                app.node("api", "API", NodeKind::Server);
            })
            .edge("user", "api", EdgeStyle::new())
            .build()
    }

    fn config_for(dir: &std::path::Path, formats: Vec<OutputFormat>) -> AppConfig {
        AppConfig::new(
            RenderConfig::new(formats, dir, dir),
            StyleConfig::default(),
        )
    }

    #[test]
    fn test_dot_skips_backend() {
        let renderer = DiagramRenderer::with_backend(AppConfig::default(), RecordingBackend::default());

        let bytes = renderer.render(&tiny(), OutputFormat::Dot).unwrap();

        assert!(String::from_utf8(bytes).unwrap().contains("digraph"));
        assert!(renderer.backend.calls.borrow().is_empty());
    }

    #[test]
    fn test_export_writes_one_file_per_format() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), vec![OutputFormat::Png, OutputFormat::Dot]);
        let renderer = DiagramRenderer::with_backend(config, RecordingBackend::default());

        let written = renderer.export(&tiny()).unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("tiny_diagram.png"),
                dir.path().join("tiny_diagram.dot"),
            ]
        );
        assert_eq!(std::fs::read(&written[0]).unwrap(), b"fake png");
        assert_eq!(*renderer.backend.calls.borrow(), vec![OutputFormat::Png]);
    }

    #[test]
    fn test_invalid_diagram_never_reaches_backend() {
        let dir = tempdir().unwrap();
        let config = config_for(dir.path(), vec![OutputFormat::Png]);
        let renderer = DiagramRenderer::with_backend(config, RecordingBackend::default());

        let diagram = DiagramBuilder::new("Broken")
            .cluster("app", "App", |app| {
                app.node("user", "User", NodeKind::User);
            })
            .edge("user", "ghost", EdgeStyle::new())
            .build();

        let result = renderer.export(&diagram);

        assert!(matches!(result, Err(TrellisError::Validation(_))));
        assert!(renderer.backend.calls.borrow().is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
