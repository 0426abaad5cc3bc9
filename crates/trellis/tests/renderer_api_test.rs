//! Integration tests for the DiagramRenderer API
//!
//! These run the whole pipeline with a stand-in backend, so Graphviz does
//! not need to be installed.

use std::{fs, path::Path};

use tempfile::tempdir;
use trellis::{
    DiagramRenderer, TrellisError,
    color::Color,
    config::{AppConfig, RenderConfig, StyleConfig},
    diagnostic::ErrorCode,
    export::{self, OutputFormat, RenderBackend},
    semantic::{Diagram, DiagramBuilder, EdgeStyle, NodeKind, Splines},
};

struct FakeBackend;

impl RenderBackend for FakeBackend {
    fn render(
        &self,
        _graph: &dot_structures::Graph,
        format: OutputFormat,
    ) -> Result<Vec<u8>, export::Error> {
        Ok(format!("rendered as {format}").into_bytes())
    }
}

struct FailingBackend;

impl RenderBackend for FailingBackend {
    fn render(
        &self,
        _graph: &dot_structures::Graph,
        format: OutputFormat,
    ) -> Result<Vec<u8>, export::Error> {
        Err(export::Error::EmptyOutput(format))
    }
}

fn small_system(icon: &str) -> Diagram {
    DiagramBuilder::new("Small System")
        .splines(Splines::Ortho)
        .cluster("client", "Client", |client| {
            client.node("user", "User", NodeKind::User);
            client.node("app", "Desktop\nApp", NodeKind::custom(icon));
        })
        .cluster("server", "Server", |server| {
            server.node("api", "API", NodeKind::Server);
        })
        .edge("user", "app", EdgeStyle::new().label("clicks"))
        .edge(
            "app",
            "api",
            EdgeStyle::new()
                .label("calls")
                .color(Color::new("#00008b").unwrap()),
        )
        .build()
}

fn renderer_in<B: RenderBackend>(
    dir: &Path,
    formats: Vec<OutputFormat>,
    backend: B,
) -> DiagramRenderer<B> {
    let config = AppConfig::new(RenderConfig::new(formats, dir, dir), StyleConfig::default());
    DiagramRenderer::with_backend(config, backend)
}

#[test]
fn test_dot_output_is_deterministic() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.png"), b"png").unwrap();
    let renderer = renderer_in(dir.path(), vec![OutputFormat::Dot], FakeBackend);

    let first = renderer.to_dot(&small_system("app.png")).unwrap();
    let second = renderer.to_dot(&small_system("app.png")).unwrap();

    assert_eq!(first, second);
    assert!(first.contains("cluster_client"));
    assert!(first.contains("cluster_server"));
    assert!(first.contains("#00008b"));
}

#[test]
fn test_export_dot_only_writes_one_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.png"), b"png").unwrap();
    let renderer = renderer_in(dir.path(), vec![OutputFormat::Dot], FakeBackend);

    let written = renderer.export(&small_system("app.png")).unwrap();

    assert_eq!(written, vec![dir.path().join("small_system.dot")]);
    let text = fs::read_to_string(&written[0]).unwrap();
    assert!(text.contains("digraph"));

    let files: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(files.len(), 2, "icon plus one diagram: {files:?}");
}

#[test]
fn test_export_uses_backend_for_images() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.png"), b"png").unwrap();
    let renderer = renderer_in(
        dir.path(),
        vec![OutputFormat::Png, OutputFormat::Svg],
        FakeBackend,
    );

    let written = renderer.export(&small_system("app.png")).unwrap();

    assert_eq!(written.len(), 2);
    assert_eq!(fs::read(&written[0]).unwrap(), b"rendered as png");
    assert_eq!(fs::read(&written[1]).unwrap(), b"rendered as svg");
}

#[test]
fn test_missing_icon_writes_nothing() {
    let dir = tempdir().unwrap();
    let renderer = renderer_in(dir.path(), vec![OutputFormat::Dot], FakeBackend);

    let result = renderer.export(&small_system("missing.png"));

    match result {
        Err(TrellisError::IconNotFound { node, .. }) => assert_eq!(node, "app"),
        other => panic!("expected IconNotFound, got {other:?}"),
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_output_dir_is_output_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.png"), b"png").unwrap();
    let missing = dir.path().join("nope");

    let config = AppConfig::new(
        RenderConfig::new(vec![OutputFormat::Dot], &missing, dir.path()),
        StyleConfig::default(),
    );
    let renderer = DiagramRenderer::with_backend(config, FakeBackend);

    let result = renderer.export(&small_system("app.png"));

    match result {
        Err(TrellisError::Output { path, .. }) => {
            assert_eq!(path, missing.join("small_system.dot"));
        }
        other => panic!("expected Output error, got {other:?}"),
    }
    assert!(!missing.exists());
}

#[test]
fn test_empty_format_list_is_config_error() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.png"), b"png").unwrap();
    let output = dir.path().join("out");
    fs::create_dir(&output).unwrap();

    let config = AppConfig::new(
        RenderConfig::new(Vec::new(), &output, dir.path()),
        StyleConfig::default(),
    );
    let renderer = DiagramRenderer::with_backend(config, FakeBackend);

    let result = renderer.export(&small_system("app.png"));

    assert!(matches!(result, Err(TrellisError::Config(_))), "got {result:?}");
    assert_eq!(fs::read_dir(&output).unwrap().count(), 0);
}

#[test]
fn test_backend_failure_writes_nothing() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("app.png"), b"png").unwrap();
    let renderer = renderer_in(
        dir.path(),
        vec![OutputFormat::Dot, OutputFormat::Png],
        FailingBackend,
    );

    let result = renderer.export(&small_system("app.png"));

    assert!(matches!(result, Err(TrellisError::Export(_))));
    assert!(!dir.path().join("small_system.dot").exists());
}

#[test]
fn test_validation_reports_every_problem() {
    let diagram = DiagramBuilder::new("Broken")
        .cluster("c", "C", |c| {
            c.node("a", "A", NodeKind::User);
            c.node("a", "Again", NodeKind::User);
        })
        .edge("a", "ghost", EdgeStyle::new())
        .build();

    let renderer = DiagramRenderer::with_backend(AppConfig::default(), FakeBackend);
    let err = renderer.validate(&diagram).unwrap_err();

    let TrellisError::Validation(validation) = err else {
        panic!("expected a validation error, got {err:?}");
    };
    let codes: Vec<_> = validation
        .diagnostics()
        .iter()
        .filter_map(|diagnostic| diagnostic.code())
        .collect();
    assert!(codes.contains(&ErrorCode::E201));
    assert!(codes.contains(&ErrorCode::E200));
}

#[test]
fn test_warnings_do_not_block_rendering() {
    let diagram = DiagramBuilder::new("Loop")
        .cluster("c", "C", |c| {
            c.node("a", "A", NodeKind::Server);
        })
        .edge("a", "a", EdgeStyle::new().label("retry"))
        .build();

    let renderer = DiagramRenderer::with_backend(AppConfig::default(), FakeBackend);

    let warnings = renderer.validate(&diagram).unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code(), Some(ErrorCode::W101));

    let dot = renderer.render(&diagram, OutputFormat::Dot).unwrap();
    assert!(!dot.is_empty());
}
