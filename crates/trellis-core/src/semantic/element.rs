//! Diagram elements: clusters, nodes, and edges.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::{color::Color, identifier::Id};

/// What a node depicts, which decides how it is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A person using the system.
    User,
    /// A generic on-premise server.
    Server,
    /// A node drawn with an image file.
    ///
    /// Relative icon paths are resolved against the assets directory at
    /// render time.
    Custom { icon: PathBuf },
}

impl NodeKind {
    /// Creates a [`NodeKind::Custom`] drawn with the given icon.
    pub fn custom(icon: impl Into<PathBuf>) -> Self {
        Self::Custom { icon: icon.into() }
    }

    /// Returns the icon path for custom nodes.
    pub fn icon(&self) -> Option<&Path> {
        match self {
            Self::Custom { icon } => Some(icon),
            Self::User | Self::Server => None,
        }
    }
}

/// A named visual grouping of nodes and nested clusters.
#[derive(Debug, Clone)]
pub struct Cluster {
    id: Id,
    label: String,
    parent: Option<Id>,
}

impl Cluster {
    /// Creates a cluster. `parent` is `None` for a top-level cluster.
    pub fn new(id: Id, label: impl Into<String>, parent: Option<Id>) -> Self {
        Self {
            id,
            label: label.into(),
            parent,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn parent(&self) -> Option<Id> {
        self.parent
    }
}

/// A labeled box standing for one conceptual component.
#[derive(Debug, Clone)]
pub struct Node {
    id: Id,
    label: String,
    kind: NodeKind,
    cluster: Id,
}

impl Node {
    /// Creates a node inside `cluster`. Labels may span lines with `\n`.
    pub fn new(id: Id, label: impl Into<String>, kind: NodeKind, cluster: Id) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            cluster,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the id of the cluster this node belongs to.
    pub fn cluster(&self) -> Id {
        self.cluster
    }
}

/// Line pattern used to draw an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Returns the Graphviz `style` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which ends of an edge carry an arrowhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowDirection {
    /// Arrowhead at the target.
    #[default]
    Forward,
    /// Arrowhead at the source.
    Backward,
    /// Arrowheads at both ends.
    Both,
    /// No arrowheads.
    None,
}

impl ArrowDirection {
    /// Returns the Graphviz `dir` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrowDirection::Forward => "forward",
            ArrowDirection::Backward => "back",
            ArrowDirection::Both => "both",
            ArrowDirection::None => "none",
        }
    }
}

/// Presentation of an edge. Purely visual; it has no effect on structure.
///
/// # Examples
///
/// ```
/// use trellis_core::{color::Color, semantic::{EdgeStyle, LineStyle}};
///
/// let style = EdgeStyle::new()
///     .label("API calls")
///     .color(Color::new("#00008b").unwrap());
/// assert_eq!(style.label_text(), Some("API calls"));
///
/// let dashed = EdgeStyle::new().label("Fetch context").dashed();
/// assert_eq!(dashed.line_style(), LineStyle::Dashed);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeStyle {
    label: Option<String>,
    color: Option<Color>,
    line: LineStyle,
    direction: ArrowDirection,
}

impl EdgeStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the edge label. Labels may span lines with `\n`.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn line(mut self, line: LineStyle) -> Self {
        self.line = line;
        self
    }

    pub fn dashed(self) -> Self {
        self.line(LineStyle::Dashed)
    }

    pub fn dotted(self) -> Self {
        self.line(LineStyle::Dotted)
    }

    pub fn direction(mut self, direction: ArrowDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Returns the explicit color, or `None` to use the configured default.
    pub fn color_value(&self) -> Option<Color> {
        self.color
    }

    pub fn line_style(&self) -> LineStyle {
        self.line
    }

    pub fn arrow_direction(&self) -> ArrowDirection {
        self.direction
    }
}

/// A directed, labeled arrow between two nodes.
#[derive(Debug, Clone)]
pub struct Edge {
    source: Id,
    target: Id,
    style: EdgeStyle,
}

impl Edge {
    pub fn new(source: Id, target: Id, style: EdgeStyle) -> Self {
        Self {
            source,
            target,
            style,
        }
    }

    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}
