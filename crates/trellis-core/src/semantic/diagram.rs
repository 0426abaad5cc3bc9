//! The top-level diagram description and its layout settings.

use std::{fmt, str::FromStr};

use indexmap::IndexMap;

use crate::{
    identifier::Id,
    semantic::{Cluster, Edge, Node},
};

/// Direction in which Graphviz ranks the diagram (`rankdir`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    TopBottom,
    BottomTop,
    #[default]
    LeftRight,
    RightLeft,
}

impl Direction {
    /// Returns the Graphviz `rankdir` value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::TopBottom => "TB",
            Direction::BottomTop => "BT",
            Direction::LeftRight => "LR",
            Direction::RightLeft => "RL",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "TB" => Ok(Direction::TopBottom),
            "BT" => Ok(Direction::BottomTop),
            "LR" => Ok(Direction::LeftRight),
            "RL" => Ok(Direction::RightLeft),
            _ => Err(format!(
                "invalid direction `{s}`: expected one of TB, BT, LR, RL"
            )),
        }
    }
}

/// How Graphviz routes edges (`splines`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Splines {
    Ortho,
    Spline,
    Polyline,
    Line,
    Curved,
}

impl Splines {
    pub fn as_str(&self) -> &'static str {
        match self {
            Splines::Ortho => "ortho",
            Splines::Spline => "spline",
            Splines::Polyline => "polyline",
            Splines::Line => "line",
            Splines::Curved => "curved",
        }
    }
}

impl FromStr for Splines {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ortho" => Ok(Splines::Ortho),
            "spline" | "true" => Ok(Splines::Spline),
            "polyline" => Ok(Splines::Polyline),
            "line" | "false" => Ok(Splines::Line),
            "curved" => Ok(Splines::Curved),
            _ => Err(format!("invalid splines value `{s}`")),
        }
    }
}

/// Layout hints forwarded to Graphviz as graph attributes.
///
/// The typed fields cover the hints the diagrams in this project use; any
/// other Graphviz graph attribute goes in `extra` and is written verbatim,
/// in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutHints {
    splines: Option<Splines>,
    nodesep: Option<f32>,
    ranksep: Option<f32>,
    extra: IndexMap<String, String>,
}

impl LayoutHints {
    pub fn splines(&self) -> Option<Splines> {
        self.splines
    }

    /// Minimum space between nodes of the same rank, in inches.
    pub fn nodesep(&self) -> Option<f32> {
        self.nodesep
    }

    /// Minimum space between ranks, in inches.
    pub fn ranksep(&self) -> Option<f32> {
        self.ranksep
    }

    pub fn extra(&self) -> &IndexMap<String, String> {
        &self.extra
    }

    pub fn set_splines(&mut self, splines: Splines) {
        self.splines = Some(splines);
    }

    pub fn set_nodesep(&mut self, nodesep: f32) {
        self.nodesep = Some(nodesep);
    }

    pub fn set_ranksep(&mut self, ranksep: f32) {
        self.ranksep = Some(ranksep);
    }

    /// Adds a raw graph attribute, replacing any earlier value for `key`.
    pub fn insert_extra(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.extra.insert(key.into(), value.into());
    }
}

/// A complete architecture diagram description.
///
/// Elements are kept in declaration order, which is also the order they are
/// written to Graphviz. That keeps the generated description stable from
/// one run to the next.
#[derive(Debug, Clone)]
pub struct Diagram {
    name: String,
    filename: String,
    direction: Direction,
    hints: LayoutHints,
    clusters: Vec<Cluster>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl Diagram {
    /// Creates a diagram from its parts without checking them.
    ///
    /// Use [`DiagramBuilder`](crate::semantic::DiagramBuilder) for the
    /// scoped, declarative form.
    pub fn new(
        name: impl Into<String>,
        filename: impl Into<String>,
        direction: Direction,
        hints: LayoutHints,
        clusters: Vec<Cluster>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
    ) -> Self {
        Self {
            name: name.into(),
            filename: filename.into(),
            direction,
            hints,
            clusters,
            nodes,
            edges,
        }
    }

    /// Returns the diagram title.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the output filename stem, without extension.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn hints(&self) -> &LayoutHints {
        &self.hints
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    /// Looks up a cluster by id.
    pub fn cluster(&self, id: Id) -> Option<&Cluster> {
        self.clusters.iter().find(|cluster| cluster.id() == id)
    }
}

/// Derives a filename stem from a diagram title: lowercase, with spaces
/// replaced by underscores.
///
/// ```
/// use trellis_core::semantic::default_filename;
///
/// assert_eq!(default_filename("Highway Star Architecture"), "highway_star_architecture");
/// ```
pub fn default_filename(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_str() {
        assert_eq!("LR".parse::<Direction>(), Ok(Direction::LeftRight));
        assert_eq!("tb".parse::<Direction>(), Ok(Direction::TopBottom));
        assert_eq!("BT".parse::<Direction>(), Ok(Direction::BottomTop));
        assert_eq!("rl".parse::<Direction>(), Ok(Direction::RightLeft));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(Direction::LeftRight.to_string(), "LR");
        assert_eq!(Direction::default(), Direction::LeftRight);
    }

    #[test]
    fn test_splines_from_str() {
        assert_eq!("ortho".parse::<Splines>(), Ok(Splines::Ortho));
        assert_eq!("true".parse::<Splines>(), Ok(Splines::Spline));
        assert_eq!("false".parse::<Splines>(), Ok(Splines::Line));
        assert!("wiggly".parse::<Splines>().is_err());
    }

    #[test]
    fn test_layout_hints_extra_keeps_insertion_order() {
        let mut hints = LayoutHints::default();
        hints.insert_extra("pad", "2.0");
        hints.insert_extra("concentrate", "true");
        hints.insert_extra("pad", "1.0");

        let entries: Vec<_> = hints.extra().iter().collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0], (&"pad".to_string(), &"1.0".to_string()));
        assert_eq!(entries[1].0, "concentrate");
    }

    #[test]
    fn test_default_filename() {
        assert_eq!(default_filename("Web Service"), "web_service");
        assert_eq!(default_filename("  Padded  "), "padded");
    }
}
