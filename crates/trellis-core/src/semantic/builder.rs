//! Scoped, declarative construction of a [`Diagram`].
//!
//! Clusters are opened with a closure; every node declared inside the
//! closure belongs to that cluster, and clusters opened inside it are nested.
//! Edges may be declared at any scope but always connect at diagram level.
//!
//! ```
//! use trellis_core::semantic::{DiagramBuilder, Direction, EdgeStyle, NodeKind};
//!
//! let diagram = DiagramBuilder::new("Web Service")
//!     .direction(Direction::TopBottom)
//!     .cluster("clients", "Clients", |clients| {
//!         clients.node("browser", "Browser", NodeKind::User);
//!     })
//!     .cluster("servers", "Servers", |servers| {
//!         servers.node("api", "API", NodeKind::Server);
//!     })
//!     .edge("browser", "api", EdgeStyle::new().label("HTTPS"))
//!     .build();
//!
//! assert_eq!(diagram.filename(), "web_service");
//! assert_eq!(diagram.nodes().len(), 2);
//! assert_eq!(diagram.edges().len(), 1);
//! ```

use log::debug;

use crate::{
    identifier::Id,
    semantic::{
        Cluster, Diagram, Direction, Edge, EdgeStyle, LayoutHints, Node, NodeKind, Splines,
        default_filename,
    },
};

/// Builder for a [`Diagram`].
///
/// `build` does not validate; references to undeclared nodes or clusters are
/// kept as written and reported by validation.
#[derive(Debug)]
pub struct DiagramBuilder {
    name: String,
    filename: Option<String>,
    direction: Direction,
    hints: LayoutHints,
    clusters: Vec<Cluster>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl DiagramBuilder {
    /// Starts a diagram with the given title.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            filename: None,
            direction: Direction::default(),
            hints: LayoutHints::default(),
            clusters: Vec::new(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Sets the output filename stem. Defaults to the title, lowercased
    /// with spaces replaced by underscores.
    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn splines(mut self, splines: Splines) -> Self {
        self.hints.set_splines(splines);
        self
    }

    pub fn nodesep(mut self, nodesep: f32) -> Self {
        self.hints.set_nodesep(nodesep);
        self
    }

    pub fn ranksep(mut self, ranksep: f32) -> Self {
        self.hints.set_ranksep(ranksep);
        self
    }

    /// Adds a raw Graphviz graph attribute.
    pub fn graph_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.hints.insert_extra(key, value);
        self
    }

    /// Opens a top-level cluster and runs `f` inside it.
    pub fn cluster(
        mut self,
        id: &str,
        label: impl Into<String>,
        f: impl FnOnce(&mut ClusterScope<'_>),
    ) -> Self {
        let id = Id::new(id);
        self.clusters.push(Cluster::new(id, label, None));

        let mut scope = ClusterScope {
            id,
            clusters: &mut self.clusters,
            nodes: &mut self.nodes,
            edges: &mut self.edges,
        };
        f(&mut scope);

        self
    }

    /// Declares an edge from `source` to `target`.
    pub fn edge(mut self, source: &str, target: &str, style: EdgeStyle) -> Self {
        self.edges
            .push(Edge::new(Id::new(source), Id::new(target), style));
        self
    }

    /// Finishes the description.
    pub fn build(self) -> Diagram {
        let filename = self
            .filename
            .unwrap_or_else(|| default_filename(&self.name));

        debug!(
            name = self.name,
            clusters = self.clusters.len(),
            nodes = self.nodes.len(),
            edges = self.edges.len();
            "Diagram description built"
        );

        Diagram::new(
            self.name,
            filename,
            self.direction,
            self.hints,
            self.clusters,
            self.nodes,
            self.edges,
        )
    }
}

/// The body of an open cluster inside a [`DiagramBuilder`].
#[derive(Debug)]
pub struct ClusterScope<'a> {
    id: Id,
    clusters: &'a mut Vec<Cluster>,
    nodes: &'a mut Vec<Node>,
    edges: &'a mut Vec<Edge>,
}

impl ClusterScope<'_> {
    /// Returns the id of the cluster being built.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Declares a node in this cluster.
    pub fn node(&mut self, id: &str, label: impl Into<String>, kind: NodeKind) -> &mut Self {
        self.nodes.push(Node::new(Id::new(id), label, kind, self.id));
        self
    }

    /// Opens a cluster nested in this one and runs `f` inside it.
    pub fn cluster(
        &mut self,
        id: &str,
        label: impl Into<String>,
        f: impl FnOnce(&mut ClusterScope<'_>),
    ) -> &mut Self {
        let id = Id::new(id);
        self.clusters.push(Cluster::new(id, label, Some(self.id)));

        let mut scope = ClusterScope {
            id,
            clusters: &mut *self.clusters,
            nodes: &mut *self.nodes,
            edges: &mut *self.edges,
        };
        f(&mut scope);

        self
    }

    /// Declares an edge. It is drawn at diagram level, not inside this
    /// cluster.
    pub fn edge(&mut self, source: &str, target: &str, style: EdgeStyle) -> &mut Self {
        self.edges
            .push(Edge::new(Id::new(source), Id::new(target), style));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_belong_to_enclosing_cluster() {
        let diagram = DiagramBuilder::new("Test")
            .cluster("outer", "Outer", |outer| {
                outer.node("a", "A", NodeKind::User);
                outer.cluster("inner", "Inner", |inner| {
                    inner.node("b", "B", NodeKind::Server);
                });
                outer.node("c", "C", NodeKind::custom("c.png"));
            })
            .build();

        let cluster_of = |id: &str| diagram.node(Id::new(id)).map(Node::cluster);
        assert_eq!(cluster_of("a"), Some(Id::new("outer")));
        assert_eq!(cluster_of("b"), Some(Id::new("inner")));
        assert_eq!(cluster_of("c"), Some(Id::new("outer")));

        let inner = diagram.cluster(Id::new("inner")).unwrap();
        assert_eq!(inner.parent(), Some(Id::new("outer")));
        assert_eq!(inner.label(), "Inner");
        assert_eq!(diagram.cluster(Id::new("outer")).unwrap().parent(), None);
    }

    #[test]
    fn test_edges_from_any_scope_share_one_list() {
        let diagram = DiagramBuilder::new("Test")
            .cluster("c1", "C1", |c1| {
                c1.node("a", "A", NodeKind::User)
                    .node("b", "B", NodeKind::Server)
                    .edge("a", "b", EdgeStyle::new().label("inside"));
            })
            .edge("b", "a", EdgeStyle::new().label("outside"))
            .build();

        let labels: Vec<_> = diagram
            .edges()
            .iter()
            .map(|edge| edge.style().label_text())
            .collect();
        assert_eq!(labels, vec![Some("inside"), Some("outside")]);
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let diagram = DiagramBuilder::new("Test")
            .cluster("z", "Z", |z| {
                z.node("n2", "N2", NodeKind::User);
                z.node("n1", "N1", NodeKind::User);
            })
            .cluster("a", "A", |_| {})
            .build();

        let clusters: Vec<_> = diagram.clusters().iter().map(Cluster::id).collect();
        assert_eq!(clusters, vec![Id::new("z"), Id::new("a")]);

        let nodes: Vec<_> = diagram.nodes().iter().map(Node::id).collect();
        assert_eq!(nodes, vec![Id::new("n2"), Id::new("n1")]);
    }

    #[test]
    fn test_layout_settings() {
        let diagram = DiagramBuilder::new("Highway Star Architecture")
            .filename("highway_star_arch")
            .direction(Direction::LeftRight)
            .splines(Splines::Ortho)
            .nodesep(1.0)
            .ranksep(1.5)
            .graph_attr("pad", "2.0")
            .build();

        assert_eq!(diagram.name(), "Highway Star Architecture");
        assert_eq!(diagram.filename(), "highway_star_arch");
        assert_eq!(diagram.direction(), Direction::LeftRight);
        assert_eq!(diagram.hints().splines(), Some(Splines::Ortho));
        assert_eq!(diagram.hints().nodesep(), Some(1.0));
        assert_eq!(diagram.hints().ranksep(), Some(1.5));
        assert_eq!(diagram.hints().extra().get("pad").map(String::as_str), Some("2.0"));
    }

    #[test]
    fn test_build_keeps_dangling_references() {
        let diagram = DiagramBuilder::new("Test")
            .edge("ghost", "phantom", EdgeStyle::new())
            .build();

        assert_eq!(diagram.edges().len(), 1);
        assert!(diagram.node(Id::new("ghost")).is_none());
    }
}
