//! Conversion of a diagram into a Graphviz DOT graph.
//!
//! Clusters become nested `subgraph cluster_*` blocks, nodes are written
//! inside the cluster that owns them, and edges are written at the root in
//! declaration order. Given the same diagram, icons, and style the output is
//! byte-for-byte identical.

use dot_structures::{
    Attribute, Edge as DotEdge, EdgeTy, Graph, GraphAttributes, Id as DotId, Node as DotNode,
    NodeId, Stmt, Subgraph, Vertex,
};
use graphviz_rust::printer::{DotPrinter, PrinterContext};
use log::{debug, trace};

use trellis_core::{
    color::Color,
    identifier::Id,
    semantic::{Cluster, Diagram, Edge, LineStyle, Node, NodeKind},
};

use crate::{TrellisError, assets::ResolvedIcons, config::StyleConfig, structure::ClusterTree};

/// Side length of a node box, in inches.
const NODE_SIZE: f32 = 1.4;
/// Height of an icon node with a single-line label, in inches.
const ICON_NODE_HEIGHT: f32 = 1.9;
/// Extra height per additional label line on an icon node, in inches.
const LABEL_LINE_PADDING: f32 = 0.4;

/// Builds DOT graphs from validated diagrams.
#[derive(Debug)]
pub struct DotExporter<'a> {
    style: &'a StyleConfig,
    icons: &'a ResolvedIcons,
}

impl<'a> DotExporter<'a> {
    pub fn new(style: &'a StyleConfig, icons: &'a ResolvedIcons) -> Self {
        Self { style, icons }
    }

    /// Converts `diagram` into a directed DOT graph.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Config`] if a configured color does not
    /// parse, and [`TrellisError::Graph`] if the diagram's clusters do not
    /// form a tree.
    pub fn export(&self, diagram: &Diagram) -> Result<Graph, TrellisError> {
        let tree = ClusterTree::from_diagram(diagram)?;

        let mut stmts = vec![
            Stmt::GAttribute(GraphAttributes::Graph(self.graph_attributes(diagram)?)),
            Stmt::GAttribute(GraphAttributes::Node(self.node_defaults()?)),
            Stmt::GAttribute(GraphAttributes::Edge(self.edge_defaults()?)),
        ];

        for cluster in tree.roots() {
            stmts.push(Stmt::Subgraph(self.subgraph(&tree, cluster)?));
        }

        for edge in diagram.edges() {
            stmts.push(Stmt::Edge(edge_stmt(edge)));
        }

        debug!(
            clusters = tree.len(),
            edges = diagram.edges().len();
            "Built DOT graph"
        );

        Ok(Graph::DiGraph {
            id: quoted(diagram.name()),
            strict: false,
            stmts,
        })
    }

    fn graph_attributes(&self, diagram: &Diagram) -> Result<Vec<Attribute>, TrellisError> {
        let mut attrs = vec![
            attr("label", quoted(diagram.name())),
            attr("labelloc", plain("t")),
            attr("rankdir", plain(diagram.direction().as_str())),
            attr("pad", number(self.style.pad())),
            attr("fontname", quoted(self.style.font_name())),
            attr("fontsize", number(self.style.title_font_size())),
            attr("fontcolor", color(self.style.font_color().map_err(TrellisError::Config)?)),
        ];

        if let Some(background) = self
            .style
            .background_color()
            .map_err(TrellisError::Config)?
        {
            attrs.push(attr("bgcolor", color(background)));
        }

        let hints = diagram.hints();
        if let Some(splines) = hints.splines() {
            attrs.push(attr("splines", plain(splines.as_str())));
        }
        if let Some(nodesep) = hints.nodesep() {
            attrs.push(attr("nodesep", number(nodesep)));
        }
        if let Some(ranksep) = hints.ranksep() {
            attrs.push(attr("ranksep", number(ranksep)));
        }
        for (key, value) in hints.extra() {
            attrs.push(attr(key, quoted(value)));
        }

        Ok(attrs)
    }

    fn node_defaults(&self) -> Result<Vec<Attribute>, TrellisError> {
        Ok(vec![
            attr("shape", plain("box")),
            attr("style", plain("rounded")),
            attr("fixedsize", plain("true")),
            attr("width", number(NODE_SIZE)),
            attr("height", number(NODE_SIZE)),
            attr("labelloc", plain("b")),
            attr("imagescale", plain("true")),
            attr("fontname", quoted(self.style.font_name())),
            attr("fontsize", number(self.style.font_size())),
            attr("fontcolor", color(self.style.font_color().map_err(TrellisError::Config)?)),
        ])
    }

    fn edge_defaults(&self) -> Result<Vec<Attribute>, TrellisError> {
        Ok(vec![
            attr("color", color(self.style.edge_color().map_err(TrellisError::Config)?)),
            attr("fontname", quoted(self.style.font_name())),
            attr("fontsize", number(self.style.font_size())),
            attr("fontcolor", color(self.style.font_color().map_err(TrellisError::Config)?)),
        ])
    }

    fn subgraph(&self, tree: &ClusterTree<'_>, cluster: &Cluster) -> Result<Subgraph, TrellisError> {
        let depth = tree.depth(cluster.id());

        let mut stmts = vec![
            Stmt::Attribute(attr("label", quoted(cluster.label()))),
            Stmt::Attribute(attr("labeljust", plain("l"))),
            Stmt::Attribute(attr("style", plain("rounded"))),
            Stmt::Attribute(attr(
                "pencolor",
                color(self.style.cluster_border_color().map_err(TrellisError::Config)?),
            )),
            Stmt::Attribute(attr("fontname", quoted(self.style.font_name()))),
            Stmt::Attribute(attr("fontsize", number(self.style.cluster_font_size()))),
        ];

        if let Some(fill) = self
            .style
            .cluster_color(depth)
            .map_err(TrellisError::Config)?
        {
            stmts.push(Stmt::Attribute(attr("bgcolor", color(fill))));
        }

        for node in tree.nodes_in(cluster.id()) {
            stmts.push(Stmt::Node(self.node_stmt(node)?));
        }

        for child in tree.children(cluster.id()) {
            stmts.push(Stmt::Subgraph(self.subgraph(tree, child)?));
        }

        trace!(cluster = cluster.id().as_string(), depth; "Built subgraph");

        Ok(Subgraph {
            id: quoted(&format!("cluster_{}", cluster.id())),
            stmts,
        })
    }

    fn node_stmt(&self, node: &Node) -> Result<DotNode, TrellisError> {
        let mut attributes = vec![attr("label", quoted(node.label()))];

        match node.kind() {
            NodeKind::User => {
                attributes.push(attr("shape", plain("egg")));
                attributes.push(attr("labelloc", plain("c")));
            }
            NodeKind::Server => {
                attributes.push(attr("shape", plain("box3d")));
                attributes.push(attr("labelloc", plain("c")));
            }
            NodeKind::Custom { .. } => {
                let icon = self.icons.get(node.id()).ok_or_else(|| TrellisError::IconNotFound {
                    node: node.id().as_string(),
                    path: node.kind().icon().map(|icon| icon.to_path_buf()).unwrap_or_default(),
                })?;

                let extra_lines = node.label().matches('\n').count() as f32;
                attributes.push(attr("shape", plain("none")));
                attributes.push(attr("image", quoted(&icon.to_string_lossy())));
                attributes.push(attr(
                    "height",
                    number(ICON_NODE_HEIGHT + LABEL_LINE_PADDING * extra_lines),
                ));
            }
        }

        Ok(DotNode {
            id: node_id(node.id()),
            attributes,
        })
    }
}

/// Prints a DOT graph as text.
pub fn print(graph: &Graph) -> String {
    graph.print(&mut PrinterContext::default())
}

fn edge_stmt(edge: &Edge) -> DotEdge {
    let style = edge.style();

    let mut attributes = Vec::new();
    if let Some(label) = style.label_text() {
        attributes.push(attr("label", quoted(label)));
    }
    if let Some(edge_color) = style.color_value() {
        attributes.push(attr("color", color(edge_color)));
    }
    if style.line_style() != LineStyle::Solid {
        attributes.push(attr("style", plain(style.line_style().as_str())));
    }
    attributes.push(attr("dir", plain(style.arrow_direction().as_str())));

    DotEdge {
        ty: EdgeTy::Pair(
            Vertex::N(node_id(edge.source())),
            Vertex::N(node_id(edge.target())),
        ),
        attributes,
    }
}

fn node_id(id: Id) -> NodeId {
    NodeId(quoted(&id.as_string()), None)
}

fn attr(key: &str, value: DotId) -> Attribute {
    Attribute(plain(key), value)
}

fn plain(value: &str) -> DotId {
    DotId::Plain(value.to_string())
}

fn number(value: f32) -> DotId {
    // Two decimals is finer than Graphviz cares about and hides f32 noise.
    let rounded = (value * 100.0).round() / 100.0;
    DotId::Plain(rounded.to_string())
}

fn color(value: Color) -> DotId {
    quoted(&value.to_hex())
}

/// Wraps `text` in double quotes, escaping it for DOT.
///
/// Quotes and backslashes are escaped, line breaks become the DOT `\n`
/// escape, and carriage returns are dropped.
pub(crate) fn quoted(text: &str) -> DotId {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('"');
    for ch in text.chars() {
        match ch {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(ch),
        }
    }
    escaped.push('"');
    DotId::Escaped(escaped)
}
