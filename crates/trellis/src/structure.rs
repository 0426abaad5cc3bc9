//! Cluster hierarchy of a validated diagram.
//!
//! The flat parent links of the semantic model are turned into a tree, so
//! export can walk clusters from the top down and nest Graphviz subgraphs
//! the same way.

use std::collections::HashMap;

use log::trace;
use petgraph::{
    Direction,
    algo::is_cyclic_directed,
    graph::{DiGraph, NodeIndex},
};

use trellis_core::{
    identifier::Id,
    semantic::{Cluster, Diagram, Node},
};

use crate::TrellisError;

/// Tree of clusters with the nodes each one directly contains.
///
/// Roots, children, and members all keep declaration order.
#[derive(Debug)]
pub struct ClusterTree<'a> {
    graph: DiGraph<&'a Cluster, ()>,
    index: HashMap<Id, NodeIndex>,
    roots: Vec<NodeIndex>,
    members: HashMap<Id, Vec<&'a Node>>,
}

impl<'a> ClusterTree<'a> {
    /// Builds the tree for `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::Graph`] if a cluster's parent or a node's
    /// cluster is not declared, or if clusters are nested in a cycle. None
    /// of these can happen for a diagram that passed validation.
    pub fn from_diagram(diagram: &'a Diagram) -> Result<Self, TrellisError> {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for cluster in diagram.clusters() {
            index.insert(cluster.id(), graph.add_node(cluster));
        }

        let mut roots = Vec::new();
        for cluster in diagram.clusters() {
            let idx = index[&cluster.id()];
            match cluster.parent() {
                Some(parent) => {
                    let parent_idx = *index.get(&parent).ok_or_else(|| {
                        TrellisError::Graph(format!(
                            "cluster `{}` refers to unknown parent `{parent}`",
                            cluster.id()
                        ))
                    })?;
                    graph.add_edge(parent_idx, idx, ());
                }
                None => roots.push(idx),
            }
        }

        if is_cyclic_directed(&graph) {
            return Err(TrellisError::Graph(
                "cluster nesting contains a cycle".to_string(),
            ));
        }

        let mut members: HashMap<Id, Vec<&Node>> = HashMap::new();
        for node in diagram.nodes() {
            if !index.contains_key(&node.cluster()) {
                return Err(TrellisError::Graph(format!(
                    "node `{}` refers to unknown cluster `{}`",
                    node.id(),
                    node.cluster()
                )));
            }
            members.entry(node.cluster()).or_default().push(node);
        }

        let tree = Self {
            graph,
            index,
            roots,
            members,
        };
        trace!(tree:?; "Built cluster tree");
        Ok(tree)
    }

    /// Returns the top-level clusters.
    pub fn roots(&self) -> impl Iterator<Item = &'a Cluster> + '_ {
        self.roots.iter().map(|&idx| self.graph[idx])
    }

    /// Returns the clusters nested directly in `id`.
    pub fn children(&self, id: Id) -> Vec<&'a Cluster> {
        let Some(&idx) = self.index.get(&id) else {
            return Vec::new();
        };
        // Neighbors come back newest first; indices follow declaration order.
        let mut children: Vec<NodeIndex> = self.graph.neighbors(idx).collect();
        children.sort();
        children.into_iter().map(|child| self.graph[child]).collect()
    }

    /// Returns the nodes declared directly in `id`.
    pub fn nodes_in(&self, id: Id) -> &[&'a Node] {
        self.members.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Returns how deeply `id` is nested; top-level clusters are at depth 0.
    pub fn depth(&self, id: Id) -> usize {
        let Some(&start) = self.index.get(&id) else {
            return 0;
        };

        let mut depth = 0;
        let mut current = start;
        while let Some(parent) = self
            .graph
            .neighbors_directed(current, Direction::Incoming)
            .next()
        {
            depth += 1;
            current = parent;
        }
        depth
    }

    /// Returns the number of clusters in the tree.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::semantic::{DiagramBuilder, Direction as Rankdir, LayoutHints, NodeKind};

    use super::*;

    fn nested_diagram() -> Diagram {
        DiagramBuilder::new("Nested")
            .cluster("client", "Client", |client| {
                client.node("user", "User", NodeKind::User);
            })
            .cluster("external", "External", |external| {
                external.cluster("maps", "Maps", |maps| {
                    maps.node("geo", "Geo", NodeKind::Server);
                    maps.node("osm", "OSM", NodeKind::Server);
                });
                external.cluster("db", "DB", |db| {
                    db.node("firebase", "Firebase", NodeKind::Server);
                });
            })
            .build()
    }

    fn ids<'a>(clusters: impl IntoIterator<Item = &'a Cluster>) -> Vec<Id> {
        clusters.into_iter().map(Cluster::id).collect()
    }

    #[test]
    fn test_roots_in_declaration_order() {
        let diagram = nested_diagram();
        let tree = ClusterTree::from_diagram(&diagram).unwrap();

        assert_eq!(ids(tree.roots()), vec![Id::new("client"), Id::new("external")]);
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_children_in_declaration_order() {
        let diagram = nested_diagram();
        let tree = ClusterTree::from_diagram(&diagram).unwrap();

        assert_eq!(
            ids(tree.children(Id::new("external"))),
            vec![Id::new("maps"), Id::new("db")]
        );
        assert!(tree.children(Id::new("client")).is_empty());
        assert!(tree.children(Id::new("unknown")).is_empty());
    }

    #[test]
    fn test_nodes_in_cluster() {
        let diagram = nested_diagram();
        let tree = ClusterTree::from_diagram(&diagram).unwrap();

        let maps: Vec<Id> = tree.nodes_in(Id::new("maps")).iter().map(|node| node.id()).collect();
        assert_eq!(maps, vec![Id::new("geo"), Id::new("osm")]);
        assert!(tree.nodes_in(Id::new("external")).is_empty());
    }

    #[test]
    fn test_depth() {
        let diagram = nested_diagram();
        let tree = ClusterTree::from_diagram(&diagram).unwrap();

        assert_eq!(tree.depth(Id::new("client")), 0);
        assert_eq!(tree.depth(Id::new("external")), 0);
        assert_eq!(tree.depth(Id::new("maps")), 1);
        assert_eq!(tree.depth(Id::new("db")), 1);
    }

    #[test]
    fn test_unknown_parent_is_graph_error() {
        let diagram = Diagram::new(
            "Broken",
            "broken",
            Rankdir::default(),
            LayoutHints::default(),
            vec![Cluster::new(Id::new("orphan"), "Orphan", Some(Id::new("missing")))],
            vec![],
            vec![],
        );

        let result = ClusterTree::from_diagram(&diagram);
        assert!(matches!(result, Err(TrellisError::Graph(_))));
    }

    #[test]
    fn test_cycle_is_graph_error() {
        let diagram = Diagram::new(
            "Cyclic",
            "cyclic",
            Rankdir::default(),
            LayoutHints::default(),
            vec![
                Cluster::new(Id::new("ping"), "Ping", Some(Id::new("pong"))),
                Cluster::new(Id::new("pong"), "Pong", Some(Id::new("ping"))),
            ],
            vec![],
            vec![],
        );

        let result = ClusterTree::from_diagram(&diagram);
        assert!(matches!(result, Err(TrellisError::Graph(_))));
    }
}
