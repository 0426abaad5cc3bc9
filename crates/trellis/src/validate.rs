//! Structural validation of a diagram description.
//!
//! Every rule is checked and every violation reported, so a broken
//! description produces one report listing all of its problems.
//!
//! | Code | Rule |
//! |------|------|
//! | E200 | edge endpoints are declared nodes |
//! | E201 | node ids are unique |
//! | E202 | cluster ids are unique |
//! | E203 | every node's cluster is declared |
//! | E204 | every parent cluster is declared |
//! | E205 | clusters form a tree |
//! | E206 | the filename stem is a plain file name |
//! | W100 | clusters contain at least one node somewhere below them |
//! | W101 | edges do not loop back to their source |

use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use petgraph::{algo::tarjan_scc, graph::DiGraph};

use trellis_core::{
    diagnostic::{Diagnostic, DiagnosticCollector, ErrorCode, ValidationError},
    identifier::Id,
    semantic::Diagram,
};

/// Validates `diagram`.
///
/// Returns the warnings when the description is usable.
///
/// # Errors
///
/// Returns a [`ValidationError`] holding every diagnostic found when any
/// rule marked as an error is broken.
pub fn validate(diagram: &Diagram) -> Result<Vec<Diagnostic>, ValidationError> {
    let mut collector = DiagnosticCollector::new();

    check_filename(diagram, &mut collector);
    let clusters = check_clusters(diagram, &mut collector);
    let nodes = check_nodes(diagram, &clusters, &mut collector);
    check_edges(diagram, &nodes, &mut collector);
    if !collector.has_errors() {
        check_empty_clusters(diagram, &mut collector);
    }

    let result = collector.finish();
    match &result {
        Ok(warnings) => {
            for warning in warnings {
                warn!("{warning}");
            }
            debug!(warnings = warnings.len(); "Diagram validated");
        }
        Err(err) => debug!(diagnostics = err.diagnostics().len(); "Diagram validation failed"),
    }
    result
}

fn check_filename(diagram: &Diagram, collector: &mut DiagnosticCollector) {
    let filename = diagram.filename();
    if filename.trim().is_empty() {
        collector.emit(
            Diagnostic::error("diagram filename is empty")
                .with_code(ErrorCode::E206)
                .with_help("set a filename stem such as `architecture`"),
        );
    } else if filename.contains(['/', '\\']) {
        collector.emit(
            Diagnostic::error(format!(
                "diagram filename `{filename}` contains a path separator"
            ))
            .with_code(ErrorCode::E206)
            .with_help("choose the directory with the output directory setting instead"),
        );
    }
}

/// Checks cluster uniqueness, parent references, and cycles.
///
/// Returns the set of declared cluster ids.
fn check_clusters(diagram: &Diagram, collector: &mut DiagnosticCollector) -> HashSet<Id> {
    let mut declared = HashSet::new();
    for cluster in diagram.clusters() {
        if !declared.insert(cluster.id()) {
            collector.emit(
                Diagnostic::error(format!("cluster `{}` is declared more than once", cluster.id()))
                    .with_code(ErrorCode::E202)
                    .with_help("give each cluster a unique id"),
            );
        }
    }

    for cluster in diagram.clusters() {
        let Some(parent) = cluster.parent() else {
            continue;
        };
        if !declared.contains(&parent) {
            collector.emit(
                Diagnostic::error(format!(
                    "cluster `{}` is nested in undeclared cluster `{parent}`",
                    cluster.id()
                ))
                .with_code(ErrorCode::E204),
            );
        }
    }

    check_cluster_cycles(diagram, collector);

    declared
}

fn check_cluster_cycles(diagram: &Diagram, collector: &mut DiagnosticCollector) {
    let mut graph = DiGraph::<Id, ()>::new();
    let mut indices = HashMap::new();
    for cluster in diagram.clusters() {
        indices
            .entry(cluster.id())
            .or_insert_with(|| graph.add_node(cluster.id()));
    }

    for cluster in diagram.clusters() {
        let parent_idx = cluster.parent().and_then(|parent| indices.get(&parent));
        if let Some(&parent_idx) = parent_idx {
            graph.update_edge(parent_idx, indices[&cluster.id()], ());
        }
    }

    for component in tarjan_scc(&graph) {
        let is_cycle = component.len() > 1
            || component
                .first()
                .is_some_and(|&idx| graph.contains_edge(idx, idx));
        if !is_cycle {
            continue;
        }

        // Node indices follow declaration order.
        let mut members = component;
        members.sort();
        let names: Vec<String> = members
            .iter()
            .map(|&idx| format!("`{}`", graph[idx]))
            .collect();

        collector.emit(
            Diagnostic::error(format!(
                "clusters {} are nested inside each other",
                names.join(", ")
            ))
            .with_code(ErrorCode::E205)
            .with_help("cluster nesting must form a tree"),
        );
    }
}

/// Checks node uniqueness and cluster membership.
///
/// Returns the set of declared node ids.
fn check_nodes(
    diagram: &Diagram,
    clusters: &HashSet<Id>,
    collector: &mut DiagnosticCollector,
) -> HashSet<Id> {
    let mut declared = HashSet::new();
    for node in diagram.nodes() {
        if !declared.insert(node.id()) {
            collector.emit(
                Diagnostic::error(format!("node `{}` is declared more than once", node.id()))
                    .with_code(ErrorCode::E201)
                    .with_help("give each node a unique id"),
            );
        }

        if !clusters.contains(&node.cluster()) {
            collector.emit(
                Diagnostic::error(format!(
                    "node `{}` is placed in undeclared cluster `{}`",
                    node.id(),
                    node.cluster()
                ))
                .with_code(ErrorCode::E203)
                .with_help("every node must belong to exactly one declared cluster"),
            );
        }
    }
    declared
}

fn check_edges(diagram: &Diagram, nodes: &HashSet<Id>, collector: &mut DiagnosticCollector) {
    for edge in diagram.edges() {
        for (end, id) in [("source", edge.source()), ("target", edge.target())] {
            if !nodes.contains(&id) {
                collector.emit(
                    Diagnostic::error(format!(
                        "edge {} -> {} has undeclared {end} `{id}`",
                        edge.source(),
                        edge.target()
                    ))
                    .with_code(ErrorCode::E200)
                    .with_help(format!("declare `{id}` inside a cluster before connecting it")),
                );
            }
        }

        if edge.source() == edge.target() {
            collector.emit(
                Diagnostic::warning(format!("edge from `{}` loops back to itself", edge.source()))
                    .with_code(ErrorCode::W101),
            );
        }
    }
}

/// Warns about clusters with no node anywhere below them.
///
/// Only run on an otherwise valid diagram, so parent chains terminate.
fn check_empty_clusters(diagram: &Diagram, collector: &mut DiagnosticCollector) {
    let mut populated = HashSet::new();
    for node in diagram.nodes() {
        let mut current = Some(node.cluster());
        while let Some(id) = current {
            if !populated.insert(id) {
                break;
            }
            current = diagram.cluster(id).and_then(|cluster| cluster.parent());
        }
    }

    for cluster in diagram.clusters() {
        if !populated.contains(&cluster.id()) {
            collector.emit(
                Diagnostic::warning(format!("cluster `{}` contains no nodes", cluster.id()))
                    .with_code(ErrorCode::W100)
                    .with_help("Graphviz does not draw empty clusters"),
            );
        }
    }
}
