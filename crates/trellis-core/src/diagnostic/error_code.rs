//! Error codes for the Trellis diagnostic system.
//!
//! Codes are organized by kind:
//! - `E2xx` - Structural errors in the diagram description
//! - `W1xx` - Warnings that do not stop rendering

use std::fmt;

/// Error codes for categorizing diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Structural Errors (E2xx)
    // =========================================================================
    /// Undefined node reference.
    ///
    /// An edge names a source or target that is not a declared node.
    E200,

    /// Duplicate node.
    ///
    /// The same node id was declared more than once.
    E201,

    /// Duplicate cluster.
    ///
    /// The same cluster id was declared more than once.
    E202,

    /// Undefined cluster for node.
    ///
    /// A node is placed in a cluster that was never declared.
    E203,

    /// Undefined parent cluster.
    ///
    /// A cluster names a parent cluster that was never declared.
    E204,

    /// Cluster cycle.
    ///
    /// Following parent links from a cluster leads back to itself.
    E205,

    /// Invalid output filename.
    ///
    /// The filename stem is empty or contains a path separator.
    E206,

    // =========================================================================
    // Warnings (W1xx)
    // =========================================================================
    /// Empty cluster.
    ///
    /// Neither the cluster nor any cluster nested in it contains a node.
    /// Graphviz does not draw empty clusters.
    W100,

    /// Self loop.
    ///
    /// An edge starts and ends at the same node.
    W101,
}

impl ErrorCode {
    /// Returns the code as it appears in rendered diagnostics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E202 => "E202",
            ErrorCode::E203 => "E203",
            ErrorCode::E204 => "E204",
            ErrorCode::E205 => "E205",
            ErrorCode::E206 => "E206",
            ErrorCode::W100 => "W100",
            ErrorCode::W101 => "W101",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
