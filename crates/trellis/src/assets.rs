//! Icon lookup for custom nodes.
//!
//! Every icon is checked before anything is rendered, so a missing file
//! stops the run before an output file is touched.

use std::path::{self, Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use trellis_core::{identifier::Id, semantic::Diagram};

use crate::TrellisError;

/// Resolves icon paths against an assets directory.
#[derive(Debug, Clone)]
pub struct IconResolver {
    assets_dir: PathBuf,
}

impl IconResolver {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Resolves the icon of every custom node in `diagram`.
    ///
    /// Relative icon paths are joined to the assets directory; absolute
    /// ones are used as they are. Resolved paths are absolute so Graphviz
    /// finds them regardless of its working directory.
    ///
    /// # Errors
    ///
    /// Returns [`TrellisError::IconNotFound`] for the first icon that is
    /// not an existing regular file.
    pub fn resolve(&self, diagram: &Diagram) -> Result<ResolvedIcons, TrellisError> {
        let mut icons = IndexMap::new();
        for node in diagram.nodes() {
            let Some(icon) = node.kind().icon() else {
                continue;
            };

            let path = self.resolve_icon(node.id(), icon)?;
            debug!(node = node.id().as_string(), path:? = path; "Resolved icon");
            icons.insert(node.id(), path);
        }
        Ok(ResolvedIcons { icons })
    }

    fn resolve_icon(&self, node: Id, icon: &Path) -> Result<PathBuf, TrellisError> {
        let candidate = if icon.is_absolute() {
            icon.to_path_buf()
        } else {
            self.assets_dir.join(icon)
        };

        let not_found = || TrellisError::IconNotFound {
            node: node.as_string(),
            path: candidate.clone(),
        };

        if !candidate.is_file() {
            return Err(not_found());
        }
        path::absolute(&candidate).map_err(|_| not_found())
    }
}

/// Absolute icon paths keyed by node id.
#[derive(Debug, Clone, Default)]
pub struct ResolvedIcons {
    icons: IndexMap<Id, PathBuf>,
}

impl ResolvedIcons {
    /// Returns the icon path for `node`, if it is a custom node.
    pub fn get(&self, node: Id) -> Option<&Path> {
        self.icons.get(&node).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }
}

impl FromIterator<(Id, PathBuf)> for ResolvedIcons {
    fn from_iter<I: IntoIterator<Item = (Id, PathBuf)>>(iter: I) -> Self {
        Self {
            icons: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;
    use trellis_core::semantic::{DiagramBuilder, NodeKind};

    use super::*;

    fn diagram_with_icons(icons: &[&str]) -> Diagram {
        DiagramBuilder::new("Icons")
            .cluster("c", "C", |c| {
                c.node("user", "User", NodeKind::User);
                for (i, icon) in icons.iter().enumerate() {
                    c.node(&format!("n{i}"), "N", NodeKind::custom(*icon));
                }
            })
            .build()
    }

    #[test]
    fn test_resolves_relative_icons_against_assets_dir() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("java.png"), b"png").unwrap();

        let resolver = IconResolver::new(dir.path());
        let icons = resolver.resolve(&diagram_with_icons(&["java.png"])).unwrap();

        assert_eq!(icons.len(), 1);
        let path = icons.get(Id::new("n0")).unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("java.png"));
        assert!(icons.get(Id::new("user")).is_none());
    }

    #[test]
    fn test_absolute_icon_ignores_assets_dir() {
        let dir = tempdir().unwrap();
        let icon = dir.path().join("osm.png");
        fs::write(&icon, b"png").unwrap();

        let resolver = IconResolver::new("/definitely/not/here");
        let icons = resolver
            .resolve(&diagram_with_icons(&[icon.to_str().unwrap()]))
            .unwrap();

        assert_eq!(icons.get(Id::new("n0")), Some(icon.as_path()));
    }

    #[test]
    fn test_missing_icon_names_node_and_path() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("java.png"), b"png").unwrap();

        let resolver = IconResolver::new(dir.path());
        let err = resolver
            .resolve(&diagram_with_icons(&["java.png", "firebase.png"]))
            .unwrap_err();

        match err {
            TrellisError::IconNotFound { node, path } => {
                assert_eq!(node, "n1");
                assert_eq!(path, dir.path().join("firebase.png"));
            }
            other => panic!("expected IconNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_directory_is_not_an_icon() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("icons")).unwrap();

        let resolver = IconResolver::new(dir.path());
        let result = resolver.resolve(&diagram_with_icons(&["icons"]));

        assert!(matches!(result, Err(TrellisError::IconNotFound { .. })));
    }

    #[test]
    fn test_no_custom_nodes_resolves_nothing() {
        let resolver = IconResolver::new(".");
        let icons = resolver.resolve(&diagram_with_icons(&[])).unwrap();
        assert!(icons.is_empty());
    }
}
