//! Semantic diagram model types.
//!
//! A [`Diagram`] is a flat, declarative description: clusters point at their
//! parent, nodes point at their cluster, and edges point at node ids. The
//! model does not enforce any structural rule on its own, so a malformed
//! description can be represented and rejected later by validation.
//!
//! # Pipeline Position
//!
//! ```text
//! DiagramBuilder (or Diagram::new)
//!     ↓
//! Semantic Model (these types)
//!     ↓ validate
//! Cluster hierarchy
//!     ↓ export
//! DOT graph → Graphviz → image file
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - The diagram itself: [`Diagram`], [`Direction`], [`LayoutHints`], [`Splines`]
//! - [`element`] - Diagram elements: [`Cluster`], [`Node`], [`Edge`] and their styles
//! - [`builder`] - Scoped construction with [`DiagramBuilder`]

pub mod builder;
pub mod diagram;
pub mod element;

pub use builder::*;
pub use diagram::*;
pub use element::*;
