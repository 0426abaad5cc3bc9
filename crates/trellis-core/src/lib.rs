//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types for Trellis architecture
//! diagrams. It includes:
//!
//! - **Identifiers**: String-interned identifiers ([`identifier::Id`])
//! - **Colors**: CSS color handling with Graphviz hex output ([`color::Color`])
//! - **Semantic**: The declarative diagram model and its builder ([`semantic`] module)
//! - **Diagnostics**: Coded errors and warnings raised against a diagram ([`diagnostic`] module)

pub mod color;
pub mod diagnostic;
pub mod identifier;
pub mod semantic;
