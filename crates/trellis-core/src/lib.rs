//! Trellis Core Types and Definitions
//!
//! This crate provides the foundational types shared by the trellis layout
//! engine and its hosts. It includes:
//!
//! - **Identifiers**: String-interned node identifiers ([`identifier::Id`])
//! - **Geometry**: Points, sizes and corner-based bounds ([`geometry`] module)
//! - **Stencil**: Node type metadata resolved into closed kinds and roles ([`stencil`] module)

pub mod geometry;
pub mod identifier;
pub mod stencil;
