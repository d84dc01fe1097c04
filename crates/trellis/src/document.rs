//! Serializable diagram documents.
//!
//! A document is the on-disk form of a [`crate::diagram::Diagram`]: a stencil
//! namespace followed by a flat list of nodes. Containment is expressed by
//! each node listing its direct children in order.
//!
//! ```toml
//! namespace = "http://b3mn.org/stencilset/bpel#"
//!
//! [[nodes]]
//! id = "scope"
//! kind = "scope"
//! children = ["receive", "faults"]
//! bounds = { x = 0.0, y = 0.0, width = 200.0, height = 100.0 }
//!
//! [[nodes]]
//! id = "else"
//! kind = "else"
//! roles = ["lastChild"]
//! bounds = { x = 0.0, y = 0.0, width = 100.0, height = 40.0 }
//! properties = { oryx-autolayout = false }
//! ```
//!
//! `kind` and `roles` are local names; they are qualified with the document
//! namespace when the diagram is built.

use std::{collections::BTreeMap, ops::Range};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use trellis_core::geometry::{Bounds, GeometryError, Point};

use crate::controller::OccurrenceKind;

/// Errors found while reading or validating a document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("{message}")]
    Syntax {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("node `{parent}` lists unknown child `{child}`")]
    UnknownChild { parent: String, child: String },

    #[error("node `{child}` is listed as a child of both `{first}` and `{second}`")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },

    #[error("containment cycle through node `{0}`")]
    Cycle(String),

    #[error("node `{node}` has invalid bounds: {source}")]
    InvalidBounds {
        node: String,
        #[source]
        source: GeometryError,
    },
}

impl DocumentError {
    /// Byte range in the source text the error points at, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Syntax { span, .. } => span.clone(),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for DocumentError {
    fn from(err: toml::de::Error) -> Self {
        Self::Syntax {
            message: err.message().to_string(),
            span: err.span(),
        }
    }
}

/// Top-level document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Stencil namespace qualifying every kind and role in the document.
    #[serde(default)]
    pub namespace: String,

    #[serde(default)]
    pub nodes: Vec<NodeDocument>,
}

/// One node of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeDocument {
    pub id: String,

    /// Local stencil id, e.g. `sequence` or `eventHandlers`.
    pub kind: String,

    /// Local role tags, e.g. `lastChild`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    /// Occurrence kind the host raises for this container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<OccurrenceKind>,

    /// Direct children, in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,

    pub bounds: Rect,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, PropertyValue>,
}

/// Rectangle as written in documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Converts to validated [`Bounds`].
    ///
    /// # Errors
    ///
    /// Fails for negative sizes and non-finite numbers.
    pub fn to_bounds(self) -> Result<Bounds, GeometryError> {
        Bounds::new(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }
}

impl From<Bounds> for Rect {
    fn from(bounds: Bounds) -> Self {
        Self {
            x: bounds.min_x(),
            y: bounds.min_y(),
            width: bounds.width(),
            height: bounds.height(),
        }
    }
}

/// Value of a node property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}
