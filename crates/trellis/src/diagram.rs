//! In-memory diagram store.
//!
//! [`Diagram`] plays the part of the host's diagram model: it owns node
//! identity, metadata and structure, and implements [`LayoutModel`] so the
//! layout core can read it and replace node bounds. Structure is fixed once
//! the diagram is built; only bounds change afterwards.
//!
//! The store also tracks which containers are pending layout. Every container
//! starts out pending. A bounds change to a node marks its parent pending, the
//! way a host raises an occurrence on the container of a resized child.

use std::collections::{BTreeMap, HashMap, HashSet};

use indexmap::IndexMap;
use log::debug;
use petgraph::{
    Direction,
    algo::toposort,
    graph::{DiGraph, NodeIndex},
    visit::DfsPostOrder,
};

use trellis_core::{
    geometry::Bounds,
    identifier::Id,
    stencil::{NodeType, TypeDescriptor},
};

use crate::{
    controller::{AUTO_LAYOUT_KEY, OccurrenceKind},
    document::{Document, DocumentError, NodeDocument, PropertyValue, Rect},
    model::{Hierarchy, LayoutModel},
};

/// A single node of the store.
#[derive(Debug, Clone)]
struct NodeEntry {
    descriptor: TypeDescriptor,
    node_type: NodeType,
    bounds: Bounds,
    properties: BTreeMap<String, PropertyValue>,
    children: Vec<Id>,
    layout: Option<OccurrenceKind>,
}

/// A validated containment forest of nodes.
///
/// Node order follows the source document. The containment graph has an edge
/// from every container to each of its direct children and shares node
/// indices with the node map.
#[derive(Debug, Clone)]
pub struct Diagram {
    namespace: String,
    nodes: IndexMap<Id, NodeEntry>,
    containment: DiGraph<Id, ()>,
    pending: HashSet<Id>,
}

impl Diagram {
    /// Builds a diagram from a parsed document.
    ///
    /// # Errors
    ///
    /// Returns a [`DocumentError`] for duplicate ids, invalid bounds, unknown
    /// child references, nodes with more than one parent and containment
    /// cycles.
    pub fn from_document(document: &Document) -> Result<Self, DocumentError> {
        let namespace = document.namespace.clone();
        let mut nodes = IndexMap::with_capacity(document.nodes.len());

        for node in &document.nodes {
            let id = Id::new(&node.id);
            let entry = node_entry(&namespace, node)?;
            if nodes.insert(id, entry).is_some() {
                return Err(DocumentError::DuplicateNode(node.id.clone()));
            }
        }

        let mut containment = DiGraph::with_capacity(nodes.len(), nodes.len());
        for &id in nodes.keys() {
            containment.add_node(id);
        }

        let mut parents: HashMap<Id, Id> = HashMap::new();
        for (parent_index, (&parent, entry)) in nodes.iter().enumerate() {
            for &child in &entry.children {
                let Some(child_index) = nodes.get_index_of(&child) else {
                    return Err(DocumentError::UnknownChild {
                        parent: parent.to_string(),
                        child: child.to_string(),
                    });
                };
                if let Some(first) = parents.insert(child, parent) {
                    return Err(DocumentError::MultipleParents {
                        child: child.to_string(),
                        first: first.to_string(),
                        second: parent.to_string(),
                    });
                }
                containment.add_edge(NodeIndex::new(parent_index), NodeIndex::new(child_index), ());
            }
        }

        toposort(&containment, None)
            .map_err(|cycle| DocumentError::Cycle(containment[cycle.node_id()].to_string()))?;

        let pending: HashSet<Id> = nodes
            .iter()
            .filter(|(_, entry)| !entry.children.is_empty())
            .map(|(&id, _)| id)
            .collect();

        debug!(nodes = nodes.len(), containers = pending.len(); "Diagram built");

        Ok(Self {
            namespace,
            nodes,
            containment,
            pending,
        })
    }

    /// Converts the diagram back into a document carrying the current bounds.
    pub fn to_document(&self) -> Document {
        let nodes = self
            .nodes
            .iter()
            .map(|(id, entry)| NodeDocument {
                id: id.to_string(),
                kind: entry.descriptor.local_id().to_string(),
                roles: entry
                    .descriptor
                    .roles()
                    .iter()
                    .map(|role| {
                        role.strip_prefix(self.namespace.as_str())
                            .unwrap_or(role)
                            .to_string()
                    })
                    .collect(),
                layout: entry.layout,
                children: entry.children.iter().map(Id::to_string).collect(),
                bounds: Rect::from(entry.bounds),
                properties: entry.properties.clone(),
            })
            .collect();

        Document {
            namespace: self.namespace.clone(),
            nodes,
        }
    }

    /// Returns the stencil namespace of the diagram.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Looks up a node by its document id.
    pub fn find(&self, name: &str) -> Option<Id> {
        let id = Id::new(name);
        self.nodes.contains_key(&id).then_some(id)
    }

    /// Occurrence kind the document asks for on `node`, if any.
    pub fn layout_hint(&self, node: Id) -> Option<OccurrenceKind> {
        self.nodes.get(&node).and_then(|entry| entry.layout)
    }

    /// Nodes without a parent, in document order.
    pub fn roots(&self) -> impl Iterator<Item = Id> + '_ {
        self.containment
            .externals(Direction::Incoming)
            .map(|index| self.containment[index])
    }

    /// Direct container of `node`, if it has one.
    pub fn parent(&self, node: Id) -> Option<Id> {
        let index = self.nodes.get_index_of(&node)?;
        self.containment
            .neighbors_directed(NodeIndex::new(index), Direction::Incoming)
            .next()
            .map(|parent| self.containment[parent])
    }

    /// Whether `node` has children whose bounds changed since it was last
    /// laid out.
    pub fn is_pending(&self, node: Id) -> bool {
        self.pending.contains(&node)
    }

    /// Number of containers pending layout.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Clears the pending mark of a container that was just laid out.
    pub(crate) fn settle(&mut self, node: Id) {
        self.pending.remove(&node);
    }

    /// Every node, children before their container.
    pub fn post_order(&self) -> Vec<Id> {
        let mut order = Vec::with_capacity(self.nodes.len());
        for root in self.containment.externals(Direction::Incoming) {
            let mut dfs = DfsPostOrder::new(&self.containment, root);
            while let Some(index) = dfs.next(&self.containment) {
                order.push(self.containment[index]);
            }
        }
        order
    }
}

fn node_entry(namespace: &str, node: &NodeDocument) -> Result<NodeEntry, DocumentError> {
    let bounds = node
        .bounds
        .to_bounds()
        .map_err(|source| DocumentError::InvalidBounds {
            node: node.id.clone(),
            source,
        })?;

    let roles = node.roles.iter().map(|role| qualify(namespace, role));
    let descriptor = TypeDescriptor::new(namespace, node.kind.as_str(), roles);

    Ok(NodeEntry {
        node_type: descriptor.resolve(),
        descriptor,
        bounds,
        properties: node.properties.clone(),
        children: node.children.iter().map(|child| Id::new(child)).collect(),
        layout: node.layout,
    })
}

/// Prefixes a local role tag with the namespace unless it already carries it.
fn qualify(namespace: &str, role: &str) -> String {
    if !namespace.is_empty() && role.starts_with(namespace) {
        role.to_string()
    } else {
        format!("{namespace}{role}")
    }
}

impl Hierarchy for Diagram {
    fn children(&self, node: Id) -> &[Id] {
        self.nodes
            .get(&node)
            .map(|entry| entry.children.as_slice())
            .unwrap_or(&[])
    }

    fn node_type(&self, node: Id) -> Option<NodeType> {
        self.nodes.get(&node).map(|entry| entry.node_type)
    }

    fn auto_layout_flag(&self, node: Id) -> Option<bool> {
        match self.nodes.get(&node)?.properties.get(AUTO_LAYOUT_KEY)? {
            PropertyValue::Bool(enabled) => Some(*enabled),
            _ => None,
        }
    }

    fn bounds(&self, node: Id) -> Option<Bounds> {
        self.nodes.get(&node).map(|entry| entry.bounds)
    }
}

impl LayoutModel for Diagram {
    fn set_bounds(&mut self, node: Id, bounds: Bounds) {
        let Some(entry) = self.nodes.get_mut(&node) else {
            return;
        };
        if entry.bounds == bounds {
            return;
        }
        entry.bounds = bounds;
        if let Some(parent) = self.parent(node) {
            self.pending.insert(parent);
        }
    }
}

#[cfg(test)]
mod tests {
    use trellis_core::{
        geometry::Point,
        stencil::{NodeKind, Role},
    };

    use super::*;

    fn node(id: &str, kind: &str, children: &[&str]) -> NodeDocument {
        NodeDocument {
            id: id.to_string(),
            kind: kind.to_string(),
            roles: Vec::new(),
            layout: None,
            children: children.iter().map(|c| c.to_string()).collect(),
            bounds: Rect {
                x: 0.0,
                y: 0.0,
                width: 10.0,
                height: 10.0,
            },
            properties: BTreeMap::new(),
        }
    }

    fn document(nodes: Vec<NodeDocument>) -> Document {
        Document {
            namespace: "bpel#".to_string(),
            nodes,
        }
    }

    #[test]
    fn test_build_resolves_types_and_children() {
        let mut else_branch = node("else", "else", &[]);
        else_branch.roles = vec!["lastChild".to_string()];
        let doc = document(vec![
            node("if", "if", &["then", "else"]),
            node("then", "sequence", &[]),
            else_branch,
        ]);

        let diagram = Diagram::from_document(&doc).unwrap();
        let if_id = diagram.find("if").unwrap();
        let else_id = diagram.find("else").unwrap();

        assert_eq!(diagram.len(), 3);
        assert_eq!(diagram.children(if_id), [Id::new("then"), else_id]);
        assert_eq!(diagram.node_type(if_id).unwrap().kind(), NodeKind::Activity);
        assert!(diagram.node_type(else_id).unwrap().has_role(Role::LastChild));
        assert!(diagram.find("missing").is_none());
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let doc = document(vec![node("a", "scope", &[]), node("a", "flow", &[])]);
        let err = Diagram::from_document(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::DuplicateNode(id) if id == "a"));
    }

    #[test]
    fn test_unknown_child_is_rejected() {
        let doc = document(vec![node("a", "scope", &["ghost"])]);
        let err = Diagram::from_document(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::UnknownChild { child, .. } if child == "ghost"));
    }

    #[test]
    fn test_shared_child_is_rejected() {
        let doc = document(vec![
            node("a", "scope", &["c"]),
            node("b", "scope", &["c"]),
            node("c", "invoke", &[]),
        ]);
        let err = Diagram::from_document(&doc).unwrap_err();
        assert!(matches!(
            err,
            DocumentError::MultipleParents { child, first, second }
                if child == "c" && first == "a" && second == "b"
        ));
    }

    #[test]
    fn test_cycle_is_rejected() {
        let doc = document(vec![node("a", "scope", &["b"]), node("b", "scope", &["a"])]);
        let err = Diagram::from_document(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::Cycle(_)));

        let doc = document(vec![node("self", "scope", &["self"])]);
        let err = Diagram::from_document(&doc).unwrap_err();
        assert!(matches!(err, DocumentError::Cycle(id) if id == "self"));
    }

    #[test]
    fn test_invalid_bounds_are_rejected() {
        let mut bad = node("a", "scope", &[]);
        bad.bounds.height = -3.0;
        let err = Diagram::from_document(&document(vec![bad])).unwrap_err();
        assert!(matches!(err, DocumentError::InvalidBounds { node, .. } if node == "a"));
    }

    #[test]
    fn test_post_order_visits_children_first() {
        let doc = document(vec![
            node("process", "process", &["scope"]),
            node("scope", "scope", &["invoke"]),
            node("invoke", "invoke", &[]),
            node("note", "textAnnotation", &[]),
        ]);
        let diagram = Diagram::from_document(&doc).unwrap();

        let order: Vec<String> = diagram.post_order().iter().map(Id::to_string).collect();
        let position = |name: &str| order.iter().position(|n| n == name).unwrap();

        assert_eq!(order.len(), 4);
        assert!(position("invoke") < position("scope"));
        assert!(position("scope") < position("process"));

        let roots: Vec<String> = diagram.roots().map(|id| id.to_string()).collect();
        assert_eq!(roots.len(), 2);
        assert!(roots.contains(&"process".to_string()));
        assert!(roots.contains(&"note".to_string()));
    }

    #[test]
    fn test_bounds_change_marks_parent_pending() {
        let doc = document(vec![
            node("process", "process", &["scope"]),
            node("scope", "scope", &["invoke"]),
            node("invoke", "invoke", &[]),
        ]);
        let mut diagram = Diagram::from_document(&doc).unwrap();
        let process = Id::new("process");
        let scope = Id::new("scope");
        let invoke = Id::new("invoke");

        assert_eq!(diagram.pending_count(), 2);
        assert!(diagram.is_pending(scope));
        assert!(!diagram.is_pending(invoke));
        assert_eq!(diagram.parent(invoke), Some(scope));
        assert_eq!(diagram.parent(process), None);

        diagram.settle(process);
        diagram.settle(scope);
        assert_eq!(diagram.pending_count(), 0);

        let same = diagram.bounds(invoke).unwrap();
        diagram.set_bounds(invoke, same);
        assert!(!diagram.is_pending(scope));

        diagram.set_bounds(invoke, same.move_to(Point::new(5.0, 5.0)));
        assert!(diagram.is_pending(scope));
        assert!(!diagram.is_pending(process));
    }

    #[test]
    fn test_auto_layout_flag_reads_boolean_only() {
        let mut off = node("off", "scope", &[]);
        off.properties
            .insert(AUTO_LAYOUT_KEY.to_string(), PropertyValue::Bool(false));
        let mut text = node("text", "scope", &[]);
        text.properties.insert(
            AUTO_LAYOUT_KEY.to_string(),
            PropertyValue::Text("false".to_string()),
        );
        let diagram =
            Diagram::from_document(&document(vec![off, text, node("unset", "scope", &[])]))
                .unwrap();

        assert_eq!(diagram.auto_layout_flag(Id::new("off")), Some(false));
        assert_eq!(diagram.auto_layout_flag(Id::new("text")), None);
        assert_eq!(diagram.auto_layout_flag(Id::new("unset")), None);
    }

    #[test]
    fn test_to_document_round_trips_structure() {
        let mut else_branch = node("else", "else", &[]);
        else_branch.roles = vec!["lastChild".to_string()];
        else_branch.layout = Some(OccurrenceKind::Vertical);
        let doc = document(vec![node("if", "if", &["else"]), else_branch]);

        let diagram = Diagram::from_document(&doc).unwrap();
        assert_eq!(diagram.to_document(), doc);
    }
}
