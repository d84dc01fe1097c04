//! Collaborator interfaces between the layout core and its host.
//!
//! The host diagram model owns node identity, structure and metadata. Layout
//! reads through [`Hierarchy`] and writes geometry back through
//! [`LayoutModel::set_bounds`]; it never creates or destroys nodes.

use log::trace;

use trellis_core::{
    geometry::{Bounds, Point},
    identifier::Id,
    stencil::NodeType,
};

/// Read-only view of the diagram structure.
pub trait Hierarchy {
    /// Direct children of `node`, in model order. Unknown nodes have none.
    fn children(&self, node: Id) -> &[Id];

    /// Resolved type of `node`.
    fn node_type(&self, node: Id) -> Option<NodeType>;

    /// Raw value of the node's auto-layout property, `None` when unset.
    fn auto_layout_flag(&self, node: Id) -> Option<bool>;

    /// Current bounds of `node`, relative to its parent.
    fn bounds(&self, node: Id) -> Option<Bounds>;
}

/// A [`Hierarchy`] whose node geometry can be replaced.
pub trait LayoutModel: Hierarchy {
    /// Replaces the bounds of `node`.
    fn set_bounds(&mut self, node: Id, bounds: Bounds);
}

/// Snapshot of one child taken before arrangement starts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sibling {
    pub(crate) id: Id,
    pub(crate) node_type: NodeType,
    pub(crate) bounds: Bounds,
}

/// Snapshots `children`, skipping ids the model cannot resolve.
pub(crate) fn siblings(model: &dyn LayoutModel, children: &[Id]) -> Vec<Sibling> {
    children
        .iter()
        .filter_map(|&id| match (model.node_type(id), model.bounds(id)) {
            (Some(node_type), Some(bounds)) => Some(Sibling {
                id,
                node_type,
                bounds,
            }),
            _ => {
                trace!(node:% = id; "Skipping unresolved child");
                None
            }
        })
        .collect()
}

/// Moves `node` so its upper-left corner is `upper_left`.
///
/// Writes only when the stored corner differs. Returns whether a write happened.
pub(crate) fn move_node(model: &mut dyn LayoutModel, node: Id, upper_left: Point) -> bool {
    let Some(current) = model.bounds(node) else {
        return false;
    };
    if current.upper_left() == upper_left {
        return false;
    }
    write_bounds(model, node, current.move_to(upper_left))
}

/// Stores `bounds` for `node` unless they equal the current value.
pub(crate) fn write_bounds(model: &mut dyn LayoutModel, node: Id, bounds: Bounds) -> bool {
    if model.bounds(node) == Some(bounds) {
        return false;
    }
    trace!(
        node:% = node,
        min_x = bounds.min_x(),
        min_y = bounds.min_y(),
        max_x = bounds.max_x(),
        max_y = bounds.max_y();
        "Writing bounds"
    );
    model.set_bounds(node, bounds);
    true
}
