//! Arrangement strategies for a container's direct children.
//!
//! Every strategy implements [`Arranger`] and differs only in where it puts
//! the children:
//!
//! - [`StackArranger`] - one column (vertical) or one row (horizontal), separated by the margin
//! - [`SingleChildArranger`] - the first child at the margin corner
//! - [`CompositeArranger`] - ordinary children in a column, handler slots in a second column
//!
//! Arrangers only move children. Refitting the container around them is the
//! caller's job (see [`crate::fit::BoundsFitter`]).

mod composite;
mod single_child;
mod stack;

pub use composite::CompositeArranger;
pub use single_child::SingleChildArranger;
pub use stack::StackArranger;

use log::debug;

use trellis_core::{
    geometry::{Bounds, Point},
    identifier::Id,
};

use crate::{
    classify,
    model::{self, LayoutModel, Sibling},
};

/// A strategy that repositions the children of one container.
pub trait Arranger {
    /// Repositions `children` of `container`.
    ///
    /// Returns the number of geometry writes performed. Running an arranger
    /// a second time on its own output performs none.
    fn arrange(&self, model: &mut dyn LayoutModel, container: Id, children: &[Id]) -> usize;
}

/// Direction along which siblings are packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Top to bottom, sorted by upper-left y.
    Vertical,
    /// Left to right, sorted by upper-left x.
    Horizontal,
}

impl Axis {
    /// Leading coordinate of `bounds` along this axis.
    fn leading(self, bounds: Bounds) -> f32 {
        match self {
            Self::Vertical => bounds.min_y(),
            Self::Horizontal => bounds.min_x(),
        }
    }

    /// Extent of `bounds` along this axis.
    fn extent(self, bounds: Bounds) -> f32 {
        match self {
            Self::Vertical => bounds.height(),
            Self::Horizontal => bounds.width(),
        }
    }

    /// Extent of `bounds` across this axis.
    fn cross_extent(self, bounds: Bounds) -> f32 {
        match self {
            Self::Vertical => bounds.width(),
            Self::Horizontal => bounds.height(),
        }
    }

    fn point(self, along: f32, across: f32) -> Point {
        match self {
            Self::Vertical => Point::new(across, along),
            Self::Horizontal => Point::new(along, across),
        }
    }
}

/// Result of packing a run of siblings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct Stacked {
    pub(crate) writes: usize,
    /// Largest extent across the packing axis among the packed siblings.
    pub(crate) widest: f32,
}

/// Sorts `siblings` along `axis`, forces a `lastChild` sibling to the end and
/// packs them starting at `margin`, one margin apart, aligned at `margin` on
/// the cross axis.
pub(crate) fn stack(
    model: &mut dyn LayoutModel,
    siblings: &mut [Sibling],
    axis: Axis,
    margin: f32,
) -> Stacked {
    sort_along(siblings, axis);
    if move_last_child_to_end(siblings) {
        sort_along(siblings, axis);
    }

    let mut stacked = Stacked::default();
    let mut next = margin;
    for sibling in siblings.iter() {
        let along = next;
        next = along + axis.extent(sibling.bounds) + margin;

        if model::move_node(model, sibling.id, axis.point(along, margin)) {
            stacked.writes += 1;
        }
        stacked.widest = stacked.widest.max(axis.cross_extent(sibling.bounds));
    }
    stacked
}

/// Stable sort by leading coordinate.
fn sort_along(siblings: &mut [Sibling], axis: Axis) {
    siblings.sort_by(|a, b| axis.leading(a.bounds).total_cmp(&axis.leading(b.bounds)));
}

/// Nudges the `lastChild` sibling just past the current last one.
///
/// `siblings` must already be sorted. The nudge only touches the snapshot:
/// packing assigns the real position afterwards. Returns `true` when the
/// caller has to sort again.
fn move_last_child_to_end(siblings: &mut [Sibling]) -> bool {
    let Some(index) = siblings
        .iter()
        .position(|sibling| classify::declares_last_child_role(sibling.node_type))
    else {
        return false;
    };

    let last = siblings.len() - 1;
    if index == last {
        return false;
    }

    let anchor = siblings[last].bounds.upper_left();
    let nudged = &mut siblings[index];
    debug!(node:% = nudged.id; "Moving lastChild node behind its siblings");
    nudged.bounds = nudged.bounds.move_to(anchor.add_point(Point::new(1.0, 1.0)));
    true
}
