//! Refits a container's bounds around its arranged children.

use log::debug;

use trellis_core::{geometry::Bounds, identifier::Id};

use crate::{
    classify,
    config::LayoutConfig,
    model::{self, LayoutModel},
};

/// Sizes a container to its children's extent plus the margin.
///
/// Children are in the container's coordinate space, so the new lower-right
/// corner is `upper_left + max child lower_right + margin` on each axis.
/// Flow containers only ever grow; every other kind is set to exactly that
/// size.
#[derive(Debug, Clone, Copy)]
pub struct BoundsFitter {
    margin: f32,
}

impl BoundsFitter {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            margin: config.margin(),
        }
    }

    /// Refits `container`. Returns whether its bounds were written.
    ///
    /// Does nothing when the container has no children with known bounds.
    pub fn fit(&self, model: &mut dyn LayoutModel, container: Id) -> bool {
        let Some(current) = model.bounds(container) else {
            return false;
        };
        let Some((right, lower)) = children_extent(model, container) else {
            return false;
        };

        let upper_left = current.upper_left();
        let target_x = upper_left.x() + right + self.margin;
        let target_y = upper_left.y() + lower + self.margin;

        let is_flow = model.node_type(container).is_some_and(classify::is_flow);
        let fitted = if is_flow {
            grow(current, target_x, target_y)
        } else {
            current.with_max_x(target_x).with_max_y(target_y)
        };

        let written = model::write_bounds(model, container, fitted);
        if written {
            debug!(
                container:% = container,
                is_flow,
                width = fitted.width(),
                height = fitted.height();
                "Refit container"
            );
        }
        written
    }
}

/// Largest lower-right x and y among the children of `container`.
fn children_extent(model: &dyn LayoutModel, container: Id) -> Option<(f32, f32)> {
    model
        .children(container)
        .iter()
        .filter_map(|&child| model.bounds(child))
        .map(|bounds| (bounds.max_x(), bounds.max_y()))
        .reduce(|(right, lower), (x, y)| (right.max(x), lower.max(y)))
}

/// Extends each edge independently, never shrinking.
fn grow(current: Bounds, target_x: f32, target_y: f32) -> Bounds {
    let mut grown = current;
    if current.max_x() < target_x {
        grown = grown.with_max_x(target_x);
    }
    if current.max_y() < target_y {
        grown = grown.with_max_y(target_y);
    }
    grown
}
