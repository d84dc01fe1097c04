//! Two-column arrangement for structured activities.
//!
//! ```text
//!  ┌──────────────────────────────────────────┐
//!  │  ┌──────────┐      ┌──────────────────┐  │
//!  │  │ activity │      │ eventHandlers    │  │
//!  │  └──────────┘      └──────────────────┘  │
//!  │  ┌──────────┐      ┌──────────────────┐  │
//!  │  │ activity │      │ faultHandlers    │  │
//!  │  └──────────┘      └──────────────────┘  │
//!  │                    ┌──────────────────┐  │
//!  │                    │ compensation...  │  │
//!  │                    └──────────────────┘  │
//!  └──────────────────────────────────────────┘
//! ```
//!
//! Ordinary children form the left column exactly as the vertical stack
//! arranger would place them. Present handler slots form the right column in
//! fixed priority order (event, fault, compensation, termination), separated
//! by the slot gap, and are all widened or narrowed to the same width.

use log::debug;

use trellis_core::{geometry::Point, identifier::Id};

use crate::{
    arrange::{Arranger, Axis, stack},
    config::LayoutConfig,
    model::{self, LayoutModel},
    partition::ChildSet,
};

/// Ordinary children on the left, handler slots stacked on the right.
#[derive(Debug, Clone, Copy)]
pub struct CompositeArranger {
    margin: f32,
    slot_gap: f32,
    default_slot_width: f32,
}

impl CompositeArranger {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            margin: config.margin(),
            slot_gap: config.slot_gap(),
            default_slot_width: config.default_slot_width(),
        }
    }

    /// Right edge the slot needs: its rightmost child edge plus the margin,
    /// summed in the same order a refit of the slot sums it. Slots without
    /// children fall back to the default slot width.
    fn slot_right_edge(&self, model: &dyn LayoutModel, slot: Id) -> Option<f32> {
        let left = model.bounds(slot)?.min_x();
        let right = model
            .children(slot)
            .iter()
            .filter_map(|&child| model.bounds(child))
            .map(|bounds| bounds.max_x())
            .reduce(f32::max);
        Some(match right {
            Some(right) => left + right + self.margin,
            None => left + self.default_slot_width,
        })
    }
}

impl Arranger for CompositeArranger {
    fn arrange(&self, model: &mut dyn LayoutModel, container: Id, children: &[Id]) -> usize {
        let child_set = ChildSet::partition(&model::siblings(model, children));

        let mut ordinary = child_set.ordinary().to_vec();
        let column = stack(model, &mut ordinary, Axis::Vertical, self.margin);
        let mut writes = column.writes;

        let left = self.margin + column.widest + self.margin;
        let mut top = self.margin;
        let mut slot_right = f32::NEG_INFINITY;

        for slot in child_set.slots() {
            if model::move_node(model, slot.id, Point::new(left, top)) {
                writes += 1;
            }
            top = model.bounds(slot.id).map_or(top, |bounds| bounds.max_y()) + self.slot_gap;
            if let Some(edge) = self.slot_right_edge(model, slot.id) {
                slot_right = slot_right.max(edge);
            }
        }

        // Align the handler column on a common right edge.
        for slot in child_set.slots() {
            let Some(current) = model.bounds(slot.id) else {
                continue;
            };
            let aligned = current.with_max_x(slot_right);
            if model::write_bounds(model, slot.id, aligned) {
                writes += 1;
            }
        }

        debug!(
            container:% = container,
            ordinary = ordinary.len(),
            slots = child_set.slots().count(),
            slot_right,
            writes;
            "Arranged composite container"
        );
        writes
    }
}
