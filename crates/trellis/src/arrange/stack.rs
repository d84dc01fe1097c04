//! Column and row arrangement.

use log::debug;

use trellis_core::identifier::Id;

use crate::{
    arrange::{Arranger, Axis, stack},
    config::LayoutConfig,
    model::{self, LayoutModel},
};

/// Packs all children along one axis, one margin apart.
///
/// The first child lands at `(margin, margin)`. A child declaring the
/// `lastChild` role always ends up last.
#[derive(Debug, Clone, Copy)]
pub struct StackArranger {
    axis: Axis,
    margin: f32,
}

impl StackArranger {
    /// Top-to-bottom column, left edges at the margin.
    pub fn vertical(config: &LayoutConfig) -> Self {
        Self {
            axis: Axis::Vertical,
            margin: config.margin(),
        }
    }

    /// Left-to-right row, top edges at the margin.
    pub fn horizontal(config: &LayoutConfig) -> Self {
        Self {
            axis: Axis::Horizontal,
            margin: config.margin(),
        }
    }
}

impl Arranger for StackArranger {
    fn arrange(&self, model: &mut dyn LayoutModel, container: Id, children: &[Id]) -> usize {
        let mut siblings = model::siblings(model, children);
        let stacked = stack(model, &mut siblings, self.axis, self.margin);

        debug!(
            container:% = container,
            axis:? = self.axis,
            children = siblings.len(),
            writes = stacked.writes;
            "Stacked children"
        );
        stacked.writes
    }
}
