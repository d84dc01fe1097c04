//! Arrangement for containers that hold exactly one child.

use log::debug;

use trellis_core::{geometry::Point, identifier::Id};

use crate::{
    arrange::Arranger,
    config::LayoutConfig,
    model::{self, LayoutModel},
};

/// Moves the first child to the margin corner and ignores the rest.
#[derive(Debug, Clone, Copy)]
pub struct SingleChildArranger {
    margin: f32,
}

impl SingleChildArranger {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            margin: config.margin(),
        }
    }
}

impl Arranger for SingleChildArranger {
    fn arrange(&self, model: &mut dyn LayoutModel, container: Id, children: &[Id]) -> usize {
        let Some(first) = model::siblings(model, children).first().copied() else {
            return 0;
        };

        if children.len() > 1 {
            debug!(
                container:% = container,
                ignored = children.len() - 1;
                "Single-child container has extra children"
            );
        }

        let corner = Point::new(self.margin, self.margin);
        usize::from(model::move_node(model, first.id, corner))
    }
}
