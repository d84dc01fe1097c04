//! Cascading layout over a whole diagram.
//!
//! A host raises a fresh occurrence for a container whenever one of its
//! children changed size. [`LayoutPass`] reproduces that cascade for a
//! [`Diagram`]: it visits the containment forest in post-order, so every
//! container is handled after all of its descendants, and raises an
//! occurrence only for containers the diagram reports as pending. Once a
//! diagram has settled, another pass issues no occurrences at all.

use log::{debug, info};

use trellis_core::{identifier::Id, stencil::NodeKind};

use crate::{
    controller::{LayoutController, LayoutOutcome, Occurrence, OccurrenceKind},
    diagram::Diagram,
    model::Hierarchy,
};

/// Summary of one cascading pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassReport {
    /// Occurrences issued, one per pending container.
    pub occurrences: usize,
    /// Containers skipped because auto-layout is off.
    pub disabled: usize,
    /// Geometry writes performed across all occurrences.
    pub writes: usize,
}

impl PassReport {
    fn record(&mut self, outcome: LayoutOutcome) {
        self.occurrences += 1;
        match outcome {
            LayoutOutcome::Disabled => self.disabled += 1,
            LayoutOutcome::NoChildren => {}
            LayoutOutcome::Applied { writes } => self.writes += writes,
        }
    }
}

/// Issues one occurrence per pending container, innermost first.
#[derive(Debug, Clone, Copy)]
pub struct LayoutPass<'a> {
    controller: &'a LayoutController,
}

impl<'a> LayoutPass<'a> {
    pub fn new(controller: &'a LayoutController) -> Self {
        Self { controller }
    }

    /// Lays out every pending container of `diagram`.
    ///
    /// Moving or resizing a child marks its container pending again. Since
    /// containers come after their descendants, a container is handled at
    /// most once per pass and the pass leaves nothing pending.
    pub fn run(&self, diagram: &mut Diagram) -> PassReport {
        let mut report = PassReport::default();

        for node in diagram.post_order() {
            if !diagram.is_pending(node) {
                continue;
            }
            let kind = occurrence_kind(diagram, node);
            let outcome = self.controller.handle(diagram, Occurrence::new(node, kind));
            diagram.settle(node);
            debug!(node:% = node, kind:% = kind, outcome:? = outcome; "Occurrence handled");
            report.record(outcome);
        }

        info!(
            occurrences = report.occurrences,
            disabled = report.disabled,
            writes = report.writes;
            "Layout pass finished"
        );
        report
    }
}

/// Occurrence kind for `node`: its document hint, else the default for its kind.
pub fn occurrence_kind(diagram: &Diagram, node: Id) -> OccurrenceKind {
    if let Some(kind) = diagram.layout_hint(node) {
        return kind;
    }
    diagram
        .node_type(node)
        .map_or(OccurrenceKind::General, |node_type| {
            default_kind(node_type.kind())
        })
}

/// Default occurrence raised for containers of `kind`.
pub fn default_kind(kind: NodeKind) -> OccurrenceKind {
    match kind {
        NodeKind::Flow => OccurrenceKind::AutoResize,
        NodeKind::EventHandlers | NodeKind::FaultHandlers => OccurrenceKind::Vertical,
        NodeKind::CompensationHandler | NodeKind::TerminationHandler => {
            OccurrenceKind::SingleChild
        }
        NodeKind::Activity | NodeKind::Other => OccurrenceKind::General,
    }
}
