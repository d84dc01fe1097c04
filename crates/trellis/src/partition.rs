//! Splits a container's children into handler slots and ordinary children.

use log::warn;

use trellis_core::stencil::{HandlerSlot, NodeType};

use crate::{classify, model::Sibling};

/// Children of a structured activity grouped by structural role.
///
/// Each slot keeps the first matching child. A later child of an already
/// occupied slot is kept among the ordinary children.
#[derive(Debug, Default)]
pub(crate) struct ChildSet {
    event: Option<Sibling>,
    fault: Option<Sibling>,
    compensation: Option<Sibling>,
    termination: Option<Sibling>,
    ordinary: Vec<Sibling>,
}

impl ChildSet {
    /// Partitions `children`. Input order only matters for duplicate slots.
    pub(crate) fn partition(children: &[Sibling]) -> Self {
        let mut set = Self::default();

        for &child in children {
            let Some(slot) = HandlerSlot::PRIORITY
                .into_iter()
                .find(|&slot| matches_slot(slot, child.node_type))
            else {
                set.ordinary.push(child);
                continue;
            };

            if let Some(kept) = set.slot(slot) {
                warn!(
                    kept:% = kept.id,
                    duplicate:% = child.id,
                    slot:? = slot;
                    "Duplicate handler slot, treating it as an ordinary child"
                );
                set.ordinary.push(child);
            } else {
                *set.slot_mut(slot) = Some(child);
            }
        }

        set
    }

    pub(crate) fn slot(&self, slot: HandlerSlot) -> Option<&Sibling> {
        match slot {
            HandlerSlot::Event => self.event.as_ref(),
            HandlerSlot::Fault => self.fault.as_ref(),
            HandlerSlot::Compensation => self.compensation.as_ref(),
            HandlerSlot::Termination => self.termination.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: HandlerSlot) -> &mut Option<Sibling> {
        match slot {
            HandlerSlot::Event => &mut self.event,
            HandlerSlot::Fault => &mut self.fault,
            HandlerSlot::Compensation => &mut self.compensation,
            HandlerSlot::Termination => &mut self.termination,
        }
    }

    /// Present slots in stacking order.
    pub(crate) fn slots(&self) -> impl Iterator<Item = &Sibling> {
        HandlerSlot::PRIORITY
            .into_iter()
            .filter_map(|slot| self.slot(slot))
    }

    pub(crate) fn ordinary(&self) -> &[Sibling] {
        &self.ordinary
    }
}

fn matches_slot(slot: HandlerSlot, node_type: NodeType) -> bool {
    match slot {
        HandlerSlot::Event => classify::is_event_handler_slot(node_type),
        HandlerSlot::Fault => classify::is_fault_handler_slot(node_type),
        HandlerSlot::Compensation => classify::is_compensation_handler_slot(node_type),
        HandlerSlot::Termination => classify::is_termination_handler_slot(node_type),
    }
}
