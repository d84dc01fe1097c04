//! Role classification predicates.
//!
//! Pure questions about a node's resolved [`NodeType`]: which handler slot it
//! occupies, whether it is a flow, and whether it must render last among its
//! siblings.

use trellis_core::stencil::{HandlerSlot, NodeKind, NodeType, Role};

pub fn is_event_handler_slot(node_type: NodeType) -> bool {
    node_type.kind() == NodeKind::EventHandlers
}

pub fn is_fault_handler_slot(node_type: NodeType) -> bool {
    node_type.kind() == NodeKind::FaultHandlers
}

pub fn is_compensation_handler_slot(node_type: NodeType) -> bool {
    node_type.kind() == NodeKind::CompensationHandler
}

pub fn is_termination_handler_slot(node_type: NodeType) -> bool {
    node_type.kind() == NodeKind::TerminationHandler
}

/// Returns the slot `node_type` fills, if it is one of the four handler kinds.
pub fn handler_slot(node_type: NodeType) -> Option<HandlerSlot> {
    node_type.kind().handler_slot()
}

/// Flow containers never shrink when refit.
pub fn is_flow(node_type: NodeType) -> bool {
    node_type.kind() == NodeKind::Flow
}

/// True when the node declares the `lastChild` role.
pub fn declares_last_child_role(node_type: NodeType) -> bool {
    node_type.has_role(Role::LastChild)
}

#[cfg(test)]
mod tests {
    use trellis_core::stencil::TypeDescriptor;

    use super::*;

    const NS: &str = "http://b3mn.org/stencilset/bpel#";

    fn resolve(local_id: &str) -> NodeType {
        TypeDescriptor::new(NS, local_id, Vec::<String>::new()).resolve()
    }

    #[test]
    fn test_each_slot_predicate_matches_one_kind() {
        let event = resolve("eventHandlers");
        let fault = resolve("faultHandlers");
        let compensation = resolve("compensationHandler");
        let termination = resolve("terminationHandler");

        assert!(is_event_handler_slot(event));
        assert!(!is_event_handler_slot(fault));

        assert!(is_fault_handler_slot(fault));
        assert!(!is_fault_handler_slot(compensation));

        assert!(is_compensation_handler_slot(compensation));
        assert!(!is_compensation_handler_slot(termination));

        assert!(is_termination_handler_slot(termination));
        assert!(!is_termination_handler_slot(event));
    }

    #[test]
    fn test_handler_slot_lookup() {
        assert_eq!(handler_slot(resolve("eventHandlers")), Some(HandlerSlot::Event));
        assert_eq!(
            handler_slot(resolve("terminationHandler")),
            Some(HandlerSlot::Termination)
        );
        assert_eq!(handler_slot(resolve("sequence")), None);
    }

    #[test]
    fn test_flow_predicate() {
        assert!(is_flow(resolve("flow")));
        assert!(!is_flow(resolve("scope")));
    }

    #[test]
    fn test_last_child_role() {
        let else_branch =
            TypeDescriptor::new(NS, "else", [format!("{NS}lastChild")]).resolve();
        assert!(declares_last_child_role(else_branch));
        assert!(!declares_last_child_role(resolve("elseif")));
    }
}
