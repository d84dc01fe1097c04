//! Node type metadata.
//!
//! The type system of the hosting editor describes every node by a stencil
//! namespace, a local id and a list of role tags. Layout only cares about a
//! handful of reserved names, so a [`TypeDescriptor`] is resolved once into a
//! closed [`NodeType`] and the rest of the engine matches on enums instead of
//! concatenating strings.
//!
//! # Examples
//!
//! ```
//! use trellis_core::stencil::{HandlerSlot, NodeKind, Role, TypeDescriptor};
//!
//! let ns = "http://b3mn.org/stencilset/bpel#";
//! let descriptor = TypeDescriptor::new(ns, "faultHandlers", Vec::<String>::new());
//! let node_type = descriptor.resolve();
//!
//! assert_eq!(node_type.kind(), NodeKind::FaultHandlers);
//! assert_eq!(node_type.kind().handler_slot(), Some(HandlerSlot::Fault));
//! assert!(!node_type.has_role(Role::LastChild));
//! ```

use std::fmt;

/// Local ids that resolve to [`NodeKind::Activity`].
///
/// The BPEL 2.0 activity catalog plus the process root.
const ACTIVITY_IDS: &[&str] = &[
    "process",
    "assign",
    "compensate",
    "compensateScope",
    "empty",
    "exit",
    "extensionActivity",
    "forEach",
    "if",
    "invoke",
    "pick",
    "receive",
    "repeatUntil",
    "reply",
    "rethrow",
    "scope",
    "sequence",
    "throw",
    "validate",
    "wait",
    "while",
];

/// Type metadata as delivered by the stencil system.
///
/// `roles` holds fully-qualified role tags, i.e. already prefixed with a
/// namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    namespace: String,
    local_id: String,
    roles: Vec<String>,
}

impl TypeDescriptor {
    pub fn new(
        namespace: impl Into<String>,
        local_id: impl Into<String>,
        roles: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            local_id: local_id.into(),
            roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the stencil namespace
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the kind id without its namespace
    pub fn local_id(&self) -> &str {
        &self.local_id
    }

    /// Returns the declared role tags
    pub fn roles(&self) -> &[String] {
        &self.roles
    }

    /// Returns `namespace + local_id`, the node's fully-qualified kind.
    pub fn qualified_id(&self) -> String {
        format!("{}{}", self.namespace, self.local_id)
    }

    /// Resolves this descriptor into the closed kind and role set used by layout.
    ///
    /// Role tags count only when qualified by this descriptor's own namespace.
    pub fn resolve(&self) -> NodeType {
        let roles = self
            .roles
            .iter()
            .filter_map(|tag| tag.strip_prefix(self.namespace.as_str()))
            .filter_map(Role::from_local_tag)
            .fold(RoleSet::default(), RoleSet::with);

        NodeType {
            kind: NodeKind::from_local_id(&self.local_id),
            roles,
        }
    }
}

/// Closed set of node kinds the layout rules distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Activity,
    EventHandlers,
    FaultHandlers,
    CompensationHandler,
    TerminationHandler,
    /// Allows parallel branches; its bounds only ever grow.
    Flow,
    Other,
}

impl NodeKind {
    /// Maps a local stencil id to its kind.
    pub fn from_local_id(local_id: &str) -> Self {
        match local_id {
            "eventHandlers" => Self::EventHandlers,
            "faultHandlers" => Self::FaultHandlers,
            "compensationHandler" => Self::CompensationHandler,
            "terminationHandler" => Self::TerminationHandler,
            "flow" => Self::Flow,
            id if ACTIVITY_IDS.contains(&id) => Self::Activity,
            _ => Self::Other,
        }
    }

    /// Returns the handler slot this kind occupies, if any.
    pub fn handler_slot(self) -> Option<HandlerSlot> {
        match self {
            Self::EventHandlers => Some(HandlerSlot::Event),
            Self::FaultHandlers => Some(HandlerSlot::Fault),
            Self::CompensationHandler => Some(HandlerSlot::Compensation),
            Self::TerminationHandler => Some(HandlerSlot::Termination),
            Self::Activity | Self::Flow | Self::Other => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Activity => "activity",
            Self::EventHandlers => "eventHandlers",
            Self::FaultHandlers => "faultHandlers",
            Self::CompensationHandler => "compensationHandler",
            Self::TerminationHandler => "terminationHandler",
            Self::Flow => "flow",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

/// The four reserved handler slots of a structured activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerSlot {
    Event,
    Fault,
    Compensation,
    Termination,
}

impl HandlerSlot {
    /// Top-to-bottom stacking order of the handler column.
    pub const PRIORITY: [HandlerSlot; 4] = [
        HandlerSlot::Event,
        HandlerSlot::Fault,
        HandlerSlot::Compensation,
        HandlerSlot::Termination,
    ];
}

/// Structural roles a stencil may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// The node always renders as the final child of its container,
    /// e.g. the `else` branch of an `if`.
    LastChild,
}

impl Role {
    fn from_local_tag(tag: &str) -> Option<Self> {
        match tag {
            "lastChild" => Some(Self::LastChild),
            _ => None,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::LastChild => 1,
        }
    }
}

/// Compact set of [`Role`]s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RoleSet(u8);

impl RoleSet {
    /// Returns a copy of the set with `role` added.
    pub fn with(self, role: Role) -> Self {
        Self(self.0 | role.bit())
    }

    pub fn contains(self, role: Role) -> bool {
        self.0 & role.bit() != 0
    }
}

/// Resolved type of a node: its kind and declared roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeType {
    kind: NodeKind,
    roles: RoleSet,
}

impl NodeType {
    pub fn new(kind: NodeKind, roles: RoleSet) -> Self {
        Self { kind, roles }
    }

    pub fn kind(self) -> NodeKind {
        self.kind
    }

    pub fn roles(self) -> RoleSet {
        self.roles
    }

    pub fn has_role(self, role: Role) -> bool {
        self.roles.contains(role)
    }
}
