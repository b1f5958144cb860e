//! Compiled emission plan
//!
//! A `Plan` is the output of template compilation: an ordered sequence of
//! nodes mirroring the document order of the source template. Literal runs
//! are pre-serialized JSON text; dynamic nodes are resolved per event at
//! replay time. Plans are built once, never mutated afterwards, and carry
//! no per-event state — concurrent replay needs no synchronization.

use crate::placeholder::EventField;

/// Where a dynamic field's value comes from at replay time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// A sub-field of the log event itself
    Event(EventField),
    /// A diagnostic-context entry
    Mdc(String),
    /// A shared context-store entry (dynamically typed)
    Context(String),
    /// An environment variable
    Environment(String),
    /// A system property
    System(String),
}

/// Source of a whole-map object expansion (`#{EVENT}` / `#{MDC}`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectSource {
    Event,
    Mdc,
}

/// One compiled step in the emission plan
#[derive(Debug, Clone, PartialEq)]
pub enum PlanNode {
    /// Pre-serialized JSON text copied verbatim: a whole object member
    /// (`"name":value`), an array element, or the entire document when the
    /// template contains no placeholders. Interior commas of coalesced
    /// sibling members are included; the separator *before* the run is
    /// decided by the writer at replay time.
    Literal(String),

    /// Open an object that contains at least one dynamic member. `name` is
    /// set when the object is itself an object member.
    BeginObject { name: Option<String> },
    EndObject,

    /// Open an array that contains at least one dynamic descendant
    BeginArray { name: Option<String> },
    EndArray,

    /// An object member resolved from a variable source per event
    DynamicField { name: String, binding: Binding },

    /// An object member expanding to a whole nested object (`#{EVENT}`,
    /// `#{MDC}`)
    DynamicObject { name: String, source: ObjectSource },
}

impl PlanNode {
    /// Whether this node resolves anything at replay time
    pub fn is_dynamic(&self) -> bool {
        matches!(
            self,
            PlanNode::DynamicField { .. } | PlanNode::DynamicObject { .. }
        )
    }
}

/// An immutable, replayable emission plan
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Plan {
    nodes: Vec<PlanNode>,
}

impl Plan {
    /// The empty plan: replaying it emits nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub(crate) fn from_nodes(nodes: Vec<PlanNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[PlanNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes that resolve per-event state
    pub fn dynamic_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_dynamic()).count()
    }
}
