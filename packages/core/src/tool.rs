//! Shared tools circulating between workers, the master, and the supervisor.

use serde::{Deserialize, Serialize};

use crate::Priority;
use crate::monitor::Prioritized;

/// The closed set of tool kinds in the shop. Each kind implies a fixed
/// service duration, configured in [`crate::SimConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    TypeA,
    TypeB,
}

impl ToolKind {
    /// All tool kinds, in seeding order.
    pub const ALL: [ToolKind; 2] = [ToolKind::TypeA, ToolKind::TypeB];
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolKind::TypeA => write!(f, "A"),
            ToolKind::TypeB => write!(f, "B"),
        }
    }
}

/// A shop tool. Tools ride the same monitor type as orders purely to reuse
/// the bounded-queue mechanism; they have no urgency semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tool {
    pub kind: ToolKind,
}

impl Tool {
    pub fn new(kind: ToolKind) -> Self {
        Self { kind }
    }
}

impl Prioritized for Tool {
    fn priority(&self) -> Priority {
        Priority::Standard
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}
