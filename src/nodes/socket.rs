//! Socket types and socket identity for link endpoints

use serde::{Deserialize, Serialize};

use super::node::NodeId;

/// Index of a socket within its node's input or output list
pub type SocketIndex = usize;

/// Direction of a socket (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocketDirection {
    Input,
    Output,
}

/// A connection point on a node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Socket {
    pub name: String,
    pub direction: SocketDirection,
    pub enabled: bool,
}

impl Socket {
    /// Creates a new enabled socket
    pub fn new(name: impl Into<String>, direction: SocketDirection) -> Self {
        Self {
            name: name.into(),
            direction,
            enabled: true,
        }
    }

    /// Checks if this socket is an input
    pub fn is_input(&self) -> bool {
        matches!(self.direction, SocketDirection::Input)
    }

    /// Checks if this socket is an output
    pub fn is_output(&self) -> bool {
        matches!(self.direction, SocketDirection::Output)
    }
}

/// Identity of a socket within a graph: owning node, direction, and slot.
///
/// Copyable and hashable so traversal visited-sets and per-session caches
/// can key on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SocketRef {
    pub node: NodeId,
    pub direction: SocketDirection,
    pub index: SocketIndex,
}

impl SocketRef {
    /// Reference to an input socket of a node
    pub fn input(node: NodeId, index: SocketIndex) -> Self {
        Self {
            node,
            direction: SocketDirection::Input,
            index,
        }
    }

    /// Reference to an output socket of a node
    pub fn output(node: NodeId, index: SocketIndex) -> Self {
        Self {
            node,
            direction: SocketDirection::Output,
            index,
        }
    }

    /// Checks if this references an input socket
    pub fn is_input(&self) -> bool {
        matches!(self.direction, SocketDirection::Input)
    }

    /// Checks if this references an output socket
    pub fn is_output(&self) -> bool {
        matches!(self.direction, SocketDirection::Output)
    }
}
