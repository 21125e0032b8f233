//! Node graph snapshot - data structures and chain traversal

pub mod graph;
pub mod node;
pub mod socket;
pub mod traversal;

// Re-export core types
pub use graph::{Link, NodeGraph};
pub use node::{Node, NodeId, NodeKind};
pub use socket::{Socket, SocketDirection, SocketIndex, SocketRef};

// Re-export traversal operations
pub use traversal::{collect_full_path_info, find_ultimate_source, find_ultimate_targets, PathInfo};
