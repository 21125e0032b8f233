//! Node graph snapshot and link adjacency queries

use super::node::{Node, NodeId};
use super::socket::{Socket, SocketDirection, SocketRef};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A link between one output socket and one input socket.
///
/// Links are immutable values identified by their socket pair; traversal
/// collects them into plain hash sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub from: SocketRef,
    pub to: SocketRef,
}

impl Link {
    /// Creates a new link
    pub fn new(from: SocketRef, to: SocketRef) -> Self {
        Self { from, to }
    }
}

/// A graph snapshot containing nodes and their links
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGraph {
    pub nodes: HashMap<NodeId, Node>,
    pub links: Vec<Link>,
    next_node_id: NodeId,
}

impl NodeGraph {
    /// Creates a new empty node graph
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            links: Vec::new(),
            next_node_id: 0,
        }
    }

    /// Adds a node to the graph and returns its ID
    pub fn add_node(&mut self, mut node: Node) -> NodeId {
        let id = self.next_node_id;
        node.id = id;
        self.nodes.insert(id, node);
        self.next_node_id += 1;
        id
    }

    /// Adds a node to the graph with a specific ID
    pub fn add_node_with_id(&mut self, id: NodeId, mut node: Node) -> NodeId {
        node.id = id;
        self.nodes.insert(id, node);
        if id >= self.next_node_id {
            self.next_node_id = id + 1;
        }
        id
    }

    /// Removes a node and all links touching it
    pub fn remove_node(&mut self, node_id: NodeId) -> Option<Node> {
        self.links
            .retain(|link| link.from.node != node_id && link.to.node != node_id);
        self.nodes.remove(&node_id)
    }

    /// Looks up a node by ID
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Looks up a node by ID for mutation
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Looks up a node by its within-tree unique name
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.nodes.values().find(|n| n.name == name)
    }

    /// Resolves a socket reference to its socket
    pub fn socket(&self, socket: SocketRef) -> Option<&Socket> {
        self.node(socket.node)?.socket(socket.direction, socket.index)
    }

    /// Adds a validated link between an output and an input socket
    pub fn add_link(&mut self, link: Link) -> Result<(), &'static str> {
        if !link.from.is_output() || !link.to.is_input() {
            return Err("Link must run from an output to an input");
        }
        if link.from.node == link.to.node {
            return Err("Cannot link a node to itself");
        }
        if self.socket(link.from).is_none() {
            return Err("Source socket does not exist");
        }
        if self.socket(link.to).is_none() {
            return Err("Target socket does not exist");
        }
        if self.input_link(link.to).is_some() {
            return Err("Input socket already has a source");
        }
        self.links.push(link);
        Ok(())
    }

    /// Helper to add a link directly from two socket references
    pub fn link(&mut self, from: SocketRef, to: SocketRef) -> Result<(), &'static str> {
        self.add_link(Link::new(from, to))
    }

    /// The single link feeding an input socket, if any
    pub fn input_link(&self, socket: SocketRef) -> Option<&Link> {
        self.links.iter().find(|link| link.to == socket)
    }

    /// All links leaving an output socket (fan-out)
    pub fn links_from(&self, socket: SocketRef) -> impl Iterator<Item = &Link> + '_ {
        self.links.iter().filter(move |link| link.from == socket)
    }

    /// All links attached to a socket on either side
    pub fn socket_links(&self, socket: SocketRef) -> impl Iterator<Item = &Link> + '_ {
        self.links
            .iter()
            .filter(move |link| match socket.direction {
                SocketDirection::Input => link.to == socket,
                SocketDirection::Output => link.from == socket,
            })
    }

    /// Checks whether a socket participates in any link
    pub fn is_linked(&self, socket: SocketRef) -> bool {
        self.socket_links(socket).next().is_some()
    }

    /// Deselects every node, then selects the given one
    pub fn select_only(&mut self, node_id: NodeId) {
        for node in self.nodes.values_mut() {
            node.selected = node.id == node_id;
        }
    }
}

impl Default for NodeGraph {
    fn default() -> Self {
        Self::new()
    }
}
