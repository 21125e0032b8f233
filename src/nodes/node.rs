//! Node types and core node functionality

use super::socket::{Socket, SocketDirection, SocketIndex, SocketRef};
use egui::{Color32, Pos2, Vec2};
use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = usize;

/// Kind of node - regular processing node, pass-through routing node, or frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    /// Regular processing node
    Regular,
    /// Pass-through node with one input and one output; transparent to
    /// traversal and never reported as a chain source or target
    Routing,
    /// Frame node that groups children and offsets their positions
    Frame,
}

/// A node in the editor graph snapshot.
///
/// Positions are in tree space; `dimensions` are the on-screen extent in
/// pixels at ui scale 1. `parent` frames contribute cumulative position
/// offsets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Type identifier, e.g. "ShaderNodeTexImage"
    pub type_id: String,
    /// Within-tree unique name
    pub name: String,
    /// Optional display label; `display_label` falls back to `name`
    pub label: Option<String>,
    #[serde(with = "pos2_serde")]
    pub position: Pos2,
    #[serde(with = "vec2_serde")]
    pub dimensions: Vec2,
    pub parent: Option<NodeId>,
    pub collapsed: bool,
    pub kind: NodeKind,
    #[serde(with = "color32_opt_serde")]
    pub custom_color: Option<Color32>,
    pub selected: bool,
    pub inputs: Vec<Socket>,
    pub outputs: Vec<Socket>,
}

impl Node {
    /// Creates a new regular node
    pub fn new(id: NodeId, type_id: impl Into<String>, name: impl Into<String>, position: Pos2) -> Self {
        Self {
            id,
            type_id: type_id.into(),
            name: name.into(),
            label: None,
            position,
            dimensions: Vec2::new(150.0, 100.0),
            parent: None,
            collapsed: false,
            kind: NodeKind::Regular,
            custom_color: None,
            selected: false,
            inputs: vec![],
            outputs: vec![],
        }
    }

    /// Creates a routing node with its single input and output already in place
    pub fn new_routing(id: NodeId, name: impl Into<String>, position: Pos2) -> Self {
        let mut node = Self::new(id, "NodeReroute", name, position);
        node.kind = NodeKind::Routing;
        node.dimensions = Vec2::new(16.0, 16.0);
        node.add_input("Input").add_output("Output");
        node
    }

    /// Creates a frame node
    pub fn new_frame(id: NodeId, name: impl Into<String>, position: Pos2) -> Self {
        let mut node = Self::new(id, "NodeFrame", name, position);
        node.kind = NodeKind::Frame;
        node
    }

    /// Adds an input socket to the node
    pub fn add_input(&mut self, name: impl Into<String>) -> &mut Self {
        self.inputs.push(Socket::new(name, SocketDirection::Input));
        self
    }

    /// Adds an output socket to the node
    pub fn add_output(&mut self, name: impl Into<String>) -> &mut Self {
        self.outputs.push(Socket::new(name, SocketDirection::Output));
        self
    }

    /// Checks if this node is transparent to traversal
    pub fn is_routing(&self) -> bool {
        matches!(self.kind, NodeKind::Routing)
    }

    /// Checks if this node is a frame
    pub fn is_frame(&self) -> bool {
        matches!(self.kind, NodeKind::Frame)
    }

    /// Looks up a socket by direction and slot index
    pub fn socket(&self, direction: SocketDirection, index: SocketIndex) -> Option<&Socket> {
        match direction {
            SocketDirection::Input => self.inputs.get(index),
            SocketDirection::Output => self.outputs.get(index),
        }
    }

    /// Display label, falling back to the unique name
    pub fn display_label(&self) -> &str {
        self.label.as_deref().filter(|l| !l.is_empty()).unwrap_or(&self.name)
    }

    /// References to this node's sockets, inputs first
    pub fn socket_refs(&self) -> impl Iterator<Item = SocketRef> + '_ {
        let id = self.id;
        (0..self.inputs.len())
            .map(move |i| SocketRef::input(id, i))
            .chain((0..self.outputs.len()).map(move |i| SocketRef::output(id, i)))
    }

    /// Sets the dimensions of the node
    pub fn with_dimensions(mut self, dimensions: Vec2) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Sets a user-assigned color on the node
    pub fn with_custom_color(mut self, color: Color32) -> Self {
        self.custom_color = Some(color);
        self
    }
}

// Serde helper modules for egui types
mod pos2_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(pos: &Pos2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [pos.x, pos.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Pos2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Pos2::new(x, y))
    }
}

mod vec2_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(vec: &Vec2, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        [vec.x, vec.y].serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec2, D::Error>
    where
        D: Deserializer<'de>,
    {
        let [x, y] = <[f32; 2]>::deserialize(deserializer)?;
        Ok(Vec2::new(x, y))
    }
}

mod color32_opt_serde {
    use super::*;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S>(color: &Option<Color32>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        color
            .map(|c| [c.r(), c.g(), c.b(), c.a()])
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Color32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rgba = <Option<[u8; 4]>>::deserialize(deserializer)?;
        Ok(rgba.map(|[r, g, b, a]| Color32::from_rgba_unmultiplied(r, g, b, a)))
    }
}
