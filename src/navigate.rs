//! Node navigation commands and the radial menu request
//!
//! The interaction session hands the discovered chain to the radial menu as
//! an explicit `PieMenuRequest`; menu picks come back through `jump_to_node`,
//! which selects and frames the target and drops a short-lived marker frame
//! around it.

use crate::constants::marker;
use crate::nodes::{Node, NodeGraph, NodeId, SocketRef};
use crate::nodes::traversal::{find_ultimate_source, find_ultimate_targets};
use egui::{Pos2, Vec2};
use log::debug;
use std::collections::HashSet;

/// Reserved name of the temporary marker frame; repeated jumps replace the
/// marker instead of stacking new ones
pub const JUMP_MARKER_NAME: &str = "__nodelink_jump_marker";

/// One selectable entry in the radial menu
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JumpEntry {
    pub node: NodeId,
    pub node_name: String,
    pub socket_name: String,
    /// Menu text, "display-label -> socket-name"
    pub label: String,
}

/// Discovered upstream sources and downstream targets for one node,
/// passed directly to the radial menu renderer
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieMenuRequest {
    pub sources: Vec<JumpEntry>,
    pub targets: Vec<JumpEntry>,
}

/// Host-side editor capabilities the jump command needs
pub trait EditorHost {
    /// Centers the view on a node
    fn frame_node(&mut self, node: NodeId);

    /// Runs a deferred action once after `delay_secs`, on the UI thread
    fn schedule_once(&mut self, delay_secs: f32, action: DeferredAction);
}

/// Actions the host timer fires on the core's behalf
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    RemoveJumpMarker,
}

fn push_unique(entries: &mut Vec<JumpEntry>, seen: &mut HashSet<(String, String)>, entry: JumpEntry) {
    if seen.insert((entry.node_name.clone(), entry.socket_name.clone())) {
        entries.push(entry);
    }
}

/// Builds the radial menu request for a node: ultimate source per input,
/// ultimate targets per output, deduplicated preserving discovery order.
pub fn build_pie_menu_request(graph: &NodeGraph, node_id: NodeId) -> PieMenuRequest {
    let mut request = PieMenuRequest::default();
    let Some(node) = graph.node(node_id) else {
        return request;
    };

    let mut seen = HashSet::new();
    for index in 0..node.inputs.len() {
        let Some((socket, source_id)) = find_ultimate_source(graph, SocketRef::input(node_id, index))
        else {
            continue;
        };
        let (Some(source), Some(source_socket)) = (graph.node(source_id), graph.socket(socket))
        else {
            continue;
        };
        push_unique(
            &mut request.sources,
            &mut seen,
            JumpEntry {
                node: source_id,
                node_name: source.name.clone(),
                socket_name: source_socket.name.clone(),
                label: format!("{} -> {}", source.display_label(), source_socket.name),
            },
        );
    }

    let mut seen = HashSet::new();
    for index in 0..node.outputs.len() {
        for target in find_ultimate_targets(graph, SocketRef::output(node_id, index)) {
            let (Some(target_node), Some(target_socket)) =
                (graph.node(target.node), graph.socket(target))
            else {
                continue;
            };
            push_unique(
                &mut request.targets,
                &mut seen,
                JumpEntry {
                    node: target.node,
                    node_name: target_node.name.clone(),
                    socket_name: target_socket.name.clone(),
                    label: format!("{} -> {}", target_node.display_label(), target_socket.name),
                },
            );
        }
    }
    request
}

/// Selects and frames a node by name, dropping a temporary marker frame
/// around it. The host timer removes the marker after
/// `marker::LIFETIME_SECS` via `DeferredAction::RemoveJumpMarker`.
///
/// Returns false when no node carries that name.
pub fn jump_to_node(graph: &mut NodeGraph, host: &mut dyn EditorHost, name: &str) -> bool {
    let Some((id, position, dimensions)) = graph
        .node_by_name(name)
        .map(|n| (n.id, n.position, n.dimensions))
    else {
        debug!("jump target {name:?} not found");
        return false;
    };

    graph.select_only(id);
    host.frame_node(id);

    remove_jump_marker(graph);
    let marker_pos = Pos2::new(position.x - marker::PADDING, position.y + marker::PADDING);
    let mut frame = Node::new_frame(0, JUMP_MARKER_NAME, marker_pos)
        .with_dimensions(dimensions + Vec2::splat(2.0 * marker::PADDING));
    frame.label = Some("Jump Target".to_string());
    graph.add_node(frame);
    host.schedule_once(marker::LIFETIME_SECS, DeferredAction::RemoveJumpMarker);
    debug!("jumped to node {name:?}");
    true
}

/// Removes the temporary jump marker, detaching any children first.
/// Idempotent: a graph without a marker is left untouched.
pub fn remove_jump_marker(graph: &mut NodeGraph) {
    let Some(marker_id) = graph.node_by_name(JUMP_MARKER_NAME).map(|n| n.id) else {
        return;
    };
    for node in graph.nodes.values_mut() {
        if node.parent == Some(marker_id) {
            node.parent = None;
        }
    }
    graph.remove_node(marker_id);
}
