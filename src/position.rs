//! Socket anchor resolution
//!
//! Socket anchor points are runtime layout data owned by the host editor, not
//! part of the stable graph model. All access funnels through the
//! `SocketPositionProvider` capability so the traversal and geometry code has
//! exactly one seam to the host's layout internals, and any read failure
//! degrades to "no position" instead of propagating.

use crate::nodes::{NodeGraph, SocketDirection, SocketRef};
use crate::view::Viewport;
use egui::Pos2;
use std::collections::HashMap;

/// Capability for resolving a socket's anchor point in tree space.
///
/// Returns `None` whenever the anchor is unavailable (layout not computed,
/// socket unknown, host read failed). Callers treat such sockets as
/// unselectable and skip them in rendering.
pub trait SocketPositionProvider {
    fn socket_anchor(&self, graph: &NodeGraph, socket: SocketRef) -> Option<Pos2>;
}

/// Anchor table filled in by the host from its own layout pass
#[derive(Debug, Default, Clone)]
pub struct MappedAnchors {
    anchors: HashMap<SocketRef, Pos2>,
}

impl MappedAnchors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the tree-space anchor for a socket
    pub fn set(&mut self, socket: SocketRef, anchor: Pos2) {
        self.anchors.insert(socket, anchor);
    }

    pub fn clear(&mut self) {
        self.anchors.clear();
    }
}

impl SocketPositionProvider for MappedAnchors {
    fn socket_anchor(&self, _graph: &NodeGraph, socket: SocketRef) -> Option<Pos2> {
        self.anchors.get(&socket).copied()
    }
}

/// Derives anchors from node geometry for hosts without a layout
/// introspection channel: inputs spaced down the left edge, outputs down the
/// right edge.
#[derive(Debug, Clone)]
pub struct GeometryAnchors {
    pub ui_scale: f32,
    /// Vertical spacing between sockets on the same edge
    pub socket_spacing: f32,
}

impl GeometryAnchors {
    pub fn new(ui_scale: f32) -> Self {
        Self {
            ui_scale,
            socket_spacing: 22.0,
        }
    }
}

impl SocketPositionProvider for GeometryAnchors {
    fn socket_anchor(&self, graph: &NodeGraph, socket: SocketRef) -> Option<Pos2> {
        let node = graph.node(socket.node)?;
        node.socket(socket.direction, socket.index)?;

        let mut ax = node.position.x;
        let mut ay = node.position.y;
        let mut parent = node.parent;
        while let Some(parent_id) = parent {
            let frame = graph.node(parent_id)?;
            ax += frame.position.x;
            ay += frame.position.y;
            parent = frame.parent;
        }

        let x = match socket.direction {
            SocketDirection::Input => ax * self.ui_scale,
            SocketDirection::Output => ax * self.ui_scale + node.dimensions.x,
        };
        let y = ay * self.ui_scale - (socket.index as f32 + 1.0) * self.socket_spacing * self.ui_scale;
        Some(Pos2::new(x, y))
    }
}

/// Per-session cache of projected socket screen positions.
///
/// Caches the `None` sentinel too, so a socket that failed to resolve is not
/// re-queried within the same redraw. Cleared at the start of every redraw
/// pass.
#[derive(Debug, Default)]
pub struct PositionCache {
    cache: HashMap<SocketRef, Option<Pos2>>,
}

impl PositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Screen position of a socket's anchor, memoized for this redraw.
    ///
    /// Disabled sockets resolve to `None` before the provider is consulted.
    pub fn screen_pos(
        &mut self,
        graph: &NodeGraph,
        provider: &dyn SocketPositionProvider,
        viewport: &Viewport,
        socket: SocketRef,
    ) -> Option<Pos2> {
        if let Some(cached) = self.cache.get(&socket) {
            return *cached;
        }
        let pos = graph
            .socket(socket)
            .filter(|s| s.enabled)
            .and_then(|_| provider.socket_anchor(graph, socket))
            .map(|anchor| viewport.view_to_region(anchor));
        self.cache.insert(socket, pos);
        pos
    }
}
