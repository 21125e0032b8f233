//! Interactive highlight session and its manager
//!
//! One session spans one gesture: the host feeds it pointer events and a
//! redraw call per frame, and it finds the socket under the cursor, expands
//! the link chain from it and emits draw batches to the render sink. Commit
//! turns the hovered node's connections into a radial menu request; cancel
//! (escape, focus loss, area closed) just drops the session.
//!
//! `SessionManager` owns at most one live session at a time, so a new
//! gesture implicitly replaces a stale one.

use crate::colors::{node_border_color, ColorCache};
use crate::constants::{curve, interaction, outline};
use crate::geometry::{
    link_curve_verts, node_bounds_px, rounded_rect_outline, tri_strip_from_polygon,
    tri_strip_from_polyline,
};
use crate::navigate::{build_pie_menu_request, PieMenuRequest};
use crate::nodes::traversal::collect_full_path_info;
use crate::nodes::{Link, NodeGraph, NodeId, SocketRef};
use crate::position::{PositionCache, SocketPositionProvider};
use crate::render::{DrawMode, RenderSink};
use crate::theme::NodeTheme;
use crate::view::Viewport;
use egui::{Color32, Pos2};
use log::debug;
use std::collections::HashSet;

/// Transient state of one highlight gesture
pub struct HighlightSession {
    cursor: Pos2,
    last_redraw_cursor: Pos2,
    hovered_socket: Option<SocketRef>,
    links_chain: HashSet<Link>,
    chain_targets: HashSet<NodeId>,
    source_node: Option<NodeId>,
    positions: PositionCache,
    colors: ColorCache,
}

impl HighlightSession {
    fn new(cursor: Pos2) -> Self {
        Self {
            cursor,
            last_redraw_cursor: cursor,
            hovered_socket: None,
            links_chain: HashSet::new(),
            chain_targets: HashSet::new(),
            source_node: None,
            positions: PositionCache::new(),
            colors: ColorCache::new(),
        }
    }

    /// Feeds a pointer position. Returns true when the cursor travelled far
    /// enough since the last accepted move that the host should redraw.
    pub fn pointer_moved(&mut self, pos: Pos2) -> bool {
        let delta = pos - self.last_redraw_cursor;
        self.cursor = pos;
        if delta.x * delta.x + delta.y * delta.y > interaction::MOVE_REDRAW_THRESHOLD_SQ {
            self.last_redraw_cursor = pos;
            true
        } else {
            false
        }
    }

    pub fn cursor(&self) -> Pos2 {
        self.cursor
    }

    /// Socket currently under the cursor, as of the last redraw
    pub fn hovered_socket(&self) -> Option<SocketRef> {
        self.hovered_socket
    }

    /// Links discovered by the last redraw
    pub fn links(&self) -> &HashSet<Link> {
        &self.links_chain
    }

    /// Non-routing target nodes discovered by the last redraw
    pub fn targets(&self) -> &HashSet<NodeId> {
        &self.chain_targets
    }

    /// Ultimate source node discovered by the last redraw
    pub fn source(&self) -> Option<NodeId> {
        self.source_node
    }

    /// Runs one highlight frame: refreshes the hovered socket, re-collects
    /// the chain from it and emits draw batches to the sink.
    pub fn redraw(
        &mut self,
        graph: &NodeGraph,
        provider: &dyn SocketPositionProvider,
        theme: &NodeTheme,
        viewport: &Viewport,
        sink: &mut dyn RenderSink,
    ) {
        self.positions.clear();

        self.hovered_socket = self.nearest_socket(graph, provider, viewport);
        let Some(start) = self.hovered_socket else {
            self.links_chain.clear();
            self.chain_targets.clear();
            self.source_node = None;
            return;
        };

        let info = collect_full_path_info(graph, start);
        self.links_chain = info.links;
        self.chain_targets = info.targets;
        self.source_node = info.source;
        if self.links_chain.is_empty() {
            return;
        }

        let ui = viewport.ui_scale;
        sink.begin_blend();

        let mut nodes_to_draw: Vec<NodeId> = self.chain_targets.iter().copied().collect();
        if let Some(source) = self.source_node {
            nodes_to_draw.push(source);
        }
        for node_id in nodes_to_draw {
            let Some(node) = graph.node(node_id) else {
                continue;
            };
            if node.is_routing() {
                continue;
            }
            let bounds = node_bounds_px(graph, node, viewport);
            let color = node_border_color(node, theme, &mut self.colors);
            let verts = rounded_rect_outline(bounds, outline::CORNER_RADIUS);
            if sink.supports_wide_lines() {
                sink.draw(
                    DrawMode::LineStrip,
                    &verts,
                    color,
                    (outline::LINE_WIDTH * ui).max(1.0),
                );
            } else if let Some(strip) = tri_strip_from_polygon(&verts, outline::STRIP_WIDTH * ui) {
                sink.draw(DrawMode::TriangleStrip, &strip, color, 1.0);
            }
        }

        for link in &self.links_chain {
            let Some(verts) = link_curve_verts(graph, provider, viewport, link, theme.curve_tension)
            else {
                continue;
            };
            if sink.supports_wide_lines() {
                sink.draw(
                    DrawMode::LineStrip,
                    &verts,
                    Color32::WHITE,
                    curve::LINK_LINE_WIDTH * ui,
                );
            } else if let Some(strip) = tri_strip_from_polyline(
                &verts,
                (curve::LINK_LINE_WIDTH * ui).max(curve::MIN_STRIP_WIDTH),
            ) {
                sink.draw(DrawMode::TriangleStrip, &strip, Color32::WHITE, 1.0);
            }
        }

        sink.end_blend();
    }

    /// Two-phase proximity search: cull to nodes whose margin-expanded
    /// bounds contain the cursor, then take the nearest linked socket within
    /// the detection radius.
    fn nearest_socket(
        &mut self,
        graph: &NodeGraph,
        provider: &dyn SocketPositionProvider,
        viewport: &Viewport,
    ) -> Option<SocketRef> {
        let ui = viewport.ui_scale;
        let cursor = self.cursor;
        let margin = interaction::NODE_CULL_MARGIN * ui;

        let mut candidates = Vec::new();
        for node in graph.nodes.values() {
            let bounds = node_bounds_px(graph, node, viewport).expand(margin);
            if bounds.contains(cursor) {
                candidates.extend(node.socket_refs().filter(|s| graph.is_linked(*s)));
            }
        }

        let mut best_dist = (interaction::SOCKET_DETECT_RADIUS * ui).powi(2);
        let mut best = None;
        for socket in candidates {
            if let Some(pos) = self.positions.screen_pos(graph, provider, viewport, socket) {
                let d = (pos.x - cursor.x).powi(2) + (pos.y - cursor.y).powi(2);
                if d < best_dist {
                    best_dist = d;
                    best = Some(socket);
                }
            }
        }
        best
    }

    /// Builds the radial menu request for the hovered socket's node.
    /// Returns `None` (and leaves the gesture running) when nothing is
    /// hovered.
    pub fn commit(&mut self, graph: &NodeGraph) -> Option<PieMenuRequest> {
        let socket = self.hovered_socket?;
        Some(build_pie_menu_request(graph, socket.node))
    }
}

/// Owns the at-most-one active highlight session
#[derive(Default)]
pub struct SessionManager {
    session: Option<HighlightSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a gesture at the given cursor position, cancelling and
    /// replacing any session still active.
    pub fn begin(&mut self, cursor: Pos2) -> &mut HighlightSession {
        if self.session.is_some() {
            debug!("replacing active highlight session");
        }
        self.session.insert(HighlightSession::new(cursor))
    }

    /// The active session, if a gesture is running
    pub fn active(&mut self) -> Option<&mut HighlightSession> {
        self.session.as_mut()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Ends the gesture without a result (escape, focus loss, area closed).
    /// All session state, including its caches, is dropped.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            debug!("highlight session cancelled");
        }
    }

    /// Commits the gesture. On a hovered socket this ends the session and
    /// returns the radial menu request; otherwise the session keeps running.
    pub fn commit(&mut self, graph: &NodeGraph) -> Option<PieMenuRequest> {
        let request = self.session.as_mut()?.commit(graph)?;
        self.session = None;
        debug!(
            "highlight session committed: {} sources, {} targets",
            request.sources.len(),
            request.targets.len()
        );
        Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::Node;
    use crate::position::MappedAnchors;
    use egui::Vec2;

    #[derive(Default)]
    struct RecordingSink {
        blend_begun: usize,
        blend_ended: usize,
        batches: Vec<(DrawMode, usize, Color32, f32)>,
        wide_lines: bool,
    }

    impl RenderSink for RecordingSink {
        fn begin_blend(&mut self) {
            self.blend_begun += 1;
        }

        fn end_blend(&mut self) {
            self.blend_ended += 1;
        }

        fn draw(&mut self, mode: DrawMode, verts: &[Pos2], color: Color32, line_width: f32) {
            self.batches.push((mode, verts.len(), color, line_width));
        }

        fn supports_wide_lines(&self) -> bool {
            self.wide_lines
        }
    }

    /// A -> R -> B with anchors on the node edges
    fn scenario() -> (NodeGraph, MappedAnchors, NodeId, NodeId) {
        let mut graph = NodeGraph::new();
        let mut a = Node::new(0, "ShaderNodeRGB", "A", Pos2::new(0.0, 0.0))
            .with_dimensions(Vec2::new(150.0, 100.0));
        a.add_output("Color");
        let a = graph.add_node(a);
        let r = graph.add_node(Node::new_routing(0, "R", Pos2::new(200.0, -20.0)));
        let mut b = Node::new(0, "ShaderNodeMix", "B", Pos2::new(300.0, 0.0))
            .with_dimensions(Vec2::new(150.0, 100.0));
        b.add_input("A").add_output("Result");
        let b = graph.add_node(b);
        graph.link(SocketRef::output(a, 0), SocketRef::input(r, 0)).unwrap();
        graph.link(SocketRef::output(r, 0), SocketRef::input(b, 0)).unwrap();

        let mut anchors = MappedAnchors::new();
        anchors.set(SocketRef::output(a, 0), Pos2::new(150.0, -20.0));
        anchors.set(SocketRef::input(r, 0), Pos2::new(200.0, -28.0));
        anchors.set(SocketRef::output(r, 0), Pos2::new(216.0, -28.0));
        anchors.set(SocketRef::input(b, 0), Pos2::new(300.0, -20.0));
        (graph, anchors, a, b)
    }

    #[test]
    fn test_redraw_highlights_chain_under_cursor() {
        let _ = env_logger::builder().is_test(true).try_init();
        let (graph, anchors, a, b) = scenario();
        let theme = NodeTheme::default();
        let viewport = Viewport::new();
        let mut sink = RecordingSink {
            wide_lines: true,
            ..Default::default()
        };

        let mut manager = SessionManager::new();
        let session = manager.begin(Pos2::new(146.0, -22.0));
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);

        assert_eq!(session.hovered_socket(), Some(SocketRef::output(a, 0)));
        assert_eq!(session.links().len(), 2);
        assert_eq!(session.targets(), &HashSet::from([b]));
        assert_eq!(session.source(), Some(a));

        assert_eq!(sink.blend_begun, 1);
        assert_eq!(sink.blend_ended, 1);
        // two node outlines (A and B, the reroute skipped) plus two curves
        let outlines: Vec<_> = sink.batches.iter().filter(|b| b.1 == 37).collect();
        assert_eq!(outlines.len(), 2);
        let curves: Vec<_> = sink
            .batches
            .iter()
            .filter(|b| b.2 == Color32::WHITE)
            .collect();
        assert_eq!(curves.len(), 2);
        assert_eq!(sink.batches.len(), 4);
    }

    #[test]
    fn test_redraw_far_from_any_socket_clears_and_draws_nothing() {
        let (graph, anchors, ..) = scenario();
        let theme = NodeTheme::default();
        let viewport = Viewport::new();
        let mut sink = RecordingSink {
            wide_lines: true,
            ..Default::default()
        };

        let mut manager = SessionManager::new();
        let session = manager.begin(Pos2::new(146.0, -22.0));
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);
        assert!(!session.links().is_empty());

        session.pointer_moved(Pos2::new(2000.0, 2000.0));
        sink.batches.clear();
        sink.blend_begun = 0;
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);
        assert_eq!(session.hovered_socket(), None);
        assert!(session.links().is_empty());
        assert!(session.targets().is_empty());
        assert!(sink.batches.is_empty());
        assert_eq!(sink.blend_begun, 0);
    }

    #[test]
    fn test_sink_without_wide_lines_gets_triangle_strips() {
        let (graph, anchors, ..) = scenario();
        let theme = NodeTheme::default();
        let viewport = Viewport::new();
        let mut sink = RecordingSink::default();

        let mut manager = SessionManager::new();
        let session = manager.begin(Pos2::new(146.0, -22.0));
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);
        assert!(!sink.batches.is_empty());
        assert!(sink.batches.iter().all(|b| b.0 == DrawMode::TriangleStrip));
    }

    #[test]
    fn test_unlinked_sockets_are_not_hovered() {
        let (mut graph, mut anchors, a, _b) = scenario();
        // a second, unlinked output right under the cursor
        graph.node_mut(a).unwrap().add_output("Alpha");
        anchors.set(SocketRef::output(a, 1), Pos2::new(146.0, -22.0));
        let theme = NodeTheme::default();
        let viewport = Viewport::new();
        let mut sink = RecordingSink {
            wide_lines: true,
            ..Default::default()
        };

        let mut manager = SessionManager::new();
        let session = manager.begin(Pos2::new(146.0, -22.0));
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);
        assert_eq!(session.hovered_socket(), Some(SocketRef::output(a, 0)));
    }

    #[test]
    fn test_disabled_socket_is_not_hovered() {
        let (mut graph, anchors, a, _b) = scenario();
        graph.node_mut(a).unwrap().outputs[0].enabled = false;
        let theme = NodeTheme::default();
        let viewport = Viewport::new();
        let mut sink = RecordingSink {
            wide_lines: true,
            ..Default::default()
        };

        let mut manager = SessionManager::new();
        let session = manager.begin(Pos2::new(146.0, -22.0));
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);
        assert_eq!(session.hovered_socket(), None);
    }

    #[test]
    fn test_pointer_move_threshold() {
        let mut manager = SessionManager::new();
        let session = manager.begin(Pos2::ZERO);
        assert!(!session.pointer_moved(Pos2::new(1.0, 1.0)));
        assert_eq!(session.cursor(), Pos2::new(1.0, 1.0));
        assert!(session.pointer_moved(Pos2::new(5.0, 5.0)));
        assert!(!session.pointer_moved(Pos2::new(6.0, 5.0)));
    }

    #[test]
    fn test_commit_ends_session_and_reports_chain() {
        let (graph, anchors, a, b) = scenario();
        let theme = NodeTheme::default();
        let viewport = Viewport::new();
        let mut sink = RecordingSink {
            wide_lines: true,
            ..Default::default()
        };

        let mut manager = SessionManager::new();
        // commit with nothing hovered keeps the gesture running
        manager.begin(Pos2::new(2000.0, 2000.0));
        assert!(manager.commit(&graph).is_none());
        assert!(manager.is_active());

        let session = manager.begin(Pos2::new(146.0, -22.0));
        session.redraw(&graph, &anchors, &theme, &viewport, &mut sink);
        let request = manager.commit(&graph).unwrap();
        assert!(!manager.is_active());
        // hovered socket sits on A: no upstream sources, B downstream
        assert!(request.sources.is_empty());
        assert_eq!(request.targets.len(), 1);
        assert_eq!(request.targets[0].node, b);
        let _ = a;
    }

    #[test]
    fn test_manager_replaces_active_session() {
        let mut manager = SessionManager::new();
        manager.begin(Pos2::ZERO);
        let session = manager.begin(Pos2::new(50.0, 50.0));
        assert_eq!(session.cursor(), Pos2::new(50.0, 50.0));
        assert!(manager.is_active());
        manager.cancel();
        assert!(!manager.is_active());
        manager.cancel();
    }
}
