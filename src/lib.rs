//! Nodelink - connection-chain highlighting and navigation for node editors
//!
//! This library finds the chain of links and nodes reachable from the socket
//! under the cursor, walking through pass-through routing nodes, and turns it
//! into colored screen-space geometry a host editor renders each frame. It
//! also builds the radial jump menu for the hovered node's connections.

pub mod colors;
pub mod constants;
pub mod geometry;
pub mod navigate;
pub mod nodes;
pub mod position;
pub mod render;
pub mod session;
pub mod theme;
pub mod view;

pub use navigate::{
    build_pie_menu_request, jump_to_node, remove_jump_marker, DeferredAction, EditorHost,
    JumpEntry, PieMenuRequest,
};
pub use nodes::{Link, Node, NodeGraph, NodeId, NodeKind, Socket, SocketDirection, SocketRef};
pub use position::{GeometryAnchors, MappedAnchors, PositionCache, SocketPositionProvider};
pub use render::{DrawMode, RenderSink};
pub use session::{HighlightSession, SessionManager};
pub use theme::NodeTheme;
pub use view::Viewport;

// Re-export commonly used egui types
pub use egui::{Color32, Pos2, Vec2};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_round_trip() {
        let mut graph = NodeGraph::new();

        let mut tex = Node::new(0, "ShaderNodeTexImage", "Image Texture", Pos2::new(0.0, 0.0));
        tex.add_output("Color");
        let tex = graph.add_node(tex);

        let reroute = graph.add_node(Node::new_routing(0, "Reroute", Pos2::new(200.0, 0.0)));

        let mut shader = Node::new(0, "ShaderNodeBsdfPrincipled", "Principled", Pos2::new(400.0, 0.0));
        shader.add_input("Base Color");
        let shader = graph.add_node(shader);

        graph
            .link(SocketRef::output(tex, 0), SocketRef::input(reroute, 0))
            .unwrap();
        graph
            .link(SocketRef::output(reroute, 0), SocketRef::input(shader, 0))
            .unwrap();

        let info = nodes::collect_full_path_info(&graph, SocketRef::input(shader, 0));
        assert_eq!(info.source, Some(tex));
        assert!(info.targets.contains(&shader));
        assert_eq!(info.links.len(), 2);

        let request = build_pie_menu_request(&graph, shader);
        assert_eq!(request.sources.len(), 1);
        assert_eq!(request.sources[0].node_name, "Image Texture");
    }
}
