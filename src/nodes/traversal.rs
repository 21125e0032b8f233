//! Link-chain traversal through routing nodes
//!
//! Routing nodes are pure pass-throughs in the graph model: every walk here
//! treats them as transparent, follows their internal hop, and never reports
//! them as a chain source or target. All walks carry a visited set so reroute
//! cycles terminate instead of looping.

use super::graph::{Link, NodeGraph};
use super::node::NodeId;
use super::socket::SocketRef;
use std::collections::{HashSet, VecDeque};

/// Everything discovered along the chain reachable from one socket
#[derive(Debug, Default)]
pub struct PathInfo {
    /// Every link traversed, including hops into and out of routing nodes
    pub links: HashSet<Link>,
    /// Every non-routing destination node
    pub targets: HashSet<NodeId>,
    /// The ultimate upstream source node, if the chain resolved to one
    pub source: Option<NodeId>,
}

/// Resolves the ultimate upstream source of an input socket.
///
/// Follows the input's single link backward through any chain of routing
/// nodes. An unlinked routing node stops the walk at that node; a revisited
/// socket (reroute cycle) aborts with `None`.
pub fn find_ultimate_source(graph: &NodeGraph, input: SocketRef) -> Option<(SocketRef, NodeId)> {
    let link = graph.input_link(input)?;
    let mut from = link.from;
    let mut visited = HashSet::from([from]);
    while graph.node(from.node)?.is_routing() {
        let Some(hop) = graph.input_link(SocketRef::input(from.node, 0)) else {
            break;
        };
        let next = hop.from;
        if !visited.insert(next) {
            return None;
        }
        from = next;
    }
    Some((from, from.node))
}

/// Resolves every ultimate downstream target socket of an output socket.
///
/// Breadth-first over the fan-out; routing destinations are expanded through
/// their single output, non-routing destination sockets are recorded in
/// discovery order. Each socket is dequeued at most once, so reconverging
/// routing paths cannot produce duplicates.
pub fn find_ultimate_targets(graph: &NodeGraph, output: SocketRef) -> Vec<SocketRef> {
    let mut targets = Vec::new();
    let mut queue = VecDeque::from([output]);
    let mut visited: HashSet<SocketRef> = HashSet::new();
    while let Some(socket) = queue.pop_front() {
        if !visited.insert(socket) {
            continue;
        }
        for link in graph.links_from(socket) {
            let Some(to_node) = graph.node(link.to.node) else {
                continue;
            };
            if to_node.is_routing() {
                if !to_node.outputs.is_empty() {
                    queue.push_back(SocketRef::output(link.to.node, 0));
                }
            } else {
                targets.push(link.to);
            }
        }
    }
    targets
}

/// Collects the full chain reachable from a socket: every link, every
/// non-routing target node, and the ultimate source node.
///
/// The backward walk here is tolerant: a reroute cycle or dead end stops at
/// the last resolvable socket instead of failing, so a partial chain still
/// highlights.
pub fn collect_full_path_info(graph: &NodeGraph, start: SocketRef) -> PathInfo {
    let mut info = PathInfo::default();

    // Backward: walk to the ultimate source socket.
    let mut current = start;
    let mut visited = HashSet::from([start]);
    loop {
        if current.is_input() {
            match graph.input_link(current) {
                Some(link) => current = link.from,
                None => break,
            }
        }
        let Some(node) = graph.node(current.node) else {
            break;
        };
        if !node.is_routing() {
            break;
        }
        let Some(hop) = graph.input_link(SocketRef::input(current.node, 0)) else {
            break;
        };
        let next = hop.from;
        if !visited.insert(next) {
            break;
        }
        current = next;
    }
    info.source = graph.node(current.node).map(|n| n.id);

    // Forward: breadth-first expansion accumulating links and target nodes.
    let mut queue = VecDeque::from([current]);
    let mut seen: HashSet<SocketRef> = HashSet::new();
    while let Some(socket) = queue.pop_front() {
        if !seen.insert(socket) {
            continue;
        }
        for link in graph.socket_links(socket) {
            info.links.insert(*link);
            let Some(to_node) = graph.node(link.to.node) else {
                continue;
            };
            if to_node.is_routing() {
                if !to_node.outputs.is_empty() {
                    queue.push_back(SocketRef::output(link.to.node, 0));
                }
            } else {
                info.targets.insert(link.to.node);
            }
        }
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::node::Node;
    use egui::Pos2;

    fn source_node(graph: &mut NodeGraph, name: &str) -> NodeId {
        let mut node = Node::new(0, "ShaderNodeRGB", name, Pos2::ZERO);
        node.add_output("Color");
        graph.add_node(node)
    }

    fn sink_node(graph: &mut NodeGraph, name: &str) -> NodeId {
        let mut node = Node::new(0, "ShaderNodeMix", name, Pos2::ZERO);
        node.add_input("A").add_input("B").add_output("Result");
        graph.add_node(node)
    }

    fn reroute(graph: &mut NodeGraph, name: &str) -> NodeId {
        graph.add_node(Node::new_routing(0, name, Pos2::ZERO))
    }

    /// Builds A -> R1 -> ... -> Rn -> B and returns (a, b)
    fn chain_through_reroutes(graph: &mut NodeGraph, reroutes: usize) -> (NodeId, NodeId) {
        let a = source_node(graph, "A");
        let b = sink_node(graph, "B");
        let mut from = SocketRef::output(a, 0);
        for i in 0..reroutes {
            let r = reroute(graph, &format!("R{i}"));
            graph.link(from, SocketRef::input(r, 0)).unwrap();
            from = SocketRef::output(r, 0);
        }
        graph.link(from, SocketRef::input(b, 0)).unwrap();
        (a, b)
    }

    #[test]
    fn test_source_through_reroute_chains_of_any_length() {
        for n in [0, 1, 2, 7] {
            let mut graph = NodeGraph::new();
            let (a, b) = chain_through_reroutes(&mut graph, n);
            let resolved = find_ultimate_source(&graph, SocketRef::input(b, 0));
            assert_eq!(resolved, Some((SocketRef::output(a, 0), a)), "chain length {n}");
        }
    }

    #[test]
    fn test_source_of_unlinked_input_is_none() {
        let mut graph = NodeGraph::new();
        let b = sink_node(&mut graph, "B");
        assert_eq!(find_ultimate_source(&graph, SocketRef::input(b, 0)), None);
    }

    #[test]
    fn test_source_stops_at_dangling_reroute() {
        let mut graph = NodeGraph::new();
        let b = sink_node(&mut graph, "B");
        let r = reroute(&mut graph, "R");
        graph.link(SocketRef::output(r, 0), SocketRef::input(b, 0)).unwrap();
        // The reroute has no upstream link: the walk stops at its output.
        let resolved = find_ultimate_source(&graph, SocketRef::input(b, 0));
        assert_eq!(resolved, Some((SocketRef::output(r, 0), r)));
    }

    #[test]
    fn test_reroute_cycle_aborts_source_query() {
        let mut graph = NodeGraph::new();
        let b = sink_node(&mut graph, "B");
        let r1 = reroute(&mut graph, "R1");
        let r2 = reroute(&mut graph, "R2");
        graph.link(SocketRef::output(r1, 0), SocketRef::input(r2, 0)).unwrap();
        graph.link(SocketRef::output(r2, 0), SocketRef::input(r1, 0)).unwrap();
        graph.link(SocketRef::output(r1, 0), SocketRef::input(b, 0)).unwrap();
        assert_eq!(find_ultimate_source(&graph, SocketRef::input(b, 0)), None);
    }

    #[test]
    fn test_targets_through_reroute() {
        let mut graph = NodeGraph::new();
        let (a, b) = chain_through_reroutes(&mut graph, 1);
        let targets = find_ultimate_targets(&graph, SocketRef::output(a, 0));
        assert_eq!(targets, vec![SocketRef::input(b, 0)]);
    }

    #[test]
    fn test_targets_fan_out() {
        let mut graph = NodeGraph::new();
        let a = source_node(&mut graph, "A");
        let mut expected = Vec::new();
        for name in ["B", "C", "D"] {
            let sink = sink_node(&mut graph, name);
            graph.link(SocketRef::output(a, 0), SocketRef::input(sink, 0)).unwrap();
            expected.push(SocketRef::input(sink, 0));
        }
        let targets = find_ultimate_targets(&graph, SocketRef::output(a, 0));
        assert_eq!(targets, expected);
    }

    #[test]
    fn test_targets_terminate_on_reroute_cycle() {
        let mut graph = NodeGraph::new();
        let b = sink_node(&mut graph, "B");
        let r1 = reroute(&mut graph, "R1");
        let r2 = reroute(&mut graph, "R2");
        graph.link(SocketRef::output(r1, 0), SocketRef::input(r2, 0)).unwrap();
        graph.link(SocketRef::output(r2, 0), SocketRef::input(r1, 0)).unwrap();
        graph.link(SocketRef::output(r1, 0), SocketRef::input(b, 0)).unwrap();
        let targets = find_ultimate_targets(&graph, SocketRef::output(r1, 0));
        assert_eq!(targets, vec![SocketRef::input(b, 0)]);
    }

    #[test]
    fn test_full_path_collects_every_hop_link() {
        let mut graph = NodeGraph::new();
        let (a, b) = chain_through_reroutes(&mut graph, 2);
        // querying from B's input resolves back to A, then expands forward
        let info = collect_full_path_info(&graph, SocketRef::input(b, 0));
        assert_eq!(info.source, Some(a));
        assert_eq!(info.links.len(), 3);
        assert_eq!(info.targets, HashSet::from([b]));
    }

    #[test]
    fn test_full_path_from_output_socket() {
        let mut graph = NodeGraph::new();
        let (a, b) = chain_through_reroutes(&mut graph, 1);
        let info = collect_full_path_info(&graph, SocketRef::output(a, 0));
        assert_eq!(info.source, Some(a));
        assert_eq!(info.links.len(), 2);
        assert_eq!(info.targets, HashSet::from([b]));
    }

    #[test]
    fn test_full_path_tolerates_reroute_cycle() {
        let mut graph = NodeGraph::new();
        let b = sink_node(&mut graph, "B");
        let r1 = reroute(&mut graph, "R1");
        let r2 = reroute(&mut graph, "R2");
        graph.link(SocketRef::output(r1, 0), SocketRef::input(r2, 0)).unwrap();
        graph.link(SocketRef::output(r2, 0), SocketRef::input(r1, 0)).unwrap();
        graph.link(SocketRef::output(r1, 0), SocketRef::input(b, 0)).unwrap();
        // terminates, stopping the backward walk at the last good socket
        let info = collect_full_path_info(&graph, SocketRef::input(b, 0));
        assert!(info.targets.contains(&b));
        assert!(!info.links.is_empty());
    }

    #[test]
    fn test_reconverging_routing_paths_do_not_duplicate_targets() {
        let mut graph = NodeGraph::new();
        let a = source_node(&mut graph, "A");
        let b = sink_node(&mut graph, "B");
        let r1 = reroute(&mut graph, "R1");
        let r2 = reroute(&mut graph, "R2");
        graph.link(SocketRef::output(a, 0), SocketRef::input(r1, 0)).unwrap();
        graph.link(SocketRef::output(a, 0), SocketRef::input(r2, 0)).unwrap();
        graph.link(SocketRef::output(r1, 0), SocketRef::input(b, 0)).unwrap();
        graph.link(SocketRef::output(r2, 0), SocketRef::input(b, 1)).unwrap();
        let info = collect_full_path_info(&graph, SocketRef::output(a, 0));
        assert_eq!(info.targets, HashSet::from([b]));
        assert_eq!(info.links.len(), 4);
    }

    #[test]
    fn test_single_reroute_scenario() {
        // A (output) -> R -> B (input)
        let mut graph = NodeGraph::new();
        let (a, b) = chain_through_reroutes(&mut graph, 1);
        assert_eq!(
            find_ultimate_targets(&graph, SocketRef::output(a, 0)),
            vec![SocketRef::input(b, 0)]
        );
        assert_eq!(
            find_ultimate_source(&graph, SocketRef::input(b, 0)),
            Some((SocketRef::output(a, 0), a))
        );
    }
}
