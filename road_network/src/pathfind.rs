//! Shortest paths over the lanes present in the network right now.

use petgraph::graphmap::DiGraphMap;

use geom::Distance;

use crate::{LaneID, NodeID, RoadNetwork};

/// The lanes to follow, in order, and their total length.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub lanes: Vec<LaneID>,
    pub cost: Distance,
}

// TODO Cache the graph between calls and rebuild only after split_lane or connect.
pub fn build_graph(network: &RoadNetwork) -> DiGraphMap<NodeID, LaneID> {
    let mut graph = DiGraphMap::new();
    for node in network.all_nodes() {
        graph.add_node(node.id);
    }
    for lane in network.all_lanes() {
        // Only the cheapest of several parallel lanes matters
        if let Some(existing) = graph.edge_weight(lane.src, lane.dst) {
            if network.get_l(*existing).length() <= lane.length() {
                continue;
            }
        }
        graph.add_edge(lane.src, lane.dst, lane.id);
    }
    graph
}

/// Finds the shortest route from one node to another, weighting lanes by length. None if `to`
/// can't be reached, which is a normal outcome callers should plan for. A route from a node to
/// itself is empty.
pub fn pathfind(network: &RoadNetwork, from: NodeID, to: NodeID) -> Option<Route> {
    if network.maybe_get_n(from).is_none() || network.maybe_get_n(to).is_none() {
        warn!("Can't pathfind from {} to {}; not in the network", from, to);
        return None;
    }
    if from == to {
        return Some(Route {
            lanes: Vec::new(),
            cost: Distance::ZERO,
        });
    }

    let graph = build_graph(network);
    let goal = network.get_n(to).pt;
    let (cost, nodes) = petgraph::algo::astar(
        &graph,
        from,
        |n| n == to,
        |(_, _, l)| network.get_l(*l).length(),
        // A lane is never shorter than the straight line between its ends
        |n| network.get_n(n).pt.dist_to(goal),
    )?;
    let lanes = nodes
        .windows(2)
        .map(|pair| graph.edge_weight(pair[0], pair[1]).cloned())
        .collect::<Option<Vec<LaneID>>>()?;
    Some(Route { lanes, cost })
}
