use std::collections::{BTreeMap, HashMap};

use anyhow::Result;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

use geom::{Distance, GPSBounds, HashablePt2D, Pt2D, ScreenProjection};

use crate::make::BuildStats;
use crate::{Lane, LaneID, NetworkConfig, Node, NodeID};

/// Owns every node and lane. Nodes live in a Vec indexed by their ID; lanes live in a map, because
/// splitting retires a lane while the IDs of every other lane stay valid.
pub struct RoadNetwork {
    pub(crate) nodes: Vec<Node>,
    pub(crate) lanes: BTreeMap<LaneID, Lane>,
    next_lane_id: usize,
    /// Every admitted node, keyed by exact position
    node_index: HashMap<HashablePt2D, NodeID>,
    projection: ScreenProjection,
    rng: XorShiftRng,
    pub(crate) stats: BuildStats,
}

impl RoadNetwork {
    /// An empty network. Only fails if the config describes an empty window or bounds.
    pub fn new(config: &NetworkConfig) -> Result<RoadNetwork> {
        Ok(RoadNetwork {
            nodes: Vec::new(),
            lanes: BTreeMap::new(),
            next_lane_id: 0,
            node_index: HashMap::new(),
            projection: config.projection()?,
            rng: XorShiftRng::seed_from_u64(config.rng_seed),
            stats: BuildStats::default(),
        })
    }

    pub fn get_n(&self, id: NodeID) -> &Node {
        &self.nodes[id.0]
    }

    pub fn maybe_get_n(&self, id: NodeID) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Panics if the lane doesn't exist, or has been retired by a split.
    pub fn get_l(&self, id: LaneID) -> &Lane {
        &self.lanes[&id]
    }

    pub fn maybe_get_l(&self, id: LaneID) -> Option<&Lane> {
        self.lanes.get(&id)
    }

    pub fn all_nodes(&self) -> &Vec<Node> {
        &self.nodes
    }

    /// Live lanes, in ID order.
    pub fn all_lanes(&self) -> impl Iterator<Item = &Lane> {
        self.lanes.values()
    }

    pub fn num_lanes(&self) -> usize {
        self.lanes.len()
    }

    pub fn projection(&self) -> &ScreenProjection {
        &self.projection
    }

    pub fn gps_bounds(&self) -> &GPSBounds {
        self.projection.gps_bounds()
    }

    pub fn build_stats(&self) -> &BuildStats {
        &self.stats
    }

    /// The node at exactly this position, if any.
    pub fn node_at(&self, pt: Pt2D) -> Option<NodeID> {
        self.node_index.get(&pt.to_hashable()).cloned()
    }

    /// The first node tagged with `direction`, in admission order.
    pub fn find_direction(&self, direction: &str) -> Option<NodeID> {
        self.nodes
            .iter()
            .find(|n| n.direction() == Some(direction))
            .map(|n| n.id)
    }

    pub fn nodes_with_direction(&self, direction: &str) -> Vec<NodeID> {
        self.nodes
            .iter()
            .filter(|n| n.direction() == Some(direction))
            .map(|n| n.id)
            .collect()
    }

    /// Picks uniformly among all admitted nodes. None if the network is empty.
    pub fn random_node(&mut self) -> Option<NodeID> {
        if self.nodes.is_empty() {
            return None;
        }
        Some(NodeID(self.rng.gen_range(0..self.nodes.len())))
    }

    /// Scans every node's outbound lanes, in node and then outbound order, and returns the lane
    /// passing closest to `pos`. On exact ties, the first lane found wins.
    pub fn find_closest_lane(&self, pos: Pt2D) -> Option<LaneID> {
        let mut best: Option<(LaneID, Distance)> = None;
        for node in &self.nodes {
            for l in &node.outbound {
                let dist = self.get_l(*l).dist_to(pos);
                if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                    best = Some((*l, dist));
                }
            }
        }
        best.map(|(l, _)| l)
    }

    /// The closest point to `pos` on the closest lane.
    pub fn find_closest_point(&self, pos: Pt2D) -> Option<Pt2D> {
        let l = self.find_closest_lane(pos)?;
        Some(self.get_l(l).find_closest_point(pos))
    }

    /// Returns the node already at `pt`, or admits a new one there with the next ID.
    pub(crate) fn admit_node(&mut self, pt: Pt2D) -> NodeID {
        if let Some(id) = self.node_at(pt) {
            return id;
        }
        let id = NodeID(self.nodes.len());
        self.nodes.push(Node::new(id, pt));
        self.node_index.insert(pt.to_hashable(), id);
        id
    }

    pub(crate) fn next_lane_id(&mut self) -> LaneID {
        let id = LaneID(self.next_lane_id);
        self.next_lane_id += 1;
        id
    }

    /// Stores the lane and attaches it to its source node.
    pub(crate) fn insert_lane(&mut self, lane: Lane) {
        self.nodes[lane.src.0].outbound.push(lane.id);
        self.lanes.insert(lane.id, lane);
    }

    /// Creates a lane from `src` to `dst`, plus the mirrored lane back if the road isn't one-way.
    /// Returns the forward lane.
    pub(crate) fn create_road(
        &mut self,
        src: NodeID,
        dst: NodeID,
        name: &str,
        pts: Vec<Pt2D>,
        oneway: bool,
    ) -> Result<LaneID> {
        let fwd_id = self.next_lane_id();
        let mut fwd = Lane::new(fwd_id, name.to_string(), src, dst, pts)?;
        if oneway {
            self.insert_lane(fwd);
            return Ok(fwd_id);
        }

        let back_id = self.next_lane_id();
        let back = Lane {
            id: back_id,
            name: name.to_string(),
            src: dst,
            dst: src,
            center_pts: fwd.center_pts.reversed(),
            reverse: Some(fwd_id),
        };
        fwd.reverse = Some(back_id);
        self.insert_lane(fwd);
        self.insert_lane(back);
        Ok(fwd_id)
    }
}
