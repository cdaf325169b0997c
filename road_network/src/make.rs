//! Turns a list of geographic lines into the road graph. Every coordinate that lands on an
//! existing node or lane becomes a shared junction, so separately drawn roads that meet in reality
//! also meet in the graph.

use anyhow::Result;

use geom::Pt2D;
use simutil::{basename, prettyprint_usize};

use crate::{load_features, LaneID, NetworkConfig, NodeID, RoadFeature, RoadNetwork};

/// Counts what happened while building, for logging and for callers who want to audit their input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub features: usize,
    pub skipped_features: usize,
    /// Coordinates dropped for falling outside the window
    pub clipped_points: usize,
    pub rejected_lanes: usize,
    pub splits: usize,
}

impl RoadNetwork {
    /// Builds the network from features in order. Bad features are logged and skipped; only an
    /// invalid config fails.
    pub fn build(config: &NetworkConfig, features: &[RoadFeature]) -> Result<RoadNetwork> {
        let mut network = RoadNetwork::new(config)?;
        for feature in features {
            network.add_feature(feature);
        }

        let stats = &network.stats;
        info!(
            "Built road network with {} nodes and {} lanes from {} features",
            prettyprint_usize(network.nodes.len()),
            prettyprint_usize(network.lanes.len()),
            prettyprint_usize(stats.features)
        );
        info!(
            "Skipped {} features, clipped {} points, rejected {} lanes, split {} lanes",
            prettyprint_usize(stats.skipped_features),
            prettyprint_usize(stats.clipped_points),
            prettyprint_usize(stats.rejected_lanes),
            prettyprint_usize(stats.splits)
        );
        Ok(network)
    }

    /// Reads a GeoJSON file of lines and builds the network from it.
    pub fn load(config: &NetworkConfig, path: &str) -> Result<RoadNetwork> {
        let features = load_features(path)?;
        info!(
            "Read {} features from {}",
            prettyprint_usize(features.len()),
            basename(path)
        );
        RoadNetwork::build(config, &features)
    }

    /// Adds one feature to the network. Returns false if the whole feature was skipped.
    pub fn add_feature(&mut self, feature: &RoadFeature) -> bool {
        self.stats.features += 1;
        if feature.points.len() < 2 {
            warn!(
                "Skipping feature \"{}\" with {} points",
                feature.name,
                feature.points.len()
            );
            self.stats.skipped_features += 1;
            return false;
        }

        let mut pts: Vec<Pt2D> = Vec::new();
        for gps in &feature.points {
            match self.projection().project(*gps) {
                Some(pt) if self.projection().within_window(pt) => pts.push(pt),
                _ => {
                    self.stats.clipped_points += 1;
                }
            }
        }
        pts.dedup();
        if pts.len() < 2 {
            debug!("Feature \"{}\" is outside the window", feature.name);
            self.stats.skipped_features += 1;
            return false;
        }

        let mut anchor: Option<NodeID> = None;
        let mut pending: Vec<Pt2D> = Vec::new();
        let last_idx = pts.len() - 1;
        for (idx, pt) in pts.into_iter().enumerate() {
            let existing = self.resolve_vertex(pt);
            // Snap onto the node, in case it was only within tolerance
            let pt = existing.map(|n| self.get_n(n).pt).unwrap_or(pt);
            pending.push(pt);

            let src = match anchor {
                Some(src) => src,
                None => {
                    anchor = Some(existing.unwrap_or_else(|| self.admit_node(pt)));
                    continue;
                }
            };
            // Interior points just accumulate, until the line reaches a junction or ends.
            if existing.is_none() && idx != last_idx {
                continue;
            }

            let dst = existing.unwrap_or_else(|| self.admit_node(pt));
            if src == dst {
                warn!(
                    "Rejecting part of \"{}\" that starts and ends at {}",
                    feature.name, src
                );
                self.stats.rejected_lanes += 1;
            } else if let Err(err) = self.create_road(
                src,
                dst,
                &feature.name,
                std::mem::take(&mut pending),
                feature.oneway,
            ) {
                warn!("Rejecting lane of \"{}\": {}", feature.name, err);
                self.stats.rejected_lanes += 1;
            }
            pending = vec![pt];
            anchor = Some(dst);

            if idx == last_idx && existing.is_none() {
                if let Some(ref direction) = feature.direction {
                    self.nodes[dst.0].direction = Some(direction.clone());
                }
            }
        }
        true
    }

    /// If `pt` is already part of the graph, returns the node there, splitting lanes to make one
    /// if needed. Returns None for a brand new position.
    fn resolve_vertex(&mut self, pt: Pt2D) -> Option<NodeID> {
        if let Some(id) = self.node_at(pt) {
            return Some(id);
        }
        // Before splitting anything, look for a node within tolerance on any lane through the
        // point. Splitting first would leave a second junction right beside it.
        if let Some(id) = self.endpoint_near(pt) {
            return Some(id);
        }

        // Overlapping one-way roads can put more than one lane through the same point.
        let mut junction = None;
        while let Some(lane) = self.lane_through(pt, junction) {
            match self.split_lane(lane, pt) {
                Some(n) => {
                    junction = Some(n);
                }
                None => break,
            }
        }
        junction
    }

    /// The first endpoint within `EPSILON_DIST` of `pt`, among lanes containing `pt`.
    fn endpoint_near(&self, pt: Pt2D) -> Option<NodeID> {
        for node in &self.nodes {
            for l in &node.outbound {
                let lane = self.get_l(*l);
                if !lane.contains(pt) {
                    continue;
                }
                for endpoint in [lane.src, lane.dst] {
                    if pt.approx_eq(self.get_n(endpoint).pt) {
                        return Some(endpoint);
                    }
                }
            }
        }
        None
    }

    /// The first lane containing `pt` that doesn't touch `junction`.
    fn lane_through(&self, pt: Pt2D, junction: Option<NodeID>) -> Option<LaneID> {
        for node in &self.nodes {
            for l in &node.outbound {
                let lane = self.get_l(*l);
                if Some(lane.src) == junction || Some(lane.dst) == junction {
                    continue;
                }
                if lane.contains(pt) {
                    return Some(*l);
                }
            }
        }
        None
    }
}
