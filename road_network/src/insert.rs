//! Grafting new points onto an existing network, by splitting lanes.

use anyhow::Result;

use geom::Pt2D;

use crate::{Lane, LaneID, NodeID, RoadNetwork, ACCESS_LANE_NAME};

impl RoadNetwork {
    /// Splits a lane at `pt`, which must lie on it, introducing a junction node there. The lane is
    /// retired and replaced by two new lanes that keep its slot in the source node's outbound
    /// order. If the lane has a reverse partner, that's split at the same point, and the new
    /// pieces are paired up with each other.
    ///
    /// Returns None and changes nothing if `pt` isn't on the lane or is one of its endpoints.
    pub fn split_lane(&mut self, id: LaneID, pt: Pt2D) -> Option<NodeID> {
        let lane = self.maybe_get_l(id)?;
        let (first_pts, second_pts) = lane.center_pts.split_at(pt)?;
        let (src, dst, name, reverse) = (lane.src, lane.dst, lane.name.clone(), lane.reverse);
        if let Some(existing) = self.node_at(pt) {
            if existing == src || existing == dst {
                return None;
            }
        }

        let junction = self.admit_node(pt);
        let first_id = self.next_lane_id();
        let second_id = self.next_lane_id();
        let mut first = Lane {
            id: first_id,
            name: name.clone(),
            src,
            dst: junction,
            center_pts: first_pts.clone(),
            reverse: None,
        };
        let mut second = Lane {
            id: second_id,
            name: name.clone(),
            src: junction,
            dst,
            center_pts: second_pts.clone(),
            reverse: None,
        };

        self.lanes.remove(&id);
        self.nodes[src.0].replace_outbound(id, first_id);
        self.nodes[junction.0].outbound.push(second_id);

        if let Some(back_id) = reverse {
            // The reverse lane runs over the same points backwards, so its pieces are the forward
            // pieces reversed, in the opposite order.
            let back_first_id = self.next_lane_id();
            let back_second_id = self.next_lane_id();
            let back_first = Lane {
                id: back_first_id,
                name: name.clone(),
                src: dst,
                dst: junction,
                center_pts: second_pts.reversed(),
                reverse: Some(second_id),
            };
            let back_second = Lane {
                id: back_second_id,
                name,
                src: junction,
                dst: src,
                center_pts: first_pts.reversed(),
                reverse: Some(first_id),
            };
            first.reverse = Some(back_second_id);
            second.reverse = Some(back_first_id);

            self.lanes.remove(&back_id);
            self.nodes[dst.0].replace_outbound(back_id, back_first_id);
            self.nodes[junction.0].outbound.push(back_second_id);
            self.lanes.insert(back_first_id, back_first);
            self.lanes.insert(back_second_id, back_second);
        }

        self.lanes.insert(first_id, first);
        self.lanes.insert(second_id, second);
        self.stats.splits += 1;
        debug!("Split {} at {}, making {}", id, pt, junction);
        Some(junction)
    }

    /// Grafts an arbitrary position onto the network: finds the closest lane, splits it at the
    /// closest point, and links the new node to that junction with a two-way "Access" road. Returns
    /// the node at `pos`.
    ///
    /// A position that's already a node just returns that node. A position lying on the closest
    /// lane becomes the junction itself. Only fails if there are no lanes to connect to.
    pub fn connect(&mut self, pos: Pt2D, direction: Option<String>) -> Result<NodeID> {
        if let Some(existing) = self.node_at(pos) {
            self.tag_direction(existing, direction);
            return Ok(existing);
        }

        let lane = match self.find_closest_lane(pos) {
            Some(l) => l,
            None => bail!("Can't connect {}; the network has no lanes", pos),
        };
        let (closest, src, dst) = {
            let l = self.get_l(lane);
            (l.find_closest_point(pos), l.src, l.dst)
        };

        let junction = if closest.approx_eq(self.get_n(src).pt) {
            src
        } else if closest.approx_eq(self.get_n(dst).pt) {
            dst
        } else {
            match self.split_lane(lane, closest) {
                Some(n) => n,
                None => bail!("Couldn't split {} at {} to connect {}", lane, closest, pos),
            }
        };

        let junction_pt = self.get_n(junction).pt;
        if pos.approx_eq(junction_pt) {
            self.tag_direction(junction, direction);
            return Ok(junction);
        }

        let node = self.admit_node(pos);
        self.create_road(node, junction, ACCESS_LANE_NAME, vec![pos, junction_pt], false)?;
        self.tag_direction(node, direction);
        debug!("Connected {} at {} to {}", node, pos, junction);
        Ok(node)
    }

    /// Never overwrites an existing tag.
    fn tag_direction(&mut self, id: NodeID, direction: Option<String>) {
        let node = &mut self.nodes[id.0];
        if node.direction.is_none() {
            node.direction = direction;
        }
    }
}

#[cfg(test)]
mod tests {
    use geom::{Distance, GPSBounds, LonLat};

    use crate::NetworkConfig;

    use super::*;

    fn network() -> (RoadNetwork, NodeID, NodeID, LaneID) {
        let bounds = GPSBounds::from(&[LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)]);
        let mut net = RoadNetwork::new(&NetworkConfig::new(100.0, 100.0, bounds)).unwrap();
        let a = net.admit_node(Pt2D::new(10.0, 10.0));
        let b = net.admit_node(Pt2D::new(50.0, 50.0));
        let pts = vec![Pt2D::new(10.0, 10.0), Pt2D::new(50.0, 10.0), Pt2D::new(50.0, 50.0)];
        let lane = net.create_road(a, b, "Main", pts, false).unwrap();
        (net, a, b, lane)
    }

    #[test]
    fn split_replaces_both_directions() {
        let (mut net, a, b, lane) = network();
        let back = net.get_l(lane).find_contrariwise().unwrap();
        let p = Pt2D::new(50.0, 30.0);

        let junction = net.split_lane(lane, p).unwrap();
        assert_eq!(net.get_n(junction).pt, p);
        assert!(net.maybe_get_l(lane).is_none());
        assert!(net.maybe_get_l(back).is_none());
        assert_eq!(net.num_lanes(), 4);

        let first = net.get_l(net.get_n(a).outbound_lanes()[0]);
        assert_eq!((first.src, first.dst), (a, junction));
        assert_eq!(first.length(), Distance::units(60.0));
        let back_first = net.get_l(net.get_n(b).outbound_lanes()[0]);
        assert_eq!((back_first.src, back_first.dst), (b, junction));

        for l in net.get_n(junction).outbound_lanes() {
            let l = net.get_l(*l);
            let partner = net.get_l(l.find_contrariwise().unwrap());
            assert_eq!(partner.find_contrariwise(), Some(l.id));
            assert_eq!((partner.src, partner.dst), (l.dst, l.src));
            assert_eq!(partner.center_pts(), &l.center_pts().reversed());
        }
        assert_eq!(net.build_stats().splits, 1);
    }

    #[test]
    fn invalid_splits_are_noops() {
        let (mut net, _, _, lane) = network();
        assert_eq!(net.split_lane(lane, Pt2D::new(30.0, 30.0)), None);
        assert_eq!(net.split_lane(lane, Pt2D::new(10.0, 10.0)), None);
        assert_eq!(net.split_lane(LaneID(99), Pt2D::new(50.0, 30.0)), None);
        assert_eq!(net.num_lanes(), 2);
        assert_eq!(net.all_nodes().len(), 2);
    }

    #[test]
    fn connect_makes_access_road() {
        let (mut net, _, _, _) = network();
        let poi = net
            .connect(Pt2D::new(30.0, 20.0), Some("cafe".to_string()))
            .unwrap();
        let junction = net.node_at(Pt2D::new(30.0, 10.0)).unwrap();
        assert_eq!(net.find_direction("cafe"), Some(poi));

        let access = net.get_l(net.get_n(poi).outbound_lanes()[0]);
        assert_eq!(access.name, ACCESS_LANE_NAME);
        assert_eq!(access.dst, junction);
        assert!(access.find_contrariwise().is_some());
        // 2 halves each way, plus access each way
        assert_eq!(net.num_lanes(), 6);

        // Connecting the same spot again is idempotent
        assert_eq!(net.connect(Pt2D::new(30.0, 20.0), None).unwrap(), poi);
    }

    #[test]
    fn connect_near_endpoint_reuses_node() {
        let (mut net, a, _, _) = network();
        let poi = net.connect(Pt2D::new(5.0, 5.0), None).unwrap();
        let access = net.get_l(net.get_n(poi).outbound_lanes()[0]);
        assert_eq!(access.dst, a);
        assert_eq!(net.build_stats().splits, 0);
    }

    #[test]
    fn connect_on_lane_is_the_junction() {
        let (mut net, _, _, _) = network();
        let n = net.connect(Pt2D::new(20.0, 10.0), None).unwrap();
        assert_eq!(net.get_n(n).pt, Pt2D::new(20.0, 10.0));
        assert_eq!(net.num_lanes(), 4);
    }

    #[test]
    fn connect_needs_lanes() {
        let bounds = GPSBounds::from(&[LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)]);
        let mut net = RoadNetwork::new(&NetworkConfig::new(100.0, 100.0, bounds)).unwrap();
        assert!(net.connect(Pt2D::new(1.0, 1.0), None).is_err());
    }
}
