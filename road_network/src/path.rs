use std::collections::VecDeque;

use geom::{Distance, PolyLine, Pt2D, Vector2D};

use crate::{pathfind, LaneID, NodeID, RoadNetwork};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathState {
    /// No route
    Empty,
    /// A search is running
    Routing,
    /// Moving along a non-empty route
    Following,
    /// Reached the end of the route. Only `reset` leaves this state.
    Arrived,
}

/// One lane of a route, with its geometry copied out of the network when the route was found.
#[derive(Clone, Debug)]
struct PathStep {
    lane: LaneID,
    dst: NodeID,
    pts: PolyLine,
}

/// One agent's route and how far along it they are. A route is consumed lane by lane and never
/// reused; `reset` before heading somewhere else.
#[derive(Clone, Debug)]
pub struct Path {
    state: PathState,
    lanes: Vec<LaneID>,
    steps: VecDeque<PathStep>,
    /// Along the first step
    dist_along: Distance,
    current_node: Option<NodeID>,
    destination: Option<NodeID>,
    total_distance: Distance,
    traveled: Distance,
}

impl Path {
    pub fn new() -> Path {
        Path {
            state: PathState::Empty,
            lanes: Vec::new(),
            steps: VecDeque::new(),
            dist_along: Distance::ZERO,
            current_node: None,
            destination: None,
            total_distance: Distance::ZERO,
            traveled: Distance::ZERO,
        }
    }

    /// Forgets any route, from any state.
    pub fn reset(&mut self) {
        *self = Path::new();
    }

    /// Searches for the shortest route and starts following it, returning its lanes. If `to` is
    /// unreachable, returns None and leaves the path empty, so the caller can pick a fallback. Any
    /// previous route is dropped first.
    pub fn find_path(
        &mut self,
        network: &RoadNetwork,
        from: NodeID,
        to: NodeID,
    ) -> Option<Vec<LaneID>> {
        if self.state != PathState::Empty {
            debug!("Dropping the old route to {:?} before routing again", self.destination);
            self.reset();
        }
        self.state = PathState::Routing;

        let route = match pathfind(network, from, to) {
            Some(route) => route,
            None => {
                debug!("No path from {} to {}", from, to);
                self.state = PathState::Empty;
                return None;
            }
        };

        self.steps = route
            .lanes
            .iter()
            .map(|l| {
                let lane = network.get_l(*l);
                PathStep {
                    lane: *l,
                    dst: lane.dst,
                    pts: lane.center_pts().clone(),
                }
            })
            .collect();
        self.lanes = route.lanes.clone();
        self.total_distance = route.cost;
        self.current_node = Some(from);
        self.destination = Some(to);
        self.state = if self.steps.is_empty() {
            PathState::Arrived
        } else {
            PathState::Following
        };
        Some(route.lanes)
    }

    pub fn state(&self) -> PathState {
        self.state
    }

    /// True while there's some route left to follow.
    pub fn available(&self) -> bool {
        self.state == PathState::Following && !self.steps.is_empty()
    }

    pub fn has_arrived(&self) -> bool {
        self.state == PathState::Arrived
    }

    /// The node at, or most recently passed, the current position.
    pub fn in_node(&self) -> Option<NodeID> {
        self.current_node
    }

    pub fn destination(&self) -> Option<NodeID> {
        self.destination
    }

    pub fn current_lane(&self) -> Option<LaneID> {
        self.steps.front().map(|step| step.lane)
    }

    /// Every lane of the route, including ones already passed.
    pub fn lanes(&self) -> &Vec<LaneID> {
        &self.lanes
    }

    pub fn total_distance(&self) -> Distance {
        self.total_distance
    }

    pub fn remaining_distance(&self) -> Distance {
        self.total_distance - self.traveled
    }

    /// Where the route says the agent is now.
    pub fn position(&self) -> Option<Pt2D> {
        if let Some(step) = self.steps.front() {
            return Some(step.pts.dist_along(self.dist_along));
        }
        None
    }

    /// Moves up to `step` along the route, carrying over into as many following lanes as needed.
    /// Returns the displacement from `current_position` to the new spot on the route. When
    /// `current_position` is where the previous call left the agent, the displacement is never
    /// longer than `step`. Once the route is used up, returns zero.
    pub fn advance(&mut self, current_position: Pt2D, step: Distance) -> Vector2D {
        if !self.available() || step <= Distance::ZERO {
            return Vector2D::ZERO;
        }

        let mut left = step;
        let mut target = current_position;
        while let Some(front) = self.steps.front() {
            let remaining_on_lane = front.pts.length() - self.dist_along;
            if left < remaining_on_lane {
                self.dist_along += left;
                self.traveled += left;
                target = front.pts.dist_along(self.dist_along);
                break;
            }

            left -= remaining_on_lane;
            self.traveled += remaining_on_lane;
            target = front.pts.last_pt();
            self.current_node = Some(front.dst);
            self.dist_along = Distance::ZERO;
            self.steps.pop_front();
            if left == Distance::ZERO {
                break;
            }
        }

        if self.steps.is_empty() {
            self.state = PathState::Arrived;
            self.traveled = self.total_distance;
        }
        Vector2D::between(current_position, target)
    }
}

impl Default for Path {
    fn default() -> Path {
        Path::new()
    }
}

#[cfg(test)]
mod tests {
    use geom::{GPSBounds, LonLat};

    use crate::NetworkConfig;

    use super::*;

    // a -> b -> c, an L shape with 30 + 40 length, plus an isolated node
    fn network() -> (RoadNetwork, NodeID, NodeID, NodeID, NodeID) {
        let bounds = GPSBounds::from(&[LonLat::new(0.0, 0.0), LonLat::new(1.0, 1.0)]);
        let mut net = RoadNetwork::new(&NetworkConfig::new(100.0, 100.0, bounds)).unwrap();
        let a = net.admit_node(Pt2D::new(10.0, 10.0));
        let b = net.admit_node(Pt2D::new(40.0, 10.0));
        let c = net.admit_node(Pt2D::new(40.0, 50.0));
        let lonely = net.admit_node(Pt2D::new(90.0, 90.0));
        net.create_road(a, b, "ab", vec![Pt2D::new(10.0, 10.0), Pt2D::new(40.0, 10.0)], true)
            .unwrap();
        net.create_road(b, c, "bc", vec![Pt2D::new(40.0, 10.0), Pt2D::new(40.0, 50.0)], true)
            .unwrap();
        (net, a, b, c, lonely)
    }

    #[test]
    fn state_machine() {
        let (net, a, _, c, lonely) = network();
        let mut path = Path::new();
        assert_eq!(path.state(), PathState::Empty);
        assert!(!path.available());

        assert_eq!(path.find_path(&net, a, lonely), None);
        assert_eq!(path.state(), PathState::Empty);

        assert_eq!(path.find_path(&net, a, c).unwrap().len(), 2);
        assert_eq!(path.state(), PathState::Following);
        assert!(path.available());
        assert_eq!(path.in_node(), Some(a));
        assert_eq!(path.total_distance(), Distance::units(70.0));

        path.reset();
        assert_eq!(path.state(), PathState::Empty);
        assert_eq!(path.in_node(), None);

        path.find_path(&net, c, c).unwrap();
        assert!(path.has_arrived());
        assert_eq!(path.advance(Pt2D::new(40.0, 50.0), Distance::units(5.0)), Vector2D::ZERO);
    }

    #[test]
    fn movement_carries_over_lanes() {
        let (net, a, b, c, _) = network();
        let mut path = Path::new();
        path.find_path(&net, a, c).unwrap();

        let mut pos = net.get_n(a).pt;
        let v = path.advance(pos, Distance::units(20.0));
        assert_eq!(v, Vector2D::new(20.0, 0.0));
        pos = pos.offset(v);
        assert_eq!(path.in_node(), Some(a));

        // 10 to finish the first lane, 15 into the second
        let v = path.advance(pos, Distance::units(25.0));
        pos = pos.offset(v);
        assert_eq!(pos, Pt2D::new(40.0, 25.0));
        assert!(v.magnitude() <= Distance::units(25.0));
        assert_eq!(path.in_node(), Some(b));
        assert_eq!(path.remaining_distance(), Distance::units(25.0));
        assert!(!path.has_arrived());

        let v = path.advance(pos, Distance::units(100.0));
        pos = pos.offset(v);
        assert_eq!(pos, Pt2D::new(40.0, 50.0));
        assert!(path.has_arrived());
        assert_eq!(path.in_node(), Some(c));
        assert_eq!(path.remaining_distance(), Distance::ZERO);
        assert_eq!(path.advance(pos, Distance::units(1.0)), Vector2D::ZERO);
    }

    #[test]
    fn arrives_exactly_at_the_end() {
        let (net, a, _, c, _) = network();
        let mut path = Path::new();
        path.find_path(&net, a, c).unwrap();
        let mut pos = net.get_n(a).pt;
        for _ in 0..6 {
            pos = pos.offset(path.advance(pos, Distance::units(10.0)));
            assert!(!path.has_arrived());
        }
        pos = pos.offset(path.advance(pos, Distance::units(10.0)));
        assert!(path.has_arrived());
        assert_eq!(pos, net.get_n(c).pt);
    }

    #[test]
    fn route_survives_later_splits() {
        let (mut net, a, _, c, _) = network();
        let mut path = Path::new();
        let lanes = path.find_path(&net, a, c).unwrap();
        net.split_lane(lanes[1], Pt2D::new(40.0, 30.0)).unwrap();
        assert!(net.maybe_get_l(lanes[1]).is_none());

        let mut pos = net.get_n(a).pt;
        pos = pos.offset(path.advance(pos, Distance::units(50.0)));
        assert_eq!(pos, Pt2D::new(40.0, 30.0));
        assert_eq!(path.current_lane(), Some(lanes[1]));
    }
}
