use serde::{Deserialize, Serialize};

use geom::Pt2D;

use crate::{LaneID, NodeID};

/// A vertex of the road graph. Its position never changes once admitted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeID,
    pub pt: Pt2D,
    /// Names a destination this node stands for, like "north exit" or a point of interest.
    pub direction: Option<String>,
    pub(crate) outbound: Vec<LaneID>,
}

impl Node {
    pub(crate) fn new(id: NodeID, pt: Pt2D) -> Node {
        Node {
            id,
            pt,
            direction: None,
            outbound: Vec::new(),
        }
    }

    pub fn position(&self) -> Pt2D {
        self.pt
    }

    /// Lanes starting here, in the order they were attached.
    pub fn outbound_lanes(&self) -> &Vec<LaneID> {
        &self.outbound
    }

    pub fn direction(&self) -> Option<&str> {
        self.direction.as_deref()
    }

    /// Swaps `old` for `new` in place, keeping the outbound order. Returns false if `old` doesn't
    /// start here.
    pub(crate) fn replace_outbound(&mut self, old: LaneID, new: LaneID) -> bool {
        if let Some(slot) = self.outbound.iter_mut().find(|l| **l == old) {
            *slot = new;
            true
        } else {
            false
        }
    }
}
