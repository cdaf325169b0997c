use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use geom::{Distance, PolyLine, Pt2D};

use crate::{LaneID, NodeID};

/// The name given to lanes created by `RoadNetwork::connect`.
pub const ACCESS_LANE_NAME: &str = "Access";

/// A directed edge from `src` to `dst`, following the road's geometry. Bidirectional roads have a
/// lane in each direction over the same points, and each one knows its partner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lane {
    pub id: LaneID,
    pub name: String,
    pub src: NodeID,
    pub dst: NodeID,
    pub(crate) center_pts: PolyLine,
    pub(crate) reverse: Option<LaneID>,
}

impl Lane {
    /// Fails for a lane from a node to itself, or for fewer than two distinct points.
    pub(crate) fn new(
        id: LaneID,
        name: String,
        src: NodeID,
        dst: NodeID,
        pts: Vec<Pt2D>,
    ) -> Result<Lane> {
        if src == dst {
            bail!("{} ({}) would start and end at {}", id, name, src);
        }
        let center_pts = PolyLine::deduping_new(pts)
            .with_context(|| format!("bad geometry for {} ({})", id, name))?;
        Ok(Lane {
            id,
            name,
            src,
            dst,
            center_pts,
            reverse: None,
        })
    }

    pub fn center_pts(&self) -> &PolyLine {
        &self.center_pts
    }

    pub fn first_pt(&self) -> Pt2D {
        self.center_pts.first_pt()
    }

    pub fn last_pt(&self) -> Pt2D {
        self.center_pts.last_pt()
    }

    pub fn length(&self) -> Distance {
        self.center_pts.length()
    }

    /// True if `pt` lies on any segment of the lane, not just near an endpoint.
    pub fn contains(&self, pt: Pt2D) -> bool {
        self.center_pts.contains_pt(pt)
    }

    /// The closest point on the lane to `pos`, never past either end.
    pub fn find_closest_point(&self, pos: Pt2D) -> Pt2D {
        self.center_pts.project_pt(pos)
    }

    pub fn dist_to(&self, pos: Pt2D) -> Distance {
        self.find_closest_point(pos).dist_to(pos)
    }

    /// The lane running the opposite way over the same geometry, for bidirectional roads.
    pub fn find_contrariwise(&self) -> Option<LaneID> {
        self.reverse
    }

    pub fn is_oneway(&self) -> bool {
        self.reverse.is_none()
    }
}

impl fmt::Display for Lane {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}) from {} to {}", self.id, self.name, self.src, self.dst)
    }
}
