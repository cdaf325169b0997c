//! A directed road graph built from geographic polylines. Nodes are junctions and line endpoints;
//! lanes are directed edges carrying the road geometry between them. The network can graft new
//! points onto itself by splitting the closest lane, and answers nearest-lane queries and
//! shortest-path requests for agents moving over it.
//!
//! Mutation (`build`, `split_lane`, `connect`) needs `&mut RoadNetwork`, so the borrow checker
//! keeps it from racing with readers. A `Path` copies the geometry of its route when it's found,
//! so later splits never disturb an agent that's already moving.

#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod config;
mod input;
mod insert;
mod make;
mod network;
mod objects;
mod path;
mod pathfind;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crate::config::NetworkConfig;
pub use crate::input::{load_features, parse_features, RoadFeature};
pub use crate::make::BuildStats;
pub use crate::network::RoadNetwork;
pub use crate::objects::lane::{Lane, ACCESS_LANE_NAME};
pub use crate::objects::node::Node;
pub use crate::path::{Path, PathState};
pub use crate::pathfind::{pathfind, Route};

/// Assigned in admission order, starting from 0. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeID(pub usize);

impl fmt::Display for NodeID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Node #{}", self.0)
    }
}

/// Assigned in creation order. A lane that gets split is retired and its ID is never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LaneID(pub usize);

impl fmt::Display for LaneID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Lane #{}", self.0)
    }
}
