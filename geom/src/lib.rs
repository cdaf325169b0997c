//! Planar and geographic primitives for the road network: points, distances, segments,
//! polylines, and the projection from longitude/latitude onto the simulation plane.

#[macro_use]
extern crate anyhow;

mod distance;
mod gps;
mod line;
mod polyline;
mod projection;
mod pt;
mod vector;

pub use crate::distance::Distance;
pub use crate::gps::{GPSBounds, LonLat};
pub use crate::line::Line;
pub use crate::polyline::PolyLine;
pub use crate::projection::ScreenProjection;
pub use crate::pt::{HashablePt2D, Pt2D};
pub use crate::vector::Vector2D;

/// About one hundredth of a plane unit. Two positions closer than this are the same place, and a
/// point this close to a segment lies on it.
pub const EPSILON_DIST: Distance = Distance::const_units(0.01);

/// Reduce the precision of an f64. This helps ensure serialization is idempotent (everything is
/// exactly the same before and after saving/loading), and makes exact position matching survive
/// rounding noise from projection.
pub(crate) fn trim_f64(x: f64) -> f64 {
    (x * 10_000.0).round() / 10_000.0
}
