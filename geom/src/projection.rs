use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Distance, GPSBounds, LonLat, Pt2D};

/// Linearly maps a geographic bounding box onto a `width` x `height` window. The northernmost
/// latitude lands at y = 0.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenProjection {
    gps_bounds: GPSBounds,
    width: f64,
    height: f64,
}

impl ScreenProjection {
    pub fn new(gps_bounds: GPSBounds, width: f64, height: f64) -> Result<ScreenProjection> {
        if !(width > 0.0 && height > 0.0) {
            bail!("Window must have positive size, not {} x {}", width, height);
        }
        if !(gps_bounds.width_degrees() > 0.0 && gps_bounds.height_degrees() > 0.0) {
            bail!("GPS bounds {:?} are empty", gps_bounds);
        }
        Ok(ScreenProjection {
            gps_bounds,
            width,
            height,
        })
    }

    pub fn gps_bounds(&self) -> &GPSBounds {
        &self.gps_bounds
    }

    /// Results can be outside the window; check with `within_window`. Returns None for
    /// coordinates so extreme that they don't land on the plane at all.
    pub fn project(&self, gps: LonLat) -> Option<Pt2D> {
        let b = &self.gps_bounds;
        let x = (gps.longitude - b.min_lon) / b.width_degrees() * self.width;
        let y = (b.max_lat - gps.latitude) / b.height_degrees() * self.height;
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        Some(Pt2D::new(x, y))
    }

    /// Strictly inside the window. Points on the border are excluded.
    pub fn within_window(&self, pt: Pt2D) -> bool {
        pt.x() > 0.0 && pt.x() < self.width && pt.y() > 0.0 && pt.y() < self.height
    }

    /// Converts a planar length to meters, using the latitude span of the bounds spread over
    /// `output_width` rendered pixels. Only meant for display.
    pub fn to_real_distance(&self, length: Distance, output_width: f64) -> f64 {
        if output_width <= 0.0 {
            return 0.0;
        }
        length.inner_units() * self.gps_bounds.height_meters() / output_width
    }
}
