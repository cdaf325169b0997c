use anyhow::Result;
use serde::{Deserialize, Serialize};

use geom::{GPSBounds, ScreenProjection};

/// Everything needed to set up an empty network: the window features are projected into, and the
/// seed for picking random nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub window_width: f64,
    pub window_height: f64,
    pub gps_bounds: GPSBounds,
    #[serde(default = "default_rng_seed")]
    pub rng_seed: u64,
}

fn default_rng_seed() -> u64 {
    42
}

impl NetworkConfig {
    pub fn new(window_width: f64, window_height: f64, gps_bounds: GPSBounds) -> NetworkConfig {
        NetworkConfig {
            window_width,
            window_height,
            gps_bounds,
            rng_seed: default_rng_seed(),
        }
    }

    pub fn load(path: &str) -> Result<NetworkConfig> {
        simutil::read_json(path)
    }

    pub fn projection(&self) -> Result<ScreenProjection> {
        ScreenProjection::new(
            self.gps_bounds.clone(),
            self.window_width,
            self.window_height,
        )
    }
}
