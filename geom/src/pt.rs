use std::fmt;

use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::{trim_f64, Distance, Vector2D, EPSILON_DIST};

/// A position on the simulation plane. X grows to the east, Y grows to the south (screen order).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pt2D {
    x: f64,
    y: f64,
}

impl Pt2D {
    pub fn new(x: f64, y: f64) -> Pt2D {
        if !x.is_finite() || !y.is_finite() {
            panic!("Bad Pt2D {}, {}", x, y);
        }

        Pt2D {
            x: trim_f64(x),
            y: trim_f64(y),
        }
    }

    pub fn x(self) -> f64 {
        self.x
    }

    pub fn y(self) -> f64 {
        self.y
    }

    pub fn dist_to(self, to: Pt2D) -> Distance {
        Distance::units(((self.x - to.x).powi(2) + (self.y - to.y).powi(2)).sqrt())
    }

    /// True if the two points are within `EPSILON_DIST` of each other.
    pub fn approx_eq(self, other: Pt2D) -> bool {
        self.dist_to(other) <= EPSILON_DIST
    }

    pub fn offset(self, v: Vector2D) -> Pt2D {
        Pt2D::new(self.x + v.dx(), self.y + v.dy())
    }

    pub fn to_hashable(self) -> HashablePt2D {
        HashablePt2D {
            x_nan: NotNan::new(self.x).unwrap(),
            y_nan: NotNan::new(self.y).unwrap(),
        }
    }
}

impl fmt::Display for Pt2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt2D({0}, {1})", self.x, self.y)
    }
}

/// Exact-match key for a `Pt2D`. Since `Pt2D` trims its precision on construction, two points
/// that round to the same position hash identically.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct HashablePt2D {
    x_nan: NotNan<f64>,
    y_nan: NotNan<f64>,
}

impl From<Pt2D> for HashablePt2D {
    fn from(pt: Pt2D) -> Self {
        pt.to_hashable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_noise_hashes_the_same() {
        let a = Pt2D::new(10.123_456_7, 5.0);
        let b = Pt2D::new(10.123_456_71, 5.000_000_001);
        assert_eq!(a, b);
        assert_eq!(a.to_hashable(), b.to_hashable());
    }

    #[test]
    fn dist_to() {
        let d = Pt2D::new(0.0, 0.0).dist_to(Pt2D::new(3.0, 4.0));
        assert_eq!(d, Distance::units(5.0));
    }
}
