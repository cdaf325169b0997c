use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D};

/// A displacement on the simulation plane.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vector2D {
    dx: f64,
    dy: f64,
}

impl Vector2D {
    pub const ZERO: Vector2D = Vector2D { dx: 0.0, dy: 0.0 };

    pub fn new(dx: f64, dy: f64) -> Vector2D {
        Vector2D { dx, dy }
    }

    /// The displacement that moves `from` onto `to`.
    pub fn between(from: Pt2D, to: Pt2D) -> Vector2D {
        Vector2D::new(to.x() - from.x(), to.y() - from.y())
    }

    pub fn dx(self) -> f64 {
        self.dx
    }

    pub fn dy(self) -> f64 {
        self.dy
    }

    pub fn magnitude(self) -> Distance {
        Distance::units((self.dx.powi(2) + self.dy.powi(2)).sqrt())
    }
}

impl fmt::Display for Vector2D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Vector2D({0}, {1})", self.dx, self.dy)
    }
}
