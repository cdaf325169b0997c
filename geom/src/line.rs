use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Distance, Pt2D, EPSILON_DIST};

/// A line segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(Pt2D, Pt2D);

impl Line {
    /// Returns None if the two points are the same.
    pub fn new(pt1: Pt2D, pt2: Pt2D) -> Option<Line> {
        if pt1 == pt2 {
            return None;
        }
        Some(Line(pt1, pt2))
    }

    pub fn pt1(&self) -> Pt2D {
        self.0
    }

    pub fn pt2(&self) -> Pt2D {
        self.1
    }

    pub fn length(&self) -> Distance {
        self.pt1().dist_to(self.pt2())
    }

    /// Fraction along the infinite line through this segment where `pt` projects, clamped to
    /// [0, 1].
    fn percent_of_projection(&self, pt: Pt2D) -> f64 {
        let (ax, ay) = (self.0.x(), self.0.y());
        let (dx, dy) = (self.1.x() - ax, self.1.y() - ay);
        let len_squared = dx * dx + dy * dy;
        let t = ((pt.x() - ax) * dx + (pt.y() - ay) * dy) / len_squared;
        t.clamp(0.0, 1.0)
    }

    fn percent_along(&self, percent: f64) -> Pt2D {
        Pt2D::new(
            self.0.x() + percent * (self.1.x() - self.0.x()),
            self.0.y() + percent * (self.1.y() - self.0.y()),
        )
    }

    /// The point on this segment closest to `pt`. Never extrapolates past the endpoints.
    pub fn project_pt(&self, pt: Pt2D) -> Pt2D {
        let t = self.percent_of_projection(pt);
        if t == 0.0 {
            self.pt1()
        } else if t == 1.0 {
            self.pt2()
        } else {
            self.percent_along(t)
        }
    }

    pub fn dist_to_pt(&self, pt: Pt2D) -> Distance {
        pt.dist_to(self.project_pt(pt))
    }

    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        self.dist_to_pt(pt) <= EPSILON_DIST
    }

    /// The point `dist` along the segment, clamped to the endpoints.
    pub fn dist_along(&self, dist: Distance) -> Pt2D {
        if dist <= Distance::ZERO {
            return self.pt1();
        }
        if dist >= self.length() {
            return self.pt2();
        }
        self.percent_along(dist / self.length())
    }

    /// If `pt` lies on this segment, how far from the start is it?
    pub fn dist_along_of_point(&self, pt: Pt2D) -> Option<Distance> {
        if self.contains_pt(pt) {
            Some(self.pt1().dist_to(self.project_pt(pt)))
        } else {
            None
        }
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Line({} to {})", self.0, self.1)
    }
}
