use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::{Distance, Line, Pt2D};

/// An ordered sequence of at least two points, with no two adjacent points equal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolyLine {
    pts: Vec<Pt2D>,
    length: Distance,
}

impl PolyLine {
    pub fn new(pts: Vec<Pt2D>) -> Result<PolyLine> {
        if pts.len() < 2 {
            bail!("Need at least two points for a PolyLine, got {}", pts.len());
        }
        if let Some(pair) = pts.windows(2).find(|pair| pair[0] == pair[1]) {
            bail!("PolyLine has repeated adjacent point {}", pair[0]);
        }
        let length = pts.windows(2).map(|pair| pair[0].dist_to(pair[1])).sum();
        Ok(PolyLine { pts, length })
    }

    /// Like `new`, but first drops adjacent duplicate points.
    pub fn deduping_new(mut pts: Vec<Pt2D>) -> Result<PolyLine> {
        pts.dedup();
        PolyLine::new(pts)
    }

    pub fn points(&self) -> &Vec<Pt2D> {
        &self.pts
    }

    pub fn length(&self) -> Distance {
        self.length
    }

    pub fn first_pt(&self) -> Pt2D {
        self.pts[0]
    }

    pub fn last_pt(&self) -> Pt2D {
        self.pts[self.pts.len() - 1]
    }

    pub fn lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.pts
            .windows(2)
            .filter_map(|pair| Line::new(pair[0], pair[1]))
    }

    pub fn reversed(&self) -> PolyLine {
        let mut pts = self.pts.clone();
        pts.reverse();
        PolyLine {
            pts,
            length: self.length,
        }
    }

    /// True if `pt` lies on any segment of this polyline, not just near a vertex.
    pub fn contains_pt(&self, pt: Pt2D) -> bool {
        self.lines().any(|l| l.contains_pt(pt))
    }

    /// The closest point to `pt` on any segment. On exact ties, the earliest segment wins.
    pub fn project_pt(&self, pt: Pt2D) -> Pt2D {
        let mut best = self.first_pt();
        let mut best_dist = best.dist_to(pt);
        for l in self.lines() {
            let candidate = l.project_pt(pt);
            let dist = candidate.dist_to(pt);
            if dist < best_dist {
                best = candidate;
                best_dist = dist;
            }
        }
        best
    }

    /// If `pt` lies on this polyline, how far from the start is it?
    pub fn dist_along_of_point(&self, pt: Pt2D) -> Option<Distance> {
        let mut dist_along = Distance::ZERO;
        for l in self.lines() {
            if let Some(dist) = l.dist_along_of_point(pt) {
                return Some(dist_along + dist);
            }
            dist_along += l.length();
        }
        None
    }

    /// The point `dist_along` from the start, clamped to the polyline's endpoints.
    pub fn dist_along(&self, dist_along: Distance) -> Pt2D {
        if dist_along <= Distance::ZERO {
            return self.first_pt();
        }
        let mut dist_left = dist_along;
        for l in self.lines() {
            let length = l.length();
            if dist_left <= length {
                return l.dist_along(dist_left);
            }
            dist_left -= length;
        }
        self.last_pt()
    }

    /// Cuts this polyline in two at `pt`, which must lie on it. Concatenating the two pieces gives
    /// back the original points, with `pt` inserted if it wasn't already a vertex. Returns None if
    /// `pt` isn't on the polyline or is (nearly) one of the endpoints.
    pub fn split_at(&self, pt: Pt2D) -> Option<(PolyLine, PolyLine)> {
        if pt.approx_eq(self.first_pt()) || pt.approx_eq(self.last_pt()) {
            return None;
        }
        let idx = self
            .pts
            .windows(2)
            .position(|pair| Line::new(pair[0], pair[1]).map_or(false, |l| l.contains_pt(pt)))?;

        let mut first = self.pts[..=idx].to_vec();
        first.push(pt);
        let mut second = vec![pt];
        second.extend_from_slice(&self.pts[idx + 1..]);

        let first = PolyLine::deduping_new(first).ok()?;
        let second = PolyLine::deduping_new(second).ok()?;
        Some((first, second))
    }
}

impl fmt::Display for PolyLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "PolyLine::new(vec![")?;
        for pt in &self.pts {
            writeln!(f, "  Pt2D::new({}, {}),", pt.x(), pt.y())?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pl(raw: Vec<(f64, f64)>) -> PolyLine {
        PolyLine::new(raw.into_iter().map(|(x, y)| Pt2D::new(x, y)).collect()).unwrap()
    }

    #[test]
    fn rejects_bad_input() {
        assert!(PolyLine::new(vec![Pt2D::new(1.0, 1.0)]).is_err());
        assert!(PolyLine::new(vec![Pt2D::new(1.0, 1.0), Pt2D::new(1.0, 1.0)]).is_err());
        assert!(PolyLine::deduping_new(vec![
            Pt2D::new(1.0, 1.0),
            Pt2D::new(1.0, 1.0),
            Pt2D::new(2.0, 1.0)
        ])
        .is_ok());
    }

    #[test]
    fn length_and_dist_along() {
        let p = pl(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0)]);
        assert_eq!(p.length(), Distance::units(15.0));
        assert_eq!(p.dist_along(Distance::units(12.0)), Pt2D::new(10.0, 2.0));
        assert_eq!(p.dist_along(Distance::units(100.0)), Pt2D::new(10.0, 5.0));
        assert_eq!(p.dist_along(Distance::units(-1.0)), Pt2D::new(0.0, 0.0));
        assert_eq!(
            p.dist_along_of_point(Pt2D::new(10.0, 3.0)),
            Some(Distance::units(13.0))
        );
        assert_eq!(p.reversed().length(), p.length());
    }

    #[test]
    fn closest_point_never_farther_than_endpoints() {
        let p = pl(vec![(0.0, 0.0), (10.0, 0.0)]);
        for (x, y) in [(-4.0, 3.0), (5.0, 7.0), (13.0, -2.0), (0.0, 0.0), (2.5, -0.1)] {
            let query = Pt2D::new(x, y);
            let closest = p.project_pt(query).dist_to(query);
            assert!(closest <= p.first_pt().dist_to(query));
            assert!(closest <= p.last_pt().dist_to(query));
        }
    }

    #[test]
    fn split_preserves_geometry() {
        let p = pl(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let (a, b) = p.split_at(Pt2D::new(10.0, 4.0)).unwrap();
        assert_eq!(
            a.points(),
            &vec![Pt2D::new(0.0, 0.0), Pt2D::new(10.0, 0.0), Pt2D::new(10.0, 4.0)]
        );
        assert_eq!(b.points(), &vec![Pt2D::new(10.0, 4.0), Pt2D::new(10.0, 10.0)]);
        assert_eq!(a.length() + b.length(), p.length());

        // Splitting at an existing vertex doesn't duplicate it
        let (a, b) = p.split_at(Pt2D::new(10.0, 0.0)).unwrap();
        let mut joined = a.points().clone();
        joined.extend(b.points().iter().skip(1));
        assert_eq!(&joined, p.points());
    }

    #[test]
    fn split_rejects_endpoints_and_off_line() {
        let p = pl(vec![(0.0, 0.0), (10.0, 0.0)]);
        assert!(p.split_at(Pt2D::new(0.0, 0.0)).is_none());
        assert!(p.split_at(Pt2D::new(10.0, 0.005)).is_none());
        assert!(p.split_at(Pt2D::new(5.0, 1.0)).is_none());
    }
}
