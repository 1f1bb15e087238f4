//! Closed-form 2D distance checks used by hit-testing.

use glam::Vec2;

/// A position in canvas space.
pub type Point = Vec2;

/// A traced hop between two guide points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: Point,
    pub to: Point,
}

impl Segment {
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// Distance from `p` to the closest point of this segment.
    pub fn distance_to(&self, p: Point) -> f32 {
        distance_to_segment(p, self.from, self.to)
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f32 {
    a.distance(b)
}

/// Distance from `p` to the segment `v`–`w`.
///
/// The projection of `p` onto the line is clamped to the segment, so points
/// beyond either end measure to that endpoint. A degenerate segment
/// (`v == w`) behaves like a single point.
pub fn distance_to_segment(p: Point, v: Point, w: Point) -> f32 {
    let l2 = v.distance_squared(w);
    if l2 == 0.0 {
        return p.distance(v);
    }
    let t = ((p - v).dot(w - v) / l2).clamp(0.0, 1.0);
    let projection = v + (w - v) * t;
    p.distance(projection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(Vec2::new(0.0, 0.0), Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn perpendicular_distance_inside_segment() {
        let d = distance_to_segment(
            Vec2::new(150.0, 50.0),
            Vec2::new(100.0, 100.0),
            Vec2::new(300.0, 100.0),
        );
        assert!((d - 50.0).abs() < 1e-4);
    }

    #[test]
    fn projection_clamps_to_endpoints() {
        let v = Vec2::new(0.0, 0.0);
        let w = Vec2::new(10.0, 0.0);
        // Before the start: measures to v.
        assert!((distance_to_segment(Vec2::new(-3.0, 4.0), v, w) - 5.0).abs() < 1e-4);
        // Past the end: measures to w.
        assert!((distance_to_segment(Vec2::new(13.0, 4.0), v, w) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn degenerate_segment_is_a_point() {
        let p = Vec2::new(4.0, 3.0);
        let v = Vec2::ZERO;
        assert_eq!(distance_to_segment(p, v, v), 5.0);
    }

    #[test]
    fn segment_helpers() {
        let s = Segment::new(Vec2::new(100.0, 50.0), Vec2::new(100.0, 350.0));
        assert_eq!(s.length(), 300.0);
        assert_eq!(s.distance_to(Vec2::new(130.0, 200.0)), 30.0);
    }
}
