use std::collections::HashSet;

use crate::api::config::{CoverageConfig, MAX_STAMP_RADIUS};
use crate::core::catalog::{round_half_up, GlyphRegion};
use crate::core::geometry::Point;

/// A quantized canvas cell.
pub type Cell = (i32, i32);

/// Outcome of stamping one pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageUpdate {
    /// Coverage after the stamp (0.0 - 1.0).
    pub coverage: f32,
    /// True only for the stamp that first brought coverage up to the threshold.
    pub crossed_threshold: bool,
}

/// Approximates how much of a letter has been painted over.
///
/// Pointer samples stamp a disk of cells into `traced`; coverage is the share
/// of `traceable` cells that have been stamped. The threshold fires once per
/// estimator and is not re-armed until a new estimator replaces this one.
#[derive(Debug, Clone)]
pub struct CoverageEstimator {
    traceable: HashSet<Cell>,
    traced: HashSet<Cell>,
    /// |traceable ∩ traced|, kept incrementally.
    hits: usize,
    stamp_radius: i32,
    threshold: f32,
    celebrated: bool,
}

impl CoverageEstimator {
    /// `stamp_radius` is clamped to `0..=MAX_STAMP_RADIUS`.
    pub fn new(traceable: HashSet<Cell>, stamp_radius: i32, threshold: f32) -> Self {
        Self {
            traceable,
            traced: HashSet::new(),
            hits: 0,
            stamp_radius: stamp_radius.clamp(0, MAX_STAMP_RADIUS),
            threshold,
            celebrated: false,
        }
    }

    /// Estimator over the cells of a glyph's bounding region.
    pub fn for_region(region: &GlyphRegion, config: &CoverageConfig) -> Self {
        Self::new(region.cells(), config.stamp_radius, config.threshold)
    }

    /// Stamp a disk around `pos`.
    pub fn stamp(&mut self, pos: Point) -> CoverageUpdate {
        let cx = round_half_up(pos.x);
        let cy = round_half_up(pos.y);
        let r = self.stamp_radius;
        let r2 = r * r;

        for dx in -r..=r {
            for dy in -r..=r {
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let cell = (cx + dx, cy + dy);
                if self.traced.insert(cell) && self.traceable.contains(&cell) {
                    self.hits += 1;
                }
            }
        }

        let coverage = self.coverage();
        let crossed_threshold = !self.celebrated && coverage >= self.threshold;
        if crossed_threshold {
            self.celebrated = true;
        }
        CoverageUpdate {
            coverage,
            crossed_threshold,
        }
    }

    /// Fraction of traceable cells that have been traced, in `[0, 1]`.
    pub fn coverage(&self) -> f32 {
        if self.traceable.is_empty() {
            return 0.0;
        }
        (self.hits as f32 / self.traceable.len() as f32).clamp(0.0, 1.0)
    }

    /// Coverage as a percentage, capped at 100.
    pub fn percentage(&self) -> f32 {
        (self.coverage() * 100.0).min(100.0)
    }

    pub fn has_celebrated(&self) -> bool {
        self.celebrated
    }

    pub fn traceable(&self) -> &HashSet<Cell> {
        &self.traceable
    }

    pub fn traced(&self) -> &HashSet<Cell> {
        &self.traced
    }

    pub fn stamp_radius(&self) -> i32 {
        self.stamp_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// 10×10 block of cells at the origin.
    fn block() -> HashSet<Cell> {
        (0..10).flat_map(|x| (0..10).map(move |y| (x, y))).collect()
    }

    #[test]
    fn stamp_radius_zero_marks_one_cell() {
        let mut est = CoverageEstimator::new(block(), 0, 0.4);
        let update = est.stamp(Vec2::new(3.4, 4.6));
        assert!(est.traced().contains(&(3, 5)));
        assert_eq!(est.traced().len(), 1);
        assert_eq!(update.coverage, 0.01);
    }

    #[test]
    fn disk_stamp_shape() {
        let mut est = CoverageEstimator::new(HashSet::new(), 5, 0.4);
        est.stamp(Vec2::new(50.0, 50.0));
        // Lattice points with dx² + dy² <= 25.
        assert_eq!(est.traced().len(), 81);
        assert!(est.traced().contains(&(55, 50)));
        assert!(est.traced().contains(&(53, 54)));
        assert!(!est.traced().contains(&(54, 54)));
    }

    #[test]
    fn repeated_stamps_do_not_double_count() {
        let mut est = CoverageEstimator::new(block(), 1, 0.4);
        est.stamp(Vec2::new(5.0, 5.0));
        let once = est.coverage();
        est.stamp(Vec2::new(5.0, 5.0));
        assert_eq!(est.coverage(), once);
        assert_eq!(once, 0.05);
    }

    #[test]
    fn stamps_outside_region_do_not_count() {
        let mut est = CoverageEstimator::new(block(), 0, 0.4);
        est.stamp(Vec2::new(50.0, 50.0));
        assert_eq!(est.coverage(), 0.0);
        assert_eq!(est.traced().len(), 1);
    }

    #[test]
    fn threshold_fires_once() {
        let mut est = CoverageEstimator::new(block(), 0, 0.4);
        let mut fired = 0;
        for i in 0..39 {
            let update = est.stamp(Vec2::new((i % 10) as f32, (i / 10) as f32));
            assert!(!update.crossed_threshold);
        }
        assert!((est.coverage() - 0.39).abs() < 1e-6);

        let update = est.stamp(Vec2::new(9.0, 3.0));
        assert!(update.crossed_threshold);
        assert!((update.coverage - 0.40).abs() < 1e-6);
        fired += 1;

        for i in 40..60 {
            if est.stamp(Vec2::new((i % 10) as f32, (i / 10) as f32)).crossed_threshold {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(est.has_celebrated());
    }

    #[test]
    fn full_coverage_caps_at_hundred() {
        let mut est = CoverageEstimator::new(block(), 20, 0.4);
        est.stamp(Vec2::new(5.0, 5.0));
        assert_eq!(est.coverage(), 1.0);
        assert_eq!(est.percentage(), 100.0);
    }

    #[test]
    fn oversized_radius_is_clamped() {
        let mut est = CoverageEstimator::new(block(), 50_000, 0.4);
        assert_eq!(est.stamp_radius(), MAX_STAMP_RADIUS);
        let update = est.stamp(Vec2::new(5.0, 5.0));
        assert_eq!(update.coverage, 1.0);
        assert!(update.crossed_threshold);
    }

    #[test]
    fn empty_region_reports_zero() {
        let mut est = CoverageEstimator::new(HashSet::new(), 5, 0.4);
        let update = est.stamp(Vec2::new(1.0, 1.0));
        assert_eq!(update.coverage, 0.0);
        assert!(!update.crossed_threshold);
    }

    #[test]
    fn region_estimator_uses_config() {
        let region = GlyphRegion {
            x: 5.0,
            baseline: 8.0,
            width: 10.0,
            height: 8.0,
        };
        let est = CoverageEstimator::for_region(&region, &CoverageConfig::default());
        assert_eq!(est.traceable().len(), 100);
        assert_eq!(est.stamp_radius(), 5);
    }
}
