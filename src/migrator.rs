// src/migrator.rs

use crate::geometry::{snap_to_grid, to_continuous, Point};

pub struct PointMigrator;

impl PointMigrator {
    /// Moves `percent` percent of the way from `from` toward `target`. No
    /// clamping: percentages outside [0, 100] extrapolate past either end.
    #[inline]
    pub fn migrate(from: Point, target: Point, percent: f64) -> Point {
        let start = to_continuous(from);
        let end = to_continuous(target);
        snap_to_grid(start + (end - start) * (percent / 100.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn halfway_rounds_each_axis() {
        assert_eq!(PointMigrator::migrate(Point::new(0, 0), Point::new(10, 5), 50.0), Point::new(5, 3));
        assert_eq!(PointMigrator::migrate(Point::new(0, 0), Point::new(-5, 10), 50.0), Point::new(-3, 5));
    }

    #[test]
    fn endpoints() {
        let a = Point::new(7, 42);
        let b = Point::new(120, 3);
        assert_eq!(PointMigrator::migrate(a, b, 0.0), a);
        assert_eq!(PointMigrator::migrate(a, b, 100.0), b);
    }

    #[test]
    fn extrapolates_outside_the_segment() {
        let a = Point::new(10, 10);
        let b = Point::new(20, 10);
        assert_eq!(PointMigrator::migrate(a, b, 150.0), Point::new(25, 10));
        assert_eq!(PointMigrator::migrate(a, b, -100.0), Point::new(0, 10));
    }
}
