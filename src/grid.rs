// src/grid.rs

use crate::geometry::Point;

/// Visit counters for every cell of the canvas, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DensityGrid {
    counts: Vec<u64>,
    width: usize,
    height: usize,
}

impl DensityGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            counts: vec![0; width * height],
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index_of(&self, point: Point) -> Option<usize> {
        let x = usize::try_from(point.x).ok()?;
        let y = usize::try_from(point.y).ok()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    /// Counts one visit at `point`. Points off the canvas are dropped; returns
    /// whether the visit was recorded.
    #[inline]
    pub fn increment(&mut self, point: Point) -> bool {
        match self.index_of(point) {
            Some(idx) => {
                self.counts[idx] += 1;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u64> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.counts[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u64]> + '_ {
        // chunks_exact(0) panics, and a zero-width grid has no rows anyway
        self.counts.chunks_exact(self.width.max(1)).take(self.height)
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    pub fn nonzero_cells(&self) -> impl Iterator<Item = (Point, u64)> + '_ {
        let width = self.width.max(1);
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(move |(idx, &count)| (Point::new((idx % width) as i32, (idx / width) as i32), count))
    }
}
