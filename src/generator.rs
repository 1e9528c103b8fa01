// src/generator.rs

use glam::DVec2;

use crate::geometry::{snap_to_grid, Point};
use crate::grid::DensityGrid;

pub struct PolygonGenerator;

impl PolygonGenerator {
    /// Regular `num_vertices`-gon inscribed in the grid, first vertex pointing
    /// up. The centroid, when requested, is appended last. Every vertex is
    /// marked once on `grid`.
    pub fn generate_regular_polygon(
        num_vertices: usize,
        include_centroid: bool,
        grid: &mut DensityGrid,
    ) -> Vec<Point> {
        log::trace!("generate_regular_polygon(n = {num_vertices}, centroid = {include_centroid})");

        let center = Point::new((grid.width() / 2) as i32, (grid.height() / 2) as i32);
        let radius = (grid.width() / 2) as f64;
        let angle_offset = 2.0 * std::f64::consts::PI / num_vertices as f64;

        let mut vertices = Vec::with_capacity(num_vertices + usize::from(include_centroid));
        for i in 0..num_vertices {
            let angle = -std::f64::consts::FRAC_PI_2 + i as f64 * angle_offset;
            let offset = DVec2::new(angle.cos(), angle.sin()) * radius;
            vertices.push(snap_to_grid(center.as_dvec2() + offset));
        }

        if include_centroid {
            vertices.push(center);
        }

        for &vertex in &vertices {
            if !grid.increment(vertex) {
                log::debug!("vertex {vertex} lies outside the grid and is not marked");
            }
        }

        vertices
    }
}
