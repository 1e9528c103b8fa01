// src/game.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::RunConfig;
use crate::error::Result;
use crate::generator::PolygonGenerator;
use crate::geometry::Point;
use crate::grid::DensityGrid;
use crate::migrator::PointMigrator;
use crate::selector::VertexSelector;

/// One chaos-game run: the polygon, the selector state and the density grid
/// it fills. Nothing outlives the run.
pub struct ChaosGame<R: Rng = StdRng> {
    config: RunConfig,
    rng: R,
    grid: DensityGrid,
    vertices: Vec<Point>,
    selector: VertexSelector,
}

impl ChaosGame<StdRng> {
    /// Seeds from `config.seed`, or from the OS when none is given.
    pub fn new(config: RunConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> ChaosGame<R> {
    pub fn with_rng(config: RunConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let mut grid = DensityGrid::new(config.grid_width, config.grid_height);
        let vertices = PolygonGenerator::generate_regular_polygon(
            config.polygon_degree,
            config.include_centroid_vertex,
            &mut grid,
        );
        let selector = VertexSelector::new(config.selection_policy(), config.polygon_degree, vertices.len())?;

        Ok(Self {
            config,
            rng,
            grid,
            vertices,
            selector,
        })
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Plays every configured iteration and returns the finished grid.
    pub fn run(mut self) -> DensityGrid {
        self.iterate();
        self.grid
    }

    fn iterate(&mut self) {
        let iterations = self.config.iterations;
        if iterations == 0 {
            return;
        }
        log::trace!("iterate({iterations})");
        self.selector.reset();

        let mut point = Point::new(
            self.rng.gen_range(0..self.config.grid_width as i32),
            self.rng.gen_range(0..self.config.grid_height as i32),
        );
        self.grid.increment(point);

        let progress_step = (iterations / 100).max(1);
        let mut dropped = 0u64;
        for i in 0..iterations {
            if i % progress_step == 0 {
                log::debug!("{}% done", i * 100 / iterations);
            }
            let vertex = self.vertices[self.selector.next(&mut self.rng)];
            point = PointMigrator::migrate(point, vertex, self.config.percent_to_next_point);
            if !self.grid.increment(point) {
                dropped += 1;
            }
        }

        if dropped > 0 {
            log::debug!("{dropped} of {iterations} points fell outside the grid");
        }
    }
}
