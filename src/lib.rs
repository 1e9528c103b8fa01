// src/lib.rs

pub mod config;
pub mod encoder;
pub mod error;
pub mod game;
pub mod generator;
pub mod geometry;
pub mod grid;
pub mod hooks;
pub mod migrator;
pub mod selector;

pub use config::{RunConfig, SelectionPolicy};
pub use encoder::ImageEncoder;
pub use error::{ChaosError, Result};
pub use game::ChaosGame;
pub use generator::PolygonGenerator;
pub use geometry::Point;
pub use grid::DensityGrid;
pub use migrator::PointMigrator;
pub use selector::{SelectionState, VertexSelector};
