// src/config.rs

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ChaosError, Result};

/// Upper bound on grid cells; at 8 bytes per counter this caps the grid at 2 GiB.
pub const MAX_GRID_CELLS: usize = 1 << 28;

/// Which constraint the vertex selector applies between consecutive picks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionPolicy {
    Unconstrained,
    NoImmediateRepeat,
    NoNeighborOnRepeat,
}

/// Parameters of a single chaos-game run. Immutable once the run starts.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub polygon_degree: usize,
    /// Percent of the distance travelled toward the chosen vertex. Values
    /// outside [0, 100] extrapolate past the segment.
    pub percent_to_next_point: f64,
    pub grid_width: usize,
    pub grid_height: usize,
    pub allow_same_vertex_in_a_row: bool,
    /// Only meaningful together with `allow_same_vertex_in_a_row`.
    pub no_neighbor_if_repeat: bool,
    pub include_centroid_vertex: bool,
    pub iterations: u64,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            polygon_degree: 4,
            percent_to_next_point: 50.0,
            grid_width: 500,
            grid_height: 500,
            allow_same_vertex_in_a_row: false,
            no_neighbor_if_repeat: false,
            include_centroid_vertex: false,
            iterations: 10_000_000,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ChaosError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ChaosError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rejects configurations that would make the selector loop forever or
    /// divide by a zero modulus.
    pub fn validate(&self) -> Result<()> {
        if self.polygon_degree < 3 {
            return Err(ChaosError::InvalidConfig(format!(
                "polygon degree must be at least 3, got {}",
                self.polygon_degree
            )));
        }
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ChaosError::InvalidConfig(format!(
                "grid must be non-empty, got {}x{}",
                self.grid_width, self.grid_height
            )));
        }
        if self.grid_width > i32::MAX as usize || self.grid_height > i32::MAX as usize {
            return Err(ChaosError::InvalidConfig(
                "grid dimensions must fit in i32 coordinates".to_string(),
            ));
        }
        match self.grid_width.checked_mul(self.grid_height) {
            Some(cells) if cells <= MAX_GRID_CELLS => {}
            _ => {
                return Err(ChaosError::InvalidConfig(format!(
                    "grid of {}x{} exceeds the {MAX_GRID_CELLS}-cell limit",
                    self.grid_width, self.grid_height
                )));
            }
        }
        if !self.percent_to_next_point.is_finite() {
            return Err(ChaosError::InvalidConfig(format!(
                "percent to next point must be finite, got {}",
                self.percent_to_next_point
            )));
        }
        if self.no_neighbor_if_repeat {
            if !self.allow_same_vertex_in_a_row {
                return Err(ChaosError::InvalidConfig(
                    "no-neighbor-if-repeat requires allow-same-vertex-in-a-row".to_string(),
                ));
            }
            if self.polygon_degree < 4 {
                return Err(ChaosError::InvalidConfig(format!(
                    "no-neighbor-if-repeat needs a polygon degree of at least 4, got {}",
                    self.polygon_degree
                )));
            }
            if self.include_centroid_vertex {
                log::warn!("centroid vertex combined with no-neighbor-if-repeat; the centroid is ignored by neighbor avoidance");
            }
        }
        Ok(())
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        if self.no_neighbor_if_repeat {
            SelectionPolicy::NoNeighborOnRepeat
        } else if !self.allow_same_vertex_in_a_row {
            SelectionPolicy::NoImmediateRepeat
        } else {
            SelectionPolicy::Unconstrained
        }
    }

    /// Output name encoding the run parameters, e.g. `4_50%500X500_xSV_xNR_xC.ppm`.
    pub fn file_name(&self) -> String {
        format!(
            "{}_{}%{}X{}_{}_{}_{}.ppm",
            self.polygon_degree,
            self.percent_to_next_point.trunc() as i64,
            self.grid_width,
            self.grid_height,
            if self.allow_same_vertex_in_a_row { "SV" } else { "xSV" },
            if self.no_neighbor_if_repeat { "NR" } else { "xNR" },
            if self.include_centroid_vertex { "C" } else { "xC" },
        )
    }

    pub fn output_path(&self, dir: &Path) -> PathBuf {
        dir.join(self.file_name())
    }
}
