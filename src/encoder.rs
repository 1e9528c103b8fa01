// src/encoder.rs

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ChaosError, Result};
use crate::grid::DensityGrid;

/// Maximum sample value written to the header. Red samples are the raw visit
/// counts and are not clipped to it.
pub const MAX_SAMPLE_VALUE: u32 = 255;

const BLUE_DIVISOR: u64 = 12;

/// Color of a cell visited `count` times.
#[inline]
pub fn cell_color(count: u64) -> [u64; 3] {
    [count, 0, count / BLUE_DIVISOR]
}

/// Writes density grids as plain-text PPM (`P3`) rasters.
pub struct ImageEncoder;

impl ImageEncoder {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> Result<BufWriter<File>> {
        let file = File::create(path).map_err(|source| ChaosError::Output {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(BufWriter::new(file))
    }

    pub fn encode<W: Write>(grid: &DensityGrid, out: &mut W) -> Result<()> {
        log::trace!("encode({}x{})", grid.width(), grid.height());

        writeln!(out, "P3")?;
        writeln!(out, "{} {} {}", grid.width(), grid.height(), MAX_SAMPLE_VALUE)?;

        for row in grid.rows() {
            for (x, &count) in row.iter().enumerate() {
                let [r, g, b] = cell_color(count);
                if x > 0 {
                    out.write_all(b" ")?;
                }
                write!(out, "{r} {g} {b}")?;
            }
            out.write_all(b"\n")?;
        }
        out.flush()?;
        Ok(())
    }

    pub fn encode_to_string(grid: &DensityGrid) -> Result<String> {
        let mut buf = Vec::new();
        Self::encode(grid, &mut buf)?;
        // only ASCII digits, spaces and newlines are ever written
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
