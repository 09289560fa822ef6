//! Uniform lat/lon raster classifying every cell as land or water.
//!
//! Cell `(x, y)` covers longitudes `[west + x*res, west + (x+1)*res)` and
//! latitudes `[south + y*res, south + (y+1)*res)`; row `0` is the southern
//! edge. Columns wrap around the globe, rows are clamped at the poles.

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::LatLng;

/// Land/water classification of a single raster cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Water,
    Land,
}

/// Integer raster coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// South-west anchor of the raster in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    pub west: f64,
    pub south: f64,
}

/// On-disk raster layout: `grid[y][x]` with `0` = water and `1` = land.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRaster {
    pub grid: Vec<Vec<u8>>,
    pub bounds: GridBounds,
    pub resolution: f64,
}

/// Immutable land/water raster shared read-only by every strategy search.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cells: Vec<CellKind>,
    bounds: GridBounds,
    resolution: f64,
    cols: usize,
    rows: usize,
}

impl SpatialGrid {
    /// Validate and build a grid from a decoded raster.
    pub fn from_raster(raster: GridRaster) -> Result<Self> {
        if !raster.resolution.is_finite() || raster.resolution <= 0.0 {
            return Err(Error::MalformedGrid {
                message: format!(
                    "resolution must be finite and positive, got {}",
                    raster.resolution
                ),
            });
        }
        if !raster.bounds.west.is_finite() || !raster.bounds.south.is_finite() {
            return Err(Error::MalformedGrid {
                message: "bounds must be finite".to_string(),
            });
        }

        let rows = raster.grid.len();
        let cols = raster.grid.first().map(Vec::len).unwrap_or(0);
        if rows == 0 || cols == 0 {
            return Err(Error::MalformedGrid {
                message: "grid must have at least one row and one column".to_string(),
            });
        }
        if i32::try_from(rows).is_err() || i32::try_from(cols).is_err() {
            return Err(Error::MalformedGrid {
                message: format!("grid dimensions {cols}x{rows} are too large"),
            });
        }

        let mut cells = Vec::with_capacity(rows * cols);
        for (y, row) in raster.grid.iter().enumerate() {
            if row.len() != cols {
                return Err(Error::MalformedGrid {
                    message: format!("row {y} has {} columns, expected {cols}", row.len()),
                });
            }
            for (x, value) in row.iter().enumerate() {
                let kind = match value {
                    0 => CellKind::Water,
                    1 => CellKind::Land,
                    other => {
                        return Err(Error::MalformedGrid {
                            message: format!("cell ({x}, {y}) has invalid value {other}"),
                        })
                    }
                };
                cells.push(kind);
            }
        }

        Ok(Self {
            cells,
            bounds: raster.bounds,
            resolution: raster.resolution,
            cols,
            rows,
        })
    }

    /// Load a JSON raster from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    /// Load a JSON raster from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let raster: GridRaster = serde_json::from_reader(reader)?;
        Self::from_raster(raster)
    }

    /// Build a grid from text rows drawn north-up: the first string is the
    /// northernmost row, `#` marks land and any other character water.
    pub fn from_ascii(rows: &[&str], bounds: GridBounds, resolution: f64) -> Result<Self> {
        let grid = rows
            .iter()
            .rev()
            .map(|row| row.chars().map(|c| u8::from(c == '#')).collect())
            .collect();
        Self::from_raster(GridRaster {
            grid,
            bounds,
            resolution,
        })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    pub fn bounds(&self) -> GridBounds {
        self.bounds
    }

    /// Map a coordinate to its (possibly out-of-bounds) cell by floor division.
    pub fn lat_lng_to_grid(&self, point: LatLng) -> GridCell {
        let x = ((point.lng - self.bounds.west) / self.resolution).floor();
        let y = ((point.lat - self.bounds.south) / self.resolution).floor();
        GridCell::new(saturating_i32(x), saturating_i32(y))
    }

    /// Centre of the given cell.
    pub fn grid_to_lat_lng(&self, cell: GridCell) -> LatLng {
        LatLng {
            lat: self.bounds.south + (f64::from(cell.y) + 0.5) * self.resolution,
            lng: self.bounds.west + (f64::from(cell.x) + 0.5) * self.resolution,
        }
    }

    /// Whether the cell lies inside the raster.
    pub fn contains(&self, cell: GridCell) -> bool {
        cell.x >= 0 && cell.y >= 0 && (cell.x as usize) < self.cols && (cell.y as usize) < self.rows
    }

    /// Dense index of an in-bounds cell.
    pub fn index(&self, cell: GridCell) -> Option<usize> {
        self.contains(cell)
            .then(|| cell.y as usize * self.cols + cell.x as usize)
    }

    pub fn kind(&self, cell: GridCell) -> Option<CellKind> {
        self.index(cell).map(|idx| self.cells[idx])
    }

    /// Out-of-bounds cells count as land.
    pub fn is_land(&self, cell: GridCell) -> bool {
        !matches!(self.kind(cell), Some(CellKind::Water))
    }

    pub fn is_water(&self, cell: GridCell) -> bool {
        matches!(self.kind(cell), Some(CellKind::Water))
    }

    /// Up to eight neighbours of `cell`.
    ///
    /// Columns wrap modulo `cols`; rows outside `[0, rows)` are dropped. A
    /// diagonal step is suppressed when both orthogonal cells flanking it are
    /// land, so routes cannot slip through a land corner.
    pub fn neighbours(&self, cell: GridCell) -> Vec<GridCell> {
        let mut out = Vec::with_capacity(8);
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let y = cell.y + dy;
                if y < 0 || y as usize >= self.rows {
                    continue;
                }
                let next = GridCell::new(self.wrap_x(cell.x + dx), y);
                if next == cell || out.contains(&next) {
                    continue;
                }
                if dx != 0 && dy != 0 {
                    let across = GridCell::new(self.wrap_x(cell.x + dx), cell.y);
                    let vertical = GridCell::new(cell.x, y);
                    if self.is_land(across) && self.is_land(vertical) {
                        continue;
                    }
                }
                out.push(next);
            }
        }
        out
    }

    fn wrap_x(&self, x: i32) -> i32 {
        x.rem_euclid(self.cols as i32)
    }
}

fn saturating_i32(value: f64) -> i32 {
    if value.is_nan() {
        i32::MIN
    } else {
        // float-to-int casts saturate
        value as i32
    }
}
