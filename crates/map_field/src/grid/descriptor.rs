//! Grid geometry shared by raster grids and fields.
//!
//! This module defines [`GridDescriptor`], the parsed header of a grid payload:
//! dimensions, lower-left corner, cell size, and the nodata sentinel. All
//! geographic/index conversions live here so every consumer agrees on the same
//! cell-center convention: index 0 addresses the center of the first cell, and
//! row 0 is the northernmost row.
use glam::DVec2;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Geometry and sentinel of a regular lon/lat grid.
///
/// Created once at parse time and shared by both component grids of a field;
/// never mutated afterwards.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct GridDescriptor {
    /// Number of columns (west to east).
    pub ncols: usize,
    /// Number of rows (north to south).
    pub nrows: usize,
    /// Longitude of the lower-left corner, in degrees.
    pub xllcorner: f64,
    /// Latitude of the lower-left corner, in degrees.
    pub yllcorner: f64,
    /// Cell size in degrees, uniform in both axes.
    pub cellsize: f64,
    /// Sentinel marking cells without a valid sample.
    pub nodata_value: f64,
}

impl GridDescriptor {
    /// Number of cells in the grid.
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    /// Returns `true` if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Latitude of the northern edge.
    pub fn top(&self) -> f64 {
        self.yllcorner + self.nrows as f64 * self.cellsize
    }

    /// Longitude of the eastern edge.
    pub fn right(&self) -> f64 {
        self.xllcorner + self.ncols as f64 * self.cellsize
    }

    /// Returns `true` if the position falls within the grid extent, edges included.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.xllcorner && lon <= self.right() && lat >= self.yllcorner && lat <= self.top()
    }

    /// Returns `true` if the value is the nodata sentinel.
    pub fn is_nodata(&self, value: f64) -> bool {
        value == self.nodata_value || (value.is_nan() && self.nodata_value.is_nan())
    }

    /// Geographic center of the cell at (row, col).
    pub fn cell_center(&self, row: usize, col: usize) -> DVec2 {
        DVec2::new(
            self.xllcorner + (col as f64 + 0.5) * self.cellsize,
            self.top() - (row as f64 + 0.5) * self.cellsize,
        )
    }

    /// Fractional (row, col) coordinates of a position.
    ///
    /// Follows the cell-center convention: a position exactly on the center of
    /// cell (i, j) maps to (i, j); halfway between two centers maps to the
    /// half-integer in between. Increasing latitude maps to decreasing row.
    pub fn fractional_indexes(&self, lon: f64, lat: f64) -> (f64, f64) {
        let col = (lon - self.xllcorner) / self.cellsize - 0.5;
        let row = (self.top() - lat) / self.cellsize - 0.5;
        (row, col)
    }

    /// Indexes of the cell whose footprint encloses the position, or `None`
    /// outside the extent. Positions on the far east/south edges belong to the
    /// last cell of their row/column.
    pub fn enclosing_cell(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        if self.is_empty() || !self.contains(lon, lat) {
            return None;
        }
        let col = ((lon - self.xllcorner) / self.cellsize).floor();
        let row = ((self.top() - lat) / self.cellsize).floor();
        let col = (col.max(0.0) as usize).min(self.ncols - 1);
        let row = (row.max(0.0) as usize).min(self.nrows - 1);
        Some((row, col))
    }

    /// Returns `true` if both descriptors cover the same cells: identical
    /// dimensions, origin, and cell size. Sentinels may differ per component.
    pub fn same_geometry(&self, other: &GridDescriptor) -> bool {
        self.ncols == other.ncols
            && self.nrows == other.nrows
            && self.xllcorner == other.xllcorner
            && self.yllcorner == other.yllcorner
            && self.cellsize == other.cellsize
    }

    /// Geometry of the pyramid level that aggregates `factor`x`factor` blocks.
    ///
    /// The northern and western edges are preserved; partial blocks at the
    /// southern and eastern edges are dropped, so the lower-left corner moves
    /// north to keep coarse cell centers on valid geographic points.
    pub fn coarsened(&self, factor: usize) -> GridDescriptor {
        let ncols = self.ncols / factor;
        let nrows = self.nrows / factor;
        let cellsize = self.cellsize * factor as f64;
        GridDescriptor {
            ncols,
            nrows,
            xllcorner: self.xllcorner,
            yllcorner: self.top() - nrows as f64 * cellsize,
            cellsize,
            nodata_value: self.nodata_value,
        }
    }
}
