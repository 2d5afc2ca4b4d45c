//! Dense raster storage for one grid component.
//!
//! A [`RasterGrid`] owns `ncols * nrows` values in row-major order, row 0
//! northernmost, together with its [`GridDescriptor`]. Lookups are O(1) and
//! bounds-checked; sampling distinguishes nodata cells from valid ones.
use crate::error::{Error, Result};
use crate::grid::{ascii, GridDescriptor};

/// A single parsed scalar raster.
#[derive(Clone, Debug, PartialEq)]
pub struct RasterGrid {
    descriptor: GridDescriptor,
    data: Vec<f64>,
}

impl RasterGrid {
    /// Wraps row-major values in a raster. The value count must match the
    /// descriptor's dimensions.
    pub fn new(descriptor: GridDescriptor, data: Vec<f64>) -> Result<Self> {
        if data.len() != descriptor.len() {
            return Err(Error::InvalidArgument(format!(
                "{} values for a {}x{} grid",
                data.len(),
                descriptor.nrows,
                descriptor.ncols
            )));
        }
        Ok(Self { descriptor, data })
    }

    /// Parses a raster from an ASCII grid payload.
    pub fn from_ascii(payload: &str) -> Result<Self> {
        ascii::parse_ascii(payload)
    }

    /// Internal constructor for callers that produce one value per cell.
    pub(crate) fn from_raw(descriptor: GridDescriptor, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), descriptor.len());
        Self { descriptor, data }
    }

    pub fn descriptor(&self) -> &GridDescriptor {
        &self.descriptor
    }

    /// Raw values in row-major order, nodata sentinels included.
    pub fn values(&self) -> &[f64] {
        &self.data
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.descriptor.nrows || col >= self.descriptor.ncols {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                nrows: self.descriptor.nrows,
                ncols: self.descriptor.ncols,
            });
        }
        Ok(row * self.descriptor.ncols + col)
    }

    /// Raw value at (row, col), which may be the nodata sentinel.
    pub fn value_at(&self, row: usize, col: usize) -> Result<f64> {
        Ok(self.data[self.index(row, col)?])
    }

    /// Value at (row, col), or `None` for a nodata cell.
    pub fn sample_at(&self, row: usize, col: usize) -> Result<Option<f64>> {
        let value = self.value_at(row, col)?;
        Ok((!self.descriptor.is_nodata(value)).then_some(value))
    }

    /// Aggregates `factor`x`factor` blocks into a coarser raster.
    ///
    /// Each coarse cell is the arithmetic mean of the valid fine cells in its
    /// block; nodata cells do not contribute, and a block with no valid cell
    /// stays nodata. Partial blocks at the southern and eastern edges are
    /// dropped, per [`GridDescriptor::coarsened`].
    pub fn downsample(&self, factor: usize) -> Result<RasterGrid> {
        if factor == 0 {
            return Err(Error::InvalidArgument(
                "downsample factor must be a positive integer".to_string(),
            ));
        }
        if factor == 1 {
            return Ok(self.clone());
        }
        let coarse = self.descriptor.coarsened(factor);
        if coarse.is_empty() {
            return Err(Error::InvalidArgument(format!(
                "factor {factor} exceeds the {}x{} grid",
                self.descriptor.nrows, self.descriptor.ncols
            )));
        }

        let mut data = Vec::with_capacity(coarse.len());
        for block_row in 0..coarse.nrows {
            for block_col in 0..coarse.ncols {
                let mut sum = 0.0;
                let mut count = 0usize;
                for row in block_row * factor..(block_row + 1) * factor {
                    for col in block_col * factor..(block_col + 1) * factor {
                        let value = self.data[row * self.descriptor.ncols + col];
                        if !self.descriptor.is_nodata(value) {
                            sum += value;
                            count += 1;
                        }
                    }
                }
                data.push(if count == 0 {
                    coarse.nodata_value
                } else {
                    sum / count as f64
                });
            }
        }
        RasterGrid::new(coarse, data)
    }
}
