//! Field subsystem: the shared query contract and its two implementations.
//!
//! This module defines [`GridField`], the query surface every field exposes
//! (indexed lookup, geographic lookup, bilinear interpolation, and cell
//! iteration), written once as provided methods over an implementor's raw
//! raster access. [`VectorField`] composes two co-registered rasters into a
//! (u, v) field; [`ScalarField`] carries one scalar raster, derived from a
//! vector field or parsed directly.
use std::ops::{Add, Mul};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod cell;
pub mod scalar_field;
pub mod vector;
pub mod vector_field;

pub use cell::Cell;
pub use scalar_field::{DerivedQuantity, ScalarField, ScalarSource};
pub use vector::Vector;
pub use vector_field::VectorField;

use crate::error::{Error, Result};
use crate::grid::GridDescriptor;

/// Closed interval of field values, as `[min, max]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Folds an iterator of values into its closed range, `None` when empty.
pub(crate) fn range_of(values: impl Iterator<Item = f64>) -> Option<Range> {
    values.fold(None, |range, value| {
        Some(match range {
            None => Range {
                min: value,
                max: value,
            },
            Some(r) => Range {
                min: r.min.min(value),
                max: r.max.max(value),
            },
        })
    })
}

/// Query contract shared by vector and scalar fields.
///
/// Implementors provide the descriptor and raw per-cell access; geographic
/// lookup, bilinear interpolation, and cell iteration are provided on top so
/// both value types go through the same code paths.
pub trait GridField {
    /// Per-cell value. The arithmetic bounds are what the bilinear blend needs.
    type Value: Copy + Add<Output = Self::Value> + Mul<f64, Output = Self::Value>;

    /// Grid geometry of this field.
    fn descriptor(&self) -> &GridDescriptor;

    /// Raw value at (row, col); may carry the nodata sentinel. Out-of-range
    /// indexes fail with [`Error::IndexOutOfBounds`].
    fn value_at(&self, row: usize, col: usize) -> Result<Self::Value>;

    /// Value at (row, col), or `None` for a nodata cell.
    fn sample_at(&self, row: usize, col: usize) -> Result<Option<Self::Value>>;

    /// Returns `true` if the position falls within the grid extent.
    fn contains(&self, lon: f64, lat: f64) -> bool {
        self.descriptor().contains(lon, lat)
    }

    /// Value of the cell whose footprint encloses the position.
    ///
    /// Fails with [`Error::OutOfDomain`] outside the extent; returns
    /// `Ok(None)` on a nodata cell, so the lookup is total over the extent.
    fn value_at_position(&self, lon: f64, lat: f64) -> Result<Option<Self::Value>> {
        let (row, col) = self
            .descriptor()
            .enclosing_cell(lon, lat)
            .ok_or(Error::OutOfDomain { lon, lat })?;
        self.sample_at(row, col)
    }

    /// Bilinear interpolation at a position.
    ///
    /// The position is mapped to fractional indexes under the cell-center
    /// convention and blended from the four surrounding cells. There is no
    /// extrapolation and no clamping: a position outside the extent, or one
    /// whose four contributors are not all valid in-range samples, fails with
    /// [`Error::OutOfDomain`].
    fn interpolated_value_at(&self, lon: f64, lat: f64) -> Result<Self::Value> {
        if !self.contains(lon, lat) {
            return Err(Error::OutOfDomain { lon, lat });
        }
        let (row, col) = self.descriptor().fractional_indexes(lon, lat);
        let (row0, col0) = (row.floor(), col.floor());
        let (ty, tx) = (row - row0, col - col0);

        let corner = |row: f64, col: f64| -> Result<Self::Value> {
            if row < 0.0 || col < 0.0 {
                return Err(Error::OutOfDomain { lon, lat });
            }
            match self.sample_at(row as usize, col as usize) {
                Ok(Some(value)) => Ok(value),
                _ => Err(Error::OutOfDomain { lon, lat }),
            }
        };

        let v00 = corner(row0, col0)?;
        let v01 = corner(row0, col0 + 1.0)?;
        let v10 = corner(row0 + 1.0, col0)?;
        let v11 = corner(row0 + 1.0, col0 + 1.0)?;

        Ok(v00 * ((1.0 - tx) * (1.0 - ty))
            + v01 * (tx * (1.0 - ty))
            + v10 * ((1.0 - tx) * ty)
            + v11 * (tx * ty))
    }

    /// Row-major iterator over every cell of the field.
    ///
    /// Always yields `nrows * ncols` cells; nodata cells carry `value: None`.
    fn cells(&self) -> Cells<'_, Self>
    where
        Self: Sized,
    {
        Cells {
            field: self,
            index: 0,
            len: self.descriptor().len(),
        }
    }
}

/// Restartable row-major cell iterator returned by [`GridField::cells`].
#[derive(Clone, Debug)]
pub struct Cells<'a, F: GridField> {
    field: &'a F,
    index: usize,
    len: usize,
}

impl<F: GridField> Iterator for Cells<'_, F> {
    type Item = Cell<F::Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let descriptor = self.field.descriptor();
        let row = self.index / descriptor.ncols;
        let col = self.index % descriptor.ncols;
        self.index += 1;

        // In bounds by construction.
        let value = self.field.sample_at(row, col).ok().flatten();
        Some(Cell::new(
            descriptor.cell_center(row, col),
            value,
            descriptor.cellsize,
        ))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}

impl<F: GridField> ExactSizeIterator for Cells<'_, F> {}
