//! Two co-registered rasters composed into a queryable vector field.
use std::borrow::Cow;
use std::sync::OnceLock;

use tracing::debug;

use crate::error::{Error, Result};
use crate::field::{range_of, DerivedQuantity, GridField, Range, ScalarField, Vector};
use crate::grid::{GridDescriptor, RasterGrid};

/// A 2D vector field sampled on a regular lon/lat grid.
///
/// Owns one raster per component (eastward u, northward v), validated to be
/// co-registered at construction. Immutable afterwards: pyramids and scalar
/// fields are new instances, never mutations of the source.
#[derive(Clone, Debug)]
pub struct VectorField {
    u: RasterGrid,
    v: RasterGrid,
    range: OnceLock<Option<Range>>,
}

impl VectorField {
    /// Composes two already-parsed component grids.
    ///
    /// Fails with [`Error::GeometryMismatch`] unless both grids share
    /// dimensions, origin, and cell size.
    pub fn from_grids(u: RasterGrid, v: RasterGrid) -> Result<Self> {
        if !u.descriptor().same_geometry(v.descriptor()) {
            return Err(Error::GeometryMismatch(format!(
                "u is {}x{} at ({}, {}) step {}, v is {}x{} at ({}, {}) step {}",
                u.descriptor().nrows,
                u.descriptor().ncols,
                u.descriptor().xllcorner,
                u.descriptor().yllcorner,
                u.descriptor().cellsize,
                v.descriptor().nrows,
                v.descriptor().ncols,
                v.descriptor().xllcorner,
                v.descriptor().yllcorner,
                v.descriptor().cellsize,
            )));
        }
        Ok(Self {
            u,
            v,
            range: OnceLock::new(),
        })
    }

    /// Parses both component payloads and composes them.
    pub fn from_ascii_grids(u_payload: &str, v_payload: &str) -> Result<Self> {
        Self::from_grids(
            RasterGrid::from_ascii(u_payload)?,
            RasterGrid::from_ascii(v_payload)?,
        )
    }

    /// Eastward component raster.
    pub fn u(&self) -> &RasterGrid {
        &self.u
    }

    /// Northward component raster.
    pub fn v(&self) -> &RasterGrid {
        &self.v
    }

    /// Magnitude range over all non-nodata cells, `None` if the field has no
    /// valid cell. Computed once per instance on first access; pyramid levels
    /// compute their own.
    pub fn range(&self) -> Option<Range> {
        *self.range.get_or_init(|| {
            range_of(
                self.cells()
                    .filter_map(|cell| cell.value.map(|v| v.magnitude())),
            )
        })
    }

    /// Builds the pyramid level that aggregates `factor`x`factor` blocks of
    /// cells, per component, with nodata cells excluded from block means.
    ///
    /// `factor` 1 returns the borrowed field itself, by contract: callers may
    /// rely on identity (no copy) to detect the native resolution. Larger
    /// factors yield an owned coarser field whose cell size is
    /// `factor * cellsize`.
    pub fn pyramid(&self, factor: usize) -> Result<Cow<'_, Self>> {
        if factor == 0 {
            return Err(Error::InvalidArgument(
                "pyramid factor must be a positive integer".to_string(),
            ));
        }
        if factor == 1 {
            return Ok(Cow::Borrowed(self));
        }
        let level = Self {
            u: self.u.downsample(factor)?,
            v: self.v.downsample(factor)?,
            range: OnceLock::new(),
        };
        debug!(
            factor,
            ncols = level.descriptor().ncols,
            nrows = level.descriptor().nrows,
            "built pyramid level"
        );
        Ok(Cow::Owned(level))
    }

    /// Derives the scalar field of the given quantity over this field's cells.
    pub fn scalar_field(&self, quantity: DerivedQuantity) -> ScalarField {
        ScalarField::from_vector_field(self, quantity)
    }
}

impl GridField for VectorField {
    type Value = Vector;

    fn descriptor(&self) -> &GridDescriptor {
        self.u.descriptor()
    }

    fn value_at(&self, row: usize, col: usize) -> Result<Vector> {
        Ok(Vector::new(
            self.u.value_at(row, col)?,
            self.v.value_at(row, col)?,
        ))
    }

    fn sample_at(&self, row: usize, col: usize) -> Result<Option<Vector>> {
        match (self.u.sample_at(row, col)?, self.v.sample_at(row, col)?) {
            (Some(u), Some(v)) => Ok(Some(Vector::new(u, v))),
            _ => Ok(None),
        }
    }
}
