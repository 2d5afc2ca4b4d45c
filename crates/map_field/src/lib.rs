#![forbid(unsafe_code)]
//! map_field: gridded 2D vector fields with interpolation, pyramid resampling,
//! and derived scalar analysis.
//!
//! Modules:
//! - grid: raster geometry, storage, and ASCII payload parsing
//! - field: the shared query contract, vector fields, and derived scalar fields
//!
//! Two co-registered component grids (eastward u, northward v) compose into a
//! [`field::VectorField`]; every query a map overlay needs — indexed lookup,
//! bilinear interpolation, cell iteration, multi-resolution pyramids, value
//! ranges, derived magnitude/direction fields — is answered from there.
pub mod error;
pub mod field;
pub mod grid;

/// Convenient re-exports for common types. Import with `use map_field::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::field::{
        Cell, Cells, DerivedQuantity, GridField, Range, ScalarField, ScalarSource, Vector,
        VectorField,
    };
    pub use crate::grid::{GridDescriptor, RasterGrid};
}
