//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Variants cover
//! malformed grid payloads, co-registration mismatches, out-of-bounds indexed
//! lookups, out-of-domain geographic lookups, and invalid arguments.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed grid payload: {0}")]
    Format(String),

    #[error("grids are not co-registered: {0}")]
    GeometryMismatch(String),

    #[error("indexes ({row}, {col}) out of bounds for {nrows}x{ncols} grid")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },

    #[error("no interpolable data at ({lon}, {lat})")]
    OutOfDomain { lon: f64, lat: f64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
