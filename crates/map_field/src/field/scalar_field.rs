//! Scalar fields: per-cell quantities derived from a vector field, or a
//! single raster parsed directly. Either way they expose the same query
//! surface as the vector field they mirror.
use std::borrow::Cow;
use std::str::FromStr;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::field::{range_of, GridField, Range, Vector, VectorField};
use crate::grid::{GridDescriptor, RasterGrid};

/// Scalar quantity derivable from one vector cell.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivedQuantity {
    /// Euclidean length of the vector.
    Magnitude,
    /// Bearing the flow points towards, degrees in [0, 360).
    DirectionTo,
    /// Bearing the flow comes from.
    DirectionFrom,
}

impl DerivedQuantity {
    /// Computes the derived scalar for one vector.
    pub fn apply(&self, vector: Vector) -> f64 {
        match self {
            DerivedQuantity::Magnitude => vector.magnitude(),
            DerivedQuantity::DirectionTo => vector.direction_to(),
            DerivedQuantity::DirectionFrom => vector.direction_from(),
        }
    }

    /// Wire name of the quantity, the inverse of [`FromStr`].
    pub fn name(&self) -> &'static str {
        match self {
            DerivedQuantity::Magnitude => "magnitude",
            DerivedQuantity::DirectionTo => "directionTo",
            DerivedQuantity::DirectionFrom => "directionFrom",
        }
    }
}

impl FromStr for DerivedQuantity {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "magnitude" => Ok(DerivedQuantity::Magnitude),
            "directionTo" => Ok(DerivedQuantity::DirectionTo),
            "directionFrom" => Ok(DerivedQuantity::DirectionFrom),
            _ => Err(Error::InvalidArgument(format!(
                "unknown scalar quantity '{name}'"
            ))),
        }
    }
}

/// How a scalar field came to be.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarSource {
    /// Parsed from a grid payload, not derived.
    Direct,
    /// Derived cell-wise from a vector field.
    Derived(DerivedQuantity),
}

/// A scalar field over the same grid geometry as its source.
#[derive(Clone, Debug)]
pub struct ScalarField {
    grid: RasterGrid,
    source: ScalarSource,
    range: OnceLock<Option<Range>>,
}

impl ScalarField {
    /// Wraps an already-parsed raster as a directly-sourced scalar field.
    pub fn from_grid(grid: RasterGrid) -> Self {
        Self {
            grid,
            source: ScalarSource::Direct,
            range: OnceLock::new(),
        }
    }

    /// Parses a scalar field from one ASCII grid payload.
    pub fn from_ascii(payload: &str) -> Result<Self> {
        Ok(Self::from_grid(RasterGrid::from_ascii(payload)?))
    }

    /// Derives a scalar field cell-wise from a vector field.
    ///
    /// Nodata cells of the source stay nodata here, under the source's
    /// sentinel.
    pub(crate) fn from_vector_field(field: &VectorField, quantity: DerivedQuantity) -> Self {
        let descriptor = field.descriptor().clone();
        let values = field
            .cells()
            .map(|cell| match cell.value {
                Some(vector) => quantity.apply(vector),
                None => descriptor.nodata_value,
            })
            .collect();
        debug!(quantity = quantity.name(), "derived scalar field");
        Self {
            grid: RasterGrid::from_raw(descriptor, values),
            source: ScalarSource::Derived(quantity),
            range: OnceLock::new(),
        }
    }

    /// The derivation (or direct parse) this field came from.
    pub fn source(&self) -> ScalarSource {
        self.source
    }

    /// Value range over all non-nodata cells, memoized per instance.
    pub fn range(&self) -> Option<Range> {
        *self
            .range
            .get_or_init(|| range_of(self.cells().filter_map(|cell| cell.value)))
    }

    /// Coarser scalar field aggregating `factor`x`factor` blocks, with the
    /// same identity contract as the vector pyramid: factor 1 borrows `self`.
    pub fn pyramid(&self, factor: usize) -> Result<Cow<'_, Self>> {
        if factor == 0 {
            return Err(Error::InvalidArgument(
                "pyramid factor must be a positive integer".to_string(),
            ));
        }
        if factor == 1 {
            return Ok(Cow::Borrowed(self));
        }
        Ok(Cow::Owned(Self {
            grid: self.grid.downsample(factor)?,
            source: self.source,
            range: OnceLock::new(),
        }))
    }
}

impl GridField for ScalarField {
    type Value = f64;

    fn descriptor(&self) -> &GridDescriptor {
        self.grid.descriptor()
    }

    fn value_at(&self, row: usize, col: usize) -> Result<f64> {
        self.grid.value_at(row, col)
    }

    fn sample_at(&self, row: usize, col: usize) -> Result<Option<f64>> {
        self.grid.sample_at(row, col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NODATA: f64 = -9999.0;

    fn descriptor() -> GridDescriptor {
        GridDescriptor {
            ncols: 4,
            nrows: 4,
            xllcorner: -4.0,
            yllcorner: 40.0,
            cellsize: 0.25,
            nodata_value: NODATA,
        }
    }

    fn vector_field_with_hole() -> VectorField {
        let mut u: Vec<f64> = (0..16).map(|i| 0.1 * i as f64).collect();
        let v: Vec<f64> = (0..16).map(|i| -0.05 * i as f64).collect();
        u[5] = NODATA;
        VectorField::from_grids(
            RasterGrid::new(descriptor(), u).unwrap(),
            RasterGrid::new(descriptor(), v).unwrap(),
        )
        .unwrap()
    }

    fn approx_eq(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn magnitude_field_matches_cell_magnitudes() {
        let field = vector_field_with_hole();
        let scalar = field.scalar_field(DerivedQuantity::Magnitude);
        assert_eq!(scalar.source(), ScalarSource::Derived(DerivedQuantity::Magnitude));
        for row in 0..4 {
            for col in 0..4 {
                match field.sample_at(row, col).unwrap() {
                    Some(vector) => {
                        approx_eq(scalar.value_at(row, col).unwrap(), vector.magnitude())
                    }
                    None => assert_eq!(scalar.sample_at(row, col).unwrap(), None),
                }
            }
        }
    }

    #[test]
    fn direction_from_is_direction_to_rotated_half_turn() {
        let field = vector_field_with_hole();
        let to = field.scalar_field(DerivedQuantity::DirectionTo);
        let from = field.scalar_field(DerivedQuantity::DirectionFrom);
        for (a, b) in to.cells().zip(from.cells()) {
            match (a.value, b.value) {
                (Some(to), Some(from)) => approx_eq(from, (to + 180.0) % 360.0),
                (a, b) => assert_eq!(a, b),
            }
        }
    }

    #[test]
    fn derived_field_shares_source_geometry() {
        let field = vector_field_with_hole();
        let scalar = field.scalar_field(DerivedQuantity::Magnitude);
        assert_eq!(scalar.descriptor(), field.descriptor());
        assert_eq!(scalar.cells().len(), 16);
    }

    #[test]
    fn scalar_interpolation_reuses_the_shared_contract() {
        let field = vector_field_with_hole();
        let scalar = field.scalar_field(DerivedQuantity::Magnitude);
        let center = scalar.descriptor().cell_center(2, 2);
        let got = scalar.interpolated_value_at(center.x, center.y).unwrap();
        approx_eq(got, scalar.value_at(2, 2).unwrap());

        // Interpolating across the hole fails loudly, like the vector field.
        let hole_center = scalar.descriptor().cell_center(1, 1);
        assert!(matches!(
            scalar.interpolated_value_at(hole_center.x, hole_center.y),
            Err(Error::OutOfDomain { .. })
        ));
    }

    #[test]
    fn range_skips_nodata_and_is_memoized() {
        let field = vector_field_with_hole();
        let scalar = field.scalar_field(DerivedQuantity::Magnitude);
        let range = scalar.range().expect("valid cells exist");
        for cell in scalar.cells() {
            if let Some(value) = cell.value {
                assert!(range.contains(value));
            }
        }
        assert_eq!(scalar.range(), Some(range));
    }

    #[test]
    fn pyramid_identity_and_aggregation() {
        let field = vector_field_with_hole();
        let scalar = field.scalar_field(DerivedQuantity::Magnitude);

        let same = scalar.pyramid(1).unwrap();
        assert!(std::ptr::eq(same.as_ref(), &scalar));

        let coarse = scalar.pyramid(2).unwrap();
        assert_eq!(coarse.cells().len(), 4);
        // Block (0, 0) loses its nodata member from the mean.
        let expected: f64 = [(0, 0), (0, 1), (1, 0)]
            .iter()
            .map(|&(r, c)| scalar.value_at(r, c).unwrap())
            .sum::<f64>()
            / 3.0;
        approx_eq(coarse.value_at(0, 0).unwrap(), expected);
    }

    #[test]
    fn quantity_names_round_trip() {
        for quantity in [
            DerivedQuantity::Magnitude,
            DerivedQuantity::DirectionTo,
            DerivedQuantity::DirectionFrom,
        ] {
            assert_eq!(quantity.name().parse::<DerivedQuantity>().unwrap(), quantity);
        }
        assert!(matches!(
            "vorticity".parse::<DerivedQuantity>(),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn direct_field_parses_from_payload() {
        let payload = "ncols 2\nnrows 2\nxllcorner 0\nyllcorner 0\ncellsize 1\n\
                       nodata_value -9999\n1.5 2.5\n-9999 4.5\n";
        let scalar = ScalarField::from_ascii(payload).unwrap();
        assert_eq!(scalar.source(), ScalarSource::Direct);
        assert_eq!(scalar.value_at(0, 1).unwrap(), 2.5);
        assert_eq!(scalar.sample_at(1, 0).unwrap(), None);
        assert_eq!(scalar.range(), Some(Range { min: 1.5, max: 4.5 }));
    }
}
