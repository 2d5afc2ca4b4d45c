//! Cell value object produced by field iteration.
use glam::DVec2;

/// One grid position paired with its value and footprint size.
///
/// `value` is `None` for nodata cells; the iteration that produces cells is
/// total, so consumers decide how to treat missing samples.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell<V> {
    /// Geographic center of the cell (lon, lat).
    pub center: DVec2,
    /// Sampled value, `None` where the grid has no data.
    pub value: Option<V>,
    /// Cell edge length in degrees.
    pub size: f64,
}

impl<V> Cell<V> {
    pub fn new(center: DVec2, value: Option<V>, size: f64) -> Self {
        Self {
            center,
            value,
            size,
        }
    }
}
