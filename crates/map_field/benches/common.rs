use std::time::Duration;

use criterion::{Criterion, Throughput};
use map_field::prelude::*;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Synthetic swirl field of the given dimensions over a one-degree extent.
pub fn synthetic_field(ncols: usize, nrows: usize) -> VectorField {
    let descriptor = GridDescriptor {
        ncols,
        nrows,
        xllcorner: -4.0,
        yllcorner: 43.0,
        cellsize: 1.0 / ncols as f64,
        nodata_value: -9999.0,
    };
    let mut u = Vec::with_capacity(descriptor.len());
    let mut v = Vec::with_capacity(descriptor.len());
    for row in 0..nrows {
        for col in 0..ncols {
            let y = row as f64 / nrows as f64;
            let x = col as f64 / ncols as f64;
            u.push((std::f64::consts::TAU * y).sin() * 0.5);
            v.push((std::f64::consts::TAU * x).cos() * 0.5);
        }
    }
    let u = RasterGrid::new(descriptor.clone(), u).expect("matching dimensions");
    let v = RasterGrid::new(descriptor, v).expect("matching dimensions");
    VectorField::from_grids(u, v).expect("co-registered grids")
}
