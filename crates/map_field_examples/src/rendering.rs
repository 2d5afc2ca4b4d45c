//! Shared helpers for the example binaries: tracing setup, synthetic payload
//! generation, and grayscale PNG export of scalar fields.
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use image::{GrayImage, Luma};
use map_field::prelude::*;
use tracing_subscriber::EnvFilter;

/// Initializes a tracing subscriber for the examples.
///
/// Honors `RUST_LOG`; defaults to `info` for the examples and the library.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,map_field=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Generates a pair of co-registered ASCII grid payloads describing a swirling
/// coastal current, with a calm (nodata) patch in the north-west corner.
pub fn synthetic_ascii_payloads(ncols: usize, nrows: usize) -> (String, String) {
    let header = format!(
        "ncols {ncols}\nnrows {nrows}\nxllcorner -3.7695\nyllcorner 43.4605\n\
         cellsize {}\nnodata_value -9999\n",
        0.005 / ncols as f64
    );

    let mut u_payload = header.clone();
    let mut v_payload = header;
    for row in 0..nrows {
        let mut u_line = String::new();
        let mut v_line = String::new();
        for col in 0..ncols {
            let y = (row as f64 + 0.5) / nrows as f64;
            let x = (col as f64 + 0.5) / ncols as f64;
            if x < 0.15 && y < 0.15 {
                let _ = write!(u_line, "-9999 ");
                let _ = write!(v_line, "-9999 ");
                continue;
            }
            let swirl = std::f64::consts::TAU * (x - 0.5).hypot(y - 0.5);
            let _ = write!(u_line, "{:.6} ", 0.2 * swirl.sin() + 0.05 * x);
            let _ = write!(v_line, "{:.6} ", 0.2 * swirl.cos() - 0.05 * y);
        }
        u_payload.push_str(u_line.trim_end());
        u_payload.push('\n');
        v_payload.push_str(v_line.trim_end());
        v_payload.push('\n');
    }
    (u_payload, v_payload)
}

/// Renders a scalar field to a grayscale PNG, one pixel per cell.
///
/// Values are stretched over the field's range; nodata cells render black.
pub fn render_scalar_field_to_png(field: &ScalarField, path: impl AsRef<Path>) -> Result<()> {
    let d = field.descriptor().clone();
    let range = field.range();
    let mut image = GrayImage::new(d.ncols as u32, d.nrows as u32);

    for (index, cell) in field.cells().enumerate() {
        let shade = match (cell.value, range) {
            (Some(value), Some(range)) if range.max > range.min => {
                let t = (value - range.min) / (range.max - range.min);
                1 + (t * 254.0).round() as u8
            }
            (Some(_), _) => 255,
            (None, _) => 0,
        };
        let x = (index % d.ncols) as u32;
        let y = (index / d.ncols) as u32;
        image.put_pixel(x, y, Luma([shade]));
    }

    image
        .save(path.as_ref())
        .with_context(|| format!("writing {}", path.as_ref().display()))
}
