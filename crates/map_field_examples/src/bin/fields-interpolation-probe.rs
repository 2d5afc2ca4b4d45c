use anyhow::Result;
use map_field::prelude::*;
use map_field_examples::{init_tracing, synthetic_ascii_payloads};
use tracing::info;

const STEPS: usize = 16;

/// Walks a diagonal transect across a field, comparing nearest-cell lookups
/// with bilinear interpolation at the same positions.
fn main() -> Result<()> {
    init_tracing();

    let (u_payload, v_payload) = synthetic_ascii_payloads(64, 64);
    let field = VectorField::from_ascii_grids(&u_payload, &v_payload)?;
    let d = field.descriptor().clone();

    for i in 0..STEPS {
        let t = (i as f64 + 0.5) / STEPS as f64;
        let lon = d.xllcorner + t * (d.right() - d.xllcorner);
        let lat = d.yllcorner + t * (d.top() - d.yllcorner);

        let nearest = field.value_at_position(lon, lat)?;
        match field.interpolated_value_at(lon, lat) {
            Ok(bilinear) => info!(
                lon,
                lat,
                nearest = ?nearest.map(|v| (v.u, v.v)),
                bilinear_u = bilinear.u,
                bilinear_v = bilinear.v,
                magnitude = bilinear.magnitude(),
                "probe"
            ),
            Err(err) => info!(lon, lat, nearest = ?nearest.map(|v| (v.u, v.v)), %err, "probe"),
        }
    }

    Ok(())
}
