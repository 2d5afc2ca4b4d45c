use anyhow::Result;
use map_field::prelude::*;
use map_field_examples::{init_tracing, render_scalar_field_to_png, synthetic_ascii_payloads};
use tracing::info;

/// Parses a synthetic current field from ASCII payloads, derives its
/// magnitude, and writes the result as a grayscale PNG.
fn main() -> Result<()> {
    init_tracing();

    let (u_payload, v_payload) = synthetic_ascii_payloads(256, 256);
    let field = VectorField::from_ascii_grids(&u_payload, &v_payload)?;

    if let Some(range) = field.range() {
        info!(min = range.min, max = range.max, "magnitude range");
    }

    let magnitude = field.scalar_field(DerivedQuantity::Magnitude);
    render_scalar_field_to_png(&magnitude, "fields-magnitude.png")?;
    info!("wrote fields-magnitude.png");

    Ok(())
}
