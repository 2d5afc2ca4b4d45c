use anyhow::Result;
use map_field::prelude::*;
use map_field_examples::{init_tracing, render_scalar_field_to_png, synthetic_ascii_payloads};
use tracing::info;

/// Builds successive pyramid levels of a field and renders each level's
/// magnitude, showing how block averaging coarsens the data.
fn main() -> Result<()> {
    init_tracing();

    let (u_payload, v_payload) = synthetic_ascii_payloads(256, 256);
    let field = VectorField::from_ascii_grids(&u_payload, &v_payload)?;

    for factor in [1usize, 2, 4, 8] {
        let level = field.pyramid(factor)?;
        let d = level.descriptor();
        info!(
            factor,
            ncols = d.ncols,
            nrows = d.nrows,
            cells = level.cells().len(),
            "pyramid level"
        );
        if let Some(range) = level.range() {
            info!(factor, min = range.min, max = range.max, "level magnitude range");
        }

        let magnitude = level.scalar_field(DerivedQuantity::Magnitude);
        let path = format!("fields-pyramid-{factor}.png");
        render_scalar_field_to_png(&magnitude, &path)?;
        info!(path = %path, "wrote level image");
    }

    Ok(())
}
