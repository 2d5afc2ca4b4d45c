#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_scalar_field_to_png, synthetic_ascii_payloads};
