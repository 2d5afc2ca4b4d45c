//! Raster grid subsystem: geometry, storage, and payload parsing.
pub mod ascii;
pub mod descriptor;
pub mod raster;

pub use ascii::parse_ascii;
pub use descriptor::GridDescriptor;
pub use raster::RasterGrid;
