pub mod layout;
pub mod pixel;

pub use layout::{scan_dataset, ClassDir, DatasetLayout};
pub use pixel::{decode_packed, read_dimensions, RasterImage};
