pub mod convert;
pub mod dataset;
pub mod error;
pub mod idx;

// Convenience re-exports
pub use convert::{convert, convert_plan, inspect_pair, ConversionPlan, ConversionSummary, ConvertConfig};
pub use dataset::{scan_dataset, DatasetLayout};
pub use error::{Error, Result};
pub use idx::{IdxDataType, IdxHeader, IdxTensor, IdxWriter};
