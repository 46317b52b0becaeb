pub mod config;
pub mod converter;
pub mod inspect;
pub mod output;
pub mod summary;

pub use config::{ConversionPlan, ConvertConfig};
pub use converter::{convert, convert_plan};
pub use inspect::{inspect_pair, PairReport};
pub use summary::{ClassSummary, ConversionSummary};
