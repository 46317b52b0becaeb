pub mod data_type;
pub mod header;
pub mod reader;
pub mod writer;

pub use data_type::IdxDataType;
pub use header::IdxHeader;
pub use reader::{load_labeled_samples, IdxTensor, LabeledSample};
pub use writer::IdxWriter;
