//! Error taxonomy for dataset conversion and IDX parsing.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the ferrite-idx library.
#[derive(Error, Debug)]
pub enum Error {
    /// The dataset root is missing or is not a directory.
    #[error("input path {path} is not a directory")]
    InvalidInput { path: PathBuf },

    /// No class folders were found, or the first class has no images.
    #[error("dataset at {path} is empty: {reason}")]
    DatasetEmpty { path: PathBuf, reason: String },

    /// A single image failed to open or decode; the whole run is aborted.
    #[error("failed to decode image {path}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// An image does not match the canonical sample shape.
    #[error("image {path} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}")]
    ShapeMismatch {
        path: PathBuf,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// An output file already exists.
    #[error("output file {path} already exists")]
    FileConflict { path: PathBuf },

    /// Filesystem read or write failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Sample count does not fit in a 32-bit IDX dimension.
    #[error("dataset has {count} samples, more than an IDX header can describe")]
    TooManySamples { count: usize },

    /// Label codes do not fit the element type of the label file.
    #[error("{count} classes cannot be encoded as single-byte labels (max 255)")]
    TooManyClasses { count: usize },

    /// An IDX writer was finished with a different number of elements than
    /// its header declares.
    #[error("IDX payload holds {written} elements, header declares {expected}")]
    ElementCount { expected: u64, written: u64 },

    /// An IDX file failed validation.
    #[error("malformed IDX data: {reason}")]
    MalformedIdx { reason: String },

    /// A JSON configuration file could not be parsed.
    #[error("invalid configuration file {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io { path: path.into(), source }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Error::MalformedIdx { reason: reason.into() }
    }
}

/// Result type alias for ferrite-idx operations.
pub type Result<T> = std::result::Result<T, Error>;
