//! Error types for sift

use std::fmt;

use thiserror::Error;

/// Numeric code carried by every [`DatasetError`]
///
/// The codes are stable so they can be grepped in logs and referenced in
/// bug reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Generic failure, the message carries the detail
    Generic = 0,
    /// Data or metric types do not match
    DataTypeMismatch = 1,
    /// The data type is not supported by the operation
    UnsupportedDataType = 2,
    /// Column length differs from the dataset's record count
    MetricSizeMismatch = 3,
}

impl ErrorCode {
    pub fn as_i32(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i32())
    }
}

/// Error returned by the dataset API
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("C-{code} {message}")]
pub struct DatasetError {
    pub message: String,
    pub code: ErrorCode,
}

impl DatasetError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }

    pub fn generic(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Generic, message)
    }

    pub fn data_type_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DataTypeMismatch, message)
    }

    pub fn unsupported_data_type(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UnsupportedDataType, message)
    }

    pub fn metric_size_mismatch(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::MetricSizeMismatch, message)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Import error: {0}")]
    Import(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
