//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Provides semantic variants for argument validation, unsupported pixel
//! encodings, and conversion-policy gaps.
use thiserror::Error;

use crate::types::{FormatFamily, PixelEncoding};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{operation} does not support {encoding} buffers")]
    UnsupportedEncoding {
        operation: &'static str,
        encoding: PixelEncoding,
    },

    #[error("no conversion from {channels}-channel {encoding} input to {format} output")]
    UnsupportedConversion {
        encoding: PixelEncoding,
        channels: usize,
        format: FormatFamily,
    },

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Internal inconsistency: {0}")]
    InternalInconsistency(String),
}

impl Error {
    pub(crate) fn invalid_argument<V: std::fmt::Display>(arg: &'static str, value: V) -> Self {
        Error::InvalidArgument {
            arg,
            value: value.to_string(),
        }
    }
}
