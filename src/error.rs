use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

pub type VarinResult<T> = std::result::Result<T, VarinError>;

#[derive(Debug, Error)]
pub enum VarinError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Stitch(#[from] bgzf_stitch::StitchError),
    #[error(transparent)]
    ParseInt(#[from] ParseIntError),
    #[error(transparent)]
    ParseFloat(#[from] ParseFloatError),
    #[error("Malformed INFO entry {key}={value}: {message}")]
    InfoParse {
        key: String,
        value: String,
        message: String,
    },
    #[error("ALT allele is bracketed but matches neither breakend form: {allele}")]
    BreakendParse { allele: String },
    #[error("Variant category {category} reached a creator that cannot handle it")]
    UnknownCategory { category: String },
}

impl VarinError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[macro_export]
macro_rules! varin_error {
    ($($arg:tt)*) => {
        $crate::error::VarinError::message(format!($($arg)*))
    };
}
