use thiserror::Error;

pub type Result<T> = std::result::Result<T, StitchError>;

#[derive(Debug, Error)]
pub enum StitchError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Corrupt BGZF block at file offset {offset}: {message}")]
    BgzfCorrupt { offset: u64, message: String },
    #[error("7-bit encoded integer did not terminate within {max_bytes} bytes")]
    OptInt7bit { max_bytes: usize },
}

impl StitchError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    pub fn corrupt(offset: u64, message: impl Into<String>) -> Self {
        Self::BgzfCorrupt {
            offset,
            message: message.into(),
        }
    }
}

#[macro_export]
macro_rules! stitch_error {
    ($($arg:tt)*) => {
        $crate::error::StitchError::message(format!($($arg)*))
    };
}
