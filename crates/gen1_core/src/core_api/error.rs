use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    Load,
    OutOfBounds,
    InvalidValue,
    ListFull,
    NotFound,
    VerificationFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn load(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::Load, message)
    }

    pub fn out_of_bounds(offset: usize, len: usize, size: usize) -> Self {
        Self::new(
            CoreErrorCode::OutOfBounds,
            format!("offset {offset} + length {len} out of bounds (size: {size})"),
        )
    }

    pub fn invalid_value(message: impl Into<String>) -> Self {
        Self::new(CoreErrorCode::InvalidValue, message)
    }
}

impl From<io::Error> for CoreError {
    fn from(err: io::Error) -> Self {
        Self::new(CoreErrorCode::Io, err.to_string())
    }
}
