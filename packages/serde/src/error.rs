use thiserror::Error;

/// Failures converting between [`Value`](keypath_core::Value) and serde types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("decode error: {message}")]
    Decode { message: String },

    #[error("encode error: {message}")]
    Encode { message: String },
}

impl Error {
    pub fn decode(message: impl Into<String>) -> Self {
        Error::Decode {
            message: message.into(),
        }
    }

    pub fn encode(message: impl Into<String>) -> Self {
        Error::Encode {
            message: message.into(),
        }
    }
}
