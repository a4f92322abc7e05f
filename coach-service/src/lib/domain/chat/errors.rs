use thiserror::Error;

/// Error type for chat model operations.
#[derive(Debug, Clone, Error)]
pub enum ChatError {
    #[error("Chat model request failed: {0}")]
    RequestFailed(String),

    #[error("Chat model returned no usable response")]
    NoResponse,

    #[error("Chat model response could not be parsed: {0}")]
    InvalidResponse(String),
}
