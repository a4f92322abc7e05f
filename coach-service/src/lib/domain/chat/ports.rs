use async_trait::async_trait;

use crate::domain::chat::errors::ChatError;

/// Boundary to the hosted generative model behind the coaching chat.
///
/// The model is an external black box; this port only carries prompt text
/// out and reply text back. Reached exclusively from authenticated
/// requests.
#[async_trait]
pub trait ChatModel: Send + Sync + 'static {
    /// Send a prompt and return the model's reply text.
    ///
    /// # Errors
    /// * `RequestFailed` - Transport failure or non-success status
    /// * `NoResponse` - The model returned no candidates or empty text
    /// * `InvalidResponse` - The response body could not be parsed
    async fn send(&self, prompt: &str) -> Result<String, ChatError>;
}
