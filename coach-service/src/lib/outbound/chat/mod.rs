pub mod gemini;

pub use gemini::GeminiChatClient;
