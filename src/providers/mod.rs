//! Upstream generative-text providers

pub mod gemini;

// Re-export for convenience
pub use gemini::GeminiClient;
