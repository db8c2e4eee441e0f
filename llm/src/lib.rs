//! Gateway to a multimodal generative model.
//!
//! The `llm` crate defines the [`Prompt`] payload and the [`ModelGateway`]
//! trait, along with [`GeminiClient`], an implementation backed by Google's
//! Gemini REST API.

pub mod client;
pub mod config;
pub mod prompt;
pub mod traits;
pub mod types;

pub use client::GeminiClient;
pub use config::{GeminiConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::Prompt;
pub use traits::{LLMError, ModelGateway};
