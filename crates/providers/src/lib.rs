pub mod gemini;
pub mod generator;
pub mod oauth_helper;
pub mod openai;
pub mod router;

pub use generator::{GenerateOptions, TextGenerator};
