//! Text generation seam shared by every provider client.

use anyhow::Result;

/// Per-request knobs passed through to the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Which backing model serves the request
    pub model: String,
    /// Caps the response length
    pub max_output_tokens: u32,
}

impl GenerateOptions {
    pub fn new(model: impl Into<String>, max_output_tokens: u32) -> Self {
        Self {
            model: model.into(),
            max_output_tokens,
        }
    }
}

/// Anything that turns a prompt into text.
///
/// Note: Uses async_trait for object safety
#[async_trait::async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider identifier for logs
    fn id(&self) -> &'static str;

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String>;
}

/// Trim a provider error body to something loggable.
pub(crate) fn error_detail(body: &str) -> String {
    body.trim().chars().take(800).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_detail_truncates() {
        let long = "x".repeat(2000);
        assert_eq!(error_detail(&long).len(), 800);
        assert_eq!(error_detail("  oops \n"), "oops");
    }
}
