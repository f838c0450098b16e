use crate::gemini::GeminiClient;
use crate::generator::{GenerateOptions, TextGenerator};
use crate::openai::OpenAIClient;
use anyhow::{anyhow, Result};
use shared::settings::ModelProvider;

const OPENAI_REASONING_PREFIXES: &[&str] = &["o1", "o3", "o4"];

/// Tries each configured provider in preference order until one answers.
pub struct ProviderRouter {
    config: ModelProvider,
}

impl ProviderRouter {
    pub fn new(config: ModelProvider) -> Self {
        Self { config }
    }

    /// Returns the name of the first configured provider.
    pub fn active_provider(&self) -> Option<&str> {
        self.config.provider_preference.first().map(|s| s.as_str())
    }

    /// The requested model only applies to the provider family it names;
    /// other providers fall back to their configured model.
    fn model_for<'a>(&'a self, provider: &str, requested: &'a str) -> &'a str {
        let requested_family = if requested.starts_with("gemini") {
            "gemini"
        } else if requested.starts_with("gpt")
            || OPENAI_REASONING_PREFIXES.iter().any(|p| requested.starts_with(p))
        {
            "openai"
        } else {
            ""
        };

        match provider {
            "openai" if requested_family == "openai" => requested,
            "openai" => &self.config.openai_model,
            "gemini" if requested_family == "gemini" => requested,
            "gemini" => &self.config.gemini_model,
            _ => requested,
        }
    }
}

#[async_trait::async_trait]
impl TextGenerator for ProviderRouter {
    fn id(&self) -> &'static str {
        "router"
    }

    async fn generate(&self, prompt: &str, options: &GenerateOptions) -> Result<String> {
        let mut last_error = None;

        // Try providers in order of preference, falling back on failure
        for provider in self.config.provider_preference.iter() {
            let model = self.model_for(provider, &options.model);
            let (id, result) = match provider.as_str() {
                "openai" => {
                    match OpenAIClient::from_auth(
                        &self.config.openai_model,
                        &self.config.openai_auth,
                        self.config.openai_base_url.as_deref(),
                    ) {
                        Ok(client) => (
                            client.id(),
                            client
                                .complete(prompt, model, options.max_output_tokens)
                                .await,
                        ),
                        Err(e) => (provider.as_str(), Err(e)),
                    }
                }
                "gemini" => {
                    match GeminiClient::from_auth(&self.config.gemini_model, &self.config.gemini_auth)
                    {
                        Ok(client) => (
                            client.id(),
                            client
                                .complete(prompt, model, options.max_output_tokens)
                                .await,
                        ),
                        Err(e) => (provider.as_str(), Err(e)),
                    }
                }
                _ => {
                    last_error = Some(anyhow!("Unknown provider: {}", provider));
                    continue;
                }
            };

            match result {
                Ok(response) => {
                    tracing::debug!(router = self.id(), provider = id, model, "generation succeeded");
                    return Ok(response);
                }
                Err(e) => {
                    tracing::warn!(
                        router = self.id(),
                        provider = id,
                        error = %e,
                        "provider failed, trying next"
                    );
                    last_error = Some(e);
                    continue;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow!("No providers configured")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::settings::AppSettings;

    fn router(preference: &[&str]) -> ProviderRouter {
        let mut config = AppSettings::default().model;
        config.provider_preference = preference.iter().map(|s| s.to_string()).collect();
        ProviderRouter::new(config)
    }

    #[test]
    fn test_model_routing() {
        let r = router(&["openai", "gemini"]);
        assert_eq!(r.model_for("openai", "gpt-4o-mini"), "gpt-4o-mini");
        assert_eq!(r.model_for("gemini", "gpt-4o-mini"), "gemini-1.5-flash");
        assert_eq!(r.model_for("gemini", "gemini-1.5-pro"), "gemini-1.5-pro");
        assert_eq!(r.model_for("openai", "gemini-1.5-pro"), "gpt-4o-mini");
    }

    #[test]
    fn test_only_known_openai_families_pass_through() {
        let r = router(&["openai", "gemini"]);
        assert_eq!(r.model_for("openai", "o3-mini"), "o3-mini");
        assert_eq!(r.model_for("openai", "o1-preview"), "o1-preview");
        assert_eq!(r.model_for("openai", "open-mistral-7b"), "gpt-4o-mini");
        assert_eq!(r.model_for("openai", "opus"), "gpt-4o-mini");
        assert_eq!(r.model_for("gemini", "o4-mini"), "gemini-1.5-flash");
    }

    #[test]
    fn test_active_provider() {
        assert_eq!(router(&["gemini", "openai"]).active_provider(), Some("gemini"));
        assert_eq!(router(&[]).active_provider(), None);
    }

    #[tokio::test]
    async fn test_empty_preference_fails() {
        let err = router(&[])
            .generate("hi", &GenerateOptions::new("gpt-4o-mini", 10))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("No providers configured"));
    }

    #[tokio::test]
    async fn test_unknown_provider_reported() {
        let err = router(&["carrier-pigeon"])
            .generate("hi", &GenerateOptions::new("gpt-4o-mini", 10))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Unknown provider"));
    }
}
