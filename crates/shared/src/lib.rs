pub mod canned;
pub mod error;
pub mod facts;
pub mod metrics;
pub mod panel;
pub mod results;
pub mod selection;
pub mod tabs;

pub use error::PanelError;

pub mod settings {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct OAuthCredentials {
        pub access_token: String,
        pub refresh_token: Option<String>,
        pub expires_at: Option<i64>, // Unix timestamp
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct ProviderAuth {
        pub api_key: Option<String>,
        pub oauth: Option<OAuthCredentials>,
    }

    impl ProviderAuth {
        /// Bearer token from the settings, if any was configured.
        pub fn token(&self) -> Option<String> {
            self.api_key
                .clone()
                .filter(|k| !k.trim().is_empty())
                .or_else(|| self.oauth.as_ref().map(|o| o.access_token.clone()))
        }
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ModelProvider {
        pub provider_preference: Vec<String>, // e.g., ["openai", "gemini"]
        pub openai_model: String,             // e.g., "gpt-4o-mini"
        pub gemini_model: String,             // e.g., "gemini-1.5-flash"
        #[serde(default)]
        pub openai_base_url: Option<String>,

        // Authentication (either API key or OAuth)
        pub openai_auth: ProviderAuth,
        pub gemini_auth: ProviderAuth,
    }

    /// Response length caps for each panel's generation request.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub struct GenerationLimits {
        pub analysis_max_tokens: u32,
        pub chat_max_tokens: u32,
        pub community_max_tokens: u32,
        pub model_file_max_tokens: u32,
    }

    impl Default for GenerationLimits {
        fn default() -> Self {
            Self {
                analysis_max_tokens: 2000,
                chat_max_tokens: 1000,
                community_max_tokens: 1500,
                model_file_max_tokens: 1500,
            }
        }
    }

    /// Object storage used for model file uploads
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct StorageSettings {
        pub base_url: Option<String>,
        pub bucket: String,
        pub api_key: Option<String>,
        /// Folder uploads are placed under
        pub object_prefix: String,
    }

    impl Default for StorageSettings {
        fn default() -> Self {
            Self {
                base_url: None,
                bucket: "uploads".into(),
                api_key: None,
                object_prefix: "vrm-analysis".into(),
            }
        }
    }

    /// OAuth endpoints for the sign-in flow
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct LoginSettings {
        pub client_id: Option<String>,
        pub client_secret: Option<String>,
        pub auth_url: Option<String>,
        pub token_url: Option<String>,
        pub userinfo_url: Option<String>,
        #[serde(default)]
        pub scopes: Vec<String>,
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct UserProfile {
        pub dark_mode: bool,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct AppSettings {
        pub model: ModelProvider,
        /// Model name sent with every generation request
        #[serde(default = "default_request_model")]
        pub request_model: String,
        #[serde(default)]
        pub generation: GenerationLimits,
        #[serde(default)]
        pub storage: StorageSettings,
        #[serde(default)]
        pub login: LoginSettings,
        #[serde(default)]
        pub user_profile: UserProfile,
    }

    fn default_request_model() -> String {
        "gpt-4o-mini".into()
    }

    impl Default for AppSettings {
        fn default() -> Self {
            Self {
                model: ModelProvider {
                    provider_preference: vec!["openai".into(), "gemini".into()],
                    openai_model: "gpt-4o-mini".into(),
                    gemini_model: "gemini-1.5-flash".into(),
                    openai_base_url: None,
                    openai_auth: ProviderAuth::default(),
                    gemini_auth: ProviderAuth::default(),
                },
                request_model: default_request_model(),
                generation: GenerationLimits::default(),
                storage: StorageSettings::default(),
                login: LoginSettings::default(),
                user_profile: UserProfile::default(),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_older_settings_fill_in_defaults() {
            let json = serde_json::json!({
                "model": {
                    "provider_preference": ["gemini"],
                    "openai_model": "gpt-4o-mini",
                    "gemini_model": "gemini-1.5-pro",
                    "openai_auth": { "api_key": null, "oauth": null },
                    "gemini_auth": { "api_key": "abc", "oauth": null }
                }
            });

            let settings: AppSettings = serde_json::from_value(json).unwrap();
            assert_eq!(settings.request_model, "gpt-4o-mini");
            assert_eq!(settings.generation.analysis_max_tokens, 2000);
            assert_eq!(settings.storage.object_prefix, "vrm-analysis");
            assert_eq!(settings.model.gemini_auth.token().as_deref(), Some("abc"));
        }

        #[test]
        fn test_blank_api_key_falls_back_to_oauth() {
            let auth = ProviderAuth {
                api_key: Some("  ".into()),
                oauth: Some(OAuthCredentials {
                    access_token: "tok".into(),
                    refresh_token: None,
                    expires_at: None,
                }),
            };
            assert_eq!(auth.token().as_deref(), Some("tok"));
            assert_eq!(ProviderAuth::default().token(), None);
        }
    }
}

/// Signed-in user as reported by the auth provider.
pub mod user {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct UserRef {
        pub id: String,
        #[serde(default)]
        pub email: Option<String>,
        #[serde(default)]
        pub name: Option<String>,
    }

    impl UserRef {
        pub fn display_name(&self) -> &str {
            self.name
                .as_deref()
                .or(self.email.as_deref())
                .unwrap_or(&self.id)
        }
    }
}
