//! The dashboard tabs that call out to the text-generation service.
//!
//! Each panel owns its request state, its result and an auth subscription.
//! `poll` runs every frame whether or not the panel is visible.

pub mod ai_analysis;
pub mod community;
pub mod vrm_analyzer;

pub use ai_analysis::AiAnalysisPanel;
pub use community::CommunityPanel;
pub use vrm_analyzer::VrmAnalyzerPanel;

use crate::widgets::card;
use egui::{RichText, Ui};
use shared::PanelError;

/// What a panel asks of the app after drawing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelResponse {
    pub login_requested: bool,
}

/// Shown in place of a panel while nobody is signed in.
pub(crate) fn sign_in_card(ui: &mut Ui, title: &str, description: &str) -> PanelResponse {
    card(ui, title, Some(description), |ui| PanelResponse {
        login_requested: ui.button("Sign In to Continue").clicked(),
    })
}

/// Full-width trigger. Disabled with a spinner while `running`.
pub(crate) fn trigger_button(ui: &mut Ui, running: bool, idle: &str, busy: &str) -> bool {
    if running {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(busy);
        });
        return false;
    }
    ui.add_sized([ui.available_width(), 32.0], egui::Button::new(idle))
        .clicked()
}

pub(crate) fn failure_note(ui: &mut Ui, failure: &PanelError) {
    ui.label(RichText::new(failure.to_string()).color(ui.visuals().error_fg_color));
}

/// Log a refused trigger. A refusal for want of a user asks the app to
/// start sign-in; anything else is already reflected by the button state.
pub(crate) fn note_refusal(panel: &str, result: Result<(), PanelError>) -> PanelResponse {
    match result {
        Ok(()) => PanelResponse::default(),
        Err(e) => {
            tracing::debug!(panel, reason = %e, "trigger ignored");
            PanelResponse {
                login_requested: e.needs_login(),
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use anyhow::{anyhow, Result};
    use providers::{GenerateOptions, TextGenerator};
    use services::auth::LoginFlow;
    use services::storage::StoredObject;
    use services::{Analyzer, AuthSession, AuthSubscription, BlobStorage, UploadOptions, UploadRequest};
    use shared::settings::AppSettings;
    use shared::user::UserRef;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    pub(crate) struct FakeGenerator {
        pub(crate) calls: AtomicUsize,
        reply: Option<String>,
        // Calls answered before the service starts failing
        answers: usize,
    }

    impl FakeGenerator {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: Some(text.to_string()),
                answers: usize::MAX,
            }
        }

        pub(crate) fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                reply: None,
                answers: 0,
            }
        }

        /// Answers once, then fails every later call.
        pub(crate) fn replying_once(text: &str) -> Self {
            Self {
                answers: 1,
                ..Self::replying(text)
            }
        }
    }

    #[async_trait::async_trait]
    impl TextGenerator for FakeGenerator {
        fn id(&self) -> &'static str {
            "fake"
        }

        async fn generate(&self, _prompt: &str, _options: &GenerateOptions) -> Result<String> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply
                .clone()
                .filter(|_| call < self.answers)
                .ok_or_else(|| anyhow!("service unavailable"))
        }
    }

    pub(crate) struct FakeStorage;

    #[async_trait::async_trait]
    impl BlobStorage for FakeStorage {
        async fn upload(&self, request: UploadRequest, _options: UploadOptions) -> Result<StoredObject> {
            Ok(StoredObject {
                public_url: format!("https://cdn.example.com/{}", request.path),
                path: request.path,
            })
        }
    }

    pub(crate) struct FakeLogin;

    #[async_trait::async_trait]
    impl LoginFlow for FakeLogin {
        async fn login(&self) -> Result<UserRef> {
            Ok(UserRef {
                id: "tester".into(),
                email: None,
                name: Some("Tester".into()),
            })
        }
    }

    pub(crate) fn fake_analyzer(generator: Arc<FakeGenerator>) -> Analyzer {
        Analyzer::new(generator, Arc::new(FakeStorage), &AppSettings::default())
    }

    pub(crate) fn signed_out() -> (AuthSession, AuthSubscription) {
        let session = AuthSession::new(Arc::new(FakeLogin));
        let subscription = session.subscribe();
        (session, subscription)
    }

    pub(crate) async fn signed_in() -> (AuthSession, AuthSubscription) {
        let (session, subscription) = signed_out();
        session.login().await.expect("fake login");
        (session, subscription)
    }

    /// Poll until something settles.
    pub(crate) async fn settle(mut poll: impl FnMut() -> bool) {
        for _ in 0..200 {
            if poll() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("nothing settled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_refusal_requests_login() {
        let response = note_refusal("ai", Err(PanelError::AuthRequired));
        assert!(response.login_requested);

        let response = note_refusal("ai", Err(PanelError::Busy));
        assert!(!response.login_requested);
        assert_eq!(note_refusal("ai", Ok(())), PanelResponse::default());
    }
}
