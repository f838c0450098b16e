//! Application state: the composition of collaborators, the tab bar, the
//! three request panels and the sign-in session.

use crate::config;
use crate::panels::{AiAnalysisPanel, CommunityPanel, PanelResponse, VrmAnalyzerPanel};
use crate::settings_window::SettingsWindow;
use anyhow::{anyhow, Context, Result};
use providers::router::ProviderRouter;
use providers::TextGenerator;
use services::auth::OAuthLogin;
use services::storage::{HttpBlobStorage, UnconfiguredStorage};
use services::{Analyzer, AuthSession, AuthSubscription, BlobStorage, LoginFlow};
use shared::settings::AppSettings;
use shared::tabs::{DashboardTab, TabController};
use shared::user::UserRef;
use std::sync::Arc;
use tokio::runtime::{Handle, Runtime};
use tokio::sync::oneshot::{self, error::TryRecvError};

pub const SIGN_IN_FAILED: &str = "Sign-in failed. Check the sign-in settings and try again.";

/// The services every panel calls into.
pub struct Collaborators {
    pub generator: Arc<dyn TextGenerator>,
    pub storage: Arc<dyn BlobStorage>,
}

impl Collaborators {
    pub fn from_settings(settings: &AppSettings) -> Self {
        let storage: Arc<dyn BlobStorage> = match HttpBlobStorage::from_settings(&settings.storage) {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                tracing::info!(reason = %format!("{:#}", e), "model uploads disabled");
                Arc::new(UnconfiguredStorage)
            }
        };
        let router = ProviderRouter::new(settings.model.clone());
        tracing::info!(
            generator = router.id(),
            provider = ?router.active_provider(),
            "text generation ready"
        );
        Self {
            generator: Arc::new(router),
            storage,
        }
    }
}

/// The three request panels. Rebuilt together when settings change.
pub struct Panels {
    pub ai: AiAnalysisPanel,
    pub community: CommunityPanel,
    pub vrm: VrmAnalyzerPanel,
}

impl Panels {
    fn new(analyzer: Analyzer, runtime: &Handle, auth: &AuthSession) -> Self {
        Self {
            ai: AiAnalysisPanel::new(analyzer.clone(), runtime.clone(), auth.subscribe()),
            community: CommunityPanel::new(analyzer.clone(), runtime.clone(), auth.subscribe()),
            vrm: VrmAnalyzerPanel::new(analyzer, runtime.clone(), auth.subscribe()),
        }
    }

    /// Every panel is polled, visible or not.
    fn poll(&mut self) -> bool {
        let ai = self.ai.poll();
        let community = self.community.poll();
        let vrm = self.vrm.poll();
        ai || community || vrm
    }

    fn is_busy(&self) -> bool {
        self.ai.is_busy() || self.community.is_busy() || self.vrm.is_busy()
    }
}

pub struct DashboardState {
    pub settings: AppSettings,
    pub tabs: TabController<DashboardTab>,
    pub panels: Panels,
    pub settings_window: SettingsWindow,
    /// One-line notice in the header (sign-in results and the like).
    pub status: Option<String>,
    auth: AuthSession,
    auth_view: AuthSubscription,
    login_rx: Option<oneshot::Receiver<Result<UserRef>>>,
    runtime: Handle,
    // Taken on drop
    owned_runtime: Option<Runtime>,
}

impl DashboardState {
    pub fn new(settings: AppSettings) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("analysis-worker")
            .build()
            .context("failed to start async runtime")?;
        let collaborators = Collaborators::from_settings(&settings);
        let login: Arc<dyn LoginFlow> = Arc::new(OAuthLogin::new(settings.login.clone()));
        Ok(Self::with_collaborators(settings, runtime, collaborators, login))
    }

    pub fn with_collaborators(
        settings: AppSettings,
        runtime: Runtime,
        collaborators: Collaborators,
        login: Arc<dyn LoginFlow>,
    ) -> Self {
        let auth = AuthSession::new(login);
        let analyzer = Analyzer::new(collaborators.generator, collaborators.storage, &settings);
        let handle = runtime.handle().clone();
        let panels = Panels::new(analyzer, &handle, &auth);
        Self {
            settings,
            tabs: TabController::default(),
            panels,
            settings_window: SettingsWindow::default(),
            status: None,
            auth_view: auth.subscribe(),
            auth,
            login_rx: None,
            runtime: handle,
            owned_runtime: Some(runtime),
        }
    }

    /// Collect finished work. Returns true if anything changed.
    pub fn poll_all(&mut self) -> bool {
        let panels = self.panels.poll();
        let login = self.poll_login();
        let auth = match self.auth_view.poll_change() {
            Some(state) => {
                tracing::debug!(signed_in = state.is_signed_in(), "auth state changed");
                true
            }
            None => false,
        };
        panels || login || auth
    }

    pub fn is_busy(&self) -> bool {
        self.panels.is_busy() || self.login_rx.is_some()
    }

    pub fn signed_in_user(&self) -> Option<UserRef> {
        self.auth_view.current().user
    }

    pub fn login_pending(&self) -> bool {
        self.login_rx.is_some()
    }

    pub fn start_login(&mut self) {
        if self.login_rx.is_some() || self.auth.is_signed_in() {
            return;
        }
        let (tx, rx) = oneshot::channel();
        let session = self.auth.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(session.login().await);
        });
        self.login_rx = Some(rx);
        self.status = Some("Waiting for sign-in in your browser...".into());
    }

    pub fn sign_out(&mut self) {
        self.auth.sign_out();
        self.status = None;
    }

    /// Act on what a panel asked for while drawing.
    pub fn handle(&mut self, response: PanelResponse) {
        if response.login_requested {
            self.start_login();
        }
    }

    fn poll_login(&mut self) -> bool {
        let Some(rx) = self.login_rx.as_mut() else {
            return false;
        };
        let outcome = match rx.try_recv() {
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(anyhow!("sign-in task ended without a result")),
            Ok(outcome) => outcome,
        };
        self.login_rx = None;
        match outcome {
            Ok(user) => {
                self.status = Some(format!("Signed in as {}", user.display_name()));
            }
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "sign-in failed");
                self.status = Some(SIGN_IN_FAILED.into());
            }
        }
        true
    }

    /// Save to disk, then switch to the new settings.
    pub fn save_settings(&mut self, settings: AppSettings) {
        match config::save_settings(&settings) {
            Ok(()) => self.settings_window.set_status("Settings saved", false),
            Err(e) => {
                tracing::warn!(error = %format!("{:#}", e), "failed to save settings");
                self.settings_window
                    .set_status(format!("Could not save settings: {:#}", e), true);
            }
        }
        let collaborators = Collaborators::from_settings(&settings);
        self.apply_settings(settings, collaborators);
    }

    /// Panels are rebuilt on the new collaborators; their results and any
    /// in-flight runs are dropped. Sign-in and the selected tab survive.
    pub fn apply_settings(&mut self, settings: AppSettings, collaborators: Collaborators) {
        let analyzer = Analyzer::new(collaborators.generator, collaborators.storage, &settings);
        self.panels = Panels::new(analyzer, &self.runtime, &self.auth);
        self.settings = settings;
        tracing::info!(
            providers = ?self.settings.model.provider_preference,
            "settings applied"
        );
    }
}

impl Drop for DashboardState {
    /// A sign-in may still be waiting on the browser callback.
    fn drop(&mut self) {
        if let Some(runtime) = self.owned_runtime.take() {
            runtime.shutdown_background();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::test_support::{FakeGenerator, FakeLogin, FakeStorage};
    use std::sync::atomic::Ordering;
    use std::time::Duration;

    struct RefusingLogin;

    #[async_trait::async_trait]
    impl LoginFlow for RefusingLogin {
        async fn login(&self) -> Result<UserRef> {
            Err(anyhow!("user closed the browser"))
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap()
    }

    fn state_with(generator: Arc<FakeGenerator>, login: Arc<dyn LoginFlow>) -> DashboardState {
        DashboardState::with_collaborators(
            AppSettings::default(),
            runtime(),
            Collaborators {
                generator,
                storage: Arc::new(FakeStorage),
            },
            login,
        )
    }

    fn wait_until(state: &mut DashboardState, mut done: impl FnMut(&DashboardState) -> bool) {
        for _ in 0..200 {
            state.poll_all();
            if done(state) {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("condition never reached");
    }

    #[test]
    fn test_default_settings_route_generation() {
        let collaborators = Collaborators::from_settings(&AppSettings::default());
        assert_eq!(collaborators.generator.id(), "router");
    }

    #[test]
    fn test_login_reaches_every_panel() {
        let mut state = state_with(Arc::new(FakeGenerator::replying("ok")), Arc::new(FakeLogin));
        assert!(state.signed_in_user().is_none());

        state.handle(PanelResponse {
            login_requested: true,
        });
        assert!(state.login_pending());
        wait_until(&mut state, |s| !s.login_pending());

        assert_eq!(state.status.as_deref(), Some("Signed in as Tester"));
        assert!(state.panels.ai.run_analysis().is_ok());
        assert!(state.panels.community.run_analysis().is_ok());
    }

    #[test]
    fn test_failed_login_stays_signed_out() {
        let mut state = state_with(Arc::new(FakeGenerator::replying("ok")), Arc::new(RefusingLogin));

        state.start_login();
        wait_until(&mut state, |s| !s.login_pending());

        assert!(state.signed_in_user().is_none());
        assert_eq!(state.status.as_deref(), Some(SIGN_IN_FAILED));
    }

    #[test]
    fn test_hidden_panel_finishes_its_run() {
        let generator = Arc::new(FakeGenerator::replying("Growing fast."));
        let mut state = state_with(generator.clone(), Arc::new(FakeLogin));
        state.start_login();
        wait_until(&mut state, |s| s.signed_in_user().is_some());

        state.tabs.select("community");
        state.panels.community.run_analysis().unwrap();
        state.tabs.select("overview");
        wait_until(&mut state, |s| !s.is_busy());

        let metrics = state.panels.community.analysis().result().unwrap();
        assert_eq!(metrics.narrative, "Growing fast.");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_new_settings_keep_session_and_tab() {
        let mut state = state_with(Arc::new(FakeGenerator::replying("first")), Arc::new(FakeLogin));
        state.start_login();
        wait_until(&mut state, |s| s.signed_in_user().is_some());
        state.panels.ai.run_analysis().unwrap();
        wait_until(&mut state, |s| !s.is_busy());
        state.tabs.select("ai");

        let mut settings = AppSettings::default();
        settings.user_profile.dark_mode = true;
        let replacement = Arc::new(FakeGenerator::replying("second"));
        state.apply_settings(
            settings,
            Collaborators {
                generator: replacement.clone(),
                storage: Arc::new(FakeStorage),
            },
        );

        assert!(state.settings.user_profile.dark_mode);
        assert_eq!(state.tabs.selected(), DashboardTab::AiAnalysis);
        assert!(state.signed_in_user().is_some());
        assert!(state.panels.ai.analysis().result().is_none());

        state.panels.ai.run_analysis().unwrap();
        wait_until(&mut state, |s| !s.is_busy());
        assert_eq!(replacement.calls.load(Ordering::SeqCst), 1);
    }
}
