//! Sign-in state.
//!
//! The current user is an observable value. Panels hold an
//! [`AuthSubscription`] for as long as they live; dropping it unsubscribes.

use anyhow::{anyhow, Result};
use providers::oauth_helper::{fetch_user, OAuthFlow};
use shared::settings::LoginSettings;
use shared::user::UserRef;
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<UserRef>,
}

impl AuthState {
    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }
}

/// Whatever interactive step produces a signed-in user.
#[async_trait::async_trait]
pub trait LoginFlow: Send + Sync {
    async fn login(&self) -> Result<UserRef>;
}

/// Browser OAuth sign-in followed by a user info lookup.
pub struct OAuthLogin {
    settings: LoginSettings,
}

impl OAuthLogin {
    pub fn new(settings: LoginSettings) -> Self {
        Self { settings }
    }
}

#[async_trait::async_trait]
impl LoginFlow for OAuthLogin {
    async fn login(&self) -> Result<UserRef> {
        let userinfo_url = self
            .settings
            .userinfo_url
            .clone()
            .ok_or_else(|| anyhow!("Sign-in is not configured: missing user info URL"))?;
        let flow = OAuthFlow::from_settings(&self.settings)?;
        let tokens = flow.authenticate().await?;
        fetch_user(&userinfo_url, &tokens.access_token).await
    }
}

#[derive(Clone)]
pub struct AuthSession {
    state: Arc<watch::Sender<AuthState>>,
    flow: Arc<dyn LoginFlow>,
}

impl AuthSession {
    pub fn new(flow: Arc<dyn LoginFlow>) -> Self {
        let (tx, _rx) = watch::channel(AuthState::default());
        Self {
            state: Arc::new(tx),
            flow,
        }
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.borrow().is_signed_in()
    }

    pub fn subscribe(&self) -> AuthSubscription {
        AuthSubscription {
            rx: self.state.subscribe(),
        }
    }

    /// Live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }

    /// Run the login flow and publish the user to every subscriber.
    pub async fn login(&self) -> Result<UserRef> {
        let user = self.flow.login().await?;
        tracing::info!(user = %user.display_name(), "signed in");
        self.state.send_replace(AuthState {
            user: Some(user.clone()),
        });
        Ok(user)
    }

    pub fn sign_out(&self) {
        let previous = self.state.send_replace(AuthState::default());
        if previous.is_signed_in() {
            tracing::info!("signed out");
        }
    }
}

/// A scoped view of the auth state. Unsubscribes on drop.
pub struct AuthSubscription {
    rx: watch::Receiver<AuthState>,
}

impl AuthSubscription {
    pub fn current(&self) -> AuthState {
        self.rx.borrow().clone()
    }

    pub fn user_present(&self) -> bool {
        self.rx.borrow().is_signed_in()
    }

    /// The new state if it changed since the last call, without blocking.
    pub fn poll_change(&mut self) -> Option<AuthState> {
        match self.rx.has_changed() {
            Ok(true) => Some(self.rx.borrow_and_update().clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct FakeLogin {
        pub(crate) calls: AtomicUsize,
        pub(crate) fail: bool,
    }

    impl FakeLogin {
        pub(crate) fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }
    }

    #[async_trait::async_trait]
    impl LoginFlow for FakeLogin {
        async fn login(&self) -> Result<UserRef> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(anyhow!("popup closed"));
            }
            Ok(UserRef {
                id: "user-1".into(),
                email: Some("fan@example.com".into()),
                name: None,
            })
        }
    }

    #[tokio::test]
    async fn test_login_publishes_user() {
        let session = AuthSession::new(Arc::new(FakeLogin::ok()));
        let mut sub = session.subscribe();
        assert!(!sub.user_present());
        assert!(sub.poll_change().is_none());

        session.login().await.unwrap();

        let state = sub.poll_change().expect("change after login");
        assert_eq!(state.user.unwrap().id, "user-1");
        assert!(sub.poll_change().is_none());
        assert!(session.is_signed_in());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_user_absent() {
        let flow = Arc::new(FakeLogin {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let session = AuthSession::new(flow.clone());
        let sub = session.subscribe();

        assert!(session.login().await.is_err());
        assert!(!sub.user_present());
        assert_eq!(flow.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_sign_out_reaches_existing_subscription() {
        let session = AuthSession::new(Arc::new(FakeLogin::ok()));
        session.login().await.unwrap();
        let mut sub = session.subscribe();
        assert!(sub.user_present());

        session.sign_out();

        let state = sub.poll_change().expect("change after sign out");
        assert!(!state.is_signed_in());
        assert!(!sub.user_present());
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let session = AuthSession::new(Arc::new(FakeLogin::ok()));
        let first = session.subscribe();
        let second = session.subscribe();
        assert_eq!(session.subscriber_count(), 2);

        drop(first);
        assert_eq!(session.subscriber_count(), 1);
        drop(second);
        assert_eq!(session.subscriber_count(), 0);

        // Publishing with nobody listening still updates the value.
        session.sign_out();
        assert!(!session.current().is_signed_in());
    }
}
