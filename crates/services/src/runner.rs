//! Drives a [`PanelState`] from work spawned on the async runtime.
//!
//! The UI thread calls [`ActionPanel::trigger`] on a click and
//! [`ActionPanel::poll`] once per frame. The outcome travels back over a
//! oneshot channel; nothing blocks the frame.

use anyhow::{anyhow, Result};
use shared::panel::{PanelPhase, PanelState, RunTicket};
use shared::PanelError;
use std::future::Future;
use tokio::runtime::Handle;
use tokio::sync::oneshot::{self, error::TryRecvError};

pub struct ActionPanel<T> {
    name: &'static str,
    state: PanelState<T>,
    pending: Option<(RunTicket, oneshot::Receiver<Result<T>>)>,
}

impl<T: Send + 'static> ActionPanel<T> {
    pub fn new(name: &'static str, failure_message: &'static str) -> Self {
        Self {
            name,
            state: PanelState::new(failure_message),
            pending: None,
        }
    }

    pub fn state(&self) -> &PanelState<T> {
        &self.state
    }

    pub fn phase(&self) -> PanelPhase {
        self.state.phase()
    }

    pub fn result(&self) -> Option<&T> {
        self.state.result()
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Start a run. `work` is only invoked once the panel has accepted the
    /// trigger, so a refused click never reaches the collaborator.
    pub fn trigger<F, Fut>(
        &mut self,
        runtime: &Handle,
        user_present: bool,
        work: F,
    ) -> Result<RunTicket, PanelError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>> + Send + 'static,
    {
        let ticket = match self.state.begin(user_present) {
            Ok(ticket) => ticket,
            Err(e) => {
                tracing::debug!(panel = self.name, reason = %e, "trigger refused");
                return Err(e);
            }
        };

        let (tx, rx) = oneshot::channel();
        let fut = work();
        let name = self.name;
        runtime.spawn(async move {
            if tx.send(fut.await).is_err() {
                tracing::debug!(panel = name, "panel went away before the run finished");
            }
        });

        tracing::info!(panel = self.name, ?ticket, "run started");
        self.pending = Some((ticket, rx));
        Ok(ticket)
    }

    /// Collect a finished run, if any. Returns true when the state changed.
    pub fn poll(&mut self) -> bool {
        let Some((ticket, rx)) = self.pending.as_mut() else {
            return false;
        };
        let ticket = *ticket;
        let outcome = match rx.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return false,
            Err(TryRecvError::Closed) => Err(anyhow!("run ended without a result")),
        };
        self.pending = None;

        if outcome.is_ok() {
            tracing::info!(panel = self.name, ?ticket, "run succeeded");
        }
        self.state
            .finish(ticket, outcome.map_err(|e| format!("{}: {:#}", self.name, e)))
    }

    /// Drop the result and forget any in-flight run.
    pub fn reset(&mut self) {
        self.pending = None;
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::tests::FakeGenerator;
    use crate::analyzer::Analyzer;
    use crate::storage::UnconfiguredStorage;
    use shared::settings::AppSettings;
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    const FAILED: &str = "Analysis failed. Please try again.";

    async fn settle<T: Send + 'static>(panel: &mut ActionPanel<T>) {
        for _ in 0..200 {
            if panel.poll() {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("run never settled");
    }

    fn analyzer(generator: Arc<FakeGenerator>) -> Analyzer {
        Analyzer::new(
            generator,
            Arc::new(UnconfiguredStorage),
            &AppSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_second_trigger_while_running_is_refused() {
        let generator = Arc::new(FakeGenerator::replying("report"));
        let analyzer = analyzer(generator.clone());
        let handle = Handle::current();
        let mut panel = ActionPanel::new("community", FAILED);

        let a = analyzer.clone();
        panel
            .trigger(&handle, true, move || async move { a.analyze_community().await })
            .unwrap();
        let a = analyzer.clone();
        let second = panel.trigger(&handle, true, move || async move {
            a.analyze_community().await
        });
        assert_eq!(second, Err(PanelError::Busy));
        assert!(panel.is_running());

        settle(&mut panel).await;
        assert_eq!(panel.phase(), PanelPhase::Succeeded);
        assert_eq!(panel.result().unwrap().narrative, "report");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_signed_out_trigger_never_calls_generator() {
        let generator = Arc::new(FakeGenerator::replying("report"));
        let analyzer = analyzer(generator.clone());
        let mut panel = ActionPanel::new("ai", FAILED);

        let result = panel.trigger(&Handle::current(), false, move || async move {
            analyzer.analyze_project().await
        });

        assert_eq!(result, Err(PanelError::AuthRequired));
        assert_eq!(panel.phase(), PanelPhase::Idle);
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failure_shows_message_and_reenables_trigger() {
        let analyzer = analyzer(Arc::new(FakeGenerator::failing()));
        let handle = Handle::current();
        let mut panel = ActionPanel::new("ai", FAILED);

        let a = analyzer.clone();
        panel
            .trigger(&handle, true, move || async move { a.analyze_project().await })
            .unwrap();
        settle(&mut panel).await;

        assert_eq!(panel.phase(), PanelPhase::Failed);
        assert_eq!(
            panel.state().failure(),
            Some(&PanelError::CollaboratorFailure(FAILED.to_string()))
        );
        assert!(panel.result().is_none());
        assert!(panel.state().can_trigger());

        let retry = panel.trigger(&handle, true, move || async move {
            analyzer.analyze_project().await
        });
        assert!(retry.is_ok());
    }

    #[tokio::test]
    async fn test_reset_discards_late_result() {
        let (release, gate) = oneshot::channel::<()>();
        let mut panel = ActionPanel::<String>::new("vrm", FAILED);

        panel
            .trigger(&Handle::current(), true, move || async move {
                let _ = gate.await;
                Ok("late".to_string())
            })
            .unwrap();
        panel.reset();
        let _ = release.send(());
        tokio::time::sleep(Duration::from_millis(20)).await;

        assert!(!panel.poll());
        assert_eq!(panel.phase(), PanelPhase::Idle);
        assert!(panel.result().is_none());
    }

    #[tokio::test]
    async fn test_failed_rerun_leaves_previous_result() {
        let mut panel = ActionPanel::<String>::new("community", FAILED);
        let handle = Handle::current();

        panel
            .trigger(&handle, true, || async { Ok("first".to_string()) })
            .unwrap();
        settle(&mut panel).await;
        panel
            .trigger(&handle, true, || async { Err(anyhow!("quota exceeded")) })
            .unwrap();
        settle(&mut panel).await;

        assert_eq!(panel.phase(), PanelPhase::Failed);
        assert_eq!(panel.result().map(String::as_str), Some("first"));
        assert!(panel.state().failure().is_some());
    }

    #[tokio::test]
    async fn test_rerun_keeps_previous_result_visible() {
        let mut panel = ActionPanel::<String>::new("ai", FAILED);
        let handle = Handle::current();

        panel
            .trigger(&handle, true, || async { Ok("first".to_string()) })
            .unwrap();
        settle(&mut panel).await;

        let (release, gate) = oneshot::channel::<()>();
        panel
            .trigger(&handle, true, move || async move {
                let _ = gate.await;
                Ok("second".to_string())
            })
            .unwrap();
        assert!(panel.is_running());
        assert_eq!(panel.result().map(String::as_str), Some("first"));

        let _ = release.send(());
        settle(&mut panel).await;
        assert_eq!(panel.result().map(String::as_str), Some("second"));
    }
}
