//! Request state for panels that call out to a collaborator.
//!
//! `Idle -> Running -> {Succeeded, Failed}`, re-entrant from either terminal
//! state. A run is identified by a [`RunTicket`]; completions carrying a
//! ticket other than the in-flight one are dropped, so a late answer can
//! never land in a panel that has since been reset or restarted.

use std::fmt::Display;

use crate::error::PanelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelPhase {
    Idle,
    Running,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunTicket(u64);

#[derive(Debug)]
pub struct PanelState<T> {
    phase: PanelPhase,
    result: Option<T>,
    failure: Option<PanelError>,
    in_flight: Option<RunTicket>,
    next_ticket: u64,
    failure_message: &'static str,
}

impl<T> PanelState<T> {
    /// `failure_message` is what the user sees when a run fails.
    pub fn new(failure_message: &'static str) -> Self {
        Self {
            phase: PanelPhase::Idle,
            result: None,
            failure: None,
            in_flight: None,
            next_ticket: 0,
            failure_message,
        }
    }

    pub fn phase(&self) -> PanelPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == PanelPhase::Running
    }

    /// The trigger is inert while a run is in flight.
    pub fn can_trigger(&self) -> bool {
        !self.is_running()
    }

    /// Last successful result. Stays visible while a new run is in flight.
    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Set after a failed run until the next trigger. Always a
    /// [`PanelError::CollaboratorFailure`] carrying the generic message.
    pub fn failure(&self) -> Option<&PanelError> {
        self.failure.as_ref()
    }

    /// Enter `Running`. Refused while running or without a signed-in user.
    pub fn begin(&mut self, user_present: bool) -> Result<RunTicket, PanelError> {
        if self.is_running() {
            return Err(PanelError::Busy);
        }
        if !user_present {
            return Err(PanelError::AuthRequired);
        }

        let ticket = RunTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.failure = None;
        self.phase = PanelPhase::Running;
        Ok(ticket)
    }

    /// Store a fresh result. Returns false if `ticket` is stale.
    pub fn succeed(&mut self, ticket: RunTicket, value: T) -> bool {
        if !self.take_in_flight(ticket) {
            return false;
        }
        self.result = Some(value);
        self.phase = PanelPhase::Succeeded;
        true
    }

    /// Record the generic failure message. The last good result, if any,
    /// stays. Returns false if `ticket` is stale.
    pub fn fail(&mut self, ticket: RunTicket) -> bool {
        if !self.take_in_flight(ticket) {
            return false;
        }
        self.failure = Some(PanelError::CollaboratorFailure(
            self.failure_message.to_string(),
        ));
        self.phase = PanelPhase::Failed;
        true
    }

    /// Apply a run outcome, logging the real error on failure.
    pub fn finish<E: Display>(&mut self, ticket: RunTicket, outcome: Result<T, E>) -> bool {
        match outcome {
            Ok(value) => self.succeed(ticket, value),
            Err(e) => {
                if self.in_flight == Some(ticket) {
                    tracing::warn!(error = %e, "panel run failed");
                }
                self.fail(ticket)
            }
        }
    }

    /// Back to `Idle`, dropping the result and invalidating any in-flight run.
    pub fn reset(&mut self) {
        self.phase = PanelPhase::Idle;
        self.result = None;
        self.failure = None;
        self.in_flight = None;
    }

    fn take_in_flight(&mut self, ticket: RunTicket) -> bool {
        if self.in_flight != Some(ticket) {
            tracing::debug!(?ticket, "dropping stale panel completion");
            return false;
        }
        self.in_flight = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAILED: &str = "Analysis failed. Please try again.";

    #[test]
    fn test_begin_requires_user() {
        let mut panel = PanelState::<String>::new(FAILED);
        assert_eq!(panel.begin(false), Err(PanelError::AuthRequired));
        assert_eq!(panel.phase(), PanelPhase::Idle);
    }

    #[test]
    fn test_second_begin_while_running_is_busy() {
        let mut panel = PanelState::<String>::new(FAILED);
        let ticket = panel.begin(true).unwrap();
        assert!(!panel.can_trigger());
        assert_eq!(panel.begin(true), Err(PanelError::Busy));
        assert!(panel.succeed(ticket, "done".to_string()));
        assert!(panel.can_trigger());
    }

    #[test]
    fn test_stale_while_revalidate() {
        let mut panel = PanelState::new(FAILED);
        let first = panel.begin(true).unwrap();
        assert!(panel.succeed(first, "one".to_string()));

        let second = panel.begin(true).unwrap();
        assert_eq!(panel.phase(), PanelPhase::Running);
        assert_eq!(panel.result().map(String::as_str), Some("one"));

        assert!(panel.succeed(second, "two".to_string()));
        assert_eq!(panel.result().map(String::as_str), Some("two"));
        assert_eq!(panel.phase(), PanelPhase::Succeeded);
    }

    #[test]
    fn test_failure_reenables_trigger_with_message() {
        let mut panel = PanelState::<String>::new(FAILED);
        let ticket = panel.begin(true).unwrap();
        assert!(panel.finish(ticket, Err::<String, _>("connection reset")));

        assert_eq!(panel.phase(), PanelPhase::Failed);
        assert!(panel.can_trigger());
        assert_eq!(
            panel.failure(),
            Some(&PanelError::CollaboratorFailure(FAILED.to_string()))
        );
        assert_eq!(panel.failure().map(ToString::to_string).as_deref(), Some(FAILED));
        assert!(panel.result().is_none());

        panel.begin(true).unwrap();
        assert!(panel.failure().is_none());
    }

    #[test]
    fn test_failed_rerun_keeps_last_result() {
        let mut panel = PanelState::new(FAILED);
        let first = panel.begin(true).unwrap();
        assert!(panel.succeed(first, "one".to_string()));

        let second = panel.begin(true).unwrap();
        assert!(panel.fail(second));

        assert_eq!(panel.phase(), PanelPhase::Failed);
        assert_eq!(panel.result().map(String::as_str), Some("one"));
        assert!(panel.failure().is_some());
        assert!(panel.can_trigger());
    }

    #[test]
    fn test_reset_drops_late_completion() {
        let mut panel = PanelState::new(FAILED);
        let ticket = panel.begin(true).unwrap();
        panel.reset();

        assert!(!panel.succeed(ticket, "late".to_string()));
        assert!(panel.result().is_none());
        assert_eq!(panel.phase(), PanelPhase::Idle);
    }

    #[test]
    fn test_old_ticket_cannot_complete_new_run() {
        let mut panel = PanelState::new(FAILED);
        let old = panel.begin(true).unwrap();
        panel.reset();
        let current = panel.begin(true).unwrap();
        assert_ne!(old, current);

        assert!(!panel.fail(old));
        assert!(panel.is_running());
        assert!(panel.succeed(current, 7));
        assert_eq!(panel.result(), Some(&7));
    }
}
