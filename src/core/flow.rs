use crate::utils::error::{ApiError, Result, SofiaError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Sequence number handed out when a submission starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Request/response state shared by the translation and STAR flows.
///
/// Only the outcome of the most recently issued ticket is ever applied. The
/// result and the error are never both present.
#[derive(Debug, Clone)]
pub struct FlowState<T> {
    name: &'static str,
    phase: FlowPhase,
    result: Option<T>,
    error: Option<ApiError>,
    latest: u64,
    in_flight: bool,
}

impl<T> FlowState<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            phase: FlowPhase::Idle,
            result: None,
            error: None,
            latest: 0,
            in_flight: false,
        }
    }

    pub fn begin(&mut self) -> Result<Ticket> {
        if self.in_flight {
            return Err(SofiaError::SubmissionInFlight {
                flow: self.name.to_string(),
            });
        }

        self.latest += 1;
        self.in_flight = true;
        self.phase = FlowPhase::Submitting;
        // The previous result stays on screen until the new outcome lands.
        self.error = None;
        tracing::debug!("{} submission #{} started", self.name, self.latest);

        Ok(Ticket(self.latest))
    }

    /// Applies an outcome. Returns false when the ticket is stale and the
    /// outcome was discarded.
    pub fn settle(&mut self, ticket: Ticket, outcome: std::result::Result<T, ApiError>) -> bool {
        if ticket.0 != self.latest {
            tracing::debug!(
                "Discarding stale {} response #{} (latest #{})",
                self.name,
                ticket.0,
                self.latest
            );
            return false;
        }

        self.in_flight = false;
        match outcome {
            Ok(value) => {
                self.result = Some(value);
                self.error = None;
                self.phase = FlowPhase::Succeeded;
            }
            Err(e) => {
                tracing::warn!("{} submission #{} failed: {}", self.name, ticket.0, e);
                self.result = None;
                self.error = Some(e);
                self.phase = FlowPhase::Failed;
            }
        }
        true
    }

    /// Guards the call behind `ticket`. If the guard is dropped before
    /// `complete`, the submission is settled as a transport failure carrying
    /// `fallback`, so a cancelled call never leaves the flow disabled.
    pub fn pending(&mut self, ticket: Ticket, fallback: &'static str) -> PendingCall<'_, T> {
        PendingCall {
            state: self,
            ticket,
            fallback,
            armed: true,
        }
    }

    /// Back to idle; any response still in flight will be discarded.
    pub fn reset(&mut self) {
        self.latest += 1;
        self.in_flight = false;
        self.phase = FlowPhase::Idle;
        self.result = None;
        self.error = None;
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn result(&self) -> Option<&T> {
        self.result.as_ref()
    }

    /// Message for the alert region.
    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().map(ApiError::user_message)
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

/// Outstanding call on a `FlowState`, see `FlowState::pending`.
pub struct PendingCall<'a, T> {
    state: &'a mut FlowState<T>,
    ticket: Ticket,
    fallback: &'static str,
    armed: bool,
}

impl<T> PendingCall<'_, T> {
    /// The call returned; the caller settles the outcome itself.
    pub fn complete(mut self) {
        self.armed = false;
    }
}

impl<T> Drop for PendingCall<'_, T> {
    fn drop(&mut self) {
        if !self.armed || !self.state.in_flight || self.ticket.0 != self.state.latest {
            return;
        }
        tracing::warn!(
            "{} submission #{} was cancelled before a response arrived",
            self.state.name,
            self.ticket.0
        );
        self.state.settle(
            self.ticket,
            Err(ApiError::Transport {
                message: self.fallback.to_string(),
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(message: &str) -> ApiError {
        ApiError::Server {
            status: 500,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_submit_disables_until_settled() {
        let mut state: FlowState<String> = FlowState::new("test");
        assert_eq!(state.phase(), FlowPhase::Idle);

        let ticket = state.begin().unwrap();
        assert!(state.is_submitting());
        assert!(matches!(
            state.begin(),
            Err(SofiaError::SubmissionInFlight { .. })
        ));

        assert!(state.settle(ticket, Err(server_error("boom"))));
        assert!(!state.is_submitting());
        assert_eq!(state.phase(), FlowPhase::Failed);

        let ticket = state.begin().unwrap();
        assert!(state.settle(ticket, Ok("done".to_string())));
        assert!(!state.is_submitting());
        assert_eq!(state.phase(), FlowPhase::Succeeded);
    }

    #[test]
    fn test_result_and_error_are_exclusive() {
        let mut state: FlowState<String> = FlowState::new("test");

        let ticket = state.begin().unwrap();
        state.settle(ticket, Ok("first".to_string()));
        assert_eq!(state.result().map(String::as_str), Some("first"));
        assert_eq!(state.error(), None);

        let ticket = state.begin().unwrap();
        // Old result remains visible while the new call runs.
        assert_eq!(state.result().map(String::as_str), Some("first"));
        state.settle(ticket, Err(server_error("Quota exceeded")));
        assert_eq!(state.result(), None);
        assert_eq!(state.error(), Some("Quota exceeded"));

        let ticket = state.begin().unwrap();
        assert_eq!(state.error(), None);
        state.settle(ticket, Ok("second".to_string()));
        assert_eq!(state.result().map(String::as_str), Some("second"));
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_stale_response_after_reset_is_discarded() {
        let mut state: FlowState<String> = FlowState::new("test");

        let old = state.begin().unwrap();
        state.reset();
        let new = state.begin().unwrap();
        assert_ne!(old, new);

        assert!(!state.settle(old, Ok("stale".to_string())));
        assert_eq!(state.result(), None);
        assert!(state.is_submitting());

        assert!(state.settle(new, Ok("fresh".to_string())));
        assert_eq!(state.result().map(String::as_str), Some("fresh"));
    }

    #[test]
    fn test_abandoned_call_re_enables_submission() {
        let mut state: FlowState<String> = FlowState::new("test");

        let ticket = state.begin().unwrap();
        drop(state.pending(ticket, "Failed to test"));

        assert!(!state.is_submitting());
        assert_eq!(state.phase(), FlowPhase::Failed);
        assert_eq!(state.error(), Some("Failed to test"));
        assert!(state.begin().is_ok());
    }

    #[test]
    fn test_completed_call_is_left_to_settle() {
        let mut state: FlowState<String> = FlowState::new("test");

        let ticket = state.begin().unwrap();
        state.pending(ticket, "Failed to test").complete();
        assert!(state.is_submitting());

        assert!(state.settle(ticket, Ok("done".to_string())));
        assert_eq!(state.phase(), FlowPhase::Succeeded);
    }
}
