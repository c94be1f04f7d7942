use crate::domain::model::FeedbackSubmission;
use crate::domain::ports::FeedbackSink;
use crate::utils::error::{ApiError, Result, SofiaError};
use crate::utils::validation::validate_url;
use reqwest::Client;
use std::time::Duration;
use tokio::time::Instant;

/// How long the thank-you state stays up before the dialog closes.
pub const CONFIRMATION_WINDOW: Duration = Duration::from_millis(1500);

pub const FEEDBACK_FORM_NAME: &str = "feedback";

/// Posts feedback as a static-site form submission to `{origin}/`.
#[derive(Debug, Clone)]
pub struct FormFeedbackSink {
    client: Client,
    endpoint: String,
}

impl FormFeedbackSink {
    pub fn new(origin: &str) -> Result<Self> {
        validate_url("feedback.origin", origin)?;
        Ok(Self {
            client: Client::new(),
            endpoint: format!("{}/", origin.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl FeedbackSink for FormFeedbackSink {
    async fn send(&self, submission: &FeedbackSubmission) -> Result<()> {
        tracing::debug!("Posting feedback to {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .form(&[
                ("form-name", FEEDBACK_FORM_NAME),
                ("feedback", submission.feedback.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                SofiaError::Api(ApiError::Transport {
                    message: e.to_string(),
                })
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SofiaError::Api(ApiError::Server {
                status: status.as_u16(),
                message: format!("feedback endpoint returned {}", status),
            }));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackPhase {
    Editing,
    Submitting,
    Confirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackOutcome {
    /// Blank text or a submission already running; nothing was posted.
    Skipped,
    Sent,
    /// The post failed. Feedback is non-critical, so this is only logged.
    Dropped,
}

/// Feedback dialog state.
///
/// After a successful post the dialog shows its confirmation for
/// `confirmation_window`, then reads as closed, empty and editable again.
/// That reset is applied by the dialog itself on the next access, whether or
/// not anyone awaits `finish_confirmation`.
#[derive(Debug, Clone)]
pub struct FeedbackDialog {
    open: bool,
    text: String,
    phase: FeedbackPhase,
    confirmation_window: Duration,
    confirmed_at: Option<Instant>,
}

impl Default for FeedbackDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackDialog {
    pub fn new() -> Self {
        Self::with_confirmation_window(CONFIRMATION_WINDOW)
    }

    pub fn with_confirmation_window(confirmation_window: Duration) -> Self {
        Self {
            open: false,
            text: String::new(),
            phase: FeedbackPhase::Editing,
            confirmation_window,
            confirmed_at: None,
        }
    }

    fn confirmation_elapsed(&self) -> bool {
        self.confirmed_at
            .is_some_and(|at| at.elapsed() >= self.confirmation_window)
    }

    fn expire_confirmation(&mut self) {
        if self.confirmation_elapsed() {
            self.reset_after_confirmation();
        }
    }

    fn reset_after_confirmation(&mut self) {
        self.open = false;
        self.text.clear();
        self.phase = FeedbackPhase::Editing;
        self.confirmed_at = None;
    }

    pub fn open(&mut self) {
        self.expire_confirmation();
        self.open = true;
    }

    pub fn close(&mut self) {
        self.expire_confirmation();
        self.open = false;
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.expire_confirmation();
        self.text = text.into();
    }

    pub fn can_submit(&self) -> bool {
        self.phase() == FeedbackPhase::Editing && !self.text().trim().is_empty()
    }

    pub async fn submit<S: FeedbackSink + ?Sized>(&mut self, sink: &S) -> FeedbackOutcome {
        self.expire_confirmation();
        if !self.can_submit() {
            return FeedbackOutcome::Skipped;
        }

        self.phase = FeedbackPhase::Submitting;
        let submission = FeedbackSubmission {
            feedback: self.text.clone(),
        };

        match sink.send(&submission).await {
            Ok(()) => {
                tracing::info!("Feedback submitted");
                self.text.clear();
                self.phase = FeedbackPhase::Confirmed;
                self.confirmed_at = Some(Instant::now());
                FeedbackOutcome::Sent
            }
            Err(e) => {
                tracing::error!("Failed to submit feedback: {}", e);
                self.phase = FeedbackPhase::Editing;
                FeedbackOutcome::Dropped
            }
        }
    }

    /// Holds the confirmation for the fixed window, then closes and clears
    /// the dialog.
    pub async fn finish_confirmation(&mut self) {
        let Some(confirmed_at) = self.confirmed_at else {
            return;
        };
        tokio::time::sleep_until(confirmed_at + self.confirmation_window).await;
        self.reset_after_confirmation();
    }

    pub async fn submit_and_close<S: FeedbackSink + ?Sized>(&mut self, sink: &S) -> FeedbackOutcome {
        let outcome = self.submit(sink).await;
        if outcome == FeedbackOutcome::Sent {
            self.finish_confirmation().await;
        }
        outcome
    }

    pub fn is_open(&self) -> bool {
        self.open && !self.confirmation_elapsed()
    }

    pub fn text(&self) -> &str {
        if self.confirmation_elapsed() {
            ""
        } else {
            &self.text
        }
    }

    pub fn phase(&self) -> FeedbackPhase {
        if self.confirmation_elapsed() {
            FeedbackPhase::Editing
        } else {
            self.phase
        }
    }
}
