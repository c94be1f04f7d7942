use crate::core::api_client::TRANSLATE_FAILED;
use crate::core::flow::{FlowPhase, FlowState, Ticket};
use crate::domain::model::{TargetDomain, TranslationRequest, TranslationResult};
use crate::domain::ports::{Clipboard, SofiaApi};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{optional_text, require_selected, require_text};

#[derive(Debug, Clone, Default)]
pub struct SingleTranslationForm {
    pub cv_point: String,
    pub target_domain: Option<TargetDomain>,
    pub job_description: String,
}

impl SingleTranslationForm {
    pub fn to_request(&self) -> Result<TranslationRequest> {
        require_text("CV point", &self.cv_point)?;
        let target_domain = *require_selected("target domain", &self.target_domain)?;

        Ok(TranslationRequest {
            cv_point: self.cv_point.clone(),
            target_domain,
            job_description: optional_text(&self.job_description),
        })
    }
}

/// One CV point in, one rewritten point out.
#[derive(Debug, Clone)]
pub struct SingleTranslationFlow {
    pub form: SingleTranslationForm,
    state: FlowState<TranslationResult>,
}

impl Default for SingleTranslationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleTranslationFlow {
    pub fn new() -> Self {
        Self {
            form: SingleTranslationForm::default(),
            state: FlowState::new("single translation"),
        }
    }

    pub fn with_form(form: SingleTranslationForm) -> Self {
        Self {
            form,
            ..Self::new()
        }
    }

    /// Validates the form and marks the flow as submitting. Nothing changes
    /// when validation fails.
    pub fn begin_submit(&mut self) -> Result<(Ticket, TranslationRequest)> {
        let request = self.form.to_request()?;
        let ticket = self.state.begin()?;
        Ok((ticket, request))
    }

    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<TranslationResult, ApiError>,
    ) -> bool {
        self.state.settle(ticket, outcome)
    }

    pub async fn submit<A: SofiaApi + ?Sized>(&mut self, api: &A) -> Result<FlowPhase> {
        let (ticket, request) = self.begin_submit()?;
        let pending = self.state.pending(ticket, TRANSLATE_FAILED);
        let outcome = api.translate_single(&request).await;
        pending.complete();
        self.settle(ticket, outcome);
        Ok(self.state.phase())
    }

    /// Copies the translated point verbatim. Returns false when there is
    /// nothing to copy.
    pub fn copy_result(&self, clipboard: &dyn Clipboard) -> Result<bool> {
        match self.state.result() {
            Some(result) => {
                clipboard.write_text(&result.translated_point)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn phase(&self) -> FlowPhase {
        self.state.phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn result(&self) -> Option<&TranslationResult> {
        self.state.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        self.state.api_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::SofiaError;

    #[test]
    fn test_form_requires_cv_point_and_domain() {
        let mut form = SingleTranslationForm::default();
        assert!(matches!(
            form.to_request(),
            Err(SofiaError::ValidationError { ref field }) if field == "CV point"
        ));

        form.cv_point = "Led a solar rollout".to_string();
        assert!(matches!(
            form.to_request(),
            Err(SofiaError::ValidationError { ref field }) if field == "target domain"
        ));

        form.target_domain = Some(TargetDomain::Sales);
        let request = form.to_request().unwrap();
        assert_eq!(request.job_description, None);
    }

    #[test]
    fn test_failed_validation_leaves_flow_idle() {
        let mut flow = SingleTranslationFlow::new();
        flow.form.target_domain = Some(TargetDomain::Finance);
        flow.form.cv_point = "   ".to_string();

        assert!(flow.begin_submit().is_err());
        assert_eq!(flow.phase(), FlowPhase::Idle);
        assert!(!flow.is_submitting());
    }
}
