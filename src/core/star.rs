use crate::core::api_client::STAR_FAILED;
use crate::core::flow::{FlowPhase, FlowState, Ticket};
use crate::domain::model::{StarRequest, StarResult};
use crate::domain::ports::{Clipboard, SofiaApi};
use crate::utils::error::{ApiError, Result};
use crate::utils::validation::{optional_text, require_text};

pub const STAR_CONFIRMATION: &str = "Good job! Your CV point is already in prescribed format";

/// Short primer on the framework, shown with the STAR tab and `sofia star --help`.
pub const STAR_GUIDE: &str = "\
About the STAR Framework
  Situation: The context or background of the experience
  Task:      The specific challenge or responsibility you faced
  Action:    The steps you took to address the task
  Result:    The outcomes and impact of your actions

Pro Tip: Always try to include specific metrics and numbers in your results when possible.";

/// Display category of a missing-element badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeCategory {
    Situation,
    Task,
    Action,
    Result,
    /// Anything the API sends that is not one of the four STAR elements.
    General,
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_ascii_lowercase()
}

impl BadgeCategory {
    pub fn from_tag(tag: &str) -> Self {
        match normalize_tag(tag).as_str() {
            "situation" => BadgeCategory::Situation,
            "task" => BadgeCategory::Task,
            "action" => BadgeCategory::Action,
            "result" => BadgeCategory::Result,
            _ => BadgeCategory::General,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingBadge {
    pub label: String,
    pub category: BadgeCategory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StarView<'a> {
    Compliant {
        message: &'static str,
        transformed_point: &'a str,
    },
    NeedsWork {
        missing: Vec<MissingBadge>,
        transformed_point: &'a str,
    },
}

impl<'a> StarView<'a> {
    pub fn from_result(result: &'a StarResult) -> Self {
        if result.follows_star {
            return StarView::Compliant {
                message: STAR_CONFIRMATION,
                transformed_point: &result.transformed_point,
            };
        }

        let mut missing: Vec<MissingBadge> = Vec::new();
        for tag in &result.missing_elements {
            let key = normalize_tag(tag);
            if missing.iter().any(|badge| normalize_tag(&badge.label) == key) {
                continue;
            }
            missing.push(MissingBadge {
                label: tag.clone(),
                category: BadgeCategory::from_tag(tag),
            });
        }

        StarView::NeedsWork {
            missing,
            transformed_point: &result.transformed_point,
        }
    }

    pub fn transformed_point(&self) -> &'a str {
        match self {
            StarView::Compliant {
                transformed_point, ..
            }
            | StarView::NeedsWork {
                transformed_point, ..
            } => *transformed_point,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct StarForm {
    pub cv_point: String,
    pub context: String,
}

impl StarForm {
    pub fn to_request(&self) -> Result<StarRequest> {
        require_text("CV point", &self.cv_point)?;
        Ok(StarRequest {
            cv_point: self.cv_point.clone(),
            context: optional_text(&self.context),
        })
    }
}

#[derive(Debug, Clone)]
pub struct StarConversionFlow {
    pub form: StarForm,
    state: FlowState<StarResult>,
}

impl Default for StarConversionFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl StarConversionFlow {
    pub fn new() -> Self {
        Self {
            form: StarForm::default(),
            state: FlowState::new("STAR conversion"),
        }
    }

    pub fn with_form(form: StarForm) -> Self {
        Self {
            form,
            ..Self::new()
        }
    }

    pub fn begin_submit(&mut self) -> Result<(Ticket, StarRequest)> {
        let request = self.form.to_request()?;
        let ticket = self.state.begin()?;
        Ok((ticket, request))
    }

    pub fn settle(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<StarResult, ApiError>,
    ) -> bool {
        self.state.settle(ticket, outcome)
    }

    pub async fn submit<A: SofiaApi + ?Sized>(&mut self, api: &A) -> Result<FlowPhase> {
        let (ticket, request) = self.begin_submit()?;
        let pending = self.state.pending(ticket, STAR_FAILED);
        let outcome = api.convert_star(&request).await;
        pending.complete();
        self.settle(ticket, outcome);
        Ok(self.state.phase())
    }

    pub fn view(&self) -> Option<StarView<'_>> {
        self.state.result().map(StarView::from_result)
    }

    pub fn copy_result(&self, clipboard: &dyn Clipboard) -> Result<bool> {
        match self.state.result() {
            Some(result) => {
                clipboard.write_text(&result.transformed_point)?;
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

    pub fn result(&self) -> Option<&StarResult> {
        self.state.result()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn api_error(&self) -> Option<&ApiError> {
        self.state.api_error()
    }
}
