use crate::core::api_client::{TRANSLATE_BULK_FAILED, TRANSLATE_BULK_PATH};
use crate::core::export::{to_csv, EXPORT_FILE_NAME};
use crate::core::flow::{FlowPhase, FlowState, Ticket};
use crate::domain::model::{
    BulkTranslationItem, BulkTranslationRequest, BulkTranslationResponse, TargetDomain,
};
use crate::domain::ports::{SofiaApi, Storage};
use crate::utils::error::{ApiError, Result, SofiaError};
use crate::utils::validation::{optional_text, require_selected};

/// Splits raw input into CV points: one per line, trimmed, blank lines dropped.
pub fn parse_points(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkRow {
    pub id: RowId,
    pub item: BulkTranslationItem,
}

#[derive(Debug, Clone, Default)]
pub struct BulkTranslationForm {
    pub raw_points: String,
    pub target_domain: Option<TargetDomain>,
    pub job_description: String,
}

impl BulkTranslationForm {
    pub fn to_request(&self) -> Result<BulkTranslationRequest> {
        let cv_points = parse_points(&self.raw_points);
        if cv_points.is_empty() {
            return Err(SofiaError::validation("CV points"));
        }
        let target_domain = *require_selected("target domain", &self.target_domain)?;

        Ok(BulkTranslationRequest {
            cv_points,
            target_domain,
            job_description: optional_text(&self.job_description),
        })
    }
}

/// Checks that the response lines up with what was sent.
///
/// The API gives no correlation key, so the item count has to match exactly.
/// Items whose `original` differs from the point sent at that index are kept
/// but reported.
pub fn align_results(
    submitted: &[String],
    response: BulkTranslationResponse,
) -> std::result::Result<Vec<BulkTranslationItem>, ApiError> {
    if response.results.len() != submitted.len() {
        return Err(ApiError::MalformedResponse {
            endpoint: TRANSLATE_BULK_PATH.to_string(),
            reason: format!(
                "expected {} results, got {}",
                submitted.len(),
                response.results.len()
            ),
            fallback: TRANSLATE_BULK_FAILED.to_string(),
        });
    }

    for (index, (sent, item)) in submitted.iter().zip(&response.results).enumerate() {
        if sent.trim() != item.original.trim() {
            tracing::warn!(
                "Bulk result {} echoes a different original ({:?} vs {:?})",
                index,
                item.original,
                sent
            );
        }
    }

    Ok(response.results)
}

/// Many CV points against one domain, with row expansion and CSV export.
#[derive(Debug, Clone)]
pub struct BulkTranslationFlow {
    pub form: BulkTranslationForm,
    state: FlowState<Vec<BulkRow>>,
    expanded: Option<RowId>,
    next_row: u64,
    submitted_count: usize,
}

impl Default for BulkTranslationFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkTranslationFlow {
    pub fn new() -> Self {
        Self {
            form: BulkTranslationForm::default(),
            state: FlowState::new("bulk translation"),
            expanded: None,
            next_row: 0,
            submitted_count: 0,
        }
    }

    pub fn with_form(form: BulkTranslationForm) -> Self {
        Self {
            form,
            ..Self::new()
        }
    }

    pub fn begin_submit(&mut self) -> Result<(Ticket, BulkTranslationRequest)> {
        let request = self.form.to_request()?;
        let ticket = self.state.begin()?;
        self.submitted_count = request.cv_points.len();
        Ok((ticket, request))
    }

    pub fn settle(
        &mut self,
        ticket: Ticket,
        request: &BulkTranslationRequest,
        outcome: std::result::Result<BulkTranslationResponse, ApiError>,
    ) -> bool {
        let rows = outcome
            .and_then(|response| align_results(&request.cv_points, response))
            .map(|items| {
                items
                    .into_iter()
                    .map(|item| {
                        self.next_row += 1;
                        BulkRow {
                            id: RowId(self.next_row),
                            item,
                        }
                    })
                    .collect::<Vec<_>>()
            });

        let applied = self.state.settle(ticket, rows);
        if applied {
            self.expanded = None;
        }
        applied
    }

    pub async fn submit<A: SofiaApi + ?Sized>(&mut self, api: &A) -> Result<FlowPhase> {
        let (ticket, request) = self.begin_submit()?;
        tracing::info!("Translating {} CV points", request.cv_points.len());
        let pending = self.state.pending(ticket, TRANSLATE_BULK_FAILED);
        let outcome = api.translate_bulk(&request).await;
        pending.complete();
        self.settle(ticket, &request, outcome);
        Ok(self.state.phase())
    }

    pub fn rows(&self) -> &[BulkRow] {
        self.state.result().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Expands `id`, collapses it when it is already expanded. Returns
    /// whether the row ends up expanded.
    pub fn toggle_row(&mut self, id: RowId) -> bool {
        if !self.rows().iter().any(|row| row.id == id) {
            return false;
        }

        if self.expanded == Some(id) {
            self.expanded = None;
            false
        } else {
            self.expanded = Some(id);
            true
        }
    }

    pub fn expanded(&self) -> Option<RowId> {
        self.expanded
    }

    pub fn is_expanded(&self, id: RowId) -> bool {
        self.expanded == Some(id)
    }

    pub fn expanded_row(&self) -> Option<&BulkRow> {
        let id = self.expanded?;
        self.rows().iter().find(|row| row.id == id)
    }

    /// Points sent by the most recent submission.
    pub fn submitted_count(&self) -> usize {
        self.submitted_count
    }

    pub fn export_csv(&self) -> Result<String> {
        if self.rows().is_empty() {
            return Err(SofiaError::validation("translation results"));
        }
        to_csv(self.rows().iter().map(|row| &row.item))
    }

    pub async fn export_to<S: Storage>(&self, storage: &S) -> Result<String> {
        let csv = self.export_csv()?;
        let path = storage.write_file(EXPORT_FILE_NAME, csv.as_bytes()).await?;
        tracing::info!("Exported {} rows to {}", self.rows().len(), path);
        Ok(path)
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.expanded = None;
        self.submitted_count = 0;
    }

    pub fn phase(&self) -> FlowPhase {
        self.state.phase()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
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

    fn item(original: &str) -> BulkTranslationItem {
        BulkTranslationItem {
            original: original.to_string(),
            translated: format!("{} (translated)", original),
            domain_alignment: vec!["alignment".to_string()],
            preserved_elements: vec![],
        }
    }

    fn settled_flow(points: &[&str]) -> BulkTranslationFlow {
        let mut flow = BulkTranslationFlow::new();
        flow.form.raw_points = points.join("\n");
        flow.form.target_domain = Some(TargetDomain::Sales);

        let (ticket, request) = flow.begin_submit().unwrap();
        let response = BulkTranslationResponse {
            results: request.cv_points.iter().map(|p| item(p)).collect(),
        };
        assert!(flow.settle(ticket, &request, Ok(response)));
        flow
    }

    #[test]
    fn test_parse_points_drops_blank_lines() {
        let raw = "  first point \n\n   \nsecond point\r\nthird";
        assert_eq!(
            parse_points(raw),
            vec!["first point", "second point", "third"]
        );
        assert!(parse_points("\n \n").is_empty());
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let mut flow = BulkTranslationFlow::new();
        flow.form.raw_points = "\n   \n".to_string();
        flow.form.target_domain = Some(TargetDomain::Marketing);

        assert!(matches!(
            flow.begin_submit(),
            Err(SofiaError::ValidationError { .. })
        ));
        assert_eq!(flow.phase(), FlowPhase::Idle);
    }

    #[test]
    fn test_rows_follow_input_order() {
        let flow = settled_flow(&["a", "", "b", "  c  "]);

        let originals: Vec<&str> = flow.rows().iter().map(|r| r.item.original.as_str()).collect();
        assert_eq!(originals, vec!["a", "b", "c"]);
        assert_eq!(flow.submitted_count(), 3);
    }

    #[test]
    fn test_toggle_same_row_twice_collapses() {
        let mut flow = settled_flow(&["a", "b"]);
        let first = flow.rows()[0].id;

        assert!(flow.toggle_row(first));
        assert!(flow.is_expanded(first));
        assert!(!flow.toggle_row(first));
        assert_eq!(flow.expanded(), None);
    }

    #[test]
    fn test_toggle_different_rows_keeps_one_expanded() {
        let mut flow = settled_flow(&["a", "b"]);
        let first = flow.rows()[0].id;
        let second = flow.rows()[1].id;

        flow.toggle_row(first);
        flow.toggle_row(second);

        assert!(!flow.is_expanded(first));
        assert!(flow.is_expanded(second));
        assert_eq!(flow.expanded_row().unwrap().item.original, "b");
    }

    #[test]
    fn test_identical_items_have_distinct_rows() {
        let mut flow = settled_flow(&["same", "same"]);
        let first = flow.rows()[0].id;
        let second = flow.rows()[1].id;
        assert_ne!(first, second);

        flow.toggle_row(second);
        assert!(!flow.is_expanded(first));
    }

    #[test]
    fn test_new_results_clear_expansion() {
        let mut flow = settled_flow(&["a"]);
        let old = flow.rows()[0].id;
        flow.toggle_row(old);

        let (ticket, request) = flow.begin_submit().unwrap();
        flow.settle(
            ticket,
            &request,
            Ok(BulkTranslationResponse {
                results: vec![item("a")],
            }),
        );

        assert_eq!(flow.expanded(), None);
        assert!(!flow.toggle_row(old));
    }

    #[test]
    fn test_count_mismatch_is_malformed() {
        let mut flow = BulkTranslationFlow::new();
        flow.form.raw_points = "a\nb".to_string();
        flow.form.target_domain = Some(TargetDomain::Finance);

        let (ticket, request) = flow.begin_submit().unwrap();
        flow.settle(
            ticket,
            &request,
            Ok(BulkTranslationResponse {
                results: vec![item("a")],
            }),
        );

        assert_eq!(flow.phase(), FlowPhase::Failed);
        assert_eq!(flow.error(), Some(TRANSLATE_BULK_FAILED));
        assert!(flow.rows().is_empty());
    }

    #[test]
    fn test_export_requires_results() {
        let flow = BulkTranslationFlow::new();
        assert!(flow.export_csv().is_err());

        let flow = settled_flow(&["a"]);
        let csv = flow.export_csv().unwrap();
        assert!(csv.ends_with("\"a\",\"a (translated)\",\"alignment\",\"\""));
    }
}
