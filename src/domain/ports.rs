use crate::domain::model::{
    BulkTranslationRequest, BulkTranslationResponse, FeedbackSubmission, StarRequest, StarResult,
    TranslationRequest, TranslationResult,
};
use crate::utils::error::{ApiError, Result};
use async_trait::async_trait;

/// The remote Sofia API.
#[async_trait]
pub trait SofiaApi: Send + Sync {
    async fn translate_single(
        &self,
        request: &TranslationRequest,
    ) -> std::result::Result<TranslationResult, ApiError>;

    async fn translate_bulk(
        &self,
        request: &BulkTranslationRequest,
    ) -> std::result::Result<BulkTranslationResponse, ApiError>;

    async fn convert_star(&self, request: &StarRequest)
        -> std::result::Result<StarResult, ApiError>;
}

/// Fire-and-forget feedback channel.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    async fn send(&self, submission: &FeedbackSubmission) -> Result<()>;
}

pub trait Clipboard {
    fn write_text(&self, text: &str) -> Result<()>;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
