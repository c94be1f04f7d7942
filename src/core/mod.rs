pub mod api_client;
pub mod bulk;
pub mod export;
pub mod feedback;
pub mod flow;
pub mod navigation;
pub mod render;
pub mod single;
pub mod star;

pub use crate::domain::model::{
    BulkTranslationItem, BulkTranslationRequest, BulkTranslationResponse, StarRequest,
    StarResult, TargetDomain, TranslationRequest, TranslationResult,
};
pub use crate::domain::ports::{Clipboard, FeedbackSink, SofiaApi, Storage};
pub use crate::utils::error::Result;
