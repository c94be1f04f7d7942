pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{ClientConfig, ResolvedConfig};

pub use crate::adapters::{clipboard::StdoutClipboard, storage::LocalStorage};
pub use crate::core::{
    api_client::ApiClient,
    bulk::BulkTranslationFlow,
    feedback::{FeedbackDialog, FormFeedbackSink},
    navigation::{Navigation, Tab},
    single::SingleTranslationFlow,
    star::StarConversionFlow,
};
pub use utils::error::{ApiError, Result, SofiaError};
