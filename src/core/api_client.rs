use crate::domain::model::{
    BulkTranslationRequest, BulkTranslationResponse, ErrorPayload, StarRequest, StarResult,
    TranslationRequest, TranslationResult,
};
use crate::domain::ports::SofiaApi;
use crate::utils::error::{ApiError, Result, SofiaError};
use crate::utils::validation::validate_url;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

pub const TRANSLATE_PATH: &str = "/api/translate";
pub const TRANSLATE_BULK_PATH: &str = "/api/translate-bulk";
pub const STAR_PATH: &str = "/api/star";

pub const TRANSLATE_FAILED: &str = "Failed to translate CV point";
pub const TRANSLATE_BULK_FAILED: &str = "Failed to translate CV points";
pub const STAR_FAILED: &str = "Failed to process STAR framework conversion";

/// HTTP client for the Sofia API.
///
/// Each call is a single POST with a JSON body. There is no retry and no
/// client-side timeout beyond what `reqwest` applies by default.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let url = validate_url("api.base_url", base_url)?;
        if url.query().is_some() || url.fragment().is_some() {
            return Err(SofiaError::InvalidConfigValueError {
                field: "api.base_url".to_string(),
                value: base_url.to_string(),
                reason: "Base URL cannot carry a query string or fragment".to_string(),
            });
        }
        Ok(Self {
            client,
            base_url: url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `path` to the base URL's own path, so a base mounted under a
    /// prefix keeps it.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{}", self.base_url.path().trim_end_matches('/'), path);
        url.set_path(&joined);
        url
    }

    async fn post_json<B, T>(
        &self,
        path: &str,
        body: &B,
        default_message: &str,
    ) -> std::result::Result<T, ApiError>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!("Making API request to: {}", url);

        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Request to {} failed without a response: {}", url, e);
                ApiError::Transport {
                    message: default_message.to_string(),
                }
            })?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        let bytes = response.bytes().await.map_err(|e| {
            tracing::warn!("Reading response body from {} failed: {}", url, e);
            ApiError::Transport {
                message: default_message.to_string(),
            }
        })?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorPayload>(&bytes)
                .ok()
                .and_then(|payload| payload.message)
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| default_message.to_string());
            tracing::warn!("{} returned {}: {}", path, status, message);
            return Err(ApiError::Server {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            tracing::warn!("{} returned an unexpected body: {}", path, e);
            ApiError::MalformedResponse {
                endpoint: path.to_string(),
                reason: e.to_string(),
                fallback: default_message.to_string(),
            }
        })
    }
}

#[async_trait::async_trait]
impl SofiaApi for ApiClient {
    async fn translate_single(
        &self,
        request: &TranslationRequest,
    ) -> std::result::Result<TranslationResult, ApiError> {
        self.post_json(TRANSLATE_PATH, request, TRANSLATE_FAILED)
            .await
    }

    async fn translate_bulk(
        &self,
        request: &BulkTranslationRequest,
    ) -> std::result::Result<BulkTranslationResponse, ApiError> {
        tracing::debug!("Submitting {} CV points", request.cv_points.len());
        self.post_json(TRANSLATE_BULK_PATH, request, TRANSLATE_BULK_FAILED)
            .await
    }

    async fn convert_star(
        &self,
        request: &StarRequest,
    ) -> std::result::Result<StarResult, ApiError> {
        self.post_json(STAR_PATH, request, STAR_FAILED).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::TargetDomain;
    use httpmock::prelude::*;

    fn translation_request() -> TranslationRequest {
        TranslationRequest {
            cv_point: "Reduced office energy use by 20%".to_string(),
            target_domain: TargetDomain::Marketing,
            job_description: None,
        }
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        assert!(ApiClient::new("not a url").is_err());
        assert!(ApiClient::new("ftp://example.com").is_err());
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client = ApiClient::new("https://sofia.example.com/").unwrap();
        assert_eq!(
            client.endpoint(TRANSLATE_PATH).as_str(),
            "https://sofia.example.com/api/translate"
        );
    }

    #[test]
    fn test_base_path_prefix_is_kept() {
        let client = ApiClient::new("https://example.com/sofia/").unwrap();
        assert_eq!(
            client.endpoint(STAR_PATH).as_str(),
            "https://example.com/sofia/api/star"
        );
    }

    #[test]
    fn test_base_url_with_query_or_fragment_is_rejected() {
        assert!(matches!(
            ApiClient::new("https://api.example.com/?v=1"),
            Err(SofiaError::InvalidConfigValueError { .. })
        ));
        assert!(ApiClient::new("https://api.example.com/#top").is_err());
    }

    #[tokio::test]
    async fn test_translate_single_success() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/translate")
                .json_body(serde_json::json!({
                    "cvPoint": "Reduced office energy use by 20%",
                    "targetDomain": "marketing"
                }));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "translatedPoint": "Drove a 20% efficiency campaign",
                    "domainAlignment": ["campaigns"],
                    "preservedElements": ["20%"]
                }));
        });

        let client = ApiClient::new(&server.base_url()).unwrap();
        let result = client.translate_single(&translation_request()).await.unwrap();

        api_mock.assert();
        assert_eq!(result.translated_point, "Drove a 20% efficiency campaign");
        assert_eq!(result.preserved_elements, vec!["20%".to_string()]);
    }

    #[tokio::test]
    async fn test_server_message_is_surfaced() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/translate");
            then.status(429)
                .json_body(serde_json::json!({"message": "Rate limit exceeded"}));
        });

        let client = ApiClient::new(&server.base_url()).unwrap();
        let err = client
            .translate_single(&translation_request())
            .await
            .unwrap_err();

        api_mock.assert();
        assert_eq!(
            err,
            ApiError::Server {
                status: 429,
                message: "Rate limit exceeded".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_error_without_payload_uses_default() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/star");
            then.status(500).body("Internal Server Error");
        });

        let client = ApiClient::new(&server.base_url()).unwrap();
        let err = client
            .convert_star(&StarRequest {
                cv_point: "Ran recycling drive".to_string(),
                context: None,
            })
            .await
            .unwrap_err();

        api_mock.assert();
        assert_eq!(err.user_message(), STAR_FAILED);
    }

    #[tokio::test]
    async fn test_undecodable_success_body_is_malformed() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(POST).path("/api/translate");
            then.status(200)
                .json_body(serde_json::json!({"translated": "wrong shape"}));
        });

        let client = ApiClient::new(&server.base_url()).unwrap();
        let err = client
            .translate_single(&translation_request())
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ApiError::MalformedResponse { .. }));
        assert_eq!(err.user_message(), TRANSLATE_FAILED);
    }
}
