use crate::utils::error::SofiaError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Field the CV point is rewritten for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TargetDomain {
    Marketing,
    Sales,
    Consulting,
    ProductManagement,
    Finance,
}

impl TargetDomain {
    pub const ALL: [TargetDomain; 5] = [
        TargetDomain::Marketing,
        TargetDomain::Sales,
        TargetDomain::Consulting,
        TargetDomain::ProductManagement,
        TargetDomain::Finance,
    ];

    /// Value sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetDomain::Marketing => "marketing",
            TargetDomain::Sales => "sales",
            TargetDomain::Consulting => "consulting",
            TargetDomain::ProductManagement => "product-management",
            TargetDomain::Finance => "finance",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TargetDomain::Marketing => "Marketing",
            TargetDomain::Sales => "Sales",
            TargetDomain::Consulting => "Consulting",
            TargetDomain::ProductManagement => "Product Management",
            TargetDomain::Finance => "Finance",
        }
    }
}

impl fmt::Display for TargetDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetDomain {
    type Err = SofiaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TargetDomain::ALL
            .into_iter()
            .find(|d| d.as_str() == wanted)
            .ok_or_else(|| SofiaError::UnknownDomain {
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRequest {
    pub cv_point: String,
    pub target_domain: TargetDomain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub translated_point: String,
    pub domain_alignment: Vec<String>,
    pub preserved_elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTranslationRequest {
    pub cv_points: Vec<String>,
    pub target_domain: TargetDomain,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkTranslationItem {
    pub original: String,
    pub translated: String,
    pub domain_alignment: Vec<String>,
    pub preserved_elements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkTranslationResponse {
    pub results: Vec<BulkTranslationItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRequest {
    pub cv_point: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarResult {
    pub follows_star: bool,
    // Only sent when follows_star is false.
    #[serde(default)]
    pub missing_elements: Vec<String>,
    pub transformed_point: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedbackSubmission {
    pub feedback: String,
}

/// `{ "message": "..." }` body the API sends alongside error statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorPayload {
    pub message: Option<String>,
}
