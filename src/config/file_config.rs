use crate::utils::error::{Result, SofiaError};
use crate::utils::validation::{validate_path, validate_url, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_OUTPUT_PATH: &str = ".";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub feedback: FeedbackConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// Site hosting the feedback form. Defaults to the API origin.
    pub origin: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_path: Option<String>,
}

/// Settings after CLI overrides and defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub api_base_url: String,
    pub feedback_origin: String,
    pub output_path: String,
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| SofiaError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables are
    /// left untouched so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| SofiaError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    /// Applies the precedence `override > file > default` and validates the
    /// outcome.
    pub fn resolve(&self, api_base_url_override: Option<&str>) -> Result<ResolvedConfig> {
        let api_base_url = api_base_url_override
            .map(str::to_string)
            .or_else(|| self.api.base_url.clone())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        let api_url = validate_url("api.base_url", &api_base_url)?;

        let feedback_origin = match &self.feedback.origin {
            Some(origin) => origin.clone(),
            None => origin_of(&api_url),
        };
        validate_url("feedback.origin", &feedback_origin)?;

        let output_path = self
            .export
            .output_path
            .clone()
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());
        validate_path("export.output_path", &output_path)?;

        Ok(ResolvedConfig {
            api_base_url,
            feedback_origin,
            output_path,
        })
    }
}

fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        if let Some(base_url) = &self.api.base_url {
            validate_url("api.base_url", base_url)?;
        }
        if let Some(origin) = &self.feedback.origin {
            validate_url("feedback.origin", origin)?;
        }
        if let Some(output_path) = &self.export.output_path {
            validate_path("export.output_path", output_path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[api]
base_url = "https://api.sofia.example.com"

[feedback]
origin = "https://sofia.example.com"

[export]
output_path = "./exports"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let resolved = config.resolve(None).unwrap();
        assert_eq!(resolved.api_base_url, "https://api.sofia.example.com");
        assert_eq!(resolved.feedback_origin, "https://sofia.example.com");
        assert_eq!(resolved.output_path, "./exports");
    }

    #[test]
    fn test_defaults_and_override() {
        let config = ClientConfig::from_toml_str("").unwrap();

        let resolved = config.resolve(None).unwrap();
        assert_eq!(resolved.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(resolved.feedback_origin, "http://localhost:3000");
        assert_eq!(resolved.output_path, DEFAULT_OUTPUT_PATH);

        let resolved = config
            .resolve(Some("https://api.example.com/v1"))
            .unwrap();
        assert_eq!(resolved.api_base_url, "https://api.example.com/v1");
        assert_eq!(resolved.feedback_origin, "https://api.example.com");
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SOFIA_TEST_BACKEND", "https://backend.test");

        let config = ClientConfig::from_toml_str(
            r#"
[api]
base_url = "${SOFIA_TEST_BACKEND}"
"#,
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://backend.test"));

        std::env::remove_var("SOFIA_TEST_BACKEND");
    }

    #[test]
    fn test_unset_variable_fails_validation() {
        let config = ClientConfig::from_toml_str(
            r#"
[api]
base_url = "${SOFIA_TEST_DEFINITELY_UNSET}"
"#,
        )
        .unwrap();

        assert!(config.validate().is_err());
        assert!(config.resolve(None).is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[export]\noutput_path = \"./out\"\n")
            .unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.export.output_path.as_deref(), Some("./out"));
    }
}
