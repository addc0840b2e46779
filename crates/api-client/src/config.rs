//! Configuration for the Foodorder API client
//!
//! Supports environment-based configuration with sensible defaults.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default production API URL
const DEFAULT_API_URL: &str = "https://api.foodorder.fi/api/v1";

/// Local development API URL
const DEVELOPMENT_API_URL: &str = "http://localhost:3000/api/v1";

/// Default language for locale-scoped endpoints
pub const DEFAULT_LANGUAGE: &str = "fi";

/// Environment types
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development backend
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    #[default]
    Production,
}

impl Environment {
    /// Parse from the `FOODORDER_ENV` environment variable
    pub fn from_env() -> Self {
        Self::parse(&env::var("FOODORDER_ENV").unwrap_or_default())
    }

    fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "development" | "dev" | "local" => Self::Development,
            "staging" | "stage" => Self::Staging,
            _ => Self::Production,
        }
    }

    /// Default API URL for this environment
    #[must_use]
    pub fn default_base_url(self) -> String {
        match self {
            Self::Development => DEVELOPMENT_API_URL.to_string(),
            Self::Staging => env::var("STAGING_FOODORDER_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            Self::Production => DEFAULT_API_URL.to_string(),
        }
    }
}

/// Client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend REST API
    pub base_url: String,
    /// Language code embedded in locale-scoped order paths
    pub language: String,
    /// File holding the persisted session token
    pub token_path: PathBuf,
    /// Optional request timeout; requests wait indefinitely when unset
    #[serde(default, with = "optional_secs")]
    pub timeout: Option<Duration>,
    /// Current environment
    pub environment: Environment,
}

mod optional_secs {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(
        duration: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        duration.map(|d| d.as_secs()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}

/// Default location of the persisted token
#[must_use]
pub fn default_token_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from(".local"))
        .join("foodorder")
        .join("token")
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
            token_path: default_token_path(),
            timeout: None,
            environment: Environment::default(),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment variables
    ///
    /// Reads the following environment variables:
    /// - `FOODORDER_ENV`: Environment (development/staging/production)
    /// - `FOODORDER_API_URL`: Base URL of the REST API
    /// - `FOODORDER_LANG`: Language code for order listings
    /// - `FOODORDER_TOKEN_FILE`: Where the session token is persisted
    /// - `FOODORDER_TIMEOUT_SECS`: Optional request timeout in seconds
    pub fn from_env() -> ApiResult<Self> {
        let environment = Environment::from_env();

        let base_url =
            env::var("FOODORDER_API_URL").unwrap_or_else(|_| environment.default_base_url());

        let language = env::var("FOODORDER_LANG")
            .ok()
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        let token_path = env::var_os("FOODORDER_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(default_token_path);

        let timeout = match env::var("FOODORDER_TIMEOUT_SECS") {
            Ok(raw) => Some(Duration::from_secs(raw.parse().map_err(|_| {
                ApiError::config(format!("FOODORDER_TIMEOUT_SECS is not a number: {raw}"))
            })?)),
            Err(_) => None,
        };

        let config = Self {
            base_url,
            language,
            token_path,
            timeout,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    /// Create development configuration (local backend)
    #[must_use]
    pub fn development() -> Self {
        Self {
            base_url: DEVELOPMENT_API_URL.to_string(),
            environment: Environment::Development,
            ..Self::default()
        }
    }

    /// Builder-style method to set base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Builder-style method to set the language
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder-style method to set the token file
    #[must_use]
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Builder-style method to set timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> ApiResult<()> {
        if self.base_url.is_empty() {
            return Err(ApiError::config("base_url cannot be empty"));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ApiError::config("base_url must start with http:// or https://"));
        }

        if !is_language_code(&self.language) {
            return Err(ApiError::config(format!(
                "language is not a valid code: {:?}",
                self.language
            )));
        }

        if self.timeout.is_some_and(|t| t.is_zero()) {
            return Err(ApiError::config("timeout cannot be zero"));
        }

        Ok(())
    }
}

/// Language codes end up as a path segment, so only a safe subset is allowed
pub(crate) fn is_language_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert!(config.base_url.starts_with("https://"));
        assert_eq!(config.language, "fi");
        assert!(config.timeout.is_none());
        assert!(config.token_path.ends_with("foodorder/token"));
    }

    #[test]
    fn test_development_config() {
        let config = ClientConfig::development();
        assert!(config.base_url.contains("localhost"));
        assert_eq!(config.environment, Environment::Development);
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(Environment::parse("dev"), Environment::Development);
        assert_eq!(Environment::parse("LOCAL"), Environment::Development);
        assert_eq!(Environment::parse("stage"), Environment::Staging);
        assert_eq!(Environment::parse(""), Environment::Production);
    }

    #[test]
    fn test_builder_pattern() {
        let config = ClientConfig::default()
            .with_base_url("http://127.0.0.1:8080")
            .with_language("en")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.language, "en");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_validation() {
        assert!(ClientConfig::default().validate().is_ok());
        assert!(ClientConfig::default().with_base_url("").validate().is_err());
        assert!(ClientConfig::default()
            .with_base_url("ftp://example.com")
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_language("en/../x")
            .validate()
            .is_err());
        assert!(ClientConfig::default()
            .with_timeout(Duration::ZERO)
            .validate()
            .is_err());
    }

    #[test]
    fn test_language_code() {
        assert!(is_language_code("fi"));
        assert!(is_language_code("en-GB"));
        assert!(!is_language_code(""));
        assert!(!is_language_code("fi?x=1"));
    }

    #[test]
    fn test_timeout_serde_roundtrip() {
        let config = ClientConfig::default().with_timeout(Duration::from_secs(7));
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["timeout"], 7);
        let back: ClientConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back.timeout, Some(Duration::from_secs(7)));
    }
}
