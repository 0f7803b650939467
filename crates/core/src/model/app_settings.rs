use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_API_MODEL: &str = "gpt-4o-mini";

/// Validated settings for the text-generation backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppSettings {
    api_key: Option<String>,
    api_model: Option<String>,
    api_base_url: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct AppSettingsDraft {
    pub api_key: Option<String>,
    pub api_model: Option<String>,
    pub api_base_url: Option<String>,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppSettingsError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl AppSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft. Blank values become `None`.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if the base URL is present but invalid.
    pub fn validate(self) -> Result<AppSettings, AppSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let api_model = normalize_optional(self.api_model);
        let api_base_url = normalize_optional(self.api_base_url);

        if let Some(url) = api_base_url.as_ref() {
            if Url::parse(url).is_err() {
                return Err(AppSettingsError::InvalidBaseUrl(url.clone()));
            }
        }

        Ok(AppSettings {
            api_key,
            api_model,
            api_base_url,
        })
    }
}

impl AppSettings {
    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn api_model(&self) -> &str {
        self.api_model.as_deref().unwrap_or(DEFAULT_API_MODEL)
    }

    #[must_use]
    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }

    /// Generation is only possible with an API key.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            api_model: None,
            api_base_url: None,
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let settings = AppSettingsDraft {
            api_key: Some("  ".into()),
            api_model: Some(String::new()),
            api_base_url: None,
        }
        .validate()
        .unwrap();

        assert!(!settings.is_configured());
        assert_eq!(settings.api_model(), DEFAULT_API_MODEL);
        assert_eq!(settings.api_base_url(), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = AppSettingsDraft {
            api_base_url: Some("not a url".into()),
            ..AppSettingsDraft::new()
        }
        .validate()
        .unwrap_err();
        assert!(matches!(err, AppSettingsError::InvalidBaseUrl(_)));
    }

    #[test]
    fn key_is_trimmed() {
        let settings = AppSettingsDraft {
            api_key: Some(" sk-test ".into()),
            api_base_url: Some("http://localhost:8080/v1".into()),
            ..AppSettingsDraft::new()
        }
        .validate()
        .unwrap();
        assert_eq!(settings.api_key(), Some("sk-test"));
        assert_eq!(settings.api_base_url(), "http://localhost:8080/v1");
    }
}
