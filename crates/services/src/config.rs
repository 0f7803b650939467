use std::env;

use study_core::model::{AppSettings, AppSettingsDraft, AppSettingsError};
use study_storage::DEFAULT_STATE_KEY;

/// Database used when `STUDY_DB_URL` is unset.
pub const DEFAULT_DB_URL: &str = "sqlite:study.sqlite3?mode=rwc";

/// Start-up configuration read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyConfig {
    pub db_url: String,
    pub storage_key: String,
    pub settings: AppSettings,
}

impl StudyConfig {
    /// Read `STUDY_DB_URL`, `STUDY_STORAGE_KEY` and the `STUDY_AI_*` settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsError` if `STUDY_AI_BASE_URL` is not a valid URL.
    pub fn from_env() -> Result<Self, AppSettingsError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppSettingsError> {
        let non_blank = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let settings = AppSettingsDraft {
            api_key: lookup("STUDY_AI_API_KEY"),
            api_model: lookup("STUDY_AI_MODEL"),
            api_base_url: lookup("STUDY_AI_BASE_URL"),
        }
        .validate()?;

        Ok(Self {
            db_url: non_blank("STUDY_DB_URL").unwrap_or_else(|| DEFAULT_DB_URL.into()),
            storage_key: non_blank("STUDY_STORAGE_KEY").unwrap_or_else(|| DEFAULT_STATE_KEY.into()),
            settings,
        })
    }
}
