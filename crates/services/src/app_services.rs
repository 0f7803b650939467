use std::sync::Arc;

use study_storage::{InMemoryRepository, Storage};

use crate::Clock;
use crate::config::StudyConfig;
use crate::error::StudyServicesError;
use crate::generation::{ChatCompletionsClient, StudyGenerator, TextGenerator};
use crate::study_actions::StudyActions;
use crate::study_store::StudyStore;

/// The assembled study store and command handlers.
pub struct StudyServices {
    store: StudyStore,
    actions: StudyActions,
}

impl StudyServices {
    /// Build services backed by `SQLite` storage and the configured
    /// chat-completions backend.
    ///
    /// # Errors
    ///
    /// Returns `StudyServicesError::Sqlite` if storage initialization fails.
    pub async fn from_config(config: &StudyConfig, clock: Clock) -> Result<Self, StudyServicesError> {
        let storage = Storage::sqlite(&config.db_url).await?;
        let store = StudyStore::open(clock, Arc::clone(&storage.state), config.storage_key.clone()).await;
        let backend: Arc<dyn TextGenerator> =
            Arc::new(ChatCompletionsClient::from_settings(&config.settings));

        tracing::info!(
            db = %config.db_url,
            key = %config.storage_key,
            generation = backend.enabled(),
            "study services ready"
        );
        Ok(Self::new(store, backend))
    }

    /// Read [`StudyConfig`] from the environment and build `SQLite`-backed services.
    ///
    /// # Errors
    ///
    /// Returns `StudyServicesError::Settings` for an invalid `STUDY_AI_BASE_URL`
    /// and `StudyServicesError::Sqlite` if storage initialization fails.
    pub async fn from_env(clock: Clock) -> Result<Self, StudyServicesError> {
        Self::from_lookup(|name| std::env::var(name).ok(), clock).await
    }

    async fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        clock: Clock,
    ) -> Result<Self, StudyServicesError> {
        let config = StudyConfig::from_lookup(lookup)?;
        Self::from_config(&config, clock).await
    }

    /// Build services over a fresh in-memory repository.
    pub async fn in_memory(clock: Clock, backend: Arc<dyn TextGenerator>) -> Self {
        let store = StudyStore::open(
            clock,
            Arc::new(InMemoryRepository::new()),
            study_storage::DEFAULT_STATE_KEY,
        )
        .await;
        Self::new(store, backend)
    }

    #[must_use]
    pub fn new(store: StudyStore, backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            store,
            actions: StudyActions::new(StudyGenerator::new(backend)),
        }
    }

    #[must_use]
    pub fn store(&self) -> &StudyStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut StudyStore {
        &mut self.store
    }

    #[must_use]
    pub fn actions(&self) -> &StudyActions {
        &self.actions
    }

    /// Borrow the handlers and the store together, as every handler call needs.
    pub fn parts_mut(&mut self) -> (&StudyActions, &mut StudyStore) {
        (&self.actions, &mut self.store)
    }
}
