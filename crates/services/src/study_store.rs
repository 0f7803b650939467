use std::num::NonZeroU32;
use std::sync::Arc;

use study_core::StudyState;
use study_core::model::{
    BadgeId, CardId, FlashcardPatch, FlashcardSet, FlashcardSetId, ProgressSnapshot, QuizResult,
    StreakTransition, Summary,
};
use study_storage::{StateRepository, StorageError, decode_state, encode_state};

use crate::Clock;

/// Receives the dark-mode flag whenever it changes or is restored.
pub trait ThemeHook: Send + Sync {
    fn apply_dark_mode(&self, dark: bool);
}

/// The process-wide study store: state, clock and persistence.
///
/// Every mutation is applied in memory first and then saved under `key`.
/// Save failures are logged and absorbed; mutations that turn out to be
/// no-ops are not saved.
pub struct StudyStore {
    state: StudyState,
    clock: Clock,
    repo: Arc<dyn StateRepository>,
    key: String,
    theme: Option<Arc<dyn ThemeHook>>,
}

impl StudyStore {
    /// Rehydrate the state stored under `key`, or start from defaults.
    ///
    /// Missing, unreadable or undecodable records never fail the open.
    pub async fn open(clock: Clock, repo: Arc<dyn StateRepository>, key: impl Into<String>) -> Self {
        let key = key.into();
        let state = match repo.load(&key).await {
            Ok(Some(bytes)) => match decode_state(&bytes) {
                Ok(state) => {
                    tracing::info!(key = %key, "restored study state");
                    state
                }
                Err(err) => {
                    tracing::warn!(key = %key, error = %err, "stored study state is unreadable; starting fresh");
                    StudyState::new()
                }
            },
            Ok(None) => {
                tracing::info!(key = %key, "no stored study state; starting fresh");
                StudyState::new()
            }
            Err(err) => {
                tracing::warn!(key = %key, error = %err, "failed to load study state; starting fresh");
                StudyState::new()
            }
        };

        Self {
            state,
            clock,
            repo,
            key,
            theme: None,
        }
    }

    /// Attach a theme hook. It is applied immediately when the restored
    /// state is dark.
    #[must_use]
    pub fn with_theme_hook(mut self, hook: Arc<dyn ThemeHook>) -> Self {
        if self.state.preferences().dark_mode {
            hook.apply_dark_mode(true);
        }
        self.theme = Some(hook);
        self
    }

    #[must_use]
    pub fn state(&self) -> &StudyState {
        &self.state
    }

    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state.snapshot()
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Save the current state, reporting failures to the caller.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if encoding or the repository write fails.
    pub async fn flush(&self) -> Result<(), StorageError> {
        let bytes = encode_state(&self.state)?;
        self.repo.save(&self.key, &bytes).await?;
        tracing::debug!(key = %self.key, bytes = bytes.len(), "saved study state");
        Ok(())
    }

    async fn persist(&self) {
        if let Err(err) = self.flush().await {
            tracing::warn!(key = %self.key, error = %err, "failed to persist study state");
        }
    }

    // ─── Progress ───────────────────────────────────────────────────────────

    pub async fn update_streak(&mut self) -> StreakTransition {
        let transition = self.state.update_streak(self.clock.today());
        if transition != StreakTransition::Unchanged {
            self.persist().await;
        }
        transition
    }

    /// Accrue minutes for one completed study action. Zero minutes is a no-op.
    pub async fn add_study_time(&mut self, minutes: u32) -> StreakTransition {
        if minutes == 0 {
            tracing::debug!("ignoring zero-minute study time");
            return StreakTransition::Unchanged;
        }
        let transition = self.state.add_study_time(minutes, self.clock.today());
        self.persist().await;
        transition
    }

    pub async fn set_daily_goal(&mut self, minutes: NonZeroU32) {
        self.state.set_daily_goal(minutes);
        self.persist().await;
    }

    pub async fn reset_daily_progress(&mut self) {
        self.state.reset_daily_progress();
        self.persist().await;
    }

    // ─── Artifacts ──────────────────────────────────────────────────────────

    pub async fn add_flashcard_set(&mut self, set: FlashcardSet) {
        self.state.add_flashcard_set(set);
        self.persist().await;
    }

    pub async fn update_flashcard(
        &mut self,
        set_id: &FlashcardSetId,
        card_id: &CardId,
        patch: FlashcardPatch,
    ) -> bool {
        let found = self.state.update_flashcard(set_id, card_id, patch);
        if found {
            self.persist().await;
        } else {
            tracing::debug!(set = %set_id, card = %card_id, "update of unknown flashcard ignored");
        }
        found
    }

    pub async fn review_flashcard(
        &mut self,
        set_id: &FlashcardSetId,
        card_id: &CardId,
        known: bool,
    ) -> bool {
        let found = self.state.review_flashcard(set_id, card_id, known);
        if found {
            self.persist().await;
        } else {
            tracing::debug!(set = %set_id, card = %card_id, "review of unknown flashcard ignored");
        }
        found
    }

    pub async fn delete_flashcard_set(&mut self, set_id: &FlashcardSetId) -> bool {
        let found = self.state.delete_flashcard_set(set_id);
        if found {
            self.persist().await;
        } else {
            tracing::debug!(set = %set_id, "delete of unknown flashcard set ignored");
        }
        found
    }

    pub async fn add_quiz_result(&mut self, result: QuizResult) {
        self.state.add_quiz_result(result);
        self.persist().await;
    }

    pub async fn add_summary(&mut self, summary: Summary) {
        self.state.add_summary(summary);
        self.persist().await;
    }

    // ─── Badges ─────────────────────────────────────────────────────────────

    pub async fn unlock_badge(&mut self, id: BadgeId) -> bool {
        let unlocked = self.state.unlock_badge(id, self.clock.now());
        if unlocked {
            tracing::info!(badge = %id, "badge unlocked");
            self.persist().await;
        }
        unlocked
    }

    /// Unlock by catalog key such as `"first-summary"`. Unknown keys are ignored.
    pub async fn unlock_badge_key(&mut self, key: &str) -> bool {
        match key.parse::<BadgeId>() {
            Ok(id) => self.unlock_badge(id).await,
            Err(err) => {
                tracing::debug!(error = %err, "unlock of unknown badge ignored");
                false
            }
        }
    }

    pub async fn evaluate_milestones(&mut self) -> Vec<BadgeId> {
        let unlocked = self.state.evaluate_milestones(self.clock.now());
        if !unlocked.is_empty() {
            tracing::info!(badges = ?unlocked, "milestone badges unlocked");
            self.persist().await;
        }
        unlocked
    }

    // ─── Preferences ────────────────────────────────────────────────────────

    pub async fn toggle_dark_mode(&mut self) -> bool {
        let dark = self.state.toggle_dark_mode();
        if let Some(hook) = &self.theme {
            hook.apply_dark_mode(dark);
        }
        self.persist().await;
        dark
    }

    pub async fn toggle_reduced_motion(&mut self) -> bool {
        let reduced = self.state.toggle_reduced_motion();
        self.persist().await;
        reduced
    }
}
