//! The study progress store.
//!
//! `StudyState` is the single owner of a learner's progress, preferences,
//! badges and saved study artifacts. Every mutation is synchronous and leaves
//! the state consistent; lookups of unknown ids are absorbed as no-ops and
//! reported through the boolean return value.

use std::num::NonZeroU32;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    Badge, BadgeId, CardId, FlashcardPatch, FlashcardSet, FlashcardSetId, Preferences, Progress,
    ProgressSnapshot, QuizResult, StreakTransition, Summary, default_badges, deserialize_badges,
    reconcile_badges,
};

/// Streak length that unlocks [`BadgeId::Streak3`].
pub const STREAK_3_DAYS: u32 = 3;
/// Streak length that unlocks [`BadgeId::Streak7`].
pub const STREAK_7_DAYS: u32 = 7;
/// Total minutes that unlock [`BadgeId::StudyHour`].
pub const STUDY_HOUR_MINUTES: u32 = 60;
/// Reviewed cards that unlock [`BadgeId::Cards100`].
pub const CARDS_REVIEWED_TARGET: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyState {
    #[serde(default)]
    progress: Progress,
    #[serde(default)]
    flashcard_sets: Vec<FlashcardSet>,
    #[serde(default)]
    quiz_results: Vec<QuizResult>,
    #[serde(default)]
    summaries: Vec<Summary>,
    #[serde(default = "default_badges", deserialize_with = "deserialize_badges")]
    badges: Vec<Badge>,
    #[serde(default)]
    preferences: Preferences,
}

impl Default for StudyState {
    fn default() -> Self {
        Self {
            progress: Progress::default(),
            flashcard_sets: Vec::new(),
            quiz_results: Vec::new(),
            summaries: Vec::new(),
            badges: default_badges(),
            preferences: Preferences::default(),
        }
    }
}

impl StudyState {
    /// Fresh state: zeroed progress, locked catalog, empty collections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-align a rehydrated state with the fixed badge catalog.
    #[must_use]
    pub fn reconciled(mut self) -> Self {
        self.badges = reconcile_badges(&self.badges);
        self
    }

    // ─── Reads ──────────────────────────────────────────────────────────────

    #[must_use]
    pub fn progress(&self) -> &Progress {
        &self.progress
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.preferences
    }

    #[must_use]
    pub fn flashcard_sets(&self) -> &[FlashcardSet] {
        &self.flashcard_sets
    }

    #[must_use]
    pub fn flashcard_set(&self, id: &FlashcardSetId) -> Option<&FlashcardSet> {
        self.flashcard_sets.iter().find(|set| &set.id == id)
    }

    #[must_use]
    pub fn quiz_results(&self) -> &[QuizResult] {
        &self.quiz_results
    }

    #[must_use]
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }

    #[must_use]
    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }

    #[must_use]
    pub fn badge(&self, id: BadgeId) -> Option<&Badge> {
        self.badges.iter().find(|badge| badge.id == id)
    }

    /// Derived read model; never persisted.
    #[must_use]
    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot::from_state(self)
    }

    // ─── Progress ───────────────────────────────────────────────────────────

    pub fn update_streak(&mut self, today: NaiveDate) -> StreakTransition {
        self.progress.update_streak(today)
    }

    /// Accrue minutes from one completed study action and update the streak.
    pub fn add_study_time(&mut self, minutes: u32, today: NaiveDate) -> StreakTransition {
        self.progress.add_study_time(minutes, today)
    }

    pub fn set_daily_goal(&mut self, minutes: NonZeroU32) {
        self.progress.set_daily_goal(minutes);
    }

    pub fn reset_daily_progress(&mut self) {
        self.progress.reset_daily_progress();
    }

    // ─── Artifacts ──────────────────────────────────────────────────────────

    pub fn add_flashcard_set(&mut self, set: FlashcardSet) {
        self.flashcard_sets.push(set);
    }

    /// Merge `patch` into a card. Returns false if the set or card is unknown.
    pub fn update_flashcard(
        &mut self,
        set_id: &FlashcardSetId,
        card_id: &CardId,
        patch: FlashcardPatch,
    ) -> bool {
        let Some(card) = self
            .flashcard_sets
            .iter_mut()
            .find(|set| &set.id == set_id)
            .and_then(|set| set.card_mut(card_id))
        else {
            return false;
        };
        card.apply(patch);
        true
    }

    /// Mark a card known/unknown and count the review.
    pub fn review_flashcard(&mut self, set_id: &FlashcardSetId, card_id: &CardId, known: bool) -> bool {
        let found = self.update_flashcard(set_id, card_id, FlashcardPatch::known(known));
        if found {
            self.progress.cards_reviewed = self.progress.cards_reviewed.saturating_add(1);
        }
        found
    }

    /// Remove a set. Returns false if no set has this id.
    pub fn delete_flashcard_set(&mut self, set_id: &FlashcardSetId) -> bool {
        let before = self.flashcard_sets.len();
        self.flashcard_sets.retain(|set| &set.id != set_id);
        self.flashcard_sets.len() != before
    }

    pub fn add_quiz_result(&mut self, result: QuizResult) {
        self.quiz_results.push(result);
    }

    pub fn add_summary(&mut self, summary: Summary) {
        self.summaries.push(summary);
    }

    // ─── Badges ─────────────────────────────────────────────────────────────

    /// Unlock a badge at `now`. Idempotent: returns false if already unlocked.
    pub fn unlock_badge(&mut self, id: BadgeId, now: DateTime<Utc>) -> bool {
        self.badges
            .iter_mut()
            .find(|badge| badge.id == id)
            .is_some_and(|badge| badge.unlock(now))
    }

    /// Unlock every milestone badge whose threshold is reached.
    ///
    /// Returns the badges unlocked by this call, in catalog order.
    pub fn evaluate_milestones(&mut self, now: DateTime<Utc>) -> Vec<BadgeId> {
        let progress = &self.progress;
        let reached = [
            (BadgeId::Streak3, progress.streak >= STREAK_3_DAYS),
            (BadgeId::Streak7, progress.streak >= STREAK_7_DAYS),
            (BadgeId::Cards100, progress.cards_reviewed >= CARDS_REVIEWED_TARGET),
            (BadgeId::StudyHour, progress.total_study_time >= STUDY_HOUR_MINUTES),
        ];

        reached
            .into_iter()
            .filter(|(_, hit)| *hit)
            .filter_map(|(id, _)| self.unlock_badge(id, now).then_some(id))
            .collect()
    }

    // ─── Preferences ────────────────────────────────────────────────────────

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.preferences.toggle_dark_mode()
    }

    pub fn toggle_reduced_motion(&mut self) -> bool {
        self.preferences.toggle_reduced_motion()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
