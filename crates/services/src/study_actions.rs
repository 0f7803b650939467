use rand::seq::SliceRandom;
use study_core::model::input::{validate_card, validate_text, validate_topic};
use study_core::model::{
    BadgeId, CardId, Flashcard, FlashcardSet, FlashcardSetId, QuizAttempt, QuizResult, QuizResultId,
    Summary,
};

use crate::error::StudyActionError;
use crate::generation::{CitationFormat, GrammarIssue, StudyGenerator, SummaryDraft};
use crate::study_store::StudyStore;

/// Cards requested per flashcard generation.
pub const FLASHCARD_COUNT: usize = 8;
/// Questions requested per quiz.
pub const QUIZ_QUESTION_COUNT: usize = 8;

/// Minutes credited per completed action.
pub const SUMMARIZE_MINUTES: u32 = 2;
pub const FLASHCARDS_MINUTES: u32 = 3;
pub const QUIZ_MINUTES: u32 = 5;
pub const OUTLINE_MINUTES: u32 = 3;

/// Generated content plus the badges the action unlocked, in unlock order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome<T> {
    pub value: T,
    pub unlocked: Vec<BadgeId>,
}

/// Command handlers behind the study tools.
///
/// Handlers validate input and generate content before touching the store,
/// so a failed action leaves progress exactly as it was.
#[derive(Clone)]
pub struct StudyActions {
    generator: StudyGenerator,
}

impl StudyActions {
    #[must_use]
    pub fn new(generator: StudyGenerator) -> Self {
        Self { generator }
    }

    #[must_use]
    pub fn generator(&self) -> &StudyGenerator {
        &self.generator
    }

    /// Summarize `text`, credit study time and award `first-summary` when
    /// nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StudyActionError::Input` for short text and
    /// `StudyActionError::Generation` if the backend fails.
    pub async fn summarize(
        &self,
        store: &mut StudyStore,
        text: &str,
    ) -> Result<ActionOutcome<SummaryDraft>, StudyActionError> {
        let text = validate_text(text)?;
        let draft = self.generator.summarize(text).await?;
        let first = store.state().summaries().is_empty();
        let unlocked = credit(store, SUMMARIZE_MINUTES, first.then_some(BadgeId::FirstSummary)).await;
        Ok(ActionOutcome {
            value: draft,
            unlocked,
        })
    }

    /// Save a generated summary; the topic is derived from `text`.
    pub async fn save_summary(
        &self,
        store: &mut StudyStore,
        text: &str,
        draft: &SummaryDraft,
    ) -> Summary {
        let summary = Summary::from_source(
            text.trim(),
            draft.short_summary.clone(),
            draft.detailed_summary.clone(),
            store.clock().now(),
        );
        store.add_summary(summary.clone()).await;
        summary
    }

    /// # Errors
    ///
    /// Returns `StudyActionError::Input` for a short topic and
    /// `StudyActionError::Generation` if the backend fails.
    pub async fn generate_flashcards(
        &self,
        store: &mut StudyStore,
        topic: &str,
    ) -> Result<ActionOutcome<Vec<Flashcard>>, StudyActionError> {
        let topic = validate_topic(topic)?;
        let cards = self.generator.flashcards(topic, FLASHCARD_COUNT).await?;
        let first = store.state().flashcard_sets().is_empty();
        let unlocked = credit(
            store,
            FLASHCARDS_MINUTES,
            first.then_some(BadgeId::FirstFlashcards),
        )
        .await;
        Ok(ActionOutcome {
            value: cards,
            unlocked,
        })
    }

    /// Save `cards` as a set named after its topic. Returns `None` without
    /// touching the store when there is nothing to save.
    pub async fn save_flashcard_set(
        &self,
        store: &mut StudyStore,
        name: &str,
        cards: Vec<Flashcard>,
    ) -> Option<FlashcardSetId> {
        if cards.is_empty() {
            tracing::debug!("not saving an empty flashcard set");
            return None;
        }
        let set = FlashcardSet::new(name.trim(), cards, store.clock().now());
        let id = set.id.clone();
        store.add_flashcard_set(set).await;
        Some(id)
    }

    /// Build a manual flashcard.
    ///
    /// # Errors
    ///
    /// Returns `StudyActionError::Input` if either side is blank.
    pub fn new_card(&self, question: &str, answer: &str) -> Result<Flashcard, StudyActionError> {
        validate_card(question, answer)?;
        Ok(Flashcard::new(question.trim(), answer.trim()))
    }

    pub fn shuffle_cards(&self, cards: &mut [Flashcard]) {
        cards.shuffle(&mut rand::rng());
    }

    /// Record a know/don't-know review and award any milestone it completes.
    pub async fn review_card(
        &self,
        store: &mut StudyStore,
        set_id: &FlashcardSetId,
        card_id: &CardId,
        known: bool,
    ) -> ActionOutcome<bool> {
        let found = store.review_flashcard(set_id, card_id, known).await;
        let unlocked = if found {
            store.evaluate_milestones().await
        } else {
            Vec::new()
        };
        ActionOutcome {
            value: found,
            unlocked,
        }
    }

    /// Generate a quiz and credit study time for starting it.
    ///
    /// # Errors
    ///
    /// Returns `StudyActionError::Input` for a short topic and
    /// `StudyActionError::Generation` if the backend fails.
    pub async fn start_quiz(
        &self,
        store: &mut StudyStore,
        topic: &str,
    ) -> Result<ActionOutcome<QuizAttempt>, StudyActionError> {
        let topic = validate_topic(topic)?;
        let questions = self.generator.quiz(topic, QUIZ_QUESTION_COUNT).await?;
        let first = store.state().quiz_results().is_empty();
        let unlocked = credit(store, QUIZ_MINUTES, first.then_some(BadgeId::FirstQuiz)).await;
        Ok(ActionOutcome {
            value: QuizAttempt::new(questions),
            unlocked,
        })
    }

    /// Grade `attempt`, store the result and award `perfect-quiz` on a perfect score.
    pub async fn finish_quiz(
        &self,
        store: &mut StudyStore,
        topic: &str,
        attempt: &QuizAttempt,
    ) -> ActionOutcome<QuizResult> {
        let result = attempt.finish(QuizResultId::generate(), topic.trim(), store.clock().now());
        store.add_quiz_result(result.clone()).await;

        let mut unlocked = Vec::new();
        if result.is_perfect() && store.unlock_badge(BadgeId::PerfectQuiz).await {
            unlocked.push(BadgeId::PerfectQuiz);
        }
        ActionOutcome {
            value: result,
            unlocked,
        }
    }

    /// # Errors
    ///
    /// Returns `StudyActionError::Input` for a short topic and
    /// `StudyActionError::Generation` if the backend fails.
    pub async fn generate_outline(
        &self,
        store: &mut StudyStore,
        topic: &str,
    ) -> Result<ActionOutcome<String>, StudyActionError> {
        let topic = validate_topic(topic)?;
        let outline = self.generator.outline(topic).await?;
        let unlocked = credit(store, OUTLINE_MINUTES, None).await;
        Ok(ActionOutcome {
            value: outline,
            unlocked,
        })
    }

    /// # Errors
    ///
    /// Returns `StudyActionError::Generation` if the backend fails.
    pub async fn generate_citations(
        &self,
        format: CitationFormat,
    ) -> Result<Vec<String>, StudyActionError> {
        Ok(self.generator.citations(format).await?)
    }

    /// # Errors
    ///
    /// Returns `StudyActionError::Input` for short text and
    /// `StudyActionError::Generation` if the backend fails.
    pub async fn check_grammar(&self, text: &str) -> Result<Vec<GrammarIssue>, StudyActionError> {
        let text = validate_text(text)?;
        Ok(self.generator.grammar(text).await?)
    }
}

async fn credit(store: &mut StudyStore, minutes: u32, first_badge: Option<BadgeId>) -> Vec<BadgeId> {
    store.add_study_time(minutes).await;

    let mut unlocked = Vec::new();
    if let Some(badge) = first_badge {
        if store.unlock_badge(badge).await {
            unlocked.push(badge);
        }
    }
    unlocked.extend(store.evaluate_milestones().await);
    unlocked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GenerationError;
    use crate::generation::TextGenerator;
    use async_trait::async_trait;
    use std::sync::Arc;
    use study_core::model::InputError;
    use study_core::time::fixed_clock;
    use study_storage::InMemoryRepository;

    struct Echo(&'static str);

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Ok(self.0.to_string())
        }
    }

    struct Down;

    #[async_trait]
    impl TextGenerator for Down {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Backend("unavailable".into()))
        }
    }

    fn actions(backend: impl TextGenerator + 'static) -> StudyActions {
        StudyActions::new(StudyGenerator::new(Arc::new(backend)))
    }

    async fn store() -> StudyStore {
        StudyStore::open(fixed_clock(), Arc::new(InMemoryRepository::new()), "k").await
    }

    #[tokio::test]
    async fn summarize_credits_time_and_first_badge_once() {
        let actions = actions(Echo("A summary."));
        let mut store = store().await;

        let outcome = actions.summarize(&mut store, "  Photosynthesis converts light.  ").await.unwrap();
        assert_eq!(outcome.value.short_summary, "A summary.");
        assert_eq!(outcome.unlocked, vec![BadgeId::FirstSummary]);
        assert_eq!(store.state().progress().total_study_time, SUMMARIZE_MINUTES);

        let saved = actions
            .save_summary(&mut store, "Photosynthesis converts light.", &outcome.value)
            .await;
        assert_eq!(saved.topic, "Photosynthesis converts light....");

        let again = actions.summarize(&mut store, "Photosynthesis again.").await.unwrap();
        assert!(again.unlocked.is_empty());
        assert_eq!(store.state().summaries().len(), 1);
    }

    #[tokio::test]
    async fn short_input_never_reaches_generator_or_store() {
        let actions = actions(Down);
        let mut store = store().await;

        let err = actions.summarize(&mut store, "too short").await.unwrap_err();
        assert!(matches!(err, StudyActionError::Input(InputError::TextTooShort { min: 10 })));
        let err = actions.start_quiz(&mut store, " ab ").await.unwrap_err();
        assert!(matches!(err, StudyActionError::Input(InputError::TopicTooShort { min: 3 })));
        assert_eq!(store.state(), &study_core::StudyState::new());
    }

    #[tokio::test]
    async fn generation_failure_leaves_store_untouched() {
        let actions = actions(Down);
        let mut store = store().await;
        let err = actions.generate_flashcards(&mut store, "Biology").await.unwrap_err();
        assert!(matches!(err, StudyActionError::Generation(GenerationError::Backend(_))));
        assert_eq!(store.state(), &study_core::StudyState::new());
    }

    #[tokio::test]
    async fn perfect_quiz_unlocks_badge() {
        let reply = "Q: 2+2?\nA) 3\nB) 4\nC) 5\nD) 6\nCORRECT: B\nEXPLANATION: arithmetic";
        let actions = actions(Echo(reply));
        let mut store = store().await;

        let started = actions.start_quiz(&mut store, "Maths").await.unwrap();
        assert_eq!(started.unlocked, vec![BadgeId::FirstQuiz]);
        assert_eq!(store.state().progress().daily_progress, QUIZ_MINUTES);

        let mut attempt = started.value;
        assert_eq!(attempt.len(), 1);
        attempt.answer(0, 1);
        let finished = actions.finish_quiz(&mut store, "Maths", &attempt).await;
        assert_eq!(finished.value.score, 1);
        assert_eq!(finished.unlocked, vec![BadgeId::PerfectQuiz]);
        assert_eq!(store.state().quiz_results().len(), 1);
    }

    #[tokio::test]
    async fn empty_set_is_not_saved() {
        let actions = actions(Echo(""));
        let mut store = store().await;
        assert!(actions.save_flashcard_set(&mut store, "Empty", Vec::new()).await.is_none());
        assert!(store.state().flashcard_sets().is_empty());
    }

    #[test]
    fn manual_cards_need_both_sides() {
        let actions = actions(Echo(""));
        assert!(matches!(
            actions.new_card("  ", "answer"),
            Err(StudyActionError::Input(InputError::EmptyQuestion))
        ));
        let card = actions.new_card(" Q ", " A ").unwrap();
        assert_eq!((card.question.as_str(), card.answer.as_str()), ("Q", "A"));
        assert!(!card.known);
    }

    #[test]
    fn shuffle_keeps_every_card() {
        let actions = actions(Echo(""));
        let mut cards: Vec<_> = (0..10).map(|i| Flashcard::new(format!("q{i}"), "a")).collect();
        let mut ids: Vec<_> = cards.iter().map(|c| c.id.clone()).collect();
        actions.shuffle_cards(&mut cards);
        let mut shuffled: Vec<_> = cards.iter().map(|c| c.id.clone()).collect();
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        shuffled.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        assert_eq!(ids, shuffled);
    }
}
