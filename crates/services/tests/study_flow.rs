use std::sync::Arc;

use async_trait::async_trait;
use study_core::model::BadgeId;
use study_core::time::fixed_now;
use study_services::export::{Delimiter, flashcards_delimited};
use study_services::{
    CitationFormat, Clock, GenerationError, StudyActionError, StudyServices, StudyStore,
    TextGenerator,
};
use study_storage::{DEFAULT_STATE_KEY, InMemoryRepository, Storage};

/// Answers each prompt kind with a canned reply in the requested line format.
struct Scripted;

#[async_trait]
impl TextGenerator for Scripted {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let reply = if prompt.starts_with("Summarize") {
            "Cells make energy."
        } else if prompt.starts_with("Provide detailed summary") {
            "Mitochondria turn glucose into ATP through respiration."
        } else if prompt.contains("flashcards") {
            "Q: What makes ATP?\nA: Mitochondria\nQ: What is ATP?\nA: Energy currency"
        } else if prompt.contains("multiple-choice") {
            "Q: Powerhouse of the cell?\nA) Nucleus\nB) Mitochondrion\nC) Ribosome\nD) Golgi\n\
             CORRECT: B\nEXPLANATION: It makes ATP.\n\n\
             Q: ATP stands for?\nA) Adenosine triphosphate\nB) Acid\nC) Atom\nD) None\n\
             CORRECT: A\nEXPLANATION: By definition."
        } else if prompt.contains("citations") {
            "Smith, J. Cells. 2020.\nDoe, A. Energy. 2019."
        } else {
            "I. Intro\nII. Body\nIII. Conclusion"
        };
        Ok(reply.to_string())
    }
}

struct Offline;

#[async_trait]
impl TextGenerator for Offline {
    fn enabled(&self) -> bool {
        false
    }

    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        Err(GenerationError::Disabled)
    }
}

#[tokio::test]
async fn study_day_unlocks_first_time_badges_and_persists() {
    let storage = Storage::sqlite("sqlite:file:memdb_study_day?mode=memory&cache=shared")
        .await
        .expect("connect sqlite");
    let clock = Clock::fixed(fixed_now());
    let store = StudyStore::open(clock, Arc::clone(&storage.state), DEFAULT_STATE_KEY).await;
    let mut services = StudyServices::new(store, Arc::new(Scripted));
    let (actions, store) = services.parts_mut();

    let summary = actions
        .summarize(store, "Mitochondria are the powerhouse of the cell.")
        .await
        .expect("summarize");
    assert_eq!(summary.unlocked, vec![BadgeId::FirstSummary]);
    actions
        .save_summary(store, "Mitochondria are the powerhouse of the cell.", &summary.value)
        .await;

    let cards = actions
        .generate_flashcards(store, "Cell biology")
        .await
        .expect("flashcards");
    assert_eq!(cards.value.len(), 2);
    assert_eq!(cards.unlocked, vec![BadgeId::FirstFlashcards]);
    assert_eq!(
        flashcards_delimited(&cards.value, Delimiter::Csv),
        "\"What makes ATP?\",\"Mitochondria\"\n\"What is ATP?\",\"Energy currency\""
    );
    let set_id = actions
        .save_flashcard_set(store, "Cell biology", cards.value)
        .await
        .expect("saved");

    let card_id = store.state().flashcard_set(&set_id).expect("set").cards[0].id.clone();
    let reviewed = actions.review_card(store, &set_id, &card_id, true).await;
    assert!(reviewed.value);

    let quiz = actions.start_quiz(store, "Cell biology").await.expect("quiz");
    assert_eq!(quiz.unlocked, vec![BadgeId::FirstQuiz]);
    let mut attempt = quiz.value;
    attempt.answer(0, 1);
    attempt.answer(1, 0);
    let finished = actions.finish_quiz(store, "Cell biology", &attempt).await;
    assert_eq!(finished.unlocked, vec![BadgeId::PerfectQuiz]);

    let outline = actions
        .generate_outline(store, "Cell biology")
        .await
        .expect("outline");
    assert!(outline.value.starts_with("I. Intro"));
    let citations = actions
        .generate_citations(CitationFormat::Mla)
        .await
        .expect("citations");
    assert_eq!(citations.len(), 2);

    let snapshot = store.snapshot();
    assert_eq!(snapshot.streak, 1);
    assert_eq!(snapshot.total_study_time, 2 + 3 + 5 + 3);
    assert_eq!(snapshot.activities, 3);
    assert_eq!(snapshot.badges_unlocked, 4);
    assert_eq!(snapshot.recent_quiz_accuracy, vec![100]);

    let expected = store.state().clone();
    let reopened = StudyStore::open(clock, Arc::clone(&storage.state), DEFAULT_STATE_KEY).await;
    assert_eq!(reopened.state(), &expected);
    assert_eq!(reopened.state().progress().cards_reviewed, 1);
}

#[tokio::test]
async fn streak_follows_calendar_days_across_reopen() {
    let repo = Arc::new(InMemoryRepository::new());
    let mut clock = Clock::fixed(fixed_now());

    let mut store = StudyStore::open(clock, repo.clone(), DEFAULT_STATE_KEY).await;
    store.add_study_time(10).await;
    assert_eq!(store.state().progress().streak, 1);

    clock.advance_days(1);
    let mut store = StudyStore::open(clock, repo.clone(), DEFAULT_STATE_KEY).await;
    store.reset_daily_progress().await;
    store.add_study_time(5).await;
    assert_eq!(store.state().progress().streak, 2);
    assert_eq!(store.state().progress().daily_progress, 5);
    assert_eq!(store.state().progress().total_study_time, 15);

    clock.advance_days(3);
    let mut store = StudyStore::open(clock, repo, DEFAULT_STATE_KEY).await;
    store.add_study_time(1).await;
    assert_eq!(store.state().progress().streak, 1);
    assert_eq!(store.state().progress().last_study_date, Some(clock.today()));
}

#[tokio::test]
async fn disabled_generation_leaves_progress_untouched() {
    let mut services = StudyServices::in_memory(Clock::fixed(fixed_now()), Arc::new(Offline)).await;
    assert!(!services.actions().generator().enabled());

    let before = services.store().state().clone();
    let (actions, store) = services.parts_mut();
    let err = actions
        .summarize(store, "A perfectly long enough text.")
        .await
        .unwrap_err();
    assert!(matches!(err, StudyActionError::Generation(GenerationError::Disabled)));
    assert_eq!(services.store().state(), &before);
}
