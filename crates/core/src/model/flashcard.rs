use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::{CardId, FlashcardSetId};

//
// ─── FLASHCARD ─────────────────────────────────────────────────────────────────
//

/// A question/answer pair and whether the learner already knows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub known: bool,
}

impl Flashcard {
    /// Creates an unknown card with a freshly generated id.
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: CardId::generate(),
            question: question.into(),
            answer: answer.into(),
            known: false,
        }
    }

    /// Merge a partial update into this card.
    pub fn apply(&mut self, patch: FlashcardPatch) {
        if let Some(question) = patch.question {
            self.question = question;
        }
        if let Some(answer) = patch.answer {
            self.answer = answer;
        }
        if let Some(known) = patch.known {
            self.known = known;
        }
    }
}

/// Partial update for a [`Flashcard`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlashcardPatch {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub known: Option<bool>,
}

impl FlashcardPatch {
    #[must_use]
    pub fn known(known: bool) -> Self {
        Self {
            known: Some(known),
            ..Self::default()
        }
    }
}

//
// ─── FLASHCARD SET ─────────────────────────────────────────────────────────────
//

/// A named, saved collection of flashcards. The set owns its cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardSet {
    pub id: FlashcardSetId,
    pub name: String,
    pub cards: Vec<Flashcard>,
    pub created_at: DateTime<Utc>,
}

impl FlashcardSet {
    #[must_use]
    pub fn new(name: impl Into<String>, cards: Vec<Flashcard>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: FlashcardSetId::generate(),
            name: name.into(),
            cards,
            created_at,
        }
    }

    #[must_use]
    pub fn card(&self, id: &CardId) -> Option<&Flashcard> {
        self.cards.iter().find(|card| &card.id == id)
    }

    pub(crate) fn card_mut(&mut self, id: &CardId) -> Option<&mut Flashcard> {
        self.cards.iter_mut().find(|card| &card.id == id)
    }

    /// Number of cards marked as known.
    #[must_use]
    pub fn known_count(&self) -> usize {
        self.cards.iter().filter(|card| card.known).count()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
