use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{QuestionId, QuizResultId};

/// Every quiz question offers exactly this many options.
pub const OPTION_COUNT: usize = 4;

//
// ─── ERRORS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("correct answer index {0} is out of range 0-3")]
    AnswerOutOfRange(u8),
}

//
// ─── QUESTION ─────────────────────────────────────────────────────────────────
//

/// A four-option multiple-choice question.
///
/// `correct_answer` is always a valid index into `options`; construction and
/// deserialization both reject anything else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "QuizQuestionRecord")]
pub struct QuizQuestion {
    id: QuestionId,
    question: String,
    options: [String; OPTION_COUNT],
    correct_answer: u8,
    explanation: String,
}

#[derive(Deserialize)]
struct QuizQuestionRecord {
    id: QuestionId,
    question: String,
    options: [String; OPTION_COUNT],
    correct_answer: u8,
    explanation: String,
}

impl TryFrom<QuizQuestionRecord> for QuizQuestion {
    type Error = QuizError;

    fn try_from(record: QuizQuestionRecord) -> Result<Self, Self::Error> {
        Self::new(
            record.id,
            record.question,
            record.options,
            record.correct_answer,
            record.explanation,
        )
    }
}

impl QuizQuestion {
    /// Build a question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AnswerOutOfRange` if `correct_answer` is not 0-3.
    pub fn new(
        id: QuestionId,
        question: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_answer: u8,
        explanation: impl Into<String>,
    ) -> Result<Self, QuizError> {
        if usize::from(correct_answer) >= OPTION_COUNT {
            return Err(QuizError::AnswerOutOfRange(correct_answer));
        }
        Ok(Self {
            id,
            question: question.into(),
            options,
            correct_answer,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> u8 {
        self.correct_answer
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[usize::from(self.correct_answer)]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    #[must_use]
    pub fn is_correct(&self, choice: Option<u8>) -> bool {
        choice == Some(self.correct_answer)
    }
}

//
// ─── RESULT ───────────────────────────────────────────────────────────────────
//

/// Outcome of a finished quiz. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: QuizResultId,
    pub topic: String,
    pub score: u32,
    pub total: u32,
    pub date: DateTime<Utc>,
    pub missed_questions: Vec<QuizQuestion>,
}

impl QuizResult {
    /// Score as a rounded percentage; 0 for an empty quiz.
    #[must_use]
    pub fn accuracy_percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = f64::from(self.score) / f64::from(self.total) * 100.0;
        // clamped to 0..=100 before the cast
        pct.round().clamp(0.0, 100.0) as u32
    }

    #[must_use]
    pub fn is_perfect(&self) -> bool {
        self.total > 0 && self.score == self.total
    }
}

//
// ─── ATTEMPT ──────────────────────────────────────────────────────────────────
//

/// One play-through of a quiz: the questions and the learner's choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizAttempt {
    questions: Vec<QuizQuestion>,
    answers: Vec<Option<u8>>,
}

impl QuizAttempt {
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self { questions, answers }
    }

    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<u8>] {
        &self.answers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Record the choice for question `index`. Out-of-range input is ignored.
    pub fn answer(&mut self, index: usize, choice: u8) {
        if usize::from(choice) >= OPTION_COUNT {
            return;
        }
        if let Some(slot) = self.answers.get_mut(index) {
            *slot = Some(choice);
        }
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.answers.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| q.is_correct(**a))
            .count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// Questions answered wrongly or left unanswered, in quiz order.
    #[must_use]
    pub fn missed(&self) -> Vec<QuizQuestion> {
        self.questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| !q.is_correct(**a))
            .map(|(q, _)| q.clone())
            .collect()
    }

    /// Grade the attempt into an immutable result.
    #[must_use]
    pub fn finish(&self, id: QuizResultId, topic: impl Into<String>, date: DateTime<Utc>) -> QuizResult {
        QuizResult {
            id,
            topic: topic.into(),
            score: self.score(),
            total: u32::try_from(self.questions.len()).unwrap_or(u32::MAX),
            date,
            missed_questions: self.missed(),
        }
    }

    /// A fresh attempt over the missed questions, or `None` when nothing was missed.
    #[must_use]
    pub fn retake_missed(&self) -> Option<QuizAttempt> {
        let missed = self.missed();
        if missed.is_empty() {
            None
        } else {
            Some(QuizAttempt::new(missed))
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
