//! Study material generation on top of a [`TextGenerator`] backend.

mod client;
mod parse;
mod prompts;

use std::sync::Arc;

use study_core::model::{Flashcard, QuizQuestion};

pub use client::{ChatCompletionsClient, ChatCompletionsConfig, TextGenerator};
pub use parse::{
    CitationFormat, GrammarIssue, MAX_CITATIONS, parse_citations, parse_flashcards, parse_grammar,
    parse_quiz,
};

use crate::error::GenerationError;

/// Short and detailed summaries of one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryDraft {
    pub short_summary: String,
    pub detailed_summary: String,
}

/// Turns prompts into parsed study artifacts.
#[derive(Clone)]
pub struct StudyGenerator {
    backend: Arc<dyn TextGenerator>,
}

impl StudyGenerator {
    #[must_use]
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.backend.enabled()
    }

    /// Request the short and detailed summaries concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first `GenerationError`; no partial draft is produced.
    pub async fn summarize(&self, text: &str) -> Result<SummaryDraft, GenerationError> {
        let short_prompt = prompts::short_summary(text);
        let detailed_prompt = prompts::detailed_summary(text);
        let (short_summary, detailed_summary) = tokio::try_join!(
            self.backend.generate(&short_prompt),
            self.backend.generate(&detailed_prompt),
        )?;
        Ok(SummaryDraft {
            short_summary,
            detailed_summary,
        })
    }

    /// # Errors
    ///
    /// Returns `GenerationError` if the backend fails.
    pub async fn flashcards(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<Vec<Flashcard>, GenerationError> {
        let text = self.backend.generate(&prompts::flashcards(topic, count)).await?;
        let cards = parse_flashcards(&text, count);
        tracing::debug!(topic, requested = count, parsed = cards.len(), "parsed flashcards");
        Ok(cards)
    }

    /// # Errors
    ///
    /// Returns `GenerationError` if the backend fails.
    pub async fn quiz(
        &self,
        topic: &str,
        count: usize,
    ) -> Result<Vec<QuizQuestion>, GenerationError> {
        let text = self.backend.generate(&prompts::quiz(topic, count)).await?;
        let questions = parse_quiz(&text, count);
        tracing::debug!(topic, requested = count, parsed = questions.len(), "parsed quiz");
        Ok(questions)
    }

    /// Essay outline, returned as the backend wrote it.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` if the backend fails.
    pub async fn outline(&self, topic: &str) -> Result<String, GenerationError> {
        self.backend.generate(&prompts::outline(topic)).await
    }

    /// # Errors
    ///
    /// Returns `GenerationError` if the backend fails.
    pub async fn citations(&self, format: CitationFormat) -> Result<Vec<String>, GenerationError> {
        let text = self.backend.generate(&prompts::citations(format)).await?;
        Ok(parse_citations(&text))
    }

    /// # Errors
    ///
    /// Returns `GenerationError` if the backend fails.
    pub async fn grammar(&self, text: &str) -> Result<Vec<GrammarIssue>, GenerationError> {
        let reply = self.backend.generate(&prompts::grammar(text)).await?;
        Ok(parse_grammar(&reply))
    }
}
