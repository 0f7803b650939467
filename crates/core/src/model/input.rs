use thiserror::Error;

/// Minimum trimmed length of text handed to summarization or grammar checks.
pub const MIN_TEXT_CHARS: usize = 10;

/// Minimum trimmed length of a topic for flashcards, quizzes and outlines.
pub const MIN_TOPIC_CHARS: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InputError {
    #[error("please enter at least {min} characters")]
    TextTooShort { min: usize },

    #[error("please enter a topic (at least {min} characters)")]
    TopicTooShort { min: usize },

    #[error("flashcard question must not be empty")]
    EmptyQuestion,

    #[error("flashcard answer must not be empty")]
    EmptyAnswer,
}

/// Validate free text; returns it trimmed.
///
/// # Errors
///
/// Returns `InputError::TextTooShort` below [`MIN_TEXT_CHARS`].
pub fn validate_text(text: &str) -> Result<&str, InputError> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_TEXT_CHARS {
        return Err(InputError::TextTooShort {
            min: MIN_TEXT_CHARS,
        });
    }
    Ok(trimmed)
}

/// Validate a topic; returns it trimmed.
///
/// # Errors
///
/// Returns `InputError::TopicTooShort` below [`MIN_TOPIC_CHARS`].
pub fn validate_topic(topic: &str) -> Result<&str, InputError> {
    let trimmed = topic.trim();
    if trimmed.chars().count() < MIN_TOPIC_CHARS {
        return Err(InputError::TopicTooShort {
            min: MIN_TOPIC_CHARS,
        });
    }
    Ok(trimmed)
}

/// Validate a manually entered card.
///
/// # Errors
///
/// Returns `InputError::EmptyQuestion` or `InputError::EmptyAnswer` for blank fields.
pub fn validate_card(question: &str, answer: &str) -> Result<(), InputError> {
    if question.trim().is_empty() {
        return Err(InputError::EmptyQuestion);
    }
    if answer.trim().is_empty() {
        return Err(InputError::EmptyAnswer);
    }
    Ok(())
}
