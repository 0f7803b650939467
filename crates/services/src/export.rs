//! Plain-text renderers for downloadable study artifacts.
//!
//! Writing the result to disk is left to the caller.

use study_core::model::{Flashcard, QuizAttempt};

use crate::generation::SummaryDraft;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Text,
    Markdown,
}

impl TextFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            TextFormat::Text => "txt",
            TextFormat::Markdown => "md",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Csv,
    Tsv,
}

impl Delimiter {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Delimiter::Csv => "csv",
            Delimiter::Tsv => "tsv",
        }
    }

    fn separator(self) -> char {
        match self {
            Delimiter::Csv => ',',
            Delimiter::Tsv => '\t',
        }
    }
}

#[must_use]
pub fn summary_document(draft: &SummaryDraft, format: TextFormat) -> String {
    match format {
        TextFormat::Markdown => format!(
            "# Summary\n\n## Short Summary\n{}\n\n## Detailed Summary\n{}",
            draft.short_summary, draft.detailed_summary
        ),
        TextFormat::Text => format!(
            "Short Summary:\n{}\n\nDetailed Summary:\n{}",
            draft.short_summary, draft.detailed_summary
        ),
    }
}

/// One `"question"<sep>"answer"` row per card. Embedded quotes are doubled.
#[must_use]
pub fn flashcards_delimited(cards: &[Flashcard], delimiter: Delimiter) -> String {
    let sep = delimiter.separator();
    cards
        .iter()
        .map(|card| format!("{}{sep}{}", quoted(&card.question), quoted(&card.answer)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// Markdown report of a quiz attempt.
#[must_use]
pub fn quiz_report(topic: &str, attempt: &QuizAttempt) -> String {
    let total = attempt.len();
    let score = attempt.score();
    let percent = if total == 0 {
        0
    } else {
        (f64::from(score) / total as f64 * 100.0).round() as u32
    };

    let entries = attempt
        .questions()
        .iter()
        .zip(attempt.answers())
        .enumerate()
        .map(|(index, (question, answer))| {
            let given = answer
                .and_then(|choice| question.options().get(usize::from(choice)))
                .map_or("Not answered", String::as_str);
            let verdict = if question.is_correct(*answer) {
                "✅ Correct"
            } else {
                "❌ Incorrect"
            };
            format!(
                "### Q{}: {}\n- Your Answer: {given}\n- Correct Answer: {}\n- {verdict}\n- Explanation: {}\n",
                index + 1,
                question.question(),
                question.correct_option(),
                question.explanation(),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!("# Quiz Report: {topic}\n\n## Score: {score}/{total} ({percent}%)\n\n## Questions & Answers:\n\n{entries}")
}

/// Outline, draft and citations in one document.
#[must_use]
pub fn essay_document(outline: &str, draft: &str, citations: &[String], format: TextFormat) -> String {
    match format {
        TextFormat::Markdown => {
            let citations = citations
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}. {c}", i + 1))
                .collect::<Vec<_>>()
                .join("\n");
            format!("{outline}\n\n---\n\n## Essay Draft\n\n{draft}\n\n## Citations\n\n{citations}")
        }
        TextFormat::Text => format!(
            "{outline}\n\n---\n\nEssay Draft:\n\n{draft}\n\nCitations:\n\n{}",
            citations.join("\n")
        ),
    }
}

/// Download file name such as `flashcards-Biology.csv`.
#[must_use]
pub fn file_name(prefix: &str, subject: &str, extension: &str) -> String {
    let subject = subject.trim();
    if subject.is_empty() {
        format!("{prefix}.{extension}")
    } else {
        format!("{prefix}-{subject}.{extension}")
    }
}
