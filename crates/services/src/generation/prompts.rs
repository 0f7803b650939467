//! Prompt templates. The parsers in `parse` rely on the line formats requested here.

use super::parse::CitationFormat;

pub(crate) fn short_summary(text: &str) -> String {
    format!("Summarize in 2-3 sentences:\n\n{text}")
}

pub(crate) fn detailed_summary(text: &str) -> String {
    format!("Provide detailed summary (5-8 sentences):\n\n{text}")
}

pub(crate) fn flashcards(topic: &str, count: usize) -> String {
    format!(
        "Create {count} flashcards about \"{topic}\".\n\
         Format: Q: [question]\n\
         A: [answer]"
    )
}

pub(crate) fn quiz(topic: &str, count: usize) -> String {
    format!(
        "Create {count} multiple-choice questions about \"{topic}\".\n\
         Format:\n\
         Q: [question]\n\
         A) [option1]\n\
         B) [option2]\n\
         C) [option3]\n\
         D) [option4]\n\
         CORRECT: [A/B/C/D]\n\
         EXPLANATION: [explanation]"
    )
}

pub(crate) fn outline(topic: &str) -> String {
    format!("Create an essay outline for: \"{topic}\"")
}

pub(crate) fn citations(format: CitationFormat) -> String {
    format!("Generate 5 example {} citations", format.label())
}

pub(crate) fn grammar(text: &str) -> String {
    format!("Check grammar in: \"{text}\". List issues as: ISSUE: [text] | FIX: [fix]")
}
