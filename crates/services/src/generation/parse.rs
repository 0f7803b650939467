//! Line-prefix parsers for free-form generation output.
//!
//! Malformed or incomplete entries are dropped silently; callers get whatever
//! could be recovered, truncated to the requested count.

use study_core::model::{Flashcard, OPTION_COUNT, QuestionId, QuizQuestion};

/// Upper bound on citations returned from one request.
pub const MAX_CITATIONS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationFormat {
    Mla,
    Apa,
}

impl CitationFormat {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            CitationFormat::Mla => "MLA",
            CitationFormat::Apa => "APA",
        }
    }
}

/// A grammar or style problem and its proposed fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarIssue {
    pub original: String,
    pub suggestion: String,
}

/// Parse `Q:` / `A:` line pairs into unknown flashcards.
#[must_use]
pub fn parse_flashcards(text: &str, count: usize) -> Vec<Flashcard> {
    let mut cards = Vec::new();
    let mut question: Option<String> = None;

    for line in text.lines().map(str::trim_start) {
        if let Some(rest) = line.strip_prefix("Q:") {
            question = Some(rest.trim().to_string());
        } else if let Some(rest) = line.strip_prefix("A:") {
            let answer = rest.trim();
            match question.take() {
                Some(q) if !q.is_empty() && !answer.is_empty() => {
                    cards.push(Flashcard::new(q, answer));
                }
                // an answer without a usable question is dropped, but a
                // blank answer keeps the pending question
                Some(q) if answer.is_empty() => question = Some(q),
                _ => {}
            }
        }
    }

    cards.truncate(count);
    cards
}

/// Parse blank-line separated quiz blocks.
///
/// A block needs a `Q:` line and exactly four `A)`-`D)` options. A missing or
/// unreadable `CORRECT:` letter is clamped into 0-3.
#[must_use]
pub fn parse_quiz(text: &str, count: usize) -> Vec<QuizQuestion> {
    let mut questions: Vec<QuizQuestion> = blocks(text).filter_map(parse_quiz_block).collect();
    questions.truncate(count);
    questions
}

fn blocks(text: &str) -> impl Iterator<Item = Vec<&str>> {
    let mut all = Vec::new();
    let mut current = Vec::new();
    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                all.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        all.push(current);
    }
    all.into_iter()
}

fn parse_quiz_block(lines: Vec<&str>) -> Option<QuizQuestion> {
    let mut question = String::new();
    let mut options: Vec<String> = Vec::with_capacity(OPTION_COUNT);
    let mut correct: i32 = 0;
    let mut explanation = String::new();

    for line in lines.into_iter().map(str::trim_start) {
        if let Some(rest) = line.strip_prefix("Q:") {
            question = rest.trim().to_string();
        } else if let Some(option) = option_text(line) {
            options.push(option.to_string());
        } else if let Some(rest) = line.strip_prefix("CORRECT:") {
            correct = rest
                .trim()
                .chars()
                .next()
                .map_or(0, |c| c.to_ascii_uppercase() as i32 - 'A' as i32);
        } else if let Some(rest) = line.strip_prefix("EXPLANATION:") {
            explanation = rest.trim().to_string();
        }
    }

    if question.is_empty() {
        return None;
    }
    let options: [String; OPTION_COUNT] = options.try_into().ok()?;
    let correct = u8::try_from(correct.clamp(0, 3)).ok()?;

    QuizQuestion::new(QuestionId::generate(), question, options, correct, explanation).ok()
}

fn option_text(line: &str) -> Option<&str> {
    let mut chars = line.chars();
    match (chars.next(), chars.next()) {
        (Some('A'..='D'), Some(')')) => Some(line[2..].trim()),
        _ => None,
    }
}

/// First five non-blank lines.
#[must_use]
pub fn parse_citations(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(MAX_CITATIONS)
        .map(str::to_string)
        .collect()
}

/// Parse `ISSUE: ... | FIX: ...` lines.
#[must_use]
pub fn parse_grammar(text: &str) -> Vec<GrammarIssue> {
    text.lines().filter_map(parse_grammar_line).collect()
}

fn parse_grammar_line(line: &str) -> Option<GrammarIssue> {
    let start = line.find("ISSUE:")?;
    let rest = &line[start + "ISSUE:".len()..];

    // the issue ends at the first `|` that is followed by `FIX:`
    let (original, fix) = rest.match_indices('|').find_map(|(idx, _)| {
        let after = rest[idx + 1..].trim_start();
        after
            .strip_prefix("FIX:")
            .map(|fix| (&rest[..idx], fix))
    })?;

    let original = original.trim();
    let suggestion = fix.trim();
    if original.is_empty() || suggestion.is_empty() {
        return None;
    }
    Some(GrammarIssue {
        original: original.to_string(),
        suggestion: suggestion.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flashcards_pair_questions_with_answers() {
        let text = "Here you go:\n\
                    Q: What is DNA?\n\
                    A: Genetic material\n\
                    \n\
                    A: orphan answer\n\
                    Q: What is RNA?\n\
                    Q: What is ATP?\n\
                    A: Energy currency\n";
        let cards = parse_flashcards(text, 8);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "What is DNA?");
        assert_eq!(cards[0].answer, "Genetic material");
        assert_eq!(cards[1].question, "What is ATP?");
        assert!(cards.iter().all(|c| !c.known));
        assert_ne!(cards[0].id, cards[1].id);
    }

    #[test]
    fn flashcards_are_truncated_to_count() {
        let text = (1..=5)
            .map(|i| format!("Q: q{i}\nA: a{i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(parse_flashcards(&text, 3).len(), 3);
    }

    #[test]
    fn flashcards_from_garbage_are_empty() {
        assert!(parse_flashcards("no markers here\nat all", 8).is_empty());
    }

    const QUIZ: &str = "Q: Largest planet?\n\
A) Mars\n\
B) Jupiter\n\
C) Venus\n\
D) Earth\n\
CORRECT: B\n\
EXPLANATION: Jupiter is a gas giant.\n\
\n\
Q: Only three options?\n\
A) one\n\
B) two\n\
C) three\n\
CORRECT: A\n\
\n   \n\
Q: Out of range letter\n\
A) w\n\
B) x\n\
C) y\n\
D) z\n\
CORRECT: Z\n";

    #[test]
    fn quiz_blocks_need_four_options() {
        let questions = parse_quiz(QUIZ, 8);
        assert_eq!(questions.len(), 2);

        let first = &questions[0];
        assert_eq!(first.question(), "Largest planet?");
        assert_eq!(first.correct_answer(), 1);
        assert_eq!(first.correct_option(), "Jupiter");
        assert_eq!(first.explanation(), "Jupiter is a gas giant.");

        let clamped = &questions[1];
        assert_eq!(clamped.question(), "Out of range letter");
        assert_eq!(clamped.correct_answer(), 3);
        assert_eq!(clamped.explanation(), "");
    }

    #[test]
    fn quiz_missing_correct_defaults_to_first_option() {
        let text = "Q: q\nA) a\nB) b\nC) c\nD) d";
        let questions = parse_quiz(text, 8);
        assert_eq!(questions[0].correct_answer(), 0);
        assert_eq!(parse_quiz(QUIZ, 1).len(), 1);
    }

    #[test]
    fn citations_take_first_five_non_blank_lines() {
        let text = "\n1\n\n2\n3\n  \n4\n5\n6\n";
        assert_eq!(parse_citations(text), vec!["1", "2", "3", "4", "5"]);
    }

    #[test]
    fn grammar_lines_split_on_fix_marker() {
        let text = "Found these:\n\
                    - ISSUE: their going | FIX: they're going\n\
                    ISSUE: a | b | FIX: c\n\
                    ISSUE: no fix here\n\
                    ISSUE:  | FIX: empty original\n";
        let issues = parse_grammar(text);
        assert_eq!(
            issues,
            vec![
                GrammarIssue {
                    original: "their going".into(),
                    suggestion: "they're going".into(),
                },
                GrammarIssue {
                    original: "a | b".into(),
                    suggestion: "c".into(),
                },
            ]
        );
    }
}
