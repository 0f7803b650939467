use std::fmt;

use chrono::{DateTime, Duration, Local, Utc};
use study_core::StudyState;
use study_core::model::{
    BadgeId, Flashcard, FlashcardSet, QuestionId, QuizAttempt, QuizQuestion, QuizResultId, Summary,
};
use study_storage::{DEFAULT_STATE_KEY, Storage, encode_state};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Args {
    db_url: String,
    key: String,
    days: u32,
    now: Option<DateTime<Utc>>,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidDays { raw: String },
    InvalidNow { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidDays { raw } => write!(f, "invalid --days value: {raw}"),
            ArgsError::InvalidNow { raw } => {
                write!(f, "invalid --now value (expected RFC3339): {raw}")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

/// Longest seeded streak; keeps day arithmetic well inside chrono's range.
const MAX_SEED_DAYS: u32 = 3650;

fn parse_days(raw: &str) -> Result<u32, ArgsError> {
    raw.parse::<u32>()
        .ok()
        .filter(|days| *days <= MAX_SEED_DAYS)
        .ok_or_else(|| ArgsError::InvalidDays { raw: raw.to_string() })
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("STUDY_DB_URL")
            .unwrap_or_else(|_| "sqlite:study.sqlite3?mode=rwc".into());
        let mut key =
            std::env::var("STUDY_STORAGE_KEY").unwrap_or_else(|_| DEFAULT_STATE_KEY.into());
        let mut days = std::env::var("STUDY_SEED_DAYS")
            .ok()
            .and_then(|value| parse_days(&value).ok())
            .unwrap_or(3);
        let mut now: Option<DateTime<Utc>> = None;

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = value;
                }
                "--key" => {
                    key = require_value(&mut args, "--key")?;
                }
                "--days" => {
                    let value = require_value(&mut args, "--days")?;
                    days = parse_days(&value)?;
                }
                "--now" => {
                    let value = require_value(&mut args, "--now")?;
                    let parsed = DateTime::parse_from_rfc3339(&value)
                        .map_err(|_| ArgsError::InvalidNow { raw: value.clone() })?
                        .with_timezone(&Utc);
                    now = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            key,
            days,
            now,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p study-storage --bin seed -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: sqlite:study.sqlite3?mode=rwc)");
    eprintln!("  --key <name>        Storage key (default: {DEFAULT_STATE_KEY})");
    eprintln!("  --days <n>          Consecutive study days ending today (default: 3, max: {MAX_SEED_DAYS})");
    eprintln!("  --now <rfc3339>     Fixed current time for deterministic seeding");
    eprintln!("  -h, --help          Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  STUDY_DB_URL, STUDY_STORAGE_KEY, STUDY_SEED_DAYS, RUST_LOG");
}

fn demo_state(now: DateTime<Utc>, days: u32) -> Result<StudyState, study_core::Error> {
    let mut state = StudyState::new();

    for offset in (0..days).rev() {
        let day = now - Duration::days(i64::from(offset));
        state.reset_daily_progress();
        state.add_study_time(10, day.with_timezone(&Local).date_naive());
    }

    state.add_summary(Summary::from_source(
        "The mitochondrion is the site of aerobic respiration in eukaryotic cells.",
        "Mitochondria produce most of a cell's ATP.",
        "Mitochondria are membrane-bound organelles that carry out aerobic respiration, \
         converting nutrients into ATP through the citric acid cycle and oxidative phosphorylation.",
        now,
    ));
    state.unlock_badge(BadgeId::FirstSummary, now);

    state.add_flashcard_set(FlashcardSet::new(
        "German basics",
        vec![
            Flashcard::new("Hallo", "Hello"),
            Flashcard::new("Danke", "Thank you"),
            Flashcard::new("Bitte", "Please / You are welcome"),
            Flashcard::new("Guten Morgen", "Good morning"),
        ],
        now,
    ));
    state.unlock_badge(BadgeId::FirstFlashcards, now);

    let questions = vec![
        QuizQuestion::new(
            QuestionId::generate(),
            "Which planet is closest to the Sun?",
            ["Venus".into(), "Mercury".into(), "Mars".into(), "Earth".into()],
            1,
            "Mercury orbits at about 0.39 AU.",
        )?,
        QuizQuestion::new(
            QuestionId::generate(),
            "What is the chemical symbol for gold?",
            ["Ag".into(), "Gd".into(), "Au".into(), "Go".into()],
            2,
            "From the Latin aurum.",
        )?,
    ];
    let mut attempt = QuizAttempt::new(questions);
    attempt.answer(0, 1);
    attempt.answer(1, 0);
    state.add_quiz_result(attempt.finish(QuizResultId::generate(), "Science", now));
    state.unlock_badge(BadgeId::FirstQuiz, now);

    state.evaluate_milestones(now);
    Ok(state)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let storage = Storage::sqlite(&args.db_url).await?;
    let now = args.now.unwrap_or_else(Utc::now);
    let state = demo_state(now, args.days)?;

    storage.state.save(&args.key, &encode_state(&state)?).await?;

    let snapshot = state.snapshot();
    tracing::info!(
        db = %args.db_url,
        key = %args.key,
        streak = snapshot.streak,
        activities = snapshot.activities,
        badges = snapshot.badges_unlocked,
        "seeded study state"
    );

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
        )
        .init();

    if let Err(err) = run().await {
        tracing::error!("seed failed: {err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::time::fixed_now;

    #[test]
    fn days_are_bounded() {
        assert_eq!(parse_days("7").unwrap(), 7);
        assert_eq!(parse_days("3650").unwrap(), MAX_SEED_DAYS);
        assert!(matches!(parse_days("4000000000"), Err(ArgsError::InvalidDays { .. })));
        assert!(matches!(parse_days("-1"), Err(ArgsError::InvalidDays { .. })));
    }

    #[test]
    fn longest_seed_builds_full_streak() {
        let state = demo_state(fixed_now(), MAX_SEED_DAYS).unwrap();
        assert_eq!(state.progress().streak, MAX_SEED_DAYS);
        let today = fixed_now().with_timezone(&Local).date_naive();
        assert_eq!(state.progress().last_study_date, Some(today));
    }
}
