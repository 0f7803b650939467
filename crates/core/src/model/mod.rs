mod app_settings;
mod badge;
mod flashcard;
mod ids;
pub mod input;
mod preferences;
mod progress;
mod quiz;
mod stats;
mod summary;

pub use app_settings::{
    AppSettings, AppSettingsDraft, AppSettingsError, DEFAULT_API_BASE_URL, DEFAULT_API_MODEL,
};
pub use badge::{Badge, BadgeId, UnknownBadge, default_badges, reconcile_badges};
pub(crate) use badge::deserialize_badges;
pub use flashcard::{Flashcard, FlashcardPatch, FlashcardSet};
pub use ids::{CardId, FlashcardSetId, QuestionId, QuizResultId, SummaryId};
pub use input::InputError;
pub use preferences::Preferences;
pub use progress::{DEFAULT_DAILY_GOAL, Progress, StreakTransition};
pub use quiz::{OPTION_COUNT, QuizAttempt, QuizError, QuizQuestion, QuizResult};
pub use stats::{ProgressSnapshot, RECENT_QUIZ_WINDOW};
pub use summary::{Summary, topic_from_source};
