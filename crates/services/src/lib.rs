#![forbid(unsafe_code)]

pub mod app_services;
pub mod config;
pub mod error;
pub mod export;
pub mod generation;
pub mod study_actions;
pub mod study_store;

pub use study_core::Clock;

pub use app_services::StudyServices;
pub use config::StudyConfig;
pub use error::{GenerationError, StudyActionError, StudyServicesError};
pub use generation::{
    ChatCompletionsClient, CitationFormat, GrammarIssue, StudyGenerator, SummaryDraft,
    TextGenerator,
};
pub use study_actions::{ActionOutcome, StudyActions};
pub use study_store::{StudyStore, ThemeHook};
