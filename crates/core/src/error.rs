use thiserror::Error;

use crate::model::{AppSettingsError, InputError, QuizError, UnknownBadge};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Badge(#[from] UnknownBadge),
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
}
