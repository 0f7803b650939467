use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! study_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps an existing identifier.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generates a fresh random identifier.
            #[must_use]
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

study_id!(
    /// Unique identifier for a saved flashcard set
    FlashcardSetId
);
study_id!(
    /// Unique identifier for a flashcard within its set
    CardId
);
study_id!(
    /// Unique identifier for a quiz question
    QuestionId
);
study_id!(
    /// Unique identifier for a recorded quiz result
    QuizResultId
);
study_id!(
    /// Unique identifier for a saved summary
    SummaryId
);

// ─── Tests ─────────────────────────────────────────────────────────────────────
