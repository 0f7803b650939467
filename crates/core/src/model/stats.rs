use crate::state::StudyState;

/// How many of the latest quiz results feed the accuracy trend.
pub const RECENT_QUIZ_WINDOW: usize = 5;

/// Read model of a learner's progress, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSnapshot {
    pub streak: u32,
    pub total_study_time: u32,
    pub daily_goal: u32,
    pub daily_progress: u32,
    pub daily_percent: u32,
    pub badges_unlocked: usize,
    pub badges_total: usize,
    /// Summaries, flashcard sets and quiz results combined.
    pub activities: usize,
    /// Accuracy of the most recent quiz results, oldest first.
    pub recent_quiz_accuracy: Vec<u32>,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn from_state(state: &StudyState) -> Self {
        let progress = state.progress();
        let results = state.quiz_results();
        let recent = &results[results.len().saturating_sub(RECENT_QUIZ_WINDOW)..];

        Self {
            streak: progress.streak,
            total_study_time: progress.total_study_time,
            daily_goal: progress.daily_goal,
            daily_progress: progress.daily_progress,
            daily_percent: progress.daily_percent(),
            badges_unlocked: state.badges().iter().filter(|b| b.is_unlocked()).count(),
            badges_total: state.badges().len(),
            activities: state.summaries().len() + state.flashcard_sets().len() + results.len(),
            recent_quiz_accuracy: recent.iter().map(|r| r.accuracy_percent()).collect(),
        }
    }
}
