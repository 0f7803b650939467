use std::num::NonZeroU32;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily goal applied to a fresh state, in minutes.
pub const DEFAULT_DAILY_GOAL: u32 = 30;

//
// ─── STREAK ───────────────────────────────────────────────────────────────────
//

/// Which edge of the streak state machine an update took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreakTransition {
    /// Activity was already recorded today.
    Unchanged,
    /// First ever activity: `NoActivity -> Active(1)`.
    Started,
    /// Last activity was yesterday: `Active(n) -> Active(n + 1)`.
    Continued,
    /// Last activity was two or more days ago: `Active(n) -> Active(1)`.
    Reset,
}

//
// ─── PROGRESS ─────────────────────────────────────────────────────────────────
//

/// Streak, study time and daily goal counters. All durations are minutes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub streak: u32,
    pub last_study_date: Option<NaiveDate>,
    pub total_study_time: u32,
    pub daily_goal: u32,
    pub daily_progress: u32,
    #[serde(default)]
    pub cards_reviewed: u32,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            streak: 0,
            last_study_date: None,
            total_study_time: 0,
            daily_goal: DEFAULT_DAILY_GOAL,
            daily_progress: 0,
            cards_reviewed: 0,
        }
    }
}

impl Progress {
    /// Record activity on `today` and advance the streak.
    pub fn update_streak(&mut self, today: NaiveDate) -> StreakTransition {
        let transition = match self.last_study_date {
            Some(last) if last == today => return StreakTransition::Unchanged,
            Some(last) if today.pred_opt() == Some(last) => StreakTransition::Continued,
            Some(_) => StreakTransition::Reset,
            None => StreakTransition::Started,
        };

        self.streak = match transition {
            StreakTransition::Continued => self.streak.saturating_add(1),
            _ => 1,
        };
        self.last_study_date = Some(today);
        transition
    }

    /// Accrue study time toward the total and today's goal, then update the streak.
    pub fn add_study_time(&mut self, minutes: u32, today: NaiveDate) -> StreakTransition {
        self.total_study_time = self.total_study_time.saturating_add(minutes);
        self.daily_progress = self.daily_progress.saturating_add(minutes);
        self.update_streak(today)
    }

    pub fn set_daily_goal(&mut self, minutes: NonZeroU32) {
        self.daily_goal = minutes.get();
    }

    pub fn reset_daily_progress(&mut self) {
        self.daily_progress = 0;
    }

    /// Share of today's goal reached, capped at 100.
    #[must_use]
    pub fn daily_percent(&self) -> u32 {
        let goal = self.daily_goal.max(1);
        let pct = u64::from(self.daily_progress) * 100 / u64::from(goal);
        u32::try_from(pct.min(100)).unwrap_or(100)
    }

    #[must_use]
    pub fn daily_goal_met(&self) -> bool {
        self.daily_progress >= self.daily_goal
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
