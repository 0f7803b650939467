use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── BADGE ID ─────────────────────────────────────────────────────────────────
//

/// Identifier of an entry in the fixed badge catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BadgeId {
    FirstSummary,
    FirstFlashcards,
    FirstQuiz,
    #[serde(rename = "streak-3")]
    Streak3,
    #[serde(rename = "streak-7")]
    Streak7,
    #[serde(rename = "cards-100")]
    Cards100,
    PerfectQuiz,
    StudyHour,
}

impl BadgeId {
    /// Catalog order.
    pub const ALL: [BadgeId; 8] = [
        BadgeId::FirstSummary,
        BadgeId::FirstFlashcards,
        BadgeId::FirstQuiz,
        BadgeId::Streak3,
        BadgeId::Streak7,
        BadgeId::Cards100,
        BadgeId::PerfectQuiz,
        BadgeId::StudyHour,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            BadgeId::FirstSummary => "first-summary",
            BadgeId::FirstFlashcards => "first-flashcards",
            BadgeId::FirstQuiz => "first-quiz",
            BadgeId::Streak3 => "streak-3",
            BadgeId::Streak7 => "streak-7",
            BadgeId::Cards100 => "cards-100",
            BadgeId::PerfectQuiz => "perfect-quiz",
            BadgeId::StudyHour => "study-hour",
        }
    }
}

impl fmt::Display for BadgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown badge id: {0}")]
pub struct UnknownBadge(pub String);

impl FromStr for BadgeId {
    type Err = UnknownBadge;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BadgeId::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| UnknownBadge(s.to_string()))
    }
}

//
// ─── BADGE ────────────────────────────────────────────────────────────────────
//

/// An achievement marker. Only `unlocked_at` ever changes, and only once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub id: BadgeId,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl Badge {
    fn locked(id: BadgeId) -> Self {
        let (name, description, icon) = match id {
            BadgeId::FirstSummary => ("First Summary", "Created your first summary", "📝"),
            BadgeId::FirstFlashcards => ("Card Creator", "Created your first flashcard set", "🎴"),
            BadgeId::FirstQuiz => ("Quiz Taker", "Completed your first quiz", "✅"),
            BadgeId::Streak3 => ("3-Day Streak", "Studied for 3 days in a row", "🔥"),
            BadgeId::Streak7 => ("Week Warrior", "Studied for 7 days in a row", "⚡"),
            BadgeId::Cards100 => ("Card Master", "Reviewed 100 flashcards", "🏆"),
            BadgeId::PerfectQuiz => ("Perfect Score", "Got 100% on a quiz", "🌟"),
            BadgeId::StudyHour => ("Hour of Power", "Studied for 60 minutes total", "⏰"),
        };
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
            unlocked_at: None,
        }
    }

    #[must_use]
    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    /// Unlock at `now` unless already unlocked. Returns true if this call unlocked it.
    pub fn unlock(&mut self, now: DateTime<Utc>) -> bool {
        if self.unlocked_at.is_some() {
            return false;
        }
        self.unlocked_at = Some(now);
        true
    }
}

#[derive(Deserialize)]
struct PersistedBadge {
    id: String,
    #[serde(default)]
    unlocked_at: Option<DateTime<Utc>>,
}

/// Read a persisted badge list, dropping entries whose id is not in the catalog.
///
/// Catalog text is taken from the catalog, so only ids and unlock times are read.
pub(crate) fn deserialize_badges<'de, D>(deserializer: D) -> Result<Vec<Badge>, D::Error>
where
    D: Deserializer<'de>,
{
    let persisted = Vec::<PersistedBadge>::deserialize(deserializer)?;
    Ok(persisted
        .into_iter()
        .filter_map(|record| {
            let mut badge = Badge::locked(record.id.parse().ok()?);
            badge.unlocked_at = record.unlocked_at;
            Some(badge)
        })
        .collect())
}

/// The fixed catalog, all locked, in catalog order.
#[must_use]
pub fn default_badges() -> Vec<Badge> {
    BadgeId::ALL.into_iter().map(Badge::locked).collect()
}

/// Rebuild a persisted badge list against the catalog.
///
/// Catalog text always comes from the current catalog; only unlock times are
/// carried over. Duplicates keep the first entry.
#[must_use]
pub fn reconcile_badges(persisted: &[Badge]) -> Vec<Badge> {
    BadgeId::ALL
        .into_iter()
        .map(|id| {
            let mut badge = Badge::locked(id);
            badge.unlocked_at = persisted
                .iter()
                .find(|b| b.id == id)
                .and_then(|b| b.unlocked_at);
            badge
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn catalog_has_eight_unique_locked_badges() {
        let badges = default_badges();
        assert_eq!(badges.len(), 8);
        assert!(badges.iter().all(|b| !b.is_unlocked()));
        let mut ids: Vec<_> = badges.iter().map(|b| b.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 8);
    }

    #[test]
    fn keys_round_trip_through_from_str_and_serde() {
        for id in BadgeId::ALL {
            assert_eq!(id.key().parse::<BadgeId>().unwrap(), id);
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.key()));
        }
        assert!("streak-30".parse::<BadgeId>().is_err());
    }

    #[test]
    fn unlock_keeps_first_timestamp() {
        let mut badge = Badge::locked(BadgeId::FirstQuiz);
        assert!(badge.unlock(fixed_now()));
        assert!(!badge.unlock(fixed_now() + chrono::Duration::days(1)));
        assert_eq!(badge.unlocked_at, Some(fixed_now()));
    }

    #[test]
    fn reconcile_restores_catalog_and_unlocks() {
        let mut unlocked = Badge::locked(BadgeId::Streak7);
        unlocked.unlocked_at = Some(fixed_now());
        unlocked.name = "Renamed".into();

        let badges = reconcile_badges(&[unlocked]);
        assert_eq!(badges.len(), 8);
        let streak7 = badges.iter().find(|b| b.id == BadgeId::Streak7).unwrap();
        assert_eq!(streak7.unlocked_at, Some(fixed_now()));
        assert_eq!(streak7.name, "Week Warrior");
        assert_eq!(badges.iter().filter(|b| b.is_unlocked()).count(), 1);
    }

    #[derive(Deserialize)]
    struct Badges(#[serde(deserialize_with = "deserialize_badges")] Vec<Badge>);

    #[test]
    fn retired_badge_ids_are_skipped_on_read() {
        let json = r#"[
            {"id": "retired-badge", "name": "Old", "description": "", "icon": "",
             "unlocked_at": "2023-11-14T22:13:20Z"},
            {"id": "study-hour", "unlocked_at": "2023-11-14T22:13:20Z"},
            {"id": "first-quiz"}
        ]"#;
        let Badges(badges) = serde_json::from_str(json).unwrap();
        let ids: Vec<_> = badges.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![BadgeId::StudyHour, BadgeId::FirstQuiz]);
        assert_eq!(badges[0].unlocked_at, Some(fixed_now()));
        assert_eq!(badges[0].name, "Hour of Power");
        assert!(!badges[1].is_unlocked());
    }
}
