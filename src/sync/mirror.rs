use serde::Deserialize;
use uuid::Uuid;

use crate::dto::matches::MatchSummary;

/// Broadcast event as consumed by a viewer session. Created and updated
/// events carry full replacement state, never deltas, so applying one is a
/// plain upsert and no conflict resolution is ever needed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MatchEvent {
    /// A match was created or updated; the payload replaces any local copy.
    Upsert(MatchSummary),
    /// A match was deleted.
    Deleted {
        /// Identifier of the removed match.
        id: Uuid,
    },
}

/// Per-viewer in-memory mirror of the match collection.
///
/// A session seeds the mirror with one full list fetch on connect, then
/// applies every broadcast event. Because the server is the single writer
/// of truth, a mirror that misses events (lag, reconnect) becomes correct
/// again by simply re-seeding.
#[derive(Debug, Default)]
pub struct MatchMirror {
    matches: Vec<MatchSummary>,
}

impl MatchMirror {
    /// Empty mirror; call [`MatchMirror::reset`] with the initial fetch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole mirror with a freshly fetched list.
    pub fn reset(&mut self, matches: Vec<MatchSummary>) {
        self.matches = matches;
        self.sort();
    }

    /// Apply one broadcast event: upsert-by-id or remove-by-id.
    pub fn apply(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::Upsert(summary) => {
                match self.matches.iter_mut().find(|entry| entry.id == summary.id) {
                    Some(entry) => *entry = summary,
                    None => self.matches.push(summary),
                }
                self.sort();
            }
            MatchEvent::Deleted { id } => {
                self.matches.retain(|entry| entry.id != id);
            }
        }
    }

    /// Current local view, in (date, time) order like the server list.
    pub fn matches(&self) -> &[MatchSummary] {
        &self.matches
    }

    /// Look up a single mirrored match.
    pub fn get(&self, id: Uuid) -> Option<&MatchSummary> {
        self.matches.iter().find(|entry| entry.id == id)
    }

    fn sort(&mut self) {
        self.matches
            .sort_by(|a, b| (&a.date, &a.time).cmp(&(&b.date, &b.time)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dao::models::{Category, Gender, MatchStatus, MedalRound},
        dto::matches::{TeamSide, VoteTally},
    };

    fn summary(date: &str, time: &str) -> MatchSummary {
        MatchSummary {
            id: Uuid::new_v4(),
            sport_name: "Badminton".into(),
            category: Category::Racket,
            gender: Gender::Girls,
            date: date.into(),
            time: time.into(),
            venue: "Hall 2".into(),
            round_name: String::new(),
            team_a: TeamSide {
                name: "TY CS".into(),
                score: 0,
            },
            team_b: TeamSide {
                name: "SY IT".into(),
                score: 0,
            },
            status: MatchStatus::Upcoming,
            winner: None,
            medal_round: MedalRound::None,
            votes: VoteTally {
                team_a: 0,
                team_b: 0,
            },
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn upsert_inserts_then_replaces() {
        let mut mirror = MatchMirror::new();
        let mut record = summary("Jan 24", "10:00");
        let id = record.id;

        mirror.apply(MatchEvent::Upsert(record.clone()));
        assert_eq!(mirror.matches().len(), 1);

        record.status = MatchStatus::Live;
        record.team_a.score = 3;
        mirror.apply(MatchEvent::Upsert(record));

        let mirrored = mirror.get(id).unwrap();
        assert_eq!(mirrored.status, MatchStatus::Live);
        assert_eq!(mirrored.team_a.score, 3);
        assert_eq!(mirror.matches().len(), 1);
    }

    #[test]
    fn delete_removes_by_id_and_ignores_unknown_ids() {
        let mut mirror = MatchMirror::new();
        let record = summary("Jan 24", "10:00");
        let id = record.id;
        mirror.reset(vec![record]);

        mirror.apply(MatchEvent::Deleted { id: Uuid::new_v4() });
        assert_eq!(mirror.matches().len(), 1);

        mirror.apply(MatchEvent::Deleted { id });
        assert!(mirror.matches().is_empty());
    }

    #[test]
    fn mirror_keeps_list_order() {
        let mut mirror = MatchMirror::new();
        mirror.reset(vec![summary("Jan 24", "10:00"), summary("Jan 23", "16:00")]);
        mirror.apply(MatchEvent::Upsert(summary("Jan 24", "09:00")));

        let keys: Vec<(&str, &str)> = mirror
            .matches()
            .iter()
            .map(|entry| (entry.date.as_str(), entry.time.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("Jan 23", "16:00"), ("Jan 24", "09:00"), ("Jan 24", "10:00")]
        );
    }

    #[test]
    fn reset_discards_stale_state() {
        let mut mirror = MatchMirror::new();
        mirror.reset(vec![summary("Jan 23", "10:00"), summary("Jan 24", "11:00")]);

        let fresh = summary("Jan 25", "12:00");
        mirror.reset(vec![fresh.clone()]);
        assert_eq!(mirror.matches().len(), 1);
        assert_eq!(mirror.matches()[0].id, fresh.id);
    }
}
