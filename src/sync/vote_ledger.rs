use std::future::Future;

use dashmap::DashSet;
use tracing::warn;
use uuid::Uuid;

/// Outcome of a guarded vote attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOutcome {
    /// The vote was submitted and the marker recorded.
    Submitted,
    /// A marker for this match already existed; nothing was sent.
    AlreadyVoted,
    /// Submission failed; the marker was not recorded so a retry is allowed.
    Failed,
}

/// Keyed set of matches this viewer has already voted on.
///
/// This is the client-held half of the one-vote-per-viewer rule: the server
/// only gates on match status, so honesty of this marker is the entire
/// integrity story (a documented weakness, not one to silently fix). The
/// set lives in memory; hosts wanting persistence seed it from whatever
/// storage they have via [`VoteLedger::seed`].
#[derive(Debug, Default)]
pub struct VoteLedger {
    voted: DashSet<Uuid>,
}

impl VoteLedger {
    /// Empty ledger for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the ledger from persisted markers.
    pub fn seed<I: IntoIterator<Item = Uuid>>(&self, match_ids: I) {
        for id in match_ids {
            self.voted.insert(id);
        }
    }

    /// Whether a marker exists for the match.
    pub fn has_voted(&self, match_id: Uuid) -> bool {
        self.voted.contains(&match_id)
    }

    /// Record the marker; returns false when it was already present.
    pub fn record(&self, match_id: Uuid) -> bool {
        self.voted.insert(match_id)
    }

    /// All recorded markers, for hosts that persist them.
    pub fn snapshot(&self) -> Vec<Uuid> {
        self.voted.iter().map(|entry| *entry).collect()
    }

    /// Run `submit` unless a marker already exists, recording the marker on
    /// success. Submission errors are logged and swallowed: a failed vote
    /// must never break the viewer experience.
    pub async fn cast<F, Fut, E>(&self, match_id: Uuid, submit: F) -> CastOutcome
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: std::fmt::Display,
    {
        if self.has_voted(match_id) {
            return CastOutcome::AlreadyVoted;
        }

        match submit().await {
            Ok(()) => {
                self.record(match_id);
                CastOutcome::Submitted
            }
            Err(err) => {
                warn!(%match_id, error = %err, "vote submission failed");
                CastOutcome::Failed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cast_submits_once_then_short_circuits() {
        let ledger = VoteLedger::new();
        let id = Uuid::new_v4();

        let first = ledger.cast(id, || async { Ok::<(), String>(()) }).await;
        assert_eq!(first, CastOutcome::Submitted);

        // second attempt must not reach the transport; if it did, the
        // erroring submit would turn the outcome into Failed
        let second = ledger
            .cast(id, || async { Err::<(), String>("submitted twice".into()) })
            .await;
        assert_eq!(second, CastOutcome::AlreadyVoted);
    }

    #[tokio::test]
    async fn failed_submission_leaves_no_marker() {
        let ledger = VoteLedger::new();
        let id = Uuid::new_v4();

        let outcome = ledger
            .cast(id, || async { Err::<(), _>("connection reset".to_string()) })
            .await;
        assert_eq!(outcome, CastOutcome::Failed);
        assert!(!ledger.has_voted(id));

        let retry = ledger.cast(id, || async { Ok::<(), String>(()) }).await;
        assert_eq!(retry, CastOutcome::Submitted);
    }

    #[test]
    fn seed_and_snapshot_round_trip() {
        let ledger = VoteLedger::new();
        let ids = [Uuid::new_v4(), Uuid::new_v4()];
        ledger.seed(ids);

        assert!(ledger.has_voted(ids[0]));
        assert!(ledger.has_voted(ids[1]));
        assert_eq!(ledger.snapshot().len(), 2);
    }
}
