//! Viewer-side synchronization building blocks: a local mirror of the match
//! collection kept consistent by one full fetch plus the broadcast events,
//! and the keyed already-voted set backing one-vote-per-viewer.

mod mirror;
mod vote_ledger;

pub use mirror::{MatchEvent, MatchMirror};
pub use vote_ledger::{CastOutcome, VoteLedger};
