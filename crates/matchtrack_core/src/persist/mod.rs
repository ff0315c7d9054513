//! Persistence gateway: the document load/merge-save contract the engine is
//! built against, plus the in-memory and JSON-file implementations.

pub mod error;
pub mod file;
pub mod memory;

pub use error::GatewayError;
pub use file::JsonFileGateway;
pub use memory::InMemoryGateway;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::{ByPeriod, MatchEvent, MatchSession, OpponentStat, Period, PlayerStat, TimeoutFlags};

/// The stored document for one match: the full session plus merge
/// bookkeeping (last applied save sequence, save timestamp).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub session: MatchSession,
    #[serde(default)]
    pub last_seq: u64,
    pub saved_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn new(session: MatchSession) -> Self {
        Self { session, last_seq: 0, saved_at: Utc::now() }
    }

    /// Field-level merge of a save patch.
    ///
    /// Patches carry a monotonically increasing sequence number; a patch
    /// that is not newer than the last applied one is ignored, so the last
    /// *issued* save wins regardless of arrival order. Only the patch's own
    /// period's stat maps are replaced; the other period's data is
    /// untouched.
    pub fn apply_patch(&mut self, patch: SessionPatch) -> bool {
        if patch.seq <= self.last_seq {
            return false;
        }
        self.session.is_finished = patch.is_finished;
        self.session.current_period = patch.current_period;
        self.session.local_score = patch.local_score;
        self.session.visitor_score = patch.visitor_score;
        self.session.events = patch.events;
        self.session.timeouts = patch.timeouts;
        *self.session.player_stats.get_mut(patch.current_period) = patch.player_stats;
        *self.session.opponent_stats.get_mut(patch.current_period) = patch.opponent_stats;
        self.last_seq = patch.seq;
        self.saved_at = Utc::now();
        true
    }
}

/// Full-state snapshot of the current period, serialized at save time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPatch {
    pub seq: u64,
    pub is_finished: bool,
    pub current_period: Period,
    pub local_score: u32,
    pub visitor_score: u32,
    pub events: Vec<MatchEvent>,
    pub timeouts: ByPeriod<TimeoutFlags>,
    /// Player stats of `current_period` only.
    pub player_stats: HashMap<String, PlayerStat>,
    /// Opponent aggregate of `current_period` only.
    pub opponent_stats: OpponentStat,
}

/// Save acknowledgement: whether the patch was applied or ignored as stale,
/// and the gateway's last applied sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveAck {
    pub applied: bool,
    pub seq: u64,
}

/// The document store boundary. `save` performs a field-level merge into
/// the existing record; it never replaces the whole document.
pub trait PersistenceGateway {
    fn load(&self, match_id: &str) -> Result<StoredSession, GatewayError>;
    fn save(&mut self, match_id: &str, patch: SessionPatch) -> Result<SaveAck, GatewayError>;
}
