use std::collections::HashMap;

use super::{GatewayError, PersistenceGateway, SaveAck, SessionPatch, StoredSession};
use crate::models::MatchSession;

/// In-memory gateway for tests and demo runs, with failure injection.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    records: HashMap<String, StoredSession>,
    /// When set, every `load` fails with `Unavailable`.
    pub fail_loads: bool,
    /// When set, every `save` fails with `Unavailable`.
    pub fail_saves: bool,
    save_calls: u64,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fresh record, as the match-creation flow would.
    pub fn seed(&mut self, match_id: impl Into<String>, session: MatchSession) {
        self.records.insert(match_id.into(), StoredSession::new(session));
    }

    pub fn record(&self, match_id: &str) -> Option<&StoredSession> {
        self.records.get(match_id)
    }

    /// Total `save` attempts, including failed and stale-ignored ones.
    pub fn save_calls(&self) -> u64 {
        self.save_calls
    }
}

impl PersistenceGateway for InMemoryGateway {
    fn load(&self, match_id: &str) -> Result<StoredSession, GatewayError> {
        if self.fail_loads {
            return Err(GatewayError::Unavailable("injected load failure".into()));
        }
        self.records
            .get(match_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound { match_id: match_id.to_string() })
    }

    fn save(&mut self, match_id: &str, patch: SessionPatch) -> Result<SaveAck, GatewayError> {
        self.save_calls += 1;
        if self.fail_saves {
            return Err(GatewayError::Unavailable("injected save failure".into()));
        }
        let record = self
            .records
            .get_mut(match_id)
            .ok_or_else(|| GatewayError::NotFound { match_id: match_id.to_string() })?;
        let applied = record.apply_patch(patch);
        Ok(SaveAck { applied, seq: record.last_seq })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ByPeriod, Period};

    fn patch(seq: u64, local_score: u32) -> SessionPatch {
        SessionPatch {
            seq,
            is_finished: false,
            current_period: Period::FirstHalf,
            local_score,
            visitor_score: 0,
            events: Vec::new(),
            timeouts: ByPeriod::default(),
            player_stats: HashMap::new(),
            opponent_stats: Default::default(),
        }
    }

    #[test]
    fn save_merges_into_existing_record() {
        let mut gw = InMemoryGateway::new();
        gw.seed("m1", MatchSession::new("Lions", "Tigers", "Lions"));

        let ack = gw.save("m1", patch(1, 2)).unwrap();
        assert!(ack.applied);
        assert_eq!(gw.record("m1").unwrap().session.local_score, 2);
    }

    #[test]
    fn stale_sequence_is_ignored() {
        let mut gw = InMemoryGateway::new();
        gw.seed("m1", MatchSession::new("Lions", "Tigers", "Lions"));

        assert!(gw.save("m1", patch(2, 2)).unwrap().applied);
        let ack = gw.save("m1", patch(1, 9)).unwrap();
        assert!(!ack.applied);
        assert_eq!(ack.seq, 2);
        assert_eq!(gw.record("m1").unwrap().session.local_score, 2);
    }

    #[test]
    fn patch_leaves_other_period_untouched() {
        let mut gw = InMemoryGateway::new();
        let mut session = MatchSession::new("Lions", "Tigers", "Lions");
        session.opponent_stats.get_mut(Period::SecondHalf).goals = 3;
        gw.seed("m1", session);

        gw.save("m1", patch(1, 0)).unwrap();
        let stored = gw.record("m1").unwrap();
        assert_eq!(stored.session.opponent_stats.get(Period::SecondHalf).goals, 3);
    }

    #[test]
    fn unknown_match_is_not_found() {
        let gw = InMemoryGateway::new();
        assert!(matches!(gw.load("nope"), Err(GatewayError::NotFound { .. })));
    }

    #[test]
    fn injected_failures() {
        let mut gw = InMemoryGateway::new();
        gw.seed("m1", MatchSession::new("Lions", "Tigers", "Lions"));
        gw.fail_saves = true;
        assert!(matches!(gw.save("m1", patch(1, 0)), Err(GatewayError::Unavailable(_))));
        gw.fail_loads = true;
        assert!(matches!(gw.load("m1"), Err(GatewayError::Unavailable(_))));
    }
}
