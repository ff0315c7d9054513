//! The live match engine: clock, stat mutation, period/session lifecycle
//! and persistence reconciliation.
//!
//! All mutations are synchronous against the in-memory session, which is
//! the display source of truth; the persisted copy may lag by up to one
//! autosave interval. The engine never retries persistence on its own, and
//! every failure path leaves the in-memory state consistent and usable.

pub mod clock;
pub mod runner;
pub mod selection;

pub use clock::MatchClock;
pub use runner::{SharedEngine, TickRunner};
pub use selection::OnFieldSet;

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::models::{
    MatchSession, OpponentStatField, Period, PlayerStatField, RosterPlayer, Side,
};
use crate::persist::{GatewayError, PersistenceGateway, SaveAck, SessionPatch};

/// Scorer placeholder for goals conceded to the untracked side.
const OPPONENT_GOAL_NAME: &str = "Opponent";
/// Scorer placeholder for own goals credited to the tracked team.
const OWN_GOAL_NAME: &str = "Own goal";

/// Single-session state machine for one live match.
///
/// Owns the countdown clock, the per-period counters, the event log and the
/// on-field selection, and reconciles them against a [`PersistenceGateway`]
/// through manual saves and a silent autosave every few ticks. The gateway
/// is injected at construction; the engine holds no ambient globals.
pub struct MatchEngine<G: PersistenceGateway> {
    gateway: G,
    match_id: String,
    config: EngineConfig,
    roster: Vec<RosterPlayer>,
    session: MatchSession,
    clock: MatchClock,
    on_field: OnFieldSet,
    save_seq: u64,
    secs_since_autosave: u32,
}

impl<G: PersistenceGateway> MatchEngine<G> {
    /// Hydrate a live session from the gateway.
    ///
    /// Scores are re-derived from the goal log and every roster player
    /// absent from the stored stats gets a zeroed entry in both periods.
    /// A load failure is a blocking error.
    pub fn load(
        gateway: G,
        match_id: impl Into<String>,
        roster: Vec<RosterPlayer>,
        config: EngineConfig,
    ) -> Result<Self> {
        let match_id = match_id.into();
        let stored = gateway.load(&match_id)?;
        let mut session = stored.session;
        session.recompute_scores();

        let mut engine = Self {
            gateway,
            clock: MatchClock::new(config.period_secs()),
            on_field: OnFieldSet::new(config.on_field_cap),
            config,
            roster,
            session,
            save_seq: stored.last_seq,
            secs_since_autosave: 0,
            match_id,
        };
        engine.zero_fill_period(Period::FirstHalf);
        engine.zero_fill_period(Period::SecondHalf);
        log::info!(
            "hydrated match {} ({} events, {:?})",
            engine.match_id,
            engine.session.events.len(),
            engine.session.current_period
        );
        Ok(engine)
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn session(&self) -> &MatchSession {
        &self.session
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn on_field(&self) -> &OnFieldSet {
        &self.on_field
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn roster(&self) -> &[RosterPlayer] {
        &self.roster
    }

    pub fn is_finished(&self) -> bool {
        self.session.is_finished
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    // ------------------------------------------------------------------
    // Clock & scheduling
    // ------------------------------------------------------------------

    /// Start the countdown. Rejected while finished.
    pub fn start_clock(&mut self) -> Result<()> {
        self.reject_if_finished()?;
        self.clock.start();
        Ok(())
    }

    pub fn pause_clock(&mut self) {
        self.clock.pause();
    }

    /// Stop and restore the full period duration; accumulated player
    /// seconds are kept.
    pub fn reset_clock(&mut self) {
        self.clock.reset();
    }

    /// One elapsed real-time second.
    ///
    /// Advances the countdown (when running), credits every on-field
    /// player with one second of playing time, and fires the silent
    /// autosave on its interval. Inert once the match is finished.
    pub fn tick(&mut self) {
        if self.session.is_finished {
            return;
        }
        if self.clock.tick() {
            let period = self.session.current_period;
            let stats = self.session.player_stats.get_mut(period);
            for id in self.on_field.iter() {
                stats.entry(id.clone()).or_default().seconds_played += 1;
            }
        }
        self.secs_since_autosave += 1;
        if self.secs_since_autosave >= self.config.autosave_interval_secs {
            self.secs_since_autosave = 0;
            self.autosave();
        }
    }

    /// Put a roster player on the field for playing-time tracking.
    /// Rejected with a warning error once the cap is reached.
    pub fn select_player(&mut self, player_id: &str) -> Result<()> {
        self.reject_if_finished()?;
        self.roster_name(player_id)?;
        self.on_field.select(player_id)
    }

    /// Take a player off the field. Always permitted.
    pub fn deselect_player(&mut self, player_id: &str) -> bool {
        self.on_field.deselect(player_id)
    }

    // ------------------------------------------------------------------
    // Statistic mutation
    // ------------------------------------------------------------------

    /// `new = max(0, current + delta)` on one counter of one player in the
    /// current period. Returns the new value.
    ///
    /// Incrementing goals also appends a Goal event at the current match
    /// minute and bumps the tracked team's score. Decrementing goals only
    /// lowers the raw counter: the event log and score keep their history.
    pub fn adjust_player_stat(
        &mut self,
        player_id: &str,
        field: PlayerStatField,
        delta: i32,
    ) -> Result<u32> {
        self.reject_if_finished()?;
        let name = self.roster_name(player_id)?;
        let period = self.session.current_period;
        let new_value = self
            .session
            .player_stats
            .get_mut(period)
            .entry(player_id.to_string())
            .or_default()
            .apply(field, delta);

        if field == PlayerStatField::Goals && delta > 0 {
            let minute = self.current_match_minute();
            let side = self.session.tracked_side();
            self.session.push_goal(minute, side, name, Some(player_id.to_string()), delta as u32);
            log::debug!("goal by {player_id} at minute {minute} ({side:?})");
        }
        Ok(new_value)
    }

    /// Same clamp rule on the opponent aggregate of the current period.
    /// Goal increments append an event for the untracked side with a
    /// placeholder scorer name.
    pub fn adjust_opponent_stat(&mut self, field: OpponentStatField, delta: i32) -> Result<u32> {
        self.reject_if_finished()?;
        let period = self.session.current_period;
        let new_value = self.session.opponent_stats.get_mut(period).apply(field, delta);

        if field == OpponentStatField::Goals && delta > 0 {
            let minute = self.current_match_minute();
            let side = self.session.tracked_side().opposite();
            self.session.push_goal(minute, side, OPPONENT_GOAL_NAME, None, delta as u32);
            log::debug!("opponent goal at minute {minute} ({side:?})");
        }
        Ok(new_value)
    }

    /// An opponent own goal: one goal for the tracked team, with a fixed
    /// placeholder scorer. Independent of any player/opponent counter.
    pub fn record_own_goal(&mut self) -> Result<()> {
        self.reject_if_finished()?;
        let minute = self.current_match_minute();
        let side = self.session.tracked_side();
        self.session.push_goal(minute, side, OWN_GOAL_NAME, None, 1);
        Ok(())
    }

    /// One-way timeout flag for the current period. Quiet no-op when
    /// already used or when the match is finished; returns whether the
    /// flag flipped.
    pub fn set_timeout_used(&mut self, side: Side) -> bool {
        if self.session.is_finished {
            return false;
        }
        let period = self.session.current_period;
        let flipped = self.session.timeouts.get_mut(period).set_used(side);
        if flipped {
            log::debug!("timeout used by {side:?} in {period:?}");
        }
        flipped
    }

    /// Match minute of an event raised right now:
    /// `period_minutes - remaining/60`, offset by a full period in the
    /// second half.
    fn current_match_minute(&self) -> u32 {
        let elapsed = self.config.period_minutes - self.clock.remaining_secs() / 60;
        elapsed + self.session.current_period.offset_minutes(self.config.period_minutes)
    }

    // ------------------------------------------------------------------
    // Period & session lifecycle
    // ------------------------------------------------------------------

    /// Move to the other half.
    ///
    /// Saves the outgoing period first (attempted synchronously; a failure
    /// is logged but does not strand the user locally), re-hydrates the
    /// target period's stats from the gateway, stops and resets the clock
    /// and clears the on-field selection.
    pub fn switch_period(&mut self, target: Period) -> Result<()> {
        self.reject_if_finished()?;
        if target == self.session.current_period {
            return Ok(());
        }
        if let Err(err) = self.persist_current() {
            log::warn!("period-switch save failed for {}: {err}", self.match_id);
        }
        self.session.current_period = target;
        self.rehydrate_period(target);
        self.clock.reset();
        self.on_field.clear();
        self.secs_since_autosave = 0;
        log::info!("match {} now in {:?}", self.match_id, target);
        Ok(())
    }

    /// Freeze the session: optimistic local flag, synchronous save,
    /// rollback on persistence failure (the caller must retry).
    pub fn finalize(&mut self) -> Result<()> {
        if self.session.is_finished {
            return Ok(());
        }
        self.clock.pause();
        self.session.is_finished = true;
        if let Err(err) = self.persist_current() {
            self.session.is_finished = false;
            return Err(err.into());
        }
        log::info!("match {} finalized", self.match_id);
        Ok(())
    }

    /// Unfreeze a finalized session, with the symmetric rollback.
    pub fn reopen(&mut self) -> Result<()> {
        if !self.session.is_finished {
            return Ok(());
        }
        self.session.is_finished = false;
        if let Err(err) = self.persist_current() {
            self.session.is_finished = true;
            return Err(err.into());
        }
        log::info!("match {} reopened", self.match_id);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Persistence reconciliation
    // ------------------------------------------------------------------

    /// Manual save. Failures are surfaced to the caller; skipped entirely
    /// once the match is finished.
    pub fn save(&mut self) -> Result<()> {
        if self.session.is_finished {
            log::debug!("save skipped: match {} is finished", self.match_id);
            return Ok(());
        }
        self.persist_current()?;
        Ok(())
    }

    /// Silent autosave variant: failures are logged and swallowed so live
    /// tracking is never interrupted.
    fn autosave(&mut self) {
        match self.persist_current() {
            Ok(ack) if !ack.applied => {
                log::warn!("autosave for {} superseded (gateway at seq {})", self.match_id, ack.seq)
            }
            Ok(_) => log::debug!("autosave completed for {}", self.match_id),
            Err(err) => log::warn!("autosave failed for {}: {err}", self.match_id),
        }
    }

    /// Serialize the current in-memory snapshot and merge it into the
    /// stored document. Each patch carries the next save sequence; the
    /// gateway ignores any patch older than its last applied one.
    fn persist_current(&mut self) -> std::result::Result<SaveAck, GatewayError> {
        self.save_seq += 1;
        let period = self.session.current_period;
        let patch = SessionPatch {
            seq: self.save_seq,
            is_finished: self.session.is_finished,
            current_period: period,
            local_score: self.session.local_score,
            visitor_score: self.session.visitor_score,
            events: self.session.events.clone(),
            timeouts: self.session.timeouts.clone(),
            player_stats: self.session.player_stats.get(period).clone(),
            opponent_stats: self.session.opponent_stats.get(period).clone(),
        };
        self.gateway.save(&self.match_id, patch)
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    fn reject_if_finished(&self) -> Result<()> {
        if self.session.is_finished {
            Err(EngineError::MatchFinished)
        } else {
            Ok(())
        }
    }

    fn roster_name(&self, player_id: &str) -> Result<String> {
        self.roster
            .iter()
            .find(|p| p.id == player_id)
            .map(|p| p.display_name.clone())
            .ok_or_else(|| EngineError::UnknownPlayer { id: player_id.to_string() })
    }

    /// Replace one period's working stats with the stored ones, keeping
    /// local data when the gateway is unreachable, then zero-fill roster
    /// players that have no stored entry yet.
    fn rehydrate_period(&mut self, period: Period) {
        match self.gateway.load(&self.match_id) {
            Ok(stored) => {
                *self.session.player_stats.get_mut(period) =
                    stored.session.player_stats.get(period).clone();
                *self.session.opponent_stats.get_mut(period) =
                    stored.session.opponent_stats.get(period).clone();
            }
            Err(err) => {
                log::warn!(
                    "re-hydration failed for {}: {err}; keeping local stats",
                    self.match_id
                );
            }
        }
        self.zero_fill_period(period);
    }

    fn zero_fill_period(&mut self, period: Period) {
        let stats = self.session.player_stats.get_mut(period);
        for player in &self.roster {
            stats.entry(player.id.clone()).or_default();
        }
    }
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use crate::persist::InMemoryGateway;
    use proptest::prelude::*;

    fn engine() -> MatchEngine<InMemoryGateway> {
        let mut gateway = InMemoryGateway::new();
        gateway.seed("m1", MatchSession::new("Lions", "Tigers", "Lions"));
        let roster = vec![RosterPlayer::new("p1", "Player 1", 1)];
        MatchEngine::load(gateway, "m1", roster, EngineConfig::default()).unwrap()
    }

    proptest! {
        /// Property: no sequence of adjustments drives a counter negative.
        #[test]
        fn prop_counters_never_negative(deltas in prop::collection::vec(-3i32..=3, 0..40)) {
            let mut engine = engine();
            for delta in deltas {
                let value = engine
                    .adjust_player_stat("p1", PlayerStatField::Turnovers, delta)
                    .unwrap();
                prop_assert_eq!(value, engine.session().player_stats
                    .get(Period::FirstHalf)["p1"].turnovers);
            }
        }

        /// Property: N tracked goal increments yield score +N and exactly
        /// N Goal events for the tracked side.
        #[test]
        fn prop_goal_increments_match_score_and_log(n in 0usize..15) {
            let mut engine = engine();
            for _ in 0..n {
                engine.adjust_player_stat("p1", PlayerStatField::Goals, 1).unwrap();
            }
            prop_assert_eq!(engine.session().local_score as usize, n);
            prop_assert_eq!(engine.session().goal_count(Side::Local), n);
            prop_assert_eq!(engine.session().goal_count(Side::Visitor), 0);
        }
    }
}
