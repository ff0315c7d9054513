use serde::Serialize;

use crate::engine::MatchEngine;
use crate::models::{
    format_mm_ss, sort_for_display, MatchEvent, OpponentStat, Period, PlayerStat, TimeoutFlags,
};
use crate::persist::PersistenceGateway;

/// Read-model the UI re-reads after each mutation call.
///
/// The timeline is ordered by minute (not insertion order) and player rows
/// by jersey number. Raw counters and their display renderings travel
/// together so the host needs no formatting logic.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub match_id: String,
    pub local_team_name: String,
    pub visitor_team_name: String,
    pub my_team_name: String,
    pub local_score: u32,
    pub visitor_score: u32,
    pub period: Period,
    /// Remaining time, mm:ss.
    pub clock: String,
    pub clock_running: bool,
    pub is_finished: bool,
    /// Timeout flags of the current period.
    pub timeouts: TimeoutFlags,
    pub on_field: Vec<String>,
    pub players: Vec<PlayerRow>,
    pub opponent: OpponentStat,
    pub timeline: Vec<MatchEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerRow {
    pub player_id: String,
    pub display_name: String,
    pub jersey_number: u8,
    /// Playing time this period, mm:ss.
    pub minutes_display: String,
    #[serde(flatten)]
    pub stat: PlayerStat,
}

impl SessionView {
    /// Snapshot the engine's current period for display.
    pub fn capture<G: PersistenceGateway>(engine: &MatchEngine<G>) -> Self {
        let session = engine.session();
        let period = session.current_period;
        let stats = session.player_stats.get(period);

        let mut players: Vec<PlayerRow> = engine
            .roster()
            .iter()
            .map(|player| {
                let stat = stats.get(&player.id).cloned().unwrap_or_default();
                PlayerRow {
                    player_id: player.id.clone(),
                    display_name: player.display_name.clone(),
                    jersey_number: player.jersey_number,
                    minutes_display: format_mm_ss(stat.seconds_played),
                    stat,
                }
            })
            .collect();
        players.sort_by_key(|row| row.jersey_number);

        Self {
            match_id: engine.match_id().to_string(),
            local_team_name: session.local_team_name.clone(),
            visitor_team_name: session.visitor_team_name.clone(),
            my_team_name: session.my_team_name.clone(),
            local_score: session.local_score,
            visitor_score: session.visitor_score,
            period,
            clock: engine.clock().display(),
            clock_running: engine.clock().is_running(),
            is_finished: session.is_finished,
            timeouts: *session.timeouts.get(period),
            on_field: engine.on_field().sorted_ids(),
            players,
            opponent: session.opponent_stats.get(period).clone(),
            timeline: sort_for_display(&session.events),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::models::{MatchSession, PlayerStatField, RosterPlayer};
    use crate::persist::InMemoryGateway;

    fn engine() -> MatchEngine<InMemoryGateway> {
        let mut gateway = InMemoryGateway::new();
        gateway.seed("m1", MatchSession::new("Lions", "Tigers", "Lions"));
        let roster = vec![
            RosterPlayer::new("p2", "Keeper", 1),
            RosterPlayer::new("p1", "Striker", 9),
        ];
        MatchEngine::load(gateway, "m1", roster, EngineConfig::default()).unwrap()
    }

    #[test]
    fn view_reflects_engine_state() {
        let mut engine = engine();
        engine.select_player("p1").unwrap();
        engine.start_clock().unwrap();
        for _ in 0..75 {
            engine.tick();
        }
        engine.adjust_player_stat("p1", PlayerStatField::Goals, 1).unwrap();

        let view = SessionView::capture(&engine);
        assert_eq!(view.clock, "23:45");
        assert!(view.clock_running);
        assert_eq!(view.local_score, 1);
        assert_eq!(view.on_field, vec!["p1".to_string()]);
        // Rows ordered by jersey number.
        assert_eq!(view.players[0].display_name, "Keeper");
        assert_eq!(view.players[1].minutes_display, "01:15");
        assert_eq!(view.timeline.len(), 1);
    }

    #[test]
    fn view_serializes_to_json() {
        let engine = engine();
        let view = SessionView::capture(&engine);
        let json = view.to_json().unwrap();
        assert!(json.contains("\"local_team_name\": \"Lions\""));
        assert!(json.contains("\"clock\": \"25:00\""));
    }
}
