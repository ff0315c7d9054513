use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::events::{MatchEvent, Side};
use super::stats::{OpponentStat, PlayerStat};

/// One of the two match halves, tracked independently.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    FirstHalf,
    SecondHalf,
}

impl Default for Period {
    fn default() -> Self {
        Period::FirstHalf
    }
}

impl Period {
    /// Minute offset applied to event minutes in this period.
    pub fn offset_minutes(self, period_minutes: u32) -> u32 {
        match self {
            Period::FirstHalf => 0,
            Period::SecondHalf => period_minutes,
        }
    }
}

/// Container holding one value per period.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ByPeriod<T> {
    pub first: T,
    pub second: T,
}

impl<T> ByPeriod<T> {
    pub fn get(&self, period: Period) -> &T {
        match period {
            Period::FirstHalf => &self.first,
            Period::SecondHalf => &self.second,
        }
    }

    pub fn get_mut(&mut self, period: Period) -> &mut T {
        match period {
            Period::FirstHalf => &mut self.first,
            Period::SecondHalf => &mut self.second,
        }
    }
}

/// One-way per-period timeout flags (false→true only).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TimeoutFlags {
    #[serde(default)]
    pub local: bool,
    #[serde(default)]
    pub visitor: bool,
}

impl TimeoutFlags {
    pub fn used(&self, side: Side) -> bool {
        match side {
            Side::Local => self.local,
            Side::Visitor => self.visitor,
        }
    }

    /// Flip the flag for `side`; returns whether it actually flipped.
    pub fn set_used(&mut self, side: Side) -> bool {
        let slot = match side {
            Side::Local => &mut self.local,
            Side::Visitor => &mut self.visitor,
        };
        if *slot {
            false
        } else {
            *slot = true;
            true
        }
    }
}

/// The full document for one live match being tracked.
///
/// Scores are derived from the goal event log and recomputed on hydration;
/// they are never edited directly.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MatchSession {
    pub local_team_name: String,
    pub visitor_team_name: String,
    /// Which side is the tracked team; compared by name equality against
    /// `local_team_name`.
    pub my_team_name: String,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub current_period: Period,
    #[serde(default)]
    pub local_score: u32,
    #[serde(default)]
    pub visitor_score: u32,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub timeouts: ByPeriod<TimeoutFlags>,
    #[serde(default)]
    pub player_stats: ByPeriod<HashMap<String, PlayerStat>>,
    #[serde(default)]
    pub opponent_stats: ByPeriod<OpponentStat>,
}

impl MatchSession {
    /// Fresh session with empty stats, as the match-creation flow produces.
    pub fn new(
        local_team_name: impl Into<String>,
        visitor_team_name: impl Into<String>,
        my_team_name: impl Into<String>,
    ) -> Self {
        Self {
            local_team_name: local_team_name.into(),
            visitor_team_name: visitor_team_name.into(),
            my_team_name: my_team_name.into(),
            ..Default::default()
        }
    }

    /// The side whose individual player statistics are recorded.
    pub fn tracked_side(&self) -> Side {
        if self.my_team_name == self.local_team_name {
            Side::Local
        } else {
            Side::Visitor
        }
    }

    pub fn score_for(&self, side: Side) -> u32 {
        match side {
            Side::Local => self.local_score,
            Side::Visitor => self.visitor_score,
        }
    }

    /// Append a goal event and bump the scoring side's counter.
    pub fn push_goal(
        &mut self,
        minute: u32,
        side: Side,
        player_name: impl Into<String>,
        player_id: Option<String>,
        count: u32,
    ) {
        self.events.push(MatchEvent::goal(minute, side, player_name, player_id));
        match side {
            Side::Local => self.local_score += count,
            Side::Visitor => self.visitor_score += count,
        }
    }

    /// Re-derive both scores by replaying the goal event log.
    pub fn recompute_scores(&mut self) {
        self.local_score =
            self.events.iter().filter(|e| e.is_goal_for(Side::Local)).count() as u32;
        self.visitor_score =
            self.events.iter().filter(|e| e.is_goal_for(Side::Visitor)).count() as u32;
    }

    pub fn goal_count(&self, side: Side) -> usize {
        self.events.iter().filter(|e| e.is_goal_for(side)).count()
    }
}
