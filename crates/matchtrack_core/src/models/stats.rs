use serde::{Deserialize, Serialize};

/// Per-period counters for one roster player.
///
/// Playing time is stored in seconds (`seconds_played`) and rendered as
/// mm:ss for display. Every counter is clamped at zero on decrement.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PlayerStat {
    #[serde(default)]
    pub seconds_played: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    #[serde(default)]
    pub fouls: u32,
    #[serde(default)]
    pub shots_on_target: u32,
    #[serde(default)]
    pub shots_off_target: u32,
    #[serde(default)]
    pub recoveries: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub saves: u32,
    #[serde(default)]
    pub goals_conceded: u32,
    #[serde(default)]
    pub one_vs_one: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

/// Adjustable counter fields of a [`PlayerStat`].
///
/// `seconds_played` is deliberately absent: playing time only accrues
/// through clock ticks, never through manual adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatField {
    Goals,
    Assists,
    Fouls,
    ShotsOnTarget,
    ShotsOffTarget,
    Recoveries,
    Turnovers,
    Saves,
    GoalsConceded,
    OneVsOne,
    YellowCards,
    RedCards,
}

impl PlayerStat {
    pub fn get(&self, field: PlayerStatField) -> u32 {
        match field {
            PlayerStatField::Goals => self.goals,
            PlayerStatField::Assists => self.assists,
            PlayerStatField::Fouls => self.fouls,
            PlayerStatField::ShotsOnTarget => self.shots_on_target,
            PlayerStatField::ShotsOffTarget => self.shots_off_target,
            PlayerStatField::Recoveries => self.recoveries,
            PlayerStatField::Turnovers => self.turnovers,
            PlayerStatField::Saves => self.saves,
            PlayerStatField::GoalsConceded => self.goals_conceded,
            PlayerStatField::OneVsOne => self.one_vs_one,
            PlayerStatField::YellowCards => self.yellow_cards,
            PlayerStatField::RedCards => self.red_cards,
        }
    }

    /// Apply `new = max(0, current + delta)` to one counter and return the
    /// new value.
    pub fn apply(&mut self, field: PlayerStatField, delta: i32) -> u32 {
        let slot = match field {
            PlayerStatField::Goals => &mut self.goals,
            PlayerStatField::Assists => &mut self.assists,
            PlayerStatField::Fouls => &mut self.fouls,
            PlayerStatField::ShotsOnTarget => &mut self.shots_on_target,
            PlayerStatField::ShotsOffTarget => &mut self.shots_off_target,
            PlayerStatField::Recoveries => &mut self.recoveries,
            PlayerStatField::Turnovers => &mut self.turnovers,
            PlayerStatField::Saves => &mut self.saves,
            PlayerStatField::GoalsConceded => &mut self.goals_conceded,
            PlayerStatField::OneVsOne => &mut self.one_vs_one,
            PlayerStatField::YellowCards => &mut self.yellow_cards,
            PlayerStatField::RedCards => &mut self.red_cards,
        };
        *slot = clamp_add(*slot, delta);
        *slot
    }
}

/// Aggregate counters for the untracked side within one period.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct OpponentStat {
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub shots_on_target: u32,
    #[serde(default)]
    pub shots_off_target: u32,
    #[serde(default)]
    pub fouls: u32,
    #[serde(default)]
    pub recoveries: u32,
    #[serde(default)]
    pub turnovers: u32,
    #[serde(default)]
    pub yellow_cards: u32,
    #[serde(default)]
    pub red_cards: u32,
}

/// Adjustable counter fields of an [`OpponentStat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentStatField {
    Goals,
    ShotsOnTarget,
    ShotsOffTarget,
    Fouls,
    Recoveries,
    Turnovers,
    YellowCards,
    RedCards,
}

impl OpponentStat {
    pub fn get(&self, field: OpponentStatField) -> u32 {
        match field {
            OpponentStatField::Goals => self.goals,
            OpponentStatField::ShotsOnTarget => self.shots_on_target,
            OpponentStatField::ShotsOffTarget => self.shots_off_target,
            OpponentStatField::Fouls => self.fouls,
            OpponentStatField::Recoveries => self.recoveries,
            OpponentStatField::Turnovers => self.turnovers,
            OpponentStatField::YellowCards => self.yellow_cards,
            OpponentStatField::RedCards => self.red_cards,
        }
    }

    /// Same clamp rule as [`PlayerStat::apply`].
    pub fn apply(&mut self, field: OpponentStatField, delta: i32) -> u32 {
        let slot = match field {
            OpponentStatField::Goals => &mut self.goals,
            OpponentStatField::ShotsOnTarget => &mut self.shots_on_target,
            OpponentStatField::ShotsOffTarget => &mut self.shots_off_target,
            OpponentStatField::Fouls => &mut self.fouls,
            OpponentStatField::Recoveries => &mut self.recoveries,
            OpponentStatField::Turnovers => &mut self.turnovers,
            OpponentStatField::YellowCards => &mut self.yellow_cards,
            OpponentStatField::RedCards => &mut self.red_cards,
        };
        *slot = clamp_add(*slot, delta);
        *slot
    }
}

fn clamp_add(value: u32, delta: i32) -> u32 {
    if delta >= 0 {
        value.saturating_add(delta as u32)
    } else {
        value.saturating_sub(delta.unsigned_abs())
    }
}

/// Render a seconds count as mm:ss (clock display and per-player minutes).
pub fn format_mm_ss(total_secs: u32) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}
