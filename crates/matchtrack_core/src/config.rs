use serde::{Deserialize, Serialize};

/// Engine tuning supplied by the match metadata provider.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Length of one period in minutes (default: 25)
    pub period_minutes: u32,
    /// Seconds between silent background saves (default: 5)
    pub autosave_interval_secs: u32,
    /// Maximum players credited with playing time at once (default: 5)
    pub on_field_cap: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { period_minutes: 25, autosave_interval_secs: 5, on_field_cap: 5 }
    }
}

impl EngineConfig {
    pub fn period_secs(&self) -> u32 {
        self.period_minutes * 60
    }
}
