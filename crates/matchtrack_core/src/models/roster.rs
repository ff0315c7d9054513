use serde::{Deserialize, Serialize};

/// One player of the tracked team, as supplied by the roster provider.
/// Read-only to the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RosterPlayer {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub jersey_number: u8,
}

impl RosterPlayer {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, jersey_number: u8) -> Self {
        Self { id: id.into(), display_name: display_name.into(), jersey_number }
    }
}
