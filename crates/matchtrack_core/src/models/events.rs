use serde::{Deserialize, Serialize};

/// One entry of the match timeline.
///
/// Events are append-only while a session is live and immutable once
/// appended. Insertion order is not chronological; display ordering sorts
/// by `minute` (see [`sort_for_display`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchEvent {
    pub minute: u32,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub side: Side,
    pub player_name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub player_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub card: Option<CardKind>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Goal,
    Card,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Local,
    Visitor,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Local => Side::Visitor,
            Side::Visitor => Side::Local,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Yellow,
    Red,
}

impl MatchEvent {
    pub fn goal(
        minute: u32,
        side: Side,
        player_name: impl Into<String>,
        player_id: Option<String>,
    ) -> Self {
        Self {
            minute,
            kind: EventKind::Goal,
            side,
            player_name: player_name.into(),
            player_id,
            card: None,
        }
    }

    pub fn is_goal_for(&self, side: Side) -> bool {
        self.kind == EventKind::Goal && self.side == side
    }
}

/// Timeline ordering for display: by minute, stable for equal minutes.
pub fn sort_for_display(events: &[MatchEvent]) -> Vec<MatchEvent> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|event| event.minute);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_order_is_by_minute_not_insertion() {
        let events = vec![
            MatchEvent::goal(12, Side::Local, "A", None),
            MatchEvent::goal(3, Side::Visitor, "B", None),
            MatchEvent::goal(12, Side::Local, "C", None),
        ];
        let sorted = sort_for_display(&events);
        assert_eq!(sorted[0].player_name, "B");
        // Stable: equal minutes keep insertion order.
        assert_eq!(sorted[1].player_name, "A");
        assert_eq!(sorted[2].player_name, "C");
        // The log itself is untouched.
        assert_eq!(events[0].player_name, "A");
    }

    #[test]
    fn side_opposite() {
        assert_eq!(Side::Local.opposite(), Side::Visitor);
        assert_eq!(Side::Visitor.opposite(), Side::Local);
    }
}
