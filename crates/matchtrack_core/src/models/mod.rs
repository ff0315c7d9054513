//! Data model for a live match session: the session document, per-period
//! stat maps, the event timeline and roster inputs.

pub mod events;
pub mod roster;
pub mod session;
pub mod stats;

pub use events::{sort_for_display, CardKind, EventKind, MatchEvent, Side};
pub use roster::RosterPlayer;
pub use session::{ByPeriod, MatchSession, Period, TimeoutFlags};
pub use stats::{format_mm_ss, OpponentStat, OpponentStatField, PlayerStat, PlayerStatField};
