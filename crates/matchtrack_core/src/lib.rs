//! # matchtrack_core — live match statistics & clock engine
//!
//! Single-session state machine for tracking one live match: a countdown
//! clock, per-player and per-opponent counters across two periods, a goal
//! event log with derived team scores, one-way timeout flags, and a
//! finalize/reopen lifecycle. The engine reconciles its in-memory state
//! against an injected persistence gateway through manual saves and a
//! silent periodic autosave.
//!
//! In-memory state is always the source of truth for display; the stored
//! copy may lag by up to one autosave interval. Save patches carry
//! monotonically increasing sequence numbers so the last issued save wins
//! deterministically.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod persist;

pub use api::{PlayerRow, SessionView};
pub use config::EngineConfig;
pub use engine::{MatchClock, MatchEngine, OnFieldSet, SharedEngine, TickRunner};
pub use error::{EngineError, Result};
pub use models::{
    format_mm_ss, sort_for_display, ByPeriod, CardKind, EventKind, MatchEvent, MatchSession,
    OpponentStat, OpponentStatField, Period, PlayerStat, PlayerStatField, RosterPlayer, Side,
    TimeoutFlags,
};
pub use persist::{
    GatewayError, InMemoryGateway, JsonFileGateway, PersistenceGateway, SaveAck, SessionPatch,
    StoredSession,
};
