use thiserror::Error;

use crate::persist::GatewayError;

/// Errors surfaced by the match engine.
///
/// `MatchFinished` and `OnFieldLimitReached` are validation rejections:
/// callers surface them as transient warnings, never as fatal conditions.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("match is finished; reopen it before editing")]
    MatchFinished,

    #[error("on-field selection is full ({cap} players)")]
    OnFieldLimitReached { cap: usize },

    #[error("unknown roster player: {id}")]
    UnknownPlayer { id: String },

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

pub type Result<T> = std::result::Result<T, EngineError>;
