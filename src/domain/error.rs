//! # Errors
//!
//! Every outcome a command can fail with. All variants are recoverable and
//! rendered back to the user; none of them should take the bot down.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BotError {
    #[error("modlist `{0}` is already registered")]
    AlreadyExists(String),

    #[error("modlist `{0}` is not registered")]
    NotFound(String),

    #[error("modlist `{0}` is unknown")]
    UnknownModlist(String),

    #[error("modlist `{0}` does not exist in the modlist feed")]
    FeedMismatch(String),

    #[error("feed entry for `{id}` is missing `{field}`")]
    MalformedFeedEntry { id: String, field: &'static str },

    #[error("modlist feed unavailable: {0}")]
    FeedUnavailable(String),

    #[error("user {0} has no privileges for this action")]
    Forbidden(String),

    #[error("failed to persist modlists: {0}")]
    PersistenceFailure(String),

    #[error("missing permission to manage roles")]
    NoPermission,

    #[error("chat service error: {0}")]
    Gateway(String),

    #[error("usage: {0}")]
    Usage(&'static str),

    #[error("invalid user: {0}")]
    InvalidUser(String),
}

impl BotError {
    /// Short label used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AlreadyExists(_) => "already_exists",
            Self::NotFound(_) => "not_found",
            Self::UnknownModlist(_) => "unknown_modlist",
            Self::FeedMismatch(_) => "feed_mismatch",
            Self::MalformedFeedEntry { .. } => "malformed_feed_entry",
            Self::FeedUnavailable(_) => "feed_unavailable",
            Self::Forbidden(_) => "forbidden",
            Self::PersistenceFailure(_) => "persistence_failure",
            Self::NoPermission => "no_permission",
            Self::Gateway(_) => "gateway",
            Self::Usage(_) => "usage",
            Self::InvalidUser(_) => "invalid_user",
        }
    }
}
