//! Session error types.

use crate::feed::FeedError;
use thiserror::Error;

/// Errors surfaced by [`SessionController`](super::SessionController).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SessionError {
    #[error("Permission to access location was denied")]
    ForegroundPermissionDenied,

    #[error("Permission to access background location was denied")]
    BackgroundPermissionDenied,

    /// The location service failed outside of a permission prompt
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("Session already started (currently '{phase}')")]
    AlreadyStarted { phase: String },

    #[error("No active subscription (currently '{phase}')")]
    NotSubscribed { phase: String },

    #[error("Illegal phase change from '{from}' to '{to}'")]
    IllegalTransition { from: String, to: String },
}

impl SessionError {
    pub fn is_permission_denied(&self) -> bool {
        matches!(
            self,
            Self::ForegroundPermissionDenied | Self::BackgroundPermissionDenied
        )
    }
}
