//! Session phases and the owned display state.

use crate::core::{LocationSample, Membership, State};
use serde::{Deserialize, Serialize};

/// Where a session stands, without any of its data.
///
/// This is what gets recorded in the session's phase history.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum SessionPhase {
    RequestingPermission,
    ReadingInitialPosition,
    Subscribing,
    Subscribed,
    Failed,
    Released,
}

impl State for SessionPhase {
    fn name(&self) -> &str {
        match self {
            Self::RequestingPermission => "RequestingPermission",
            Self::ReadingInitialPosition => "ReadingInitialPosition",
            Self::Subscribing => "Subscribing",
            Self::Subscribed => "Subscribed",
            Self::Failed => "Failed",
            Self::Released => "Released",
        }
    }

    fn is_final(&self) -> bool {
        matches!(self, Self::Failed | Self::Released)
    }

    fn is_error(&self) -> bool {
        matches!(self, Self::Failed)
    }
}

impl SessionPhase {
    /// Legal moves of the session machine.
    ///
    /// Any live phase may be released; nothing leaves a final phase.
    pub fn can_advance_to(&self, next: SessionPhase) -> bool {
        use SessionPhase::*;
        match (self, next) {
            (RequestingPermission, ReadingInitialPosition) => true,
            (RequestingPermission, Failed) => true,
            (ReadingInitialPosition, Subscribing) => true,
            (Subscribing, Subscribed) => true,
            (from, Released) => !from.is_final(),
            _ => false,
        }
    }
}

/// The latest position and its membership, always replaced together.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub sample: LocationSample,
    pub membership: Membership,
}

impl Fix {
    pub fn is_within(&self) -> bool {
        self.membership.within
    }
}

/// Complete display state of a session.
///
/// A fix only exists once a position has been read, and an error message
/// only once a permission was refused.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    RequestingPermission,
    ReadingInitialPosition,
    /// Initial position known, subscription being opened
    Subscribing { fix: Fix },
    Subscribed { fix: Fix },
    Failed { message: String },
    Released { last_fix: Option<Fix> },
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::RequestingPermission => SessionPhase::RequestingPermission,
            Self::ReadingInitialPosition => SessionPhase::ReadingInitialPosition,
            Self::Subscribing { .. } => SessionPhase::Subscribing,
            Self::Subscribed { .. } => SessionPhase::Subscribed,
            Self::Failed { .. } => SessionPhase::Failed,
            Self::Released { .. } => SessionPhase::Released,
        }
    }

    /// Position currently on display, if any.
    pub fn fix(&self) -> Option<&Fix> {
        match self {
            Self::Subscribing { fix } | Self::Subscribed { fix } => Some(fix),
            Self::Released { last_fix } => last_fix.as_ref(),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}
