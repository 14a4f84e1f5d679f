//! Immutable record of phase transitions.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A single move from one phase to another.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateTransition<S: State> {
    /// The phase being left
    pub from: S,
    /// The phase being entered
    pub to: S,
    /// When the transition occurred
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of phase transitions.
///
/// `record` returns a new history and leaves the receiver untouched.
///
/// # Example
///
/// ```rust
/// use geowatch::core::{StateHistory, StateTransition};
/// use geowatch::session::SessionPhase;
/// use chrono::Utc;
///
/// let history = StateHistory::new().record(StateTransition {
///     from: SessionPhase::RequestingPermission,
///     to: SessionPhase::ReadingInitialPosition,
///     timestamp: Utc::now(),
/// });
///
/// assert_eq!(
///     history.get_path(),
///     vec![
///         &SessionPhase::RequestingPermission,
///         &SessionPhase::ReadingInitialPosition,
///     ]
/// );
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Record a transition, returning a new history.
    pub fn record(&self, transition: StateTransition<S>) -> Self {
        let mut transitions = self.transitions.clone();
        transitions.push(transition);
        Self { transitions }
    }

    /// Phases traversed: the first `from`, then every `to` in order.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Time between the first and last transition, `None` when empty.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// The most recently entered phase, if any transition happened.
    pub fn latest(&self) -> Option<&S> {
        self.transitions.last().map(|t| &t.to)
    }

    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }
}
