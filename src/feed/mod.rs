//! Boundary to the device location service.
//!
//! The session controller only talks to the outside world through
//! [`LocationFeed`] and the [`Subscription`] it hands out. Platform bindings
//! implement these traits; [`ChannelFeed`] is an in-process implementation
//! that hosts and tests can push samples into.

mod channel;

pub use channel::{ChannelFeed, ChannelSubscription, FeedSender};

use crate::core::LocationSample;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Answer to a permission prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    /// The user dismissed the prompt without answering
    Undetermined,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Which permission a prompt asked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionScope {
    Foreground,
    Background,
}

impl PermissionScope {
    /// Message shown in place of the position when this scope is refused.
    pub fn denial_message(self) -> &'static str {
        match self {
            Self::Foreground => "Permission to access location was denied",
            Self::Background => "Permission to access background location was denied",
        }
    }
}

/// Precision/power tradeoff offered by the location service.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccuracyTier {
    Lowest,
    Low,
    #[default]
    Balanced,
    High,
    Highest,
    BestForNavigation,
}

/// Default minimum movement before the service reports a new sample.
pub const DEFAULT_MIN_DISTANCE_M: f64 = 10.0;

/// Parameters of a continuous location subscription.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchOptions {
    pub accuracy: AccuracyTier,
    /// Movement in meters required before a new sample is delivered
    pub min_distance_m: f64,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            accuracy: AccuracyTier::Balanced,
            min_distance_m: DEFAULT_MIN_DISTANCE_M,
        }
    }
}

/// Failures reported by a location feed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedError {
    #[error("Current location is unavailable: {0}")]
    Unavailable(String),

    #[error("Subscription could not be established: {0}")]
    SubscribeFailed(String),

    #[error("Location feed is closed")]
    Closed,
}

/// Device location service.
#[async_trait]
pub trait LocationFeed: Send {
    type Subscription: Subscription;

    async fn request_foreground_permission(&mut self) -> PermissionStatus;

    async fn request_background_permission(&mut self) -> PermissionStatus;

    /// One-shot read of the current position.
    async fn current_position(&mut self) -> Result<LocationSample, FeedError>;

    /// Open a continuous subscription.
    async fn subscribe(&mut self, options: WatchOptions) -> Result<Self::Subscription, FeedError>;
}

/// Handle to an open subscription.
///
/// Once released, `next_sample` returns `None` and no further samples are
/// produced.
#[async_trait]
pub trait Subscription: Send {
    /// Wait for the next reported sample; `None` once the feed has ended.
    async fn next_sample(&mut self) -> Option<LocationSample>;

    fn release(&mut self);

    fn is_released(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_granted_counts_as_granted() {
        assert!(PermissionStatus::Granted.is_granted());
        assert!(!PermissionStatus::Denied.is_granted());
        assert!(!PermissionStatus::Undetermined.is_granted());
    }

    #[test]
    fn denial_messages_name_the_scope() {
        assert_eq!(
            PermissionScope::Foreground.denial_message(),
            "Permission to access location was denied"
        );
        assert_eq!(
            PermissionScope::Background.denial_message(),
            "Permission to access background location was denied"
        );
    }

    #[test]
    fn default_watch_is_balanced_every_ten_meters() {
        let watch = WatchOptions::default();
        assert_eq!(watch.accuracy, AccuracyTier::Balanced);
        assert_eq!(watch.min_distance_m, 10.0);
    }

    #[test]
    fn accuracy_tiers_use_snake_case() {
        let json = serde_json::to_string(&AccuracyTier::BestForNavigation).unwrap();
        assert_eq!(json, r#""best_for_navigation""#);
    }
}
