//! In-process location feed backed by a tokio channel.

use super::{FeedError, LocationFeed, PermissionScope, PermissionStatus, Subscription, WatchOptions};
use crate::core::{distance, Coordinate, LocationSample};
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::trace;

/// Pushes samples into a [`ChannelFeed`].
///
/// Platform callbacks hold one of these and forward every position the OS
/// reports. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct FeedSender {
    tx: mpsc::UnboundedSender<LocationSample>,
}

impl FeedSender {
    /// Forward a sample; fails once the subscription side is gone.
    pub fn push_sample(&self, sample: LocationSample) -> Result<(), FeedError> {
        self.tx.send(sample).map_err(|_| FeedError::Closed)
    }

    /// Forward a coordinate stamped with the current time.
    pub fn push(&self, coordinate: Coordinate) -> Result<(), FeedError> {
        self.push_sample(LocationSample::now(coordinate))
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// A [`LocationFeed`] whose permission answers and initial position are fixed
/// up front and whose updates arrive through a [`FeedSender`].
///
/// Subscriptions apply the minimum-distance filter the way a device service
/// does: a sample is delivered only once it is at least
/// [`WatchOptions::min_distance_m`] away from the last delivered one.
///
/// # Example
///
/// ```rust
/// use geowatch::core::Coordinate;
/// use geowatch::feed::{ChannelFeed, PermissionStatus};
///
/// let (feed, sender) = ChannelFeed::new(Some(Coordinate::new(45.4, 51.3)));
/// let feed = feed.with_background_permission(PermissionStatus::Denied);
/// sender.push(Coordinate::new(45.41, 51.3)).unwrap();
/// # drop(feed);
/// ```
#[derive(Debug)]
pub struct ChannelFeed {
    foreground: PermissionStatus,
    background: PermissionStatus,
    initial: Option<Coordinate>,
    receiver: Option<mpsc::UnboundedReceiver<LocationSample>>,
    prompts: Vec<PermissionScope>,
}

impl ChannelFeed {
    /// Create a feed that grants every permission.
    ///
    /// With `initial` set to `None` the one-shot position read fails with
    /// [`FeedError::Unavailable`].
    pub fn new(initial: Option<Coordinate>) -> (Self, FeedSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let feed = Self {
            foreground: PermissionStatus::Granted,
            background: PermissionStatus::Granted,
            initial,
            receiver: Some(rx),
            prompts: Vec::new(),
        };
        (feed, FeedSender { tx })
    }

    pub fn with_foreground_permission(mut self, status: PermissionStatus) -> Self {
        self.foreground = status;
        self
    }

    pub fn with_background_permission(mut self, status: PermissionStatus) -> Self {
        self.background = status;
        self
    }

    /// Permission prompts issued so far, in order.
    pub fn prompts(&self) -> &[PermissionScope] {
        &self.prompts
    }

    /// Whether a subscription has already taken the receiving end.
    pub fn is_subscribed(&self) -> bool {
        self.receiver.is_none()
    }
}

#[async_trait]
impl LocationFeed for ChannelFeed {
    type Subscription = ChannelSubscription;

    async fn request_foreground_permission(&mut self) -> PermissionStatus {
        self.prompts.push(PermissionScope::Foreground);
        self.foreground
    }

    async fn request_background_permission(&mut self) -> PermissionStatus {
        self.prompts.push(PermissionScope::Background);
        self.background
    }

    async fn current_position(&mut self) -> Result<LocationSample, FeedError> {
        self.initial
            .map(LocationSample::now)
            .ok_or_else(|| FeedError::Unavailable("no position fix".to_string()))
    }

    async fn subscribe(&mut self, options: WatchOptions) -> Result<Self::Subscription, FeedError> {
        let receiver = self.receiver.take().ok_or_else(|| {
            FeedError::SubscribeFailed("feed already has an active subscription".to_string())
        })?;
        Ok(ChannelSubscription {
            receiver,
            options,
            last_delivered: None,
            released: false,
        })
    }
}

/// Subscription handed out by [`ChannelFeed`].
#[derive(Debug)]
pub struct ChannelSubscription {
    receiver: mpsc::UnboundedReceiver<LocationSample>,
    options: WatchOptions,
    last_delivered: Option<Coordinate>,
    released: bool,
}

impl ChannelSubscription {
    pub fn options(&self) -> WatchOptions {
        self.options
    }

    fn moved_enough(&self, coordinate: Coordinate) -> bool {
        match self.last_delivered {
            Some(last) => distance(last, coordinate) >= self.options.min_distance_m,
            None => true,
        }
    }
}

#[async_trait]
impl Subscription for ChannelSubscription {
    async fn next_sample(&mut self) -> Option<LocationSample> {
        if self.released {
            return None;
        }
        while let Some(sample) = self.receiver.recv().await {
            if !self.moved_enough(sample.coordinate) {
                trace!(
                    latitude = sample.coordinate.latitude,
                    longitude = sample.coordinate.longitude,
                    "sample below minimum movement dropped"
                );
                continue;
            }
            self.last_delivered = Some(sample.coordinate);
            return Some(sample);
        }
        None
    }

    fn release(&mut self) {
        self.released = true;
        self.receiver.close();
    }

    fn is_released(&self) -> bool {
        self.released
    }
}
