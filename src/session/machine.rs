//! Session controller: drives a location feed through the session phases.

use crate::config::SessionConfig;
use crate::core::{
    GeofenceZone, LocationSample, Membership, State, StateHistory, StateTransition,
};
use crate::feed::{LocationFeed, PermissionScope, Subscription};
use crate::session::error::SessionError;
use crate::session::state::{Fix, SessionPhase, SessionState};
use crate::view::RenderModel;
use chrono::Utc;
use std::future::Future;
use tracing::{debug, error, info, info_span, warn, Instrument, Span};
use uuid::Uuid;

/// Owns one location session from permission prompt to teardown.
///
/// All display state lives in a single [`SessionState`] that is replaced as a
/// whole on every event, so the position and membership flag never disagree.
pub struct SessionController<F: LocationFeed> {
    id: Uuid,
    feed: F,
    config: SessionConfig,
    state: SessionState,
    history: StateHistory<SessionPhase>,
    subscription: Option<F::Subscription>,
    span: Span,
}

impl<F: LocationFeed> SessionController<F> {
    pub fn new(feed: F, config: SessionConfig) -> Self {
        let id = Uuid::new_v4();
        let span = info_span!("geofence_session", session = %id);
        Self {
            id,
            feed,
            config,
            state: SessionState::RequestingPermission,
            history: StateHistory::new(),
            subscription: None,
            span,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Phase changes so far; individual samples are not recorded.
    pub fn history(&self) -> &StateHistory<SessionPhase> {
        &self.history
    }

    /// Membership of the latest sample; `false` until a position is known.
    pub fn is_within(&self) -> bool {
        self.state.fix().is_some_and(Fix::is_within)
    }

    pub fn render(&self) -> RenderModel {
        RenderModel::from_state(&self.state, &self.config.zone)
    }

    /// Request permissions, read the initial position, and subscribe.
    ///
    /// A refused permission moves the session to `Failed` and is returned as
    /// an error. Feed failures are returned as [`SessionError::Feed`] and
    /// leave the display state where it was.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::RequestingPermission {
            return Err(SessionError::AlreadyStarted {
                phase: self.phase().name().to_string(),
            });
        }
        let span = self.span.clone();
        self.start_inner().instrument(span).await
    }

    async fn start_inner(&mut self) -> Result<(), SessionError> {
        if self.config.platform.requires_foreground_prompt() {
            let status = self.feed.request_foreground_permission().await;
            if !status.is_granted() {
                return Err(self.deny(PermissionScope::Foreground)?);
            }
        }

        let status = self.feed.request_background_permission().await;
        if !status.is_granted() {
            return Err(self.deny(PermissionScope::Background)?);
        }

        self.advance(SessionState::ReadingInitialPosition)?;
        let sample = self.feed.current_position().await.map_err(|e| {
            error!(error = %e, "initial position read failed");
            e
        })?;
        let fix = Self::evaluate(&self.config.zone, sample);
        self.advance(SessionState::Subscribing { fix })?;

        let subscription = self.feed.subscribe(self.config.watch).await.map_err(|e| {
            error!(error = %e, "location subscription failed");
            e
        })?;
        self.subscription = Some(subscription);
        info!(
            accuracy = ?self.config.watch.accuracy,
            min_distance_m = self.config.watch.min_distance_m,
            "location subscription established"
        );
        self.advance(SessionState::Subscribed { fix })
    }

    /// Move to `Failed` and hand back the matching error for the caller.
    fn deny(&mut self, scope: PermissionScope) -> Result<SessionError, SessionError> {
        warn!(scope = ?scope, "location permission denied");
        self.advance(SessionState::Failed {
            message: scope.denial_message().to_string(),
        })?;
        Ok(match scope {
            PermissionScope::Foreground => SessionError::ForegroundPermissionDenied,
            PermissionScope::Background => SessionError::BackgroundPermissionDenied,
        })
    }

    /// Process one feed emission.
    ///
    /// Returns the new membership, or `None` when the session is not
    /// currently subscribed (before start, after failure or release).
    pub fn handle_sample(&mut self, sample: LocationSample) -> Option<Membership> {
        match &mut self.state {
            SessionState::Subscribing { fix } | SessionState::Subscribed { fix } => {
                let next = Self::evaluate(&self.config.zone, sample);
                let was_within = fix.is_within();
                *fix = next;
                if was_within != next.is_within() {
                    info!(within = next.is_within(), "geofence membership changed");
                }
                Some(next.membership)
            }
            other => {
                debug!(phase = other.phase().name(), "sample ignored");
                None
            }
        }
    }

    /// Process subscription updates until the feed ends or `shutdown`
    /// resolves, then release the subscription.
    pub async fn run_until<S>(&mut self, shutdown: S) -> Result<(), SessionError>
    where
        S: Future<Output = ()>,
    {
        if self.subscription.is_none() {
            return Err(SessionError::NotSubscribed {
                phase: self.phase().name().to_string(),
            });
        }

        let span = self.span.clone();
        async move {
            tokio::pin!(shutdown);
            loop {
                let next = match self.subscription.as_mut() {
                    Some(subscription) => {
                        tokio::select! {
                            _ = &mut shutdown => {
                                info!("shutdown requested");
                                break;
                            }
                            next = subscription.next_sample() => next,
                        }
                    }
                    None => break,
                };

                match next {
                    Some(sample) => {
                        self.handle_sample(sample);
                    }
                    None => {
                        info!("location feed ended");
                        break;
                    }
                }
            }
            self.release();
            Ok(())
        }
        .instrument(span)
        .await
    }

    /// Process subscription updates until the feed ends.
    pub async fn run(&mut self) -> Result<(), SessionError> {
        self.run_until(std::future::pending()).await
    }

    /// Tear the session down. No sample has any effect afterwards.
    ///
    /// Releasing twice, or releasing a failed session, is a no-op apart from
    /// dropping any subscription still held.
    pub fn release(&mut self) {
        let span = self.span.clone();
        let _entered = span.enter();
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
            info!("location subscription released");
        }
        if self.phase().is_final() {
            return;
        }
        let last_fix = self.state.fix().copied();
        self.enter(SessionState::Released { last_fix });
    }

    fn evaluate(zone: &GeofenceZone, sample: LocationSample) -> Fix {
        let membership = zone.evaluate(sample.coordinate);
        debug!(
            latitude = sample.coordinate.latitude,
            longitude = sample.coordinate.longitude,
            distance_m = membership.distance_m,
            within = membership.within,
            "sample evaluated"
        );
        Fix { sample, membership }
    }

    fn advance(&mut self, next: SessionState) -> Result<(), SessionError> {
        let from = self.phase();
        let to = next.phase();
        if !from.can_advance_to(to) {
            return Err(SessionError::IllegalTransition {
                from: from.name().to_string(),
                to: to.name().to_string(),
            });
        }
        self.enter(next);
        Ok(())
    }

    fn enter(&mut self, next: SessionState) {
        let from = self.phase();
        let to = next.phase();
        self.history = self.history.record(StateTransition {
            from,
            to,
            timestamp: Utc::now(),
        });
        self.state = next;
        info!(from = from.name(), to = to.name(), "session phase changed");
    }
}
