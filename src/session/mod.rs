//! Location session: permission prompts, initial read, live subscription.
//!
//! The session is an explicit state machine:
//!
//! ```text
//! RequestingPermission ──▶ ReadingInitialPosition ──▶ Subscribing ──▶ Subscribed
//!          │                                                              │
//!          ▼                                                              ▼
//!        Failed                                                       Released
//! ```
//!
//! Every live phase can also move straight to `Released` when the host tears
//! the screen down.
//!
//! # Example
//!
//! ```rust
//! use geowatch::config::{Platform, SessionConfig};
//! use geowatch::core::Coordinate;
//! use geowatch::feed::ChannelFeed;
//! use geowatch::session::{SessionController, SessionPhase};
//!
//! # tokio_test_block(async {
//! let (feed, sender) = ChannelFeed::new(Some(Coordinate::new(45.4, 51.3)));
//! let config = SessionConfig::default().with_platform(Platform::Android);
//! let mut session = SessionController::new(feed, config);
//!
//! session.start().await.unwrap();
//! assert_eq!(session.phase(), SessionPhase::Subscribed);
//! assert_eq!(session.render().membership_label(), "Is within Geofence: Yes");
//!
//! sender.push(Coordinate::new(45.409, 51.3)).unwrap();
//! drop(sender);
//! session.run().await.unwrap();
//! assert_eq!(session.render().membership_label(), "Is within Geofence: No");
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod error;
mod machine;
mod state;

pub use error::SessionError;
pub use machine::SessionController;
pub use state::{Fix, SessionPhase, SessionState};
