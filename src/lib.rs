//! Geowatch: live location tracking against a circular geofence
//!
//! Geowatch is the logic behind a single "where am I relative to the target"
//! screen. It keeps a pure core (haversine distance, inclusive radius check)
//! separate from the imperative shell that talks to the device location
//! service and produces a render model for the map widget.
//!
//! # Modules
//!
//! - [`core`]: coordinates, distance math, zones, phase history
//! - [`feed`]: the location service boundary and an in-process channel feed
//! - [`session`]: the permission → initial read → subscription state machine
//! - [`view`]: render model and map scene for the host UI
//! - [`config`]: session configuration with TOML loading
//!
//! # Example
//!
//! ```rust
//! use geowatch::core::{distance, is_within_zone, Coordinate, GeofenceZone};
//!
//! let zone = GeofenceZone::new(Coordinate::new(45.4, 51.3), 50.0).unwrap();
//!
//! assert!(is_within_zone(Coordinate::new(45.4, 51.3), &zone));
//! assert!(!is_within_zone(Coordinate::new(45.409, 51.3), &zone));
//!
//! let d = distance(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
//! assert!((d - 111_195.0).abs() < 1_112.0);
//! ```

pub mod config;
pub mod core;
pub mod feed;
pub mod session;
pub mod view;

// Re-export commonly used types
pub use config::SessionConfig;
pub use crate::core::{distance, is_within_zone, Coordinate, GeofenceZone, LocationSample};
pub use feed::{LocationFeed, Subscription};
pub use session::{SessionController, SessionError, SessionPhase, SessionState};
pub use view::RenderModel;
