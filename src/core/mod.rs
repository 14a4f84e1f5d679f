//! Pure core: coordinates, geofence evaluation, and phase bookkeeping.
//!
//! Nothing in this module performs I/O. The session controller in
//! [`crate::session`] is the imperative shell around it.

mod coordinate;
mod distance;
mod history;
mod state;
mod zone;

pub use coordinate::{Coordinate, LocationSample};
pub use distance::{destination, distance, EARTH_RADIUS_KM};
pub use history::{StateHistory, StateTransition};
pub use state::State;
pub use zone::{
    is_within_zone, GeofenceZone, Membership, ZoneError, DEFAULT_RADIUS_M, DEFAULT_TARGET,
};
