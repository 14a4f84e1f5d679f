//! Render model handed to the host's map widget.
//!
//! The view is purely presentational: it receives a [`RenderModel`] after
//! every state change and draws it. [`MapScene`] spells out the markers and
//! the zone overlay so that every host draws the same screen.

use crate::core::{Coordinate, GeofenceZone};
use crate::session::SessionState;
use serde::{Deserialize, Serialize};

/// Status shown before any position is known.
pub const WAITING_TEXT: &str = "Waiting..";

/// Zoom of the initial map region, in degrees per axis.
pub const REGION_DELTA_DEG: f64 = 0.005;

pub const USER_MARKER_TITLE: &str = "Your Location";
pub const TARGET_MARKER_TITLE: &str = "Target Location";
pub const TARGET_PIN_COLOR: &str = "green";
pub const ZONE_FILL_COLOR: &str = "rgba(0, 255, 0, 0.2)";
pub const ZONE_STROKE_COLOR: &str = "green";

/// Everything the view needs for one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RenderModel {
    /// Error message, the current position as JSON, or [`WAITING_TEXT`]
    pub status_text: String,
    pub current_position: Option<Coordinate>,
    pub zone: Option<GeofenceZone>,
    pub is_within: bool,
    /// Distance from the current position to the zone center
    pub distance_m: Option<f64>,
}

impl RenderModel {
    pub fn from_state(state: &SessionState, zone: &GeofenceZone) -> Self {
        let fix = state.fix();
        let status_text = match (state.error_message(), fix) {
            (Some(message), _) => message.to_string(),
            (None, Some(fix)) => position_text(fix.sample.coordinate),
            (None, None) => WAITING_TEXT.to_string(),
        };

        Self {
            status_text,
            current_position: fix.map(|f| f.sample.coordinate),
            zone: Some(*zone),
            is_within: fix.is_some_and(|f| f.is_within()),
            distance_m: fix.map(|f| f.membership.distance_m),
        }
    }

    pub fn membership_label(&self) -> String {
        format!(
            "Is within Geofence: {}",
            if self.is_within { "Yes" } else { "No" }
        )
    }

    /// The map to draw, present only once a position is known.
    pub fn scene(&self) -> Option<MapScene> {
        let position = self.current_position?;

        let mut markers = vec![Marker {
            coordinate: position,
            title: USER_MARKER_TITLE.to_string(),
            pin_color: None,
        }];
        let mut circle = None;

        if let Some(zone) = self.zone {
            markers.push(Marker {
                coordinate: zone.center(),
                title: TARGET_MARKER_TITLE.to_string(),
                pin_color: Some(TARGET_PIN_COLOR.to_string()),
            });
            circle = Some(CircleOverlay {
                center: zone.center(),
                radius_m: zone.radius_m(),
                fill_color: ZONE_FILL_COLOR.to_string(),
                stroke_color: ZONE_STROKE_COLOR.to_string(),
            });
        }

        Some(MapScene {
            region: MapRegion {
                center: position,
                latitude_delta: REGION_DELTA_DEG,
                longitude_delta: REGION_DELTA_DEG,
            },
            markers,
            circle,
        })
    }
}

/// Non-finite components render as `null`.
fn position_text(coordinate: Coordinate) -> String {
    serde_json::to_string(&coordinate).unwrap_or_default()
}

/// Visible map area.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinate,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub coordinate: Coordinate,
    pub title: String,
    /// Platform default when `None`
    pub pin_color: Option<String>,
}

/// Filled circle drawn around the zone center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CircleOverlay {
    pub center: Coordinate,
    pub radius_m: f64,
    pub fill_color: String,
    pub stroke_color: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapScene {
    pub region: MapRegion,
    pub markers: Vec<Marker>,
    pub circle: Option<CircleOverlay>,
}
