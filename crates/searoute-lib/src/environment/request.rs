//! Prefetch request sent to the environmental data service.
//!
//! The service answers one request per route computation with a snapshot
//! covering a padded bounding box around both endpoints, taken from the
//! weekly slice that contains the voyage date.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::geo::LatLng;

/// Default padding added around the start/end box, in degrees.
pub const DEFAULT_PADDING_DEG: f64 = 5.0;

/// Axis-aligned lat/lng box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
}

impl BoundingBox {
    /// Smallest box covering both points, grown by `padding_deg` on every side
    /// and clamped to valid coordinates.
    pub fn around(a: LatLng, b: LatLng, padding_deg: f64) -> Self {
        let padding = padding_deg.max(0.0);
        Self {
            min_lat: (a.lat.min(b.lat) - padding).max(-90.0),
            min_lon: (a.lng.min(b.lng) - padding).max(-180.0),
            max_lat: (a.lat.max(b.lat) + padding).min(90.0),
            max_lon: (a.lng.max(b.lng) + padding).min(180.0),
        }
    }
}

/// Body of the data service's bounding-box request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentRequest {
    #[serde(flatten)]
    pub bounds: BoundingBox,
    /// Start of the weekly data slice (a Sunday).
    pub date: NaiveDate,
}

impl EnvironmentRequest {
    pub fn for_voyage(start: LatLng, end: LatLng, voyage_date: NaiveDate, padding_deg: f64) -> Self {
        Self {
            bounds: BoundingBox::around(start, end, padding_deg),
            date: voyage_week_start(voyage_date),
        }
    }
}

/// The Sunday on or before `date`; environmental layers are published weekly.
pub fn voyage_week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_start_snaps_back_to_sunday() {
        // 2024-03-14 is a Thursday
        assert_eq!(voyage_week_start(date(2024, 3, 14)), date(2024, 3, 10));
        assert_eq!(voyage_week_start(date(2024, 3, 10)), date(2024, 3, 10));
        assert_eq!(voyage_week_start(date(2024, 3, 16)), date(2024, 3, 10));
    }

    #[test]
    fn bounding_box_is_padded_and_clamped() {
        let bbox = BoundingBox::around(LatLng::new(88.0, -178.0), LatLng::new(80.0, -170.0), 5.0);
        assert_eq!(bbox.min_lat, 75.0);
        assert_eq!(bbox.max_lat, 90.0);
        assert_eq!(bbox.min_lon, -180.0);
        assert_eq!(bbox.max_lon, -165.0);
    }

    #[test]
    fn request_serialises_flat() {
        let request = EnvironmentRequest::for_voyage(
            LatLng::new(10.0, 20.0),
            LatLng::new(12.0, 25.0),
            date(2024, 3, 14),
            1.0,
        );
        let json = serde_json::to_value(request).unwrap();
        assert_eq!(json["min_lat"], 9.0);
        assert_eq!(json["max_lon"], 26.0);
        assert_eq!(json["date"], "2024-03-10");
    }
}
