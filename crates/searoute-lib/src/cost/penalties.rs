//! Independent dimensionless penalty terms.
//!
//! Every function here is pure and returns an additive contribution to the
//! segment cost multiplier. Weather terms are later scaled by the strategy's
//! weather weight; depth and polar terms never are.

use serde::Serialize;

use crate::geo::{knots_to_mps, mps_to_kmh, normalize_deg, speed_along_heading};
use crate::vessel::VesselParams;

use super::constants::*;

/// Where wind or waves meet the hull, relative to the heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeAspect {
    Head,
    Beam,
    Following,
}

impl RelativeAspect {
    /// Classify a "from" bearing against the ship's heading.
    pub fn classify(from_deg: f64, heading_deg: f64) -> Self {
        let delta = normalize_deg(from_deg - heading_deg);
        if delta <= 45.0 || delta >= 315.0 {
            RelativeAspect::Head
        } else if (135.0..=225.0).contains(&delta) {
            RelativeAspect::Following
        } else {
            RelativeAspect::Beam
        }
    }
}

/// Added power for wind drag on the superstructure, relative to baseline propulsion power.
pub fn wind_penalty(vessel: &VesselParams, heading_deg: f64, wind_mps: f64, wind_from_deg: f64) -> f64 {
    if wind_mps <= 0.0 {
        return 0.0;
    }

    let ship_mps = knots_to_mps(vessel.speed);
    let aspect = RelativeAspect::classify(wind_from_deg, heading_deg);
    let air_draft = AIR_DRAFT_RATIO * vessel.ship_length;

    let (relative_mps, area, drag_coeff) = match aspect {
        RelativeAspect::Head => (ship_mps + wind_mps, vessel.beam * air_draft, DRAG_COEFF_FRONTAL),
        RelativeAspect::Following => (
            (ship_mps - wind_mps).abs(),
            vessel.beam * air_draft,
            DRAG_COEFF_FRONTAL,
        ),
        RelativeAspect::Beam => (
            ship_mps.hypot(wind_mps),
            vessel.ship_length * air_draft,
            DRAG_COEFF_LATERAL,
        ),
    };

    let drag_n = 0.5 * AIR_DENSITY_KG_M3 * drag_coeff * area * relative_mps.powi(2);
    let required_w = drag_n * ship_mps;
    let baseline_w = vessel.hp_req * WATTS_PER_HP * PROPULSION_EFFICIENCY;
    required_w / baseline_w
}

/// Relative speed loss from current, `+inf` when current cancels or reverses
/// progress along the heading.
///
/// `current_to_deg` is the bearing the current flows towards.
pub fn current_penalty(
    vessel: &VesselParams,
    heading_deg: f64,
    current_mps: f64,
    current_to_deg: f64,
) -> f64 {
    if current_mps <= 0.0 {
        return 0.0;
    }
    let design_kmh = vessel.speed_kmh();
    let sog_kmh =
        speed_along_heading(design_kmh, heading_deg, mps_to_kmh(current_mps), current_to_deg);
    if sog_kmh < MIN_PROGRESS_KMH {
        return f64::INFINITY;
    }
    (design_kmh / sog_kmh - 1.0) * CURRENT_PENALTY_SCALE
}

/// Added resistance in waves meeting the hull at `aspect`.
pub fn wave_penalty(vessel: &VesselParams, aspect: RelativeAspect, wave_height_m: f64) -> f64 {
    if wave_height_m <= 0.0 {
        return 0.0;
    }
    let size_coeff =
        (vessel.beam / vessel.ship_length) * (vessel.displacement() / WAVE_DISPLACEMENT_SCALE);
    let speed_ratio = (vessel.speed / WAVE_REFERENCE_SPEED_KN).powi(2);
    let raw = wave_height_m * size_coeff * speed_ratio;

    match aspect {
        RelativeAspect::Head => raw * WAVE_HEAD_FACTOR,
        RelativeAspect::Beam => raw * WAVE_BEAM_FACTOR,
        RelativeAspect::Following => (raw * WAVE_FOLLOWING_FACTOR).max(WAVE_FOLLOWING_FLOOR),
    }
}

/// Precipitation penalty, or [`BLOCKED_PENALTY`] when the regime is not navigable.
pub fn rain_penalty(vessel: &VesselParams, weekly_precip_mm: f64) -> f64 {
    if weekly_precip_mm <= 0.0 {
        return 0.0;
    }
    let raw = RAIN_COEFFICIENT
        * weekly_precip_mm
        * (REFERENCE_DISPLACEMENT_T / vessel.displacement()).sqrt();
    if raw > RAIN_BLOCK_THRESHOLD {
        return BLOCKED_PENALTY;
    }
    raw.clamp(RAIN_PENALTY_MIN, RAIN_PENALTY_MAX)
}

/// One concentration band of the ice classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IceBand {
    pub name: &'static str,
    pub min_conc: f64,
    pub max_conc: f64,
    pub navigable: bool,
    /// Severity at `min_conc`.
    pub base: f64,
    /// Severity at `max_conc`.
    pub peak: f64,
}

/// WMO-style concentration bands, ordered by concentration.
pub const ICE_BANDS: [IceBand; 5] = [
    IceBand {
        name: "open water",
        min_conc: 0.0,
        max_conc: 0.1,
        navigable: true,
        base: 0.0,
        peak: 0.05,
    },
    IceBand {
        name: "very open drift",
        min_conc: 0.1,
        max_conc: 0.4,
        navigable: true,
        base: 0.05,
        peak: 0.3,
    },
    IceBand {
        name: "open drift",
        min_conc: 0.4,
        max_conc: 0.7,
        navigable: true,
        base: 0.3,
        peak: 0.9,
    },
    IceBand {
        name: "close pack",
        min_conc: 0.7,
        max_conc: 0.9,
        navigable: true,
        base: 0.9,
        peak: 2.0,
    },
    IceBand {
        name: "consolidated pack",
        min_conc: 0.9,
        max_conc: 1.0,
        navigable: false,
        base: ICE_PENALTY_MAX,
        peak: ICE_PENALTY_MAX,
    },
];

/// Band containing `conc`; the last band is closed at 1.0.
pub fn ice_band(conc: f64) -> &'static IceBand {
    let conc = conc.clamp(0.0, 1.0);
    ICE_BANDS
        .iter()
        .find(|band| conc < band.max_conc)
        .unwrap_or(&ICE_BANDS[ICE_BANDS.len() - 1])
}

/// Ice penalty interpolated within its band and scaled for vessel size, in `[0, 3]`.
pub fn ice_penalty(vessel: &VesselParams, conc: f64) -> f64 {
    if conc <= 0.0 || conc.is_nan() {
        return 0.0;
    }
    let band = ice_band(conc);
    if !band.navigable {
        return ICE_PENALTY_MAX;
    }
    let span = band.max_conc - band.min_conc;
    let t = ((conc - band.min_conc) / span).clamp(0.0, 1.0);
    let severity = band.base + (band.peak - band.base) * t;
    let scale = (REFERENCE_DISPLACEMENT_T / vessel.displacement()).sqrt();
    (severity * scale).clamp(0.0, ICE_PENALTY_MAX)
}

/// Under-keel clearance penalty from the depth/draft ratio.
pub fn depth_penalty(depth_m: f64, draft_m: f64) -> f64 {
    let ratio = depth_m / draft_m;
    if ratio > DEPTH_SAFE_RATIO {
        0.0
    } else if ratio < DEPTH_GROUNDING_RATIO || ratio.is_nan() {
        BLOCKED_PENALTY
    } else {
        (1.0 / (ratio - 1.0)).min(DEPTH_PENALTY_CAP)
    }
}

/// Penalty rising linearly from zero at [`POLAR_START_LAT`] to [`POLAR_PENALTY_MAX`] at the poles.
pub fn polar_penalty(lat: f64) -> f64 {
    let abs_lat = lat.abs().min(90.0);
    if abs_lat <= POLAR_START_LAT {
        return 0.0;
    }
    POLAR_PENALTY_MAX * (abs_lat - POLAR_START_LAT) / (90.0 - POLAR_START_LAT)
}

/// Speed lost to waves, as a factor on calm-water speed.
pub fn wave_speed_factor(aspect: RelativeAspect, wave_height_m: f64) -> f64 {
    let h = wave_height_m.max(0.0);
    match aspect {
        RelativeAspect::Head => 1.0 - (0.05 * h).min(0.5),
        RelativeAspect::Beam => 1.0 - (0.025 * h).min(0.3),
        RelativeAspect::Following => 1.0 - (0.005 * h).min(0.05),
    }
}

/// Speed lost to ice resistance.
pub fn ice_speed_factor(conc: f64) -> f64 {
    let c = conc.clamp(0.0, 1.0);
    1.0 - c * c
}

/// Shallow-water squat speed restriction from the depth/draft ratio.
pub fn squat_speed_factor(depth_m: f64, draft_m: f64) -> f64 {
    let ratio = depth_m / draft_m;
    if ratio < 1.2 {
        0.2
    } else if ratio < 1.5 {
        0.6
    } else if ratio < 3.0 {
        0.9
    } else {
        1.0
    }
}
