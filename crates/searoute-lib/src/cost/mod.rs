//! Fuel cost model used as the search edge weight.
//!
//! A segment's cost in litres is
//!
//! ```text
//! base_fuel_per_km * distance_km * fuel_weight
//!     * max(0.1, 1 + w * (wind + current + wave + rain + ice) + depth + polar)
//!     * clamp(design_speed / effective_speed, 1, 10)
//! ```
//!
//! where `w` is the strategy's weather weight. Missing depth short-circuits
//! to a flat `5 * base_fuel_per_km * distance_km * fuel_weight`, and a
//! destination inside a no-go zone multiplies the result by 100.
//!
//! - [`constants`] - physical constants and tuning coefficients
//! - [`penalties`] - the independent penalty terms

pub mod constants;
pub mod penalties;

use serde::{Deserialize, Serialize};

use crate::environment::EnvironmentalSample;
use crate::geo::{bearing_deg, haversine_km, mps_to_kmh, speed_along_heading, LatLng};
use crate::vessel::VesselParams;
use crate::zones::{in_any_zone, NoGoZone};

use constants::*;
use penalties::RelativeAspect;

/// Per-strategy weights applied to the cost model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyWeights {
    /// Scale for the weather-derived terms (wind, current, wave, rain, ice).
    pub weather_penalty_weight: f64,
    pub fuel_weight: f64,
}

impl StrategyWeights {
    pub const FASTEST: Self = Self {
        weather_penalty_weight: 0.2,
        fuel_weight: 1.0,
    };
    pub const BALANCED: Self = Self {
        weather_penalty_weight: 1.0,
        fuel_weight: 1.0,
    };
    pub const SAFEST: Self = Self {
        weather_penalty_weight: 5.0,
        fuel_weight: 1.0,
    };
}

impl Default for StrategyWeights {
    fn default() -> Self {
        Self::BALANCED
    }
}

/// Individual penalty contributions for one segment, before weighting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PenaltyBreakdown {
    pub wind: f64,
    pub current: f64,
    pub wave: f64,
    pub rain: f64,
    pub ice: f64,
    pub depth: f64,
    pub polar: f64,
}

impl PenaltyBreakdown {
    /// Sum of the terms scaled by the weather weight.
    pub fn weather(&self) -> f64 {
        self.wind + self.current + self.wave + self.rain + self.ice
    }

    /// Combined cost multiplier, floored at [`COST_MULTIPLIER_FLOOR`].
    pub fn multiplier(&self, weather_weight: f64) -> f64 {
        let raw = 1.0 + weather_weight * self.weather() + self.depth + self.polar;
        if raw.is_nan() {
            return f64::INFINITY;
        }
        raw.max(COST_MULTIPLIER_FLOOR)
    }
}

/// Priced segment between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentCost {
    /// Fuel in litres; may be `+inf` when the segment is not traversable.
    pub fuel: f64,
    pub distance_km: f64,
    /// Effective speed over ground in km/h.
    pub speed_kmh: f64,
    pub time_h: f64,
    /// Total factor applied on top of `base_fuel_per_km * distance_km`.
    pub multiplier: f64,
}

impl SegmentCost {
    pub fn zero() -> Self {
        Self {
            fuel: 0.0,
            distance_km: 0.0,
            speed_kmh: 0.0,
            time_h: 0.0,
            multiplier: 0.0,
        }
    }

    /// Apply a surcharge to fuel without touching distance or time.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            fuel: self.fuel * factor,
            multiplier: self.multiplier * factor,
            ..self
        }
    }
}

/// Strategy-weighted cost model for one vessel.
///
/// Cheap to clone; every strategy search gets its own instance.
#[derive(Debug, Clone)]
pub struct FuelCostModel {
    vessel: VesselParams,
    weights: StrategyWeights,
    zones: Vec<NoGoZone>,
    base_fuel_per_km: f64,
}

impl FuelCostModel {
    pub fn new(vessel: &VesselParams, weights: StrategyWeights) -> Self {
        Self {
            base_fuel_per_km: base_fuel_per_km(vessel),
            vessel: vessel.clone(),
            weights,
            zones: Vec::new(),
        }
    }

    /// Price segments ending inside any of `zones` at [`NO_GO_MULTIPLIER`] times their cost.
    pub fn with_no_go_zones(mut self, zones: Vec<NoGoZone>) -> Self {
        self.zones = zones;
        self
    }

    pub fn vessel(&self) -> &VesselParams {
        &self.vessel
    }

    pub fn weights(&self) -> StrategyWeights {
        self.weights
    }

    pub fn no_go_zones(&self) -> &[NoGoZone] {
        &self.zones
    }

    pub fn base_fuel_per_km(&self) -> f64 {
        self.base_fuel_per_km
    }

    /// Unweighted penalty terms for travelling on `heading_deg` through `sample` at `lat`.
    ///
    /// Missing weather fields contribute nothing; missing depth is handled
    /// by [`FuelCostModel::segment_cost`] before this is reached.
    pub fn penalties(&self, heading_deg: f64, lat: f64, sample: &EnvironmentalSample) -> PenaltyBreakdown {
        let vessel = &self.vessel;
        let aspect = wave_aspect(heading_deg, sample);

        let wind = match (sample.wind_speed_mps, sample.wind_direction_deg) {
            (Some(speed), Some(from)) => penalties::wind_penalty(vessel, heading_deg, speed, from),
            _ => 0.0,
        };
        let current = match (sample.current_speed_mps, sample.current_direction_deg) {
            (Some(speed), Some(to)) => penalties::current_penalty(vessel, heading_deg, speed, to),
            _ => 0.0,
        };
        let wave = sample
            .waves_height_m
            .map_or(0.0, |h| penalties::wave_penalty(vessel, aspect, h));
        let rain = sample
            .weekly_precip_mean
            .map_or(0.0, |p| penalties::rain_penalty(vessel, p));
        let ice = sample
            .ice_conc
            .map_or(0.0, |c| penalties::ice_penalty(vessel, c));
        let depth = sample
            .depth
            .map_or(0.0, |d| penalties::depth_penalty(d, vessel.draft));

        PenaltyBreakdown {
            wind,
            current,
            wave,
            rain,
            ice,
            depth,
            polar: penalties::polar_penalty(lat),
        }
    }

    /// Speed over ground in km/h after waves, ice, squat and current, floored at 0.5 km/h.
    pub fn effective_speed(&self, heading_deg: f64, sample: &EnvironmentalSample) -> f64 {
        let mut speed = self.vessel.speed_kmh();

        if let Some(h) = sample.waves_height_m {
            speed *= penalties::wave_speed_factor(wave_aspect(heading_deg, sample), h);
        }
        if let Some(conc) = sample.ice_conc {
            speed *= penalties::ice_speed_factor(conc);
        }
        if let Some(depth) = sample.depth {
            speed *= penalties::squat_speed_factor(depth, self.vessel.draft);
        }

        if let (Some(current), Some(to)) = (sample.current_speed_mps, sample.current_direction_deg) {
            if current > 0.0 {
                speed = speed_along_heading(speed, heading_deg, mps_to_kmh(current), to);
            }
        }

        if speed.is_nan() {
            return MIN_EFFECTIVE_SPEED_KMH;
        }
        speed.max(MIN_EFFECTIVE_SPEED_KMH)
    }

    /// Fuel, time and speed for travelling from `from` to `to` through `sample`.
    ///
    /// `sample` describes conditions at `to`. A zero-length segment costs
    /// exactly zero.
    pub fn segment_cost(&self, from: LatLng, to: LatLng, sample: &EnvironmentalSample) -> SegmentCost {
        let distance_km = haversine_km(from, to);
        if distance_km == 0.0 {
            return SegmentCost::zero();
        }

        let heading = bearing_deg(from, to);
        let speed_kmh = self.effective_speed(heading, sample);
        let time_h = distance_km / speed_kmh;
        let base = self.base_fuel_per_km * distance_km * self.weights.fuel_weight;

        let cost = if sample.depth.is_none() {
            SegmentCost {
                fuel: base * MISSING_DEPTH_MULTIPLIER,
                distance_km,
                speed_kmh,
                time_h,
                multiplier: MISSING_DEPTH_MULTIPLIER,
            }
        } else {
            let penalties = self.penalties(heading, to.lat, sample);
            let multiplier = penalties.multiplier(self.weights.weather_penalty_weight)
                * speed_adjustment(self.vessel.speed_kmh(), speed_kmh);
            SegmentCost {
                fuel: base * multiplier,
                distance_km,
                speed_kmh,
                time_h,
                multiplier,
            }
        };

        if in_any_zone(&self.zones, to) {
            cost.scaled(NO_GO_MULTIPLIER)
        } else {
            cost
        }
    }

    /// Smallest fuel per km any segment can cost under these weights.
    ///
    /// Only current and following seas can push the multiplier below one,
    /// and together they cannot take more than
    /// `CURRENT_PENALTY_SCALE - WAVE_FOLLOWING_FLOOR` off it.
    pub fn lower_bound_cost_per_km(&self) -> f64 {
        let max_relief = CURRENT_PENALTY_SCALE - WAVE_FOLLOWING_FLOOR;
        let min_multiplier =
            (1.0 - self.weights.weather_penalty_weight * max_relief).max(COST_MULTIPLIER_FLOOR);
        self.base_fuel_per_km * self.weights.fuel_weight * min_multiplier
    }
}

/// `(hp_req * 0.95 * fuel_rate * weight_factor * corrections) / speed_kmh`, or `+inf` for a stationary vessel.
pub fn base_fuel_per_km(vessel: &VesselParams) -> f64 {
    let speed_kmh = vessel.speed_kmh();
    if speed_kmh <= 0.0 || speed_kmh.is_nan() {
        return f64::INFINITY;
    }
    vessel.hp_req
        * PROPULSION_EFFICIENCY
        * vessel.fuel_rate
        * vessel.weight_factor()
        * vessel.correction_factor()
        / speed_kmh
}

/// Fuel surcharge for transiting slower than design speed.
pub fn speed_adjustment(design_kmh: f64, effective_kmh: f64) -> f64 {
    (design_kmh / effective_kmh).clamp(1.0, MAX_SPEED_ADJUSTMENT)
}

// waves are taken to run with the wind; beam seas when direction is unknown
fn wave_aspect(heading_deg: f64, sample: &EnvironmentalSample) -> RelativeAspect {
    sample
        .wind_direction_deg
        .map_or(RelativeAspect::Beam, |from| {
            RelativeAspect::classify(from, heading_deg)
        })
}
