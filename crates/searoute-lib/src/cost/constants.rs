//! Physical constants and tuning coefficients of the fuel cost model.

/// Share of rated power converted to thrust in the baseline fuel figure.
pub const PROPULSION_EFFICIENCY: f64 = 0.95;

/// Watts per mechanical horsepower.
pub const WATTS_PER_HP: f64 = 745.7;

/// Air density at sea level in kg/m³.
pub const AIR_DENSITY_KG_M3: f64 = 1.225;

/// Drag coefficient for wind on the bow or stern.
pub const DRAG_COEFF_FRONTAL: f64 = 0.8;

/// Drag coefficient for wind on the beam.
pub const DRAG_COEFF_LATERAL: f64 = 1.0;

/// Height of the above-water profile as a fraction of ship length.
pub const AIR_DRAFT_RATIO: f64 = 0.12;

/// Scale applied to the relative speed loss caused by current.
pub const CURRENT_PENALTY_SCALE: f64 = 0.35;

/// Speed over ground (km/h) below which current is treated as cancelling all progress.
pub const MIN_PROGRESS_KMH: f64 = 1e-3;

/// Reference speed (knots) for the wave added-resistance speed ratio.
pub const WAVE_REFERENCE_SPEED_KN: f64 = 10.0;

/// Displacement divisor in the wave size coefficient.
pub const WAVE_DISPLACEMENT_SCALE: f64 = 1.0e5;

pub const WAVE_HEAD_FACTOR: f64 = 1.0;
pub const WAVE_BEAM_FACTOR: f64 = 0.5;
pub const WAVE_FOLLOWING_FACTOR: f64 = -0.1;

/// Most negative contribution following seas can make.
pub const WAVE_FOLLOWING_FLOOR: f64 = -0.05;

/// Rain penalty per mm/week of mean precipitation for the reference displacement.
pub const RAIN_COEFFICIENT: f64 = 0.002;
pub const RAIN_PENALTY_MIN: f64 = 0.05;
pub const RAIN_PENALTY_MAX: f64 = 0.30;

/// Raw rain penalty above which the regime is treated as not navigable.
pub const RAIN_BLOCK_THRESHOLD: f64 = 0.5;

/// Displacement (tonnes) at which rain and ice penalties are unscaled.
pub const REFERENCE_DISPLACEMENT_T: f64 = 10_000.0;

pub const ICE_PENALTY_MAX: f64 = 3.0;

/// Depth/draft ratio above which depth has no effect.
pub const DEPTH_SAFE_RATIO: f64 = 5.0;

/// Depth/draft ratio below which grounding risk dominates.
pub const DEPTH_GROUNDING_RATIO: f64 = 1.2;

pub const DEPTH_PENALTY_CAP: f64 = 1.0;

/// Flat penalty for blocked regimes (grounding risk, impassable rain).
pub const BLOCKED_PENALTY: f64 = 5.0;

/// Cost multiplier applied when depth data is missing.
pub const MISSING_DEPTH_MULTIPLIER: f64 = 5.0;

/// Cost multiplier for entering a no-go zone.
pub const NO_GO_MULTIPLIER: f64 = 100.0;

/// Latitude (absolute degrees) where the polar penalty starts.
pub const POLAR_START_LAT: f64 = 60.0;
pub const POLAR_PENALTY_MAX: f64 = 1.0;

/// Lower bound on the combined cost multiplier.
pub const COST_MULTIPLIER_FLOOR: f64 = 0.1;

/// Floor on effective speed over ground, km/h.
pub const MIN_EFFECTIVE_SPEED_KMH: f64 = 0.5;

/// Upper bound on the slow-transit fuel adjustment.
pub const MAX_SPEED_ADJUSTMENT: f64 = 10.0;

/// Cost multiplier for the final step onto a land goal cell during search.
pub const LAND_TRANSIT_MULTIPLIER: f64 = 10.0;
