//! Physical descriptor of a ship.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geo::knots_to_kmh;

/// Share of the load/baseline-weight ratio added to the fuel weight factor.
pub const LOAD_WEIGHT_COEFFICIENT: f64 = 0.5;

fn unit_factor() -> f64 {
    1.0
}

/// Ship parameters, constant for one route computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VesselParams {
    /// Calm-water design speed in knots.
    pub speed: f64,
    /// Draft in metres.
    pub draft: f64,
    /// Beam in metres.
    pub beam: f64,
    /// Length overall in metres.
    pub ship_length: f64,
    /// Rated propulsion power in horsepower.
    pub hp_req: f64,
    /// Fuel consumption factor in L per hp-hour equivalent.
    pub fuel_rate: f64,
    /// Lightship weight in tonnes.
    pub base_weight: f64,
    /// Carried load in tonnes.
    #[serde(default)]
    pub load: f64,
    #[serde(default = "unit_factor")]
    pub hull_factor: f64,
    #[serde(default = "unit_factor")]
    pub fouling_factor: f64,
    #[serde(default = "unit_factor")]
    pub sea_state_factor: f64,
}

impl VesselParams {
    /// Load parameters from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let params: Self = serde_json::from_reader(file)?;
        params.validate()?;
        Ok(params)
    }

    /// Validate that every parameter is physically meaningful.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            (self.speed, "speed"),
            (self.draft, "draft"),
            (self.beam, "beam"),
            (self.ship_length, "shipLength"),
            (self.hp_req, "hpReq"),
            (self.fuel_rate, "fuelRate"),
            (self.base_weight, "baseWeight"),
            (self.hull_factor, "hullFactor"),
            (self.fouling_factor, "foulingFactor"),
            (self.sea_state_factor, "seaStateFactor"),
        ];

        for (value, field) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidVessel {
                    message: format!("{field} must be a finite positive number, got {value}"),
                });
            }
        }

        if !self.load.is_finite() || self.load < 0.0 {
            return Err(Error::InvalidVessel {
                message: format!("load must be finite and non-negative, got {}", self.load),
            });
        }

        Ok(())
    }

    /// Total mass in tonnes (lightship plus load).
    pub fn displacement(&self) -> f64 {
        self.base_weight + self.load
    }

    /// Fuel multiplier for carried load relative to lightship weight.
    pub fn weight_factor(&self) -> f64 {
        1.0 + LOAD_WEIGHT_COEFFICIENT * (self.load / self.base_weight)
    }

    pub fn speed_kmh(&self) -> f64 {
        knots_to_kmh(self.speed)
    }

    /// Combined hull, fouling and sea-state correction.
    pub fn correction_factor(&self) -> f64 {
        self.hull_factor * self.fouling_factor * self.sea_state_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_vessel;

    #[test]
    fn displacement_and_weight_factor() {
        let vessel = sample_vessel();
        assert_eq!(vessel.displacement(), 50_000.0);
        assert!((vessel.weight_factor() - 1.75).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_speed() {
        let vessel = VesselParams {
            speed: 0.0,
            ..sample_vessel()
        };
        let err = vessel.validate().unwrap_err();
        assert!(err.to_string().contains("speed"));
    }

    #[test]
    fn rejects_negative_load() {
        let vessel = VesselParams {
            load: -1.0,
            ..sample_vessel()
        };
        assert!(matches!(vessel.validate(), Err(Error::InvalidVessel { .. })));
    }

    #[test]
    fn correction_factors_default_to_one() {
        let json = r#"{"speed": 12, "draft": 8, "beam": 20, "shipLength": 150,
                       "hpReq": 9000, "fuelRate": 0.18, "baseWeight": 8000, "load": 4000}"#;
        let vessel: VesselParams = serde_json::from_str(json).unwrap();
        assert_eq!(vessel.correction_factor(), 1.0);
        vessel.validate().unwrap();
    }
}
