//! In-memory environmental raster for a padded bounding box.
//!
//! # Payload format
//!
//! ```text
//! u32 (big-endian)   length of the JSON metadata block
//! JSON metadata      {"lats": [..], "lons": [..],
//!                     "variables": [{"name", "shape": [rows, cols],
//!                                    "dtype": "float64", "byte_length"}]}
//! layer bytes        little-endian f64 values, one block per variable in
//!                    metadata order, row-major over (lat, lon)
//! ```
//!
//! Missing values are encoded as [`NO_DATA`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

use super::{EnvironmentalField, EnvironmentalSample};

/// Sentinel written by the data service for "no data" (and for land depth).
pub const NO_DATA: f64 = -9999.0;

/// Values at or above this magnitude are NetCDF fill values rather than data.
const FILL_VALUE_THRESHOLD: f64 = 1.0e15;

const LAYER_DEPTH: &str = "depth";
const LAYER_WIND_SPEED: &str = "wind_speed_mps";
const LAYER_WIND_DIRECTION: &str = "wind_direction_deg";
const LAYER_CURRENT_SPEED: &str = "current_speed_mps";
const LAYER_CURRENT_DIRECTION: &str = "current_direction_deg";
const LAYER_WAVES: &str = "waves_height_m";
const LAYER_PRECIP: &str = "weekly_precip_mean";
const LAYER_ICE: &str = "ice_conc";
const LAYER_ICE_ALIAS: &str = "ice_coverage";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SnapshotMetadata {
    lats: Vec<f64>,
    lons: Vec<f64>,
    variables: Vec<VariableMetadata>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct VariableMetadata {
    name: String,
    shape: Vec<usize>,
    dtype: String,
    byte_length: usize,
}

/// Monotonic coordinate axis supporting nearest-index lookup.
#[derive(Debug, Clone)]
struct Axis {
    values: Vec<f64>,
    ascending: bool,
}

impl Axis {
    fn new(values: Vec<f64>) -> Self {
        let ascending = values.first() <= values.last();
        Self { values, ascending }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn nearest(&self, target: f64) -> Option<usize> {
        if self.values.is_empty() || !target.is_finite() {
            return None;
        }
        let upper = if self.ascending {
            self.values.partition_point(|&v| v < target)
        } else {
            self.values.partition_point(|&v| v > target)
        };
        if upper == 0 {
            return Some(0);
        }
        if upper >= self.values.len() {
            return Some(self.values.len() - 1);
        }
        let below = (self.values[upper - 1] - target).abs();
        let above = (self.values[upper] - target).abs();
        Some(if below <= above { upper - 1 } else { upper })
    }

    /// Like [`Self::nearest`], but first brings `lng` into the axis's own
    /// convention (`-180..180` or `0..360`) by whole turns.
    fn nearest_longitude(&self, lng: f64) -> Option<usize> {
        let (&first, &last) = (self.values.first()?, self.values.last()?);
        let (lo, hi) = (first.min(last), first.max(last));
        let target = if lng.is_finite() && !(lo..=hi).contains(&lng) {
            lo + (lng - lo).rem_euclid(360.0)
        } else {
            lng
        };
        self.nearest(target)
    }
}

/// Prefetched environmental raster served from memory during search.
#[derive(Debug, Clone)]
pub struct EnvironmentSnapshot {
    lats: Axis,
    lons: Axis,
    layers: HashMap<String, Vec<f64>>,
}

impl EnvironmentSnapshot {
    /// Empty snapshot over the given axes; add data with [`Self::with_layer`].
    pub fn new(lats: Vec<f64>, lons: Vec<f64>) -> Result<Self> {
        if lats.is_empty() || lons.is_empty() {
            return Err(Error::MalformedSnapshot {
                message: "lat/lon axes must not be empty".to_string(),
            });
        }
        if lats.iter().chain(lons.iter()).any(|v| !v.is_finite()) {
            return Err(Error::MalformedSnapshot {
                message: "lat/lon axes must be finite".to_string(),
            });
        }
        Ok(Self {
            lats: Axis::new(lats),
            lons: Axis::new(lons),
            layers: HashMap::new(),
        })
    }

    /// Attach a row-major `(lat, lon)` layer.
    pub fn with_layer(mut self, name: impl Into<String>, values: Vec<f64>) -> Result<Self> {
        let name = name.into();
        let expected = self.lats.len() * self.lons.len();
        if values.len() != expected {
            return Err(Error::MalformedSnapshot {
                message: format!(
                    "layer {name} has {} values, expected {expected}",
                    values.len()
                ),
            });
        }
        self.layers.insert(name, values);
        Ok(self)
    }

    /// Names of the layers present, sorted.
    pub fn layer_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.layers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Load a snapshot payload from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&bytes)
    }

    /// Decode the data service's hybrid JSON/binary payload.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (len_bytes, rest) = bytes.split_first_chunk::<4>().ok_or_else(|| malformed(
            "payload shorter than the 4-byte metadata header",
        ))?;
        let meta_len = u32::from_be_bytes(*len_bytes) as usize;
        if rest.len() < meta_len {
            return Err(malformed(format!(
                "metadata length {meta_len} exceeds payload size {}",
                rest.len()
            )));
        }
        let (meta_bytes, mut data) = rest.split_at(meta_len);
        let metadata: SnapshotMetadata = serde_json::from_slice(meta_bytes)?;

        let mut snapshot = Self::new(metadata.lats, metadata.lons)?;
        let rows = snapshot.lats.len();
        let cols = snapshot.lons.len();

        for variable in metadata.variables {
            if variable.dtype != "float64" {
                return Err(malformed(format!(
                    "variable {} has unsupported dtype {}",
                    variable.name, variable.dtype
                )));
            }
            if variable.shape != [rows, cols] {
                return Err(malformed(format!(
                    "variable {} has shape {:?}, expected [{rows}, {cols}]",
                    variable.name, variable.shape
                )));
            }
            if variable.byte_length != rows * cols * 8 || data.len() < variable.byte_length {
                return Err(malformed(format!(
                    "variable {} declares {} bytes but {} remain for {} cells",
                    variable.name,
                    variable.byte_length,
                    data.len(),
                    rows * cols
                )));
            }
            let (chunk, tail) = data.split_at(variable.byte_length);
            data = tail;
            let values = chunk
                .chunks_exact(8)
                .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
                .collect();
            snapshot = snapshot.with_layer(variable.name, values)?;
        }

        if !data.is_empty() {
            return Err(malformed(format!("{} trailing bytes after layers", data.len())));
        }

        debug!(
            rows,
            cols,
            layers = snapshot.layers.len(),
            "decoded environmental snapshot"
        );
        Ok(snapshot)
    }

    /// Encode into the same payload layout accepted by [`Self::from_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let rows = self.lats.len();
        let cols = self.lons.len();
        let names = self.layer_names();
        let metadata = SnapshotMetadata {
            lats: self.lats.values.clone(),
            lons: self.lons.values.clone(),
            variables: names
                .iter()
                .map(|name| VariableMetadata {
                    name: (*name).to_string(),
                    shape: vec![rows, cols],
                    dtype: "float64".to_string(),
                    byte_length: rows * cols * 8,
                })
                .collect(),
        };
        let meta = serde_json::to_vec(&metadata)?;
        let meta_len = u32::try_from(meta.len())
            .map_err(|_| malformed("metadata block exceeds u32 length"))?;

        let mut out = Vec::with_capacity(4 + meta.len() + names.len() * rows * cols * 8);
        out.extend_from_slice(&meta_len.to_be_bytes());
        out.extend_from_slice(&meta);
        for name in names {
            for value in &self.layers[name] {
                out.extend_from_slice(&value.to_le_bytes());
            }
        }
        Ok(out)
    }

    fn value(&self, layer: &str, cell: usize) -> Option<f64> {
        let raw = *self.layers.get(layer)?.get(cell)?;
        if !raw.is_finite() || raw == NO_DATA || raw.abs() >= FILL_VALUE_THRESHOLD {
            return None;
        }
        Some(raw)
    }

    fn ice(&self, cell: usize) -> Option<f64> {
        let raw = self
            .value(LAYER_ICE, cell)
            .or_else(|| self.value(LAYER_ICE_ALIAS, cell))?;
        let fraction = if raw > 1.0 { raw / 100.0 } else { raw };
        Some(fraction.clamp(0.0, 1.0))
    }
}

impl EnvironmentalField for EnvironmentSnapshot {
    fn sample(&self, lat: f64, lng: f64) -> EnvironmentalSample {
        let (Some(row), Some(col)) = (self.lats.nearest(lat), self.lons.nearest_longitude(lng)) else {
            return EnvironmentalSample::default();
        };
        let cell = row * self.lons.len() + col;

        EnvironmentalSample {
            depth: self.value(LAYER_DEPTH, cell),
            wind_speed_mps: self.value(LAYER_WIND_SPEED, cell),
            wind_direction_deg: self.value(LAYER_WIND_DIRECTION, cell),
            current_speed_mps: self.value(LAYER_CURRENT_SPEED, cell),
            current_direction_deg: self.value(LAYER_CURRENT_DIRECTION, cell),
            waves_height_m: self.value(LAYER_WAVES, cell),
            weekly_precip_mean: self.value(LAYER_PRECIP, cell),
            ice_conc: self.ice(cell),
        }
    }
}

fn malformed(message: impl Into<String>) -> Error {
    Error::MalformedSnapshot {
        message: message.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> EnvironmentSnapshot {
        EnvironmentSnapshot::new(vec![10.0, 11.0], vec![20.0, 21.0, 22.0])
            .unwrap()
            .with_layer("depth", vec![50.0, NO_DATA, 70.0, 80.0, 90.0, 100.0])
            .unwrap()
            .with_layer("ice_conc", vec![0.0, 45.0, 0.2, 0.0, 0.0, 150.0])
            .unwrap()
    }

    #[test]
    fn nearest_cell_lookup() {
        let snap = snapshot();
        assert_eq!(snap.sample(10.2, 20.1).depth, Some(50.0));
        assert_eq!(snap.sample(10.9, 21.8).depth, Some(100.0));
        // clamps outside the axes
        assert_eq!(snap.sample(-5.0, 40.0).depth, Some(70.0));
    }

    #[test]
    fn longitudes_wrap_onto_a_0_to_360_axis() {
        let snap = EnvironmentSnapshot::new(vec![0.0], vec![0.0, 90.0, 180.0, 270.0])
            .unwrap()
            .with_layer("depth", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        assert_eq!(snap.sample(0.0, -90.0).depth, Some(4.0));
        assert_eq!(snap.sample(0.0, -170.0).depth, Some(3.0));
        assert_eq!(snap.sample(0.0, 95.0).depth, Some(2.0));
    }

    #[test]
    fn longitudes_wrap_onto_a_signed_axis() {
        let snap = EnvironmentSnapshot::new(vec![0.0], vec![-180.0, -90.0, 0.0, 90.0])
            .unwrap()
            .with_layer("depth", vec![1.0, 2.0, 3.0, 4.0])
            .unwrap();
        assert_eq!(snap.sample(0.0, 270.0).depth, Some(2.0));
        assert_eq!(snap.sample(0.0, 355.0).depth, Some(3.0));
    }

    #[test]
    fn no_data_sentinel_decodes_as_none() {
        let snap = snapshot();
        assert_eq!(snap.sample(10.0, 21.0).depth, None);
        assert_eq!(snap.sample(10.0, 21.0).wind_speed_mps, None);
    }

    #[test]
    fn ice_percentages_are_normalised() {
        let snap = snapshot();
        assert_eq!(snap.sample(10.0, 21.0).ice_conc, Some(0.45));
        assert_eq!(snap.sample(10.0, 22.0).ice_conc, Some(0.2));
        assert_eq!(snap.sample(11.0, 22.0).ice_conc, Some(1.0));
    }

    #[test]
    fn descending_latitude_axis() {
        let snap = EnvironmentSnapshot::new(vec![12.0, 11.0, 10.0], vec![0.0])
            .unwrap()
            .with_layer("waves_height_m", vec![3.0, 2.0, 1.0])
            .unwrap();
        assert_eq!(snap.sample(11.9, 0.0).waves_height_m, Some(3.0));
        assert_eq!(snap.sample(10.4, 0.0).waves_height_m, Some(1.0));
    }

    #[test]
    fn decodes_encoded_payload() {
        let snap = snapshot();
        let bytes = snap.to_bytes().unwrap();
        let decoded = EnvironmentSnapshot::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.layer_names(), vec!["depth", "ice_conc"]);
        assert_eq!(decoded.sample(11.0, 20.0), snap.sample(11.0, 20.0));
    }

    #[test]
    fn rejects_truncated_payloads() {
        let bytes = snapshot().to_bytes().unwrap();
        let err = EnvironmentSnapshot::from_bytes(&bytes[..bytes.len() - 8]).unwrap_err();
        assert!(matches!(err, Error::MalformedSnapshot { .. }));
        assert!(EnvironmentSnapshot::from_bytes(&[0, 0]).is_err());
    }

    #[test]
    fn rejects_layer_with_wrong_length() {
        let err = EnvironmentSnapshot::new(vec![0.0], vec![0.0, 1.0])
            .unwrap()
            .with_layer("depth", vec![1.0])
            .unwrap_err();
        assert!(err.to_string().contains("expected 2"));
    }
}
