//! Named vessel presets loaded from CSV.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::{Error, Result};

use super::params::VesselParams;

/// Maximum number of "did you mean" suggestions for an unknown preset.
const MAX_SUGGESTIONS: usize = 3;

/// Minimum normalised similarity for a name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.6;

/// Canonical column -> accepted header spellings (already normalised).
const COLUMN_SYNONYMS: &[(&str, &[&str])] = &[
    ("name", &["name", "vessel", "vesselname", "ship", "shipname"]),
    ("speed", &["speed", "speedknots", "speed_kn", "designspeed"]),
    ("draft", &["draft", "draught", "draft_m"]),
    ("beam", &["beam", "beam_m", "width"]),
    ("ship_length", &["shiplength", "ship_length", "length", "loa"]),
    ("hp_req", &["hpreq", "hp_req", "power_hp", "hp"]),
    ("fuel_rate", &["fuelrate", "fuel_rate"]),
    ("base_weight", &["baseweight", "base_weight", "lightship"]),
    ("load", &["load", "cargo", "deadweight_load"]),
    ("hull_factor", &["hullfactor", "hull_factor"]),
    ("fouling_factor", &["foulingfactor", "fouling_factor"]),
    ("sea_state_factor", &["seastatefactor", "sea_state_factor"]),
];

const REQUIRED_COLUMNS: &[&str] = &[
    "name",
    "speed",
    "draft",
    "beam",
    "ship_length",
    "hp_req",
    "fuel_rate",
    "base_weight",
];

#[derive(Debug, Clone)]
struct VesselPreset {
    name: String,
    params: VesselParams,
}

/// Collection of vessel presets keyed by case-insensitive name.
#[derive(Debug, Clone, Default)]
pub struct VesselCatalog {
    presets: HashMap<String, VesselPreset>,
    source: Option<PathBuf>,
}

impl VesselCatalog {
    /// Load a catalog from a CSV file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from any CSV reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::Fields).from_reader(reader);
        let headers = csv_reader.headers()?.clone();
        let index_map = map_columns(&headers);

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| !index_map.contains_key(c))
            .collect();
        if !missing.is_empty() {
            return Err(Error::InvalidVessel {
                message: format!(
                    "vessel catalog missing required columns: {}. Available: {}",
                    missing.join(", "),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }

        let mut presets = HashMap::new();
        // header is line 1
        for (offset, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = RowReader {
                record: &record,
                index_map: &index_map,
                line: offset + 2,
            };

            let name = row.text("name");
            if name.is_empty() {
                return Err(Error::InvalidVessel {
                    message: format!("vessel name must not be empty at line {}", row.line),
                });
            }

            let params = VesselParams {
                speed: row.number("speed", &name)?,
                draft: row.number("draft", &name)?,
                beam: row.number("beam", &name)?,
                ship_length: row.number("ship_length", &name)?,
                hp_req: row.number("hp_req", &name)?,
                fuel_rate: row.number("fuel_rate", &name)?,
                base_weight: row.number("base_weight", &name)?,
                load: row.optional_number("load", &name, 0.0)?,
                hull_factor: row.optional_number("hull_factor", &name, 1.0)?,
                fouling_factor: row.optional_number("fouling_factor", &name, 1.0)?,
                sea_state_factor: row.optional_number("sea_state_factor", &name, 1.0)?,
            };
            params.validate().map_err(|err| Error::InvalidVessel {
                message: format!("vessel '{name}' at line {}: {err}", row.line),
            })?;

            let key = normalize_name(&name);
            if presets.contains_key(&key) {
                return Err(Error::DuplicateVessel { name });
            }
            presets.insert(key, VesselPreset { name, params });
        }

        Ok(Self {
            presets,
            source: None,
        })
    }

    /// Get a preset by name (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&VesselParams> {
        self.presets
            .get(&normalize_name(name))
            .map(|preset| &preset.params)
    }

    /// Like [`Self::get`], but unknown names produce an error with suggestions.
    pub fn lookup(&self, name: &str) -> Result<&VesselParams> {
        self.get(name).ok_or_else(|| Error::UnknownVessel {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name),
        })
    }

    /// Sorted preset names.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.presets.values().map(|p| p.name.as_str()).collect();
        names.sort_unstable();
        names
    }

    /// All presets sorted by name.
    pub fn presets_sorted(&self) -> Vec<(&str, &VesselParams)> {
        let mut presets: Vec<(&str, &VesselParams)> = self
            .presets
            .values()
            .map(|p| (p.name.as_str(), &p.params))
            .collect();
        presets.sort_by(|a, b| a.0.cmp(b.0));
        presets
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    fn fuzzy_matches(&self, name: &str) -> Vec<String> {
        let needle = normalize_name(name);
        let mut scored: Vec<(f64, &str)> = self
            .presets
            .iter()
            .map(|(key, preset)| {
                (
                    strsim::normalized_damerau_levenshtein(&needle, key),
                    preset.name.as_str(),
                )
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(MAX_SUGGESTIONS)
            .map(|(_, name)| name.to_string())
            .collect()
    }
}

struct RowReader<'a> {
    record: &'a StringRecord,
    index_map: &'a BTreeMap<&'static str, usize>,
    line: usize,
}

impl RowReader<'_> {
    fn raw(&self, field: &str) -> Option<&str> {
        self.index_map
            .get(field)
            .and_then(|&i| self.record.get(i))
            .map(str::trim)
    }

    fn text(&self, field: &str) -> String {
        self.raw(field).unwrap_or_default().to_string()
    }

    fn number(&self, field: &str, vessel: &str) -> Result<f64> {
        let raw = self.raw(field).filter(|s| !s.is_empty()).ok_or_else(|| Error::InvalidVessel {
            message: format!("missing {field} for vessel '{vessel}' at line {}", self.line),
        })?;
        self.parse(raw, field, vessel)
    }

    fn optional_number(&self, field: &str, vessel: &str, default: f64) -> Result<f64> {
        match self.raw(field).filter(|s| !s.is_empty()) {
            Some(raw) => self.parse(raw, field, vessel),
            None => Ok(default),
        }
    }

    fn parse(&self, raw: &str, field: &str, vessel: &str) -> Result<f64> {
        raw.parse::<f64>().map_err(|e| Error::InvalidVessel {
            message: format!(
                "invalid {field} for vessel '{vessel}' at line {}: {e}",
                self.line
            ),
        })
    }
}

fn map_columns(headers: &StringRecord) -> BTreeMap<&'static str, usize> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let mut index_map = BTreeMap::new();
    for (canon, alts) in COLUMN_SYNONYMS {
        if let Some(idx) = alts
            .iter()
            .find_map(|alt| normalized.iter().position(|h| h == &normalize_header(alt)))
        {
            index_map.insert(*canon, idx);
        }
    }
    index_map
}

fn normalize_header(header: &str) -> String {
    header
        .to_ascii_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect()
}

/// Normalize a vessel name for case-insensitive lookup.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CSV: &str = "name,speed,draft,beam,shipLength,hpReq,fuelRate,baseWeight,load\n\
                       Panamax,14,12,32.2,225,18000,0.19,15000,50000\n\
                       Feeder,16,8,23,150,9000,0.2,5000,8000\n";

    #[test]
    fn parses_camel_case_headers() {
        let catalog = VesselCatalog::from_reader(Cursor::new(CSV)).unwrap();
        assert_eq!(catalog.len(), 2);
        let panamax = catalog.get("panamax").unwrap();
        assert_eq!(panamax.ship_length, 225.0);
        assert_eq!(panamax.hull_factor, 1.0);
        assert_eq!(catalog.names(), vec!["Feeder", "Panamax"]);
    }

    #[test]
    fn unknown_preset_suggests_close_names() {
        let catalog = VesselCatalog::from_reader(Cursor::new(CSV)).unwrap();
        match catalog.lookup("Panamx") {
            Err(Error::UnknownVessel { suggestions, .. }) => {
                assert_eq!(suggestions, vec!["Panamax".to_string()]);
            }
            other => panic!("expected UnknownVessel, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let csv = format!("{CSV}panamax,13,12,32,225,18000,0.19,15000,0\n");
        let err = VesselCatalog::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(matches!(err, Error::DuplicateVessel { .. }));
    }

    #[test]
    fn missing_columns_are_reported() {
        let err = VesselCatalog::from_reader(Cursor::new("name,speed\nA,10\n")).unwrap_err();
        assert!(err.to_string().contains("draft"));
    }

    #[test]
    fn invalid_numbers_name_the_line() {
        let csv = "name,speed,draft,beam,length,hp,fuelRate,lightship\nBad,fast,1,1,1,1,1,1\n";
        let err = VesselCatalog::from_reader(Cursor::new(csv)).unwrap_err();
        assert!(err.to_string().contains("line 2"), "{err}");
    }
}
