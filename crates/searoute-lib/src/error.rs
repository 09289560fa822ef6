use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the searoute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Routing outcomes such as "no path" are not represented here; they are
/// reported per strategy through [`crate::routing::RouteFailure`].
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a grid raster cannot be used (zero rows, ragged rows, bad resolution).
    #[error("malformed grid: {message}")]
    MalformedGrid { message: String },

    /// Raised when vessel parameters fail validation.
    #[error("invalid vessel parameters: {message}")]
    InvalidVessel { message: String },

    /// Raised when a vessel preset name could not be found in the catalog.
    #[error("unknown vessel preset: {name}{}", format_suggestions(.suggestions))]
    UnknownVessel {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when duplicate vessel names are encountered during catalog load.
    #[error("duplicate vessel preset encountered: {name}")]
    DuplicateVessel { name: String },

    /// Raised when an environmental snapshot payload cannot be decoded.
    #[error("malformed environmental snapshot: {message}")]
    MalformedSnapshot { message: String },

    /// Raised when a no-go polygon has too few vertices or non-finite coordinates.
    #[error("invalid no-go zone {index}: {message}")]
    InvalidZone { index: usize, message: String },

    /// Raised when a file could not be read from the resolved path.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Wrapper for CSV decoding errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_vessel_lists_single_suggestion() {
        let err = Error::UnknownVessel {
            name: "panamx".to_string(),
            suggestions: vec!["Panamax".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown vessel preset: panamx. Did you mean 'Panamax'?"
        );
    }

    #[test]
    fn unknown_vessel_without_suggestions_is_plain() {
        let err = Error::UnknownVessel {
            name: "zzz".to_string(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "unknown vessel preset: zzz");
    }
}
