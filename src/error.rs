//! Error types and handling for `filmroute`

use thiserror::Error;

/// Main error type for the `filmroute` crate
#[derive(Error, Debug)]
pub enum FilmRouteError {
    /// A coordinate outside [-90, 90] x [-180, 180] or not finite
    #[error("Invalid coordinate: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// No record in the dataset carries the requested year
    #[error("No records found for year {year}")]
    NoMatchingYear { year: i32 },

    /// Dataset or geocache parsing errors
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding or decoding errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl FilmRouteError {
    /// Create a new invalid coordinate error
    #[must_use]
    pub fn invalid_coordinate(latitude: f64, longitude: f64) -> Self {
        Self::InvalidCoordinate {
            latitude,
            longitude,
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Whether the caller can treat this as an empty result instead of a failure
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, FilmRouteError::NoMatchingYear { .. })
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FilmRouteError::InvalidCoordinate {
                latitude,
                longitude,
            } => format!(
                "Coordinate ({latitude}, {longitude}) is out of range. Latitude must be within [-90, 90] and longitude within [-180, 180]."
            ),
            FilmRouteError::NoMatchingYear { year } => {
                format!("No filming locations were recorded for {year}.")
            }
            FilmRouteError::Parse { message } => format!("Could not read dataset: {message}"),
            FilmRouteError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            FilmRouteError::Io { .. } => {
                "File operation failed. Please check the path and file permissions.".to_string()
            }
            FilmRouteError::Json { .. } => "Malformed JSON input.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let coord_err = FilmRouteError::invalid_coordinate(91.0, 0.0);
        assert!(matches!(coord_err, FilmRouteError::InvalidCoordinate { .. }));

        let parse_err = FilmRouteError::parse("missing header");
        assert!(matches!(parse_err, FilmRouteError::Parse { .. }));

        let config_err = FilmRouteError::config("bad k");
        assert!(matches!(config_err, FilmRouteError::Config { .. }));
    }

    #[test]
    fn test_only_missing_year_is_recoverable() {
        assert!(FilmRouteError::NoMatchingYear { year: 1999 }.is_recoverable());
        assert!(!FilmRouteError::invalid_coordinate(0.0, 200.0).is_recoverable());
        assert!(!FilmRouteError::parse("x").is_recoverable());
    }

    #[test]
    fn test_user_messages() {
        let coord_err = FilmRouteError::invalid_coordinate(0.0, 200.0);
        assert!(coord_err.user_message().contains("out of range"));

        let year_err = FilmRouteError::NoMatchingYear { year: 1999 };
        assert!(year_err.user_message().contains("1999"));

        let parse_err = FilmRouteError::parse("missing header");
        assert!(parse_err.user_message().contains("missing header"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FilmRouteError = io_err.into();
        assert!(matches!(err, FilmRouteError::Io { .. }));
    }
}
