//! Error types for the pigment_mix library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pigment_mix operations
pub type Result<T> = std::result::Result<T, MixError>;

/// Errors raised while parsing colors, building palettes or loading data.
///
/// The solvers themselves never fail: degenerate inputs produce defined
/// fallback values instead of errors.
#[derive(Error, Debug)]
pub enum MixError {
    /// Hex color string could not be parsed
    #[error("Invalid hex color '{value}': {reason}")]
    InvalidHex { value: String, reason: String },

    /// Palette does not have the shape a solver needs
    #[error("Invalid palette: {reason}")]
    InvalidPalette { reason: String },

    /// A table or base selection refers to a pigment the palette lacks
    #[error("Unknown pigment: {id}")]
    UnknownPigment { id: String },

    /// Catalog data could not be loaded
    #[error("Failed to load catalog: {message}")]
    CatalogLoad {
        message: String,
        #[source]
        source: Option<serde_json::Error>,
    },

    /// Configuration file could not be read or written
    #[error("Configuration I/O error at {}", .path.display())]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration JSON is malformed
    #[error("Configuration parse error")]
    ConfigParse {
        #[source]
        source: serde_json::Error,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl MixError {
    /// Create an invalid hex error with context
    pub fn invalid_hex(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHex {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid palette error with context
    pub fn invalid_palette(reason: impl Into<String>) -> Self {
        Self::InvalidPalette {
            reason: reason.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error indicates a condition the caller can recover from
    /// by asking for different input
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            MixError::InvalidHex { .. }
                | MixError::InvalidParameter { .. }
                | MixError::UnknownPigment { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            MixError::InvalidHex { value, .. } => {
                format!("'{}' is not a color. Use a hex code such as #8D93AD.", value)
            }
            MixError::UnknownPigment { id } => {
                format!("The paint '{}' is not part of the selected palette.", id)
            }
            MixError::InvalidParameter { parameter, .. } => {
                format!("The setting '{}' is out of range.", parameter)
            }
            MixError::ConfigIo { .. } | MixError::ConfigParse { .. } => {
                "Could not read the settings file. Defaults will be used instead.".to_string()
            }
            _ => "Color mixing data is unavailable. Please try again later.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MixError::invalid_hex("#GG0000", "non-hex digit");
        assert_eq!(err.to_string(), "Invalid hex color '#GG0000': non-hex digit");

        let err = MixError::UnknownPigment {
            id: "viridian".into(),
        };
        assert_eq!(err.to_string(), "Unknown pigment: viridian");
    }

    #[test]
    fn test_recoverable_classification() {
        assert!(MixError::invalid_hex("x", "too short").is_recoverable());
        assert!(MixError::invalid_parameter("learning_rate", 3.0).is_recoverable());
        assert!(!MixError::invalid_palette("no white pigment").is_recoverable());
    }

    #[test]
    fn test_user_message_mentions_input() {
        let err = MixError::invalid_hex("blue-ish", "missing digits");
        assert!(err.user_message().contains("blue-ish"));
    }
}
