//! Configuration errors
//!
//! Loading settings is the only fallible surface of the library; the
//! simulation itself has no runtime error paths.

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    /// Settings file could not be read
    Io(std::io::Error),
    /// Settings document is not valid JSON for `Settings`
    Parse(serde_json::Error),
    /// A field parsed but holds an unusable value
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read settings: {err}"),
            Self::Parse(err) => write!(f, "failed to parse settings: {err}"),
            Self::Invalid { field, reason } => write!(f, "invalid setting `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Invalid { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_display_names_field() {
        let err = ConfigError::Invalid {
            field: "bullets_allowed",
            reason: "must be at least 1",
        };
        assert_eq!(
            err.to_string(),
            "invalid setting `bullets_allowed`: must be at least 1"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
