use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HallTabError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV output failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input directory does not exist or is not a directory: {path}")]
    InvalidInput { path: String },

    #[error("Output name must be a bare file name: {name}")]
    InvalidOutputName { name: String },

    #[error("Output table would overwrite measurement report: {path}")]
    OutputIsReport { path: String },

    #[error("Malformed measurement file {path}: {reason}")]
    MalformedFile { path: String, reason: MalformedReason },

    #[error("Configuration error: {message}")]
    Config { message: String },
}

/// Why a measurement file could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MalformedReason {
    /// A marker was found on the final line, so there is no data line after it.
    MarkerOnLastLine { marker: String },
    /// The data line after a marker is shorter than the field positions require.
    TooFewTokens {
        marker: String,
        needed: usize,
        found: usize,
    },
    /// The file could not be read.
    Unreadable { message: String },
}

impl fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MalformedReason::MarkerOnLastLine { marker } => {
                write!(f, "marker '{}' is on the last line", marker)
            }
            MalformedReason::TooFewTokens {
                marker,
                needed,
                found,
            } => write!(
                f,
                "line after '{}' has {} tokens, need at least {}",
                marker, found, needed
            ),
            MalformedReason::Unreadable { message } => write!(f, "unreadable: {}", message),
        }
    }
}

impl HallTabError {
    /// True for errors raised by input validation, before any output is written.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            HallTabError::InvalidInput { .. }
                | HallTabError::InvalidOutputName { .. }
                | HallTabError::OutputIsReport { .. }
        )
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for HallTabError {
    fn user_message(&self) -> String {
        match self {
            HallTabError::InvalidInput { path } => {
                format!("Not a directory: {}", path)
            }
            HallTabError::InvalidOutputName { name } => {
                format!("Invalid output file name: '{}'", name)
            }
            HallTabError::OutputIsReport { path } => {
                format!("Refusing to overwrite measurement report: {}", path)
            }
            HallTabError::MalformedFile { path, reason } => {
                format!("Could not extract data from {}: {}", path, reason)
            }
            HallTabError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            HallTabError::InvalidInput { .. } => Some(
                "Pass the directory that holds the HMS-3000 .txt reports (e.g., halltab ./measurements)".to_string()
            ),
            HallTabError::InvalidOutputName { .. } => Some(
                "Use a plain file name such as results.csv; the table is always written inside the scanned directory.".to_string()
            ),
            HallTabError::OutputIsReport { .. } => Some(
                "Pick an output name that is not one of the reports, e.g. --output-name output.csv".to_string()
            ),
            HallTabError::MalformedFile { .. } => Some(
                "Check the report was exported completely, or use --on-malformed skip to leave it out of the table.".to_string()
            ),
            HallTabError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate one with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, HallTabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = HallTabError::InvalidInput {
            path: "/no/such/dir".to_string(),
        };
        assert!(error.user_message().contains("/no/such/dir"));
        assert!(error.suggestion().is_some());
        assert!(error.is_invalid_input());

        let error = HallTabError::OutputIsReport {
            path: "data/sample.txt".to_string(),
        };
        assert!(error.is_invalid_input());
        assert!(error.user_message().contains("data/sample.txt"));
    }

    #[test]
    fn test_malformed_reason_display() {
        let reason = MalformedReason::TooFewTokens {
            marker: "Nb[/cm^3]".to_string(),
            needed: 7,
            found: 3,
        };
        assert_eq!(
            reason.to_string(),
            "line after 'Nb[/cm^3]' has 3 tokens, need at least 7"
        );

        let error = HallTabError::MalformedFile {
            path: "a.txt".to_string(),
            reason,
        };
        assert!(!error.is_invalid_input());
        assert!(error.user_message().contains("a.txt"));
    }
}
