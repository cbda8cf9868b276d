use std::error::Error;
use std::fmt;

use url::ParseError;

#[derive(Debug)]
pub enum ReportError {
    ConfigError(String),
    InvalidValue { field: String, details: String },
    Parse(ParseError),
    Json(serde_json::Error),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::ConfigError(s) => write!(f, "Config error: {}", s),
            ReportError::InvalidValue { field, details } => {
                write!(f, "Invalid value for {}: {}", field, details)
            }
            ReportError::Parse(e) => write!(f, "{}", e),
            ReportError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl Error for ReportError {}

impl From<ParseError> for ReportError {
    fn from(error: ParseError) -> Self {
        ReportError::Parse(error)
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(error: serde_json::Error) -> Self {
        ReportError::Json(error)
    }
}
