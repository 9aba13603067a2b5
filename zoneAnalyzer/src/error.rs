use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// A required input dataset is missing or empty; the scan cannot proceed
    DataUnavailable(String),
    InvalidConfig(String),
    Cancelled,
    IoError(std::io::Error),
    CsvError(csv::Error),
    JsonError(serde_json::Error),
    MissingColumn { file: String, expected: Vec<String> },
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::IoError(err)
    }
}

impl From<csv::Error> for EngineError {
    fn from(err: csv::Error) -> Self {
        EngineError::CsvError(err)
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::JsonError(err)
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::DataUnavailable(s) => write!(f, "Required data unavailable: {}", s),
            EngineError::InvalidConfig(s) => write!(f, "Invalid scan configuration: {}", s),
            EngineError::Cancelled => write!(f, "Scan cancelled before completion"),
            EngineError::IoError(e) => write!(f, "IO error: {}", e),
            EngineError::CsvError(e) => write!(f, "CSV error: {}", e),
            EngineError::JsonError(e) => write!(f, "JSON error: {}", e),
            EngineError::MissingColumn { file, expected } => {
                write!(f, "{}: none of the columns [{}] found", file, expected.join(", "))
            }
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::IoError(e) => Some(e),
            EngineError::CsvError(e) => Some(e),
            EngineError::JsonError(e) => Some(e),
            _ => None,
        }
    }
}
