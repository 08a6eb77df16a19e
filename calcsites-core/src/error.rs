use std::fmt;

/// Custom error type for calcsites operations
#[derive(Debug)]
pub enum CalcSitesError {
    /// Configuration errors
    Config(String),
    /// File I/O errors
    Io(std::io::Error),
    /// JSON serialization errors
    Json(serde_json::Error),
    /// Site bundle could not be materialized
    Site(String),
    /// Deployment tool could not be run
    Deploy(String),
    /// Generic errors with message
    Generic(String),
}

impl fmt::Display for CalcSitesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcSitesError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CalcSitesError::Io(err) => write!(f, "I/O error: {}", err),
            CalcSitesError::Json(err) => write!(f, "JSON error: {}", err),
            CalcSitesError::Site(msg) => write!(f, "Site error: {}", msg),
            CalcSitesError::Deploy(msg) => write!(f, "Deploy error: {}", msg),
            CalcSitesError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for CalcSitesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CalcSitesError::Io(err) => Some(err),
            CalcSitesError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CalcSitesError {
    fn from(err: std::io::Error) -> Self {
        CalcSitesError::Io(err)
    }
}

impl From<serde_json::Error> for CalcSitesError {
    fn from(err: serde_json::Error) -> Self {
        CalcSitesError::Json(err)
    }
}

impl From<String> for CalcSitesError {
    fn from(err: String) -> Self {
        CalcSitesError::Generic(err)
    }
}

// Configuration loading reports through anyhow
impl From<anyhow::Error> for CalcSitesError {
    fn from(err: anyhow::Error) -> Self {
        CalcSitesError::Config(format!("{:#}", err))
    }
}

/// Result type alias for calcsites operations
pub type Result<T> = std::result::Result<T, CalcSitesError>;
