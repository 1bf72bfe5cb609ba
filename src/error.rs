//! Crate error type.

/// Errors produced while loading instances, validating configuration,
/// or repairing assignments.
#[derive(Debug)]
pub enum SolverError {
    /// Instance text could not be parsed.
    Parse(String),
    /// Configuration values are out of range or malformed.
    Config(String),
    /// The feasibility oracle found no capacity-respecting completion.
    Infeasible,
    /// I/O error while reading an instance file.
    Io(std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SolverError>;

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Parse(msg) => write!(f, "Parse error: {}", msg),
            SolverError::Config(msg) => write!(f, "Config error: {}", msg),
            SolverError::Infeasible => write!(f, "No feasible assignment exists"),
            SolverError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for SolverError {}

impl From<std::io::Error> for SolverError {
    fn from(e: std::io::Error) -> Self {
        SolverError::Io(e)
    }
}

impl From<serde_json::Error> for SolverError {
    fn from(e: serde_json::Error) -> Self {
        SolverError::Config(e.to_string())
    }
}
