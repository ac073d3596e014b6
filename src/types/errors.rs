use serde::Serialize;
use thiserror::Error;

/// Failures of the export pipeline (archive access, extraction, history I/O).
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Not a valid ZIP archive: {0}")]
    NotAnArchive(String),
    #[error("Invalid export structure: {0}")]
    InvalidStructure(String),
    #[error("Malformed input: {0}")]
    MalformedInput(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(String),
}

/// Error surface handed to the presentation layer.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Internal error: {0}")]
    Internal(String),
    #[error("Busy: {0}")]
    Busy(String),
}

impl Serialize for CommandError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

pub type CommandResult<T> = Result<T, CommandError>;

#[cfg(test)]
#[path = "tests/errors_tests.rs"]
mod tests;
