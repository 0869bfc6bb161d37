use std::path::PathBuf;

use thiserror::Error;

/// Root error type shared across the workspace.
#[derive(Debug, Error)]
pub enum DwalkError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Infrastructure error: {0}")]
    Infrastructure(#[from] InfrastructureError),

    #[error("Presentation error: {0}")]
    Presentation(#[from] PresentationError),
}

pub type Result<T> = std::result::Result<T, DwalkError>;

/// Invalid user input detected while building separators, predicates or sort specs.
///
/// None of these are retried: they abort the construction step that produced them.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid distribution argument '{input}': {reason}")]
    InvalidDistribution { input: String, reason: String },

    #[error("Invalid byte size '{token}': {reason}")]
    InvalidByteSize { token: String, reason: String },

    #[error("Duplicated separator \"{value}\"")]
    DuplicateSeparator { value: u64 },

    #[error("Too many separators: at most {max} are allowed")]
    SeparatorCapacity { max: usize },

    #[error("Invalid --{kind} argument '{input}': {reason}")]
    PredicateConstruction {
        kind: String,
        input: String,
        reason: String,
    },

    #[error("can't find file {path}: {source}")]
    ReferenceFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid sort field: {field}")]
    InvalidSortField { field: String },

    #[error("Exceeded maximum number of sort fields: {max}")]
    TooManySortFields { max: usize },
}

pub type DomainResult<T> = std::result::Result<T, DomainError>;

/// Infrastructure-layer errors.
#[derive(Debug, Error)]
pub enum InfrastructureError {
    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File system operation failed: {operation} on '{path}': {source}")]
    FileSystemOperation {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {format} output: {details}")]
    SerializationError { format: String, details: String },

    #[error("Output error: {message}")]
    OutputError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

pub type InfraResult<T> = std::result::Result<T, InfrastructureError>;

/// Presentation-layer errors.
#[derive(Debug, Error)]
pub enum PresentationError {
    #[error("Invalid CLI value: {flag} = {value} - {reason}")]
    InvalidValue {
        flag: String,
        value: String,
        reason: String,
    },
}

impl From<std::io::Error> for InfrastructureError {
    fn from(err: std::io::Error) -> Self {
        Self::OutputError { message: err.to_string(), source: Some(Box::new(err)) }
    }
}

impl From<std::io::Error> for DwalkError {
    fn from(err: std::io::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}

impl From<serde_json::Error> for InfrastructureError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            format: "JSON".to_string(),
            details: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for DwalkError {
    fn from(err: serde_json::Error) -> Self {
        InfrastructureError::from(err).into()
    }
}
