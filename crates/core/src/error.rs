use crate::record::ConsultId;

/// Failures surfaced by the consult store and wizard controller.
///
/// Validation problems are deliberately absent from this taxonomy: a section
/// that fails validation is re-rendered with its `FieldErrors` attached and
/// never escapes the wizard as an error. What remains is lookup failure and
/// persistence failure, both of which propagate to the caller.
#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("consult {0} not found")]
    NotFound(ConsultId),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write consult file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read consult file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize consult: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize consult: {0}")]
    Deserialization(serde_json::Error),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
