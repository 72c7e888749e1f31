#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("update not found: {0}")]
    NotFound(uuid::Uuid),
    #[error("failed to create storage directory: {0}")]
    StorageDirCreation(std::io::Error),
    #[error("failed to write update file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to read update file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to delete update file: {0}")]
    FileDelete(std::io::Error),
    #[error("failed to serialize update: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize update: {0}")]
    Deserialization(serde_json::Error),
}

pub type UpdateResult<T> = std::result::Result<T, UpdateError>;
