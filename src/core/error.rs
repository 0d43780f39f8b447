use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Persisted data under a key exists but is not valid JSON for its
    /// collection. Opening the store fails rather than silently replacing
    /// the blob with an empty one, so the stored data stays inspectable.
    #[error("Corrupted data under key '{0}': {1}")]
    Corrupted(String, String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;
