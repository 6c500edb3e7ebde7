use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("invalid status: {0} (expected \"accepted\" or \"declined\")")]
    InvalidStatus(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("entity error: {0}")]
    Entity(#[from] catalyst_entity::EntityError),

    #[error("store error: {0}")]
    Store(#[from] catalyst_store::StoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SdkError {
    pub(crate) fn not_found(kind: &'static str, id: &str) -> Self {
        SdkError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
