use thiserror::Error;

pub use phishnet_types::ErrorCode;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Invalid API Key")]
    InvalidApiKey,

    #[error("API Key has expired")]
    ApiKeyExpired,

    #[error("This API key already exists")]
    DuplicateKey,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidInput(_) => ErrorCode::InvalidInput,
            AppError::InvalidApiKey => ErrorCode::InvalidApiKey,
            AppError::ApiKeyExpired => ErrorCode::ApiKeyExpired,
            AppError::DuplicateKey => ErrorCode::DuplicateKey,
            AppError::AnalysisFailed(_) => ErrorCode::AnalysisFailed,
            AppError::Storage(_) => ErrorCode::StorageError,
            AppError::Internal(_) => ErrorCode::InternalError,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
