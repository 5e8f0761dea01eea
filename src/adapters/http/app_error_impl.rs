use crate::app_error::{AppError, ErrorCode};
use axum::Json;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use phishnet_types::ErrorBody;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the error before it gets converted into a status response.
        tracing::error!(error = ?self, "Request failed");

        let message = self.to_string();
        match self {
            AppError::InvalidInput(msg) => {
                error_resp(StatusCode::BAD_REQUEST, ErrorCode::InvalidInput, Some(msg))
            }
            AppError::InvalidApiKey => {
                error_resp(StatusCode::UNAUTHORIZED, ErrorCode::InvalidApiKey, Some(message))
            }
            AppError::ApiKeyExpired => {
                error_resp(StatusCode::UNAUTHORIZED, ErrorCode::ApiKeyExpired, Some(message))
            }
            AppError::DuplicateKey => {
                error_resp(StatusCode::CONFLICT, ErrorCode::DuplicateKey, Some(message))
            }
            AppError::AnalysisFailed(_) => error_resp(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorCode::AnalysisFailed,
                Some(message),
            ),
            AppError::Storage(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageError, None)
            }
            AppError::Internal(_) => {
                error_resp(StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::InternalError, None)
            }
        }
    }
}

fn error_resp(status: StatusCode, code: ErrorCode, message: Option<String>) -> Response {
    (status, Json(ErrorBody { code, message })).into_response()
}
