//! Maps domain errors to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{debug, error};

use userfs_core::error::{AppError, ErrorKind, FileSystemError, FileSystemMessageCode};

use crate::dto::response::{Message, RestResponse};

/// Message returned for failures whose details must stay on the server.
const GENERIC_ERROR_MESSAGE: &str = "An unknown error has occurred";

/// Error type returned by every handler.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// The HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self.0.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::Configuration | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ErrorKind::FileSystem(code) => file_system_status(code),
        }
    }

    /// The machine-readable code sent to clients.
    pub fn code(&self) -> String {
        match self.0.kind {
            ErrorKind::FileSystem(code) => code.key().to_string(),
            kind => format!("BasicMessageCode.{kind}"),
        }
    }
}

/// HTTP status for a file system error code.
pub fn file_system_status(code: FileSystemMessageCode) -> StatusCode {
    match code {
        FileSystemMessageCode::PathNotFound => StatusCode::NOT_FOUND,
        FileSystemMessageCode::PathAlreadyExists | FileSystemMessageCode::PathNotEmpty => {
            StatusCode::CONFLICT
        }
        FileSystemMessageCode::NotEnoughSpace => StatusCode::INSUFFICIENT_STORAGE,
        FileSystemMessageCode::IoError => StatusCode::INTERNAL_SERVER_ERROR,
        FileSystemMessageCode::PathIsEmpty
        | FileSystemMessageCode::InvalidPath
        | FileSystemMessageCode::PathMaxDepth
        | FileSystemMessageCode::PathMaxLength
        | FileSystemMessageCode::PathIsDirectory => StatusCode::BAD_REQUEST,
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<FileSystemError> for ApiError {
    fn from(err: FileSystemError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();

        let message = if status.is_server_error() && status != StatusCode::INSUFFICIENT_STORAGE {
            error!(code = %code, error = %self.0.message, source = ?self.0.source, "Internal server error");
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            debug!(code = %code, error = %self.0.message, "Request failed");
            self.0.message
        };

        let body = RestResponse::<()>::failure(vec![Message::error(code, message)]);
        (status, Json(body)).into_response()
    }
}
