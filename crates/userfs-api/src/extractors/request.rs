//! `Json`, `Query` and `Multipart` wrappers whose rejections use the
//! standard response envelope.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Multipart, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tracing::debug;

use userfs_core::error::AppError;

use crate::error::ApiError;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection).into()),
        }
    }
}

/// Query string parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(query_rejection(rejection).into()),
        }
    }
}

/// Multipart form body.
#[derive(Debug)]
pub struct ApiMultipart(pub Multipart);

impl<S> FromRequest<S> for ApiMultipart
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Multipart::from_request(req, state).await {
            Ok(multipart) => Ok(Self(multipart)),
            Err(rejection) => Err(multipart_rejection(rejection).into()),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    debug!(reason = %rejection.body_text(), "Rejected JSON body");
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::validation("Expected a request body with content type application/json")
        }
        _ => AppError::validation("The request body is not valid JSON for this operation"),
    }
}

fn query_rejection(rejection: QueryRejection) -> AppError {
    debug!(reason = %rejection.body_text(), "Rejected query string");
    AppError::validation("The query string is invalid")
}

fn multipart_rejection(rejection: MultipartRejection) -> AppError {
    debug!(reason = %rejection.body_text(), "Rejected multipart body");
    AppError::validation("Expected a multipart/form-data request body")
}
