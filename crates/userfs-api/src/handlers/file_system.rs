//! User file system handlers: browse, folders, upload, download, delete, quota.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::Response;
use bytes::Bytes;

use userfs_core::error::AppError;
use userfs_entity::file::{DirectoryEntry, FileUploadCommand};
use userfs_entity::storage::StorageQuota;
use userfs_service::file::FileDownload;

use crate::dto::request::{CreateFolderRequest, PathQuery, UploadFileData};
use crate::dto::response::RestResponse;
use crate::error::ApiError;
use crate::extractors::{AccountUser, ApiJson, ApiMultipart, ApiQuery};
use crate::state::AppState;

type TreeResponse = Result<Json<RestResponse<DirectoryEntry>>, ApiError>;

/// GET /action/file-system
pub async fn browse(State(state): State<AppState>, user: AccountUser) -> TreeResponse {
    let tree = state.file_manager.browse(&user.user).await?;
    Ok(Json(RestResponse::ok(tree)))
}

/// POST /action/file-system/folders
pub async fn create_folder(
    State(state): State<AppState>,
    user: AccountUser,
    ApiJson(req): ApiJson<CreateFolderRequest>,
) -> TreeResponse {
    let tree = state
        .file_manager
        .create_folder(user.path_command(req.path))
        .await?;
    Ok(Json(RestResponse::ok(tree)))
}

/// POST /action/file-system/files, multipart with `file` and JSON `data` parts
pub async fn upload_file(
    State(state): State<AppState>,
    user: AccountUser,
    ApiMultipart(mut multipart): ApiMultipart,
) -> TreeResponse {
    let mut data = UploadFileData::default();
    let mut part_name: Option<String> = None;
    let mut content: Option<Bytes> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "data" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                data = serde_json::from_str(&text)
                    .map_err(|e| AppError::validation(format!("Invalid upload data: {e}")))?;
            }
            "file" => {
                part_name = field.file_name().map(String::from);
                content = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::validation(format!("Read error: {e}")))?,
                );
            }
            _ => {}
        }
    }

    let content = content.ok_or_else(|| AppError::validation("A file is required"))?;
    let filename = data
        .filename
        .filter(|f| !f.trim().is_empty())
        .or(part_name)
        .unwrap_or_default();

    let cmd = FileUploadCommand {
        user: user.user.clone(),
        path: data.path,
        filename,
        size: content.len() as u64,
        overwrite: data.overwrite,
        comment: data.comment,
    };

    let stream = futures::stream::once(async move { Ok::<_, std::io::Error>(content) });
    let tree = state
        .file_manager
        .upload_file(cmd, Box::pin(stream))
        .await?;
    Ok(Json(RestResponse::ok(tree)))
}

/// GET /action/file-system/files?path=...
pub async fn download_file(
    State(state): State<AppState>,
    user: AccountUser,
    ApiQuery(query): ApiQuery<PathQuery>,
) -> Result<Response, ApiError> {
    let download = state
        .file_manager
        .download(user.path_command(query.path))
        .await?;
    download_response(download)
}

/// DELETE /action/file-system?path=...
pub async fn delete_path(
    State(state): State<AppState>,
    user: AccountUser,
    ApiQuery(query): ApiQuery<PathQuery>,
) -> TreeResponse {
    let tree = state
        .file_manager
        .delete_path(user.path_command(query.path))
        .await?;
    Ok(Json(RestResponse::ok(tree)))
}

/// GET /action/file-system/quota
pub async fn quota(
    State(state): State<AppState>,
    user: AccountUser,
) -> Result<Json<RestResponse<StorageQuota>>, ApiError> {
    let quota = state.file_manager.quota(&user.user).await?;
    Ok(Json(RestResponse::ok(quota)))
}

/// Streams a file as an attachment.
pub fn download_response(download: FileDownload) -> Result<Response, ApiError> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, download.content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", download.filename),
        );

    if let Some(length) = download.content_length {
        builder = builder.header(header::CONTENT_LENGTH, length);
    }

    builder
        .body(Body::from_stream(download.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")).into())
}
